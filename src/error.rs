//=========================================================================
// Error Types
//
// Crate-wide error and result types.
//
// Every native-boundary call that can fail returns `Result<T>`. There is
// no panicking path and no implicit error channel: a creation failure is
// surfaced at the call site that triggered it, never stored inside a
// usable-looking handle.
//
// The driver's `last_error()` diagnostic string exists alongside this
// (see `driver` module) but is advisory text only.
//
//=========================================================================

//=== Error ===============================================================

/// Platform layer errors.
///
/// Covers subsystem lifecycle, resource creation, and per-call failures
/// at the driver boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operation required a subsystem that was not requested at init.
    SubsystemNotInitialized {
        /// Subsystem name ("video", "events", ...).
        subsystem: &'static str,
    },

    /// The driver failed to create a resource.
    ///
    /// The native call returned no usable handle; no wrapper object is
    /// constructed in this case.
    CreationFailed {
        /// Resource kind ("window", "renderer", "texture", "surface").
        resource: &'static str,

        /// Driver-supplied reason.
        reason: String,
    },

    /// An operation referenced a handle the driver does not know.
    ///
    /// Raised for handles that were never created as well as handles
    /// that were already destroyed. Never silently accepted.
    UnknownHandle {
        /// Resource kind the stale handle claimed to be.
        resource: &'static str,
    },

    /// The driver cannot perform the requested operation.
    Unsupported {
        /// What was attempted.
        what: &'static str,
    },

    /// A parameter was structurally invalid for the operation.
    InvalidParameter {
        /// What was wrong.
        what: &'static str,
    },

    /// The event queue's pump side has been dropped; pushed events have
    /// nowhere to go.
    QueueClosed,

    /// The event pump was already handed out for this context.
    PumpAlreadyTaken,
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubsystemNotInitialized { subsystem } => {
                write!(f, "{} subsystem was not initialized", subsystem)
            }
            Self::CreationFailed { resource, reason } => {
                write!(f, "{} creation failed: {}", resource, reason)
            }
            Self::UnknownHandle { resource } => {
                write!(f, "unknown {} handle (never created or already destroyed)", resource)
            }
            Self::Unsupported { what } => write!(f, "unsupported operation: {}", what),
            Self::InvalidParameter { what } => write!(f, "invalid parameter: {}", what),
            Self::QueueClosed => write!(f, "event queue is closed"),
            Self::PumpAlreadyTaken => write!(f, "event pump was already taken"),
        }
    }
}

impl std::error::Error for Error {}

//=== Result ==============================================================

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_implements_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<Error>();
    }

    #[test]
    fn display_names_the_resource() {
        let err = Error::CreationFailed {
            resource: "window",
            reason: "driver refused".into(),
        };
        let text = err.to_string();
        assert!(text.contains("window"));
        assert!(text.contains("driver refused"));
    }

    #[test]
    fn unknown_handle_mentions_both_causes() {
        let text = Error::UnknownHandle { resource: "texture" }.to_string();
        assert!(text.contains("never created"));
        assert!(text.contains("already destroyed"));
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(Error::QueueClosed, Error::QueueClosed);
        assert_ne!(
            Error::UnknownHandle { resource: "window" },
            Error::UnknownHandle { resource: "texture" }
        );
    }
}
