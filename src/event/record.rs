//=========================================================================
// Event Records
//
// The in-memory representation of one input/system event.
//
// The reference native ABI models events as a fixed-size union tagged by
// a leading type code, where reading a field that disagrees with the tag
// is undefined. Here the record is an explicit sum type: exactly one
// variant exists per value, selected at construction, and the
// pressed/released distinction is the variant itself rather than a state
// byte that could contradict the tag.
//
// The fixed wire layout lives in `event::codec`; nothing in this module
// overlays raw memory.
//
//=========================================================================

//=== Internal Imports ====================================================

use super::keys::KeySym;

//=== Event ===============================================================

/// One polled input/system event.
///
/// `Unknown` preserves tags this layer defines no variant for, so a
/// record is never dropped on the floor between the queue and the
/// history; it simply dispatches to no observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Application quit requested. No payload.
    Quit,

    /// Key pressed.
    KeyDown(KeyboardEvent),

    /// Key released.
    KeyUp(KeyboardEvent),

    /// A tag this layer does not decode. Dispatches to no observer.
    Unknown {
        /// Raw type tag from the wire.
        tag: u32,
    },
}

impl Event {
    /// Wire tag for quit records.
    pub const TAG_QUIT: u32 = 0x100;

    /// Wire tag for key-press records.
    pub const TAG_KEY_DOWN: u32 = 0x300;

    /// Wire tag for key-release records.
    pub const TAG_KEY_UP: u32 = 0x301;

    /// The record's wire type tag.
    pub const fn tag(&self) -> u32 {
        match self {
            Self::Quit => Self::TAG_QUIT,
            Self::KeyDown(_) => Self::TAG_KEY_DOWN,
            Self::KeyUp(_) => Self::TAG_KEY_UP,
            Self::Unknown { tag } => *tag,
        }
    }

    /// The keyboard payload plus its transition, if this is a keyboard
    /// event.
    pub fn keyboard(&self) -> Option<(KeyState, &KeyboardEvent)> {
        match self {
            Self::KeyDown(payload) => Some((KeyState::Pressed, payload)),
            Self::KeyUp(payload) => Some((KeyState::Released, payload)),
            _ => None,
        }
    }

    pub const fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }
}

//=== KeyState ============================================================

/// Whether a keyboard event is a press or a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

//=== KeyboardEvent =======================================================

/// Payload of a key press/release event.
///
/// Whether the key went down or up is carried by the enclosing
/// [`Event`] variant, not duplicated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// Milliseconds since subsystem init.
    pub timestamp: u32,

    /// Id of the window that had focus when the event fired.
    pub window_id: u32,

    /// True if this is an auto-repeat of a held key.
    pub repeat: bool,

    /// The key, as physical position + logical symbol + modifiers.
    pub keysym: KeySym,
}

impl KeyboardEvent {
    pub const fn new(timestamp: u32, window_id: u32, repeat: bool, keysym: KeySym) -> Self {
        Self { timestamp, window_id, repeat, keysym }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::keys::ScanCode;

    fn sample_keyboard() -> KeyboardEvent {
        KeyboardEvent::new(1234, 1, false, KeySym::from_scancode(ScanCode::W))
    }

    #[test]
    fn tags_match_the_reference_values() {
        assert_eq!(Event::Quit.tag(), 0x100);
        assert_eq!(Event::KeyDown(sample_keyboard()).tag(), 0x300);
        assert_eq!(Event::KeyUp(sample_keyboard()).tag(), 0x301);
        assert_eq!(Event::Unknown { tag: 0x700 }.tag(), 0x700);
    }

    #[test]
    fn keyboard_accessor_reports_the_transition() {
        let down = Event::KeyDown(sample_keyboard());
        let up = Event::KeyUp(sample_keyboard());

        assert_eq!(down.keyboard().map(|(state, _)| state), Some(KeyState::Pressed));
        assert_eq!(up.keyboard().map(|(state, _)| state), Some(KeyState::Released));
    }

    #[test]
    fn keyboard_accessor_is_none_for_other_variants() {
        assert!(Event::Quit.keyboard().is_none());
        assert!(Event::Unknown { tag: 0x200 }.keyboard().is_none());
    }

    #[test]
    fn quit_predicate() {
        assert!(Event::Quit.is_quit());
        assert!(!Event::KeyDown(sample_keyboard()).is_quit());
    }
}
