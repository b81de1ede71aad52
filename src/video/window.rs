//=========================================================================
// Window
//
// Owning wrapper for one driver window handle.
//
//=========================================================================

//=== External Crates =====================================================

use log::{info, warn};

//=== Internal Imports ====================================================

use super::geometry::Size;
use super::DriverCell;
use crate::context::Context;
use crate::driver::WindowId;
use crate::error::{Error, Result};

//=== Window ==============================================================

/// An OS window, exclusively owned.
///
/// Created by [`Window::create`], released exactly once: by
/// [`Window::destroy`] or, as a backstop, on drop. There is no automatic
/// collection beyond that and no handle sharing.
pub struct Window {
    driver: DriverCell,
    id: WindowId,
    title: String,
    size: Size,
    released: bool,
}

impl Window {
    //--- Construction -----------------------------------------------------

    /// Creates a window with the given title and pixel size.
    ///
    /// # Errors
    ///
    /// Fails if the video subsystem was not initialized, if `size` has a
    /// zero dimension, or if the driver refuses the window.
    pub fn create(context: &Context, title: &str, size: Size) -> Result<Self> {
        if size.is_empty() {
            return Err(Error::InvalidParameter { what: "window size must be non-zero" });
        }

        let driver = context.driver();
        let id = driver.borrow_mut().create_window(title, size)?;

        info!(
            target: "video",
            "window {} created: \"{}\" {}x{}",
            id, title, size.width, size.height
        );

        Ok(Self {
            driver,
            id,
            title: title.to_owned(),
            size,
            released: false,
        })
    }

    //--- Accessors --------------------------------------------------------

    /// Driver handle id. Matches the window-id field of keyboard events
    /// targeted at this window.
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn driver(&self) -> DriverCell {
        DriverCell::clone(&self.driver)
    }

    //--- Lifecycle --------------------------------------------------------

    /// Destroys the window, releasing the driver handle.
    ///
    /// Consumes the window: a destroyed window cannot be used or
    /// destroyed again.
    pub fn destroy(mut self) -> Result<()> {
        self.released = true;
        self.driver.borrow_mut().destroy_window(self.id)
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.driver.borrow_mut().destroy_window(self.id) {
            warn!(target: "video", "window {} release failed on drop: {}", self.id, e);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::InitFlags;

    fn context() -> Context {
        Context::init(InitFlags::VIDEO | InitFlags::EVENTS).unwrap()
    }

    #[test]
    fn create_reports_title_and_size() {
        let ctx = context();
        let window = Window::create(&ctx, "main", Size::new(800, 600)).unwrap();

        assert_eq!(window.title(), "main");
        assert_eq!(window.size(), Size::new(800, 600));
    }

    #[test]
    fn zero_size_is_refused() {
        let ctx = context();
        let result = Window::create(&ctx, "bad", Size::new(0, 600));

        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn create_without_video_subsystem_fails() {
        let ctx = Context::init(InitFlags::TIMER).unwrap();
        let result = Window::create(&ctx, "no video", Size::new(100, 100));

        assert_eq!(
            result.err(),
            Some(Error::SubsystemNotInitialized { subsystem: "video" })
        );
    }

    #[test]
    fn destroy_releases_the_handle() {
        let ctx = context();
        let window = Window::create(&ctx, "w", Size::new(10, 10)).unwrap();
        let id = window.id();

        window.destroy().unwrap();

        // The driver no longer knows the handle.
        assert_eq!(
            ctx.driver().borrow_mut().destroy_window(id),
            Err(Error::UnknownHandle { resource: "window" })
        );
    }

    #[test]
    fn drop_releases_the_handle() {
        let ctx = context();
        let id = {
            let window = Window::create(&ctx, "w", Size::new(10, 10)).unwrap();
            window.id()
        };

        assert_eq!(
            ctx.driver().borrow_mut().destroy_window(id),
            Err(Error::UnknownHandle { resource: "window" })
        );
    }

    #[test]
    fn windows_get_distinct_ids() {
        let ctx = context();
        let a = Window::create(&ctx, "a", Size::new(1, 1)).unwrap();
        let b = Window::create(&ctx, "b", Size::new(1, 1)).unwrap();

        assert_ne!(a.id(), b.id());
    }
}
