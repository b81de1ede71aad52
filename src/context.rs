//=========================================================================
// Context
//
// The init/quit pair for the platform layer.
//
// A context owns the driver and the event queue. Initialization brings
// up the requested subsystems and wires the driver to the queue's push
// side; quitting (explicit or on drop) tears the driver down exactly
// once.
//
// Lifecycle:
// ```text
//   Context::init(flags) ──► Context ──► quit() / drop
//        │                     ├─ event_pump()   (once)
//        │                     ├─ event_sender() (any number)
//        └─ driver.init        └─ Window/Surface creation
// ```
//
// The context holds the driver in an `Rc`, so the context and every
// resource handle created from it stay on one thread.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::info;

//=== Internal Imports ====================================================

use crate::driver::headless::HeadlessDriver;
use crate::driver::VideoDriver;
use crate::error::{Error, Result};
use crate::event::{Event, EventPump, EventSender};
use crate::video::renderer::RendererInfo;
use crate::video::DriverCell;

//=== InitFlags ===========================================================

/// Subsystem selection flags for [`Context::init`].
///
/// Combine with `|`; `EVERYTHING` selects all subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InitFlags(u32);

impl InitFlags {
    pub const TIMER: Self = Self(0x0000_0001);
    pub const AUDIO: Self = Self(0x0000_0010);
    pub const VIDEO: Self = Self(0x0000_0020);
    pub const JOYSTICK: Self = Self(0x0000_0200);
    pub const HAPTIC: Self = Self(0x0000_1000);
    pub const GAME_CONTROLLER: Self = Self(0x0000_2000);
    pub const EVENTS: Self = Self(0x0000_4000);
    pub const NO_PARACHUTE: Self = Self(0x0010_0000);

    /// Every subsystem except `NO_PARACHUTE`.
    pub const EVERYTHING: Self = Self(
        Self::TIMER.0
            | Self::AUDIO.0
            | Self::VIDEO.0
            | Self::JOYSTICK.0
            | Self::HAPTIC.0
            | Self::GAME_CONTROLLER.0
            | Self::EVENTS.0,
    );

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for InitFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for InitFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

//=== Context =============================================================

/// Live platform layer: owns the driver and the event queue.
///
/// Not `Send`: the context and everything created from it belong to the
/// thread that initialized the display subsystem.
pub struct Context {
    driver: DriverCell,
    flags: InitFlags,
    epoch: Instant,
    event_sender: EventSender,
    pump_receiver: Option<Receiver<Event>>,
    active: bool,
}

impl Context {
    //--- Initialization ---------------------------------------------------

    /// Initializes the platform layer with the built-in headless driver.
    pub fn init(flags: InitFlags) -> Result<Self> {
        Self::with_driver(HeadlessDriver::new(), flags)
    }

    /// Initializes the platform layer with an embedder-supplied driver.
    ///
    /// The driver's `init` runs with `flags`, then the driver receives
    /// the push side of the event queue via `connect_events`.
    pub fn with_driver<D>(driver: D, flags: InitFlags) -> Result<Self>
    where
        D: VideoDriver + 'static,
    {
        let driver: DriverCell = Rc::new(RefCell::new(driver));
        let (event_sender, pump_receiver) = EventSender::channel();

        driver.borrow_mut().init(flags)?;
        driver.borrow_mut().connect_events(event_sender.clone());

        info!(target: "context", "platform layer up (flags {:#x})", flags.bits());

        Ok(Self {
            driver,
            flags,
            epoch: Instant::now(),
            event_sender,
            pump_receiver: Some(pump_receiver),
            active: true,
        })
    }

    //--- Accessors --------------------------------------------------------

    /// The subsystems selected at init.
    pub fn flags(&self) -> InitFlags {
        self.flags
    }

    /// Milliseconds elapsed since init. Wraps after ~49 days.
    pub fn ticks(&self) -> u32 {
        self.epoch.elapsed().as_millis() as u32
    }

    /// Diagnostic text for the most recent driver failure, if any.
    ///
    /// Best-effort: meaningful only immediately after a failed call, and
    /// never a substitute for the `Result` that call returned.
    pub fn last_error(&self) -> Option<String> {
        self.driver.borrow().last_error()
    }

    /// Capability descriptors of the render drivers the backend offers.
    pub fn render_driver_info(&self) -> Vec<RendererInfo> {
        self.driver.borrow().driver_info()
    }

    pub(crate) fn driver(&self) -> DriverCell {
        DriverCell::clone(&self.driver)
    }

    //--- Event Queue ------------------------------------------------------

    /// Takes the event pump. There is exactly one per context.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::SubsystemNotInitialized`] if the events
    /// subsystem was not selected at init, and with
    /// [`Error::PumpAlreadyTaken`] on the second call.
    pub fn event_pump(&mut self) -> Result<EventPump> {
        if !self.flags.contains(InitFlags::EVENTS) {
            return Err(Error::SubsystemNotInitialized { subsystem: "events" });
        }

        match self.pump_receiver.take() {
            Some(receiver) => Ok(EventPump::new(receiver)),
            None => Err(Error::PumpAlreadyTaken),
        }
    }

    /// A clone of the queue's push side. Cloneable and `Send`; this is
    /// how other threads feed events to the pump.
    pub fn event_sender(&self) -> EventSender {
        self.event_sender.clone()
    }

    //--- Shutdown ---------------------------------------------------------

    /// Tears the platform layer down.
    ///
    /// Equivalent to dropping the context; provided so shutdown can be
    /// sequenced explicitly. Resource handles still alive afterwards
    /// fail their driver calls with `Error::UnknownHandle`.
    pub fn quit(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.driver.borrow_mut().shutdown();
        info!(target: "context", "platform layer down");
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.shutdown();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::record::Event;

    //=====================================================================
    // InitFlags Tests
    //=====================================================================

    #[test]
    fn everything_covers_each_subsystem() {
        for flag in [
            InitFlags::TIMER,
            InitFlags::AUDIO,
            InitFlags::VIDEO,
            InitFlags::JOYSTICK,
            InitFlags::HAPTIC,
            InitFlags::GAME_CONTROLLER,
            InitFlags::EVENTS,
        ] {
            assert!(InitFlags::EVERYTHING.contains(flag));
        }
        assert!(!InitFlags::EVERYTHING.contains(InitFlags::NO_PARACHUTE));
    }

    #[test]
    fn flags_combine_with_bitor() {
        let flags = InitFlags::VIDEO | InitFlags::EVENTS;
        assert!(flags.contains(InitFlags::VIDEO));
        assert!(flags.contains(InitFlags::EVENTS));
        assert!(!flags.contains(InitFlags::AUDIO));
    }

    //=====================================================================
    // Context Tests
    //=====================================================================

    #[test]
    fn init_reports_the_selected_flags() {
        let ctx = Context::init(InitFlags::EVERYTHING).unwrap();
        assert_eq!(ctx.flags(), InitFlags::EVERYTHING);
    }

    #[test]
    fn pump_is_handed_out_exactly_once() {
        let mut ctx = Context::init(InitFlags::EVENTS).unwrap();

        assert!(ctx.event_pump().is_ok());
        assert_eq!(ctx.event_pump().err(), Some(Error::PumpAlreadyTaken));
    }

    #[test]
    fn pump_requires_the_events_subsystem() {
        let mut ctx = Context::init(InitFlags::VIDEO).unwrap();

        assert_eq!(
            ctx.event_pump().err(),
            Some(Error::SubsystemNotInitialized { subsystem: "events" })
        );
    }

    #[test]
    fn sender_feeds_the_pump() {
        let mut ctx = Context::init(InitFlags::EVENTS).unwrap();
        let sender = ctx.event_sender();
        let mut pump = ctx.event_pump().unwrap();

        sender.push(Event::Quit).unwrap();

        assert_eq!(pump.poll(), Some(Event::Quit));
        assert_eq!(pump.poll(), None);
    }

    #[test]
    fn senders_from_other_threads_feed_the_pump() {
        let mut ctx = Context::init(InitFlags::EVENTS).unwrap();
        let sender = ctx.event_sender();
        let mut pump = ctx.event_pump().unwrap();

        std::thread::spawn(move || sender.push(Event::Quit).unwrap())
            .join()
            .unwrap();

        assert_eq!(pump.poll(), Some(Event::Quit));
    }

    #[test]
    fn ticks_are_monotonic() {
        let ctx = Context::init(InitFlags::TIMER).unwrap();
        let first = ctx.ticks();
        let second = ctx.ticks();
        assert!(second >= first);
    }

    #[test]
    fn last_error_starts_empty() {
        let ctx = Context::init(InitFlags::EVERYTHING).unwrap();
        assert!(ctx.last_error().is_none());
    }

    #[test]
    fn render_driver_info_is_nonempty() {
        let ctx = Context::init(InitFlags::VIDEO).unwrap();
        assert!(!ctx.render_driver_info().is_empty());
    }

    #[test]
    fn quit_invalidates_driver_handles() {
        let ctx = Context::init(InitFlags::VIDEO | InitFlags::EVENTS).unwrap();
        let driver = ctx.driver();
        let id = driver.borrow_mut().create_window("w", crate::video::Size::new(1, 1)).unwrap();

        ctx.quit();

        assert_eq!(
            driver.borrow_mut().destroy_window(id),
            Err(Error::UnknownHandle { resource: "window" })
        );
    }
}
