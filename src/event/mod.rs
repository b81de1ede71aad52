//=========================================================================
// Event Subsystem
//
// Non-blocking event polling with observer dispatch.
//
// Architecture:
// ```text
//  Driver / Embedder Threads:        Owning Thread:
//  ┌──────────────────────────┐     ┌─────────────────────────┐
//  │  EventSender (Send+Clone)│     │  EventPump (!Send)      │
//  │   └─ push(Event) ────────┼────►│   poll()                │
//  └──────────────────────────┘     │    ├─ dispatch: quit /  │
//                                   │    │  keyboard observer │
//                                   │    ├─ history (opt-in)  │
//                                   │    └─ returns the event │
//                                   └─────────────────────────┘
// ```
//
// Key design decisions:
// - **poll() returns Option**: an empty queue is `None`, never a record
//   with an unset tag the caller must know to ignore.
// - **Thread affinity is a type**: the pump must stay on the thread that
//   owns the display subsystem, so it is `!Send`/`!Sync` by
//   construction. Only the sender crosses threads.
// - **Observers are explicitly registered**: absence of a handler is a
//   no-op by contract, not a default empty closure.
// - **Dispatch is synchronous**: observers run on the polling thread,
//   during the poll call, before the event is returned. Nothing is
//   queued or deferred.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod codec;
pub mod history;
pub mod keys;
pub mod record;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender};
use log::trace;

//=== Internal Imports ====================================================

use crate::error::{Error, Result};
use history::EventHistory;
pub use record::{Event, KeyState, KeyboardEvent};

//=== Observer Types ======================================================

type QuitObserver = Box<dyn FnMut()>;
type KeyboardObserver = Box<dyn FnMut(KeyState, &KeyboardEvent)>;

//=== EventSender =========================================================

/// Push side of the event queue.
///
/// Cloneable and `Send`: drivers and embedder threads hold one of these
/// to feed the pump. Pushing never blocks.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<Event>,
}

impl EventSender {
    /// Creates the queue pair: the sender half plus the receiver the
    /// pump will drain. Contexts wire one of these per init.
    pub(crate) fn channel() -> (Self, Receiver<Event>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self { sender }, receiver)
    }

    /// Enqueues an event for the pump.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueueClosed`] if the pump (and its context) are
    /// gone; the event is dropped in that case.
    pub fn push(&self, event: Event) -> Result<()> {
        self.sender.send(event).map_err(|_| Error::QueueClosed)
    }
}

//=== EventPump ===========================================================

/// Pull side of the event queue: non-blocking poll plus dispatch.
///
/// Obtained once per context via `Context::event_pump()`. Must remain on
/// the thread that owns the display subsystem; the type is `!Send` and
/// `!Sync`, so the compiler enforces the affinity the native layer only
/// documents.
pub struct EventPump {
    receiver: Receiver<Event>,
    on_quit: Option<QuitObserver>,
    on_keyboard: Option<KeyboardObserver>,
    history: Option<EventHistory>,

    /// Pins the pump to one thread.
    _thread_affine: std::marker::PhantomData<*const ()>,
}

impl EventPump {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(receiver: Receiver<Event>) -> Self {
        Self {
            receiver,
            on_quit: None,
            on_keyboard: None,
            history: None,
            _thread_affine: std::marker::PhantomData,
        }
    }

    /// Creates a standalone queue: a pump plus its sender.
    ///
    /// Contexts wire this up automatically; the constructor exists for
    /// driving the pump directly in embedder tests and tools.
    pub fn standalone() -> (Self, EventSender) {
        let (sender, receiver) = EventSender::channel();
        (Self::new(receiver), sender)
    }

    //--- Polling ----------------------------------------------------------

    /// Retrieves the next pending event, or `None` if the queue is
    /// empty. Never blocks.
    ///
    /// For each retrieved event, in order:
    /// 1. the matching observer (if registered) is invoked synchronously
    ///    on the calling thread: quit events fire the quit observer,
    ///    key events fire the keyboard observer, and all other tags fire
    ///    nothing;
    /// 2. the event is appended to the history, when recording is
    ///    enabled;
    /// 3. the event is returned.
    pub fn poll(&mut self) -> Option<Event> {
        let event = self.receiver.try_recv().ok()?;

        self.dispatch(&event);

        if let Some(history) = &mut self.history {
            history.record(event.clone());
        }

        Some(event)
    }

    fn dispatch(&mut self, event: &Event) {
        match event {
            Event::Quit => {
                if let Some(observer) = &mut self.on_quit {
                    observer();
                }
            }
            Event::KeyDown(payload) => {
                if let Some(observer) = &mut self.on_keyboard {
                    observer(KeyState::Pressed, payload);
                }
            }
            Event::KeyUp(payload) => {
                if let Some(observer) = &mut self.on_keyboard {
                    observer(KeyState::Released, payload);
                }
            }
            Event::Unknown { tag } => {
                trace!(target: "event", "no observer for event tag {:#x}", tag);
            }
        }
    }

    //--- Observer Registration --------------------------------------------

    /// Registers the quit observer, replacing any previous one.
    pub fn on_quit<F>(&mut self, observer: F)
    where
        F: FnMut() + 'static,
    {
        self.on_quit = Some(Box::new(observer));
    }

    /// Unregisters the quit observer. Subsequent quit events dispatch to
    /// nothing.
    pub fn clear_on_quit(&mut self) {
        self.on_quit = None;
    }

    /// Registers the keyboard observer, replacing any previous one.
    ///
    /// The observer receives the transition (pressed/released) and the
    /// decoded payload.
    pub fn on_keyboard<F>(&mut self, observer: F)
    where
        F: FnMut(KeyState, &KeyboardEvent) + 'static,
    {
        self.on_keyboard = Some(Box::new(observer));
    }

    /// Unregisters the keyboard observer.
    pub fn clear_on_keyboard(&mut self) {
        self.on_keyboard = None;
    }

    //--- History ----------------------------------------------------------

    /// Enables history recording with the given ring capacity,
    /// replacing any previously recorded events.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn record_history(&mut self, capacity: usize) {
        self.history = Some(EventHistory::with_capacity(capacity));
    }

    /// Disables history recording and drops recorded events.
    pub fn disable_history(&mut self) {
        self.history = None;
    }

    /// The recorded history, if recording is enabled.
    pub fn history(&self) -> Option<&EventHistory> {
        self.history.as_ref()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::keys::{KeySym, ScanCode};
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Helpers -----------------------------------------------------

    fn key_down(scancode: ScanCode) -> Event {
        Event::KeyDown(KeyboardEvent::new(0, 1, false, KeySym::from_scancode(scancode)))
    }

    fn key_up(scancode: ScanCode) -> Event {
        Event::KeyUp(KeyboardEvent::new(0, 1, false, KeySym::from_scancode(scancode)))
    }

    //=====================================================================
    // Polling Tests
    //=====================================================================

    #[test]
    fn empty_queue_polls_none() {
        let (mut pump, _sender) = EventPump::standalone();
        assert_eq!(pump.poll(), None);
    }

    #[test]
    fn events_come_back_in_push_order() {
        let (mut pump, sender) = EventPump::standalone();
        sender.push(key_down(ScanCode::A)).unwrap();
        sender.push(key_up(ScanCode::A)).unwrap();
        sender.push(Event::Quit).unwrap();

        assert_eq!(pump.poll(), Some(key_down(ScanCode::A)));
        assert_eq!(pump.poll(), Some(key_up(ScanCode::A)));
        assert_eq!(pump.poll(), Some(Event::Quit));
        assert_eq!(pump.poll(), None);
    }

    #[test]
    fn push_after_pump_dropped_reports_closed_queue() {
        let (pump, sender) = EventPump::standalone();
        drop(pump);

        assert_eq!(sender.push(Event::Quit), Err(crate::error::Error::QueueClosed));
    }

    //=====================================================================
    // Dispatch Tests
    //=====================================================================

    #[test]
    fn quit_fires_only_the_quit_observer() {
        let (mut pump, sender) = EventPump::standalone();

        let quits = Rc::new(RefCell::new(0));
        let keys = Rc::new(RefCell::new(0));

        let quit_count = Rc::clone(&quits);
        pump.on_quit(move || *quit_count.borrow_mut() += 1);

        let key_count = Rc::clone(&keys);
        pump.on_keyboard(move |_, _| *key_count.borrow_mut() += 1);

        sender.push(Event::Quit).unwrap();
        pump.poll();

        assert_eq!(*quits.borrow(), 1);
        assert_eq!(*keys.borrow(), 0);
    }

    #[test]
    fn key_events_fire_only_the_keyboard_observer() {
        let (mut pump, sender) = EventPump::standalone();

        let quits = Rc::new(RefCell::new(0));
        let transitions = Rc::new(RefCell::new(Vec::new()));

        let quit_count = Rc::clone(&quits);
        pump.on_quit(move || *quit_count.borrow_mut() += 1);

        let seen = Rc::clone(&transitions);
        pump.on_keyboard(move |state, payload| {
            seen.borrow_mut().push((state, payload.keysym.scancode));
        });

        sender.push(key_down(ScanCode::Space)).unwrap();
        sender.push(key_up(ScanCode::Space)).unwrap();
        pump.poll();
        pump.poll();

        assert_eq!(*quits.borrow(), 0);
        assert_eq!(
            *transitions.borrow(),
            vec![
                (KeyState::Pressed, ScanCode::Space),
                (KeyState::Released, ScanCode::Space),
            ]
        );
    }

    #[test]
    fn unknown_tags_fire_no_observer() {
        let (mut pump, sender) = EventPump::standalone();

        let fired = Rc::new(RefCell::new(0));
        let quit_count = Rc::clone(&fired);
        pump.on_quit(move || *quit_count.borrow_mut() += 1);
        let key_count = Rc::clone(&fired);
        pump.on_keyboard(move |_, _| *key_count.borrow_mut() += 1);

        sender.push(Event::Unknown { tag: 0x200 }).unwrap();
        let polled = pump.poll();

        assert_eq!(polled, Some(Event::Unknown { tag: 0x200 }));
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn unregistered_observers_are_a_noop() {
        let (mut pump, sender) = EventPump::standalone();
        sender.push(Event::Quit).unwrap();
        sender.push(key_down(ScanCode::A)).unwrap();

        // No observers registered: polling must still drain normally.
        assert_eq!(pump.poll(), Some(Event::Quit));
        assert_eq!(pump.poll(), Some(key_down(ScanCode::A)));
    }

    #[test]
    fn cleared_observer_stops_firing() {
        let (mut pump, sender) = EventPump::standalone();

        let quits = Rc::new(RefCell::new(0));
        let quit_count = Rc::clone(&quits);
        pump.on_quit(move || *quit_count.borrow_mut() += 1);

        sender.push(Event::Quit).unwrap();
        pump.poll();
        pump.clear_on_quit();
        sender.push(Event::Quit).unwrap();
        pump.poll();

        assert_eq!(*quits.borrow(), 1);
    }

    #[test]
    fn observers_run_during_the_poll_call() {
        let (mut pump, sender) = EventPump::standalone();

        let order = Rc::new(RefCell::new(Vec::new()));
        let observer_order = Rc::clone(&order);
        pump.on_quit(move || observer_order.borrow_mut().push("observer"));

        sender.push(Event::Quit).unwrap();
        pump.poll();
        order.borrow_mut().push("after poll");

        assert_eq!(*order.borrow(), vec!["observer", "after poll"]);
    }

    //=====================================================================
    // History Tests
    //=====================================================================

    #[test]
    fn history_is_off_by_default() {
        let (mut pump, sender) = EventPump::standalone();
        sender.push(Event::Quit).unwrap();
        pump.poll();

        assert!(pump.history().is_none());
    }

    #[test]
    fn history_counts_only_nonempty_polls() {
        let (mut pump, sender) = EventPump::standalone();
        pump.record_history(16);

        sender.push(key_down(ScanCode::A)).unwrap();
        sender.push(Event::Quit).unwrap();

        pump.poll();
        pump.poll();
        pump.poll(); // empty: must not record

        let history = pump.history().unwrap();
        assert_eq!(history.len(), 2);
        let tags: Vec<u32> = history.iter().map(Event::tag).collect();
        assert_eq!(tags, vec![Event::TAG_KEY_DOWN, Event::TAG_QUIT]);
    }

    #[test]
    fn preloaded_quit_polls_dispatches_and_records_once() {
        let (mut pump, sender) = EventPump::standalone();
        pump.record_history(4);

        let quits = Rc::new(RefCell::new(0));
        let quit_count = Rc::clone(&quits);
        pump.on_quit(move || *quit_count.borrow_mut() += 1);

        sender.push(Event::Quit).unwrap();

        assert_eq!(pump.poll(), Some(Event::Quit));
        assert_eq!(*quits.borrow(), 1);
        assert_eq!(pump.history().unwrap().len(), 1);

        assert_eq!(pump.poll(), None);
        assert_eq!(*quits.borrow(), 1);
        assert_eq!(pump.history().unwrap().len(), 1);
    }

    #[test]
    fn disable_history_drops_records() {
        let (mut pump, sender) = EventPump::standalone();
        pump.record_history(4);
        sender.push(Event::Quit).unwrap();
        pump.poll();

        pump.disable_history();
        assert!(pump.history().is_none());
    }
}
