//=========================================================================
// Event History
//
// Bounded, insertion-ordered record of polled events.
//
// The reference layer appended every polled event to a list that grew
// without limit for the life of the process. Here recording is opt-in
// (see `EventPump::record_history`) and bounded: when the ring is full,
// the oldest record is evicted to admit the newest.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::VecDeque;

//=== Internal Imports ====================================================

use super::record::Event;

//=== EventHistory ========================================================

/// Bounded ring of polled events, oldest first.
#[derive(Debug)]
pub struct EventHistory {
    records: VecDeque<Event>,
    capacity: usize,
}

impl EventHistory {
    //--- Construction -----------------------------------------------------

    /// Creates a history holding at most `capacity` records.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be positive");

        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    //--- Recording --------------------------------------------------------

    /// Appends a record, evicting the oldest one if the ring is full.
    pub fn record(&mut self, event: Event) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(event);
    }

    //--- Access -----------------------------------------------------------

    /// Records in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops all records, keeping the configured capacity.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
