//=========================================================================
// Event Wire Codec
//
// Bit-exact encoding of event records into the reference native ABI's
// fixed 56-byte layout.
//
// Layout (little-endian):
// ```text
//  offset  size  field
//  ------  ----  -----------------------------------------
//       0     4  type tag (0x100 quit, 0x300 down, 0x301 up)
//       4     4  timestamp (ms)
//       8     4  window id
//      12     1  state (1 pressed, 0 released)
//      13     1  repeat flag
//      14     2  padding
//      16     4  scan code
//      20     4  key code
//      24     2  modifier mask
//      26     4  reserved
//      30    26  tail padding up to the fixed record size
// ```
//
// The record size is fixed regardless of variant so that differently
// shaped records overlay at the same offset in the native queue. Only
// the fields of the tagged variant are meaningful; everything else is
// zero on encode and ignored on decode.
//
// The tag is authoritative. A record whose state byte contradicts its
// tag is corrupt and refused rather than read ambiguously.
//
//=========================================================================

//=== Internal Imports ====================================================

use super::keys::{KeyCode, KeyMod, KeySym, ScanCode};
use super::record::{Event, KeyboardEvent};

//=== Layout Constants ====================================================

/// Fixed size of every encoded record.
pub const RECORD_SIZE: usize = 56;

const OFFSET_TAG: usize = 0;
const OFFSET_TIMESTAMP: usize = 4;
const OFFSET_WINDOW_ID: usize = 8;
const OFFSET_STATE: usize = 12;
const OFFSET_REPEAT: usize = 13;
const OFFSET_SCANCODE: usize = 16;
const OFFSET_KEYCODE: usize = 20;
const OFFSET_MODIFIERS: usize = 24;

const STATE_RELEASED: u8 = 0;
const STATE_PRESSED: u8 = 1;

//=== DecodeError =========================================================

/// Errors produced when decoding a wire record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer is not exactly one record long.
    BadLength {
        expected: usize,
        actual: usize,
    },

    /// The tag field is zero. An unset tag marks "no event pending" in
    /// the native queue and never describes a real record.
    UnsetTag,

    /// A keyboard record whose state byte contradicts its tag.
    StateMismatch {
        tag: u32,
        state: u8,
    },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadLength { expected, actual } => {
                write!(f, "record must be {} bytes, got {}", expected, actual)
            }
            Self::UnsetTag => write!(f, "record tag is unset (no event)"),
            Self::StateMismatch { tag, state } => {
                write!(f, "state byte {} contradicts tag {:#x}", state, tag)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

//=== Encoding ============================================================

/// Encodes an event into one fixed-size wire record.
///
/// Fields outside the tagged variant are zero.
pub fn encode(event: &Event) -> [u8; RECORD_SIZE] {
    let mut record = [0u8; RECORD_SIZE];
    write_u32(&mut record, OFFSET_TAG, event.tag());

    match event {
        Event::KeyDown(payload) => encode_keyboard(&mut record, payload, STATE_PRESSED),
        Event::KeyUp(payload) => encode_keyboard(&mut record, payload, STATE_RELEASED),
        Event::Quit | Event::Unknown { .. } => {}
    }

    record
}

fn encode_keyboard(record: &mut [u8; RECORD_SIZE], payload: &KeyboardEvent, state: u8) {
    write_u32(record, OFFSET_TIMESTAMP, payload.timestamp);
    write_u32(record, OFFSET_WINDOW_ID, payload.window_id);
    record[OFFSET_STATE] = state;
    record[OFFSET_REPEAT] = payload.repeat as u8;
    write_u32(record, OFFSET_SCANCODE, payload.keysym.scancode.as_raw());
    write_u32(record, OFFSET_KEYCODE, payload.keysym.keycode.as_raw());
    write_u16(record, OFFSET_MODIFIERS, payload.keysym.modifiers.bits());
}

//=== Decoding ============================================================

/// Decodes one wire record.
///
/// Tags without a named variant decode to [`Event::Unknown`] so the
/// caller can still record and count them.
pub fn decode(record: &[u8]) -> Result<Event, DecodeError> {
    if record.len() != RECORD_SIZE {
        return Err(DecodeError::BadLength {
            expected: RECORD_SIZE,
            actual: record.len(),
        });
    }

    let tag = read_u32(record, OFFSET_TAG);
    match tag {
        0 => Err(DecodeError::UnsetTag),
        Event::TAG_QUIT => Ok(Event::Quit),
        Event::TAG_KEY_DOWN => {
            expect_state(record, tag, STATE_PRESSED)?;
            Ok(Event::KeyDown(decode_keyboard(record)))
        }
        Event::TAG_KEY_UP => {
            expect_state(record, tag, STATE_RELEASED)?;
            Ok(Event::KeyUp(decode_keyboard(record)))
        }
        other => Ok(Event::Unknown { tag: other }),
    }
}

fn expect_state(record: &[u8], tag: u32, expected: u8) -> Result<(), DecodeError> {
    let state = record[OFFSET_STATE];
    if state != expected {
        return Err(DecodeError::StateMismatch { tag, state });
    }
    Ok(())
}

fn decode_keyboard(record: &[u8]) -> KeyboardEvent {
    KeyboardEvent {
        timestamp: read_u32(record, OFFSET_TIMESTAMP),
        window_id: read_u32(record, OFFSET_WINDOW_ID),
        repeat: record[OFFSET_REPEAT] != 0,
        keysym: KeySym {
            scancode: ScanCode::from_raw(read_u32(record, OFFSET_SCANCODE)),
            keycode: KeyCode::from_raw(read_u32(record, OFFSET_KEYCODE)),
            modifiers: KeyMod::from_bits(read_u16(record, OFFSET_MODIFIERS)),
        },
    }
}

//=== Field Access ========================================================

fn write_u32(record: &mut [u8], offset: usize, value: u32) {
    record[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn write_u16(record: &mut [u8], offset: usize, value: u16) {
    record[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn read_u32(record: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&record[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

fn read_u16(record: &[u8], offset: usize) -> u16 {
    let mut bytes = [0u8; 2];
    bytes.copy_from_slice(&record[offset..offset + 2]);
    u16::from_le_bytes(bytes)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_keyboard() -> KeyboardEvent {
        KeyboardEvent::new(
            0xdead_0001,
            7,
            true,
            KeySym::new(ScanCode::W, KeyCode::W, KeyMod::LSHIFT | KeyMod::RALT),
        )
    }

    //=====================================================================
    // Layout Tests
    //=====================================================================

    #[test]
    fn record_is_always_fixed_size() {
        assert_eq!(encode(&Event::Quit).len(), RECORD_SIZE);
        assert_eq!(encode(&Event::KeyDown(sample_keyboard())).len(), RECORD_SIZE);
        assert_eq!(encode(&Event::Unknown { tag: 0x999 }).len(), RECORD_SIZE);
    }

    #[test]
    fn tag_occupies_the_first_four_bytes() {
        let record = encode(&Event::KeyUp(sample_keyboard()));
        assert_eq!(u32::from_le_bytes([record[0], record[1], record[2], record[3]]), 0x301);
    }

    #[test]
    fn quit_record_is_tag_plus_zeros() {
        let record = encode(&Event::Quit);
        assert_eq!(read_u32(&record, OFFSET_TAG), 0x100);
        assert!(record[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn keyboard_fields_land_at_their_offsets() {
        let record = encode(&Event::KeyDown(sample_keyboard()));

        assert_eq!(read_u32(&record, OFFSET_TIMESTAMP), 0xdead_0001);
        assert_eq!(read_u32(&record, OFFSET_WINDOW_ID), 7);
        assert_eq!(record[OFFSET_STATE], STATE_PRESSED);
        assert_eq!(record[OFFSET_REPEAT], 1);
        assert_eq!(record[14], 0);
        assert_eq!(record[15], 0);
        assert_eq!(read_u32(&record, OFFSET_SCANCODE), ScanCode::W.as_raw());
        assert_eq!(read_u32(&record, OFFSET_KEYCODE), KeyCode::W.as_raw());
        assert_eq!(
            read_u16(&record, OFFSET_MODIFIERS),
            (KeyMod::LSHIFT | KeyMod::RALT).bits()
        );
    }

    //=====================================================================
    // Round-Trip Tests
    //=====================================================================

    #[test]
    fn keyboard_payload_round_trips() {
        for event in [
            Event::KeyDown(sample_keyboard()),
            Event::KeyUp(KeyboardEvent::new(
                42,
                1,
                false,
                KeySym::new(ScanCode::Escape, KeyCode::Escape, KeyMod::NONE),
            )),
        ] {
            let decoded = decode(&encode(&event)).unwrap();
            assert_eq!(decoded, event);
        }
    }

    #[test]
    fn quit_round_trips() {
        assert_eq!(decode(&encode(&Event::Quit)).unwrap(), Event::Quit);
    }

    #[test]
    fn unknown_tag_round_trips() {
        let event = Event::Unknown { tag: 0x1234 };
        assert_eq!(decode(&encode(&event)).unwrap(), event);
    }

    //=====================================================================
    // Rejection Tests
    //=====================================================================

    #[test]
    fn unset_tag_is_not_an_event() {
        let record = [0u8; RECORD_SIZE];
        assert_eq!(decode(&record), Err(DecodeError::UnsetTag));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let record = [0u8; RECORD_SIZE - 1];
        assert_eq!(
            decode(&record),
            Err(DecodeError::BadLength { expected: RECORD_SIZE, actual: RECORD_SIZE - 1 })
        );
    }

    #[test]
    fn oversized_buffer_is_rejected() {
        let record = [0u8; RECORD_SIZE + 8];
        assert!(matches!(decode(&record), Err(DecodeError::BadLength { .. })));
    }

    #[test]
    fn contradictory_state_byte_is_refused() {
        let mut record = encode(&Event::KeyDown(sample_keyboard()));
        record[OFFSET_STATE] = STATE_RELEASED;

        assert_eq!(
            decode(&record),
            Err(DecodeError::StateMismatch { tag: Event::TAG_KEY_DOWN, state: STATE_RELEASED })
        );
    }
}
