//=========================================================================
// Key Model
//
// Scan codes, key codes, and modifier masks.
//
// Two identifiers describe every key:
// - `ScanCode`: the physical key position, independent of keyboard
//   layout. The same physical key reports the same scan code on QWERTY
//   and AZERTY.
// - `KeyCode`: the logical symbol the key produces under the active
//   layout.
//
// `KeySym` pairs the two with the modifier state, as a pure value type.
//
// Numeric values match the reference native ABI so that records built
// here are bit-exact on the wire (see `event::codec`).
//
//=========================================================================

//=== ScanCode ============================================================

/// Physical key position identifier, layout-independent.
///
/// Covers the alphanumeric block, the editing cluster, and the arrow
/// keys. `Unknown` is the zero code; unrecognized raw codes map to it
/// when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ScanCode {
    Unknown = 0,

    //--- Alphabetic keys --------------------------------------------------
    A = 4, B = 5, C = 6, D = 7, E = 8, F = 9, G = 10, H = 11, I = 12,
    J = 13, K = 14, L = 15, M = 16, N = 17, O = 18, P = 19, Q = 20,
    R = 21, S = 22, T = 23, U = 24, V = 25, W = 26, X = 27, Y = 28,
    Z = 29,

    //--- Number row -------------------------------------------------------
    Digit1 = 30, Digit2 = 31, Digit3 = 32, Digit4 = 33, Digit5 = 34,
    Digit6 = 35, Digit7 = 36, Digit8 = 37, Digit9 = 38, Digit0 = 39,

    //--- Control keys -----------------------------------------------------
    Return = 40,
    Escape = 41,
    Backspace = 42,
    Tab = 43,
    Space = 44,

    //--- Editing and navigation cluster -----------------------------------
    Home = 74,
    PageUp = 75,
    Delete = 76,
    End = 77,
    PageDown = 78,
    Right = 79,
    Left = 80,
    Down = 81,
    Up = 82,
}

impl ScanCode {
    /// Raw ABI code for this scan code.
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Looks up a scan code by raw ABI code. Unrecognized codes map to
    /// `Unknown`.
    pub fn from_raw(raw: u32) -> Self {
        use ScanCode::*;
        match raw {
            4 => A, 5 => B, 6 => C, 7 => D, 8 => E, 9 => F, 10 => G,
            11 => H, 12 => I, 13 => J, 14 => K, 15 => L, 16 => M,
            17 => N, 18 => O, 19 => P, 20 => Q, 21 => R, 22 => S,
            23 => T, 24 => U, 25 => V, 26 => W, 27 => X, 28 => Y,
            29 => Z,

            30 => Digit1, 31 => Digit2, 32 => Digit3, 33 => Digit4,
            34 => Digit5, 35 => Digit6, 36 => Digit7, 37 => Digit8,
            38 => Digit9, 39 => Digit0,

            40 => Return, 41 => Escape, 42 => Backspace, 43 => Tab,
            44 => Space,

            74 => Home, 75 => PageUp, 76 => Delete, 77 => End,
            78 => PageDown, 79 => Right, 80 => Left, 81 => Down,
            82 => Up,

            _ => Unknown,
        }
    }
}

//=== KeyCode =============================================================

/// Bit set on key codes that have no printable representation; the low
/// bits then carry the scan code of the key.
const SCANCODE_TO_KEYCODE: u32 = 1 << 30;

/// Logical key symbol identifier, layout-dependent.
///
/// Printable keys use their character value; navigation keys use the
/// scan code with the high marker bit set, per the reference ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum KeyCode {
    Unknown = 0,

    //--- Control keys -----------------------------------------------------
    Backspace = 8,
    Tab = 9,
    Return = 13,
    Escape = 27,
    Space = 32,
    Delete = 127,

    //--- Number row -------------------------------------------------------
    Digit0 = 48, Digit1 = 49, Digit2 = 50, Digit3 = 51, Digit4 = 52,
    Digit5 = 53, Digit6 = 54, Digit7 = 55, Digit8 = 56, Digit9 = 57,

    //--- Alphabetic keys --------------------------------------------------
    A = 97, B = 98, C = 99, D = 100, E = 101, F = 102, G = 103,
    H = 104, I = 105, J = 106, K = 107, L = 108, M = 109, N = 110,
    O = 111, P = 112, Q = 113, R = 114, S = 115, T = 116, U = 117,
    V = 118, W = 119, X = 120, Y = 121, Z = 122,

    //--- Editing and navigation cluster -----------------------------------
    Home = SCANCODE_TO_KEYCODE | 74,
    PageUp = SCANCODE_TO_KEYCODE | 75,
    End = SCANCODE_TO_KEYCODE | 77,
    PageDown = SCANCODE_TO_KEYCODE | 78,
    Right = SCANCODE_TO_KEYCODE | 79,
    Left = SCANCODE_TO_KEYCODE | 80,
    Down = SCANCODE_TO_KEYCODE | 81,
    Up = SCANCODE_TO_KEYCODE | 82,
}

impl KeyCode {
    /// Raw ABI code for this key code.
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Looks up a key code by raw ABI code. Unrecognized codes map to
    /// `Unknown`.
    pub fn from_raw(raw: u32) -> Self {
        use KeyCode::*;
        match raw {
            8 => Backspace, 9 => Tab, 13 => Return, 27 => Escape,
            32 => Space, 127 => Delete,

            48 => Digit0, 49 => Digit1, 50 => Digit2, 51 => Digit3,
            52 => Digit4, 53 => Digit5, 54 => Digit6, 55 => Digit7,
            56 => Digit8, 57 => Digit9,

            97 => A, 98 => B, 99 => C, 100 => D, 101 => E, 102 => F,
            103 => G, 104 => H, 105 => I, 106 => J, 107 => K, 108 => L,
            109 => M, 110 => N, 111 => O, 112 => P, 113 => Q, 114 => R,
            115 => S, 116 => T, 117 => U, 118 => V, 119 => W, 120 => X,
            121 => Y, 122 => Z,

            raw if raw == SCANCODE_TO_KEYCODE | 74 => Home,
            raw if raw == SCANCODE_TO_KEYCODE | 75 => PageUp,
            raw if raw == SCANCODE_TO_KEYCODE | 77 => End,
            raw if raw == SCANCODE_TO_KEYCODE | 78 => PageDown,
            raw if raw == SCANCODE_TO_KEYCODE | 79 => Right,
            raw if raw == SCANCODE_TO_KEYCODE | 80 => Left,
            raw if raw == SCANCODE_TO_KEYCODE | 81 => Down,
            raw if raw == SCANCODE_TO_KEYCODE | 82 => Up,

            _ => Unknown,
        }
    }

    /// Default (US layout) symbol for a physical key position.
    pub fn from_scancode(scancode: ScanCode) -> Self {
        use ScanCode as Sc;
        match scancode {
            Sc::Unknown => KeyCode::Unknown,

            Sc::A => KeyCode::A, Sc::B => KeyCode::B, Sc::C => KeyCode::C,
            Sc::D => KeyCode::D, Sc::E => KeyCode::E, Sc::F => KeyCode::F,
            Sc::G => KeyCode::G, Sc::H => KeyCode::H, Sc::I => KeyCode::I,
            Sc::J => KeyCode::J, Sc::K => KeyCode::K, Sc::L => KeyCode::L,
            Sc::M => KeyCode::M, Sc::N => KeyCode::N, Sc::O => KeyCode::O,
            Sc::P => KeyCode::P, Sc::Q => KeyCode::Q, Sc::R => KeyCode::R,
            Sc::S => KeyCode::S, Sc::T => KeyCode::T, Sc::U => KeyCode::U,
            Sc::V => KeyCode::V, Sc::W => KeyCode::W, Sc::X => KeyCode::X,
            Sc::Y => KeyCode::Y, Sc::Z => KeyCode::Z,

            Sc::Digit1 => KeyCode::Digit1, Sc::Digit2 => KeyCode::Digit2,
            Sc::Digit3 => KeyCode::Digit3, Sc::Digit4 => KeyCode::Digit4,
            Sc::Digit5 => KeyCode::Digit5, Sc::Digit6 => KeyCode::Digit6,
            Sc::Digit7 => KeyCode::Digit7, Sc::Digit8 => KeyCode::Digit8,
            Sc::Digit9 => KeyCode::Digit9, Sc::Digit0 => KeyCode::Digit0,

            Sc::Return => KeyCode::Return,
            Sc::Escape => KeyCode::Escape,
            Sc::Backspace => KeyCode::Backspace,
            Sc::Tab => KeyCode::Tab,
            Sc::Space => KeyCode::Space,
            Sc::Delete => KeyCode::Delete,

            Sc::Home => KeyCode::Home,
            Sc::PageUp => KeyCode::PageUp,
            Sc::End => KeyCode::End,
            Sc::PageDown => KeyCode::PageDown,
            Sc::Right => KeyCode::Right,
            Sc::Left => KeyCode::Left,
            Sc::Down => KeyCode::Down,
            Sc::Up => KeyCode::Up,
        }
    }
}

//=== KeyMod ==============================================================

/// Modifier key mask.
///
/// A 2-byte bit mask distinguishing left/right variants, matching the
/// wire layout's modifier field. Combine with `|`; query with
/// [`KeyMod::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyMod(u16);

impl KeyMod {
    pub const NONE: Self = Self(0x0000);
    pub const LSHIFT: Self = Self(0x0001);
    pub const RSHIFT: Self = Self(0x0002);
    pub const LCTRL: Self = Self(0x0040);
    pub const RCTRL: Self = Self(0x0080);
    pub const LALT: Self = Self(0x0100);
    pub const RALT: Self = Self(0x0200);
    pub const NUM: Self = Self(0x1000);
    pub const CAPS: Self = Self(0x2000);

    /// Either shift key.
    pub const SHIFT: Self = Self(Self::LSHIFT.0 | Self::RSHIFT.0);

    /// Either ctrl key.
    pub const CTRL: Self = Self(Self::LCTRL.0 | Self::RCTRL.0);

    /// Either alt key.
    pub const ALT: Self = Self(Self::LALT.0 | Self::RALT.0);

    /// Wraps a raw mask. All bits are preserved, including ones this
    /// layer defines no name for.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// True if any bit of `other` is set in `self`.
    ///
    /// The combined masks test "either variant": a mask holding `LCTRL`
    /// contains `CTRL`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for KeyMod {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for KeyMod {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

//=== KeySym ==============================================================

/// A key symbol: physical position, logical symbol, and modifier state.
///
/// Pure value type with no ownership semantics; copied freely between
/// event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySym {
    /// Physical key position (layout-independent).
    pub scancode: ScanCode,

    /// Logical symbol produced (layout-dependent).
    pub keycode: KeyCode,

    /// Modifier mask at the time of the event.
    pub modifiers: KeyMod,
}

impl KeySym {
    pub const fn new(scancode: ScanCode, keycode: KeyCode, modifiers: KeyMod) -> Self {
        Self { scancode, keycode, modifiers }
    }

    /// Key symbol for a physical position under the default layout, with
    /// no modifiers held.
    pub fn from_scancode(scancode: ScanCode) -> Self {
        Self {
            scancode,
            keycode: KeyCode::from_scancode(scancode),
            modifiers: KeyMod::NONE,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
