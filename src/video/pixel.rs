//=========================================================================
// Pixel Formats
//
// Enumerated pixel format codes, matching the reference native ABI
// values bit for bit. The codes pack layout/order/bit-depth information;
// this layer treats them as opaque identifiers and performs no
// conversion between them.
//
//=========================================================================

//=== PixelFormat =========================================================

/// Pixel format identifier.
///
/// Values are the packed codes of the reference ABI. `Unknown` is the
/// zero code and never names a real format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    Unknown = 0,

    Index1Lsb = 0x1110_0100,
    Index1Msb = 0x1120_0100,
    Index4Lsb = 0x1210_0400,
    Index4Msb = 0x1220_0400,
    Index8 = 0x1300_0801,
    Rgb332 = 0x1411_0801,
    Rgb444 = 0x1512_0c02,
    Rgb555 = 0x1513_0f02,
    Bgr555 = 0x1553_0f02,
    Argb4444 = 0x1532_1002,
    Rgba4444 = 0x1542_1002,
    Abgr4444 = 0x1572_1002,
    Bgra4444 = 0x1582_1002,
    Argb1555 = 0x1533_1002,
    Rgba5551 = 0x1544_1002,
    Abgr1555 = 0x1573_1002,
    Bgra5551 = 0x1584_1002,
    Rgb565 = 0x1515_1002,
    Bgr565 = 0x1555_1002,
    Rgb24 = 0x1710_1803,
    Bgr24 = 0x1740_1803,
    Rgb888 = 0x1616_1804,
    Rgbx8888 = 0x1626_1804,
    Bgr888 = 0x1656_1804,
    Bgrx8888 = 0x1666_1804,
    Argb8888 = 0x1636_2004,
    Rgba8888 = 0x1646_2004,
    Abgr8888 = 0x1676_2004,
    Bgra8888 = 0x1686_2004,
    Argb2101010 = 0x1637_2004,
    Yv12 = 0x3231_5659,
    Iyuv = 0x5655_5949,
    Yuy2 = 0x3259_5559,
    Uyvy = 0x5956_5955,
    Yvyu = 0x5559_5659,
}

impl PixelFormat {
    /// Raw ABI code for this format.
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Looks up a format by raw ABI code. Unrecognized codes map to
    /// `Unknown`.
    pub fn from_raw(raw: u32) -> Self {
        use PixelFormat::*;
        match raw {
            0x1110_0100 => Index1Lsb,
            0x1120_0100 => Index1Msb,
            0x1210_0400 => Index4Lsb,
            0x1220_0400 => Index4Msb,
            0x1300_0801 => Index8,
            0x1411_0801 => Rgb332,
            0x1512_0c02 => Rgb444,
            0x1513_0f02 => Rgb555,
            0x1553_0f02 => Bgr555,
            0x1532_1002 => Argb4444,
            0x1542_1002 => Rgba4444,
            0x1572_1002 => Abgr4444,
            0x1582_1002 => Bgra4444,
            0x1533_1002 => Argb1555,
            0x1544_1002 => Rgba5551,
            0x1573_1002 => Abgr1555,
            0x1584_1002 => Bgra5551,
            0x1515_1002 => Rgb565,
            0x1555_1002 => Bgr565,
            0x1710_1803 => Rgb24,
            0x1740_1803 => Bgr24,
            0x1616_1804 => Rgb888,
            0x1626_1804 => Rgbx8888,
            0x1656_1804 => Bgr888,
            0x1666_1804 => Bgrx8888,
            0x1636_2004 => Argb8888,
            0x1646_2004 => Rgba8888,
            0x1676_2004 => Abgr8888,
            0x1686_2004 => Bgra8888,
            0x1637_2004 => Argb2101010,
            0x3231_5659 => Yv12,
            0x5655_5949 => Iyuv,
            0x3259_5559 => Yuy2,
            0x5956_5955 => Uyvy,
            0x5559_5659 => Yvyu,
            _ => Unknown,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
