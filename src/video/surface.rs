//=========================================================================
// Surface
//
// Owning wrapper for one driver surface handle.
//
// Surfaces are CPU-side pixel buffers, described at creation by flags,
// size, bit depth, and channel masks. Blitting between surfaces is an
// associated operation on the type, not a method of either operand.
//
//=========================================================================

//=== External Crates =====================================================

use log::warn;

//=== Internal Imports ====================================================

use super::geometry::{Rect, Size};
use super::DriverCell;
use crate::context::Context;
use crate::driver::SurfaceId;
use crate::error::{Error, Result};

//=== SurfaceFlags ========================================================

/// Surface creation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceFlags(u32);

impl SurfaceFlags {
    /// Plain software surface.
    pub const SW_SURFACE: Self = Self(0);

    /// Pixel storage is caller-preallocated.
    pub const PRE_ALLOC: Self = Self(0x0000_0001);

    /// Surface is RLE encoded.
    pub const RLE_ACCEL: Self = Self(0x0000_0002);

    /// Pixel storage is not owned and must not be freed.
    pub const DONT_FREE: Self = Self(0x0000_0004);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for SurfaceFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

//=== ColorMasks ==========================================================

/// Per-channel bit masks describing a surface's pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorMasks {
    pub r: u32,
    pub g: u32,
    pub b: u32,
    pub a: u32,
}

impl ColorMasks {
    /// Masks for 32-bit RGBA with 8 bits per channel.
    pub const fn rgba8888() -> Self {
        Self {
            r: 0xff00_0000,
            g: 0x00ff_0000,
            b: 0x0000_ff00,
            a: 0x0000_00ff,
        }
    }

    /// All-zero masks, letting the driver pick a default layout for the
    /// requested depth.
    pub const fn none() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }
}

//=== Surface =============================================================

/// A CPU-side pixel buffer, exclusively owned.
pub struct Surface {
    driver: DriverCell,
    id: SurfaceId,
    size: Size,
    released: bool,
}

impl Surface {
    //--- Construction -----------------------------------------------------

    /// Creates a surface with the given flags, size, bit depth, and
    /// channel masks.
    pub fn create(
        context: &Context,
        flags: SurfaceFlags,
        size: Size,
        depth: u32,
        masks: ColorMasks,
    ) -> Result<Self> {
        if size.is_empty() {
            return Err(Error::InvalidParameter { what: "surface size must be non-zero" });
        }

        let driver = context.driver();
        let id = driver.borrow_mut().create_surface(flags, size, depth, masks)?;

        Ok(Self { driver, id, size, released: false })
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    //--- Blitting ---------------------------------------------------------

    /// Copies `src_rect` of `src` onto `dst_rect` of `dst`.
    pub fn blit(src: &Surface, src_rect: Rect, dst: &mut Surface, dst_rect: Rect) -> Result<()> {
        src.driver
            .borrow_mut()
            .blit_surface(src.id, src_rect, dst.id, dst_rect)
    }

    //--- Lifecycle --------------------------------------------------------

    /// Frees the surface, releasing the driver handle.
    pub fn free(mut self) -> Result<()> {
        self.released = true;
        self.driver.borrow_mut().free_surface(self.id)
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.driver.borrow_mut().free_surface(self.id) {
            warn!(target: "video", "surface release failed on drop: {}", e);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
