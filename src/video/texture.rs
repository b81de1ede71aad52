//=========================================================================
// Texture
//
// Owning wrapper for one driver texture handle.
//
// Textures are created from a renderer, either with an explicit format,
// access mode, and size, or from the pixels of a surface. The size is
// fixed at creation and cached, so querying it never crosses the driver
// boundary.
//
//=========================================================================

//=== External Crates =====================================================

use log::warn;

//=== Internal Imports ====================================================

use super::color::Color;
use super::geometry::Size;
use super::pixel::PixelFormat;
use super::renderer::Renderer;
use super::surface::Surface;
use super::DriverCell;
use crate::driver::TextureId;
use crate::error::Result;

//=== TextureAccess =======================================================

/// How a texture may be updated and used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TextureAccess {
    /// Changes rarely, not lockable.
    Static = 0,

    /// Changes frequently, lockable.
    Streaming = 1,

    /// Can be used as a render target.
    Target = 2,
}

//=== TextureQuery ========================================================

/// Format, access mode, and size of a texture, as the driver reports
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureQuery {
    pub format: PixelFormat,
    pub access: TextureAccess,
    pub size: Size,
}

//=== Texture =============================================================

/// A GPU-side image, exclusively owned.
pub struct Texture {
    driver: DriverCell,
    id: TextureId,
    size: Size,
    released: bool,
}

impl Texture {
    //--- Construction -----------------------------------------------------

    /// Creates a texture with an explicit format, access mode, and size.
    pub fn create(
        renderer: &Renderer,
        format: PixelFormat,
        access: TextureAccess,
        size: Size,
    ) -> Result<Self> {
        let driver = renderer.driver();
        let id = driver
            .borrow_mut()
            .create_texture(renderer.id(), format, access, size)?;

        Ok(Self { driver, id, size, released: false })
    }

    /// Creates a static ABGR8888 texture of the given size.
    pub fn with_size(renderer: &Renderer, size: Size) -> Result<Self> {
        Self::create(renderer, PixelFormat::Abgr8888, TextureAccess::Static, size)
    }

    /// Creates a texture from the pixels of a surface. The texture takes
    /// the surface's size; the surface stays independently owned.
    pub fn from_surface(renderer: &Renderer, surface: &Surface) -> Result<Self> {
        let driver = renderer.driver();
        let id = driver
            .borrow_mut()
            .create_texture_from_surface(renderer.id(), surface.id())?;
        let size = surface.size();

        Ok(Self { driver, id, size, released: false })
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn id(&self) -> TextureId {
        self.id
    }

    /// The texture's extent, fixed at creation.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Format, access mode, and size as the driver reports them.
    pub fn query(&self) -> Result<TextureQuery> {
        self.driver.borrow().query_texture(self.id)
    }

    //--- Modulation -------------------------------------------------------

    /// Sets the color multiplied into copy operations. The alpha channel
    /// is ignored.
    pub fn set_color_mod(&mut self, color: Color) -> Result<()> {
        self.driver.borrow_mut().set_texture_color_mod(self.id, color)
    }

    /// The color currently multiplied into copy operations.
    pub fn color_mod(&self) -> Result<Color> {
        self.driver.borrow().texture_color_mod(self.id)
    }

    //--- Lifecycle --------------------------------------------------------

    /// Destroys the texture, releasing the driver handle.
    pub fn destroy(mut self) -> Result<()> {
        self.released = true;
        self.driver.borrow_mut().destroy_texture(self.id)
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.driver.borrow_mut().destroy_texture(self.id) {
            warn!(target: "video", "texture release failed on drop: {}", e);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
