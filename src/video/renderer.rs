//=========================================================================
// Renderer
//
// Owning wrapper for one driver rendering context, bound to exactly one
// window at creation.
//
// Every drawing and query call forwards to the driver and returns
// `Result`; the renderer keeps no drawing state of its own. The current
// render target can be inspected through a borrowed `TextureRef` view,
// never through a second owning wrapper.
//
//=========================================================================

//=== External Crates =====================================================

use log::{info, warn};

//=== Internal Imports ====================================================

use super::color::Color;
use super::geometry::{Point, Rect, Size};
use super::pixel::PixelFormat;
use super::texture::Texture;
use super::window::Window;
use super::DriverCell;
use crate::driver::{RendererId, TextureId, WindowId};
use crate::error::Result;

//=== RendererFlags =======================================================

/// Renderer creation flags.
///
/// Combine with `|`. A driver may honor a subset; the flags it actually
/// selected are reported by [`Renderer::info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RendererFlags(u32);

impl RendererFlags {
    pub const NONE: Self = Self(0);

    /// Software fallback renderer.
    pub const SOFTWARE: Self = Self(0x0000_0001);

    /// Hardware-accelerated renderer.
    pub const ACCELERATED: Self = Self(0x0000_0002);

    /// Present is synchronized with the display refresh.
    pub const PRESENT_VSYNC: Self = Self(0x0000_0004);

    /// Renderer supports rendering into textures.
    pub const TARGET_TEXTURE: Self = Self(0x0000_0008);

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

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for RendererFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for RendererFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

//=== BlendMode ===========================================================

/// The arithmetic rule combining a drawn color with the existing target
/// color.
///
/// Each mode is a distinct named constant with a distinct value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum BlendMode {
    /// No blending: `dst = src`.
    #[default]
    None = 0x0,

    /// Alpha blending:
    /// `dstRGB = srcRGB * srcA + dstRGB * (1 - srcA)`,
    /// `dstA = srcA + dstA * (1 - srcA)`.
    Blend = 0x1,

    /// Additive blending: `dstRGB = srcRGB * srcA + dstRGB`.
    Add = 0x2,

    /// Color modulate: `dstRGB = srcRGB * dstRGB`.
    Mod = 0x4,
}

impl BlendMode {
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Looks up a mode by raw value; `None` (the enum option, not the
    /// blend mode) for unrecognized values.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x0 => Some(Self::None),
            0x1 => Some(Self::Blend),
            0x2 => Some(Self::Add),
            0x4 => Some(Self::Mod),
            _ => Option::None,
        }
    }
}

//=== RendererInfo ========================================================

/// Capability descriptor of a render driver or live rendering context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererInfo {
    /// Driver name.
    pub name: String,

    /// Flags in effect.
    pub flags: RendererFlags,

    /// Texture pixel formats the driver accepts, in preference order.
    pub texture_formats: Vec<PixelFormat>,

    /// Largest texture extent the driver will create.
    pub max_texture_size: Size,
}

//=== TextureRef ==========================================================

/// Borrowed, non-owning view of a texture handle.
///
/// Returned by [`Renderer::render_target`]. The view releases nothing on
/// drop; the owning [`Texture`] remains the only place the handle is
/// freed. The lifetime ties the view to the renderer it was queried
/// from.
#[derive(Debug, Clone, Copy)]
pub struct TextureRef<'r> {
    id: TextureId,
    size: Size,
    _renderer: std::marker::PhantomData<&'r Renderer>,
}

impl TextureRef<'_> {
    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

//=== Renderer ============================================================

/// A 2D rendering context, exclusively owned, bound to one window.
pub struct Renderer {
    driver: DriverCell,
    id: RendererId,
    window: WindowId,
    released: bool,
}

impl Renderer {
    //--- Construction -----------------------------------------------------

    /// Creates a rendering context for `window`.
    ///
    /// # Errors
    ///
    /// Fails if the driver cannot provide a renderer with the requested
    /// flags. No handle is retained on failure; retrying with different
    /// flags is the caller's decision.
    pub fn create(window: &Window, flags: RendererFlags) -> Result<Self> {
        let driver = window.driver();
        let id = driver.borrow_mut().create_renderer(window.id(), flags)?;

        info!(target: "video", "renderer created for window {}", window.id());

        Ok(Self {
            driver,
            id,
            window: window.id(),
            released: false,
        })
    }

    //--- Accessors --------------------------------------------------------

    /// Id of the window this renderer draws into.
    pub fn window_id(&self) -> WindowId {
        self.window
    }

    pub(crate) fn id(&self) -> RendererId {
        self.id
    }

    pub(crate) fn driver(&self) -> DriverCell {
        DriverCell::clone(&self.driver)
    }

    /// Capability descriptor of this rendering context.
    pub fn info(&self) -> Result<RendererInfo> {
        self.driver.borrow().renderer_info(self.id)
    }

    /// Whether this renderer can draw into textures.
    pub fn is_render_target_supported(&self) -> Result<bool> {
        self.driver.borrow().render_target_supported(self.id)
    }

    //--- Draw State -------------------------------------------------------

    /// Sets the color used by clear and draw calls.
    pub fn set_draw_color(&mut self, color: Color) -> Result<()> {
        self.driver.borrow_mut().set_draw_color(self.id, color)
    }

    pub fn draw_color(&self) -> Result<Color> {
        self.driver.borrow().draw_color(self.id)
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) -> Result<()> {
        self.driver.borrow_mut().set_blend_mode(self.id, mode)
    }

    pub fn blend_mode(&self) -> Result<BlendMode> {
        self.driver.borrow().blend_mode(self.id)
    }

    /// Sets a device-independent logical resolution for drawing.
    pub fn set_logical_size(&mut self, size: Size) -> Result<()> {
        self.driver.borrow_mut().set_logical_size(self.id, size)
    }

    /// The logical resolution; zero extent when none was set.
    pub fn logical_size(&self) -> Result<Size> {
        self.driver.borrow().logical_size(self.id)
    }

    //--- Drawing ----------------------------------------------------------

    /// Fills the current render target with the draw color.
    pub fn clear(&mut self) -> Result<()> {
        self.driver.borrow_mut().clear(self.id)
    }

    pub fn draw_point(&mut self, point: Point) -> Result<()> {
        self.driver.borrow_mut().draw_point(self.id, point)
    }

    pub fn draw_line(&mut self, from: Point, to: Point) -> Result<()> {
        self.driver.borrow_mut().draw_line(self.id, from, to)
    }

    pub fn draw_rect(&mut self, rect: Rect) -> Result<()> {
        self.driver.borrow_mut().draw_rect(self.id, rect)
    }

    pub fn fill_rect(&mut self, rect: Rect) -> Result<()> {
        self.driver.borrow_mut().fill_rect(self.id, rect)
    }

    /// Copies the whole texture to the current render target with its
    /// top-left corner at `position`.
    pub fn copy(&mut self, texture: &Texture, position: Point) -> Result<()> {
        let src = Rect::from_size(texture.size());
        let dst = Rect::at(position, texture.size());
        self.driver.borrow_mut().copy(self.id, texture.id(), src, dst)
    }

    /// Makes the rendering performed since the last present visible.
    pub fn present(&mut self) -> Result<()> {
        self.driver.borrow_mut().present(self.id)
    }

    //--- Render Target ----------------------------------------------------

    /// Redirects drawing into `target`, or back to the window surface
    /// for `None`.
    ///
    /// # Errors
    ///
    /// Fails if the texture was not created with
    /// `TextureAccess::Target`, or if the renderer does not support
    /// texture targets.
    pub fn set_render_target(&mut self, target: Option<&Texture>) -> Result<()> {
        self.driver
            .borrow_mut()
            .set_render_target(self.id, target.map(Texture::id))
    }

    /// The current render target as a borrowed view; `None` when drawing
    /// goes to the window surface.
    pub fn render_target(&self) -> Result<Option<TextureRef<'_>>> {
        let target = self.driver.borrow().render_target(self.id)?;
        match target {
            Some(texture) => {
                let query = self.driver.borrow().query_texture(texture)?;
                Ok(Some(TextureRef {
                    id: texture,
                    size: query.size,
                    _renderer: std::marker::PhantomData,
                }))
            }
            None => Ok(None),
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Destroys the rendering context, releasing the driver handle.
    pub fn destroy(mut self) -> Result<()> {
        self.released = true;
        self.driver.borrow_mut().destroy_renderer(self.id)
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.driver.borrow_mut().destroy_renderer(self.id) {
            warn!(target: "video", "renderer release failed on drop: {}", e);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
