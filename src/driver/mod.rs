//=========================================================================
// Video Driver Boundary
//
// The native boundary as a trait.
//
// Everything the resource handles and the context forward to (window,
// renderer, texture, and surface lifecycles, drawing calls, capability
// queries) crosses this one seam. A driver owns the real resources;
// the wrappers above it own exactly one handle id each and never touch
// driver internals.
//
// Contract:
// - Every fallible entry point returns `Result`. A failed creation
//   returns an error, never a usable-looking handle.
// - Operations against an id the driver does not know (never created,
//   or already destroyed) fail with `Error::UnknownHandle`; they are
//   never silently accepted.
// - `last_error()` is advisory diagnostic text about the most recent
//   failure, for log messages only. The `Result` of the triggering call
//   is the error channel.
//
// The crate ships one implementation, `headless::HeadlessDriver`, which
// does bookkeeping without rasterizing. Real windowing/rendering
// backends implement this trait outside the crate.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod headless;

//=== Internal Imports ====================================================

use crate::context::InitFlags;
use crate::error::Result;
use crate::event::EventSender;
use crate::video::color::Color;
use crate::video::geometry::{Point, Rect, Size};
use crate::video::pixel::PixelFormat;
use crate::video::renderer::{BlendMode, RendererFlags, RendererInfo};
use crate::video::surface::{ColorMasks, SurfaceFlags};
use crate::video::texture::{TextureAccess, TextureQuery};

//=== Handle Ids ==========================================================

/// Driver-issued window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) u32);

/// Driver-issued renderer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RendererId(pub(crate) u32);

/// Driver-issued texture handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub(crate) u32);

/// Driver-issued surface handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub(crate) u32);

impl WindowId {
    /// Raw id, as carried in event records' window-id field.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//=== VideoDriver =========================================================

/// The native boundary.
///
/// One method per entry point the safe layer forwards to. Mutating calls
/// take `&mut self`; the layer above serializes access (single-threaded
/// ownership model), so implementations need no internal locking.
pub trait VideoDriver {
    //--- Lifecycle --------------------------------------------------------

    /// Brings up the requested subsystems.
    fn init(&mut self, flags: InitFlags) -> Result<()>;

    /// Tears everything down. Live handles are invalidated.
    fn shutdown(&mut self);

    /// Hands the driver the push side of the event queue, so it can
    /// deliver input/system events to the pump. Drivers that generate
    /// no events keep the default no-op.
    fn connect_events(&mut self, _sender: EventSender) {}

    /// Diagnostic text for the most recent failure, if any. Advisory
    /// only; best-effort.
    fn last_error(&self) -> Option<String>;

    /// Capability descriptors of the render drivers available on this
    /// backend.
    fn driver_info(&self) -> Vec<RendererInfo>;

    //--- Window -----------------------------------------------------------

    fn create_window(&mut self, title: &str, size: Size) -> Result<WindowId>;
    fn destroy_window(&mut self, window: WindowId) -> Result<()>;
    fn window_size(&self, window: WindowId) -> Result<Size>;

    //--- Renderer ---------------------------------------------------------

    fn create_renderer(&mut self, window: WindowId, flags: RendererFlags) -> Result<RendererId>;
    fn destroy_renderer(&mut self, renderer: RendererId) -> Result<()>;
    fn renderer_info(&self, renderer: RendererId) -> Result<RendererInfo>;
    fn render_target_supported(&self, renderer: RendererId) -> Result<bool>;

    fn clear(&mut self, renderer: RendererId) -> Result<()>;
    fn present(&mut self, renderer: RendererId) -> Result<()>;

    fn set_draw_color(&mut self, renderer: RendererId, color: Color) -> Result<()>;
    fn draw_color(&self, renderer: RendererId) -> Result<Color>;
    fn set_blend_mode(&mut self, renderer: RendererId, mode: BlendMode) -> Result<()>;
    fn blend_mode(&self, renderer: RendererId) -> Result<BlendMode>;
    fn set_logical_size(&mut self, renderer: RendererId, size: Size) -> Result<()>;
    fn logical_size(&self, renderer: RendererId) -> Result<Size>;

    fn draw_point(&mut self, renderer: RendererId, point: Point) -> Result<()>;
    fn draw_line(&mut self, renderer: RendererId, from: Point, to: Point) -> Result<()>;
    fn draw_rect(&mut self, renderer: RendererId, rect: Rect) -> Result<()>;
    fn fill_rect(&mut self, renderer: RendererId, rect: Rect) -> Result<()>;
    fn copy(&mut self, renderer: RendererId, texture: TextureId, src: Rect, dst: Rect)
        -> Result<()>;

    fn set_render_target(&mut self, renderer: RendererId, target: Option<TextureId>)
        -> Result<()>;
    fn render_target(&self, renderer: RendererId) -> Result<Option<TextureId>>;

    //--- Texture ----------------------------------------------------------

    fn create_texture(
        &mut self,
        renderer: RendererId,
        format: PixelFormat,
        access: TextureAccess,
        size: Size,
    ) -> Result<TextureId>;
    fn create_texture_from_surface(
        &mut self,
        renderer: RendererId,
        surface: SurfaceId,
    ) -> Result<TextureId>;
    fn destroy_texture(&mut self, texture: TextureId) -> Result<()>;
    fn set_texture_color_mod(&mut self, texture: TextureId, color: Color) -> Result<()>;
    fn texture_color_mod(&self, texture: TextureId) -> Result<Color>;
    fn query_texture(&self, texture: TextureId) -> Result<TextureQuery>;

    //--- Surface ----------------------------------------------------------

    fn create_surface(
        &mut self,
        flags: SurfaceFlags,
        size: Size,
        depth: u32,
        masks: ColorMasks,
    ) -> Result<SurfaceId>;
    fn free_surface(&mut self, surface: SurfaceId) -> Result<()>;
    fn blit_surface(
        &mut self,
        src: SurfaceId,
        src_rect: Rect,
        dst: SurfaceId,
        dst_rect: Rect,
    ) -> Result<()>;
}
