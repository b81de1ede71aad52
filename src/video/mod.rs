//=========================================================================
// Video Subsystem
//
// Safe wrappers over the driver's window, renderer, texture, and
// surface resources.
//
// Ownership model:
// - Each wrapper is the sole owner of exactly one driver handle and
//   releases it exactly once: explicitly via `destroy()`/`free()`
//   (which consume the wrapper, so a second destroy does not typecheck)
//   or implicitly on drop as a backstop.
// - Queried handles are never second owners. `Renderer::render_target`
//   returns a borrowed `TextureRef` view, so release logic cannot be
//   duplicated.
// - All wrappers hold the shared driver cell (`Rc`) and are therefore
//   pinned to the owning thread.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod color;
pub mod geometry;
pub mod pixel;
pub mod renderer;
pub mod surface;
pub mod texture;
pub mod window;

//=== Public Exports ======================================================

pub use color::Color;
pub use geometry::{Point, Rect, Size};
pub use pixel::PixelFormat;
pub use renderer::{BlendMode, Renderer, RendererFlags, RendererInfo, TextureRef};
pub use surface::{ColorMasks, Surface, SurfaceFlags};
pub use texture::{Texture, TextureAccess, TextureQuery};
pub use window::Window;

//=== Driver Cell =========================================================

use crate::driver::VideoDriver;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to the driver, held by the context and every wrapper.
///
/// `Rc` keeps the driver alive until the last wrapper is gone and makes
/// every holder `!Send`, which is the concurrency contract: one thread
/// owns the video subsystem.
pub(crate) type DriverCell = Rc<RefCell<dyn VideoDriver>>;
