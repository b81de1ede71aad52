//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use lucent::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Context lifecycle
pub use crate::context::{Context, InitFlags};

// Errors
pub use crate::error::{Error, Result};

// Event subsystem
pub use crate::event::keys::{KeyCode, KeyMod, KeySym, ScanCode};
pub use crate::event::{Event, EventPump, EventSender, KeyState, KeyboardEvent};

// Video subsystem
pub use crate::video::{
    BlendMode, Color, ColorMasks, PixelFormat, Point, Rect, Renderer, RendererFlags,
    RendererInfo, Size, Surface, SurfaceFlags, Texture, TextureAccess, TextureQuery, TextureRef,
    Window,
};
