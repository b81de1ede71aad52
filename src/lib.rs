//=========================================================================
// Lucent — Library Root
//
// This crate defines the public API surface of the Lucent platform
// layer.
//
// Responsibilities:
// - Expose the context lifecycle (`Context`: init/quit)
// - Expose the event subsystem (non-blocking pump, observers, history)
// - Expose the video resource wrappers (window, renderer, texture,
//   surface) with exclusive, release-once ownership
// - Keep the native boundary behind one trait (`driver::VideoDriver`)
//   so backends plug in without touching the safe layer
//
// Typical usage:
// ```no_run
// use lucent::prelude::*;
//
// fn main() -> lucent::Result<()> {
//     let mut ctx = Context::init(InitFlags::VIDEO | InitFlags::EVENTS)?;
//     let window = Window::create(&ctx, "demo", Size::new(800, 600))?;
//     let mut renderer = Renderer::create(&window, RendererFlags::ACCELERATED)?;
//
//     let mut pump = ctx.event_pump()?;
//
//     loop {
//         while let Some(event) = pump.poll() {
//             if event.is_quit() {
//                 return Ok(());
//             }
//         }
//         renderer.clear()?;
//         renderer.present()?;
//     }
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `context` owns init/quit and the event queue; `event` and `video` are
// the two subsystems callers interact with per frame. `driver` is public
// so embedders can implement real backends against the trait.
//
pub mod context;
pub mod driver;
pub mod error;
pub mod event;
pub mod prelude;
pub mod video;

//--- Public Exports ------------------------------------------------------
//
// The context and the error/result pair are the types every caller
// touches, so they are re-exported at the root.
//
pub use context::{Context, InitFlags};
pub use error::{Error, Result};
