//=========================================================================
// Headless Driver
//
// The built-in `VideoDriver`: full resource bookkeeping, no rasterizing.
//
// Every handle the safe layer can hold is tracked in a table here, and
// every operation validates its handles before doing anything else: an
// id that was never issued, or whose resource was destroyed, fails with
// `Error::UnknownHandle`. Renderer and texture state (draw color, blend
// mode, logical size, render target, color mod) is stored and read back
// verbatim.
//
// What this driver deliberately does not do: put pixels anywhere.
// Drawing, copying, and blitting validate and return. That makes it the
// reference backend for tests and for embedders that want the resource
// and event model without a display.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== External Crates =====================================================

use log::{debug, info, warn};

//=== Internal Imports ====================================================

use super::{RendererId, SurfaceId, TextureId, VideoDriver, WindowId};
use crate::context::InitFlags;
use crate::error::{Error, Result};
use crate::video::color::Color;
use crate::video::geometry::{Point, Rect, Size};
use crate::video::pixel::PixelFormat;
use crate::video::renderer::{BlendMode, RendererFlags, RendererInfo};
use crate::video::surface::{ColorMasks, SurfaceFlags};
use crate::video::texture::{TextureAccess, TextureQuery};

//=== Capabilities ========================================================

/// Largest texture extent the headless driver will create.
const MAX_TEXTURE_EXTENT: u32 = 16_384;

/// Formats reported by capability queries, in preference order.
const TEXTURE_FORMATS: [PixelFormat; 4] = [
    PixelFormat::Abgr8888,
    PixelFormat::Argb8888,
    PixelFormat::Rgb888,
    PixelFormat::Rgb565,
];

/// Bit depths accepted for surfaces.
const SURFACE_DEPTHS: [u32; 4] = [8, 16, 24, 32];

//=== Resource State ======================================================

#[derive(Debug)]
struct WindowState {
    size: Size,
}

#[derive(Debug)]
struct RendererState {
    flags: RendererFlags,
    draw_color: Color,
    blend_mode: BlendMode,
    logical_size: Size,
    target: Option<TextureId>,
}

#[derive(Debug)]
struct TextureState {
    format: PixelFormat,
    access: TextureAccess,
    size: Size,
    color_mod: Color,
}

#[derive(Debug)]
struct SurfaceState {
    size: Size,
}

//=== HeadlessDriver ======================================================

/// Bookkeeping-only video driver.
pub struct HeadlessDriver {
    initialized: Option<InitFlags>,
    last_error: Option<String>,
    next_id: u32,
    windows: HashMap<u32, WindowState>,
    renderers: HashMap<u32, RendererState>,
    textures: HashMap<u32, TextureState>,
    surfaces: HashMap<u32, SurfaceState>,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Self {
            initialized: None,
            last_error: None,
            next_id: 1,
            windows: HashMap::new(),
            renderers: HashMap::new(),
            textures: HashMap::new(),
            surfaces: HashMap::new(),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Records the failure in the diagnostic slot and returns it.
    fn fail<T>(&mut self, error: Error) -> Result<T> {
        warn!(target: "driver", "{}", error);
        self.last_error = Some(error.to_string());
        Err(error)
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn require_subsystem(&mut self, flag: InitFlags, subsystem: &'static str) -> Result<()> {
        let up = self.initialized.map_or(false, |flags| flags.contains(flag));
        if up {
            Ok(())
        } else {
            self.fail(Error::SubsystemNotInitialized { subsystem })
        }
    }

    fn renderer_state(&self, renderer: RendererId) -> Result<&RendererState> {
        self.renderers
            .get(&renderer.0)
            .ok_or(Error::UnknownHandle { resource: "renderer" })
    }

    fn renderer_state_mut(&mut self, renderer: RendererId) -> Result<&mut RendererState> {
        if !self.renderers.contains_key(&renderer.0) {
            return self.fail(Error::UnknownHandle { resource: "renderer" });
        }
        self.renderers
            .get_mut(&renderer.0)
            .ok_or(Error::UnknownHandle { resource: "renderer" })
    }

    fn texture_state(&self, texture: TextureId) -> Result<&TextureState> {
        self.textures
            .get(&texture.0)
            .ok_or(Error::UnknownHandle { resource: "texture" })
    }

    fn surface_state(&self, surface: SurfaceId) -> Result<&SurfaceState> {
        self.surfaces
            .get(&surface.0)
            .ok_or(Error::UnknownHandle { resource: "surface" })
    }

    fn check_texture_size(&mut self, size: Size) -> Result<()> {
        if size.is_empty() {
            return self.fail(Error::InvalidParameter { what: "texture size must be non-zero" });
        }
        if size.width > MAX_TEXTURE_EXTENT || size.height > MAX_TEXTURE_EXTENT {
            return self.fail(Error::CreationFailed {
                resource: "texture",
                reason: format!(
                    "{}x{} exceeds the {}x{} limit",
                    size.width, size.height, MAX_TEXTURE_EXTENT, MAX_TEXTURE_EXTENT
                ),
            });
        }
        Ok(())
    }

    fn check_rect_within(&mut self, rect: Rect, bounds: Size, what: &'static str) -> Result<()> {
        let fits = rect.x >= 0
            && rect.y >= 0
            && rect.x as u64 + rect.width as u64 <= bounds.width as u64
            && rect.y as u64 + rect.height as u64 <= bounds.height as u64;
        if fits {
            Ok(())
        } else {
            self.fail(Error::InvalidParameter { what })
        }
    }

    fn info_with_flags(&self, flags: RendererFlags) -> RendererInfo {
        RendererInfo {
            name: "headless".to_owned(),
            flags,
            texture_formats: TEXTURE_FORMATS.to_vec(),
            max_texture_size: Size::new(MAX_TEXTURE_EXTENT, MAX_TEXTURE_EXTENT),
        }
    }
}

impl Default for HeadlessDriver {
    fn default() -> Self {
        Self::new()
    }
}

//=== VideoDriver Implementation ==========================================

impl VideoDriver for HeadlessDriver {
    //--- Lifecycle --------------------------------------------------------

    fn init(&mut self, flags: InitFlags) -> Result<()> {
        info!(target: "driver", "headless driver up (flags {:#x})", flags.bits());
        self.initialized = Some(flags);
        Ok(())
    }

    fn shutdown(&mut self) {
        debug!(
            target: "driver",
            "headless driver down ({} windows, {} renderers, {} textures, {} surfaces live)",
            self.windows.len(),
            self.renderers.len(),
            self.textures.len(),
            self.surfaces.len()
        );
        self.windows.clear();
        self.renderers.clear();
        self.textures.clear();
        self.surfaces.clear();
        self.initialized = None;
    }

    fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }

    fn driver_info(&self) -> Vec<RendererInfo> {
        vec![self.info_with_flags(RendererFlags::ACCELERATED | RendererFlags::TARGET_TEXTURE)]
    }

    //--- Window -----------------------------------------------------------

    fn create_window(&mut self, title: &str, size: Size) -> Result<WindowId> {
        self.require_subsystem(InitFlags::VIDEO, "video")?;

        let id = self.allocate_id();
        debug!(target: "driver", "window {} \"{}\" {}x{}", id, title, size.width, size.height);
        self.windows.insert(id, WindowState { size });
        Ok(WindowId(id))
    }

    fn destroy_window(&mut self, window: WindowId) -> Result<()> {
        if self.windows.remove(&window.0).is_none() {
            return self.fail(Error::UnknownHandle { resource: "window" });
        }
        Ok(())
    }

    fn window_size(&self, window: WindowId) -> Result<Size> {
        self.windows
            .get(&window.0)
            .map(|state| state.size)
            .ok_or(Error::UnknownHandle { resource: "window" })
    }

    //--- Renderer ---------------------------------------------------------

    fn create_renderer(&mut self, window: WindowId, flags: RendererFlags) -> Result<RendererId> {
        if !self.windows.contains_key(&window.0) {
            return self.fail(Error::UnknownHandle { resource: "window" });
        }

        let id = self.allocate_id();
        self.renderers.insert(
            id,
            RendererState {
                flags,
                draw_color: Color::BLACK,
                blend_mode: BlendMode::None,
                logical_size: Size::new(0, 0),
                target: None,
            },
        );
        Ok(RendererId(id))
    }

    fn destroy_renderer(&mut self, renderer: RendererId) -> Result<()> {
        if self.renderers.remove(&renderer.0).is_none() {
            return self.fail(Error::UnknownHandle { resource: "renderer" });
        }
        Ok(())
    }

    fn renderer_info(&self, renderer: RendererId) -> Result<RendererInfo> {
        let state = self.renderer_state(renderer)?;
        Ok(self.info_with_flags(state.flags))
    }

    fn render_target_supported(&self, renderer: RendererId) -> Result<bool> {
        let state = self.renderer_state(renderer)?;
        Ok(state.flags.contains(RendererFlags::TARGET_TEXTURE))
    }

    fn clear(&mut self, renderer: RendererId) -> Result<()> {
        self.renderer_state_mut(renderer).map(|_| ())
    }

    fn present(&mut self, renderer: RendererId) -> Result<()> {
        self.renderer_state_mut(renderer).map(|_| ())
    }

    fn set_draw_color(&mut self, renderer: RendererId, color: Color) -> Result<()> {
        self.renderer_state_mut(renderer)?.draw_color = color;
        Ok(())
    }

    fn draw_color(&self, renderer: RendererId) -> Result<Color> {
        Ok(self.renderer_state(renderer)?.draw_color)
    }

    fn set_blend_mode(&mut self, renderer: RendererId, mode: BlendMode) -> Result<()> {
        self.renderer_state_mut(renderer)?.blend_mode = mode;
        Ok(())
    }

    fn blend_mode(&self, renderer: RendererId) -> Result<BlendMode> {
        Ok(self.renderer_state(renderer)?.blend_mode)
    }

    fn set_logical_size(&mut self, renderer: RendererId, size: Size) -> Result<()> {
        self.renderer_state_mut(renderer)?.logical_size = size;
        Ok(())
    }

    fn logical_size(&self, renderer: RendererId) -> Result<Size> {
        Ok(self.renderer_state(renderer)?.logical_size)
    }

    fn draw_point(&mut self, renderer: RendererId, _point: Point) -> Result<()> {
        self.renderer_state_mut(renderer).map(|_| ())
    }

    fn draw_line(&mut self, renderer: RendererId, _from: Point, _to: Point) -> Result<()> {
        self.renderer_state_mut(renderer).map(|_| ())
    }

    fn draw_rect(&mut self, renderer: RendererId, _rect: Rect) -> Result<()> {
        self.renderer_state_mut(renderer).map(|_| ())
    }

    fn fill_rect(&mut self, renderer: RendererId, _rect: Rect) -> Result<()> {
        self.renderer_state_mut(renderer).map(|_| ())
    }

    fn copy(
        &mut self,
        renderer: RendererId,
        texture: TextureId,
        _src: Rect,
        _dst: Rect,
    ) -> Result<()> {
        self.renderer_state(renderer)?;
        if !self.textures.contains_key(&texture.0) {
            return self.fail(Error::UnknownHandle { resource: "texture" });
        }
        Ok(())
    }

    fn set_render_target(&mut self, renderer: RendererId, target: Option<TextureId>) -> Result<()> {
        let supported = match self.render_target_supported(renderer) {
            Ok(supported) => supported,
            Err(error) => return self.fail(error),
        };

        if let Some(texture) = target {
            if !supported {
                return self.fail(Error::Unsupported {
                    what: "texture render targets on this renderer",
                });
            }
            let access = self.texture_state(texture).map(|state| state.access);
            match access {
                Ok(TextureAccess::Target) => {}
                Ok(_) => {
                    return self.fail(Error::InvalidParameter {
                        what: "texture was not created with target access",
                    })
                }
                Err(error) => return self.fail(error),
            }
        }

        self.renderer_state_mut(renderer)?.target = target;
        Ok(())
    }

    fn render_target(&self, renderer: RendererId) -> Result<Option<TextureId>> {
        Ok(self.renderer_state(renderer)?.target)
    }

    //--- Texture ----------------------------------------------------------

    fn create_texture(
        &mut self,
        renderer: RendererId,
        format: PixelFormat,
        access: TextureAccess,
        size: Size,
    ) -> Result<TextureId> {
        if !self.renderers.contains_key(&renderer.0) {
            return self.fail(Error::UnknownHandle { resource: "renderer" });
        }
        self.check_texture_size(size)?;

        let id = self.allocate_id();
        self.textures.insert(
            id,
            TextureState { format, access, size, color_mod: Color::WHITE },
        );
        Ok(TextureId(id))
    }

    fn create_texture_from_surface(
        &mut self,
        renderer: RendererId,
        surface: SurfaceId,
    ) -> Result<TextureId> {
        let size = match self.surface_state(surface) {
            Ok(state) => state.size,
            Err(error) => return self.fail(error),
        };
        self.create_texture(renderer, PixelFormat::Abgr8888, TextureAccess::Static, size)
    }

    fn destroy_texture(&mut self, texture: TextureId) -> Result<()> {
        if self.textures.remove(&texture.0).is_none() {
            return self.fail(Error::UnknownHandle { resource: "texture" });
        }
        // A renderer drawing into the destroyed texture falls back to
        // its window surface.
        for state in self.renderers.values_mut() {
            if state.target == Some(texture) {
                state.target = None;
            }
        }
        Ok(())
    }

    fn set_texture_color_mod(&mut self, texture: TextureId, color: Color) -> Result<()> {
        match self.textures.get_mut(&texture.0) {
            Some(state) => {
                state.color_mod = color;
                Ok(())
            }
            None => self.fail(Error::UnknownHandle { resource: "texture" }),
        }
    }

    fn texture_color_mod(&self, texture: TextureId) -> Result<Color> {
        Ok(self.texture_state(texture)?.color_mod)
    }

    fn query_texture(&self, texture: TextureId) -> Result<TextureQuery> {
        let state = self.texture_state(texture)?;
        Ok(TextureQuery {
            format: state.format,
            access: state.access,
            size: state.size,
        })
    }

    //--- Surface ----------------------------------------------------------

    fn create_surface(
        &mut self,
        flags: SurfaceFlags,
        size: Size,
        depth: u32,
        masks: ColorMasks,
    ) -> Result<SurfaceId> {
        self.require_subsystem(InitFlags::VIDEO, "video")?;
        if size.is_empty() {
            return self.fail(Error::InvalidParameter { what: "surface size must be non-zero" });
        }
        if !SURFACE_DEPTHS.contains(&depth) {
            return self.fail(Error::InvalidParameter {
                what: "surface depth must be 8, 16, 24, or 32",
            });
        }

        let id = self.allocate_id();
        debug!(
            target: "driver",
            "surface {} {}x{} depth {} (flags {:#x}, masks {:?})",
            id, size.width, size.height, depth, flags.bits(), masks
        );
        self.surfaces.insert(id, SurfaceState { size });
        Ok(SurfaceId(id))
    }

    fn free_surface(&mut self, surface: SurfaceId) -> Result<()> {
        if self.surfaces.remove(&surface.0).is_none() {
            return self.fail(Error::UnknownHandle { resource: "surface" });
        }
        Ok(())
    }

    fn blit_surface(
        &mut self,
        src: SurfaceId,
        src_rect: Rect,
        dst: SurfaceId,
        dst_rect: Rect,
    ) -> Result<()> {
        let src_size = match self.surface_state(src) {
            Ok(state) => state.size,
            Err(error) => return self.fail(error),
        };
        let dst_size = match self.surface_state(dst) {
            Ok(state) => state.size,
            Err(error) => return self.fail(error),
        };

        self.check_rect_within(src_rect, src_size, "blit source rect is out of bounds")?;
        self.check_rect_within(dst_rect, dst_size, "blit destination rect is out of bounds")
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn driver() -> HeadlessDriver {
        let mut driver = HeadlessDriver::new();
        driver.init(InitFlags::VIDEO | InitFlags::EVENTS).unwrap();
        driver
    }

    fn window(driver: &mut HeadlessDriver) -> WindowId {
        driver.create_window("w", Size::new(100, 100)).unwrap()
    }

    fn renderer(driver: &mut HeadlessDriver) -> RendererId {
        let win = window(driver);
        driver
            .create_renderer(win, RendererFlags::ACCELERATED | RendererFlags::TARGET_TEXTURE)
            .unwrap()
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn window_creation_requires_the_video_subsystem() {
        let mut driver = HeadlessDriver::new();
        driver.init(InitFlags::TIMER).unwrap();

        assert_eq!(
            driver.create_window("w", Size::new(1, 1)),
            Err(Error::SubsystemNotInitialized { subsystem: "video" })
        );
    }

    #[test]
    fn destroying_a_never_created_handle_is_an_error() {
        let mut driver = driver();

        assert_eq!(
            driver.destroy_window(WindowId(42)),
            Err(Error::UnknownHandle { resource: "window" })
        );
        assert_eq!(
            driver.destroy_renderer(RendererId(42)),
            Err(Error::UnknownHandle { resource: "renderer" })
        );
        assert_eq!(
            driver.destroy_texture(TextureId(42)),
            Err(Error::UnknownHandle { resource: "texture" })
        );
        assert_eq!(
            driver.free_surface(SurfaceId(42)),
            Err(Error::UnknownHandle { resource: "surface" })
        );
    }

    #[test]
    fn destroying_twice_is_an_error() {
        let mut driver = driver();
        let win = window(&mut driver);

        driver.destroy_window(win).unwrap();
        assert_eq!(
            driver.destroy_window(win),
            Err(Error::UnknownHandle { resource: "window" })
        );
    }

    #[test]
    fn shutdown_invalidates_live_handles() {
        let mut driver = driver();
        let win = window(&mut driver);

        driver.shutdown();

        assert_eq!(
            driver.window_size(win),
            Err(Error::UnknownHandle { resource: "window" })
        );
    }

    #[test]
    fn ids_are_never_reused() {
        let mut driver = driver();
        let first = window(&mut driver);
        driver.destroy_window(first).unwrap();
        let second = window(&mut driver);

        assert_ne!(first, second);
    }

    //=====================================================================
    // Diagnostic Slot Tests
    //=====================================================================

    #[test]
    fn last_error_is_empty_until_a_failure() {
        let driver = driver();
        assert!(driver.last_error().is_none());
    }

    #[test]
    fn last_error_describes_the_most_recent_failure() {
        let mut driver = driver();
        let _ = driver.destroy_window(WindowId(9));

        let text = driver.last_error().unwrap();
        assert!(text.contains("window"));
    }

    //=====================================================================
    // Renderer State Tests
    //=====================================================================

    #[test]
    fn renderer_info_echoes_creation_flags() {
        let mut driver = driver();
        let win = window(&mut driver);
        let renderer = driver
            .create_renderer(win, RendererFlags::SOFTWARE | RendererFlags::PRESENT_VSYNC)
            .unwrap();

        let info = driver.renderer_info(renderer).unwrap();
        assert_eq!(info.name, "headless");
        assert_eq!(info.flags, RendererFlags::SOFTWARE | RendererFlags::PRESENT_VSYNC);
        assert_eq!(info.texture_formats, TEXTURE_FORMATS.to_vec());
    }

    #[test]
    fn destroying_the_target_texture_resets_the_render_target() {
        let mut driver = driver();
        let ren = renderer(&mut driver);
        let tex = driver
            .create_texture(ren, PixelFormat::Abgr8888, TextureAccess::Target, Size::new(4, 4))
            .unwrap();

        driver.set_render_target(ren, Some(tex)).unwrap();
        driver.destroy_texture(tex).unwrap();

        assert_eq!(driver.render_target(ren).unwrap(), None);
    }

    #[test]
    fn driver_info_lists_the_headless_backend() {
        let driver = driver();
        let infos = driver.driver_info();

        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].name, "headless");
        assert!(infos[0].flags.contains(RendererFlags::ACCELERATED));
    }

    //=====================================================================
    // Blit Validation Tests
    //=====================================================================

    #[test]
    fn blit_rejects_out_of_bounds_rects() {
        let mut driver = driver();
        let src = driver
            .create_surface(SurfaceFlags::SW_SURFACE, Size::new(8, 8), 32, ColorMasks::none())
            .unwrap();
        let dst = driver
            .create_surface(SurfaceFlags::SW_SURFACE, Size::new(8, 8), 32, ColorMasks::none())
            .unwrap();

        let result = driver.blit_surface(src, Rect::new(4, 4, 8, 8), dst, Rect::new(0, 0, 4, 4));
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));

        let result = driver.blit_surface(src, Rect::new(0, 0, 4, 4), dst, Rect::new(-1, 0, 4, 4));
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }
}
