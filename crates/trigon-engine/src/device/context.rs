use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use glutin::config::{ColorBufferType, Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::window::Window;

use crate::core::{identify_driver, SetupError};
use crate::driver::GlowDriver;
use crate::frame::Presenter;
use crate::window::WindowRuntime;

use super::ContextInit;

/// Window, GL context and the driver bound to it.
///
/// Fields drop in declaration order: driver, context, surface, window, then
/// the event loop.
pub struct GraphicsContext {
    driver: GlowDriver,
    surface: DrawSurface,
}

/// Presentation half of a [`GraphicsContext`]: event polling and swaps.
pub struct DrawSurface {
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    window: Window,
    runtime: WindowRuntime,
}

impl GraphicsContext {
    /// Creates the window and a current GL context, loads entry points and
    /// checks the context version against `init`.
    pub fn create(init: &ContextInit) -> Result<Self, SetupError> {
        let runtime = WindowRuntime::new().map_err(SetupError::Window)?;

        let attrs = Window::default_attributes()
            .with_title(init.title.clone())
            .with_inner_size(LogicalSize::new(init.width, init.height))
            .with_resizable(init.resizable);

        let template = ConfigTemplateBuilder::new()
            .with_buffer_type(ColorBufferType::Rgb {
                r_size: init.color_bits.r,
                g_size: init.color_bits.g,
                b_size: init.color_bits.b,
            })
            .with_alpha_size(init.color_bits.a)
            .with_depth_size(init.depth_bits)
            .with_stencil_size(init.stencil_bits);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(runtime.event_loop(), template, pick_config)
            .map_err(|e| SetupError::Window(anyhow!("{e}")))?;

        let window = window
            .context("display builder returned no window")
            .map_err(SetupError::Window)?;
        if init.centered {
            center_window(&window);
        }

        let (gl_context, gl_surface) =
            create_gl_context(&window, &gl_config, init).map_err(SetupError::Context)?;

        let gl = load_gl(&gl_config).map_err(SetupError::Loader)?;
        let driver = GlowDriver::new(gl);
        identify_driver(&driver, init.required_version(), driver.version())?;

        log::info!(
            "created {}x{} window with GL {}.{} context",
            init.width,
            init.height,
            driver.version().0,
            driver.version().1
        );

        Ok(Self {
            driver,
            surface: DrawSurface {
                gl_context,
                gl_surface,
                window,
                runtime,
            },
        })
    }

    #[inline]
    pub fn driver(&self) -> &GlowDriver {
        &self.driver
    }

    /// Driver and presenter, borrowed together for the frame loop.
    #[inline]
    pub fn split(&mut self) -> (&GlowDriver, &mut DrawSurface) {
        (&self.driver, &mut self.surface)
    }

    /// Tears down context, surface and window.
    ///
    /// All driver objects must already be released.
    pub fn destroy(self) {
        drop(self);
        log::debug!("graphics context destroyed");
    }
}

impl Presenter for DrawSurface {
    fn poll_quit_intent(&mut self) -> bool {
        self.runtime.poll_quit_intent()
    }

    fn present_frame(&mut self) -> Result<()> {
        self.window.pre_present_notify();
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .context("failed to swap buffers")
    }
}

/// Moves `window` to the middle of the primary monitor.
///
/// Platforms without a primary monitor or without positioning (Wayland) leave
/// the window where the compositor put it.
fn center_window(window: &Window) {
    let Some(monitor) = window.primary_monitor().or_else(|| window.current_monitor()) else {
        log::debug!("no monitor to center the window on");
        return;
    };
    let position = centered_position(monitor.position(), monitor.size(), window.outer_size());
    window.set_outer_position(position);
}

fn centered_position(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window_size: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |monitor: u32, window: u32| (i64::from(monitor) - i64::from(window)) / 2;
    PhysicalPosition::new(
        (i64::from(monitor_origin.x) + offset(monitor_size.width, window_size.width)) as i32,
        (i64::from(monitor_origin.y) + offset(monitor_size.height, window_size.height)) as i32,
    )
}

/// Prefers the config with the fewest samples; nothing here multisamples.
///
/// `find_configs` reports an empty match as `BadConfig` before the picker
/// runs, and the picker signature has no error path.
fn pick_config(mut configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    let first = configs
        .next()
        .expect("display offered no config matching the template");
    configs.fold(first, |best, c| {
        if c.num_samples() < best.num_samples() { c } else { best }
    })
}

fn create_gl_context(
    window: &Window,
    gl_config: &Config,
    init: &ContextInit,
) -> Result<(PossiblyCurrentContext, Surface<WindowSurface>)> {
    let raw_window_handle = window
        .window_handle()
        .context("window has no native handle")?
        .as_raw();

    let gl_display = gl_config.display();

    let profile = if init.core_profile {
        GlProfile::Core
    } else {
        GlProfile::Compatibility
    };
    let context_attrs = ContextAttributesBuilder::new()
        .with_profile(profile)
        .with_context_api(ContextApi::OpenGl(Some(Version::new(
            init.major_version,
            init.minor_version,
        ))))
        .build(Some(raw_window_handle));

    let not_current = unsafe { gl_display.create_context(gl_config, &context_attrs) }
        .context("driver refused the context attributes")?;

    let surface_attrs = window
        .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
        .context("failed to describe window surface")?;
    let gl_surface = unsafe { gl_display.create_window_surface(gl_config, &surface_attrs) }
        .context("failed to create window surface")?;

    let gl_context = not_current
        .make_current(&gl_surface)
        .context("failed to make context current")?;

    if init.vsync {
        if let Err(e) =
            gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
        {
            log::warn!("vsync unavailable: {e}");
        }
    }

    Ok((gl_context, gl_surface))
}

fn load_gl(gl_config: &Config) -> Result<glow::Context> {
    let gl_display = gl_config.display();

    // A context without shader entry points cannot run anything here.
    anyhow::ensure!(
        !gl_display.get_proc_address(c"glCreateShader").is_null(),
        "glCreateShader is not exported by the driver"
    );

    Ok(unsafe { glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name)) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_centered_on_the_monitor() {
        let pos = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(1920, 1080),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(pos, PhysicalPosition::new(560, 240));
    }

    #[test]
    fn centering_respects_monitor_origin() {
        let pos = centered_position(
            PhysicalPosition::new(-1280, 100),
            PhysicalSize::new(1280, 1024),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(pos, PhysicalPosition::new(-1040, 312));
    }

    #[test]
    fn oversized_window_overhangs_evenly() {
        let pos = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(640, 480),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(pos, PhysicalPosition::new(-80, -60));
    }
}
