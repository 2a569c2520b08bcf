//! The winit window as a [`DisplaySurface`].

use log::{debug, warn};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    monitor::{MonitorHandle, VideoMode},
    window::{Fullscreen, Window},
};

use crate::{
    error::Error,
    frame::FrameUniforms,
    renderer::Renderer,
    screen::{Position, Size},
    surface::{DisplaySurface, SavedGeometry},
};

pub struct Display {
    // Declared before `window` so the surface is dropped first.
    renderer: Renderer,
    window: Window,
    cursor: Position,
    close_requested: bool,
}

impl Display {
    pub fn new(window: Window) -> Result<Self, Error> {
        let renderer = Renderer::new(&window)?;
        Ok(Self {
            renderer,
            window,
            cursor: Position::default(),
            close_requested: false,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// winit has no cursor query, so positions are remembered as they arrive.
    pub fn track_cursor(&mut self, position: Position) {
        self.cursor = position;
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.renderer.resize(size.into());
        self.window.request_redraw();
    }

    pub fn reconfigure(&mut self) {
        self.renderer.reconfigure();
    }
}

/// The monitor's own resolution at its highest refresh rate.
fn native_video_mode(monitor: &MonitorHandle) -> Option<VideoMode> {
    let size = monitor.size();
    monitor
        .video_modes()
        .filter(|mode| mode.size() == size)
        .max_by_key(|mode| (mode.refresh_rate_millihertz(), mode.bit_depth()))
}

/// Exclusive video modes are ignored by winit's Wayland backend.
#[cfg(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
))]
fn supports_exclusive_fullscreen(window: &Window) -> bool {
    use winit::platform::unix::WindowExtUnix;
    window.wayland_display().is_none()
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd"
)))]
fn supports_exclusive_fullscreen(_window: &Window) -> bool {
    true
}

#[derive(Debug, PartialEq)]
enum FullscreenChoice<M, V> {
    Exclusive(V),
    Borderless(Option<M>),
}

/// Exclusive at the monitor's native mode where the platform honours it, borderless on
/// that monitor otherwise.
fn choose_fullscreen<M, V>(
    monitor: Option<M>,
    exclusive_supported: bool,
    native_mode: impl FnOnce(&M) -> Option<V>,
) -> FullscreenChoice<M, V> {
    match monitor {
        Some(monitor) if exclusive_supported => match native_mode(&monitor) {
            Some(mode) => FullscreenChoice::Exclusive(mode),
            None => FullscreenChoice::Borderless(Some(monitor)),
        },
        monitor => FullscreenChoice::Borderless(monitor),
    }
}

impl DisplaySurface for Display {
    type Error = wgpu::SurfaceError;

    fn viewport_size(&self) -> Size {
        self.window.inner_size().into()
    }

    fn cursor_position(&self) -> Position {
        self.cursor
    }

    fn enter_fullscreen(&mut self) -> SavedGeometry {
        let position = self.window.outer_position().unwrap_or_else(|err| {
            warn!("window position unavailable ({}), will restore at origin", err);
            PhysicalPosition::new(0, 0)
        });
        let geometry = SavedGeometry {
            x: position.x,
            y: position.y,
            size: self.window.inner_size().into(),
        };

        let exclusive_supported = supports_exclusive_fullscreen(&self.window);
        if !exclusive_supported {
            debug!("exclusive fullscreen unsupported, using borderless");
        }
        let fullscreen = match choose_fullscreen(
            self.window.primary_monitor(),
            exclusive_supported,
            native_video_mode,
        ) {
            FullscreenChoice::Exclusive(mode) => {
                debug!("fullscreen video mode {:?}", mode);
                Fullscreen::Exclusive(mode)
            }
            FullscreenChoice::Borderless(monitor) => Fullscreen::Borderless(monitor),
        };
        self.window.set_fullscreen(Some(fullscreen));

        geometry
    }

    fn restore_geometry(&mut self, geometry: SavedGeometry) {
        self.window.set_fullscreen(None);
        self.window
            .set_outer_position(PhysicalPosition::new(geometry.x, geometry.y));
        self.window
            .set_inner_size(PhysicalSize::<u32>::from(geometry.size));
    }

    fn present_frame(&mut self, uniforms: &FrameUniforms) -> Result<(), Self::Error> {
        self.renderer.render(uniforms)
    }

    fn request_close(&mut self) {
        self.close_requested = true;
    }
}
