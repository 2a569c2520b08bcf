//! What the explorer needs from the window it draws into.

use crate::{
    frame::FrameUniforms,
    screen::{Position, Size},
};

/// Window placement captured before entering fullscreen, restored verbatim on exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SavedGeometry {
    pub x: i32,
    pub y: i32,
    pub size: Size,
}

pub trait DisplaySurface {
    type Error;

    /// Current drawable size in physical pixels.
    fn viewport_size(&self) -> Size;

    /// Last known cursor position, origin top-left.
    fn cursor_position(&self) -> Position;

    /// Switch to fullscreen on the primary display at its native mode, returning the
    /// windowed geometry to come back to.
    fn enter_fullscreen(&mut self) -> SavedGeometry;

    /// Leave fullscreen and put the window back where `geometry` says.
    fn restore_geometry(&mut self, geometry: SavedGeometry);

    /// Render one frame with the given parameters and display it.
    fn present_frame(&mut self, uniforms: &FrameUniforms) -> Result<(), Self::Error>;

    /// Ask the render loop to stop after the current event.
    fn request_close(&mut self);
}
