use bytemuck::{Pod, Zeroable};

/// Viewport size in physical pixels.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A minimised window reports a zero-sized viewport, which can't be mapped or rendered.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Size {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

impl From<Size> for winit::dpi::PhysicalSize<u32> {
    fn from(size: Size) -> Self {
        winit::dpi::PhysicalSize::new(size.width, size.height)
    }
}

/// A cursor position in pixels, origin top-left, `y` growing downward.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<winit::dpi::PhysicalPosition<f64>> for Position {
    fn from(position: winit::dpi::PhysicalPosition<f64>) -> Self {
        Self::new(position.x, position.y)
    }
}
