//! The view onto the complex plane.
//!
//! Every conversion between pixels and plane coordinates goes through
//! [`Camera::to_plane`], so zooming, panning and per-pixel evaluation always agree on
//! which plane point sits under which pixel.

use log::debug;

use crate::{
    config::{
        INITIAL_MAX_ITER, INITIAL_SCALE, ITERATION_STEP, MIN_MAX_ITER, ZOOM_IN_FACTOR,
        ZOOM_OUT_FACTOR,
    },
    pixel::Complex,
    screen::{Position, Size},
};

/// Center, scale and iteration cap of the current view.
///
/// `scale` is the distance from the viewport center to its edge, in plane units, along
/// both axes. Both axes share it, so a non-square viewport shows a stretched image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    center: Complex,
    scale: f64,
    max_iter: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Complex::ZERO, INITIAL_SCALE, INITIAL_MAX_ITER)
    }
}

impl Camera {
    pub fn new(center: Complex, scale: f64, max_iter: u32) -> Self {
        debug_assert!(scale.is_normal() && scale > 0.0, "scale must be positive");
        Self {
            center,
            scale,
            max_iter: max_iter.max(MIN_MAX_ITER),
        }
    }

    pub fn center(&self) -> Complex {
        self.center
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    /// Map a pixel position to the plane point displayed there.
    ///
    /// `viewport` must be non-empty.
    pub fn to_plane(&self, position: Position, viewport: Size) -> Complex {
        to_plane(self.center, self.scale, position, viewport)
    }

    /// Inverse of [`Camera::to_plane`].
    #[cfg(test)]
    pub fn to_pixel(&self, point: Complex, viewport: Size) -> Position {
        debug_assert!(!viewport.is_empty());
        let nx = (point.real - self.center.real) / (2.0 * self.scale) + 0.5;
        let ny = 0.5 - (point.imaginary - self.center.imaginary) / (2.0 * self.scale);
        Position::new(nx * viewport.width as f64, ny * viewport.height as f64)
    }

    /// Zoom around the plane point under `cursor`, which stays under the cursor.
    ///
    /// Positive `dy` zooms in by [`ZOOM_IN_FACTOR`], anything else zooms out by
    /// [`ZOOM_OUT_FACTOR`]. A step that would leave the range of normal `f64` values is
    /// dropped, so `scale` never reaches zero or infinity.
    pub fn zoom_at(&mut self, cursor: Position, viewport: Size, dy: f64) {
        let anchor = self.to_plane(cursor, viewport);
        let factor = if dy > 0.0 {
            ZOOM_IN_FACTOR
        } else {
            ZOOM_OUT_FACTOR
        };

        let scale = self.scale * factor;
        let center = anchor + (self.center - anchor) * factor;
        if !scale.is_normal() || !center.real.is_finite() || !center.imaginary.is_finite() {
            debug!("zoom limit reached at scale {:e}", self.scale);
            return;
        }

        self.scale = scale;
        self.center = center;
        debug!("zoomed to scale {:e} around {:?}", self.scale, anchor);
    }

    /// Shift the view by a cursor movement of (`dx`, `dy`) pixels.
    ///
    /// Both axes subtract the pixel delta, while rows grow downwards and the imaginary
    /// axis grows upwards. A horizontal drag therefore moves the image with the cursor
    /// and a vertical drag moves it the opposite way. Keep this sign as is.
    pub fn pan(&mut self, dx: f64, dy: f64, viewport: Size) {
        debug_assert!(!viewport.is_empty());
        let center = Complex {
            real: self.center.real - dx / viewport.width as f64 * 2.0 * self.scale,
            imaginary: self.center.imaginary - dy / viewport.height as f64 * 2.0 * self.scale,
        };
        if !center.real.is_finite() || !center.imaginary.is_finite() {
            debug!("pan limit reached at center {:?}", self.center);
            return;
        }
        self.center = center;
    }

    pub fn increase_iterations(&mut self) {
        self.max_iter = self.max_iter.saturating_add(ITERATION_STEP);
        debug!("max_iter = {}", self.max_iter);
    }

    pub fn decrease_iterations(&mut self) {
        self.max_iter = self
            .max_iter
            .saturating_sub(ITERATION_STEP)
            .max(MIN_MAX_ITER);
        debug!("max_iter = {}", self.max_iter);
    }
}

/// The pixel-to-plane mapping shared by the camera and the per-frame snapshot.
pub fn to_plane(center: Complex, scale: f64, position: Position, viewport: Size) -> Complex {
    debug_assert!(!viewport.is_empty());
    let nx = position.x / viewport.width as f64;
    let ny = position.y / viewport.height as f64;
    Complex::new(
        (nx - 0.5) * 2.0 * scale + center.real,
        (0.5 - ny) * 2.0 * scale + center.imaginary,
    )
}
