//! Per-frame parameters.
//!
//! The camera is only ever mutated from input handlers, which run on the event loop
//! thread between frames. Each frame gets a [`FrameUniforms`] copied out of the camera
//! before any pixel is evaluated, so a frame can't mix an old center with a new scale.

use log::trace;

use crate::{
    camera::{self, Camera},
    pixel::Complex,
    screen::{Position, Size},
    surface::DisplaySurface,
};

/// Everything the evaluator needs to shade one frame: center, scale, iteration cap and
/// viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    pub center: Complex,
    pub scale: f64,
    pub max_iter: u32,
    pub viewport: Size,
}

impl FrameUniforms {
    pub fn capture(camera: &Camera, viewport: Size) -> Self {
        Self {
            center: camera.center(),
            scale: camera.scale(),
            max_iter: camera.max_iter(),
            viewport,
        }
    }

    /// Plane point sampled for pixel (`x`, `y`), taken at the pixel's centre like a
    /// fragment coordinate.
    pub fn plane_point(&self, x: u32, y: u32) -> Complex {
        let position = Position::new(x as f64 + 0.5, y as f64 + 0.5);
        camera::to_plane(self.center, self.scale, position, self.viewport)
    }
}

/// Snapshot `camera` against the surface's viewport and present one frame with it.
///
/// Nothing is drawn while the viewport is empty (e.g. a minimised window).
pub fn synchronize<S: DisplaySurface>(camera: &Camera, surface: &mut S) -> Result<(), S::Error> {
    let viewport = surface.viewport_size();
    if viewport.is_empty() {
        trace!("skipping frame for empty viewport");
        return Ok(());
    }

    let uniforms = FrameUniforms::capture(camera, viewport);
    trace!("presenting {:?}", uniforms);
    surface.present_frame(&uniforms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;

    #[test]
    fn snapshot_copies_camera_and_viewport() {
        let camera = Camera::new(Complex::new(-0.5, 0.25), 0.125, 340);
        let uniforms = FrameUniforms::capture(&camera, Size::new(640, 480));
        assert_eq!(
            uniforms,
            FrameUniforms {
                center: Complex::new(-0.5, 0.25),
                scale: 0.125,
                max_iter: 340,
                viewport: Size::new(640, 480),
            }
        );
    }

    #[test]
    fn snapshot_is_detached_from_later_camera_changes() {
        let mut camera = Camera::default();
        let uniforms = FrameUniforms::capture(&camera, Size::new(100, 100));

        camera.zoom_at(Position::new(10.0, 20.0), Size::new(100, 100), 1.0);
        camera.pan(5.0, 5.0, Size::new(100, 100));
        camera.increase_iterations();

        assert_eq!(uniforms.center, Complex::ZERO);
        assert_eq!(uniforms.scale, 2.0);
        assert_eq!(uniforms.max_iter, 100);
    }

    #[test]
    fn pixel_samples_use_the_camera_mapping() {
        let camera = Camera::new(Complex::new(0.3, -0.2), 0.75, 100);
        let viewport = Size::new(320, 200);
        let uniforms = FrameUniforms::capture(&camera, viewport);

        for (x, y) in [(0, 0), (17, 133), (319, 199)] {
            assert_eq!(
                uniforms.plane_point(x, y),
                camera.to_plane(Position::new(x as f64 + 0.5, y as f64 + 0.5), viewport)
            );
        }
        // Row 0 is the top of the image, where the imaginary part is largest.
        assert!(uniforms.plane_point(0, 0).imaginary > uniforms.plane_point(0, 199).imaginary);
    }

    #[test]
    fn deep_zoom_neighbours_stay_distinct() {
        let camera = Camera::new(Complex::new(-0.75, 0.1), 1e-10, 1_000);
        let uniforms = FrameUniforms::capture(&camera, Size::new(100, 100));

        let left = uniforms.plane_point(0, 0);
        let right = uniforms.plane_point(1, 0);

        assert_ne!(left.real, right.real);
        assert_eq!(left.real as f32, right.real as f32);
    }

    #[test]
    fn synchronize_presents_current_state() {
        let mut surface = RecordingSurface::new(Size::new(800, 600));
        let mut camera = Camera::default();

        synchronize(&camera, &mut surface).unwrap();
        camera.increase_iterations();
        synchronize(&camera, &mut surface).unwrap();

        assert_eq!(surface.frames.len(), 2);
        assert_eq!(surface.frames[0].max_iter, 100);
        assert_eq!(surface.frames[1].max_iter, 110);
        assert_eq!(surface.frames[1].viewport, Size::new(800, 600));
    }

    #[test]
    fn synchronize_skips_empty_viewport() {
        let mut surface = RecordingSurface::new(Size::new(0, 600));
        synchronize(&Camera::default(), &mut surface).unwrap();
        assert!(surface.frames.is_empty());
    }
}
