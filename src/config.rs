//! Fixed settings. There is no config file or command line; `RUST_LOG` is the only
//! runtime knob.

pub const WINDOW_TITLE: &str = "Mandelbrot Explorer";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

pub const INITIAL_SCALE: f64 = 2.0;
pub const INITIAL_MAX_ITER: u32 = 100;

/// Scale multiplier for a scroll away from the user.
pub const ZOOM_IN_FACTOR: f64 = 0.9;
/// Scale multiplier for any other scroll.
pub const ZOOM_OUT_FACTOR: f64 = 1.1;

pub const ITERATION_STEP: u32 = 10;
pub const MIN_MAX_ITER: u32 = 1;

/// Squared escape radius of the quadratic map.
pub const ESCAPE_RADIUS_SQR: f64 = 4.0;
