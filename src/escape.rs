//! Escape-time evaluation of the Mandelbrot set.

use log::trace;
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::{
    colour::{colour_of, Rgba8},
    config::ESCAPE_RADIUS_SQR,
    frame::FrameUniforms,
    pixel::Complex,
};

/// Number of iterations of `z = z^2 + c` before `|z|` exceeds 2.
///
/// Returns `max_iter` when the point is still bounded after `max_iter` iterations.
pub fn escape_time(c: Complex, max_iter: u32) -> u32 {
    let mut z = Complex::ZERO;
    for iter in 0..max_iter {
        z = Complex {
            real: z.real * z.real - z.imaginary * z.imaginary + c.real,
            imaginary: 2.0 * z.real * z.imaginary + c.imaginary,
        };
        if z.norm_sqr() > ESCAPE_RADIUS_SQR {
            return iter;
        }
    }
    max_iter
}

/// Evaluate and colour every pixel of a frame into `texels`, row-major from the top row.
///
/// Rows are independent and are shaded in parallel on the current rayon pool.
pub fn evaluate_frame(uniforms: &FrameUniforms, texels: &mut [Rgba8]) {
    trace!("begin evaluate_frame");

    let width = uniforms.viewport.width as usize;
    debug_assert_eq!(texels.len(), uniforms.viewport.pixel_count());

    texels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, texel) in row.iter_mut().enumerate() {
                let point = uniforms.plane_point(x as u32, y as u32);
                let iter = escape_time(point, uniforms.max_iter);
                *texel = colour_of(iter, uniforms.max_iter).to_rgba8();
            }
        });

    trace!("end evaluate_frame");
}
