//! Colouring of escape-time results.
//!
//! Points that never escape are black. Escaped points get a fully saturated hue
//! proportional to how early they escaped relative to the iteration cap, so the
//! hue wheel is walked once between `0` and `max_iter` iterations.

use bytemuck::{Pod, Zeroable};

/// Colour with `f32` channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub const BLACK: Self = Colour {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub fn opaque([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_rgba8(self) -> Rgba8 {
        fn channel(value: f32) -> u8 {
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        Rgba8 {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: channel(self.a),
        }
    }
}

/// [`bytemuck`]-compatible texel, laid out as `wgpu::TextureFormat::Rgba8Unorm`.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Colour for a point whose escape-time result is `iter` under the cap `max_iter`.
pub fn colour_of(iter: u32, max_iter: u32) -> Colour {
    if iter >= max_iter {
        return Colour::BLACK;
    }
    let hue = iter as f32 / max_iter as f32 * 360.0;
    Colour::opaque(hsv_to_rgb(hue, 1.0, 1.0))
}

/// Convert HSV (`hue` in degrees `[0, 360)`, `saturation` and `value` in `[0, 1]`) to RGB.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [f32; 3] {
    let c = value * saturation;
    let x = c * (1.0 - ((hue / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = value - c;

    let [r, g, b] = if hue < 60.0 {
        [c, x, 0.0]
    } else if hue < 120.0 {
        [x, c, 0.0]
    } else if hue < 180.0 {
        [0.0, c, x]
    } else if hue < 240.0 {
        [0.0, x, c]
    } else if hue < 300.0 {
        [x, 0.0, c]
    } else {
        [c, 0.0, x]
    };

    [r + m, g + m, b + m]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb(colour: Colour, expected: [f32; 3]) {
        let actual = [colour.r, colour.g, colour.b];
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-4, "{:?} != {:?}", actual, expected);
        }
        assert_eq!(colour.a, 1.0);
    }

    #[test]
    fn interior_is_black() {
        assert_eq!(colour_of(100, 100), Colour::BLACK);
        assert_eq!(colour_of(1, 1), Colour::BLACK);
    }

    #[test]
    fn immediate_escape_is_red() {
        assert_eq!(colour_of(0, 100), Colour::opaque([1.0, 0.0, 0.0]));
        assert_eq!(colour_of(0, 1), Colour::opaque([1.0, 0.0, 0.0]));
    }

    #[test]
    fn sector_boundaries() {
        assert_rgb(colour_of(1, 6), [1.0, 1.0, 0.0]);
        assert_rgb(colour_of(2, 6), [0.0, 1.0, 0.0]);
        assert_rgb(colour_of(3, 6), [0.0, 1.0, 1.0]);
        assert_rgb(colour_of(4, 6), [0.0, 0.0, 1.0]);
        assert_rgb(colour_of(5, 6), [1.0, 0.0, 1.0]);
    }

    #[test]
    fn mid_sector() {
        // 30 degrees: halfway from red to yellow.
        assert_rgb(colour_of(1, 12), [1.0, 0.5, 0.0]);
        // 210 degrees: halfway from cyan to blue.
        assert_rgb(colour_of(7, 12), [0.0, 0.5, 1.0]);
    }

    #[test]
    fn desaturated_and_dim() {
        let [r, g, b] = hsv_to_rgb(0.0, 0.0, 0.5);
        assert_eq!([r, g, b], [0.5, 0.5, 0.5]);

        let [r, g, b] = hsv_to_rgb(120.0, 1.0, 0.5);
        assert_eq!([r, g, b], [0.0, 0.5, 0.0]);
    }

    #[test]
    fn colour_is_a_pure_lookup() {
        for iter in 0..=50 {
            assert_eq!(colour_of(iter, 50), colour_of(iter, 50));
        }
    }

    #[test]
    fn rgba8_quantisation() {
        assert_eq!(
            Colour::BLACK.to_rgba8(),
            Rgba8 {
                r: 0,
                g: 0,
                b: 0,
                a: 255
            }
        );
        assert_eq!(
            Colour::opaque([1.0, 0.5, 0.0]).to_rgba8(),
            Rgba8 {
                r: 255,
                g: 128,
                b: 0,
                a: 255
            }
        );
    }
}
