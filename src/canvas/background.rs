//! Canvas backgrounds: gradients, dot grid, photos and the vignette.

use super::blend;
use crate::model::Resolution;
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};

/// Three color stops at 0, 0.5 and 1 along the top-left to bottom-right diagonal.
pub type Gradient = [[u8; 3]; 3];

/// Background gradients, one picked at random per image.
pub const GRADIENTS: [Gradient; 6] = [
    [[0xff, 0x9a, 0x9e], [0xfe, 0xcf, 0xef], [0xfe, 0xcf, 0xef]],
    [[0xa8, 0xed, 0xea], [0xfe, 0xd6, 0xe3], [0xd2, 0x99, 0xc2]],
    [[0xff, 0xec, 0xd2], [0xfc, 0xb6, 0x9f], [0xff, 0x8c, 0x94]],
    [[0x66, 0x7e, 0xea], [0x76, 0x4b, 0xa2], [0xf0, 0x93, 0xfb]],
    [[0xff, 0xef, 0xd5], [0xff, 0xdf, 0x8a], [0x32, 0xa8, 0x52]],
    [[0x89, 0xf7, 0xfe], [0x66, 0xa6, 0xff], [0x3b, 0x82, 0xf6]],
];

const DOT_SPACING: usize = 60;
const DOT_RADIUS: f32 = 2.0;
const DOT_ALPHA: f32 = 0.03;
const PHOTO_OVERLAY_ALPHA: f32 = 0.5;
const VIGNETTE_ALPHA: f32 = 0.3;

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let mix = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

/// Color of `gradient` at position `t` in `0..=1`.
pub fn gradient_color(gradient: &Gradient, t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        lerp_color(gradient[0], gradient[1], t * 2.0)
    } else {
        lerp_color(gradient[1], gradient[2], (t - 0.5) * 2.0)
    }
}

/// Diagonal gradient fill with a faint dot grid on top.
pub fn gradient_background(resolution: Resolution, gradient: &Gradient) -> RgbaImage {
    let (w, h) = (resolution.width as f32, resolution.height as f32);
    let length_sq = w * w + h * h;

    let mut canvas = RgbaImage::from_fn(resolution.width, resolution.height, |x, y| {
        // projection of the pixel onto the (0,0)-(w,h) diagonal
        let t = (x as f32 * w + y as f32 * h) / length_sq;
        let [r, g, b] = gradient_color(gradient, t);
        Rgba([r, g, b, 255])
    });
    draw_dot_grid(&mut canvas);
    canvas
}

fn draw_dot_grid(canvas: &mut RgbaImage) {
    let (width, height) = canvas.dimensions();
    let reach = DOT_RADIUS.ceil() as i64;

    for cx in (0..i64::from(width)).step_by(DOT_SPACING) {
        for cy in (0..i64::from(height)).step_by(DOT_SPACING) {
            for x in (cx - reach).max(0)..=(cx + reach).min(i64::from(width) - 1) {
                for y in (cy - reach).max(0)..=(cy + reach).min(i64::from(height) - 1) {
                    let (dx, dy) = ((x - cx) as f32, (y - cy) as f32);
                    if dx * dx + dy * dy <= DOT_RADIUS * DOT_RADIUS {
                        blend(canvas.get_pixel_mut(x as u32, y as u32), [255; 3], DOT_ALPHA);
                    }
                }
            }
        }
    }
}

/// `photo` stretched to the canvas, darkened by half.
pub fn photo_background(photo: &DynamicImage, resolution: Resolution) -> RgbaImage {
    let mut canvas = photo
        .resize_exact(resolution.width, resolution.height, FilterType::Triangle)
        .to_rgba8();
    for pixel in canvas.pixels_mut() {
        blend(pixel, [0; 3], PHOTO_OVERLAY_ALPHA);
        pixel[3] = 255;
    }
    canvas
}

/// Darken toward the edges: clear at the center, 30% black from
/// `max(w, h) / 2` outward.
pub fn apply_vignette(canvas: &mut RgbaImage) {
    let (width, height) = canvas.dimensions();
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let radius = (width.max(height) as f32 / 2.0).max(1.0);

    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let (dx, dy) = (x as f32 - cx, y as f32 - cy);
        let t = ((dx * dx + dy * dy).sqrt() / radius).min(1.0);
        blend(pixel, [0; 3], VIGNETTE_ALPHA * t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PINK: Gradient = GRADIENTS[0];

    #[test]
    fn gradient_color_hits_its_stops() {
        assert_eq!(gradient_color(&PINK, 0.0), PINK[0]);
        assert_eq!(gradient_color(&PINK, 0.5), PINK[1]);
        assert_eq!(gradient_color(&PINK, 1.0), PINK[2]);
        assert_eq!(gradient_color(&PINK, 7.0), PINK[2]);
    }

    #[test]
    fn gradient_runs_corner_to_corner() {
        let gradient = GRADIENTS[3];
        let canvas = gradient_background(Resolution::new(121, 121), &gradient);

        // both pixels sit between grid dots
        let near_start = canvas.get_pixel(3, 3);
        let near_end = canvas.get_pixel(118, 118);
        assert!(near_start.0[0].abs_diff(gradient[0][0]) <= 3);
        assert!(near_end.0[0].abs_diff(gradient[2][0]) <= 10);
        assert_eq!(near_end.0[3], 255);
    }

    #[test]
    fn dots_lighten_grid_points_only() {
        let gradient = [[0, 0, 0]; 3];
        let canvas = gradient_background(Resolution::new(130, 130), &gradient);

        assert!(canvas.get_pixel(60, 60).0[0] > 0);
        assert!(canvas.get_pixel(0, 0).0[0] > 0);
        assert_eq!(canvas.get_pixel(30, 30).0[0], 0);
    }

    #[test]
    fn photo_is_stretched_and_darkened() {
        let pixel = Rgba([200, 100, 50, 255]);
        let photo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 5, pixel));
        let canvas = photo_background(&photo, Resolution::new(40, 30));

        assert_eq!(canvas.dimensions(), (40, 30));
        assert_eq!(canvas.get_pixel(20, 15).0, [100, 50, 25, 255]);
    }

    #[test]
    fn vignette_leaves_center_and_darkens_corners() {
        let mut canvas = RgbaImage::from_pixel(101, 101, Rgba([200, 200, 200, 255]));
        apply_vignette(&mut canvas);

        let center = canvas.get_pixel(50, 50).0[0];
        let corner = canvas.get_pixel(0, 0).0[0];
        assert!(center >= 199);
        assert_eq!(corner, 140);
    }
}
