//! Pixel drawing primitives over an RGB canvas.
//!
//! All primitives take signed coordinates and clip to the canvas, so
//! callers may position content partially (or entirely) off-canvas.

use image::{Rgb, RgbImage};

/// Fill an axis-aligned rectangle with `color`, clipped to the canvas.
pub fn fill_rect(canvas: &mut RgbImage, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(width)).min(i64::from(canvas.width()));
    let y1 = (y + i64::from(height)).min(i64::from(canvas.height()));

    for py in y0..y1 {
        for px in x0..x1 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            canvas.put_pixel(px as u32, py as u32, color);
        }
    }
}

/// Fill the ellipse inscribed in the square at `(x, y)` with edge `size`,
/// clipped to the canvas.
#[allow(clippy::cast_precision_loss)]
pub fn fill_ellipse(canvas: &mut RgbImage, x: i64, y: i64, size: u32, color: Rgb<u8>) {
    let radius = f64::from(size) / 2.0;
    let cx = x as f64 + radius;
    let cy = y as f64 + radius;

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(size)).min(i64::from(canvas.width()));
    let y1 = (y + i64::from(size)).min(i64::from(canvas.height()));

    for py in y0..y1 {
        for px in x0..x1 {
            // Sample at pixel centers so the disc is symmetric.
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}
