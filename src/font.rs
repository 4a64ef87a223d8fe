//! Caption font loading and glyph rendering.
//!
//! A TrueType face is preferred; when none of the candidate files can be
//! loaded the built-in bitmap font takes over. Loading never fails - a
//! request must never be rejected because no font is installed.

use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use image::{Rgb, RgbImage};

use crate::draw::fill_rect;

/// TrueType files probed when no font path is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Bitmap glyph cell dimensions.
const GLYPH_WIDTH: u32 = 5;
/// Bitmap glyph rows.
const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance in cells, including a one-cell gap.
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;
/// Fixed pixel scale of the bitmap font. Like PIL's `load_default`, the
/// fallback ignores the configured size and stays small.
const BITMAP_SCALE: u32 = 2;

/// The font used for the timestamp caption.
pub enum CaptionFont {
    /// A loaded TrueType face rendered at a fixed pixel size.
    TrueType {
        /// Parsed font data.
        font: FontVec,
        /// Render size in pixels.
        scale: PxScale,
    },
    /// Built-in 5x7 bitmap font.
    Builtin,
}

impl CaptionFont {
    /// Load the preferred font file, then the candidate list, falling back
    /// to the built-in bitmap font. Never fails.
    #[must_use]
    pub fn load(preferred: Option<&Path>, size: f32) -> Self {
        let candidates = preferred
            .into_iter()
            .map(Path::to_path_buf)
            .chain(FONT_CANDIDATES.iter().copied().map(PathBuf::from));

        for path in candidates {
            if let Some(font) = try_load_truetype(&path) {
                tracing::debug!(path = %path.display(), "loaded caption font");
                return Self::TrueType { font, scale: PxScale::from(size) };
            }
        }

        tracing::debug!("no truetype font available, using builtin bitmap font");
        Self::Builtin
    }

    /// Rendered width and height of `text` in pixels.
    #[must_use]
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            Self::TrueType { font, scale } => {
                let scaled = font.as_scaled(*scale);
                let mut width = 0.0f32;
                let mut prev = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(p) = prev {
                        width += scaled.kern(p, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                let height = scaled.ascent() - scaled.descent();
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let extents = (width.ceil() as u32, height.ceil() as u32);
                extents
            }
            Self::Builtin => {
                #[allow(clippy::cast_possible_truncation)]
                let chars = text.chars().count() as u32;
                (chars * GLYPH_ADVANCE * BITMAP_SCALE, GLYPH_HEIGHT * BITMAP_SCALE)
            }
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`, clipped to the
    /// canvas.
    pub fn draw(&self, canvas: &mut RgbImage, text: &str, x: i64, y: i64, color: Rgb<u8>) {
        match self {
            Self::TrueType { font, scale } => draw_truetype(font, *scale, canvas, text, x, y, color),
            Self::Builtin => draw_bitmap(canvas, text, x, y, color),
        }
    }
}

/// Read and parse a TrueType file, or `None` if either step fails.
fn try_load_truetype(path: &Path) -> Option<FontVec> {
    let bytes = std::fs::read(path).ok()?;
    FontVec::try_from_vec(bytes).ok()
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn draw_truetype(
    font: &FontVec,
    scale: PxScale,
    canvas: &mut RgbImage,
    text: &str,
    x: i64,
    y: i64,
    color: Rgb<u8>,
) {
    let scaled = font.as_scaled(scale);
    let baseline = y as f32 + scaled.ascent();
    let mut caret = x as f32;
    let mut prev = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        let glyph: Glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);

        if let Some(outlined) = scaled.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = i64::from(bounds.min.x as i32) + i64::from(gx);
                let py = i64::from(bounds.min.y as i32) + i64::from(gy);
                if px >= 0
                    && py >= 0
                    && px < i64::from(canvas.width())
                    && py < i64::from(canvas.height())
                {
                    #[allow(clippy::cast_sign_loss)]
                    blend_pixel(canvas, px as u32, py as u32, color, coverage);
                }
            });
        }
    }
}

/// Blend `color` over the existing pixel with the given coverage.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend_pixel(canvas: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>, coverage: f32) {
    let coverage = coverage.clamp(0.0, 1.0);
    let background = *canvas.get_pixel(x, y);
    let mut blended = [0u8; 3];
    for (out, (&bg, &fg)) in blended.iter_mut().zip(background.0.iter().zip(color.0.iter())) {
        *out = (f32::from(bg) * (1.0 - coverage) + f32::from(fg) * coverage).round() as u8;
    }
    canvas.put_pixel(x, y, Rgb(blended));
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn draw_bitmap(canvas: &mut RgbImage, text: &str, x: i64, y: i64, color: Rgb<u8>) {
    for (index, ch) in text.chars().enumerate() {
        let Some(rows) = bitmap_glyph(ch) else { continue };
        let glyph_x = x + index as i64 * i64::from(GLYPH_ADVANCE * BITMAP_SCALE);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1u8 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    fill_rect(
                        canvas,
                        glyph_x + i64::from(col * BITMAP_SCALE),
                        y + i64::from(row as u32 * BITMAP_SCALE),
                        BITMAP_SCALE,
                        BITMAP_SCALE,
                        color,
                    );
                }
            }
        }
    }
}

/// 5x7 bitmaps for the timestamp caption charset. Unknown characters
/// render as blanks.
#[allow(clippy::match_same_arms)]
fn bitmap_glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ':' => [0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        _ => return None,
    };
    Some(rows)
}
