//! Placeholder image synthesis.
//!
//! The raster stage is pure: [`Synthesizer::render`] is deterministic for
//! a given RNG state and caption, which keeps it testable with a seeded
//! generator. [`Synthesizer::generate`] adds the wall-clock caption, the
//! PNG encoding and the correlation token.

use std::io::Cursor;

use chrono::Utc;
use image::{ImageFormat, Rgb, RgbImage};
use rand::Rng;
use uuid::Uuid;

use crate::config::CanvasConfig;
use crate::draw::{fill_ellipse, fill_rect};
use crate::error::ApiError;
use crate::font::CaptionFont;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
const GREEN: Rgb<u8> = Rgb([0, 128, 0]);

/// Fill palette for the random shapes.
const PALETTE: [Rgb<u8>; 4] = [RED, BLUE, GREEN, BLACK];

/// Caption timestamp format.
const CAPTION_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Shape kinds the synthesizer can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeKind {
    Rectangle,
    Circle,
}

impl ShapeKind {
    fn pick<R: Rng>(rng: &mut R) -> Self {
        if rng.random_range(0..2) == 0 {
            Self::Rectangle
        } else {
            Self::Circle
        }
    }
}

/// An encoded canvas paired with its correlation token.
#[derive(Debug, Clone)]
pub struct SynthesizedImage {
    /// PNG-encoded canvas.
    pub png: Vec<u8>,
    /// Freshly generated correlation token. Not stored server-side.
    pub image_id: String,
}

/// Renders placeholder annotated images.
pub struct Synthesizer {
    config: CanvasConfig,
    font: CaptionFont,
}

impl Synthesizer {
    /// Build a synthesizer, loading the caption font once up front.
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        let font = CaptionFont::load(config.font_path.as_deref(), config.font_size);
        Self { config, font }
    }

    /// Synthesize one image: render, caption with the current UTC time,
    /// encode as PNG and pair with a fresh UUID.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<SynthesizedImage, ApiError> {
        let caption = Utc::now().format(CAPTION_FORMAT).to_string();
        let canvas = self.render(rng, &caption);

        let mut buffer = Cursor::new(Vec::new());
        canvas.write_to(&mut buffer, ImageFormat::Png)?;

        Ok(SynthesizedImage { png: buffer.into_inner(), image_id: Uuid::new_v4().to_string() })
    }

    /// Render the canvas: random shapes, corner markers, crosshair and the
    /// given caption, in that order.
    pub fn render<R: Rng>(&self, rng: &mut R, caption: &str) -> RgbImage {
        let size = self.config.image_size;
        let mut canvas = RgbImage::from_pixel(size, size, WHITE);

        let shape_count = rng.random_range(1..=3);
        tracing::debug!(shape_count, "placing random shapes");
        for _ in 0..shape_count {
            self.place_shape(&mut canvas, rng);
        }

        self.draw_corner_markers(&mut canvas);
        self.draw_crosshair(&mut canvas);
        self.draw_caption(&mut canvas, caption);
        canvas
    }

    /// Place one random shape. The top-left position is chosen so the
    /// shape's bounding square fits entirely within the canvas; overlap
    /// with anything drawn earlier is allowed.
    fn place_shape<R: Rng>(&self, canvas: &mut RgbImage, rng: &mut R) {
        let range = self.config.image_size - self.config.shape_size;
        let x = i64::from(rng.random_range(0..range));
        let y = i64::from(rng.random_range(0..range));
        let color = PALETTE[rng.random_range(0..PALETTE.len())];

        match ShapeKind::pick(rng) {
            ShapeKind::Rectangle => {
                fill_rect(canvas, x, y, self.config.shape_size, self.config.shape_size, color);
            }
            ShapeKind::Circle => fill_ellipse(canvas, x, y, self.config.shape_size, color),
        }
    }

    /// Black squares at the four canvas corners, drawn over any shapes.
    fn draw_corner_markers(&self, canvas: &mut RgbImage) {
        let size = i64::from(self.config.image_size);
        let marker = self.config.corner_square_size;
        let far = size - i64::from(marker);

        fill_rect(canvas, 0, 0, marker, marker, BLACK);
        fill_rect(canvas, far, 0, marker, marker, BLACK);
        fill_rect(canvas, 0, far, marker, marker, BLACK);
        fill_rect(canvas, far, far, marker, marker, BLACK);
    }

    /// Red crosshair centered on the canvas midpoint.
    fn draw_crosshair(&self, canvas: &mut RgbImage) {
        let center = i64::from(self.config.image_size / 2);
        let half = i64::from(self.config.crosshair_length);
        let thickness = self.config.crosshair_thickness;
        let offset = i64::from(thickness / 2);

        fill_rect(
            canvas,
            center - half,
            center - offset,
            self.config.crosshair_length * 2,
            thickness,
            RED,
        );
        fill_rect(
            canvas,
            center - offset,
            center - half,
            thickness,
            self.config.crosshair_length * 2,
            RED,
        );
    }

    /// Caption horizontally centered below the top edge. Wider captions
    /// than the canvas are clipped on both sides.
    fn draw_caption(&self, canvas: &mut RgbImage, caption: &str) {
        let (width, _) = self.font.measure(caption);
        let x = (i64::from(self.config.image_size) - i64::from(width)) / 2;
        let y = i64::from(self.config.caption_margin);
        self.font.draw(canvas, caption, x, y, BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn synthesizer() -> Synthesizer {
        // Builtin font keeps the pixel palette closed (no anti-aliasing).
        Synthesizer { config: CanvasConfig::default(), font: CaptionFont::Builtin }
    }

    #[test]
    fn render_has_canvas_dimensions() {
        let synth = synthesizer();
        let canvas = synth.render(&mut StdRng::seed_from_u64(1), "2026-08-06 12:00:00 UTC");
        assert_eq!(canvas.width(), 1000);
        assert_eq!(canvas.height(), 1000);
    }

    #[test]
    fn corner_markers_present() {
        let synth = synthesizer();
        let canvas = synth.render(&mut StdRng::seed_from_u64(2), "2026-08-06 12:00:00 UTC");
        assert_eq!(*canvas.get_pixel(0, 0), BLACK);
        assert_eq!(*canvas.get_pixel(999, 0), BLACK);
        assert_eq!(*canvas.get_pixel(0, 999), BLACK);
        assert_eq!(*canvas.get_pixel(999, 999), BLACK);
    }

    #[test]
    fn crosshair_covers_center() {
        let synth = synthesizer();
        let canvas = synth.render(&mut StdRng::seed_from_u64(3), "2026-08-06 12:00:00 UTC");
        assert_eq!(*canvas.get_pixel(500, 500), RED);
        // Bar tips, horizontal then vertical
        assert_eq!(*canvas.get_pixel(451, 500), RED);
        assert_eq!(*canvas.get_pixel(500, 549), RED);
    }

    #[test]
    fn background_survives() {
        let synth = synthesizer();
        let canvas = synth.render(&mut StdRng::seed_from_u64(4), "2026-08-06 12:00:00 UTC");
        assert!(canvas.pixels().any(|p| *p == WHITE));
    }

    #[test]
    fn pixel_palette_is_closed() {
        // With the bitmap font there is no blending, so every pixel must
        // come from the background, the palette or the crosshair.
        let synth = synthesizer();
        let canvas = synth.render(&mut StdRng::seed_from_u64(5), "2026-08-06 12:00:00 UTC");
        for pixel in canvas.pixels() {
            assert!(
                [WHITE, BLACK, RED, BLUE, GREEN].contains(pixel),
                "unexpected pixel color {pixel:?}"
            );
        }
    }

    #[test]
    fn render_is_deterministic_for_seed_and_caption() {
        let synth = synthesizer();
        let caption = "2026-08-06 12:00:00 UTC";
        let first = synth.render(&mut StdRng::seed_from_u64(42), caption);
        let second = synth.render(&mut StdRng::seed_from_u64(42), caption);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn different_seeds_differ() {
        let synth = synthesizer();
        let caption = "2026-08-06 12:00:00 UTC";
        let first = synth.render(&mut StdRng::seed_from_u64(1), caption);
        let second = synth.render(&mut StdRng::seed_from_u64(999), caption);
        assert_ne!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn generate_produces_decodable_png() {
        let synth = Synthesizer::new(CanvasConfig::default());
        let image = synth.generate(&mut StdRng::seed_from_u64(6)).unwrap();
        assert_eq!(&image.png[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        let decoded = image::load_from_memory(&image.png).unwrap();
        assert_eq!(decoded.width(), 1000);
        assert_eq!(decoded.height(), 1000);
    }

    #[test]
    fn generate_issues_distinct_tokens() {
        let synth = Synthesizer::new(CanvasConfig::default());
        let mut rng = StdRng::seed_from_u64(7);
        let first = synth.generate(&mut rng).unwrap();
        let second = synth.generate(&mut rng).unwrap();
        assert!(!first.image_id.is_empty());
        assert_ne!(first.image_id, second.image_id);
        assert!(Uuid::parse_str(&first.image_id).is_ok());
    }

    #[test]
    fn small_canvas_renders() {
        let config = CanvasConfig { image_size: 100, shape_size: 25, ..CanvasConfig::default() };
        let synth = Synthesizer { config, font: CaptionFont::Builtin };
        let canvas = synth.render(&mut StdRng::seed_from_u64(8), "12:00");
        assert_eq!(canvas.width(), 100);
        assert_eq!(*canvas.get_pixel(50, 50), RED);
    }
}
