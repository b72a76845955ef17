//! Rasterization of a print surface with an 8x8 bitmap font
//!
//! Every terminal cell becomes a `CELL_WIDTH` x `CELL_HEIGHT` block; glyph
//! rows are doubled vertically so letters keep the terminal's tall aspect.
//! The whole bitmap is then multiplied by the oversampling factor, which
//! is lowered for surfaces too tall to fit within `MAX_SIDE` at full scale.

use super::{ExportError, Rasterizer};
use async_trait::async_trait;
use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};
use ratatui::buffer::{Buffer, Cell};
use ratatui::style::{Color, Modifier};
use tracing::debug;

/// Base width of one cell in pixels
pub const CELL_WIDTH: u32 = 8;
/// Base height of one cell in pixels
pub const CELL_HEIGHT: u32 = 16;

/// Largest bitmap side we agree to allocate
const MAX_SIDE: u32 = 16_384;

const INK: Rgb<u8> = Rgb([30, 41, 59]);
const MUTED_INK: Rgb<u8> = Rgb([100, 116, 139]);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Oversampling factor applied to every base pixel
    pub scale: u32,
    /// Opaque page colour behind the text
    pub background: Rgb<u8>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 3,
            background: Rgb([255, 255, 255]),
        }
    }
}

/// Rasterizer drawing buffer cells with font8x8 glyphs
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphRasterizer;

#[async_trait]
impl Rasterizer for GlyphRasterizer {
    async fn rasterize(
        &self,
        surface: &Buffer,
        options: RasterOptions,
    ) -> Result<RgbImage, ExportError> {
        let surface = surface.clone();
        tokio::task::spawn_blocking(move || paint(&surface, options))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))?
    }
}

/// Paint `surface` onto a fresh bitmap
pub fn paint(surface: &Buffer, options: RasterOptions) -> Result<RgbImage, ExportError> {
    let area = surface.area;
    if area.width == 0 || area.height == 0 {
        return Err(ExportError::Raster("print surface is empty".to_string()));
    }
    if options.scale == 0 {
        return Err(ExportError::Raster("scale factor must be positive".to_string()));
    }

    let base_width = area.width as u32 * CELL_WIDTH;
    let base_height = area.height as u32 * CELL_HEIGHT;
    let scale = fitting_scale(base_width, base_height, options.scale)?;
    if scale < options.scale {
        debug!(
            "Oversampling lowered from {}x to {scale}x for {}x{} cells",
            options.scale, area.width, area.height
        );
    }

    let mut image =
        RgbImage::from_pixel(base_width * scale, base_height * scale, options.background);
    for row in 0..area.height {
        for col in 0..area.width {
            let Some(cell) = surface.cell((area.x + col, area.y + row)) else {
                continue;
            };
            paint_cell(&mut image, cell, col as u32, row as u32, scale);
        }
    }
    Ok(image)
}

/// Largest factor up to `requested` keeping both sides within `MAX_SIDE`
fn fitting_scale(base_width: u32, base_height: u32, requested: u32) -> Result<u32, ExportError> {
    let longest = base_width.max(base_height);
    if longest > MAX_SIDE {
        return Err(ExportError::Raster(format!(
            "print surface of {base_width}x{base_height} px exceeds the {MAX_SIDE} px \
             bitmap limit even without oversampling"
        )));
    }
    Ok(requested.min(MAX_SIDE / longest))
}

fn paint_cell(image: &mut RgbImage, cell: &Cell, col: u32, row: u32, scale: u32) {
    let Some(ch) = cell.symbol().chars().next() else {
        return;
    };
    if ch == ' ' {
        return;
    }
    let Some(glyph) = glyph(ch) else {
        return;
    };

    let ink = ink(cell.fg);
    let bold = cell.modifier.contains(Modifier::BOLD);
    let origin_x = col * CELL_WIDTH;
    let origin_y = row * CELL_HEIGHT;

    for (glyph_row, bits) in glyph.iter().enumerate() {
        for bit in 0..8u32 {
            if bits & (1 << bit) == 0 {
                continue;
            }
            // Doubled glyph rows fill the 16 px cell height
            let y = origin_y + glyph_row as u32 * 2;
            fill(image, origin_x + bit, y, 1, 2, scale, ink);
            if bold && bit < 7 {
                fill(image, origin_x + bit + 1, y, 1, 2, scale, ink);
            }
        }
    }
}

/// Fill a `w` x `h` block of base pixels at (`x`, `y`)
fn fill(image: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, scale: u32, color: Rgb<u8>) {
    for py in y * scale..(y + h) * scale {
        for px in x * scale..(x + w) * scale {
            if px < image.width() && py < image.height() {
                image.put_pixel(px, py, color);
            }
        }
    }
}

fn glyph(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(ch)
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| BLOCK_FONTS.get(ch))
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
}

fn ink(color: Color) -> Rgb<u8> {
    match color {
        Color::Rgb(r, g, b) => Rgb([r, g, b]),
        Color::DarkGray | Color::Gray => MUTED_INK,
        _ => INK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    fn options() -> RasterOptions {
        RasterOptions::default()
    }

    #[test]
    fn test_default_options_are_three_x_on_white() {
        let options = RasterOptions::default();
        assert_eq!(options.scale, 3);
        assert_eq!(options.background, Rgb([255, 255, 255]));
    }

    #[test]
    fn test_bitmap_size_follows_cells_and_scale() {
        let surface = Buffer::empty(Rect::new(0, 0, 20, 5));
        let image = paint(&surface, options()).unwrap();
        assert_eq!(image.width(), 20 * CELL_WIDTH * 3);
        assert_eq!(image.height(), 5 * CELL_HEIGHT * 3);
    }

    #[test]
    fn test_blank_surface_is_opaque_white() {
        let surface = Buffer::empty(Rect::new(0, 0, 4, 2));
        let image = paint(&surface, options()).unwrap();
        assert!(image.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn test_text_leaves_ink() {
        let mut surface = Buffer::empty(Rect::new(0, 0, 4, 1));
        surface.set_string(0, 0, "Rx", Style::default());
        let image = paint(&surface, options()).unwrap();

        let inked = image.pixels().filter(|p| **p == INK).count();
        assert!(inked > 0);

        // Third and fourth cells stay blank
        let blank_start = 2 * CELL_WIDTH * 3;
        for y in 0..image.height() {
            for x in blank_start..image.width() {
                assert_eq!(*image.get_pixel(x, y), Rgb([255, 255, 255]));
            }
        }
    }

    #[test]
    fn test_muted_colors_use_muted_ink() {
        let mut surface = Buffer::empty(Rect::new(0, 0, 1, 1));
        surface.set_string(0, 0, "A", Style::default().fg(Color::DarkGray));
        let image = paint(&surface, options()).unwrap();
        assert!(image.pixels().any(|p| *p == MUTED_INK));
        assert!(!image.pixels().any(|p| *p == INK));
    }

    #[test]
    fn test_empty_surface_is_rejected() {
        let surface = Buffer::empty(Rect::new(0, 0, 0, 0));
        assert!(matches!(
            paint(&surface, options()),
            Err(ExportError::Raster(_))
        ));
    }

    #[test]
    fn test_tall_surface_lowers_oversampling() {
        // 400 rows is 6400 px at 1x, so only 2x fits under the limit
        let surface = Buffer::empty(Rect::new(0, 0, 96, 400));
        let image = paint(&surface, options()).unwrap();
        assert_eq!(image.width(), 96 * CELL_WIDTH * 2);
        assert_eq!(image.height(), 400 * CELL_HEIGHT * 2);
    }

    #[test]
    fn test_fitting_scale_keeps_requested_factor_when_possible() {
        assert_eq!(fitting_scale(768, 1600, 3).unwrap(), 3);
        assert_eq!(fitting_scale(768, 6400, 3).unwrap(), 2);
        assert_eq!(fitting_scale(768, MAX_SIDE, 3).unwrap(), 1);
    }

    #[test]
    fn test_oversized_surface_is_rejected() {
        let surface = Buffer::empty(Rect::new(0, 0, 3000, 10));
        let err = paint(&surface, options()).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_unknown_glyph_falls_back() {
        assert!(glyph('\u{1F600}').is_some());
        assert_eq!(glyph('A'), BASIC_FONTS.get('A'));
    }

    #[tokio::test]
    async fn test_rasterizer_runs_off_thread() {
        let mut surface = Buffer::empty(Rect::new(0, 0, 3, 1));
        surface.set_string(0, 0, "abc", Style::default());
        let image = GlyphRasterizer
            .rasterize(&surface, options())
            .await
            .unwrap();
        assert_eq!(image.dimensions(), (3 * CELL_WIDTH * 3, CELL_HEIGHT * 3));
    }
}
