//! Font atlas for text rendering
//!
//! Loads a TrueType/OpenType font with `fontdue` and rasterizes glyphs the
//! first time a string needs them, packing the bitmaps into a single
//! 1024x1024 single-channel coverage atlas kept on the CPU side. The
//! renderer decides when the packed pixels have to reach the device.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use nalgebra::Vector2;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to parse the font file
    #[error("failed to load font {}: {reason}", .path.display())]
    LoadError {
        /// Path the font was loaded from
        path: PathBuf,
        /// Error reported by the font parser
        reason: String,
    },

    /// Requested character has no glyph in the font
    #[error("no glyph for character {0:?}")]
    GlyphNotFound(char),

    /// The atlas has no room left for a new glyph
    #[error("atlas full: {glyph_width}x{glyph_height} glyph does not fit in {atlas_size}x{atlas_size}")]
    AtlasFull {
        /// Width of the rejected glyph bitmap
        glyph_width: u32,
        /// Height of the rejected glyph bitmap
        glyph_height: u32,
        /// Atlas edge length in pixels
        atlas_size: u32,
    },

    /// The render backend rejected an upload or draw
    #[error("backend error: {0}")]
    Backend(String),

    /// Filesystem error while reading the font
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Edge length of the glyph atlas in pixels
pub const ATLAS_SIZE: u32 = 1024;

/// Padding between packed glyph bitmaps in pixels
const GLYPH_PADDING: u32 = 1;

/// Information about a single glyph in the atlas
#[derive(Debug, Clone, Copy)]
pub struct GlyphInfo {
    /// UV coordinates of the glyph rectangle's top-left corner (normalized)
    pub uv_min: Vector2<f32>,

    /// UV coordinates of the glyph rectangle's bottom-right corner (normalized)
    pub uv_max: Vector2<f32>,

    /// Glyph bitmap size in pixels
    pub size: Vector2<f32>,

    /// Horizontal advance for pen positioning
    pub advance: f32,

    /// Offset of the bitmap's bottom-left corner from the pen (x right, y up)
    pub bearing: Vector2<f32>,
}

/// Source of glyph metrics and packed atlas pixels
///
/// The seam between layout/drawing and the fontdue-backed atlas, so layout
/// and upload bookkeeping can be exercised against scripted glyph tables.
pub trait GlyphAtlas {
    /// Metrics for a character, rasterizing and packing it on first use
    fn glyph(&mut self, ch: char) -> FontResult<GlyphInfo>;

    /// Kerning adjustment between two characters, zero when the font has none
    fn kerning(&self, left: char, right: char) -> f32;

    /// Number of glyphs packed so far
    fn glyph_count(&self) -> usize;

    /// Atlas edge length in pixels (the atlas is square)
    fn size(&self) -> u32;

    /// Packed single-channel coverage pixels, row-major `size() * size()`
    fn pixels(&self) -> &[u8];
}

/// Left-to-right shelf packer over a fixed-size square
///
/// Bitmaps fill the current row until it overflows, then open a new row
/// under the tallest member of the previous one. Glyph bitmaps at one
/// point size share similar heights, so shelves waste little space.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    next_x: u32,
    next_y: u32,
    row_height: u32,
}

impl ShelfPacker {
    const fn new(size: u32) -> Self {
        Self {
            size,
            next_x: 0,
            next_y: 0,
            row_height: 0,
        }
    }

    /// Reserve room for a `width x height` bitmap, returning its top-left corner
    fn place(&mut self, width: u32, height: u32) -> FontResult<(u32, u32)> {
        if width > self.size || height > self.size {
            return Err(FontError::AtlasFull {
                glyph_width: width,
                glyph_height: height,
                atlas_size: self.size,
            });
        }

        if self.next_x + width > self.size {
            self.next_y += self.row_height + GLYPH_PADDING;
            self.next_x = 0;
            self.row_height = 0;
        }

        if self.next_y + height > self.size {
            return Err(FontError::AtlasFull {
                glyph_width: width,
                glyph_height: height,
                atlas_size: self.size,
            });
        }

        let corner = (self.next_x, self.next_y);
        self.next_x += width + GLYPH_PADDING;
        self.row_height = self.row_height.max(height);
        Ok(corner)
    }

    fn reset(&mut self) {
        self.next_x = 0;
        self.next_y = 0;
        self.row_height = 0;
    }
}

/// Font atlas that owns the font handle and the packed glyph pixels
///
/// The font file path is retained so a point-size change can discard the
/// font and reload it from disk - a resize is a full rebuild, never an
/// incremental re-layout.
pub struct FontAtlas {
    /// Underlying fontdue font
    font: Font,

    /// Path the font was loaded from, kept for resize reloads
    font_path: PathBuf,

    /// Pixel size glyphs are rasterized at
    font_size: f32,

    /// Glyph information lookup
    glyphs: HashMap<char, GlyphInfo>,

    /// CPU-side coverage pixels, `ATLAS_SIZE * ATLAS_SIZE`
    pixels: Vec<u8>,

    /// Placement state for packed glyph bitmaps
    packer: ShelfPacker,
}

impl FontAtlas {
    /// Load a font file and start an empty atlas at the given pixel size
    pub fn from_file(path: impl AsRef<Path>, font_size: f32) -> FontResult<Self> {
        let path = path.as_ref().to_path_buf();
        let font = load_font(&path, font_size)?;

        log::info!("Loaded font {} at {}px", path.display(), font_size);

        Ok(Self {
            font,
            font_path: path,
            font_size,
            glyphs: HashMap::new(),
            pixels: vec![0; (ATLAS_SIZE * ATLAS_SIZE) as usize],
            packer: ShelfPacker::new(ATLAS_SIZE),
        })
    }

    /// Discard the font and every packed glyph, then reload at a new size
    ///
    /// The pixel buffer is zeroed and the glyph cache emptied before the
    /// font file is read again, so no metrics from the old size survive.
    pub fn resize(&mut self, font_size: f32) -> FontResult<()> {
        self.font = load_font(&self.font_path, font_size)?;
        self.font_size = font_size;
        self.glyphs.clear();
        self.pixels.fill(0);
        self.packer.reset();

        log::info!("Rebuilt font atlas at {}px", font_size);
        Ok(())
    }

    /// Pixel size glyphs are rasterized at
    pub const fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Path of the font file backing this atlas
    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    /// Baseline-to-baseline distance for this font and size
    pub fn line_height(&self) -> f32 {
        self.font
            .horizontal_line_metrics(self.font_size)
            .map_or(self.font_size * 1.2, |metrics| metrics.new_line_size)
    }

    /// Dump the coverage channel as a grayscale PNG
    #[cfg(debug_assertions)]
    pub fn save_debug_image(&self, path: impl AsRef<Path>) -> FontResult<()> {
        let image = image::GrayImage::from_raw(ATLAS_SIZE, ATLAS_SIZE, self.pixels.clone())
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "atlas buffer size mismatch")
            })?;
        image
            .save(path.as_ref())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        Ok(())
    }

    fn rasterize_and_pack(&mut self, ch: char) -> FontResult<GlyphInfo> {
        // fontdue maps unknown characters to the notdef glyph at index 0
        if self.font.lookup_glyph_index(ch) == 0 {
            return Err(FontError::GlyphNotFound(ch));
        }

        let (metrics, bitmap) = self.font.rasterize(ch, self.font_size);
        let width = metrics.width as u32;
        let height = metrics.height as u32;
        let (x, y) = self.packer.place(width, height)?;

        for row in 0..metrics.height {
            let src = row * metrics.width;
            let dst = (y as usize + row) * ATLAS_SIZE as usize + x as usize;
            self.pixels[dst..dst + metrics.width]
                .copy_from_slice(&bitmap[src..src + metrics.width]);
        }

        let atlas_size = ATLAS_SIZE as f32;
        let info = GlyphInfo {
            uv_min: Vector2::new(x as f32 / atlas_size, y as f32 / atlas_size),
            uv_max: Vector2::new(
                (x + width) as f32 / atlas_size,
                (y + height) as f32 / atlas_size,
            ),
            size: Vector2::new(metrics.width as f32, metrics.height as f32),
            advance: metrics.advance_width,
            bearing: Vector2::new(metrics.xmin as f32, metrics.ymin as f32),
        };

        self.glyphs.insert(ch, info);
        Ok(info)
    }
}

impl GlyphAtlas for FontAtlas {
    fn glyph(&mut self, ch: char) -> FontResult<GlyphInfo> {
        if let Some(info) = self.glyphs.get(&ch) {
            return Ok(*info);
        }
        self.rasterize_and_pack(ch)
    }

    fn kerning(&self, left: char, right: char) -> f32 {
        self.font
            .horizontal_kern(left, right, self.font_size)
            .unwrap_or(0.0)
    }

    fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    fn size(&self) -> u32 {
        ATLAS_SIZE
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

fn load_font(path: &Path, font_size: f32) -> FontResult<Font> {
    let data = std::fs::read(path)?;

    Font::from_bytes(
        data,
        FontSettings {
            scale: font_size,
            ..FontSettings::default()
        },
    )
    .map_err(|reason| {
        log::error!("Failed to load font {}: {}", path.display(), reason);
        FontError::LoadError {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packer_places_left_to_right_with_padding() {
        let mut packer = ShelfPacker::new(64);

        assert_eq!(packer.place(10, 12).unwrap(), (0, 0));
        assert_eq!(packer.place(10, 8).unwrap(), (11, 0));
        assert_eq!(packer.place(10, 12).unwrap(), (22, 0));
    }

    #[test]
    fn test_packer_wraps_to_a_new_row_under_the_tallest_glyph() {
        let mut packer = ShelfPacker::new(32);

        packer.place(20, 10).unwrap();
        packer.place(8, 14).unwrap();
        // 20 + 1 + 8 + 1 = 30, a 10-wide bitmap no longer fits this row
        assert_eq!(packer.place(10, 6).unwrap(), (0, 15));
    }

    #[test]
    fn test_packer_rejects_glyphs_past_the_bottom() {
        let mut packer = ShelfPacker::new(16);

        packer.place(16, 10).unwrap();
        let result = packer.place(16, 10);
        assert!(matches!(result, Err(FontError::AtlasFull { .. })));
    }

    #[test]
    fn test_packer_rejects_oversized_glyphs() {
        let mut packer = ShelfPacker::new(16);

        let result = packer.place(64, 4);
        assert!(matches!(
            result,
            Err(FontError::AtlasFull {
                glyph_width: 64,
                ..
            })
        ));
    }

    #[test]
    fn test_packer_accepts_zero_sized_bitmaps() {
        // Space and other blank glyphs rasterize to empty bitmaps but still
        // occupy a cache entry
        let mut packer = ShelfPacker::new(16);

        assert_eq!(packer.place(0, 0).unwrap(), (0, 0));
        assert_eq!(packer.place(4, 4).unwrap(), (1, 0));
    }

    #[test]
    fn test_packer_reset_starts_over() {
        let mut packer = ShelfPacker::new(32);

        packer.place(10, 10).unwrap();
        packer.place(10, 10).unwrap();
        packer.reset();
        assert_eq!(packer.place(10, 10).unwrap(), (0, 0));
    }
}
