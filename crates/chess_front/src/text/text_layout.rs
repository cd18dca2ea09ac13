//! Text layout engine
//!
//! Converts strings into positioned glyph quads along a left-to-right
//! baseline. Kerning against the previous character applies from the
//! second character onward; characters the font has no glyph for are
//! skipped with a warning and do not move the pen.
//!
//! # Layout Coordinate System
//!
//! - Origin (0, 0) is the pen position at the first character's baseline
//! - +X axis points right
//! - +Y axis points up

use nalgebra::{Vector2, Vector3};

use super::font_atlas::{GlyphAtlas, GlyphInfo};

/// Vertex data for text rendering
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct TextVertex {
    /// Position in layout space (baseline at y = 0)
    pub position: Vector3<f32>,

    /// UV texture coordinates into the glyph atlas
    pub uv: Vector2<f32>,
}

/// Bounding box of a laid-out string
#[derive(Debug, Clone, Copy)]
pub struct TextBounds {
    /// Minimum X coordinate
    pub min_x: f32,

    /// Minimum Y coordinate
    pub min_y: f32,

    /// Maximum X coordinate
    pub max_x: f32,

    /// Maximum Y coordinate
    pub max_y: f32,
}

impl TextBounds {
    /// Width of the bounding box
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Lay out a string as glyph quads, four vertices per rendered character
///
/// Quads are emitted in string order as bottom-left, top-left, top-right,
/// bottom-right corners.
pub fn layout_text<A: GlyphAtlas>(atlas: &mut A, text: &str) -> Vec<TextVertex> {
    let mut vertices = Vec::with_capacity(text.len() * 4);
    let mut pen_x = 0.0f32;
    let baseline_y = 0.0f32;
    let mut previous: Option<char> = None;

    for ch in text.chars() {
        let glyph = match atlas.glyph(ch) {
            Ok(glyph) => glyph,
            Err(err) => {
                log::warn!("Skipping character {:?}: {}", ch, err);
                continue;
            }
        };

        if let Some(prev) = previous {
            pen_x += atlas.kerning(prev, ch);
        }

        vertices.extend_from_slice(&glyph_quad(pen_x, baseline_y, &glyph));

        pen_x += glyph.advance;
        previous = Some(ch);
    }

    vertices
}

/// Measure the bounding box of a string without keeping its vertices
pub fn measure_text<A: GlyphAtlas>(atlas: &mut A, text: &str) -> TextBounds {
    let mut bounds = TextBounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 0.0,
        max_y: 0.0,
    };

    for vertex in layout_text(atlas, text) {
        bounds.min_x = bounds.min_x.min(vertex.position.x);
        bounds.min_y = bounds.min_y.min(vertex.position.y);
        bounds.max_x = bounds.max_x.max(vertex.position.x);
        bounds.max_y = bounds.max_y.max(vertex.position.y);
    }

    bounds
}

fn glyph_quad(pen_x: f32, baseline_y: f32, glyph: &GlyphInfo) -> [TextVertex; 4] {
    let x_min = pen_x + glyph.bearing.x;
    let y_min = baseline_y + glyph.bearing.y;
    let x_max = x_min + glyph.size.x;
    let y_max = y_min + glyph.size.y;

    // Atlas v grows downward while layout y grows upward, so the top
    // corners sample uv_min.y
    [
        TextVertex {
            position: Vector3::new(x_min, y_min, 0.0),
            uv: Vector2::new(glyph.uv_min.x, glyph.uv_max.y),
        },
        TextVertex {
            position: Vector3::new(x_min, y_max, 0.0),
            uv: Vector2::new(glyph.uv_min.x, glyph.uv_min.y),
        },
        TextVertex {
            position: Vector3::new(x_max, y_max, 0.0),
            uv: Vector2::new(glyph.uv_max.x, glyph.uv_min.y),
        },
        TextVertex {
            position: Vector3::new(x_max, y_min, 0.0),
            uv: Vector2::new(glyph.uv_max.x, glyph.uv_max.y),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::font_atlas::{FontError, FontResult};
    use approx::assert_relative_eq;

    /// Scripted glyph table: every character is an 8x10 bitmap with
    /// advance 10 and bearing (1, -2), except the listed missing ones
    struct StubAtlas {
        kern: f32,
        missing: Vec<char>,
    }

    impl StubAtlas {
        fn new() -> Self {
            Self {
                kern: 0.0,
                missing: Vec::new(),
            }
        }
    }

    impl GlyphAtlas for StubAtlas {
        fn glyph(&mut self, ch: char) -> FontResult<GlyphInfo> {
            if self.missing.contains(&ch) {
                return Err(FontError::GlyphNotFound(ch));
            }
            Ok(GlyphInfo {
                uv_min: Vector2::new(0.0, 0.0),
                uv_max: Vector2::new(0.1, 0.2),
                size: Vector2::new(8.0, 10.0),
                advance: 10.0,
                bearing: Vector2::new(1.0, -2.0),
            })
        }

        fn kerning(&self, _left: char, _right: char) -> f32 {
            self.kern
        }

        fn glyph_count(&self) -> usize {
            0
        }

        fn size(&self) -> u32 {
            64
        }

        fn pixels(&self) -> &[u8] {
            &[]
        }
    }

    #[test]
    fn test_four_vertices_per_rendered_character() {
        let mut atlas = StubAtlas::new();

        let vertices = layout_text(&mut atlas, "Check");
        assert_eq!(vertices.len(), 5 * 4);
    }

    #[test]
    fn test_empty_string_produces_no_vertices() {
        let mut atlas = StubAtlas::new();

        assert!(layout_text(&mut atlas, "").is_empty());
    }

    #[test]
    fn test_missing_glyphs_are_skipped_without_advancing_the_pen() {
        let mut atlas = StubAtlas::new();
        atlas.missing.push('e');

        let with_gap = layout_text(&mut atlas, "Check");
        assert_eq!(with_gap.len(), 4 * 4);

        // The skipped character leaves no trace in the layout
        let without = layout_text(&mut atlas, "Chck");
        assert_eq!(with_gap, without);
    }

    #[test]
    fn test_kerning_applies_from_the_second_character_only() {
        let mut atlas = StubAtlas::new();
        atlas.kern = -2.0;

        let vertices = layout_text(&mut atlas, "AV");

        // First quad sits at the bare bearing, unkerned
        assert_relative_eq!(vertices[0].position.x, 1.0);
        // Second quad: advance 10 + kern -2 + bearing 1
        assert_relative_eq!(vertices[4].position.x, 9.0);
    }

    #[test]
    fn test_quad_corners_follow_bearing_and_size() {
        let mut atlas = StubAtlas::new();

        let vertices = layout_text(&mut atlas, "A");

        // bottom-left, top-left, top-right, bottom-right
        assert_relative_eq!(vertices[0].position.x, 1.0);
        assert_relative_eq!(vertices[0].position.y, -2.0);
        assert_relative_eq!(vertices[1].position.y, 8.0);
        assert_relative_eq!(vertices[2].position.x, 9.0);
        assert_relative_eq!(vertices[3].position.y, -2.0);
    }

    #[test]
    fn test_top_corners_sample_the_atlas_top_row() {
        let mut atlas = StubAtlas::new();

        let vertices = layout_text(&mut atlas, "A");

        assert_relative_eq!(vertices[1].uv.y, 0.0);
        assert_relative_eq!(vertices[2].uv.y, 0.0);
        assert_relative_eq!(vertices[0].uv.y, 0.2);
        assert_relative_eq!(vertices[3].uv.y, 0.2);
    }

    #[test]
    fn test_measured_bounds_cover_the_full_string() {
        let mut atlas = StubAtlas::new();

        let bounds = measure_text(&mut atlas, "ab");

        // Last quad right edge: advance 10 + bearing 1 + width 8
        assert_relative_eq!(bounds.max_x, 19.0);
        assert_relative_eq!(bounds.min_y, -2.0);
        assert_relative_eq!(bounds.height(), 10.0);
    }
}
