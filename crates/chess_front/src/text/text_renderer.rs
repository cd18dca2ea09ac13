//! Text renderer owning the atlas/font pair
//!
//! Draw flow: lay out quads, push the atlas to the device if new glyphs
//! were packed since the last upload, then issue one immediate draw per
//! string. Strings shown every frame can be prepared once and redrawn from
//! the cached vertices without re-running layout.
//!
//! Single-threaded by design: the renderer is called only from the thread
//! owning the graphics context, so no synchronization is carried.

use std::path::Path;

use nalgebra::{Vector2, Vector3, Vector4};

use super::backend::TextRenderBackend;
use super::font_atlas::{FontAtlas, FontError, FontResult, GlyphAtlas};
use super::text_layout::{self, TextVertex};

/// Logical viewport size the front end lays text out against
const LOGICAL_WIDTH: f32 = 640.0;
const LOGICAL_HEIGHT: f32 = 480.0;

/// Precomputed vertex sequence for a string, reusable across frames
#[derive(Debug, Clone)]
pub struct PreparedText {
    vertices: Vec<TextVertex>,
}

impl PreparedText {
    /// Number of vertices in the sequence (four per rendered character)
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the string produced no renderable glyphs
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Renderer that owns a glyph atlas and draws strings through a backend
///
/// Tracks how many glyphs the backend has seen: whenever layout packs new
/// glyphs, the next draw re-uploads the whole atlas first, otherwise the
/// new glyphs would sample as blank.
pub struct TextRenderer<A: GlyphAtlas = FontAtlas> {
    atlas: A,
    uploaded_glyphs: usize,
}

impl TextRenderer<FontAtlas> {
    /// Load a font file and initialize an empty atlas at `pt_size`
    pub fn new(font_path: impl AsRef<Path>, pt_size: f32) -> FontResult<Self> {
        Ok(Self::with_atlas(FontAtlas::from_file(font_path, pt_size)?))
    }

    /// Change the point size: discard the font, clear the atlas, reload
    ///
    /// A full rebuild. The uploaded-glyph count drops to zero so the next
    /// draw pushes the fresh atlas to the device.
    pub fn resize(&mut self, pt_size: f32) -> FontResult<()> {
        self.atlas.resize(pt_size)?;
        self.uploaded_glyphs = 0;
        Ok(())
    }
}

impl<A: GlyphAtlas> TextRenderer<A> {
    /// Wrap an existing atlas
    pub const fn with_atlas(atlas: A) -> Self {
        Self {
            atlas,
            uploaded_glyphs: 0,
        }
    }

    /// The owned atlas
    pub const fn atlas(&self) -> &A {
        &self.atlas
    }

    /// Lay out a string once for repeated drawing
    pub fn prepare(&mut self, text: &str) -> PreparedText {
        PreparedText {
            vertices: text_layout::layout_text(&mut self.atlas, text),
        }
    }

    /// Measure a string's layout bounds (in unscaled layout units)
    pub fn measure(&mut self, text: &str) -> text_layout::TextBounds {
        text_layout::measure_text(&mut self.atlas, text)
    }

    /// Lay out and draw a string in one shot
    pub fn draw_text(
        &mut self,
        backend: &mut dyn TextRenderBackend,
        text: &str,
        x: f32,
        y: f32,
        scale: f32,
        color: Vector4<f32>,
    ) -> FontResult<()> {
        let prepared = self.prepare(text);
        self.draw_prepared(backend, &prepared, x, y, scale, color)
    }

    /// Draw a previously prepared string
    pub fn draw_prepared(
        &mut self,
        backend: &mut dyn TextRenderBackend,
        prepared: &PreparedText,
        x: f32,
        y: f32,
        scale: f32,
        color: Vector4<f32>,
    ) -> FontResult<()> {
        self.sync_atlas(backend)?;

        let scale = screen_scale(backend) * scale;
        backend
            .draw_glyph_quads(&prepared.vertices, Vector2::new(x, y), scale, color)
            .map_err(|e| FontError::Backend(e.to_string()))
    }

    /// Upload the atlas if glyphs were packed since the last upload
    pub fn sync_atlas(&mut self, backend: &mut dyn TextRenderBackend) -> FontResult<()> {
        let packed = self.atlas.glyph_count();
        if packed > self.uploaded_glyphs {
            backend
                .upload_font_atlas(self.atlas.pixels(), self.atlas.size(), self.atlas.size())
                .map_err(|e| FontError::Backend(e.to_string()))?;

            log::debug!("Uploaded atlas with {} glyphs", packed);
            self.uploaded_glyphs = packed;
        }
        Ok(())
    }

    /// Draw the whole atlas across the logical viewport (debug aid)
    pub fn draw_atlas(&mut self, backend: &mut dyn TextRenderBackend) -> FontResult<()> {
        self.sync_atlas(backend)?;

        let vertices = [
            TextVertex {
                position: Vector3::new(0.0, 0.0, 0.0),
                uv: Vector2::new(0.0, 1.0),
            },
            TextVertex {
                position: Vector3::new(0.0, LOGICAL_HEIGHT, 0.0),
                uv: Vector2::new(0.0, 0.0),
            },
            TextVertex {
                position: Vector3::new(LOGICAL_WIDTH, LOGICAL_HEIGHT, 0.0),
                uv: Vector2::new(1.0, 0.0),
            },
            TextVertex {
                position: Vector3::new(LOGICAL_WIDTH, 0.0, 0.0),
                uv: Vector2::new(1.0, 1.0),
            },
        ];

        backend
            .draw_glyph_quads(
                &vertices,
                Vector2::zeros(),
                1.0,
                Vector4::new(1.0, 1.0, 1.0, 1.0),
            )
            .map_err(|e| FontError::Backend(e.to_string()))
    }
}

/// Ratio of the logical layout height to the physical screen height
fn screen_scale(backend: &dyn TextRenderBackend) -> f32 {
    let (_, height) = backend.screen_size();
    if height == 0 {
        1.0
    } else {
        LOGICAL_HEIGHT / height as f32
    }
}
