//! Render backend seam for text drawing
//!
//! Keeps the text system independent of the graphics API: the renderer
//! hands the backend packed atlas pixels and quad sequences, the backend
//! owns device textures and draw submission. The GPU-facing implementation
//! lives with the window/context code, outside this library.

use nalgebra::{Vector2, Vector4};

use super::text_layout::TextVertex;

/// Backend-agnostic text drawing interface
pub trait TextRenderBackend {
    /// Upload the full atlas coverage texture, replacing any previous upload
    fn upload_font_atlas(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Draw a glyph quad sequence
    ///
    /// # Arguments
    /// * `vertices` - Quad corners in layout space, four per glyph
    /// * `offset` - Screen-space translation applied to the whole sequence
    /// * `scale` - Uniform scale applied before translation
    /// * `color` - Flat RGBA tint for every quad
    fn draw_glyph_quads(
        &mut self,
        vertices: &[TextVertex],
        offset: Vector2<f32>,
        scale: f32,
        color: Vector4<f32>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Current physical screen size in pixels
    fn screen_size(&self) -> (u32, u32);
}

/// A single draw call recorded by [`RecordingBackend`]
#[derive(Debug, Clone)]
pub struct RecordedDraw {
    /// Number of vertices submitted
    pub vertex_count: usize,

    /// Screen-space translation
    pub offset: Vector2<f32>,

    /// Uniform scale factor
    pub scale: f32,

    /// Flat RGBA tint
    pub color: Vector4<f32>,
}

/// Backend that records uploads and draws instead of touching a device
///
/// Used by unit tests and headless probes; draw order is preserved.
#[derive(Debug)]
pub struct RecordingBackend {
    /// Number of atlas uploads received
    pub uploads: usize,

    /// One entry per draw call, in submission order
    pub draws: Vec<RecordedDraw>,

    /// Screen size reported to callers
    pub screen_size: (u32, u32),
}

impl RecordingBackend {
    /// Create a recording backend reporting the given screen size
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            uploads: 0,
            draws: Vec::new(),
            screen_size: (width, height),
        }
    }
}

impl TextRenderBackend for RecordingBackend {
    fn upload_font_atlas(
        &mut self,
        _pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), Box<dyn std::error::Error>> {
        log::debug!("Recorded atlas upload {}x{}", width, height);
        self.uploads += 1;
        Ok(())
    }

    fn draw_glyph_quads(
        &mut self,
        vertices: &[TextVertex],
        offset: Vector2<f32>,
        scale: f32,
        color: Vector4<f32>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.draws.push(RecordedDraw {
            vertex_count: vertices.len(),
            offset,
            scale,
            color,
        });
        Ok(())
    }

    fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }
}
