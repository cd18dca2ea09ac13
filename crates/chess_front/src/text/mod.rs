//! Text rendering for menus and the in-game HUD
//!
//! # Architecture
//!
//! - [`FontAtlas`]: rasterizes glyphs on demand into a single coverage atlas
//! - [`text_layout`]: converts strings into positioned glyph quads
//! - [`TextRenderer`]: owns the atlas, re-uploads it when it grows, and
//!   issues immediate draws through a [`TextRenderBackend`]
//!
//! The graphics API stays behind the backend trait; this module only
//! decides what to upload and which quads to draw.
//!
//! # Example
//!
//! ```no_run
//! use chess_front::text::{RecordingBackend, TextRenderer};
//! use nalgebra::Vector4;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut renderer = TextRenderer::new("fonts/OpenSans-Regular.ttf", 24.0)?;
//! let mut backend = RecordingBackend::new(640, 480);
//!
//! let white = Vector4::new(1.0, 1.0, 1.0, 1.0);
//!
//! // One-shot draw
//! renderer.draw_text(&mut backend, "New Game", 20.0, 360.0, 1.0, white)?;
//!
//! // Prepared once, drawn every frame
//! let title = renderer.prepare("Rustmate");
//! renderer.draw_prepared(&mut backend, &title, 20.0, 420.0, 1.5, white)?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod font_atlas;
pub mod text_layout;
mod text_renderer;

pub use backend::{RecordedDraw, RecordingBackend, TextRenderBackend};
pub use font_atlas::{FontAtlas, FontError, FontResult, GlyphAtlas, GlyphInfo, ATLAS_SIZE};
pub use text_layout::{layout_text, measure_text, TextBounds, TextVertex};
pub use text_renderer::{PreparedText, TextRenderer};
