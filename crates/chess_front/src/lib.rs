//! # Chess Front
//!
//! Front-end support library for the Rustmate chess game.
//!
//! ## Features
//!
//! - **Platform Directories**: per-OS resolution of the read-only asset
//!   root and the writable per-user directory
//! - **Settings**: user options persisted in the user directory
//! - **Text Rendering**: glyph atlas, string layout, and immediate-mode
//!   quad drawing behind a backend trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chess_front::prelude::*;
//! use nalgebra::Vector4;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     enter_data_dir()?;
//!
//!     let mut renderer = TextRenderer::new("fonts/OpenSans-Regular.ttf", 24.0)?;
//!     let mut backend = RecordingBackend::new(640, 480);
//!
//!     let white = Vector4::new(1.0, 1.0, 1.0, 1.0);
//!     renderer.draw_text(&mut backend, "White to move", 20.0, 20.0, 1.0, white)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod platform;
pub mod settings;
pub mod text;

/// Common imports for library users
pub mod prelude {
    pub use crate::config::{Config, ConfigError};
    pub use crate::platform::{
        data_dir, enter_data_dir, enter_user_dir, user_dir, DirError, DirResult,
    };
    pub use crate::settings::GameSettings;
    pub use crate::text::{
        FontAtlas, FontError, FontResult, GlyphAtlas, GlyphInfo, PreparedText, RecordingBackend,
        TextRenderBackend, TextRenderer, TextVertex,
    };
}
