//! Rustmate front-end probe
//!
//! Headless smoke drive for the front-end glue: resolves the game
//! directories, loads user settings, and runs the text pipeline against the
//! recording backend. Useful for checking a font file and the platform
//! paths without bringing up a window.
//!
//! Usage: `board_app [path/to/font.ttf]`. Without an argument the default
//! font is loaded from the installed data directory.

use std::path::PathBuf;

use nalgebra::Vector4;

use chess_front::platform;
use chess_front::settings::{self, GameSettings};
use chess_front::text::{GlyphAtlas, RecordingBackend, TextRenderer};

/// Default font, relative to the data directory
const DEFAULT_FONT: &str = "fonts/OpenSans-Regular.ttf";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Rustmate front-end probe");

    // User directory is recoverable: keep running on defaults without one.
    let settings = match platform::user_dir() {
        Ok(user_dir) => {
            if let Err(err) = platform::enter_user_dir() {
                log::warn!("Failed to enter user directory: {}", err);
            }
            settings::load_or_default(&user_dir)
        }
        Err(err) => {
            log::warn!("User directory unavailable: {} - using defaults", err);
            GameSettings::default()
        }
    };
    log::info!(
        "Settings: {}x{} fullscreen={} theme={} pieces={}",
        settings.graphics.window_width,
        settings.graphics.window_height,
        settings.graphics.fullscreen,
        settings.board.theme,
        settings.board.piece_set
    );

    // The asset root is fatal when we need the bundled font; an explicit
    // font argument skips it.
    let font_path = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            platform::enter_data_dir().map_err(|err| {
                log::error!("Failed to enter data directory: {}", err);
                err
            })?;
            PathBuf::from(DEFAULT_FONT)
        }
    };

    let mut renderer = TextRenderer::new(&font_path, settings.graphics.text_size).map_err(
        |err| {
            log::error!("Failed to initialize text renderer: {}", err);
            err
        },
    )?;

    log::info!(
        "Using font {} ({:.1}px line height)",
        renderer.atlas().font_path().display(),
        renderer.atlas().line_height()
    );

    let mut backend = RecordingBackend::new(
        settings.graphics.window_width,
        settings.graphics.window_height,
    );
    let white = Vector4::new(1.0, 1.0, 1.0, 1.0);

    // One-shot draw, centered against the logical 640-unit width
    let title_width = renderer.measure("Rustmate").width() * 1.5;
    renderer.draw_text(
        &mut backend,
        "Rustmate",
        (640.0 - title_width) / 2.0,
        440.0,
        1.5,
        white,
    )?;

    // Prepared handle redrawn across frames
    let status = renderer.prepare("White to move");
    for _ in 0..3 {
        renderer.draw_prepared(&mut backend, &status, 20.0, 20.0, 1.0, white)?;
    }

    log::info!(
        "Drained pipeline: {} draw calls, {} atlas uploads, {} glyphs packed",
        backend.draws.len(),
        backend.uploads,
        renderer.atlas().glyph_count()
    );

    // Point-size change rebuilds the atlas from the font file
    renderer.resize(settings.graphics.text_size * 2.0)?;
    renderer.draw_text(&mut backend, "Check", 200.0, 240.0, 1.0, white)?;
    log::info!(
        "After resize: {} atlas uploads, {} glyphs packed",
        backend.uploads,
        renderer.atlas().glyph_count()
    );

    // Debug views of the packed atlas
    renderer.draw_atlas(&mut backend)?;
    #[cfg(debug_assertions)]
    {
        let dump = std::env::temp_dir().join("rustmate_atlas.png");
        renderer.atlas().save_debug_image(&dump)?;
        log::info!("Atlas dumped to {}", dump.display());
    }

    log::info!("Probe finished successfully");
    Ok(())
}
