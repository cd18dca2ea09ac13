//! Per-platform directory resolution
//!
//! The game keeps two roots: the read-only asset directory installed with
//! the game, and a writable per-user directory for options and saves. Both
//! are exposed as paths and as `enter_*` calls that change the process
//! working directory, so asset and save paths stay relative the way the
//! rest of the front end expects.
//!
//! Resolution is a single attempt per call. Callers treat a data-directory
//! failure as fatal (nothing can render without the installed assets) and a
//! user-directory failure as recoverable (fall back to default settings).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Result type for directory resolution
pub type DirResult<T> = Result<T, DirError>;

/// Errors that can occur while resolving the game's directories
#[derive(Debug, thiserror::Error)]
pub enum DirError {
    /// No home (or roaming app-data) location exists for the current user
    #[error("no home directory available for the current user")]
    NoHome,

    /// The running executable's location could not be determined
    #[error("executable path unavailable: {0}")]
    NoExecutable(String),

    /// Filesystem operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-user directory name, joined onto `%APPDATA%`
#[cfg(target_os = "windows")]
const USER_DIR_NAME: &str = "Rustmate";

/// Per-user directory path, joined onto `$HOME`
#[cfg(target_os = "macos")]
const USER_DIR_NAME: &str = "Library/Application Support/Rustmate";

/// Per-user dot directory, joined onto `$HOME`
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const USER_DIR_NAME: &str = ".rustmate";

/// Locate the read-only asset root next to the executable
#[cfg(target_os = "windows")]
pub fn data_dir() -> DirResult<PathBuf> {
    Ok(executable_dir()?.join("data"))
}

/// Locate the read-only asset root inside the application bundle
#[cfg(target_os = "macos")]
pub fn data_dir() -> DirResult<PathBuf> {
    // Bundle layout: Contents/MacOS/<exe> with assets in Contents/Resources
    Ok(executable_dir()?.join("../Resources"))
}

/// Locate the read-only asset root at the compile-time install prefix
///
/// Overridable at build time through the `RUSTMATE_DATADIR` environment
/// variable for packaging under a different prefix.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn data_dir() -> DirResult<PathBuf> {
    Ok(PathBuf::from(
        option_env!("RUSTMATE_DATADIR").unwrap_or("/usr/local/share/rustmate"),
    ))
}

/// Locate the writable per-user directory without creating it
pub fn user_dir() -> DirResult<PathBuf> {
    resolve_user_dir(home_base())
}

/// Change the working directory to the read-only asset root
pub fn enter_data_dir() -> DirResult<()> {
    let dir = data_dir()?;
    env::set_current_dir(&dir)?;
    log::info!("Entered data directory {}", dir.display());
    Ok(())
}

/// Change the working directory to the per-user directory, creating it on
/// first use
pub fn enter_user_dir() -> DirResult<()> {
    let dir = user_dir()?;
    ensure_dir(&dir)?;
    env::set_current_dir(&dir)?;
    log::info!("Entered user directory {}", dir.display());
    Ok(())
}

#[cfg(any(target_os = "windows", target_os = "macos"))]
fn executable_dir() -> DirResult<PathBuf> {
    let exe = env::current_exe().map_err(|e| DirError::NoExecutable(e.to_string()))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| DirError::NoExecutable("executable has no parent directory".to_string()))
}

#[cfg(target_os = "windows")]
fn home_base() -> Option<PathBuf> {
    env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(not(target_os = "windows"))]
fn home_base() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

/// Resolve the user directory under an explicit base; `None` means the
/// platform reported no home location for the current user
fn resolve_user_dir(base: Option<PathBuf>) -> DirResult<PathBuf> {
    base.map(|b| b.join(USER_DIR_NAME)).ok_or(DirError::NoHome)
}

fn ensure_dir(dir: &Path) -> DirResult<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
        log::info!("Created user directory {}", dir.display());
    }
    Ok(())
}
