//! Home-directory resolution for the server state directory.
//!
//! Everything the server writes (logs, the JSON item file, SQLite databases)
//! lives under one `home_dir`. Config values may be relative or use a `~/`
//! prefix; this module turns them into absolute paths and optionally creates
//! the directory.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolve the server home directory.
///
/// - `explicit`: value from config/CLI, if any. `~` and `~/...` expand to the
///   user's home directory.
/// - `default_subdir`: subdirectory used when no explicit value is given,
///   placed under the platform data dir (`%APPDATA%` on Windows, `$HOME`
///   elsewhere).
/// - `create`: create the directory (and parents) after resolution.
///
/// The returned path is always absolute.
pub fn resolve_home_dir(
    explicit: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let resolved = match explicit {
        Some(raw) => expand_user_path(raw.trim())?,
        None => platform_data_dir()?.join(default_subdir),
    };

    let absolute = if resolved.is_relative() {
        std::env::current_dir()
            .context("cannot determine current directory")?
            .join(resolved)
    } else {
        resolved
    };

    if create {
        std::fs::create_dir_all(&absolute)
            .with_context(|| format!("cannot create home dir '{}'", absolute.display()))?;
    }

    Ok(absolute)
}

fn expand_user_path(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return user_home_dir();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(user_home_dir()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

#[cfg(windows)]
fn platform_data_dir() -> Result<PathBuf> {
    std::env::var_os("APPDATA")
        .map(PathBuf::from)
        .context("APPDATA is not set")
}

#[cfg(not(windows))]
fn platform_data_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .context("HOME is not set")
}

#[cfg(windows)]
fn user_home_dir() -> Result<PathBuf> {
    std::env::var_os("USERPROFILE")
        .map(PathBuf::from)
        .context("USERPROFILE is not set")
}

#[cfg(not(windows))]
fn user_home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .context("HOME is not set")
}
