//! Platform-aware path resolution for studio-dashboard.
//!
//! - Config: `$XDG_CONFIG_HOME/studio-dashboard`, else the platform config
//!   directory (`~/.config` on Linux, `~/Library/Application Support` on macOS)
//! - Data: `$XDG_DATA_HOME/studio-dashboard`, else the platform data
//!   directory (`~/.local/share` on Linux)

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "studio-dashboard";

/// Returns the configuration directory for studio-dashboard.
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = env_dir("XDG_CONFIG_HOME") {
        return xdg.join(APP_NAME);
    }
    dirs::config_dir()
        .unwrap_or_else(|| home().join(".config"))
        .join(APP_NAME)
}

/// Returns the path to the main configuration file.
///
/// Resolves to `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the default data directory, where organization settings and the
/// editor log live.
pub fn data_dir() -> PathBuf {
    if let Some(xdg) = env_dir("XDG_DATA_HOME") {
        return xdg.join(APP_NAME);
    }
    dirs::data_dir()
        .unwrap_or_else(|| home().join(".local/share"))
        .join(APP_NAME)
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home().join(rest)
    } else if path == "~" {
        home()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

// Without a home directory, paths resolve relative to the working directory.
fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_default()
}
