//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! writes it for `sdash config init`.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::xdg;

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Studio Dashboard Configuration
#
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/studio-dashboard/config.toml

# ==============================================================================
# Dashboard
# ==============================================================================

[dashboard]

# Organization whose layout is edited when --org is not given.
# Letters, digits, '-' and '_' only.
organization = "default"

# Redraw interval of the terminal editor.
# Examples: "100ms", "250ms", "1s"
tick_rate = "250ms"

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Directory holding one settings file per organization (orgs/<org>.json)
# and the editor log. Empty means the platform data directory
# ($XDG_DATA_HOME/studio-dashboard or ~/.local/share/studio-dashboard).
# Tilde (~) is expanded.
data_dir = ""

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Options: "error", "warn", "info", "debug", "trace"
# The SDASH_LOG environment variable overrides this.
level = "info"

# Log file. Empty means stderr, except for `sdash edit`, which always
# logs to a file (<data_dir>/sdash.log) so the screen stays clean.
file = ""
"#;

/// Writes the default template to `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.bak` first.
pub fn create_default_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.bak");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

/// Writes the default template, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent).map_err(write_error)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Config;

    #[test]
    fn template_matches_default_config() {
        let parsed: Config =
            toml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("template should parse");
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn creates_file_and_parent_dirs() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested/studio-dashboard/config.toml");
        create_default_config(&path, false).expect("should create");
        let content = fs::read_to_string(&path).expect("read back");
        assert_eq!(content, DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "# mine\n").expect("seed file");
        let err = create_default_config(&path, false).expect_err("should refuse");
        assert!(matches!(err, ConfigError::AlreadyExists { .. }));
        assert_eq!(fs::read_to_string(&path).expect("read"), "# mine\n");
    }

    #[test]
    fn force_backs_up_existing_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "# mine\n").expect("seed file");
        create_default_config(&path, true).expect("should overwrite");
        let backup = dir.path().join("config.toml.bak");
        assert_eq!(fs::read_to_string(backup).expect("backup"), "# mine\n");
        assert_eq!(
            fs::read_to_string(&path).expect("new file"),
            DEFAULT_CONFIG_TEMPLATE
        );
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("config.toml");
        create_default_config(&path, false).expect("should create");
        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
