use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::ui::layout::ViewMode;
use crate::ui::theme::Theme;

/// Startup defaults, read from config files and argv with one parser.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub theme: Option<Theme>,
    pub mode: Option<ViewMode>,
    pub export_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; values in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            theme: other.theme.or(self.theme),
            mode: other.mode.or(self.mode),
            export_dir: other
                .export_dir
                .clone()
                .or_else(|| self.export_dir.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("markpad").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("markpad")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("markpad").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("markpad")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".markpadrc")
}

/// Read flags from a config file. A missing file means no flags.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    // One flag per line; the value is the rest of the line, spaces included.
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| match line.split_once(char::is_whitespace) {
            Some((name, value)) => vec![name.to_string(), value.trim().to_string()],
            None => vec![line.to_string()],
        })
        .collect::<Vec<_>>();
    let flags = parse_flag_tokens(&tokens);
    tracing::debug!(path = %path.display(), ?flags, "loaded config");
    Ok(flags)
}

/// Write flags as a config file, one flag per line.
///
/// # Errors
///
/// Returns an error if the parent directory or the file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# markpad defaults (saved with --save)".to_string()];
    if let Some(theme) = flags.theme.and_then(value_name) {
        lines.push(format!("--theme {theme}"));
    }
    if let Some(mode) = flags.mode.and_then(value_name) {
        lines.push(format!("--mode {mode}"));
    }
    if let Some(dir) = &flags.export_dir {
        lines.push(format!("--export-dir {}", dir.display()));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a config file if present.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list, ignoring everything else.
///
/// Accepts both `--flag value` and `--flag=value`. Unknown values for
/// `--theme` and `--mode` are dropped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        if !matches!(name, "--theme" | "--mode" | "--export-dir" | "--log-file") {
            i += 1;
            continue;
        }
        let value = if let Some(value) = inline_value {
            Some(value)
        } else {
            i += 1;
            tokens.get(i).map(String::as_str)
        };
        if let Some(value) = value {
            match name {
                "--theme" => flags.theme = Theme::from_str(value, false).ok(),
                "--mode" => flags.mode = ViewMode::from_str(value, false).ok(),
                "--export-dir" => flags.export_dir = Some(PathBuf::from(value)),
                _ => flags.log_file = Some(PathBuf::from(value)),
            }
        }
        i += 1;
    }
    flags
}

/// The name clap accepts for a value, as written back to config files.
fn value_name<T: ValueEnum>(value: T) -> Option<String> {
    value
        .to_possible_value()
        .map(|possible| possible.get_name().to_string())
}
