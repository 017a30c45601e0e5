//! Markpad - A terminal markdown editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! markpad
//! markpad --theme dark --mode write
//! markpad --export-dir ~/docs --save
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use markpad::app::App;
use markpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use markpad::logging;
use markpad::ui::{Theme, ViewMode};

/// A terminal markdown editor with live preview
#[derive(Parser, Debug)]
#[command(name = "markpad", version, about, long_about = None)]
struct Cli {
    /// Start in the light or dark theme
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Panes shown at startup
    #[arg(long, value_enum)]
    mode: Option<ViewMode>,

    /// Directory "Download README.md" writes into
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Write trace output to a file (filter with MARKPAD_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as global defaults
    #[arg(long)]
    save: bool,

    /// Clear saved global defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    if let Some(path) = &effective.log_file {
        logging::init_file_logging(path)?;
    }
    tracing::debug!(?cli, ?effective, "resolved flags");

    let export_dir = effective
        .export_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    if !export_dir.is_dir() {
        anyhow::bail!("Export directory not found: {}", export_dir.display());
    }

    let mut app = App::new()
        .with_theme(effective.theme.unwrap_or_default())
        .with_view_mode(effective.mode.unwrap_or_default())
        .with_export_dir(export_dir)
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    app.run().context("Application error")
}
