use std::path::{Path, PathBuf};

use brickshelf_lib::{load_settings, load_settings_string, save_settings, settings_path};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Show the settings file and the paths this invocation resolved to.
pub(crate) fn run_config_show(db_path: &Path, image_dir: &Path) -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "brickshelf Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("  Database:      {}", db_path.display());
    log::info!("  Images:        {}", image_dir.display());

    if let Some(contents) = load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }
    Ok(())
}

pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings_path().display());
    Ok(())
}

pub(crate) fn run_config_set_database(path: PathBuf) -> Result<(), CliError> {
    let path = absolute(path)?;
    let mut settings = load_settings();
    settings.library.database = Some(path.clone());
    save_settings(&settings)
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!(
        "{} Database set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}

pub(crate) fn run_config_set_image_dir(path: PathBuf) -> Result<(), CliError> {
    let path = absolute(path)?;
    let mut settings = load_settings();
    settings.library.image_dir = Some(path.clone());
    save_settings(&settings)
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!(
        "{} Image directory set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}

/// Resolve a relative path against the working directory.
fn absolute(path: PathBuf) -> Result<PathBuf, CliError> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
