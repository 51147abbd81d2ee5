//! brickshelf CLI
//!
//! Command-line interface for cataloging a collection of construction sets.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use brickshelf_lib::{load_settings, resolve_database_path, resolve_image_dir};

use cli_types::{Cli, Commands, ConfigAction, ImageAction};
pub(crate) use error::CliError;

/// Log an empty line (spacing between output sections).
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        if !e.already_reported() {
            log::error!("{} {}", "Error:".if_supports_color(Stdout, |t| t.red()), e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings();
    let db_path = resolve_database_path(cli.db, &settings);
    let image_dir = resolve_image_dir(cli.image_dir, &settings);

    // Config commands never touch the database.
    if let Commands::Config { action } = cli.command {
        return match action {
            ConfigAction::Show => commands::config::run_config_show(&db_path, &image_dir),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetDatabase { path } => commands::config::run_config_set_database(path),
            ConfigAction::SetImageDir { path } => commands::config::run_config_set_image_dir(path),
        };
    }

    let catalog = commands::Catalog::open(&db_path, &image_dir)?;

    match cli.command {
        Commands::List(args) => commands::list::run_list(&catalog, &settings.view, args),
        Commands::Show { id, json } => commands::show::run_show(&catalog, id, json),
        Commands::Add {
            code,
            title,
            fields,
            image,
        } => commands::record::run_add(&catalog, code, title, fields, image),
        Commands::Edit {
            id,
            code,
            title,
            fields,
        } => commands::record::run_edit(&catalog, id, code, title, fields),
        Commands::Delete { id } => commands::record::run_delete(&catalog, id),
        Commands::Export { output } => commands::transfer::run_export(&catalog, output),
        Commands::Import { file } => {
            commands::transfer::run_import(&catalog, &file, cli.quiet)
        }
        Commands::Stats { json } => commands::stats::run_stats(&catalog, json),
        Commands::Categories => commands::stats::run_categories(&catalog),
        Commands::Image { action } => match action {
            ImageAction::Attach { id, file } => {
                commands::image::run_image_attach(&catalog, id, &file)
            }
            ImageAction::Remove { id } => commands::image::run_image_remove(&catalog, id),
        },
        Commands::Config { .. } => Ok(()),
    }
}
