//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use brickshelf_catalog::{RecordChanges, RecordId, SortKey};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "brickshelf")]
#[command(about = "Catalog a collection of construction sets", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database (defaults to the saved setting, then the data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Image directory (defaults to the saved setting, then the data directory)
    #[arg(long, global = true)]
    pub image_dir: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List sets, filtered, sorted, and paginated
    List(ListArgs),

    /// Show every field of one set
    Show {
        id: RecordId,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a new set
    Add {
        /// Set number, e.g. 10276
        code: String,

        title: String,

        #[command(flatten)]
        fields: RecordArgs,

        /// Attach this image file after creating the set
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Change fields of an existing set
    Edit {
        id: RecordId,

        /// New set number
        #[arg(long)]
        code: Option<String>,

        /// New title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: RecordArgs,
    },

    /// Delete a set and its image
    Delete { id: RecordId },

    /// Export the whole catalog as CSV
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import sets from a CSV file, skipping set numbers already present
    Import { file: PathBuf },

    /// Show collection statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the series in use
    Categories,

    /// Attach or remove set images
    Image {
        #[command(subcommand)]
        action: ImageAction,
    },

    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Clone, Default)]
pub(crate) struct ListArgs {
    /// Case-insensitive text matched against set number, title, description, and series
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only sets in this series (exact match)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only owned sets
    #[arg(long, conflicts_with = "not_owned")]
    pub owned: bool,

    /// Only sets not owned
    #[arg(long)]
    pub not_owned: bool,

    /// Sort key: title, primary_code, release_year, approximate_value, part_count, created_at
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort descending
    #[arg(long, conflicts_with = "asc")]
    pub desc: bool,

    /// Sort ascending (overrides a saved descending default)
    #[arg(long)]
    pub asc: bool,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Sets per page; 0 shows everything
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Optional record fields shared by `add` and `edit`. For text fields an
/// empty string clears the stored value.
#[derive(Args, Clone, Default)]
pub(crate) struct RecordArgs {
    /// Alternate set number
    #[arg(long)]
    pub alt_code: Option<String>,

    /// Whether the set is owned (true/false)
    #[arg(long)]
    pub owned: Option<bool>,

    /// Number of copies owned
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Release year
    #[arg(long)]
    pub year: Option<u32>,

    /// Clear the release year
    #[arg(long, conflicts_with = "year")]
    pub no_year: bool,

    #[arg(long)]
    pub description: Option<String>,

    /// Series/theme
    #[arg(long)]
    pub category: Option<String>,

    /// Number of parts
    #[arg(long)]
    pub parts: Option<u32>,

    /// Number of minifigures
    #[arg(long)]
    pub minifigs: Option<u32>,

    /// Bricklink catalog URL
    #[arg(long)]
    pub bricklink: Option<String>,

    /// Rebrickable URL
    #[arg(long)]
    pub rebrickable: Option<String>,

    /// Approximate value per copy
    #[arg(long)]
    pub value: Option<f64>,

    /// Clear the approximate value
    #[arg(long, conflicts_with = "value")]
    pub no_value: bool,

    /// Date the value was last checked (YYYY-MM-DD)
    #[arg(long)]
    pub value_date: Option<NaiveDate>,

    /// Clear the value date
    #[arg(long, conflicts_with = "value_date")]
    pub no_value_date: bool,

    /// Condition notes
    #[arg(long)]
    pub condition: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl RecordArgs {
    pub(crate) fn into_changes(self) -> RecordChanges {
        fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
            if clear { Some(None) } else { value.map(Some) }
        }

        RecordChanges {
            alternate_code: self.alt_code,
            owned: self.owned,
            quantity_owned: self.quantity,
            release_year: clearable(self.year, self.no_year),
            description: self.description,
            category: self.category,
            part_count: self.parts,
            sub_unit_count: self.minifigs,
            bricklink_url: self.bricklink,
            rebrickable_url: self.rebrickable,
            approximate_value: clearable(self.value, self.no_value),
            value_as_of: clearable(self.value_date, self.no_value_date),
            condition_notes: self.condition,
            notes: self.notes,
            ..RecordChanges::default()
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum ImageAction {
    /// Copy an image file into the library and attach it to a set
    Attach { id: RecordId, file: PathBuf },

    /// Detach and delete a set's image
    Remove { id: RecordId },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the settings file and resolved paths
    Show,

    /// Print the settings file path
    Path,

    /// Save the default database path
    SetDatabase { path: PathBuf },

    /// Save the default image directory
    SetImageDir { path: PathBuf },
}
