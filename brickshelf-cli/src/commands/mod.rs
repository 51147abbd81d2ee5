pub(crate) mod config;
pub(crate) mod image;
pub(crate) mod list;
pub(crate) mod record;
pub(crate) mod show;
pub(crate) mod stats;
pub(crate) mod transfer;

use std::path::Path;

use brickshelf_catalog::InventoryRecord;
use brickshelf_db::SqliteStore;
use brickshelf_lib::ImageLibrary;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// The opened record store plus its image directory.
pub(crate) struct Catalog {
    pub store: SqliteStore,
    pub images: ImageLibrary,
}

impl Catalog {
    pub(crate) fn open(db_path: &Path, image_dir: &Path) -> Result<Self, CliError> {
        let store = SqliteStore::open(db_path).map_err(|e| {
            CliError::database(format!(
                "Failed to open catalog database at {}: {}",
                db_path.display(),
                e
            ))
        })?;
        log::debug!("Opened catalog database {}", db_path.display());
        Ok(Self {
            store,
            images: ImageLibrary::new(image_dir),
        })
    }
}

/// Truncate a string to a maximum width in characters, appending "..." if
/// needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

/// Money amounts are shown with two decimals.
pub(crate) fn format_money(value: f64) -> String {
    format!("${:.2}", value)
}

/// One-line summary: `#id  code  title (year) [series]`.
pub(crate) fn record_line(record: &InventoryRecord) -> String {
    let mut line = format!(
        "#{:<4} {:<10} {}",
        record.id,
        record.primary_code.if_supports_color(Stdout, |t| t.bold()),
        truncate_str(&record.title, 40),
    );
    if let Some(year) = record.release_year {
        line.push_str(&format!(" ({})", year));
    }
    if let Some(category) = &record.category {
        line.push_str(&format!(
            " [{}]",
            category.if_supports_color(Stdout, |t| t.cyan())
        ));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Colosseum", 20), "Colosseum");
        assert_eq!(truncate_str("Millennium Falcon", 10), "Millenn...");
        assert_eq!(truncate_str("Falcon", 2), "Fa");
        assert_eq!(truncate_str("Château Fort", 8), "Châte...");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(20.0), "$20.00");
        assert_eq!(format_money(549.989), "$549.99");
    }
}
