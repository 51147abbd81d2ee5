use brickshelf_catalog::{
    OwnershipFilter, QueryCriteria, RecordStore, SortDirection, SortKey, derive_view,
};
use brickshelf_lib::ViewSettings;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::ListArgs;

use super::{Catalog, format_money, record_line};

/// Build query criteria from flags, falling back to saved view defaults.
pub(crate) fn criteria_from_args(args: &ListArgs, view: &ViewSettings) -> QueryCriteria {
    let sort_key = args.sort.unwrap_or_else(|| {
        view.sort.parse().unwrap_or_else(|e| {
            log::warn!("Ignoring saved sort setting: {}", e);
            SortKey::default()
        })
    });
    let descending = if args.desc {
        true
    } else if args.asc {
        false
    } else {
        view.descending
    };
    let ownership = if args.owned {
        OwnershipFilter::OwnedOnly
    } else if args.not_owned {
        OwnershipFilter::NotOwnedOnly
    } else {
        OwnershipFilter::Any
    };

    QueryCriteria {
        search: args.search.clone().unwrap_or_default(),
        category: args.category.clone(),
        ownership,
        sort_key,
        direction: if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
        page: args.page,
        page_size: args.page_size.unwrap_or(view.page_size),
    }
}

pub(crate) fn run_list(catalog: &Catalog, view: &ViewSettings, args: ListArgs) -> Result<(), CliError> {
    let records = catalog.store.list()?;
    let criteria = criteria_from_args(&args, view);
    let page = derive_view(&records, &criteria);

    if args.json {
        let doc = serde_json::json!({
            "page": criteria.page,
            "totalPages": page.total_pages,
            "totalMatched": page.total_matched,
            "ownedValue": page.owned_value,
            "items": page.items,
        });
        let text = serde_json::to_string_pretty(&doc)
            .map_err(|e| CliError::other(format!("Failed to serialize list: {}", e)))?;
        println!("{}", text);
        return Ok(());
    }

    log::info!(
        "{}",
        format!(
            "Sets: {} matched of {} (page {} of {})",
            page.total_matched,
            records.len(),
            criteria.page,
            page.total_pages,
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if page.items.is_empty() {
        if page.total_matched == 0 {
            log::info!("  No sets match.");
        } else {
            log::info!("  No sets on this page.");
        }
    }
    for record in &page.items {
        let owned = if record.owned {
            format!(
                "{} x{}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                record.quantity_owned
            )
        } else {
            "  ".to_string()
        };
        log::info!("  {} {}", owned, record_line(record));
    }

    crate::log_blank();
    log::info!("  Owned value of matches: {}", format_money(page.owned_value));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_view_defaults_apply() {
        let view = ViewSettings {
            page_size: 10,
            sort: "year".to_string(),
            descending: true,
        };
        let args = ListArgs {
            page: 1,
            ..ListArgs::default()
        };
        let criteria = criteria_from_args(&args, &view);
        assert_eq!(criteria.page_size, 10);
        assert_eq!(criteria.sort_key, SortKey::ReleaseYear);
        assert_eq!(criteria.direction, SortDirection::Descending);
        assert_eq!(criteria.ownership, OwnershipFilter::Any);
    }

    #[test]
    fn test_flags_override_saved_view() {
        let view = ViewSettings {
            page_size: 10,
            sort: "nonsense".to_string(),
            descending: true,
        };
        let args = ListArgs {
            search: Some("castle".to_string()),
            not_owned: true,
            asc: true,
            page: 3,
            page_size: Some(0),
            ..ListArgs::default()
        };
        let criteria = criteria_from_args(&args, &view);
        assert_eq!(criteria.search, "castle");
        assert_eq!(criteria.sort_key, SortKey::Title);
        assert_eq!(criteria.direction, SortDirection::Ascending);
        assert_eq!(criteria.ownership, OwnershipFilter::NotOwnedOnly);
        assert_eq!(criteria.page, 3);
        assert_eq!(criteria.page_size, 0);
    }
}
