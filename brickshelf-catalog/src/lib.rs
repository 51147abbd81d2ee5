//! Inventory catalog data model, validation, and the query engine.
//!
//! This crate defines the record schema and the [`RecordStore`] contract
//! without any database dependencies. `brickshelf-db` provides a SQLite
//! implementation; `brickshelf-transfer` builds bulk CSV import/export on
//! top of the trait.

pub mod query;
pub mod stats;
pub mod store;
pub mod types;
pub mod validate;

pub use query::{
    CatalogView, CriteriaParseError, DEFAULT_PAGE_SIZE, OwnershipFilter, QueryCriteria,
    SortDirection, SortKey, derive_view, distinct_categories, filter_records, owned_total_value,
    page_count, sort_records,
};
pub use stats::CollectionStats;
pub use store::{RecordStore, StoreError};
pub use types::*;
pub use validate::ValidationError;
