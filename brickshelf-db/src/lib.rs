//! SQLite persistence layer for the inventory catalog.
//!
//! Provides schema creation, CRUD operations, read queries, and
//! [`SqliteStore`], the SQLite-backed [`RecordStore`](brickshelf_catalog::RecordStore).

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;

pub use operations::{
    OperationError, delete_record, insert_record, set_image_ref, update_record,
};
pub use queries::{count_records, find_record_by_code, get_record, list_categories, list_records};
pub use schema::{SchemaError, open_database, open_memory};
pub use store::SqliteStore;
