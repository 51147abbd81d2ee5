use std::cell::RefCell;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use brickshelf_catalog::*;
use brickshelf_db::SqliteStore;
use brickshelf_transfer::*;
use chrono::NaiveDate;

fn run(payload: &str, store: &dyn RecordStore) -> TransferOutcome {
    let existing = store.list().unwrap();
    import_records(payload.as_bytes(), &existing, store, &ImportOptions::default()).unwrap()
}

fn sample_fields() -> Vec<RecordFields> {
    let mut colosseum = RecordFields::new("10276", "Colosseum");
    colosseum.owned = true;
    colosseum.quantity_owned = 1;
    colosseum.release_year = Some(2020);
    colosseum.description = Some("Roman \"Colosseum\", with arena\nand stands".to_string());
    colosseum.category = Some("Creator Expert".to_string());
    colosseum.part_count = 9036;
    colosseum.bricklink_url =
        Some("https://www.bricklink.com/v2/catalog/catalogitem.page?S=10276-1".to_string());
    colosseum.rebrickable_url = Some("https://rebrickable.com/sets/10276-1/".to_string());
    colosseum.approximate_value = Some(549.99);
    colosseum.value_as_of = NaiveDate::from_ymd_opt(2024, 1, 15);
    colosseum.condition_notes = Some("Sealed".to_string());
    colosseum.notes = Some("Awesome set!".to_string());
    colosseum.image_ref = Some("1_10276.jpg".to_string());

    let mut falcon = RecordFields::new("75192", "Millennium Falcon");
    falcon.alternate_code = Some("75192-1".to_string());
    falcon.category = Some("Star Wars".to_string());
    falcon.part_count = 7541;
    falcon.sub_unit_count = 8;
    falcon.approximate_value = Some(0.1);

    let castle = RecordFields::new("6080", "King's Castle");

    vec![colosseum, falcon, castle]
}

fn populated_store() -> SqliteStore {
    let store = SqliteStore::open_memory().unwrap();
    for fields in sample_fields() {
        store.create(&fields).unwrap();
    }
    store
}

#[test]
fn export_then_import_into_empty_store_preserves_fields() {
    let source = populated_store();
    let payload = export_records(&source.list().unwrap()).unwrap();

    let target = SqliteStore::open_memory().unwrap();
    let outcome =
        import_records(&payload, &[], &target, &ImportOptions::default()).unwrap();

    assert_eq!(outcome.imported, 3);
    assert_eq!(outcome.skipped, 0);
    assert!(outcome.errors.is_empty());
    assert!(outcome.is_clean());

    let imported: Vec<RecordFields> = target.list().unwrap().iter().map(|r| r.fields()).collect();
    assert_eq!(imported, sample_fields());
}

#[test]
fn padded_text_survives_a_round_trip() {
    let source = SqliteStore::open_memory().unwrap();
    let mut fields = RecordFields::new(" 10276 ", "  Colosseum  ");
    fields.image_ref = Some(" img.jpg".to_string());
    fields.category = Some(" Creator Expert ".to_string());
    source.create(&fields).unwrap();

    let payload = export_records(&source.list().unwrap()).unwrap();
    let target = SqliteStore::open_memory().unwrap();
    let outcome = import_records(&payload, &[], &target, &ImportOptions::default()).unwrap();
    assert!(outcome.is_clean(), "{:?}", outcome.errors);

    let original = source.list().unwrap()[0].fields();
    assert_eq!(original.title, "Colosseum");
    assert_eq!(original.image_ref.as_deref(), Some("img.jpg"));
    assert_eq!(target.list().unwrap()[0].fields(), original);
}

#[test]
fn reimport_into_populated_store_skips_everything() {
    let store = populated_store();
    let existing = store.list().unwrap();
    let payload = export_records(&existing).unwrap();

    let outcome = import_records(&payload, &existing, &store, &ImportOptions::default()).unwrap();
    assert_eq!(outcome.imported, 0);
    assert_eq!(outcome.skipped, 3);
    assert!(outcome.errors.is_empty());
    assert_eq!(store.list().unwrap().len(), 3);
}

#[test]
fn missing_title_is_a_row_error_and_processing_continues() {
    let store = SqliteStore::open_memory().unwrap();
    let outcome = run("primaryCode,title\n1,Alpha\n2,\n3,Gamma\n", &store);

    assert_eq!(outcome.imported, 2);
    assert_eq!(outcome.errors, vec!["Row 3: missing required field 'title'"]);
    let codes: Vec<String> = store.list().unwrap().into_iter().map(|r| r.primary_code).collect();
    assert_eq!(codes, vec!["1", "3"]);
}

#[test]
fn invalid_link_is_a_row_error() {
    let store = SqliteStore::open_memory().unwrap();
    let outcome = run(
        "primaryCode,title,bricklinkUrl\n1,Alpha,https://example.com/1\n2,Beta,https://BrickLink.com/2\n",
        &store,
    );

    assert_eq!(outcome.imported, 1);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("Row 2: Bricklink URL must contain"));
}

#[test]
fn missing_required_column_fails_before_any_create() {
    let store = SqliteStore::open_memory().unwrap();
    let err = import_records(
        b"primaryCode,description\n1,Something\n",
        &[],
        &store,
        &ImportOptions::default(),
    )
    .unwrap_err();

    match err {
        TransferError::MissingColumns(cols) => assert_eq!(cols, vec!["title"]),
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn empty_payload_has_no_header() {
    let store = SqliteStore::open_memory().unwrap();
    let err = import_records(b"", &[], &store, &ImportOptions::default()).unwrap_err();
    assert!(matches!(err, TransferError::MissingHeader));
}

#[test]
fn duplicates_within_payload_are_skipped() {
    let store = SqliteStore::open_memory().unwrap();
    let outcome = run("primaryCode,title\n1,Alpha\n1,Alpha again\n2,Beta\n", &store);

    assert_eq!(outcome.imported, 2);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(store.get(store.list().unwrap()[0].id).unwrap().title, "Alpha");
}

#[test]
fn duplicate_check_compares_trimmed_codes() {
    let store = populated_store();
    let outcome = run("primaryCode,title\n\" 10276 \",Colosseum copy\n", &store);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.imported, 0);
}

#[test]
fn alternate_code_collision_is_not_a_duplicate() {
    let store = populated_store();
    let outcome = run("primaryCode,title\n75192-1,Falcon variant\n", &store);
    assert_eq!(outcome.imported, 1);
}

#[test]
fn legacy_headers_import() {
    let store = SqliteStore::open_memory().unwrap();
    let payload = "Set Number,Name,Series,Number of Parts,Number of Minifigs,Owned,Quantity,\
Value,Value Last Updated,Notes,Condition Description,Bricklink URL\n\
10276,Colosseum,Creator Expert,9036,0,Yes,1,549.99,2024-01-15T10:00:00Z,Awesome,Sealed,\
https://www.bricklink.com/v2/catalog/catalogitem.page?S=10276-1\n";
    let outcome = run(payload, &store);
    assert!(outcome.is_clean(), "{:?}", outcome.errors);
    assert_eq!(outcome.imported, 1);

    let record = &store.list().unwrap()[0];
    assert_eq!(record.primary_code, "10276");
    assert_eq!(record.title, "Colosseum");
    assert_eq!(record.category.as_deref(), Some("Creator Expert"));
    assert_eq!(record.part_count, 9036);
    assert!(record.owned);
    assert_eq!(record.quantity_owned, 1);
    assert_eq!(record.approximate_value, Some(549.99));
    assert_eq!(record.value_as_of, NaiveDate::from_ymd_opt(2024, 1, 15));
    assert_eq!(record.notes.as_deref(), Some("Awesome"));
    assert_eq!(record.condition_notes.as_deref(), Some("Sealed"));
}

#[test]
fn unknown_and_store_assigned_columns_are_ignored() {
    let store = SqliteStore::open_memory().unwrap();
    let outcome = run(
        "id,primaryCode,colour,title,createdAt\n99,1,red,Alpha,1999-01-01 00:00:00\n",
        &store,
    );
    assert_eq!(outcome.imported, 1);
    let record = &store.list().unwrap()[0];
    assert_ne!(record.id, RecordId(99));
    assert_ne!(record.created_at, "1999-01-01 00:00:00");
}

#[test]
fn unparseable_values_become_absent() {
    let store = SqliteStore::open_memory().unwrap();
    let outcome = run(
        "primaryCode,title,partCount,releaseYear,approximateValue,valueAsOfDate,owned\n\
         1,Alpha,lots,0,-5,someday,perhaps\n",
        &store,
    );
    assert!(outcome.is_clean(), "{:?}", outcome.errors);

    let record = &store.list().unwrap()[0];
    assert_eq!(record.part_count, 0);
    assert_eq!(record.release_year, None);
    assert_eq!(record.approximate_value, None);
    assert_eq!(record.value_as_of, None);
    assert!(!record.owned);
}

#[test]
fn crlf_line_endings_are_accepted() {
    let store = SqliteStore::open_memory().unwrap();
    let outcome = run("primaryCode,title\r\n1,Alpha\r\n2,Beta\r\n", &store);
    assert_eq!(outcome.imported, 2);
    let titles: Vec<String> = store.list().unwrap().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);
}

#[test]
fn blank_rows_are_ignored_but_numbered() {
    let store = SqliteStore::open_memory().unwrap();
    let outcome = run("primaryCode,title\n1,Alpha\n,\n2,\n", &store);
    assert_eq!(outcome.imported, 1);
    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.errors, vec!["Row 4: missing required field 'title'"]);
}

#[test]
fn empty_lines_count_toward_row_numbers() {
    let store = SqliteStore::open_memory().unwrap();
    let outcome = run("primaryCode,title\n1,Alpha\n\n2,\n", &store);
    assert_eq!(outcome.imported, 1);
    assert_eq!(outcome.errors, vec!["Row 4: missing required field 'title'"]);
}

#[test]
fn row_numbers_follow_multiline_fields() {
    let store = SqliteStore::open_memory().unwrap();
    let outcome = run(
        "primaryCode,title,description\n1,Alpha,\"first\nsecond\nthird\"\n2,,none\n",
        &store,
    );
    assert_eq!(outcome.imported, 1);
    assert_eq!(outcome.errors, vec!["Row 5: missing required field 'title'"]);
}

#[test]
fn short_rows_are_tolerated() {
    let store = SqliteStore::open_memory().unwrap();
    let outcome = run("primaryCode,title,category\n1,Alpha\n", &store);
    assert_eq!(outcome.imported, 1);
    assert_eq!(store.list().unwrap()[0].category, None);
}

// ── Store failures and cancellation ─────────────────────────────────────────

/// Delegates to SQLite but refuses one primary code.
struct FailingStore {
    inner: SqliteStore,
    reject: &'static str,
}

impl RecordStore for FailingStore {
    fn list(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        self.inner.list()
    }
    fn get(&self, id: RecordId) -> Result<InventoryRecord, StoreError> {
        self.inner.get(id)
    }
    fn create(&self, fields: &RecordFields) -> Result<InventoryRecord, StoreError> {
        if fields.primary_code == self.reject {
            return Err(StoreError::backend("connection reset"));
        }
        self.inner.create(fields)
    }
    fn update(&self, id: RecordId, changes: &RecordChanges) -> Result<InventoryRecord, StoreError> {
        self.inner.update(id, changes)
    }
    fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        self.inner.delete(id)
    }
    fn list_categories(&self) -> Result<BTreeSet<String>, StoreError> {
        self.inner.list_categories()
    }
    fn attach_image(&self, id: RecordId, image_ref: Option<&str>) -> Result<InventoryRecord, StoreError> {
        self.inner.attach_image(id, image_ref)
    }
}

#[test]
fn store_failure_is_attributed_to_its_row() {
    let store = FailingStore {
        inner: SqliteStore::open_memory().unwrap(),
        reject: "BAD",
    };
    let outcome = run("primaryCode,title\n1,Alpha\nBAD,Broken\n3,Gamma\n", &store);

    assert_eq!(outcome.imported, 2);
    assert_eq!(outcome.errors, vec!["Row 3 (BAD): connection reset"]);
}

#[test]
fn failed_row_does_not_mark_code_as_seen() {
    let store = FailingStore {
        inner: SqliteStore::open_memory().unwrap(),
        reject: "BAD",
    };
    let outcome = run("primaryCode,title\nBAD,First\nBAD,Second\n", &store);
    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.errors.len(), 2);
}

#[test]
fn cancellation_stops_submissions() {
    let store = SqliteStore::open_memory().unwrap();
    let cancel = Arc::new(AtomicBool::new(false));

    struct CancelAfterFirst(Arc<AtomicBool>);
    impl TransferProgress for CancelAfterFirst {
        fn on_row(&self, _current: usize, _total: usize, _key: &str) {
            self.0.store(true, Ordering::Relaxed);
        }
        fn on_complete(&self, _outcome: &TransferOutcome) {}
    }
    let progress = CancelAfterFirst(cancel.clone());

    let options = ImportOptions {
        cancel: Some(cancel.clone()),
        progress: Some(&progress),
    };
    let outcome = import_records(
        b"primaryCode,title\n1,Alpha\n2,Beta\n3,Gamma\n",
        &[],
        &store,
        &options,
    )
    .unwrap();

    assert!(outcome.cancelled);
    assert!(!outcome.is_clean());
    assert_eq!(outcome.imported, 1);
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn progress_sees_every_row_and_completion() {
    #[derive(Default)]
    struct Recorder {
        rows: RefCell<Vec<(usize, usize, String)>>,
        completed: RefCell<Option<TransferOutcome>>,
    }
    impl TransferProgress for Recorder {
        fn on_row(&self, current: usize, total: usize, key: &str) {
            self.rows.borrow_mut().push((current, total, key.to_string()));
        }
        fn on_complete(&self, outcome: &TransferOutcome) {
            *self.completed.borrow_mut() = Some(outcome.clone());
        }
    }

    let store = SqliteStore::open_memory().unwrap();
    let recorder = Recorder::default();
    let options = ImportOptions {
        cancel: None,
        progress: Some(&recorder),
    };
    let outcome =
        import_records(b"primaryCode,title\nA,Alpha\nB,Beta\n", &[], &store, &options).unwrap();

    assert_eq!(
        *recorder.rows.borrow(),
        vec![(1, 2, "A".to_string()), (2, 2, "B".to_string())]
    );
    assert_eq!(recorder.completed.borrow().as_ref(), Some(&outcome));
}

#[test]
fn bundled_progress_reporters_do_not_change_the_outcome() {
    let payload = b"primaryCode,title\nA,Alpha\nB,Beta\n";

    let silent_store = SqliteStore::open_memory().unwrap();
    let silent = SilentProgress;
    let silent_outcome = import_records(
        payload,
        &[],
        &silent_store,
        &ImportOptions {
            cancel: None,
            progress: Some(&silent),
        },
    )
    .unwrap();

    let logged_store = SqliteStore::open_memory().unwrap();
    let logged = LogProgress;
    let logged_outcome = import_records(
        payload,
        &[],
        &logged_store,
        &ImportOptions {
            cancel: Some(Arc::new(AtomicBool::new(false))),
            progress: Some(&logged),
        },
    )
    .unwrap();

    assert_eq!(silent_outcome, logged_outcome);
    assert_eq!(silent_outcome.imported, 2);
}
