use brickshelf_catalog::*;

fn owned_record(id: i64, code: &str, value: Option<f64>, qty: u32) -> InventoryRecord {
    InventoryRecord {
        id: RecordId(id),
        primary_code: code.to_string(),
        alternate_code: None,
        title: format!("Set {code}"),
        owned: true,
        quantity_owned: qty,
        release_year: None,
        description: None,
        category: None,
        part_count: 0,
        sub_unit_count: 0,
        bricklink_url: None,
        rebrickable_url: None,
        approximate_value: value,
        value_as_of: None,
        condition_notes: None,
        notes: None,
        image_ref: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[test]
fn empty_collection() {
    let stats = CollectionStats::compute(&[]);
    assert_eq!(stats.total_records, 0);
    assert_eq!(stats.owned_records, 0);
    assert_eq!(stats.total_value, 0.0);
    assert_eq!(stats.average_value, 0.0);
    assert!(stats.most_valuable.is_none());
    assert!(stats.oldest.is_none());
}

#[test]
fn totals_only_count_owned_records() {
    let mut a = owned_record(1, "A", Some(10.0), 2);
    a.part_count = 100;
    a.sub_unit_count = 3;
    let mut b = owned_record(2, "B", Some(5.0), 0);
    b.owned = false;
    b.part_count = 1000;
    let mut c = owned_record(3, "C", None, 1);
    c.part_count = 50;

    let records = vec![a, b, c];
    let stats = CollectionStats::compute(&records);
    assert_eq!(stats.total_records, 3);
    assert_eq!(stats.owned_records, 2);
    assert_eq!(stats.total_parts, 250);
    assert_eq!(stats.total_sub_units, 6);
    assert_eq!(stats.total_value, 20.0);
    assert_eq!(stats.average_value, 10.0);
}

#[test]
fn notable_records() {
    let mut a = owned_record(1, "A", Some(10.0), 1);
    a.release_year = Some(2001);
    a.part_count = 300;
    let mut b = owned_record(2, "B", Some(99.0), 1);
    b.release_year = Some(1999);
    b.part_count = 300;
    let mut c = owned_record(3, "C", Some(500.0), 1);
    c.owned = false;
    c.release_year = Some(1970);
    let mut d = owned_record(4, "D", None, 1);
    d.release_year = Some(2024);

    let records = vec![a, b, c, d];
    let stats = CollectionStats::compute(&records);
    assert_eq!(stats.most_valuable.map(|r| r.primary_code.as_str()), Some("B"));
    // Ties on part count go to the earliest record.
    assert_eq!(stats.largest.map(|r| r.primary_code.as_str()), Some("A"));
    assert_eq!(stats.oldest.map(|r| r.primary_code.as_str()), Some("B"));
    assert_eq!(stats.newest.map(|r| r.primary_code.as_str()), Some("D"));
}
