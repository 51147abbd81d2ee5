use brickshelf_catalog::*;
use brickshelf_transfer::*;
use chrono::NaiveDate;

const HEADER: &str = "primaryCode,alternateCode,title,owned,quantityOwned,releaseYear,\
description,category,partCount,subUnitCount,bricklinkUrl,rebrickableUrl,approximateValue,\
valueAsOfDate,conditionNotes,freeformNotes,imageReference,id,createdAt,updatedAt";

fn record(id: i64, code: &str, title: &str) -> InventoryRecord {
    InventoryRecord {
        id: RecordId(id),
        primary_code: code.to_string(),
        alternate_code: None,
        title: title.to_string(),
        owned: false,
        quantity_owned: 0,
        release_year: None,
        description: None,
        category: None,
        part_count: 0,
        sub_unit_count: 0,
        bricklink_url: None,
        rebrickable_url: None,
        approximate_value: None,
        value_as_of: None,
        condition_notes: None,
        notes: None,
        image_ref: None,
        created_at: "2024-01-01 10:00:00".to_string(),
        updated_at: "2024-01-02 11:00:00".to_string(),
    }
}

fn lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8(bytes.to_vec())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn empty_set_exports_header_only() {
    let out = export_records(&[]).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), format!("{HEADER}\n"));
}

#[test]
fn minimal_record_leaves_optionals_empty() {
    let out = export_records(&[record(7, "10276", "Colosseum")]).unwrap();
    let lines = lines(&out);
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        "10276,,Colosseum,false,0,,,,0,0,,,,,,,,7,2024-01-01 10:00:00,2024-01-02 11:00:00"
    );
}

#[test]
fn typed_values_use_canonical_text() {
    let mut r = record(1, "75192", "Millennium Falcon");
    r.owned = true;
    r.quantity_owned = 2;
    r.release_year = Some(2017);
    r.part_count = 7541;
    r.sub_unit_count = 8;
    r.approximate_value = Some(849.99);
    r.value_as_of = NaiveDate::from_ymd_opt(2024, 3, 5);

    let out = export_records(&[r]).unwrap();
    let lines = lines(&out);
    assert!(lines[1].starts_with("75192,,Millennium Falcon,true,2,2017,,,7541,8,,,849.99,2024-03-05,"));
}

#[test]
fn special_characters_are_quoted() {
    let mut r = record(1, "1", "Castle, Large");
    r.description = Some("He said \"hi\"\nthen left".to_string());

    let out = String::from_utf8(export_records(&[r]).unwrap()).unwrap();
    assert!(out.contains("\"Castle, Large\""));
    assert!(out.contains("\"He said \"\"hi\"\"\nthen left\""));
}

#[test]
fn rows_follow_caller_order() {
    let records = vec![record(3, "C", "Third"), record(1, "A", "First"), record(2, "B", "Second")];
    let out = export_records(&records).unwrap();
    let codes: Vec<String> = lines(&out)[1..]
        .iter()
        .map(|l| l.split(',').next().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["C", "A", "B"]);
}

#[test]
fn write_records_streams_to_writer() {
    let mut buf = Vec::new();
    write_records(&[record(1, "A", "One")], &mut buf).unwrap();
    assert_eq!(buf, export_records(&[record(1, "A", "One")]).unwrap());
}
