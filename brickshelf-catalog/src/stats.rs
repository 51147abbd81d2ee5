//! Aggregate statistics over the owned part of a collection.

use serde::Serialize;

use crate::query::owned_total_value;
use crate::types::InventoryRecord;

/// Collection-wide totals plus a few notable owned records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats<'a> {
    pub total_records: usize,
    pub owned_records: usize,
    /// Parts across owned records, multiplied by quantity.
    pub total_parts: u64,
    /// Minifigures across owned records, multiplied by quantity.
    pub total_sub_units: u64,
    pub total_value: f64,
    /// `total_value / owned_records`, zero when nothing is owned.
    pub average_value: f64,
    pub most_valuable: Option<&'a InventoryRecord>,
    pub largest: Option<&'a InventoryRecord>,
    pub oldest: Option<&'a InventoryRecord>,
    pub newest: Option<&'a InventoryRecord>,
}

impl<'a> CollectionStats<'a> {
    pub fn compute(records: &'a [InventoryRecord]) -> Self {
        let owned: Vec<&InventoryRecord> = records.iter().filter(|r| r.owned).collect();

        let total_value = owned_total_value(owned.iter().copied());
        let average_value = if owned.is_empty() {
            0.0
        } else {
            total_value / owned.len() as f64
        };

        // max_by_key keeps the last maximum; reverse first so ties go to the
        // earliest record.
        let most_valuable = owned
            .iter()
            .copied()
            .filter(|r| r.approximate_value.is_some())
            .rev()
            .max_by(|a, b| {
                a.approximate_value
                    .unwrap_or(0.0)
                    .total_cmp(&b.approximate_value.unwrap_or(0.0))
            });
        let largest = owned.iter().copied().rev().max_by_key(|r| r.part_count);
        let oldest = owned
            .iter()
            .copied()
            .filter(|r| r.release_year.is_some())
            .min_by_key(|r| r.release_year);
        let newest = owned
            .iter()
            .copied()
            .filter(|r| r.release_year.is_some())
            .rev()
            .max_by_key(|r| r.release_year);

        Self {
            total_records: records.len(),
            owned_records: owned.len(),
            total_parts: owned
                .iter()
                .map(|r| u64::from(r.part_count) * u64::from(r.quantity_owned))
                .sum(),
            total_sub_units: owned
                .iter()
                .map(|r| u64::from(r.sub_unit_count) * u64::from(r.quantity_owned))
                .sum(),
            total_value,
            average_value,
            most_valuable,
            largest,
            oldest,
            newest,
        }
    }
}
