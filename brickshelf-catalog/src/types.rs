//! Data model types for the inventory catalog.
//!
//! These types represent the persistent record schema and the attribute sets
//! callers hand to a record store for creation and partial updates.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Identity ────────────────────────────────────────────────────────────────

/// Opaque, stable identifier assigned by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecordId)
    }
}

// ── External Links ──────────────────────────────────────────────────────────

/// Kinds of external reference links a record may carry.
///
/// Each kind requires its URL to mention a specific host name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Bricklink,
    Rebrickable,
}

impl LinkKind {
    pub const ALL: [LinkKind; 2] = [LinkKind::Bricklink, LinkKind::Rebrickable];

    /// Host-name substring every URL of this kind must contain.
    pub fn required_host(&self) -> &'static str {
        match self {
            Self::Bricklink => "bricklink.com",
            Self::Rebrickable => "rebrickable.com",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bricklink => "Bricklink",
            Self::Rebrickable => "Rebrickable",
        }
    }

    /// Whether `url` satisfies this kind's host constraint.
    pub fn accepts(&self, url: &str) -> bool {
        url.to_lowercase().contains(self.required_host())
    }
}

// ── Record ──────────────────────────────────────────────────────────────────

/// A single catalog entry: one collectible set and the user's ownership of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: RecordId,
    /// Canonical catalog number, e.g. "10276".
    pub primary_code: String,
    pub alternate_code: Option<String>,
    pub title: String,
    pub owned: bool,
    /// Only meaningful when `owned` is true; not forced to zero otherwise.
    pub quantity_owned: u32,
    pub release_year: Option<u32>,
    pub description: Option<String>,
    /// Series/theme the set belongs to.
    pub category: Option<String>,
    pub part_count: u32,
    /// Minifigure count.
    pub sub_unit_count: u32,
    pub bricklink_url: Option<String>,
    pub rebrickable_url: Option<String>,
    pub approximate_value: Option<f64>,
    pub value_as_of: Option<NaiveDate>,
    pub condition_notes: Option<String>,
    pub notes: Option<String>,
    /// Filename inside the image library, if an image was attached.
    pub image_ref: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl InventoryRecord {
    /// URL stored for the given link kind.
    pub fn link(&self, kind: LinkKind) -> Option<&str> {
        match kind {
            LinkKind::Bricklink => self.bricklink_url.as_deref(),
            LinkKind::Rebrickable => self.rebrickable_url.as_deref(),
        }
    }

    /// Value contribution of this record: `approximate_value * quantity_owned`
    /// when owned, zero otherwise.
    pub fn owned_value(&self) -> f64 {
        if self.owned {
            self.approximate_value.unwrap_or(0.0) * f64::from(self.quantity_owned)
        } else {
            0.0
        }
    }

    /// The caller-controlled attributes of this record.
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            primary_code: self.primary_code.clone(),
            alternate_code: self.alternate_code.clone(),
            title: self.title.clone(),
            owned: self.owned,
            quantity_owned: self.quantity_owned,
            release_year: self.release_year,
            description: self.description.clone(),
            category: self.category.clone(),
            part_count: self.part_count,
            sub_unit_count: self.sub_unit_count,
            bricklink_url: self.bricklink_url.clone(),
            rebrickable_url: self.rebrickable_url.clone(),
            approximate_value: self.approximate_value,
            value_as_of: self.value_as_of,
            condition_notes: self.condition_notes.clone(),
            notes: self.notes.clone(),
            image_ref: self.image_ref.clone(),
        }
    }
}

// ── Create / Update Payloads ────────────────────────────────────────────────

/// Attributes supplied when creating a record. The store assigns the id and
/// timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordFields {
    pub primary_code: String,
    pub alternate_code: Option<String>,
    pub title: String,
    pub owned: bool,
    pub quantity_owned: u32,
    pub release_year: Option<u32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub part_count: u32,
    pub sub_unit_count: u32,
    pub bricklink_url: Option<String>,
    pub rebrickable_url: Option<String>,
    pub approximate_value: Option<f64>,
    pub value_as_of: Option<NaiveDate>,
    pub condition_notes: Option<String>,
    pub notes: Option<String>,
    pub image_ref: Option<String>,
}

impl RecordFields {
    pub fn new(primary_code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            primary_code: primary_code.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// URL stored for the given link kind.
    pub fn link(&self, kind: LinkKind) -> Option<&str> {
        match kind {
            LinkKind::Bricklink => self.bricklink_url.as_deref(),
            LinkKind::Rebrickable => self.rebrickable_url.as_deref(),
        }
    }

    /// Trim identifiers, title, links, and the image reference, then collapse
    /// blank optional text to `None`.
    pub fn normalized(mut self) -> Self {
        for text in [&mut self.primary_code, &mut self.title] {
            *text = text.trim().to_string();
        }
        for value in [
            &mut self.alternate_code,
            &mut self.bricklink_url,
            &mut self.rebrickable_url,
            &mut self.image_ref,
        ]
        .into_iter()
        .flatten()
        {
            *value = value.trim().to_string();
        }
        for field in [
            &mut self.alternate_code,
            &mut self.description,
            &mut self.category,
            &mut self.bricklink_url,
            &mut self.rebrickable_url,
            &mut self.condition_notes,
            &mut self.notes,
            &mut self.image_ref,
        ] {
            if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }
}

/// A partial update. `None` leaves the attribute unchanged; for optional text
/// attributes, `Some("")` clears the stored value. Optional numbers and the
/// value date use `Some(None)` to clear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordChanges {
    pub primary_code: Option<String>,
    pub alternate_code: Option<String>,
    pub title: Option<String>,
    pub owned: Option<bool>,
    pub quantity_owned: Option<u32>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub release_year: Option<Option<u32>>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub part_count: Option<u32>,
    pub sub_unit_count: Option<u32>,
    pub bricklink_url: Option<String>,
    pub rebrickable_url: Option<String>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub approximate_value: Option<Option<f64>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub value_as_of: Option<Option<NaiveDate>>,
    pub condition_notes: Option<String>,
    pub notes: Option<String>,
}

/// A field that is present in the input, even as `null`, becomes `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl RecordChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply these changes on top of `fields`, returning the merged set.
    pub fn apply_to(&self, mut fields: RecordFields) -> RecordFields {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }
        fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }

        set(&mut fields.primary_code, &self.primary_code);
        set_opt(&mut fields.alternate_code, &self.alternate_code);
        set(&mut fields.title, &self.title);
        set(&mut fields.owned, &self.owned);
        set(&mut fields.quantity_owned, &self.quantity_owned);
        set(&mut fields.release_year, &self.release_year);
        set_opt(&mut fields.description, &self.description);
        set_opt(&mut fields.category, &self.category);
        set(&mut fields.part_count, &self.part_count);
        set(&mut fields.sub_unit_count, &self.sub_unit_count);
        set_opt(&mut fields.bricklink_url, &self.bricklink_url);
        set_opt(&mut fields.rebrickable_url, &self.rebrickable_url);
        set(&mut fields.approximate_value, &self.approximate_value);
        set(&mut fields.value_as_of, &self.value_as_of);
        set_opt(&mut fields.condition_notes, &self.condition_notes);
        set_opt(&mut fields.notes, &self.notes);

        fields.normalized()
    }
}
