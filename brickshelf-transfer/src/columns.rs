//! Column definitions for the delimited transfer format.
//!
//! Each column maps to one persisted attribute of an inventory record. The
//! header names below are what export writes; import also accepts the labels
//! used by older exports (`Set Number`, `Series`, `Number of Parts`, ...).

use std::collections::HashMap;

use csv::StringRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    PrimaryCode,
    AlternateCode,
    Title,
    Owned,
    QuantityOwned,
    ReleaseYear,
    Description,
    Category,
    PartCount,
    SubUnitCount,
    BricklinkUrl,
    RebrickableUrl,
    ApproximateValue,
    ValueAsOfDate,
    ConditionNotes,
    FreeformNotes,
    ImageReference,
    Id,
    CreatedAt,
    UpdatedAt,
}

impl Column {
    /// Every column in export order.
    pub const ALL: [Column; 20] = [
        Column::PrimaryCode,
        Column::AlternateCode,
        Column::Title,
        Column::Owned,
        Column::QuantityOwned,
        Column::ReleaseYear,
        Column::Description,
        Column::Category,
        Column::PartCount,
        Column::SubUnitCount,
        Column::BricklinkUrl,
        Column::RebrickableUrl,
        Column::ApproximateValue,
        Column::ValueAsOfDate,
        Column::ConditionNotes,
        Column::FreeformNotes,
        Column::ImageReference,
        Column::Id,
        Column::CreatedAt,
        Column::UpdatedAt,
    ];

    /// Columns that must be present in an import header.
    pub const REQUIRED: [Column; 2] = [Column::PrimaryCode, Column::Title];

    /// Header name written on export.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PrimaryCode => "primaryCode",
            Self::AlternateCode => "alternateCode",
            Self::Title => "title",
            Self::Owned => "owned",
            Self::QuantityOwned => "quantityOwned",
            Self::ReleaseYear => "releaseYear",
            Self::Description => "description",
            Self::Category => "category",
            Self::PartCount => "partCount",
            Self::SubUnitCount => "subUnitCount",
            Self::BricklinkUrl => "bricklinkUrl",
            Self::RebrickableUrl => "rebrickableUrl",
            Self::ApproximateValue => "approximateValue",
            Self::ValueAsOfDate => "valueAsOfDate",
            Self::ConditionNotes => "conditionNotes",
            Self::FreeformNotes => "freeformNotes",
            Self::ImageReference => "imageReference",
            Self::Id => "id",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Alternative labels, already in [`normalize_header`] form.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::PrimaryCode => &["setnumber", "code", "number"],
            Self::AlternateCode => &["alternatesetnumber", "altcode"],
            Self::Title => &["name"],
            Self::Owned => &[],
            Self::QuantityOwned => &["quantity", "qty"],
            Self::ReleaseYear => &["year"],
            Self::Description => &[],
            Self::Category => &["series", "theme"],
            Self::PartCount => &["numberofparts", "numparts", "parts", "pieces"],
            Self::SubUnitCount => &["numberofminifigs", "numminifigs", "minifigs"],
            Self::BricklinkUrl => &["bricklink"],
            Self::RebrickableUrl => &["rebrickable"],
            Self::ApproximateValue => &["value"],
            Self::ValueAsOfDate => &["valuelastupdated", "valueasof"],
            Self::ConditionNotes => &["conditiondescription", "condition"],
            Self::FreeformNotes => &["notes"],
            Self::ImageReference => &["imagefilename", "image"],
            Self::Id => &[],
            Self::CreatedAt => &[],
            Self::UpdatedAt => &[],
        }
    }

    /// Assigned by the record store; ignored on import.
    pub fn is_store_assigned(&self) -> bool {
        matches!(self, Self::Id | Self::CreatedAt | Self::UpdatedAt)
    }

    /// Match a header cell to a column, tolerating case, spacing, and
    /// separator differences.
    pub fn from_header(header: &str) -> Option<Column> {
        let normalized = normalize_header(header);
        if normalized.is_empty() {
            return None;
        }
        Column::ALL.into_iter().find(|c| {
            normalize_header(c.name()) == normalized || c.aliases().contains(&normalized.as_str())
        })
    }
}

/// Lowercase and drop everything but letters and digits.
pub fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Column positions discovered from an import header row.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    positions: HashMap<Column, usize>,
}

impl HeaderMap {
    /// Map each recognized header cell to its position. Unknown and
    /// store-assigned cells are ignored; the first occurrence of a repeated
    /// column wins.
    pub fn from_record(header: &StringRecord) -> Self {
        let mut positions = HashMap::new();
        for (i, cell) in header.iter().enumerate() {
            match Column::from_header(cell) {
                Some(column) if column.is_store_assigned() => {
                    log::debug!("Ignoring store-assigned column '{}'", cell)
                }
                Some(column) => {
                    positions.entry(column).or_insert(i);
                }
                None => log::debug!("Ignoring unknown column '{}'", cell),
            }
        }
        Self { positions }
    }

    pub fn contains(&self, column: Column) -> bool {
        self.positions.contains_key(&column)
    }

    /// Required columns absent from the header, by export name.
    pub fn missing_required(&self) -> Vec<&'static str> {
        Column::REQUIRED
            .into_iter()
            .filter(|c| !self.contains(*c))
            .map(|c| c.name())
            .collect()
    }

    /// The raw cell for `column`, if the column exists and the row reaches it.
    pub fn get<'r>(&self, row: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.positions.get(&column).and_then(|&i| row.get(i))
    }

    /// Like [`get`](Self::get) but treats an empty cell as absent.
    pub fn non_empty<'r>(&self, row: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.get(row, column).filter(|s| !s.is_empty())
    }
}
