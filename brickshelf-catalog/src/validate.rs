//! Field validation applied before any store mutation.

use thiserror::Error;

use crate::types::{LinkKind, RecordFields};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("{} URL must contain \"{}\" (got '{url}')", .kind.label(), .kind.required_host())]
    InvalidLink { kind: LinkKind, url: String },
    #[error("approximate value must be a non-negative number")]
    NegativeValue,
    #[error("release year must be a positive year")]
    InvalidReleaseYear,
}

impl RecordFields {
    /// Check required fields, link host constraints, and numeric ranges.
    ///
    /// Returns the first violation found, checking required fields first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.primary_code.trim().is_empty() {
            return Err(ValidationError::MissingField("primaryCode"));
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        for kind in LinkKind::ALL {
            if let Some(url) = self.link(kind).filter(|u| !u.trim().is_empty()) {
                if !kind.accepts(url) {
                    return Err(ValidationError::InvalidLink {
                        kind,
                        url: url.to_string(),
                    });
                }
            }
        }
        if let Some(value) = self.approximate_value {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::NegativeValue);
            }
        }
        if self.release_year == Some(0) {
            return Err(ValidationError::InvalidReleaseYear);
        }
        Ok(())
    }
}
