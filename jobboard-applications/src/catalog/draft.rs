//! Listing forms
//!
//! `ListingDraft` is what a form submits; `ListingFields` is the validated
//! shape create and update accept.

use crate::{ApplicationError, ApplicationResult};
use jobboard_core::{EmploymentKind, SalaryRange};
use serde::{Deserialize, Serialize};

/// Raw listing form input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    pub location: String,
    /// Employment kind as text, e.g. `full-time`
    pub kind: String,
    pub salary_min: String,
    pub salary_max: String,
    /// Currency symbol; the catalog default applies when absent
    pub currency: Option<String>,
    pub description: String,
    /// Comma-separated requirements
    pub requirements: String,
    /// Comma-separated benefits
    pub benefits: String,
}

/// Validated listing fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFields {
    pub title: String,
    pub location: String,
    pub kind: EmploymentKind,
    pub salary: SalaryRange,
    pub description: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
}

impl ListingDraft {
    pub fn validate(&self, default_currency: &str) -> ApplicationResult<ListingFields> {
        let kind = self.kind.parse::<EmploymentKind>().map_err(|_| {
            ApplicationError::invalid_field(
                "type",
                format!(
                    "'{}' is not one of full-time, part-time, contract, freelance",
                    self.kind
                ),
            )
        })?;

        let currency = self
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(default_currency);

        let fields = ListingFields {
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            kind,
            salary: SalaryRange {
                min: parse_amount("salary minimum", &self.salary_min)?,
                max: parse_amount("salary maximum", &self.salary_max)?,
                currency: currency.to_string(),
            },
            description: self.description.trim().to_string(),
            requirements: split_list(&self.requirements),
            benefits: split_list(&self.benefits),
        };

        fields.check()?;
        Ok(fields)
    }
}

impl ListingFields {
    /// Check field rules; applied by the catalog before every write
    pub fn check(&self) -> ApplicationResult<()> {
        require_text("title", &self.title)?;
        require_text("location", &self.location)?;
        require_text("description", &self.description)?;

        if !self.salary.is_ordered() {
            return Err(ApplicationError::InvalidRange {
                min: self.salary.min,
                max: self.salary.max,
            });
        }

        Ok(())
    }
}

fn require_text(field: &'static str, value: &str) -> ApplicationResult<()> {
    if value.trim().is_empty() {
        Err(ApplicationError::invalid_field(field, "must not be empty"))
    } else {
        Ok(())
    }
}

fn parse_amount(field: &'static str, raw: &str) -> ApplicationResult<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        ApplicationError::invalid_field(field, format!("'{}' is not a whole number", raw))
    })
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
