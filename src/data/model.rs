use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

/// Sentinel dropdown value meaning "no site filter".
pub const ALL_SITES: &str = "ALL";
/// Display label for the aggregate dropdown option.
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// Errors raised while building the table
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset has no rows")]
    Empty,
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: class value {value} is not 0 or 1")]
    BadClass { row: usize, value: i64 },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Outcome – the binary "class" column
// ---------------------------------------------------------------------------

/// Landing outcome of a launch: `class` 1 = success, 0 = failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Parse the dataset's `class` column for `row` (0-based, for messages).
    pub fn from_class(value: i64, row: usize) -> Result<Self, DatasetError> {
        match value {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(DatasetError::BadClass { row, value: other }),
        }
    }

    /// The raw class value, 0 or 1.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Slice label used by the per-site proportion chart.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch record. Booster metadata is optional: the columns may be
/// absent from the source file entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: Option<String>,
    pub booster_version: Option<String>,
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full launch table with pre-computed payload bounds and distinct-value
/// indices. Immutable after construction; every handler reads from it and
/// nothing writes to it.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    /// All records, in file order.
    pub records: Vec<LaunchRecord>,
    /// Minimum of the payload-mass column.
    pub payload_min: f64,
    /// Maximum of the payload-mass column.
    pub payload_max: f64,
    /// Sorted distinct launch-site identifiers.
    pub sites: BTreeSet<String>,
    /// Sorted distinct booster-version categories (empty if the column is
    /// absent from the source file).
    pub booster_categories: BTreeSet<String>,
}

impl LaunchTable {
    /// Build the table and its indices. A dashboard over zero rows has
    /// nothing to show, so an empty record set is an error.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut payload_min = f64::INFINITY;
        let mut payload_max = f64::NEG_INFINITY;
        let mut sites = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();

        for rec in &records {
            payload_min = payload_min.min(rec.payload_mass_kg);
            payload_max = payload_max.max(rec.payload_mass_kg);
            sites.insert(rec.site.clone());
            if let Some(cat) = &rec.booster_category {
                booster_categories.insert(cat.clone());
            }
        }

        Ok(LaunchTable {
            records,
            payload_min,
            payload_max,
            sites,
            booster_categories,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(min, max)` of the payload-mass column.
    pub fn payload_bounds(&self) -> (f64, f64) {
        (self.payload_min, self.payload_max)
    }

    /// Dropdown options: "All Sites" first, then each distinct site in
    /// lexicographic order.
    pub fn site_options(&self) -> Vec<SiteOption> {
        let mut options = Vec::with_capacity(self.sites.len() + 1);
        options.push(SiteOption {
            label: ALL_SITES_LABEL.to_string(),
            value: ALL_SITES.to_string(),
        });
        for site in &self.sites {
            options.push(SiteOption {
                label: site.clone(),
                value: site.clone(),
            });
        }
        options
    }
}

// ---------------------------------------------------------------------------
// SiteOption – one dropdown entry
// ---------------------------------------------------------------------------

/// A (label, value) pair for the site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}
