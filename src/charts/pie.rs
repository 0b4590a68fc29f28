use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::filter::LaunchFilter;
use crate::data::model::{LaunchTable, Outcome, ALL_SITES};

// ---------------------------------------------------------------------------
// Proportion-chart specification
// ---------------------------------------------------------------------------

/// One slice of the proportion chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

/// Renderer-independent description of the proportion chart. A spec with no
/// slices is valid and renders as an empty chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieSpec {
    /// Sum of all slice values.
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

// ---------------------------------------------------------------------------
// Handler: site selection → proportion chart
// ---------------------------------------------------------------------------

/// Build the success proportion chart for a dropdown value.
///
/// * `ALL` – one slice per site, sized by that site's success count (the sum
///   of the class column per group).
/// * a specific site – up to two slices, Success and Failure, sized by their
///   occurrence counts; a slice with zero count is omitted.
///
/// Pure function of `(table, site)`; an empty subset yields zero slices.
pub fn success_pie(table: &LaunchTable, site: &str) -> PieSpec {
    if site == ALL_SITES {
        let mut successes_by_site: BTreeMap<&str, u64> = BTreeMap::new();
        for rec in &table.records {
            *successes_by_site.entry(rec.site.as_str()).or_default() +=
                u64::from(rec.outcome.class());
        }

        return PieSpec {
            title: "Total Successful Launches by Site".to_string(),
            slices: successes_by_site
                .into_iter()
                .map(|(label, value)| PieSlice {
                    label: label.to_string(),
                    value,
                })
                .collect(),
        };
    }

    let filter = LaunchFilter::for_site(site);
    let mut successes = 0u64;
    let mut failures = 0u64;
    for rec in table.records.iter().filter(|r| filter.matches(r)) {
        if rec.outcome.is_success() {
            successes += 1;
        } else {
            failures += 1;
        }
    }

    let mut slices = Vec::new();
    if successes > 0 {
        slices.push(PieSlice {
            label: Outcome::Success.label().to_string(),
            value: successes,
        });
    }
    if failures > 0 {
        slices.push(PieSlice {
            label: Outcome::Failure.label().to_string(),
            value: failures,
        });
    }

    PieSpec {
        title: format!("Launch Outcomes for {site}"),
        slices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    /// Sites {A: 3 successes / 2 failures, B: 1 success / 4 failures}.
    fn two_site_table() -> LaunchTable {
        let rec = |site: &str, success: bool| LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: 1000.0,
            outcome: if success {
                Outcome::Success
            } else {
                Outcome::Failure
            },
            booster_category: None,
            booster_version: None,
        };
        let mut records = Vec::new();
        for _ in 0..3 {
            records.push(rec("A", true));
        }
        for _ in 0..2 {
            records.push(rec("A", false));
        }
        records.push(rec("B", true));
        for _ in 0..4 {
            records.push(rec("B", false));
        }
        LaunchTable::from_records(records).unwrap()
    }

    #[test]
    fn all_sites_slices_are_per_site_success_sums() {
        let spec = success_pie(&two_site_table(), ALL_SITES);
        assert_eq!(spec.title, "Total Successful Launches by Site");
        assert_eq!(
            spec.slices,
            vec![
                PieSlice {
                    label: "A".to_string(),
                    value: 3
                },
                PieSlice {
                    label: "B".to_string(),
                    value: 1
                },
            ]
        );
        // Slice total equals the table-wide success count.
        assert_eq!(spec.total(), 4);
    }

    #[test]
    fn single_site_slices_are_outcome_counts() {
        let spec = success_pie(&two_site_table(), "A");
        assert_eq!(spec.title, "Launch Outcomes for A");
        assert_eq!(
            spec.slices,
            vec![
                PieSlice {
                    label: "Success".to_string(),
                    value: 3
                },
                PieSlice {
                    label: "Failure".to_string(),
                    value: 2
                },
            ]
        );
        // Slice total equals the site's row count.
        assert_eq!(spec.total(), 5);
    }

    #[test]
    fn absent_outcome_drops_its_slice() {
        let rec = |site: &str| LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: 1.0,
            outcome: Outcome::Success,
            booster_category: None,
            booster_version: None,
        };
        let table = LaunchTable::from_records(vec![rec("A"), rec("A")]).unwrap();
        let spec = success_pie(&table, "A");
        assert_eq!(spec.slices.len(), 1);
        assert_eq!(spec.slices[0].label, "Success");
        assert_eq!(spec.slices[0].value, 2);
    }

    #[test]
    fn unknown_site_degrades_to_zero_slices() {
        let spec = success_pie(&two_site_table(), "NO SUCH PAD");
        assert!(spec.slices.is_empty());
        assert_eq!(spec.total(), 0);
        assert_eq!(spec.title, "Launch Outcomes for NO SUCH PAD");
    }

    #[test]
    fn handler_is_idempotent() {
        let table = two_site_table();
        assert_eq!(success_pie(&table, ALL_SITES), success_pie(&table, ALL_SITES));
        assert_eq!(success_pie(&table, "B"), success_pie(&table, "B"));
    }
}
