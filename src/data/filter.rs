use super::model::{LaunchRecord, LaunchTable, ALL_SITES};

// ---------------------------------------------------------------------------
// Record predicates shared by both chart handlers
// ---------------------------------------------------------------------------

/// Selection applied to the launch table: an optional site and an optional
/// inclusive payload-mass range. `None` means "no constraint".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaunchFilter {
    pub site: Option<String>,
    pub payload_range: Option<(f64, f64)>,
}

impl LaunchFilter {
    /// Filter for a dropdown value: the `ALL` sentinel places no site
    /// constraint, anything else matches that site exactly.
    pub fn for_site(value: &str) -> Self {
        LaunchFilter {
            site: (value != ALL_SITES).then(|| value.to_string()),
            payload_range: None,
        }
    }

    /// Add an inclusive `[low, high]` payload-mass constraint.
    pub fn with_payload_range(mut self, low: f64, high: f64) -> Self {
        self.payload_range = Some((low, high));
        self
    }

    /// Whether a single record passes every active constraint.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        if let Some(site) = &self.site {
            if &record.site != site {
                return false;
            }
        }
        if let Some((low, high)) = self.payload_range {
            // Inclusive on both bounds, so a range collapsed to a single
            // value still keeps records at exactly that value.
            if record.payload_mass_kg < low || record.payload_mass_kg > high {
                return false;
            }
        }
        true
    }
}

/// Indices of records passing the filter, in table order.
pub fn filtered_indices(table: &LaunchTable, filter: &LaunchFilter) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| filter.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;

    fn table() -> LaunchTable {
        let rec = |site: &str, payload: f64| LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::Success,
            booster_category: None,
            booster_version: None,
        };
        LaunchTable::from_records(vec![
            rec("A", 500.0),
            rec("B", 1500.0),
            rec("A", 2500.0),
            rec("B", 3500.0),
        ])
        .unwrap()
    }

    #[test]
    fn all_sentinel_places_no_site_constraint() {
        let t = table();
        assert_eq!(filtered_indices(&t, &LaunchFilter::for_site("ALL")), [0, 1, 2, 3]);
    }

    #[test]
    fn site_filter_matches_exactly() {
        let t = table();
        assert_eq!(filtered_indices(&t, &LaunchFilter::for_site("A")), [0, 2]);
    }

    #[test]
    fn payload_range_is_inclusive_on_both_bounds() {
        let t = table();
        let f = LaunchFilter::for_site("ALL").with_payload_range(1500.0, 3500.0);
        assert_eq!(filtered_indices(&t, &f), [1, 2, 3]);
    }

    #[test]
    fn collapsed_range_keeps_exact_boundary_rows() {
        let t = table();
        let f = LaunchFilter::for_site("ALL").with_payload_range(2500.0, 2500.0);
        assert_eq!(filtered_indices(&t, &f), [2]);
    }

    #[test]
    fn disjoint_range_yields_no_rows() {
        let t = table();
        let f = LaunchFilter::for_site("A").with_payload_range(10_000.0, 20_000.0);
        assert!(filtered_indices(&t, &f).is_empty());
    }
}
