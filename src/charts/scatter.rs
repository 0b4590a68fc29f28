use serde::{Deserialize, Serialize};

use crate::data::filter::{filtered_indices, LaunchFilter};
use crate::data::model::{LaunchTable, ALL_SITES};

// ---------------------------------------------------------------------------
// Correlation-chart specification
// ---------------------------------------------------------------------------

/// One point of the correlation chart: payload mass on x, outcome class on y.
/// The site identifier is always attached; booster metadata rides along only
/// when the source dataset carried those columns, and renderers are expected
/// to silently skip what is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    /// Raw class value, 0 or 1.
    pub outcome: u8,
    pub site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booster_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booster_version: Option<String>,
}

/// Renderer-independent description of the correlation chart. Zero points is
/// a valid spec and renders as an empty chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

pub const X_LABEL: &str = "Payload Mass (kg)";
pub const Y_LABEL: &str = "Launch Outcome (1=Success, 0=Failure)";

// ---------------------------------------------------------------------------
// Handler: (site, payload range) → correlation chart
// ---------------------------------------------------------------------------

/// Build the payload/outcome scatter chart for a dropdown value and an
/// inclusive payload-mass range. Pure function of its inputs; points appear
/// in table order.
pub fn payload_scatter(table: &LaunchTable, site: &str, low: f64, high: f64) -> ScatterSpec {
    let filter = LaunchFilter::for_site(site).with_payload_range(low, high);

    let points = filtered_indices(table, &filter)
        .into_iter()
        .map(|i| &table.records[i])
        .map(|rec| ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome.class(),
            site: rec.site.clone(),
            booster_category: rec.booster_category.clone(),
            booster_version: rec.booster_version.clone(),
        })
        .collect();

    let title = if site == ALL_SITES {
        "Correlation between Payload and Success".to_string()
    } else {
        format!("Correlation between Payload and Success for {site}")
    };

    ScatterSpec {
        title,
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn table() -> LaunchTable {
        let rec = |site: &str, payload: f64, success: bool, cat: Option<&str>| LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: if success {
                Outcome::Success
            } else {
                Outcome::Failure
            },
            booster_category: cat.map(str::to_string),
            booster_version: cat.map(|c| format!("F9 {c}  B1021")),
        };
        LaunchTable::from_records(vec![
            rec("A", 500.0, false, Some("v1.0")),
            rec("A", 2500.0, true, Some("FT")),
            rec("B", 4500.0, true, Some("FT")),
            rec("B", 9600.0, false, None),
        ])
        .unwrap()
    }

    #[test]
    fn all_sites_keeps_every_record_in_range() {
        let spec = payload_scatter(&table(), ALL_SITES, 0.0, 10_000.0);
        assert_eq!(spec.points.len(), 4);
        assert_eq!(spec.title, "Correlation between Payload and Success");
        assert_eq!(spec.y_label, Y_LABEL);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let spec = payload_scatter(&table(), ALL_SITES, 2500.0, 4500.0);
        let payloads: Vec<f64> = spec.points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(payloads, [2500.0, 4500.0]);
    }

    #[test]
    fn site_filter_stacks_on_range_filter() {
        let spec = payload_scatter(&table(), "B", 0.0, 5000.0);
        assert_eq!(spec.points.len(), 1);
        assert_eq!(spec.points[0].site, "B");
        assert_eq!(spec.points[0].outcome, 1);
        assert_eq!(
            spec.title,
            "Correlation between Payload and Success for B"
        );
    }

    #[test]
    fn range_excluding_all_rows_yields_zero_points() {
        let spec = payload_scatter(&table(), "A", 9000.0, 9999.0);
        assert!(spec.points.is_empty());
    }

    #[test]
    fn booster_metadata_degrades_per_point() {
        let spec = payload_scatter(&table(), ALL_SITES, 0.0, 10_000.0);
        assert_eq!(spec.points[1].booster_category.as_deref(), Some("FT"));
        assert_eq!(
            spec.points[1].booster_version.as_deref(),
            Some("F9 FT  B1021")
        );
        assert_eq!(spec.points[3].booster_category, None);
        assert_eq!(spec.points[3].booster_version, None);

        // Absent metadata is dropped from the JSON payload entirely.
        let json = serde_json::to_value(&spec.points[3]).unwrap();
        assert!(json.get("booster_category").is_none());
        assert_eq!(json["site"], "B");
    }

    #[test]
    fn handler_is_idempotent() {
        let t = table();
        assert_eq!(
            payload_scatter(&t, "A", 0.0, 5000.0),
            payload_scatter(&t, "A", 0.0, 5000.0)
        );
    }
}
