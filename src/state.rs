use crate::charts::{payload_scatter, success_pie, PieSpec, ScatterSpec};
use crate::color::CategoryColors;
use crate::data::model::{LaunchTable, SiteOption, ALL_SITES};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The dashboard's UI state, independent of rendering: the immutable table,
/// the current selection, and the chart specs derived from it.
///
/// Two reactive bindings keep the specs current:
/// * site change → rebuild pie and scatter
/// * payload-range change → rebuild scatter only
pub struct AppState {
    /// Loaded dataset, never mutated after startup.
    table: LaunchTable,

    /// Dropdown options derived once from the table.
    pub site_options: Vec<SiteOption>,

    /// Currently selected dropdown value (`ALL` or a site identifier).
    pub selected_site: String,

    /// Current payload range, low ≤ high, clamped to the dataset bounds.
    pub payload_low: f64,
    pub payload_high: f64,

    /// Cached chart specs for the current selection.
    pub pie: PieSpec,
    pub scatter: ScatterSpec,

    /// Stable scatter colours per booster category.
    pub category_colors: CategoryColors,
}

impl AppState {
    pub fn new(table: LaunchTable) -> Self {
        let (payload_low, payload_high) = table.payload_bounds();
        let site_options = table.site_options();
        let category_colors = CategoryColors::new(&table.booster_categories);
        let selected_site = ALL_SITES.to_string();

        let pie = success_pie(&table, &selected_site);
        let scatter = payload_scatter(&table, &selected_site, payload_low, payload_high);

        AppState {
            table,
            site_options,
            selected_site,
            payload_low,
            payload_high,
            pie,
            scatter,
            category_colors,
        }
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    /// Display label for the current dropdown value.
    pub fn selected_site_label(&self) -> &str {
        self.site_options
            .iter()
            .find(|o| o.value == self.selected_site)
            .map(|o| o.label.as_str())
            .unwrap_or(self.selected_site.as_str())
    }

    /// Site dropdown changed: both charts depend on the site.
    pub fn set_site(&mut self, value: String) {
        if value == self.selected_site {
            return;
        }
        self.selected_site = value;
        self.rebuild_pie();
        self.rebuild_scatter();
    }

    /// Range selector changed: only the scatter chart depends on the range.
    /// Bounds are clamped to the dataset's payload span and reordered so
    /// low ≤ high always holds.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        let (min, max) = self.table.payload_bounds();
        let mut low = low.clamp(min, max);
        let mut high = high.clamp(min, max);
        if low > high {
            std::mem::swap(&mut low, &mut high);
        }
        if (low, high) == (self.payload_low, self.payload_high) {
            return;
        }
        self.payload_low = low;
        self.payload_high = high;
        self.rebuild_scatter();
    }

    fn rebuild_pie(&mut self) {
        self.pie = success_pie(&self.table, &self.selected_site);
    }

    fn rebuild_scatter(&mut self) {
        self.scatter = payload_scatter(
            &self.table,
            &self.selected_site,
            self.payload_low,
            self.payload_high,
        );
    }
}
