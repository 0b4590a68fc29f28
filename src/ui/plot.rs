use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Correlation chart (egui_plot)
// ---------------------------------------------------------------------------

/// Render the payload/outcome scatter chart. Points are grouped into one
/// series per booster category so the legend doubles as a colour key;
/// records without a category fall into a single uncategorised series.
/// Hovering near a point shows its site and booster version when known.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let spec = &state.scatter;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&spec.title);
    });

    // One series per category, table order preserved within a series.
    let mut series: BTreeMap<Option<&str>, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &spec.points {
        series
            .entry(p.booster_category.as_deref())
            .or_default()
            .push([p.payload_mass_kg, f64::from(p.outcome)]);
    }

    // Hover annotations, matched against the pointer by normalized distance.
    let annotations: Vec<(f64, f64, String)> = spec
        .points
        .iter()
        .map(|p| {
            let text = match &p.booster_version {
                Some(version) => format!("{}\n{}", p.site, version),
                None => p.site.clone(),
            };
            (p.payload_mass_kg, f64::from(p.outcome), text)
        })
        .collect();
    let x_span = (state.payload_high - state.payload_low).max(1.0);

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .height(340.0)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |_name, value| {
            let nearest = annotations
                .iter()
                .map(|(x, y, text)| {
                    let dx = (value.x - x) / x_span;
                    let dy = value.y - y;
                    (dx * dx + dy * dy, text)
                })
                .min_by(|(a, _), (b, _)| a.total_cmp(b));
            match nearest {
                Some((d2, text)) if d2 < 0.001 => {
                    format!("{text}\n{:.0} kg", value.x)
                }
                _ => format!("{:.0} kg", value.x),
            }
        })
        .show(ui, |plot_ui| {
            for (category, points) in series {
                let color = state.category_colors.color_for(category);
                let mut dots = Points::new(PlotPoints::from(points))
                    .color(color)
                    .radius(4.0)
                    .shape(MarkerShape::Circle)
                    .filled(true);
                if let Some(name) = category {
                    dots = dots.name(name);
                }
                plot_ui.points(dots);
            }
        });
}
