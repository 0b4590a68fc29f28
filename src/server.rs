use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::charts::{payload_scatter, success_pie, PieSpec, ScatterSpec};
use crate::data::model::{LaunchTable, SiteOption, ALL_SITES};

/// Port the dashboard endpoint binds to.
pub const DASHBOARD_PORT: u16 = 8080;

// ---------------------------------------------------------------------------
// Shared state and router
// ---------------------------------------------------------------------------

/// Read-only state shared by every request handler. The table is never
/// written after load, so concurrent requests need no coordination.
#[derive(Clone)]
pub struct DashState {
    pub table: Arc<LaunchTable>,
}

/// Build the dashboard router: the page itself plus the chart-spec API.
pub fn router(table: Arc<LaunchTable>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/meta", get(api_meta))
        .route("/api/pie", get(api_pie))
        .route("/api/scatter", get(api_scatter))
        .with_state(DashState { table })
}

/// Bind and serve until the process is stopped.
pub async fn serve(table: Arc<LaunchTable>, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    log::info!("dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(table)).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Catalog and bounds the page needs to initialise its controls.
#[derive(Debug, Serialize)]
pub struct DashMeta {
    pub sites: Vec<SiteOption>,
    pub booster_categories: Vec<String>,
    pub payload_min: f64,
    pub payload_max: f64,
    pub records: usize,
}

#[derive(Debug, Deserialize)]
pub struct PieQuery {
    #[serde(default = "default_site")]
    pub site: String,
}

#[derive(Debug, Deserialize)]
pub struct ScatterQuery {
    #[serde(default = "default_site")]
    pub site: String,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

fn default_site() -> String {
    ALL_SITES.to_string()
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn api_meta(State(ctx): State<DashState>) -> Json<DashMeta> {
    let (payload_min, payload_max) = ctx.table.payload_bounds();
    Json(DashMeta {
        sites: ctx.table.site_options(),
        booster_categories: ctx.table.booster_categories.iter().cloned().collect(),
        payload_min,
        payload_max,
        records: ctx.table.len(),
    })
}

pub async fn api_pie(
    State(ctx): State<DashState>,
    Query(params): Query<PieQuery>,
) -> Json<PieSpec> {
    Json(success_pie(&ctx.table, &params.site))
}

/// Missing bounds default to the dataset's full payload span. A range that
/// matches nothing (including low > high) degrades to an empty spec.
pub async fn api_scatter(
    State(ctx): State<DashState>,
    Query(params): Query<ScatterQuery>,
) -> Json<ScatterSpec> {
    let (min, max) = ctx.table.payload_bounds();
    let low = params.low.unwrap_or(min);
    let high = params.high.unwrap_or(max);
    Json(payload_scatter(&ctx.table, &params.site, low, high))
}

// ---------------------------------------------------------------------------
// Dashboard page
// ---------------------------------------------------------------------------

/// Self-contained page: controls drive the chart-spec API and two canvas
/// renderers draw the returned specs.
const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>SpaceX Launch Records</title>
<style>
  body { font-family: sans-serif; max-width: 1100px; margin: 0 auto; padding: 10px 20px; }
  h1 { text-align: center; color: #503D36; }
  .controls { text-align: center; margin: 12px 0; }
  .chart-title { text-align: center; font-weight: bold; margin: 8px 0 4px; }
  canvas { display: block; margin: 0 auto; }
  label { margin: 0 8px; }
</style>
</head>
<body>
<h1>SpaceX Launch Records Dashboard</h1>
<div class="controls">
  <select id="site"></select>
</div>
<div class="chart-title" id="pie-title"></div>
<canvas id="pie" width="680" height="300"></canvas>
<p style="text-align:center">Payload range (Kg):</p>
<div class="controls">
  <label>min <input type="range" id="low"> <span id="low-val"></span></label>
  <label>max <input type="range" id="high"> <span id="high-val"></span></label>
</div>
<div class="chart-title" id="scatter-title"></div>
<canvas id="scatter" width="900" height="360"></canvas>
<script>
const $ = (id) => document.getElementById(id);
const getJSON = (url) => fetch(url).then((r) => r.json());
const hue = (i, n) => `hsl(${(360 * i) / Math.max(n, 1)}, 70%, 50%)`;

let meta = null;

function sliderSetup(slider, value) {
  slider.min = Math.floor(meta.payload_min);
  slider.max = Math.ceil(meta.payload_max);
  slider.step = 1000;
  slider.value = value;
}

function drawPie(spec) {
  $("pie-title").textContent = spec.title;
  const ctx = $("pie").getContext("2d");
  ctx.clearRect(0, 0, 680, 300);
  const total = spec.slices.reduce((acc, s) => acc + s.value, 0);
  if (total === 0) {
    ctx.fillStyle = "#888";
    ctx.textAlign = "center";
    ctx.fillText("No launches match the current selection", 340, 150);
    return;
  }
  const cx = 190, cy = 150, r = 120;
  let angle = -Math.PI / 2;
  spec.slices.forEach((slice, i) => {
    const sweep = (slice.value / total) * 2 * Math.PI;
    ctx.beginPath();
    ctx.moveTo(cx, cy);
    ctx.arc(cx, cy, r, angle, angle + sweep);
    ctx.closePath();
    ctx.fillStyle = hue(i, spec.slices.length);
    ctx.fill();
    angle += sweep;
  });
  ctx.textAlign = "left";
  spec.slices.forEach((slice, i) => {
    const y = 40 + i * 20;
    ctx.fillStyle = hue(i, spec.slices.length);
    ctx.fillRect(400, y - 9, 12, 12);
    ctx.fillStyle = "#222";
    const pct = ((100 * slice.value) / total).toFixed(1);
    ctx.fillText(`${slice.label}: ${slice.value} (${pct}%)`, 418, y + 2);
  });
}

function drawScatter(spec) {
  $("scatter-title").textContent = spec.title;
  const ctx = $("scatter").getContext("2d");
  const W = 900, H = 360, ml = 60, mr = 150, mt = 16, mb = 44;
  ctx.clearRect(0, 0, W, H);
  const x0 = meta.payload_min, x1 = Math.max(meta.payload_max, x0 + 1);
  const px = (x) => ml + ((x - x0) / (x1 - x0)) * (W - ml - mr);
  const py = (y) => H - mb - y * (H - mt - mb);
  ctx.strokeStyle = "#999";
  ctx.beginPath();
  ctx.moveTo(ml, py(1) - 8); ctx.lineTo(ml, py(0) + 8);
  ctx.moveTo(ml, py(0) + 8); ctx.lineTo(W - mr, py(0) + 8);
  ctx.stroke();
  ctx.fillStyle = "#222";
  ctx.textAlign = "center";
  ctx.fillText(spec.x_label, (ml + W - mr) / 2, H - 8);
  ctx.textAlign = "right";
  ctx.fillText("1", ml - 8, py(1) + 4);
  ctx.fillText("0", ml - 8, py(0) + 4);
  ctx.save();
  ctx.translate(14, H / 2);
  ctx.rotate(-Math.PI / 2);
  ctx.textAlign = "center";
  ctx.fillText(spec.y_label, 0, 0);
  ctx.restore();
  const cats = meta.booster_categories;
  const colorFor = (cat) => {
    const i = cats.indexOf(cat);
    return i < 0 ? "#6ab0de" : hue(i, cats.length);
  };
  spec.points.forEach((p) => {
    ctx.beginPath();
    ctx.arc(px(p.payload_mass_kg), py(p.outcome), 4, 0, 2 * Math.PI);
    ctx.fillStyle = colorFor(p.booster_category ?? null);
    ctx.fill();
  });
  ctx.textAlign = "left";
  cats.forEach((cat, i) => {
    const y = mt + 14 + i * 20;
    ctx.fillStyle = hue(i, cats.length);
    ctx.fillRect(W - mr + 16, y - 9, 12, 12);
    ctx.fillStyle = "#222";
    ctx.fillText(cat, W - mr + 34, y + 2);
  });
}

function refreshPie() {
  const site = encodeURIComponent($("site").value);
  getJSON(`/api/pie?site=${site}`).then(drawPie);
}

function refreshScatter() {
  const site = encodeURIComponent($("site").value);
  const low = $("low").value, high = $("high").value;
  $("low-val").textContent = low;
  $("high-val").textContent = high;
  getJSON(`/api/scatter?site=${site}&low=${low}&high=${high}`).then(drawScatter);
}

getJSON("/api/meta").then((m) => {
  meta = m;
  m.sites.forEach((opt) => {
    const el = document.createElement("option");
    el.value = opt.value;
    el.textContent = opt.label;
    $("site").appendChild(el);
  });
  sliderSetup($("low"), Math.floor(m.payload_min));
  sliderSetup($("high"), Math.ceil(m.payload_max));
  $("site").addEventListener("change", () => { refreshPie(); refreshScatter(); });
  $("low").addEventListener("input", refreshScatter);
  $("high").addEventListener("input", refreshScatter);
  refreshPie();
  refreshScatter();
});
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn ctx() -> DashState {
        let rec = |site: &str, payload: f64, success: bool| LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: if success {
                Outcome::Success
            } else {
                Outcome::Failure
            },
            booster_category: Some("FT".to_string()),
            booster_version: Some("F9 FT B1021".to_string()),
        };
        let table = LaunchTable::from_records(vec![
            rec("CCAFS LC-40", 2000.0, true),
            rec("KSC LC-39A", 4000.0, false),
            rec("KSC LC-39A", 6000.0, true),
        ])
        .unwrap();
        DashState {
            table: Arc::new(table),
        }
    }

    #[tokio::test]
    async fn meta_exposes_catalog_and_bounds() {
        let Json(meta) = api_meta(State(ctx())).await;
        assert_eq!(meta.records, 3);
        assert_eq!(meta.sites[0].value, "ALL");
        assert_eq!(meta.sites.len(), 3);
        assert_eq!((meta.payload_min, meta.payload_max), (2000.0, 6000.0));
        assert_eq!(meta.booster_categories, ["FT"]);
    }

    #[tokio::test]
    async fn pie_defaults_to_all_sites() {
        let Json(spec) = api_pie(
            State(ctx()),
            Query(PieQuery {
                site: default_site(),
            }),
        )
        .await;
        assert_eq!(spec.title, "Total Successful Launches by Site");
        assert_eq!(spec.total(), 2);
    }

    #[tokio::test]
    async fn scatter_defaults_to_full_range() {
        let Json(spec) = api_scatter(
            State(ctx()),
            Query(ScatterQuery {
                site: default_site(),
                low: None,
                high: None,
            }),
        )
        .await;
        assert_eq!(spec.points.len(), 3);
    }

    #[tokio::test]
    async fn scatter_with_inverted_range_degrades_to_empty() {
        let Json(spec) = api_scatter(
            State(ctx()),
            Query(ScatterQuery {
                site: "KSC LC-39A".to_string(),
                low: Some(5000.0),
                high: Some(3000.0),
            }),
        )
        .await;
        assert!(spec.points.is_empty());
    }
}
