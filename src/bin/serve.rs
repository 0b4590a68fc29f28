use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use launchboard::data::loader;
use launchboard::server;

/// Headless dashboard: serves the page and the chart-spec API over HTTP
/// instead of opening a native window.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = Path::new(loader::DEFAULT_DATASET);
    let table = loader::load_file(path)
        .with_context(|| format!("loading dataset from {}", path.display()))?;
    log::info!(
        "loaded {} launch records from {} sites",
        table.len(),
        table.sites.len()
    );

    server::serve(Arc::new(table), server::DASHBOARD_PORT).await
}
