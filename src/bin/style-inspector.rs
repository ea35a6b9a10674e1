//! Style inspector plugin: reads UI messages on stdin and answers on stdout.

use std::sync::Arc;

use anyhow::Context;
use stylekit::{
    config::AppConfig, host::memory::MemoryDocument, runtime, services::inspector_service::InspectorPlugin,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    runtime::init_tracing();

    let config = Arc::new(AppConfig::load());
    let host = MemoryDocument::load(&config.document_path)
        .await
        .context("loading host document")?;
    let mut plugin = InspectorPlugin::new(Arc::new(host), config);

    info!("style inspector ready");
    runtime::run_channel(tokio::io::stdin(), tokio::io::stdout(), &mut plugin)
        .await
        .context("running ui channel")?;

    Ok(())
}
