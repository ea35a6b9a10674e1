//! Palette generator plugin: reads UI messages on stdin and answers on stdout.

use std::sync::Arc;

use anyhow::Context;
use stylekit::{host::memory::MemoryDocument, runtime, services::palette_service::PalettePlugin};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    runtime::init_tracing();

    // The generator only writes paint styles, so it starts from an empty document.
    let host = Arc::new(MemoryDocument::default());
    let mut plugin = PalettePlugin::new(host.clone());

    info!("palette generator ready");
    runtime::run_channel(tokio::io::stdin(), tokio::io::stdout(), &mut plugin)
        .await
        .context("running ui channel")?;
    info!(
        colors = plugin.session().len(),
        styles = host.paint_styles().await.len(),
        "palette generator closed"
    );

    Ok(())
}
