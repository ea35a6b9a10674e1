use std::sync::Arc;

use futures::{FutureExt, future::BoxFuture};
use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    colors::{
        convert::{hex_to_rgb, rgb_to_unit},
        generator::{ColorEntry, GeneratedColor, generate_palette},
    },
    dto::palette::{AddColorRequest, PaletteInbound, PaletteOutbound},
    error::ServiceError,
    host::{
        DocumentHost,
        models::{Paint, PaintStyleRequest},
    },
    runtime::{Flow, PluginHandler},
    state::session::PaletteSession,
};

/// Validate a submitted color and append it to the session.
pub fn add_color(
    session: &mut PaletteSession,
    request: AddColorRequest,
) -> Result<ColorEntry, ServiceError> {
    request.validate()?;
    let entry = ColorEntry::from(request);
    info!(
        id = %entry.id,
        name = %entry.name,
        shades = entry.shade_count,
        "added palette color"
    );
    session.append(entry.clone());
    Ok(entry)
}

/// Palette for every color in the session.
pub fn generate(session: &PaletteSession) -> Vec<GeneratedColor> {
    let colors = generate_palette(session.entries());
    info!(
        entries = session.len(),
        count = colors.len(),
        "generated palette"
    );
    colors
}

/// Generate the palette and create one solid paint style per shade, in palette order.
///
/// Styles are created one at a time; the first failure stops the export and styles
/// already created are kept.
pub async fn export(
    host: &dyn DocumentHost,
    session: &PaletteSession,
) -> Result<usize, ServiceError> {
    let colors = generate(session);
    for color in &colors {
        let paint = Paint::solid(rgb_to_unit(hex_to_rgb(&color.hex)).into());
        host.create_paint_style(PaintStyleRequest {
            name: color.name.clone(),
            paints: vec![paint],
        })
        .await?;
    }

    let count = colors.len();
    host.notify(&format!("Exported {count} colors to styles and tokens!"))
        .await;
    info!(count, "exported palette to paint styles");
    Ok(count)
}

/// Palette generator bound to a host document and its own color session.
pub struct PalettePlugin {
    host: Arc<dyn DocumentHost>,
    session: PaletteSession,
}

impl PalettePlugin {
    /// Plugin with an empty session.
    pub fn new(host: Arc<dyn DocumentHost>) -> Self {
        Self {
            host,
            session: PaletteSession::new(),
        }
    }

    /// Colors accumulated so far.
    pub fn session(&self) -> &PaletteSession {
        &self.session
    }
}

impl PluginHandler for PalettePlugin {
    type Inbound = PaletteInbound;
    type Outbound = PaletteOutbound;

    fn handle(&mut self, message: PaletteInbound) -> BoxFuture<'_, Flow<PaletteOutbound>> {
        async move {
            let reply = match message {
                PaletteInbound::AddColor(request) => match add_color(&mut self.session, request) {
                    Ok(_) => None,
                    Err(err) => {
                        warn!(error = %err, "rejected palette color");
                        Some(PaletteOutbound::Error {
                            message: err.to_string(),
                        })
                    }
                },
                PaletteInbound::GeneratePalette => Some(PaletteOutbound::PaletteGenerated {
                    colors: generate(&self.session).into_iter().map(Into::into).collect(),
                }),
                PaletteInbound::Export => match export(self.host.as_ref(), &self.session).await {
                    Ok(count) => Some(PaletteOutbound::ExportComplete { count }),
                    Err(err) => {
                        error!(error = %err, "palette export failed");
                        Some(PaletteOutbound::Error {
                            message: err.to_string(),
                        })
                    }
                },
                PaletteInbound::ClearColors => {
                    info!(cleared = self.session.len(), "cleared palette colors");
                    self.session.clear();
                    None
                }
                PaletteInbound::Cancel => return Flow::Close,
                PaletteInbound::Unknown => {
                    warn!("ignoring unsupported palette message");
                    None
                }
            };
            Flow::Continue(reply)
        }
        .boxed()
    }

    fn rejection(&self, message: String) -> PaletteOutbound {
        PaletteOutbound::Error { message }
    }

    fn on_close(&mut self) {
        self.host.close();
    }
}
