use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use futures::{FutureExt, future::BoxFuture};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    dto::inspector::{InspectorInbound, InspectorOutbound, NodeSummary},
    host::{DocumentHost, models::StyleNode},
    runtime::{Flow, PluginHandler},
    style::{
        extract::{Markup, generate_markup},
        tokens::collect_tokens,
        variables::list_variables,
    },
};

/// Generate markup for the first selected node, or report that nothing is selected.
///
/// A failed preview render only drops the preview; the markup is still returned.
pub async fn selection_data(
    host: &dyn DocumentHost,
    config: &AppConfig,
    use_variables: Option<bool>,
) -> InspectorOutbound {
    let Some(node) = host.selection().into_iter().next() else {
        return InspectorOutbound::NoSelection;
    };

    let use_variables = use_variables.unwrap_or(config.default_use_variables);
    let Markup { html, css } = generate_markup(&node, use_variables);
    let preview_url = preview_url(host, &node, config.preview_scale).await;
    info!(
        node_id = %node.id,
        node_type = node.kind.type_name(),
        use_variables,
        preview = preview_url.is_some(),
        "generated markup for selection"
    );

    InspectorOutbound::SelectionData {
        node: NodeSummary::from(&node),
        html,
        css,
        preview_url,
    }
}

/// Render the node and wrap the PNG in a data URL.
pub async fn preview_url(host: &dyn DocumentHost, node: &StyleNode, scale: f32) -> Option<String> {
    match host.export_png(&node.id, scale).await {
        Ok(bytes) => Some(format!("data:image/png;base64,{}", STANDARD.encode(bytes))),
        Err(err) => {
            warn!(node_id = %node.id, error = %err, "failed to generate preview");
            None
        }
    }
}

/// Tokens bound on the first selected node.
pub fn component_tokens(host: &dyn DocumentHost) -> InspectorOutbound {
    let Some(node) = host.selection().into_iter().next() else {
        return InspectorOutbound::NoSelection;
    };

    let tokens = collect_tokens(&node);
    info!(node_id = %node.id, count = tokens.len(), "collected component tokens");
    InspectorOutbound::ComponentTokens { tokens }
}

/// Every variable of the document, resolved with the configured mode.
pub fn all_variables(host: &dyn DocumentHost, config: &AppConfig) -> InspectorOutbound {
    let variables = list_variables(&host.variable_collections(), &config.variable_mode);
    info!(count = variables.len(), "listed document variables");
    InspectorOutbound::AllVariables { variables }
}

/// Style inspector bound to a host document.
pub struct InspectorPlugin {
    host: Arc<dyn DocumentHost>,
    config: Arc<AppConfig>,
}

impl InspectorPlugin {
    pub fn new(host: Arc<dyn DocumentHost>, config: Arc<AppConfig>) -> Self {
        Self { host, config }
    }
}

impl PluginHandler for InspectorPlugin {
    type Inbound = InspectorInbound;
    type Outbound = InspectorOutbound;

    fn handle(&mut self, message: InspectorInbound) -> BoxFuture<'_, Flow<InspectorOutbound>> {
        async move {
            let host = self.host.as_ref();
            let reply = match message {
                InspectorInbound::GetSelection { use_variables } => {
                    selection_data(host, &self.config, use_variables).await
                }
                InspectorInbound::GetComponentTokens => component_tokens(host),
                InspectorInbound::GetAllVariables => all_variables(host, &self.config),
                InspectorInbound::ClosePlugin => return Flow::Close,
                InspectorInbound::Unknown => {
                    warn!("ignoring unsupported inspector message");
                    return Flow::Continue(None);
                }
            };
            Flow::Continue(Some(reply))
        }
        .boxed()
    }

    fn rejection(&self, message: String) -> InspectorOutbound {
        InspectorOutbound::Error { message }
    }

    fn on_close(&mut self) {
        self.host.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{DocumentSnapshot, MemoryDocument};
    use serde_json::json;

    fn document() -> DocumentSnapshot {
        serde_json::from_value(json!({
            "selection": [{
                "id": "1:2",
                "name": "Card",
                "type": "RECTANGLE",
                "width": 24,
                "fills": [{
                    "type": "SOLID",
                    "color": { "r": 1, "g": 0, "b": 0 },
                    "colorVariable": { "name": "brand" }
                }],
                "boundVariables": { "width": { "name": "spacing-lg" } }
            }],
            "collections": [{
                "id": "c1",
                "name": "Spacing",
                "modes": [{ "modeId": "m1", "name": "Default" }],
                "variables": [{
                    "id": "v1",
                    "name": "spacing-lg",
                    "resolvedType": "FLOAT",
                    "valuesByMode": { "m1": 24 }
                }]
            }],
            "previews": { "1:2": [1, 2, 3] }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn selection_with_variables_and_preview() {
        let host = MemoryDocument::new(document());
        let reply = selection_data(&host, &AppConfig::default(), None).await;

        assert_eq!(
            serde_json::to_value(reply).unwrap(),
            json!({
                "type": "selection-data",
                "node": { "name": "Card", "id": "1:2", "type": "RECTANGLE" },
                "html": "<div class=\"figma-element figma-rectangle\">Card</div>",
                "css": ".figma-rectangle {\n  background-color: var(--brand, #ff0000);\n  width: var(--spacing-lg, 24px);\n}",
                "previewUrl": "data:image/png;base64,AQID"
            })
        );
    }

    #[tokio::test]
    async fn explicit_flag_overrides_default() {
        let host = MemoryDocument::new(document());
        let InspectorOutbound::SelectionData { css, .. } =
            selection_data(&host, &AppConfig::default(), Some(false)).await
        else {
            panic!("expected selection data");
        };
        assert_eq!(css, ".figma-rectangle {\n  background-color: #ff0000;\n  width: 24px;\n}");
    }

    #[tokio::test]
    async fn failed_preview_still_returns_markup() {
        let mut snapshot = document();
        snapshot.previews.clear();
        let host = MemoryDocument::new(snapshot);

        let InspectorOutbound::SelectionData { preview_url, html, .. } =
            selection_data(&host, &AppConfig::default(), None).await
        else {
            panic!("expected selection data");
        };
        assert!(preview_url.is_none());
        assert!(html.contains("Card"));
    }

    #[tokio::test]
    async fn empty_selection_is_reported() {
        let host = MemoryDocument::default();
        assert_eq!(
            selection_data(&host, &AppConfig::default(), None).await,
            InspectorOutbound::NoSelection
        );
        assert_eq!(component_tokens(&host), InspectorOutbound::NoSelection);
    }

    #[test]
    fn tokens_and_variables_replies() {
        let host = MemoryDocument::new(document());

        let tokens = serde_json::to_value(component_tokens(&host)).unwrap();
        assert_eq!(
            tokens,
            json!({
                "type": "component-tokens",
                "tokens": [
                    { "name": "brand", "value": "#ff0000", "type": "COLOR" },
                    { "name": "spacing-lg", "value": "24px", "type": "NUMBER" }
                ]
            })
        );

        let variables = serde_json::to_value(all_variables(&host, &AppConfig::default())).unwrap();
        assert_eq!(
            variables,
            json!({
                "type": "all-variables",
                "variables": [
                    { "name": "spacing-lg", "value": 24, "type": "FLOAT", "collection": "Spacing" }
                ]
            })
        );
    }

    #[tokio::test]
    async fn plugin_closes_host_on_close() {
        let host = Arc::new(MemoryDocument::new(document()));
        let mut plugin = InspectorPlugin::new(host.clone(), Arc::new(AppConfig::default()));

        assert_eq!(plugin.handle(InspectorInbound::ClosePlugin).await, Flow::Close);
        assert_eq!(plugin.handle(InspectorInbound::Unknown).await, Flow::Continue(None));
        plugin.on_close();
        assert!(host.is_closed());
    }
}
