//! Message contract of the style inspector plugin.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    host::models::StyleNode,
    style::{tokens::Token, variables::VariableSummary},
};

#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
/// Messages accepted from the inspector UI.
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InspectorInbound {
    /// Generate markup for the first selected node.
    #[serde(rename_all = "camelCase")]
    GetSelection {
        /// Overrides the configured default when present.
        #[serde(default)]
        use_variables: Option<bool>,
    },
    /// List the tokens bound on the first selected node.
    GetComponentTokens,
    /// List every document variable.
    GetAllVariables,
    /// Close the plugin.
    ClosePlugin,
    #[serde(other)]
    Unknown,
}

/// Identity of the inspected node echoed back to the UI.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct NodeSummary {
    pub name: String,
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

impl From<&StyleNode> for NodeSummary {
    fn from(node: &StyleNode) -> Self {
        Self {
            name: node.name.clone(),
            id: node.id.clone(),
            node_type: node.kind.type_name().to_owned(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
/// Messages sent to the inspector UI.
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InspectorOutbound {
    /// Nothing is selected.
    NoSelection,
    /// Markup generated for the first selected node.
    #[serde(rename_all = "camelCase")]
    SelectionData {
        node: NodeSummary,
        html: String,
        css: String,
        /// `data:image/png;base64,...`, or null when rendering failed.
        preview_url: Option<String>,
    },
    /// Tokens bound on the first selected node.
    ComponentTokens { tokens: Vec<Token> },
    /// Every document variable.
    AllVariables { variables: Vec<VariableSummary> },
    /// The inbound message could not be handled.
    Error { message: String },
}
