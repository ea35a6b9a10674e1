use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    colors::convert::rgba_to_hex,
    host::models::{Paint, StyleNode, VariableAlias},
    style::extract::px,
};

/// Kind of value a token carries.
#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Color,
    Number,
}

/// Token value: a CSS literal (`#rrggbb`, `24px`) or a raw number (opacity).
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum TokenValue {
    Text(String),
    Number(f64),
}

/// Variable bound to one attribute of the inspected node.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct Token {
    pub name: String,
    pub value: TokenValue,
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

impl Token {
    fn color(alias: &VariableAlias, hex: String) -> Self {
        Self {
            name: alias.name.clone(),
            value: TokenValue::Text(hex),
            kind: TokenKind::Color,
        }
    }

    fn number(alias: &VariableAlias, value: TokenValue) -> Self {
        Self {
            name: alias.name.clone(),
            value,
            kind: TokenKind::Number,
        }
    }
}

/// Collect a token for every variable bound on the node.
///
/// Bindings are reported whether or not the caller renders CSS with variables.
/// Every solid fill and stroke is scanned, not only the first.
pub fn collect_tokens(node: &StyleNode) -> Vec<Token> {
    let bound = &node.bound_variables;
    let mut tokens: Vec<Token> = node
        .fills
        .iter()
        .chain(&node.strokes)
        .filter_map(Paint::as_solid)
        .filter_map(|paint| {
            paint
                .color_variable
                .as_ref()
                .map(|alias| Token::color(alias, rgba_to_hex(paint.color.into())))
        })
        .collect();

    let dimensions = [
        (bound.width.as_ref(), node.width),
        (bound.height.as_ref(), node.height),
        (bound.corner_radius.as_ref(), node.corner_radius),
    ];
    for (alias, value) in dimensions {
        if let Some(alias) = alias {
            tokens.push(Token::number(alias, dimension_value(value)));
        }
    }

    if let Some(alias) = &bound.opacity {
        let value = node
            .opacity
            .map_or_else(|| TokenValue::Text("unknown".into()), TokenValue::Number);
        tokens.push(Token::number(alias, value));
    }

    if let (Some(text), Some(alias)) = (node.kind.text(), &bound.font_size) {
        tokens.push(Token::number(alias, dimension_value(text.font_size)));
    }

    tokens
}

/// A binding without a literal still produces a token; its value is `unknown`.
fn dimension_value(value: Option<f64>) -> TokenValue {
    TokenValue::Text(value.map_or_else(|| "unknown".into(), px))
}
