use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::colors::convert::UnitRgb;

/// Reference to a document variable bound to a node attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariableAlias {
    /// Variable name, also used as the CSS custom property name.
    pub name: String,
}

/// Normalized color as stored by the host, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HostColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl HostColor {
    /// Opaque color from normalized channels.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }
}

impl From<HostColor> for UnitRgb {
    fn from(value: HostColor) -> Self {
        UnitRgb::new(value.r, value.g, value.b)
    }
}

impl From<UnitRgb> for HostColor {
    fn from(value: UnitRgb) -> Self {
        Self::rgb(value.red, value.green, value.blue)
    }
}

/// Single-color paint, optionally bound to a color variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SolidPaint {
    pub color: HostColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_variable: Option<VariableAlias>,
}

/// Fill or stroke entry of a node. Only solid paints carry a usable color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid(SolidPaint),
    #[serde(other)]
    Unsupported,
}

impl Paint {
    /// Solid paint of the given color with no variable binding.
    pub const fn solid(color: HostColor) -> Self {
        Self::Solid(SolidPaint {
            color,
            color_variable: None,
        })
    }

    /// Borrow the solid paint, if this is one.
    pub const fn as_solid(&self) -> Option<&SolidPaint> {
        match self {
            Self::Solid(solid) => Some(solid),
            Self::Unsupported => None,
        }
    }
}

/// Variables bound to the numeric attributes of a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoundVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<VariableAlias>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<VariableAlias>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<VariableAlias>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<VariableAlias>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<VariableAlias>,
}

/// Font reference of a text node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FontName {
    pub family: String,
    #[serde(default)]
    pub style: String,
}

/// Text-only attributes carried by [`NodeKind::Text`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    /// Text content; may be empty.
    pub characters: String,
    pub font_size: Option<f64>,
    pub font_name: Option<FontName>,
    /// Raw host alignment (`LEFT`, `CENTER`, `RIGHT`, `JUSTIFIED`, ...).
    pub text_align_horizontal: Option<String>,
}

/// Node kinds the inspector distinguishes; everything else keeps its host type name.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Rectangle,
    Text(TextStyle),
    Frame,
    Component,
    Instance,
    Other(String),
}

impl NodeKind {
    /// Host type name (`RECTANGLE`, `TEXT`, ...).
    pub fn type_name(&self) -> &str {
        match self {
            Self::Rectangle => "RECTANGLE",
            Self::Text(_) => "TEXT",
            Self::Frame => "FRAME",
            Self::Component => "COMPONENT",
            Self::Instance => "INSTANCE",
            Self::Other(name) => name,
        }
    }

    /// Text attributes when this is a text node.
    pub const fn text(&self) -> Option<&TextStyle> {
        match self {
            Self::Text(style) => Some(style),
            _ => None,
        }
    }
}

/// Read-only view of a design node as exposed by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStyleNode", into = "RawStyleNode")]
pub struct StyleNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub corner_radius: Option<f64>,
    pub opacity: Option<f64>,
    pub bound_variables: BoundVariables,
}

impl StyleNode {
    /// Bare node of the given kind with no visual attributes.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: None,
            width: None,
            height: None,
            corner_radius: None,
            opacity: None,
            bound_variables: BoundVariables::default(),
        }
    }

    /// First fill, if it is solid.
    pub fn solid_fill(&self) -> Option<&SolidPaint> {
        self.fills.first().and_then(Paint::as_solid)
    }

    /// First stroke, if it is solid.
    pub fn solid_stroke(&self) -> Option<&SolidPaint> {
        self.strokes.first().and_then(Paint::as_solid)
    }
}

/// Wire shape of a node: flat attributes with the text fields inlined.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStyleNode {
    id: String,
    name: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fills: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    strokes: Vec<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stroke_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    characters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_name: Option<FontName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_align_horizontal: Option<String>,
    #[serde(default)]
    bound_variables: BoundVariables,
}

impl From<RawStyleNode> for StyleNode {
    fn from(raw: RawStyleNode) -> Self {
        let kind = match raw.node_type.as_str() {
            "RECTANGLE" => NodeKind::Rectangle,
            "TEXT" => NodeKind::Text(TextStyle {
                characters: raw.characters.unwrap_or_default(),
                font_size: raw.font_size,
                font_name: raw.font_name,
                text_align_horizontal: raw.text_align_horizontal,
            }),
            "FRAME" => NodeKind::Frame,
            "COMPONENT" => NodeKind::Component,
            "INSTANCE" => NodeKind::Instance,
            _ => NodeKind::Other(raw.node_type),
        };

        Self {
            id: raw.id,
            name: raw.name,
            kind,
            fills: raw.fills,
            strokes: raw.strokes,
            stroke_weight: raw.stroke_weight,
            width: raw.width,
            height: raw.height,
            corner_radius: raw.corner_radius,
            opacity: raw.opacity,
            bound_variables: raw.bound_variables,
        }
    }
}

impl From<StyleNode> for RawStyleNode {
    fn from(node: StyleNode) -> Self {
        let node_type = node.kind.type_name().to_owned();
        let text = match node.kind {
            NodeKind::Text(style) => style,
            _ => TextStyle::default(),
        };

        Self {
            id: node.id,
            name: node.name,
            node_type,
            fills: node.fills,
            strokes: node.strokes,
            stroke_weight: node.stroke_weight,
            width: node.width,
            height: node.height,
            corner_radius: node.corner_radius,
            opacity: node.opacity,
            characters: Some(text.characters).filter(|chars| !chars.is_empty()),
            font_size: text.font_size,
            font_name: text.font_name,
            text_align_horizontal: text.text_align_horizontal,
            bound_variables: node.bound_variables,
        }
    }
}

/// Resolved type of a document variable; unlisted host types keep their name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum VariableType {
    Color,
    Float,
    String,
    Boolean,
    Other(String),
}

impl VariableType {
    /// Host spelling of the type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Color => "COLOR",
            Self::Float => "FLOAT",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for VariableType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "COLOR" => Self::Color,
            "FLOAT" => Self::Float,
            "STRING" => Self::String,
            "BOOLEAN" => Self::Boolean,
            _ => Self::Other(value),
        }
    }
}

impl From<VariableType> for String {
    fn from(value: VariableType) -> Self {
        match value {
            VariableType::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

/// Reference from one variable's mode value to another variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AliasValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// Raw value a variable holds for one mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum VariableValue {
    Color(HostColor),
    Alias(AliasValue),
    /// Kept as written by the host so integers stay integers.
    Number(serde_json::Number),
    Boolean(bool),
    Text(String),
}

/// Named mode of a variable collection (e.g. `Light`, `Dark`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VariableMode {
    pub mode_id: String,
    pub name: String,
}

/// Variable defined in the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVariable {
    pub id: String,
    pub name: String,
    pub resolved_type: VariableType,
    /// Values keyed by mode id.
    #[serde(default)]
    pub values_by_mode: IndexMap<String, VariableValue>,
}

/// Group of variables sharing a set of modes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub modes: Vec<VariableMode>,
    #[serde(default)]
    pub variables: Vec<DocumentVariable>,
}

/// Request to create a named paint style in the host document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaintStyleRequest {
    pub name: String,
    pub paints: Vec<Paint>,
}
