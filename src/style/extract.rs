use crate::{
    colors::convert::rgba_to_hex,
    host::models::{NodeKind, StyleNode, VariableAlias},
};

/// Text shown for text nodes without content.
const SAMPLE_TEXT: &str = "Sample Text";
/// Class shared by every generated element.
const BASE_CLASS: &str = "figma-element";

/// HTML fragment and matching CSS rule generated for a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub html: String,
    pub css: String,
}

/// Build the CSS declarations for a node, in a fixed property order.
///
/// With `use_variables`, attributes bound to a variable are emitted as
/// `var(--name, literal)` so the literal survives when the custom property is undefined.
pub fn extract_style(node: &StyleNode, use_variables: bool) -> Vec<String> {
    let bound = &node.bound_variables;
    let mut styles = Vec::new();

    if let Some(fill) = node.solid_fill() {
        let color = rgba_to_hex(fill.color.into());
        styles.push(declaration(
            "background-color",
            &color,
            fill.color_variable.as_ref(),
            use_variables,
        ));
    }

    if let Some(stroke) = node.solid_stroke() {
        let color = rgba_to_hex(stroke.color.into());
        let weight = node.stroke_weight.filter(|w| *w != 0.0).unwrap_or(1.0);
        let color = wrap_variable(&color, stroke.color_variable.as_ref(), use_variables);
        styles.push(format!("border: {weight}px solid {color};"));
    }

    if let Some(width) = node.width.filter(|w| *w != 0.0) {
        styles.push(declaration("width", &px(width), bound.width.as_ref(), use_variables));
    }

    if let Some(height) = node.height.filter(|h| *h != 0.0) {
        styles.push(declaration("height", &px(height), bound.height.as_ref(), use_variables));
    }

    if let Some(radius) = node.corner_radius {
        styles.push(declaration(
            "border-radius",
            &px(radius),
            bound.corner_radius.as_ref(),
            use_variables,
        ));
    }

    if let Some(opacity) = node.opacity.filter(|o| *o != 1.0) {
        styles.push(declaration(
            "opacity",
            &opacity.to_string(),
            bound.opacity.as_ref(),
            use_variables,
        ));
    }

    if let Some(text) = node.kind.text() {
        if let Some(size) = text.font_size.filter(|s| *s != 0.0) {
            styles.push(declaration("font-size", &px(size), bound.font_size.as_ref(), use_variables));
        }

        if let Some(font) = &text.font_name {
            styles.push(format!("font-family: \"{}\", sans-serif;", font.family));
        }

        if let Some(align) = text.text_align_horizontal.as_deref().filter(|a| !a.is_empty()) {
            styles.push(format!("text-align: {};", css_text_align(align)));
        }

        if let Some(fill) = node.solid_fill() {
            let color = rgba_to_hex(fill.color.into());
            styles.push(declaration("color", &color, fill.color_variable.as_ref(), use_variables));
        }
    }

    styles
}

/// Render a node as a single HTML element plus one CSS class rule.
pub fn generate_markup(node: &StyleNode, use_variables: bool) -> Markup {
    let (tag, class) = element_for(&node.kind);
    let body = match node.kind.text() {
        Some(text) if !text.characters.is_empty() => text.characters.as_str(),
        Some(_) => SAMPLE_TEXT,
        None => node.name.as_str(),
    };
    let classes = if class == BASE_CLASS {
        BASE_CLASS.to_owned()
    } else {
        format!("{BASE_CLASS} {class}")
    };

    let html = format!("<{tag} class=\"{classes}\">{}</{tag}>", escape_html(body));
    let css = format!(
        ".{class} {{\n  {}\n}}",
        extract_style(node, use_variables).join("\n  ")
    );

    Markup { html, css }
}

/// Map a host text alignment to its CSS value; unknown values read as `left`.
pub fn css_text_align(align: &str) -> &'static str {
    match align {
        "CENTER" => "center",
        "RIGHT" => "right",
        "JUSTIFIED" => "justify",
        _ => "left",
    }
}

/// Format a dimension the way CSS literals are written by the inspector.
pub(crate) fn px(value: f64) -> String {
    format!("{value}px")
}

const fn element_for(kind: &NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Rectangle => ("div", "figma-rectangle"),
        NodeKind::Text(_) => ("p", "figma-text"),
        NodeKind::Frame => ("div", "figma-frame"),
        NodeKind::Component | NodeKind::Instance => ("div", "figma-component"),
        NodeKind::Other(_) => ("div", BASE_CLASS),
    }
}

fn declaration(
    property: &str,
    literal: &str,
    variable: Option<&VariableAlias>,
    use_variables: bool,
) -> String {
    format!("{property}: {};", wrap_variable(literal, variable, use_variables))
}

fn wrap_variable(literal: &str, variable: Option<&VariableAlias>, use_variables: bool) -> String {
    match variable {
        Some(alias) if use_variables => format!("var(--{}, {literal})", alias.name),
        _ => literal.to_owned(),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
