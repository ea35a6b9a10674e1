use utoipa::OpenApi;

#[derive(OpenApi)]
/// Schemas of every message exchanged between the plugins and their UIs.
#[openapi(
    info(title = "stylekit UI protocol"),
    components(
        schemas(
            crate::dto::inspector::InspectorInbound,
            crate::dto::inspector::InspectorOutbound,
            crate::dto::inspector::NodeSummary,
            crate::style::tokens::Token,
            crate::style::tokens::TokenKind,
            crate::style::tokens::TokenValue,
            crate::style::variables::VariableSummary,
            crate::dto::palette::PaletteInbound,
            crate::dto::palette::PaletteOutbound,
            crate::dto::palette::AddColorRequest,
            crate::dto::palette::PaletteColor,
        )
    )
)]
pub struct ProtocolDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_message_schema_is_registered() {
        let doc = ProtocolDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        for name in [
            "InspectorInbound",
            "InspectorOutbound",
            "PaletteInbound",
            "PaletteOutbound",
            "AddColorRequest",
            "Token",
        ] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
        assert!(doc.tags.is_none_or(|tags| tags.is_empty()));
    }
}
