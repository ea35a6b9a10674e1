//! Message contract of the palette generator plugin.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::colors::generator::{ColorEntry, GeneratedColor};

/// Base color submitted from the UI.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddColorRequest {
    #[validate(length(min = 1))]
    pub name: String,
    /// Degrees, `[0, 360)`.
    #[validate(range(min = 0.0, exclusive_max = 360.0))]
    pub hue: f64,
    /// Percent.
    #[validate(range(min = 0.0, max = 100.0))]
    pub saturation: f64,
    /// Percent.
    #[validate(range(min = 0.0, max = 100.0))]
    pub lightness: f64,
    /// Between 2 and 100 shades; labels run from 0 to 1000.
    #[validate(range(min = 2, max = 100))]
    pub shade_count: u32,
}

impl From<AddColorRequest> for ColorEntry {
    fn from(request: AddColorRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            hue: request.hue,
            saturation: request.saturation,
            lightness: request.lightness,
            shade_count: request.shade_count,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, PartialEq)]
/// Messages accepted from the palette UI.
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PaletteInbound {
    /// Append a base color to the session.
    AddColor(AddColorRequest),
    /// Generate the palette for every color added so far.
    GeneratePalette,
    /// Generate the palette and create a paint style per shade.
    Export,
    /// Drop every color added so far.
    ClearColors,
    /// Close the plugin.
    Cancel,
    #[serde(other)]
    Unknown,
}

/// One generated shade as shown in the UI.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaletteColor {
    pub name: String,
    pub hex: String,
    pub original_entry_id: Uuid,
}

impl From<GeneratedColor> for PaletteColor {
    fn from(color: GeneratedColor) -> Self {
        Self {
            name: color.name,
            hex: color.hex,
            original_entry_id: color.original_entry_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
/// Messages sent to the palette UI.
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PaletteOutbound {
    /// Palette generated from the session's colors.
    PaletteGenerated { colors: Vec<PaletteColor> },
    /// Number of paint styles created by an export.
    ExportComplete { count: usize },
    /// The inbound message could not be handled.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(hue: f64, saturation: f64, lightness: f64, shade_count: u32) -> AddColorRequest {
        AddColorRequest {
            name: "blue".into(),
            hue,
            saturation,
            lightness,
            shade_count,
        }
    }

    #[test]
    fn add_color_parses_camel_case_fields() {
        let message: PaletteInbound = serde_json::from_value(json!({
            "type": "add-color",
            "name": "blue",
            "hue": 210,
            "saturation": 50,
            "lightness": 50,
            "shadeCount": 5
        }))
        .unwrap();

        assert_eq!(message, PaletteInbound::AddColor(request(210.0, 50.0, 50.0, 5)));
    }

    #[test]
    fn bare_messages_parse() {
        for (kind, expected) in [
            ("generate-palette", PaletteInbound::GeneratePalette),
            ("export", PaletteInbound::Export),
            ("clear-colors", PaletteInbound::ClearColors),
            ("cancel", PaletteInbound::Cancel),
            ("shuffle", PaletteInbound::Unknown),
        ] {
            let parsed: PaletteInbound = serde_json::from_value(json!({ "type": kind })).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn ranges_are_validated() {
        assert!(request(210.0, 50.0, 50.0, 5).validate().is_ok());
        assert!(request(0.0, 0.0, 0.0, 2).validate().is_ok());
        assert!(request(360.0, 50.0, 50.0, 5).validate().is_err());
        assert!(request(-1.0, 50.0, 50.0, 5).validate().is_err());
        assert!(request(10.0, 101.0, 50.0, 5).validate().is_err());
        assert!(request(10.0, 50.0, 100.5, 5).validate().is_err());
        assert!(request(10.0, 50.0, 50.0, 1).validate().is_err());
        assert!(request(10.0, 50.0, 50.0, 0).validate().is_err());
        assert!(request(10.0, 50.0, 50.0, 100).validate().is_ok());
        assert!(request(10.0, 50.0, 50.0, 101).validate().is_err());
        assert!(request(10.0, 50.0, 50.0, 4_000_000_000).validate().is_err());

        let mut unnamed = request(10.0, 50.0, 50.0, 5);
        unnamed.name.clear();
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn entries_get_fresh_ids() {
        let a: ColorEntry = request(1.0, 2.0, 3.0, 4).into();
        let b: ColorEntry = request(1.0, 2.0, 3.0, 4).into();
        assert_ne!(a.id, b.id);
        assert_eq!(a.shade_count, 4);
    }

    #[test]
    fn palette_color_wire_shape() {
        let id = Uuid::nil();
        let message = PaletteOutbound::PaletteGenerated {
            colors: vec![PaletteColor {
                name: "blue-0".into(),
                hex: "#335C85".into(),
                original_entry_id: id,
            }],
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "palette-generated",
                "colors": [{ "name": "blue-0", "hex": "#335C85", "originalEntryId": id }]
            })
        );
        assert_eq!(
            serde_json::to_value(PaletteOutbound::ExportComplete { count: 5 }).unwrap(),
            json!({ "type": "export-complete", "count": 5 })
        );
    }
}
