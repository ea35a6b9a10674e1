use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use utoipa::ToSchema;

use crate::{
    colors::convert::rgba_to_hex,
    host::models::{DocumentVariable, VariableCollection, VariableType, VariableValue},
};

/// Value reported when a variable has nothing usable for the selected mode.
const UNKNOWN_VALUE: &str = "unknown";

/// Which mode's value is reported for each variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSelection {
    /// The collection's first mode.
    #[default]
    First,
    /// The mode with this name, falling back to the first one when a collection lacks it.
    Named(String),
}

/// One document variable resolved for display.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct VariableSummary {
    pub name: String,
    /// Hex string for colors, the raw mode value otherwise, or `"unknown"`.
    #[schema(value_type = Object)]
    pub value: Value,
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub variable_type: VariableType,
    pub collection: String,
}

/// Resolve every variable of every collection, collections first then variables, in order.
pub fn list_variables(
    collections: &[VariableCollection],
    mode: &ModeSelection,
) -> Vec<VariableSummary> {
    collections
        .iter()
        .flat_map(|collection| {
            let mode_id = select_mode(collection, mode);
            collection
                .variables
                .iter()
                .map(move |variable| VariableSummary {
                    name: variable.name.clone(),
                    value: resolve_value(variable, mode_id),
                    variable_type: variable.resolved_type.clone(),
                    collection: collection.name.clone(),
                })
        })
        .collect()
}

/// Mode id to read in this collection; `None` when the collection declares no modes.
fn select_mode<'a>(collection: &'a VariableCollection, mode: &ModeSelection) -> Option<&'a str> {
    let first = collection.modes.first().map(|m| m.mode_id.as_str());
    match mode {
        ModeSelection::First => first,
        ModeSelection::Named(name) => collection
            .modes
            .iter()
            .find(|m| &m.name == name)
            .map(|m| m.mode_id.as_str())
            .or_else(|| {
                warn!(
                    collection = %collection.name,
                    mode = %name,
                    "mode not found in collection; using first mode"
                );
                first
            }),
    }
}

fn resolve_value(variable: &DocumentVariable, mode_id: Option<&str>) -> Value {
    let raw = match mode_id {
        Some(id) => variable.values_by_mode.get(id),
        None => variable.values_by_mode.values().next(),
    };

    match (&variable.resolved_type, raw) {
        (VariableType::Color, Some(VariableValue::Color(color))) => {
            Value::String(rgba_to_hex((*color).into()))
        }
        (VariableType::Color, _) | (_, None) => Value::from(UNKNOWN_VALUE),
        (_, Some(value)) => serde_json::to_value(value).unwrap_or_else(|err| {
            warn!(variable = %variable.name, error = %err, "unserializable variable value");
            Value::from(UNKNOWN_VALUE)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collections() -> Vec<VariableCollection> {
        serde_json::from_value(json!([
            {
                "id": "c1",
                "name": "Colors",
                "modes": [
                    { "modeId": "m1", "name": "Light" },
                    { "modeId": "m2", "name": "Dark" }
                ],
                "variables": [
                    {
                        "id": "v1",
                        "name": "brand",
                        "resolvedType": "COLOR",
                        "valuesByMode": {
                            "m1": { "r": 1, "g": 0, "b": 0, "a": 1 },
                            "m2": { "r": 0, "g": 0, "b": 0, "a": 1 }
                        }
                    },
                    {
                        "id": "v2",
                        "name": "accent",
                        "resolvedType": "COLOR",
                        "valuesByMode": { "m1": { "type": "VARIABLE_ALIAS", "id": "v1" } }
                    }
                ]
            },
            {
                "id": "c2",
                "name": "Spacing",
                "modes": [{ "modeId": "s1", "name": "Default" }],
                "variables": [
                    {
                        "id": "v3",
                        "name": "gap",
                        "resolvedType": "FLOAT",
                        "valuesByMode": { "s1": 8 }
                    },
                    {
                        "id": "v4",
                        "name": "font",
                        "resolvedType": "STRING",
                        "valuesByMode": { "s1": "Inter" }
                    },
                    {
                        "id": "v5",
                        "name": "empty",
                        "resolvedType": "BOOLEAN",
                        "valuesByMode": {}
                    }
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn first_mode_resolution_across_collections() {
        let listed = serde_json::to_value(list_variables(&collections(), &ModeSelection::First))
            .unwrap();
        assert_eq!(
            listed,
            json!([
                { "name": "brand", "value": "#ff0000", "type": "COLOR", "collection": "Colors" },
                { "name": "accent", "value": "unknown", "type": "COLOR", "collection": "Colors" },
                { "name": "gap", "value": 8, "type": "FLOAT", "collection": "Spacing" },
                { "name": "font", "value": "Inter", "type": "STRING", "collection": "Spacing" },
                { "name": "empty", "value": "unknown", "type": "BOOLEAN", "collection": "Spacing" },
            ])
        );
    }

    #[test]
    fn named_mode_is_used_where_present() {
        let listed = list_variables(&collections(), &ModeSelection::Named("Dark".into()));
        assert_eq!(listed[0].value, json!("#000000"));
        assert_eq!(listed[1].value, json!("unknown"));
        // Spacing has no Dark mode and falls back to its first one.
        assert_eq!(listed[2].value, json!(8));
    }

    #[test]
    fn collection_without_modes_reads_first_stored_value() {
        let collection: VariableCollection = serde_json::from_value(json!({
            "id": "c3",
            "name": "Loose",
            "variables": [{
                "id": "v6",
                "name": "radius",
                "resolvedType": "FLOAT",
                "valuesByMode": { "x": 4, "y": 6 }
            }]
        }))
        .unwrap();

        let listed = list_variables(&[collection], &ModeSelection::First);
        assert_eq!(listed[0].value, json!(4));
    }

    #[test]
    fn unlisted_types_pass_raw_values_through() {
        let collection: VariableCollection = serde_json::from_value(json!({
            "id": "c4",
            "name": "Effects",
            "modes": [{ "modeId": "e1", "name": "Default" }],
            "variables": [
                {
                    "id": "v7",
                    "name": "blur",
                    "resolvedType": "EFFECT",
                    "valuesByMode": { "e1": 2.5 }
                },
                {
                    "id": "v8",
                    "name": "layers",
                    "resolvedType": "FLOAT",
                    "valuesByMode": { "e1": 3 }
                }
            ]
        }))
        .unwrap();

        let listed = serde_json::to_value(list_variables(&[collection], &ModeSelection::First))
            .unwrap();
        assert_eq!(
            listed,
            json!([
                { "name": "blur", "value": 2.5, "type": "EFFECT", "collection": "Effects" },
                { "name": "layers", "value": 3, "type": "FLOAT", "collection": "Effects" },
            ])
        );
    }

    #[test]
    fn mode_selection_config_shape() {
        let first: ModeSelection = serde_json::from_value(json!("first")).unwrap();
        let named: ModeSelection = serde_json::from_value(json!({ "named": "Dark" })).unwrap();
        assert_eq!(first, ModeSelection::First);
        assert_eq!(named, ModeSelection::Named("Dark".into()));
    }

    #[test]
    fn no_collections_no_variables() {
        assert!(list_variables(&[], &ModeSelection::First).is_empty());
    }
}
