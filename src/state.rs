//! Conversion between Terraform state and Kubernetes objects.
//!
//! Terraform state uses the snake_case attribute names, and every attribute in the schema is
//! present, with `null` for anything that isn't set. Kubernetes objects use the camelCase field
//! names and leave out anything that isn't set. The schema is the only source for the mapping
//! between the two, so a value converted in one direction and back again is unchanged.
use crate::schema::{Attribute, AttributeType};

use serde_json::{Map, Value};

/// Converts a Kubernetes object into Terraform state. Fields on the wire that have no attribute
/// in the schema are dropped, and attributes without a wire name (like `id`) are set to null.
pub fn from_wire(attributes: &[Attribute], wire: &Value) -> Value {
    let empty = Map::new();
    let wire = wire.as_object().unwrap_or(&empty);
    let mut state = Map::with_capacity(attributes.len());
    for attr in attributes {
        let value = attr
            .json_name
            .and_then(|json_name| wire.get(json_name))
            .filter(|value| !value.is_null())
            .map(|value| convert(&attr.ty, value, from_wire))
            .unwrap_or(Value::Null);
        state.insert(attr.name.to_owned(), value);
    }
    Value::Object(state)
}

/// Converts Terraform state into a Kubernetes object. Null attributes and attributes without a
/// wire name are left out.
pub fn to_wire(attributes: &[Attribute], state: &Value) -> Value {
    let empty = Map::new();
    let state = state.as_object().unwrap_or(&empty);
    let mut wire = Map::new();
    for attr in attributes {
        let json_name = match attr.json_name {
            Some(json_name) => json_name,
            None => continue,
        };
        match state.get(attr.name) {
            Some(value) if !value.is_null() => {
                wire.insert(json_name.to_owned(), convert(&attr.ty, value, to_wire));
            }
            _ => {}
        }
    }
    Value::Object(wire)
}

/// Applies `convert_object` to every nested object under the given value, leaving primitive
/// values as they are
fn convert(ty: &AttributeType, value: &Value, convert_object: fn(&[Attribute], &Value) -> Value) -> Value {
    match (ty, value) {
        (AttributeType::Object(attrs), Value::Object(_)) => convert_object(attrs, value),
        (AttributeType::ListNested(attrs), Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| convert_object(attrs, item))
                .collect(),
        ),
        (AttributeType::MapNested(attrs), Value::Object(entries)) => Value::Object(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), convert_object(attrs, item)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schema::Attribute;
    use serde_json::json;

    fn attributes() -> Vec<Attribute> {
        vec![
            Attribute::string("id", "id").state_only(),
            Attribute::string("api_version", "apiVersion"),
            Attribute::object(
                "spec",
                "spec",
                vec![
                    Attribute::int64("min_available", "minAvailable"),
                    Attribute::dynamic("generic_template", "generictemplate"),
                    Attribute::map_nested(
                        "replica_specs",
                        "replicaSpecs",
                        vec![
                            Attribute::int64("replicas", "replicas"),
                            Attribute::string("restart_policy", "restartPolicy"),
                        ],
                    ),
                    Attribute::list_nested(
                        "node_selector_terms",
                        "nodeSelectorTerms",
                        vec![Attribute::string_map("match_labels", "matchLabels")],
                    ),
                ],
            ),
        ]
    }

    #[test]
    fn wire_object_is_converted_to_state_with_nulls_for_absent_attributes() {
        let wire = json!({
            "apiVersion": "example.com/v1",
            "status": { "ignored": true },
            "spec": {
                "generictemplate": { "apiVersion": "v1", "kind": "Pod", "someField": 1 },
                "replicaSpecs": { "Worker": { "replicas": 3 } },
                "nodeSelectorTerms": [ { "matchLabels": { "zone": "a" } } ]
            }
        });
        let state = from_wire(&attributes(), &wire);
        let expected = json!({
            "id": null,
            "api_version": "example.com/v1",
            "spec": {
                "min_available": null,
                "generic_template": { "apiVersion": "v1", "kind": "Pod", "someField": 1 },
                "replica_specs": { "Worker": { "replicas": 3, "restart_policy": null } },
                "node_selector_terms": [ { "match_labels": { "zone": "a" } } ]
            }
        });
        assert_eq!(expected, state);
    }

    #[test]
    fn state_is_converted_to_wire_object_without_nulls() {
        let state = json!({
            "id": "foo/bar",
            "api_version": null,
            "spec": {
                "min_available": 1,
                "generic_template": null,
                "replica_specs": { "PS": { "replicas": null, "restart_policy": "Never" } },
                "node_selector_terms": null
            }
        });
        let wire = to_wire(&attributes(), &state);
        let expected = json!({
            "spec": {
                "minAvailable": 1,
                "replicaSpecs": { "PS": { "restartPolicy": "Never" } }
            }
        });
        assert_eq!(expected, wire);
    }

    #[test]
    fn state_round_trips_through_wire_format() {
        let state = json!({
            "id": null,
            "api_version": "example.com/v1",
            "spec": {
                "min_available": 4,
                "generic_template": null,
                "replica_specs": null,
                "node_selector_terms": [ { "match_labels": null } ]
            }
        });
        let attrs = attributes();
        assert_eq!(state, from_wire(&attrs, &to_wire(&attrs, &state)));
    }
}
