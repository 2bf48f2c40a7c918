//! Schema descriptors for data sources and manifests. An `Attribute` knows both its Terraform
//! name and the name of the field in the Kubernetes object it maps to, so the schema is the one
//! place where the snake_case <-> camelCase mapping is defined.
pub mod validators;

use crate::diag::{AttributePath, Diagnostics};

use serde_json::{Map, Value};

pub use self::validators::Validator;

/// Whether an attribute must be set by the user, may be set by the user, or is populated by the
/// provider. Exactly one applies to each attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    Computed,
}

/// The type of the elements of a primitive list or map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    String,
    Int64,
    Float64,
    Bool,
}

impl ElementType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            ElementType::String => value.is_string(),
            ElementType::Int64 => value.is_i64() || value.is_u64(),
            ElementType::Float64 => value.is_number(),
            ElementType::Bool => value.is_boolean(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ElementType::String => "string",
            ElementType::Int64 => "number",
            ElementType::Float64 => "number",
            ElementType::Bool => "bool",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Int64,
    Float64,
    Bool,
    /// Any json document. Used for fields that Kubernetes stores without a schema.
    Dynamic,
    List(ElementType),
    Map(ElementType),
    Object(Vec<Attribute>),
    ListNested(Vec<Attribute>),
    MapNested(Vec<Attribute>),
}

impl AttributeType {
    fn type_name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Int64 | AttributeType::Float64 => "number",
            AttributeType::Bool => "bool",
            AttributeType::Dynamic => "dynamic",
            AttributeType::List(_) | AttributeType::ListNested(_) => "list",
            AttributeType::Map(_) | AttributeType::MapNested(_) | AttributeType::Object(_) => {
                "object"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// The Terraform attribute name
    pub name: &'static str,
    /// The field name on the wire, or `None` for attributes that only exist in Terraform state
    pub json_name: Option<&'static str>,
    pub ty: AttributeType,
    pub presence: Presence,
    pub description: &'static str,
    pub validators: Vec<Validator>,
}

impl Attribute {
    pub fn new(name: &'static str, json_name: &'static str, ty: AttributeType) -> Attribute {
        Attribute {
            name,
            json_name: Some(json_name),
            ty,
            presence: Presence::Optional,
            description: "",
            validators: Vec::new(),
        }
    }

    pub fn string(name: &'static str, json_name: &'static str) -> Attribute {
        Attribute::new(name, json_name, AttributeType::String)
    }

    pub fn int64(name: &'static str, json_name: &'static str) -> Attribute {
        Attribute::new(name, json_name, AttributeType::Int64)
    }

    pub fn float64(name: &'static str, json_name: &'static str) -> Attribute {
        Attribute::new(name, json_name, AttributeType::Float64)
    }

    pub fn bool(name: &'static str, json_name: &'static str) -> Attribute {
        Attribute::new(name, json_name, AttributeType::Bool)
    }

    pub fn dynamic(name: &'static str, json_name: &'static str) -> Attribute {
        Attribute::new(name, json_name, AttributeType::Dynamic)
    }

    pub fn list(name: &'static str, json_name: &'static str, element: ElementType) -> Attribute {
        Attribute::new(name, json_name, AttributeType::List(element))
    }

    pub fn string_list(name: &'static str, json_name: &'static str) -> Attribute {
        Attribute::list(name, json_name, ElementType::String)
    }

    pub fn map(name: &'static str, json_name: &'static str, element: ElementType) -> Attribute {
        Attribute::new(name, json_name, AttributeType::Map(element))
    }

    pub fn string_map(name: &'static str, json_name: &'static str) -> Attribute {
        Attribute::map(name, json_name, ElementType::String)
    }

    pub fn object(
        name: &'static str,
        json_name: &'static str,
        attributes: Vec<Attribute>,
    ) -> Attribute {
        Attribute::new(name, json_name, AttributeType::Object(attributes))
    }

    pub fn list_nested(
        name: &'static str,
        json_name: &'static str,
        attributes: Vec<Attribute>,
    ) -> Attribute {
        Attribute::new(name, json_name, AttributeType::ListNested(attributes))
    }

    pub fn map_nested(
        name: &'static str,
        json_name: &'static str,
        attributes: Vec<Attribute>,
    ) -> Attribute {
        Attribute::new(name, json_name, AttributeType::MapNested(attributes))
    }

    /// Marks this attribute as existing only in Terraform state, never on the wire
    pub fn state_only(mut self) -> Attribute {
        self.json_name = None;
        self
    }

    pub fn required(mut self) -> Attribute {
        self.presence = Presence::Required;
        self
    }

    pub fn optional(mut self) -> Attribute {
        self.presence = Presence::Optional;
        self
    }

    pub fn computed(mut self) -> Attribute {
        self.presence = Presence::Computed;
        self
    }

    pub fn description(mut self, description: &'static str) -> Attribute {
        self.description = description;
        self
    }

    pub fn validator(mut self, validator: Validator) -> Attribute {
        self.validators.push(validator);
        self
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn is_optional(&self) -> bool {
        self.presence == Presence::Optional
    }

    pub fn is_computed(&self) -> bool {
        self.presence == Presence::Computed
    }

    pub fn nested_attributes(&self) -> Option<&[Attribute]> {
        match &self.ty {
            AttributeType::Object(attrs)
            | AttributeType::ListNested(attrs)
            | AttributeType::MapNested(attrs) => Some(attrs.as_slice()),
            _ => None,
        }
    }

    /// Converts this attribute and everything nested under it into computed attributes, which
    /// is how the data source flavor of a kind exposes the fields it reads from the cluster.
    /// Validators are dropped, since computed values are never validated.
    pub fn into_computed(self) -> Attribute {
        let ty = match self.ty {
            AttributeType::Object(attrs) => AttributeType::Object(all_computed(attrs)),
            AttributeType::ListNested(attrs) => AttributeType::ListNested(all_computed(attrs)),
            AttributeType::MapNested(attrs) => AttributeType::MapNested(all_computed(attrs)),
            other => other,
        };
        Attribute {
            ty,
            presence: Presence::Computed,
            validators: Vec::new(),
            ..self
        }
    }
}

fn all_computed(attributes: Vec<Attribute>) -> Vec<Attribute> {
    attributes.into_iter().map(Attribute::into_computed).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub description: String,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>, attributes: Vec<Attribute>) -> Schema {
        Schema {
            description: description.into(),
            attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Visits every attribute, depth first, along with its path. Elements of nested lists and
    /// maps are not expanded, so the path of an attribute nested in a list points at the list.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&AttributePath, &Attribute),
    {
        fn walk_attrs<F>(parent: Option<&AttributePath>, attrs: &[Attribute], visit: &mut F)
        where
            F: FnMut(&AttributePath, &Attribute),
        {
            for attr in attrs {
                let path = child_path(parent, attr.name);
                visit(&path, attr);
                if let Some(nested) = attr.nested_attributes() {
                    walk_attrs(Some(&path), nested, visit);
                }
            }
        }
        walk_attrs(None, self.attributes.as_slice(), &mut visit);
    }

    /// Applies the same checks Terraform makes before a read: required attributes must be
    /// present, computed attributes must not be set, values must have the declared type, and
    /// validators must accept the value.
    pub fn validate_config(&self, config: &Value) -> Diagnostics {
        let mut diags = Diagnostics::new();
        match config.as_object() {
            Some(obj) => validate_attributes(None, &self.attributes, obj, &mut diags),
            None => diags.add_error(
                "Invalid Configuration",
                format!("Expected the configuration to be an object, got: {}", config),
            ),
        }
        diags
    }
}

fn child_path(parent: Option<&AttributePath>, name: &str) -> AttributePath {
    match parent {
        Some(path) => path.attribute(name),
        None => AttributePath::root(name),
    }
}

fn validate_attributes(
    parent: Option<&AttributePath>,
    attributes: &[Attribute],
    config: &Map<String, Value>,
    diags: &mut Diagnostics,
) {
    for key in config.keys() {
        if !attributes.iter().any(|attr| attr.name == key.as_str()) {
            diags.add_attribute_error(
                &child_path(parent, key),
                "Unsupported argument",
                format!("An argument named \"{}\" is not expected here.", key),
            );
        }
    }

    for attr in attributes {
        let path = child_path(parent, attr.name);
        let value = config.get(attr.name).unwrap_or(&Value::Null);
        if value.is_null() {
            if attr.is_required() {
                diags.add_attribute_error(
                    &path,
                    "Missing required argument",
                    format!(
                        "The argument \"{}\" is required, but no definition was found.",
                        attr.name
                    ),
                );
            }
            continue;
        }
        if attr.is_computed() {
            diags.add_attribute_error(
                &path,
                "Invalid Configuration for Read-Only Attribute",
                "Cannot set value for this attribute as the provider has marked it as read-only. Remove the configuration line setting the value.",
            );
            continue;
        }
        if check_type(&path, &attr.ty, value, diags) {
            for validator in attr.validators.iter() {
                validator.validate(&path, value, diags);
            }
        }
    }
}

fn type_mismatch(path: &AttributePath, expected: &str, value: &Value, diags: &mut Diagnostics) {
    diags.add_attribute_error(
        path,
        "Incorrect attribute value type",
        format!("Inappropriate value for attribute: {} required, got: {}", expected, value),
    );
}

/// Returns true if the value has the expected type. Nested attributes are validated as part of
/// the check, reporting their own diagnostics.
fn check_type(
    path: &AttributePath,
    ty: &AttributeType,
    value: &Value,
    diags: &mut Diagnostics,
) -> bool {
    let matches = match ty {
        AttributeType::String => value.is_string(),
        AttributeType::Int64 => value.is_i64() || value.is_u64(),
        AttributeType::Float64 => value.is_number(),
        AttributeType::Bool => value.is_boolean(),
        AttributeType::Dynamic => true,
        AttributeType::List(element) => match value.as_array() {
            Some(items) => {
                let mut all_match = true;
                for (i, item) in items.iter().enumerate() {
                    if !element.matches(item) {
                        type_mismatch(&path.index(i), element.type_name(), item, diags);
                        all_match = false;
                    }
                }
                return all_match;
            }
            None => false,
        },
        AttributeType::Map(element) => match value.as_object() {
            Some(entries) => {
                let mut all_match = true;
                for (key, item) in entries.iter() {
                    if !element.matches(item) {
                        type_mismatch(&path.key(key), element.type_name(), item, diags);
                        all_match = false;
                    }
                }
                return all_match;
            }
            None => false,
        },
        AttributeType::Object(attrs) => match value.as_object() {
            Some(obj) => {
                validate_attributes(Some(path), attrs, obj, diags);
                true
            }
            None => false,
        },
        AttributeType::ListNested(attrs) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = path.index(i);
                    match item.as_object() {
                        Some(obj) => validate_attributes(Some(&item_path), attrs, obj, diags),
                        None => type_mismatch(&item_path, "object", item, diags),
                    }
                }
                true
            }
            None => false,
        },
        AttributeType::MapNested(attrs) => match value.as_object() {
            Some(entries) => {
                for (key, item) in entries.iter() {
                    let item_path = path.key(key);
                    match item.as_object() {
                        Some(obj) => validate_attributes(Some(&item_path), attrs, obj, diags),
                        None => type_mismatch(&item_path, "object", item, diags),
                    }
                }
                true
            }
            None => false,
        },
    };
    if !matches {
        type_mismatch(path, ty.type_name(), value, diags);
    }
    matches
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn test_schema() -> Schema {
        Schema::new(
            "test",
            vec![
                Attribute::string("id", "id").state_only().computed(),
                Attribute::object(
                    "metadata",
                    "metadata",
                    vec![
                        Attribute::string("name", "name")
                            .required()
                            .validator(Validator::Name),
                        Attribute::string_map("labels", "labels").validator(Validator::Labels),
                    ],
                )
                .required(),
                Attribute::object(
                    "spec",
                    "spec",
                    vec![
                        Attribute::int64("min_available", "minAvailable"),
                        Attribute::list_nested(
                            "containers",
                            "containers",
                            vec![
                                Attribute::string("name", "name").required(),
                                Attribute::string_list("args", "args"),
                            ],
                        ),
                    ],
                ),
            ],
        )
    }

    fn error_summaries(diags: &Diagnostics) -> Vec<String> {
        diags
            .errors()
            .map(|d| match d.attribute.as_ref() {
                Some(path) => format!("{}: {}", path, d.summary),
                None => d.summary.clone(),
            })
            .collect()
    }

    #[test]
    fn valid_config_produces_no_diagnostics() {
        let config = json!({
            "id": null,
            "metadata": { "name": "foo", "labels": { "app": "bar" } },
            "spec": {
                "min_available": 2,
                "containers": [ { "name": "main", "args": ["--verbose"] } ]
            }
        });
        let diags = test_schema().validate_config(&config);
        assert!(diags.is_empty(), "unexpected diagnostics: {:?}", diags);
    }

    #[test]
    fn missing_required_and_read_only_attributes_are_reported() {
        let config = json!({
            "id": "foo/bar",
            "metadata": { "labels": null },
            "spec": { "containers": [ { "args": [] } ] }
        });
        let diags = test_schema().validate_config(&config);
        assert_eq!(
            vec![
                "id: Invalid Configuration for Read-Only Attribute".to_owned(),
                "metadata.name: Missing required argument".to_owned(),
                "spec.containers[0].name: Missing required argument".to_owned(),
            ],
            error_summaries(&diags)
        );
    }

    #[test]
    fn type_mismatches_are_reported_at_the_element() {
        let config = json!({
            "metadata": { "name": "foo" },
            "spec": {
                "min_available": "two",
                "containers": [ { "name": "main", "args": ["ok", 3] } ]
            }
        });
        let diags = test_schema().validate_config(&config);
        assert_eq!(
            vec![
                "spec.min_available: Incorrect attribute value type".to_owned(),
                "spec.containers[0].args[1]: Incorrect attribute value type".to_owned(),
            ],
            error_summaries(&diags)
        );
    }

    #[test]
    fn validators_run_on_present_values() {
        let config = json!({
            "metadata": { "name": "Not_Valid", "labels": { "-bad": "value" } },
        });
        let diags = test_schema().validate_config(&config);
        assert_eq!(
            vec![
                "metadata.name: Invalid Attribute Value".to_owned(),
                "metadata.labels[\"-bad\"]: Invalid Attribute Value".to_owned(),
            ],
            error_summaries(&diags)
        );
    }

    #[test]
    fn unknown_attributes_are_rejected() {
        let config = json!({
            "metadata": { "name": "foo", "uid": "123" },
        });
        let diags = test_schema().validate_config(&config);
        assert_eq!(
            vec!["metadata.uid: Unsupported argument".to_owned()],
            error_summaries(&diags)
        );
    }

    #[test]
    fn into_computed_applies_to_the_whole_tree() {
        let schema = test_schema();
        let spec = schema.attribute("spec").unwrap().clone().into_computed();
        let computed = Schema::new("computed", vec![spec]);
        let mut count = 0;
        computed.walk(|path, attr| {
            count += 1;
            assert!(attr.is_computed(), "{} is not computed", path);
            assert!(attr.validators.is_empty());
        });
        assert_eq!(5, count);
    }

    #[test]
    fn walk_visits_nested_attributes_with_paths() {
        let mut paths = Vec::new();
        test_schema().walk(|path, _| paths.push(path.to_string()));
        assert_eq!(
            vec![
                "id",
                "metadata",
                "metadata.name",
                "metadata.labels",
                "spec",
                "spec.min_available",
                "spec.containers",
                "spec.containers.name",
                "spec.containers.args",
            ],
            paths
        );
    }
}
