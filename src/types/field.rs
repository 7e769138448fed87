use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_CLASS_NAME: &str = "form-control";

/// A single input element of a form.
///
/// Known attributes are typed; anything else the builder sends is kept in
/// `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub name: String,
    #[serde(default)]
    pub required: Required,
    #[serde(rename = "className", default = "default_class_name")]
    pub class_name: String,
    #[serde(default)]
    pub access: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<FieldValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_option: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_display_field: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_class_name() -> String {
    DEFAULT_CLASS_NAME.to_string()
}

impl Field {
    pub fn new(field_type: impl Into<String>, label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            label: label.into(),
            name: name.into(),
            required: Required::default(),
            class_name: default_class_name(),
            access: false,
            subtype: None,
            maxlength: None,
            multiple: None,
            values: None,
            conditions: None,
            sort_option: None,
            default_display_field: None,
            extra: Map::new(),
        }
    }
}

/// Builders send `required` either as a JSON bool or as a string such as
/// `"true"`; both are stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Required {
    Flag(bool),
    Text(String),
}

impl Default for Required {
    fn default() -> Self {
        Required::Flag(false)
    }
}

/// Option records for select-like fields, either as a list or keyed by option
/// name. Keyed options keep the order they were submitted in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValues {
    List(Vec<Map<String, Value>>),
    Keyed(Map<String, Value>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_applied() {
        let field: Field =
            serde_json::from_value(json!({"type": "text", "label": "Name", "name": "name"})).unwrap();

        assert_eq!(field.required, Required::Flag(false));
        assert_eq!(field.class_name, "form-control");
        assert!(!field.access);
        assert!(field.extra.is_empty());
    }

    #[test]
    fn test_required_accepts_bool_and_string() {
        let flag: Field = serde_json::from_value(
            json!({"type": "text", "label": "A", "name": "a", "required": true}),
        )
        .unwrap();
        let text: Field = serde_json::from_value(
            json!({"type": "text", "label": "B", "name": "b", "required": "true"}),
        )
        .unwrap();

        assert_eq!(flag.required, Required::Flag(true));
        assert_eq!(text.required, Required::Text("true".to_string()));

        let back = serde_json::to_value(&text).unwrap();
        assert_eq!(back["required"], json!("true"));
    }

    #[test]
    fn test_values_list_and_mapping() {
        let list: Field = serde_json::from_value(json!({
            "type": "select", "label": "Color", "name": "color",
            "values": [{"label": "Red", "value": "red"}, {"label": "Blue", "value": "blue"}]
        }))
        .unwrap();
        assert!(matches!(list.values, Some(FieldValues::List(ref v)) if v.len() == 2));

        let keyed: Field = serde_json::from_value(json!({
            "type": "select", "label": "Size", "name": "size",
            "values": {"s": {"label": "Small"}, "l": {"label": "Large"}}
        }))
        .unwrap();
        assert!(matches!(keyed.values, Some(FieldValues::Keyed(ref m)) if m.contains_key("s")));
    }

    #[test]
    fn test_submission_order_preserved() {
        let input = r#"{"type":"radio-group","label":"Size","name":"size","required":false,"className":"form-control","access":false,"values":{"small":{"label":"Small"},"medium":{"label":"Medium"},"large":{"label":"Large"}},"conditions":[{"when":"plan","is":"pro"}],"zeta":1,"alpha":{"y":true,"x":false}}"#;

        let field: Field = serde_json::from_str(input).unwrap();
        let keys: Vec<&str> = match &field.values {
            Some(FieldValues::Keyed(m)) => m.keys().map(String::as_str).collect(),
            other => panic!("expected keyed values, got {other:?}"),
        };
        assert_eq!(keys, ["small", "medium", "large"]);

        assert_eq!(serde_json::to_string(&field).unwrap(), input);
    }

    #[test]
    fn test_unknown_attributes_preserved() {
        let input = json!({
            "type": "textarea", "label": "Bio", "name": "bio",
            "rows": 4, "placeholder": "Tell us about yourself"
        });
        let field: Field = serde_json::from_value(input).unwrap();
        assert_eq!(field.extra.get("rows"), Some(&json!(4)));

        let out = serde_json::to_value(&field).unwrap();
        assert_eq!(out["placeholder"], json!("Tell us about yourself"));
        assert_eq!(out["className"], json!("form-control"));
        assert!(out.get("subtype").is_none());
    }

    #[test]
    fn test_explicit_null_optional_is_omitted() {
        let field: Field = serde_json::from_value(json!({
            "type": "text", "label": "Code", "name": "code",
            "subtype": null, "maxlength": null
        }))
        .unwrap();
        assert!(field.subtype.is_none());

        let out = serde_json::to_value(&field).unwrap();
        assert!(out.get("subtype").is_none());
        assert!(out.get("maxlength").is_none());
    }

    #[test]
    fn test_missing_label_rejected() {
        let result: serde_json::Result<Field> =
            serde_json::from_value(json!({"type": "text", "name": "x"}));
        assert!(result.is_err());
    }
}
