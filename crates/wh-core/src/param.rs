//! Parameter records and webhook payload envelopes.
//!
//! Field names follow the camelCase JSON produced by the schema extraction
//! tooling (`isRequired`, `childParamsGroups`, `bodyParameters`, ...).

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ParamType
// ---------------------------------------------------------------------------

/// Declared shape of a payload field.
///
/// Informational only: nothing checks payload values against it. Strings
/// outside the known set are kept verbatim in [`ParamType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParamType {
    ArrayOfObjectsOrNull,
    ArrayOfObjects,
    ArrayOfStringsOrNull,
    ArrayOfStrings,
    Array,
    BooleanOrNull,
    BooleanOrStringOrIntegerOrObject,
    Boolean,
    IntegerOrNull,
    IntegerOrStringOrNull,
    IntegerOrString,
    Integer,
    Null,
    Number,
    ObjectOrNull,
    ObjectOrObjectOrObjectOrObject,
    ObjectOrObject,
    ObjectOrString,
    Object,
    StringOrNull,
    StringOrNumber,
    StringOrObjectOrIntegerOrNull,
    StringOrObjectOrNull,
    StringOrObject,
    String,
    Other(std::string::String),
}

impl ParamType {
    /// The type string as it appears in the schema tables.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ArrayOfObjectsOrNull => "array of objects or null",
            Self::ArrayOfObjects => "array of objects",
            Self::ArrayOfStringsOrNull => "array of strings or null",
            Self::ArrayOfStrings => "array of strings",
            Self::Array => "array",
            Self::BooleanOrNull => "boolean or null",
            Self::BooleanOrStringOrIntegerOrObject => "boolean or string or integer or object",
            Self::Boolean => "boolean",
            Self::IntegerOrNull => "integer or null",
            Self::IntegerOrStringOrNull => "integer or string or null",
            Self::IntegerOrString => "integer or string",
            Self::Integer => "integer",
            Self::Null => "null",
            Self::Number => "number",
            Self::ObjectOrNull => "object or null",
            Self::ObjectOrObjectOrObjectOrObject => "object or object or object or object",
            Self::ObjectOrObject => "object or object",
            Self::ObjectOrString => "object or string",
            Self::Object => "object",
            Self::StringOrNull => "string or null",
            Self::StringOrNumber => "string or number",
            Self::StringOrObjectOrIntegerOrNull => "string or object or integer or null",
            Self::StringOrObjectOrNull => "string or object or null",
            Self::StringOrObject => "string or object",
            Self::String => "string",
            Self::Other(raw) => raw,
        }
    }
}

impl From<std::string::String> for ParamType {
    fn from(raw: std::string::String) -> Self {
        match raw.as_str() {
            "array of objects or null" => Self::ArrayOfObjectsOrNull,
            "array of objects" => Self::ArrayOfObjects,
            "array of strings or null" => Self::ArrayOfStringsOrNull,
            "array of strings" => Self::ArrayOfStrings,
            "array" => Self::Array,
            "boolean or null" => Self::BooleanOrNull,
            "boolean or string or integer or object" => Self::BooleanOrStringOrIntegerOrObject,
            "boolean" => Self::Boolean,
            "integer or null" => Self::IntegerOrNull,
            "integer or string or null" => Self::IntegerOrStringOrNull,
            "integer or string" => Self::IntegerOrString,
            "integer" => Self::Integer,
            "null" => Self::Null,
            "number" => Self::Number,
            "object or null" => Self::ObjectOrNull,
            "object or object or object or object" => Self::ObjectOrObjectOrObjectOrObject,
            "object or object" => Self::ObjectOrObject,
            "object or string" => Self::ObjectOrString,
            "object" => Self::Object,
            "string or null" => Self::StringOrNull,
            "string or number" => Self::StringOrNumber,
            "string or object or integer or null" => Self::StringOrObjectOrIntegerOrNull,
            "string or object or null" => Self::StringOrObjectOrNull,
            "string or object" => Self::StringOrObject,
            "string" => Self::String,
            _ => Self::Other(raw),
        }
    }
}

impl From<ParamType> for std::string::String {
    fn from(value: ParamType) -> Self {
        match value {
            ParamType::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Param
// ---------------------------------------------------------------------------

/// One field of a webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub r#type: ParamType,

    pub name: String,

    /// Parameter location. Always `"body"` for webhook payloads.
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default)]
    pub is_required: bool,

    #[serde(default)]
    pub description: String,

    /// Nested fields when this field is itself an object or array of objects.
    ///
    /// Always stored as full records, never as references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_params_groups: Option<Vec<Param>>,

    /// Allowed literal values, when the field is an enumeration.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

impl Param {
    /// Nested fields, or an empty slice for a leaf.
    #[must_use]
    pub fn child_params(&self) -> &[Self] {
        self.child_params_groups.as_deref().unwrap_or_default()
    }

    /// A field with at least one nested field is object-shaped.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        !self.child_params().is_empty()
    }
}

/// A full [`Param`] or an index into the objects table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum DeduplicatedParam {
    Reference(usize),
    Full(Param),
}

impl From<Param> for DeduplicatedParam {
    fn from(param: Param) -> Self {
        Self::Full(param)
    }
}

// ---------------------------------------------------------------------------
// WebhookPayload
// ---------------------------------------------------------------------------

/// Payload description for one event/action pair.
///
/// `P` is [`Param`] once rehydrated and [`DeduplicatedParam`] as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload<P = Param> {
    #[serde(default)]
    pub description_html: String,

    #[serde(default)]
    pub summary_html: String,

    #[serde(default = "Vec::<P>::new")]
    pub body_parameters: Vec<P>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("array of objects or null", ParamType::ArrayOfObjectsOrNull)]
    #[case("object or null", ParamType::ObjectOrNull)]
    #[case("boolean or string or integer or object", ParamType::BooleanOrStringOrIntegerOrObject)]
    #[case("string", ParamType::String)]
    fn known_type_strings_parse(#[case] raw: &str, #[case] expected: ParamType) {
        let parsed = ParamType::from(raw.to_owned());
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), raw);
    }

    #[test]
    fn unknown_type_string_is_kept_verbatim() {
        let parsed = ParamType::from("integer or boolean".to_owned());
        assert_eq!(parsed, ParamType::Other("integer or boolean".into()));
        assert_eq!(String::from(parsed), "integer or boolean");
    }

    #[test]
    fn param_deserializes_from_camel_case() {
        let json = serde_json::json!({
            "type": "object",
            "name": "repository",
            "in": "body",
            "isRequired": true,
            "description": "The repository.",
            "childParamsGroups": [
                {"type": "string", "name": "name", "description": "Name."}
            ]
        });
        let param: Param = serde_json::from_value(json).unwrap();
        assert_eq!(param.r#type, ParamType::Object);
        assert_eq!(param.location.as_deref(), Some("body"));
        assert!(param.is_required);
        assert!(param.is_composite());
        assert_eq!(param.child_params()[0].name, "name");
        assert!(!param.child_params()[0].is_required);
    }

    #[test]
    fn empty_child_groups_is_a_leaf() {
        let param: Param = serde_json::from_value(serde_json::json!({
            "type": "object",
            "name": "inputs",
            "childParamsGroups": []
        }))
        .unwrap();
        assert!(!param.is_composite());
        assert!(param.child_params().is_empty());
    }

    #[test]
    fn deduplicated_param_accepts_reference_or_record() {
        let params: Vec<DeduplicatedParam> = serde_json::from_value(serde_json::json!([
            3,
            {"type": "string", "name": "action", "description": "The action."}
        ]))
        .unwrap();
        assert_eq!(params[0], DeduplicatedParam::Reference(3));
        assert!(matches!(&params[1], DeduplicatedParam::Full(p) if p.name == "action"));
    }

    #[test]
    fn stored_payload_defaults_missing_fields() {
        let payload: WebhookPayload<DeduplicatedParam> =
            serde_json::from_value(serde_json::json!({"summaryHtml": "<p>s</p>"})).unwrap();
        assert_eq!(payload.summary_html, "<p>s</p>");
        assert!(payload.description_html.is_empty());
        assert!(payload.body_parameters.is_empty());
    }

    #[test]
    fn payload_serializes_with_original_field_names() {
        let payload: WebhookPayload<DeduplicatedParam> = WebhookPayload {
            description_html: "<p>d</p>".into(),
            summary_html: String::new(),
            body_parameters: vec![DeduplicatedParam::Reference(0)],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "descriptionHtml": "<p>d</p>",
                "summaryHtml": "",
                "bodyParameters": [0]
            })
        );
    }
}
