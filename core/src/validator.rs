use serde_json::{Map, Value};

use crate::error::{SchemaError, GENERIC_SCHEMA_MESSAGE};
use crate::schema::{FieldKind, FormSchema};

pub const TITLE_REQUIRED: &str = "Form title is required";
pub const LABEL_REQUIRED: &str = "Label is required";

/// Structural validator for form definition documents.
///
/// The walk is depth-first in declaration order and stops at the first
/// violated rule, so the reported error is always the earliest one in the
/// document.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Parse and validate editor text
    pub fn validate(text: &str) -> Result<FormSchema, SchemaError> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            tracing::debug!(error = %e, "Editor text is not valid JSON");
            SchemaError::Syntax {
                detail: e.to_string(),
            }
        })?;

        Self::check(&value).map_err(|e| {
            tracing::debug!(path = e.path().unwrap_or_default(), detail = e.detail(), "Schema violation");
            e
        })?;

        let schema: FormSchema = serde_json::from_value(value)
            .map_err(|e| violation("", GENERIC_SCHEMA_MESSAGE, e.to_string()))?;
        tracing::debug!(title = %schema.form_title, fields = schema.fields.len(), "Schema validated");
        Ok(schema)
    }

    /// Check an already-parsed document against the form contract
    pub fn check(value: &Value) -> Result<(), SchemaError> {
        let root = as_object(value, "")?;

        require_string(root, "", "formTitle", TITLE_REQUIRED, true)?;
        require_string(root, "", "formDescription", GENERIC_SCHEMA_MESSAGE, false)?;

        let fields = match root.get("fields") {
            Some(Value::Array(items)) => items,
            other => {
                return Err(violation(
                    "fields",
                    GENERIC_SCHEMA_MESSAGE,
                    type_mismatch("array", other),
                ))
            }
        };

        for (idx, field) in fields.iter().enumerate() {
            Self::check_field(field, &format!("fields[{}]", idx))?;
        }

        Ok(())
    }

    fn check_field(value: &Value, path: &str) -> Result<(), SchemaError> {
        let field = as_object(value, path)?;

        require_string(field, path, "id", GENERIC_SCHEMA_MESSAGE, true)?;

        let kind = match field.get("type") {
            Some(Value::String(name)) => match FieldKind::parse(name) {
                FieldKind::Unsupported(name) => {
                    let expected = FieldKind::KNOWN
                        .iter()
                        .map(|k| format!("'{}'", k))
                        .collect::<Vec<_>>()
                        .join(" | ");
                    return Err(violation(
                        join(path, "type"),
                        GENERIC_SCHEMA_MESSAGE,
                        format!("Invalid enum value. Expected {}, received '{}'", expected, name),
                    ));
                }
                kind => kind,
            },
            other => {
                return Err(violation(
                    join(path, "type"),
                    GENERIC_SCHEMA_MESSAGE,
                    type_mismatch("string", other),
                ))
            }
        };

        require_string(field, path, "label", LABEL_REQUIRED, true)?;

        match field.get("required") {
            Some(Value::Bool(_)) => {}
            other => {
                return Err(violation(
                    join(path, "required"),
                    GENERIC_SCHEMA_MESSAGE,
                    type_mismatch("boolean", other),
                ))
            }
        }

        optional_string(field, path, "placeholder")?;

        let options_path = join(path, "options");
        match field.get("options") {
            None => {
                if kind.needs_options() {
                    return Err(violation(options_path, GENERIC_SCHEMA_MESSAGE, "Required"));
                }
            }
            Some(Value::Array(options)) => {
                if kind.needs_options() && options.is_empty() {
                    return Err(violation(
                        options_path,
                        GENERIC_SCHEMA_MESSAGE,
                        "Array must contain at least 1 element(s)",
                    ));
                }
                for (idx, option) in options.iter().enumerate() {
                    let option_path = format!("{}[{}]", options_path, idx);
                    let option = as_object(option, &option_path)?;
                    require_string(option, &option_path, "value", GENERIC_SCHEMA_MESSAGE, true)?;
                    require_string(option, &option_path, "label", GENERIC_SCHEMA_MESSAGE, true)?;
                }
            }
            other => {
                return Err(violation(
                    options_path,
                    GENERIC_SCHEMA_MESSAGE,
                    type_mismatch("array", other),
                ))
            }
        }

        if let Some(validation) = field.get("validation") {
            let validation_path = join(path, "validation");
            let validation = as_object(validation, &validation_path)?;
            // Any string is accepted; the pattern is compiled when the form renders
            require_string(validation, &validation_path, "pattern", GENERIC_SCHEMA_MESSAGE, false)?;
            require_string(validation, &validation_path, "message", GENERIC_SCHEMA_MESSAGE, false)?;
        }

        Ok(())
    }
}

fn violation(path: impl Into<String>, message: &str, detail: impl Into<String>) -> SchemaError {
    SchemaError::Violation {
        path: path.into(),
        message: message.to_string(),
        detail: detail.into(),
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn describe(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

fn type_mismatch(expected: &str, found: Option<&Value>) -> String {
    match found {
        None => "Required".to_string(),
        Some(_) => format!("Expected {}, received {}", expected, describe(found)),
    }
}

fn as_object<'v>(value: &'v Value, path: &str) -> Result<&'v Map<String, Value>, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| violation(path, GENERIC_SCHEMA_MESSAGE, type_mismatch("object", Some(value))))
}

fn require_string<'v>(
    object: &'v Map<String, Value>,
    path: &str,
    key: &str,
    message: &str,
    non_empty: bool,
) -> Result<&'v str, SchemaError> {
    match object.get(key) {
        Some(Value::String(s)) if non_empty && s.is_empty() => Err(violation(
            join(path, key),
            message,
            "String must contain at least 1 character(s)",
        )),
        Some(Value::String(s)) => Ok(s),
        other => Err(violation(join(path, key), message, type_mismatch("string", other))),
    }
}

fn optional_string(object: &Map<String, Value>, path: &str, key: &str) -> Result<(), SchemaError> {
    match object.get(key) {
        None | Some(Value::String(_)) => Ok(()),
        other => Err(violation(
            join(path, key),
            GENERIC_SCHEMA_MESSAGE,
            type_mismatch("string", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SYNTAX_MESSAGE;
    use serde_json::json;

    fn field(overrides: Value) -> Value {
        let mut base = json!({
            "id": "name",
            "type": "text",
            "label": "Full Name",
            "required": true
        });
        for (k, v) in overrides.as_object().unwrap() {
            if v.is_null() {
                base.as_object_mut().unwrap().remove(k);
            } else {
                base[k] = v.clone();
            }
        }
        base
    }

    fn doc(fields: Vec<Value>) -> String {
        json!({
            "formTitle": "Contact",
            "formDescription": "Reach out",
            "fields": fields
        })
        .to_string()
    }

    fn message_for(text: &str) -> String {
        SchemaValidator::validate(text).unwrap_err().message().to_string()
    }

    #[test]
    fn test_sample_is_valid() {
        let schema = SchemaValidator::validate(&FormSchema::sample().to_pretty_json()).unwrap();
        assert_eq!(schema, FormSchema::sample());
    }

    #[test]
    fn test_syntax_errors() {
        for text in ["", "{", "{\"formTitle\": }", "not json", "{'a': 1}"] {
            let err = SchemaValidator::validate(text).unwrap_err();
            assert!(matches!(err, SchemaError::Syntax { .. }), "{text}");
            assert_eq!(err.message(), SYNTAX_MESSAGE);
        }
    }

    #[test]
    fn test_title_required() {
        assert_eq!(message_for(r#"{"formDescription": "", "fields": []}"#), TITLE_REQUIRED);
        assert_eq!(message_for(r#"{"formTitle": "", "formDescription": "", "fields": []}"#), TITLE_REQUIRED);
        assert_eq!(message_for(r#"{"formTitle": 3, "formDescription": "", "fields": []}"#), TITLE_REQUIRED);
    }

    #[test]
    fn test_root_must_be_object() {
        let err = SchemaValidator::validate("[]").unwrap_err();
        assert_eq!(err.message(), GENERIC_SCHEMA_MESSAGE);
        assert_eq!(err.detail(), "Expected object, received array");
    }

    #[test]
    fn test_fields_must_be_array() {
        let err = SchemaValidator::validate(r#"{"formTitle": "T", "formDescription": ""}"#).unwrap_err();
        assert_eq!(err.path(), Some("fields"));
        assert_eq!(err.detail(), "Required");
        assert_eq!(err.message(), GENERIC_SCHEMA_MESSAGE);
    }

    #[test]
    fn test_empty_field_list_is_valid() {
        let schema = SchemaValidator::validate(&doc(vec![])).unwrap();
        assert!(schema.fields.is_empty());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = SchemaValidator::validate(&doc(vec![field(json!({"type": "date"}))])).unwrap_err();
        assert_eq!(err.message(), GENERIC_SCHEMA_MESSAGE);
        assert_eq!(err.path(), Some("fields[0].type"));
        assert_eq!(
            err.detail(),
            "Invalid enum value. Expected 'text' | 'email' | 'select' | 'radio' | 'textarea', received 'date'"
        );
    }

    #[test]
    fn test_missing_id_and_label() {
        let err = SchemaValidator::validate(&doc(vec![field(json!({"id": null}))])).unwrap_err();
        assert_eq!(err.path(), Some("fields[0].id"));
        assert_eq!(err.message(), GENERIC_SCHEMA_MESSAGE);

        let err = SchemaValidator::validate(&doc(vec![field(json!({"id": ""}))])).unwrap_err();
        assert_eq!(err.path(), Some("fields[0].id"));

        assert_eq!(message_for(&doc(vec![field(json!({"label": null}))])), LABEL_REQUIRED);
        assert_eq!(message_for(&doc(vec![field(json!({"label": ""}))])), LABEL_REQUIRED);
    }

    #[test]
    fn test_required_must_be_boolean() {
        let err = SchemaValidator::validate(&doc(vec![field(json!({"required": "yes"}))])).unwrap_err();
        assert_eq!(err.path(), Some("fields[0].required"));
        assert_eq!(err.detail(), "Expected boolean, received string");
    }

    #[test]
    fn test_first_violation_wins() {
        // Both the first field's label and the second field's type are wrong
        let text = doc(vec![
            field(json!({"label": ""})),
            field(json!({"id": "other", "type": "date"})),
        ]);
        let err = SchemaValidator::validate(&text).unwrap_err();
        assert_eq!(err.path(), Some("fields[0].label"));

        // Within a field, id is checked before type
        let err = SchemaValidator::validate(&doc(vec![field(json!({"id": "", "type": "date"}))])).unwrap_err();
        assert_eq!(err.path(), Some("fields[0].id"));
    }

    #[test]
    fn test_choice_fields_need_options() {
        let err = SchemaValidator::validate(&doc(vec![field(json!({"type": "select"}))])).unwrap_err();
        assert_eq!(err.path(), Some("fields[0].options"));

        let err = SchemaValidator::validate(&doc(vec![field(json!({"type": "radio", "options": []}))])).unwrap_err();
        assert_eq!(err.path(), Some("fields[0].options"));

        let err = SchemaValidator::validate(&doc(vec![field(json!({
            "type": "radio",
            "options": [{"value": "a", "label": "A"}, {"value": "", "label": "B"}]
        }))]))
        .unwrap_err();
        assert_eq!(err.path(), Some("fields[0].options[1].value"));

        let schema = SchemaValidator::validate(&doc(vec![field(json!({
            "type": "select",
            "options": [{"value": "a", "label": "A"}]
        }))]))
        .unwrap();
        assert_eq!(schema.fields[0].options().len(), 1);
    }

    #[test]
    fn test_validation_block() {
        let err = SchemaValidator::validate(&doc(vec![field(json!({"validation": {"pattern": "^a"}}))])).unwrap_err();
        assert_eq!(err.path(), Some("fields[0].validation.message"));

        let err = SchemaValidator::validate(&doc(vec![field(json!({"validation": {"pattern": 7, "message": "m"}}))])).unwrap_err();
        assert_eq!(err.message(), GENERIC_SCHEMA_MESSAGE);
        assert_eq!(err.path(), Some("fields[0].validation.pattern"));
    }

    #[test]
    fn test_patterns_are_not_compiled() {
        for pattern in ["^[a-z", r"^(?=.*[A-Z]).{8,}$", r"^(a)\1$", "a{", "[^]", r"\cJ"] {
            let schema = SchemaValidator::validate(&doc(vec![field(json!({
                "validation": {"pattern": pattern, "message": "Nope"}
            }))]))
            .unwrap();
            assert_eq!(schema.fields[0].validation.as_ref().unwrap().pattern, pattern);
        }
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let text = json!({
            "formTitle": "T",
            "formDescription": "D",
            "theme": "dark",
            "fields": [{"id": "a", "type": "textarea", "label": "A", "required": false, "rows": 4}]
        })
        .to_string();
        let schema = SchemaValidator::validate(&text).unwrap();
        assert_eq!(schema.fields[0].kind, FieldKind::Textarea);
    }

    #[test]
    fn test_placeholder_must_be_string() {
        let err = SchemaValidator::validate(&doc(vec![field(json!({"placeholder": 5}))])).unwrap_err();
        assert_eq!(err.path(), Some("fields[0].placeholder"));
        assert_eq!(err.detail(), "Expected string, received number");
    }
}
