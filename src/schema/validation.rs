use super::error::SchemaViolation;
use super::schema::{Schema, SchemaKind};

/// Validate a value against a schema, tracking the field path for errors.
pub fn validate_value(
    schema: &Schema,
    value: &serde_json::Value,
    path: &mut Vec<String>,
) -> std::result::Result<(), SchemaViolation> {
    match &schema.kind {
        SchemaKind::Null => {
            if !value.is_null() {
                return Err(SchemaViolation::new("expected null", path.clone()));
            }
        }
        SchemaKind::Boolean => {
            if !value.is_boolean() {
                return Err(SchemaViolation::new("expected boolean", path.clone()));
            }
        }
        SchemaKind::Integer => {
            if !value.is_i64() {
                return Err(SchemaViolation::new("expected integer", path.clone()));
            }
        }
        SchemaKind::Number { minimum, maximum } => {
            let number = value
                .as_f64()
                .ok_or_else(|| SchemaViolation::new("expected number", path.clone()))?;
            if let Some(min) = minimum {
                if number < *min {
                    return Err(SchemaViolation::new(
                        format!("number {} is below minimum {}", number, min),
                        path.clone(),
                    ));
                }
            }
            if let Some(max) = maximum {
                if number > *max {
                    return Err(SchemaViolation::new(
                        format!("number {} is above maximum {}", number, max),
                        path.clone(),
                    ));
                }
            }
        }
        SchemaKind::String => {
            if !value.is_string() {
                return Err(SchemaViolation::new("expected string", path.clone()));
            }
        }
        SchemaKind::Enum { values } => {
            let text = value
                .as_str()
                .ok_or_else(|| SchemaViolation::new("expected string", path.clone()))?;
            if !values.iter().any(|candidate| candidate == text) {
                return Err(SchemaViolation::new(
                    format!("`{}` is not one of [{}]", text, values.join(", ")),
                    path.clone(),
                ));
            }
        }
        SchemaKind::Array { items } => {
            if let Some(array) = value.as_array() {
                for (idx, element) in array.iter().enumerate() {
                    path.push(idx.to_string());
                    validate_value(items, element, path)?;
                    path.pop();
                }
            } else {
                return Err(SchemaViolation::new("expected array", path.clone()));
            }
        }
        SchemaKind::Object {
            properties,
            required,
            additional,
        } => {
            let object = value
                .as_object()
                .ok_or_else(|| SchemaViolation::new("expected object", path.clone()))?;

            for key in required {
                if !object.contains_key(key) {
                    let mut required_path = path.clone();
                    required_path.push(key.clone());
                    return Err(SchemaViolation::new(
                        format!("missing required property `{}`", key),
                        required_path,
                    ));
                }
            }

            for (key, val) in object {
                if let Some(sub_schema) = properties.get(key) {
                    path.push(key.clone());
                    validate_value(sub_schema, val, path)?;
                    path.pop();
                } else if !additional {
                    let mut extra_path = path.clone();
                    extra_path.push(key.clone());
                    return Err(SchemaViolation::new(
                        format!("unexpected property `{}`", key),
                        extra_path,
                    ));
                }
            }
        }
        SchemaKind::Union { variants } => {
            let matched = variants
                .iter()
                .any(|variant| validate_value(variant, value, &mut path.clone()).is_ok());
            if !matched {
                return Err(SchemaViolation::new(
                    format!("value matched none of the {} union variants", variants.len()),
                    path.clone(),
                ));
            }
        }
        SchemaKind::Any => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::Schema;
    use serde_json::json;

    #[test]
    fn number_range_accepts_boundaries() {
        let confidence = Schema::number_range(0.0, 1.0);
        assert!(confidence.validate(&json!(0.0)).is_ok());
        assert!(confidence.validate(&json!(1.0)).is_ok());
        assert!(confidence.validate(&json!(0)).is_ok());
        assert!(confidence.validate(&json!(1)).is_ok());
        assert!(confidence.validate(&json!(0.5)).is_ok());
    }

    #[test]
    fn number_range_rejects_out_of_bounds() {
        let confidence = Schema::number_range(0.0, 1.0);
        assert!(confidence.validate(&json!(-0.1)).is_err());
        assert!(confidence.validate(&json!(1.5)).is_err());
        assert!(confidence.validate(&json!("0.5")).is_err());
    }

    #[test]
    fn string_enum_is_closed() {
        let tone = Schema::string_enum(["professional", "friendly"]);
        assert!(tone.validate(&json!("friendly")).is_ok());
        assert!(tone.validate(&json!("sarcastic")).is_err());
        assert!(tone.validate(&json!(3)).is_err());
    }

    #[test]
    fn union_matches_any_variant() {
        let result = Schema::union([
            Schema::object(
                [("emotion", Schema::string()), ("confidence", Schema::number_range(0.0, 1.0))],
                &["emotion", "confidence"],
            ),
            Schema::object([("error", Schema::string())], &["error"]),
        ]);

        assert!(result
            .validate(&json!({"emotion": "happy", "confidence": 0.9}))
            .is_ok());
        assert!(result.validate(&json!({"error": "busy"})).is_ok());
        assert!(result.validate(&json!({"emotion": "happy"})).is_err());
    }

    #[test]
    fn missing_required_property_names_the_field() {
        let schema = Schema::object([("text", Schema::string())], &["text"]);
        let violation = schema.validate(&json!({})).unwrap_err();
        assert_eq!(violation.path, vec!["text".to_string()]);
    }
}
