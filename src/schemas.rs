use jsonschema::{Draft, JSONSchema};
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PlannerError, Result};

const MAX_SCHEMA_ERRORS: usize = 3;

/// Serialize the derived JSON schema for a function-argument envelope.
pub fn schema_value_for<T: JsonSchema>() -> Value {
    let root = schema_for!(T);
    serde_json::to_value(root).unwrap_or_else(|err| {
        panic!(
            "failed to serialize schema for {}: {}",
            std::any::type_name::<T>(),
            err
        )
    })
}

/// Validate a structured payload against the declared schema. A payload
/// that fails here indicates a provider contract violation, not an
/// absence of data.
pub fn validate_payload(schema_name: &str, schema: &Value, payload: &Value) -> Result<()> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|err| {
            PlannerError::Validation(format!(
                "Failed to prepare `{}` schema for validation: {}",
                schema_name, err
            ))
        })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "structured payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(PlannerError::Validation(format!(
            "Structured payload does not match `{}` schema: {}",
            schema_name, detail_str
        )));
    }

    Ok(())
}

/// Deserialize a validated payload into its envelope type, reporting
/// the JSON path of any mismatch.
pub fn deserialize_payload<T>(schema_name: &str, payload: &Value) -> Result<T>
where
    T: DeserializeOwned,
{
    let raw = payload.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::Validation(format!(
            "failed to deserialize `{}` at {}: {}",
            schema_name, location, err
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CostArguments, ItineraryArguments, TitleArguments};
    use serde_json::json;

    #[test]
    fn derived_schemas_are_objects_with_properties() {
        for schema in [
            schema_value_for::<ItineraryArguments>(),
            schema_value_for::<CostArguments>(),
            schema_value_for::<TitleArguments>(),
        ] {
            assert!(schema.is_object());
            assert!(schema.get("properties").is_some());
        }
    }

    #[test]
    fn valid_title_payload_passes_validation() {
        let schema = schema_value_for::<TitleArguments>();
        let payload = json!({ "title": "3-Day Trip from Boston to Tokyo" });
        validate_payload("update_title", &schema, &payload).unwrap();

        let args: TitleArguments = deserialize_payload("update_title", &payload).unwrap();
        assert_eq!(args.title, "3-Day Trip from Boston to Tokyo");
    }

    #[test]
    fn wrong_shape_fails_validation_with_path() {
        let schema = schema_value_for::<TitleArguments>();
        let payload = json!({ "title": 7 });
        let err = validate_payload("update_title", &schema, &payload).unwrap_err();
        assert!(err.to_string().contains("update_title"));
    }
}
