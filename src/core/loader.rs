//! Record loading
//!
//! Turns one untyped bundle entry resource into a validated [`Resource`].
//! The `resourceType` discriminator selects the typed model; everything else
//! in the object must satisfy that model's structural rules.

use crate::domain::{IngestError, ResourceType, Result};
use crate::fhir::{ChoiceRules, Resource};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Key carrying the declared type of a resource
pub const RESOURCE_TYPE_KEY: &str = "resourceType";

/// Returns the declared type name of a raw resource, if it is a string
pub fn declared_type(raw: &Value) -> Option<&str> {
    raw.get(RESOURCE_TYPE_KEY).and_then(Value::as_str)
}

/// Validates a raw resource object against the model for its declared type.
///
/// # Errors
///
/// - [`IngestError::Lookup`] if `resourceType` is missing, not a string, or
///   names an unsupported type
/// - [`IngestError::Validation`] if the object violates the typed model,
///   including a choice element (`deceased[x]`, `medication[x]`, ...) with
///   more alternatives than allowed or a required one left out
///
/// # Examples
///
/// ```
/// use fhir_etl::core::loader::load;
/// use fhir_etl::domain::ResourceType;
/// use serde_json::json;
///
/// let resource = load(&json!({
///     "resourceType": "Medication",
///     "id": "med-1",
///     "status": "active"
/// }))
/// .unwrap();
/// assert_eq!(resource.resource_type(), ResourceType::Medication);
///
/// assert!(load(&json!({"resourceType": "bar"})).is_err());
/// ```
pub fn load(raw: &Value) -> Result<Resource> {
    let object = raw
        .as_object()
        .ok_or_else(|| IngestError::Lookup(RESOURCE_TYPE_KEY.to_string()))?;

    let type_name = object
        .get(RESOURCE_TYPE_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| IngestError::Lookup(RESOURCE_TYPE_KEY.to_string()))?;
    let resource_type = ResourceType::from_str(type_name)?;

    let mut body: Map<String, Value> = object.clone();
    body.remove(RESOURCE_TYPE_KEY);
    let body = Value::Object(body);

    let resource = match resource_type {
        ResourceType::Patient => Resource::Patient(Box::new(typed(resource_type, body)?)),
        ResourceType::Encounter => Resource::Encounter(Box::new(typed(resource_type, body)?)),
        ResourceType::Condition => Resource::Condition(Box::new(typed(resource_type, body)?)),
        ResourceType::Claim => Resource::Claim(Box::new(typed(resource_type, body)?)),
        ResourceType::Procedure => Resource::Procedure(Box::new(typed(resource_type, body)?)),
        ResourceType::Immunization => {
            Resource::Immunization(Box::new(typed(resource_type, body)?))
        }
        ResourceType::MedicationRequest => {
            Resource::MedicationRequest(Box::new(typed(resource_type, body)?))
        }
        ResourceType::Medication => Resource::Medication(Box::new(typed(resource_type, body)?)),
    };

    tracing::trace!(
        resource_type = %resource_type,
        id = resource.id().unwrap_or("<none>"),
        "Loaded resource"
    );

    Ok(resource)
}

fn typed<T: DeserializeOwned + ChoiceRules>(resource_type: ResourceType, body: Value) -> Result<T> {
    let invalid = |message: String| IngestError::Validation {
        resource_type: resource_type.to_string(),
        message,
    };

    let resource: T = serde_json::from_value(body).map_err(|e| invalid(e.to_string()))?;
    resource.check_choices().map_err(invalid)?;
    Ok(resource)
}
