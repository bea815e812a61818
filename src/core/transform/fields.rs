//! Path helpers shared by the projection rules

use crate::domain::{ColumnValue, IngestError, ResourceType, Result};
use crate::fhir::datatypes::{CodeableConcept, Coding, Money, Reference};
use crate::fhir::{FhirDate, FhirDateTime};

/// Reduces a reference to its final segment.
///
/// Both `urn:uuid:<id>` and `<Type>/<id>` forms reduce to `<id>`.
///
/// ```
/// use fhir_etl::core::transform::strip_reference;
///
/// assert_eq!(strip_reference("urn:uuid:abc"), "abc");
/// assert_eq!(strip_reference("Patient/abc"), "abc");
/// assert_eq!(strip_reference("abc"), "abc");
/// ```
pub fn strip_reference(reference: &str) -> &str {
    reference
        .rsplit(|c: char| c == ':' || c == '/')
        .next()
        .unwrap_or(reference)
}

/// Renders money as the value with two decimals followed by the currency code
///
/// ```
/// use fhir_etl::core::transform::format_money;
/// use fhir_etl::fhir::datatypes::Money;
///
/// let money: Money = serde_json::from_str(r#"{"value": 12.5, "currency": "USD"}"#).unwrap();
/// assert_eq!(format_money(&money).as_deref(), Some("12.50USD"));
/// ```
pub fn format_money(money: &Money) -> Option<String> {
    let value = money.value?;
    Some(format!(
        "{value:.2}{}",
        money.currency.as_deref().unwrap_or_default()
    ))
}

/// Unwraps a required intermediate structure
pub(super) fn required<'a, T>(
    value: Option<&'a T>,
    resource_type: ResourceType,
    path: &str,
) -> Result<&'a T> {
    value.ok_or_else(|| IngestError::missing(resource_type.as_str(), path))
}

/// First element of a required repeating structure
pub(super) fn first<'a, T>(items: &'a [T], resource_type: ResourceType, path: &str) -> Result<&'a T> {
    items
        .first()
        .ok_or_else(|| IngestError::missing(resource_type.as_str(), &format!("{path}[0]")))
}

/// `coding[0]` of a concept, required
pub(super) fn first_coding<'a>(
    concept: &'a CodeableConcept,
    resource_type: ResourceType,
    path: &str,
) -> Result<&'a Coding> {
    first(&concept.coding, resource_type, &format!("{path}.coding"))
}

/// Stripped id of a reference, null when the reference string is absent
pub(super) fn reference_id(reference: &Reference) -> ColumnValue {
    reference.reference.as_deref().map(strip_reference).into()
}

pub(super) fn display(reference: &Reference) -> ColumnValue {
    reference.display.as_deref().into()
}

pub(super) fn date_time(value: Option<&FhirDateTime>) -> ColumnValue {
    value.map(FhirDateTime::to_row_string).into()
}

pub(super) fn date(value: Option<&FhirDate>) -> ColumnValue {
    value.map(FhirDate::to_row_string).into()
}
