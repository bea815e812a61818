//! Projection of typed resources into flat rows
//!
//! Each supported resource type has one rule set that reads a fixed set of
//! paths from the typed record and writes them as scalar columns. Rules are
//! pure: no I/O, no logging of swallowed faults.
//!
//! Path policy shared by every rule:
//!
//! - intermediate structures (first name, period, `coding[0]`, ...) are
//!   required and their absence is an [`IngestError::Projection`]
//! - leaf scalars that are absent become `null`
//! - a handful of optional branches default explicitly (documented on the
//!   rule that uses them)

mod claim;
mod clinical;
mod encounter;
mod fields;
mod medication;
mod patient;

pub use fields::{format_money, strip_reference};

use crate::domain::{FlatRow, IngestError, Result};
use crate::fhir::Resource;

/// Projects a typed resource into a flat row, dispatching on its type.
///
/// Every row starts with `id`. A resource without an id cannot be
/// deduplicated and is rejected.
///
/// # Examples
///
/// ```
/// use fhir_etl::core::{loader, transform};
/// use serde_json::json;
///
/// let resource = loader::load(&json!({
///     "resourceType": "Medication",
///     "id": "med-1",
///     "status": "active",
///     "code": {"coding": [{"code": "313782", "display": "Acetaminophen 325 MG"}]}
/// }))
/// .unwrap();
///
/// let row = transform::project(&resource).unwrap();
/// assert_eq!(row.id(), Some("med-1"));
/// assert_eq!(row.get("medication_code").unwrap().as_text(), Some("313782"));
/// ```
pub fn project(resource: &Resource) -> Result<FlatRow> {
    let id = resource
        .id()
        .ok_or_else(|| IngestError::missing(resource.resource_type().as_str(), "id"))?;

    let mut row = FlatRow::new();
    row.insert(crate::domain::ID_COLUMN, id);

    match resource {
        Resource::Patient(r) => patient::project(r, &mut row)?,
        Resource::Encounter(r) => encounter::project(r, &mut row)?,
        Resource::Condition(r) => clinical::project_condition(r, &mut row)?,
        Resource::Claim(r) => claim::project(r, &mut row)?,
        Resource::Procedure(r) => clinical::project_procedure(r, &mut row)?,
        Resource::Immunization(r) => clinical::project_immunization(r, &mut row)?,
        Resource::MedicationRequest(r) => medication::project_request(r, &mut row)?,
        Resource::Medication(r) => medication::project_medication(r, &mut row)?,
    }

    Ok(row)
}
