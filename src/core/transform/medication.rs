//! Medication and MedicationRequest projections

use super::fields::{display, first_coding, reference_id, required};
use crate::domain::{ColumnValue, FlatRow, IngestError, ResourceType, Result};
use crate::fhir::{Medication, MedicationRequest};

/// The reason reference is optional (`condition_id = null` when absent).
///
/// The medication is either coded inline or referenced to a separate
/// Medication entry. Inline codes win; a request with neither fails.
pub(super) fn project_request(request: &MedicationRequest, row: &mut FlatRow) -> Result<()> {
    const RT: ResourceType = ResourceType::MedicationRequest;

    row.insert("medical_record_number", reference_id(&request.subject));

    let encounter = required(request.encounter.as_ref(), RT, "encounter")?;
    row.insert("encounter_id", reference_id(encounter));

    let condition_id = request
        .reason_reference
        .first()
        .map_or(ColumnValue::Null, reference_id);
    row.insert("condition_id", condition_id);

    row.insert("status", request.status.as_str());
    row.insert("intent", request.intent.as_str());

    match (
        &request.medication_codeable_concept,
        &request.medication_reference,
    ) {
        (Some(concept), _) => {
            let coding = first_coding(concept, RT, "medicationCodeableConcept")?;
            row.insert("medication_code", coding.code.as_deref());
            row.insert("medication_name", coding.display.as_deref());
            row.insert("medication_reference_id", ColumnValue::Null);
        }
        (None, Some(reference)) => {
            row.insert("medication_code", ColumnValue::Null);
            row.insert("medication_name", ColumnValue::Null);
            row.insert("medication_reference_id", reference_id(reference));
        }
        (None, None) => {
            return Err(IngestError::missing(RT.as_str(), "medication[x]"));
        }
    }

    let requester = required(request.requester.as_ref(), RT, "requester")?;
    row.insert("requester", display(requester));

    Ok(())
}

pub(super) fn project_medication(medication: &Medication, row: &mut FlatRow) -> Result<()> {
    const RT: ResourceType = ResourceType::Medication;

    row.insert("medication_status", medication.status.as_deref());

    let code = required(medication.code.as_ref(), RT, "code")?;
    let coding = first_coding(code, RT, "code")?;
    row.insert("medication_code", coding.code.as_deref());
    row.insert("medication_name", coding.display.as_deref());

    Ok(())
}
