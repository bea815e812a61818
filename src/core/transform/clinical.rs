//! Condition, Procedure and Immunization projections

use super::fields::{date_time, display, first, first_coding, reference_id, required};
use crate::domain::{ColumnValue, FlatRow, ResourceType, Result};
use crate::fhir::{Condition, Immunization, Procedure};

/// Abatement is optional; an unabated condition has `abatement_date = null`.
pub(super) fn project_condition(condition: &Condition, row: &mut FlatRow) -> Result<()> {
    const RT: ResourceType = ResourceType::Condition;

    row.insert("medical_record_number", reference_id(&condition.subject));

    let encounter = required(condition.encounter.as_ref(), RT, "encounter")?;
    row.insert("encounter", reference_id(encounter));

    let clinical = required(condition.clinical_status.as_ref(), RT, "clinicalStatus")?;
    let coding = first_coding(clinical, RT, "clinicalStatus")?;
    row.insert("clinical_status", coding.code.as_deref());

    let verification = required(
        condition.verification_status.as_ref(),
        RT,
        "verificationStatus",
    )?;
    let coding = first_coding(verification, RT, "verificationStatus")?;
    row.insert("verification_status", coding.code.as_deref());

    let category = first(&condition.category, RT, "category")?;
    let coding = first_coding(category, RT, "category[0]")?;
    row.insert("category", coding.display.as_deref());

    row.insert("onset_date", date_time(condition.onset_date_time.as_ref()));
    row.insert(
        "abatement_date",
        date_time(condition.abatement_date_time.as_ref()),
    );

    let code = required(condition.code.as_ref(), RT, "code")?;
    row.insert("condition_information", code.text.as_deref());

    Ok(())
}

pub(super) fn project_procedure(procedure: &Procedure, row: &mut FlatRow) -> Result<()> {
    const RT: ResourceType = ResourceType::Procedure;

    row.insert("medical_record_number", reference_id(&procedure.subject));

    let encounter = required(procedure.encounter.as_ref(), RT, "encounter")?;
    row.insert("encounter_id", reference_id(encounter));
    row.insert("status", procedure.status.as_str());

    let period = required(procedure.performed_period.as_ref(), RT, "performedPeriod")?;
    row.insert("performed_period_start", date_time(period.start.as_ref()));
    row.insert("performed_period_end", date_time(period.end.as_ref()));

    let location = required(procedure.location.as_ref(), RT, "location")?;
    row.insert("location", display(location));

    Ok(())
}

pub(super) fn project_immunization(immunization: &Immunization, row: &mut FlatRow) -> Result<()> {
    const RT: ResourceType = ResourceType::Immunization;

    row.insert("medical_record_number", reference_id(&immunization.patient));

    let encounter = required(immunization.encounter.as_ref(), RT, "encounter")?;
    row.insert("encounter_id", reference_id(encounter));

    let coding = first_coding(&immunization.vaccine_code, RT, "vaccineCode")?;
    row.insert("vaccine_code", coding.code.as_deref());
    row.insert("vaccine_type", ColumnValue::from(coding.display.as_deref()));

    row.insert(
        "occurrence_date",
        date_time(immunization.occurrence_date_time.as_ref()),
    );

    let location = required(immunization.location.as_ref(), RT, "location")?;
    row.insert("location", display(location));

    Ok(())
}
