//! Claim projection

use super::fields::{date_time, display, first, first_coding, format_money, reference_id, required};
use crate::domain::{ColumnValue, FlatRow, ResourceType, Result};
use crate::fhir::Claim;

const RT: ResourceType = ResourceType::Claim;

/// The diagnosis reference is optional: claims for a general exam carry no
/// condition, so any gap on that path gives `condition_id = null`.
pub(super) fn project(claim: &Claim, row: &mut FlatRow) -> Result<()> {
    row.insert("medical_record_number", reference_id(&claim.patient));

    let item = first(&claim.item, RT, "item")?;
    let encounter = first(&item.encounter, RT, "item[0].encounter")?;
    row.insert("encounter_id", reference_id(encounter));

    let condition_id = claim
        .diagnosis
        .first()
        .and_then(|d| d.diagnosis_reference.as_ref())
        .map_or(ColumnValue::Null, reference_id);
    row.insert("condition_id", condition_id);

    row.insert("status", claim.status.as_str());

    let period = required(claim.billable_period.as_ref(), RT, "billablePeriod")?;
    row.insert("billable_period_start", date_time(period.start.as_ref()));
    row.insert("billable_period_end", date_time(period.end.as_ref()));

    row.insert("provider", display(&claim.provider));

    let priority = first_coding(&claim.priority, RT, "priority")?;
    row.insert("priority", priority.code.as_deref());

    let insurance = first(&claim.insurance, RT, "insurance")?;
    row.insert("insurance_coverage", display(&insurance.coverage));

    let total = required(claim.total.as_ref(), RT, "total")?;
    row.insert("total_cost", format_money(total));

    Ok(())
}
