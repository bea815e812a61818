//! Encounter projection

use super::fields::{date_time, display, first, first_coding, reference_id, required};
use crate::domain::{FlatRow, ResourceType, Result};
use crate::fhir::Encounter;

const RT: ResourceType = ResourceType::Encounter;

pub(super) fn project(encounter: &Encounter, row: &mut FlatRow) -> Result<()> {
    let subject = required(encounter.subject.as_ref(), RT, "subject")?;
    row.insert("medical_record_number", reference_id(subject));
    row.insert("status", encounter.status.as_str());

    let encounter_type = first(&encounter.type_, RT, "type")?;
    let coding = first_coding(encounter_type, RT, "type[0]")?;
    row.insert("type", coding.display.as_deref());

    let period = required(encounter.period.as_ref(), RT, "period")?;
    row.insert("start_date", date_time(period.start.as_ref()));
    row.insert("end_date", date_time(period.end.as_ref()));

    row.insert("subject", display(subject));

    let participant = first(&encounter.participant, RT, "participant")?;
    let individual = required(participant.individual.as_ref(), RT, "participant[0].individual")?;
    row.insert("participant", display(individual));

    let location = first(&encounter.location, RT, "location")?;
    row.insert("location", display(&location.location));

    let provider = required(encounter.service_provider.as_ref(), RT, "serviceProvider")?;
    row.insert("service_provider", display(provider));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IngestError;
    use serde_json::json;

    #[test]
    fn test_missing_period_fails() {
        let encounter: Encounter = serde_json::from_value(json!({
            "id": "e1",
            "status": "finished",
            "class": {"code": "AMB"},
            "type": [{"coding": [{"display": "Check up"}]}],
            "subject": {"reference": "urn:uuid:p1", "display": "Jane Doe"}
        }))
        .unwrap();

        let mut row = FlatRow::new();
        let err = project(&encounter, &mut row).unwrap_err();
        assert!(matches!(err, IngestError::Projection(_)));
        assert!(err.to_string().contains("Encounter.period"));
        // Columns read before the fault are not rolled back; the row is discarded by the caller.
        assert_eq!(row.get("type").unwrap().as_text(), Some("Check up"));
    }
}
