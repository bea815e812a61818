//! Patient projection

use super::fields::{date, date_time, first, first_coding, required};
use crate::domain::{ColumnValue, FlatRow, ResourceType, Result};
use crate::fhir::Patient;

const RT: ResourceType = ResourceType::Patient;

/// Identifier type codes and the column each one fills, with its default
const IDENTIFIER_COLUMNS: [(&str, &str, Option<&str>); 4] = [
    ("MR", "medical_record_number", None),
    ("SS", "social_security_number", Some("N/A")),
    ("DL", "drivers_license", Some("N/A")),
    ("PPN", "passport_number", Some("N/A")),
];

/// Deceased date is optional: absent means `deceased_date = null` and
/// `deceased = false` unless `deceasedBoolean` says otherwise.
pub(super) fn project(patient: &Patient, row: &mut FlatRow) -> Result<()> {
    for (code, column, default) in IDENTIFIER_COLUMNS {
        let value = patient.identifier_by_code(code).or(default);
        row.insert(column, value);
    }

    let name = first(&patient.name, RT, "name")?;
    row.insert("given_name", name.given.first().map(String::as_str));
    row.insert("family_name", name.family.as_deref());

    let address = first(&patient.address, RT, "address")?;
    row.insert("house", address.line.first().map(String::as_str));
    row.insert("city", address.city.as_deref());
    row.insert("state", address.state.as_deref());
    row.insert("country", address.country.as_deref());

    row.insert("birth_date", date(patient.birth_date.as_ref()));
    let deceased_date = date_time(patient.deceased_date_time.as_ref());
    let deceased = !deceased_date.is_null() || patient.deceased_boolean == Some(true);
    row.insert("deceased_date", deceased_date);
    row.insert("deceased", deceased);

    row.insert("gender", patient.gender.map(|g| g.as_str()));

    let communication = first(&patient.communication, RT, "communication")?;
    row.insert("spoken_language", communication.language.text.as_deref());

    let telecom = first(&patient.telecom, RT, "telecom")?;
    row.insert("phone_number", telecom.value.as_deref());

    let marital_status = required(patient.marital_status.as_ref(), RT, "maritalStatus")?;
    let coding = first_coding(marital_status, RT, "maritalStatus")?;
    row.insert("marital_status", ColumnValue::from(coding.code.as_deref()));

    Ok(())
}
