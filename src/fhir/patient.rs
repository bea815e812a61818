//! Patient resource

use super::choice::{at_most_one, ChoiceRules};
use super::datatypes::{Address, CodeableConcept, ContactPoint, Extension, HumanName, Identifier, Reference};
use super::primitives::{FhirDate, FhirDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Administrative gender, the only coded element of Patient with a required binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeGender {
    Male,
    Female,
    Other,
    Unknown,
}

impl AdministrativeGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdministrativeGender::Male => "male",
            AdministrativeGender::Female => "female",
            AdministrativeGender::Other => "other",
            AdministrativeGender::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCommunication {
    #[serde(default)]
    pub extension: Vec<Extension>,
    pub language: CodeableConcept,
    #[serde(default)]
    pub preferred: Option<bool>,
}

domain_resource! {
    /// Demographics and administrative information about a person receiving care
    pub struct Patient {
        #[serde(default)]
        pub identifier: Vec<Identifier>,
        #[serde(default)]
        pub active: Option<bool>,
        #[serde(default)]
        pub name: Vec<HumanName>,
        #[serde(default)]
        pub telecom: Vec<ContactPoint>,
        #[serde(default)]
        pub gender: Option<AdministrativeGender>,
        #[serde(default)]
        pub birth_date: Option<FhirDate>,
        #[serde(default)]
        pub deceased_boolean: Option<bool>,
        #[serde(default)]
        pub deceased_date_time: Option<FhirDateTime>,
        #[serde(default)]
        pub address: Vec<Address>,
        #[serde(default)]
        pub marital_status: Option<CodeableConcept>,
        #[serde(default)]
        pub multiple_birth_boolean: Option<bool>,
        #[serde(default)]
        pub multiple_birth_integer: Option<i64>,
        #[serde(default)]
        pub photo: Vec<Value>,
        #[serde(default)]
        pub contact: Vec<Value>,
        #[serde(default)]
        pub communication: Vec<PatientCommunication>,
        #[serde(default)]
        pub general_practitioner: Vec<Reference>,
        #[serde(default)]
        pub managing_organization: Option<Reference>,
        #[serde(default)]
        pub link: Vec<Value>,
    }
}

impl Patient {
    /// Value of the first identifier whose type carries `code` and that has a value
    pub fn identifier_by_code(&self, code: &str) -> Option<&str> {
        self.identifier.iter().find_map(|identifier| {
            let coded = identifier
                .type_
                .as_ref()
                .is_some_and(|concept| concept.has_code(code));
            identifier.value.as_deref().filter(|_| coded)
        })
    }
}

impl ChoiceRules for Patient {
    fn check_choices(&self) -> Result<(), String> {
        at_most_one(
            "deceased",
            &[
                ("deceasedBoolean", self.deceased_boolean.is_some()),
                ("deceasedDateTime", self.deceased_date_time.is_some()),
            ],
        )?;
        at_most_one(
            "multipleBirth",
            &[
                ("multipleBirthBoolean", self.multiple_birth_boolean.is_some()),
                ("multipleBirthInteger", self.multiple_birth_integer.is_some()),
            ],
        )
    }
}
