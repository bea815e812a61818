//! Procedure resource

use super::choice::{at_most_one, ChoiceRules};
use super::datatypes::{CodeableConcept, Identifier, Period, Reference};
use super::primitives::FhirDateTime;
use serde_json::Value;

domain_resource! {
    /// An action performed on or for a patient
    pub struct Procedure {
        #[serde(default)]
        pub identifier: Vec<Identifier>,
        #[serde(default)]
        pub instantiates_canonical: Vec<String>,
        #[serde(default)]
        pub instantiates_uri: Vec<String>,
        #[serde(default)]
        pub based_on: Vec<Reference>,
        #[serde(default)]
        pub part_of: Vec<Reference>,
        pub status: String,
        #[serde(default)]
        pub status_reason: Option<CodeableConcept>,
        #[serde(default)]
        pub category: Option<CodeableConcept>,
        #[serde(default)]
        pub code: Option<CodeableConcept>,
        pub subject: Reference,
        #[serde(default)]
        pub encounter: Option<Reference>,
        #[serde(default)]
        pub performed_date_time: Option<FhirDateTime>,
        #[serde(default)]
        pub performed_period: Option<Period>,
        #[serde(default)]
        pub performed_string: Option<String>,
        #[serde(default)]
        pub performed_age: Option<Value>,
        #[serde(default)]
        pub performed_range: Option<Value>,
        #[serde(default)]
        pub recorder: Option<Reference>,
        #[serde(default)]
        pub asserter: Option<Reference>,
        #[serde(default)]
        pub performer: Vec<Value>,
        #[serde(default)]
        pub location: Option<Reference>,
        #[serde(default)]
        pub reason_code: Vec<CodeableConcept>,
        #[serde(default)]
        pub reason_reference: Vec<Reference>,
        #[serde(default)]
        pub body_site: Vec<CodeableConcept>,
        #[serde(default)]
        pub outcome: Option<CodeableConcept>,
        #[serde(default)]
        pub report: Vec<Reference>,
        #[serde(default)]
        pub complication: Vec<CodeableConcept>,
        #[serde(default)]
        pub complication_detail: Vec<Reference>,
        #[serde(default)]
        pub follow_up: Vec<CodeableConcept>,
        #[serde(default)]
        pub note: Vec<Value>,
        #[serde(default)]
        pub focal_device: Vec<Value>,
        #[serde(default)]
        pub used_reference: Vec<Reference>,
        #[serde(default)]
        pub used_code: Vec<CodeableConcept>,
    }
}

impl ChoiceRules for Procedure {
    fn check_choices(&self) -> Result<(), String> {
        at_most_one(
            "performed",
            &[
                ("performedDateTime", self.performed_date_time.is_some()),
                ("performedPeriod", self.performed_period.is_some()),
                ("performedString", self.performed_string.is_some()),
                ("performedAge", self.performed_age.is_some()),
                ("performedRange", self.performed_range.is_some()),
            ],
        )
    }
}
