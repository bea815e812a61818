//! Immunization resource

use super::choice::{exactly_one, ChoiceRules};
use super::datatypes::{CodeableConcept, Identifier, Reference};
use super::primitives::{FhirDate, FhirDateTime};
use serde_json::Value;

domain_resource! {
    /// A vaccine administered to a patient
    pub struct Immunization {
        #[serde(default)]
        pub identifier: Vec<Identifier>,
        pub status: String,
        #[serde(default)]
        pub status_reason: Option<CodeableConcept>,
        pub vaccine_code: CodeableConcept,
        pub patient: Reference,
        #[serde(default)]
        pub encounter: Option<Reference>,
        #[serde(default)]
        pub occurrence_date_time: Option<FhirDateTime>,
        #[serde(default)]
        pub occurrence_string: Option<String>,
        #[serde(default)]
        pub recorded: Option<FhirDateTime>,
        #[serde(default)]
        pub primary_source: Option<bool>,
        #[serde(default)]
        pub report_origin: Option<CodeableConcept>,
        #[serde(default)]
        pub location: Option<Reference>,
        #[serde(default)]
        pub manufacturer: Option<Reference>,
        #[serde(default)]
        pub lot_number: Option<String>,
        #[serde(default)]
        pub expiration_date: Option<FhirDate>,
        #[serde(default)]
        pub site: Option<CodeableConcept>,
        #[serde(default)]
        pub route: Option<CodeableConcept>,
        #[serde(default)]
        pub dose_quantity: Option<Value>,
        #[serde(default)]
        pub performer: Vec<Value>,
        #[serde(default)]
        pub note: Vec<Value>,
        #[serde(default)]
        pub reason_code: Vec<CodeableConcept>,
        #[serde(default)]
        pub reason_reference: Vec<Reference>,
        #[serde(default)]
        pub is_subpotent: Option<bool>,
        #[serde(default)]
        pub subpotent_reason: Vec<CodeableConcept>,
        #[serde(default)]
        pub education: Vec<Value>,
        #[serde(default)]
        pub program_eligibility: Vec<CodeableConcept>,
        #[serde(default)]
        pub funding_source: Option<CodeableConcept>,
        #[serde(default)]
        pub reaction: Vec<Value>,
        #[serde(default)]
        pub protocol_applied: Vec<Value>,
    }
}

impl ChoiceRules for Immunization {
    fn check_choices(&self) -> Result<(), String> {
        exactly_one(
            "occurrence",
            &[
                ("occurrenceDateTime", self.occurrence_date_time.is_some()),
                ("occurrenceString", self.occurrence_string.is_some()),
            ],
        )
    }
}
