//! MedicationRequest resource

use super::choice::{at_most_one, exactly_one, ChoiceRules};
use super::datatypes::{CodeableConcept, Identifier, Reference};
use super::primitives::FhirDateTime;
use serde_json::Value;

domain_resource! {
    /// An order for supply and administration of a medication
    pub struct MedicationRequest {
        #[serde(default)]
        pub identifier: Vec<Identifier>,
        pub status: String,
        #[serde(default)]
        pub status_reason: Option<CodeableConcept>,
        pub intent: String,
        #[serde(default)]
        pub category: Vec<CodeableConcept>,
        #[serde(default)]
        pub priority: Option<String>,
        #[serde(default)]
        pub do_not_perform: Option<bool>,
        #[serde(default)]
        pub reported_boolean: Option<bool>,
        #[serde(default)]
        pub reported_reference: Option<Reference>,
        #[serde(default)]
        pub medication_codeable_concept: Option<CodeableConcept>,
        #[serde(default)]
        pub medication_reference: Option<Reference>,
        pub subject: Reference,
        #[serde(default)]
        pub encounter: Option<Reference>,
        #[serde(default)]
        pub supporting_information: Vec<Reference>,
        #[serde(default)]
        pub authored_on: Option<FhirDateTime>,
        #[serde(default)]
        pub requester: Option<Reference>,
        #[serde(default)]
        pub performer: Option<Reference>,
        #[serde(default)]
        pub performer_type: Option<CodeableConcept>,
        #[serde(default)]
        pub recorder: Option<Reference>,
        #[serde(default)]
        pub reason_code: Vec<CodeableConcept>,
        #[serde(default)]
        pub reason_reference: Vec<Reference>,
        #[serde(default)]
        pub instantiates_canonical: Vec<String>,
        #[serde(default)]
        pub instantiates_uri: Vec<String>,
        #[serde(default)]
        pub based_on: Vec<Reference>,
        #[serde(default)]
        pub group_identifier: Option<Identifier>,
        #[serde(default)]
        pub course_of_therapy_type: Option<CodeableConcept>,
        #[serde(default)]
        pub insurance: Vec<Reference>,
        #[serde(default)]
        pub note: Vec<Value>,
        #[serde(default)]
        pub dosage_instruction: Vec<Value>,
        #[serde(default)]
        pub dispense_request: Option<Value>,
        #[serde(default)]
        pub substitution: Option<Value>,
        #[serde(default)]
        pub prior_prescription: Option<Reference>,
        #[serde(default)]
        pub detected_issue: Vec<Reference>,
        #[serde(default)]
        pub event_history: Vec<Reference>,
    }
}

impl ChoiceRules for MedicationRequest {
    fn check_choices(&self) -> Result<(), String> {
        at_most_one(
            "reported",
            &[
                ("reportedBoolean", self.reported_boolean.is_some()),
                ("reportedReference", self.reported_reference.is_some()),
            ],
        )?;
        exactly_one(
            "medication",
            &[
                ("medicationCodeableConcept", self.medication_codeable_concept.is_some()),
                ("medicationReference", self.medication_reference.is_some()),
            ],
        )
    }
}
