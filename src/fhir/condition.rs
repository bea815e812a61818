//! Condition resource

use super::choice::{at_most_one, ChoiceRules};
use super::datatypes::{CodeableConcept, Identifier, Reference};
use super::primitives::FhirDateTime;
use serde_json::Value;

domain_resource! {
    /// A clinical condition, problem or diagnosis
    pub struct Condition {
        #[serde(default)]
        pub identifier: Vec<Identifier>,
        #[serde(default)]
        pub clinical_status: Option<CodeableConcept>,
        #[serde(default)]
        pub verification_status: Option<CodeableConcept>,
        #[serde(default)]
        pub category: Vec<CodeableConcept>,
        #[serde(default)]
        pub severity: Option<CodeableConcept>,
        #[serde(default)]
        pub code: Option<CodeableConcept>,
        #[serde(default)]
        pub body_site: Vec<CodeableConcept>,
        pub subject: Reference,
        #[serde(default)]
        pub encounter: Option<Reference>,
        #[serde(default)]
        pub onset_date_time: Option<FhirDateTime>,
        #[serde(default)]
        pub onset_age: Option<Value>,
        #[serde(default)]
        pub onset_period: Option<Value>,
        #[serde(default)]
        pub onset_range: Option<Value>,
        #[serde(default)]
        pub onset_string: Option<String>,
        #[serde(default)]
        pub abatement_date_time: Option<FhirDateTime>,
        #[serde(default)]
        pub abatement_age: Option<Value>,
        #[serde(default)]
        pub abatement_period: Option<Value>,
        #[serde(default)]
        pub abatement_range: Option<Value>,
        #[serde(default)]
        pub abatement_string: Option<String>,
        #[serde(default)]
        pub recorded_date: Option<FhirDateTime>,
        #[serde(default)]
        pub recorder: Option<Reference>,
        #[serde(default)]
        pub asserter: Option<Reference>,
        #[serde(default)]
        pub stage: Vec<Value>,
        #[serde(default)]
        pub evidence: Vec<Value>,
        #[serde(default)]
        pub note: Vec<Value>,
    }
}

impl ChoiceRules for Condition {
    fn check_choices(&self) -> Result<(), String> {
        at_most_one(
            "onset",
            &[
                ("onsetDateTime", self.onset_date_time.is_some()),
                ("onsetAge", self.onset_age.is_some()),
                ("onsetPeriod", self.onset_period.is_some()),
                ("onsetRange", self.onset_range.is_some()),
                ("onsetString", self.onset_string.is_some()),
            ],
        )?;
        at_most_one(
            "abatement",
            &[
                ("abatementDateTime", self.abatement_date_time.is_some()),
                ("abatementAge", self.abatement_age.is_some()),
                ("abatementPeriod", self.abatement_period.is_some()),
                ("abatementRange", self.abatement_range.is_some()),
                ("abatementString", self.abatement_string.is_some()),
            ],
        )
    }
}
