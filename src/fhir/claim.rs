//! Claim resource

use super::choice::{exactly_one, ChoiceRules};
use super::datatypes::{CodeableConcept, Extension, Identifier, Money, Period, Reference};
use super::primitives::FhirDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDiagnosis {
    #[serde(default)]
    pub extension: Vec<Extension>,
    pub sequence: u32,
    #[serde(default)]
    pub diagnosis_codeable_concept: Option<CodeableConcept>,
    #[serde(default)]
    pub diagnosis_reference: Option<Reference>,
    #[serde(default, rename = "type")]
    pub type_: Vec<CodeableConcept>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimInsurance {
    #[serde(default)]
    pub extension: Vec<Extension>,
    pub sequence: u32,
    pub focal: bool,
    pub coverage: Reference,
    #[serde(default)]
    pub business_arrangement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimItem {
    #[serde(default)]
    pub extension: Vec<Extension>,
    pub sequence: u32,
    #[serde(default)]
    pub product_or_service: Option<CodeableConcept>,
    #[serde(default)]
    pub encounter: Vec<Reference>,
    #[serde(default)]
    pub net: Option<Money>,
}

domain_resource! {
    /// A request for reimbursement of products and services
    pub struct Claim {
        #[serde(default)]
        pub identifier: Vec<Identifier>,
        pub status: String,
        #[serde(rename = "type")]
        pub type_: CodeableConcept,
        #[serde(default)]
        pub sub_type: Option<CodeableConcept>,
        #[serde(rename = "use")]
        pub use_: String,
        pub patient: Reference,
        #[serde(default)]
        pub billable_period: Option<Period>,
        pub created: FhirDateTime,
        #[serde(default)]
        pub enterer: Option<Reference>,
        #[serde(default)]
        pub insurer: Option<Reference>,
        pub provider: Reference,
        pub priority: CodeableConcept,
        #[serde(default)]
        pub funds_reserve: Option<CodeableConcept>,
        #[serde(default)]
        pub related: Vec<Value>,
        #[serde(default)]
        pub prescription: Option<Reference>,
        #[serde(default)]
        pub original_prescription: Option<Reference>,
        #[serde(default)]
        pub payee: Option<Value>,
        #[serde(default)]
        pub referral: Option<Reference>,
        #[serde(default)]
        pub facility: Option<Reference>,
        #[serde(default)]
        pub care_team: Vec<Value>,
        #[serde(default)]
        pub supporting_info: Vec<Value>,
        #[serde(default)]
        pub diagnosis: Vec<ClaimDiagnosis>,
        #[serde(default)]
        pub procedure: Vec<Value>,
        pub insurance: Vec<ClaimInsurance>,
        #[serde(default)]
        pub accident: Option<Value>,
        #[serde(default)]
        pub item: Vec<ClaimItem>,
        #[serde(default)]
        pub total: Option<Money>,
    }
}

impl ChoiceRules for Claim {
    fn check_choices(&self) -> Result<(), String> {
        for (index, diagnosis) in self.diagnosis.iter().enumerate() {
            exactly_one(
                &format!("diagnosis[{index}].diagnosis"),
                &[
                    ("diagnosisCodeableConcept", diagnosis.diagnosis_codeable_concept.is_some()),
                    ("diagnosisReference", diagnosis.diagnosis_reference.is_some()),
                ],
            )?;
        }
        Ok(())
    }
}
