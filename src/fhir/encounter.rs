//! Encounter resource

use super::choice::ChoiceRules;
use super::datatypes::{CodeableConcept, Coding, Extension, Identifier, Period, Reference};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterParticipant {
    #[serde(default)]
    pub extension: Vec<Extension>,
    #[serde(default, rename = "type")]
    pub type_: Vec<CodeableConcept>,
    #[serde(default)]
    pub period: Option<Period>,
    #[serde(default)]
    pub individual: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterLocation {
    #[serde(default)]
    pub extension: Vec<Extension>,
    pub location: Reference,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub physical_type: Option<CodeableConcept>,
    #[serde(default)]
    pub period: Option<Period>,
}

domain_resource! {
    /// An interaction between a patient and healthcare providers
    pub struct Encounter {
        #[serde(default)]
        pub identifier: Vec<Identifier>,
        pub status: String,
        #[serde(default)]
        pub status_history: Vec<Value>,
        pub class: Coding,
        #[serde(default)]
        pub class_history: Vec<Value>,
        #[serde(default, rename = "type")]
        pub type_: Vec<CodeableConcept>,
        #[serde(default)]
        pub service_type: Option<CodeableConcept>,
        #[serde(default)]
        pub priority: Option<CodeableConcept>,
        #[serde(default)]
        pub subject: Option<Reference>,
        #[serde(default)]
        pub episode_of_care: Vec<Reference>,
        #[serde(default)]
        pub based_on: Vec<Reference>,
        #[serde(default)]
        pub participant: Vec<EncounterParticipant>,
        #[serde(default)]
        pub appointment: Vec<Reference>,
        #[serde(default)]
        pub period: Option<Period>,
        #[serde(default)]
        pub length: Option<Value>,
        #[serde(default)]
        pub reason_code: Vec<CodeableConcept>,
        #[serde(default)]
        pub reason_reference: Vec<Reference>,
        #[serde(default)]
        pub diagnosis: Vec<Value>,
        #[serde(default)]
        pub account: Vec<Reference>,
        #[serde(default)]
        pub hospitalization: Option<Value>,
        #[serde(default)]
        pub location: Vec<EncounterLocation>,
        #[serde(default)]
        pub service_provider: Option<Reference>,
        #[serde(default)]
        pub part_of: Option<Reference>,
    }
}

impl ChoiceRules for Encounter {}
