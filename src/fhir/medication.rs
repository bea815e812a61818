//! Medication resource

use super::choice::ChoiceRules;
use super::datatypes::{CodeableConcept, Identifier, Reference};
use serde_json::Value;

domain_resource! {
    /// Definition of a medication product
    pub struct Medication {
        #[serde(default)]
        pub identifier: Vec<Identifier>,
        #[serde(default)]
        pub code: Option<CodeableConcept>,
        #[serde(default)]
        pub status: Option<String>,
        #[serde(default)]
        pub manufacturer: Option<Reference>,
        #[serde(default)]
        pub form: Option<CodeableConcept>,
        #[serde(default)]
        pub amount: Option<Value>,
        #[serde(default)]
        pub ingredient: Vec<Value>,
        #[serde(default)]
        pub batch: Option<Value>,
    }
}

impl ChoiceRules for Medication {}
