//! Typed FHIR R4B resource models
//!
//! Resources reject unknown elements so that a misspelt or foreign field
//! fails validation instead of being silently dropped. Backbone elements
//! model what the projection reads and tolerate the rest.

/// Declares a resource struct carrying the common `DomainResource` elements.
macro_rules! domain_resource {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase", deny_unknown_fields)]
        pub struct $name {
            #[serde(default)]
            pub id: Option<String>,
            #[serde(default)]
            pub meta: Option<$crate::fhir::datatypes::Meta>,
            #[serde(default)]
            pub implicit_rules: Option<String>,
            #[serde(default)]
            pub language: Option<String>,
            #[serde(default)]
            pub text: Option<$crate::fhir::datatypes::Narrative>,
            #[serde(default)]
            pub contained: Vec<::serde_json::Value>,
            #[serde(default)]
            pub extension: Vec<$crate::fhir::datatypes::Extension>,
            #[serde(default)]
            pub modifier_extension: Vec<$crate::fhir::datatypes::Extension>,
            $($body)*
        }
    };
}

pub mod choice;
pub mod claim;
pub mod condition;
pub mod datatypes;
pub mod encounter;
pub mod immunization;
pub mod medication;
pub mod medication_request;
pub mod patient;
pub mod primitives;
pub mod procedure;

pub use choice::ChoiceRules;
pub use claim::Claim;
pub use condition::Condition;
pub use encounter::Encounter;
pub use immunization::Immunization;
pub use medication::Medication;
pub use medication_request::MedicationRequest;
pub use patient::{AdministrativeGender, Patient};
pub use primitives::{FhirDate, FhirDateTime, ROW_TIMESTAMP_FORMAT};
pub use procedure::Procedure;

use crate::domain::ResourceType;

/// A validated record of one of the supported types
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Patient(Box<Patient>),
    Encounter(Box<Encounter>),
    Condition(Box<Condition>),
    Claim(Box<Claim>),
    Procedure(Box<Procedure>),
    Immunization(Box<Immunization>),
    MedicationRequest(Box<MedicationRequest>),
    Medication(Box<Medication>),
}

impl Resource {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Resource::Patient(_) => ResourceType::Patient,
            Resource::Encounter(_) => ResourceType::Encounter,
            Resource::Condition(_) => ResourceType::Condition,
            Resource::Claim(_) => ResourceType::Claim,
            Resource::Procedure(_) => ResourceType::Procedure,
            Resource::Immunization(_) => ResourceType::Immunization,
            Resource::MedicationRequest(_) => ResourceType::MedicationRequest,
            Resource::Medication(_) => ResourceType::Medication,
        }
    }

    /// Logical id of the resource, if it has one
    pub fn id(&self) -> Option<&str> {
        match self {
            Resource::Patient(r) => r.id.as_deref(),
            Resource::Encounter(r) => r.id.as_deref(),
            Resource::Condition(r) => r.id.as_deref(),
            Resource::Claim(r) => r.id.as_deref(),
            Resource::Procedure(r) => r.id.as_deref(),
            Resource::Immunization(r) => r.id.as_deref(),
            Resource::MedicationRequest(r) => r.id.as_deref(),
            Resource::Medication(r) => r.id.as_deref(),
        }
    }
}
