//! Supported FHIR resource types
//!
//! The set is closed: adding a type means adding a variant here, a typed model
//! in [`crate::fhir`] and a projection rule in [`crate::core::transform`].

use super::errors::IngestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource type tag carried by every bundle entry
///
/// # Examples
///
/// ```
/// use fhir_etl::domain::ResourceType;
/// use std::str::FromStr;
///
/// let resource_type = ResourceType::from_str("MedicationRequest").unwrap();
/// assert_eq!(resource_type.table_name(), "MedicationRequest");
/// assert!(ResourceType::from_str("Observation").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Patient,
    Encounter,
    Condition,
    Claim,
    Procedure,
    Immunization,
    MedicationRequest,
    Medication,
}

impl ResourceType {
    /// Every supported type, in registry order
    pub const ALL: [ResourceType; 8] = [
        ResourceType::Patient,
        ResourceType::Encounter,
        ResourceType::Condition,
        ResourceType::Claim,
        ResourceType::Procedure,
        ResourceType::Immunization,
        ResourceType::MedicationRequest,
        ResourceType::Medication,
    ];

    /// The `resourceType` string used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Patient => "Patient",
            ResourceType::Encounter => "Encounter",
            ResourceType::Condition => "Condition",
            ResourceType::Claim => "Claim",
            ResourceType::Procedure => "Procedure",
            ResourceType::Immunization => "Immunization",
            ResourceType::MedicationRequest => "MedicationRequest",
            ResourceType::Medication => "Medication",
        }
    }

    /// Name of the table rows of this type are written to
    pub fn table_name(&self) -> &'static str {
        self.as_str()
    }

    /// Returns true if `name` is one of the supported types
    pub fn is_supported(name: &str) -> bool {
        Self::ALL.iter().any(|t| t.as_str() == name)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| IngestError::Lookup(s.to_string()))
    }
}
