//! Credential handling using the secrecy crate
//!
//! Database passwords and connection strings are held as [`SecretString`]:
//! memory is zeroed on drop, `Debug` output is redacted and reading the value
//! requires an explicit `expose_secret()`.
//!
//! ```rust
//! use fhir_etl::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let password = secret_string("mypassword".to_string());
//! assert_eq!(password.expose_secret().as_str(), "mypassword");
//! assert!(!format!("{password:?}").contains("mypassword"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use zeroize::Zeroize;

/// Credential text; derefs to `str` once exposed
#[derive(Clone, Zeroize, Serialize, Deserialize)]
#[zeroize(drop)]
#[serde(transparent)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for SecretValue {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// A string secret, zeroized on drop and redacted in `Debug`
pub type SecretString = Secret<SecretValue>;

pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
