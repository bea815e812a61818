//! Flat rows ready for tabular storage
//!
//! A [`FlatRow`] is an ordered column → scalar mapping. Column order is the
//! order the projection inserted them, which is also the column order used
//! when a table is created from the row.

use super::errors::IngestError;
use super::result::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Name of the natural identifier column
pub const ID_COLUMN: &str = "id";

/// Scalar value held by a single column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Null,
    Text(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
}

/// Storage class of a column, inferred from the first value written to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Real,
    Boolean,
}

impl ColumnValue {
    /// Storage class for this value; nulls are stored as text
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnValue::Null | ColumnValue::Text(_) => ColumnKind::Text,
            ColumnValue::Integer(_) => ColumnKind::Integer,
            ColumnValue::Real(_) => ColumnKind::Real,
            ColumnValue::Boolean(_) => ColumnKind::Boolean,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts to the equivalent JSON scalar
    pub fn to_json(&self) -> Value {
        match self {
            ColumnValue::Null => Value::Null,
            ColumnValue::Text(s) => Value::String(s.clone()),
            ColumnValue::Integer(i) => Value::from(*i),
            ColumnValue::Real(f) => Value::from(*f),
            ColumnValue::Boolean(b) => Value::Bool(*b),
        }
    }

    /// Converts a JSON value into a column value.
    ///
    /// Arrays and objects are serialized to their JSON text so that no nested
    /// structure reaches the store.
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => ColumnValue::Null,
            Value::Bool(b) => ColumnValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ColumnValue::Integer(i),
                None => ColumnValue::Real(n.as_f64().ok_or_else(|| {
                    IngestError::Serialization(format!("number {n} is out of range"))
                })?),
            },
            Value::String(s) => ColumnValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => ColumnValue::Text(serde_json::to_string(value)?),
        })
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::Text(value.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::Text(value)
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        ColumnValue::Boolean(value)
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Integer(value)
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        ColumnValue::Real(value)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ColumnValue::Null, Into::into)
    }
}

impl Serialize for ColumnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ColumnValue::Null => serializer.serialize_none(),
            ColumnValue::Text(s) => serializer.serialize_str(s),
            ColumnValue::Integer(i) => serializer.serialize_i64(*i),
            ColumnValue::Real(f) => serializer.serialize_f64(*f),
            ColumnValue::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

/// Returns true if `name` can be used unquoted as a table or column name
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Ordered column → value mapping produced by a projection rule
///
/// # Examples
///
/// ```
/// use fhir_etl::domain::{ColumnValue, FlatRow};
///
/// let mut row = FlatRow::new();
/// row.insert("id", "med-1");
/// row.insert("medication_status", Option::<String>::None);
///
/// assert_eq!(row.id(), Some("med-1"));
/// assert_eq!(row.get("medication_status"), Some(&ColumnValue::Null));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRow {
    columns: Vec<(String, ColumnValue)>,
}

impl FlatRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column, replacing the value in place if the column already exists
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<ColumnValue>) {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.columns.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// The natural identifier, if the row has a textual `id`
    pub fn id(&self) -> Option<&str> {
        self.get(ID_COLUMN).and_then(ColumnValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Checks that every column name is a valid identifier and that `id` is present
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self.column_names().find(|name| !is_valid_identifier(name)) {
            return Err(IngestError::Database(format!(
                "invalid column name '{bad}'"
            )));
        }
        if self.id().is_none() {
            return Err(IngestError::Database(format!(
                "row has no textual '{ID_COLUMN}' column"
            )));
        }
        Ok(())
    }

    /// JSON object with the same columns and values
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .columns
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }

    /// Builds a row from a JSON object, in the map's key order
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            IngestError::Serialization("flat row must be a JSON object".to_string())
        })?;
        let mut row = FlatRow::new();
        for (name, value) in object {
            row.insert(name.clone(), ColumnValue::from_json(value)?);
        }
        Ok(row)
    }
}

impl Serialize for FlatRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut row = FlatRow::new();
        row.insert("id", "a");
        row.insert("status", "active");
        row.insert("id", "b");

        let names: Vec<&str> = row.column_names().collect();
        assert_eq!(names, vec!["id", "status"]);
        assert_eq!(row.id(), Some("b"));
    }

    #[test]
    fn test_option_conversion() {
        let mut row = FlatRow::new();
        row.insert("present", Some("x"));
        row.insert("absent", None::<&str>);
        assert_eq!(row.get("present"), Some(&ColumnValue::Text("x".to_string())));
        assert!(row.get("absent").unwrap().is_null());
    }

    #[test]
    fn test_from_json_serializes_nested_values() {
        let row = FlatRow::from_json(&json!({
            "id": "p1",
            "tags": ["a", "b"],
            "count": 3,
            "ratio": 0.5,
            "flag": true
        }))
        .unwrap();

        assert_eq!(row.get("tags"), Some(&ColumnValue::Text("[\"a\",\"b\"]".to_string())));
        assert_eq!(row.get("count"), Some(&ColumnValue::Integer(3)));
        assert_eq!(row.get("ratio"), Some(&ColumnValue::Real(0.5)));
        assert_eq!(row.get("flag"), Some(&ColumnValue::Boolean(true)));
    }

    #[test]
    fn test_to_json_matches_columns() {
        let mut row = FlatRow::new();
        row.insert("id", "p1");
        row.insert("deceased", false);
        row.insert("deceased_date", None::<String>);
        assert_eq!(
            row.to_json(),
            json!({"id": "p1", "deceased": false, "deceased_date": null})
        );
    }

    #[test]
    fn test_validate() {
        let mut row = FlatRow::new();
        row.insert("status", "active");
        assert!(row.validate().is_err());

        row.insert("id", "x");
        assert!(row.validate().is_ok());

        row.insert("resource.id", "nested");
        assert!(row.validate().is_err());
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("medical_record_number"));
        assert!(is_valid_identifier("_x1"));
        assert!(!is_valid_identifier("1abc"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("drop table;"));
        assert!(!is_valid_identifier("a\"b"));
    }

    #[test]
    fn test_column_kind() {
        assert_eq!(ColumnValue::Null.kind(), ColumnKind::Text);
        assert_eq!(ColumnValue::Boolean(true).kind(), ColumnKind::Boolean);
        assert_eq!(ColumnValue::Integer(1).kind(), ColumnKind::Integer);
        assert_eq!(ColumnValue::Real(1.5).kind(), ColumnKind::Real);
    }
}
