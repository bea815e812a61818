//! FHIR `date` and `dateTime` primitives
//!
//! Both types keep the original lexical form for serialization and a parsed
//! [`NaiveDateTime`] for projection. Partial dates (`YYYY`, `YYYY-MM`) resolve
//! to the first instant they cover. Date-times with an offset keep their wall
//! clock time; no conversion to UTC happens.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Format every date column is written in
pub const ROW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_partial_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let year = parts.next()?;
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month = match parts.next() {
        Some(m) if m.len() == 2 => m.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    let day = match parts.next() {
        Some(d) if d.len() == 2 => d.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// FHIR `date`: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FhirDate {
    raw: String,
    value: NaiveDate,
}

impl FhirDate {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn date(&self) -> NaiveDate {
        self.value
    }

    /// Midnight at the start of this date, in row format
    pub fn to_row_string(&self) -> String {
        self.value
            .and_time(NaiveTime::MIN)
            .format(ROW_TIMESTAMP_FORMAT)
            .to_string()
    }
}

impl FromStr for FhirDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_partial_date(s)
            .map(|value| Self {
                raw: s.to_string(),
                value,
            })
            .ok_or_else(|| format!("invalid date '{s}'"))
    }
}

/// FHIR `dateTime`: a partial or full date, or a date-time with offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FhirDateTime {
    raw: String,
    value: NaiveDateTime,
}

impl FhirDateTime {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Wall clock value as written in the source
    pub fn naive(&self) -> NaiveDateTime {
        self.value
    }

    pub fn to_row_string(&self) -> String {
        self.value.format(ROW_TIMESTAMP_FORMAT).to_string()
    }
}

impl FromStr for FhirDateTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = if s.contains('T') {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.naive_local())
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
                .map_err(|e| format!("invalid dateTime '{s}': {e}"))?
        } else {
            parse_partial_date(s)
                .ok_or_else(|| format!("invalid dateTime '{s}'"))?
                .and_time(NaiveTime::MIN)
        };
        Ok(Self {
            raw: s.to_string(),
            value,
        })
    }
}

macro_rules! string_backed_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.raw)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.raw)
            }
        }
    };
}

string_backed_serde!(FhirDate);
string_backed_serde!(FhirDateTime);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_full_and_partial() {
        assert_eq!(
            FhirDate::from_str("1960-06-08").unwrap().to_row_string(),
            "1960-06-08 00:00:00"
        );
        assert_eq!(
            FhirDate::from_str("1960-06").unwrap().to_row_string(),
            "1960-06-01 00:00:00"
        );
        assert_eq!(
            FhirDate::from_str("1960").unwrap().to_row_string(),
            "1960-01-01 00:00:00"
        );
    }

    #[test]
    fn test_date_rejects_invalid() {
        assert!(FhirDate::from_str("1960-13-01").is_err());
        assert!(FhirDate::from_str("60-01-01").is_err());
        assert!(FhirDate::from_str("1960-02-30").is_err());
        assert!(FhirDate::from_str("1960-06-08T10:00:00Z").is_err());
        assert!(FhirDate::from_str("").is_err());
    }

    #[test]
    fn test_datetime_keeps_wall_clock() {
        let dt = FhirDateTime::from_str("2010-07-04T09:36:41+10:00").unwrap();
        assert_eq!(dt.to_row_string(), "2010-07-04 09:36:41");
        assert_eq!(dt.as_str(), "2010-07-04T09:36:41+10:00");
    }

    #[test]
    fn test_datetime_fractional_seconds_and_utc() {
        let dt = FhirDateTime::from_str("2021-03-01T12:00:05.123Z").unwrap();
        assert_eq!(dt.to_row_string(), "2021-03-01 12:00:05");
    }

    #[test]
    fn test_datetime_date_only() {
        let dt = FhirDateTime::from_str("2021-03-01").unwrap();
        assert_eq!(dt.to_row_string(), "2021-03-01 00:00:00");
    }

    #[test]
    fn test_datetime_rejects_garbage() {
        assert!(FhirDateTime::from_str("yesterday").is_err());
        assert!(FhirDateTime::from_str("2021-03-01T25:00:00Z").is_err());
    }

    #[test]
    fn test_serde_round_trip_keeps_raw() {
        let dt: FhirDateTime = serde_json::from_str("\"2010-07-04T09:36:41+10:00\"").unwrap();
        assert_eq!(
            serde_json::to_string(&dt).unwrap(),
            "\"2010-07-04T09:36:41+10:00\""
        );
        assert!(serde_json::from_str::<FhirDate>("\"not-a-date\"").is_err());
    }
}
