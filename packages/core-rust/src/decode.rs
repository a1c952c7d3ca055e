//! Response decoding: raw payloads into typed values.
//!
//! Record types derive `Deserialize`; the service sends every field as a
//! string, so numeric and boolean fields go through the helpers in [`de`].
//! Decoders are only ever run on payloads the classifier has already accepted.

use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::error::DecodeError;
use crate::transport::{RawPayload, Record};

/// `"1"` is true, anything else (including no payload) is false.
///
/// # Errors
///
/// Returns [`DecodeError::Shape`] for a record-set payload.
pub fn flag(payload: RawPayload) -> Result<bool, DecodeError> {
    match payload {
        RawPayload::Scalar(value) => Ok(value.trim() == "1"),
        RawPayload::Empty => Ok(false),
        other @ RawPayload::Records(_) => Err(DecodeError::Shape {
            expected: "scalar",
            found: other.kind(),
        }),
    }
}

/// A scalar parsed with `FromStr`, e.g. a freshly created id or a token.
///
/// # Errors
///
/// Returns [`DecodeError::Shape`] when no scalar was returned and
/// [`DecodeError::Parse`] when it does not parse.
pub fn scalar<T: FromStr>(payload: RawPayload) -> Result<T, DecodeError> {
    match payload {
        RawPayload::Scalar(value) => value.trim().parse().map_err(|_| DecodeError::Parse {
            value,
            target: std::any::type_name::<T>(),
        }),
        other => Err(DecodeError::Shape {
            expected: "scalar",
            found: other.kind(),
        }),
    }
}

/// Decode one record.
///
/// # Errors
///
/// Returns [`DecodeError::Record`] when a field is missing or malformed.
pub fn record<T: DeserializeOwned>(record: &Record) -> Result<T, DecodeError> {
    let value = serde_json::to_value(record)?;
    Ok(serde_json::from_value(value)?)
}

/// Decode every record. An empty payload or an empty scalar is an empty list.
///
/// # Errors
///
/// Returns [`DecodeError`] for a non-empty scalar or any malformed record.
pub fn records<T: DeserializeOwned>(payload: RawPayload) -> Result<Vec<T>, DecodeError> {
    match payload {
        RawPayload::Records(rows) => rows.iter().map(record::<T>).collect(),
        RawPayload::Empty => Ok(Vec::new()),
        RawPayload::Scalar(value) if value.trim().is_empty() => Ok(Vec::new()),
        other @ RawPayload::Scalar(_) => Err(DecodeError::Shape {
            expected: "records",
            found: other.kind(),
        }),
    }
}

/// Decode the first record, if any. An absent record is not an error.
///
/// # Errors
///
/// Same as [`records`].
pub fn first_record<T: DeserializeOwned>(payload: RawPayload) -> Result<Option<T>, DecodeError> {
    match payload {
        RawPayload::Records(rows) => rows.first().map(record::<T>).transpose(),
        other => records::<T>(other).map(|rows| rows.into_iter().next()),
    }
}

/// Field deserializers for string-encoded wire values.
pub mod de {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer};

    /// Parse a string field with `FromStr`.
    ///
    /// # Errors
    ///
    /// Fails when the field is not a string or does not parse.
    pub fn from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse().map_err(serde::de::Error::custom)
    }

    /// Like [`from_str`], but an empty string is `None`.
    ///
    /// # Errors
    ///
    /// Fails when a non-empty field does not parse.
    pub fn opt_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }

    /// `"1"` / `"true"` (any case) are true, everything else false.
    ///
    /// # Errors
    ///
    /// Fails when the field is not a string.
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        Ok(raw == "1" || raw.eq_ignore_ascii_case("true"))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        #[serde(rename = "name")]
        name: String,
        #[serde(rename = "count", deserialize_with = "de::from_str")]
        count: u32,
        #[serde(rename = "active", deserialize_with = "de::flag", default)]
        active: bool,
        #[serde(rename = "score", deserialize_with = "de::opt_from_str", default)]
        score: Option<f64>,
    }

    fn row(fields: &[(&str, &str)]) -> Record {
        fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn flag_only_accepts_one() {
        assert!(flag(RawPayload::Scalar("1".into())).unwrap());
        assert!(!flag(RawPayload::Scalar("0".into())).unwrap());
        assert!(!flag(RawPayload::Empty).unwrap());
        assert!(flag(RawPayload::Records(vec![])).is_err());
    }

    #[test]
    fn scalar_parses_ids() {
        assert_eq!(scalar::<u64>(RawPayload::Scalar("42".into())).unwrap(), 42);
        assert!(matches!(
            scalar::<u64>(RawPayload::Scalar("x".into())),
            Err(DecodeError::Parse { .. })
        ));
        assert!(matches!(
            scalar::<u64>(RawPayload::Empty),
            Err(DecodeError::Shape { .. })
        ));
    }

    #[test]
    fn records_decode_string_fields() {
        let payload = RawPayload::Records(vec![
            row(&[("name", "a"), ("count", "3"), ("active", "1"), ("score", "")]),
            row(&[("name", "b"), ("count", " 4 "), ("score", "1.5")]),
        ]);
        let rows: Vec<Row> = records(payload).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].count, 3);
        assert!(rows[0].active);
        assert_eq!(rows[0].score, None);
        assert!(!rows[1].active);
        assert_eq!(rows[1].score, Some(1.5));
    }

    #[test]
    fn malformed_record_is_an_error() {
        let payload = RawPayload::Records(vec![row(&[("name", "a"), ("count", "many")])]);
        assert!(matches!(records::<Row>(payload), Err(DecodeError::Record(_))));
    }

    #[test]
    fn first_record_of_nothing_is_none() {
        assert_eq!(first_record::<Row>(RawPayload::Records(vec![])).unwrap(), None);
        assert_eq!(first_record::<Row>(RawPayload::Empty).unwrap(), None);
        assert_eq!(first_record::<Row>(RawPayload::Scalar(String::new())).unwrap(), None);
    }
}
