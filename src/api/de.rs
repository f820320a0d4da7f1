//! Lenient (de)serializers for API scalars.
//!
//! Numbers arrive as JSON numbers or as strings (`"3600"`), booleans as
//! `true`, `1` or `"0"`. Booleans are written back as `"1"`/`"0"`.

use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(u64),
    Str(String),
}

fn parse_number<T, E>(scalar: Scalar) -> Result<Option<T>, E>
where
    T: FromStr + TryFrom<u64>,
    E: serde::de::Error,
{
    match scalar {
        Scalar::Int(n) => T::try_from(n)
            .map(Some)
            .map_err(|_| E::custom(format!("number {n} out of range"))),
        Scalar::Str(s) if s.trim().is_empty() => Ok(None),
        Scalar::Str(s) => s
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| E::custom(format!("invalid number '{s}'"))),
        Scalar::Bool(b) => Err(E::custom(format!("expected a number, found {b}"))),
    }
}

fn parse_bool<E: serde::de::Error>(scalar: Scalar) -> Result<Option<bool>, E> {
    match scalar {
        Scalar::Bool(b) => Ok(Some(b)),
        Scalar::Int(n) => Ok(Some(n != 0)),
        Scalar::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" => Ok(Some(true)),
            "0" | "false" => Ok(Some(false)),
            other => Err(E::custom(format!("invalid boolean '{other}'"))),
        },
    }
}

/// Deserializes a required number given as a JSON number or numeric string.
///
/// # Errors
///
/// Fails on null, blank or non-numeric input.
pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
{
    let scalar = Scalar::deserialize(deserializer)?;
    parse_number(scalar)?.ok_or_else(|| serde::de::Error::custom("expected a number"))
}

/// Deserializes an optional number; null and blank strings become `None`.
///
/// # Errors
///
/// Fails on non-numeric input.
pub fn opt_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
{
    Option::<Scalar>::deserialize(deserializer)?.map_or(Ok(None), parse_number)
}

/// Deserializes a boolean; null and blank strings become `false`.
///
/// # Errors
///
/// Fails on values that are not boolean-like.
pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_boolean(deserializer)?.unwrap_or(false))
}

/// Deserializes an optional boolean.
///
/// # Errors
///
/// Fails on values that are not boolean-like.
pub fn opt_boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer)?.map_or(Ok(None), parse_bool)
}

/// Serializes an optional boolean as `"1"`/`"0"`.
///
/// # Errors
///
/// Propagates serializer errors.
#[allow(clippy::ref_option)]
pub fn compat_bool<S>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(true) => serializer.serialize_str("1"),
        Some(false) => serializer.serialize_str("0"),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Deserialize, Serialize)]
    struct Sample {
        #[serde(deserialize_with = "number")]
        version: u32,
        #[serde(default, deserialize_with = "opt_number")]
        period: Option<u32>,
        #[serde(default, deserialize_with = "opt_number")]
        gzip_level: Option<u8>,
        #[serde(default, deserialize_with = "boolean")]
        active: bool,
        #[serde(
            default,
            deserialize_with = "opt_boolean",
            serialize_with = "compat_bool",
            skip_serializing_if = "Option::is_none"
        )]
        use_tls: Option<bool>,
    }

    #[test]
    fn test_numbers_from_strings_and_numbers() {
        let s: Sample = serde_json::from_str(
            r#"{"version": "3", "period": 3600, "gzip_level": "9", "active": "1", "use_tls": "0"}"#,
        )
        .unwrap();
        assert_eq!(s.version, 3);
        assert_eq!(s.period, Some(3600));
        assert_eq!(s.gzip_level, Some(9));
        assert!(s.active);
        assert_eq!(s.use_tls, Some(false));
    }

    #[test]
    fn test_missing_null_and_blank_values() {
        let s: Sample =
            serde_json::from_str(r#"{"version": 1, "period": null, "gzip_level": ""}"#).unwrap();
        assert_eq!(s.period, None);
        assert_eq!(s.gzip_level, None);
        assert!(!s.active);
        assert_eq!(s.use_tls, None);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = serde_json::from_str::<Sample>(r#"{"version": 1, "gzip_level": 300}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_invalid_number_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"version": "three"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"version": null}"#).is_err());
    }

    #[test]
    fn test_compat_bool_serialization() {
        let s = Sample {
            version: 1,
            period: None,
            gzip_level: None,
            active: true,
            use_tls: Some(true),
        };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["use_tls"], "1");
    }
}
