//! Forgiving field deserializers for records posted by browsers
//!
//! A record is rendered even when a field arrives as `null`, as a number, or
//! with a value outside its closed set. Such fields fall back to what an
//! absent field would give; none of them fails the whole record.

use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;

use crate::record::Gender;
use crate::signature::SignatureImage;

/// Any JSON value, with the scalars kept
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Other(IgnoredAny),
}

/// A value of `T`, or anything else
#[derive(Deserialize)]
#[serde(untagged)]
enum Shaped<T> {
    Value(T),
    Other(IgnoredAny),
}

/// Strings as-is, other scalars in their printed form, everything else empty
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(n) => n.to_string(),
        Scalar::UInt(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Other(_) => String::new(),
    })
}

/// Booleans as-is; non-empty strings and non-zero numbers count as set
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Bool(b) => b,
        Scalar::Text(s) => !s.is_empty(),
        Scalar::Int(n) => n != 0,
        Scalar::UInt(n) => n != 0,
        Scalar::Float(n) => n != 0.0 && !n.is_nan(),
        Scalar::Other(_) => false,
    })
}

/// Unrecognized or non-string values leave gender unset
pub fn gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => Gender::parse(&s),
        _ => None,
    })
}

/// A flag group, or its default when the value has another shape
pub fn group<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match Shaped::<T>::deserialize(deserializer)? {
        Shaped::Value(group) => group,
        Shaped::Other(_) => T::default(),
    })
}

/// A non-blank string becomes the signature; anything else means unsigned
pub fn signature<'de, D>(deserializer: D) -> Result<Option<SignatureImage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) if !s.trim().is_empty() => Some(SignatureImage::from_data_uri(s)),
        _ => None,
    })
}
