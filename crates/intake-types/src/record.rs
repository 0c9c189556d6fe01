//! The canonical intake record

use serde::{Deserialize, Serialize};

use crate::flags::{FamilyHistory, SourceChannels};
use crate::lenient;
use crate::signature::SignatureImage;

/// Patient gender as printed on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "男")]
    Male,
    #[serde(rename = "女")]
    Female,
}

impl Gender {
    /// Accepts the form's `male`/`female` values and the glyphs themselves
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "male" | "男" => Some(Gender::Male),
            "female" | "女" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Gender::Male => "男",
            Gender::Female => "女",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// One patient's intake submission.
///
/// Dates are already in the 民國 calendar and `id_number` is already
/// uppercase. Every field defaults when missing from the JSON, and fields
/// of the wrong shape are read leniently (see [`lenient`]), so the renderer
/// can fall back to placeholders instead of rejecting the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanonicalRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub medical_record_number: String,
    /// `YYY/MM/DD`
    #[serde(deserialize_with = "lenient::text")]
    pub fill_date: String,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::gender")]
    pub gender: Option<Gender>,
    #[serde(deserialize_with = "lenient::text")]
    pub birth_year: String,
    #[serde(deserialize_with = "lenient::text")]
    pub birth_month: String,
    #[serde(deserialize_with = "lenient::text")]
    pub birth_day: String,
    #[serde(deserialize_with = "lenient::text")]
    pub id_number: String,
    #[serde(deserialize_with = "lenient::text")]
    pub home_phone: String,
    #[serde(deserialize_with = "lenient::text")]
    pub mobile_phone: String,
    #[serde(deserialize_with = "lenient::text")]
    pub address: String,
    #[serde(deserialize_with = "lenient::text")]
    pub emergency_contact: String,
    /// Selected relationship tags joined with `、`
    #[serde(deserialize_with = "lenient::text")]
    pub relationship: String,
    #[serde(deserialize_with = "lenient::text")]
    pub emergency_phone: String,
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::text")]
    pub referrer_name: String,
    #[serde(deserialize_with = "lenient::group")]
    pub source_channels: SourceChannels,
    #[serde(deserialize_with = "lenient::group")]
    pub family_history: FamilyHistory,
    #[serde(deserialize_with = "lenient::text")]
    pub family_history_other: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::signature")]
    pub signature: Option<SignatureImage>,
}
