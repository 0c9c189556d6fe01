//! Raw form fields to canonical record

use intake_types::{CanonicalRecord, FamilyHistory, FlagGroup, Gender, SignatureImage, SourceChannels};
use serde::Deserialize;
use thiserror::Error;

use crate::roc_date::{DateError, RocDate};

/// Joins the selected relationship tags into one display string
pub const RELATIONSHIP_DELIMITER: &str = "、";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("Fill date: {0}")]
    FillDate(#[from] DateError),
}

/// Form fields exactly as the browser submits them.
///
/// Field names follow the HTML `name` attributes; repeated checkboxes
/// arrive as arrays of their `value`s.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawForm {
    pub medical_record_no: String,
    /// `YYYY-MM-DD` from the date input
    pub fill_date: String,
    pub name: String,
    /// `male` or `female`
    pub gender: String,
    pub birth_year: String,
    pub birth_month: String,
    pub birth_day: String,
    pub id_number: String,
    pub phone_home: String,
    pub phone_mobile: String,
    pub address: String,
    pub emergency_contact: String,
    pub emergency_relation: Vec<String>,
    pub emergency_phone: String,
    pub email: String,
    pub referrer: String,
    pub source: Vec<String>,
    pub family_history: Vec<String>,
    pub family_history_other: String,
}

/// Build the canonical record for one submission.
///
/// Birth date components are already 民國 values typed by the patient and
/// pass through untouched. The ID number is uppercased here and nowhere
/// else.
pub fn build_record(
    raw: RawForm,
    signature: Option<SignatureImage>,
) -> Result<CanonicalRecord, FormatError> {
    let fill_date = if raw.fill_date.trim().is_empty() {
        String::new()
    } else {
        RocDate::parse_iso(&raw.fill_date)?.to_string()
    };

    Ok(CanonicalRecord {
        medical_record_number: raw.medical_record_no,
        fill_date,
        name: raw.name,
        gender: Gender::parse(&raw.gender),
        birth_year: raw.birth_year,
        birth_month: raw.birth_month,
        birth_day: raw.birth_day,
        id_number: raw.id_number.to_uppercase(),
        home_phone: raw.phone_home,
        mobile_phone: raw.phone_mobile,
        address: raw.address,
        emergency_contact: raw.emergency_contact,
        relationship: raw.emergency_relation.join(RELATIONSHIP_DELIMITER),
        emergency_phone: raw.emergency_phone,
        email: raw.email,
        referrer_name: raw.referrer,
        source_channels: SourceChannels::from_tags(&raw.source),
        family_history: FamilyHistory::from_tags(&raw.family_history),
        family_history_other: raw.family_history_other,
        signature,
    })
}
