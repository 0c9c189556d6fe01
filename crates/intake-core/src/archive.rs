//! Archive file naming
//!
//! Each submission is archived as `<stem>_初診單.json` and
//! `<stem>_初診單.pdf`, where the stem combines the fill date and the
//! patient name. Names are made safe to use as a single path component.

use intake_types::CanonicalRecord;

use crate::roc_date::RocDate;

/// Folder that holds every archived intake form
pub const ARCHIVE_FOLDER: &str = "電子病歷_初診單";

const DOCUMENT_SUFFIX: &str = "初診單";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    stem: String,
}

impl ArchiveName {
    /// Derive the name from the record's fill date and patient name.
    ///
    /// A record without a fill date falls back to `today` in `YYYMMDD` form.
    /// The `/` separators of a filled date are dropped for the same reason.
    pub fn for_record(record: &CanonicalRecord, today: RocDate) -> Self {
        let date = if record.fill_date.trim().is_empty() {
            today.compact()
        } else {
            record.fill_date.trim().replace('/', "")
        };

        Self {
            stem: format!(
                "{}_{}_{}",
                sanitize(&date),
                sanitize(record.name.trim()),
                DOCUMENT_SUFFIX
            ),
        }
    }

    /// `<date>_<name>_初診單`
    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn json_file(&self) -> String {
        format!("{}.json", self.stem)
    }

    pub fn pdf_file(&self) -> String {
        format!("{}.pdf", self.stem)
    }
}

/// Replace characters that would escape or break a file name
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn today() -> RocDate {
        RocDate::from_gregorian(NaiveDate::from_ymd_opt(2025, 2, 13).unwrap()).unwrap()
    }

    fn record(fill_date: &str, name: &str) -> CanonicalRecord {
        CanonicalRecord {
            fill_date: fill_date.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_names_from_fill_date() {
        let name = ArchiveName::for_record(&record("114/03/01", "測試病人"), today());
        assert_eq!(name.stem(), "1140301_測試病人_初診單");
        assert_eq!(name.json_file(), "1140301_測試病人_初診單.json");
        assert_eq!(name.pdf_file(), "1140301_測試病人_初診單.pdf");
    }

    #[test]
    fn test_missing_fill_date_uses_today() {
        let name = ArchiveName::for_record(&record("", "王小明"), today());
        assert_eq!(name.stem(), "1140213_王小明_初診單");
    }

    #[test]
    fn test_path_characters_replaced() {
        let name = ArchiveName::for_record(&record("114/03/01", "../etc\\passwd"), today());
        assert_eq!(name.stem(), "1140301_.._etc_passwd_初診單");
        assert!(!name.pdf_file().contains('/'));
    }

    #[test]
    fn test_control_characters_replaced() {
        let name = ArchiveName::for_record(&record("114/03/01", "王\n小明"), today());
        assert_eq!(name.stem(), "1140301_王_小明_初診單");
    }
}
