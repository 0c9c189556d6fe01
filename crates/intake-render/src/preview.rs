//! Plain-text preview of what the PDF will say

use intake_types::CanonicalRecord;

use crate::document::build_document;

/// The printed lines of the record's document, without blank spacers.
///
/// A readable signature shows up only as an image in the PDF, so it has no
/// line here; the unsigned and load-failure notices do.
pub fn preview(record: &CanonicalRecord, today: &str) -> Vec<String> {
    build_document(record, today)
        .plain_text()
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect()
}
