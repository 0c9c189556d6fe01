//! Lays a canonical record out as an [`IntakeDocument`]

use intake_types::{
    CanonicalRecord, FamilyHistory, FlagGroup, SignatureDecodeError, SignatureImage,
    SourceChannels,
};
use thiserror::Error;

use super::lexicon::{self, label};
use super::model::{Block, Cell, IntakeDocument, TableRow};

/// Virtual path the signature PNG is mounted at
pub const SIGNATURE_ASSET: &str = "/signature.png";
pub const SIGNATURE_WIDTH_PT: f64 = 200.0;
pub const SIGNATURE_HEIGHT_PT: f64 = 80.0;

#[derive(Debug, Error)]
enum SignatureLoadError {
    #[error(transparent)]
    Decode(#[from] SignatureDecodeError),
    #[error("payload is not a readable PNG: {0}")]
    Png(#[from] png::DecodingError),
}

/// Build the document for one record.
///
/// Never fails: missing values fall back to placeholders and an unreadable
/// signature becomes a notice line. The footer date falls back to `today`.
pub fn build_document(record: &CanonicalRecord, today: &str) -> IntakeDocument {
    let mut doc = IntakeDocument::default();

    doc.push(Block::Title(lexicon::TITLE.to_string()));
    doc.push(Block::Rule);

    doc.push(Block::Heading(lexicon::SECTION_BASIC.to_string()));
    doc.push(Block::FieldTable(basic_rows(record)));
    doc.push(Block::Field(Cell::new(
        label::SOURCE_CHANNELS,
        channel_summary(&record.source_channels),
    )));
    if !record.referrer_name.is_empty() {
        doc.push(Block::Field(Cell::new(label::REFERRER, &record.referrer_name)));
    }
    doc.push(Block::Spacer);

    doc.push(Block::Heading(lexicon::SECTION_FAMILY.to_string()));
    doc.push(Block::Line(lexicon::FAMILY_PROMPT.to_string()));
    for line in family_lines(&record.family_history) {
        doc.push(Block::Line(line));
    }
    if !record.family_history_other.is_empty() {
        doc.push(Block::Field(Cell::new(
            label::FAMILY_HISTORY_OTHER,
            &record.family_history_other,
        )));
    }
    doc.push(Block::Spacer);

    doc.push(Block::Heading(lexicon::SECTION_SIGNATURE.to_string()));
    push_signature(&mut doc, record.signature.as_ref());
    doc.push(Block::Spacer);

    doc.push(Block::Line(lexicon::field(
        label::FILL_DATE,
        lexicon::or(&record.fill_date, today),
    )));

    doc
}

fn basic_rows(record: &CanonicalRecord) -> Vec<TableRow> {
    vec![
        TableRow::Pair(
            Cell::new(
                label::MEDICAL_RECORD_NUMBER,
                lexicon::or(&record.medical_record_number, lexicon::CLINIC_FILLS_IN),
            ),
            Cell::new(label::FILL_DATE, &record.fill_date),
        ),
        TableRow::Pair(
            Cell::new(label::NAME, &record.name),
            Cell::new(label::GENDER, lexicon::gender(record.gender)),
        ),
        TableRow::Pair(
            Cell::new(
                label::BIRTH_DATE,
                lexicon::birth_line(&record.birth_year, &record.birth_month, &record.birth_day),
            ),
            Cell::new(label::ID_NUMBER, &record.id_number),
        ),
        TableRow::Pair(
            Cell::new(label::HOME_PHONE, lexicon::or(&record.home_phone, lexicon::NONE)),
            Cell::new(label::MOBILE_PHONE, &record.mobile_phone),
        ),
        TableRow::Wide(Cell::new(label::ADDRESS, &record.address)),
        TableRow::Pair(
            Cell::new(label::EMERGENCY_CONTACT, &record.emergency_contact),
            Cell::new(label::RELATIONSHIP, &record.relationship),
        ),
        TableRow::Pair(
            Cell::new(label::EMERGENCY_PHONE, &record.emergency_phone),
            Cell::new(label::EMAIL, lexicon::or(&record.email, lexicon::NONE)),
        ),
    ]
}

/// Checked channel labels joined with `、`, or `無`
pub(crate) fn channel_summary(channels: &SourceChannels) -> String {
    let labels = channels.checked_labels();
    if labels.is_empty() {
        lexicon::NONE.to_string()
    } else {
        labels.join(lexicon::LIST_DELIMITER)
    }
}

/// One `☑ label` line per checked condition, or the single line `無`
pub(crate) fn family_lines(history: &FamilyHistory) -> Vec<String> {
    let labels = history.checked_labels();
    if labels.is_empty() {
        vec![lexicon::NONE.to_string()]
    } else {
        labels.into_iter().map(lexicon::checked).collect()
    }
}

fn push_signature(doc: &mut IntakeDocument, signature: Option<&SignatureImage>) {
    let Some(signature) = signature else {
        doc.push(Block::Line(lexicon::UNSIGNED.to_string()));
        return;
    };

    match load_signature(signature) {
        Ok(png) => {
            doc.attach(SIGNATURE_ASSET, png);
            doc.push(Block::Image {
                path: SIGNATURE_ASSET.to_string(),
                width_pt: SIGNATURE_WIDTH_PT,
                height_pt: SIGNATURE_HEIGHT_PT,
            });
        }
        Err(e) => {
            tracing::warn!(error = %e, "signature could not be loaded, printing notice instead");
            doc.push(Block::Line(lexicon::SIGNATURE_LOAD_FAILED.to_string()));
        }
    }
}

/// Decode the data URI and make sure the payload is a complete PNG
fn load_signature(signature: &SignatureImage) -> Result<Vec<u8>, SignatureLoadError> {
    let image = signature.decode()?;

    let mut reader = png::Decoder::new(image.bytes.as_slice()).read_info()?;
    let mut frame = vec![0; reader.output_buffer_size()];
    reader.next_frame(&mut frame)?;

    Ok(image.bytes)
}
