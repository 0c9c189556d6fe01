//! Submit-time checks that run before a record exists

use intake_types::CanonicalRecord;
use signature_pad::{PadError, SignaturePad};
use thiserror::Error;
use tracing::{debug, warn};

use crate::formatter::{build_record, FormatError, RawForm};

#[derive(Error, Debug, PartialEq)]
pub enum SubmitError {
    /// Shown to the patient as-is
    #[error("請簽名")]
    SignatureMissing,

    #[error("Signature export failed: {0}")]
    Export(#[from] PadError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Reject an unsigned form, otherwise export the signature and build the
/// record. Nothing is built when the pad is blank.
pub fn prepare_submission(
    raw: RawForm,
    pad: &SignaturePad,
) -> Result<CanonicalRecord, SubmitError> {
    if pad.is_empty() {
        warn!("Submission rejected: no signature drawn");
        return Err(SubmitError::SignatureMissing);
    }

    let signature = pad.export()?;
    let record = build_record(raw, Some(signature))?;
    debug!("Prepared intake record for {}", record.name);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use signature_pad::{ContainerLayout, PadEvent, Point, PointerInput};

    fn blank_pad() -> SignaturePad {
        SignaturePad::new(ContainerLayout::new(400.0, Point::default())).unwrap()
    }

    fn signed_pad() -> SignaturePad {
        let mut pad = blank_pad();
        let _ = pad.handle(&PadEvent::Down(PointerInput::mouse(20.0, 20.0)));
        let _ = pad.handle(&PadEvent::Move(PointerInput::mouse(120.0, 90.0)));
        let _ = pad.handle(&PadEvent::Up);
        pad
    }

    #[test]
    fn test_blank_pad_rejected() {
        let result = prepare_submission(RawForm::default(), &blank_pad());
        assert_eq!(result, Err(SubmitError::SignatureMissing));
    }

    #[test]
    fn test_rejection_message() {
        assert_eq!(SubmitError::SignatureMissing.to_string(), "請簽名");
    }

    #[test]
    fn test_signed_pad_produces_record() {
        let raw = RawForm {
            name: "測試病人".to_string(),
            id_number: "a123456789".to_string(),
            ..Default::default()
        };
        let record = prepare_submission(raw, &signed_pad()).unwrap();

        assert_eq!(record.id_number, "A123456789");
        let signature = record.signature.expect("signature attached");
        assert!(signature.as_str().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_cleared_pad_rejected_again() {
        let mut pad = signed_pad();
        pad.clear();
        assert_eq!(
            prepare_submission(RawForm::default(), &pad),
            Err(SubmitError::SignatureMissing)
        );
    }

    #[test]
    fn test_format_error_propagates() {
        let raw = RawForm {
            fill_date: "not-a-date".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            prepare_submission(raw, &signed_pad()),
            Err(SubmitError::Format(_))
        ));
    }
}
