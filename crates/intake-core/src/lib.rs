//! Intake form core logic
//!
//! Turns raw form fields into a [`CanonicalRecord`], checks that a signature
//! was drawn before anything is built, derives archive file names, and posts
//! finished records to the intake server.
//!
//! [`CanonicalRecord`]: intake_types::CanonicalRecord

pub mod archive;
pub mod delivery;
pub mod formatter;
pub mod roc_date;
pub mod submit;

pub use archive::{ArchiveName, ARCHIVE_FOLDER};
pub use delivery::{DeliveryError, IntakeClient};
pub use formatter::{build_record, FormatError, RawForm, RELATIONSHIP_DELIMITER};
pub use roc_date::{DateError, RocDate, EPOCH_YEAR};
pub use submit::{prepare_submission, SubmitError};
