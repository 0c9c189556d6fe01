//! Data contract shared by the intake form, the renderer and the server.
//!
//! The canonical record is what crosses every boundary: the browser posts
//! it as JSON, the renderer lays it out, and the archive stores it verbatim.

pub mod flags;
pub mod lenient;
pub mod record;
pub mod signature;

pub use flags::{Channel, Condition, FamilyHistory, FlagGroup, FlagSpec, SourceChannels};
pub use record::{CanonicalRecord, Gender};
pub use signature::{DecodedImage, SignatureDecodeError, SignatureImage};
