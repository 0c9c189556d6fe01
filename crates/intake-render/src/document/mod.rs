//! The intermediate intake document and its Typst rendition

pub mod builder;
pub mod lexicon;
pub mod markup;
pub mod model;

pub use builder::{build_document, SIGNATURE_ASSET};
pub use markup::to_markup;
pub use model::{Block, Cell, IntakeDocument, TableRow};
