//! Signature image carried as a self-describing data URI

use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PNG_MEDIA_TYPE: &str = "image/png";

/// A PNG signature encoded as `data:image/png;base64,<payload>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureImage(String);

/// Raw image bytes recovered from a data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SignatureDecodeError {
    #[error("Signature payload is empty")]
    Empty,

    #[error("Invalid base64 payload: {0}")]
    Base64(String),
}

impl SignatureImage {
    /// Wrap PNG bytes in a data URI
    pub fn from_png(bytes: &[u8]) -> Self {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self(format!("data:{};base64,{}", PNG_MEDIA_TYPE, payload))
    }

    /// Accept an already-encoded data URI as received on the wire
    pub fn from_data_uri(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Strip the `data:image/<type>;base64,` prefix and decode the payload.
    ///
    /// A string without the prefix is decoded as a bare base64 payload and
    /// assumed to be PNG.
    pub fn decode(&self) -> Result<DecodedImage, SignatureDecodeError> {
        let (media_type, payload) = match split_image_prefix(&self.0) {
            Some((media_type, payload)) => (media_type.to_string(), payload),
            None => (PNG_MEDIA_TYPE.to_string(), self.0.as_str()),
        };

        let payload = payload.trim();
        if payload.is_empty() {
            return Err(SignatureDecodeError::Empty);
        }

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| SignatureDecodeError::Base64(e.to_string()))?;

        Ok(DecodedImage { media_type, bytes })
    }
}

/// Split `data:image/<word>;base64,<rest>` into (`image/<word>`, `rest`)
fn split_image_prefix(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let (media_type, payload) = rest.split_once(";base64,")?;
    let subtype = media_type.strip_prefix("image/")?;
    let is_word = !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_word.then_some((media_type, payload))
}
