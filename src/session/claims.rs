use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose},
    Engine,
};
use serde::Deserialize;

// base64url, with or without trailing `=`
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    general_purpose::NO_PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claims read from a credential WITHOUT checking its signature or expiry.
///
/// Only good for deciding what to render. Anyone can forge a payload that
/// decodes to these values; the server gates never accept this type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PeekedClaims {
    pub email: String,
    #[serde(default)]
    pub sub: Option<serde_json::Value>,
    #[serde(default)]
    pub exp: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum PeekError {
    #[error("Invalid token format: expected 3 segments, found {0}")]
    Segments(usize),
    #[error("Failed to decode token payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Failed to parse token claims: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Decodes the middle segment of `header.payload.signature`.
pub fn peek_unverified_claims(token: &str) -> Result<PeekedClaims, PeekError> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    let payload = match parts.as_slice() {
        [_, payload, _] => *payload,
        _ => return Err(PeekError::Segments(parts.len())),
    };

    let decoded = PAYLOAD_ENGINE.decode(payload)?;
    let claims: PeekedClaims = serde_json::from_slice(&decoded)?;

    Ok(claims)
}
