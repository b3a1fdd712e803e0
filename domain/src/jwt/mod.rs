//! Read-only inspection of a JWT-shaped access token.
//!
//! The home page shows what is inside the token the authorization server handed
//! out. Nothing here checks the signature: the relying party treats the token as
//! opaque and only decodes it for display.
//!
//! # Example
//!
//! ```rust
//! use domain::jwt::inspect;
//!
//! // {"alg":"none"} . {"sub":"42"} . (no signature)
//! let inspection = inspect("eyJhbGciOiJub25lIn0.eyJzdWIiOiI0MiJ9.");
//! assert_eq!(inspection.header.unwrap()["alg"], "none");
//! assert_eq!(inspection.payload.unwrap()["sub"], "42");
//! ```

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use log::*;
use serde_json::Value;

// JWTs use unpadded base64url, but some servers pad or use the standard alphabet.
const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Decoded header and payload of an access token. A part is `None` when the
/// segment is missing or is not base64-encoded JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenInspection {
    pub header: Option<Value>,
    pub payload: Option<Value>,
}

pub fn inspect(access_token: &str) -> TokenInspection {
    let mut segments = access_token.split('.');

    let inspection = TokenInspection {
        header: segments.next().and_then(decode_segment),
        payload: segments.next().and_then(decode_segment),
    };

    if inspection.header.is_none() || inspection.payload.is_none() {
        debug!("Access token is not a readable JWT");
    }
    inspection
}

fn decode_segment(segment: &str) -> Option<Value> {
    let bytes = URL_SAFE_LENIENT
        .decode(segment)
        .or_else(|_| STANDARD_LENIENT.decode(segment))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}
