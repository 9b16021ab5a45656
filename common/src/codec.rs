use crate::{
  claim::Claims,
  constants::{CLAIMS_SEGMENT_INDEX, TOKEN_SEGMENTS},
  error::{CodecError, CodecResult},
};
use base64::{
  alphabet,
  engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
  Engine as _,
};
use chrono::Utc;
use tracing::debug;

/// Standard alphabet, padding optional. The url-safe characters are mapped onto it before decoding.
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
  &alphabet::STANDARD,
  GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the claims segment of a compact token.
/// The signature is NOT verified. The result is only good for advisory checks like freshness.
pub fn decode(token: &str) -> CodecResult<Claims> {
  let segments: Vec<&str> = token.split('.').collect();
  if segments.len() != TOKEN_SEGMENTS {
    return Err(CodecError::SegmentCount {
      expected: TOKEN_SEGMENTS,
      found: segments.len(),
    });
  }

  let claims_b64 = segments[CLAIMS_SEGMENT_INDEX].replace('-', "+").replace('_', "/");
  let decoded = CLAIMS_ENGINE.decode(claims_b64)?;
  let claims = serde_json::from_slice::<Claims>(&decoded)?;

  Ok(claims)
}

/// Whether the token is expired at `now` (unix time in secs).
/// Fails closed: undecodable tokens and tokens without exp are expired, and so is `exp == now`.
pub fn is_expired_at(token: &str, now: i64) -> bool {
  match decode(token) {
    Ok(claims) => match claims.exp {
      Some(exp) => exp <= now,
      None => {
        debug!("No exp in token claims, regarded as expired");
        true
      }
    },
    Err(e) => {
      debug!("Invalid token, regarded as expired: {e}");
      true
    }
  }
}

/// Whether the token is expired against the current wall clock
pub fn is_expired(token: &str) -> bool {
  is_expired_at(token, Utc::now().timestamp())
}
