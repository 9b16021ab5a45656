mod claim;
mod codec;
mod constants;
mod error;

pub mod token_fields;

pub use claim::Claims;
pub use codec::{decode, is_expired, is_expired_at};
pub use constants::{CLAIMS_SEGMENT_INDEX, TOKEN_SEGMENTS};
pub use error::{CodecError, CodecResult};
