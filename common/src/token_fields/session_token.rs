use super::{Field, TryNewField};
use crate::{claim::Claims, codec, error::CodecResult};
use anyhow::Result;
use serde::{
  de::{self, Visitor},
  Deserialize, Serialize,
};
use std::borrow::Cow;
use validator::Validate;

/// Bearer token held as the session record. Opaque apart from its claims segment.
#[derive(Clone, Eq, PartialEq, Validate)]
pub struct SessionToken {
  #[validate(length(min = 1))]
  value: String,
}
impl<'a, T> TryNewField<T> for SessionToken
where
  T: Into<Cow<'a, str>>,
{
  fn new(token_str: T) -> Result<Self> {
    let value = token_str.into().to_string();
    let object = Self { value };
    object.validate()?;
    Ok(object)
  }
}
impl Field for SessionToken {
  fn as_str(&self) -> &str {
    &self.value
  }
  fn into_string(self) -> String {
    self.value
  }
}
impl SessionToken {
  /// Claims of the token, signature unchecked
  pub fn claims(&self) -> CodecResult<Claims> {
    codec::decode(&self.value)
  }
  /// Fail-closed expiry check at `now` (unix time in secs)
  pub fn is_expired_at(&self, now: i64) -> bool {
    codec::is_expired_at(&self.value, now)
  }
}
// never print the credential itself
impl std::fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SessionToken")
      .field("len", &self.value.len())
      .finish_non_exhaustive()
  }
}
impl Serialize for SessionToken {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(self.as_str())
  }
}
impl<'de> Deserialize<'de> for SessionToken {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    struct SessionTokenVisitor;
    impl<'de> Visitor<'de> for SessionTokenVisitor {
      type Value = String;
      fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("session token string")
      }
      fn visit_str<E>(self, str: &str) -> Result<Self::Value, E>
      where
        E: de::Error,
      {
        Ok(str.to_owned())
      }
    }

    let value = deserializer.deserialize_str(SessionTokenVisitor)?;
    let object = Self { value };
    object.validate().map_err(de::Error::custom)?;

    Ok(object)
  }
}
