use crate::error::{CodecError, CodecResult};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Claim set carried in the middle segment of a token.
/// Only `exp` is interpreted here, everything else is kept as is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Claims {
  /// Expiration as unix time in secs
  #[serde(
    default,
    deserialize_with = "deserialize_numeric_date",
    skip_serializing_if = "Option::is_none"
  )]
  pub exp: Option<i64>,
  #[serde(flatten)]
  pub custom: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
  /// Expiration as unix time in secs, fails if the token carries no exp
  pub fn expires_at(&self) -> CodecResult<i64> {
    self.exp.ok_or(CodecError::NoExpiration)
  }

  /// `sub` claim if it is given as a string
  pub fn subject(&self) -> Option<&str> {
    self.custom.get("sub").and_then(|v| v.as_str())
  }

  /// `iat` claim if it is given as a number
  pub fn issued_at(&self) -> Option<i64> {
    self.custom.get("iat").and_then(numeric_date)
  }
}

/// NumericDate may be given as an integer or a float. Fractions are truncated.
fn numeric_date(value: &serde_json::Value) -> Option<i64> {
  match value {
    serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
    _ => None,
  }
}

fn deserialize_numeric_date<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<serde_json::Value>::deserialize(deserializer)?;
  match value {
    None | Some(serde_json::Value::Null) => Ok(None),
    Some(v) => numeric_date(&v)
      .map(Some)
      .ok_or_else(|| de::Error::custom("exp must be a number")),
  }
}
