mod session_token;

pub use session_token::SessionToken;

pub trait Field
where
  Self: std::marker::Sized,
{
  fn as_str(&self) -> &str;
  fn into_string(self) -> String;
}

pub trait TryNewField<T>
where
  Self: std::marker::Sized,
{
  fn new(input: T) -> Result<Self, anyhow::Error>;
}
