use std::sync::{Arc, RwLock};
use url::Url;

/// Navigation location of the hosting page
pub trait Location: Send + Sync {
  /// Currently visible url
  fn href(&self) -> Url;
  /// Swap the visible url in place. No navigation, no new history entry.
  fn replace_state(&self, url: Url);
}

impl<T> Location for Arc<T>
where
  T: Location + ?Sized,
{
  fn href(&self) -> Url {
    (**self).href()
  }
  fn replace_state(&self, url: Url) {
    (**self).replace_state(url)
  }
}

/// Token candidate carried in the query, looked up by parameter name in the given order.
/// First occurrence of a name wins and empty values are skipped.
pub fn extract_url_token<S: AsRef<str>>(url: &Url, params: &[S]) -> Option<String> {
  params.iter().find_map(|name| {
    url
      .query_pairs()
      .find(|(k, _)| k == name.as_ref())
      .map(|(_, v)| v.into_owned())
      .filter(|v| !v.is_empty())
  })
}

/// Url with every occurrence of the given query parameters removed.
/// The query is dropped altogether once nothing remains.
pub fn scrub_url<S: AsRef<str>>(url: &Url, params: &[S]) -> Url {
  let kept = url
    .query_pairs()
    .filter(|(k, _)| !params.iter().any(|p| k == p.as_ref()))
    .map(|(k, v)| (k.into_owned(), v.into_owned()))
    .collect::<Vec<_>>();

  let mut scrubbed = url.clone();
  if kept.is_empty() {
    scrubbed.set_query(None);
  } else {
    scrubbed.query_pairs_mut().clear().extend_pairs(kept);
  }
  scrubbed
}

/* ---------------------------------------------------- */
/// Location held in memory, for hosts without a real address bar
#[derive(Debug)]
pub struct MemoryLocation {
  current: RwLock<Url>,
}

impl MemoryLocation {
  pub fn new(url: Url) -> Self {
    Self {
      current: RwLock::new(url),
    }
  }
}

impl Location for MemoryLocation {
  fn href(&self) -> Url {
    match self.current.read() {
      Ok(lock) => lock.clone(),
      Err(poisoned) => poisoned.into_inner().clone(),
    }
  }
  fn replace_state(&self, url: Url) {
    match self.current.write() {
      Ok(mut lock) => *lock = url,
      Err(poisoned) => *poisoned.into_inner() = url,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::URL_TOKEN_PARAMS;

  fn url(s: &str) -> Url {
    s.parse().unwrap()
  }

  #[test]
  fn jwt_takes_precedence_over_token() {
    let u = url("https://chat.example.com/?token=second&jwt=first");
    assert_eq!(extract_url_token(&u, &URL_TOKEN_PARAMS), Some("first".to_string()));

    let u = url("https://chat.example.com/?token=only");
    assert_eq!(extract_url_token(&u, &URL_TOKEN_PARAMS), Some("only".to_string()));

    let u = url("https://chat.example.com/?jwt=&token=fallback");
    assert_eq!(extract_url_token(&u, &URL_TOKEN_PARAMS), Some("fallback".to_string()));

    let u = url("https://chat.example.com/?jwt=a&jwt=b");
    assert_eq!(extract_url_token(&u, &URL_TOKEN_PARAMS), Some("a".to_string()));
  }

  #[test]
  fn no_candidate() {
    assert!(extract_url_token(&url("https://chat.example.com/"), &URL_TOKEN_PARAMS).is_none());
    assert!(extract_url_token(&url("https://chat.example.com/?jwts=x&tok=y"), &URL_TOKEN_PARAMS).is_none());
    assert!(extract_url_token(&url("https://chat.example.com/?jwt="), &URL_TOKEN_PARAMS).is_none());
  }

  #[test]
  fn scrub_removes_both_aliases_only() {
    let u = url("https://chat.example.com/prompts?jwt=a.b.c&lang=es&token=d.e.f#top");
    assert_eq!(
      scrub_url(&u, &URL_TOKEN_PARAMS).as_str(),
      "https://chat.example.com/prompts?lang=es#top"
    );

    let u = url("https://chat.example.com/?jwt=a.b.c");
    assert_eq!(scrub_url(&u, &URL_TOKEN_PARAMS).as_str(), "https://chat.example.com/");
  }

  #[test]
  fn memory_location_replaces_in_place() {
    let loc = MemoryLocation::new(url("https://chat.example.com/?jwt=a.b.c"));
    loc.replace_state(url("https://chat.example.com/"));
    assert_eq!(loc.href().as_str(), "https://chat.example.com/");
  }
}
