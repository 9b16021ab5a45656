use crate::verdict::{DenialReason, GateState};
use std::fmt;
use url::Url;

const LOADING_TEXT: &str = "Checking authentication...";
const DENIAL_TITLE: &str = "Authentication required";
const DENIAL_DETAIL: &str = "Token missing or expired. Open this application with a valid token in the url.";
const RELOAD_LABEL: &str = "Reload page";

/// What the host shows for a gate state. Protected content only ever goes with `Protected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateView {
  /// Blocking loading indicator
  Loading,
  /// Non-dismissible denial surface
  Denied(DenialSurface),
  /// The protected application
  Protected,
}

/// Denial surface: reason plus a reload action, nothing to dismiss it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenialSurface {
  pub reason: DenialReason,
  /// Example of an entry url carrying a token
  pub expected_url: String,
}

impl DenialSurface {
  pub fn title(&self) -> &'static str {
    DENIAL_TITLE
  }
  pub fn detail(&self) -> &'static str {
    DENIAL_DETAIL
  }
  pub fn reload_label(&self) -> &'static str {
    RELOAD_LABEL
  }
}

impl GateView {
  /// View for `state` on the page at `page_url`, hinting at `token_param` as the entry parameter
  pub fn from_state(state: GateState, page_url: &Url, token_param: &str) -> Self {
    match state {
      GateState::Checking => GateView::Loading,
      GateState::Admitted => GateView::Protected,
      GateState::Denied(reason) => {
        let mut entry = page_url.clone();
        entry.set_query(None);
        entry.set_fragment(None);
        GateView::Denied(DenialSurface {
          reason,
          expected_url: format!("{entry}?{token_param}=<token>"),
        })
      }
    }
  }

  pub fn shows_protected_content(&self) -> bool {
    matches!(self, GateView::Protected)
  }
}

impl fmt::Display for GateView {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateView::Loading => f.write_str(LOADING_TEXT),
      GateView::Protected => f.write_str("Authenticated"),
      GateView::Denied(surface) => {
        writeln!(f, "{}", surface.title())?;
        writeln!(f, "  {}", surface.reason)?;
        writeln!(f, "  {}", surface.detail())?;
        writeln!(f, "  Expected format: {}", surface.expected_url)?;
        write!(f, "  [{}]", surface.reload_label())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn page() -> Url {
    "https://chat.example.com/prompts?lang=es#saved".parse().unwrap()
  }

  #[test]
  fn protected_content_only_when_admitted() {
    assert!(GateView::from_state(GateState::Admitted, &page(), "jwt").shows_protected_content());
    assert!(!GateView::from_state(GateState::Checking, &page(), "jwt").shows_protected_content());
    for reason in [
      DenialReason::UrlTokenExpired,
      DenialReason::SessionExpired,
      DenialReason::NoToken,
      DenialReason::LoggedOut,
    ] {
      assert!(!GateView::from_state(GateState::Denied(reason), &page(), "jwt").shows_protected_content());
    }
  }

  #[test]
  fn denial_surface_carries_reason_and_entry_hint() {
    let view = GateView::from_state(GateState::Denied(DenialReason::SessionExpired), &page(), "jwt");
    let GateView::Denied(surface) = &view else {
      panic!("denial surface expected");
    };
    assert_eq!(surface.reason, DenialReason::SessionExpired);
    assert_eq!(surface.expected_url, "https://chat.example.com/prompts?jwt=<token>");

    let rendered = view.to_string();
    assert!(rendered.starts_with("Authentication required"));
    assert!(rendered.contains("session expired, obtain a new token"));
    assert!(rendered.contains("[Reload page]"));
  }
}
