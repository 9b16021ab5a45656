use libgate::{Clock, CookieJar, GateState, GateView, Location, SessionGate};
use std::process::ExitCode;

/// Print what the host would show for the current gate state
pub(crate) fn print_gate<J, L, C>(gate: &SessionGate<J, L, C>)
where
  J: CookieJar + 'static,
  L: Location + 'static,
  C: Clock + 'static,
{
  let href = gate.location().href();
  let view = GateView::from_state(gate.state(), &href, gate.config().primary_token_param());
  println!("{view}");
  if !view.shows_protected_content() {
    return;
  }

  println!("  Visible url: {href}");
  if let Some(subject) = gate.claims().and_then(|c| c.subject().map(str::to_string)) {
    println!("  Subject: {subject}");
  }
  if let Some(secs) = gate.remaining_seconds() {
    println!("  Session expires in {}", human_duration(secs));
  }
}

/// 0 only when admitted
pub(crate) fn exit_code(state: GateState) -> ExitCode {
  ExitCode::from(exit_status(state))
}

fn exit_status(state: GateState) -> u8 {
  match state {
    GateState::Admitted => 0,
    _ => 1,
  }
}

fn human_duration(secs: i64) -> String {
  let secs = secs.max(0);
  let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
  match (h, m) {
    (0, 0) => format!("{s}s"),
    (0, _) => format!("{m}m {s}s"),
    _ => format!("{h}h {m}m {s}s"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn durations() {
    assert_eq!(human_duration(-5), "0s");
    assert_eq!(human_duration(59), "59s");
    assert_eq!(human_duration(61), "1m 1s");
    assert_eq!(human_duration(3600 * 30 + 5), "30h 0m 5s");
  }

  #[test]
  fn only_admission_succeeds() {
    assert_eq!(exit_status(GateState::Admitted), 0);
    assert_eq!(exit_status(GateState::Checking), 1);
    assert_eq!(exit_status(GateState::Denied(libgate::DenialReason::NoToken)), 1);
  }
}
