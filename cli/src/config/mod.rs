mod parse_opts;
mod subcmd_check;
mod subcmd_inspect;
mod subcmd_logout;
mod subcmd_watch;

use crate::error::*;
use async_trait::async_trait;
use libgate::{FileCookieJar, GateConfig, MemoryLocation, SessionGate, SessionStore, SystemClock};
pub use parse_opts::parse_opts;
use std::{path::PathBuf, process::ExitCode};
use url::Url;

type FileGate = SessionGate<FileCookieJar, MemoryLocation, SystemClock>;

/// Options shared by every subcommand
pub(crate) struct GlobalOpts {
  pub cookie_jar: PathBuf,
  pub gate_config: GateConfig,
}

impl GlobalOpts {
  fn gate(&self, page_url: Url) -> FileGate {
    self.gate_with(self.gate_config.clone(), page_url)
  }

  fn gate_with(&self, gate_config: GateConfig, page_url: Url) -> FileGate {
    SessionGate::new(
      gate_config,
      FileCookieJar::new(&self.cookie_jar),
      MemoryLocation::new(page_url),
      SystemClock,
    )
  }

  fn store(&self) -> SessionStore<FileCookieJar, SystemClock> {
    SessionStore::new(&self.gate_config, FileCookieJar::new(&self.cookie_jar), SystemClock)
  }
}

#[async_trait]
trait ClapSubCommand {
  fn subcmd() -> clap::Command;

  async fn exec_matches(sub_m: &clap::ArgMatches, global: &GlobalOpts) -> Result<ExitCode>;
}

pub(crate) fn verify_url(arg_val: &str) -> Result<Url, String> {
  let url = match Url::parse(arg_val) {
    Ok(addr) => addr,
    Err(_) => return Err(format!("Could not parse \"{}\" as a valid url.", arg_val)),
  };
  if url.scheme() != "http" && url.scheme() != "https" {
    return Err("Invalid scheme".to_string());
  }
  if url.cannot_be_a_base() {
    return Err("Invalid scheme".to_string());
  }
  Ok(url)
}
