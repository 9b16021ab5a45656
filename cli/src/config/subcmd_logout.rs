use super::{ClapSubCommand, GlobalOpts};
use crate::{constants::DEFAULT_PAGE_URL, error::*, render::*};
use async_trait::async_trait;
use clap::{ArgMatches, Command};
use std::process::ExitCode;
use url::Url;

pub(super) struct Logout {}

#[async_trait]
impl ClapSubCommand for Logout {
  fn subcmd() -> Command {
    Command::new("logout").about("Clear the session cookie")
  }

  async fn exec_matches(_sub_m: &ArgMatches, global: &GlobalOpts) -> Result<ExitCode> {
    let page_url = DEFAULT_PAGE_URL.parse::<Url>()?;
    let gate = global.gate(page_url);
    gate.logout();
    print_gate(&gate);

    Ok(ExitCode::SUCCESS)
  }
}
