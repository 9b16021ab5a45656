use super::{verify_url, ClapSubCommand, GlobalOpts};
use crate::{error::*, render::*};
use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::process::ExitCode;
use url::Url;

pub(super) struct Check {}

#[async_trait]
impl ClapSubCommand for Check {
  fn subcmd() -> Command {
    Command::new("check")
      .about("Run the admission check once, as on page load")
      .arg(
        Arg::new("url")
          .short('u')
          .long("url")
          .required(true)
          .value_parser(verify_url)
          .value_name("URL")
          .help("Page url, possibly carrying \"?jwt=<token>\" or \"?token=<token>\""),
      )
      .arg(
        Arg::new("json")
          .long("json")
          .action(ArgAction::SetTrue)
          .help("Print the verdict as JSON"),
      )
  }

  async fn exec_matches(sub_m: &ArgMatches, global: &GlobalOpts) -> Result<ExitCode> {
    let Some(page_url) = sub_m.get_one::<Url>("url") else {
      bail!("Page url must be specified");
    };

    let gate = global.gate(page_url.clone());
    let state = gate.check_auth();

    if sub_m.get_flag("json") {
      println!("{}", serde_json::to_string(&gate.verdict())?);
    } else {
      print_gate(&gate);
    }

    Ok(exit_code(state))
  }
}
