use super::{verify_url, ClapSubCommand, GlobalOpts};
use crate::{error::*, log::*, render::*};
use async_trait::async_trait;
use clap::{value_parser, Arg, ArgMatches, Command};
use libgate::{GateConfig, GateState, RECHECK_INTERVAL_SEC};
use std::{process::ExitCode, time::Duration};
use url::Url;

pub(super) struct Watch {}

#[async_trait]
impl ClapSubCommand for Watch {
  fn subcmd() -> Command {
    Command::new("watch")
      .about("Admit the page url, then keep re-checking the session until it is denied or interrupted")
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
        Arg::new("interval_secs")
          .short('i')
          .long("interval-secs")
          .value_name("SECS")
          .value_parser(value_parser!(u64).range(1..))
          .help("Period of the expiry check in seconds [default: 60]"),
      )
  }

  async fn exec_matches(sub_m: &ArgMatches, global: &GlobalOpts) -> Result<ExitCode> {
    let Some(page_url) = sub_m.get_one::<Url>("url") else {
      bail!("Page url must be specified");
    };
    let interval_secs = sub_m
      .get_one::<u64>("interval_secs")
      .copied()
      .unwrap_or(RECHECK_INTERVAL_SEC);
    let gate_config = GateConfig {
      recheck_interval: Duration::from_secs(interval_secs),
      ..global.gate_config.clone()
    };

    let gate = global.gate_with(gate_config, page_url.clone());
    gate.start();
    print_gate(&gate);

    let mut state_rx = gate.subscribe();
    while !matches!(gate.state(), GateState::Denied(_)) {
      tokio::select! {
        _ = tokio::signal::ctrl_c() => {
          info!("Interrupted");
          break;
        }
        changed = state_rx.changed() => {
          if changed.is_err() {
            break;
          }
          print_gate(&gate);
        }
      }
    }
    gate.stop();

    Ok(exit_code(gate.state()))
  }
}
