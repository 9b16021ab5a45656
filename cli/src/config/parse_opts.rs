use super::{
  subcmd_check::Check, subcmd_inspect::Inspect, subcmd_logout::Logout, subcmd_watch::Watch, ClapSubCommand,
  GlobalOpts,
};
use crate::{
  constants::{COOKIE_JAR_PATH, DEFAULT_RETENTION_DAYS, MAX_RETENTION_DAYS},
  error::*,
};
use clap::{command, value_parser, Arg};
use libgate::GateConfig;
use std::{path::PathBuf, process::ExitCode};

pub async fn parse_opts() -> Result<ExitCode> {
  let _ = include_str!("../../Cargo.toml");

  let options = command!()
    .arg(
      Arg::new("cookie_jar")
        .short('j')
        .long("cookie-jar")
        .value_name("PATH")
        .default_value(COOKIE_JAR_PATH)
        .global(true)
        .help("Cookie jar file holding the session cookie"),
    )
    .arg(
      Arg::new("retention_days")
        .short('r')
        .long("retention-days")
        .value_name("DAYS")
        .value_parser(value_parser!(i64).range(1..=MAX_RETENTION_DAYS))
        .default_value(DEFAULT_RETENTION_DAYS)
        .global(true)
        .help("Days the session cookie is retained once a url token is admitted"),
    )
    .subcommand(Check::subcmd())
    .subcommand(Watch::subcmd())
    .subcommand(Logout::subcmd())
    .subcommand(Inspect::subcmd())
    .subcommand_required(true);

  let matches = options.get_matches();

  let Some(cookie_jar) = matches.get_one::<String>("cookie_jar") else {
    bail!("Cookie jar path must be specified");
  };
  let Some(retention_days) = matches.get_one::<i64>("retention_days") else {
    bail!("Retention days must be specified");
  };
  let global = GlobalOpts {
    cookie_jar: PathBuf::from(cookie_jar),
    gate_config: GateConfig {
      retention_days: *retention_days,
      ..Default::default()
    },
  };

  match matches.subcommand() {
    Some(("check", sub_m)) => Check::exec_matches(sub_m, &global).await,
    Some(("watch", sub_m)) => Watch::exec_matches(sub_m, &global).await,
    Some(("logout", sub_m)) => Logout::exec_matches(sub_m, &global).await,
    Some(("inspect", sub_m)) => Inspect::exec_matches(sub_m, &global).await,
    _ => {
      bail!("none");
    }
  }
}
