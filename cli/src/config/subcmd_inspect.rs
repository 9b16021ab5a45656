use super::{ClapSubCommand, GlobalOpts};
use crate::error::*;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clap::{Arg, ArgMatches, Command};
use libgate::token::{decode, is_expired_at, token_fields::Field};
use std::process::ExitCode;

pub(super) struct Inspect {}

#[async_trait]
impl ClapSubCommand for Inspect {
  fn subcmd() -> Command {
    Command::new("inspect")
      .about("Show the claims of a token. The signature is NOT verified")
      .arg(
        Arg::new("token")
          .short('t')
          .long("token")
          .value_name("TOKEN")
          .help("Token to inspect. The stored session token if not specified"),
      )
  }

  async fn exec_matches(sub_m: &ArgMatches, global: &GlobalOpts) -> Result<ExitCode> {
    let token = match sub_m.get_one::<String>("token") {
      Some(t) => t.to_owned(),
      None => match global.store().get() {
        Some(stored) => stored.into_string(),
        None => bail!("No session token in {}", global.cookie_jar.display()),
      },
    };

    let claims = decode(&token).map_err(|e| anyhow!("Failed to decode token: {e}"))?;
    println!("{}", serde_json::to_string_pretty(&claims)?);

    let now = Utc::now().timestamp();
    let expired = is_expired_at(&token, now);
    match claims.exp.and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0)) {
      Some(exp) => println!("Expires at {} ({})", exp.to_rfc3339(), if expired { "expired" } else { "valid" }),
      None => println!("No usable exp claim, regarded as expired"),
    }

    Ok(ExitCode::from(if expired { 1 } else { 0 }))
  }
}
