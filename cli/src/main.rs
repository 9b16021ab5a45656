mod config;
mod constants;
mod error;
mod log;
mod render;

use crate::{constants::*, error::*, log::*};
use config::parse_opts;
use std::process::ExitCode;
use tokio::runtime::Builder;

fn main() -> Result<ExitCode> {
  init_logger();

  // the gate is driven from a single event loop
  let mut runtime_builder = Builder::new_current_thread();
  runtime_builder.enable_all();
  runtime_builder.thread_name(THREAD_NAME);
  let runtime = runtime_builder.build()?;

  let code = runtime.block_on(async {
    match parse_opts().await {
      Ok(code) => code,
      Err(e) => {
        error!("{e}");
        ExitCode::from(2)
      }
    }
  });

  Ok(code)
}
