//! Tracing setup. Everything goes to stderr so stdout only ever carries the document.
//!
//!   get-alb-info --debug ...               # debug level
//!   RUST_LOG=get_alb_info=trace get-alb-info  # fine-grained control, wins over --debug

use std::io::IsTerminal;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
