use anyhow::Context;
use clap::Parser;
use tracing::debug;

pub mod alb;
pub mod cli;
pub mod config;
pub mod logging;
pub mod outputs;
pub mod writer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.debug)?;

    let config_file = match &cli.config {
        Some(path) => Some(config::parse(path).context("Unable to load the config file")?),
        None => None,
    };
    let settings = config::Settings::resolve(cli.overrides(), config_file);
    debug!(
        stack = %settings.query.stack_name,
        region = %settings.query.region,
        "resolved settings"
    );

    let stack = outputs::Stack::new(&settings.query).await;
    let alb_info = alb::build_alb_info(&stack).await;
    if alb_info.is_empty() {
        debug!(stack = %stack.stack_name, "no ALB outputs to report");
    }

    writer::write(&alb_info, settings.format, cli.output.as_deref())?;

    return Ok(());
}
