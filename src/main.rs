use chainserve::cli::{run_cli, Cli};
use chainserve::otel::{init_logging_with_config, LogConfig};
use chainserve::runtime_config::RuntimeConfig;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging_with_config(&LogConfig::from_env())?;
    RuntimeConfig::from_env().apply();
    run_cli(cli)
}
