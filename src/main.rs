use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use terraform_remote_env::ConfigError;
use terraform_remote_env::cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match cli::parse_args(std::env::args_os()) {
        Ok(config) => config,
        Err(ConfigError::Flags(err)) => cli::exit_with_usage(err),
        Err(err) => return Err(err.into()),
    };
    tracing::debug!(?config, "parsed configuration");

    let line = cli::run(&config)
        .await
        .wrap_err("error getting remote state")?;
    println!("{}", line);

    Ok(())
}
