mod args;

pub use args::{Cli, normalize_args, parse_key_val};

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::config::ProgramConfig;
use crate::error::{ConfigError, RemoteEnvError};
use crate::output::output_state;
use crate::terraform::get_state;

/// Parses the full argument list, program name first.
pub fn parse_args<I, T>(args: I) -> Result<ProgramConfig, ConfigError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let cli = Cli::try_parse_from(normalize_args(args))?;
    Ok(cli.into())
}

/// Renders a flag error for stderr. Invalid values get the usage line that
/// clap only prints for unknown arguments.
pub fn render_flag_error(err: &clap::Error) -> String {
    let mut rendered = err.render().to_string();
    if err.kind() == ErrorKind::ValueValidation {
        rendered.push_str(&format!("\n{}\n", Cli::command().render_usage()));
    }
    rendered
}

/// Reports a flag error and exits with clap's exit code. Help and version
/// requests print to stdout and exit successfully.
pub fn exit_with_usage(err: clap::Error) -> ! {
    if !err.use_stderr() {
        err.exit();
    }
    eprint!("{}", render_flag_error(&err));
    std::process::exit(err.exit_code());
}

/// Fetches the state described by `config` and renders the output line.
pub async fn run(config: &ProgramConfig) -> Result<String, RemoteEnvError> {
    let outputs = get_state(config).await?;
    Ok(output_state(config, &outputs))
}
