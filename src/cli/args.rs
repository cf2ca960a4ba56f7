use std::ffi::OsString;

use clap::Parser;

use crate::config::{BackendConfig, DEFAULT_BACKEND, ProgramConfig};
use crate::error::ConfigError;

/// Export Terraform remote state outputs as TF_VAR_ environment variables.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The remote config backend to use
    #[arg(
        long,
        env = "TF_REMOTE_ENV_BACKEND",
        default_value = DEFAULT_BACKEND,
        allow_hyphen_values = true
    )]
    pub backend: String,

    /// The prefix to add to output variables
    #[arg(
        long,
        env = "TF_REMOTE_ENV_PREFIX",
        default_value = "",
        allow_hyphen_values = true
    )]
    pub prefix: String,

    /// Backend config parameters, in k=v format
    #[arg(
        long = "backend-config",
        value_name = "KEY=VALUE",
        value_parser = parse_key_val,
        allow_hyphen_values = true
    )]
    pub backend_config: Vec<(String, String)>,
}

impl From<Cli> for ProgramConfig {
    fn from(cli: Cli) -> Self {
        ProgramConfig::new(cli.backend)
            .with_prefix(cli.prefix)
            .with_backend_config(cli.backend_config.into_iter().collect::<BackendConfig>())
    }
}

/// Splits `key=value` on the first `=`; the value may itself contain `=`.
pub fn parse_key_val(raw: &str) -> Result<(String, String), ConfigError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::MalformedPair(raw.to_string()))?;
    if key.is_empty() {
        return Err(ConfigError::EmptyKey(raw.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Long flags that consume the following argument when written without `=`.
const VALUE_FLAGS: &[&str] = &["backend", "prefix", "backend-config"];

/// Rewrites Go-style single-dash long flags (`-backend=s3`) to the
/// double-dash form clap expects. Short flags (`-h`), the value following a
/// value-taking flag, and everything after a bare `--` pass through
/// unchanged. The first argument is the program name.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    let mut value_pending = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(idx, arg)| {
            if idx == 0 || passthrough {
                return arg;
            }
            if std::mem::take(&mut value_pending) {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };
            let flag = rest.strip_prefix('-').unwrap_or(rest);
            value_pending = !flag.contains('=') && VALUE_FLAGS.contains(&flag);
            if !rest.starts_with('-') && flag_name(rest).len() > 1 {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}

fn flag_name(flag: &str) -> &str {
    flag.split_once('=').map_or(flag, |(name, _)| name)
}
