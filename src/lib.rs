//! terraform-remote-env
//!
//! Reads a Terraform remote state and exports its root module outputs as
//! `TF_VAR_` environment variable assignments.

pub mod backends;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod terraform;

pub use backends::{AtlasClient, HttpClient, LocalClient, Payload, RemoteClient, new_client};
pub use config::{BackendConfig, ProgramConfig};
pub use error::{ConfigError, RemoteEnvError, StateFetchError};
pub use output::output_state;
pub use terraform::{OutputMap, OutputValue, TerraformState, fetch_outputs, get_state};
