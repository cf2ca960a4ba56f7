use crate::backends::{self, RemoteClient};
use crate::config::ProgramConfig;
use crate::error::{RemoteEnvError, StateFetchError};

use super::state::{OutputMap, TerraformState};

/// Connects to the configured backend and returns the root module outputs.
pub async fn get_state(config: &ProgramConfig) -> Result<OutputMap, RemoteEnvError> {
    let client = backends::new_client(&config.backend, &config.backend_config)?;
    tracing::info!(
        backend = client.name(),
        options = ?config.backend_config.keys().collect::<Vec<_>>(),
        "remote state client ready"
    );

    Ok(fetch_outputs(client.as_ref()).await?)
}

/// Fetches the current state through `client`. A backend with no published
/// state yields an empty map.
pub async fn fetch_outputs(client: &dyn RemoteClient) -> Result<OutputMap, StateFetchError> {
    let Some(payload) = client.get().await? else {
        tracing::info!(backend = client.name(), "no remote state found");
        return Ok(OutputMap::new());
    };

    let state = TerraformState::from_json(&payload.data)?;
    tracing::debug!(
        version = state.version,
        serial = state.serial,
        lineage = state.lineage.as_deref().unwrap_or(""),
        bytes = payload.data.len(),
        "remote state decoded"
    );

    if state.is_empty() {
        return Ok(OutputMap::new());
    }

    let outputs = state.root_outputs();
    tracing::info!(count = outputs.len(), "root module outputs loaded");
    Ok(outputs)
}
