//! Terraform state document decoding.
//!
//! Understands the legacy module-list layout (versions 1 to 3) and the
//! current layout (version 4) and extracts the root module outputs from
//! either.
use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::error::StateFetchError;

pub const MAX_SUPPORTED_VERSION: u32 = 4;

const ROOT_MODULE_PATH: &[&str] = &["root"];

/// Root module outputs, keyed by output name.
pub type OutputMap = BTreeMap<String, OutputValue>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TerraformState {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub serial: u64,
    #[serde(default)]
    pub lineage: Option<String>,
    #[serde(default)]
    pub modules: Vec<ModuleState>,
    #[serde(default)]
    outputs: BTreeMap<String, RawOutput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleState {
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    outputs: BTreeMap<String, RawOutput>,
}

// NOTE: v1 stores bare values, v2+ wraps them with type/sensitivity metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawOutput {
    Typed {
        value: serde_json::Value,
        #[serde(default)]
        sensitive: bool,
    },
    Bare(serde_json::Value),
}

impl From<&RawOutput> for OutputValue {
    fn from(raw: &RawOutput) -> Self {
        match raw {
            RawOutput::Typed { value, sensitive } => OutputValue {
                value: value.clone(),
                sensitive: *sensitive,
            },
            RawOutput::Bare(value) => OutputValue {
                value: value.clone(),
                sensitive: false,
            },
        }
    }
}

impl TerraformState {
    pub fn from_json(data: &[u8]) -> Result<Self, StateFetchError> {
        let state: TerraformState = serde_json::from_slice(data)?;
        if state.version > MAX_SUPPORTED_VERSION {
            return Err(StateFetchError::UnsupportedVersion(state.version));
        }
        Ok(state)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.outputs.is_empty()
    }

    pub fn root_outputs(&self) -> OutputMap {
        let raw = if self.version >= 4 {
            Some(&self.outputs)
        } else {
            self.modules
                .iter()
                .find(|module| module.path == ROOT_MODULE_PATH)
                .map(|module| &module.outputs)
        };

        raw.map(|outputs| {
            outputs
                .iter()
                .map(|(name, output)| (name.clone(), OutputValue::from(output)))
                .collect()
        })
        .unwrap_or_default()
    }
}

/// A single output value as stored in the state.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputValue {
    pub value: serde_json::Value,
    pub sensitive: bool,
}

impl OutputValue {
    pub fn new(value: serde_json::Value) -> Self {
        Self {
            value,
            sensitive: false,
        }
    }
}

impl From<&str> for OutputValue {
    fn from(value: &str) -> Self {
        Self::new(serde_json::Value::String(value.to_string()))
    }
}

impl From<serde_json::Value> for OutputValue {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value)
    }
}

/// Strings are written verbatim, `null` as nothing, everything else in the
/// state's own JSON encoding.
impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            serde_json::Value::String(s) => f.write_str(s),
            serde_json::Value::Null => Ok(()),
            other => write!(f, "{}", other),
        }
    }
}
