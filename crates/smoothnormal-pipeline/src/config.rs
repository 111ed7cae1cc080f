//! Bake configuration.
//!
//! Loaded from TOML. Every field has a default matching the stock
//! setup: bake models whose root name contains `_SN` into vertex color
//! RGB using the parallel engine, falling back to the CPU engine on
//! device errors.

use std::path::Path;

use serde::{Deserialize, Serialize};
use smoothnormal_engine::config::BackendKind;
use smoothnormal_engine::{EngineConfig, EngineKind};
use smoothnormal_io::OutputEncoding;
use smoothnormal_types::constants::{DEFAULT_FILE_PATH, DEFAULT_NAME_SUFFIX};
use smoothnormal_types::{SmoothNormalError, SmoothNormalResult};

/// How an imported model is matched for baking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMethod {
    /// Root object name contains [`BakeConfig::name_suffix`].
    #[default]
    NameSuffix,
    /// Asset path contains [`BakeConfig::file_path`].
    FilePath,
}

/// Configuration for one bake pipeline.
///
/// Passed explicitly to the [`Baker`](crate::Baker); there is no global
/// instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Matching rule.
    pub matching: MatchingMethod,

    /// Substring looked for in the root object name.
    pub name_suffix: String,

    /// Substring looked for in the asset path.
    pub file_path: String,

    /// Vertex channels the smooth normals are written into.
    pub write_target: OutputEncoding,

    /// Preferred engine.
    pub engine: EngineKind,

    /// Compute backend of the parallel engine.
    pub backend: BackendKind,

    /// Worker threads for the thread-pool backend. `None` uses all cores.
    pub threads: Option<usize>,

    /// Retry a mesh on the CPU engine when the parallel engine hits a device error.
    pub fallback_to_cpu: bool,

    /// Device buffer budget in bytes for the parallel engine. `None` means unlimited.
    pub max_buffer_bytes: Option<usize>,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            matching: MatchingMethod::NameSuffix,
            name_suffix: DEFAULT_NAME_SUFFIX.to_string(),
            file_path: DEFAULT_FILE_PATH.to_string(),
            write_target: OutputEncoding::VertexColorRgb,
            engine: EngineKind::Gpu,
            backend: BackendKind::ThreadPool,
            threads: None,
            fallback_to_cpu: true,
            max_buffer_bytes: None,
        }
    }
}

impl BakeConfig {
    /// Parses a config from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> SmoothNormalResult<Self> {
        toml::from_str(text).map_err(|e| SmoothNormalError::Serialization(e.to_string()))
    }

    /// Loads and validates a `.toml` config file.
    pub fn load(path: &Path) -> SmoothNormalResult<Self> {
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(SmoothNormalError::InvalidConfig(format!(
                "unsupported config format '{}', expected .toml",
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config as TOML.
    pub fn to_toml_string(&self) -> SmoothNormalResult<String> {
        toml::to_string_pretty(self).map_err(|e| SmoothNormalError::Serialization(e.to_string()))
    }

    /// Resolves the effective config: the user override when it exists,
    /// otherwise `default`.
    ///
    /// A missing override file is not an error; it is logged and the
    /// default is used. An override that exists but does not parse or
    /// validate is an error.
    pub fn resolve(default: BakeConfig, user_override: Option<&Path>) -> SmoothNormalResult<Self> {
        let Some(path) = user_override else {
            default.validate()?;
            return Ok(default);
        };
        if !path.exists() {
            tracing::warn!(path = %path.display(), "user config not found, using default");
            default.validate()?;
            return Ok(default);
        }
        let config = Self::load(path)?;
        tracing::debug!(path = %path.display(), "loaded user config");
        Ok(config)
    }

    /// Validates config values.
    pub fn validate(&self) -> SmoothNormalResult<()> {
        match self.matching {
            MatchingMethod::NameSuffix if self.name_suffix.is_empty() => {
                return Err(SmoothNormalError::InvalidConfig(
                    "name_suffix must not be empty when matching by name".into(),
                ));
            }
            MatchingMethod::FilePath if self.file_path.is_empty() => {
                return Err(SmoothNormalError::InvalidConfig(
                    "file_path must not be empty when matching by path".into(),
                ));
            }
            _ => {}
        }
        if self.threads == Some(0) {
            return Err(SmoothNormalError::InvalidConfig(
                "threads must be >= 1".into(),
            ));
        }
        if self.max_buffer_bytes == Some(0) {
            return Err(SmoothNormalError::InvalidConfig(
                "max_buffer_bytes must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Returns true if a model with this root name and asset path should be baked.
    pub fn matches(&self, root_name: &str, asset_path: &str) -> bool {
        match self.matching {
            MatchingMethod::NameSuffix => root_name.contains(&self.name_suffix),
            MatchingMethod::FilePath => asset_path.contains(&self.file_path),
        }
    }

    /// Engine configuration for the preferred engine.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            kind: self.engine,
            backend: self.backend,
            threads: self.threads,
            max_buffer_bytes: self.max_buffer_bytes,
        }
    }
}
