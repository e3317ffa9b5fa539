//! Configuration management for the embed CLI.
//!
//! Configuration is stored in ~/.embedport/config.yaml and holds named
//! provider contexts, similar to kubectl's context management.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use embedport::{DashScope, EmbedConfig, EmbeddingModel, OpenAI};
use serde::{Deserialize, Serialize};

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".embedport";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Name of the currently active context.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_context: String,

    /// Map of context name to context configuration.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub contexts: BTreeMap<String, Context>,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

/// Embedding provider kinds the CLI can construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAI,
    DashScope,
}

/// A single provider context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub provider: ProviderKind,

    /// API key. A value starting with `$` is read from that environment variable.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub dimension: usize,

    /// API base URL (optional, uses the provider default if empty).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_url: String,

    /// Request timeout in seconds (optional).
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub timeout: u64,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

fn is_zero_u64(n: &u64) -> bool {
    *n == 0
}

impl Config {
    /// Gets the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR).join(DEFAULT_CONFIG_FILE))
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Saves the configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Sets the current context.
    pub fn use_context(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.contexts.contains_key(name) {
            anyhow::bail!("context '{}' not found", name);
        }
        self.current_context = name.to_string();
        self.save()
    }

    /// Resolves the context by name, or current context if name is empty.
    pub fn resolve_context(&self, name: Option<&str>) -> Option<&Context> {
        match name {
            Some(n) if !n.is_empty() => self.contexts.get(n),
            _ if self.current_context.is_empty() => None,
            _ => self.contexts.get(&self.current_context),
        }
    }

    /// Lists all context names.
    pub fn list_contexts(&self) -> Vec<&str> {
        self.contexts.keys().map(String::as_str).collect()
    }
}

impl Context {
    /// Resolves the API key, expanding `$VAR` from the environment.
    pub fn resolved_api_key(&self) -> String {
        expand_env(&self.api_key)
    }

    fn embed_config(&self) -> EmbedConfig {
        EmbedConfig::default()
            .with_model(&self.model)
            .with_dimension(self.dimension)
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout))
    }

    /// Builds the provider described by this context.
    pub fn build(&self) -> anyhow::Result<Arc<dyn EmbeddingModel>> {
        let api_key = self.resolved_api_key();
        if api_key.is_empty() {
            anyhow::bail!("api_key is empty (is the environment variable set?)");
        }

        let cfg = self.embed_config();
        let model: Arc<dyn EmbeddingModel> = match self.provider {
            ProviderKind::OpenAI => Arc::new(OpenAI::with_config(&api_key, cfg)),
            ProviderKind::DashScope => Arc::new(DashScope::with_config(&api_key, cfg)),
        };
        Ok(model)
    }
}

/// Loads configuration from `custom_path` or the default location.
/// A missing file yields an empty configuration bound to that path.
pub fn load_config(custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    let mut cfg: Config = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        serde_yaml::from_str(&content)?
    } else {
        Config::default()
    };

    cfg.config_path = config_path;
    Ok(cfg)
}

/// Expands a `$VAR` or `${VAR}` reference. Other values are returned as-is.
pub fn expand_env(value: &str) -> String {
    let name = match value.strip_prefix('$') {
        Some(rest) => rest.trim_start_matches('{').trim_end_matches('}'),
        None => return value.to_string(),
    };
    std::env::var(name).unwrap_or_default()
}

/// Masks the API key for display.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let n = chars.len();
    if n <= 8 {
        "*".repeat(n)
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[n - 4..].iter().collect();
        format!("{}{}{}", head, "*".repeat(n - 8), tail)
    }
}
