//! Bridge configuration from the process environment and an env file.

use crate::error::BridgeError;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Variable holding the generative-language API key.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
/// Overrides the API base URL.
pub const API_BASE_VAR: &str = "CURVESKETCH_API_BASE";
/// Overrides the model name.
pub const MODEL_VAR: &str = "CURVESKETCH_MODEL";
/// Overrides the local listen address.
pub const ADDR_VAR: &str = "CURVESKETCH_ADDR";
/// Overrides the env file location.
pub const ENV_FILE_VAR: &str = "CURVESKETCH_ENV_FILE";

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ADDR: &str = "127.0.0.1:5174";
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Runtime settings of the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// API key; the bridge still starts without one and rejects prompts.
    pub api_key: Option<String>,
    /// Base URL of the generative-language API.
    pub api_base: String,
    /// Model used for generation.
    pub model: String,
    /// Local address the front end connects to.
    pub listen_addr: SocketAddr,
    /// Env file consulted when the key is not in the environment.
    pub env_path: PathBuf,
}

impl BridgeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, BridgeError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// When the API key is not provided by `lookup`, the env file is read as
    /// a fallback.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BridgeError> {
        let env_path = PathBuf::from(lookup(ENV_FILE_VAR).unwrap_or_else(|| DEFAULT_ENV_FILE.to_string()));

        let listen_addr = lookup(ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| BridgeError::Config(format!("{}: {}", ADDR_VAR, e)))?;

        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .or_else(|| read_env_file_key(&env_path, API_KEY_VAR));

        Ok(Self {
            api_key,
            api_base: lookup(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: lookup(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            listen_addr,
            env_path,
        })
    }

    /// Log where configuration came from and whether a key is available.
    pub fn log_summary(&self) {
        info!("Loading .env from: {}", self.env_path.display());
        info!("{} present: {}", API_KEY_VAR, self.api_key.is_some());
        match &self.api_key {
            Some(key) => info!("API key length: {}", key.len()),
            None => error!("{} is missing; prompts will be rejected", API_KEY_VAR),
        }
        info!("Model: {} at {}", self.model, self.api_base);
    }
}

/// Read `name` from an env file, if the file exists and defines it.
///
/// The first `NAME = value` line wins. The value ends at the first whitespace
/// and surrounding quotes are dropped.
pub fn read_env_file_key(path: &Path, name: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let value = parse_env_value(&contents, name);
            if value.is_some() {
                debug!("Read {} from {}", name, path.display());
            }
            value
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// Find `name` in env-file formatted text.
pub fn parse_env_value(contents: &str, name: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let line = line.trim();
        if line.starts_with('#') {
            return None;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line.split_once('=')?;
        if key.trim() != name {
            return None;
        }
        let value = value.split_whitespace().next()?;
        let value = strip_quotes(value);
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
