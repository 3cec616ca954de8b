//! API key resolution.
//!
//! Keys come from, in order: the manually saved key in the local settings
//! file, an external key-selection bridge supplied by the host, and the
//! process environment. The first non-blank key wins; with none available the
//! resolver yields an empty key and the backend rejects the request.

use std::{
    fmt,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ContractError, Result};

/// Name the manual key is stored under in the settings file.
pub const USER_KEY_NAME: &str = "TRAVEL_BUDDY_USER_KEY";
/// Environment variables consulted for a key, in order.
pub const ENV_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];
pub const SETTINGS_PATH_VAR: &str = "TRAVEL_BUDDY_SETTINGS";
pub const DEFAULT_SETTINGS_FILE: &str = ".travel-buddy.json";

/// Host-provided key selection, e.g. an embedding application that lets the
/// user pick a key from its own account.
pub trait KeyBridge: Send + Sync + fmt::Debug {
    fn has_selected_key(&self) -> bool;
    fn selected_key(&self) -> Option<String>;
}

#[derive(Clone, Debug)]
pub enum CredentialSource {
    ManualStorage(ManualKeyStore),
    ExternalBridge(Arc<dyn KeyBridge>),
    Environment { var: String },
}

impl CredentialSource {
    pub fn environment(var: impl Into<String>) -> Self {
        CredentialSource::Environment { var: var.into() }
    }

    pub fn is_available(&self) -> bool {
        match self {
            CredentialSource::ManualStorage(store) => store.path().exists(),
            CredentialSource::ExternalBridge(bridge) => bridge.has_selected_key(),
            CredentialSource::Environment { var } => std::env::var_os(var).is_some(),
        }
    }

    pub fn get_key(&self) -> Option<String> {
        let key = match self {
            CredentialSource::ManualStorage(store) => match store.load() {
                Ok(key) => key,
                Err(err) => {
                    debug!(target: "travel_buddy::credentials", error = %err, "ignoring unreadable settings file");
                    None
                }
            },
            CredentialSource::ExternalBridge(bridge) => bridge.selected_key(),
            CredentialSource::Environment { var } => std::env::var(var).ok(),
        };

        key.map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    pub fn describe(&self) -> String {
        match self {
            CredentialSource::ManualStorage(store) => {
                format!("manual key ({})", store.path().display())
            }
            CredentialSource::ExternalBridge(_) => "external bridge".to_string(),
            CredentialSource::Environment { var } => format!("environment ({var})"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CredentialResolver {
    sources: Vec<CredentialSource>,
}

impl CredentialResolver {
    pub fn new(sources: Vec<CredentialSource>) -> Self {
        Self { sources }
    }

    /// Manual key store from the environment, then the standard env vars.
    pub fn standard() -> Self {
        let mut sources = vec![CredentialSource::ManualStorage(ManualKeyStore::from_env())];
        sources.extend(ENV_KEY_VARS.iter().map(|var| CredentialSource::environment(*var)));
        Self::new(sources)
    }

    /// Insert a bridge right after any manual storage source.
    pub fn with_bridge(mut self, bridge: Arc<dyn KeyBridge>) -> Self {
        let position = self
            .sources
            .iter()
            .position(|source| !matches!(source, CredentialSource::ManualStorage(_)))
            .unwrap_or(self.sources.len());
        self.sources
            .insert(position, CredentialSource::ExternalBridge(bridge));
        self
    }

    pub fn sources(&self) -> &[CredentialSource] {
        &self.sources
    }

    /// The source that currently supplies a key, if any
    pub fn active_source(&self) -> Option<&CredentialSource> {
        self.sources
            .iter()
            .filter(|source| source.is_available())
            .find(|source| source.get_key().is_some())
    }

    /// First available key, or an empty string.
    pub fn resolve(&self) -> String {
        for source in self.sources.iter().filter(|source| source.is_available()) {
            if let Some(key) = source.get_key() {
                debug!(
                    target: "travel_buddy::credentials",
                    source = %source.describe(),
                    key_len = key.len(),
                    "resolved API key"
                );
                return key;
            }
        }

        debug!(target: "travel_buddy::credentials", "no API key available");
        String::new()
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::standard()
    }
}

/// JSON settings file holding the manually entered key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManualKeyStore {
    path: PathBuf,
}

impl ManualKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$TRAVEL_BUDDY_SETTINGS`, falling back to `.travel-buddy.json`.
    pub fn from_env() -> Self {
        let path = std::env::var_os(SETTINGS_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<String>> {
        let settings = self.read_settings()?;
        Ok(settings
            .get(USER_KEY_NAME)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// Store `key` trimmed. A blank key removes the stored one.
    pub fn save(&self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return self.clear();
        }

        let mut settings = self.read_settings()?;
        settings.insert(USER_KEY_NAME.to_string(), Value::String(key.to_string()));
        self.write_settings(&settings)
    }

    pub fn clear(&self) -> Result<()> {
        let mut settings = self.read_settings()?;
        if settings.remove(USER_KEY_NAME).is_none() {
            return Ok(());
        }
        self.write_settings(&settings)
    }

    fn read_settings(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => {
                return Err(ContractError::Config(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    err
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&raw).map_err(|err| {
            ContractError::Config(format!(
                "{} is not a JSON object: {}",
                self.path.display(),
                err
            ))
        })
    }

    fn write_settings(&self, settings: &Map<String, Value>) -> Result<()> {
        let body = serde_json::to_string_pretty(settings)
            .map_err(|err| ContractError::Config(err.to_string()))?;
        fs::write(&self.path, body).map_err(|err| {
            ContractError::Config(format!("failed to write {}: {}", self.path.display(), err))
        })
    }
}
