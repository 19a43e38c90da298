//! Key providers for the health response's `key` field.
//!
//! A provider is injected into the router state rather than called as a global,
//! so handlers can be exercised with any implementation. Providers are queried
//! once per request and their value is never cached.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::KeyConfig;

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Environment variable {0} is not set")]
    MissingVar(String),

    #[error("Environment variable {0} is not valid unicode")]
    NotUnicode(String),

    #[error("Failed to read key file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of the string reported as `key` by the health endpoint.
#[async_trait]
pub trait KeyProvider: Send + Sync {
    async fn key(&self) -> Result<String, KeyError>;
}

/// Always returns the same value.
#[derive(Debug, Clone)]
pub struct StaticKeyProvider {
    value: String,
}

impl StaticKeyProvider {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[async_trait]
impl KeyProvider for StaticKeyProvider {
    async fn key(&self) -> Result<String, KeyError> {
        Ok(self.value.clone())
    }
}

/// Reads an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvKeyProvider {
    var: String,
}

impl EnvKeyProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl KeyProvider for EnvKeyProvider {
    async fn key(&self) -> Result<String, KeyError> {
        std::env::var(&self.var).map_err(|e| match e {
            std::env::VarError::NotPresent => KeyError::MissingVar(self.var.clone()),
            std::env::VarError::NotUnicode(_) => KeyError::NotUnicode(self.var.clone()),
        })
    }
}

/// Reads a file on every call, e.g. a mounted secret.
///
/// Trailing line terminators are stripped; everything else is returned verbatim.
#[derive(Debug, Clone)]
pub struct FileKeyProvider {
    path: PathBuf,
}

impl FileKeyProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl KeyProvider for FileKeyProvider {
    async fn key(&self) -> Result<String, KeyError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| KeyError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(contents.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Build the provider described by configuration, or `None` when disabled.
pub fn from_config(config: &KeyConfig) -> Option<Arc<dyn KeyProvider>> {
    match config {
        KeyConfig::None => None,
        KeyConfig::Static { value } => Some(Arc::new(StaticKeyProvider::new(value.clone()))),
        KeyConfig::Env { var } => Some(Arc::new(EnvKeyProvider::new(var.clone()))),
        KeyConfig::File { path } => Some(Arc::new(FileKeyProvider::new(path.clone()))),
    }
}
