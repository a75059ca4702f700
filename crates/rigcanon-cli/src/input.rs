//! Loading rig text and canonicalization configs from disk.

use std::path::{Path, PathBuf};

use rigcanon_engine::CanonicalizeConfig;
use thiserror::Error;

use crate::commands::json_output::error_codes;

/// Errors raised while loading CLI inputs.
#[derive(Debug, Error)]
pub enum InputError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file is not a valid canonicalization config.
    #[error("invalid config {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl InputError {
    /// Returns the stable CLI error code.
    pub fn code(&self) -> &'static str {
        match self {
            InputError::ReadFailed { .. } => error_codes::FILE_READ,
            InputError::InvalidConfig { .. } => error_codes::INVALID_CONFIG,
        }
    }

    /// Returns the path of the offending file.
    pub fn path(&self) -> &Path {
        match self {
            InputError::ReadFailed { path, .. } | InputError::InvalidConfig { path, .. } => path,
        }
    }
}

/// Rig text plus provenance.
#[derive(Debug, Clone)]
pub struct RigSource {
    /// The raw rig text.
    pub text: String,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

impl RigSource {
    /// Number of non-blank lines.
    pub fn record_count(&self) -> usize {
        self.text.lines().filter(|l| !l.trim().is_empty()).count()
    }
}

/// Reads a rig file.
pub fn load_rig(path: &Path) -> Result<RigSource, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let source_hash = blake3::hash(text.as_bytes()).to_hex().to_string();
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded rig");
    Ok(RigSource { text, source_hash })
}

/// Reads a JSON canonicalization config, or returns the defaults.
pub fn load_config(path: Option<&Path>) -> Result<CanonicalizeConfig, InputError> {
    let Some(path) = path else {
        return Ok(CanonicalizeConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| InputError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    CanonicalizeConfig::from_json(&text).map_err(|source| InputError::InvalidConfig {
        path: path.to_path_buf(),
        source,
    })
}
