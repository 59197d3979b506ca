use std::fmt;
use std::path::Path;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::crypto::CipherKind;
use crate::errors::{PastaError, Result};

/// Project-level configuration, loaded from `.pasta.toml`.
///
/// Only presentation choices live here. Key sizes, curve and bcrypt cost
/// are fixed in `crypto` and cannot be configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Backend used by `encrypt` / `decrypt` (default: aes-gcm).
    #[serde(default)]
    pub cipher: CipherKind,

    /// How binary values (keys, envelopes, tags) are printed and read.
    #[serde(default)]
    pub encoding: OutputEncoding,
}

/// Text encoding for binary values on the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputEncoding {
    #[default]
    Hex,
    Base64,
}

impl OutputEncoding {
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            OutputEncoding::Hex => hex::encode(bytes),
            OutputEncoding::Base64 => BASE64.encode(bytes),
        }
    }

    /// Decode text produced by [`OutputEncoding::encode`]; surrounding
    /// whitespace is ignored.
    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        let text = text.trim();
        match self {
            OutputEncoding::Hex => hex::decode(text)
                .map_err(|e| PastaError::CommandFailed(format!("invalid hex input: {e}"))),
            OutputEncoding::Base64 => BASE64
                .decode(text)
                .map_err(|e| PastaError::CommandFailed(format!("invalid base64 input: {e}"))),
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputEncoding::Hex => f.write_str("hex"),
            OutputEncoding::Base64 => f.write_str("base64"),
        }
    }
}

impl FromStr for OutputEncoding {
    type Err = PastaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hex" => Ok(OutputEncoding::Hex),
            "base64" | "b64" => Ok(OutputEncoding::Base64),
            other => Err(PastaError::ConfigError(format!(
                "unknown encoding '{other}' — supported: hex, base64"
            ))),
        }
    }
}

impl Settings {
    /// Name of the config file we look for.
    const FILE_NAME: &'static str = ".pasta.toml";

    /// Load settings from `<dir>/.pasta.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PastaError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), ?settings, "loaded settings");
        Ok(settings)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
