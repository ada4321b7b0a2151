//! Connection parameters and credentials.
//!
//! # Design
//! Configuration arrives as a JSON object using the handle-server key names
//! (`handle_server_url`, `prefix`, `HTTPS_verify`, `username`, `password`).
//! Keys are required and never defaulted; extra keys are ignored so one
//! object can configure both client variants.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Where the handle server lives and which prefix this client mints under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub prefix: String,
    pub verify_tls: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, prefix: impl Into<String>, verify_tls: bool) -> Self {
        Self {
            base_url: base_url.into(),
            prefix: prefix.into(),
            verify_tls,
        }
    }

    /// Read `handle_server_url`, `prefix` and `HTTPS_verify` from `config`.
    pub fn from_value(config: &Value) -> Result<Self> {
        let raw = RawClientConfig::deserialize(config).map_err(config_error)?;
        Ok(Self {
            base_url: raw.handle_server_url,
            prefix: raw.prefix,
            verify_tls: raw.https_verify,
        })
    }
}

/// Username and password for Basic authentication.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read `username` and `password` from `config`.
    pub fn from_value(config: &Value) -> Result<Self> {
        Self::deserialize(config).map_err(config_error)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Load a JSON configuration object from `path`.
pub fn read_config_file(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ClientError::Config(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| ClientError::Config(format!("cannot parse {}: {e}", path.display())))
}

#[derive(Deserialize)]
struct RawClientConfig {
    handle_server_url: String,
    prefix: String,
    #[serde(rename = "HTTPS_verify", deserialize_with = "deserialize_flag")]
    https_verify: bool,
}

fn config_error(e: serde_json::Error) -> ClientError {
    ClientError::Config(e.to_string())
}

/// Coerce any JSON value to a flag. `null`, zero, empty strings and
/// containers, and the words `false/no/off/0` are false; everything else is
/// true.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "" | "false" | "no" | "off" | "0"
        ),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}
