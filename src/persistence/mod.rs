//! Save/load persistence
//!
//! Values are wrapped in a versioned JSON envelope before going into
//! LocalStorage. A stored value with a different version is rejected so a
//! stale layout never deserializes into the wrong fields.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current envelope version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Why a stored value could not be read back
#[derive(Debug)]
pub enum PersistError {
    /// Not valid JSON, or the payload does not match the expected type
    Json(serde_json::Error),
    /// Written by a different format version
    VersionMismatch { found: u32, expected: u32 },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Json(e) => write!(f, "malformed save data: {e}"),
            PersistError::VersionMismatch { found, expected } => {
                write!(f, "save version {found} does not match {expected}")
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Json(e) => Some(e),
            PersistError::VersionMismatch { .. } => None,
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Json(e)
    }
}

/// Serialize `value` inside an envelope
pub fn encode<T: Serialize>(value: &T) -> Result<String, PersistError> {
    Ok(serde_json::to_string(&Envelope {
        version: FORMAT_VERSION,
        data: value,
    })?)
}

/// Parse an envelope produced by [`encode`]
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, PersistError> {
    #[derive(Deserialize)]
    struct Header {
        version: u32,
    }

    let header: Header = serde_json::from_str(json)?;
    if header.version != FORMAT_VERSION {
        return Err(PersistError::VersionMismatch {
            found: header.version,
            expected: FORMAT_VERSION,
        });
    }
    let envelope: Envelope<T> = serde_json::from_str(json)?;
    Ok(envelope.data)
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Load a value from LocalStorage. Missing, stale or corrupt entries yield `None`.
#[cfg(target_arch = "wasm32")]
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok()??;
    match decode(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding stored '{}': {}", key, e);
            None
        }
    }
}

/// Store a value in LocalStorage. Returns whether it was written.
#[cfg(target_arch = "wasm32")]
pub fn save<T: Serialize>(key: &str, value: &T) -> bool {
    let Some(storage) = local_storage() else {
        return false;
    };
    let json = match encode(value) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not serialize '{}': {}", key, e);
            return false;
        }
    };
    match storage.set_item(key, &json) {
        Ok(()) => true,
        Err(_) => {
            log::warn!("LocalStorage rejected '{}'", key);
            false
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save<T: Serialize>(_key: &str, _value: &T) -> bool {
    false
}
