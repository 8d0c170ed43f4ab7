//! IFC global identifiers
//!
//! IFC stores a 128-bit UUID as 22 characters of a custom base-64 alphabet.
//! The first character carries the top 2 bits, the remaining 21 carry 6 bits each.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{ModelError, ModelResult};

const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

/// Length of a compressed IFC GUID
pub const GUID_LEN: usize = 22;

/// Globally unique identifier of a rooted entity
///
/// Serializes as a plain string. Any string is accepted as an identifier so
/// that models produced by other tools load unchanged; [`Guid::to_uuid`]
/// validates the compressed form when that matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(String);

impl Guid {
    /// Generate a fresh compressed GUID from a random v4 UUID
    pub fn new() -> Self {
        Self::compress(Uuid::new_v4())
    }

    /// Create a Guid from an existing string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Compress a UUID into the 22-character IFC form
    pub fn compress(uuid: Uuid) -> Self {
        let n = uuid.as_u128();
        let mut out = String::with_capacity(GUID_LEN);
        out.push(ALPHABET[(n >> 126) as usize & 0x3] as char);
        for i in 1..GUID_LEN {
            let shift = 126 - 6 * i;
            out.push(ALPHABET[(n >> shift) as usize & 0x3f] as char);
        }
        Self(out)
    }

    /// Expand the compressed form back into a UUID
    pub fn to_uuid(&self) -> ModelResult<Uuid> {
        let bytes = self.0.as_bytes();
        if bytes.len() != GUID_LEN {
            return Err(ModelError::InvalidGuid(self.0.clone()));
        }
        let mut n: u128 = 0;
        for (i, b) in bytes.iter().enumerate() {
            let digit = ALPHABET
                .iter()
                .position(|a| a == b)
                .ok_or_else(|| ModelError::InvalidGuid(self.0.clone()))? as u128;
            // leading character only has room for 2 bits
            if i == 0 && digit > 3 {
                return Err(ModelError::InvalidGuid(self.0.clone()));
            }
            n = (n << 6) | digit;
        }
        Ok(Uuid::from_u128(n))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Guid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Guid {
    fn from(s: String) -> Self {
        Self(s)
    }
}
