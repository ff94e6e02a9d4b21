//! Callback tokens correlating a native settlement with a pending promise.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Alphabet the page-side generator draws from.
pub const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of generated tokens.
pub const TOKEN_LEN: usize = 32;

/// Longest token accepted from the page.
pub const MAX_TOKEN_LEN: usize = 128;

/// Opaque correlation id, echoed back to the page unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallbackId(String);

impl CallbackId {
    /// Generate a fresh 32-character alphanumeric token.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let token = (0..TOKEN_LEN)
            .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
            .collect();
        Self(token)
    }

    /// Accept a token issued by the page.
    pub fn parse(raw: &str) -> Result<Self, BridgeError> {
        if raw.is_empty() || raw.len() > MAX_TOKEN_LEN {
            return Err(BridgeError::InvalidCallbackId);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
