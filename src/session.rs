//! Per-session identity for request attribution.
//!
//! The API asks clients to send an `X-Session-Id` header so it can group
//! requests that belong to one logical user. The id carries no authentication
//! weight; sessions can be thrown away and recreated at any time.

use std::fmt::Write;

use rand::Rng;

/// Prefix of generated session ids.
pub const SESSION_PREFIX: &str = "SESS-";

/// Random bytes in a generated session id.
const SESSION_ENTROPY_BYTES: usize = 5;

/// Opaque token sent with every request of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random id, e.g. `SESS-3fa94c01d2`.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SESSION_ENTROPY_BYTES];
        rand::rng().fill(&mut bytes);

        let mut id = String::with_capacity(SESSION_PREFIX.len() + 2 * bytes.len());
        id.push_str(SESSION_PREFIX);
        for byte in bytes {
            let _ = write!(id, "{byte:02x}");
        }
        Self(id)
    }

    /// Use a caller-chosen id. An empty id disables the header.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if no header should be sent.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::generate()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_format() {
        let id = SessionId::generate();
        let hex = id.as_str().strip_prefix(SESSION_PREFIX).unwrap();
        assert_eq!(hex.len(), 10);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_empty_id() {
        assert!(SessionId::new("").is_empty());
        assert!(!SessionId::default().is_empty());
    }
}
