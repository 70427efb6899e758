//! Single-slot session store with lazy expiry.
//!
//! The persisted format is a JSON object under a fixed slot key, with
//! field names fixed by the wire format:
//! `sessionId`, `publicKey` (base64), `privateKey` (base64), `created`,
//! `expiresAt` (both millisecond timestamps).
//!
//! Reads that cannot be parsed are treated identically to "absent": the
//! record is discarded with a warning and the caller proceeds as if no
//! session existed. Nothing in this module surfaces storage faults as
//! errors.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use link_core::Base64;
use link_crypto::{EphemeralKeyPair, KEY_SIZE};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::Clock;

/// Session lifetime: 30 minutes from creation.
pub const SESSION_TTL_MILLIS: i64 = 30 * 60 * 1000;

/// Fixed storage slot for the single in-flight session.
const STORAGE_KEY: &str = "wallet_link_session";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors raised when a persisted session's key material is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A stored key failed to base64-decode or has the wrong length.
    UnusableKeyMaterial,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnusableKeyMaterial => write!(f, "unusable session key material"),
        }
    }
}

impl std::error::Error for SessionError {}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One in-flight connection attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque identifier embedded in the outbound deep link and expected
    /// back in the return URL. Unique enough to avoid accidental
    /// collision; not a secret.
    pub session_id: String,

    /// Ephemeral Curve25519 public key, base64.
    pub public_key: Base64,

    /// Ephemeral Curve25519 private key, base64. Never leaves local
    /// storage; never placed in a URL or outbound payload.
    pub private_key: Base64,

    /// Creation time, milliseconds since the UNIX epoch.
    pub created: i64,

    /// Expiry time, milliseconds since the UNIX epoch.
    pub expires_at: i64,
}

impl Session {
    /// Rehydrates the ephemeral key pair from the stored base64 fields.
    pub fn keypair(&self) -> Result<EphemeralKeyPair, SessionError> {
        Ok(EphemeralKeyPair::from_bytes(
            decode_key(&self.public_key)?,
            decode_key(&self.private_key)?,
        ))
    }

    /// Returns the stored private key as raw bytes.
    pub fn private_key_bytes(&self) -> Result<[u8; KEY_SIZE], SessionError> {
        decode_key(&self.private_key)
    }

    /// Returns the public key re-encoded as base58, the form every
    /// URL-facing field uses. The conversion goes through raw bytes;
    /// there is no direct base64-to-base58 string path.
    pub fn public_key_base58(&self) -> Result<link_core::Base58, SessionError> {
        Ok(link_core::Base58::encode(&decode_key(&self.public_key)?))
    }
}

fn decode_key(encoded: &Base64) -> Result<[u8; KEY_SIZE], SessionError> {
    let bytes = encoded.decode().map_err(|_| SessionError::UnusableKeyMaterial)?;
    bytes
        .try_into()
        .map_err(|_| SessionError::UnusableKeyMaterial)
}

// ---------------------------------------------------------------------------
// StorageBackend
// ---------------------------------------------------------------------------

/// The durable-storage seam: a string-valued slot store with
/// localStorage semantics.
///
/// The API is deliberately infallible -- a backend that cannot read or
/// write simply behaves as if the slot were absent, which the store
/// treats as a clean-restart condition rather than an error.
pub trait StorageBackend: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`, replacing any existing value.
    fn put(&self, key: &str, value: &str);

    /// Deletes the value under `key`. Idempotent.
    fn remove(&self, key: &str);
}

/// In-memory backend backed by `RwLock<HashMap>`.
///
/// Suitable for tests and native embedders without a durable medium.
/// Browser shells implement [`StorageBackend`] over their local storage.
#[derive(Default)]
pub struct InMemoryBackend {
    slots: RwLock<HashMap<String, String>>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for InMemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.read().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        if let Ok(mut slots) = self.slots.write() {
            slots.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut slots) = self.slots.write() {
            slots.remove(key);
        }
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Creates, retrieves, expires, and clears the single in-flight session.
pub struct SessionStore<S: StorageBackend, C: Clock> {
    backend: S,
    clock: C,
}

impl<S: StorageBackend, C: Clock> SessionStore<S, C> {
    /// Creates a store over the given backend and clock.
    pub fn new(backend: S, clock: C) -> Self {
        Self { backend, clock }
    }

    /// Generates and persists a fresh session, overwriting any prior one.
    ///
    /// The identifier is the creation timestamp plus a random suffix.
    pub fn create_session(&self, rng: &mut impl CryptoRngCore) -> Session {
        let now = self.clock.now_millis();
        let pair = EphemeralKeyPair::generate(rng);

        let mut suffix = [0u8; 4];
        rng.fill_bytes(&mut suffix);
        let session = Session {
            session_id: format!("{now}-{:08x}", u32::from_be_bytes(suffix)),
            public_key: Base64::encode(&pair.public_bytes()),
            private_key: Base64::encode(&pair.secret_bytes()),
            created: now,
            expires_at: now + SESSION_TTL_MILLIS,
        };

        match serde_json::to_string(&session) {
            Ok(json) => self.backend.put(STORAGE_KEY, &json),
            // Session is a plain struct of strings and integers; this
            // branch is unreachable in practice.
            Err(e) => warn!(error = %e, "failed to serialize session record"),
        }
        debug!(session_id = %session.session_id, "created handshake session");
        session
    }

    /// Reads the persisted session, if one exists and has not expired.
    ///
    /// Expired or unparsable records are deleted on the spot and read as
    /// absent -- lazy expiry, no background timer, no outward error.
    pub fn get_session(&self) -> Option<Session> {
        let raw = self.backend.get(STORAGE_KEY)?;
        let session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "discarding unparsable session record");
                self.backend.remove(STORAGE_KEY);
                return None;
            }
        };

        if self.clock.now_millis() >= session.expires_at {
            debug!(session_id = %session.session_id, "session expired, discarding");
            self.backend.remove(STORAGE_KEY);
            return None;
        }
        Some(session)
    }

    /// Unconditionally deletes the persisted session. Idempotent.
    pub fn clear_session(&self) {
        self.backend.remove(STORAGE_KEY);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rand_core::OsRng;

    use super::*;
    use crate::clock::ManualClock;

    fn store_at(millis: i64) -> SessionStore<InMemoryBackend, ManualClock> {
        SessionStore::new(InMemoryBackend::new(), ManualClock::new(millis))
    }

    #[test]
    fn create_then_get_round_trip() {
        let store = store_at(1_700_000_000_000);
        let created = store.create_session(&mut OsRng);
        let read = store.get_session().expect("session should be live");
        assert_eq!(read, created);
    }

    #[test]
    fn session_id_embeds_timestamp_and_suffix() {
        let store = store_at(1_700_000_000_000);
        let session = store.create_session(&mut OsRng);
        let (ts, suffix) = session.session_id.split_once('-').unwrap();
        assert_eq!(ts, "1700000000000");
        assert_eq!(suffix.len(), 8);
    }

    #[test]
    fn valid_just_before_expiry_absent_after() {
        let store = store_at(1_700_000_000_000);
        store.create_session(&mut OsRng);

        // T + 29 min: still live.
        store.clock.set(1_700_000_000_000 + 29 * 60 * 1000);
        assert!(store.get_session().is_some());

        // T + 31 min: absent, and the record is deleted.
        store.clock.set(1_700_000_000_000 + 31 * 60 * 1000);
        assert!(store.get_session().is_none());
        assert!(store.backend.get(STORAGE_KEY).is_none());
    }

    #[test]
    fn expiry_boundary_is_exclusive_of_now() {
        let store = store_at(0);
        store.create_session(&mut OsRng);
        store.clock.set(SESSION_TTL_MILLIS);
        // now == expiresAt reads as expired.
        assert!(store.get_session().is_none());
    }

    #[test]
    fn corrupt_record_reads_as_absent_and_is_deleted() {
        let store = store_at(1_000);
        store.backend.put(STORAGE_KEY, "{not json");
        assert!(store.get_session().is_none());
        assert!(store.backend.get(STORAGE_KEY).is_none());
    }

    #[test]
    fn foreign_json_reads_as_absent() {
        let store = store_at(1_000);
        store.backend.put(STORAGE_KEY, "{\"something\":\"else\"}");
        assert!(store.get_session().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = store_at(1_000);
        store.create_session(&mut OsRng);
        store.clear_session();
        store.clear_session();
        assert!(store.get_session().is_none());
    }

    #[test]
    fn create_overwrites_prior_session() {
        let store = store_at(1_000);
        let first = store.create_session(&mut OsRng);
        let second = store.create_session(&mut OsRng);
        assert_ne!(first.session_id, second.session_id);
        assert_eq!(store.get_session().unwrap(), second);
    }

    #[test]
    fn persisted_format_uses_wire_field_names() {
        let store = store_at(1_000);
        store.create_session(&mut OsRng);
        let raw = store.backend.get(STORAGE_KEY).unwrap();
        for field in ["sessionId", "publicKey", "privateKey", "created", "expiresAt"] {
            assert!(raw.contains(field), "missing field {field}");
        }
    }

    #[test]
    fn keypair_rehydrates() {
        let store = store_at(1_000);
        let session = store.create_session(&mut OsRng);
        let pair = session.keypair().unwrap();
        assert_eq!(
            Base64::encode(&pair.public_bytes()),
            session.public_key
        );
        assert_eq!(
            Base64::encode(&pair.secret_bytes()),
            session.private_key
        );
    }

    #[test]
    fn public_key_base58_matches_raw_bytes() {
        let store = store_at(1_000);
        let session = store.create_session(&mut OsRng);
        let b58 = session.public_key_base58().unwrap();
        assert_eq!(b58.decode().unwrap(), session.public_key.decode().unwrap());
    }

    #[test]
    fn truncated_key_material_is_unusable() {
        let session = Session {
            session_id: "1-00000000".into(),
            public_key: Base64::encode(&[0u8; 16]),
            private_key: Base64::encode(&[0u8; 16]),
            created: 0,
            expires_at: SESSION_TTL_MILLIS,
        };
        assert_eq!(session.keypair().unwrap_err(), SessionError::UnusableKeyMaterial);
    }
}
