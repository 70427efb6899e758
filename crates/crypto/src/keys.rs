//! Ephemeral Curve25519 key pairs.

use crypto_box::{PublicKey, SecretKey};
use rand_core::CryptoRngCore;

/// Size of a Curve25519 public or secret key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of an XSalsa20-Poly1305 nonce in bytes.
pub const NONCE_SIZE: usize = 24;

/// A freshly generated Curve25519 key pair for one handshake session.
///
/// The public half is shared with the wallet (base58, inside the deep
/// link); the secret half never leaves the local process and is never
/// transmitted. Pairs are generated per session and discarded afterward,
/// never reused.
#[derive(Clone)]
pub struct EphemeralKeyPair {
    public: PublicKey,
    secret: SecretKey,
}

impl EphemeralKeyPair {
    /// Generates a fresh key pair from the supplied CSPRNG.
    ///
    /// Always succeeds; if the randomness source itself is broken the
    /// process is considered fatally compromised.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        let secret = SecretKey::generate(rng);
        let public = secret.public_key();
        Self { public, secret }
    }

    /// Rehydrates a key pair from raw bytes (a persisted session record).
    pub fn from_bytes(public: [u8; KEY_SIZE], secret: [u8; KEY_SIZE]) -> Self {
        Self {
            public: PublicKey::from(public),
            secret: SecretKey::from(secret),
        }
    }

    /// Returns the raw public key bytes.
    pub fn public_bytes(&self) -> [u8; KEY_SIZE] {
        *self.public.as_bytes()
    }

    /// Returns the raw secret key bytes.
    pub fn secret_bytes(&self) -> [u8; KEY_SIZE] {
        self.secret.to_bytes()
    }
}

impl std::fmt::Debug for EphemeralKeyPair {
    /// Debug output shows only the public half.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemeralKeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
