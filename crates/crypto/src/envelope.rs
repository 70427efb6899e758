//! NaCl box seal/open over raw 32-byte keys.
//!
//! Thin wrappers around [`crypto_box::SalsaBox`] that work on the raw
//! byte buffers the protocol carries (decoded from base58 URL fields or
//! base64 storage fields). The nonce travels alongside the ciphertext as
//! its own URL parameter, so [`seal`] returns it separately rather than
//! prepending it.

use std::fmt;

use crypto_box::aead::Aead;
use crypto_box::{Nonce, PublicKey, SalsaBox, SecretKey};
use rand_core::CryptoRngCore;

use crate::keys::{KEY_SIZE, NONCE_SIZE};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors returned by box operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// XSalsa20-Poly1305 encryption failed.
    EncryptionFailed,

    /// Authentication failed: wrong key, tampered ciphertext, or wrong
    /// nonce. No plaintext is ever released on failure.
    DecryptionFailed,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncryptionFailed => write!(f, "encryption failed"),
            Self::DecryptionFailed => write!(f, "decryption failed"),
        }
    }
}

impl std::error::Error for CryptoError {}

// ---------------------------------------------------------------------------
// Seal / open
// ---------------------------------------------------------------------------

/// Encrypts `plaintext` from `sender_secret` to `recipient_public`.
///
/// Returns the ciphertext (Poly1305 tag included) and the freshly drawn
/// 24-byte nonce.
pub fn seal(
    plaintext: &[u8],
    recipient_public: &[u8; KEY_SIZE],
    sender_secret: &[u8; KEY_SIZE],
    rng: &mut impl CryptoRngCore,
) -> Result<(Vec<u8>, [u8; NONCE_SIZE]), CryptoError> {
    let sbox = SalsaBox::new(
        &PublicKey::from(*recipient_public),
        &SecretKey::from(*sender_secret),
    );

    let mut nonce = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce);

    let ciphertext = sbox
        .encrypt(&Nonce::from(nonce), plaintext)
        .map_err(|_| CryptoError::EncryptionFailed)?;
    Ok((ciphertext, nonce))
}

/// Authenticated decryption of `ciphertext` sent from `sender_public`
/// to the holder of `recipient_secret`.
///
/// # Errors
///
/// Returns [`CryptoError::DecryptionFailed`] on any authentication
/// failure -- unauthenticated plaintext is never partially trusted.
pub fn open(
    ciphertext: &[u8],
    nonce: &[u8; NONCE_SIZE],
    sender_public: &[u8; KEY_SIZE],
    recipient_secret: &[u8; KEY_SIZE],
) -> Result<Vec<u8>, CryptoError> {
    let sbox = SalsaBox::new(
        &PublicKey::from(*sender_public),
        &SecretKey::from(*recipient_secret),
    );

    sbox.decrypt(&Nonce::from(*nonce), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
