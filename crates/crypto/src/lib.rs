//! Authenticated public-key encryption for the wallet handshake.
//!
//! Implements the NaCl "box" construction (X25519 key agreement +
//! XSalsa20-Poly1305 AEAD) via RustCrypto's `crypto_box` crate -- the
//! scheme mobile wallets use to encrypt their authorization response to
//! the page's ephemeral session key.
//!
//! - [`EphemeralKeyPair`] -- per-session Curve25519 key pair
//! - [`seal`] / [`open`] -- authenticated encrypt / decrypt
//!
//! Randomness is always supplied by the caller as
//! `&mut impl CryptoRngCore`; production callers pass
//! [`rand_core::OsRng`].
//!
//! # Example
//!
//! ```
//! use link_crypto::{open, seal, EphemeralKeyPair};
//! use rand_core::OsRng;
//!
//! let page = EphemeralKeyPair::generate(&mut OsRng);
//! let wallet = EphemeralKeyPair::generate(&mut OsRng);
//!
//! let (ciphertext, nonce) =
//!     seal(b"payload", &page.public_bytes(), &wallet.secret_bytes(), &mut OsRng).unwrap();
//! let plaintext =
//!     open(&ciphertext, &nonce, &wallet.public_bytes(), &page.secret_bytes()).unwrap();
//! assert_eq!(plaintext, b"payload");
//! ```

mod envelope;
mod keys;

pub use envelope::{open, seal, CryptoError};
pub use keys::{EphemeralKeyPair, KEY_SIZE, NONCE_SIZE};
