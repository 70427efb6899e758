//! Return-channel parsing and authorization decryption.
//!
//! After the wallet redirects back, the page's current URL is the only
//! input. [`is_wallet_return`] is the cheap pre-check run on every page
//! load; [`parse_response`] extracts the protocol fields, validates the
//! session, and performs the authenticated decryption that proves the
//! response originated from the holder of the wallet's ephemeral key.
//!
//! User decline (reserved code `4001`) is a normal terminal state, not a
//! failure: it yields `Ok(None)`, exactly like a page load that is not a
//! wallet return at all.

use std::borrow::Cow;
use std::collections::HashMap;

use link_core::Base58;
use link_crypto::{open, KEY_SIZE, NONCE_SIZE};
use link_session::{Clock, SessionStore, StorageBackend};
use tracing::{debug, warn};
use url::Url;

use crate::error::{DecryptionError, HandshakeError};
use crate::params;
use crate::providers::WalletProvider;

/// Reserved wallet error code meaning "user declined". Not an error.
pub const USER_DECLINED_CODE: i64 = 4001;

/// Accepted spellings of the public key field in the decrypted payload,
/// checked in order. Wallet vendors have been observed to use either.
const PUBLIC_KEY_FIELDS: [&str; 2] = ["public_key", "publicKey"];

// ---------------------------------------------------------------------------
// WalletAuthorization
// ---------------------------------------------------------------------------

/// The decrypted result of one successful round trip.
///
/// Constructed once per return; this subsystem never persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAuthorization {
    /// The wallet's permanent account public key, base58. The value the
    /// rest of the application treats as the user's identity.
    pub public_key: String,

    /// Opaque token some wallets issue for follow-up requests, passed
    /// through from the return URL unchanged.
    pub auth_token: Option<String>,

    /// Opaque base URI some wallets issue for follow-up requests,
    /// passed through unchanged.
    pub wallet_uri_base: Option<String>,
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Returns true if the URL looks like a wallet return: it carries the
/// `mobile_return` marker or any provider's encryption-key parameter.
pub fn is_wallet_return(url: &Url) -> bool {
    url.query_pairs().any(|(key, _)| {
        key == params::MOBILE_RETURN
            || WalletProvider::ALL
                .iter()
                .any(|p| key == p.encryption_key_param())
    })
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Processes a wallet return URL against the stored session.
///
/// Returns `Ok(None)` when the URL is not actually a completed return
/// (missing protocol fields) or when the user declined in the wallet.
///
/// # Errors
///
/// - [`HandshakeError::Wallet`] for a non-decline wallet error code.
/// - [`HandshakeError::SessionMismatch`] when no session is stored or
///   the URL's session identifier differs from the stored one.
///   Decryption is never attempted in this case.
/// - [`HandshakeError::Decryption`] when the payload cannot be
///   authenticated and recovered.
pub fn parse_response<S: StorageBackend, C: Clock>(
    url: &Url,
    store: &SessionStore<S, C>,
) -> Result<Option<WalletAuthorization>, HandshakeError> {
    let query: HashMap<Cow<'_, str>, Cow<'_, str>> = url.query_pairs().collect();

    // Wallet-signalled errors take precedence over everything else.
    if let Some(code) = query.get(params::ERROR_CODE) {
        let code = code.parse::<i64>().unwrap_or(-1);
        if code == USER_DECLINED_CODE {
            debug!("wallet connection declined by user");
            return Ok(None);
        }
        let message = query
            .get(params::ERROR_MESSAGE)
            .map(|m| m.to_string())
            .unwrap_or_else(|| "unknown wallet error".to_owned());
        return Err(HandshakeError::Wallet { code, message });
    }

    // All four protocol fields must be present; otherwise this is a
    // normal page load that happens to share no state with us.
    let Some((wallet_key_b58, data_b58, nonce_b58, session_id)) = required_fields(&query) else {
        return Ok(None);
    };

    let Some(session) = store.get_session() else {
        warn!("wallet return received but no session is stored");
        return Err(HandshakeError::SessionMismatch);
    };
    if session.session_id != session_id {
        warn!(
            stored = %session.session_id,
            returned = %session_id,
            "wallet return carries a different session id"
        );
        return Err(HandshakeError::SessionMismatch);
    }

    let wallet_public = decode_fixed::<KEY_SIZE>(wallet_key_b58, "encryption_public_key")?;
    let nonce = decode_fixed::<NONCE_SIZE>(nonce_b58, params::NONCE)?;
    let ciphertext = Base58::from(data_b58)
        .decode()
        .map_err(|_| DecryptionError::BadEncoding(params::DATA))?;
    let session_secret = session
        .private_key_bytes()
        .map_err(|_| DecryptionError::UnusableSessionKey)?;

    let public_key = decrypt_authorization(&ciphertext, &nonce, &wallet_public, &session_secret)?;

    Ok(Some(WalletAuthorization {
        public_key,
        auth_token: query.get(params::AUTH_TOKEN).map(|v| v.to_string()),
        wallet_uri_base: query.get(params::WALLET_URI_BASE).map(|v| v.to_string()),
    }))
}

/// Extracts the four required return fields, if all are present.
fn required_fields<'q>(
    query: &'q HashMap<Cow<'q, str>, Cow<'q, str>>,
) -> Option<(&'q str, &'q str, &'q str, &'q str)> {
    let wallet_key = WalletProvider::ALL
        .iter()
        .find_map(|p| query.get(p.encryption_key_param()))?;
    let data = query.get(params::DATA)?;
    let nonce = query.get(params::NONCE)?;
    let session = query.get(params::SESSION)?;
    Some((wallet_key.as_ref(), data.as_ref(), nonce.as_ref(), session.as_ref()))
}

/// Base58-decodes a URL field into a fixed-size buffer.
fn decode_fixed<const N: usize>(
    encoded: &str,
    field: &'static str,
) -> Result<[u8; N], DecryptionError> {
    Base58::from(encoded)
        .decode()
        .map_err(|_| DecryptionError::BadEncoding(field))?
        .try_into()
        .map_err(|_| DecryptionError::BadEncoding(field))
}

// ---------------------------------------------------------------------------
// Decryption
// ---------------------------------------------------------------------------

/// Opens the authorization ciphertext and extracts the wallet's
/// permanent public key from the JSON plaintext.
///
/// This is the security-critical step: the authenticated open is the
/// only proof that the response originated from the entity holding the
/// private half of the wallet's ephemeral public key.
fn decrypt_authorization(
    ciphertext: &[u8],
    nonce: &[u8; NONCE_SIZE],
    wallet_public: &[u8; KEY_SIZE],
    session_secret: &[u8; KEY_SIZE],
) -> Result<String, DecryptionError> {
    let plaintext = open(ciphertext, nonce, wallet_public, session_secret)
        .map_err(|_| DecryptionError::InvalidKeyOrNonce)?;

    let payload: serde_json::Value =
        serde_json::from_slice(&plaintext).map_err(|_| DecryptionError::MalformedPayload)?;

    PUBLIC_KEY_FIELDS
        .iter()
        .find_map(|field| payload.get(field).and_then(|v| v.as_str()))
        .filter(|key| !key.is_empty())
        .map(str::to_owned)
        .ok_or(DecryptionError::MissingPublicKey)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
