//! Return-URL sanitization.
//!
//! Once a return has been processed -- success, decline, or error -- the
//! protocol parameters must not linger in the visible address bar, where
//! ciphertext and nonce values would sit in browser history or get
//! re-shared by copy-pasting. [`clean_return_url`] is pure; the caller
//! replaces browser history state with the result, exactly once per
//! return, after parsing and never before.

use url::Url;

use crate::params;
use crate::providers::WalletProvider;

/// Protocol parameters stripped from the address bar, excluding the
/// per-provider encryption-key parameters (handled separately).
const PROTOCOL_PARAMS: [&str; 8] = [
    params::MOBILE_RETURN,
    params::SESSION,
    params::DATA,
    params::NONCE,
    params::AUTH_TOKEN,
    params::WALLET_URI_BASE,
    params::ERROR_CODE,
    params::ERROR_MESSAGE,
];

/// Returns true if `key` is one of the enumerated protocol parameters.
fn is_protocol_param(key: &str) -> bool {
    PROTOCOL_PARAMS.contains(&key)
        || WalletProvider::ALL
            .iter()
            .any(|p| key == p.encryption_key_param())
}

/// Strips every protocol parameter from `url`, preserving all foreign
/// query parameters and the rest of the URL unchanged.
pub fn clean_return_url(url: &Url) -> Url {
    let survivors: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_protocol_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut cleaned = url.clone();
    cleaned.set_query(None);
    if !survivors.is_empty() {
        cleaned.query_pairs_mut().extend_pairs(survivors);
    }
    cleaned
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
