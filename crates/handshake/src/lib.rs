//! Mobile wallet deep-link connection handshake.
//!
//! Establishes an authenticated, encrypted channel between a web page
//! and a wallet application the page does not control, across a full
//! context switch: the page hands off via a deep link, the user approves
//! in the wallet, and the wallet redirects back with an encrypted
//! response in the URL. No server intermediary -- the whole protocol
//! rides on URL query parameters and local client-side storage.
//!
//! # Flow
//!
//! 1. Create a session ([`link_session::SessionStore::create_session`]):
//!    fresh ephemeral key pair, persisted so it survives navigation.
//! 2. [`build_deep_link`] and navigate to it (control leaves the page).
//! 3. On every subsequent page load, check [`is_wallet_return`] before
//!    any other logic consumes the URL.
//! 4. [`parse_response`]: validate the session, decrypt, and recover the
//!    wallet's identity -- or observe a decline (`Ok(None)`).
//! 5. [`clean_return_url`] regardless of outcome, exactly once, after
//!    parsing -- the sanitizer is destructive and must never race other
//!    URL-reading logic.
//! 6. Clear the session on success or explicit failure; an abandoned
//!    session expires on its own after 30 minutes.
//!
//! The protocol layer never renders UI: all failures propagate as
//! [`HandshakeError`] and the embedding application decides presentation.

pub mod deeplink;
pub mod error;
pub mod params;
pub mod providers;
pub mod response;
pub mod sanitize;

pub use deeplink::{build_deep_link, AppIdentity};
pub use error::{DecryptionError, HandshakeError};
pub use providers::WalletProvider;
pub use response::{
    is_wallet_return, parse_response, WalletAuthorization, USER_DECLINED_CODE,
};
pub use sanitize::clean_return_url;
