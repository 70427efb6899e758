//! Handshake error taxonomy.
//!
//! User decline is deliberately absent here: it is a normal terminal
//! state of the flow and surfaces as "no result", never as an error.
//! Every variant below resolves to "the user can attempt the flow
//! again" -- nothing is fatal to the host.

use std::fmt;

// ---------------------------------------------------------------------------
// DecryptionError
// ---------------------------------------------------------------------------

/// Failures while recovering the wallet's authorization payload.
///
/// Diagnostic detail is carried for logging; raw ciphertext and key
/// material never appear in any message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecryptionError {
    /// A return-URL field failed base58 decoding or has the wrong
    /// length. Carries the field name.
    BadEncoding(&'static str),

    /// Authenticated decryption failed: wrong key, tampered ciphertext,
    /// or wrong nonce.
    InvalidKeyOrNonce,

    /// The decrypted plaintext is not UTF-8 JSON.
    MalformedPayload,

    /// The decrypted payload carries no non-empty public key under any
    /// accepted field name.
    MissingPublicKey,

    /// The stored session's own key material could not be decoded.
    UnusableSessionKey,
}

impl fmt::Display for DecryptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadEncoding(field) => write!(f, "invalid encoding in field `{field}`"),
            Self::InvalidKeyOrNonce => write!(f, "invalid key or nonce"),
            Self::MalformedPayload => write!(f, "malformed payload"),
            Self::MissingPublicKey => write!(f, "missing public key"),
            Self::UnusableSessionKey => write!(f, "unusable session key material"),
        }
    }
}

impl std::error::Error for DecryptionError {}

// ---------------------------------------------------------------------------
// HandshakeError
// ---------------------------------------------------------------------------

/// Errors from return-channel processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeError {
    /// The wallet returned a non-decline error code. The message is the
    /// wallet's own, passed through for presentation by the UI layer.
    Wallet { code: i64, message: String },

    /// The return's session identifier does not match the stored
    /// session, or no session is stored at all. Unrecoverable for this
    /// return; the user must restart the flow.
    SessionMismatch,

    /// The encrypted payload could not be recovered.
    Decryption(DecryptionError),
}

impl fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wallet { code, message } => write!(f, "wallet error {code}: {message}"),
            Self::SessionMismatch => write!(f, "session mismatch"),
            Self::Decryption(e) => write!(f, "decryption failed: {e}"),
        }
    }
}

impl std::error::Error for HandshakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decryption(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecryptionError> for HandshakeError {
    fn from(e: DecryptionError) -> Self {
        Self::Decryption(e)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings_are_stable() {
        assert_eq!(DecryptionError::InvalidKeyOrNonce.to_string(), "invalid key or nonce");
        assert_eq!(DecryptionError::MalformedPayload.to_string(), "malformed payload");
        assert_eq!(DecryptionError::MissingPublicKey.to_string(), "missing public key");
        assert_eq!(HandshakeError::SessionMismatch.to_string(), "session mismatch");
    }

    #[test]
    fn wallet_error_carries_message() {
        let e = HandshakeError::Wallet {
            code: 500,
            message: "internal error".into(),
        };
        assert_eq!(e.to_string(), "wallet error 500: internal error");
    }
}
