//! Core types for the mobile wallet deep-link handshake.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`Cluster`] -- network cluster identifier carried in outbound deep links
//! - [`Base58`] / [`Base64`] -- typed textual encodings of binary protocol fields
//! - [`DecodeError`] -- decoding failures for either encoding
//!
//! The two encoding types exist because different hops of the protocol were
//! defined by different actors: local storage uses base64, while every
//! URL-facing binary field uses base58 (the wallet ecosystem's convention
//! for public keys). Keeping them as distinct types means a value encoded
//! one way can never be handed to a consumer expecting the other -- the
//! only bridge between them is raw bytes.

pub mod encoding;

pub use encoding::{Base58, Base64, DecodeError};

// ---------------------------------------------------------------------------
// Cluster
// ---------------------------------------------------------------------------

/// Network cluster identifier.
///
/// Determines the `cluster` query parameter sent in outbound deep links,
/// telling the wallet which network the application operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cluster {
    /// Production cluster.
    MainnetBeta,

    /// Development cluster.
    Devnet,
}

impl Cluster {
    /// Returns the wire identifier used in deep-link query parameters.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MainnetBeta => "mainnet-beta",
            Self::Devnet => "devnet",
        }
    }

    /// Parses a wire identifier. Returns `None` for unknown clusters.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "mainnet-beta" => Some(Self::MainnetBeta),
            "devnet" => Some(Self::Devnet),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_wire_identifiers() {
        assert_eq!(Cluster::MainnetBeta.as_str(), "mainnet-beta");
        assert_eq!(Cluster::Devnet.as_str(), "devnet");
    }

    #[test]
    fn cluster_round_trip() {
        for cluster in [Cluster::MainnetBeta, Cluster::Devnet] {
            assert_eq!(Cluster::from_str(cluster.as_str()), Some(cluster));
        }
    }

    #[test]
    fn cluster_rejects_unknown() {
        assert_eq!(Cluster::from_str("testnet-x"), None);
        assert_eq!(Cluster::from_str(""), None);
    }
}
