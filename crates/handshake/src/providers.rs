//! Supported mobile wallet providers.
//!
//! Each provider has a fixed HTTPS universal-link authority for the
//! connect endpoint and a vendor-specific name for the encryption public
//! key parameter in its return URL. All data is compile-time constant.

/// A supported mobile wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletProvider {
    /// Phantom.
    Phantom,

    /// Solflare.
    Solflare,

    /// Backpack.
    Backpack,
}

impl WalletProvider {
    /// Every supported provider, in return-URL detection order.
    pub const ALL: [WalletProvider; 3] = [Self::Phantom, Self::Solflare, Self::Backpack];

    /// Lowercase provider identifier.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Phantom => "phantom",
            Self::Solflare => "solflare",
            Self::Backpack => "backpack",
        }
    }

    /// Universal-link connect endpoint.
    ///
    /// Navigating here hands control to the OS, which opens the installed
    /// wallet application or falls back to the vendor's web page. Both
    /// are acceptable terminal states outside this subsystem's control.
    pub const fn connect_url(&self) -> &'static str {
        match self {
            Self::Phantom => "https://phantom.app/ul/v1/connect",
            Self::Solflare => "https://solflare.com/ul/v1/connect",
            Self::Backpack => "https://backpack.app/ul/v1/connect",
        }
    }

    /// Name of the return-URL parameter carrying the wallet's ephemeral
    /// encryption public key. Presence of this parameter is itself a
    /// positive signal that the URL is a wallet return.
    pub const fn encryption_key_param(&self) -> &'static str {
        match self {
            Self::Phantom => "phantom_encryption_public_key",
            Self::Solflare => "solflare_encryption_public_key",
            Self::Backpack => "backpack_encryption_public_key",
        }
    }

    /// Parses a lowercase provider identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for provider in WalletProvider::ALL {
            assert_eq!(WalletProvider::from_id(provider.id()), Some(provider));
        }
        assert_eq!(WalletProvider::from_id("ledger"), None);
    }

    #[test]
    fn connect_urls_are_https() {
        for provider in WalletProvider::ALL {
            assert!(provider.connect_url().starts_with("https://"));
        }
    }

    #[test]
    fn key_params_are_vendor_prefixed() {
        for provider in WalletProvider::ALL {
            let param = provider.encryption_key_param();
            assert!(param.starts_with(provider.id()));
            assert!(param.ends_with("_encryption_public_key"));
        }
    }
}
