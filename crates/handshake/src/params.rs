//! Query parameter names shared across the handshake.

/// Presence marker appended to the return URL; its presence on a page
/// load is a cheap positive signal of a wallet return.
pub const MOBILE_RETURN: &str = "mobile_return";

/// Session identifier, present in both directions.
pub const SESSION: &str = "session";

/// Ciphertext of the wallet's authorization payload, base58.
pub const DATA: &str = "data";

/// XSalsa20-Poly1305 nonce, base58.
pub const NONCE: &str = "nonce";

/// Optional opaque token some wallets issue for follow-up requests.
pub const AUTH_TOKEN: &str = "auth_token";

/// Optional opaque base URI some wallets issue for follow-up requests.
pub const WALLET_URI_BASE: &str = "wallet_uri_base";

/// Wallet-supplied error code; `4001` is the reserved "user declined" value.
pub const ERROR_CODE: &str = "errorCode";

/// Wallet-supplied human-readable error message.
pub const ERROR_MESSAGE: &str = "errorMessage";

/// Outbound: the page's own origin and path.
pub const APP_URL: &str = "app_url";

/// Outbound: the URL the wallet must redirect back to.
pub const REDIRECT_LINK: &str = "redirect_link";

/// Outbound: network cluster identifier.
pub const CLUSTER: &str = "cluster";

/// Outbound: lowercase, whitespace-stripped application name.
pub const REF: &str = "ref";

/// Outbound: session ephemeral public key, base58.
pub const DAPP_ENCRYPTION_PUBLIC_KEY: &str = "dapp_encryption_public_key";

/// Outbound, optional: application icon URL.
pub const ICON_URL: &str = "icon_url";
