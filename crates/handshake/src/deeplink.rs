//! Outbound deep-link construction.
//!
//! Builds the exact URL that hands control to a named wallet
//! application. The caller is responsible for causing full-page
//! navigation to it; once that happens, control has left the process and
//! the only way back is the return channel.

use link_core::Cluster;
use link_session::{Session, SessionError};
use url::Url;

use crate::params;
use crate::providers::WalletProvider;

// ---------------------------------------------------------------------------
// AppIdentity
// ---------------------------------------------------------------------------

/// The connecting application's identity, as presented to the wallet.
///
/// Transient: used to build one outbound URL, then discarded.
#[derive(Debug, Clone)]
pub struct AppIdentity {
    /// The page's own origin and path, e.g. `https://game.example/play`.
    pub app_url: String,

    /// Human-readable application name. Rendered by the wallet's
    /// approval screen; also slugified into the `ref` parameter.
    pub name: String,

    /// Optional icon URL shown by the wallet.
    pub icon_url: Option<String>,
}

// ---------------------------------------------------------------------------
// build_deep_link
// ---------------------------------------------------------------------------

/// Constructs the outbound authorization URL for `provider`.
///
/// Must be called with a just-created session; the session's public key
/// is re-encoded from its stored base64 form to base58, the encoding the
/// wallet parses the `dapp_encryption_public_key` field with.
///
/// # Errors
///
/// Returns [`SessionError::UnusableKeyMaterial`] if the stored session
/// key cannot be decoded -- a caller contract violation, since sessions
/// are created immediately before building the link.
pub fn build_deep_link(
    provider: WalletProvider,
    session: &Session,
    app: &AppIdentity,
    cluster: Cluster,
) -> Result<Url, SessionError> {
    let dapp_key = session.public_key_base58()?;

    let return_url = format!(
        "{}?{}=true&{}={}",
        app.app_url,
        params::MOBILE_RETURN,
        params::SESSION,
        session.session_id,
    );

    let mut url = Url::parse(provider.connect_url()).expect("provider connect URL is valid");
    {
        let mut query = url.query_pairs_mut();
        query.append_pair(params::APP_URL, &app.app_url);
        query.append_pair(params::REDIRECT_LINK, &return_url);
        query.append_pair(params::CLUSTER, cluster.as_str());
        query.append_pair(params::REF, &ref_slug(&app.name));
        query.append_pair(params::DAPP_ENCRYPTION_PUBLIC_KEY, dapp_key.as_str());
        if let Some(icon) = &app.icon_url {
            query.append_pair(params::ICON_URL, icon);
        }
    }
    Ok(url)
}

/// Lowercases the application name and strips all whitespace.
fn ref_slug(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
