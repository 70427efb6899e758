//! Session persistence for the wallet deep-link handshake.
//!
//! A handshake spans a full page unload: the page builds a deep link,
//! navigates away to the wallet application, and a brand-new page load
//! picks up the result. The session record -- identifier plus ephemeral
//! key pair plus timestamps -- is what survives that gap.
//!
//! - [`Session`] -- the persisted record (JSON under a fixed slot key)
//! - [`SessionStore`] -- create / lazily-expiring get / clear
//! - [`StorageBackend`] -- the durable-storage seam ([`InMemoryBackend`]
//!   provided; embedders supply the real medium)
//! - [`Clock`] -- the time seam ([`SystemClock`] for production,
//!   [`ManualClock`] for tests)
//!
//! At most one session is live at a time; creating a new one overwrites
//! any prior record.

pub mod clock;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{
    InMemoryBackend, Session, SessionError, SessionStore, StorageBackend, SESSION_TTL_MILLIS,
};
