//! State Fetcher: reads the watched account's presence and profile.
//!
//! This module provides:
//! - Snapshot types ([`PresenceSnapshot`], [`PresenceStatus`], [`ProfileSnapshot`])
//! - The fetching abstraction ([`StateFetcher`], [`FetchError`])
//! - The HTTP implementation over the public APIs ([`HttpStateFetcher`], [`ApiEndpoints`])

mod api;
mod fetch;
mod snapshot;

pub use api::{ApiEndpoints, HttpStateFetcher, PRESENCE_API, PROFILE_API};
pub use fetch::{FetchError, StateFetcher};
pub use snapshot::{EntityId, PresenceSnapshot, PresenceStatus, ProfileSnapshot};
