//! API client module for the Teams presence service

pub mod client;
mod presence;
pub mod transport;

use anyhow::Result;

pub use client::{ClientConfig, PresenceClient};
pub use presence::resolve_expiry;
pub use transport::{ApiRequest, HttpTransport, RawResponse, ReqwestTransport};

use crate::models::Expiry;

/// Get current presence status
pub async fn get_status(raw: bool) -> Result<()> {
    presence::get_status(raw).await
}

/// Force an availability (Available, Busy, DoNotDisturb, BeRightBack, Away, Offline)
pub async fn set_availability(value: &str, expiry: Expiry) -> Result<()> {
    presence::set_availability(value, expiry).await
}

/// Publish a status note
pub async fn set_note(note: &str, pinned: bool, expiry: Expiry) -> Result<()> {
    presence::set_note(note, pinned, expiry).await
}

/// Set work location (remote, office, reset)
pub async fn set_location(value: &str, expiry: Expiry) -> Result<()> {
    presence::set_location(value, expiry).await
}

/// Set session-scoped availability and activity
pub async fn set_presence(availability: &str, activity: &str, duration: u32) -> Result<()> {
    presence::set_presence(availability, activity, duration).await
}

/// Show, set, or generate the session identifier
pub fn session(id: Option<String>, generate: bool) -> Result<()> {
    presence::session(id, generate)
}
