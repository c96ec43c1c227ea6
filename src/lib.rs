//! Teams presence - client for the Microsoft Teams presence API
//!
//! `api::PresenceClient` validates availability, activity, work location
//! and note arguments and sends them to the `/v1/me` presence endpoints.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;

pub use api::{ClientConfig, PresenceClient};
pub use error::{PresenceError, Result};
