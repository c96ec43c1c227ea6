//! Presence commands for the CLI

use anyhow::{Context, Result};

use super::client::PresenceClient;
use crate::config::Config;
use crate::models::{
    Activity, Availability, Expiry, PresenceDuration, PresenceStatus, WorkLocation,
};

fn client_from_config() -> Result<PresenceClient> {
    let config = Config::load()?;
    let client = PresenceClient::new(config.client_config()?)?;
    Ok(client)
}

/// `--expiry` wins over `--minutes`; with neither the change never expires.
pub fn resolve_expiry(expiry: Option<&str>, minutes: Option<i64>) -> Result<Expiry> {
    match (expiry, minutes) {
        (Some(text), _) => Ok(text.parse()?),
        (None, Some(minutes)) => {
            anyhow::ensure!(minutes > 0, "--minutes must be positive, got {}", minutes);
            Ok(Expiry::after_minutes(minutes)?)
        }
        (None, None) => Ok(Expiry::never()),
    }
}

fn describe_status(value: &serde_json::Value) -> String {
    let status = PresenceStatus::from_json(value);
    let mut out = String::from("\nPresence Status:\n");
    out.push_str(&format!(
        "  Availability: {}\n",
        status.availability.as_deref().unwrap_or("(unknown)")
    ));
    out.push_str(&format!(
        "  Activity: {}\n",
        status.activity.as_deref().unwrap_or("(unknown)")
    ));
    if let Some(message) = status.note.and_then(|n| n.message).filter(|m| !m.is_empty()) {
        out.push_str(&format!("  Note: {}\n", message));
    }
    if let Some(location) = status.work_location {
        out.push_str(&format!("  Work location: {}\n", location));
    }
    out
}

/// Get current presence status
pub async fn get_status(raw: bool) -> Result<()> {
    let client = client_from_config()?;
    let status = client.get_status().await?;

    if raw {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print!("{}", describe_status(&status));
    }
    Ok(())
}

/// Force an availability
pub async fn set_availability(value: &str, expiry: Expiry) -> Result<()> {
    let availability: Availability = value.parse()?;
    let client = client_from_config()?;
    client.set_forced_availability(availability, &expiry).await?;

    println!("Availability forced to: {}", availability);
    Ok(())
}

/// Publish a status note
pub async fn set_note(note: &str, pinned: bool, expiry: Expiry) -> Result<()> {
    let client = client_from_config()?;
    client.set_publish_note(note, pinned, &expiry).await?;

    println!("Note published{}", if pinned { " (pinned)" } else { "" });
    Ok(())
}

/// Set work location
pub async fn set_location(value: &str, expiry: Expiry) -> Result<()> {
    let location: WorkLocation = value.parse()?;
    let client = client_from_config()?;
    client.set_work_location(location, &expiry).await?;

    println!("Work location set to: {}", location);
    Ok(())
}

/// Report availability/activity for this session's endpoint
pub async fn set_presence(availability: &str, activity: &str, duration: u32) -> Result<()> {
    let availability: Availability = availability.parse()?;
    let activity: Activity = activity.parse()?;
    let duration = PresenceDuration::from_minutes(duration)?;
    let client = client_from_config()?;
    client
        .set_presence(availability, activity, duration)
        .await
        .context("Failed to set endpoint presence")?;

    println!(
        "Presence set to: {} / {} for {} minutes",
        availability,
        activity,
        duration.minutes()
    );
    Ok(())
}

/// Show, set, or generate the session identifier
pub fn session(id: Option<String>, generate: bool) -> Result<()> {
    let mut config = Config::load()?;

    let new_id = match (id, generate) {
        (Some(id), _) => Some(id),
        (None, true) => Some(uuid::Uuid::new_v4().to_string()),
        (None, false) => None,
    };

    match new_id {
        Some(id) => {
            anyhow::ensure!(!id.is_empty(), "Session identifier must not be empty");
            tracing::info!("Storing session identifier");
            config.session_id = Some(id.clone());
            config.save()?;
            println!("Session identifier set to: {}", id);
        }
        None => match config.session_id.as_deref() {
            Some(id) => println!("Session identifier: {}", id),
            None => println!("No session identifier. Run 'teams-presence session --new'."),
        },
    }
    Ok(())
}
