//! Credential commands
//!
//! The bearer token for presence.teams.microsoft.com is obtained outside
//! this tool (e.g. copied from a browser session) and stored in the config
//! file.

use anyhow::Result;

use crate::config::Config;

/// Store a bearer token
pub fn login(token: &str) -> Result<()> {
    let token = token.trim().trim_start_matches("Bearer ").trim();
    anyhow::ensure!(!token.is_empty(), "Bearer token must not be empty");

    let mut config = Config::load()?;
    config.bearer_token = Some(token.to_string());
    config.save()?;
    println!("Token saved.");
    Ok(())
}

/// Clear the stored token and session identifier
pub fn logout() -> Result<()> {
    let mut config = Config::load()?;
    config.clear_credentials();
    config.save()?;
    println!("Logged out.");
    Ok(())
}

/// Display stored credential status
pub fn status() -> Result<()> {
    let config = Config::load()?;

    match config.bearer_token.as_deref() {
        Some(t) if !t.is_empty() => println!("Bearer token: present"),
        _ => println!("Bearer token: none"),
    }
    match config.session_id.as_deref() {
        Some(id) => println!("Session id:   {}", id),
        None => println!("Session id:   none"),
    }
    println!(
        "Base URL:     {}",
        config
            .base_url
            .as_deref()
            .unwrap_or(crate::api::client::DEFAULT_BASE_URL)
    );
    println!("Config file:  {}", Config::config_path()?.display());
    Ok(())
}
