//! Configuration and credential storage

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::client::ClientConfig;

/// Settings persisted between CLI invocations
#[derive(Default, Serialize, Deserialize)]
pub struct Config {
    /// Bearer token for presence.teams.microsoft.com (obtained externally)
    pub bearer_token: Option<String>,
    /// Session identifier of this device, required by `presence`
    pub session_id: Option<String>,
    /// Override for the presence API base URL
    pub base_url: Option<String>,
    /// Override for the User-Agent header
    pub user_agent: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get config directory path
    fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "teams-presence", "teams-presence")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;

        // Set restrictive permissions on config file (contains the token)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, perms).context("Failed to set config permissions")?;
        }

        Ok(())
    }

    /// Client settings from the stored values, falling back to defaults.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let token = self
            .bearer_token
            .clone()
            .filter(|t| !t.is_empty())
            .context("No bearer token. Run 'teams-presence login --token <TOKEN>' first.")?;

        let mut config = ClientConfig::new(token);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(session_id) = &self.session_id {
            config = config.with_session_id(session_id.clone());
        }
        Ok(config)
    }

    pub fn clear_credentials(&mut self) {
        self.bearer_token = None;
        self.session_id = None;
    }
}
