//! Teams presence CLI
//!
//! Set availability, notes, work location and endpoint presence on
//! Microsoft Teams from the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use teams_presence::{api, auth};

#[derive(Parser)]
#[command(name = "teams-presence")]
#[command(about = "Set and query Microsoft Teams presence", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the bearer token used for presence requests
    Login {
        /// Token for presence.teams.microsoft.com
        #[arg(short, long)]
        token: String,
    },

    /// Clear the stored token and session identifier
    Logout,

    /// Show stored credentials and settings
    Whoami,

    /// Show, set, or generate the session identifier
    Session {
        /// Session identifier to store
        #[arg(long, conflicts_with = "new")]
        id: Option<String>,

        /// Generate a new random session identifier
        #[arg(long)]
        new: bool,
    },

    /// Show current presence
    Status {
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Force availability: Available, Busy, DoNotDisturb, BeRightBack, Away, Offline
    Availability {
        value: String,

        /// Expiry timestamp (e.g. 2024-05-01T17:00:00.000Z)
        #[arg(long, conflicts_with = "minutes")]
        expiry: Option<String>,

        /// Expire after this many minutes
        #[arg(long)]
        minutes: Option<i64>,
    },

    /// Publish a status note
    Note {
        /// Note text
        text: String,

        /// Do not pin the note
        #[arg(long)]
        unpinned: bool,

        /// Expiry timestamp (e.g. 2024-05-01T17:00:00.000Z)
        #[arg(long, conflicts_with = "minutes")]
        expiry: Option<String>,

        /// Expire after this many minutes
        #[arg(long)]
        minutes: Option<i64>,
    },

    /// Set work location: remote, office, reset
    Location {
        value: String,

        /// Expiry timestamp (e.g. 2024-05-01T17:00:00.000Z)
        #[arg(long, conflicts_with = "minutes")]
        expiry: Option<String>,

        /// Expire after this many minutes
        #[arg(long)]
        minutes: Option<i64>,
    },

    /// Set availability and activity for this session's endpoint
    Presence {
        /// Available, Busy, Away, DoNotDisturb
        availability: String,

        /// Available, InACall, InAConferenceCall, Away, Presenting
        activity: String,

        /// Duration in minutes (1-240)
        #[arg(short, long, default_value = "240")]
        duration: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Login { token } => {
            auth::login(&token)?;
        }
        Commands::Logout => {
            tracing::info!("Logging out...");
            auth::logout()?;
        }
        Commands::Whoami => {
            auth::status()?;
        }
        Commands::Session { id, new } => {
            api::session(id, new)?;
        }
        Commands::Status { json } => {
            api::get_status(json).await?;
        }
        Commands::Availability {
            value,
            expiry,
            minutes,
        } => {
            let expiry = api::resolve_expiry(expiry.as_deref(), minutes)?;
            tracing::info!("Forcing availability to {}...", value);
            api::set_availability(&value, expiry).await?;
        }
        Commands::Note {
            text,
            unpinned,
            expiry,
            minutes,
        } => {
            let expiry = api::resolve_expiry(expiry.as_deref(), minutes)?;
            tracing::info!("Publishing note...");
            api::set_note(&text, !unpinned, expiry).await?;
        }
        Commands::Location {
            value,
            expiry,
            minutes,
        } => {
            let expiry = api::resolve_expiry(expiry.as_deref(), minutes)?;
            tracing::info!("Setting work location to {}...", value);
            api::set_location(&value, expiry).await?;
        }
        Commands::Presence {
            availability,
            activity,
            duration,
        } => {
            tracing::info!("Setting presence to {} / {}...", availability, activity);
            api::set_presence(&availability, &activity, duration).await?;
        }
    }

    Ok(())
}
