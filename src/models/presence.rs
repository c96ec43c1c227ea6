//! Availability and activity values accepted by the presence service

use std::fmt;
use std::str::FromStr;

use crate::error::{PresenceError, Result};

/// Coarse presence state shown to other users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    Available,
    Busy,
    DoNotDisturb,
    BeRightBack,
    Away,
    Offline,
}

impl Availability {
    pub const ALL: [Availability; 6] = [
        Availability::Available,
        Availability::Busy,
        Availability::DoNotDisturb,
        Availability::BeRightBack,
        Availability::Away,
        Availability::Offline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Busy => "Busy",
            Availability::DoNotDisturb => "DoNotDisturb",
            Availability::BeRightBack => "BeRightBack",
            Availability::Away => "Away",
            Availability::Offline => "Offline",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the exact wire spelling. `DoNotDistrub` is also accepted and
/// normalised to `DoNotDisturb`.
impl FromStr for Availability {
    type Err = PresenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Available" => Ok(Availability::Available),
            "Busy" => Ok(Availability::Busy),
            // Older clients send the misspelled form.
            "DoNotDisturb" | "DoNotDistrub" => Ok(Availability::DoNotDisturb),
            "BeRightBack" => Ok(Availability::BeRightBack),
            "Away" => Ok(Availability::Away),
            "Offline" => Ok(Availability::Offline),
            other => Err(PresenceError::invalid_argument(
                "availability",
                other,
                join(Availability::ALL.iter().map(|a| a.as_str())),
            )),
        }
    }
}

/// Fine-grained context paired with an availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    Available,
    InACall,
    InAConferenceCall,
    Away,
    Presenting,
}

impl Activity {
    pub const ALL: [Activity; 5] = [
        Activity::Available,
        Activity::InACall,
        Activity::InAConferenceCall,
        Activity::Away,
        Activity::Presenting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Available => "Available",
            Activity::InACall => "InACall",
            Activity::InAConferenceCall => "InAConferenceCall",
            Activity::Away => "Away",
            Activity::Presenting => "Presenting",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = PresenceError;

    fn from_str(s: &str) -> Result<Self> {
        Activity::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                PresenceError::invalid_argument(
                    "activity",
                    s,
                    join(Activity::ALL.iter().map(|a| a.as_str())),
                )
            })
    }
}

/// Activity sent alongside a forced `Offline` availability.
pub const OFFLINE_ACTIVITY: &str = "OffWork";

/// Pairs the endpoint presence call accepts.
pub const ALLOWED_COMBINATIONS: [(Availability, Activity); 5] = [
    (Availability::Available, Activity::Available),
    (Availability::Busy, Activity::InACall),
    (Availability::Busy, Activity::InAConferenceCall),
    (Availability::Away, Activity::Away),
    (Availability::DoNotDisturb, Activity::Presenting),
];

/// Check that an availability/activity pair is one the service accepts.
pub fn validate_combination(availability: Availability, activity: Activity) -> Result<()> {
    if ALLOWED_COMBINATIONS.contains(&(availability, activity)) {
        return Ok(());
    }
    Err(PresenceError::invalid_argument(
        "availability/activity combination",
        format!("{}/{}", availability, activity),
        join(
            ALLOWED_COMBINATIONS
                .iter()
                .map(|(av, ac)| format!("{}/{}", av, ac)),
        ),
    ))
}

fn join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(", ")
}
