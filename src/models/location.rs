//! Work location values

use std::fmt;
use std::str::FromStr;

use crate::error::{PresenceError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkLocation {
    Remote,
    Office,
    /// Clears the location
    Reset,
}

impl WorkLocation {
    /// Integer code used in the `location` field of the request body.
    pub fn code(self) -> u8 {
        match self {
            WorkLocation::Remote => 2,
            WorkLocation::Office => 1,
            WorkLocation::Reset => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkLocation::Remote => "remote",
            WorkLocation::Office => "office",
            WorkLocation::Reset => "reset",
        }
    }
}

impl fmt::Display for WorkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkLocation {
    type Err = PresenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "remote" => Ok(WorkLocation::Remote),
            "office" => Ok(WorkLocation::Office),
            "reset" => Ok(WorkLocation::Reset),
            other => Err(PresenceError::invalid_argument(
                "location",
                other,
                "remote, office, reset",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_codes() {
        assert_eq!("remote".parse::<WorkLocation>().unwrap().code(), 2);
        assert_eq!("office".parse::<WorkLocation>().unwrap().code(), 1);
        assert_eq!("reset".parse::<WorkLocation>().unwrap().code(), 0);
    }

    #[test]
    fn test_location_invalid() {
        assert!("home".parse::<WorkLocation>().is_err());
        assert!("Remote".parse::<WorkLocation>().is_err());
        assert!("".parse::<WorkLocation>().is_err());
    }
}
