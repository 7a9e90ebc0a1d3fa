use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("Hour must be between 00 and 23, got {0}")]
    Hour(u8),
    #[error("Minute must be between 00 and 59, got {0}")]
    Minute(u8),
    #[error("Second must be between 00 and 59, got {0}")]
    Second(u8),
    #[error("Invalid clock value '{0}' (expected HH:MM:SS)")]
    Format(String),
}

/// A fully selected wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ClockError> {
        if hour > 23 {
            return Err(ClockError::Hour(hour));
        }
        if minute > 59 {
            return Err(ClockError::Minute(minute));
        }
        if second > 59 {
            return Err(ClockError::Second(second));
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for ClockTime {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || ClockError::Format(s.to_string());
        let parts: Vec<&str> = s.trim().split(':').collect();
        let [h, m, sec] = parts.as_slice() else {
            return Err(format_err());
        };
        let field = |part: &str| -> Result<u8, ClockError> {
            if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format_err());
            }
            part.parse::<u8>().map_err(|_| format_err())
        };
        ClockTime::new(field(*h)?, field(*m)?, field(*sec)?)
    }
}

/// Hour/minute/second dropdown selections, each possibly unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockSelection {
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
}

impl ClockSelection {
    pub fn set(&mut self, time: ClockTime) {
        self.hour = Some(time.hour);
        self.minute = Some(time.minute);
        self.second = Some(time.second);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// `HH:MM:SS` when all three parts are selected, otherwise `""`.
    pub fn timestamp(&self) -> String {
        match (self.hour, self.minute, self.second) {
            (Some(h), Some(m), Some(s)) => format!("{:02}:{:02}:{:02}", h, m, s),
            _ => String::new(),
        }
    }
}
