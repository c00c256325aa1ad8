//! Time slots
//! 
//! A slot is the calendar window a job is scheduled into, written
//! `HH:MM - HH:MM`. Clients send slots with a plain hyphen or an en/em dash
//! and with or without spaces; all spellings of the same window compare equal.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Windows offered by the request forms
pub const STANDARD_SLOT_HOURS: [(u32, u32); 5] = [(8, 10), (10, 12), (12, 14), (14, 16), (16, 18)];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeSlotError {
    #[error("time slot '{0}' must look like 'HH:MM - HH:MM'")]
    Format(String),

    #[error("time slot '{0}' must end after it starts")]
    Order(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, TimeSlotError> {
        if start >= end {
            return Err(TimeSlotError::Order(format!(
                "{} - {}",
                start.format("%H:%M"),
                end.format("%H:%M")
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// The five two-hour windows between 08:00 and 18:00
    pub fn standard_slots() -> Vec<TimeSlot> {
        STANDARD_SLOT_HOURS
            .iter()
            .filter_map(|&(from, to)| {
                let start = NaiveTime::from_hms_opt(from, 0, 0)?;
                let end = NaiveTime::from_hms_opt(to, 0, 0)?;
                TimeSlot::new(start, end).ok()
            })
            .collect()
    }
}

impl FromStr for TimeSlot {
    type Err = TimeSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c| matches!(c, '-' | '–' | '—'))
            .map(str::trim)
            .collect();

        if parts.len() != 2 {
            return Err(TimeSlotError::Format(s.to_string()));
        }

        let start = NaiveTime::parse_from_str(parts[0], "%H:%M")
            .map_err(|_| TimeSlotError::Format(s.to_string()))?;
        let end = NaiveTime::parse_from_str(parts[1], "%H:%M")
            .map_err(|_| TimeSlotError::Format(s.to_string()))?;

        TimeSlot::new(start, end)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = TimeSlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_variants_are_the_same_slot() {
        let hyphen: TimeSlot = "10:00 - 12:00".parse().unwrap();
        let en_dash: TimeSlot = "10:00–12:00".parse().unwrap();
        let tight: TimeSlot = "10:00-12:00".parse().unwrap();

        assert_eq!(hyphen, en_dash);
        assert_eq!(hyphen, tight);
        assert_eq!(en_dash.to_string(), "10:00 - 12:00");
    }

    #[test]
    fn test_rejects_malformed_slots() {
        assert!(matches!("10:00".parse::<TimeSlot>(), Err(TimeSlotError::Format(_))));
        assert!(matches!("10 - 12".parse::<TimeSlot>(), Err(TimeSlotError::Format(_))));
        assert!(matches!("12:00 - 10:00".parse::<TimeSlot>(), Err(TimeSlotError::Order(_))));
        assert!(matches!("10:00 - 10:00".parse::<TimeSlot>(), Err(TimeSlotError::Order(_))));
    }

    #[test]
    fn test_standard_slots() {
        let slots = TimeSlot::standard_slots();
        assert_eq!(slots.len(), 5);
        assert_eq!(slots[0].to_string(), "08:00 - 10:00");
        assert_eq!(slots[4].to_string(), "16:00 - 18:00");
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let slot: TimeSlot = serde_json::from_str("\"14:00–16:00\"").unwrap();
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"14:00 - 16:00\"");
        assert!(serde_json::from_str::<TimeSlot>("\"later\"").is_err());
    }
}
