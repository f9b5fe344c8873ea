//! Outbound trip request
//!
//! Field names follow the backend contract exactly (camelCase route fields,
//! snake_case style/interest fields — the backend is external and fixed).
//! The request is serialized once, immediately after the connection is
//! established, and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed set of travel styles the backend understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Luxury,
    Adventure,
    Budget,
    Cultural,
    Romantic,
    Family,
}

impl TravelStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Luxury => "luxury",
            Self::Adventure => "adventure",
            Self::Budget => "budget",
            Self::Cultural => "cultural",
            Self::Romantic => "romantic",
            Self::Family => "family",
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelStyle {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "luxury" => Ok(Self::Luxury),
            "adventure" => Ok(Self::Adventure),
            "budget" => Ok(Self::Budget),
            "cultural" => Ok(Self::Cultural),
            "romantic" => Ok(Self::Romantic),
            "family" => Ok(Self::Family),
            other => Err(RequestError::UnknownStyle(other.to_string())),
        }
    }
}

/// A trip request the backend would refuse or misinterpret
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("travelers must be at least 1")]
    NoTravelers,

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("unknown travel style {0:?}")]
    UnknownStyle(String),
}

/// The one outbound message of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    #[serde(rename = "startPoint")]
    pub start_point: String,

    /// Intermediate stops between start and destination, in visit order
    #[serde(rename = "midPoints")]
    pub waypoints: Vec<String>,

    pub destination: String,

    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,

    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,

    pub travelers: u32,

    pub travel_style: TravelStyle,

    pub special_interests: Vec<String>,
}

impl TripRequest {
    /// Check the invariants the backend assumes (non-empty route endpoints,
    /// end >= start, at least one traveler)
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.start_point.trim().is_empty() {
            return Err(RequestError::EmptyField {
                field: "startPoint",
            });
        }
        if self.destination.trim().is_empty() {
            return Err(RequestError::EmptyField {
                field: "destination",
            });
        }
        if self.travelers < 1 {
            return Err(RequestError::NoTravelers);
        }
        if self.end_date < self.start_date {
            return Err(RequestError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Trip length in calendar days, inclusive of both endpoints
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
