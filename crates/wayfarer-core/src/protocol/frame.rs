//! Inbound stream frames
//!
//! Each line the backend pushes is one JSON object tagged by a `state`
//! discriminant marking the planning agent's phase. `START` and `RESPONSE`
//! carry structural payloads; `PLAN`/`TOOLS`/`OBSERVE` only update the
//! human-readable status text. Dates inside payloads stay display strings:
//! the backend generates them as text and the client never computes on them.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// One activity within a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub title: String,
    /// Activity category ("sightseeing", "dining", ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Time-range text as produced by the backend ("09:00 - 11:30")
    pub time: String,
    pub location: String,
    pub description: String,
}

/// One completed day of the itinerary, delivered whole by a RESPONSE frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayItinerary {
    /// 1-based day index; not guaranteed pre-sorted across frames
    pub day: u32,
    pub date: String,
    pub weekday: String,
    pub activities: Vec<Activity>,
}

/// Trip-level summary delivered once by the START frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSummary {
    pub title: String,
    pub travelers: u32,
    pub destination_city: String,
    pub start_date: String,
    pub end_date: String,
    pub duration_days: u32,
    pub style: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Frames pushed by the backend as the planning agent advances
///
/// Expected sequence: one START first, any number of status and RESPONSE
/// frames interleaved, one END last. The accumulator enforces the semantics;
/// this type only carries them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum Frame {
    #[serde(rename = "START")]
    Start {
        content: TripSummary,
        #[serde(default)]
        text: Option<String>,
    },

    #[serde(rename = "PLAN")]
    Plan {
        #[serde(default)]
        text: Option<String>,
    },

    #[serde(rename = "TOOLS")]
    Tools {
        #[serde(default)]
        text: Option<String>,
    },

    #[serde(rename = "OBSERVE")]
    Observe {
        #[serde(default)]
        text: Option<String>,
    },

    #[serde(rename = "RESPONSE")]
    Response {
        content: DayItinerary,
        #[serde(default)]
        text: Option<String>,
    },

    #[serde(rename = "END")]
    End,
}

const KNOWN_STATES: [&str; 6] = ["START", "PLAN", "TOOLS", "OBSERVE", "RESPONSE", "END"];

impl Frame {
    /// The wire discriminant, for logging
    pub fn state(&self) -> &'static str {
        match self {
            Self::Start { .. } => "START",
            Self::Plan { .. } => "PLAN",
            Self::Tools { .. } => "TOOLS",
            Self::Observe { .. } => "OBSERVE",
            Self::Response { .. } => "RESPONSE",
            Self::End => "END",
        }
    }

    /// Decode one line of the stream
    ///
    /// Distinguishes unparseable JSON, a missing discriminant, an unknown
    /// discriminant, and a known discriminant with a malformed payload —
    /// all of them non-fatal to the stream, but reported differently.
    pub fn decode(line: &str) -> Result<Frame, DecodeError> {
        let value: serde_json::Value =
            serde_json::from_str(line).map_err(DecodeError::Json)?;
        let state = value
            .get("state")
            .and_then(|s| s.as_str())
            .ok_or(DecodeError::MissingState)?
            .to_string();

        match serde_json::from_value::<Frame>(value) {
            Ok(frame) => Ok(frame),
            Err(source) if KNOWN_STATES.contains(&state.as_str()) => {
                Err(DecodeError::Payload { state, source })
            }
            Err(_) => Err(DecodeError::UnknownState(state)),
        }
    }
}
