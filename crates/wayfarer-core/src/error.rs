//! Error taxonomy for the streaming client
//!
//! Three tiers: `SessionError` is fatal to the session (the connection never
//! existed or the request was rejected), `StreamWarning` covers everything
//! reported out-of-band while the stream keeps going, and the decode/protocol
//! enums under it name the specific problem. A lost connection mid-stream is
//! terminal for the session but never invalidates already-folded state.

use thiserror::Error;

/// Fatal failures establishing a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered but refused to stream
    #[error("backend rejected the trip request: HTTP {status}")]
    Rejected { status: reqwest::StatusCode },

    #[error(transparent)]
    Request(#[from] crate::protocol::RequestError),
}

/// Non-fatal problems reported alongside the stream
///
/// Warnings never stop frame delivery or the fold; they exist so the caller
/// can surface them without losing accumulated state.
#[derive(Debug, Error)]
pub enum StreamWarning {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),
}

/// A frame that could not be turned into a known `Frame`
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("frame has no `state` discriminant")]
    MissingState,

    /// Discriminant the client does not know; the frame is skipped
    #[error("unknown frame state {0:?}")]
    UnknownState(String),

    /// Known discriminant whose payload does not match its expected shape
    #[error("malformed {state} payload: {source}")]
    Payload {
        state: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A frame sequence the protocol does not allow
///
/// Violations are reported, not fatal: whatever was folded before the bad
/// frame stays visible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// A second START would overwrite the trip summary; it is ignored instead
    #[error("duplicate START frame; keeping the original trip summary")]
    DuplicateStart,

    #[error("RESPONSE frame for day {day} arrived after END")]
    ResponseAfterEnd { day: u32 },

    #[error("duplicate END frame")]
    DuplicateEnd,
}
