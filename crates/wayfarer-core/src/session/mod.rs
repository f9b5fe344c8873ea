//! Stream session
//!
//! Owns one connection's lifecycle: connect, transmit the trip request once
//! (it is the body of the streaming POST), then deliver decoded frames in
//! strict arrival order until the peer finishes or the transport fails.
//! No business logic — frame semantics belong to the accumulator.
//!
//! There is no automatic reconnection. A stream dropped mid-itinerary is
//! terminal for this session; recovery is a fresh `open()` with the same
//! request, at the caller's discretion.

mod reader;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{SessionError, StreamWarning};
use crate::protocol::{Frame, TripRequest};
use reader::FrameReader;

/// Connection lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    /// Peer finished cleanly (with or without an END frame)
    Closed,
    /// Transport failed mid-stream
    Errored,
}

/// Events delivered by the session, in strict arrival order
#[derive(Debug)]
pub enum SessionEvent {
    Frame(Frame),
    StateChange(ConnectionState),
    /// Undecodable frame dropped; the stream continues
    Warning(StreamWarning),
}

/// Handle to one open streaming session
///
/// Dropping the handle closes the connection; nothing leaks if the host
/// tears down mid-stream.
pub struct StreamSession {
    events: mpsc::UnboundedReceiver<SessionEvent>,
    cancel: CancellationToken,
    read_task: JoinHandle<()>,
}

impl StreamSession {
    /// Connect to `endpoint`, transmit `request`, and start the read loop
    ///
    /// The request is validated and sent exactly once, as the session's first
    /// obligation. Returns once the backend has accepted the stream.
    pub async fn open(endpoint: &str, request: &TripRequest) -> Result<Self, SessionError> {
        request.validate()?;
        let url = Url::parse(endpoint).map_err(|source| SessionError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let (tx, events) = mpsc::unbounded_channel();
        let _ = tx.send(SessionEvent::StateChange(ConnectionState::Connecting));

        debug!(%url, "opening stream session");
        let response = reqwest::Client::new()
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(|source| SessionError::Connect {
                endpoint: endpoint.to_string(),
                source,
            })?;
        if !response.status().is_success() {
            return Err(SessionError::Rejected {
                status: response.status(),
            });
        }
        info!(%url, "stream open, trip request sent");
        let _ = tx.send(SessionEvent::StateChange(ConnectionState::Open));

        let cancel = CancellationToken::new();
        let read_task = tokio::spawn(read_loop(response, tx, cancel.clone()));

        Ok(Self {
            events,
            cancel,
            read_task,
        })
    }

    /// Next event in arrival order; `None` after the terminal state change
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Terminate the connection. Idempotent; the read loop emits one final
    /// `Closed` transition and nothing after it.
    pub fn close(&self) {
        self.cancel.cancel();
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.read_task.abort();
    }
}

/// Single control loop: reads chunks, reassembles frames, delivers in order
async fn read_loop(
    response: reqwest::Response,
    tx: mpsc::UnboundedSender<SessionEvent>,
    cancel: CancellationToken,
) {
    let mut stream = response.bytes_stream();
    let mut reader = FrameReader::new();
    let mut saw_end = false;

    loop {
        let chunk = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("session closed locally");
                let _ = tx.send(SessionEvent::StateChange(ConnectionState::Closed));
                return;
            }
            chunk = stream.next() => chunk,
        };

        match chunk {
            Some(Ok(bytes)) => {
                for line in reader.push(&bytes) {
                    deliver_line(&line, &tx, &mut saw_end);
                }
            }
            Some(Err(error)) => {
                warn!(%error, "stream transport failed");
                let _ = tx.send(SessionEvent::StateChange(ConnectionState::Errored));
                return;
            }
            None => {
                if let Some(line) = reader.finish() {
                    deliver_line(&line, &tx, &mut saw_end);
                }
                if saw_end {
                    debug!("stream finished after END frame");
                } else {
                    warn!("peer closed stream before END frame");
                }
                let _ = tx.send(SessionEvent::StateChange(ConnectionState::Closed));
                return;
            }
        }
    }
}

fn deliver_line(line: &str, tx: &mpsc::UnboundedSender<SessionEvent>, saw_end: &mut bool) {
    match Frame::decode(line) {
        Ok(frame) => {
            debug!(state = frame.state(), "frame received");
            if matches!(frame, Frame::End) {
                *saw_end = true;
            }
            let _ = tx.send(SessionEvent::Frame(frame));
        }
        Err(error) => {
            warn!(%error, "dropping undecodable frame");
            let _ = tx.send(SessionEvent::Warning(StreamWarning::Decode(error)));
        }
    }
}
