//! Trip planner facade
//!
//! Pairs a stream session with the accumulator so presentation code only
//! ever sees itinerary snapshots and a stream status — never wire frames.
//! One update per folded frame, in arrival order.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{SessionError, StreamWarning};
use crate::itinerary::ItinerarySnapshot;
use crate::protocol::TripRequest;
use crate::session::{ConnectionState, SessionEvent, StreamSession};

/// Where the snapshot stream stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamStatus {
    /// Connection being established
    Connecting,
    /// Frames still arriving
    Streaming,
    /// END folded; the itinerary is whole
    Complete,
    /// Connection ended before END; folded days remain valid
    Interrupted,
    /// Terminated locally via `cancel()`
    Cancelled,
}

impl StreamStatus {
    /// True once no further updates will follow
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Interrupted | Self::Cancelled)
    }
}

/// One snapshot delivered to the presentation layer
#[derive(Debug)]
pub struct PlannerUpdate {
    pub snapshot: ItinerarySnapshot,
    pub status: StreamStatus,
    /// Non-fatal problem observed while producing this update, if any
    pub warning: Option<StreamWarning>,
}

/// Entry point: `begin` a trip, consume updates, `cancel` when done
pub struct TripPlanner;

impl TripPlanner {
    /// Open a session for `request` and start streaming snapshot updates
    pub async fn begin(
        endpoint: &str,
        request: TripRequest,
    ) -> Result<PlannerHandle, SessionError> {
        let session = StreamSession::open(endpoint, &request).await?;
        let (tx, updates) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let pump_task = tokio::spawn(pump(session, tx, cancel.clone()));

        Ok(PlannerHandle {
            updates,
            cancel,
            pump_task,
        })
    }
}

/// Subscription to one trip's snapshot updates
#[derive(Debug)]
pub struct PlannerHandle {
    updates: mpsc::UnboundedReceiver<PlannerUpdate>,
    cancel: CancellationToken,
    pump_task: JoinHandle<()>,
}

impl PlannerHandle {
    /// Next update in order; `None` after a terminal status was delivered
    pub async fn next_update(&mut self) -> Option<PlannerUpdate> {
        self.updates.recv().await
    }

    /// Terminate the session. Idempotent; one final `Cancelled` update is
    /// delivered and nothing fires afterwards.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PlannerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.pump_task.abort();
    }
}

/// Folds session events into snapshots and forwards them as updates
async fn pump(
    mut session: StreamSession,
    tx: mpsc::UnboundedSender<PlannerUpdate>,
    cancel: CancellationToken,
) {
    let mut snapshot = ItinerarySnapshot::new();

    loop {
        // Biased so cancellation wins over any queued event; nothing but the
        // final Cancelled update is delivered after cancel()
        let event = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            event = session.next_event() => event,
        };

        let Some(event) = event else {
            if cancel.is_cancelled() {
                session.close();
                debug!("planner cancelled");
                let _ = tx.send(PlannerUpdate {
                    snapshot,
                    status: StreamStatus::Cancelled,
                    warning: None,
                });
            }
            return;
        };

        match event {
            SessionEvent::Frame(frame) => {
                let result = snapshot.fold(&frame);
                snapshot = result.snapshot;
                if let Some(violation) = &result.violation {
                    warn!(%violation, "protocol violation");
                }
                let status = if snapshot.complete {
                    StreamStatus::Complete
                } else {
                    StreamStatus::Streaming
                };
                let _ = tx.send(PlannerUpdate {
                    snapshot: snapshot.clone(),
                    status,
                    warning: result.violation.map(StreamWarning::Protocol),
                });
            }
            SessionEvent::Warning(warning) => {
                let status = if snapshot.complete {
                    StreamStatus::Complete
                } else {
                    StreamStatus::Streaming
                };
                let _ = tx.send(PlannerUpdate {
                    snapshot: snapshot.clone(),
                    status,
                    warning: Some(warning),
                });
            }
            SessionEvent::StateChange(state) => match state {
                ConnectionState::Connecting => {
                    let _ = tx.send(PlannerUpdate {
                        snapshot: snapshot.clone(),
                        status: StreamStatus::Connecting,
                        warning: None,
                    });
                }
                ConnectionState::Open => {
                    let _ = tx.send(PlannerUpdate {
                        snapshot: snapshot.clone(),
                        status: StreamStatus::Streaming,
                        warning: None,
                    });
                }
                ConnectionState::Closed | ConnectionState::Errored => {
                    // Terminal either way; what we already folded stays valid
                    let status = if snapshot.complete {
                        StreamStatus::Complete
                    } else {
                        warn!(?state, "stream ended before END frame");
                        StreamStatus::Interrupted
                    };
                    let _ = tx.send(PlannerUpdate {
                        snapshot,
                        status,
                        warning: None,
                    });
                    return;
                }
            },
        }
    }
}
