//! Itinerary accumulator
//!
//! A deterministic fold from one frame to the next snapshot. All protocol
//! semantics live here; the session never looks past the discriminant, which
//! is what keeps this testable without a live connection.
//!
//! Invariants enforced by the fold:
//! - the trip summary, once set, never changes;
//! - the day sequence is append-only, in arrival order (generation order —
//!   never re-sorted by day index);
//! - `complete` only ever goes false -> true.

use serde::Serialize;

use crate::error::ProtocolViolation;
use crate::protocol::{DayItinerary, Frame, TripSummary};

/// Complete observable state of an in-progress itinerary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItinerarySnapshot {
    /// Trip-level summary; absent until the START frame arrives
    pub trip: Option<TripSummary>,
    /// Completed days in arrival order
    pub days: Vec<DayItinerary>,
    /// Latest status text from the backend ("thinking" display)
    pub status_text: String,
    /// True once END has been folded; never reverts
    pub complete: bool,
}

/// Outcome of folding one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldResult {
    pub snapshot: ItinerarySnapshot,
    /// Sequence problem observed while folding, if any; the snapshot is
    /// still valid either way
    pub violation: Option<ProtocolViolation>,
}

impl ItinerarySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame into a new snapshot
    ///
    /// Pure: no I/O, no clock, no hidden state. The same `(self, frame)`
    /// pair always yields the same result.
    pub fn fold(&self, frame: &Frame) -> FoldResult {
        let mut next = self.clone();
        let mut violation = None;

        match frame {
            Frame::Start { content, text } => {
                if next.trip.is_some() {
                    // A reconnect replay must not corrupt the in-progress view
                    violation = Some(ProtocolViolation::DuplicateStart);
                } else {
                    next.trip = Some(content.clone());
                    next.status_text = text.clone().unwrap_or_default();
                }
            }
            Frame::Plan { text } | Frame::Tools { text } | Frame::Observe { text } => {
                next.status_text = text.clone().unwrap_or_default();
            }
            Frame::Response { content, text } => {
                if next.complete {
                    violation = Some(ProtocolViolation::ResponseAfterEnd { day: content.day });
                } else {
                    next.days.push(content.clone());
                    next.status_text = text.clone().unwrap_or_default();
                }
            }
            Frame::End => {
                if next.complete {
                    violation = Some(ProtocolViolation::DuplicateEnd);
                }
                next.complete = true;
            }
        }

        FoldResult { snapshot: next, violation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Activity;

    fn summary() -> TripSummary {
        TripSummary {
            title: "Roman Holiday".to_string(),
            travelers: 2,
            destination_city: "Rome".to_string(),
            start_date: "2026-09-04".to_string(),
            end_date: "2026-09-06".to_string(),
            duration_days: 3,
            style: "cultural".to_string(),
            interests: vec!["History".to_string()],
        }
    }

    fn day(n: u32) -> DayItinerary {
        DayItinerary {
            day: n,
            date: format!("2026-09-0{}", 3 + n),
            weekday: "Friday".to_string(),
            activities: vec![Activity {
                title: format!("Walk {n}"),
                kind: "sightseeing".to_string(),
                time: "09:00 - 11:00".to_string(),
                location: "Old town".to_string(),
                description: "A slow morning walk.".to_string(),
            }],
        }
    }

    fn start_frame() -> Frame {
        Frame::Start {
            content: summary(),
            text: Some("Planning your trip".to_string()),
        }
    }

    fn response_frame(n: u32) -> Frame {
        Frame::Response {
            content: day(n),
            text: Some(format!("Day {n} ready")),
        }
    }

    fn fold_all(frames: &[Frame]) -> ItinerarySnapshot {
        frames
            .iter()
            .fold(ItinerarySnapshot::new(), |snap, frame| snap.fold(frame).snapshot)
    }

    #[test]
    fn test_start_sets_summary_and_text() {
        let result = ItinerarySnapshot::new().fold(&start_frame());
        assert!(result.violation.is_none());
        assert_eq!(result.snapshot.trip.as_ref().unwrap().title, "Roman Holiday");
        assert_eq!(result.snapshot.status_text, "Planning your trip");
        assert!(!result.snapshot.complete);
    }

    #[test]
    fn test_status_frames_only_replace_text() {
        let snap = fold_all(&[start_frame(), response_frame(1)]);
        let result = snap.fold(&Frame::Tools {
            text: Some("calling weather tool".to_string()),
        });
        assert_eq!(result.snapshot.status_text, "calling weather tool");
        assert_eq!(result.snapshot.days, snap.days);
        assert_eq!(result.snapshot.trip, snap.trip);
    }

    #[test]
    fn test_status_frame_without_text_clears_display() {
        let snap = fold_all(&[start_frame()]);
        let result = snap.fold(&Frame::Plan { text: None });
        assert_eq!(result.snapshot.status_text, "");
    }

    #[test]
    fn test_days_append_in_arrival_order_not_day_order() {
        // A malformed stream may deliver days out of order; arrival order wins
        let snap = fold_all(&[start_frame(), response_frame(2), response_frame(1)]);
        let days: Vec<u32> = snap.days.iter().map(|d| d.day).collect();
        assert_eq!(days, vec![2, 1]);
    }

    #[test]
    fn test_day_count_equals_response_count() {
        let snap = fold_all(&[
            start_frame(),
            Frame::Plan { text: None },
            response_frame(1),
            Frame::Observe { text: None },
            response_frame(2),
        ]);
        assert_eq!(snap.days.len(), 2);
    }

    #[test]
    fn test_no_start_means_no_summary() {
        let snap = fold_all(&[
            Frame::Plan {
                text: Some("thinking".to_string()),
            },
            response_frame(1),
            Frame::End,
        ]);
        assert!(snap.trip.is_none());
        assert_eq!(snap.days.len(), 1);
        assert!(snap.complete);
    }

    #[test]
    fn test_duplicate_start_reported_and_ignored() {
        let snap = fold_all(&[start_frame()]);
        let second = Frame::Start {
            content: TripSummary {
                title: "Impostor".to_string(),
                ..summary()
            },
            text: Some("replayed".to_string()),
        };
        let result = snap.fold(&second);
        assert_eq!(result.violation, Some(ProtocolViolation::DuplicateStart));
        assert_eq!(result.snapshot.trip.as_ref().unwrap().title, "Roman Holiday");
        assert_eq!(result.snapshot.status_text, snap.status_text);
    }

    #[test]
    fn test_complete_is_monotonic() {
        let snap = fold_all(&[start_frame(), Frame::End]);
        assert!(snap.complete);
        // Nothing folded afterwards can revert it
        for frame in [
            Frame::Plan { text: None },
            Frame::End,
            response_frame(9),
        ] {
            assert!(snap.fold(&frame).snapshot.complete);
        }
    }

    #[test]
    fn test_response_after_end_reported_not_appended() {
        let snap = fold_all(&[start_frame(), response_frame(1), Frame::End]);
        let result = snap.fold(&response_frame(2));
        assert_eq!(
            result.violation,
            Some(ProtocolViolation::ResponseAfterEnd { day: 2 })
        );
        assert_eq!(result.snapshot.days.len(), 1);
    }

    #[test]
    fn test_duplicate_end_reported() {
        let snap = fold_all(&[start_frame(), Frame::End]);
        let result = snap.fold(&Frame::End);
        assert_eq!(result.violation, Some(ProtocolViolation::DuplicateEnd));
        assert!(result.snapshot.complete);
    }

    #[test]
    fn test_fold_is_deterministic() {
        let snap = fold_all(&[start_frame(), response_frame(1)]);
        let frame = response_frame(2);
        assert_eq!(snap.fold(&frame), snap.fold(&frame));
    }

    #[test]
    fn test_full_sequence_paris_to_rome() {
        let snap = fold_all(&[
            start_frame(),
            Frame::Plan {
                text: Some("thinking".to_string()),
            },
            response_frame(1),
            response_frame(2),
            response_frame(3),
            Frame::End,
        ]);
        assert!(snap.trip.is_some());
        let days: Vec<u32> = snap.days.iter().map(|d| d.day).collect();
        assert_eq!(days, vec![1, 2, 3]);
        assert!(snap.complete);
        assert_eq!(snap.status_text, "Day 3 ready");
    }
}
