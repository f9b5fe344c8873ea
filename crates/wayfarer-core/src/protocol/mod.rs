//! Wire protocol for the itinerary streaming backend
//!
//! One outbound message per session (the trip request, sent as the body of
//! the streaming POST) and newline-delimited inbound frames tagged by a
//! `state` discriminant marking the backend agent's phase.

pub mod frame;
pub mod request;

pub use frame::{Activity, DayItinerary, Frame, TripSummary};
pub use request::{RequestError, TravelStyle, TripRequest};
