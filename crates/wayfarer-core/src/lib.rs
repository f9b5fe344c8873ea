//! Wayfarer core
//!
//! Client for a streaming trip-itinerary backend. Three pieces:
//!
//! - [`session`]: owns one persistent connection — send the trip request
//!   once, deliver phase-tagged frames in strict arrival order.
//! - [`itinerary`]: a pure fold from frames to a renderable snapshot; all
//!   protocol semantics live here, testable without a connection.
//! - [`planner`]: the facade presentation code talks to — begin a trip,
//!   receive snapshot updates, cancel.

pub mod error;
pub mod itinerary;
pub mod planner;
pub mod protocol;
pub mod session;

pub use error::{DecodeError, ProtocolViolation, SessionError, StreamWarning};
pub use itinerary::{FoldResult, ItinerarySnapshot};
pub use planner::{PlannerHandle, PlannerUpdate, StreamStatus, TripPlanner};
pub use protocol::{
    Activity, DayItinerary, Frame, RequestError, TravelStyle, TripRequest, TripSummary,
};
pub use session::{ConnectionState, SessionEvent, StreamSession};
