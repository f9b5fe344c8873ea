//! Itinerary state accumulation
//!
//! The pure half of the client: folding inbound frames into a renderable
//! snapshot, with no connection in sight.

pub mod accumulator;

pub use accumulator::{FoldResult, ItinerarySnapshot};
