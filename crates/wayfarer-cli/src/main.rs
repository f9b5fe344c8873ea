//! Wayfarer CLI
//!
//! Builds a trip request from flags, opens a streaming session, and renders
//! the itinerary progressively as the backend produces it. Ctrl-C cancels
//! the session cleanly; whatever was already streamed stays on screen.

mod render;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wayfarer_core::{TravelStyle, TripPlanner, TripRequest};

const DEFAULT_ENDPOINT: &str = "http://localhost:8000/ws/stream";

#[derive(Parser)]
#[command(name = "wayfarer", version, about = "Streaming AI trip planner")]
struct Args {
    /// Starting point of the trip
    #[arg(long)]
    from: String,

    /// Final destination
    #[arg(long)]
    to: String,

    /// Intermediate stop; repeat for multiple waypoints, in visit order
    #[arg(long = "via")]
    via: Vec<String>,

    /// First day of the trip (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,

    /// Number of travelers
    #[arg(long, default_value_t = 1)]
    travelers: u32,

    /// Travel style: luxury, adventure, budget, cultural, romantic, family
    #[arg(long, default_value = "cultural")]
    style: TravelStyle,

    /// Special interest tag; repeat for multiple
    #[arg(long = "interest")]
    interests: Vec<String>,

    /// Backend stream endpoint (or set WAYFARER_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Emit each snapshot update as a JSON line instead of rendering
    #[arg(long)]
    json: bool,
}

impl Args {
    fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .or_else(|| std::env::var("WAYFARER_ENDPOINT").ok())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    fn to_request(&self) -> TripRequest {
        TripRequest {
            start_point: self.from.clone(),
            waypoints: self.via.clone(),
            destination: self.to.clone(),
            start_date: self.start,
            end_date: self.end,
            travelers: self.travelers,
            travel_style: self.style,
            special_interests: self.interests.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let endpoint = args.endpoint();
    let request = args.to_request();

    if !args.json {
        println!(
            "Planning {} -> {} ({} day(s), {} traveler(s), {} style)",
            request.start_point,
            request.destination,
            request.duration_days(),
            request.travelers,
            request.travel_style
        );
    }

    tracing::debug!(%endpoint, "resolved endpoint");
    let mut handle = TripPlanner::begin(&endpoint, request).await?;
    let mut renderer = render::Renderer::new(args.json);

    loop {
        let next = tokio::select! {
            _ = tokio::signal::ctrl_c() => None,
            update = handle.next_update() => Some(update),
        };
        match next {
            // One final Cancelled update follows, then the stream ends
            None => handle.cancel(),
            Some(Some(update)) => renderer.render(&update),
            Some(None) => break,
        }
    }

    Ok(())
}
