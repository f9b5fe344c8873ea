//! Progressive terminal rendering of itinerary snapshots
//!
//! Each update carries the whole snapshot; the renderer tracks what it has
//! already printed and emits only the new parts, so the itinerary builds up
//! on screen in arrival order.

use wayfarer_core::{DayItinerary, PlannerUpdate, StreamStatus, TripSummary};

pub struct Renderer {
    json: bool,
    summary_shown: bool,
    days_shown: usize,
    last_status_text: String,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            summary_shown: false,
            days_shown: 0,
            last_status_text: String::new(),
        }
    }

    pub fn render(&mut self, update: &PlannerUpdate) {
        if self.json {
            self.render_json(update);
            return;
        }

        if let Some(warning) = &update.warning {
            eprintln!("warning: {warning}");
        }

        if !self.summary_shown {
            if let Some(trip) = &update.snapshot.trip {
                print!("{}", format_summary(trip));
                self.summary_shown = true;
            }
        }

        for day in &update.snapshot.days[self.days_shown..] {
            print!("{}", format_day(day));
        }
        self.days_shown = update.snapshot.days.len();

        if !update.status.is_terminal()
            && !update.snapshot.status_text.is_empty()
            && update.snapshot.status_text != self.last_status_text
        {
            eprintln!("... {}", update.snapshot.status_text);
            self.last_status_text = update.snapshot.status_text.clone();
        }

        match update.status {
            StreamStatus::Complete => println!("\nItinerary complete."),
            StreamStatus::Interrupted => println!(
                "\nStream interrupted - showing the {} day(s) received.",
                update.snapshot.days.len()
            ),
            StreamStatus::Cancelled => println!("\nCancelled."),
            StreamStatus::Connecting | StreamStatus::Streaming => {}
        }
    }

    fn render_json(&self, update: &PlannerUpdate) {
        let line = serde_json::json!({
            "status": update.status,
            "warning": update.warning.as_ref().map(|w| w.to_string()),
            "snapshot": update.snapshot,
        });
        println!("{line}");
    }
}

fn format_summary(trip: &TripSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n=== {} ===\n", trip.title));
    out.push_str(&format!(
        "{} | {} - {} ({} days) | {} traveler(s) | {}\n",
        trip.destination_city,
        trip.start_date,
        trip.end_date,
        trip.duration_days,
        trip.travelers,
        trip.style
    ));
    if !trip.interests.is_empty() {
        out.push_str(&format!("Interests: {}\n", trip.interests.join(", ")));
    }
    out
}

fn format_day(day: &DayItinerary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\nDay {} - {} ({})\n",
        day.day, day.weekday, day.date
    ));
    for activity in &day.activities {
        out.push_str(&format!(
            "  {}  {} [{}]\n",
            activity.time, activity.title, activity.kind
        ));
        out.push_str(&format!("      at {}\n", activity.location));
        if !activity.description.is_empty() {
            out.push_str(&format!("      {}\n", activity.description));
        }
    }
    out
}
