use crate::error::PicksError;
use crate::models::{Event, EventSide, Leg, Parlay};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// One side of an event as it appears in an odds snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideRecord {
    pub name: String,
    #[serde(default)]
    pub model_odds: Option<i32>,
    #[serde(default)]
    pub book_odds: Option<i32>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// An event as it appears in an odds snapshot, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub league: String,
    pub side1: SideRecord,
    pub side2: SideRecord,
}

fn side_from_record(event_id: &str, label: &str, side: SideRecord) -> Result<EventSide, PicksError> {
    let missing = |kind: &str| PicksError::MissingOdds {
        event_id: event_id.to_string(),
        side: format!("{} {}", label, kind),
    };

    Ok(EventSide {
        model_odds: side.model_odds.ok_or_else(|| missing("model"))?,
        book_odds: side.book_odds.ok_or_else(|| missing("book"))?,
        name: side.name,
        picture: side.picture,
    })
}

impl TryFrom<EventRecord> for Event {
    type Error = PicksError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let league = record.league.parse()?;
        let side1 = side_from_record(&record.id, "side1", record.side1)?;
        let side2 = side_from_record(&record.id, "side2", record.side2)?;

        Ok(Event {
            id: record.id,
            name: record.name,
            date: record.date,
            league,
            side1,
            side2,
        })
    }
}

/// Parse an odds snapshot, skipping records that can't be priced
pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    let records: Vec<EventRecord> =
        serde_json::from_str(json).context("Failed to deserialize event data")?;

    let mut events = Vec::with_capacity(records.len());
    for record in records {
        let event_id = record.id.clone();
        match Event::try_from(record) {
            Ok(event) => events.push(event),
            Err(e) => warn!(event_id = %event_id, "skipping event: {}", e),
        }
    }

    Ok(events)
}

/// Load an odds snapshot from a JSON file
pub fn load_events_from_file(path: impl AsRef<Path>) -> Result<Vec<Event>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file {}", path.display()))?;
    parse_events(&json)
}

/// Save an odds snapshot to a JSON cache file
pub fn save_events_to_cache(records: &[EventRecord], cache_file: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to serialize event data")?;
    std::fs::write(cache_file, json).context("Failed to write cache file")?;
    Ok(())
}

/// Save picks to CSV
pub fn save_picks_to_csv(picks: &[Leg], filename: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(filename).context("Failed to create CSV file")?;

    writer.write_record([
        "League",
        "Event",
        "Date",
        "Pick",
        "Book Odds",
        "Model Odds",
        "Book Probability (%)",
        "Model Probability (%)",
        "Edge (%)",
        "Expected Value (%)",
    ])?;

    for pick in picks {
        writer.write_record([
            pick.league.to_string(),
            pick.event_name.clone(),
            pick.event_date.format("%Y-%m-%d").to_string(),
            pick.pick_name.clone(),
            pick.book_odds.to_string(),
            pick.model_odds.to_string(),
            format!("{:.1}", pick.book_probability * 100.0),
            format!("{:.1}", pick.model_probability * 100.0),
            format!("{:.2}", pick.value_edge * 100.0),
            format!("{:.2}", pick.expected_value() * 100.0),
        ])?;
    }

    writer.flush().context("Failed to write CSV file")?;
    Ok(())
}

/// Save parlays to CSV, one row per parlay
pub fn save_parlays_to_csv(parlays: &[Parlay], filename: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(filename).context("Failed to create CSV file")?;

    writer.write_record([
        "Legs",
        "Picks",
        "Book Odds",
        "Model Odds",
        "Book Probability (%)",
        "Model Probability (%)",
        "Edge (%)",
        "Expected Value (%)",
    ])?;

    for parlay in parlays {
        let picks: Vec<&str> = parlay.legs.iter().map(|l| l.pick_name.as_str()).collect();
        writer.write_record([
            parlay.len().to_string(),
            picks.join(" + "),
            parlay.total_book_odds.to_string(),
            parlay.total_model_odds.to_string(),
            format!("{:.2}", parlay.total_book_probability * 100.0),
            format!("{:.2}", parlay.total_model_probability * 100.0),
            format!("{:.2}", parlay.value_edge * 100.0),
            format!("{:.2}", parlay.expected_value() * 100.0),
        ])?;
    }

    writer.flush().context("Failed to write CSV file")?;
    Ok(())
}
