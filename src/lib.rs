pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use config::*;
pub use error::*;
pub use models::*;
pub use utils::*;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use utils::data::load_events_from_file;
use utils::parlay::{generate_parlays, top_parlays};
use utils::picks::{find_picks, parlay_legs};

/// Everything the dashboard shows for one odds snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PicksBoard {
    pub league: Option<League>,
    pub event_count: usize,
    pub picks: Vec<Leg>,
    pub parlays: Vec<Parlay>,
}

impl PicksBoard {
    pub fn picks_for(&self, league: League) -> Vec<Leg> {
        self.picks
            .iter()
            .filter(|leg| leg.league == league)
            .cloned()
            .collect()
    }

    pub fn positive_edge_picks(&self) -> usize {
        self.picks.iter().filter(|leg| leg.value_edge > 0.0).count()
    }
}

/// Build picks and the best parlays from an odds snapshot.
///
/// Only the strongest `max_parlay_input_legs` priced picks are combined, which
/// keeps parlay generation bounded no matter how many events the snapshot holds.
/// Zero-priced picks still show up in `picks` but never in a parlay.
pub fn build_picks_board(events: &[Event], config: &PicksConfig) -> Result<PicksBoard> {
    let picks = find_picks(events, config.league, None);

    let parlay_input = parlay_legs(&picks, config.max_parlay_input_legs);

    let parlays = generate_parlays(
        &parlay_input,
        config.min_parlay_legs,
        config.max_parlay_legs,
    )
    .context("Failed to generate parlays")?;
    let parlays = top_parlays(parlays, config.top_parlays);

    Ok(PicksBoard {
        league: config.league,
        event_count: events.len(),
        picks,
        parlays,
    })
}

/// Load the configured snapshot and build the board from it
pub fn load_picks_board(config: &PicksConfig) -> Result<PicksBoard> {
    let events = load_events_from_file(&config.events_file)?;
    info!(
        events = events.len(),
        file = %config.events_file.display(),
        "loaded odds snapshot"
    );
    build_picks_board(&events, config)
}
