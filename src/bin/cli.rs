use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parlay_picks::data::{load_events_from_file, save_parlays_to_csv, save_picks_to_csv};
use parlay_picks::odds_calculator::{american_to_decimal, implied_probability};
use parlay_picks::parlay::{generate_parlays, top_parlays};
use parlay_picks::picks::{find_picks, parlay_legs};
use parlay_picks::{League, PicksConfig};
use std::path::PathBuf;

/// Model picks and parlay builder for UFC, NFL, NBA and ATP odds snapshots
#[derive(Parser, Debug)]
#[command(name = "parlay-picks")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert American odds to implied probability and decimal odds
    Odds {
        /// American odds, e.g. -150 or 120
        #[arg(allow_hyphen_values = true)]
        odds: i32,
    },

    /// List the model's favored side for each event
    Picks {
        #[command(flatten)]
        source: SourceArgs,

        /// Only show the top N picks
        #[arg(long)]
        top: Option<usize>,
    },

    /// Build parlays from the strongest picks
    Parlays {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long)]
        min_legs: Option<usize>,

        #[arg(long)]
        max_legs: Option<usize>,

        /// Only show the top N parlays
        #[arg(long)]
        top: Option<usize>,
    },
}

#[derive(clap::Args, Debug)]
struct SourceArgs {
    /// Odds snapshot (defaults to EVENTS_FILE)
    #[arg(long)]
    events: Option<PathBuf>,

    /// Restrict to one league (ufc, nfl, nba, atp)
    #[arg(long)]
    league: Option<League>,
}

impl SourceArgs {
    fn apply(&self, config: &mut PicksConfig) {
        if let Some(events) = &self.events {
            config.events_file = events.clone();
        }
        if self.league.is_some() {
            config.league = self.league;
        }
    }
}

fn run_odds(odds: i32) -> Result<()> {
    println!("American odds:       {:+}", odds);
    println!("Implied probability: {:.2}%", implied_probability(odds) * 100.0);
    match american_to_decimal(odds) {
        Ok(decimal) => println!("Decimal odds:        {:.3}", decimal),
        Err(e) => println!("Decimal odds:        n/a ({})", e),
    }
    Ok(())
}

fn run_picks(config: &PicksConfig, top: Option<usize>) -> Result<()> {
    let events = load_events_from_file(&config.events_file)?;
    let picks = find_picks(&events, config.league, top);

    if picks.is_empty() {
        println!("No picks found.");
        return Ok(());
    }

    println!("Top {} Picks:\n", picks.len());
    for (i, pick) in picks.iter().enumerate() {
        println!("{}. {}", i + 1, pick.format());
    }

    if config.save_csv {
        save_picks_to_csv(&picks, "cache/picks.csv")?;
        println!("\nSaved picks to cache/picks.csv");
    }

    Ok(())
}

fn run_parlays(config: &PicksConfig) -> Result<()> {
    let events = load_events_from_file(&config.events_file)?;
    let picks = parlay_legs(
        &find_picks(&events, config.league, None),
        config.max_parlay_input_legs,
    );

    let parlays = generate_parlays(&picks, config.min_parlay_legs, config.max_parlay_legs)
        .context("Failed to generate parlays")?;
    let total = parlays.len();
    let parlays = top_parlays(parlays, config.top_parlays);

    if parlays.is_empty() {
        println!(
            "No parlays found ({} picks, {}-{} legs).",
            picks.len(),
            config.min_parlay_legs,
            config.max_parlay_legs
        );
        return Ok(());
    }

    println!(
        "Top {} of {} Parlays from {} picks:\n",
        parlays.len(),
        total,
        picks.len()
    );
    for (i, parlay) in parlays.iter().enumerate() {
        println!("{}. {}", i + 1, parlay.format());
    }

    if config.save_csv {
        save_parlays_to_csv(&parlays, "cache/parlays.csv")?;
        println!("\nSaved parlays to cache/parlays.csv");
    }

    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = PicksConfig::from_env()?;

    match cli.command {
        Commands::Odds { odds } => run_odds(odds),
        Commands::Picks { source, top } => {
            source.apply(&mut config);
            run_picks(&config, top)
        }
        Commands::Parlays {
            source,
            min_legs,
            max_legs,
            top,
        } => {
            source.apply(&mut config);
            if let Some(min_legs) = min_legs {
                config.min_parlay_legs = min_legs;
            }
            if let Some(max_legs) = max_legs {
                config.max_parlay_legs = max_legs;
            }
            if let Some(top) = top {
                config.top_parlays = top;
            }
            config.validate()?;
            run_parlays(&config)
        }
    }
}
