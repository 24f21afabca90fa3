use crate::error::PicksError;
use crate::utils::odds_calculator::calculate_expected_value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leagues the model publishes picks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Ufc,
    Nfl,
    Nba,
    Atp,
}

impl League {
    pub const ALL: [League; 4] = [League::Ufc, League::Nfl, League::Nba, League::Atp];

    pub fn as_str(&self) -> &'static str {
        match self {
            League::Ufc => "ufc",
            League::Nfl => "nfl",
            League::Nba => "nba",
            League::Atp => "atp",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl FromStr for League {
    type Err = PicksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ufc" => Ok(League::Ufc),
            "nfl" => Ok(League::Nfl),
            "nba" => Ok(League::Nba),
            "atp" => Ok(League::Atp),
            _ => Err(PicksError::UnknownLeague(s.to_string())),
        }
    }
}

/// One side of an event (a fighter, a team, a player)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSide {
    pub name: String,
    pub model_odds: i32, // American odds set by the predictive model
    pub book_odds: i32,  // American odds quoted by the sportsbook
    pub picture: Option<String>,
}

/// A two-sided event with model and book prices for both sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub league: League,
    pub side1: EventSide,
    pub side2: EventSide,
}

/// The favored side of one event, ready to be placed in a parlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub event_id: String,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub pick_name: String,
    pub model_odds: i32,
    pub model_probability: f64,
    pub book_odds: i32,
    pub book_probability: f64,
    pub value_edge: f64, // model_probability - book_probability
    pub league: League,
    pub picture: Option<String>,
}

impl Leg {
    /// Expected profit per unit staked at the book's price, using the model probability
    pub fn expected_value(&self) -> f64 {
        calculate_expected_value(self.model_probability, self.book_odds)
    }

    pub fn format(&self) -> String {
        format!(
            "[{}] {} | Pick: {} | Book: {:+} ({:.1}%) | Model: {:+} ({:.1}%) | Edge: {:+.2}% | EV: {:+.2}%",
            self.league,
            self.event_name,
            self.pick_name,
            self.book_odds,
            self.book_probability * 100.0,
            self.model_odds,
            self.model_probability * 100.0,
            self.value_edge * 100.0,
            self.expected_value() * 100.0
        )
    }
}

/// Several legs combined into a single all-or-nothing bet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parlay {
    pub legs: Vec<Leg>,
    pub total_book_odds: i32,
    pub total_model_odds: i32,
    pub total_book_probability: f64,
    pub total_model_probability: f64,
    pub value_edge: f64,
}

impl Parlay {
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn event_ids(&self) -> Vec<&str> {
        self.legs.iter().map(|leg| leg.event_id.as_str()).collect()
    }

    /// Expected profit per unit staked at the compounded book price
    pub fn expected_value(&self) -> f64 {
        calculate_expected_value(self.total_model_probability, self.total_book_odds)
    }

    pub fn format(&self) -> String {
        let picks: Vec<&str> = self.legs.iter().map(|leg| leg.pick_name.as_str()).collect();
        format!(
            "{}-leg: {} | Book: {:+} ({:.2}%) | Model: {:+} ({:.2}%) | Edge: {:+.2}% | EV: {:+.2}%",
            self.len(),
            picks.join(" + "),
            self.total_book_odds,
            self.total_book_probability * 100.0,
            self.total_model_odds,
            self.total_model_probability * 100.0,
            self.value_edge * 100.0,
            self.expected_value() * 100.0
        )
    }
}
