use crate::models::League;
use crate::utils::parlay::{DEFAULT_MAX_LEGS, DEFAULT_MIN_LEGS};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_EVENTS_FILE: &str = "cache/events.json";
pub const DEFAULT_MAX_PARLAY_INPUT_LEGS: usize = 12;
/// Most picks parlay generation may combine at once
pub const MAX_PARLAY_INPUT_LEGS_LIMIT: usize = 15;
pub const DEFAULT_TOP_PARLAYS: usize = 25;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Settings for building picks and parlays, passed explicitly to whatever needs them
#[derive(Debug, Clone, PartialEq)]
pub struct PicksConfig {
    pub events_file: PathBuf,
    pub league: Option<League>,
    pub min_parlay_legs: usize,
    pub max_parlay_legs: usize,
    /// Upper bound on how many picks are fed into parlay generation
    pub max_parlay_input_legs: usize,
    pub top_parlays: usize,
    pub bind_addr: String,
    pub save_csv: bool,
}

impl Default for PicksConfig {
    fn default() -> Self {
        Self {
            events_file: PathBuf::from(DEFAULT_EVENTS_FILE),
            league: None,
            min_parlay_legs: DEFAULT_MIN_LEGS,
            max_parlay_legs: DEFAULT_MAX_LEGS,
            max_parlay_input_legs: DEFAULT_MAX_PARLAY_INPUT_LEGS,
            top_parlays: DEFAULT_TOP_PARLAYS,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            save_csv: false,
        }
    }
}

fn parse_var<T>(name: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", name, raw)),
        None => Ok(default),
    }
}

impl PicksConfig {
    /// Load from the process environment (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset variables fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let league = match lookup("LEAGUE").filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(raw.parse::<League>().context("Invalid value for LEAGUE")?),
            None => None,
        };

        let config = Self {
            events_file: lookup("EVENTS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.events_file),
            league,
            min_parlay_legs: parse_var(
                "MIN_PARLAY_LEGS",
                lookup("MIN_PARLAY_LEGS"),
                defaults.min_parlay_legs,
            )?,
            max_parlay_legs: parse_var(
                "MAX_PARLAY_LEGS",
                lookup("MAX_PARLAY_LEGS"),
                defaults.max_parlay_legs,
            )?,
            max_parlay_input_legs: parse_var(
                "MAX_PARLAY_INPUT_LEGS",
                lookup("MAX_PARLAY_INPUT_LEGS"),
                defaults.max_parlay_input_legs,
            )?,
            top_parlays: parse_var("TOP_PARLAYS", lookup("TOP_PARLAYS"), defaults.top_parlays)?,
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            save_csv: lookup("SAVE_CSV").unwrap_or_default() == "1",
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_parlay_legs > self.max_parlay_legs {
            bail!(
                "MIN_PARLAY_LEGS ({}) is greater than MAX_PARLAY_LEGS ({})",
                self.min_parlay_legs,
                self.max_parlay_legs
            );
        }
        if self.max_parlay_input_legs > MAX_PARLAY_INPUT_LEGS_LIMIT {
            bail!(
                "MAX_PARLAY_INPUT_LEGS ({}) is above the limit of {}",
                self.max_parlay_input_legs,
                MAX_PARLAY_INPUT_LEGS_LIMIT
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = PicksConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, PicksConfig::default());
        assert_eq!(config.min_parlay_legs, 2);
        assert_eq!(config.max_parlay_legs, 10);
        assert!(!config.save_csv);
    }

    #[test]
    fn test_overrides() {
        let config = PicksConfig::from_lookup(lookup_from(&[
            ("EVENTS_FILE", "/tmp/odds.json"),
            ("LEAGUE", "ufc"),
            ("MIN_PARLAY_LEGS", "3"),
            ("MAX_PARLAY_LEGS", " 4 "),
            ("MAX_PARLAY_INPUT_LEGS", "8"),
            ("TOP_PARLAYS", "5"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("SAVE_CSV", "1"),
        ]))
        .unwrap();

        assert_eq!(config.events_file, PathBuf::from("/tmp/odds.json"));
        assert_eq!(config.league, Some(League::Ufc));
        assert_eq!(config.min_parlay_legs, 3);
        assert_eq!(config.max_parlay_legs, 4);
        assert_eq!(config.max_parlay_input_legs, 8);
        assert_eq!(config.top_parlays, 5);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(config.save_csv);
    }

    #[test]
    fn test_invalid_number_names_variable() {
        let err = PicksConfig::from_lookup(lookup_from(&[("MAX_PARLAY_LEGS", "ten")])).unwrap_err();
        assert!(err.to_string().contains("MAX_PARLAY_LEGS"));
    }

    #[test]
    fn test_invalid_league() {
        assert!(PicksConfig::from_lookup(lookup_from(&[("LEAGUE", "mlb")])).is_err());
        // Blank means all leagues
        let config = PicksConfig::from_lookup(lookup_from(&[("LEAGUE", "")])).unwrap();
        assert_eq!(config.league, None);
    }

    #[test]
    fn test_min_above_max_rejected() {
        let err = PicksConfig::from_lookup(lookup_from(&[
            ("MIN_PARLAY_LEGS", "5"),
            ("MAX_PARLAY_LEGS", "3"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("greater than"));
    }

    #[test]
    fn test_parlay_input_legs_capped() {
        let err = PicksConfig::from_lookup(lookup_from(&[("MAX_PARLAY_INPUT_LEGS", "40")]))
            .unwrap_err();
        assert!(err.to_string().contains("MAX_PARLAY_INPUT_LEGS (40)"));

        let config =
            PicksConfig::from_lookup(lookup_from(&[("MAX_PARLAY_INPUT_LEGS", "15")])).unwrap();
        assert_eq!(config.max_parlay_input_legs, MAX_PARLAY_INPUT_LEGS_LIMIT);
    }
}
