use thiserror::Error;

/// Failures from the odds math itself
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OddsError {
    #[error("american odds of 0 have no decimal equivalent")]
    ZeroOdds,

    #[error("decimal odds of {0} cannot be expressed as american odds")]
    DegenerateDecimal(f64),
}

/// Failures while turning an odds snapshot into events
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PicksError {
    #[error("event {event_id} is missing {side} odds")]
    MissingOdds { event_id: String, side: String },

    #[error("unknown league: {0}")]
    UnknownLeague(String),
}
