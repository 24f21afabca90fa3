use crate::models::{Event, EventSide, League, Leg};
use crate::utils::odds_calculator::implied_probability;
use tracing::{debug, warn};

/// Pick the side of an event the model favors and turn it into a parlay leg.
///
/// The favored side is the one with the higher model implied probability,
/// regardless of which side the book prices more attractively. When both
/// sides carry the same model probability, side1 is picked.
///
/// The two sides are priced independently, so their probabilities need not
/// sum to 1 for either the model or the book.
pub fn pick_favored_side(event: &Event) -> Leg {
    let side1_model_prob = implied_probability(event.side1.model_odds);
    let side2_model_prob = implied_probability(event.side2.model_odds);

    let (side, model_probability) = if side1_model_prob >= side2_model_prob {
        (&event.side1, side1_model_prob)
    } else {
        (&event.side2, side2_model_prob)
    };

    build_leg(event, side, model_probability)
}

fn build_leg(event: &Event, side: &EventSide, model_probability: f64) -> Leg {
    let book_probability = implied_probability(side.book_odds);

    Leg {
        event_id: event.id.clone(),
        event_name: event.name.clone(),
        event_date: event.date,
        pick_name: side.name.clone(),
        model_odds: side.model_odds,
        model_probability,
        book_odds: side.book_odds,
        book_probability,
        value_edge: model_probability - book_probability,
        league: event.league,
        picture: side.picture.clone(),
    }
}

/// Favored legs for every event (optionally a single league), best value edge first.
/// Events with equal edges keep their input order.
pub fn find_picks(events: &[Event], league: Option<League>, top_n: Option<usize>) -> Vec<Leg> {
    let mut picks: Vec<Leg> = events
        .iter()
        .filter(|event| league.map_or(true, |l| event.league == l))
        .map(pick_favored_side)
        .collect();

    // Sort by edge (descending)
    picks.sort_by(|a, b| {
        b.value_edge
            .partial_cmp(&a.value_edge)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(
        league = league.map(|l| l.as_str()).unwrap_or("all"),
        picks = picks.len(),
        "evaluated events"
    );

    match top_n {
        Some(n) => picks.into_iter().take(n).collect(),
        None => picks,
    }
}

/// The strongest `limit` picks that can be priced into a parlay.
/// Picks carrying a zero model or book price are left out.
pub fn parlay_legs(picks: &[Leg], limit: usize) -> Vec<Leg> {
    picks
        .iter()
        .filter(|leg| {
            let priced = leg.model_odds != 0 && leg.book_odds != 0;
            if !priced {
                warn!(
                    event_id = %leg.event_id,
                    model_odds = leg.model_odds,
                    book_odds = leg.book_odds,
                    "leaving zero-priced pick out of parlays"
                );
            }
            priced
        })
        .take(limit)
        .cloned()
        .collect()
}
