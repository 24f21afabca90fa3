use crate::models::{Event, EventSide, League, Leg};
use crate::utils::odds_calculator::implied_probability;
use chrono::{TimeZone, Utc};

/// Build an event from `(model_odds, book_odds)` pairs for each side
pub fn event(id: &str, league: League, side1: (i32, i32), side2: (i32, i32)) -> Event {
    Event {
        id: id.to_string(),
        name: format!("{} event", id),
        date: Utc.with_ymd_and_hms(2024, 4, 13, 22, 0, 0).unwrap(),
        league,
        side1: EventSide {
            name: format!("{} side1", id),
            model_odds: side1.0,
            book_odds: side1.1,
            picture: None,
        },
        side2: EventSide {
            name: format!("{} side2", id),
            model_odds: side2.0,
            book_odds: side2.1,
            picture: Some(format!("{}-side2.png", id)),
        },
    }
}

/// Build a leg directly from model and book odds
pub fn leg(event_id: &str, model_odds: i32, book_odds: i32) -> Leg {
    let model_probability = implied_probability(model_odds);
    let book_probability = implied_probability(book_odds);
    Leg {
        event_id: event_id.to_string(),
        event_name: format!("{} event", event_id),
        event_date: Utc.with_ymd_and_hms(2024, 4, 13, 22, 0, 0).unwrap(),
        pick_name: format!("{} pick", event_id),
        model_odds,
        model_probability,
        book_odds,
        book_probability,
        value_edge: model_probability - book_probability,
        league: League::Nfl,
        picture: None,
    }
}
