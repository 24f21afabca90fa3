use crate::error::OddsError;

/// Convert American odds to implied probability
/// Positive odds (+150) mean you win $150 on a $100 bet
/// Negative odds (-150) mean you need to bet $150 to win $100
/// Odds of 0 are a sentinel and map to a probability of 0
pub fn implied_probability(odds: i32) -> f64 {
    if odds == 0 {
        return 0.0;
    }

    if odds > 0 {
        // For positive odds: 100 / (odds + 100)
        100.0 / (odds as f64 + 100.0)
    } else {
        // For negative odds: |odds| / (|odds| + 100)
        let abs_odds = (odds as f64).abs();
        abs_odds / (abs_odds + 100.0)
    }
}

/// Convert American odds to decimal odds (total return per unit staked, stake included)
pub fn american_to_decimal(odds: i32) -> Result<f64, OddsError> {
    if odds == 0 {
        return Err(OddsError::ZeroOdds);
    }

    if odds > 0 {
        Ok(1.0 + odds as f64 / 100.0)
    } else {
        Ok(1.0 + 100.0 / (odds as f64).abs())
    }
}

/// Round to the nearest whole number, halves toward positive infinity (-110.5 -> -110)
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Convert decimal odds back to American odds, rounded to the nearest whole number
/// A decimal of 1 (or less) pays nothing and has no American equivalent
pub fn decimal_to_american(decimal: f64) -> Result<i32, OddsError> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return Err(OddsError::DegenerateDecimal(decimal));
    }

    let american = if decimal >= 2.0 {
        round_half_up((decimal - 1.0) * 100.0)
    } else {
        round_half_up(-100.0 / (decimal - 1.0))
    };

    // Anything beyond i32 is far outside real book prices
    if american > i32::MAX as f64 || american < i32::MIN as f64 {
        return Err(OddsError::DegenerateDecimal(decimal));
    }

    Ok(american as i32)
}

/// Calculate expected value for a bet
/// EV = (probability of winning * amount won per bet) - (probability of losing * amount lost per bet)
/// Returns EV as a fraction of the bet amount. Zero odds pay nothing.
pub fn calculate_expected_value(model_prob: f64, odds: i32) -> f64 {
    let win_amount = american_to_decimal(odds)
        .map(|decimal| decimal - 1.0)
        .unwrap_or(0.0);

    let lose_amount = 1.0; // You lose your bet amount
    let prob_lose = 1.0 - model_prob;

    (model_prob * win_amount) - (prob_lose * lose_amount)
}
