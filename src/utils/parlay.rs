use crate::error::OddsError;
use crate::models::{Leg, Parlay};
use crate::utils::odds_calculator::{american_to_decimal, decimal_to_american};
use std::collections::HashSet;
use tracing::debug;

pub const DEFAULT_MIN_LEGS: usize = 2;
pub const DEFAULT_MAX_LEGS: usize = 10;

/// Probability that every leg hits, assuming the legs are independent.
/// An empty list is the multiplicative identity.
pub fn compound_probability(probabilities: &[f64]) -> f64 {
    probabilities.iter().product()
}

/// Combine American odds across legs.
///
/// American odds can't be multiplied directly: each leg is converted to
/// decimal odds, the decimals are multiplied, and the total is converted
/// back to American odds.
pub fn compound_odds(odds_list: &[i32]) -> Result<i32, OddsError> {
    let total_decimal = odds_list
        .iter()
        .try_fold(1.0, |total, &odds| Ok::<f64, OddsError>(total * american_to_decimal(odds)?))?;

    decimal_to_american(total_decimal)
}

/// Evaluate a set of legs as a single parlay
pub fn build_parlay(legs: &[Leg]) -> Result<Parlay, OddsError> {
    let book_odds: Vec<i32> = legs.iter().map(|leg| leg.book_odds).collect();
    let model_odds: Vec<i32> = legs.iter().map(|leg| leg.model_odds).collect();
    let book_probabilities: Vec<f64> = legs.iter().map(|leg| leg.book_probability).collect();
    let model_probabilities: Vec<f64> = legs.iter().map(|leg| leg.model_probability).collect();

    let total_book_probability = compound_probability(&book_probabilities);
    let total_model_probability = compound_probability(&model_probabilities);

    Ok(Parlay {
        legs: legs.to_vec(),
        total_book_odds: compound_odds(&book_odds)?,
        total_model_odds: compound_odds(&model_odds)?,
        total_book_probability,
        total_model_probability,
        value_edge: total_model_probability - total_book_probability,
    })
}

/// Index combinations of `k` out of `n`, in lexicographic order
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.indices.clone();
        let k = self.indices.len();

        // Rightmost position that can still move forward
        match (0..k).rev().find(|&i| self.indices[i] != i + self.n - k) {
            Some(i) => {
                self.indices[i] += 1;
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(current)
    }
}

/// Generate every parlay of `min_legs..=max_legs` legs from `legs`.
///
/// Parlays come out by ascending size, then by lexicographic leg index, so
/// the result is reproducible for a given input order. Combinations that
/// would place two legs from the same event together are skipped. A
/// `min_legs` of 0 is treated as 1.
///
/// The number of candidates grows exponentially with `legs.len()`; callers
/// are expected to cap the input before calling this.
pub fn generate_parlays(
    legs: &[Leg],
    min_legs: usize,
    max_legs: usize,
) -> Result<Vec<Parlay>, OddsError> {
    let min_legs = min_legs.max(1);
    let max_legs = max_legs.min(legs.len());

    let mut parlays = Vec::new();
    let mut skipped = 0usize;

    for size in min_legs..=max_legs {
        for indices in Combinations::new(legs.len(), size) {
            let mut seen = HashSet::with_capacity(size);
            if !indices.iter().all(|&i| seen.insert(legs[i].event_id.as_str())) {
                skipped += 1;
                continue;
            }

            let combo: Vec<Leg> = indices.iter().map(|&i| legs[i].clone()).collect();
            parlays.push(build_parlay(&combo)?);
        }
    }

    debug!(
        legs = legs.len(),
        min_legs,
        max_legs,
        parlays = parlays.len(),
        skipped,
        "generated parlays"
    );

    Ok(parlays)
}

/// Best parlays by value edge. Parlays with equal edges keep their order.
pub fn top_parlays(mut parlays: Vec<Parlay>, top_n: usize) -> Vec<Parlay> {
    // Sort by edge (descending)
    parlays.sort_by(|a, b| {
        b.value_edge
            .partial_cmp(&a.value_edge)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    parlays.truncate(top_n);
    parlays
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::leg;

    #[test]
    fn test_compound_probability() {
        assert_eq!(compound_probability(&[]), 1.0);
        assert!((compound_probability(&[0.5, 0.5]) - 0.25).abs() < 1e-12);
        assert!((compound_probability(&[0.6, 0.5, 0.4]) - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_compound_odds_single_leg_round_trips() {
        for odds in [-200, -110, 150, 300] {
            assert_eq!(compound_odds(&[odds]).unwrap(), odds);
        }
    }

    #[test]
    fn test_compound_odds_two_favorites() {
        // 1.909^2 = 3.6446 decimal
        let total = compound_odds(&[-110, -110]).unwrap();
        assert_eq!(total, 264);
        assert!(total > 100);
    }

    #[test]
    fn test_compound_odds_mixed() {
        // 2.5 * 1.5 = 3.75 decimal
        assert_eq!(compound_odds(&[150, -200]).unwrap(), 275);
        // Order doesn't matter
        assert_eq!(compound_odds(&[-200, 150]).unwrap(), 275);
    }

    #[test]
    fn test_compound_odds_heavy_favorites_stay_negative() {
        // 1.1 * 1.1 = 1.21 decimal
        assert_eq!(compound_odds(&[-1000, -1000]).unwrap(), -476);
    }

    #[test]
    fn test_compound_odds_degenerate() {
        assert_eq!(compound_odds(&[]), Err(OddsError::DegenerateDecimal(1.0)));
        assert_eq!(compound_odds(&[-110, 0]), Err(OddsError::ZeroOdds));
    }

    #[test]
    fn test_combinations_lexicographic() {
        let combos: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
        assert_eq!(
            combos,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(Combinations::new(5, 5).count(), 1);
        assert_eq!(Combinations::new(3, 4).count(), 0);
        assert_eq!(Combinations::new(10, 3).count(), 120);
    }

    #[test]
    fn test_generate_pairs_from_three_legs() {
        let legs = vec![leg("a", -200, -150), leg("b", 120, 140), leg("c", -110, -105)];
        let parlays = generate_parlays(&legs, 2, 2).unwrap();

        assert_eq!(parlays.len(), 3);
        let pairs: Vec<Vec<&str>> = parlays.iter().map(|p| p.event_ids()).collect();
        assert_eq!(pairs, vec![vec!["a", "b"], vec!["a", "c"], vec!["b", "c"]]);

        for parlay in &parlays {
            let book: Vec<i32> = parlay.legs.iter().map(|l| l.book_odds).collect();
            let model: Vec<i32> = parlay.legs.iter().map(|l| l.model_odds).collect();
            assert_eq!(parlay.total_book_odds, compound_odds(&book).unwrap());
            assert_eq!(parlay.total_model_odds, compound_odds(&model).unwrap());
            assert!(
                (parlay.value_edge
                    - (parlay.total_model_probability - parlay.total_book_probability))
                    .abs()
                    < 1e-12
            );
        }
    }

    #[test]
    fn test_generate_default_sizes() {
        let legs = vec![
            leg("a", -200, -150),
            leg("b", 120, 140),
            leg("c", -110, -105),
            leg("d", 250, 300),
        ];
        let parlays = generate_parlays(&legs, DEFAULT_MIN_LEGS, DEFAULT_MAX_LEGS).unwrap();

        // C(4,2) + C(4,3) + C(4,4)
        assert_eq!(parlays.len(), 11);
        let sizes: Vec<usize> = parlays.iter().map(|p| p.len()).collect();
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(parlays.last().unwrap().len(), 4);
    }

    #[test]
    fn test_generate_too_few_legs_is_empty() {
        let legs = vec![leg("a", -200, -150)];
        assert!(generate_parlays(&legs, 2, 10).unwrap().is_empty());
        assert!(generate_parlays(&[], 2, 10).unwrap().is_empty());
    }

    #[test]
    fn test_generate_inverted_bounds_is_empty() {
        let legs = vec![leg("a", -200, -150), leg("b", 120, 140), leg("c", -110, -105)];
        assert!(generate_parlays(&legs, 3, 2).unwrap().is_empty());
    }

    #[test]
    fn test_generate_min_zero_starts_at_single_legs() {
        let legs = vec![leg("a", -200, -150), leg("b", 120, 140)];
        let parlays = generate_parlays(&legs, 0, 2).unwrap();
        assert_eq!(parlays.len(), 3);
        assert_eq!(parlays[0].total_book_odds, -150);
        assert_eq!(parlays[1].total_book_odds, 140);
    }

    #[test]
    fn test_generate_skips_same_event_legs() {
        let legs = vec![leg("a", -200, -150), leg("a", 180, 130), leg("b", 120, 140)];
        let parlays = generate_parlays(&legs, 2, 3).unwrap();

        let ids: Vec<Vec<&str>> = parlays.iter().map(|p| p.event_ids()).collect();
        assert_eq!(ids, vec![vec!["a", "b"], vec!["a", "b"]]);
    }

    #[test]
    fn test_generate_propagates_zero_odds() {
        let legs = vec![leg("a", -200, 0), leg("b", 120, 140)];
        assert_eq!(generate_parlays(&legs, 2, 2), Err(OddsError::ZeroOdds));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let legs = vec![
            leg("a", -200, -150),
            leg("b", 120, 140),
            leg("c", -110, -105),
            leg("d", 250, 300),
            leg("e", -130, -120),
        ];
        let first = generate_parlays(&legs, 2, 4).unwrap();
        let second = generate_parlays(&legs, 2, 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_top_parlays() {
        let legs = vec![leg("a", -300, -150), leg("b", 120, 140), leg("c", -110, -105)];
        let parlays = generate_parlays(&legs, 2, 3).unwrap();
        let top = top_parlays(parlays.clone(), 2);

        assert_eq!(top.len(), 2);
        assert!(top[0].value_edge >= top[1].value_edge);
        let best = parlays
            .iter()
            .map(|p| p.value_edge)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(top[0].value_edge, best);
    }
}
