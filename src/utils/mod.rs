pub mod data;
pub mod odds_calculator;
pub mod parlay;
pub mod picks;

#[cfg(test)]
pub(crate) mod test_support;
