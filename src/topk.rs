//! Ranking utilities.
//!
//! Ordering is fully deterministic: higher score first, ties broken by lower index.

use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Every index of `scores`, highest score first, ties by ascending index.
pub fn rank_descending(scores: &[f64]) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by_key(|&(i, s)| (Reverse(OrderedFloat(s)), i));
    ranked
}

/// The first `k` entries of [`rank_descending`]; `k` is clamped to `scores.len()`.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(usize, f64)> {
    let mut ranked = rank_descending(scores);
    ranked.truncate(k);
    ranked
}

/// Scale `scores` to sum to 1. A non-positive total leaves them unchanged.
pub fn normalize(scores: &mut [f64]) {
    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for s in scores {
            *s /= sum;
        }
    }
}
