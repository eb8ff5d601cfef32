//! Featured-product sampling.
//!
//! The storefront's landing page asks for a fixed number of "featured"
//! products drawn from across the catalog. The selection walks sections in
//! store order, gathers every product under each section's types, and stops
//! once enough have accumulated. When the whole catalog holds fewer than the
//! target, the result is padded by duplicating already-selected products so
//! the caller always receives exactly `target` items whenever at least one
//! product exists. An empty catalog yields an empty result, never an error.
//!
//! This is deliberately not a uniform sample over all products: the walk is
//! section-order dependent and the early exit is coarse (it only checks
//! between sections, so the pre-shuffle pool can overshoot the target).
//! The contract that matters is the deterministic result size and the
//! shuffled final order.

use rand::seq::SliceRandom;
use rand::Rng;

/// Accumulate per-section product groups until the target count is reached.
///
/// Groups are appended whole; the length check runs only after a group has
/// been consumed, so the result may exceed `target`. Remaining groups are
/// not visited.
pub fn take_until_target<T>(groups: impl IntoIterator<Item = Vec<T>>, target: usize) -> Vec<T> {
    let mut picked = Vec::new();
    for group in groups {
        picked.extend(group);
        if picked.len() >= target {
            break;
        }
    }
    picked
}

/// Pad the picked pool to `target` by duplicating random entries, then
/// shuffle and truncate to exactly `target`.
///
/// An empty pool stays empty. Duplicates in the output are expected when
/// the catalog holds fewer than `target` products.
pub fn pad_and_shuffle<T: Clone>(mut picked: Vec<T>, target: usize, rng: &mut impl Rng) -> Vec<T> {
    if picked.is_empty() {
        return picked;
    }

    while picked.len() < target {
        let index = rng.random_range(0..picked.len());
        let duplicate = picked[index].clone();
        picked.push(duplicate);
    }

    picked.shuffle(rng);
    picked.truncate(target);
    picked
}
