//! Uniform index selection.
//!
//! Given `len` entries, pick `amount` indices in `[0, len)`, optionally
//! without replacement. Two algorithms are used depending on how large the
//! requested sample is relative to the population:
//!
//! - **Partial Fisher–Yates shuffle** for dense unique requests: shuffle an
//!   index array once and take the first `amount` positions of the resulting
//!   uniform permutation. O(len) RNG calls, no retries.
//! - **Rejection sampling** for sparse or with-replacement requests: draw
//!   uniform indices independently, retrying duplicates when uniqueness is
//!   required. Amortized O(amount) RNG calls when `amount` is a small
//!   fraction of `len`; retry counts blow up as the two approach each other.
//!
//! The crossover is a percentage threshold on `amount / len` that tightens
//! as the population grows (see [`density_threshold`]). The thresholds are
//! empirical tuning constants, kept in one place.
//!
//! Notes:
//! - This module provides `*_with_rng` entrypoints for deterministic
//!   testing/benchmarking.
//! - [`pick_indices`] draws from `rand::rng()` and is not deterministic
//!   across processes by design.

use rand::prelude::*;
use std::collections::HashSet;

/// Population size above which [`MEDIUM_DENSITY_PCT`] applies.
pub const MEDIUM_LEN: usize = 500;
/// Population size above which [`LARGE_DENSITY_PCT`] applies.
pub const LARGE_LEN: usize = 1000;

/// Density threshold (percent) for populations of up to [`MEDIUM_LEN`] entries.
pub const SMALL_DENSITY_PCT: usize = 80;
/// Density threshold (percent) for populations of up to [`LARGE_LEN`] entries.
pub const MEDIUM_DENSITY_PCT: usize = 50;
/// Density threshold (percent) for populations above [`LARGE_LEN`] entries.
pub const LARGE_DENSITY_PCT: usize = 15;

/// The percentage of a population that a unique request must exceed before
/// the shuffle-based selection takes over from rejection sampling.
pub fn density_threshold(len: usize) -> usize {
    if len > LARGE_LEN {
        LARGE_DENSITY_PCT
    } else if len > MEDIUM_LEN {
        MEDIUM_DENSITY_PCT
    } else {
        SMALL_DENSITY_PCT
    }
}

/// Whether a request for `amount` of `len` entries falls in the dense regime.
///
/// Dense unique requests are served by the shuffle; everything else by
/// rejection sampling. The percentage is floored, and the comparison is
/// strict: landing exactly on the threshold is not dense.
///
/// # Panics
///
/// Panics if `len == 0`.
pub fn is_dense(amount: usize, len: usize) -> bool {
    amount * 100 / len > density_threshold(len)
}

/// Pick `amount` indices in `[0, len)`, uniformly at random.
///
/// With `unique`, the returned indices are pairwise distinct; otherwise they
/// are independent draws with replacement. Order of the returned indices is
/// itself random (no sorting is applied).
///
/// # Panics
///
/// Panics if `len == 0` or if `amount` is not in `1..=len`.
pub fn pick_indices(len: usize, amount: usize, unique: bool) -> Vec<usize> {
    let mut rng = rand::rng();
    pick_indices_with_rng(len, amount, unique, &mut rng)
}

/// [`pick_indices`] with a caller-supplied RNG (for tests/benchmarks).
///
/// # Panics
///
/// Panics if `len == 0` or if `amount` is not in `1..=len`.
pub fn pick_indices_with_rng<R: Rng + ?Sized>(
    len: usize,
    amount: usize,
    unique: bool,
    rng: &mut R,
) -> Vec<usize> {
    assert!(len > 0, "pick_indices: len must be > 0");
    assert!(
        (1..=len).contains(&amount),
        "pick_indices: amount must be in 1..=len"
    );

    if unique && is_dense(amount, len) {
        shuffled_prefix(len, amount, rng)
    } else if unique {
        rejection_unique(len, amount, rng)
    } else {
        (0..amount).map(|_| rng.random_range(0..len)).collect()
    }
}

/// Fisher–Yates: permute `0..len` in place, then keep the prefix.
///
/// Positions at `max` and above are final once swapped, so a single pass from
/// the tail yields a uniform permutation; its first `amount` entries are a
/// uniform `amount`-subset in uniform order.
fn shuffled_prefix<R: Rng + ?Sized>(len: usize, amount: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();

    for max in (1..len).rev() {
        let chosen = rng.random_range(0..=max);
        indices.swap(chosen, max);
    }

    indices.truncate(amount);
    indices
}

/// Draw indices independently, discarding duplicates until `amount` distinct
/// ones are collected.
fn rejection_unique<R: Rng + ?Sized>(len: usize, amount: usize, rng: &mut R) -> Vec<usize> {
    let mut picked = Vec::with_capacity(amount);
    let mut seen = HashSet::with_capacity(amount);

    while picked.len() < amount {
        let candidate = rng.random_range(0..len);
        if seen.insert(candidate) {
            picked.push(candidate);
        }
    }

    picked
}
