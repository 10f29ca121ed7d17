//! Permutation crossover and mutation operators for tours.
//!
//! All operators work on `&[usize]` gene slices and preserve the permutation
//! invariant: the output holds exactly the input's set of city indices.
//!
//! # Crossover
//!
//! - [`order_crossover`] (OX): Davis (1985). Copies a segment of parent1 and
//!   fills the remaining positions, left to right, with the missing genes in
//!   parent2's order.
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two random positions. O(1)
//! - [`reverse_mutation`]: reverse a random segment of at least three genes
//!   (2-opt move). O(n)
//! - [`mutate`]: applies both with the configured probabilities.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"

use rand::Rng;

/// Marks a child position that has not been filled yet.
const EMPTY: usize = usize::MAX;

/// Order Crossover (OX) producing a single child.
///
/// Draws `start` uniformly in `0..n` and `end` uniformly in `start..n`, then
/// delegates to [`order_crossover_segment`].
///
/// # Panics
/// Panics if the parents have different lengths or are empty.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let start = rng.random_range(0..n);
    let end = rng.random_range(start..n);
    order_crossover_segment(parent1, parent2, start, end)
}

/// OX with a fixed segment `[start, end]` (inclusive).
///
/// 1. Copy `parent1[start..=end]` to the same positions of the child.
/// 2. Scan `parent2` left to right; each gene not yet in the child goes to
///    the leftmost empty position.
///
/// # Complexity
/// O(n) time, O(n) space. Presence is tracked in a bitmap indexed by gene
/// value rather than by searching the child.
///
/// # Panics
/// Panics if the parents have different lengths, `start > end` or
/// `end >= n`, or if the parents are not permutations of the same set.
pub fn order_crossover_segment(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(start <= end && end < n, "segment [{start}, {end}] out of bounds for length {n}");

    let max_gene = parent1.iter().chain(parent2).copied().max().unwrap_or(0);
    let mut present = vec![false; max_gene + 1];
    let mut child = vec![EMPTY; n];

    for i in start..=end {
        child[i] = parent1[i];
        present[parent1[i]] = true;
    }

    let mut pos = 0;
    for &gene in parent2 {
        if present[gene] {
            continue;
        }
        while child[pos] != EMPTY {
            pos += 1;
        }
        child[pos] = gene;
        present[gene] = true;
    }

    child
}

/// Swap mutation: exchange the genes at two independently drawn positions.
///
/// Drawing the same position twice leaves the tour unchanged.
pub fn swap_mutation<R: Rng>(genes: &mut [usize], rng: &mut R) {
    let n = genes.len();
    if n == 0 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    genes.swap(i, j);
}

/// Segment-reversal mutation (2-opt move).
///
/// Draws two positions, orders them as `i <= j`, and reverses
/// `genes[i..=j]` when `j - i >= 2`. Narrower windows are skipped, not
/// redrawn.
pub fn reverse_mutation<R: Rng>(genes: &mut [usize], rng: &mut R) {
    let n = genes.len();
    if n == 0 {
        return;
    }
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    let (i, j) = if a <= b { (a, b) } else { (b, a) };
    if j - i >= 2 {
        genes[i..=j].reverse();
    }
}

/// Applies swap mutation with probability `rate` and, independently,
/// segment reversal with probability `rate / 2`.
pub fn mutate<R: Rng>(genes: &mut [usize], rate: f64, rng: &mut R) {
    if rng.random_range(0.0..1.0) < rate {
        swap_mutation(genes, rng);
    }
    if rng.random_range(0.0..1.0) < rate * 0.5 {
        reverse_mutation(genes, rng);
    }
}

// ============================================================================
// Tests
// ============================================================================
