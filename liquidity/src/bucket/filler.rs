//! Bucket Filler
//!
//! Sums one token's reserves into bucket bounds. Every tick lands in at most
//! one bucket; which end of a bucket is inclusive depends on the tick's
//! position relative to the edge index:
//!
//! ```text
//! tick >  edge              → [lower, upper)
//! tick <  edge              → (lower, upper]
//! tick == edge, side Upper  → [lower, upper)
//! tick == edge, side Lower  → (lower, upper]
//! ```
//!
//! Bounds are sorted once and each tick is placed with a binary search, so
//! the cost is O((buckets + ticks) · log buckets). Bounds are expected not to
//! overlap beyond shared endpoints, as produced by the builder; identical
//! bounds resolve to the one listed first.

use bigdecimal::{BigDecimal, Zero};
use tracing::trace;

use super::{BucketBoundary, FilledBucket, MatchSide};
use crate::types::Tick;

/// How a tick's reserve is expressed in the chart's common unit.
#[derive(Clone, Debug, PartialEq)]
pub enum ReserveValuation {
    /// Reserve already in the chart unit (token A).
    Identity,
    /// Reserve multiplied by the current price (token B valued in token A).
    AtPrice(BigDecimal),
}

impl ReserveValuation {
    pub fn value(&self, reserve: &BigDecimal) -> BigDecimal {
        match self {
            ReserveValuation::Identity => reserve.clone(),
            ReserveValuation::AtPrice(price) => reserve * price,
        }
    }
}

/// Fill `boundaries` with the `reserve_self` of `ticks`.
///
/// Output keeps the order of `boundaries` and omits buckets whose sum is zero.
pub fn fill_buckets(
    boundaries: &[BucketBoundary],
    ticks: &[Tick],
    match_side: MatchSide,
    edge_index: i64,
    valuation: &ReserveValuation,
) -> Vec<FilledBucket> {
    // positions sorted by bounds; among identical bounds the earliest position sorts last,
    // which is where the searches below land
    let mut order: Vec<usize> = (0..boundaries.len()).collect();
    order.sort_by(|&a, &b| boundaries[a].cmp(&boundaries[b]).then(b.cmp(&a)));

    let mut sums = vec![BigDecimal::zero(); boundaries.len()];
    let mut unplaced = 0usize;

    for tick in ticks.iter().filter(|t| !t.reserve_self.is_zero()) {
        match owning_bucket(boundaries, &order, tick.tick_index, match_side, edge_index) {
            Some(pos) => sums[pos] += valuation.value(&tick.reserve_self),
            None => unplaced += 1,
        }
    }

    if unplaced > 0 {
        trace!(unplaced, "ticks outside every bucket");
    }

    boundaries
        .iter()
        .zip(sums)
        .filter(|(_, sum)| *sum > BigDecimal::zero())
        .map(|(bounds, reserve_value)| FilledBucket {
            bounds: *bounds,
            reserve_value,
        })
        .collect()
}

fn owning_bucket(
    boundaries: &[BucketBoundary],
    order: &[usize],
    tick_index: i64,
    match_side: MatchSide,
    edge_index: i64,
) -> Option<usize> {
    let lower_inclusive = tick_index > edge_index
        || (tick_index == edge_index && match_side == MatchSide::Upper);

    if lower_inclusive {
        // last bucket starting at or below the tick
        let n = order.partition_point(|&i| boundaries[i].lower_index_bound <= tick_index);
        let pos = *order.get(n.checked_sub(1)?)?;
        (tick_index < boundaries[pos].upper_index_bound).then_some(pos)
    } else {
        // last bucket starting strictly below the tick
        let n = order.partition_point(|&i| boundaries[i].lower_index_bound < tick_index);
        let pos = *order.get(n.checked_sub(1)?)?;
        (tick_index <= boundaries[pos].upper_index_bound).then_some(pos)
    }
}
