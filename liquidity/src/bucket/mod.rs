//! Chart buckets: contiguous tick-index ranges aggregated into one bar.
//!
//! The pipeline is `builder` (bounds) → `filler` (one token's reserves per
//! bound) → `merger` (both tokens per bound).

pub mod builder;
pub mod filler;
pub mod merger;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Integer tick-index bounds of one bucket.
///
/// Which end is inclusive depends on where a tick sits relative to the edge
/// price; see [`filler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketBoundary {
    pub lower_index_bound: i64,
    pub upper_index_bound: i64,
}

impl BucketBoundary {
    pub fn new(lower_index_bound: i64, upper_index_bound: i64) -> Self {
        Self {
            lower_index_bound,
            upper_index_bound,
        }
    }

    pub fn width(&self) -> i64 {
        self.upper_index_bound - self.lower_index_bound
    }
}

/// One token's summed reserve inside a bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilledBucket {
    pub bounds: BucketBoundary,
    pub reserve_value: BigDecimal,
}

/// Chart-ready bucket carrying both tokens' values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergedBucket {
    pub bounds: BucketBoundary,
    pub reserve_value_a: BigDecimal,
    pub reserve_value_b: BigDecimal,
}

/// Which bucket claims a tick sitting exactly on the edge index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSide {
    /// The bucket whose upper bound is the edge (below the price).
    Lower,
    /// The bucket whose lower bound is the edge (above the price).
    Upper,
}
