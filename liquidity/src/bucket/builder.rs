//! Bucket Builder
//!
//! Splits the viewable tick-index window into fixed-width buckets on both
//! sides of the edge price. The split point is always a bucket boundary, so
//! no bar straddles the current price.
//!
//! ```text
//! bucket_count       = clamp(ceil(width_px / bucket_width_px), 1, index_count) (+1 when the edge splits the window)
//! indexes_per_bucket = ceil(index_count / bucket_count)
//! token A: [v - step, v] walking down from min(index_max, edge)
//! token B: [v, v + step] walking up from max(index_min, edge)
//! ```
//!
//! The outermost bucket on each side reaches at least one index past the
//! window end. A tick sitting exactly on `index_min` is matched `(lower,
//! upper]` and one on `index_max` `[lower, upper)`, so without the overhang
//! the ticks that define the window would fall outside every bucket.
//!
//! A window with no integer index in it yields one `[index_min, index_min + 1]`
//! bucket instead of dividing by zero.

use tracing::debug;

use super::BucketBoundary;
use crate::error::LiquidityError;
use crate::tick_math::round_half_up;

pub const DEFAULT_BUCKET_WIDTH_PX: f64 = 8.0;

/// Indexes beyond ±2^53 are not exact in `f64`; inputs are clamped here
/// before integer arithmetic.
const MAX_INDEX_MAGNITUDE: f64 = 9_007_199_254_740_992.0;

/// Inputs of one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BucketRequest {
    pub container_width_px: f64,
    pub bucket_width_px: f64,
    pub graph_min_index: f64,
    pub graph_max_index: f64,
    /// Tick index of the current price; fractional values are rounded half-up.
    pub edge_price_index: f64,
}

/// Bucket bounds per side. Token A buckets are listed nearest-to-edge first
/// (descending), token B buckets likewise (ascending).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BucketLayout {
    pub token_a: Vec<BucketBoundary>,
    pub token_b: Vec<BucketBoundary>,
    pub indexes_per_bucket: i64,
}

impl BucketLayout {
    /// Token A bounds followed by token B bounds.
    pub fn all(&self) -> Vec<BucketBoundary> {
        self.token_a
            .iter()
            .chain(self.token_b.iter())
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.token_a.len() + self.token_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn build_buckets(req: &BucketRequest) -> Result<BucketLayout, LiquidityError> {
    let width_px = finite("container width", req.container_width_px)?.max(0.0);
    let graph_min = finite("graph min index", req.graph_min_index)?;
    let graph_max = finite("graph max index", req.graph_max_index)?;
    let edge = finite("edge price index", req.edge_price_index)?;

    if !req.bucket_width_px.is_finite() || req.bucket_width_px <= 0.0 {
        return Err(LiquidityError::InvalidBucketWidth(req.bucket_width_px));
    }

    let index_min = to_index(graph_min.floor());
    let index_max = to_index(graph_max.ceil());
    let edge = to_index(round_half_up(edge));

    let token_a_index_count = if edge > index_min {
        edge.min(index_max) - index_min
    } else {
        0
    };
    let token_b_index_count = if edge < index_max {
        index_max - edge.max(index_min)
    } else {
        0
    };
    let total_index_count = token_a_index_count + token_b_index_count;

    if total_index_count <= 0 {
        debug!(index_min, index_max, "empty index window, using single bucket");
        return Ok(BucketLayout {
            token_a: Vec::new(),
            token_b: vec![BucketBoundary::new(index_min, index_min + 1)],
            indexes_per_bucket: 1,
        });
    }

    // more buckets than indexes would only produce empty bars
    let by_width = (width_px / req.bucket_width_px)
        .ceil()
        .clamp(1.0, total_index_count as f64) as i64;
    let splits_window = index_min < edge && edge < index_max;
    let bucket_count = by_width + i64::from(splits_window);

    let step = div_ceil(total_index_count, bucket_count);

    let a_start = index_max.min(edge);
    let a_count = if a_start >= index_min {
        div_ceil(token_a_index_count, step).max(1)
    } else {
        0
    };
    let token_a = (0..a_count)
        .map(|k| {
            let upper = a_start - k * step;
            let mut lower = upper - step;
            if k == a_count - 1 {
                lower = lower.min(index_min - 1);
            }
            BucketBoundary::new(lower, upper)
        })
        .collect();

    let b_start = index_min.max(edge);
    let b_count = if b_start <= index_max {
        div_ceil(token_b_index_count, step).max(1)
    } else {
        0
    };
    let token_b = (0..b_count)
        .map(|k| {
            let lower = b_start + k * step;
            let mut upper = lower + step;
            if k == b_count - 1 {
                upper = upper.max(index_max + 1);
            }
            BucketBoundary::new(lower, upper)
        })
        .collect();

    Ok(BucketLayout {
        token_a,
        token_b,
        indexes_per_bucket: step,
    })
}

fn finite(field: &'static str, value: f64) -> Result<f64, LiquidityError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LiquidityError::NonFinite(field))
    }
}

fn to_index(value: f64) -> i64 {
    value.clamp(-MAX_INDEX_MAGNITUDE, MAX_INDEX_MAGNITUDE) as i64
}

/// Ceiling division for a non-negative numerator and positive divisor.
fn div_ceil(n: i64, d: i64) -> i64 {
    n / d + i64::from(n % d != 0)
}
