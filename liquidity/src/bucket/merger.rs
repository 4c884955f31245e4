//! Bucket Merger
//!
//! Unions the token A and token B fills by identical bounds. Values that meet
//! on the same bounds are added, never averaged; a side missing from a bucket
//! reads as zero.
//!
//! The output order is NOT specified (hash-map iteration). Callers that need
//! a stable order sort with [`sort_by_lower_bound`].

use std::collections::HashMap;

use bigdecimal::{BigDecimal, Zero};

use super::{BucketBoundary, FilledBucket, MergedBucket};

pub fn merge_buckets(token_a: &[FilledBucket], token_b: &[FilledBucket]) -> Vec<MergedBucket> {
    let mut merged: HashMap<BucketBoundary, MergedBucket> =
        HashMap::with_capacity(token_a.len() + token_b.len());

    for bucket in token_a {
        entry(&mut merged, bucket.bounds).reserve_value_a += &bucket.reserve_value;
    }
    for bucket in token_b {
        entry(&mut merged, bucket.bounds).reserve_value_b += &bucket.reserve_value;
    }

    merged.into_values().collect()
}

/// Ascending by lower bound, then upper bound.
pub fn sort_by_lower_bound(buckets: &mut [MergedBucket]) {
    buckets.sort_by_key(|bucket| bucket.bounds);
}

fn entry(
    merged: &mut HashMap<BucketBoundary, MergedBucket>,
    bounds: BucketBoundary,
) -> &mut MergedBucket {
    merged.entry(bounds).or_insert_with(|| MergedBucket {
        bounds,
        reserve_value_a: BigDecimal::zero(),
        reserve_value_b: BigDecimal::zero(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(lower: i64, upper: i64, value: i64) -> FilledBucket {
        FilledBucket {
            bounds: BucketBoundary::new(lower, upper),
            reserve_value: BigDecimal::from(value),
        }
    }

    fn merged(lower: i64, upper: i64, a: i64, b: i64) -> MergedBucket {
        MergedBucket {
            bounds: BucketBoundary::new(lower, upper),
            reserve_value_a: BigDecimal::from(a),
            reserve_value_b: BigDecimal::from(b),
        }
    }

    #[test]
    fn shared_bounds_collapse_into_one_bucket() {
        let out = merge_buckets(&[filled(0, 10, 5)], &[filled(0, 10, 3)]);
        assert_eq!(out, vec![merged(0, 10, 5, 3)]);
    }

    #[test]
    fn disjoint_bounds_are_kept_untouched() {
        let mut out = merge_buckets(&[filled(-10, 0, 7)], &[filled(0, 10, 2)]);
        sort_by_lower_bound(&mut out);

        assert_eq!(out, vec![merged(-10, 0, 7, 0), merged(0, 10, 0, 2)]);
    }

    #[test]
    fn repeated_bounds_on_one_side_add_up() {
        let out = merge_buckets(&[filled(0, 10, 1), filled(0, 10, 4)], &[]);
        assert_eq!(out, vec![merged(0, 10, 5, 0)]);
    }

    #[test]
    fn empty_inputs_merge_to_nothing() {
        assert!(merge_buckets(&[], &[]).is_empty());
    }

    #[test]
    fn sorting_orders_by_lower_bound() {
        let mut out = vec![merged(20, 30, 1, 0), merged(-5, 0, 1, 0), merged(0, 10, 0, 1)];
        sort_by_lower_bound(&mut out);

        let lowers: Vec<i64> = out.iter().map(|b| b.bounds.lower_index_bound).collect();
        assert_eq!(lowers, vec![-5, 0, 20]);
    }
}
