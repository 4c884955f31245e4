use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bucket::builder::DEFAULT_BUCKET_WIDTH_PX;
use crate::error::LiquidityError;
use crate::extent::IndexRange;
use crate::tick_math::{round_half_up, ticks_for_multiple};

/// Protocol-wide tick index bounds (prices of roughly 1e-23 .. 1e23).
pub const DEFAULT_MIN_TICK_INDEX: i64 = -529_715;
pub const DEFAULT_MAX_TICK_INDEX: i64 = 529_715;

/// Absolute tick-index limits of the protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickLimits {
    pub min_index: i64,
    pub max_index: i64,
}

impl TickLimits {
    /// `(low, high)` as floats, in ascending order even when the limits were
    /// built inverted.
    pub fn bounds(&self) -> (f64, f64) {
        let (a, b) = (self.min_index as f64, self.max_index as f64);
        (a.min(b), a.max(b))
    }

    pub fn clamp(&self, index: f64) -> f64 {
        let (lo, hi) = self.bounds();
        index.clamp(lo, hi)
    }

    pub fn clamp_range(&self, range: IndexRange) -> IndexRange {
        IndexRange::new(self.clamp(range.min), self.clamp(range.max))
    }

    pub fn span(&self) -> f64 {
        let (lo, hi) = self.bounds();
        hi - lo
    }
}

impl Default for TickLimits {
    fn default() -> Self {
        Self {
            min_index: DEFAULT_MIN_TICK_INDEX,
            max_index: DEFAULT_MAX_TICK_INDEX,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Desired pixel width of one bar.
    pub bucket_width_px: f64,

    /// Zoom windows are clamped to these limits before anything else.
    pub limits: TickLimits,

    /// Price multiple shown either side of the edge price when there is no
    /// data, zoom or user selection at all.
    ///
    /// 4.0 shows a quarter to four times the current price.
    pub default_spread_multiple: f64,

    /// Price multiple used to widen a window that collapsed to one index.
    pub degenerate_spread_multiple: f64,

    /// Span multiplier applied by one zoom step.
    pub zoom_factor: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bucket_width_px: DEFAULT_BUCKET_WIDTH_PX,
            limits: TickLimits::default(),
            default_spread_multiple: 4.0,
            degenerate_spread_multiple: 10.0,
            zoom_factor: 2.0,
        }
    }
}

impl ChartConfig {
    /// Defaults overridden by `LIQUIDITY_*` environment variables.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bucket_width_px: env_or("LIQUIDITY_BUCKET_WIDTH_PX", defaults.bucket_width_px),
            limits: TickLimits {
                min_index: env_or("LIQUIDITY_MIN_TICK_INDEX", defaults.limits.min_index),
                max_index: env_or("LIQUIDITY_MAX_TICK_INDEX", defaults.limits.max_index),
            },
            zoom_factor: env_or("LIQUIDITY_ZOOM_FACTOR", defaults.zoom_factor),
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<(), LiquidityError> {
        if !self.bucket_width_px.is_finite() || self.bucket_width_px <= 0.0 {
            return Err(LiquidityError::InvalidBucketWidth(self.bucket_width_px));
        }
        if self.limits.min_index >= self.limits.max_index {
            return Err(LiquidityError::InvertedLimits {
                min: self.limits.min_index,
                max: self.limits.max_index,
            });
        }
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 1.0 {
            return Err(LiquidityError::InvalidZoomFactor(self.zoom_factor));
        }
        if !self.default_spread_multiple.is_finite() || self.default_spread_multiple <= 1.0 {
            return Err(LiquidityError::InvalidMultiple(
                "default spread multiple",
                self.default_spread_multiple,
            ));
        }
        if !self.degenerate_spread_multiple.is_finite() || self.degenerate_spread_multiple <= 1.0 {
            return Err(LiquidityError::InvalidMultiple(
                "degenerate spread multiple",
                self.degenerate_spread_multiple,
            ));
        }
        Ok(())
    }

    /// Half-width, in ticks, of the no-signal window (`ln(4)/ln(1.0001)` by default).
    pub fn default_spread(&self) -> f64 {
        ticks_for_multiple(self.default_spread_multiple)
    }

    /// Ticks added on each side of a collapsed window (`23027` by default).
    pub fn degenerate_spread(&self) -> f64 {
        round_half_up(ticks_for_multiple(self.degenerate_spread_multiple))
    }
}

fn env_or<T: FromStr + Copy + std::fmt::Display>(key: &'static str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, fallback = %default, "ignoring unparsable setting");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ChartConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.degenerate_spread(), 23027.0);
        assert!((cfg.default_spread() - 13863.64).abs() < 0.01);
    }

    #[test]
    fn rejects_inverted_limits() {
        let cfg = ChartConfig {
            limits: TickLimits {
                min_index: 10,
                max_index: 10,
            },
            ..ChartConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(LiquidityError::InvertedLimits { min: 10, max: 10 })
        );
    }

    #[test]
    fn rejects_bad_bucket_width_and_zoom() {
        let cfg = ChartConfig {
            bucket_width_px: -1.0,
            ..ChartConfig::default()
        };
        assert_eq!(cfg.validate(), Err(LiquidityError::InvalidBucketWidth(-1.0)));

        let cfg = ChartConfig {
            zoom_factor: 1.0,
            ..ChartConfig::default()
        };
        assert_eq!(cfg.validate(), Err(LiquidityError::InvalidZoomFactor(1.0)));
    }

    #[test]
    fn limits_clamp_ranges() {
        let limits = TickLimits {
            min_index: -100,
            max_index: 100,
        };
        let clamped = limits.clamp_range(IndexRange::new(-500.0, 50.0));
        assert_eq!(clamped, IndexRange::new(-100.0, 50.0));
    }

    #[test]
    fn inverted_limits_clamp_without_panicking() {
        let limits = TickLimits {
            min_index: 10,
            max_index: -10,
        };
        assert_eq!(limits.bounds(), (-10.0, 10.0));
        assert_eq!(limits.span(), 20.0);
        assert_eq!(limits.clamp(500.0), 10.0);
        assert_eq!(
            limits.clamp_range(IndexRange::new(-50.0, 3.0)),
            IndexRange::new(-10.0, 3.0)
        );
    }

    #[test]
    fn env_or_falls_back_on_missing_keys() {
        assert_eq!(env_or("LIQUIDITY_TEST_KEY_THAT_IS_NEVER_SET", 7i64), 7);
    }
}
