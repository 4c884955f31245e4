//! Chart Extent Resolver
//!
//! Decides which tick-index window the chart shows. Signals are combined in
//! priority order:
//!
//! 1. zoom window, clamped to the protocol limits, and intersected with the
//!    data extent when both exist (an empty intersection keeps the zoom)
//! 2. otherwise the known ends of the data extent
//! 3. unioned with the user's selected range and user-placed ticks
//! 4. with no signal at all: `edge ± ln(4)/ln(1.0001)` (centre 0 without an edge)
//!
//! A window collapsed to one index is widened by `round(ln(10)/ln(1.0001))`
//! ticks on each side, so `graph_min_index < graph_max_index` always holds.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::ChartConfig;
use crate::types::Tick;

/// Closed tick-index interval from user interaction (zoom, drag selection).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexRange {
    pub min: f64,
    pub max: f64,
}

impl IndexRange {
    /// Ends are reordered so that `min <= max`.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Index extent of the resting liquidity; either end may be unknown when one
/// side of the pair is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceExtent {
    pub min_index: Option<f64>,
    pub max_index: Option<f64>,
}

impl PriceExtent {
    /// Lowest token A tick and highest token B tick holding reserves.
    ///
    /// Only those two ends are read: in a crossed book, token A liquidity
    /// above the highest token B tick (or token B liquidity below the lowest
    /// token A tick) lies outside this extent and so outside the default
    /// window.
    pub fn from_ticks(token_a: &[Tick], token_b: &[Tick]) -> Self {
        let min_index = token_a
            .iter()
            .filter(|t| t.has_liquidity())
            .map(|t| t.tick_index)
            .min();
        let max_index = token_b
            .iter()
            .filter(|t| t.has_liquidity())
            .map(|t| t.tick_index)
            .max();

        Self {
            min_index: min_index.map(|i| i as f64),
            max_index: max_index.map(|i| i as f64),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.min_index.is_some() && self.max_index.is_some()
    }

    fn known(&self) -> impl Iterator<Item = f64> {
        self.min_index.into_iter().chain(self.max_index)
    }
}

/// Resolved axis range handed to the bucket builder. Always `min < max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartWindow {
    pub graph_min_index: f64,
    pub graph_max_index: f64,
}

impl ChartWindow {
    pub fn span(&self) -> f64 {
        self.graph_max_index - self.graph_min_index
    }

    pub fn midpoint(&self) -> f64 {
        (self.graph_min_index + self.graph_max_index) / 2.0
    }

    pub fn contains(&self, index: f64) -> bool {
        self.graph_min_index <= index && index <= self.graph_max_index
    }

    pub fn as_range(&self) -> IndexRange {
        IndexRange::new(self.graph_min_index, self.graph_max_index)
    }
}

/// Every signal the resolver looks at.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtentInputs<'a> {
    pub data: PriceExtent,
    pub zoom: Option<IndexRange>,
    pub selected_range: Option<IndexRange>,
    pub user_ticks: &'a [f64],
    pub edge_index: Option<f64>,
}

pub fn resolve_window(inputs: &ExtentInputs<'_>, config: &ChartConfig) -> ChartWindow {
    let mut values: Vec<f64> = Vec::new();

    match inputs.zoom.filter(IndexRange::is_finite) {
        Some(zoom) => {
            let zoom = config.limits.clamp_range(zoom);
            values.extend(intersect_with_data(zoom, &inputs.data));
        }
        None => values.extend(inputs.data.known()),
    }

    if let Some(range) = inputs.selected_range {
        values.extend([range.min, range.max]);
    }
    values.extend(inputs.user_ticks.iter().copied());

    let mut finite = values.into_iter().filter(|v| v.is_finite());

    let Some(first) = finite.next() else {
        let centre = inputs.edge_index.filter(|v| v.is_finite()).unwrap_or(0.0);
        let spread = config.default_spread();
        trace!(centre, spread, "no extent signal, using default window");
        return ChartWindow {
            graph_min_index: centre - spread,
            graph_max_index: centre + spread,
        };
    };

    let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min == max {
        let spread = config.degenerate_spread();
        trace!(index = min, spread, "collapsed window widened");
        return ChartWindow {
            graph_min_index: min - spread,
            graph_max_index: max + spread,
        };
    }

    ChartWindow {
        graph_min_index: min,
        graph_max_index: max,
    }
}

fn intersect_with_data(zoom: IndexRange, data: &PriceExtent) -> [f64; 2] {
    if let (Some(data_min), Some(data_max)) = (data.min_index, data.max_index) {
        let min = zoom.min.max(data_min);
        let max = zoom.max.min(data_max);
        if min <= max {
            return [min, max];
        }
    }
    [zoom.min, zoom.max]
}
