//! LiquidityChart
//!
//! Runs the whole engine for one render of the liquidity chart:
//!
//! ```text
//! ticks ─► discovery ─► edge price / edge index
//!       ─► data extent ─┐
//! zoom, selection ──────┴► extent resolver ─► window
//! window + viewport + edge ─► builder ─► bounds
//! bounds + token A ticks (Lower, as-is)        ─► filler ─┐
//! bounds + token B ticks (Upper, × edge price) ─► filler ─┴► merger ─► sorted buckets
//! ```
//!
//! Every call is independent: no state is kept between frames, so callers
//! recompute on each snapshot, resize or interaction and debounce as they see
//! fit.

use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use tracing::debug;

use common::logger::{TraceId, child_span, root_span};

use crate::bucket::builder::{BucketRequest, build_buckets};
use crate::bucket::filler::{ReserveValuation, fill_buckets};
use crate::bucket::merger::{merge_buckets, sort_by_lower_bound};
use crate::bucket::{MatchSide, MergedBucket};
use crate::config::ChartConfig;
use crate::discovery::discover;
use crate::error::LiquidityError;
use crate::extent::{ChartWindow, ExtentInputs, IndexRange, PriceExtent, resolve_window};
use crate::tick_math::{Rounding, price_to_tick_index, round_half_up, tick_index_to_price};
use crate::types::{Pair, TickSnapshot};

/// Pixel size of the chart container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
}

/// User-driven chart state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub zoom: Option<IndexRange>,
    pub selected_range: Option<IndexRange>,
    pub user_ticks: Vec<f64>,
}

/// Everything the chart needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    /// Equilibrium price; `None` when the book cannot bracket one.
    pub edge_price: Option<BigDecimal>,
    /// Fractional tick index of `edge_price`.
    pub edge_index: Option<f64>,
    pub window: ChartWindow,
    /// Ascending by lower bound.
    pub buckets: Vec<MergedBucket>,
    /// Largest single value of either token, for scaling bar heights.
    pub peak_value: BigDecimal,
}

pub struct LiquidityChart {
    config: ChartConfig,
}

impl LiquidityChart {
    pub fn new(config: ChartConfig) -> Result<Self, LiquidityError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn compute(
        &self,
        pair: &Pair,
        snapshot: &TickSnapshot,
        viewport: Viewport,
        interaction: &Interaction,
    ) -> Result<ChartFrame, LiquidityError> {
        let trace_id = TraceId::new();
        let span = root_span("liquidity_chart", &trace_id);
        span.record("pair_id", tracing::field::display(pair.id()));
        let _guard = span.enter();

        let equilibrium = {
            let _stage = child_span("discovery").entered();
            discover(&snapshot.token_a, &snapshot.token_b)
        };
        let edge_index = equilibrium
            .price
            .as_ref()
            .and_then(ToPrimitive::to_f64)
            .and_then(|p| price_to_tick_index(p, Rounding::None));

        let window = {
            let _stage = child_span("extent").entered();
            let inputs = ExtentInputs {
                data: PriceExtent::from_ticks(&snapshot.token_a, &snapshot.token_b),
                zoom: interaction.zoom,
                selected_range: interaction.selected_range,
                user_ticks: &interaction.user_ticks,
                edge_index,
            };
            resolve_window(&inputs, &self.config)
        };

        // without an equilibrium the window midpoint splits the two sides
        let split_index = edge_index.unwrap_or_else(|| window.midpoint());

        let buckets = {
            let _stage = child_span("buckets").entered();
            let layout = build_buckets(&BucketRequest {
                container_width_px: viewport.width_px,
                bucket_width_px: self.config.bucket_width_px,
                graph_min_index: window.graph_min_index,
                graph_max_index: window.graph_max_index,
                edge_price_index: split_index,
            })?;

            let bounds = layout.all();
            let edge = round_half_up(split_index) as i64;

            let token_b_valuation = equilibrium
                .price
                .clone()
                .or_else(|| BigDecimal::from_f64(tick_index_to_price(split_index)))
                .map_or(ReserveValuation::Identity, ReserveValuation::AtPrice);

            let filled_a = fill_buckets(
                &bounds,
                &snapshot.token_a,
                MatchSide::Lower,
                edge,
                &ReserveValuation::Identity,
            );
            let filled_b = fill_buckets(
                &bounds,
                &snapshot.token_b,
                MatchSide::Upper,
                edge,
                &token_b_valuation,
            );

            let mut merged = merge_buckets(&filled_a, &filled_b);
            sort_by_lower_bound(&mut merged);
            merged
        };

        let peak_value = buckets
            .iter()
            .flat_map(|b| [&b.reserve_value_a, &b.reserve_value_b])
            .max()
            .cloned()
            .unwrap_or_else(BigDecimal::zero);

        debug!(
            edge_index = ?edge_index,
            discarded = equilibrium.discarded,
            graph_min_index = window.graph_min_index,
            graph_max_index = window.graph_max_index,
            buckets = buckets.len(),
            "chart frame computed"
        );

        Ok(ChartFrame {
            edge_price: equilibrium.price,
            edge_index,
            window,
            buckets,
            peak_value,
        })
    }
}
