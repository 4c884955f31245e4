//! Tick-liquidity bucketing and price discovery.
//!
//! Turns per-tick reserve records of a token pair into a handful of
//! fixed-width chart buckets and estimates the pair's equilibrium price from
//! its two one-sided books. Everything here is pure and synchronous.
//!
//! - [`tick_math`]: tick index ↔ price (`1.0001^i`)
//! - [`discovery`]: equilibrium price with outlier elimination
//! - [`bucket`]: bucket bounds, per-token fill, two-token merge
//! - [`extent`]: which index window the chart shows
//! - [`view`]: pixel mapping, zoom and pan
//! - [`chart`]: the full pipeline for one frame

pub mod bucket;
pub mod chart;
pub mod config;
pub mod discovery;
pub mod error;
pub mod extent;
pub mod tick_math;
pub mod types;
pub mod view;

pub use chart::{ChartFrame, Interaction, LiquidityChart, Viewport};
pub use config::ChartConfig;
pub use error::LiquidityError;
pub use types::{Pair, Tick, TickSnapshot};
