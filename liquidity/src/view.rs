//! Pixel ↔ tick-index mapping and zoom/pan steps.
//!
//! Pointer positions from drag selection arrive in pixels; zoom buttons and
//! panning produce the zoom window the extent resolver consumes. All results
//! stay inside the configured tick limits.

use crate::config::TickLimits;
use crate::extent::{ChartWindow, IndexRange};

/// Horizontal pixel of `index` in a container `width_px` wide.
pub fn index_to_x(window: &ChartWindow, width_px: f64, index: f64) -> f64 {
    (index - window.graph_min_index) / window.span() * width_px
}

/// Tick index under pixel `x`; `None` for a zero-width container.
pub fn x_to_index(window: &ChartWindow, width_px: f64, x: f64) -> Option<f64> {
    if width_px.is_nan() || width_px <= 0.0 {
        return None;
    }
    Some(window.graph_min_index + x / width_px * window.span())
}

/// Drag selection between two pixel positions as an index range.
pub fn selection_from_pixels(
    window: &ChartWindow,
    width_px: f64,
    from_x: f64,
    to_x: f64,
) -> Option<IndexRange> {
    let a = x_to_index(window, width_px, from_x)?;
    let b = x_to_index(window, width_px, to_x)?;
    Some(IndexRange::new(a, b))
}

/// Narrow the window around its midpoint by `factor`.
pub fn zoom_in(window: &ChartWindow, factor: f64, limits: &TickLimits) -> IndexRange {
    scale_span(window, 1.0 / factor, limits)
}

/// Widen the window around its midpoint by `factor`.
pub fn zoom_out(window: &ChartWindow, factor: f64, limits: &TickLimits) -> IndexRange {
    scale_span(window, factor, limits)
}

/// Shift the window by a pixel drag, keeping its span.
///
/// Dragging right (positive `delta_px`) moves the view toward lower indexes.
pub fn pan(window: &ChartWindow, width_px: f64, delta_px: f64, limits: &TickLimits) -> IndexRange {
    if width_px.is_nan() || width_px <= 0.0 {
        return limits.clamp_range(window.as_range());
    }

    let shift = -delta_px / width_px * window.span();
    let span = window.span().min(limits.span());

    // slide back inside the limits instead of shrinking
    let (lo_limit, hi_limit) = limits.bounds();
    let min = (window.graph_min_index + shift).clamp(lo_limit, hi_limit - span);

    IndexRange::new(min, min + span)
}

fn scale_span(window: &ChartWindow, factor: f64, limits: &TickLimits) -> IndexRange {
    let half = window.span() * factor / 2.0;
    let mid = window.midpoint();
    limits.clamp_range(IndexRange::new(mid - half, mid + half))
}
