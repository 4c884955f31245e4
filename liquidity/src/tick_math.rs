//! Tick index ↔ price conversions.
//!
//! A tick index `i` denotes the price `1.0001^i`. Both directions run in
//! double precision; decimal arithmetic is reserved for reserve amounts.

/// Price ratio between two adjacent ticks.
pub const TICK_BASE: f64 = 1.0001;

/// Rounding applied by [`price_to_tick_index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rounding {
    /// Keep the fractional index.
    #[default]
    None,
    /// Nearest index, halves rounded up (`-10.5 → -10`).
    Round,
    Ceil,
    Floor,
}

impl Rounding {
    pub fn apply(self, index: f64) -> f64 {
        match self {
            Rounding::None => index,
            Rounding::Round => round_half_up(index),
            Rounding::Ceil => index.ceil(),
            Rounding::Floor => index.floor(),
        }
    }
}

/// `1.0001^index`.
pub fn tick_index_to_price(index: f64) -> f64 {
    TICK_BASE.powf(index)
}

/// `ln(price) / ln(1.0001)`, optionally rounded.
///
/// Returns `None` for zero, negative or non-finite prices: such a price is
/// unavailable, not index zero.
pub fn price_to_tick_index(price: f64, rounding: Rounding) -> Option<f64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }

    Some(rounding.apply(price.ln() / TICK_BASE.ln()))
}

/// Number of ticks spanning a price multiple, e.g. `4.0` for a 4× range.
pub fn ticks_for_multiple(multiple: f64) -> f64 {
    multiple.ln() / TICK_BASE.ln()
}

/// Half-up rounding: `floor(x + 0.5)`.
///
/// `f64::round` rounds halves away from zero, which would put `-10.5` on
/// `-11` and shift every negative split point by one tick.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_zero_is_unit_price() {
        assert_eq!(tick_index_to_price(0.0), 1.0);
        assert_eq!(price_to_tick_index(1.0, Rounding::None), Some(0.0));
    }

    #[test]
    fn non_positive_price_is_unavailable() {
        assert_eq!(price_to_tick_index(0.0, Rounding::Round), None);
        assert_eq!(price_to_tick_index(-3.0, Rounding::None), None);
        assert_eq!(price_to_tick_index(f64::NAN, Rounding::None), None);
        assert_eq!(price_to_tick_index(f64::INFINITY, Rounding::None), None);
    }

    #[test]
    fn rounding_modes() {
        let idx = price_to_tick_index(tick_index_to_price(10.4), Rounding::None).unwrap();
        assert!((idx - 10.4).abs() < 1e-6);

        let p = tick_index_to_price(10.4);
        assert_eq!(price_to_tick_index(p, Rounding::Round), Some(10.0));
        assert_eq!(price_to_tick_index(p, Rounding::Ceil), Some(11.0));
        assert_eq!(price_to_tick_index(p, Rounding::Floor), Some(10.0));
    }

    #[test]
    fn halves_round_up_for_negative_indexes() {
        assert_eq!(round_half_up(-10.5), -10.0);
        assert_eq!(round_half_up(10.5), 11.0);
        assert_eq!(Rounding::Round.apply(-0.4), 0.0);
    }

    #[test]
    fn multiples_match_known_spans() {
        assert_eq!(ticks_for_multiple(10.0).round(), 23027.0);
        assert!((ticks_for_multiple(4.0) - 13863.6).abs() < 0.1);
    }
}
