//! Price Discovery
//!
//! Estimates the equilibrium ("edge") price of a pair from its two one-sided
//! tick lists when no trade has fixed an explicit price.
//!
//! ## Candidates
//! Every tick of both lists becomes a candidate on one shared price axis:
//!
//! ```text
//! (virtual_price, reserve_low, reserve_high)
//! virtual_price = price * (1 + fee)
//! ```
//!
//! The low token (token A) rests below the equilibrium, the high token
//! (token B) above it. Candidates are sorted ascending by virtual price.
//!
//! ## Search
//! - `H` = highest live candidate holding low-token reserve
//! - `L` = lowest live candidate holding high-token reserve
//!
//! If `L` sits at or above `H` the book brackets the price: equal prices
//! return that price, otherwise the midpoint. If `L` sits below `H` the book
//! overlaps and one side is an outlier: the candidate with the smaller value
//!
//! ```text
//! value(H) = H.reserve_low  * H.virtual_price
//! value(L) = L.reserve_high * L.virtual_price
//! ```
//!
//! is discarded (ties discard `L`) and the search repeats.
//!
//! The candidate snapshot is never mutated; discarded entries are masked
//! out, so the loop runs at most once per candidate.

use bigdecimal::{BigDecimal, Zero};
use tracing::trace;

use crate::types::Tick;

#[derive(Clone, Debug)]
struct Candidate {
    virtual_price: BigDecimal,
    reserve_low: BigDecimal,
    reserve_high: BigDecimal,
}

/// Outcome of one equilibrium search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Equilibrium {
    /// Edge price, `None` when the book cannot bracket one.
    pub price: Option<BigDecimal>,
    /// Number of outlier candidates discarded on the way.
    pub discarded: usize,
}

/// Equilibrium price of a pair from its token A and token B tick lists.
pub fn equilibrium_price(token_a: &[Tick], token_b: &[Tick]) -> Option<BigDecimal> {
    discover(token_a, token_b).price
}

/// Same as [`equilibrium_price`], also reporting how many outliers were dropped.
pub fn discover(token_a: &[Tick], token_b: &[Tick]) -> Equilibrium {
    let candidates = collect_candidates(token_a, token_b);
    let mut live = vec![true; candidates.len()];
    let mut discarded = 0;

    // each pass either returns or masks one more candidate
    for _ in 0..=candidates.len() {
        let high = (0..candidates.len())
            .rev()
            .find(|&i| live[i] && !candidates[i].reserve_low.is_zero());
        let low = (0..candidates.len()).find(|&i| live[i] && !candidates[i].reserve_high.is_zero());

        let (Some(h), Some(l)) = (high, low) else {
            return Equilibrium {
                price: None,
                discarded,
            };
        };

        let h_price = &candidates[h].virtual_price;
        let l_price = &candidates[l].virtual_price;

        if l_price == h_price {
            return Equilibrium {
                price: Some(l_price.clone()),
                discarded,
            };
        }

        if l_price > h_price {
            return Equilibrium {
                price: Some((l_price + h_price) / BigDecimal::from(2)),
                discarded,
            };
        }

        let h_value = &candidates[h].reserve_low * h_price;
        let l_value = &candidates[l].reserve_high * l_price;

        let outlier = if h_value < l_value { h } else { l };
        trace!(
            virtual_price = %candidates[outlier].virtual_price,
            h_value = %h_value,
            l_value = %l_value,
            "discarding overlapping outlier"
        );

        live[outlier] = false;
        discarded += 1;
    }

    Equilibrium {
        price: None,
        discarded,
    }
}

fn collect_candidates(token_a: &[Tick], token_b: &[Tick]) -> Vec<Candidate> {
    let from_a = token_a.iter().map(|tick| Candidate {
        virtual_price: tick.virtual_price(),
        reserve_low: tick.reserve_self.clone(),
        reserve_high: tick.reserve_other.clone(),
    });
    let from_b = token_b.iter().map(|tick| Candidate {
        virtual_price: tick.virtual_price(),
        reserve_low: tick.reserve_other.clone(),
        reserve_high: tick.reserve_self.clone(),
    });

    let mut candidates: Vec<Candidate> = from_a.chain(from_b).collect();
    candidates.sort_by(|a, b| a.virtual_price.cmp(&b.virtual_price));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(v: &str) -> BigDecimal {
        BigDecimal::from_str(v).unwrap()
    }

    /// Tick holding only its own quoting token: a bid in the token A list,
    /// an ask in the token B list.
    fn resting(price: &str, reserve: &str) -> Tick {
        Tick::new(0, dec(price), dec(reserve), dec("0"), dec("0")).unwrap()
    }

    #[test]
    fn no_liquidity_has_no_price() {
        assert_eq!(equilibrium_price(&[], &[]), None);
    }

    #[test]
    fn one_sided_book_has_no_price() {
        assert_eq!(equilibrium_price(&[resting("8", "5")], &[]), None);
        assert_eq!(equilibrium_price(&[], &[resting("10", "5")]), None);
    }

    #[test]
    fn bracketed_book_returns_midpoint() {
        let price = equilibrium_price(&[resting("8", "5")], &[resting("10", "5")]);
        assert_eq!(price, Some(dec("9")));
    }

    #[test]
    fn touching_book_returns_shared_price() {
        let price = equilibrium_price(&[resting("8", "5")], &[resting("8", "1")]);
        assert_eq!(price, Some(dec("8")));
    }

    #[test]
    fn small_overlapping_bids_are_discarded() {
        let bids = [resting("5", "1"), resting("6", "1"), resting("7", "1")];
        let asks = [resting("6.5", "100")];

        let out = discover(&bids, &asks);
        assert_eq!(out.price, Some(dec("6.25")));
        assert_eq!(out.discarded, 1);
    }

    #[test]
    fn small_overlapping_ask_is_discarded() {
        let bids = [resting("7", "100")];
        let asks = [resting("6.5", "1"), resting("8", "1")];

        let out = discover(&bids, &asks);
        assert_eq!(out.price, Some(dec("7.5")));
        assert_eq!(out.discarded, 1);
    }

    #[test]
    fn equal_values_discard_the_ask() {
        // value(H) = 1 * 7, value(L) = 2 * 3.5
        let bids = [resting("7", "1")];
        let asks = [resting("3.5", "2"), resting("9", "1")];

        assert_eq!(equilibrium_price(&bids, &asks), Some(dec("8")));
    }

    #[test]
    fn fees_shift_virtual_prices() {
        let bids = [resting("9", "1")];
        let asks = [Tick::new(0, dec("10"), dec("1"), dec("0"), dec("0.1")).unwrap()];

        // ask virtual price is 11
        assert_eq!(equilibrium_price(&bids, &asks), Some(dec("10")));
    }

    #[test]
    fn tick_with_both_reserves_prices_itself() {
        let both = Tick::new(0, dec("4"), dec("2"), dec("3"), dec("0")).unwrap();
        assert_eq!(equilibrium_price(&[both], &[]), Some(dec("4")));
    }

    #[test]
    fn fully_crossed_book_exhausts_without_error() {
        // every discard leaves another overlap until one side runs dry
        let bids = [resting("10", "1"), resting("11", "1")];
        let asks = [resting("1", "1000")];

        let out = discover(&bids, &asks);
        assert_eq!(out.price, None);
        assert_eq!(out.discarded, 2);
    }
}
