use std::str::FromStr;

use bigdecimal::{BigDecimal, FromPrimitive, One, Zero};
use serde::{Deserialize, Serialize};

use crate::error::LiquidityError;
use crate::tick_math::tick_index_to_price;

/// One price level's resting liquidity for one trading direction.
///
/// `reserve_self` is the quoting token of the list the tick belongs to and
/// `reserve_other` the counter token. Construct through [`Tick::new`] or
/// deserialize; both paths validate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TickRecord")]
pub struct Tick {
    pub tick_index: i64,
    pub price: BigDecimal,
    pub reserve_self: BigDecimal,
    pub reserve_other: BigDecimal,
    pub fee: BigDecimal,
}

impl Tick {
    pub fn new(
        tick_index: i64,
        price: BigDecimal,
        reserve_self: BigDecimal,
        reserve_other: BigDecimal,
        fee: BigDecimal,
    ) -> Result<Self, LiquidityError> {
        if price <= BigDecimal::zero() {
            return Err(LiquidityError::NonPositivePrice { tick_index });
        }
        if reserve_self < BigDecimal::zero() {
            return Err(LiquidityError::NegativeReserve {
                tick_index,
                field: "self",
            });
        }
        if reserve_other < BigDecimal::zero() {
            return Err(LiquidityError::NegativeReserve {
                tick_index,
                field: "other",
            });
        }
        if fee < BigDecimal::zero() {
            return Err(LiquidityError::NegativeFee { tick_index });
        }

        Ok(Self {
            tick_index,
            price,
            reserve_self,
            reserve_other,
            fee,
        })
    }

    /// Tick whose price is derived from its index.
    pub fn at_index(
        tick_index: i64,
        reserve_self: BigDecimal,
        reserve_other: BigDecimal,
        fee: BigDecimal,
    ) -> Result<Self, LiquidityError> {
        let price = BigDecimal::from_f64(tick_index_to_price(tick_index as f64))
            .ok_or(LiquidityError::UnrepresentablePrice(tick_index))?;

        Self::new(tick_index, price, reserve_self, reserve_other, fee)
    }

    /// `price × (1 + fee)`: the fee-inclusive price used by equilibrium search.
    pub fn virtual_price(&self) -> BigDecimal {
        &self.price * &(BigDecimal::one() + &self.fee)
    }

    pub fn has_liquidity(&self) -> bool {
        !self.reserve_self.is_zero() || !self.reserve_other.is_zero()
    }
}

/// Wire shape of a tick as served by the indexer: decimals as strings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TickRecord {
    pub tick_index: i64,
    pub price: String,
    pub reserve_self: String,
    pub reserve_other: String,
    #[serde(default)]
    pub fee: Option<String>,
}

fn parse_decimal(field: &'static str, value: &str) -> Result<BigDecimal, LiquidityError> {
    BigDecimal::from_str(value.trim()).map_err(|_| LiquidityError::InvalidDecimal {
        field,
        value: value.to_string(),
    })
}

impl TryFrom<TickRecord> for Tick {
    type Error = LiquidityError;

    fn try_from(record: TickRecord) -> Result<Self, Self::Error> {
        let fee = match record.fee.as_deref() {
            Some(raw) => parse_decimal("fee", raw)?,
            None => BigDecimal::zero(),
        };

        Tick::new(
            record.tick_index,
            parse_decimal("price", &record.price)?,
            parse_decimal("reserve_self", &record.reserve_self)?,
            parse_decimal("reserve_other", &record.reserve_other)?,
            fee,
        )
    }
}

/// Token pair shown on the chart. Token A is the low token (rests below the
/// current price), token B the high token.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub token_a: String,
    pub token_b: String,
}

impl Pair {
    pub fn new(token_a: impl Into<String>, token_b: impl Into<String>) -> Self {
        Self {
            token_a: token_a.into(),
            token_b: token_b.into(),
        }
    }

    pub fn id(&self) -> String {
        format!("{}/{}", self.token_a, self.token_b)
    }
}

/// Both one-sided tick lists of a pair at one point in time.
///
/// `token_a` ticks quote token A (`reserve_self` is A); `token_b` ticks quote
/// token B. Both lists share one price axis.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub token_a: Vec<Tick>,
    pub token_b: Vec<Tick>,
}

impl TickSnapshot {
    pub fn new(token_a: Vec<Tick>, token_b: Vec<Tick>) -> Self {
        Self { token_a, token_b }
    }

    pub fn is_empty(&self) -> bool {
        self.token_a.is_empty() && self.token_b.is_empty()
    }
}
