use thiserror::Error;

/// Inputs the engine refuses to turn into chart geometry.
///
/// Empty books, missing prices and collapsed windows are not errors; they
/// resolve to fallbacks. These variants cover malformed data only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LiquidityError {
    #[error("tick {tick_index}: negative {field} reserve")]
    NegativeReserve {
        tick_index: i64,
        field: &'static str,
    },

    #[error("tick {tick_index}: negative fee")]
    NegativeFee { tick_index: i64 },

    #[error("tick {tick_index}: price must be positive")]
    NonPositivePrice { tick_index: i64 },

    #[error("tick {0}: price is not representable at this index")]
    UnrepresentablePrice(i64),

    #[error("invalid decimal for {field}: {value}")]
    InvalidDecimal { field: &'static str, value: String },

    #[error("{0} must be a finite number")]
    NonFinite(&'static str),

    #[error("bucket width must be positive, got {0}")]
    InvalidBucketWidth(f64),

    #[error("configured tick limits are inverted: min {min} >= max {max}")]
    InvertedLimits { min: i64, max: i64 },

    #[error("zoom factor must be greater than 1, got {0}")]
    InvalidZoomFactor(f64),

    #[error("{0} must be a price multiple greater than 1, got {1}")]
    InvalidMultiple(&'static str, f64),
}
