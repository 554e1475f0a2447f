// Q23.8 fixed-point quantization, matching the consumer's `Fixed(Num<i32, 8>)`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Raw fixed-point integer as stored in the generated tables.
pub type I = i32;

pub const FRAC_BITS: u32 = 8;
pub const FIXED_SCALE: u32 = 1 << FRAC_BITS;

/// How a scaled real value becomes an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Toward zero. Biases every non-integer value toward the origin.
    #[default]
    Truncate,
    /// To the nearest integer, ties to even.
    Nearest,
}

impl Rounding {
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Rounding::Truncate => x.trunc(),
            Rounding::Nearest => x.round_ties_even(),
        }
    }
}

impl std::fmt::Display for Rounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rounding::Truncate => write!(f, "truncate"),
            Rounding::Nearest => write!(f, "nearest"),
        }
    }
}

/// Quantize `value` at `scale` (raw units per 1.0).
///
/// Fails with `InvalidParameter` for a zero scale. A result outside the `I`
/// range, or a non-finite input, is reported as an overflow with empty
/// location fields; the generator fills them in.
pub fn quantize(value: f64, scale: u32, rounding: Rounding) -> Result<I> {
    if scale == 0 {
        return Err(TableError::invalid("scale", "must be positive"));
    }
    let scaled = rounding.apply(value * scale as f64);
    if !scaled.is_finite() || scaled > I::MAX as f64 || scaled < I::MIN as f64 {
        return Err(TableError::Overflow {
            table: String::new(),
            column: String::new(),
            index: 0,
            value,
        });
    }
    // -0.0 lands on 0
    Ok(scaled as I)
}

#[inline]
pub fn dequantize(raw: I, scale: u32) -> f64 {
    raw as f64 / scale as f64
}

