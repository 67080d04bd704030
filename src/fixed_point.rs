//! Scaled fixed-point multiply/divide with explicit round-up accounting.
//!
//! Prices are scaled rationals (quote-per-base times [`SCALE`]); this module
//! is the only place that multiplies or divides two scaled quantities. The
//! 128-bit intermediate domain mirrors the teacher's own
//! `FeeSchedule::calculate_fee` (`orderbook/fees.rs`), which widens a `u128`
//! notional into `i128` before multiplying by a basis-point rate and
//! dividing back down — same shape, one integer width down since these
//! operands are `u64` rather than `u128`.
//!
//! Rounding is load-bearing in the matching loop (spec §4.1, §9): callers
//! decide whether to apply the "+1 when truncated" correction, this module
//! only reports whether truncation happened.

use thiserror::Error;

/// Fixed-point scale: `S = 10^9`.
pub const SCALE: u64 = 1_000_000_000;

/// Errors produced by the scale-aware multiply/divide helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixedPointError {
    /// The operation's result was zero where the caller required non-zero.
    #[error("fixed-point operation underflowed to zero")]
    Underflow,
    /// Division by zero was attempted.
    #[error("division by zero")]
    DivisionByZero,
}

/// Computes `floor(x * y / SCALE)`, returning whether the division truncated.
///
/// # Examples
///
/// ```
/// use clob_core::fixed_point::unsafe_mul;
/// let (value, rounded_down) = unsafe_mul(2_000_000_000, 3);
/// assert_eq!(value, 6);
/// assert!(!rounded_down);
/// ```
#[must_use]
pub fn unsafe_mul(x: u64, y: u64) -> (u64, bool) {
    let product = u128::from(x) * u128::from(y);
    let scale = u128::from(SCALE);
    let value = product / scale;
    let is_round_down = product % scale != 0;
    (value as u64, is_round_down)
}

/// Computes `floor(x * SCALE / y)`, returning whether the division truncated.
///
/// # Panics
///
/// Never panics; callers must check `y != 0` themselves (spec §4.1:
/// "Division by zero is a caller error").
#[must_use]
pub fn unsafe_div_round(x: u64, y: u64) -> (u64, bool) {
    debug_assert_ne!(y, 0, "unsafe_div_round: division by zero");
    let scaled = u128::from(x) * u128::from(SCALE);
    let divisor = u128::from(y);
    let value = scaled / divisor;
    let is_round_down = scaled % divisor != 0;
    (value as u64, is_round_down)
}

/// Like [`unsafe_mul`], but fails with [`FixedPointError::Underflow`] when
/// the result is zero.
pub fn mul(x: u64, y: u64) -> Result<u64, FixedPointError> {
    let (value, _) = unsafe_mul(x, y);
    if value == 0 {
        Err(FixedPointError::Underflow)
    } else {
        Ok(value)
    }
}

/// Like [`mul`], but rounds the result up by one when the underlying
/// multiplication truncated. Used selectively (spec §9): only at call
/// sites where the protocol wants the maker made whole despite truncation
/// (e.g. taker commission), never applied uniformly.
pub fn mul_round_up(x: u64, y: u64) -> Result<u64, FixedPointError> {
    let (value, is_round_down) = unsafe_mul(x, y);
    let value = if is_round_down { value + 1 } else { value };
    if value == 0 {
        Err(FixedPointError::Underflow)
    } else {
        Ok(value)
    }
}

/// Like [`unsafe_div_round`], but fails with [`FixedPointError::Underflow`]
/// when the result is zero. Returns [`FixedPointError::DivisionByZero`] if
/// `y == 0`.
pub fn div_round(x: u64, y: u64) -> Result<u64, FixedPointError> {
    if y == 0 {
        return Err(FixedPointError::DivisionByZero);
    }
    let (value, _) = unsafe_div_round(x, y);
    if value == 0 {
        Err(FixedPointError::Underflow)
    } else {
        Ok(value)
    }
}

/// Like [`div_round`], rounding the result up by one when the underlying
/// division truncated.
pub fn div_round_up(x: u64, y: u64) -> Result<u64, FixedPointError> {
    if y == 0 {
        return Err(FixedPointError::DivisionByZero);
    }
    let (value, is_round_down) = unsafe_div_round(x, y);
    let value = if is_round_down { value + 1 } else { value };
    if value == 0 {
        Err(FixedPointError::Underflow)
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsafe_mul_exact() {
        let (v, down) = unsafe_mul(5 * SCALE, 4);
        assert_eq!(v, 20);
        assert!(!down);
    }

    #[test]
    fn unsafe_mul_truncates() {
        // 3 * SCALE/2 truncates to 1 with remainder.
        let (v, down) = unsafe_mul(3, SCALE / 2 + 1);
        assert_eq!(v, 1);
        assert!(down);
    }

    #[test]
    fn mul_round_up_applies_correction() {
        let rounded = mul_round_up(3, SCALE / 2 + 1).unwrap();
        assert_eq!(rounded, 2);
    }

    #[test]
    fn mul_underflows_to_error() {
        assert_eq!(mul(1, 1).unwrap_err(), FixedPointError::Underflow);
    }

    #[test]
    fn div_round_exact() {
        let (v, down) = unsafe_div_round(10, 5);
        assert_eq!(v, 10 * SCALE / 5);
        assert!(!down);
    }

    #[test]
    fn div_round_up_rounds_up_on_remainder() {
        let plain = div_round(7, 3).unwrap();
        let rounded = div_round_up(7, 3).unwrap();
        assert!(rounded >= plain);
        assert_eq!(rounded, plain + 1);
    }

    #[test]
    fn div_round_zero_divisor_errors() {
        assert_eq!(
            div_round(1, 0).unwrap_err(),
            FixedPointError::DivisionByZero
        );
    }
}
