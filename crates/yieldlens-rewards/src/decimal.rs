// crates/yieldlens-rewards/src/decimal.rs
//
// Fixed-point helpers for e8s balances.
//
// Ratios (bonus multipliers, voting power shares) are floats; balances are
// integers. Multiplying a balance by a ratio goes through a u128 product of
// the balance and the ratio quantised to `precision` decimal digits, so the
// result is truncated the same way regardless of magnitude.

/// Highest precision accepted by [`mul_ratio`].
pub const MAX_MUL_PRECISION: u32 = 20;

/// Highest precision accepted by [`div_ratio`]. `u64::MAX * 10^18` still
/// fits in a u128.
pub const MAX_DIV_PRECISION: u32 = 18;

/// `floor(amount * ratio)` with `ratio` quantised to `precision` digits.
///
/// Non-finite or non-positive ratios yield zero. If the quantised product
/// would overflow a u128 the precision is reduced one digit at a time.
/// The result saturates at `u64::MAX`.
pub fn mul_ratio(amount: u64, ratio: f64, precision: u32) -> u64 {
    if !ratio.is_finite() || ratio <= 0.0 || amount == 0 {
        return 0;
    }

    let precision = precision.min(MAX_MUL_PRECISION);
    let whole = ratio.trunc();
    let frac = ratio - whole;

    let whole_part = (amount as u128).saturating_mul(whole as u128);

    let mut scale = 10u128.pow(precision);
    let mut frac_scaled = (frac * scale as f64) as u128;
    let frac_part = loop {
        match (amount as u128).checked_mul(frac_scaled) {
            Some(product) => break product / scale,
            None => {
                frac_scaled /= 10;
                scale /= 10;
            }
        }
    };

    let total = whole_part.saturating_add(frac_part);
    u64::try_from(total).unwrap_or(u64::MAX)
}

/// `numerator / denominator` truncated to `precision` digits.
///
/// A zero denominator yields `0.0`.
pub fn div_ratio(numerator: u64, denominator: u64, precision: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let precision = precision.min(MAX_DIV_PRECISION);
    let scale = 10u128.pow(precision);
    let scaled = (numerator as u128 * scale) / denominator as u128;
    scaled as f64 / scale as f64
}
