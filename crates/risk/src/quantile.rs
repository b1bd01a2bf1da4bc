use crate::error::RiskError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Reads the lower-tail quantile of a simulated PnL distribution.
///
/// For a confidence level ρ this returns the (1 − ρ)-quantile of `values`:
/// the outcome such that a fraction ρ of the simulated days are no worse.
/// The interpolation policy is fixed: sort ascending and read rank
/// `r = (1 − ρ)·(n − 1)`, linearly interpolating between the two
/// neighbouring order statistics when `r` is fractional. ρ = 1 therefore
/// reads the minimum, the "Worst" scenario.
pub fn lower_tail_quantile(values: &[Decimal], confidence: Decimal) -> Result<Decimal, RiskError> {
    if values.is_empty() {
        return Err(RiskError::EmptyVector);
    }
    if confidence <= Decimal::ZERO || confidence > Decimal::ONE {
        return Err(RiskError::InvalidConfidence(confidence));
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let n = sorted.len();
    if n == 1 {
        return Ok(sorted[0]);
    }

    let rank = (Decimal::ONE - confidence) * Decimal::from(n as u64 - 1);
    let lower = rank.floor();
    let fraction = rank - lower;
    // rank < n - 1 always holds here, so the index fits in usize.
    let index = lower.to_usize().unwrap_or(0);

    if fraction.is_zero() || index + 1 >= n {
        Ok(sorted[index])
    } else {
        Ok(sorted[index] + fraction * (sorted[index + 1] - sorted[index]))
    }
}
