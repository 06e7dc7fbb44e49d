use super::error::ScenarioError;

/// Rounds half away from zero to whole cents. Negative zero comes back as
/// positive zero so it never reaches a serialized amount.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Accepts a refund only if it stays finite once scaled to cents, so no
/// derived amount can round to infinity.
pub fn finite_refund(estimated_refund: f64) -> Result<f64, ScenarioError> {
    if (estimated_refund * 100.0).is_finite() {
        Ok(estimated_refund)
    } else {
        Err(ScenarioError::NonFiniteRefund)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_cents_rounds_half_away_from_zero() {
        assert_eq!(round_cents(0.125), 0.13);
        assert_eq!(round_cents(-0.125), -0.13);
        assert_eq!(round_cents(53.846_153), 53.85);
        assert_eq!(round_cents(23.076_923), 23.08);
    }

    #[test]
    fn round_cents_normalizes_negative_zero() {
        let rounded = round_cents(-0.001);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn finite_refund_rejects_nan_and_infinity() {
        assert_eq!(finite_refund(f64::NAN), Err(ScenarioError::NonFiniteRefund));
        assert_eq!(
            finite_refund(f64::INFINITY),
            Err(ScenarioError::NonFiniteRefund)
        );
        assert_eq!(finite_refund(-12.5), Ok(-12.5));
    }

    #[test]
    fn finite_refund_rejects_values_that_overflow_in_cents() {
        assert_eq!(
            finite_refund(f64::MAX / 4.0),
            Err(ScenarioError::NonFiniteRefund)
        );
        assert_eq!(
            finite_refund(-f64::MAX / 4.0),
            Err(ScenarioError::NonFiniteRefund)
        );
        assert_eq!(finite_refund(1e300), Ok(1e300));
    }
}
