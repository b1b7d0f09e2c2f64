use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CalculatorError, Result};
use crate::inputs::{Field, RepaymentType};

/// monthly payment and total repaid over the term, both to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentResult {
    pub monthly_payment: Decimal,
    pub total_repayment: Decimal,
}

/// annual percentage to monthly decimal rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

pub fn payment_count(term_years: f64) -> f64 {
    term_years * 12.0
}

/// Computes the monthly payment and total repayment for a mortgage.
///
/// Repayment mortgages use the annuity formula `P * r * x / (x - 1)` with
/// `x = (1 + r)^n`. When `x` is exactly 1 (a zero rate, or one too small to
/// register) the payment is `P / n`. When `x` overflows, the payment is the
/// limit `P * r`. Interest-only mortgages pay `P * r` a
/// month and the principal as a lump sum at the end of the term.
///
/// Totals are computed from the unrounded monthly figure; both outputs are
/// then rounded half away from zero.
pub fn calculate(
    principal: f64,
    term_years: f64,
    annual_rate_percent: f64,
    repayment_type: RepaymentType,
) -> Result<RepaymentResult> {
    if !(principal > 0.0) {
        return Err(CalculatorError::NotPositive {
            field: Field::Principal,
        });
    }
    if !(term_years > 0.0) {
        return Err(CalculatorError::NotPositive {
            field: Field::TermYears,
        });
    }
    if annual_rate_percent < 0.0 {
        return Err(CalculatorError::NegativeRate {
            rate: annual_rate_percent,
        });
    }

    let rate = monthly_rate(annual_rate_percent);
    let payments = payment_count(term_years);

    let (monthly, total) = match repayment_type {
        RepaymentType::Repayment => {
            let x = (1.0 + rate).powf(payments);
            let monthly = if x == 1.0 {
                principal / payments
            } else if x.is_infinite() {
                principal * rate
            } else {
                principal * rate * x / (x - 1.0)
            };
            (monthly, monthly * payments)
        }
        RepaymentType::InterestOnly => {
            let monthly = principal * rate;
            (monthly, monthly * payments + principal)
        }
    };

    log::debug!(
        "calculated {:?}: r={} n={} monthly={} total={}",
        repayment_type,
        rate,
        payments,
        monthly,
        total
    );

    Ok(RepaymentResult {
        monthly_payment: round_money(monthly)?,
        total_repayment: round_money(total)?,
    })
}

/// Rounds to 2 decimal places, midpoint away from zero.
///
/// The float is first read as its shortest decimal form, so `1.005` becomes
/// `1.01` rather than the `1.00` its binary value would round to.
pub fn round_money(value: f64) -> Result<Decimal> {
    let decimal = Decimal::from_f64(value).ok_or_else(|| CalculatorError::OutOfRange {
        message: format!("{value} cannot be represented as a money amount"),
    })?;
    Ok(decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;

    #[test]
    fn test_repayment_mortgage() {
        let result = calculate(200_000.0, 25.0, 5.25, RepaymentType::Repayment).unwrap();

        assert!((monthly_rate(5.25) - 0.004375).abs() < 1e-15);
        assert_eq!(payment_count(25.0), 300.0);
        assert_eq!(result.monthly_payment, dec!(1198.50));
        assert_eq!(result.total_repayment, dec!(359548.63));
    }

    #[test]
    fn test_interest_only_mortgage() {
        let result = calculate(200_000.0, 25.0, 5.25, RepaymentType::InterestOnly).unwrap();

        assert_eq!(result.monthly_payment, dec!(875.00));
        assert_eq!(result.total_repayment, dec!(462500.00));
    }

    #[test]
    fn test_zero_rate_falls_back_to_even_split() {
        let result = calculate(100_000.0, 10.0, 0.0, RepaymentType::Repayment).unwrap();
        assert_eq!(result.monthly_payment, dec!(833.33));
        assert_eq!(result.total_repayment, dec!(100000.00));

        let result = calculate(100_000.0, 10.0, 0.0, RepaymentType::InterestOnly).unwrap();
        assert_eq!(result.monthly_payment, Decimal::ZERO);
        assert_eq!(result.total_repayment, dec!(100000.00));
    }

    #[test]
    fn test_vanishing_rate_does_not_divide_by_zero() {
        let result = calculate(120_000.0, 10.0, 1e-15, RepaymentType::Repayment).unwrap();
        assert_eq!(result.monthly_payment, dec!(1000.00));
    }

    #[test]
    fn test_very_long_term_approaches_interest_only() {
        // (1 + r)^n overflows to infinity here
        let result = calculate(200_000.0, 100_000.0, 5.0, RepaymentType::Repayment).unwrap();
        assert_eq!(result.monthly_payment, dec!(833.33));
        assert_eq!(result.total_repayment, dec!(1000000000.00));
    }

    #[test]
    fn test_monthly_payment_satisfies_annuity_formula() {
        let cases = [
            (150_000.0, 30.0, 3.5),
            (250_000.0, 15.0, 6.0),
            (80_000.0, 5.5, 12.75),
        ];

        for (principal, years, rate_percent) in cases {
            let result = calculate(principal, years, rate_percent, RepaymentType::Repayment).unwrap();
            let monthly = result.monthly_payment.to_f64().unwrap();
            let r = monthly_rate(rate_percent);
            let n = payment_count(years);

            // present value of all payments should come back to the principal
            let present_value = monthly * (1.0 - (1.0 + r).powf(-n)) / r;
            assert!(
                (present_value - principal).abs() < n * 0.01,
                "pv {present_value} vs principal {principal}"
            );

            let total = result.total_repayment.to_f64().unwrap();
            assert!((total - monthly * n).abs() < n * 0.005 + 0.01);
        }
    }

    #[test]
    fn test_interest_only_identity() {
        let result = calculate(80_000.0, 20.0, 6.0, RepaymentType::InterestOnly).unwrap();
        assert_eq!(result.monthly_payment, dec!(400.00));
        assert_eq!(result.total_repayment, dec!(400.00) * dec!(240) + dec!(80000));
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let first = calculate(315_000.0, 35.0, 4.1, RepaymentType::Repayment).unwrap();
        let second = calculate(315_000.0, 35.0, 4.1, RepaymentType::Repayment).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_non_positive_principal_and_term() {
        assert_eq!(
            calculate(0.0, 25.0, 5.0, RepaymentType::Repayment),
            Err(CalculatorError::NotPositive { field: Field::Principal })
        );
        assert_eq!(
            calculate(-5.0, 25.0, 5.0, RepaymentType::InterestOnly),
            Err(CalculatorError::NotPositive { field: Field::Principal })
        );
        assert_eq!(
            calculate(100_000.0, 0.0, 5.0, RepaymentType::Repayment),
            Err(CalculatorError::NotPositive { field: Field::TermYears })
        );
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = calculate(100_000.0, 25.0, -1.0, RepaymentType::Repayment).unwrap_err();
        assert_eq!(err.field(), Some(Field::InterestRate));
    }

    #[test]
    fn test_overflowing_result_is_out_of_range() {
        let err = calculate(1e300, 25.0, 5.0, RepaymentType::InterestOnly).unwrap_err();
        assert!(matches!(err, CalculatorError::OutOfRange { .. }));
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // banker's rounding would give 0.12
        assert_eq!(round_money(0.125).unwrap(), dec!(0.13));
        assert_eq!(round_money(2.5).unwrap(), dec!(2.50));
        assert_eq!(round_money(874.9999999999999).unwrap(), dec!(875.00));
        // the shortest decimal form is rounded, not the exact binary value
        assert_eq!(round_money(1.005).unwrap(), dec!(1.01));
        assert_eq!(round_money(2.675).unwrap(), dec!(2.68));
    }
}
