use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::LoanError;
use crate::types::{Money, Percentage, Rate};
use crate::LoanResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Lift a checked Decimal operation into a `LoanResult`.
pub(crate) fn checked(value: Option<Decimal>, context: &str) -> LoanResult<Decimal> {
    value.ok_or_else(|| {
        LoanError::FinancialImpossibility(format!("{context} exceeds decimal range"))
    })
}

/// Convert an annual percentage rate (9.5 = 9.5%) to a monthly decimal rate.
pub fn monthly_rate(annual_pct: Percentage) -> Rate {
    annual_pct / MONTHS_PER_YEAR / PERCENT
}

/// Discount factor (1 + rate)^-nper.
///
/// Built by repeated division rather than by raising to a power, so long
/// horizons at high rates underflow towards zero instead of overflowing.
pub fn discount_factor(rate: Rate, nper: u32) -> LoanResult<Decimal> {
    if rate <= dec!(-1) {
        return Err(LoanError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate must be greater than -100%".into(),
        });
    }

    let one_plus_r = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    for _ in 0..nper {
        factor = checked(factor.checked_div(one_plus_r), "discount factor")?;
        if factor.is_zero() {
            break;
        }
    }
    Ok(factor)
}

/// Level payment that amortises `present_value` over `nper` periods at `rate`.
///
/// Equivalent to `pv * r * (1+r)^n / ((1+r)^n - 1)`, evaluated as
/// `pv * r / (1 - (1+r)^-n)`. Returned as a positive amount for a positive
/// balance. A zero rate, or one below Decimal resolution over `nper`
/// periods, falls back to straight-line repayment.
pub fn level_payment(rate: Rate, nper: u32, present_value: Money) -> LoanResult<Money> {
    if nper == 0 {
        return Err(LoanError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    let periods = Decimal::from(nper);
    if rate.is_zero() {
        return Ok(present_value / periods);
    }

    let annuity_denominator = Decimal::ONE - discount_factor(rate, nper)?;
    if annuity_denominator.is_zero() {
        return Ok(present_value / periods);
    }

    let periodic_interest = checked(present_value.checked_mul(rate), "periodic interest")?;
    checked(
        periodic_interest.checked_div(annuity_denominator),
        "level payment",
    )
}

/// Present value of `nper` level payments of `payment` at `rate`.
pub fn annuity_present_value(rate: Rate, nper: u32, payment: Money) -> LoanResult<Money> {
    let periods = Decimal::from(nper);
    if rate.is_zero() {
        return checked(payment.checked_mul(periods), "annuity present value");
    }

    let annuity_factor = (Decimal::ONE - discount_factor(rate, nper)?) / rate;
    checked(
        payment.checked_mul(annuity_factor),
        "annuity present value",
    )
}
