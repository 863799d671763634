//! Raw loan input and its validated counterpart.
//!
//! `LoanInput` mirrors what a caller (CLI flags, a JSON document, a JS
//! object) supplies. `validate` is the only way to obtain `LoanTerms`, so
//! every computation downstream works on checked values and a single,
//! shared monthly rate.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::time_value::monthly_rate;
use crate::types::{Money, Percentage, Rate};
use crate::LoanResult;

pub const PRINCIPAL_REASON: &str = "Principal must be a positive number";
pub const DOWN_PAYMENT_REASON: &str = "Down payment must be a non-negative number";
pub const INTEREST_RATE_REASON: &str = "Interest rate must be a non-negative number";
pub const DURATION_REASON: &str = "Duration must be a positive integer";
pub const LOAN_AMOUNT_REASON: &str = "Loan amount after down payment must be positive";

/// Loan request as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Price of the asset being financed, before any down payment.
    pub principal: Money,
    /// Upfront payment deducted from the principal. Absent means zero.
    #[serde(default, alias = "downPayment", skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<Money>,
    /// Annual interest rate as a percentage (9.5 = 9.5% p.a.).
    #[serde(alias = "interestRate")]
    pub interest_rate: Percentage,
    /// Loan term in months. Kept as a raw number so fractional or negative
    /// terms are reported as a validation failure, not a parse failure.
    #[serde(alias = "durationInMonths", alias = "duration_in_months")]
    pub duration_months: Decimal,
}

impl LoanInput {
    pub fn new(principal: Money, interest_rate: Percentage, duration_months: u32) -> Self {
        LoanInput {
            principal,
            down_payment: None,
            interest_rate,
            duration_months: Decimal::from(duration_months),
        }
    }

    pub fn with_down_payment(mut self, down_payment: Money) -> Self {
        self.down_payment = Some(down_payment);
        self
    }
}

/// Validated loan terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct LoanTerms {
    pub principal: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub interest_rate: Percentage,
    pub monthly_rate: Rate,
    pub duration_months: u32,
}

/// Check every precondition in order and derive the financed amount and
/// monthly rate. The first violated rule is reported.
pub fn validate(input: &LoanInput) -> LoanResult<LoanTerms> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanError::invalid("principal", PRINCIPAL_REASON));
    }

    let down_payment = input.down_payment.unwrap_or(Decimal::ZERO);
    if down_payment < Decimal::ZERO {
        return Err(LoanError::invalid("down_payment", DOWN_PAYMENT_REASON));
    }

    if input.interest_rate < Decimal::ZERO {
        return Err(LoanError::invalid("interest_rate", INTEREST_RATE_REASON));
    }

    let duration_months = parse_duration(input.duration_months)
        .ok_or_else(|| LoanError::invalid("duration_months", DURATION_REASON))?;

    let loan_amount = input.principal - down_payment;
    if loan_amount <= Decimal::ZERO {
        return Err(LoanError::invalid("loan_amount", LOAN_AMOUNT_REASON));
    }

    Ok(LoanTerms {
        principal: input.principal,
        down_payment,
        loan_amount,
        interest_rate: input.interest_rate,
        monthly_rate: monthly_rate(input.interest_rate),
        duration_months,
    })
}

fn parse_duration(raw: Decimal) -> Option<u32> {
    if raw <= Decimal::ZERO || !raw.fract().is_zero() {
        return None;
    }
    raw.to_u32()
}
