use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loan::terms::{validate, LoanInput, LoanTerms};
use crate::time_value::{checked, level_payment};
use crate::types::*;
use crate::LoanResult;

pub const EMI_METHODOLOGY: &str = "EMI (Level-Payment Amortizing Loan)";

/// Installment and totals for a validated loan, echoing its terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiOutput {
    pub principal: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub interest_rate: Percentage,
    pub monthly_rate: Rate,
    pub duration_months: u32,
    pub monthly_installment: Money,
    pub total_amount: Money,
    pub total_interest: Money,
}

impl EmiOutput {
    /// Copy with every money field rounded to `dp` places. The monthly rate
    /// is left untouched.
    pub fn rounded(&self, dp: u32) -> Self {
        EmiOutput {
            principal: round_money(self.principal, dp),
            down_payment: round_money(self.down_payment, dp),
            loan_amount: round_money(self.loan_amount, dp),
            interest_rate: self.interest_rate,
            monthly_rate: self.monthly_rate,
            duration_months: self.duration_months,
            monthly_installment: round_money(self.monthly_installment, dp),
            total_amount: round_money(self.total_amount, dp),
            total_interest: round_money(self.total_interest, dp),
        }
    }
}

/// Validate the request and compute the equated monthly installment.
pub fn calculate_emi(input: &LoanInput) -> LoanResult<EmiOutput> {
    let terms = validate(input)?;
    emi_for_terms(&terms)
}

/// Compute the installment and totals for already-validated terms.
pub fn emi_for_terms(terms: &LoanTerms) -> LoanResult<EmiOutput> {
    let periods = Decimal::from(terms.duration_months);

    let (monthly_installment, total_amount, total_interest) = if terms.monthly_rate.is_zero() {
        // Straight line: no interest accrues, so the totals are the loan itself
        (terms.loan_amount / periods, terms.loan_amount, Decimal::ZERO)
    } else {
        let installment =
            level_payment(terms.monthly_rate, terms.duration_months, terms.loan_amount)?;
        let total = checked(installment.checked_mul(periods), "total amount")?;
        // Rates near Decimal resolution can land a unit in the last place under the loan amount
        let interest = (total - terms.loan_amount).max(Decimal::ZERO);
        (installment, total, interest)
    };

    Ok(EmiOutput {
        principal: terms.principal,
        down_payment: terms.down_payment,
        loan_amount: terms.loan_amount,
        interest_rate: terms.interest_rate,
        monthly_rate: terms.monthly_rate,
        duration_months: terms.duration_months,
        monthly_installment,
        total_amount,
        total_interest,
    })
}

/// `calculate_emi` wrapped in the standard output envelope.
pub fn analyze_emi(input: &LoanInput) -> LoanResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let output = calculate_emi(input)?;
    let warnings = input_warnings(input, &output);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(EMI_METHODOLOGY, input, warnings, elapsed, output))
}

pub(crate) fn input_warnings(input: &LoanInput, output: &EmiOutput) -> Vec<String> {
    let mut warnings = Vec::new();
    if input.down_payment.is_none() {
        warnings.push("Down payment not supplied; assuming 0".into());
    }
    if output.monthly_rate.is_zero() {
        warnings.push(
            "Zero interest rate; installment is straight-line principal repayment".into(),
        );
    }
    warnings
}
