//! Month-by-month amortization of a level-payment loan.
//!
//! Each installment first pays the interest accrued on the opening balance
//! at the loan's monthly rate; the rest retires principal. The running
//! balance is clamped at zero so rounding residue in the final month never
//! shows up as a negative balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::time::Instant;

use crate::loan::emi::{calculate_emi, input_warnings, EmiOutput};
use crate::loan::terms::LoanInput;
use crate::types::*;
use crate::LoanResult;

pub const SCHEDULE_METHODOLOGY: &str = "Amortization Schedule (Level Payment, Declining Balance)";

/// A single month in the amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month index.
    pub month: u32,
    pub opening_balance: Money,
    pub installment: Money,
    pub interest_component: Money,
    pub principal_component: Money,
    pub remaining_balance: Money,
}

impl ScheduleEntry {
    pub fn rounded(&self, dp: u32) -> Self {
        ScheduleEntry {
            month: self.month,
            opening_balance: round_money(self.opening_balance, dp),
            installment: round_money(self.installment, dp),
            interest_component: round_money(self.interest_component, dp),
            principal_component: round_money(self.principal_component, dp),
            remaining_balance: round_money(self.remaining_balance, dp),
        }
    }
}

/// Full schedule with the loan it amortises and summed components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub loan: EmiOutput,
    pub entries: Vec<ScheduleEntry>,
    pub total_principal_paid: Money,
    pub total_interest_paid: Money,
}

impl ScheduleOutput {
    pub fn rounded(&self, dp: u32) -> Self {
        ScheduleOutput {
            loan: self.loan.rounded(dp),
            entries: self.entries.iter().map(|e| e.rounded(dp)).collect(),
            total_principal_paid: round_money(self.total_principal_paid, dp),
            total_interest_paid: round_money(self.total_interest_paid, dp),
        }
    }
}

/// Lazily yields one `ScheduleEntry` per month of the loan.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    installment: Money,
    monthly_rate: Rate,
    balance: Money,
    month: u32,
    duration_months: u32,
}

impl AmortizationSchedule {
    /// Start a schedule for a computed EMI. Uses the EMI's own monthly
    /// rate so interest splits match the installment's derivation.
    pub fn new(emi: &EmiOutput) -> Self {
        AmortizationSchedule {
            installment: emi.monthly_installment,
            monthly_rate: emi.monthly_rate,
            balance: emi.loan_amount,
            month: 0,
            duration_months: emi.duration_months,
        }
    }

    /// Balance still outstanding before the next month is applied.
    pub fn balance(&self) -> Money {
        self.balance
    }
}

impl Iterator for AmortizationSchedule {
    type Item = ScheduleEntry;

    fn next(&mut self) -> Option<ScheduleEntry> {
        if self.month >= self.duration_months {
            return None;
        }
        self.month += 1;

        let opening_balance = self.balance;
        let interest_component = opening_balance * self.monthly_rate;
        let principal_component = self.installment - interest_component;
        self.balance = (opening_balance - principal_component).max(Decimal::ZERO);

        Some(ScheduleEntry {
            month: self.month,
            opening_balance,
            installment: self.installment,
            interest_component,
            principal_component,
            remaining_balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.duration_months - self.month) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AmortizationSchedule {}

impl FusedIterator for AmortizationSchedule {}

/// Validate the request and produce the complete month-by-month schedule.
pub fn generate_amortization_schedule(input: &LoanInput) -> LoanResult<Vec<ScheduleEntry>> {
    let emi = calculate_emi(input)?;
    Ok(AmortizationSchedule::new(&emi).collect())
}

/// Schedule plus totals, wrapped in the standard output envelope.
pub fn build_schedule(input: &LoanInput) -> LoanResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let loan = calculate_emi(input)?;
    let warnings = input_warnings(input, &loan);

    let entries: Vec<ScheduleEntry> = AmortizationSchedule::new(&loan).collect();
    let total_principal_paid = entries.iter().map(|e| e.principal_component).sum();
    let total_interest_paid = entries.iter().map(|e| e.interest_component).sum();

    let output = ScheduleOutput {
        loan,
        entries,
        total_principal_paid,
        total_interest_paid,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        SCHEDULE_METHODOLOGY,
        input,
        warnings,
        elapsed,
        output,
    ))
}
