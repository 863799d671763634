//! Level-payment consumer loans: input validation, EMI, amortization schedule.

pub mod emi;
pub mod terms;

#[cfg(feature = "schedule")]
pub mod schedule;
