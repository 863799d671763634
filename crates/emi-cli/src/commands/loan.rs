use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use emi_core::loan::emi;
use emi_core::loan::schedule;
use emi_core::loan::terms::LoanInput;

use crate::input;

/// Loan terms shared by `calculate` and `schedule`
#[derive(Args, Debug, Default)]
pub struct LoanArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Price being financed, before the down payment
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Upfront payment deducted from the principal (default 0)
    #[arg(long, allow_hyphen_values = true)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 9.5)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Loan duration in months
    #[arg(long, allow_hyphen_values = true)]
    pub months: Option<Decimal>,
}

pub fn run_calculate(
    args: LoanArgs,
    round: Option<u32>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan_input(args)?;
    let result = emi::analyze_emi(&loan_input)?;
    tracing::debug!(
        elapsed_us = result.metadata.computation_time_us,
        installment = %result.result.monthly_installment,
        "emi computed"
    );

    let result = match round {
        Some(dp) => result.map_result(|r| r.rounded(dp)),
        None => result,
    };
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(
    args: LoanArgs,
    round: Option<u32>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan_input(args)?;
    let result = schedule::build_schedule(&loan_input)?;
    tracing::debug!(
        elapsed_us = result.metadata.computation_time_us,
        months = result.result.entries.len(),
        "schedule built"
    );

    let result = match round {
        Some(dp) => result.map_result(|r| r.rounded(dp)),
        None => result,
    };
    Ok(serde_json::to_value(result)?)
}

fn resolve_loan_input(args: LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if args.input.is_some() {
        return loan_input_from(args, None);
    }
    let piped = input::stdin::read_stdin()?;
    loan_input_from(args, piped)
}

/// Input file, then piped JSON, then individual flags.
fn loan_input_from(
    args: LoanArgs,
    piped: Option<Value>,
) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        tracing::debug!(path = %path, "reading loan input from file");
        return input::file::read_input(path);
    }
    if let Some(data) = piped {
        tracing::debug!("reading loan input from stdin");
        return Ok(serde_json::from_value(data)?);
    }

    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let interest_rate = args.rate.ok_or("--rate is required (or provide --input)")?;
    let duration_months = args
        .months
        .ok_or("--months is required (or provide --input)")?;

    tracing::debug!("building loan input from flags");
    Ok(LoanInput {
        principal,
        down_payment: args.down_payment,
        interest_rate,
        duration_months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flag_args() -> LoanArgs {
        LoanArgs {
            principal: Some(Decimal::from(100000)),
            rate: Some("9.5".parse().unwrap()),
            months: Some(Decimal::from(12)),
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_build_input() {
        let input = loan_input_from(flag_args(), None).unwrap();
        assert_eq!(input.principal, Decimal::from(100000));
        assert_eq!(input.down_payment, None);
        assert_eq!(input.duration_months, Decimal::from(12));
    }

    #[test]
    fn test_missing_flag_names_it() {
        let mut args = flag_args();
        args.rate = None;
        let err = loan_input_from(args, None).unwrap_err();
        assert_eq!(err.to_string(), "--rate is required (or provide --input)");
    }

    #[test]
    fn test_piped_json_beats_flags() {
        let piped = json!({"principal": 2000, "interest_rate": 0, "duration_months": 4});
        let input = loan_input_from(flag_args(), Some(piped)).unwrap();
        assert_eq!(input.principal, Decimal::from(2000));
        assert_eq!(input.duration_months, Decimal::from(4));
    }
}
