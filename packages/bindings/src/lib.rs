use napi::Result as NapiResult;
use napi_derive::napi;

use emi_core::loan::terms::LoanInput;
use emi_core::loan::{emi, schedule};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Loan input plus an optional display rounding, as sent from JS.
#[derive(serde::Deserialize)]
struct LoanBindingInput {
    #[serde(flatten)]
    input: LoanInput,
    #[serde(default)]
    round: Option<u32>,
}

fn parse_input(input_json: &str) -> NapiResult<LoanBindingInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// EMI
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let binding_input = parse_input(&input_json)?;
    let output = emi::analyze_emi(&binding_input.input).map_err(to_napi_error)?;
    let output = match binding_input.round {
        Some(dp) => output.map_result(|r| r.rounded(dp)),
        None => output,
    };
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_amortization_schedule(input_json: String) -> NapiResult<String> {
    let binding_input = parse_input(&input_json)?;
    let entries = schedule::generate_amortization_schedule(&binding_input.input)
        .map_err(to_napi_error)?;
    let entries: Vec<_> = match binding_input.round {
        Some(dp) => entries.iter().map(|e| e.rounded(dp)).collect(),
        None => entries,
    };
    serde_json::to_string(&entries).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let binding_input = parse_input(&input_json)?;
    let output = schedule::build_schedule(&binding_input.input).map_err(to_napi_error)?;
    let output = match binding_input.round {
        Some(dp) => output.map_result(|r| r.rounded(dp)),
        None => output,
    };
    serde_json::to_string(&output).map_err(to_napi_error)
}
