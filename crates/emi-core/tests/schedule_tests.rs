use emi_core::loan::schedule::{self, AmortizationSchedule, ScheduleEntry};
use emi_core::loan::{emi, terms::LoanInput};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const BALANCE_TOL: Decimal = dec!(0.000001);

fn sum_by(entries: &[ScheduleEntry], f: impl Fn(&ScheduleEntry) -> Decimal) -> Decimal {
    entries.iter().map(f).sum()
}

// ===========================================================================
// Amortization schedule — scenarios
// ===========================================================================

#[test]
fn test_schedule_zero_interest_scenario() {
    let input = LoanInput::new(dec!(50000), dec!(0), 10).with_down_payment(dec!(10000));
    let entries = schedule::generate_amortization_schedule(&input).unwrap();

    assert_eq!(entries.len(), 10);
    for (i, e) in entries.iter().enumerate() {
        assert_eq!(e.month, i as u32 + 1);
        assert_eq!(e.installment, dec!(4000));
        assert_eq!(e.interest_component, Decimal::ZERO);
        assert_eq!(e.principal_component, dec!(4000));
        assert_eq!(e.remaining_balance, dec!(40000) - dec!(4000) * Decimal::from(i as u32 + 1));
    }
    assert_eq!(entries.last().unwrap().remaining_balance, Decimal::ZERO);
}

#[test]
fn test_schedule_9_5_pct_scenario() {
    let input = LoanInput::new(dec!(100000), dec!(9.5), 12);
    let out = emi::calculate_emi(&input).unwrap();
    let entries = schedule::generate_amortization_schedule(&input).unwrap();

    assert_eq!(entries.len(), 12);
    assert!(entries[11].remaining_balance < BALANCE_TOL);
    assert!((sum_by(&entries, |e| e.principal_component) - dec!(100000)).abs() < BALANCE_TOL);
    assert!(
        (sum_by(&entries, |e| e.interest_component) - out.total_interest).abs() < BALANCE_TOL
    );

    // Interest share shrinks month on month
    for pair in entries.windows(2) {
        assert!(pair[1].interest_component < pair[0].interest_component);
        assert!(pair[1].principal_component > pair[0].principal_component);
    }
}

#[test]
fn test_schedule_uses_emi_monthly_rate() {
    let input = LoanInput::new(dec!(25000), dec!(7.75), 36).with_down_payment(dec!(5000));
    let out = emi::calculate_emi(&input).unwrap();
    let entries: Vec<_> = AmortizationSchedule::new(&out).collect();

    for e in &entries {
        assert_eq!(e.interest_component, e.opening_balance * out.monthly_rate);
    }
    assert_eq!(entries, schedule::generate_amortization_schedule(&input).unwrap());
}

#[test]
fn test_schedule_rejects_invalid_input() {
    let mut input = LoanInput::new(dec!(1000), dec!(5), 12);
    input.duration_months = dec!(2.5);
    let err = schedule::generate_amortization_schedule(&input).unwrap_err();
    assert_eq!(err.reason(), "Duration must be a positive integer");
}

#[test]
fn test_build_schedule_serializes_entries() {
    let out = schedule::build_schedule(&LoanInput::new(dec!(1000), dec!(12), 2)).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    let entries = json["result"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["month"], 1);
    assert_eq!(json["methodology"], schedule::SCHEDULE_METHODOLOGY);
}

// ===========================================================================
// Properties
// ===========================================================================

fn valid_loan() -> impl Strategy<Value = LoanInput> {
    (
        100_000i64..1_000_000_000i64,
        0u32..90u32,
        0i64..3_000i64,
        1u32..=480u32,
    )
        .prop_map(|(cents, dp_pct, rate_bps, months)| {
            let principal = Decimal::new(cents, 2);
            let down = (principal * Decimal::from(dp_pct) / dec!(100)).round_dp(2);
            LoanInput::new(principal, Decimal::new(rate_bps, 2), months).with_down_payment(down)
        })
}

proptest! {
    #[test]
    fn prop_schedule_shape(input in valid_loan()) {
        let out = emi::calculate_emi(&input).unwrap();
        let entries = schedule::generate_amortization_schedule(&input).unwrap();

        prop_assert_eq!(entries.len() as u32, out.duration_months);
        for (i, e) in entries.iter().enumerate() {
            prop_assert_eq!(e.month, i as u32 + 1);
            prop_assert_eq!(e.installment, out.monthly_installment);
            prop_assert!(
                (e.interest_component + e.principal_component - e.installment).abs() < BALANCE_TOL
            );
            prop_assert!(e.remaining_balance >= Decimal::ZERO);
        }
        for pair in entries.windows(2) {
            prop_assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
        }
    }

    #[test]
    fn prop_schedule_fully_amortizes(input in valid_loan()) {
        let out = emi::calculate_emi(&input).unwrap();
        let entries = schedule::generate_amortization_schedule(&input).unwrap();

        prop_assert!(entries.last().unwrap().remaining_balance < BALANCE_TOL);
        prop_assert!(
            (sum_by(&entries, |e| e.principal_component) - out.loan_amount).abs() < BALANCE_TOL
        );
        prop_assert!(
            (sum_by(&entries, |e| e.interest_component) - out.total_interest).abs() < BALANCE_TOL
        );
    }

    #[test]
    fn prop_zero_rate_schedule_has_no_interest(
        cents in 100i64..1_000_000_000i64,
        months in 1u32..=480u32,
    ) {
        let input = LoanInput::new(Decimal::new(cents, 2), dec!(0), months);
        let entries = schedule::generate_amortization_schedule(&input).unwrap();
        prop_assert!(entries.iter().all(|e| e.interest_component.is_zero()));
    }
}
