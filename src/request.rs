use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::debug;

use crate::core::{
    CustomScenario, PayFrequency, PayPeriods, Preference, RefundOutcome, Scenario, ScenarioError,
    finite_refund, generate_scenarios, round_cents, simulate_custom, simulate_sweep,
};

pub const DEFAULT_PREFERENCE: f64 = 30.0;
pub const DEFAULT_SWEEP_STEP: u32 = 5;
// clap needs the bare `--sweep-step` value as a string; must parse to DEFAULT_SWEEP_STEP.
const DEFAULT_SWEEP_STEP_ARG: &str = "5";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliPayFrequency {
    Weekly,
    Biweekly,
    SemiMonthly,
    Monthly,
}

impl From<CliPayFrequency> for PayFrequency {
    fn from(value: CliPayFrequency) -> Self {
        match value {
            CliPayFrequency::Weekly => PayFrequency::Weekly,
            CliPayFrequency::Biweekly => PayFrequency::Biweekly,
            CliPayFrequency::SemiMonthly => PayFrequency::SemiMonthly,
            CliPayFrequency::Monthly => PayFrequency::Monthly,
        }
    }
}

/// Inputs shared by the `scenarios` subcommand and the HTTP payloads.
#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    #[arg(
        long,
        required = true,
        allow_negative_numbers = true,
        help = "Estimated year-end refund from the tax analysis; negative means tax owed"
    )]
    pub estimated_refund: Option<f64>,
    #[arg(
        long,
        conflicts_with = "pay_frequency",
        allow_negative_numbers = true,
        help = "Paychecks per year; defaults to the pay frequency, or 26"
    )]
    pub pay_periods: Option<f64>,
    #[arg(long, value_enum, help = "Pay schedule used when --pay-periods is not given")]
    pub pay_frequency: Option<CliPayFrequency>,
    #[arg(
        long,
        default_value_t = DEFAULT_PREFERENCE,
        allow_negative_numbers = true,
        help = "Percent of the refund to move into paychecks for the custom scenario (0-100)"
    )]
    pub preference: f64,
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = DEFAULT_SWEEP_STEP_ARG,
        help = "Also evaluate the custom scenario at every N percent (5 when N is omitted)"
    )]
    pub sweep_step: Option<u32>,
    #[arg(long, help = "Gross pay reported by the tax analysis")]
    pub gross_pay: Option<f64>,
    #[arg(long, help = "Year-to-date federal tax withheld reported by the tax analysis")]
    pub ytd_withheld: Option<f64>,
    #[arg(long, help = "Estimated tax owed reported by the tax analysis")]
    pub estimated_tax_owed: Option<f64>,
}

/// Upstream figures echoed back next to the suggestions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalysisSummary {
    pub gross_pay: Option<f64>,
    pub ytd_withheld: Option<f64>,
    pub estimated_tax_owed: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioRequest {
    pub estimated_refund: f64,
    pub pay_periods: PayPeriods,
    pub preference: Preference,
    pub sweep_step: Option<u32>,
    pub analysis: AnalysisSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub gross_pay: Option<f64>,
    pub ytd_withheld: Option<f64>,
    pub estimated_tax_owed: Option<f64>,
    pub estimated_refund: f64,
    pub pay_periods: PayPeriods,
    pub outcome: RefundOutcome,
    pub suggestions: Vec<Scenario>,
    pub custom: CustomScenario,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<Vec<CustomScenario>>,
}

pub fn default_args() -> ScenarioArgs {
    ScenarioArgs {
        estimated_refund: None,
        pay_periods: None,
        pay_frequency: None,
        preference: DEFAULT_PREFERENCE,
        sweep_step: None,
        gross_pay: None,
        ytd_withheld: None,
        estimated_tax_owed: None,
    }
}

pub fn build_request(args: ScenarioArgs) -> Result<ScenarioRequest, ScenarioError> {
    let estimated_refund =
        finite_refund(args.estimated_refund.ok_or(ScenarioError::NonFiniteRefund)?)?;

    let pay_periods = match (args.pay_periods, args.pay_frequency) {
        (Some(count), _) => PayPeriods::from_f64(count)?,
        (None, Some(frequency)) => PayFrequency::from(frequency).pay_periods(),
        (None, None) => PayPeriods::default(),
    };

    let preference = Preference::from_f64(args.preference)?;

    if let Some(step) = args.sweep_step {
        if !(1..=100).contains(&step) {
            return Err(ScenarioError::InvalidSweepStep { value: step });
        }
    }

    Ok(ScenarioRequest {
        estimated_refund,
        pay_periods,
        preference,
        sweep_step: args.sweep_step,
        analysis: AnalysisSummary {
            gross_pay: args.gross_pay,
            ytd_withheld: args.ytd_withheld,
            estimated_tax_owed: args.estimated_tax_owed,
        },
    })
}

pub fn build_report(request: &ScenarioRequest) -> Result<ScenarioReport, ScenarioError> {
    let refund = request.estimated_refund;
    let suggestions = generate_scenarios(refund, request.pay_periods)?;
    let custom = simulate_custom(refund, request.preference, request.pay_periods)?;
    let sweep = request
        .sweep_step
        .map(|step| simulate_sweep(refund, request.pay_periods, step))
        .transpose()?;

    debug!(
        estimated_refund = refund,
        pay_periods = request.pay_periods.get(),
        preference = request.preference.get(),
        "built scenario report"
    );

    Ok(ScenarioReport {
        gross_pay: request.analysis.gross_pay,
        ytd_withheld: request.analysis.ytd_withheld,
        estimated_tax_owed: request.analysis.estimated_tax_owed,
        estimated_refund: round_cents(refund),
        pay_periods: request.pay_periods,
        outcome: RefundOutcome::from_estimate(refund)?,
        suggestions,
        custom,
        sweep,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with_refund(refund: f64) -> ScenarioArgs {
        ScenarioArgs {
            estimated_refund: Some(refund),
            ..default_args()
        }
    }

    #[test]
    fn build_request_defaults_to_biweekly_and_preference_30() {
        let request = build_request(args_with_refund(2000.0)).expect("valid request");
        assert_eq!(request.pay_periods.get(), 26);
        assert_eq!(request.preference.get(), 30);
        assert_eq!(request.sweep_step, None);
    }

    #[test]
    fn build_request_uses_pay_frequency_when_count_missing() {
        let mut args = args_with_refund(2000.0);
        args.pay_frequency = Some(CliPayFrequency::SemiMonthly);
        let request = build_request(args).expect("valid request");
        assert_eq!(request.pay_periods.get(), 24);
    }

    #[test]
    fn build_request_prefers_explicit_pay_periods_over_frequency() {
        let mut args = args_with_refund(2000.0);
        args.pay_periods = Some(52.0);
        args.pay_frequency = Some(CliPayFrequency::Monthly);
        let request = build_request(args).expect("valid request");
        assert_eq!(request.pay_periods.get(), 52);
    }

    #[test]
    fn build_request_rejects_missing_refund() {
        let err = build_request(default_args()).expect_err("refund is required");
        assert_eq!(err, ScenarioError::NonFiniteRefund);
    }

    #[test]
    fn build_request_rejects_refund_that_overflows_in_cents() {
        let err = build_request(args_with_refund(f64::MAX / 4.0)).expect_err("must overflow");
        assert_eq!(err, ScenarioError::NonFiniteRefund);
    }

    #[test]
    fn build_request_rejects_explicit_zero_pay_periods() {
        let mut args = args_with_refund(2000.0);
        args.pay_periods = Some(0.0);
        args.pay_frequency = Some(CliPayFrequency::Biweekly);
        let err = build_request(args).expect_err("zero periods must not fall back");
        assert_eq!(err, ScenarioError::InvalidPeriodCount { value: 0.0 });
    }

    #[test]
    fn build_request_rejects_out_of_range_preference() {
        let mut args = args_with_refund(2000.0);
        args.preference = 101.0;
        let err = build_request(args).expect_err("must reject 101");
        assert!(err.to_string().contains("preference"));
    }

    #[test]
    fn bare_sweep_step_flag_matches_default_step() {
        assert_eq!(DEFAULT_SWEEP_STEP_ARG.parse::<u32>(), Ok(DEFAULT_SWEEP_STEP));
    }

    #[test]
    fn build_request_rejects_zero_sweep_step() {
        let mut args = args_with_refund(2000.0);
        args.sweep_step = Some(0);
        let err = build_request(args).expect_err("must reject step 0");
        assert_eq!(err, ScenarioError::InvalidSweepStep { value: 0 });
    }

    #[test]
    fn build_report_marks_balance_due_and_keeps_notes() {
        let request = build_request(args_with_refund(-260.0)).expect("valid request");
        let report = build_report(&request).expect("valid report");
        assert_eq!(report.outcome, RefundOutcome::BalanceDue);
        assert_eq!(report.suggestions.len(), 3);
        assert_eq!(
            report.suggestions[0].note,
            "Get more money now and a smaller refund later."
        );
        assert!(report.sweep.is_none());
    }

    #[test]
    fn build_report_includes_sweep_when_requested() {
        let mut args = args_with_refund(1000.0);
        args.sweep_step = Some(DEFAULT_SWEEP_STEP);
        let request = build_request(args).expect("valid request");
        let report = build_report(&request).expect("valid report");
        assert_eq!(report.sweep.map(|sweep| sweep.len()), Some(21));
    }
}
