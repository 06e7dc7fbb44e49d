use super::error::ScenarioError;
use super::money::{finite_refund, round_cents};
use super::types::{
    CustomScenario, PayPeriods, Preference, RefundOutcome, Scenario, ScenarioLabel,
};

/// One row of the scenario menu. Only the retained share is stored; the share
/// spread across paychecks is always `100 - retained_percent`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ScenarioOption {
    label: ScenarioLabel,
    retained_percent: u8,
}

impl ScenarioOption {
    pub fn new(label: ScenarioLabel, retained_percent: u8) -> Result<Self, ScenarioError> {
        if retained_percent > 100 {
            return Err(ScenarioError::InvalidRetainedPercent {
                label,
                value: retained_percent,
            });
        }
        Ok(Self {
            label,
            retained_percent,
        })
    }

    pub fn label(self) -> ScenarioLabel {
        self.label
    }

    pub fn retained_percent(self) -> u8 {
        self.retained_percent
    }

    pub fn spread_percent(self) -> u8 {
        100 - self.retained_percent
    }
}

const STANDARD_MENU: [ScenarioOption; 3] = [
    ScenarioOption {
        label: ScenarioLabel::BiggerPaycheckNow,
        retained_percent: 30,
    },
    ScenarioOption {
        label: ScenarioLabel::BalancedOption,
        retained_percent: 60,
    },
    ScenarioOption {
        label: ScenarioLabel::BiggerRefundLater,
        retained_percent: 100,
    },
];

/// Ordered menu of trade-off points. Output order follows row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioTable {
    options: Vec<ScenarioOption>,
}

impl ScenarioTable {
    pub fn new(options: Vec<ScenarioOption>) -> Self {
        Self { options }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_MENU.to_vec())
    }

    pub fn options(&self) -> &[ScenarioOption] {
        &self.options
    }

    pub fn generate(
        &self,
        estimated_refund: f64,
        pay_periods: PayPeriods,
    ) -> Result<Vec<Scenario>, ScenarioError> {
        generate_from_options(&self.options, estimated_refund, pay_periods)
    }
}

impl Default for ScenarioTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builds the standard three-option menu: Bigger Paycheck Now, Balanced
/// Option, Bigger Refund Later, in that order.
pub fn generate_scenarios(
    estimated_refund: f64,
    pay_periods: PayPeriods,
) -> Result<Vec<Scenario>, ScenarioError> {
    generate_from_options(&STANDARD_MENU, estimated_refund, pay_periods)
}

/// Re-derives the custom scenario for one preference position.
pub fn simulate_custom(
    estimated_refund: f64,
    preference: Preference,
    pay_periods: PayPeriods,
) -> Result<CustomScenario, ScenarioError> {
    let refund = finite_refund(estimated_refund)?;
    Ok(custom_at(refund, preference.get(), pay_periods))
}

/// Evaluates the custom scenario at every `step` from 0 through 100. The
/// 100 endpoint is always present even when `step` does not divide 100.
pub fn simulate_sweep(
    estimated_refund: f64,
    pay_periods: PayPeriods,
    step: u32,
) -> Result<Vec<CustomScenario>, ScenarioError> {
    if !(1..=100).contains(&step) {
        return Err(ScenarioError::InvalidSweepStep { value: step });
    }
    let refund = finite_refund(estimated_refund)?;

    let mut points: Vec<CustomScenario> = (0..=100u8)
        .step_by(step as usize)
        .map(|preference| custom_at(refund, preference, pay_periods))
        .collect();
    if points.last().map(|point| point.preference) != Some(100) {
        points.push(custom_at(refund, 100, pay_periods));
    }
    Ok(points)
}

impl RefundOutcome {
    pub fn from_estimate(estimated_refund: f64) -> Result<Self, ScenarioError> {
        let cents = round_cents(finite_refund(estimated_refund)?);
        Ok(if cents > 0.0 {
            RefundOutcome::Refund
        } else if cents < 0.0 {
            RefundOutcome::BalanceDue
        } else {
            RefundOutcome::Even
        })
    }
}

fn generate_from_options(
    options: &[ScenarioOption],
    estimated_refund: f64,
    pay_periods: PayPeriods,
) -> Result<Vec<Scenario>, ScenarioError> {
    let refund = finite_refund(estimated_refund)?;
    Ok(options
        .iter()
        .map(|option| {
            let (refund_amount, per_check_gain) =
                split_refund(refund, option.spread_percent(), pay_periods);
            Scenario {
                label: option.label,
                refund_amount,
                per_check_gain,
                note: option.label.note(),
            }
        })
        .collect())
}

fn custom_at(refund: f64, preference: u8, pay_periods: PayPeriods) -> CustomScenario {
    let (refund_amount, per_check_gain) = split_refund(refund, preference, pay_periods);
    CustomScenario {
        preference,
        refund_amount,
        per_check_gain,
    }
}

// Both halves derive from the same `spread_percent`, so the retained and spread
// fractions always sum to one.
fn split_refund(refund: f64, spread_percent: u8, pay_periods: PayPeriods) -> (f64, f64) {
    let spread = f64::from(spread_percent) / 100.0;
    let retained = f64::from(100 - spread_percent) / 100.0;
    (
        round_cents(refund * retained),
        round_cents(refund * spread / pay_periods.as_f64()),
    )
}
