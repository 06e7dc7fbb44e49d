use std::fmt;

use serde::Serialize;

use super::error::ScenarioError;

/// Number of paychecks per year.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PayPeriods(u32);

impl PayPeriods {
    pub const BIWEEKLY: PayPeriods = PayPeriods(26);

    pub fn new(count: i64) -> Result<Self, ScenarioError> {
        match u32::try_from(count) {
            Ok(count) if count > 0 => Ok(Self(count)),
            _ => Err(ScenarioError::InvalidPeriodCount {
                value: count as f64,
            }),
        }
    }

    /// Accepts a count that arrived as a JSON or CLI number. Fractional,
    /// non-positive and non-finite values are rejected rather than truncated.
    pub fn from_f64(value: f64) -> Result<Self, ScenarioError> {
        if !value.is_finite() || value.fract() != 0.0 || value <= 0.0 || value > f64::from(u32::MAX)
        {
            return Err(ScenarioError::InvalidPeriodCount { value });
        }
        Ok(Self(value as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub(super) fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for PayPeriods {
    fn default() -> Self {
        Self::BIWEEKLY
    }
}

/// Share of the refund, in whole percent, the user wants moved into each
/// paycheck. 0 keeps the whole refund, 100 converts all of it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Preference(u8);

impl Preference {
    pub const DEFAULT: Preference = Preference(30);

    pub fn new(percent: i64) -> Result<Self, ScenarioError> {
        match u8::try_from(percent) {
            Ok(percent) if percent <= 100 => Ok(Self(percent)),
            _ => Err(ScenarioError::InvalidPreference {
                value: percent as f64,
            }),
        }
    }

    pub fn from_f64(value: f64) -> Result<Self, ScenarioError> {
        if !value.is_finite() || value.fract() != 0.0 || !(0.0..=100.0).contains(&value) {
            return Err(ScenarioError::InvalidPreference { value });
        }
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Preference {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PayFrequency {
    Weekly,
    Biweekly,
    SemiMonthly,
    Monthly,
}

impl PayFrequency {
    pub fn pay_periods(self) -> PayPeriods {
        match self {
            PayFrequency::Weekly => PayPeriods(52),
            PayFrequency::Biweekly => PayPeriods::BIWEEKLY,
            PayFrequency::SemiMonthly => PayPeriods(24),
            PayFrequency::Monthly => PayPeriods(12),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum ScenarioLabel {
    #[serde(rename = "Bigger Paycheck Now")]
    BiggerPaycheckNow,
    #[serde(rename = "Balanced Option")]
    BalancedOption,
    #[serde(rename = "Bigger Refund Later")]
    BiggerRefundLater,
}

impl ScenarioLabel {
    pub fn name(self) -> &'static str {
        match self {
            ScenarioLabel::BiggerPaycheckNow => "Bigger Paycheck Now",
            ScenarioLabel::BalancedOption => "Balanced Option",
            ScenarioLabel::BiggerRefundLater => "Bigger Refund Later",
        }
    }

    pub fn note(self) -> &'static str {
        match self {
            ScenarioLabel::BiggerPaycheckNow => "Get more money now and a smaller refund later.",
            ScenarioLabel::BalancedOption => "Split the difference between paycheck and refund.",
            ScenarioLabel::BiggerRefundLater => "Stick to your current setup for a larger refund.",
        }
    }
}

impl fmt::Display for ScenarioLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub label: ScenarioLabel,
    pub refund_amount: f64,
    pub per_check_gain: f64,
    pub note: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomScenario {
    pub preference: u8,
    pub refund_amount: f64,
    pub per_check_gain: f64,
}

/// Sign of the upstream estimate. Scenario notes are written for the refund
/// case; presentation can branch on this for the other two.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefundOutcome {
    Refund,
    BalanceDue,
    Even,
}
