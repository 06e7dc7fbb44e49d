mod engine;
mod error;
mod money;
mod types;

pub use engine::{
    ScenarioOption, ScenarioTable, generate_scenarios, simulate_custom, simulate_sweep,
};
pub use error::ScenarioError;
pub use money::{finite_refund, round_cents};
pub use types::{
    CustomScenario, PayFrequency, PayPeriods, Preference, RefundOutcome, Scenario, ScenarioLabel,
};
