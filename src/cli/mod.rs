use std::fmt::Write as _;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::info;

use crate::api::run_http_server;
use crate::core::{RefundOutcome, ScenarioError};
use crate::request::{ScenarioArgs, ScenarioReport, build_report, build_request};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Parser, Debug)]
#[command(
    name = "paycheckright",
    about = "W-4 withholding trade-offs: bigger paycheck now or bigger refund later"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the scenario API over HTTP
    Serve {
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Print the scenario menu and custom scenario for one refund estimate
    Scenarios {
        #[command(flatten)]
        args: ScenarioArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Serve { port } => {
            info!(port, "starting HTTP server");
            run_http_server(port).await?;
        }
        Command::Scenarios { args, format } => {
            let request = build_request(args)?;
            let report = build_report(&request)?;
            let output = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&report)?,
                OutputFormat::Text => render_text(&report),
            };
            println!("{output}");
        }
    }
    Ok(())
}

pub fn render_text(report: &ScenarioReport) -> String {
    let mut out = String::new();
    let headline = match report.outcome {
        RefundOutcome::Refund => "Estimated refund",
        RefundOutcome::BalanceDue => "Estimated amount owed",
        RefundOutcome::Even => "Estimated refund",
    };
    let _ = writeln!(
        out,
        "{headline}: {}",
        format_money(report.estimated_refund.abs())
    );
    for (name, value) in [
        ("Gross pay", report.gross_pay),
        ("YTD withheld", report.ytd_withheld),
        ("Estimated tax owed", report.estimated_tax_owed),
    ] {
        if let Some(value) = value {
            let _ = writeln!(out, "{name}: {}", format_money(value));
        }
    }
    let _ = writeln!(out, "Pay periods per year: {}", report.pay_periods.get());
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{:<22} {:>14} {:>14}",
        "Option", "Refund", "Per paycheck"
    );
    for scenario in &report.suggestions {
        let _ = writeln!(
            out,
            "{:<22} {:>14} {:>14}",
            scenario.label.name(),
            format_money(scenario.refund_amount),
            format_money(scenario.per_check_gain)
        );
        let _ = writeln!(out, "  {}", scenario.note);
    }

    let _ = writeln!(out);
    let custom_label = format!("Custom ({}%)", report.custom.preference);
    let _ = writeln!(
        out,
        "{:<22} {:>14} {:>14}",
        custom_label,
        format_money(report.custom.refund_amount),
        format_money(report.custom.per_check_gain)
    );

    if let Some(sweep) = &report.sweep {
        let _ = writeln!(out);
        let _ = writeln!(out, "{:>10} {:>14} {:>14}", "Convert", "Refund", "Per paycheck");
        for point in sweep {
            let _ = writeln!(
                out,
                "{:>9}% {:>14} {:>14}",
                point.preference,
                format_money(point.refund_amount),
                format_money(point.per_check_gain)
            );
        }
    }

    out.trim_end().to_string()
}

fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}
