use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use crate::core::{ScenarioError, simulate_custom};
use crate::request::{
    CliPayFrequency, ScenarioArgs, ScenarioRequest, build_report, build_request, default_args,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiPayFrequency {
    Weekly,
    #[serde(alias = "bi-weekly", alias = "fortnightly")]
    Biweekly,
    #[serde(alias = "semimonthly", alias = "semiMonthly", alias = "semi_monthly")]
    SemiMonthly,
    Monthly,
}

impl From<ApiPayFrequency> for CliPayFrequency {
    fn from(value: ApiPayFrequency) -> Self {
        match value {
            ApiPayFrequency::Weekly => CliPayFrequency::Weekly,
            ApiPayFrequency::Biweekly => CliPayFrequency::Biweekly,
            ApiPayFrequency::SemiMonthly => CliPayFrequency::SemiMonthly,
            ApiPayFrequency::Monthly => CliPayFrequency::Monthly,
        }
    }
}

// Field aliases accept the snake_case keys emitted by the tax-analysis service.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScenarioPayload {
    #[serde(alias = "estimated_refund")]
    estimated_refund: Option<f64>,
    #[serde(alias = "pay_periods")]
    pay_periods: Option<f64>,
    #[serde(alias = "pay_frequency")]
    pay_frequency: Option<ApiPayFrequency>,
    #[serde(alias = "sliderValue")]
    preference: Option<f64>,
    #[serde(alias = "sweep_step")]
    sweep_step: Option<u32>,
    #[serde(alias = "gross_pay")]
    gross_pay: Option<f64>,
    #[serde(alias = "ytd_withheld")]
    ytd_withheld: Option<f64>,
    #[serde(alias = "estimated_tax_owed")]
    estimated_tax_owed: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/scenarios",
            get(scenarios_get_handler).post(scenarios_post_handler),
        )
        .route(
            "/api/custom",
            get(custom_get_handler).post(custom_post_handler),
        )
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("PayCheckRight HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{port}/api/scenarios");

    axum::serve(listener, router()).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn scenarios_get_handler(Query(payload): Query<ScenarioPayload>) -> Response {
    scenarios_handler_impl(payload)
}

async fn scenarios_post_handler(Json(payload): Json<ScenarioPayload>) -> Response {
    scenarios_handler_impl(payload)
}

async fn custom_get_handler(Query(payload): Query<ScenarioPayload>) -> Response {
    custom_handler_impl(payload)
}

async fn custom_post_handler(Json(payload): Json<ScenarioPayload>) -> Response {
    custom_handler_impl(payload)
}

fn scenarios_handler_impl(payload: ScenarioPayload) -> Response {
    let report = api_request_from_payload(payload).and_then(|request| build_report(&request));
    match report {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => rejection_response(err),
    }
}

fn custom_handler_impl(mut payload: ScenarioPayload) -> Response {
    // The slider path returns one point; a sweep step is ignored, not validated.
    payload.sweep_step = None;
    let custom = api_request_from_payload(payload).and_then(|request| {
        simulate_custom(
            request.estimated_refund,
            request.preference,
            request.pay_periods,
        )
    });
    match custom {
        Ok(custom) => json_response(StatusCode::OK, custom),
        Err(err) => rejection_response(err),
    }
}

fn rejection_response(err: ScenarioError) -> Response {
    warn!(error = %err, "rejected scenario request");
    error_response(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ScenarioRequest, String> {
    let payload = serde_json::from_str::<ScenarioPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload).map_err(|e| e.to_string())
}

fn api_request_from_payload(payload: ScenarioPayload) -> Result<ScenarioRequest, ScenarioError> {
    let args = overlay_payload(default_args(), payload);
    debug!(?args, "resolved scenario payload");
    build_request(args)
}

fn overlay_payload(mut args: ScenarioArgs, payload: ScenarioPayload) -> ScenarioArgs {
    if let Some(v) = payload.estimated_refund {
        args.estimated_refund = Some(v);
    }
    if let Some(v) = payload.pay_periods {
        args.pay_periods = Some(v);
    }
    if let Some(v) = payload.pay_frequency {
        args.pay_frequency = Some(v.into());
    }
    if let Some(v) = payload.preference {
        args.preference = v;
    }
    if let Some(v) = payload.sweep_step {
        args.sweep_step = Some(v);
    }
    if let Some(v) = payload.gross_pay {
        args.gross_pay = Some(v);
    }
    if let Some(v) = payload.ytd_withheld {
        args.ytd_withheld = Some(v);
    }
    if let Some(v) = payload.estimated_tax_owed {
        args.estimated_tax_owed = Some(v);
    }
    args
}
