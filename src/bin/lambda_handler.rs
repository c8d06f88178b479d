//! AWS Lambda handler for growth simulations
//!
//! Accepts a plan as JSON through a Lambda Function URL and returns the
//! simulation summary and per-age snapshots.

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use growth_projector::plan::{
    percent_to_fraction, ContributionPhase, InflationMode, LumpSum, Plan, SimulationParameters,
    ValidationOptions,
};
use growth_projector::projection::{SimulationSummary, YearSnapshot};
use growth_projector::scenario::ScenarioRunner;
use growth_projector::PlanError;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Input for one simulation
///
/// Rates are percentages here, matching what a form would submit.
#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    #[serde(default)]
    pub initial_investment: f64,

    /// Annual rate of return in percent (default: 7%)
    #[serde(default = "default_rate_pct")]
    pub rate_of_return_pct: f64,

    pub initial_age: u32,

    /// Inflation rate in percent (default: 2.3%)
    #[serde(default = "default_inflation_pct")]
    pub inflation_pct: f64,

    #[serde(default)]
    pub inflation_mode: InflationMode,

    #[serde(default)]
    pub phases: Vec<ContributionPhase>,

    #[serde(default)]
    pub lump_sums: Vec<LumpSum>,

    /// Accept overlapping phases (latest start wins)
    #[serde(default)]
    pub allow_overlaps: bool,
}

fn default_rate_pct() -> f64 {
    7.0
}

fn default_inflation_pct() -> f64 {
    2.3
}

impl SimulationRequest {
    fn to_plan(&self) -> Plan {
        let params = SimulationParameters::new(
            self.initial_investment,
            percent_to_fraction(self.rate_of_return_pct),
            self.initial_age,
        )
        .with_inflation(percent_to_fraction(self.inflation_pct), self.inflation_mode);

        Plan {
            params,
            phases: self.phases.clone(),
            lump_sums: self.lump_sums.clone(),
        }
    }
}

/// Output from the simulation
#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SimulationSummary>,
    pub snapshots: Vec<YearSnapshot>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SimulationResponse {
    fn failed(message: String, start: Instant) -> Self {
        Self {
            summary: None,
            snapshots: Vec::new(),
            execution_time_ms: start.elapsed().as_millis() as u64,
            error: Some(message),
        }
    }
}

fn json_response(status_code: i64, body: &SimulationResponse) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut response = LambdaFunctionUrlResponse {
        status_code,
        headers: Default::default(),
        body: Some(serde_json::to_string(body)?),
        is_base64_encoded: false,
        cookies: Vec::new(),
    };
    response.headers.insert("content-type", "application/json".parse()?);
    Ok(response)
}

fn run_simulation(request: &SimulationRequest, start: Instant) -> (i64, SimulationResponse) {
    let runner = ScenarioRunner::with_validation(ValidationOptions {
        reject_overlaps: !request.allow_overlaps,
        ..Default::default()
    });

    match runner.run(&request.to_plan()) {
        Ok(result) => (
            200,
            SimulationResponse {
                summary: Some(result.summary()),
                execution_time_ms: start.elapsed().as_millis() as u64,
                snapshots: result.snapshots,
                error: None,
            },
        ),
        Err(err @ (PlanError::Validation(_) | PlanError::Simulation(_))) => {
            (400, SimulationResponse::failed(err.to_string(), start))
        }
        Err(err) => (500, SimulationResponse::failed(err.to_string(), start)),
    }
}

async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = Instant::now();
    let body = event.payload.body.unwrap_or_default();

    let request: SimulationRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(err) => {
            log::warn!("Rejected request body: {}", err);
            let response = SimulationResponse::failed(format!("Invalid request: {}", err), start);
            return json_response(400, &response);
        }
    };

    let (status, response) = run_simulation(&request, start);
    log::info!(
        "Simulation finished with status {} in {} ms",
        status,
        response.execution_time_ms
    );
    json_response(status, &response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> SimulationRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_request_defaults_and_percent_conversion() {
        let plan = request(r#"{"initial_age": 30}"#).to_plan();
        assert!((plan.params.annual_rate_of_return - 0.07).abs() < 1e-12);
        assert!((plan.params.inflation_rate - 0.023).abs() < 1e-12);
        assert_eq!(plan.params.inflation_mode, InflationMode::Annual);
        assert!(plan.phases.is_empty());
    }

    #[test]
    fn test_successful_simulation() {
        let req = request(
            r#"{
                "initial_investment": 10000,
                "rate_of_return_pct": 9,
                "initial_age": 18,
                "phases": [{"start_age": 18, "end_age": 25, "monthly_contribution": 500}],
                "lump_sums": [{"age": 22, "amount": 10000}]
            }"#,
        );
        let (status, response) = run_simulation(&req, Instant::now());
        assert_eq!(status, 200);
        assert_eq!(response.snapshots.len(), 8);
        assert!(response.error.is_none());
    }

    #[test]
    fn test_overlap_is_a_client_error_unless_allowed() {
        let body = r#"{
            "initial_age": 20,
            "phases": [
                {"start_age": 20, "end_age": 30, "monthly_contribution": 100},
                {"start_age": 25, "end_age": 35, "monthly_contribution": 200}
            ]
        }"#;
        let (status, response) = run_simulation(&request(body), Instant::now());
        assert_eq!(status, 400);
        assert!(response.error.unwrap().contains("both active at age 25"));

        let mut allowed = request(body);
        allowed.allow_overlaps = true;
        let (status, _) = run_simulation(&allowed, Instant::now());
        assert_eq!(status, 200);
    }
}
