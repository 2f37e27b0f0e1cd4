//! AWS Lambda handler for loan quotes
//!
//! Accepts a JSON body behind API Gateway and returns the monthly payment,
//! its display form, and the validation message when the input cannot be quoted.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use loan_origination::quote::{months_from_number, parse_amount, parse_months, RangeViolation};
use loan_origination::rates::RatePolicy;
use loan_origination::runner::{QuoteRequest, QuoteRunner};
use loan_origination::LoanPurpose;

/// A form value sent either as a JSON number or as the typed text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

/// Input for a single quote.
///
/// Absent, null, or unparseable fields read as 0 and quote as missing.
#[derive(Debug, Deserialize)]
pub struct QuoteBody {
    /// Amount borrowed
    #[serde(default)]
    pub amount: Option<FieldValue>,

    /// Duration in months
    #[serde(default)]
    pub duration: Option<FieldValue>,

    #[serde(default)]
    pub purpose: Option<LoanPurpose>,
}

impl QuoteBody {
    fn amount(&self) -> f64 {
        match &self.amount {
            Some(FieldValue::Number(v)) if v.is_finite() => *v,
            Some(FieldValue::Text(text)) => parse_amount(text),
            _ => 0.0,
        }
    }

    fn duration_months(&self) -> u32 {
        match &self.duration {
            Some(FieldValue::Number(v)) => months_from_number(*v),
            Some(FieldValue::Text(text)) => parse_months(text),
            None => 0,
        }
    }

    fn to_request(&self) -> QuoteRequest {
        QuoteRequest::new(self.amount(), self.duration_months(), self.purpose)
    }
}

/// Output of a single quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub monthly_payment: Option<i64>,
    pub display: String,
    pub annual_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<RangeViolation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn response(status: i64, body: String) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code: status,
        body: Some(Body::Text(body)),
        ..Default::default()
    }
}

fn error_response(status: i64, message: &str) -> ApiGatewayProxyResponse {
    let body = serde_json::json!({ "error": message });
    response(status, body.to_string())
}

/// Quote a parsed body; out-of-range input still answers 200 with the message
fn handle_body(runner: &QuoteRunner, body: &QuoteBody) -> QuoteResponse {
    let record = runner.quote(&body.to_request());

    QuoteResponse {
        monthly_payment: record.outcome.monthly_payment(),
        display: record.outcome.to_string(),
        annual_rate: record.annual_rate,
        violation: record.outcome.violation(),
        error: record.outcome.message().map(str::to_string),
    }
}

async fn handler(
    runner: &QuoteRunner,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let request = event.payload;

    if request.http_method.as_str() == "OPTIONS" {
        return Ok(response(200, String::new()));
    }

    let raw = request.body.unwrap_or_else(|| "{}".to_string());
    let body: QuoteBody = match serde_json::from_str(&raw) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("rejecting request body: {}", e);
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let result = handle_body(runner, &body);
    let request = body.to_request();
    log::info!(
        "quote amount={} duration={} -> {}",
        request.amount,
        request.duration_months,
        result.display
    );
    Ok(response(200, serde_json::to_string(&result)?))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let runner = QuoteRunner::new(RatePolicy::indicative());
    let runner = &runner;
    run(service_fn(move |event| handler(runner, event))).await
}
