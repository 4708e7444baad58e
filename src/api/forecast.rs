use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::AppState;
use crate::forecast::{
    low_point, peak_point, placeholder_series, ForecastError, SeriesPoint, DEFAULT_LAST_DEMAND,
};
#[cfg(feature = "ml")]
use crate::forecast::{series_from_prediction, PEAK_LOAD_THRESHOLD_MW};

const UNKNOWN_PLACE: &str = "Unknown location";
const PLACEHOLDER_SUMMARY: &str =
    "Model artifacts not available yet. Using placeholder forecast data.";

/// Request body for the forecast endpoint. Both fields optional; no
/// validation beyond defaulting.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForecastRequest {
    pub place: Option<String>,
    #[serde(rename = "lastDemand")]
    pub last_demand: Option<DemandValue>,
    /// Snake-case spelling some clients send; camelCase wins when both
    /// appear. Two fields rather than a serde alias so a body carrying both
    /// keys still deserializes.
    #[serde(rename = "last_demand")]
    pub last_demand_snake: Option<DemandValue>,
}

/// Last-known demand as it arrives on the wire: a JSON number, or a string
/// that may or may not hold one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DemandValue {
    Number(f64),
    Text(String),
}

impl ForecastRequest {
    /// Numeric demand value, defaulting when absent or empty. A non-numeric
    /// string is an input error, not a default.
    #[cfg_attr(not(feature = "ml"), allow(dead_code))]
    fn resolve_demand(&self) -> Result<f64, ForecastError> {
        match self.last_demand.as_ref().or(self.last_demand_snake.as_ref()) {
            None => Ok(DEFAULT_LAST_DEMAND),
            Some(DemandValue::Number(n)) => Ok(*n),
            Some(DemandValue::Text(s)) if s.trim().is_empty() => Ok(DEFAULT_LAST_DEMAND),
            Some(DemandValue::Text(s)) => s.trim().parse().map_err(|_| {
                ForecastError::InvalidInput(format!("could not convert string to float: '{s}'"))
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub place: String,
    pub generated_at: String,
    pub summary: String,
    /// Always null; kept for wire compatibility with chart-rendering clients.
    pub chart_image_url: Option<String>,
    pub highlights: Vec<String>,
    pub series: Vec<SeriesPoint>,
}

/// OPTIONS /api/forecast - CORS preflight
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// POST /api/forecast - 24-hour demand forecast for a location
///
/// Always answers 200 with a forecast-shaped payload. Failures on the real
/// prediction path degrade to the placeholder series; the real/placeholder
/// distinction shows up only in the summary and status texts.
pub async fn forecast(State(state): State<AppState>, body: Bytes) -> Json<ForecastResponse> {
    // A missing or malformed body is treated as an empty request.
    let request: ForecastRequest = serde_json::from_slice(&body).unwrap_or_default();
    let place = request
        .place
        .clone()
        .unwrap_or_else(|| UNKNOWN_PLACE.to_string());

    let (series, summary, status) = match model_forecast(&state, &request) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(error = %err, "prediction unavailable, serving placeholder series");
            let mut rng = state.cfg.forecast.rng();
            (
                placeholder_series(&mut rng),
                PLACEHOLDER_SUMMARY.to_string(),
                format!("Model error: {err}"),
            )
        }
    };

    let peak = peak_point(&series);
    let low = low_point(&series);
    let highlights = vec![
        format!("Peak demand around {} at {} MW.", peak.hour, peak.demand),
        format!("Lowest demand around {} at {} MW.", low.hour, low.demand),
        status,
    ];

    Json(ForecastResponse {
        place,
        generated_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        summary,
        chart_image_url: None,
        highlights,
        series,
    })
}

type ForecastOutcome = (Vec<SeriesPoint>, String, String);

#[cfg(feature = "ml")]
fn model_forecast(
    state: &AppState,
    request: &ForecastRequest,
) -> Result<ForecastOutcome, ForecastError> {
    let last_demand = request.resolve_demand()?;
    let predicted = state.predictor.predict_next_demand(last_demand, None)?;
    let series = series_from_prediction(predicted);
    let summary = format!("Predicted next demand: {} MW.", format_mw(predicted));
    let status = if predicted > PEAK_LOAD_THRESHOLD_MW {
        "⚠️ Peak Load Detected".to_string()
    } else {
        "✅ Normal Load Condition".to_string()
    };
    Ok((series, summary, status))
}

#[cfg(not(feature = "ml"))]
fn model_forecast(
    _state: &AppState,
    _request: &ForecastRequest,
) -> Result<ForecastOutcome, ForecastError> {
    Err(ForecastError::ArtifactUnavailable(
        "model support not compiled in".to_string(),
    ))
}

/// Two decimals with thousands grouping, e.g. 61234.5 -> "61,234.50".
#[cfg_attr(not(feature = "ml"), allow(dead_code))]
fn format_mw(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    // Non-finite values format without a decimal point ("NaN", "inf");
    // pass them through untouched rather than panic.
    let (int_part, frac_part) = match digits.split_once('.') {
        Some(parts) => parts,
        None => return formatted,
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}.{frac_part}")
}
