use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{CaseRecord, GlassType, RepairItem};
use super::precheck::PrecheckEngine;
use super::pricing::{suggested_repair_items, validate_repair_items, RepairTotals};

/// Deductible applied to a quote when the request leaves it out.
pub const DEFAULT_DEDUCTIBLE: f64 = 250.0;

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteRequest {
    #[serde(default)]
    pub(crate) glass_type: Option<GlassType>,
    #[serde(default)]
    pub(crate) deductible: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuoteResponse {
    pub(crate) glass_type: Option<GlassType>,
    pub(crate) items: Vec<RepairItem>,
    pub(crate) totals: RepairTotals,
}

/// HTTP endpoints for running the approval precheck and quoting a repair.
pub fn case_router(engine: Arc<PrecheckEngine>) -> Router {
    Router::new()
        .route("/api/v1/cases/precheck", post(precheck_handler))
        .route("/api/v1/cases/quote", post(quote_handler))
        .with_state(engine)
}

pub(crate) async fn precheck_handler(
    State(engine): State<Arc<PrecheckEngine>>,
    Json(record): Json<CaseRecord>,
) -> Response {
    let errors = if record.repair_items.is_empty() {
        Vec::new()
    } else {
        validate_repair_items(&record.repair_items)
    };
    if !errors.is_empty() {
        let payload = json!({
            "error": "repair items are invalid",
            "details": errors,
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let outcome = engine.evaluate(&record);
    (StatusCode::OK, Json(outcome)).into_response()
}

pub(crate) async fn quote_handler(Json(request): Json<QuoteRequest>) -> Response {
    let deductible = request.deductible.unwrap_or(DEFAULT_DEDUCTIBLE);
    if !deductible.is_finite() || deductible < 0.0 {
        let payload = json!({ "error": "deductible cannot be negative" });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let items = suggested_repair_items(request.glass_type);
    let totals = RepairTotals::calculate(&items, deductible);

    let response = QuoteResponse {
        glass_type: request.glass_type,
        items,
        totals,
    };
    (StatusCode::OK, Json(response)).into_response()
}
