//! src/routes/vars.rs

use actix_web::{web, HttpResponse};

use crate::metrics::Metrics;

/// Counter snapshot in the classic debug-vars shape: everything under one
/// top level `metrics` key.
pub async fn debug_vars(metrics: web::Data<Metrics>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "metrics": metrics.snapshot() }))
}
