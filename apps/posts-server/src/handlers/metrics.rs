//! Metrics endpoint.

use actix_web::{HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Prometheus text exposition of the post service metrics.
///
/// GET /metrics
pub async fn metrics(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let body = state
        .metrics
        .render()
        .map_err(|e| AppError::Internal(format!("failed to encode metrics: {e}")))?;

    Ok(HttpResponse::Ok()
        .content_type(state.metrics.content_type())
        .body(body))
}
