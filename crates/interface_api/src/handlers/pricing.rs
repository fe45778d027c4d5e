//! Pricing handlers

use axum::{extract::State, Json};

use domain_pricing::RegistrationForm;

use crate::dto::pricing::{QuoteResponse, ScheduleResponse};
use crate::{error::ApiError, AppState};

/// Returns the active price list
pub async fn get_schedule(State(state): State<AppState>) -> Json<ScheduleResponse> {
    Json(ScheduleResponse {
        rows: state.engine.schedule().rows(),
    })
}

/// Prices a registration form without issuing anything
pub async fn quote(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let invoice = state.engine.quote(form)?;
    Ok(Json(QuoteResponse::from(&invoice)))
}
