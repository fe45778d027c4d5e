//! Invoice handlers

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use tracing::instrument;

use domain_invoicing::{DisplayMetadata, NotificationTemplate};
use domain_pricing::PricedInvoice;

use crate::dto::invoices::{InvoiceRequest, NotificationResponse};
use crate::{error::ApiError, AppState};

/// Prices the request and resolves its event into display metadata
async fn prepare(
    state: &AppState,
    request: &InvoiceRequest,
) -> Result<(PricedInvoice, DisplayMetadata), ApiError> {
    let selections = request.form.clone().into_selections()?;
    let event = state.catalog.get(&request.event_id).await?;
    let invoice = state.engine.compute(&selections)?;
    Ok((invoice, request.display_metadata(&event)))
}

/// Renders the invoice and returns it as a download
#[instrument(skip_all, fields(event_id = %request.event_id))]
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<InvoiceRequest>,
) -> Result<Response, ApiError> {
    let (invoice, metadata) = prepare(&state, &request).await?;

    let renderer = state.renderer.clone();
    let rendered =
        tokio::task::spawn_blocking(move || renderer.render(&invoice, &metadata)).await??;

    let header_value = |value: String| {
        HeaderValue::from_str(&value)
            .map_err(|e| ApiError::Internal(format!("Invalid response header: {e}")))
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(rendered.content_type));
    headers.insert(
        header::CONTENT_DISPOSITION,
        header_value(format!("attachment; filename=\"{}\"", rendered.filename))?,
    );
    headers.insert("x-invoice-id", header_value(rendered.invoice_id.to_string())?);

    Ok((headers, rendered.bytes).into_response())
}

/// Builds the confirmation email that would accompany the invoice
pub async fn preview_notification(
    State(state): State<AppState>,
    Json(request): Json<InvoiceRequest>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let (invoice, metadata) = prepare(&state, &request).await?;

    let issued_on = state.timezone.local_date(state.clock.now());
    let message = NotificationTemplate::invoice_summary(&invoice, &metadata, issued_on)?;

    Ok(Json(NotificationResponse { issued_on, message }))
}
