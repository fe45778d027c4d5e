//! HTTP surface tests

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use core_kernel::{Clock, EventId, Timezone};
use domain_invoicing::{PdfBackend, StandardInvoiceRenderer};
use domain_pricing::{PricingEngine, SelectionPolicy};
use interface_api::catalog::{EventRecord, InMemoryEventCatalog};
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::{assert_pdf_document, StringFixtures, TemporalFixtures};

fn event() -> EventRecord {
    EventRecord {
        id: EventId::new(),
        title: StringFixtures::event_title().to_string(),
        date: Some(StringFixtures::event_date().to_string()),
        venue: Some(StringFixtures::venue().to_string()),
    }
}

fn state(engine: PricingEngine, events: Vec<EventRecord>) -> AppState {
    let clock: Arc<dyn Clock> = Arc::new(TemporalFixtures::fixed_clock());
    let renderer = StandardInvoiceRenderer::new(PdfBackend::new(), clock.clone());

    AppState {
        engine,
        renderer: Arc::new(renderer),
        catalog: Arc::new(InMemoryEventCatalog::new(events)),
        clock,
        timezone: Timezone::default(),
        config: ApiConfig::default(),
    }
}

fn server_with(engine: PricingEngine, events: Vec<EventRecord>) -> TestServer {
    TestServer::new(create_router(state(engine, events))).unwrap()
}

fn invoice_request(event_id: EventId) -> Value {
    json!({
        "form": {
            "delegate_type": "international",
            "accommodation_package": true,
            "victoria_falls_package": true,
            "boat_cruise_package": false,
            "dinner_gala_attendance": true
        },
        "event_id": event_id,
        "participant": {
            "name": StringFixtures::participant_name(),
            "organization": "Copperbelt Energy Corporation",
            "country": "Zambia"
        },
        "registration_number": StringFixtures::registration_number(),
        "payment_status": "pending"
    })
}

// ============================================================================
// Health
// ============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let server = server_with(PricingEngine::standard(), vec![]);
        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let server = server_with(PricingEngine::standard(), vec![]);
        let response = server.get("/health").await;

        assert!(!response.header("x-request-id").is_empty());
    }
}

// ============================================================================
// Pricing
// ============================================================================

mod pricing {
    use super::*;

    #[tokio::test]
    async fn test_schedule_lists_every_category() {
        let server = server_with(PricingEngine::standard(), vec![]);
        let response = server.get("/api/v1/pricing/schedule").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let categories: Vec<&str> = body["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["category"].as_str().unwrap())
            .collect();
        assert_eq!(categories, vec!["private_sector", "public_sector", "international"]);
    }

    #[tokio::test]
    async fn test_quote_full_international_package() {
        let server = server_with(PricingEngine::standard(), vec![]);
        let response = server
            .post("/api/v1/pricing/quote")
            .json(&json!({
                "delegateType": "International",
                "accommodationPackage": true,
                "victoriaFallsPackage": true,
                "dinnerGalaAttendance": true
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["currency"], "USD");
        assert_eq!(body["total_formatted"], "USD 1,550.00");
        assert_eq!(body["line_items"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_quote_rejects_unknown_category() {
        let server = server_with(PricingEngine::standard(), vec![]);
        let response = server
            .post("/api/v1/pricing/quote")
            .json(&json!({ "delegate_type": "student" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "invalid_category");
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_unpriceable_flags() {
        let engine = PricingEngine::standard().with_policy(SelectionPolicy::Strict);
        let server = server_with(engine, vec![]);
        let response = server
            .post("/api/v1/pricing/quote")
            .json(&json!({ "delegate_type": "public", "accommodation_package": true }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "invalid_selections");
    }
}

// ============================================================================
// Invoices
// ============================================================================

mod invoices {
    use super::*;

    #[tokio::test]
    async fn test_invoice_download() {
        let event = event();
        let server = server_with(PricingEngine::standard(), vec![event.clone()]);

        let response = server.post("/api/v1/invoices").json(&invoice_request(event.id)).await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/pdf");
        assert_eq!(
            response.header("content-disposition"),
            format!("attachment; filename=\"{}\"", StringFixtures::invoice_filename()).as_str()
        );
        assert!(response
            .header("x-invoice-id")
            .to_str()
            .unwrap()
            .starts_with("INV-"));
        assert_pdf_document(response.as_bytes());
    }

    #[tokio::test]
    async fn test_unknown_event_is_not_found() {
        let server = server_with(PricingEngine::standard(), vec![event()]);

        let response = server
            .post("/api/v1/invoices")
            .json(&invoice_request(EventId::new()))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_blank_participant_name_is_unprocessable() {
        let event = event();
        let server = server_with(PricingEngine::standard(), vec![event.clone()]);

        let mut request = invoice_request(event.id);
        request["participant"]["name"] = json!("   ");
        let response = server.post("/api/v1/invoices").json(&request).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "rendering_failed");
        assert!(body["message"].as_str().unwrap().contains("participant_name"));
    }

    #[tokio::test]
    async fn test_invalid_category_is_unprocessable() {
        let event = event();
        let server = server_with(PricingEngine::standard(), vec![event.clone()]);

        let mut request = invoice_request(event.id);
        request["form"]["delegate_type"] = json!("unknown");
        let response = server.post("/api/v1/invoices").json(&request).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_notification_preview() {
        let event = event();
        let server = server_with(PricingEngine::standard(), vec![event.clone()]);

        let response = server
            .post("/api/v1/invoices/notification")
            .json(&invoice_request(event.id))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["issued_on"], "2024-08-15");
        assert_eq!(
            body["subject"],
            format!(
                "Registration confirmed: {} ({})",
                StringFixtures::event_title(),
                StringFixtures::registration_number()
            )
        );
        assert!(body["text_body"]
            .as_str()
            .unwrap()
            .contains(StringFixtures::invoice_filename()));
    }
}
