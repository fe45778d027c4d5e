//! API configuration

use serde::Deserialize;
use std::time::Duration;

use core_kernel::{TemporalError, Timezone};
use domain_invoicing::InvoiceBranding;
use domain_pricing::SelectionPolicy;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Pricing table JSON; the built-in price list is used when unset
    pub pricing_table_path: Option<String>,
    /// Event catalog JSON
    pub events_path: String,
    /// How long a catalog lookup stays cached
    pub event_cache_ttl_secs: u64,
    /// Maximum number of cached events
    pub event_cache_capacity: usize,
    /// IANA timezone used for invoice dates
    pub timezone: String,
    /// Reject selections the delegate category cannot price
    pub strict_selections: bool,
    /// Organization printed at the top of invoices
    pub invoice_issuer: String,
    /// Optional line under the issuer
    pub invoice_tagline: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_json: false,
            pricing_table_path: None,
            events_path: "data/events.json".to_string(),
            event_cache_ttl_secs: 300,
            event_cache_capacity: 256,
            timezone: "Africa/Lusaka".to_string(),
            strict_selections: false,
            invoice_issuer: InvoiceBranding::default().organization,
            invoice_tagline: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timezone(&self) -> Result<Timezone, TemporalError> {
        self.timezone.parse()
    }

    pub fn event_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.event_cache_ttl_secs)
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        if self.strict_selections {
            SelectionPolicy::Strict
        } else {
            SelectionPolicy::Lenient
        }
    }

    pub fn branding(&self) -> InvoiceBranding {
        InvoiceBranding {
            organization: self.invoice_issuer.clone(),
            tagline: self.invoice_tagline.clone(),
            contact: None,
        }
    }
}
