//! Event catalog
//!
//! Invoices print the event title, date, and venue. Those come from the
//! event records the registration system already maintains; this module
//! only reads them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use core_kernel::{Clock, CoreError, EventId, SystemClock, TtlCache};

/// Event details shown on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

/// Read access to events
#[async_trait]
pub trait EventCatalog: Send + Sync {
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `Configuration` when the backing store
    /// cannot be read
    async fn get(&self, id: &EventId) -> Result<EventRecord, CoreError>;
}

/// Fixed set of events held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventCatalog {
    events: Vec<EventRecord>,
}

impl InMemoryEventCatalog {
    pub fn new(events: Vec<EventRecord>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl EventCatalog for InMemoryEventCatalog {
    async fn get(&self, id: &EventId) -> Result<EventRecord, CoreError> {
        find_event(&self.events, id)
    }
}

/// Events read from a JSON array on disk at lookup time
#[derive(Debug, Clone)]
pub struct FileEventCatalog {
    path: PathBuf,
}

impl FileEventCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EventCatalog for FileEventCatalog {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn get(&self, id: &EventId) -> Result<EventRecord, CoreError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CoreError::configuration(format!(
                "Cannot read event catalog {}: {e}",
                self.path.display()
            ))
        })?;
        let events: Vec<EventRecord> = serde_json::from_str(&raw)
            .map_err(|e| CoreError::configuration(format!("Invalid event catalog JSON: {e}")))?;

        debug!(events = events.len(), "Loaded event catalog");
        find_event(&events, id)
    }
}

/// Wraps a catalog with a bounded TTL cache
pub struct CachedEventCatalog<E, C: Clock = SystemClock> {
    inner: E,
    cache: Mutex<TtlCache<EventId, EventRecord, C>>,
}

impl<E: EventCatalog> CachedEventCatalog<E> {
    pub fn new(inner: E, ttl: Duration, capacity: usize) -> Self {
        Self::with_clock(inner, ttl, capacity, SystemClock)
    }
}

impl<E: EventCatalog, C: Clock> CachedEventCatalog<E, C> {
    pub fn with_clock(inner: E, ttl: Duration, capacity: usize, clock: C) -> Self {
        Self {
            inner,
            cache: Mutex::new(TtlCache::with_clock(ttl, capacity, clock)),
        }
    }

    /// Drops a cached event so the next lookup reads through
    pub async fn invalidate(&self, id: &EventId) {
        self.cache.lock().await.evict(id);
    }
}

#[async_trait]
impl<E: EventCatalog, C: Clock> EventCatalog for CachedEventCatalog<E, C> {
    async fn get(&self, id: &EventId) -> Result<EventRecord, CoreError> {
        if let Some(event) = self.cache.lock().await.get(id) {
            debug!(event_id = %id, "Event catalog cache hit");
            return Ok(event);
        }

        // Lock is released during the inner lookup; concurrent misses may
        // both read through.
        let event = self.inner.get(id).await?;
        self.cache.lock().await.set(*id, event.clone());
        Ok(event)
    }
}

fn find_event(events: &[EventRecord], id: &EventId) -> Result<EventRecord, CoreError> {
    events
        .iter()
        .find(|event| &event.id == id)
        .cloned()
        .ok_or_else(|| CoreError::not_found(format!("Event {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingCatalog {
        inner: InMemoryEventCatalog,
        lookups: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EventCatalog for CountingCatalog {
        async fn get(&self, id: &EventId) -> Result<EventRecord, CoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.get(id).await
        }
    }

    fn event() -> EventRecord {
        EventRecord {
            id: EventId::new(),
            title: "Zambia Mining Indaba".to_string(),
            date: Some("12 November 2024".to_string()),
            venue: None,
        }
    }

    #[tokio::test]
    async fn test_in_memory_lookup() {
        let event = event();
        let catalog = InMemoryEventCatalog::new(vec![event.clone()]);

        assert_eq!(catalog.get(&event.id).await.unwrap(), event);
        assert!(matches!(
            catalog.get(&EventId::new()).await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_cache_reads_through_once() {
        let event = event();
        let lookups = Arc::new(AtomicUsize::new(0));
        let catalog = CachedEventCatalog::new(
            CountingCatalog {
                inner: InMemoryEventCatalog::new(vec![event.clone()]),
                lookups: lookups.clone(),
            },
            Duration::from_secs(60),
            8,
        );

        catalog.get(&event.id).await.unwrap();
        catalog.get(&event.id).await.unwrap();
        assert_eq!(lookups.load(Ordering::SeqCst), 1);

        catalog.invalidate(&event.id).await;
        catalog.get(&event.id).await.unwrap();
        assert_eq!(lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_misses_are_not_cached() {
        let lookups = Arc::new(AtomicUsize::new(0));
        let catalog = CachedEventCatalog::new(
            CountingCatalog {
                inner: InMemoryEventCatalog::default(),
                lookups: lookups.clone(),
            },
            Duration::from_secs(60),
            8,
        );

        let id = EventId::new();
        assert!(catalog.get(&id).await.is_err());
        assert!(catalog.get(&id).await.is_err());
        assert_eq!(lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_file_catalog_reports_missing_file() {
        let catalog = FileEventCatalog::new("/nonexistent/events.json");
        assert!(matches!(
            catalog.get(&EventId::new()).await,
            Err(CoreError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_file_catalog_reads_events() {
        let event = event();
        let path = std::env::temp_dir().join(format!("events-{}.json", EventId::new().as_uuid()));
        tokio::fs::write(&path, serde_json::to_string(&vec![event.clone()]).unwrap())
            .await
            .unwrap();

        let result = FileEventCatalog::new(&path).get(&event.id).await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(result.unwrap(), event);
    }
}
