//! Application state for the web GUI

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::{Duration, Instant};

use interchange_config::Dataset;
use interchange_core::Catalog;
use interchange_form::{InterchangeMatcher, Page, StaticMatcher};

/// Pages untouched this long are dropped by the reaper.
pub const SESSION_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

/// One browser's page plus when it was last used.
pub struct PageSession {
    page: Arc<Mutex<Page>>,
    last_seen: Instant,
}

/// Shared application state
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub matcher: Arc<dyn InterchangeMatcher>,
    /// Page state per `interchange_session` cookie
    sessions: RwLock<HashMap<String, PageSession>>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(catalog: Catalog, matcher: Arc<dyn InterchangeMatcher>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            matcher,
            sessions: RwLock::new(HashMap::new()),
            started_at: chrono::Utc::now(),
        }
    }

    /// State backed by the static matcher over a loaded dataset.
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self::new(dataset.catalog, Arc::new(StaticMatcher::new(dataset.results)))
    }

    /// The page for `session_id`, created on first use.
    pub fn page(&self, session_id: &str) -> Arc<Mutex<Page>> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let session = sessions.entry(session_id.to_string()).or_insert_with(|| {
            tracing::debug!(session = session_id, "new page session");
            PageSession {
                page: Arc::new(Mutex::new(Page::new(
                    Arc::clone(&self.catalog),
                    Arc::clone(&self.matcher),
                ))),
                last_seen: Instant::now(),
            }
        });
        session.last_seen = Instant::now();
        Arc::clone(&session.page)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drop sessions idle for longer than `ttl`. Returns how many went.
    pub fn cleanup_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, s| s.last_seen.elapsed() < ttl);
        before - sessions.len()
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Catalog::current(), Arc::new(StaticMatcher::default()))
    }
}

/// Lock a page, recovering from a poisoned lock.
pub fn lock_page(page: &Mutex<Page>) -> MutexGuard<'_, Page> {
    page.lock().unwrap_or_else(PoisonError::into_inner)
}
