use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::calendar::CalendarDate;
use crate::dots::cache::{DotCache, DotData};
use crate::dots::source::DotSource;

/// Runs dot fetches on the tokio runtime and files the answers in a shared
/// [`DotCache`]. The cache lock is only taken between awaits.
#[derive(Clone)]
pub struct DotLoader {
    source: Arc<dyn DotSource>,
    cache: Arc<Mutex<DotCache>>,
}

impl DotLoader {
    pub fn new(source: Arc<dyn DotSource>) -> Self {
        Self {
            source,
            cache: Arc::new(Mutex::new(DotCache::new())),
        }
    }

    fn cache(&self) -> MutexGuard<'_, DotCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a fetch for `year`, superseding any fetch already in flight.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn request(&self, year: i32) -> JoinHandle<()> {
        let ticket = self.cache().begin(year);
        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);
        tracing::debug!("Requesting dots for {}", year);

        tokio::spawn(async move {
            let result = source.fetch_year(year).await;
            let applied = cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .complete(ticket, result);
            if applied {
                tracing::debug!("Dots for {} updated", year);
            }
        })
    }

    /// Fetches `year` only if it has never been requested. Failed years are
    /// left alone until [`DotLoader::request`] is called explicitly.
    ///
    /// # Panics
    ///
    /// Same as [`DotLoader::request`] whenever a fetch is started.
    pub fn ensure(&self, year: i32) -> Option<JoinHandle<()>> {
        if self.cache().needs_fetch(year) {
            Some(self.request(year))
        } else {
            None
        }
    }

    pub fn status(&self, year: i32) -> Option<DotData> {
        self.cache().get(year).cloned()
    }

    pub fn has_dot(&self, date: &CalendarDate) -> bool {
        self.cache().has_dot(date)
    }

    pub fn clear(&self) {
        self.cache().clear();
    }
}

impl std::fmt::Debug for DotLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DotLoader").finish_non_exhaustive()
    }
}
