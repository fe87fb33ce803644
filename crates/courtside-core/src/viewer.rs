//! Audit log list view as an explicit state machine
//!
//! `LogViewer::handle` is a reducer: `(state, event) -> (state', effect?)`.
//! Every fetch it asks for carries a request token from a monotonically
//! increasing generation counter; a response whose token is not the latest
//! is dropped, so the most recent request always wins.
//!
//! ```text
//! Idle ──▶ Loading ──▶ Success
//!             ▲  └────▶ Error (last-good entries kept)
//!             └── filter / page / refresh / retry
//! ```
//!
//! `LogController` drives the reducer against an `AuditLogApi`, running each
//! fetch on a spawned task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::{fetch_taxonomies, AuditLogApi, Taxonomies};
use crate::error::FetchError;
use crate::models::{AuditLogEntry, LogPage, PaginationMetadata};
use crate::pagination::{visible_pages, PageSummary, PAGE_WINDOW};
use crate::query::{FilterChange, FilterState};

/// Identifies one issued fetch
pub type RequestToken = u64;

/// Load status of the list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(FetchError),
}

/// Inputs to the list view
#[derive(Debug, Clone)]
pub enum ViewEvent {
    FilterChanged(FilterChange),
    PageChanged(u32),
    RefreshRequested,
    RetryRequested,
    ResponseArrived {
        token: RequestToken,
        result: Result<LogPage, FetchError>,
    },
    TaxonomiesLoaded(Taxonomies),
}

/// Work the reducer asks the driver to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch {
        token: RequestToken,
        filters: FilterState,
    },
}

/// State of the audit log list
#[derive(Debug, Clone, Default)]
pub struct LogViewer {
    filters: FilterState,
    status: ViewStatus,
    entries: Vec<AuditLogEntry>,
    pagination: Option<PaginationMetadata>,
    taxonomies: Taxonomies,
    generation: RequestToken,
    /// Set while `pagination` describes an older filter set
    pagination_stale: bool,
}

impl LogViewer {
    pub fn new(limit: u32) -> Self {
        Self::with_filters(FilterState::with_limit(limit))
    }

    pub fn with_filters(filters: FilterState) -> Self {
        Self {
            filters,
            ..Default::default()
        }
    }

    pub fn handle(&mut self, event: ViewEvent) -> Option<Effect> {
        match event {
            ViewEvent::FilterChanged(change) => {
                if self.filters.apply(change) {
                    self.pagination_stale = true;
                    Some(self.begin_fetch())
                } else {
                    None
                }
            }
            ViewEvent::PageChanged(page) => {
                let page = self.clamp_page(page);
                // From Idle or Error the requested page has never been shown
                let settled = matches!(self.status, ViewStatus::Success | ViewStatus::Loading);
                if settled && page == self.filters.page {
                    return None;
                }
                self.filters.page = page;
                Some(self.begin_fetch())
            }
            ViewEvent::RefreshRequested | ViewEvent::RetryRequested => Some(self.begin_fetch()),
            ViewEvent::ResponseArrived { token, result } => {
                self.finish_fetch(token, result);
                None
            }
            ViewEvent::TaxonomiesLoaded(taxonomies) => {
                self.taxonomies = taxonomies;
                None
            }
        }
    }

    fn begin_fetch(&mut self) -> Effect {
        self.generation += 1;
        self.status = ViewStatus::Loading;
        Effect::Fetch {
            token: self.generation,
            filters: self.filters.clone(),
        }
    }

    fn finish_fetch(&mut self, token: RequestToken, result: Result<LogPage, FetchError>) {
        if token != self.generation {
            debug!(
                "Discarding stale response (token {}, latest {})",
                token, self.generation
            );
            return;
        }
        match result {
            Ok(page) => {
                self.entries = page.entries;
                self.pagination = Some(page.pagination);
                self.pagination_stale = false;
                self.status = ViewStatus::Success;
            }
            Err(err) => {
                self.status = ViewStatus::Error(err);
            }
        }
    }

    fn clamp_page(&self, page: u32) -> u32 {
        let page = page.max(1);
        match self.pagination {
            Some(p) if !self.pagination_stale && p.total_pages > 0 => page.min(p.total_pages),
            _ => page,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn entries(&self) -> &[AuditLogEntry] {
        &self.entries
    }

    pub fn pagination(&self) -> Option<&PaginationMetadata> {
        self.pagination.as_ref()
    }

    pub fn taxonomies(&self) -> &Taxonomies {
        &self.taxonomies
    }

    /// Token of the most recently issued fetch
    pub fn latest_token(&self) -> RequestToken {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            ViewStatus::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Page buttons for the current server pagination
    pub fn page_buttons(&self) -> Vec<u32> {
        self.pagination
            .map(|p| visible_pages(p.page, p.total_pages, PAGE_WINDOW))
            .unwrap_or_default()
    }

    pub fn summary(&self) -> Option<PageSummary> {
        self.pagination.as_ref().map(PageSummary::from)
    }

    pub fn find_entry(&self, id: &str) -> Option<&AuditLogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

/// Runs `LogViewer` effects against an API
pub struct LogController<A: AuditLogApi + 'static> {
    api: Arc<A>,
    viewer: Arc<Mutex<LogViewer>>,
}

impl<A: AuditLogApi + 'static> Clone for LogController<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            viewer: self.viewer.clone(),
        }
    }
}

impl<A: AuditLogApi + 'static> LogController<A> {
    pub fn new(api: Arc<A>, viewer: LogViewer) -> Self {
        Self {
            api,
            viewer: Arc::new(Mutex::new(viewer)),
        }
    }

    /// Feed an event to the viewer; a resulting fetch runs on a spawned task
    pub fn dispatch(&self, event: ViewEvent) -> Option<JoinHandle<()>> {
        let effect = lock(&self.viewer).handle(event);
        effect.map(|effect| self.spawn_effect(effect))
    }

    /// Dispatch and wait for the resulting fetch, if any, to be applied
    pub async fn dispatch_and_wait(&self, event: ViewEvent) {
        if let Some(handle) = self.dispatch(event) {
            if let Err(e) = handle.await {
                warn!("Log fetch task failed: {}", e);
            }
        }
    }

    /// Load filter options; failures degrade to empty lists
    pub async fn load_taxonomies(&self) {
        let taxonomies = fetch_taxonomies(self.api.as_ref()).await;
        lock(&self.viewer).handle(ViewEvent::TaxonomiesLoaded(taxonomies));
    }

    /// Copy of the current view state
    pub fn snapshot(&self) -> LogViewer {
        lock(&self.viewer).clone()
    }

    pub fn with_viewer<R>(&self, f: impl FnOnce(&LogViewer) -> R) -> R {
        f(&lock(&self.viewer))
    }

    fn spawn_effect(&self, effect: Effect) -> JoinHandle<()> {
        let Effect::Fetch { token, filters } = effect;
        let api = self.api.clone();
        let viewer = self.viewer.clone();

        tokio::spawn(async move {
            debug!("Fetching audit logs (token {}, page {})", token, filters.page);
            let result = api.list_logs(&filters).await.map_err(|e| {
                warn!("Failed to fetch audit logs: {}", e);
                FetchError::from(&e)
            });
            lock(&viewer).handle(ViewEvent::ResponseArrived { token, result });
        })
    }
}

/// The viewer holds no invariants a panicking holder could break mid-update,
/// so a poisoned lock is still usable.
fn lock(viewer: &Mutex<LogViewer>) -> MutexGuard<'_, LogViewer> {
    viewer.lock().unwrap_or_else(PoisonError::into_inner)
}
