//! Admin API client for the audit log
//!
//! # Architecture
//!
//! - `AuditLogApi` trait: the three audit log endpoints
//! - `HttpAuditLogApi`: reqwest implementation against the admin REST API
//! - `Session`: request context carrying the admin's session cookie, passed
//!   in explicitly rather than read from process-wide state
//!
//! # Usage
//!
//! ```rust,ignore
//! let api = HttpAuditLogApi::new(&config)?;
//! let page = api.list_logs(&FilterState::default()).await?;
//! let taxonomies = fetch_taxonomies(&api).await;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{ApiResponse, AuditLogEntry, FilterOption, LogPage};
use crate::query::{build_query, FilterState};

/// Admin session credentials attached to every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    cookie: Option<String>,
}

impl Session {
    /// A session authenticated by a raw `Cookie` header value
    pub fn with_cookie(cookie: impl Into<String>) -> Self {
        let cookie = cookie.into();
        Self {
            cookie: Some(cookie).filter(|c| !c.trim().is_empty()),
        }
    }

    /// No credentials; the server will answer 401
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.cookie.is_some()
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &self.cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|_| Error::Config("Session cookie contains invalid characters".into()))?;
            headers.insert(COOKIE, value);
        }
        Ok(headers)
    }
}

/// Trait defining the audit log endpoints
///
/// Implementations must be Send + Sync so the list-view controller can run
/// fetches on spawned tasks.
#[async_trait]
pub trait AuditLogApi: Send + Sync {
    /// `GET /admin/logs` for the given filters
    async fn list_logs(&self, filters: &FilterState) -> Result<LogPage>;

    /// `GET /admin/logs/action-types`
    async fn action_types(&self) -> Result<Vec<FilterOption>>;

    /// `GET /admin/logs/target-types`
    async fn target_types(&self) -> Result<Vec<FilterOption>>;
}

/// Filter dropdown options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomies {
    pub action_types: Vec<FilterOption>,
    pub target_types: Vec<FilterOption>,
}

/// Fetch both filter taxonomies concurrently.
///
/// Never fails: a failed lookup is logged and yields an empty list so the
/// log list itself is never blocked on it.
pub async fn fetch_taxonomies<A: AuditLogApi + ?Sized>(api: &A) -> Taxonomies {
    let (actions, targets) = tokio::join!(api.action_types(), api.target_types());

    let action_types = actions.unwrap_or_else(|e| {
        warn!("Failed to fetch action types: {}", e);
        Vec::new()
    });
    let target_types = targets.unwrap_or_else(|e| {
        warn!("Failed to fetch target types: {}", e);
        Vec::new()
    });

    Taxonomies {
        action_types,
        target_types,
    }
}

/// reqwest-backed admin API client
#[derive(Clone)]
pub struct HttpAuditLogApi {
    http_client: Client,
    base_url: String,
    session: Session,
}

impl HttpAuditLogApi {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let session = config
            .session
            .as_deref()
            .map(Session::with_cookie)
            .unwrap_or_default();
        Self::with_session(&config.base_url, session, config.timeout_secs)
    }

    /// Create a client with an explicit session
    pub fn with_session(base_url: &str, session: Session, timeout_secs: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder().default_headers(session.headers()?);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http_client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    async fn get<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<ApiResponse<T>> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!("GET {}", url);

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.success {
            return Err(Error::Api {
                status: None,
                message: envelope
                    .failure_message()
                    .unwrap_or("Request was not successful")
                    .to_string(),
            });
        }
        Ok(envelope)
    }

    async fn get_options(&self, path: &str) -> Result<Vec<FilterOption>> {
        let envelope: ApiResponse<Vec<FilterOption>> = self.get(path).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}

#[async_trait]
impl AuditLogApi for HttpAuditLogApi {
    async fn list_logs(&self, filters: &FilterState) -> Result<LogPage> {
        let path = format!("/admin/logs?{}", build_query(filters));
        let envelope: ApiResponse<Vec<AuditLogEntry>> = self.get(&path).await?;

        let pagination = envelope
            .pagination
            .ok_or_else(|| Error::InvalidData("Response is missing pagination".into()))?;
        Ok(LogPage {
            entries: envelope.data.unwrap_or_default(),
            pagination,
        })
    }

    async fn action_types(&self) -> Result<Vec<FilterOption>> {
        self.get_options("/admin/logs/action-types").await
    }

    async fn target_types(&self) -> Result<Vec<FilterOption>> {
        self.get_options("/admin/logs/target-types").await
    }
}

/// Turn a non-2xx response into an `Error::Api` with the best message available
async fn error_from_response(response: Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
        .ok()
        .and_then(|envelope| envelope.failure_message().map(str::to_string))
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => format!("HTTP {}", status.as_u16()),
        });

    Error::Api {
        status: Some(status.as_u16()),
        message,
    }
}
