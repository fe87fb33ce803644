//! Filter state and audit log query-string building

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

use crate::error::{Error, Result};

/// Page size used when nothing else is configured
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Inclusive date range filter, either end optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Build a range from calendar days: `from` starts at 00:00:00.000 UTC and
    /// `to` ends at 23:59:59.999 UTC.
    pub fn from_days(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        let start = from.map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)));
        let end = to.and_then(|d| {
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
                .map(|t| Utc.from_utc_datetime(&d.and_time(t)))
        });
        Self { start, end }
    }

    /// Parse `YYYY-MM-DD` day bounds as typed on the command line
    pub fn parse_days(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                Error::InvalidData(format!("Invalid date '{}' (use YYYY-MM-DD)", s))
            })
        };
        let from = from.map(parse).transpose()?;
        let to = to.map(parse).transpose()?;
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(Error::InvalidData(format!(
                    "Start date {} is after end date {}",
                    f, t
                )));
            }
        }
        Ok(Self::from_days(from, to))
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Everything the list view filters on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub action_type: Option<String>,
    pub target_type: Option<String>,
    pub date_range: Option<DateRange>,
    pub page: u32,
    pub limit: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_limit(DEFAULT_PAGE_LIMIT)
    }
}

/// A change to one filter field other than the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Search(String),
    ActionType(Option<String>),
    TargetType(Option<String>),
    DateRange(Option<DateRange>),
    /// Clear every filter at once
    Reset,
}

impl FilterState {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            search_query: String::new(),
            action_type: None,
            target_type: None,
            date_range: None,
            page: 1,
            limit: limit.max(1),
        }
    }

    /// Apply a filter change. Returns true if anything changed; any real
    /// change also resets the page to 1.
    pub fn apply(&mut self, change: FilterChange) -> bool {
        let changed = match change {
            FilterChange::Search(q) => {
                // Only the trimmed text reaches the query string
                let changed = self.search_query.trim() != q.trim();
                self.search_query = q;
                changed
            }
            FilterChange::ActionType(a) => replace(&mut self.action_type, normalize(a)),
            FilterChange::TargetType(t) => replace(&mut self.target_type, normalize(t)),
            FilterChange::DateRange(r) => {
                replace(&mut self.date_range, r.filter(|r| !r.is_empty()))
            }
            FilterChange::Reset => {
                let cleared = Self::with_limit(self.limit);
                let changed = !self.search_query.trim().is_empty()
                    || self.action_type.is_some()
                    || self.target_type.is_some()
                    || self.date_range.is_some();
                self.search_query = cleared.search_query;
                self.action_type = None;
                self.target_type = None;
                self.date_range = None;
                changed
            }
        };
        if changed {
            self.page = 1;
        }
        changed
    }

    /// Whether any filter beyond pagination is active
    pub fn has_filters(&self) -> bool {
        !self.search_query.trim().is_empty()
            || self.action_type.is_some()
            || self.target_type.is_some()
            || self.date_range.is_some()
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build the canonical query string for `GET /admin/logs`.
///
/// `page` and `limit` are always present; every other parameter is omitted
/// when empty. Parameter order is fixed, so equal filters give equal strings.
pub fn build_query(filters: &FilterState) -> String {
    let mut params: Vec<(&str, String)> = vec![
        ("page", filters.page.to_string()),
        ("limit", filters.limit.to_string()),
    ];

    let search = filters.search_query.trim();
    if !search.is_empty() {
        params.push(("search", search.to_string()));
    }
    if let Some(action) = filters.action_type.as_deref().filter(|a| !a.is_empty()) {
        params.push(("actionType", action.to_string()));
    }
    if let Some(target) = filters.target_type.as_deref().filter(|t| !t.is_empty()) {
        params.push(("targetType", target.to_string()));
    }
    if let Some(range) = &filters.date_range {
        if let Some(start) = &range.start {
            params.push(("startDate", format_instant(start)));
        }
        if let Some(end) = &range.end {
            params.push(("endDate", format_instant(end)));
        }
    }

    // Encoding a list of string pairs cannot fail
    serde_urlencoded::to_string(&params).unwrap_or_default()
}
