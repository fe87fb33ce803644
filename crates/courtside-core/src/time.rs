//! Timestamp display helpers

use chrono::{DateTime, Utc};

/// `2024-03-01 12:30:00 UTC`
pub fn format_absolute(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Relative time like "5 minutes ago"; older than 30 days falls back to the date
pub fn format_relative(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*then);
    let seconds = elapsed.num_seconds();

    if seconds < 60 {
        // Includes clock skew putting `then` in the future
        return "just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return plural(minutes, "minute");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }
    let days = elapsed.num_days();
    if days <= 30 {
        return plural(days, "day");
    }
    then.format("%Y-%m-%d").to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}
