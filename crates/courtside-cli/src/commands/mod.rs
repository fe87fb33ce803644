//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config resolution, API client, page loading)
//! - `logs` - Log listing and single-entry detail commands
//! - `export` - CSV/JSON export of the loaded page
//! - `types` - Filter taxonomy listing

pub mod core;
pub mod export;
pub mod logs;
pub mod types;

// Re-export command functions for main.rs
pub use core::*;
pub use export::*;
pub use logs::*;
pub use types::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
