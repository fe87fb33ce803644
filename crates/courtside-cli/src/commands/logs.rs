//! Log listing and detail command implementations

use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use courtside_core::diff::NO_VALUE_PLACEHOLDER;
use courtside_core::time::{format_absolute, format_relative};
use courtside_core::{
    render_diff, render_metadata, ActionCategory, AuditLogApi, AuditLogEntry, DiffPanel,
    FilterState, LogViewer,
};

use super::{load_page, truncate};

/// Terminal badge for an action category
pub fn action_badge(category: ActionCategory) -> &'static str {
    match category {
        ActionCategory::Create => "➕",
        ActionCategory::Update => "✏️ ",
        ActionCategory::Delete => "🗑️ ",
        ActionCategory::Resolve => "✅",
        ActionCategory::Neutral => "• ",
    }
}

/// One row of the log table
pub fn format_log_line(entry: &AuditLogEntry, now: &DateTime<Utc>) -> String {
    let line = format!(
        "{} {:14} │ {:18} │ {:22} │ {:10} │ {}",
        action_badge(entry.action_type.category()),
        format_relative(&entry.created_at, now),
        truncate(entry.actor(), 18),
        truncate(&entry.action_type.label(), 22),
        truncate(&entry.target_type.label(), 10),
        truncate(&entry.description, 48),
    );
    match entry.link() {
        Some(link) => format!("{} → {}", line, link),
        None => line,
    }
}

/// Page buttons with the current page bracketed, e.g. `1 [2] 3 4 5`
pub fn format_page_buttons(viewer: &LogViewer) -> String {
    let current = viewer.pagination().map(|p| p.page).unwrap_or(1);
    viewer
        .page_buttons()
        .into_iter()
        .map(|page| {
            if page == current {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn cmd_logs<A: AuditLogApi + 'static>(
    api: Arc<A>,
    filters: FilterState,
    json: bool,
) -> Result<()> {
    let viewer = load_page(api, filters).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(viewer.entries())?);
        return Ok(());
    }

    if viewer.entries().is_empty() {
        if viewer.filters().has_filters() {
            println!("No audit log entries match these filters.");
        } else {
            println!("No audit log entries recorded yet.");
        }
        return Ok(());
    }

    let now = Utc::now();
    println!();
    println!("📜 Audit Log");
    println!("   ─────────────────────────────────────────────────────────────");
    for entry in viewer.entries() {
        println!("   {}", format_log_line(entry, &now));
    }

    println!();
    if let Some(summary) = viewer.summary() {
        println!("   {}", summary);
        let pages = format_page_buttons(&viewer);
        if !pages.is_empty() {
            println!("   Pages: {}", pages);
        }
        if summary.has_next {
            println!(
                "   💡 Next page: courtside logs --page {}",
                viewer.filters().page + 1
            );
        }
    }

    Ok(())
}

fn print_panel(title: &str, panel: &DiffPanel) {
    println!("   {}", title);
    match panel {
        DiffPanel::Empty => println!("      ({})", NO_VALUE_PLACEHOLDER),
        DiffPanel::Value(text) => {
            for line in text.lines() {
                println!("      {}", line);
            }
        }
    }
}

pub async fn cmd_show<A: AuditLogApi + 'static>(
    api: Arc<A>,
    filters: FilterState,
    id: &str,
) -> Result<()> {
    let page = filters.page;
    let viewer = load_page(api, filters).await?;
    let entry = viewer
        .find_entry(id)
        .ok_or_else(|| anyhow!("Entry {} not found on page {}", id, page))?;

    let now = Utc::now();
    let category = entry.action_type.category();

    println!();
    println!(
        "{} {} ({})",
        action_badge(category),
        entry.action_type.label(),
        category
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   ID:          {}", entry.id);
    println!(
        "   When:        {} ({})",
        format_absolute(&entry.created_at),
        format_relative(&entry.created_at, &now)
    );
    match &entry.admin {
        Some(admin) => match admin.email.as_deref() {
            Some(email) if admin.display_name() != email => {
                println!("   Admin:       {} <{}>", admin.display_name(), email)
            }
            _ => println!("   Admin:       {}", admin.display_name()),
        },
        None => println!("   Admin:       System"),
    }
    println!(
        "   Target:      {} {}",
        entry.target_type.label(),
        entry.target_id.as_deref().unwrap_or("")
    );
    if let Some(link) = entry.link() {
        println!("   Link:        {}", link);
    }
    println!("   Description: {}", entry.description);

    let diff = render_diff(entry.old_value.as_ref(), entry.new_value.as_ref());
    println!();
    print_panel("Before:", &diff.before);
    print_panel("After:", &diff.after);

    if diff.has_changes() {
        println!();
        println!("   Changes:");
        for change in &diff.changes {
            println!("      {}", change);
        }
    }

    if let Some(metadata) = render_metadata(entry.metadata.as_ref()) {
        println!();
        println!("   Metadata:");
        for line in metadata.lines() {
            println!("      {}", line);
        }
    }

    Ok(())
}
