//! Filter taxonomy command implementation

use std::sync::Arc;

use anyhow::Result;
use courtside_core::{classify_target, fetch_taxonomies, AuditLogApi, Taxonomies};

use super::action_badge;

pub async fn cmd_types<A: AuditLogApi + 'static>(api: Arc<A>) -> Result<()> {
    let taxonomies = fetch_taxonomies(api.as_ref()).await;
    print_taxonomies(&taxonomies);
    Ok(())
}

fn print_taxonomies(taxonomies: &Taxonomies) {
    println!();
    println!("🏷️  Action Types");
    println!("   ─────────────────────────────");
    if taxonomies.action_types.is_empty() {
        println!("   (none available)");
    }
    for option in &taxonomies.action_types {
        let category = courtside_core::classify_action(&option.value);
        println!(
            "   {} {:28} {}",
            action_badge(category),
            option.value,
            option.display_label()
        );
    }

    println!();
    println!("🎯 Target Types");
    println!("   ─────────────────────────────");
    if taxonomies.target_types.is_empty() {
        println!("   (none available)");
    }
    for option in &taxonomies.target_types {
        println!(
            "   {:28} {} ({})",
            option.value,
            option.display_label(),
            classify_target(&option.value)
        );
    }
}
