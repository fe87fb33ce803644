//! Export command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use courtside_core::{default_columns, export_rows, AuditLogApi, ExportFormat, FilterState};

use super::load_page;

/// Render the selected page in the given format
pub async fn render_export<A: AuditLogApi + 'static>(
    api: Arc<A>,
    filters: FilterState,
    format: ExportFormat,
) -> Result<(usize, String)> {
    let viewer = load_page(api, filters).await?;
    let table = export_rows(&default_columns(), viewer.entries())?;
    let rendered = table.render(format)?;
    Ok((table.len(), rendered))
}

pub async fn cmd_export<A: AuditLogApi + 'static>(
    api: Arc<A>,
    filters: FilterState,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(anyhow::Error::msg)?;
    let page = filters.page;
    let (count, rendered) = render_export(api, filters, format).await?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "✅ Exported {} entries (page {}) to {} as {}",
                count,
                page,
                path.display(),
                format
            );
        }
        None => {
            print!("{}", rendered);
            if format == ExportFormat::Json {
                println!();
            }
        }
    }

    Ok(())
}
