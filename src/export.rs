//! CSV export of the filtered candy history.
//!
//! Rows are written in view order, exactly as the table currently shows them.
//! The watch-only column only appears when the wallet actually has watch-only
//! candy, matching the on-screen column gating.

use crate::amounts::SeparatorStyle;
use crate::model::CandyTableModel;
use anyhow::{Context, Result};
use std::path::Path;

/// Write the given view rows (source-model indices, in view order) to a CSV
/// file. `include_watch_only` gates the watch-only column; `display_unit`
/// labels the amount column.
pub fn write_csv(
    path: &Path,
    model: &CandyTableModel,
    view_rows: &[usize],
    include_watch_only: bool,
    display_unit: &str,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let amount_title = format!("Amount ({})", display_unit);
    let mut header = vec!["Confirmed"];
    if include_watch_only {
        header.push("Watch-only");
    }
    header.extend(["Date", "Asset Name", "Address", &amount_title, "ID"]);
    writer.write_record(&header)?;

    for &source_index in view_rows {
        let record = match model.record(source_index) {
            Some(record) => record,
            None => continue,
        };

        let mut fields = vec![record.status.counts_as_confirmed().to_string()];
        if include_watch_only {
            fields.push(if record.watch_only { "yes" } else { "no" }.to_string());
        }
        fields.push(record.formatted_date());
        fields.push(record.asset_name.clone());
        fields.push(record.address.clone());
        // No separators so spreadsheets parse the column as numbers
        fields.push(record.formatted_amount(SeparatorStyle::Never));
        fields.push(record.tx_id());
        writer.write_record(&fields)?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Exported {} rows to {}", view_rows.len(), path.display());
    Ok(())
}
