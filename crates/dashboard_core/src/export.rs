//! Comma-separated export of a list view.

use std::{fs, path::{Path, PathBuf}};

use anyhow::Context;
use chrono::NaiveDate;
use shared::Order;
use tracing::info;

const BASE_HEADERS: [&str; 16] = [
    "Order ID",
    "Service ID",
    "Customer Name",
    "Journey Type",
    "Status",
    "Priority",
    "Start Date",
    "Current Task",
    "Project Phase",
    "Progress (%)",
    "Description",
    "Estimated Duration",
    "Assigned Team",
    "Category",
    "Subcategory",
    "Notes",
];

/// Optional column groups. Presence is decided once for the whole bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportColumns {
    pub delay_reason: bool,
    pub cc_date: bool,
    pub queue: bool,
}

impl ExportColumns {
    /// Decided from the unfiltered bucket, not from the rows being written.
    pub fn for_bucket(bucket: &[Order]) -> Self {
        Self {
            delay_reason: bucket.iter().any(|o| has_text(&o.delay_reason)),
            cc_date: bucket.iter().any(|o| has_text(&o.cc_date)),
            queue: bucket.iter().any(|o| has_text(&o.queue_name)),
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = BASE_HEADERS.to_vec();
        if self.delay_reason {
            headers.push("Delay Reason");
        }
        if self.cc_date {
            headers.push("CC Date");
        }
        if self.queue {
            headers.push("Queue Name");
            headers.push("Business Days in Queue");
        }
        headers
    }

    fn row(&self, order: &Order) -> Vec<String> {
        let mut row = vec![
            quoted(order.id.as_str()),
            quoted(order.service_id.as_str()),
            quoted(&order.customer_name),
            quoted(order.journey.as_str()),
            quoted(&order.status),
            quoted(order.priority.as_str()),
            quoted(&order.start_date),
            quoted(&order.current_task),
            quoted(order.current_project_progression.as_str()),
            order.progress.to_string(),
            quoted(&order.description),
            quoted(&order.estimated_duration),
            quoted(order.assigned_team.as_deref().unwrap_or_default()),
            quoted(&order.category),
            quoted(&order.subcategory),
            quoted(&order.notes),
        ];
        if self.delay_reason {
            row.push(quoted(order.delay_reason.as_deref().unwrap_or_default()));
        }
        if self.cc_date {
            row.push(quoted(order.cc_date.as_deref().unwrap_or_default()));
        }
        if self.queue {
            row.push(quoted(order.queue_name.as_deref().unwrap_or_default()));
            row.push(
                order
                    .business_days_in_queue
                    .map(|days| days.to_string())
                    .unwrap_or_default(),
            );
        }
        row
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Wraps a value in double quotes, doubling embedded quotes.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Header line plus one line per row, joined with `\n`. `bucket` is the
/// unfiltered set the column layout is computed from; `rows` is the current
/// filtered and sorted view.
pub fn to_delimited_text(bucket: &[Order], rows: &[&Order]) -> String {
    let columns = ExportColumns::for_bucket(bucket);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.headers().join(","));
    lines.extend(rows.iter().map(|order| columns.row(order).join(",")));
    lines.join("\n")
}

/// `<title, whitespace runs to '_', lowercased>_orders_<YYYY-MM-DD>.csv`
pub fn export_filename(title: &str, date: NaiveDate) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('_');
            }
            in_whitespace = true;
        } else {
            slug.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }
    format!("{slug}_orders_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes the export of `rows` under `dir`, creating it if needed, and
/// returns the written path.
pub fn write_export(
    dir: &Path,
    title: &str,
    date: NaiveDate,
    bucket: &[Order],
    rows: &[&Order],
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory '{}'", dir.display()))?;
    let path = dir.join(export_filename(title, date));
    fs::write(&path, to_delimited_text(bucket, rows))
        .with_context(|| format!("failed to write export '{}'", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "exported order list");
    Ok(path)
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
