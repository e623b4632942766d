//! Queueing of UI events and the file side of exports.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use crossbeam_channel::{Sender, TrySendError};

use crate::controller::{events::UiEvent, reducer::PendingExport};

pub fn dispatch_ui_event(ui_tx: &Sender<UiEvent>, event: UiEvent, status: &mut String) {
    let event_name = event.name();
    match ui_tx.try_send(event) {
        Ok(()) => tracing::debug!(event = event_name, "queued ui event"),
        Err(TrySendError::Full(_)) => {
            *status = "UI event queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "UI event queue disconnected; restart the dashboard".to_string();
        }
    }
}

/// Asks for a destination, starting in `export_dir` with the standard name.
/// `None` when the user cancels.
pub fn choose_export_path(export_dir: &Path, filename: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_directory(export_dir)
        .set_file_name(filename)
        .add_filter("CSV", &["csv"])
        .save_file()
}

pub fn write_export(path: &Path, export: &PendingExport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export directory '{}'", parent.display()))?;
    }
    fs::write(path, &export.text)
        .with_context(|| format!("failed to write export '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "exported order list");
    Ok(())
}
