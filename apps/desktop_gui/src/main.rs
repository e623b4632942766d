use std::path::PathBuf;

mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use dashboard_core::{load_settings, DashboardSession, DashboardTab, OrderRepository, Settings};
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::controller::events::UiEvent;
use crate::ui::DashboardApp;

#[derive(Parser, Debug)]
struct Args {
    /// Settings file; defaults to ./dashboard.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Tab to open on: on-track, delayed or stuck
    #[arg(long)]
    tab: Option<String>,
    /// Disable the task drill-down view
    #[arg(long)]
    no_task_view: bool,
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn apply_args(settings: &mut Settings, args: &Args) {
    if let Some(raw) = &args.tab {
        match DashboardTab::parse(raw) {
            Ok(tab) => settings.default_tab = tab,
            Err(err) => tracing::warn!(error = %err, "ignoring --tab"),
        }
    }
    if args.no_task_view {
        settings.task_drilldown = false;
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref());
    init_tracing(&settings);
    apply_args(&mut settings, &args);

    let repository = OrderRepository::generate();
    tracing::info!(
        orders = repository.orders().len(),
        tab = settings.default_tab.as_str(),
        task_drilldown = settings.task_drilldown,
        "starting dashboard"
    );
    let session = DashboardSession::new(repository, settings);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Order Management Dashboard")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([960.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Order Management Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(session, ui_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("dashboard window failed: {err}"))
}
