//! UI layer for the desktop dashboard: app shell, views and status banner.

pub mod app;

pub use app::DashboardApp;
