pub mod actions;
pub mod config;
pub mod detail;
pub mod display;
pub mod export;
pub mod list_view;
pub mod navigation;
pub mod repository;
pub mod search;
pub mod session;

pub use actions::{LoggingActions, OrderActions, TaskAction, TaskForm, FORWARD_QUEUES};
pub use config::{load_settings, Settings};
pub use list_view::{ListFilter, ListViewState, SortDirection, SortField, SortState};
pub use navigation::{ListContext, NavEvent, ViewState};
pub use repository::OrderRepository;
pub use search::{DashboardTab, EmptyReason, TabContent};
pub use session::DashboardSession;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
