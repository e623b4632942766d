//! UI events and error modeling for the dashboard controller.

use dashboard_core::{DashboardTab, ListContext, NavEvent, SortField};
use shared::{DashboardError, ErrorCode, Order};

/// Everything a widget can ask for. Queued while a frame renders and
/// applied before the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Search(String),
    SelectTab(DashboardTab),
    SelectCard(ListContext),
    SelectOrder(Order),
    SelectTask(Order),
    Back,
    ToggleSort(SortField),
    ClearFilters,
    Export,
    FollowUp,
    Prioritize,
    CompleteTask,
    ForwardTask,
    Logout,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Search(_) => "search",
            UiEvent::SelectTab(_) => "select_tab",
            UiEvent::SelectCard(_) => "select_card",
            UiEvent::SelectOrder(_) => "select_order",
            UiEvent::SelectTask(_) => "select_task",
            UiEvent::Back => "back",
            UiEvent::ToggleSort(_) => "toggle_sort",
            UiEvent::ClearFilters => "clear_filters",
            UiEvent::Export => "export",
            UiEvent::FollowUp => "follow_up",
            UiEvent::Prioritize => "prioritize",
            UiEvent::CompleteTask => "complete_task",
            UiEvent::ForwardTask => "forward_task",
            UiEvent::Logout => "logout",
        }
    }

    /// The navigation event this UI event stands for, if any.
    pub fn as_navigation(&self) -> Option<NavEvent> {
        match self {
            UiEvent::Search(query) => Some(NavEvent::Search(query.clone())),
            UiEvent::SelectCard(ctx) => Some(NavEvent::SelectCard(ctx.clone())),
            UiEvent::SelectOrder(order) => Some(NavEvent::SelectOrder(order.clone())),
            UiEvent::SelectTask(order) => Some(NavEvent::SelectTask(order.clone())),
            UiEvent::Back => Some(NavEvent::Back),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Io,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    TaskForm,
    Export,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_dashboard(context: UiErrorContext, err: &DashboardError) -> Self {
        let category = match err.code() {
            ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::NotFound | ErrorCode::InvalidSetting => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("failed to write")
            || lower.contains("failed to create")
            || lower.contains("permission denied")
            || lower.contains("no such file")
        {
            UiErrorCategory::Io
        } else if lower.contains("please") || lower.contains("missing") {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
        }
    }

    /// Validation failures keep their modal open so the user can fix input.
    pub fn keeps_form_open(&self) -> bool {
        self.category == UiErrorCategory::Validation && self.context == UiErrorContext::TaskForm
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
