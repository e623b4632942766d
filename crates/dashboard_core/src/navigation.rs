//! View-state machine for the dashboard: where the user currently is and
//! which moves are legal from there.

use shared::{Order, OrderSubcategory};
use tracing::debug;

/// The list a detail view returns to.
#[derive(Debug, Clone, PartialEq)]
pub struct ListContext {
    pub subcategory: OrderSubcategory,
    pub section_title: String,
}

impl ListContext {
    pub fn new(subcategory: OrderSubcategory, section_title: impl Into<String>) -> Self {
        Self {
            subcategory,
            section_title: section_title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Dashboard,
    OrderList(ListContext),
    OrderDetail {
        order: Order,
        return_to: Option<ListContext>,
    },
    TaskDetail {
        order: Order,
        return_to: Option<ListContext>,
    },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Dashboard => "dashboard",
            ViewState::OrderList(_) => "order_list",
            ViewState::OrderDetail { .. } => "order_detail",
            ViewState::TaskDetail { .. } => "task_detail",
        }
    }

    pub fn order(&self) -> Option<&Order> {
        match self {
            ViewState::OrderDetail { order, .. } | ViewState::TaskDetail { order, .. } => {
                Some(order)
            }
            ViewState::Dashboard | ViewState::OrderList(_) => None,
        }
    }

    pub fn list_context(&self) -> Option<&ListContext> {
        match self {
            ViewState::OrderList(ctx) => Some(ctx),
            ViewState::OrderDetail { return_to, .. } | ViewState::TaskDetail { return_to, .. } => {
                return_to.as_ref()
            }
            ViewState::Dashboard => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    SelectCard(ListContext),
    SelectOrder(Order),
    SelectTask(Order),
    Back,
    Search(String),
}

impl NavEvent {
    pub fn name(&self) -> &'static str {
        match self {
            NavEvent::SelectCard(_) => "select_card",
            NavEvent::SelectOrder(_) => "select_order",
            NavEvent::SelectTask(_) => "select_task",
            NavEvent::Back => "back",
            NavEvent::Search(_) => "search",
        }
    }
}

/// Next view for `event` in `state`. Events that are not legal in the
/// current state leave it unchanged. `task_drilldown` gates the task view.
pub fn transition(state: ViewState, event: &NavEvent, task_drilldown: bool) -> ViewState {
    match (state, event) {
        // the query itself lives with the session
        (_, NavEvent::Search(_)) => ViewState::Dashboard,

        (ViewState::Dashboard, NavEvent::SelectCard(ctx)) => ViewState::OrderList(ctx.clone()),

        (ViewState::Dashboard, NavEvent::SelectOrder(order)) => ViewState::OrderDetail {
            order: order.clone(),
            return_to: None,
        },
        (ViewState::OrderList(ctx), NavEvent::SelectOrder(order)) => ViewState::OrderDetail {
            order: order.clone(),
            return_to: Some(ctx),
        },

        (ViewState::OrderDetail { return_to, .. }, NavEvent::SelectTask(order))
            if task_drilldown =>
        {
            ViewState::TaskDetail {
                order: order.clone(),
                return_to,
            }
        }

        (ViewState::TaskDetail { order, return_to }, NavEvent::Back) => {
            ViewState::OrderDetail { order, return_to }
        }
        (ViewState::OrderDetail { return_to, .. }, NavEvent::Back) => match return_to {
            Some(ctx) => ViewState::OrderList(ctx),
            None => ViewState::Dashboard,
        },
        (ViewState::OrderList(_), NavEvent::Back) => ViewState::Dashboard,

        (state, event) => {
            debug!(state = state.name(), event = event.name(), "ignoring navigation event");
            state
        }
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
