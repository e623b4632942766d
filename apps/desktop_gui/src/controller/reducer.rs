//! Applies queued UI events to the dashboard session.

use chrono::NaiveDate;
use dashboard_core::{DashboardSession, OrderActions};

use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// A rendered export waiting to be written by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExport {
    pub filename: String,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Outcome {
    pub notice: Option<String>,
    pub error: Option<UiError>,
    pub close_task_forms: bool,
    pub export: Option<PendingExport>,
}

impl Outcome {
    fn notice(message: String) -> Self {
        Self {
            notice: Some(message),
            ..Self::default()
        }
    }
}

pub fn reduce<A: OrderActions>(
    session: &mut DashboardSession<A>,
    event: UiEvent,
    today: NaiveDate,
) -> Outcome {
    if let Some(nav) = event.as_navigation() {
        session.dispatch(nav);
        return Outcome::default();
    }

    match event {
        UiEvent::SelectTab(tab) => {
            session.set_active_tab(tab);
            Outcome::default()
        }
        UiEvent::ToggleSort(field) => {
            session.list_state_mut().toggle_sort(field);
            Outcome::default()
        }
        UiEvent::ClearFilters => {
            session.list_state_mut().clear_filters();
            Outcome::default()
        }
        UiEvent::Export => match session.export_list(today) {
            Some((filename, text)) => Outcome {
                export: Some(PendingExport { filename, text }),
                ..Outcome::default()
            },
            None => Outcome::default(),
        },
        UiEvent::FollowUp => session.send_follow_up().map(Outcome::notice).unwrap_or_default(),
        UiEvent::Prioritize => session.prioritize().map(Outcome::notice).unwrap_or_default(),
        UiEvent::CompleteTask => task_outcome(session.complete_task()),
        UiEvent::ForwardTask => task_outcome(session.forward_task()),
        UiEvent::Logout => {
            session.logout();
            Outcome::default()
        }
        UiEvent::Search(_)
        | UiEvent::SelectCard(_)
        | UiEvent::SelectOrder(_)
        | UiEvent::SelectTask(_)
        | UiEvent::Back => Outcome::default(),
    }
}

fn task_outcome(result: Result<String, shared::DashboardError>) -> Outcome {
    match result {
        Ok(message) => Outcome {
            notice: Some(message),
            close_task_forms: true,
            ..Outcome::default()
        },
        Err(err) => Outcome {
            error: Some(UiError::from_dashboard(UiErrorContext::TaskForm, &err)),
            ..Outcome::default()
        },
    }
}
