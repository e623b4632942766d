//! Owner of the mutable dashboard state: the current view, the search query,
//! the active tab and the state of the open list.

use chrono::NaiveDate;
use shared::{DashboardError, Order, OrderSection};
use tracing::debug;

use crate::{
    actions::{LoggingActions, OrderActions, TaskAction, TaskForm},
    config::Settings,
    export,
    list_view::{summary_line, ListViewState},
    navigation::{transition, NavEvent, ViewState},
    repository::OrderRepository,
    search::{filter_sections, search_banner, tab_content, DashboardTab, TabContent},
};

pub struct DashboardSession<A = LoggingActions> {
    repository: OrderRepository,
    settings: Settings,
    actions: A,
    view: ViewState,
    search_query: String,
    // `None` while the query is blank
    filtered: Option<Vec<OrderSection>>,
    active_tab: DashboardTab,
    list: ListViewState,
    task_form: TaskForm,
}

impl DashboardSession<LoggingActions> {
    pub fn new(repository: OrderRepository, settings: Settings) -> Self {
        Self::with_actions(repository, settings, LoggingActions)
    }
}

impl<A: OrderActions> DashboardSession<A> {
    pub fn with_actions(repository: OrderRepository, settings: Settings, actions: A) -> Self {
        Self {
            active_tab: settings.default_tab,
            repository,
            settings,
            actions,
            view: ViewState::Dashboard,
            search_query: String::new(),
            filtered: None,
            list: ListViewState::new(),
            task_form: TaskForm::default(),
        }
    }

    pub fn repository(&self) -> &OrderRepository {
        &self.repository
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn active_tab(&self) -> DashboardTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: DashboardTab) {
        self.active_tab = tab;
    }

    /// Applies one navigation event. Selecting a card opens its list with
    /// fresh filters; going back to a list keeps the filters it had.
    pub fn dispatch(&mut self, event: NavEvent) {
        if let NavEvent::Search(query) = &event {
            self.set_search(query);
        }
        let opens_list = matches!(
            (&self.view, &event),
            (ViewState::Dashboard, NavEvent::SelectCard(_))
        );
        let from = self.view.name();
        let current = std::mem::take(&mut self.view);
        self.view = transition(current, &event, self.settings.task_drilldown);

        if opens_list {
            self.list = ListViewState::new();
        }
        if matches!(self.view, ViewState::TaskDetail { .. }) {
            self.task_form.reset();
        }
        debug!(event = event.name(), from, to = self.view.name(), "navigation");
    }

    fn set_search(&mut self, query: &str) {
        self.search_query = query.to_string();
        self.filtered = match filter_sections(self.repository.sections(), query) {
            std::borrow::Cow::Borrowed(_) => None,
            std::borrow::Cow::Owned(sections) => Some(sections),
        };
    }

    /// Sections after the dashboard search.
    pub fn sections(&self) -> &[OrderSection] {
        self.filtered
            .as_deref()
            .unwrap_or_else(|| self.repository.sections())
    }

    pub fn tab_content(&self) -> TabContent<'_> {
        tab_content(self.sections(), self.active_tab, &self.search_query)
    }

    pub fn search_banner(&self) -> Option<String> {
        search_banner(self.sections(), &self.search_query)
    }

    /// Per-tab totals from the unfiltered sections.
    pub fn tab_counts(&self) -> [(DashboardTab, usize); 3] {
        DashboardTab::ALL.map(|tab| {
            let count = self
                .repository
                .section(tab.category())
                .map_or(0, |section| section.count);
            (tab, count)
        })
    }

    pub fn list_state(&self) -> &ListViewState {
        &self.list
    }

    pub fn list_state_mut(&mut self) -> &mut ListViewState {
        &mut self.list
    }

    /// Rows of the open list, or nothing outside the list view.
    pub fn list_rows(&mut self) -> Vec<&Order> {
        match &self.view {
            ViewState::OrderList(ctx) => self.list.rows(&ctx.subcategory.orders),
            _ => Vec::new(),
        }
    }

    pub fn list_summary(&mut self) -> Option<String> {
        let total = match &self.view {
            ViewState::OrderList(ctx) => ctx.subcategory.orders.len(),
            _ => return None,
        };
        let shown = self.list_rows().len();
        Some(summary_line(shown, total))
    }

    /// File name and text for exporting the open list as of `date`.
    pub fn export_list(&mut self, date: NaiveDate) -> Option<(String, String)> {
        let ViewState::OrderList(ctx) = &self.view else {
            return None;
        };
        let bucket = &ctx.subcategory.orders;
        let rows = self.list.rows(bucket);
        Some((
            export::export_filename(&ctx.subcategory.name, date),
            export::to_delimited_text(bucket, &rows),
        ))
    }

    pub fn task_form(&self) -> &TaskForm {
        &self.task_form
    }

    pub fn task_form_mut(&mut self) -> &mut TaskForm {
        &mut self.task_form
    }

    pub fn send_follow_up(&self) -> Option<String> {
        self.view.order().map(|order| self.actions.send_follow_up(order))
    }

    pub fn prioritize(&self) -> Option<String> {
        self.view.order().map(|order| self.actions.prioritize(order))
    }

    /// Completes the open task. A validation failure changes nothing; success
    /// returns to the order detail.
    pub fn complete_task(&mut self) -> Result<String, DashboardError> {
        let action = self.task_form.complete()?;
        self.finish_task(&action)
    }

    pub fn forward_task(&mut self) -> Result<String, DashboardError> {
        let action = self.task_form.forward()?;
        self.finish_task(&action)
    }

    fn finish_task(&mut self, action: &TaskAction) -> Result<String, DashboardError> {
        let ViewState::TaskDetail { order, .. } = &self.view else {
            return Err(DashboardError::NoOpenTask);
        };
        let message = self.actions.submit_task(order, action);
        self.task_form.reset();
        self.dispatch(NavEvent::Back);
        Ok(message)
    }

    pub fn logout(&self) {
        self.actions.logout();
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
