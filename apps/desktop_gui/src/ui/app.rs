use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use dashboard_core::{
    detail::{format_date, task_description, DetailSections, ProgressBand},
    display::{
        card_name, stage_name, tab_heading, tab_label, DASHBOARD_SUBTITLE, DASHBOARD_TITLE,
        WORKFLOW_LEGEND,
    },
    list_view::summary_line,
    DashboardSession, DashboardTab, EmptyReason, ListContext, SortDirection, SortField,
    TabContent, ViewState, FORWARD_QUEUES,
};
use eframe::egui;
use shared::{Journey, Order, OrderSection, OrderSubcategory, Priority};

use crate::controller::{
    events::{UiError, UiErrorCategory, UiErrorContext, UiEvent},
    orchestration::{choose_export_path, dispatch_ui_event, write_export},
    reducer::{reduce, Outcome},
};

const BRAND: egui::Color32 = egui::Color32::from_rgb(7, 59, 76);
const MUTED: egui::Color32 = egui::Color32::from_rgb(107, 114, 128);
const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(248, 250, 252);
const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(226, 232, 240);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Io => "File",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

fn priority_color(priority: Priority) -> egui::Color32 {
    match priority {
        Priority::High => egui::Color32::from_rgb(220, 38, 38),
        Priority::Medium => egui::Color32::from_rgb(202, 138, 4),
        Priority::Low => egui::Color32::from_rgb(22, 163, 74),
    }
}

fn journey_color(journey: Journey) -> egui::Color32 {
    match journey {
        Journey::Provide => egui::Color32::from_rgb(16, 185, 129),
        Journey::Modify => egui::Color32::from_rgb(245, 158, 11),
        Journey::Cease => egui::Color32::from_rgb(239, 68, 68),
    }
}

fn band_color(band: ProgressBand) -> egui::Color32 {
    match band {
        ProgressBand::Complete => egui::Color32::from_rgb(34, 197, 94),
        ProgressBand::Advancing => egui::Color32::from_rgb(59, 130, 246),
        ProgressBand::Started => egui::Color32::from_rgb(234, 179, 8),
        ProgressBand::Early => egui::Color32::from_rgb(239, 68, 68),
    }
}

pub struct DashboardApp {
    session: DashboardSession,
    ui_tx: Sender<UiEvent>,
    ui_rx: Receiver<UiEvent>,
    search_input: String,
    status: String,
    status_banner: Option<StatusBanner>,
    complete_modal_open: bool,
    forward_modal_open: bool,
}

impl DashboardApp {
    pub fn new(session: DashboardSession, ui_tx: Sender<UiEvent>, ui_rx: Receiver<UiEvent>) -> Self {
        let status = format!("{} orders loaded", session.repository().orders().len());
        Self {
            session,
            ui_tx,
            ui_rx,
            search_input: String::new(),
            status,
            status_banner: None,
            complete_modal_open: false,
            forward_modal_open: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            let outcome = reduce(&mut self.session, event, Local::now().date_naive());
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        if let Some(notice) = outcome.notice {
            self.status = notice.replace('\n', " | ");
            self.status_banner = Some(StatusBanner {
                severity: StatusBannerSeverity::Info,
                message: notice,
            });
        }
        if outcome.close_task_forms {
            self.complete_modal_open = false;
            self.forward_modal_open = false;
        }
        if let Some(err) = outcome.error {
            self.report_error(err);
        }
        if let Some(export) = outcome.export {
            let dir = self.session.settings().export_dir();
            let Some(path) = choose_export_path(&dir, &export.filename) else {
                self.status = "Export cancelled".to_string();
                return;
            };
            match write_export(&path, &export) {
                Ok(()) => self.status = format!("Exported to {}", path.display()),
                Err(err) => {
                    self.report_error(UiError::from_message(UiErrorContext::Export, format!("{err:#}")))
                }
            }
        }
    }

    fn report_error(&mut self, err: UiError) {
        self.status = format!("{} error: {}", err_label(err.category()), err.message());
        let message = if err.keeps_form_open() {
            err.message().to_string()
        } else {
            self.status.clone()
        };
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message,
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Info => (
                    egui::Color32::from_rgb(30, 78, 96),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(80, 140, 160)),
                ),
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context, pending: &mut Vec<UiEvent>) {
        egui::TopBottomPanel::top("app_top_bar")
            .resizable(false)
            .frame(
                egui::Frame::new()
                    .fill(BRAND)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Order Tracker")
                            .strong()
                            .size(18.0)
                            .color(egui::Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Logout").clicked() {
                            pending.push(UiEvent::Logout);
                        }
                        if ui.button("Clear").clicked() {
                            self.search_input.clear();
                            pending.push(UiEvent::Search(String::new()));
                        }
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut self.search_input)
                                .hint_text("Search orders, customers, tasks...")
                                .desired_width(300.0),
                        );
                        let submitted = response.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if let Some(event) =
                            search_event(&self.search_input, response.changed(), submitted)
                        {
                            pending.push(event);
                        }
                    });
                });
            });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .exact_height(22.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(egui::RichText::new(&self.status).small().color(MUTED));
                });
            });
    }

    fn show_dashboard(&self, ui: &mut egui::Ui, pending: &mut Vec<UiEvent>) {
        ui.heading(egui::RichText::new(DASHBOARD_TITLE).color(BRAND).strong());
        ui.label(egui::RichText::new(DASHBOARD_SUBTITLE).color(MUTED));
        ui.add_space(6.0);

        if let Some(banner) = self.session.search_banner() {
            ui.label(egui::RichText::new(banner).italics().color(BRAND));
            ui.add_space(4.0);
        }

        let active = self.session.active_tab();
        ui.horizontal(|ui| {
            for (tab, count) in self.session.tab_counts() {
                let text = if count > 0 {
                    format!("{} ({count})", tab_label(tab))
                } else {
                    tab_label(tab).to_string()
                };
                if ui.selectable_label(tab == active, text).clicked() && tab != active {
                    pending.push(UiEvent::SelectTab(tab));
                }
            }
        });
        ui.separator();

        match self.session.tab_content() {
            TabContent::Section(section) => self.show_section(ui, active, section, pending),
            TabContent::Empty(reason) => show_empty(ui, reason),
        }
    }

    fn show_section(
        &self,
        ui: &mut egui::Ui,
        tab: DashboardTab,
        section: &OrderSection,
        pending: &mut Vec<UiEvent>,
    ) {
        let (heading, subheading) = tab_heading(tab);
        ui.label(egui::RichText::new(heading).strong().size(16.0).color(BRAND));
        ui.label(egui::RichText::new(subheading).color(MUTED));
        ui.add_space(8.0);

        let workflow = tab == DashboardTab::OnTrack;
        ui.horizontal_wrapped(|ui| {
            let last = section.subcategories.len().saturating_sub(1);
            for (idx, sub) in section.subcategories.iter().enumerate() {
                let name = if workflow {
                    stage_name(&sub.name)
                } else {
                    card_name(&sub.name)
                };
                if order_card(ui, sub, name).clicked() {
                    pending.push(UiEvent::SelectCard(ListContext::new(
                        sub.clone(),
                        section.title.clone(),
                    )));
                }
                if workflow && idx < last {
                    ui.label(egui::RichText::new("→").size(20.0).color(BRAND));
                }
            }
        });

        if workflow {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(WORKFLOW_LEGEND).small().color(MUTED));
        }
    }

    fn show_order_list(&mut self, ui: &mut egui::Ui, ctx: &ListContext, pending: &mut Vec<UiEvent>) {
        ui.horizontal(|ui| {
            if ui.button("← Back to Dashboard").clicked() {
                pending.push(UiEvent::Back);
            }
            ui.heading(egui::RichText::new(&ctx.subcategory.name).color(BRAND).strong());
            ui.label(egui::RichText::new(&ctx.section_title).color(MUTED));
        });
        ui.separator();

        let active_filters = {
            let filter = &mut self.session.list_state_mut().filter;
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut filter.query)
                        .hint_text("Filter by ID, customer, service, task...")
                        .desired_width(260.0),
                );
                egui::ComboBox::from_id_salt("priority_filter")
                    .selected_text(filter.priority.map_or("All Priorities", Priority::label))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut filter.priority, None, "All Priorities");
                        for priority in Priority::ALL {
                            ui.selectable_value(&mut filter.priority, Some(priority), priority.label());
                        }
                    });
                egui::ComboBox::from_id_salt("journey_filter")
                    .selected_text(filter.journey.map_or("All Journeys", Journey::as_str))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut filter.journey, None, "All Journeys");
                        for journey in Journey::ALL {
                            ui.selectable_value(&mut filter.journey, Some(journey), journey.as_str());
                        }
                    });
            });
            filter.active_count()
        };

        let sort = self.session.list_state().sort;
        let rows: Vec<Order> = self.session.list_rows().into_iter().cloned().collect();

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(summary_line(rows.len(), ctx.subcategory.orders.len()))
                    .color(MUTED),
            );
            if active_filters > 0
                && ui
                    .button(format!("Clear filters ({active_filters})"))
                    .clicked()
            {
                pending.push(UiEvent::ClearFilters);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Export CSV").clicked() {
                    pending.push(UiEvent::Export);
                }
            });
        });
        ui.add_space(4.0);

        if rows.is_empty() {
            ui.label(egui::RichText::new("No orders match the current filters").color(MUTED));
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("orders_table")
                .striped(true)
                .num_columns(SortField::HEADERS.len() + 1)
                .spacing(egui::vec2(16.0, 6.0))
                .show(ui, |ui| {
                    for field in SortField::HEADERS {
                        let marker = match (sort.field == field, sort.direction) {
                            (true, SortDirection::Asc) => " ▲",
                            (true, SortDirection::Desc) => " ▼",
                            (false, _) => "",
                        };
                        if ui
                            .button(egui::RichText::new(format!("{}{marker}", field.label())).strong())
                            .clicked()
                        {
                            pending.push(UiEvent::ToggleSort(field));
                        }
                    }
                    ui.label(egui::RichText::new("Progress").strong());
                    ui.end_row();

                    for order in &rows {
                        if ui.link(order.id.as_str()).clicked() {
                            pending.push(UiEvent::SelectOrder(order.clone()));
                        }
                        ui.label(&order.customer_name);
                        ui.label(format_date(Some(&order.start_date)));
                        ui.label(
                            egui::RichText::new(order.journey.as_str()).color(journey_color(order.journey)),
                        );
                        ui.label(
                            egui::RichText::new(order.priority.label())
                                .color(priority_color(order.priority)),
                        );
                        ui.label(order.current_project_progression.as_str());
                        ui.add(progress_bar(order.progress).desired_width(90.0));
                        ui.end_row();
                    }
                });
        });
    }

    fn show_order_detail(
        &self,
        ui: &mut egui::Ui,
        order: &Order,
        pending: &mut Vec<UiEvent>,
    ) {
        ui.horizontal(|ui| {
            if ui.button("← Back to Orders").clicked() {
                pending.push(UiEvent::Back);
            }
            ui.heading(egui::RichText::new(format!("Order {}", order.id)).color(BRAND).strong());
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            card_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&order.customer_name).strong().size(16.0));
                    ui.label(
                        egui::RichText::new(order.priority.label())
                            .color(priority_color(order.priority)),
                    );
                    ui.label(
                        egui::RichText::new(order.journey.as_str()).color(journey_color(order.journey)),
                    );
                    ui.label(order.current_project_progression.as_str());
                });
                ui.label(&order.description);
                ui.add(progress_bar(order.progress));
            });
            ui.add_space(8.0);

            card_frame().show(ui, |ui| {
                egui::Grid::new("order_fields").num_columns(2).spacing(egui::vec2(24.0, 4.0)).show(ui, |ui| {
                    let team = order.assigned_team.as_deref().unwrap_or("-");
                    let fields = [
                        ("Service ID", order.service_id.to_string()),
                        ("Status", order.status.clone()),
                        ("Start Date", format_date(Some(&order.start_date))),
                        ("Completion Date", format_date(order.completion_date.as_deref())),
                        ("A-End Code", order.code_a_end.clone()),
                        ("B-End Code", order.code_b_end.clone()),
                        ("Estimated Duration", order.estimated_duration.clone()),
                        ("Assigned Team", team.to_string()),
                        ("Category", order.category.clone()),
                        ("Subcategory", order.subcategory.clone()),
                    ];
                    for (label, value) in fields {
                        ui.label(egui::RichText::new(label).color(MUTED));
                        ui.label(value);
                        ui.end_row();
                    }
                });
            });
            ui.add_space(8.0);

            card_frame().show(ui, |ui| {
                ui.label(egui::RichText::new("Current Task").color(MUTED));
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&order.current_task).strong());
                    if self.session.settings().task_drilldown && ui.button("Open Task").clicked() {
                        pending.push(UiEvent::SelectTask(order.clone()));
                    }
                });
                if !order.notes.is_empty() {
                    ui.label(egui::RichText::new(&order.notes).italics());
                }
            });

            let sections = DetailSections::for_order(order);
            if sections.delay_management {
                ui.add_space(8.0);
                card_frame().show(ui, |ui| {
                    ui.label(egui::RichText::new("Delay Management").strong().color(BRAND));
                    ui.horizontal(|ui| {
                        if sections.follow_up_action && ui.button("Send Follow-up Reminder").clicked() {
                            pending.push(UiEvent::FollowUp);
                        }
                        if sections.prioritize_action
                            && ui.button("Prioritize by CC Date").clicked()
                        {
                            pending.push(UiEvent::Prioritize);
                        }
                    });
                    if sections.delay_reason_card {
                        ui.label(format!(
                            "Delay reason: {}",
                            order.delay_reason.as_deref().unwrap_or_default()
                        ));
                    }
                    if let Some(cc_date) = order.cc_date.as_deref() {
                        ui.label(format!("CC Date: {cc_date}"));
                    }
                });
            }
            if sections.queue_card {
                ui.add_space(8.0);
                card_frame().show(ui, |ui| {
                    ui.label(egui::RichText::new("Queue").strong().color(BRAND));
                    ui.label(order.queue_name.as_deref().unwrap_or_default());
                    if let Some(days) = order.business_days_in_queue {
                        ui.label(format!("{days} business days in queue"));
                    }
                });
            }
        });
    }

    fn show_task_detail(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, order: &Order, pending: &mut Vec<UiEvent>) {
        ui.horizontal(|ui| {
            if ui.button("← Back to Order Details").clicked() {
                pending.push(UiEvent::Back);
            }
            ui.heading(egui::RichText::new("Task Details").color(BRAND).strong());
        });
        ui.separator();

        card_frame().show(ui, |ui| {
            ui.label(egui::RichText::new(&order.current_task).strong().size(16.0).color(BRAND));
            ui.label(format!("Order {} · {}", order.id, order.customer_name));
            ui.add_space(4.0);
            ui.label(task_description(&order.current_task, order.journey));
            ui.add_space(4.0);
            ui.label(format!(
                "Phase {} · {} · Team: {}",
                order.current_project_progression,
                order.journey,
                order.assigned_team.as_deref().unwrap_or("Unassigned")
            ));
            ui.add(progress_bar(order.progress));
        });
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("Complete Task").clicked() {
                self.session.task_form_mut().reset();
                self.complete_modal_open = true;
            }
            if ui.button("Forward Task").clicked() {
                self.session.task_form_mut().reset();
                self.forward_modal_open = true;
            }
        });

        self.show_task_modals(ctx, pending);
    }

    fn show_task_modals(&mut self, ctx: &egui::Context, pending: &mut Vec<UiEvent>) {
        let mut complete_open = self.complete_modal_open;
        let mut cancel = false;
        egui::Window::new("Complete Task")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .open(&mut complete_open)
            .show(ctx, |ui| {
                ui.label("Completion notes");
                ui.add(
                    egui::TextEdit::multiline(&mut self.session.task_form_mut().notes)
                        .desired_rows(4)
                        .hint_text("Describe the work completed..."),
                );
                ui.horizontal(|ui| {
                    if ui.button("Complete").clicked() {
                        pending.push(UiEvent::CompleteTask);
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });
        self.complete_modal_open = complete_open && !cancel;

        let mut forward_open = self.forward_modal_open;
        let mut cancel = false;
        egui::Window::new("Forward Task")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .open(&mut forward_open)
            .show(ctx, |ui| {
                let queue = &mut self.session.task_form_mut().queue;
                egui::ComboBox::from_id_salt("forward_queue")
                    .selected_text(queue.as_deref().unwrap_or("Select a queue"))
                    .width(240.0)
                    .show_ui(ui, |ui| {
                        for name in FORWARD_QUEUES {
                            ui.selectable_value(queue, Some(name.to_string()), name);
                        }
                    });
                ui.horizontal(|ui| {
                    if ui.button("Forward").clicked() {
                        pending.push(UiEvent::ForwardTask);
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });
        self.forward_modal_open = forward_open && !cancel;
    }
}

fn card_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(CARD_FILL)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(12, 10))
}

fn progress_bar(progress: i32) -> egui::ProgressBar {
    let band = ProgressBand::for_progress(progress);
    egui::ProgressBar::new(progress.clamp(0, 100) as f32 / 100.0)
        .fill(band_color(band))
        .text(format!("{progress}%"))
}

fn order_card(ui: &mut egui::Ui, sub: &OrderSubcategory, name: &str) -> egui::Response {
    let inner = card_frame().show(ui, |ui| {
        ui.set_min_size(egui::vec2(130.0, 80.0));
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(sub.count.to_string()).size(26.0).strong().color(BRAND));
            ui.label(egui::RichText::new("Orders").small().color(MUTED));
            ui.label(egui::RichText::new(name).strong());
        });
    });
    inner
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .on_hover_text(&sub.name)
}

fn show_empty(ui: &mut egui::Ui, reason: EmptyReason) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("No orders found").size(18.0).color(MUTED));
        ui.label(egui::RichText::new(reason.hint()).color(MUTED));
    });
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut pending = Vec::new();
        self.show_top_bar(ctx, &mut pending);
        self.show_status_bar(ctx);

        let view = self.session.view().clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            match &view {
                ViewState::Dashboard => self.show_dashboard(ui, &mut pending),
                ViewState::OrderList(list) => self.show_order_list(ui, list, &mut pending),
                ViewState::OrderDetail { order, .. } => {
                    self.show_order_detail(ui, order, &mut pending)
                }
                ViewState::TaskDetail { order, .. } => {
                    self.show_task_detail(ctx, ui, order, &mut pending)
                }
            }
        });

        if !pending.is_empty() {
            for event in pending {
                if matches!(event, UiEvent::Back | UiEvent::Search(_)) {
                    self.complete_modal_open = false;
                    self.forward_modal_open = false;
                }
                dispatch_ui_event(&self.ui_tx, event, &mut self.status);
            }
            ctx.request_repaint();
        }
    }
}

/// The top-bar query applies on every edit; Enter re-applies it.
fn search_event(input: &str, changed: bool, submitted: bool) -> Option<UiEvent> {
    (changed || submitted).then(|| UiEvent::Search(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_edit_to_the_search_box_searches() {
        assert!(matches!(
            search_event("ac", true, false),
            Some(UiEvent::Search(query)) if query == "ac"
        ));
        assert!(matches!(
            search_event("", true, false),
            Some(UiEvent::Search(query)) if query.is_empty()
        ));
        assert!(matches!(
            search_event("acme", false, true),
            Some(UiEvent::Search(query)) if query == "acme"
        ));
        assert!(search_event("acme", false, false).is_none());
    }
}
