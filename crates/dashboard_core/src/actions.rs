//! User actions with effects outside the order data: reminders,
//! prioritisation, task completion and forwarding, logout.

use shared::{DashboardError, Order};
use tracing::info;

/// Queues a task can be forwarded to.
pub const FORWARD_QUEUES: [&str; 8] = [
    "Validation Queue",
    "Survey Team Queue",
    "Service Planning Queue",
    "Build Team Queue",
    "Test Team Queue",
    "Customer Support Queue",
    "Engineering Queue",
    "Quality Assurance Queue",
];

/// A validated task submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    Complete { notes: String },
    Forward { queue: String },
}

/// Inputs of the complete and forward modals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub notes: String,
    pub queue: Option<String>,
}

impl TaskForm {
    pub fn complete(&self) -> Result<TaskAction, DashboardError> {
        if self.notes.trim().is_empty() {
            return Err(DashboardError::MissingCompletionNotes);
        }
        Ok(TaskAction::Complete {
            notes: self.notes.clone(),
        })
    }

    pub fn forward(&self) -> Result<TaskAction, DashboardError> {
        match self.queue.as_deref() {
            Some(queue) if !queue.is_empty() => Ok(TaskAction::Forward {
                queue: queue.to_string(),
            }),
            _ => Err(DashboardError::MissingForwardQueue),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Receiver of user actions. Each method returns the confirmation shown to
/// the user.
pub trait OrderActions {
    fn send_follow_up(&self, order: &Order) -> String;
    fn prioritize(&self, order: &Order) -> String;
    fn submit_task(&self, order: &Order, action: &TaskAction) -> String;
    fn logout(&self);
}

pub fn follow_up_message(order: &Order) -> String {
    format!("Follow-up reminder sent for Order {}", order.id)
}

pub fn prioritize_message(order: &Order) -> String {
    format!(
        "Order {} has been prioritized based on CC Date: {}",
        order.id,
        order.cc_date.as_deref().unwrap_or_default()
    )
}

pub fn task_message(order: &Order, action: &TaskAction) -> String {
    match action {
        TaskAction::Complete { notes } => {
            format!("Task completed for Order {}\nNotes: {notes}", order.id)
        }
        TaskAction::Forward { queue } => {
            format!("Task forwarded to {queue} for Order {}", order.id)
        }
    }
}

/// Records actions in the log and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingActions;

impl OrderActions for LoggingActions {
    fn send_follow_up(&self, order: &Order) -> String {
        info!(order_id = %order.id, "follow-up reminder requested");
        follow_up_message(order)
    }

    fn prioritize(&self, order: &Order) -> String {
        info!(order_id = %order.id, cc_date = ?order.cc_date, "prioritization requested");
        prioritize_message(order)
    }

    fn submit_task(&self, order: &Order, action: &TaskAction) -> String {
        match action {
            TaskAction::Complete { .. } => {
                info!(order_id = %order.id, task = %order.current_task, "task completed")
            }
            TaskAction::Forward { queue } => {
                info!(order_id = %order.id, task = %order.current_task, queue = %queue, "task forwarded")
            }
        }
        task_message(order, action)
    }

    fn logout(&self) {
        info!("logout requested");
    }
}
