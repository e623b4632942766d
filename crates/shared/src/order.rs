use serde::{Deserialize, Serialize};

use crate::domain::{Category, Journey, OrderId, Priority, ProjectProgression, ServiceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub service_id: ServiceId,
    pub journey: Journey,
    pub status: String,
    /// ISO date (`YYYY-MM-DD`); kept as text because list sorting must stay
    /// total even when a value does not parse.
    pub start_date: String,
    pub completion_date: Option<String>,
    pub code_a_end: String,
    pub code_b_end: String,
    pub current_task: String,
    pub priority: Priority,
    pub progress: i32,
    pub current_project_progression: ProjectProgression,
    pub customer_name: String,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub estimated_duration: String,
    pub assigned_team: Option<String>,
    pub notes: String,

    // delayed orders
    pub delay_reason: Option<String>,
    pub cc_date: Option<String>,

    // stuck orders
    pub queue_name: Option<String>,
    pub business_days_in_queue: Option<u32>,
}

impl Order {
    /// Typed category, `None` when the stored title is not one of the three
    /// fixed buckets.
    pub fn category_kind(&self) -> Option<Category> {
        Category::from_title(&self.category)
    }

    pub fn is_delayed(&self) -> bool {
        self.category_kind() == Some(Category::Delayed)
    }

    pub fn is_stuck(&self) -> bool {
        self.category_kind() == Some(Category::Stuck)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubcategory {
    pub name: String,
    pub count: usize,
    pub orders: Vec<Order>,
}

impl OrderSubcategory {
    /// Builds a bucket whose `count` is derived from its orders.
    pub fn from_orders(name: impl Into<String>, orders: Vec<Order>) -> Self {
        Self {
            name: name.into(),
            count: orders.len(),
            orders,
        }
    }

    pub fn count_matches_orders(&self) -> bool {
        self.count == self.orders.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSection {
    pub title: String,
    pub count: usize,
    pub subcategories: Vec<OrderSubcategory>,
}

impl OrderSection {
    pub fn new(title: impl Into<String>, subcategories: Vec<OrderSubcategory>) -> Self {
        Self {
            title: title.into(),
            count: subcategories.iter().map(|sub| sub.count).sum(),
            subcategories,
        }
    }

    pub fn subcategory(&self, name: &str) -> Option<&OrderSubcategory> {
        self.subcategories.iter().find(|sub| sub.name == name)
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.subcategories.iter().flat_map(|sub| sub.orders.iter())
    }
}
