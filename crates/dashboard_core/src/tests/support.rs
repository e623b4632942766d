//! Order builders shared by the unit test suites.

use shared::{Journey, Order, OrderId, Priority, ProjectProgression, ServiceId};

pub(crate) fn order(id: &str) -> Order {
    Order {
        id: OrderId::from(id),
        service_id: ServiceId(format!("SVC-{id}")),
        journey: Journey::Provide,
        status: "In Progress".to_string(),
        start_date: "2024-01-01".to_string(),
        completion_date: None,
        code_a_end: "1141-A100".to_string(),
        code_b_end: "1141-B100".to_string(),
        current_task: "Document verification".to_string(),
        priority: Priority::Medium,
        progress: 50,
        current_project_progression: ProjectProgression::P1,
        customer_name: format!("Customer {id}"),
        category: "Orders on Track".to_string(),
        subcategory: "Order under Validation".to_string(),
        description: "Provide new circuit".to_string(),
        estimated_duration: "2 weeks".to_string(),
        assigned_team: None,
        notes: String::new(),
        delay_reason: None,
        cc_date: None,
        queue_name: None,
        business_days_in_queue: None,
    }
}

pub(crate) fn with_priority(mut order: Order, priority: Priority) -> Order {
    order.priority = priority;
    order
}

pub(crate) fn with_start(mut order: Order, start_date: &str) -> Order {
    order.start_date = start_date.to_string();
    order
}

pub(crate) fn ids(orders: &[&Order]) -> Vec<String> {
    orders.iter().map(|order| order.id.to_string()).collect()
}
