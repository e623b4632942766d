//! Synthetic order data and the category/subcategory index built over it.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use shared::{
    domain::{CP_DELAYED, OR_DELAYED},
    Category, DashboardError, Journey, Order, OrderId, OrderSection, OrderSubcategory, Priority,
    ProjectProgression, ServiceId,
};
use tracing::{debug, warn};

/// Hand-authored bucket sizes the generator aims for.
pub const PLANNED_COUNTS: [(&str, usize); 13] = [
    ("Order under Validation", 5),
    ("Triage Orders", 4),
    ("Orders which are in survey phase", 6),
    ("Orders in Service Planning Phase", 7),
    ("Orders in JobPack planning Phase", 5),
    ("Orders in Build", 4),
    ("Orders in Fit and Test", 3),
    ("Orders in Prove Service", 3),
    (CP_DELAYED, 5),
    (OR_DELAYED, 3),
    ("Product Support Group", 4),
    ("Application Support Group", 3),
    ("Functional Fallout", 2),
];

const CUSTOMERS: [&str; 12] = [
    "Acme Manufacturing Ltd",
    "Northwind Logistics",
    "Brightside Healthcare",
    "Harbour Financial Group",
    "Greenfield Academy Trust",
    "Summit Retail plc",
    "Riverside Council",
    "Orion Data Centres",
    "Kestrel Engineering",
    "Lakeside Hotels",
    "Pioneer Media",
    "Westgate Properties",
];

const TEAMS: [&str; 5] = [
    "North Delivery Team",
    "South Delivery Team",
    "Planning Cell A",
    "Field Engineering",
    "Customer Operations",
];

const DURATIONS: [&str; 4] = ["2 weeks", "3 weeks", "4 weeks", "6 weeks"];

const DELAY_REASONS: [&str; 5] = [
    "Customer site not ready for installation",
    "Awaiting wayleave approval from landlord",
    "Customer requested later appointment",
    "Civil works required before fibre can be laid",
    "Awaiting power and space confirmation",
];

fn stage_tasks(subcategory: &str) -> &'static [&'static str] {
    match subcategory {
        "Order under Validation" => &[
            "Document verification",
            "Requirements review",
            "Site survey validation",
        ],
        "Triage Orders" => &[
            "Priority assessment",
            "Technical feasibility review",
            "Resource allocation planning",
        ],
        "Orders which are in survey phase" => &[
            "Site survey completion",
            "Survey data analysis",
        ],
        "Orders in Service Planning Phase" => &[
            "Service design",
            "Capacity planning",
            "Network design",
            "Redundancy planning",
        ],
        "Orders in JobPack planning Phase" => &["Equipment planning", "Resource planning"],
        "Orders in Build" => &["Fibre installation", "Equipment installation"],
        "Orders in Fit and Test" => &["Quality planning", "End-to-end testing"],
        "Orders in Prove Service" => &["Service acceptance", "Final documentation review"],
        CP_DELAYED => &["Customer appointment rebooking", "Awaiting customer access"],
        OR_DELAYED => &["Wayleave chase", "Civil works scheduling"],
        "Product Support Group" => &["Product configuration fix", "Inventory correction"],
        "Application Support Group" => &["Workflow restart", "System record repair"],
        _ => &["Manual fallout review"],
    }
}

fn stuck_queue(subcategory: &str) -> &'static str {
    match subcategory {
        "Product Support Group" => "PSG Resolution Queue",
        "Application Support Group" => "ASG Incident Queue",
        _ => "Business Fallout Queue",
    }
}

fn description_for(journey: Journey, n: usize) -> String {
    let bandwidth = ["100Mbps", "1Gbps", "10Gbps"][n % 3];
    match journey {
        Journey::Provide => format!("Provide new {bandwidth} Ethernet access circuit"),
        Journey::Modify => format!("Upgrade existing circuit bandwidth to {bandwidth}"),
        Journey::Cease => format!("Cease {bandwidth} circuit and recover equipment"),
    }
}

fn progression_for(category: Category, stage: usize, j: usize) -> ProjectProgression {
    match category {
        Category::OnTrack => match stage {
            0 | 1 => ProjectProgression::P1,
            2 | 3 => ProjectProgression::P2,
            4 => ProjectProgression::P3,
            5 | 6 => ProjectProgression::P4,
            _ => ProjectProgression::P5,
        },
        Category::Delayed => ProjectProgression::P3,
        Category::Stuck => {
            if j % 2 == 0 {
                ProjectProgression::P2
            } else {
                ProjectProgression::P4
            }
        }
    }
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 8).unwrap_or_default()
}

fn date_after(days: u64) -> NaiveDate {
    base_date()
        .checked_add_days(Days::new(days))
        .unwrap_or_else(base_date)
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn make_order(n: usize, category: Category, stage: usize, subcategory: &str, j: usize) -> Order {
    let journey = Journey::ALL[(n + stage) % Journey::ALL.len()];
    let priority = Priority::ALL[(n / 2 + stage) % Priority::ALL.len()];
    let start = date_after(((n * 17) % 150) as u64);
    let tasks = stage_tasks(subcategory);

    let progress: usize = match category {
        Category::OnTrack => (8 + stage * 12 + j * 2).min(100),
        Category::Delayed => 30 + j * 7,
        Category::Stuck => 20 + j * 9,
    };
    let progress = progress as i32;

    let completion_date = (progress >= 85).then(|| iso(start + Days::new(60)));
    let (delay_reason, cc_date) = match subcategory {
        CP_DELAYED => (Some(DELAY_REASONS[j % DELAY_REASONS.len()].to_string()), None),
        OR_DELAYED => (
            Some(DELAY_REASONS[(j + 1) % DELAY_REASONS.len()].to_string()),
            Some(iso(start + Days::new(45 + 7 * j as u64))),
        ),
        _ => (None, None),
    };
    let (queue_name, business_days_in_queue) = if category == Category::Stuck {
        (Some(stuck_queue(subcategory).to_string()), Some(3 + 4 * j as u32))
    } else {
        (None, None)
    };

    Order {
        id: OrderId(format!("ORD-{:05}", 24001 + n)),
        service_id: ServiceId(format!("SVC-{:06}", 450_000 + n * 37)),
        journey,
        status: match category {
            Category::OnTrack => "In Progress",
            Category::Delayed => "Delayed",
            Category::Stuck => "On Hold",
        }
        .to_string(),
        start_date: iso(start),
        completion_date,
        code_a_end: format!("1141-A{:03}", 100 + (n * 7) % 900),
        code_b_end: format!("1141-B{:03}", 100 + (n * 11) % 900),
        current_task: tasks[j % tasks.len()].to_string(),
        priority,
        progress,
        current_project_progression: progression_for(category, stage, j),
        customer_name: CUSTOMERS[n % CUSTOMERS.len()].to_string(),
        category: category.title().to_string(),
        subcategory: subcategory.to_string(),
        description: description_for(journey, n),
        estimated_duration: DURATIONS[n % DURATIONS.len()].to_string(),
        assigned_team: (n % 7 != 0).then(|| TEAMS[n % TEAMS.len()].to_string()),
        notes: format!("{} journey for {}", journey, CUSTOMERS[n % CUSTOMERS.len()]),
        delay_reason,
        cc_date,
        queue_name,
        business_days_in_queue,
    }
}

/// Deterministic mock order set covering every subcategory of the fixed
/// vocabulary.
pub fn generate_orders() -> Vec<Order> {
    let mut orders = Vec::new();
    for category in Category::ALL {
        for (stage, subcategory) in category.subcategories().iter().enumerate() {
            for j in 0..planned_count(subcategory) {
                let n = orders.len();
                orders.push(make_order(n, category, stage, subcategory, j));
            }
        }
    }
    orders
}

pub fn planned_count(subcategory: &str) -> usize {
    PLANNED_COUNTS
        .iter()
        .find(|(name, _)| *name == subcategory)
        .map(|(_, count)| *count)
        .unwrap_or(0)
}

/// Positions of orders grouped by category title and by subcategory name.
#[derive(Debug, Clone, Default)]
pub struct OrderIndex {
    by_category: HashMap<String, Vec<usize>>,
    by_subcategory: HashMap<String, Vec<usize>>,
}

impl OrderIndex {
    pub fn build(orders: &[Order]) -> Self {
        let mut index = Self::default();
        for (pos, order) in orders.iter().enumerate() {
            index
                .by_category
                .entry(order.category.clone())
                .or_default()
                .push(pos);
            index
                .by_subcategory
                .entry(order.subcategory.clone())
                .or_default()
                .push(pos);
        }
        index
    }

    pub fn category(&self, title: &str) -> &[usize] {
        self.by_category.get(title).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn subcategory(&self, name: &str) -> &[usize] {
        self.by_subcategory
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountDrift {
    pub subcategory: String,
    pub planned: usize,
    pub actual: usize,
}

/// Immutable session data: the orders, their index, and the three sections
/// built from them.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    orders: Vec<Order>,
    index: OrderIndex,
    sections: Vec<OrderSection>,
}

impl OrderRepository {
    pub fn generate() -> Self {
        let repository = Self::from_orders(generate_orders());
        for drift in repository.count_drift() {
            warn!(
                subcategory = %drift.subcategory,
                planned = drift.planned,
                actual = drift.actual,
                "subcategory count differs from planned count"
            );
        }
        repository
    }

    /// Orders whose subcategory is outside the fixed vocabulary, or whose
    /// category title does not own that subcategory, stay reachable through
    /// [`Self::orders`] but land in no section.
    pub fn from_orders(orders: Vec<Order>) -> Self {
        let index = OrderIndex::build(&orders);
        let sections = Category::ALL
            .iter()
            .map(|category| {
                let subcategories = category
                    .subcategories()
                    .iter()
                    .map(|name| {
                        let bucket = index
                            .category(category.title())
                            .iter()
                            .map(|&pos| &orders[pos])
                            .filter(|order| order.subcategory == *name)
                            .cloned()
                            .collect();
                        OrderSubcategory::from_orders(*name, bucket)
                    })
                    .collect();
                OrderSection::new(category.title(), subcategories)
            })
            .collect();
        debug!(orders = orders.len(), "built order sections");
        Self {
            orders,
            index,
            sections,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn sections(&self) -> &[OrderSection] {
        &self.sections
    }

    pub fn section(&self, category: Category) -> Option<&OrderSection> {
        self.sections
            .iter()
            .find(|section| section.title == category.title())
    }

    pub fn find_order(&self, id: &str) -> Result<&Order, DashboardError> {
        self.orders
            .iter()
            .find(|order| order.id.as_str() == id)
            .ok_or_else(|| DashboardError::UnknownOrder(id.to_string()))
    }

    /// Looks up a bucket by name, returning it with its section title.
    pub fn subcategory(&self, name: &str) -> Result<(&str, &OrderSubcategory), DashboardError> {
        self.sections
            .iter()
            .find_map(|section| {
                section
                    .subcategory(name)
                    .map(|sub| (section.title.as_str(), sub))
            })
            .ok_or_else(|| DashboardError::UnknownSubcategory(name.to_string()))
    }

    /// Buckets whose generated size disagrees with [`PLANNED_COUNTS`].
    pub fn count_drift(&self) -> Vec<CountDrift> {
        PLANNED_COUNTS
            .iter()
            .filter_map(|(name, planned)| {
                let actual = self.index.subcategory(name).len();
                (actual != *planned).then(|| CountDrift {
                    subcategory: name.to_string(),
                    planned: *planned,
                    actual,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/repository_tests.rs"]
mod tests;
