//! Per-list filtering and sorting of a subcategory's orders.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shared::{Journey, Order, OrderId, Priority};
use tracing::debug;

use crate::search::contains_folded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    ServiceId,
    CustomerName,
    Journey,
    Status,
    Priority,
    StartDate,
    CompletionDate,
    CurrentTask,
    ProjectProgression,
    Progress,
    Category,
    Subcategory,
}

impl SortField {
    /// Columns with a clickable header in the list table.
    pub const HEADERS: [SortField; 6] = [
        SortField::Id,
        SortField::CustomerName,
        SortField::StartDate,
        SortField::Journey,
        SortField::Priority,
        SortField::ProjectProgression,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::Id => "Order ID",
            SortField::ServiceId => "Service ID",
            SortField::CustomerName => "Customer",
            SortField::Journey => "Journey",
            SortField::Status => "Status",
            SortField::Priority => "Priority",
            SortField::StartDate => "Start Date",
            SortField::CompletionDate => "Completion Date",
            SortField::CurrentTask => "Current Task",
            SortField::ProjectProgression => "Phase",
            SortField::Progress => "Progress",
            SortField::Category => "Category",
            SortField::Subcategory => "Subcategory",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        let field = match normalized.as_str() {
            "id" | "orderid" => SortField::Id,
            "serviceid" => SortField::ServiceId,
            "customer" | "customername" => SortField::CustomerName,
            "journey" => SortField::Journey,
            "status" => SortField::Status,
            "priority" => SortField::Priority,
            "start" | "startdate" => SortField::StartDate,
            "completion" | "completiondate" => SortField::CompletionDate,
            "task" | "currenttask" => SortField::CurrentTask,
            "phase" | "progression" | "currentprojectprogression" => {
                SortField::ProjectProgression
            }
            "progress" => SortField::Progress,
            "category" => SortField::Category,
            "subcategory" => SortField::Subcategory,
            _ => return None,
        };
        Some(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::StartDate,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click: the same field flips direction, a new field starts
    /// ascending.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::new(field, SortDirection::Asc)
        }
    }
}

/// Filter predicates of the list view; `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListFilter {
    pub query: String,
    pub priority: Option<Priority>,
    pub journey: Option<Journey>,
}

impl ListFilter {
    pub fn matches(&self, order: &Order) -> bool {
        let matches_search = self.query.trim().is_empty() || {
            let folded = self.query.to_lowercase();
            contains_folded(order.id.as_str(), &folded)
                || contains_folded(&order.customer_name, &folded)
                || contains_folded(&order.description, &folded)
                || contains_folded(&order.current_task, &folded)
                || contains_folded(order.service_id.as_str(), &folded)
        };
        let matches_priority = self.priority.map_or(true, |p| order.priority == p);
        let matches_journey = self.journey.map_or(true, |j| order.journey == j);

        matches_search && matches_priority && matches_journey
    }

    /// Number of predicates that differ from their "show everything" value.
    pub fn active_count(&self) -> usize {
        [
            !self.query.trim().is_empty(),
            self.priority.is_some(),
            self.journey.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or RFC 3339 text into a
/// millisecond timestamp.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Unparsable or missing dates order after every valid date.
fn compare_dates(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.and_then(parse_timestamp);
    let b = b.and_then(parse_timestamp);
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Locale-style text ordering: case-folded first, then lowercase before
/// uppercase at the first differing letter.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Ascending comparison of two orders on `field`.
pub fn compare_by(field: SortField, a: &Order, b: &Order) -> Ordering {
    match field {
        SortField::StartDate => {
            compare_dates(Some(a.start_date.as_str()), Some(b.start_date.as_str()))
        }
        SortField::CompletionDate => {
            compare_dates(a.completion_date.as_deref(), b.completion_date.as_deref())
        }
        SortField::Progress => a.progress.cmp(&b.progress),
        SortField::Id => compare_text(a.id.as_str(), b.id.as_str()),
        SortField::ServiceId => compare_text(a.service_id.as_str(), b.service_id.as_str()),
        SortField::CustomerName => compare_text(&a.customer_name, &b.customer_name),
        SortField::Journey => compare_text(a.journey.as_str(), b.journey.as_str()),
        SortField::Status => compare_text(&a.status, &b.status),
        SortField::Priority => compare_text(a.priority.as_str(), b.priority.as_str()),
        SortField::CurrentTask => compare_text(&a.current_task, &b.current_task),
        SortField::ProjectProgression => compare_text(
            a.current_project_progression.as_str(),
            b.current_project_progression.as_str(),
        ),
        SortField::Category => compare_text(&a.category, &b.category),
        SortField::Subcategory => compare_text(&a.subcategory, &b.subcategory),
    }
}

/// Filtered and stably sorted view over `orders`; the input is untouched.
pub fn view<'a>(orders: &'a [Order], filter: &ListFilter, sort: SortState) -> Vec<&'a Order> {
    view_positions(orders, filter, sort)
        .into_iter()
        .map(|pos| &orders[pos])
        .collect()
}

/// Same as [`view`] but yields positions into `orders`.
pub fn view_positions(orders: &[Order], filter: &ListFilter, sort: SortState) -> Vec<usize> {
    let mut positions: Vec<usize> = orders
        .iter()
        .enumerate()
        .filter(|(_, order)| filter.matches(order))
        .map(|(pos, _)| pos)
        .collect();
    positions.sort_by(|&a, &b| {
        sort.direction
            .apply(compare_by(sort.field, &orders[a], &orders[b]))
    });
    positions
}

/// Identity of the bucket a cached view was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BucketKey(Vec<OrderId>);

impl BucketKey {
    fn of(orders: &[Order]) -> Self {
        Self(orders.iter().map(|order| order.id.clone()).collect())
    }

    fn is(&self, orders: &[Order]) -> bool {
        self.0.len() == orders.len() && self.0.iter().zip(orders).all(|(id, order)| *id == order.id)
    }
}

/// List view state for one bucket, memoizing the derived rows on the
/// `(bucket, filter, sort)` tuple.
#[derive(Debug, Clone, Default)]
pub struct ListViewState {
    pub filter: ListFilter,
    pub sort: SortState,
    cache: Option<(BucketKey, ListFilter, SortState, Vec<usize>)>,
}

impl ListViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = self.sort.toggled(field);
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    /// Rows for `orders`, recomputed only when the bucket, filter or sort
    /// changed.
    pub fn rows<'a>(&mut self, orders: &'a [Order]) -> Vec<&'a Order> {
        let fresh = matches!(
            &self.cache,
            Some((bucket, filter, sort, _))
                if *filter == self.filter && *sort == self.sort && bucket.is(orders)
        );
        if !fresh {
            debug!(
                orders = orders.len(),
                query = %self.filter.query,
                field = ?self.sort.field,
                direction = ?self.sort.direction,
                "recomputing list view"
            );
            let positions = view_positions(orders, &self.filter, self.sort);
            self.cache = Some((
                BucketKey::of(orders),
                self.filter.clone(),
                self.sort,
                positions,
            ));
        }
        match &self.cache {
            Some((_, _, _, positions)) => positions.iter().map(|&pos| &orders[pos]).collect(),
            None => Vec::new(),
        }
    }
}

/// Header line such as `"3 of 5 orders"`.
pub fn summary_line(shown: usize, total: usize) -> String {
    let noun = if total == 1 { "order" } else { "orders" };
    format!("{shown} of {total} {noun}")
}

#[cfg(test)]
#[path = "tests/list_view_tests.rs"]
mod tests;
