//! Dashboard-level search that narrows sections before navigation.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use shared::{Category, DashboardError, Order, OrderSection, OrderSubcategory};

/// Case-insensitive substring test with an already lowercased needle.
pub(crate) fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

/// Fields searched by the dashboard search box.
pub fn matches_dashboard_query(order: &Order, folded_query: &str) -> bool {
    contains_folded(order.id.as_str(), folded_query)
        || contains_folded(&order.customer_name, folded_query)
        || contains_folded(&order.description, folded_query)
        || contains_folded(&order.current_task, folded_query)
}

/// Keeps only subcategories with at least one matching order, and only
/// sections with at least one surviving subcategory. A blank query borrows
/// the input untouched.
pub fn filter_sections<'a>(sections: &'a [OrderSection], query: &str) -> Cow<'a, [OrderSection]> {
    if query.trim().is_empty() {
        return Cow::Borrowed(sections);
    }
    let folded = query.to_lowercase();

    let filtered = sections
        .iter()
        .filter_map(|section| {
            let subcategories: Vec<OrderSubcategory> = section
                .subcategories
                .iter()
                .filter_map(|sub| {
                    let orders: Vec<Order> = sub
                        .orders
                        .iter()
                        .filter(|order| matches_dashboard_query(order, &folded))
                        .cloned()
                        .collect();
                    (!orders.is_empty()).then(|| OrderSubcategory {
                        name: sub.name.clone(),
                        count: sub.count,
                        orders,
                    })
                })
                .collect();
            (!subcategories.is_empty()).then(|| OrderSection {
                title: section.title.clone(),
                count: section.count,
                subcategories,
            })
        })
        .collect();
    Cow::Owned(filtered)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardTab {
    #[default]
    OnTrack,
    Delayed,
    Stuck,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 3] = [
        DashboardTab::OnTrack,
        DashboardTab::Delayed,
        DashboardTab::Stuck,
    ];

    pub fn category(self) -> Category {
        match self {
            DashboardTab::OnTrack => Category::OnTrack,
            DashboardTab::Delayed => Category::Delayed,
            DashboardTab::Stuck => Category::Stuck,
        }
    }

    pub fn section_title(self) -> &'static str {
        self.category().title()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DashboardTab::OnTrack => "on-track",
            DashboardTab::Delayed => "delayed",
            DashboardTab::Stuck => "stuck",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DashboardError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "on-track" | "ontrack" | "on_track" => Ok(DashboardTab::OnTrack),
            "delayed" => Ok(DashboardTab::Delayed),
            "stuck" => Ok(DashboardTab::Stuck),
            other => Err(DashboardError::invalid_setting(
                "default_tab",
                format!("'{other}' is not one of on-track, delayed, stuck"),
            )),
        }
    }
}

/// Why a tab has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoMatches,
    EmptyCategory,
}

impl EmptyReason {
    pub fn hint(self) -> &'static str {
        match self {
            EmptyReason::NoMatches => "Try adjusting your search terms",
            EmptyReason::EmptyCategory => "No orders in this category",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabContent<'a> {
    Section(&'a OrderSection),
    Empty(EmptyReason),
}

/// Picks the section of `tab` by exact title match.
pub fn tab_content<'a>(
    sections: &'a [OrderSection],
    tab: DashboardTab,
    query: &str,
) -> TabContent<'a> {
    match sections
        .iter()
        .find(|section| section.title == tab.section_title())
    {
        Some(section) => TabContent::Section(section),
        None if query.trim().is_empty() => TabContent::Empty(EmptyReason::EmptyCategory),
        None => TabContent::Empty(EmptyReason::NoMatches),
    }
}

/// Result line shown above the tabs while a query is active.
pub fn search_banner(filtered: &[OrderSection], query: &str) -> Option<String> {
    if query.is_empty() {
        return None;
    }
    Some(if filtered.is_empty() {
        format!("No results found for \"{query}\"")
    } else {
        format!("Showing results for \"{query}\"")
    })
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
