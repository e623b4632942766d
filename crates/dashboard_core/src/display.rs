//! Keyed lookup tables for labels shown on cards, tabs and headings.

use crate::search::DashboardTab;

pub const DASHBOARD_TITLE: &str = "Order Management Dashboard";
pub const DASHBOARD_SUBTITLE: &str =
    "Track and manage orders across different stages with real-time insights";
pub const WORKFLOW_LEGEND: &str =
    "Sequential Workflow: Orders progress through each stage in sequence from left to right";

/// Card name for a subcategory; unknown names pass through.
pub fn card_name(subcategory: &str) -> &str {
    match subcategory {
        "Order under Validation" => "Under Validation",
        "Triage Orders" => "Triage",
        "Orders which are in survey phase" => "Survey",
        "Orders in Service Planning Phase" => "Service Planning",
        "Orders in JobPack planning Phase" => "JobPack Planning",
        "Orders in Build" => "Build",
        "Orders in Fit and Test" => "Fit and Test",
        "Orders in Prove Service" => "Prove Service",
        "CP Delayed Orders" => "CP Delayed",
        "OR Delayed Orders" => "OR Delayed",
        "Product Support Group" => "Product Support",
        "Application Support Group" => "Application Support",
        "Functional Fallout" => "Business Fallout",
        other => other,
    }
}

/// Name of an on-track pipeline stage in the workflow strip. Looked up by
/// name, so a filtered strip keeps the right labels.
pub fn stage_name(subcategory: &str) -> &str {
    match subcategory {
        "Order under Validation" => "Validation",
        "Orders in Fit and Test" => "Fit & Test",
        other => card_name(other),
    }
}

pub fn tab_label(tab: DashboardTab) -> &'static str {
    match tab {
        DashboardTab::OnTrack => "On Track",
        DashboardTab::Delayed => "Delayed",
        DashboardTab::Stuck => "Stuck",
    }
}

/// Heading and subheading above a tab's cards.
pub fn tab_heading(tab: DashboardTab) -> (&'static str, &'static str) {
    match tab {
        DashboardTab::OnTrack => (
            "Order Processing Workflow",
            "Sequential flow from validation to service completion",
        ),
        DashboardTab::Delayed => (
            "Order Delay Management",
            "Monitoring and resolving orders experiencing delays",
        ),
        DashboardTab::Stuck => (
            "Order Recovery Center",
            "Critical intervention required for stuck orders",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Category;

    #[test]
    fn every_subcategory_has_a_short_card_name() {
        for category in Category::ALL {
            for name in category.subcategories() {
                assert_ne!(card_name(name), *name, "{name}");
            }
        }
        assert_eq!(card_name("Functional Fallout"), "Business Fallout");
        assert_eq!(card_name("Something new"), "Something new");
    }

    #[test]
    fn stage_names_follow_the_workflow_strip() {
        let stages: Vec<_> = Category::OnTrack
            .subcategories()
            .iter()
            .map(|name| stage_name(name))
            .collect();
        assert_eq!(
            stages,
            [
                "Validation",
                "Triage",
                "Survey",
                "Service Planning",
                "JobPack Planning",
                "Build",
                "Fit & Test",
                "Prove Service",
            ]
        );
    }

    #[test]
    fn tabs_have_labels_and_headings() {
        assert_eq!(tab_label(DashboardTab::Stuck), "Stuck");
        assert_eq!(tab_heading(DashboardTab::Delayed).0, "Order Delay Management");
    }
}
