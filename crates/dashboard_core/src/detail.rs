//! What the order and task views show for a given order.

use chrono::NaiveDate;
use serde::Serialize;
use shared::{domain::CP_DELAYED, domain::OR_DELAYED, Journey, Order};

/// Optional parts of the order detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DetailSections {
    pub delay_management: bool,
    pub follow_up_action: bool,
    pub prioritize_action: bool,
    pub delay_reason_card: bool,
    pub queue_card: bool,
}

impl DetailSections {
    pub fn for_order(order: &Order) -> Self {
        let delayed = order.is_delayed();
        Self {
            delay_management: delayed,
            follow_up_action: delayed && order.subcategory == CP_DELAYED,
            prioritize_action: delayed
                && order.subcategory == OR_DELAYED
                && present(&order.cc_date),
            delay_reason_card: delayed && present(&order.delay_reason),
            queue_card: order.is_stuck() && present(&order.queue_name),
        }
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Long-form date such as `January 5, 2024`. Missing dates read "Not set";
/// text that is not a date is shown as is.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return "Not set".to_string();
    };
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressBand {
    Complete,
    Advancing,
    Started,
    Early,
}

impl ProgressBand {
    pub fn for_progress(progress: i32) -> Self {
        match progress {
            p if p >= 80 => ProgressBand::Complete,
            p if p >= 50 => ProgressBand::Advancing,
            p if p >= 25 => ProgressBand::Started,
            _ => ProgressBand::Early,
        }
    }
}

/// Long description of a pipeline task, with a generated fallback for tasks
/// that have none.
pub fn task_description(task: &str, journey: Journey) -> String {
    let known = match task {
        "Document verification" => "Verify all customer documentation is complete and accurate. Check compliance requirements and validate business information.",
        "Requirements review" => "Review technical and business requirements. Ensure all specifications are clear and achievable within project scope.",
        "Site survey validation" => "Validate site survey results and confirm technical feasibility. Check for any infrastructure constraints or requirements.",
        "Cessation approval" => "Process service cessation request and ensure proper approval workflow. Coordinate equipment recovery planning.",
        "Final documentation review" => "Conduct final review of all project documentation. Ensure completeness and accuracy before progression.",
        "Priority assessment" => "Assess order priority based on customer SLA, business impact, and technical complexity.",
        "Technical feasibility review" => "Review technical requirements and assess implementation feasibility. Identify potential challenges.",
        "Resource allocation planning" => "Plan and allocate necessary resources including personnel, equipment, and time slots.",
        "Cessation impact assessment" => "Assess impact of service cessation on customer operations and dependent services.",
        "Site survey completion" => "Complete comprehensive site survey including technical measurements and access requirements.",
        "Survey data analysis" => "Analyze collected survey data and prepare technical recommendations for implementation.",
        "Equipment planning" => "Plan equipment requirements and validate availability. Coordinate with supply chain team.",
        "Service design" => "Design service architecture and technical implementation approach based on requirements.",
        "Capacity planning" => "Plan network capacity and bandwidth requirements. Ensure adequate resource allocation.",
        "Network design" => "Design detailed network topology and configuration. Create implementation blueprints.",
        "Redundancy planning" => "Plan backup and redundancy solutions. Ensure service continuity and disaster recovery.",
        "Quality planning" => "Plan quality assurance processes and testing procedures. Define acceptance criteria.",
        "Cessation planning" => "Plan service cessation process including timeline, equipment recovery, and customer communication.",
        "Resource planning" => "Plan detailed resource allocation including specialized teams and security clearances.",
        _ => {
            return format!(
                "{task} - Standard {} process task requiring attention and completion.",
                journey.as_str().to_lowercase()
            )
        }
    };
    known.to_string()
}
