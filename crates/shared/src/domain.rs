use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(OrderId);
id_newtype!(ServiceId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Capitalised label used by list badges ("High", "Medium", "Low").
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Journey {
    Provide,
    Modify,
    Cease,
}

impl Journey {
    pub const ALL: [Journey; 3] = [Journey::Provide, Journey::Modify, Journey::Cease];

    pub fn as_str(self) -> &'static str {
        match self {
            Journey::Provide => "Provide",
            Journey::Modify => "Modify",
            Journey::Cease => "Cease",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "provide" => Some(Journey::Provide),
            "modify" => Some(Journey::Modify),
            "cease" => Some(Journey::Cease),
            _ => None,
        }
    }
}

impl fmt::Display for Journey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectProgression {
    P1,
    P2,
    P3,
    P4,
    P5,
}

impl ProjectProgression {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectProgression::P1 => "P1",
            ProjectProgression::P2 => "P2",
            ProjectProgression::P3 => "P3",
            ProjectProgression::P4 => "P4",
            ProjectProgression::P5 => "P5",
        }
    }
}

impl fmt::Display for ProjectProgression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The three fixed top-level buckets. Orders carry the category as its
/// display title; this enum is the typed view of those titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    OnTrack,
    Delayed,
    Stuck,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::OnTrack, Category::Delayed, Category::Stuck];

    pub fn title(self) -> &'static str {
        match self {
            Category::OnTrack => "Orders on Track",
            Category::Delayed => "Orders on Delay",
            Category::Stuck => "Orders which got stuck",
        }
    }

    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.title() == title)
    }

    /// Subcategory names in display order; for `OnTrack` this is the
    /// left-to-right processing pipeline.
    pub fn subcategories(self) -> &'static [&'static str] {
        match self {
            Category::OnTrack => &[
                "Order under Validation",
                "Triage Orders",
                "Orders which are in survey phase",
                "Orders in Service Planning Phase",
                "Orders in JobPack planning Phase",
                "Orders in Build",
                "Orders in Fit and Test",
                "Orders in Prove Service",
            ],
            Category::Delayed => &["CP Delayed Orders", "OR Delayed Orders"],
            Category::Stuck => &[
                "Product Support Group",
                "Application Support Group",
                "Functional Fallout",
            ],
        }
    }

    pub fn for_subcategory(subcategory: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.subcategories().contains(&subcategory))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

pub const CP_DELAYED: &str = "CP Delayed Orders";
pub const OR_DELAYED: &str = "OR Delayed Orders";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_has_thirteen_subcategories_across_three_categories() {
        let total: usize = Category::ALL
            .iter()
            .map(|category| category.subcategories().len())
            .sum();
        assert_eq!(total, 13);
        assert_eq!(
            Category::for_subcategory("Functional Fallout"),
            Some(Category::Stuck)
        );
        assert_eq!(Category::for_subcategory("Nope"), None);
    }

    #[test]
    fn category_titles_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_title(category.title()), Some(category));
        }
        assert_eq!(Category::from_title("orders on track"), None);
    }

    #[test]
    fn enums_serialize_with_source_spelling() {
        assert_eq!(
            serde_json::to_string(&Priority::Medium).expect("json"),
            "\"medium\""
        );
        assert_eq!(
            serde_json::to_string(&Journey::Cease).expect("json"),
            "\"Cease\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectProgression::P4).expect("json"),
            "\"P4\""
        );
    }

    #[test]
    fn parses_filter_values_case_insensitively() {
        assert_eq!(Priority::parse(" HIGH "), Some(Priority::High));
        assert_eq!(Journey::parse("modify"), Some(Journey::Modify));
        assert_eq!(Journey::parse("all"), None);
    }
}
