//! Trait and style rule tables.
//!
//! Both tables are ordered lists of `(predicate, result)` pairs. Trait rules
//! are grouped per axis and each axis yields at most one trait; style rules
//! are evaluated top to bottom and the first match wins.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Category;
use crate::scoring::CategoryScores;

/// A fixed threshold on a single category score.
///
/// A score of 0 means the category was not answered and never satisfies
/// a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    AtMost(u32),
    AtLeast(u32),
}

impl Threshold {
    pub fn matches(self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        match self {
            Threshold::AtMost(max) => score <= max,
            Threshold::AtLeast(min) => score >= min,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TraitLevel {
    High,
    Moderate,
}

impl TraitLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraitLevel::High => "High",
            TraitLevel::Moderate => "Moderate",
        }
    }
}

/// A qualitative trait derived from a category score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PersonalityTrait {
    pub name: String,
    pub level: TraitLevel,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StyleKind {
    AnalyticalReflective,
    CollaborativeMotivated,
    AdaptableFlexible,
    BalancedVersatile,
}

/// The single overall style classification of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OverallStyle {
    pub kind: StyleKind,
    pub name: String,
    pub description: String,
}

pub struct TraitDef {
    pub name: &'static str,
    pub level: TraitLevel,
    pub description: &'static str,
}

impl TraitDef {
    fn to_trait(&self) -> PersonalityTrait {
        PersonalityTrait {
            name: self.name.to_string(),
            level: self.level,
            description: self.description.to_string(),
        }
    }
}

/// A bipolar trait axis over one category.
pub struct TraitAxis {
    pub category: Category,
    pub poles: [(Threshold, TraitDef); 2],
}

pub struct StyleDef {
    pub kind: StyleKind,
    pub name: &'static str,
    pub description: &'static str,
}

impl StyleDef {
    fn to_style(&self) -> OverallStyle {
        OverallStyle {
            kind: self.kind,
            name: self.name.to_string(),
            description: self.description.to_string(),
        }
    }
}

/// A compound style predicate: every condition must hold.
pub struct StyleRule {
    pub conditions: &'static [(Category, Threshold)],
    pub style: StyleDef,
}

impl StyleRule {
    pub fn matches(&self, scores: &CategoryScores) -> bool {
        self.conditions
            .iter()
            .all(|(category, threshold)| threshold.matches(scores.get(*category)))
    }
}

pub static TRAIT_AXES: &[TraitAxis] = &[
    TraitAxis {
        category: Category::SocialEnergy,
        poles: [
            (
                Threshold::AtMost(2),
                TraitDef {
                    name: "Introversion",
                    level: TraitLevel::High,
                    description: "You recharge your energy in quiet, reflective settings",
                },
            ),
            (
                Threshold::AtLeast(4),
                TraitDef {
                    name: "Extraversion",
                    level: TraitLevel::High,
                    description: "You gain energy through social interaction",
                },
            ),
        ],
    },
    TraitAxis {
        category: Category::DecisionMaking,
        poles: [
            (
                Threshold::AtMost(2),
                TraitDef {
                    name: "Analytical Thinking",
                    level: TraitLevel::High,
                    description: "You prefer decisions grounded in data and logic",
                },
            ),
            (
                Threshold::AtLeast(4),
                TraitDef {
                    name: "Intuition",
                    level: TraitLevel::High,
                    description: "You trust your intuition and feelings",
                },
            ),
        ],
    },
    TraitAxis {
        category: Category::StressManagement,
        poles: [
            (
                Threshold::AtMost(2),
                TraitDef {
                    name: "Stress Resilience",
                    level: TraitLevel::High,
                    description: "You handle pressure and difficult situations well",
                },
            ),
            (
                Threshold::AtLeast(4),
                TraitDef {
                    name: "Stress Sensitivity",
                    level: TraitLevel::Moderate,
                    description: "You prefer calmer, more predictable environments",
                },
            ),
        ],
    },
    TraitAxis {
        category: Category::GoalSetting,
        poles: [
            (
                Threshold::AtMost(2),
                TraitDef {
                    name: "Goal Orientation",
                    level: TraitLevel::High,
                    description: "You are naturally focused and organized",
                },
            ),
            (
                Threshold::AtLeast(4),
                TraitDef {
                    name: "Flexibility",
                    level: TraitLevel::High,
                    description: "You prefer to keep your options open and be spontaneous",
                },
            ),
        ],
    },
];

pub static STYLE_RULES: &[StyleRule] = &[
    StyleRule {
        conditions: &[
            (Category::SocialEnergy, Threshold::AtMost(2)),
            (Category::DecisionMaking, Threshold::AtMost(2)),
        ],
        style: StyleDef {
            kind: StyleKind::AnalyticalReflective,
            name: "Analytical Reflective",
            description: "You prefer deep analysis and calm environments for making decisions.",
        },
    },
    StyleRule {
        conditions: &[
            (Category::SocialEnergy, Threshold::AtLeast(4)),
            (Category::MotivationSource, Threshold::AtMost(2)),
        ],
        style: StyleDef {
            kind: StyleKind::CollaborativeMotivated,
            name: "Collaborative Motivated",
            description: "You thrive in social settings and enjoy recognition.",
        },
    },
    StyleRule {
        conditions: &[
            (Category::ChangeAdaptation, Threshold::AtLeast(4)),
            (Category::GoalSetting, Threshold::AtLeast(3)),
        ],
        style: StyleDef {
            kind: StyleKind::AdaptableFlexible,
            name: "Adaptable Flexible",
            description: "You embrace change and prefer to keep your options open.",
        },
    },
];

pub static DEFAULT_STYLE: StyleDef = StyleDef {
    kind: StyleKind::BalancedVersatile,
    name: "Balanced Versatile",
    description: "You show flexibility across different situations and contexts.",
};

pub const INSIGHTS: [&str; 3] = [
    "Your personality style suggests a unique approach to personal growth.",
    "Knowing your patterns can help you make decisions that are more aligned with who you are.",
    "The way you process emotions influences how you relate to yourself.",
];

pub const RECOMMENDATIONS: [&str; 3] = [
    "Consider development techniques that align with your natural style.",
    "Explore self-knowledge practices that respect your preferences.",
    "Use your strengths as a foundation for building new habits.",
];

/// Evaluate every trait axis against the scores, in table order.
pub fn derive_traits(scores: &CategoryScores) -> Vec<PersonalityTrait> {
    TRAIT_AXES
        .iter()
        .filter_map(|axis| {
            let score = scores.get(axis.category);
            axis.poles
                .iter()
                .find(|(threshold, _)| threshold.matches(score))
                .map(|(_, def)| def.to_trait())
        })
        .collect()
}

/// Pick the first style rule that matches, or the default style.
pub fn classify_style(scores: &CategoryScores) -> OverallStyle {
    STYLE_RULES
        .iter()
        .find(|rule| rule.matches(scores))
        .map(|rule| &rule.style)
        .unwrap_or(&DEFAULT_STYLE)
        .to_style()
}
