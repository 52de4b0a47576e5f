use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Free-text enrichment of a quiz result produced by the language model.
///
/// Optional and purely additive: it never replaces the deterministic
/// analysis. Every field defaults so partial model output still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct NarrativeAnalysis {
    pub personality_analysis: NarrativeProfile,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub growth_plan: GrowthPlan,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct NarrativeProfile {
    pub traits: Vec<NarrativeTrait>,
    pub strengths: Vec<String>,
    pub growth_areas: Vec<String>,
    pub communication_style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct NarrativeTrait {
    pub name: String,
    /// 1 to 10 as asked of the model; not validated.
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct GrowthPlan {
    pub focus_areas: Vec<String>,
    pub suggested_goals: Vec<String>,
}
