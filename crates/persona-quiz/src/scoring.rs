use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{self, Category};
use crate::rules::{self, OverallStyle, PersonalityTrait};

/// Submitted answers: question id → chosen option token.
///
/// Keys are kept as strings so answer sets decode directly from a JSON
/// object. Keys that do not parse as a question id are carried but never
/// scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_id: impl ToString, value: impl Into<String>) {
        self.0.insert(question_id.to_string(), value.into());
    }

    pub fn get(&self, question_id: u32) -> Option<&str> {
        self.iter()
            .find(|(k, _)| parse_question_id(k) == Some(question_id))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether an answer exists for the given question id.
    pub fn contains(&self, question_id: u32) -> bool {
        self.get(question_id).is_some()
    }
}

impl<K: ToString, V: Into<String>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut answers = AnswerSet::new();
        for (k, v) in iter {
            answers.insert(k, v);
        }
        answers
    }
}

pub(crate) fn parse_question_id(key: &str) -> Option<u32> {
    key.trim().parse().ok()
}

/// Accumulated score per category. Always holds all ten categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryScores(BTreeMap<Category, u32>);

impl CategoryScores {
    /// All categories at zero.
    pub fn zeroed() -> Self {
        Self(Category::ALL.into_iter().map(|c| (c, 0)).collect())
    }

    pub fn get(&self, category: Category) -> u32 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    pub fn add(&mut self, category: Category, points: u32) {
        *self.0.entry(category).or_insert(0) += points;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.0.iter().map(|(c, s)| (*c, *s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CategoryScores {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// The deterministic output of [`score`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PersonalityAnalysis {
    pub traits: Vec<PersonalityTrait>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub scores: CategoryScores,
    pub overall_style: OverallStyle,
}

/// Sum the chosen option scores into their categories.
///
/// Unknown question ids and unknown option tokens are skipped.
pub fn category_scores(answers: &AnswerSet) -> CategoryScores {
    let mut scores = CategoryScores::zeroed();
    for (key, value) in answers.iter() {
        let Some(question) = parse_question_id(key).and_then(catalog::question) else {
            continue;
        };
        if let Some(option) = question.option(value) {
            scores.add(question.category, option.score);
        }
    }
    scores
}

/// Score an answer set into a full personality analysis.
///
/// Never fails: empty or malformed answers degrade to zero scores, no
/// traits and the default style.
pub fn score(answers: &AnswerSet) -> PersonalityAnalysis {
    let scores = category_scores(answers);
    PersonalityAnalysis {
        traits: rules::derive_traits(&scores),
        insights: rules::INSIGHTS.iter().map(|s| s.to_string()).collect(),
        recommendations: rules::RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        overall_style: rules::classify_style(&scores),
        scores,
    }
}
