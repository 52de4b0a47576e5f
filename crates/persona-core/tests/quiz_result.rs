use persona_core::error::CoreError;
use persona_core::models::narrative::{GrowthPlan, NarrativeAnalysis};
use persona_core::models::profile::{ConversationStyle, UserProfile};
use persona_core::models::quiz_result::{
    progress, Priority, QuizResult, QuizSubmission, QuizType, DEFAULT_GROWTH_AREA,
};
use persona_quiz::{score, AnswerSet, Category, QuizError};

fn full_answers() -> AnswerSet {
    [
        (1, "neutral"),
        (2, "seek_support"),
        (3, "analyze_data"),
        (4, "exhausted"),
        (5, "detailed_plans"),
        (6, "seek_mediation"),
        (7, "reading_theory"),
        (8, "cautious_optimism"),
        (9, "active_listener"),
        (10, "personal_growth"),
    ]
    .into_iter()
    .collect()
}

fn submission(answers: AnswerSet) -> QuizSubmission {
    QuizSubmission {
        quiz_type: QuizType::Personality,
        answers,
        completion_time: Some(120),
    }
}

#[test]
fn complete_submission_validates() {
    assert!(submission(full_answers()).validate().is_ok());
}

#[test]
fn incomplete_submission_lists_missing_questions() {
    let answers: AnswerSet = [(1, "neutral"), (2, "seek_support")].into_iter().collect();
    match submission(answers).validate() {
        Err(CoreError::Quiz(QuizError::Incomplete { missing })) => {
            assert_eq!(missing, vec!["3", "4", "5", "6", "7", "8", "9", "10"]);
        }
        other => panic!("expected Incomplete, got {other:?}"),
    }
}

#[test]
fn non_positive_completion_time_is_rejected() {
    let mut s = submission(full_answers());
    s.completion_time = Some(0);
    assert!(matches!(s.validate(), Err(CoreError::InvalidCompletionTime)));

    s.completion_time = None;
    assert!(s.validate().is_ok());
}

#[test]
fn submission_decodes_from_json() {
    let json = r#"{"quiz_type": "weekly_check_in", "answers": {"1": "neutral"}}"#;
    let s: QuizSubmission = serde_json::from_str(json).unwrap();
    assert_eq!(s.quiz_type, QuizType::WeeklyCheckIn);
    assert_eq!(s.completion_time, None);
    assert_eq!(s.answers.get(1), Some("neutral"));
}

#[test]
fn result_carries_deterministic_analysis() {
    let answers = full_answers();
    let analysis = score(&answers);
    let result = QuizResult::new("user-1", submission(answers.clone()), analysis.clone(), None);

    assert_eq!(result.user_id, "user-1");
    assert_eq!(result.results.scores, analysis.scores);
    assert_eq!(result.results.traits, analysis.traits);
    assert_eq!(result.results.overall_style, analysis.overall_style);
    assert_eq!(result.results.communication_style, analysis.overall_style.name);
    assert_eq!(result.results.growth_areas, vec![DEFAULT_GROWTH_AREA]);
    assert_eq!(result.results.recommendations.len(), 3);
    assert!(result
        .results
        .recommendations
        .iter()
        .all(|r| r.category == "General" && r.priority == Priority::Medium));

    // Re-scoring the stored answers reproduces the stored analysis.
    let rescored = score(&result.answers);
    assert_eq!(rescored.scores, result.results.scores);
    assert_eq!(rescored.overall_style, result.results.overall_style);
}

#[test]
fn enrichment_supplies_growth_areas() {
    let answers = full_answers();
    let enrichment = NarrativeAnalysis {
        growth_plan: GrowthPlan {
            focus_areas: vec!["communication".to_string()],
            suggested_goals: vec![],
        },
        ..Default::default()
    };
    let result = QuizResult::new("u", submission(answers.clone()), score(&answers), Some(enrichment));
    assert_eq!(result.results.growth_areas, vec!["communication"]);

    let empty = NarrativeAnalysis::default();
    let result = QuizResult::new("u", submission(answers.clone()), score(&answers), Some(empty));
    assert_eq!(result.results.growth_areas, vec![DEFAULT_GROWTH_AREA]);
}

#[test]
fn result_round_trips_through_json() {
    let answers = full_answers();
    let result = QuizResult::new("u", submission(answers.clone()), score(&answers), None);
    let json = serde_json::to_vec(&result).unwrap();
    let decoded: QuizResult = serde_json::from_slice(&json).unwrap();
    assert_eq!(decoded.id, result.id);
    assert_eq!(decoded.results.scores, result.results.scores);
}

#[test]
fn progress_is_sorted_oldest_first() {
    let answers = full_answers();
    let mut older = QuizResult::new("u", submission(answers.clone()), score(&answers), None);
    older.created_at = "2024-01-01T00:00:00Z".parse().unwrap();

    let other: AnswerSet = [(4, "energized")].into_iter().collect();
    let mut newer = QuizResult::new("u", submission(other.clone()), score(&other), None);
    newer.created_at = "2024-06-01T00:00:00Z".parse().unwrap();

    let points = progress(&[newer, older], Category::SocialEnergy);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].value, 1);
    assert_eq!(points[1].value, 5);
    assert!(points[0].date < points[1].date);
}

#[test]
fn profile_tracks_latest_result() {
    let answers = full_answers();
    let result = QuizResult::new("u", submission(answers.clone()), score(&answers), None);

    let mut profile = UserProfile::new("u");
    assert_eq!(profile.conversation_style, ConversationStyle::Supportive);

    profile.apply_result(&result);
    assert_eq!(profile.conversation_style, ConversationStyle::Gentle);
    assert_eq!(profile.personality_type.as_deref(), Some("Analytical Reflective"));
    assert_eq!(
        profile.dominant_traits,
        vec!["Introversion", "Analytical Thinking", "Stress Resilience", "Goal Orientation"]
    );
}

#[test]
fn narrative_tolerates_partial_model_output() {
    let parsed: NarrativeAnalysis =
        serde_json::from_str(r#"{"insights": ["You reflect deeply."]}"#).unwrap();
    assert_eq!(parsed.insights, vec!["You reflect deeply."]);
    assert!(parsed.growth_plan.focus_areas.is_empty());
}
