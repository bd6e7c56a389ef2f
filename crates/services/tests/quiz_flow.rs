use std::sync::Arc;

use chrono::Duration;
use quiz_core::StatValue;
use quiz_core::model::{HistorySnapshot, QuestionDraft};
use quiz_core::time::fixed_now;
use services::{Clock, HistoryStore, InMemoryHistoryStore, QuizService, StatsService};

fn kana_questions() -> Vec<QuestionDraft> {
    vec![
        QuestionDraft::new("Which is 'a'?", ["あ", "い", "う"], 0),
        QuestionDraft::new("Which is 'i'?", ["あ", "い", "う"], 1),
        QuestionDraft::new("Which is 'u'?", ["あ", "い", "う"], 2)
            .with_explanation("う is u."),
    ]
}

#[tokio::test]
async fn answered_questions_feed_the_dashboard() {
    let store = InMemoryHistoryStore::new();
    let history: Arc<dyn HistoryStore> = Arc::new(store.clone());
    let stats = StatsService::new(Arc::clone(&history));

    let mut clock = Clock::fixed(fixed_now());
    let picks = [0, 2, 2];
    for (draft, pick) in kana_questions().into_iter().zip(picks) {
        let quiz = QuizService::new(clock, Arc::clone(&history));
        let mut session = quiz.start_draft(draft).unwrap();

        clock.advance(Duration::milliseconds(1_500));
        let outcome = quiz
            .with_clock(clock)
            .answer(&mut session, pick)
            .await
            .unwrap();
        assert!(outcome.recorded());
    }

    let session_stats = stats.session_stats().await.unwrap();
    assert_eq!(session_stats.total_answers, 3);
    assert_eq!(session_stats.num_wrong, 1);
    assert_eq!(session_stats.correct_to_wrong_ratio, StatValue::Value(2.0));
    assert_eq!(session_stats.average_time, StatValue::Value(1.5));
    assert_eq!(session_stats.unique_character_count, 3);

    let dashboard = stats.dashboard().await.unwrap();
    assert_eq!(dashboard.value("Training Time"), Some("0m 5s"));
    assert_eq!(dashboard.value("Accuracy"), Some("66.7%"));
    assert_eq!(dashboard.value("Hardest Characters"), Some("い (1)"));
    assert_eq!(dashboard.value("Easiest Characters"), Some("あ, う (1)"));
}

#[tokio::test]
async fn stats_are_stable_across_reads() {
    let store = InMemoryHistoryStore::new();
    let quiz = QuizService::new(Clock::fixed(fixed_now()), Arc::new(store.clone()));
    let mut session = quiz.start_draft(kana_questions().remove(0)).unwrap();
    quiz.answer(&mut session, 1).await.unwrap();

    let stats = StatsService::new(Arc::new(store.clone()));
    let first = stats.session_stats().await.unwrap();
    let second = stats.session_stats().await.unwrap();
    assert_eq!(first, second);
    assert!(first.average_time.is_indeterminate());
}

#[tokio::test]
async fn snapshot_survives_json_export() {
    let store = InMemoryHistoryStore::new();
    let quiz = QuizService::new(Clock::fixed(fixed_now()), Arc::new(store.clone()));
    for draft in kana_questions() {
        let mut session = quiz.start_draft(draft).unwrap();
        quiz.answer(&mut session, 0).await.unwrap();
    }

    let exported = serde_json::to_string(&store.snapshot().await.unwrap()).unwrap();
    let restored: HistorySnapshot = serde_json::from_str(&exported).unwrap();
    let reloaded = InMemoryHistoryStore::from_snapshot(restored);

    let before = StatsService::new(Arc::new(store)).session_stats().await.unwrap();
    let after = StatsService::new(Arc::new(reloaded)).session_stats().await.unwrap();
    assert_eq!(before, after);
}
