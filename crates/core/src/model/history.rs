use serde::{Deserialize, Serialize};

use crate::model::answer::Verdict;
use crate::model::ids::CharacterId;

//
// ─── ANSWER EVENT ──────────────────────────────────────────────────────────────
//

/// One completed question, as forwarded to the history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvent {
    pub subject: CharacterId,
    pub is_correct: bool,
    pub elapsed_ms: u64,
}

impl AnswerEvent {
    #[must_use]
    pub fn new(subject: CharacterId, is_correct: bool, elapsed_ms: u64) -> Self {
        Self {
            subject,
            is_correct,
            elapsed_ms,
        }
    }

    #[must_use]
    pub fn from_verdict(subject: CharacterId, verdict: Verdict, elapsed_ms: u64) -> Self {
        Self::new(subject, verdict.is_correct, elapsed_ms)
    }

    /// Elapsed time in seconds, the unit used for answer-time samples.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        // u64 millis fit f64 exactly up to 2^53
        #[allow(clippy::cast_precision_loss)]
        let millis = self.elapsed_ms as f64;
        millis / 1000.0
    }
}

//
// ─── CHARACTER SCORES ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterScore {
    pub correct: u32,
    pub wrong: u32,
}

impl CharacterScore {
    #[must_use]
    pub fn new(correct: u32, wrong: u32) -> Self {
        Self { correct, wrong }
    }
}

/// Per-character tallies, kept in first-seen order.
///
/// Order matters: ranking ties are reported in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterScores(Vec<(CharacterId, CharacterScore)>);

impl CharacterScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &CharacterId) -> Option<CharacterScore> {
        self.0
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, score)| *score)
    }

    /// Insert or replace the score for `id`, keeping its original position.
    pub fn insert(&mut self, id: CharacterId, score: CharacterScore) {
        match self.0.iter_mut().find(|(key, _)| *key == id) {
            Some((_, existing)) => *existing = score,
            None => self.0.push((id, score)),
        }
    }

    /// Count one answer for `id`.
    pub fn tally(&mut self, id: &CharacterId, is_correct: bool) {
        let position = match self.0.iter().position(|(key, _)| key == id) {
            Some(position) => position,
            None => {
                self.0.push((id.clone(), CharacterScore::default()));
                self.0.len() - 1
            }
        };
        let score = &mut self.0[position].1;
        if is_correct {
            score.correct = score.correct.saturating_add(1);
        } else {
            score.wrong = score.wrong.saturating_add(1);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CharacterId, &CharacterScore)> {
        self.0.iter().map(|(id, score)| (id, score))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(CharacterId, CharacterScore)> for CharacterScores {
    fn from_iter<T: IntoIterator<Item = (CharacterId, CharacterScore)>>(iter: T) -> Self {
        let mut scores = Self::new();
        for (id, score) in iter {
            scores.insert(id, score);
        }
        scores
    }
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Read-only view of the accumulated session history.
///
/// Counters are trusted as-is; nothing here checks that they agree with the
/// arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub num_correct: u64,
    pub num_wrong: u64,
    pub total_elapsed_ms: u64,
    /// Seconds taken for each correct answer.
    pub correct_answer_times: Vec<f64>,
    pub character_history: Vec<CharacterId>,
    pub character_scores: CharacterScores,
}

impl HistorySnapshot {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fold one answer event into the counters.
    pub fn record(&mut self, event: &AnswerEvent) {
        if event.is_correct {
            self.num_correct = self.num_correct.saturating_add(1);
            self.correct_answer_times.push(event.elapsed_seconds());
        } else {
            self.num_wrong = self.num_wrong.saturating_add(1);
        }
        self.total_elapsed_ms = self.total_elapsed_ms.saturating_add(event.elapsed_ms);
        self.character_history.push(event.subject.clone());
        self.character_scores.tally(&event.subject, event.is_correct);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_keeps_first_seen_order() {
        let mut scores = CharacterScores::new();
        scores.tally(&"う".into(), true);
        scores.tally(&"あ".into(), false);
        scores.tally(&"う".into(), false);

        let order: Vec<_> = scores.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["う", "あ"]);
        assert_eq!(scores.get(&"う".into()), Some(CharacterScore::new(1, 1)));
        assert_eq!(scores.get(&"あ".into()), Some(CharacterScore::new(0, 1)));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut scores: CharacterScores = [
            ("A".into(), CharacterScore::new(1, 0)),
            ("B".into(), CharacterScore::new(2, 0)),
        ]
        .into_iter()
        .collect();
        scores.insert("A".into(), CharacterScore::new(5, 5));

        let first = scores.iter().next().unwrap();
        assert_eq!(first.0.as_str(), "A");
        assert_eq!(*first.1, CharacterScore::new(5, 5));
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn record_accumulates_counters() {
        let mut snapshot = HistorySnapshot::empty();
        snapshot.record(&AnswerEvent::new("あ".into(), true, 1_500));
        snapshot.record(&AnswerEvent::new("い".into(), false, 2_000));
        snapshot.record(&AnswerEvent::new("あ".into(), true, 500));

        assert_eq!(snapshot.num_correct, 2);
        assert_eq!(snapshot.num_wrong, 1);
        assert_eq!(snapshot.total_elapsed_ms, 4_000);
        assert_eq!(snapshot.correct_answer_times, vec![1.5, 0.5]);
        assert_eq!(snapshot.character_history.len(), 3);
        assert_eq!(
            snapshot.character_scores.get(&"あ".into()),
            Some(CharacterScore::new(2, 0))
        );
    }

    #[test]
    fn snapshot_json_shape() {
        let mut snapshot = HistorySnapshot::empty();
        snapshot.record(&AnswerEvent::new("か".into(), false, 10));
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["num_wrong"], 1);
        assert_eq!(json["character_scores"][0][0], "か");
        assert_eq!(json["character_scores"][0][1]["wrong"], 1);
    }
}
