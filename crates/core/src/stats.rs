//! Session statistics derived from a history snapshot.
//!
//! Everything here is a pure function of its input. Metrics with no samples
//! come back as `StatValue::Indeterminate`, and a ratio with no wrong answers
//! as `StatValue::Infinite`, so "no data" never reads as zero.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{CharacterId, CharacterScore, CharacterScores, HistorySnapshot};

//
// ─── VALUES ────────────────────────────────────────────────────────────────────
//

/// A numeric stat or one of its sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StatValue {
    Value(f64),
    Infinite,
    Indeterminate,
}

impl StatValue {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            StatValue::Value(v) => Some(v),
            StatValue::Infinite | StatValue::Indeterminate => None,
        }
    }

    #[must_use]
    pub fn is_indeterminate(self) -> bool {
        matches!(self, StatValue::Indeterminate)
    }

    /// Render with `decimals` places; sentinels render as `~` and `∞`.
    #[must_use]
    pub fn format(self, decimals: usize) -> String {
        match self {
            StatValue::Value(v) => format!("{v:.decimals$}"),
            StatValue::Infinite => INFINITE_GLYPH.to_string(),
            StatValue::Indeterminate => INDETERMINATE_GLYPH.to_string(),
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Value(v) => write!(f, "{v}"),
            StatValue::Infinite => f.write_str(INFINITE_GLYPH),
            StatValue::Indeterminate => f.write_str(INDETERMINATE_GLYPH),
        }
    }
}

pub const INDETERMINATE_GLYPH: &str = "~";
pub const INFINITE_GLYPH: &str = "∞";

/// Total training time split for display as `"{minutes}m {seconds}s"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDisplay {
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeDisplay {
    /// Whole minutes, plus the remaining seconds rounded to the nearest second.
    ///
    /// Rounding is applied to the remainder only, so `119_600` ms reads `1m 60s`.
    #[must_use]
    pub fn from_millis(total_ms: u64) -> Self {
        let minutes = total_ms / 60_000;
        #[allow(clippy::cast_precision_loss)]
        let remainder = (total_ms as f64 / 1000.0) % 60.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let seconds = remainder.round() as u64;
        Self { minutes, seconds }
    }
}

impl fmt::Display for TimeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {}s", self.minutes, self.seconds)
    }
}

//
// ─── EXTREMAL CHARACTERS ───────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Correct,
    Wrong,
}

impl Metric {
    #[must_use]
    pub fn read(self, score: &CharacterScore) -> u32 {
        match self {
            Metric::Correct => score.correct,
            Metric::Wrong => score.wrong,
        }
    }
}

/// Every character sharing the highest value of a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremalSet {
    pub ids: Vec<CharacterId>,
    pub value: StatValue,
}

impl ExtremalSet {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            ids: Vec::new(),
            value: StatValue::Indeterminate,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl fmt::Display for ExtremalSet {
    /// `"A, B (3)"`, or `~` when there is nothing to rank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ids.is_empty() {
            return f.write_str(INDETERMINATE_GLYPH);
        }
        let names: Vec<&str> = self.ids.iter().map(CharacterId::as_str).collect();
        write!(f, "{} ({})", names.join(", "), self.value)
    }
}

/// Characters with the highest `metric`, ties kept in score order.
#[must_use]
pub fn extremal_characters(scores: &CharacterScores, metric: Metric) -> ExtremalSet {
    let mut best: Option<u32> = None;
    let mut ids: Vec<CharacterId> = Vec::new();

    for (id, score) in scores.iter() {
        let value = metric.read(score);
        match best {
            Some(max) if value < max => {}
            Some(max) if value == max => ids.push(id.clone()),
            _ => {
                best = Some(value);
                ids.clear();
                ids.push(id.clone());
            }
        }
    }

    match best {
        Some(max) => ExtremalSet {
            ids,
            value: StatValue::Value(f64::from(max)),
        },
        None => ExtremalSet::empty(),
    }
}

//
// ─── SCALAR METRICS ────────────────────────────────────────────────────────────
//

/// Percentage of correct answers; zero when nothing was answered.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn accuracy_percent(num_correct: u64, num_wrong: u64) -> f64 {
    let total = num_correct.saturating_add(num_wrong);
    if total == 0 {
        return 0.0;
    }
    num_correct as f64 / total as f64 * 100.0
}

/// Correct answers per wrong answer.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn correct_to_wrong_ratio(num_correct: u64, num_wrong: u64) -> StatValue {
    if num_wrong > 0 {
        StatValue::Value(num_correct as f64 / num_wrong as f64)
    } else if num_correct > 0 {
        StatValue::Infinite
    } else {
        StatValue::Value(0.0)
    }
}

#[must_use]
pub fn unique_character_count(history: &[CharacterId]) -> usize {
    history.iter().collect::<HashSet<_>>().len()
}

/// Mean, fastest and slowest answer time, each rounded to two decimals.
#[must_use]
pub fn answer_time_extrema(times: &[f64]) -> (StatValue, StatValue, StatValue) {
    if times.is_empty() {
        return (
            StatValue::Indeterminate,
            StatValue::Indeterminate,
            StatValue::Indeterminate,
        );
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = times.iter().sum::<f64>() / times.len() as f64;
    let fastest = times.iter().copied().fold(f64::INFINITY, f64::min);
    let slowest = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    (
        StatValue::Value(round2(mean)),
        StatValue::Value(round2(fastest)),
        StatValue::Value(round2(slowest)),
    )
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//
// ─── SESSION STATS ─────────────────────────────────────────────────────────────
//

/// Everything the stats dashboard shows, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub num_correct: u64,
    pub num_wrong: u64,
    pub total_answers: u64,
    pub accuracy_percent: f64,
    pub correct_to_wrong_ratio: StatValue,
    pub time_display: TimeDisplay,
    pub average_time: StatValue,
    pub fastest_time: StatValue,
    pub slowest_time: StatValue,
    pub characters_played: usize,
    pub unique_character_count: usize,
    /// Characters with the most correct answers.
    ///
    /// A zero maximum still ranks: if no character has a correct answer yet,
    /// every played character ties here at `0`.
    pub easiest: ExtremalSet,
    /// Characters with the most wrong answers.
    ///
    /// After a run with no wrong answers every played character ties here at
    /// `0`. Views that only want real trouble spots should check
    /// `value` and hide a zero set.
    pub hardest: ExtremalSet,
}

/// Stateless snapshot → `SessionStats` derivation.
///
/// # Examples
///
/// ```
/// # use quiz_core::model::HistorySnapshot;
/// # use quiz_core::{StatValue, StatsAggregator};
/// let stats = StatsAggregator::aggregate(&HistorySnapshot::empty());
/// assert_eq!(stats.accuracy_percent, 0.0);
/// assert_eq!(stats.average_time, StatValue::Indeterminate);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsAggregator;

impl StatsAggregator {
    #[must_use]
    pub fn aggregate(snapshot: &HistorySnapshot) -> SessionStats {
        let (average_time, fastest_time, slowest_time) =
            answer_time_extrema(&snapshot.correct_answer_times);

        SessionStats {
            num_correct: snapshot.num_correct,
            num_wrong: snapshot.num_wrong,
            total_answers: snapshot.num_correct.saturating_add(snapshot.num_wrong),
            accuracy_percent: accuracy_percent(snapshot.num_correct, snapshot.num_wrong),
            correct_to_wrong_ratio: correct_to_wrong_ratio(
                snapshot.num_correct,
                snapshot.num_wrong,
            ),
            time_display: TimeDisplay::from_millis(snapshot.total_elapsed_ms),
            average_time,
            fastest_time,
            slowest_time,
            characters_played: snapshot.character_history.len(),
            unique_character_count: unique_character_count(&snapshot.character_history),
            easiest: extremal_characters(&snapshot.character_scores, Metric::Correct),
            hardest: extremal_characters(&snapshot.character_scores, Metric::Wrong),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
