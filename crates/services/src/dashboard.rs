//! Display-ready view of `SessionStats` for the statistics dashboard.

use quiz_core::{SessionStats, StatValue};
use serde::Serialize;

/// One labelled value on a stat card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatRowVm {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCardVm {
    pub title: &'static str,
    pub rows: Vec<StatRowVm>,
}

/// The three dashboard cards: General, Answers and Characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardVm {
    pub cards: Vec<StatCardVm>,
}

impl DashboardVm {
    #[must_use]
    pub fn from_stats(stats: &SessionStats) -> Self {
        let general = StatCardVm {
            title: "General",
            rows: vec![
                row("Training Time", stats.time_display.to_string()),
                row("Correct Answers", stats.num_correct.to_string()),
                row("Wrong Answers", stats.num_wrong.to_string()),
                row("Accuracy", format!("{:.1}%", stats.accuracy_percent)),
            ],
        };

        let answers = StatCardVm {
            title: "Answers",
            rows: vec![
                row("Average Time", seconds(stats.average_time)),
                row("Fastest Answer", seconds(stats.fastest_time)),
                row("Slowest Answer", seconds(stats.slowest_time)),
                row("Correct/Incorrect Ratio", stats.correct_to_wrong_ratio.format(2)),
            ],
        };

        let characters = StatCardVm {
            title: "Characters",
            rows: vec![
                row("Characters Played", stats.characters_played.to_string()),
                row("Unique Characters", stats.unique_character_count.to_string()),
                row("Easiest Characters", stats.easiest.to_string()),
                row("Hardest Characters", stats.hardest.to_string()),
            ],
        };

        Self {
            cards: vec![general, answers, characters],
        }
    }

    /// Look up a row value by label across all cards.
    #[must_use]
    pub fn value(&self, label: &str) -> Option<&str> {
        self.cards
            .iter()
            .flat_map(|card| card.rows.iter())
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

fn row(label: &'static str, value: String) -> StatRowVm {
    StatRowVm { label, value }
}

// Sentinels carry no unit suffix.
fn seconds(value: StatValue) -> String {
    match value {
        StatValue::Value(_) => format!("{}s", value.format(2)),
        StatValue::Infinite | StatValue::Indeterminate => value.format(2),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::StatsAggregator;
    use quiz_core::model::{AnswerEvent, HistorySnapshot};

    #[test]
    fn empty_history_renders_placeholders() {
        let vm = DashboardVm::from_stats(&StatsAggregator::aggregate(&HistorySnapshot::empty()));

        assert_eq!(vm.value("Training Time"), Some("0m 0s"));
        assert_eq!(vm.value("Accuracy"), Some("0.0%"));
        assert_eq!(vm.value("Average Time"), Some("~"));
        assert_eq!(vm.value("Fastest Answer"), Some("~"));
        assert_eq!(vm.value("Slowest Answer"), Some("~"));
        assert_eq!(vm.value("Correct/Incorrect Ratio"), Some("0.00"));
        assert_eq!(vm.value("Easiest Characters"), Some("~"));
        assert_eq!(vm.value("Hardest Characters"), Some("~"));
    }

    #[test]
    fn perfect_run_shows_infinite_ratio() {
        let mut snapshot = HistorySnapshot::empty();
        snapshot.record(&AnswerEvent::new("あ".into(), true, 1_000));
        snapshot.record(&AnswerEvent::new("い".into(), true, 3_000));
        let vm = DashboardVm::from_stats(&StatsAggregator::aggregate(&snapshot));

        assert_eq!(vm.value("Correct/Incorrect Ratio"), Some("∞"));
        assert_eq!(vm.value("Accuracy"), Some("100.0%"));
        assert_eq!(vm.value("Average Time"), Some("2.00s"));
        assert_eq!(vm.value("Fastest Answer"), Some("1.00s"));
        assert_eq!(vm.value("Easiest Characters"), Some("あ, い (1)"));
        assert_eq!(vm.value("Hardest Characters"), Some("あ, い (0)"));
    }

    #[test]
    fn cards_are_grouped_in_order() {
        let vm = DashboardVm::from_stats(&StatsAggregator::aggregate(&HistorySnapshot::empty()));
        let titles: Vec<_> = vm.cards.iter().map(|card| card.title).collect();
        assert_eq!(titles, vec!["General", "Answers", "Characters"]);
        assert!(vm.cards.iter().all(|card| card.rows.len() == 4));
    }
}
