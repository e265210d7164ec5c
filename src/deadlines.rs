use crate::api::types::{Countdown, DeadlineStatistics};

pub const NO_DEADLINES: &str = "No Important Deadlines!";
pub const NO_DEADLINES_HINT: &str = "Add labels to important dates to see countdowns here.";
pub const LOAD_FAILED: &str = "Unable to Load Deadlines";
pub const LOAD_FAILED_HINT: &str = "Please check your connection and try refreshing.";

const IMPORTANT: [&str; 3] = ["critical", "urgent", "high"];

/// Critical, urgent and high-priority countdowns in server order, capped.
pub fn filter_important(countdowns: &[Countdown], max: usize) -> Vec<Countdown> {
    countdowns
        .iter()
        .filter(|c| IMPORTANT.contains(&c.priority.as_str()))
        .take(max)
        .cloned()
        .collect()
}

pub fn days_text(days_remaining: i64) -> String {
    match days_remaining {
        0 => "TODAY".to_string(),
        1 => "TOMORROW".to_string(),
        n => format!("{} DAYS", n),
    }
}

pub fn priority_icon(priority: &str) -> &'static str {
    match priority {
        "critical" => "🚨",
        "urgent" => "⚠️",
        "high" => "⚡",
        "medium" => "📅",
        "low" => "📊",
        _ => "📋",
    }
}

/// Summary chips; zero counts are omitted, the total always shows.
pub fn summary_chips(stats: &DeadlineStatistics) -> Vec<String> {
    let mut chips = Vec::new();
    if stats.critical > 0 {
        chips.push(format!("🚨 {} Critical", stats.critical));
    }
    if stats.urgent > 0 {
        chips.push(format!("⚠️ {} Urgent", stats.urgent));
    }
    if stats.high > 0 {
        chips.push(format!("⚡ {} High", stats.high));
    }
    chips.push(format!("📅 {} Total", stats.total));
    chips
}

/// What the deadline panel shows after the last fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DeadlineView {
    #[default]
    Loading,
    Empty,
    Failed,
    Loaded {
        items: Vec<Countdown>,
        statistics: DeadlineStatistics,
    },
}

impl DeadlineView {
    pub fn from_response(countdowns: &[Countdown], statistics: DeadlineStatistics, max: usize) -> Self {
        if countdowns.is_empty() {
            Self::Empty
        } else {
            Self::Loaded {
                items: filter_important(countdowns, max),
                statistics,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown(label: &str, priority: &str, days: i64) -> Countdown {
        Countdown {
            date: "2024-01-20".into(),
            label: label.into(),
            priority: priority.into(),
            days_remaining: days,
            ..Default::default()
        }
    }

    #[test]
    fn keeps_only_important_in_order() {
        let items = vec![
            countdown("a", "low", 30),
            countdown("b", "critical", 0),
            countdown("c", "medium", 10),
            countdown("d", "high", 5),
            countdown("e", "urgent", 2),
        ];
        let labels: Vec<String> = filter_important(&items, 6)
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(labels, vec!["b", "d", "e"]);
    }

    #[test]
    fn mixed_priorities_keep_four_in_order() {
        let priorities = ["critical", "medium", "urgent", "low", "high", "critical"];
        let items: Vec<Countdown> = priorities
            .iter()
            .enumerate()
            .map(|(i, p)| countdown(&format!("d{}", i), p, i as i64))
            .collect();
        let kept = filter_important(&items, 6);
        let labels: Vec<&str> = kept.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["d0", "d2", "d4", "d5"]);
        let kept_priorities: Vec<&str> = kept.iter().map(|c| c.priority.as_str()).collect();
        assert_eq!(kept_priorities, vec!["critical", "urgent", "high", "critical"]);
    }

    #[test]
    fn caps_at_max() {
        let items: Vec<Countdown> = (0..10).map(|i| countdown(&i.to_string(), "high", i)).collect();
        assert_eq!(filter_important(&items, 6).len(), 6);
    }

    #[test]
    fn days_text_variants() {
        assert_eq!(days_text(0), "TODAY");
        assert_eq!(days_text(1), "TOMORROW");
        assert_eq!(days_text(12), "12 DAYS");
    }

    #[test]
    fn icons() {
        assert_eq!(priority_icon("critical"), "🚨");
        assert_eq!(priority_icon("low"), "📊");
        assert_eq!(priority_icon("whatever"), "📋");
    }

    #[test]
    fn chips_skip_zero_counts() {
        let stats = DeadlineStatistics {
            total: 4,
            critical: 1,
            urgent: 0,
            high: 2,
        };
        assert_eq!(
            summary_chips(&stats),
            vec!["🚨 1 Critical", "⚡ 2 High", "📅 4 Total"]
        );
    }

    #[test]
    fn empty_countdowns_is_empty_state() {
        assert_eq!(
            DeadlineView::from_response(&[], DeadlineStatistics::default(), 6),
            DeadlineView::Empty
        );
    }

    #[test]
    fn only_low_priority_still_loads() {
        let view = DeadlineView::from_response(
            &[countdown("a", "low", 3)],
            DeadlineStatistics::default(),
            6,
        );
        match view {
            DeadlineView::Loaded { items, .. } => assert!(items.is_empty()),
            other => panic!("Expected Loaded, got {:?}", other),
        }
    }
}
