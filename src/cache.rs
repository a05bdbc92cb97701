use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::models::TicketSolution;

/// Per-(recipient, travel date) memory of which journeys were already
/// reported, identified by the lead train's display name. Lives only for
/// the lifetime of the process.
#[derive(Debug, Default)]
pub struct NotificationCache {
    notified: HashMap<(String, String), HashSet<String>>,
}

impl NotificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the subset of `solutions` the recipient has not been told
    /// about for this date. Read-only: pair `new_for` with `record` once the
    /// returned journeys have actually been put into a notification.
    pub fn new_for(
        &self,
        recipient: &str,
        date: &str,
        solutions: Vec<TicketSolution>,
    ) -> Vec<TicketSolution> {
        let Some(seen) = self
            .notified
            .get(&(recipient.to_string(), date.to_string()))
        else {
            return solutions;
        };
        solutions
            .into_iter()
            .filter(|solution| {
                solution
                    .lead_train_name()
                    .map_or(true, |name| !seen.contains(name))
            })
            .collect()
    }

    /// Marks the given solutions as reported for the pair. Entries are never
    /// removed by later price or timetable changes; once a name is recorded
    /// here the journey stays silenced for this recipient and date.
    pub fn record(&mut self, recipient: &str, date: &str, solutions: &[TicketSolution]) {
        let seen = self
            .notified
            .entry((recipient.to_string(), date.to_string()))
            .or_default();
        for solution in solutions {
            if let Some(name) = solution.lead_train_name() {
                seen.insert(name.to_string());
            }
        }
    }

    /// Drops entries for travel dates strictly before `today`; a past date
    /// is never queried again so its entries only cost memory. Entries whose
    /// date does not parse as `YYYY-MM-DD` are kept.
    pub fn prune_stale(&mut self, today: NaiveDate) {
        self.notified.retain(|(_, date), _| {
            match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                Ok(parsed) => parsed >= today,
                Err(_) => true,
            }
        });
    }

    pub fn len(&self) -> usize {
        self.notified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notified.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TrainJourney, TrainSegment};

    fn solution(name: &str) -> TicketSolution {
        TicketSolution {
            solution: TrainJourney {
                trains: vec![TrainSegment {
                    name: name.to_string(),
                    ..TrainSegment::default()
                }],
                ..TrainJourney::default()
            },
            ..TicketSolution::default()
        }
    }

    fn names(solutions: &[TicketSolution]) -> Vec<&str> {
        solutions.iter().filter_map(|s| s.lead_train_name()).collect()
    }

    #[test]
    fn everything_is_new_before_any_record() {
        let cache = NotificationCache::new();
        let fresh = cache.new_for(
            "a@x.com",
            "2024-06-01",
            vec![solution("FR 9615"), solution("FR 9700")],
        );
        assert_eq!(names(&fresh), vec!["FR 9615", "FR 9700"]);
    }

    #[test]
    fn new_for_is_idempotent_without_record() {
        let cache = NotificationCache::new();
        let first = cache.new_for("a@x.com", "2024-06-01", vec![solution("FR 9615")]);
        let second = cache.new_for("a@x.com", "2024-06-01", vec![solution("FR 9615")]);
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn recorded_journeys_are_not_reported_again() {
        let mut cache = NotificationCache::new();
        let batch = vec![solution("FR 9615")];
        cache.record("a@x.com", "2024-06-01", &batch);

        assert!(cache
            .new_for("a@x.com", "2024-06-01", vec![solution("FR 9615")])
            .is_empty());

        // A disjoint set passes through unchanged.
        let other = cache.new_for("a@x.com", "2024-06-01", vec![solution("FR 9700")]);
        assert_eq!(names(&other), vec!["FR 9700"]);
    }

    #[test]
    fn pairs_are_isolated_across_recipients_and_dates() {
        let mut cache = NotificationCache::new();
        cache.record("a@x.com", "2024-06-01", &[solution("FR 9615")]);

        let other_recipient =
            cache.new_for("b@y.com", "2024-06-01", vec![solution("FR 9615")]);
        assert_eq!(names(&other_recipient), vec!["FR 9615"]);

        let other_date = cache.new_for("a@x.com", "2024-06-02", vec![solution("FR 9615")]);
        assert_eq!(names(&other_date), vec!["FR 9615"]);
    }

    #[test]
    fn prune_drops_only_past_parseable_dates() {
        let mut cache = NotificationCache::new();
        cache.record("a@x.com", "2024-05-31", &[solution("FR 1")]);
        cache.record("a@x.com", "2024-06-01", &[solution("FR 2")]);
        cache.record("a@x.com", "2024-06-02", &[solution("FR 3")]);
        cache.record("a@x.com", "not-a-date", &[solution("FR 4")]);

        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        cache.prune_stale(today);

        assert_eq!(cache.len(), 3);
        assert!(cache
            .new_for("a@x.com", "2024-05-31", vec![solution("FR 1")])
            .len()
            == 1);
        assert!(cache
            .new_for("a@x.com", "2024-06-01", vec![solution("FR 2")])
            .is_empty());
        assert!(cache
            .new_for("a@x.com", "not-a-date", vec![solution("FR 4")])
            .is_empty());
    }
}
