use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Response counts per discussion, refreshed by the worker job. Handlers only
/// read; the job is the single writer.
#[derive(Debug, Default)]
pub struct ResponseCounts {
    counts: HashMap<Uuid, i64>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl ResponseCounts {
    pub fn replace<I>(&mut self, discussion_ids: I, refreshed_at: DateTime<Utc>)
    where
        I: IntoIterator<Item = Uuid>,
    {
        self.counts = tally(discussion_ids);
        self.refreshed_at = Some(refreshed_at);
    }

    pub fn count(&self, discussion_id: Uuid) -> Option<i64> {
        if self.refreshed_at.is_none() {
            return None;
        }
        Some(self.counts.get(&discussion_id).copied().unwrap_or(0))
    }

    pub fn is_warm(&self) -> bool {
        self.refreshed_at.is_some()
    }

    pub fn discussion_count(&self) -> usize {
        self.counts.len()
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }
}

/// Counts occurrences per discussion id.
pub fn tally<I>(discussion_ids: I) -> HashMap<Uuid, i64>
where
    I: IntoIterator<Item = Uuid>,
{
    let mut counts = HashMap::new();
    for id in discussion_ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::{tally, ResponseCounts};

    #[test]
    fn tally_counts_per_discussion() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let counts = tally(vec![a, b, a, a]);
        assert_eq!(counts.get(&a), Some(&3));
        assert_eq!(counts.get(&b), Some(&1));
    }

    #[test]
    fn cold_cache_answers_none() {
        let cache = ResponseCounts::default();
        assert!(!cache.is_warm());
        assert_eq!(cache.count(Uuid::from_u128(1)), None);
    }

    #[test]
    fn warm_cache_answers_zero_for_unknown_discussion() {
        let mut cache = ResponseCounts::default();
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        cache.replace(vec![Uuid::from_u128(1)], now);
        assert!(cache.is_warm());
        assert_eq!(cache.count(Uuid::from_u128(1)), Some(1));
        assert_eq!(cache.count(Uuid::from_u128(2)), Some(0));
        assert_eq!(cache.refreshed_at(), Some(now));
    }

    #[test]
    fn replace_overwrites_previous_counts() {
        let mut cache = ResponseCounts::default();
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        cache.replace(vec![Uuid::from_u128(1), Uuid::from_u128(1)], now);
        cache.replace(vec![Uuid::from_u128(2)], now);
        assert_eq!(cache.count(Uuid::from_u128(1)), Some(0));
        assert_eq!(cache.count(Uuid::from_u128(2)), Some(1));
        assert_eq!(cache.discussion_count(), 1);
    }
}
