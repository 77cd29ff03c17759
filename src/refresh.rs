use crate::model::StateSnapshot;
use std::fmt::Display;
use std::time::{Duration, Instant};

/// Last good state snapshot of a host that is polled at most once per `interval`.
#[derive(Debug)]
pub struct SnapshotCache {
    interval: Duration,
    /// Timestamp of last successful refresh
    refreshed: Option<Instant>,
    snapshot: Option<StateSnapshot>,
}

impl SnapshotCache {
    pub fn new(interval: Duration) -> Self {
        SnapshotCache {
            interval,
            refreshed: None,
            snapshot: None,
        }
    }

    /// Checks whether `interval` elapsed at `now` since the last successful refresh.
    pub fn refresh_due(&self, now: Instant) -> bool {
        match self.refreshed {
            Some(refreshed) => now.saturating_duration_since(refreshed) >= self.interval,
            /* Nothing fetched yet, or only failures so far */
            None => true,
        }
    }

    /// Store the outcome of a refresh attempt made at `now`. A failed attempt keeps the previous
    /// snapshot and leaves the next refresh due immediately.
    pub fn update<E: Display>(&mut self, result: Result<StateSnapshot, E>, now: Instant) {
        match result {
            Ok(snapshot) => {
                log::debug!("refreshed {} entity states", snapshot.len());
                self.snapshot = Some(snapshot);
                self.refreshed = Some(now);
            }
            Err(e) => log::warn!("Unable to refresh states: {}", e),
        }
    }

    /// `None` until the first successful refresh.
    pub fn snapshot(&self) -> Option<&StateSnapshot> {
        self.snapshot.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::SnapshotCache;
    use crate::model::{EntityState, StateSnapshot};
    use std::time::{Duration, Instant};

    const INTERVAL: Duration = Duration::from_secs(10);

    fn states(pv: &str) -> Result<StateSnapshot, String> {
        Ok(vec![("sensor.pv", EntityState::new(pv))].into_iter().collect())
    }

    fn failure() -> Result<StateSnapshot, String> {
        Err(String::from("connection refused"))
    }

    #[test]
    fn empty_before_first_success() {
        let now = Instant::now();
        let mut cache = SnapshotCache::new(INTERVAL);
        assert!(cache.refresh_due(now));
        assert_eq!(None, cache.snapshot());

        cache.update(failure(), now);
        assert_eq!(None, cache.snapshot());
        assert!(cache.refresh_due(now));
    }

    #[test]
    fn failure_keeps_last_good_snapshot() {
        let now = Instant::now();
        let mut cache = SnapshotCache::new(INTERVAL);

        cache.update(states("1500"), now);
        cache.update(failure(), now + INTERVAL);

        let snapshot = cache.snapshot().unwrap();
        assert_eq!(Some(&EntityState::new("1500")), snapshot.get("sensor.pv"));
    }

    #[test]
    fn refresh_waits_for_interval() {
        let now = Instant::now();
        let mut cache = SnapshotCache::new(INTERVAL);
        cache.update(states("1500"), now);

        assert!(!cache.refresh_due(now));
        assert!(!cache.refresh_due(now + Duration::from_secs(9)));
        assert!(cache.refresh_due(now + INTERVAL));
    }

    #[test]
    fn failed_refresh_is_retried_next_time() {
        let now = Instant::now();
        let mut cache = SnapshotCache::new(INTERVAL);
        cache.update(states("1500"), now);

        let later = now + INTERVAL;
        cache.update(failure(), later);
        assert!(cache.refresh_due(later));

        cache.update(states("1200"), later);
        assert!(!cache.refresh_due(later));
        assert_eq!(
            Some(&EntityState::new("1200")),
            cache.snapshot().unwrap().get("sensor.pv")
        );
    }
}
