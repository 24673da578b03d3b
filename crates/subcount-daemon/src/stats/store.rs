//! Displayed/fetched snapshot bookkeeping.

use super::MetricSnapshot;

/// Outcome of comparing a fetched snapshot against the displayed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// The displayed snapshot was replaced.
    pub updated: bool,
    /// The new displayed snapshot should be written to storage.
    pub should_persist: bool,
    /// The subscriber count went up; pulse the indicator.
    pub should_flash: bool,
}

/// The snapshot on the panel and the most recent one fetched.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    displayed: MetricSnapshot,
    fetched: Option<MetricSnapshot>,
}

impl SnapshotStore {
    /// Creates a store showing `displayed`, typically loaded from storage.
    pub fn new(displayed: MetricSnapshot) -> Self {
        Self {
            displayed,
            fetched: None,
        }
    }

    /// Returns the snapshot currently on the panel.
    pub fn displayed(&self) -> MetricSnapshot {
        self.displayed
    }

    /// Returns the last successfully fetched snapshot, if any.
    pub fn fetched(&self) -> Option<MetricSnapshot> {
        self.fetched
    }

    /// Records a fetched snapshot and promotes it if any count changed.
    ///
    /// The indicator flash only fires on a subscriber increase; drops and
    /// changes to the other counts update silently.
    pub fn reconcile(&mut self, fetched: MetricSnapshot) -> Reconciliation {
        self.fetched = Some(fetched);

        if fetched == self.displayed {
            return Reconciliation::default();
        }

        let should_flash = fetched.subscribers > self.displayed.subscribers;
        self.displayed = fetched;

        Reconciliation {
            updated: true,
            should_persist: true,
            should_flash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: MetricSnapshot = MetricSnapshot::new(1_000, 5_000, 10, 2);

    #[test]
    fn test_equal_is_noop() {
        let mut store = SnapshotStore::new(BASE);
        let result = store.reconcile(BASE);
        assert_eq!(result, Reconciliation::default());
        assert!(!result.updated);
        assert_eq!(store.displayed(), BASE);
        assert_eq!(store.fetched(), Some(BASE));
    }

    #[test]
    fn test_secondary_change_updates_without_flash() {
        for views in [0, 4_999, 5_001, u64::MAX] {
            let mut store = SnapshotStore::new(BASE);
            let fetched = MetricSnapshot { views, ..BASE };
            let result = store.reconcile(fetched);
            assert!(result.updated);
            assert!(result.should_persist);
            assert!(!result.should_flash);
            assert_eq!(store.displayed(), fetched);
        }
    }

    #[test]
    fn test_subscriber_increase_flashes() {
        let mut store = SnapshotStore::new(BASE);
        let fetched = MetricSnapshot::new(1_001, 5_000, 10, 2);
        let result = store.reconcile(fetched);
        assert_eq!(
            result,
            Reconciliation {
                updated: true,
                should_persist: true,
                should_flash: true,
            }
        );
        assert_eq!(store.displayed(), fetched);
    }

    #[test]
    fn test_subscriber_drop_does_not_flash() {
        let mut store = SnapshotStore::new(BASE);
        let result = store.reconcile(MetricSnapshot::new(999, 5_000, 10, 2));
        assert!(result.updated);
        assert!(!result.should_flash);
    }

    #[test]
    fn test_other_fields_with_same_subscribers() {
        let cases = [
            MetricSnapshot { comments: 11, ..BASE },
            MetricSnapshot { videos: 1, ..BASE },
            MetricSnapshot::new(1_000, 6_000, 20, 3),
            MetricSnapshot::new(900, 6_000, 20, 3),
        ];
        for fetched in cases {
            let mut store = SnapshotStore::new(BASE);
            let result = store.reconcile(fetched);
            assert!(result.updated, "{}", fetched);
            assert!(!result.should_flash, "{}", fetched);
        }
    }

    #[test]
    fn test_replacement_is_whole_snapshot() {
        let mut store = SnapshotStore::new(BASE);
        let fetched = MetricSnapshot::new(2_000, 1, 2, 3);
        store.reconcile(fetched);
        assert_eq!(store.displayed(), fetched);

        // A repeat of the same reading is now a no-op
        assert!(!store.reconcile(fetched).updated);
    }
}
