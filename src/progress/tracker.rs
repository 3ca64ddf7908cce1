//! Keyed, time-windowed cache deciding whether a progress update is presented.
//!
//! Entries are created on first observation and pruned eagerly: every access
//! starts by dropping entries whose target is no longer valid.

use crate::object::{ObjectModel, Target};
use crate::progress::clock::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Throttle settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSettings {
    /// Minimum time between two presented updates of the same indicator.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    /// Value that always presents (completion).
    #[serde(default = "default_complete_value")]
    pub complete_value: u32,
}

fn default_update_interval_ms() -> u64 {
    10_000
}

fn default_complete_value() -> u32 {
    100
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
            complete_value: default_complete_value(),
        }
    }
}

/// Last presented update of one indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressEntry {
    /// `None` until an update has been recorded.
    pub updated_at_ms: Option<u64>,
    pub value: Option<u32>,
}

/// Progress/throttle tracker
pub struct ProgressTracker<T: Target> {
    // Insertion order is the indicator numbering order.
    entries: Vec<(T, ProgressEntry)>,
    settings: ProgressSettings,
    clock: Arc<dyn Clock>,
}

impl<T: Target> ProgressTracker<T> {
    pub fn new(settings: ProgressSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Vec::new(),
            settings,
            clock,
        }
    }

    pub fn settings(&self) -> &ProgressSettings {
        &self.settings
    }

    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    /// Drop entries whose target fails the liveness check. Returns the count removed.
    pub fn prune_invalid(&mut self, objects: &dyn ObjectModel<T>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(target, _)| objects.is_valid(target));
        let pruned = before - self.entries.len();
        if pruned > 0 {
            debug!(pruned, remaining = self.entries.len(), "pruned dead progress indicators");
        }
        pruned
    }

    fn position_or_insert(&mut self, target: &T) -> usize {
        match self.entries.iter().position(|(t, _)| t == target) {
            Some(index) => index,
            None => {
                self.entries.push((target.clone(), ProgressEntry::default()));
                self.entries.len() - 1
            }
        }
    }

    /// Last recorded update for `target`, creating an empty entry on first sight.
    pub fn entry(&mut self, objects: &dyn ObjectModel<T>, target: &T) -> ProgressEntry {
        self.prune_invalid(objects);
        let index = self.position_or_insert(target);
        self.entries[index].1
    }

    /// Decide whether an update to `value` should be presented now.
    pub fn should_present(&mut self, objects: &dyn ObjectModel<T>, target: &T, value: u32) -> bool {
        let last = self.entry(objects, target);

        if value == self.settings.complete_value {
            return true;
        }

        if last.value == Some(value) {
            debug!(?target, value, "not presenting progress update; value unchanged");
            return false;
        }

        let Some(updated_at_ms) = last.updated_at_ms else {
            return true;
        };
        let elapsed = self.clock.now_millis().saturating_sub(updated_at_ms);
        elapsed >= self.settings.update_interval_ms
    }

    /// Record a presented update. Defaults: now, and the object's current percentage.
    pub fn record(
        &mut self,
        objects: &dyn ObjectModel<T>,
        target: &T,
        timestamp_ms: Option<u64>,
        value: Option<u32>,
    ) {
        self.prune_invalid(objects);
        let updated_at_ms = timestamp_ms.unwrap_or_else(|| self.clock.now_millis());
        let value = value.or_else(|| objects.value_as_percent(target));
        let index = self.position_or_insert(target);
        self.entries[index].1 = ProgressEntry {
            updated_at_ms: Some(updated_at_ms),
            value,
        };
    }

    /// 1-based position of `target` among live indicators, and their count.
    pub fn number_and_count(&mut self, objects: &dyn ObjectModel<T>, target: &T) -> (usize, usize) {
        self.prune_invalid(objects);
        let index = self.position_or_insert(target);
        (index + 1, self.entries.len())
    }

    /// The live indicator updated most recently.
    pub fn most_recent(&mut self, objects: &dyn ObjectModel<T>) -> Option<(T, ProgressEntry)> {
        self.prune_invalid(objects);
        self.entries
            .iter()
            .max_by_key(|(_, entry)| entry.updated_at_ms)
            .map(|(target, entry)| (target.clone(), *entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
