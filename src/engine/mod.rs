//! Resolution Engine
//!
//! Turns a (target, context) pair into an ordered fragment sequence by evaluating
//! the target's format expression call-by-need: each referenced quantity is
//! computed by its field provider only when evaluation first reaches it, then
//! memoized for the rest of the pass.
//!
//! The engine is single-threaded by convention. Its shared state (side-channel
//! record and progress tracker) sits behind short-lived locks that are never
//! held while a provider runs.

mod invocation;
mod pass;

pub use invocation::Invocation;
pub use pass::{Bindings, Resolution, ResolutionOutcome};

use crate::context::{Context, PointOfReference};
use crate::error::VerificationError;
use crate::format::ExpressionStore;
use crate::object::{ObjectModel, Target};
use crate::progress::{Clock, ProgressEntry, ProgressSettings, ProgressTracker, SystemClock};
use crate::registry::FieldRegistry;
use crate::types::{Fragment, Mode};
use crate::verify;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Engine settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Mode used when a context does not name one.
    #[serde(default)]
    pub mode: Mode,

    /// Progress update throttling.
    #[serde(default)]
    pub progress: ProgressSettings,
}

/// Presentation content resolution engine
pub struct Engine<T: Target> {
    registry: FieldRegistry<T>,
    objects: Arc<dyn ObjectModel<T>>,
    store: Arc<dyn ExpressionStore>,
    settings: EngineSettings,
    progress: Mutex<ProgressTracker<T>>,
    point_of_reference: Mutex<PointOfReference>,
}

impl<T: Target> Engine<T> {
    /// Create an engine using wall-clock time. Runs startup verification once.
    pub fn new(
        registry: FieldRegistry<T>,
        objects: Arc<dyn ObjectModel<T>>,
        store: Arc<dyn ExpressionStore>,
        settings: EngineSettings,
    ) -> Self {
        Self::with_clock(registry, objects, store, settings, Arc::new(SystemClock))
    }

    /// Create an engine with an explicit clock for progress throttling.
    pub fn with_clock(
        registry: FieldRegistry<T>,
        objects: Arc<dyn ObjectModel<T>>,
        store: Arc<dyn ExpressionStore>,
        settings: EngineSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let engine = Self {
            registry,
            objects,
            store,
            progress: Mutex::new(ProgressTracker::new(settings.progress, clock)),
            settings,
            point_of_reference: Mutex::new(PointOfReference::default()),
        };

        let defects = engine.verify();
        if defects.is_empty() {
            info!(
                mode = %engine.settings.mode,
                fields = engine.registry.len(),
                "presentation engine ready"
            );
        } else {
            warn!(
                mode = %engine.settings.mode,
                defects = defects.len(),
                "presentation engine ready with malformed format expressions"
            );
        }
        engine
    }

    /// Check every stored expression for references to unknown quantities.
    pub fn verify(&self) -> Vec<VerificationError> {
        verify::verify(self.store.as_ref(), &self.registry)
    }

    /// Resolve the presentation for `target`. Never fails; faults yield an empty sequence.
    pub fn resolve(&self, target: &T, context: Context) -> Vec<Fragment> {
        self.resolve_detailed(target, context).fragments
    }

    /// Resolve and keep the pass's bindings and outcome.
    pub fn resolve_detailed(&self, target: &T, context: Context) -> Resolution {
        let mut state = self.point_of_reference.lock().clone();
        let resolution = pass::run(self, target, context, &mut state);
        *self.point_of_reference.lock() = state;
        resolution
    }

    /// Record a presented progress update. Defaults: now and the current value.
    pub fn record_progress(&self, target: &T, value: Option<u32>, timestamp_ms: Option<u64>) {
        self.progress
            .lock()
            .record(self.objects.as_ref(), target, timestamp_ms, value);
    }

    /// Whether an update of `target` to `value` should be presented now.
    pub fn should_present_progress(&self, target: &T, value: u32) -> bool {
        self.progress
            .lock()
            .should_present(self.objects.as_ref(), target, value)
    }

    /// 1-based position of `target` among tracked indicators, and their count.
    pub fn progress_number_and_count(&self, target: &T) -> (usize, usize) {
        self.progress
            .lock()
            .number_and_count(self.objects.as_ref(), target)
    }

    pub fn most_recent_progress(&self) -> Option<(T, ProgressEntry)> {
        self.progress.lock().most_recent(self.objects.as_ref())
    }

    /// Side-channel state as left by the last completed pass.
    pub fn point_of_reference(&self) -> PointOfReference {
        self.point_of_reference.lock().clone()
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn registry(&self) -> &FieldRegistry<T> {
        &self.registry
    }

    pub fn objects(&self) -> &dyn ObjectModel<T> {
        self.objects.as_ref()
    }

    pub fn store(&self) -> &dyn ExpressionStore {
        self.store.as_ref()
    }
}
