//! Point of reference: flags shared by providers within one pass.
//!
//! Providers that fall back on an object's description record it here so that
//! later providers in the same pass do not present the description twice.
//! Every fallback flag is cleared at the start of a top-level pass.

use serde::{Deserialize, Serialize};

/// "Already used the description as a fallback for X" markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackFlag {
    UsedDescriptionForName,
    UsedDescriptionForUnrelatedLabels,
    UsedDescriptionForAlert,
}

impl FallbackFlag {
    pub const ALL: [FallbackFlag; 3] = [
        FallbackFlag::UsedDescriptionForName,
        FallbackFlag::UsedDescriptionForUnrelatedLabels,
        FallbackFlag::UsedDescriptionForAlert,
    ];
}

/// Side-channel state threaded through a pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointOfReference {
    used_description_for_name: bool,
    used_description_for_unrelated_labels: bool,
    used_description_for_alert: bool,
}

impl PointOfReference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, flag: FallbackFlag) -> bool {
        match flag {
            FallbackFlag::UsedDescriptionForName => self.used_description_for_name,
            FallbackFlag::UsedDescriptionForUnrelatedLabels => {
                self.used_description_for_unrelated_labels
            }
            FallbackFlag::UsedDescriptionForAlert => self.used_description_for_alert,
        }
    }

    pub fn set(&mut self, flag: FallbackFlag, value: bool) {
        match flag {
            FallbackFlag::UsedDescriptionForName => self.used_description_for_name = value,
            FallbackFlag::UsedDescriptionForUnrelatedLabels => {
                self.used_description_for_unrelated_labels = value
            }
            FallbackFlag::UsedDescriptionForAlert => self.used_description_for_alert = value,
        }
    }

    /// True if the description was already spent on any fallback.
    pub fn description_used(&self) -> bool {
        FallbackFlag::ALL.iter().any(|flag| self.get(*flag))
    }

    /// Clear every fallback flag.
    pub fn reset_fallbacks(&mut self) {
        for flag in FallbackFlag::ALL {
            self.set(flag, false);
        }
    }
}
