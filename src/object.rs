//! Object model collaborator contract.
//!
//! The accessibility tree lives outside this crate. The engine only needs the
//! liveness check and the natural category; the remaining queries back the
//! standard field set and default to "nothing known".

use crate::types::Category;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Identity of a presentable object.
pub trait Target: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Target for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// Queries against the object tree
pub trait ObjectModel<T: Target>: Send + Sync {
    /// Liveness check; dead or defunct objects are never presented.
    fn is_valid(&self, target: &T) -> bool;

    /// Category the object reports for itself.
    fn natural_category(&self, target: &T) -> Option<Category>;

    fn name(&self, _target: &T) -> Option<String> {
        None
    }

    fn description(&self, _target: &T) -> Option<String> {
        None
    }

    /// Label text from a labelling relation or a visible label.
    fn displayed_label(&self, _target: &T) -> Option<String> {
        None
    }

    fn displayed_text(&self, _target: &T) -> Option<String> {
        None
    }

    /// Labels near the object that are not related to it by a relation.
    fn unrelated_labels(&self, _target: &T) -> Vec<String> {
        Vec::new()
    }

    fn attributes(&self, _target: &T) -> HashMap<String, String> {
        HashMap::new()
    }

    fn parent(&self, _target: &T) -> Option<T> {
        None
    }

    fn application(&self, _target: &T) -> Option<T> {
        None
    }

    /// The descendant actually painted for tables, trees, and lists.
    fn active_descendant(&self, _target: &T) -> Option<T> {
        None
    }

    fn substring(&self, _target: &T, _start: usize, _end: usize) -> Option<String> {
        None
    }

    fn line_at_caret(&self, _target: &T) -> Option<String> {
        None
    }

    fn value_text(&self, _target: &T) -> Option<String> {
        None
    }

    /// Current value of a range object as a whole percentage.
    fn value_as_percent(&self, _target: &T) -> Option<u32> {
        None
    }

    /// Localized name of a category.
    fn role_name(&self, _category: &Category) -> Option<String> {
        None
    }
}
