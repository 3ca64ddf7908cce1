#![allow(dead_code)]

//! Shared test utilities for integration tests
//!
//! An in-memory object tree standing in for the accessibility layer, provider
//! helpers that count their invocations, and engine constructors driven by a
//! manual clock so throttling tests are deterministic.

use parking_lot::{Mutex, RwLock};
use rendition::engine::{Engine, EngineSettings, Invocation};
use rendition::fields;
use rendition::format::FormatTable;
use rendition::object::ObjectModel;
use rendition::progress::{ManualClock, ProgressSettings};
use rendition::registry::{FieldRegistry, FieldResult};
use rendition::types::{Category, Fragment};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub type NodeId = u32;

/// Start time of every test clock.
pub const T0: u64 = 1_000_000;

/// Throttle interval used by test engines.
pub const INTERVAL_MS: u64 = 10_000;

/// One object in the fixture tree
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub category: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub label: Option<String>,
    pub text: Option<String>,
    pub caret_line: Option<String>,
    pub value: Option<String>,
    pub percent: Option<u32>,
    pub parent: Option<NodeId>,
    pub application: Option<NodeId>,
    pub active_descendant: Option<NodeId>,
    pub unrelated_labels: Vec<String>,
    pub attributes: HashMap<String, String>,
}

impl Node {
    pub fn new(category: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            ..Self::default()
        }
    }

    pub fn uncategorized() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn caret_line(mut self, line: &str) -> Self {
        self.caret_line = Some(line.to_string());
        self
    }

    pub fn percent(mut self, percent: u32) -> Self {
        self.percent = Some(percent);
        self
    }

    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn application(mut self, application: NodeId) -> Self {
        self.application = Some(application);
        self
    }

    pub fn active_descendant(mut self, descendant: NodeId) -> Self {
        self.active_descendant = Some(descendant);
        self
    }

    pub fn unrelated_label(mut self, label: &str) -> Self {
        self.unrelated_labels.push(label.to_string());
        self
    }

    pub fn attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }
}

/// In-memory object model
#[derive(Default)]
pub struct Tree {
    nodes: RwLock<HashMap<NodeId, Node>>,
    dead: RwLock<HashSet<NodeId>>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, id: NodeId, node: Node) -> Self {
        self.nodes.write().insert(id, node);
        self
    }

    pub fn kill(&self, id: NodeId) {
        self.dead.write().insert(id);
    }

    pub fn set_percent(&self, id: NodeId, percent: u32) {
        if let Some(node) = self.nodes.write().get_mut(&id) {
            node.percent = Some(percent);
        }
    }

    fn read<R>(&self, id: &NodeId, f: impl FnOnce(&Node) -> Option<R>) -> Option<R> {
        self.nodes.read().get(id).and_then(f)
    }
}

impl ObjectModel<NodeId> for Tree {
    fn is_valid(&self, target: &NodeId) -> bool {
        self.nodes.read().contains_key(target) && !self.dead.read().contains(target)
    }

    fn natural_category(&self, target: &NodeId) -> Option<Category> {
        self.read(target, |n| n.category.clone().map(Category::from))
    }

    fn name(&self, target: &NodeId) -> Option<String> {
        self.read(target, |n| n.name.clone())
    }

    fn description(&self, target: &NodeId) -> Option<String> {
        self.read(target, |n| n.description.clone())
    }

    fn displayed_label(&self, target: &NodeId) -> Option<String> {
        self.read(target, |n| n.label.clone())
    }

    fn displayed_text(&self, target: &NodeId) -> Option<String> {
        self.read(target, |n| n.text.clone())
    }

    fn unrelated_labels(&self, target: &NodeId) -> Vec<String> {
        self.read(target, |n| Some(n.unrelated_labels.clone()))
            .unwrap_or_default()
    }

    fn attributes(&self, target: &NodeId) -> HashMap<String, String> {
        self.read(target, |n| Some(n.attributes.clone()))
            .unwrap_or_default()
    }

    fn parent(&self, target: &NodeId) -> Option<NodeId> {
        self.read(target, |n| n.parent)
    }

    fn application(&self, target: &NodeId) -> Option<NodeId> {
        self.read(target, |n| n.application)
    }

    fn active_descendant(&self, target: &NodeId) -> Option<NodeId> {
        self.read(target, |n| n.active_descendant)
    }

    fn substring(&self, target: &NodeId, start: usize, end: usize) -> Option<String> {
        self.read(target, |n| {
            n.text
                .as_ref()
                .and_then(|text| text.get(start..end))
                .map(str::to_string)
        })
    }

    fn line_at_caret(&self, target: &NodeId) -> Option<String> {
        self.read(target, |n| n.caret_line.clone())
    }

    fn value_text(&self, target: &NodeId) -> Option<String> {
        self.read(target, |n| n.value.clone())
    }

    fn value_as_percent(&self, target: &NodeId) -> Option<u32> {
        self.read(target, |n| n.percent)
    }

    fn role_name(&self, category: &Category) -> Option<String> {
        Some(category.as_str().to_string())
    }
}

/// Invocation counter shared between a provider and the test body.
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Provider returning fixed text and counting its invocations.
pub fn counting(
    counter: &Counter,
    text: &'static str,
) -> impl Fn(&NodeId, &mut Invocation<'_, NodeId>) -> FieldResult + Send + Sync + 'static {
    let counter = counter.clone();
    move |_target: &NodeId, _inv: &mut Invocation<'_, NodeId>| -> FieldResult {
        counter.hit();
        Ok(vec![Fragment::text(text)])
    }
}

/// Provider appending its name to a shared log, in invocation order.
pub fn logging(
    log: &Arc<Mutex<Vec<String>>>,
    name: &'static str,
) -> impl Fn(&NodeId, &mut Invocation<'_, NodeId>) -> FieldResult + Send + Sync + 'static {
    let log = Arc::clone(log);
    move |_target: &NodeId, _inv: &mut Invocation<'_, NodeId>| -> FieldResult {
        log.lock().push(name.to_string());
        Ok(vec![Fragment::text(name)])
    }
}

/// Text of every text fragment, in order.
pub fn texts(fragments: &[Fragment]) -> Vec<String> {
    fragments
        .iter()
        .filter_map(|f| f.as_text().map(str::to_string))
        .collect()
}

pub fn table(source: &str) -> FormatTable {
    FormatTable::from_toml_str(source).unwrap()
}

/// Registry with the standard field set.
pub fn standard_registry() -> FieldRegistry<NodeId> {
    fields::standard_registry().unwrap()
}

pub fn settings() -> EngineSettings {
    EngineSettings {
        progress: ProgressSettings {
            update_interval_ms: INTERVAL_MS,
            complete_value: 100,
        },
        ..EngineSettings::default()
    }
}

/// Engine over `tree` and `table`, driven by a manual clock starting at [`T0`].
pub fn engine(
    tree: Arc<Tree>,
    table: FormatTable,
    registry: FieldRegistry<NodeId>,
) -> (Engine<NodeId>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(T0));
    let engine = Engine::with_clock(registry, tree, Arc::new(table), settings(), clock.clone());
    (engine, clock)
}
