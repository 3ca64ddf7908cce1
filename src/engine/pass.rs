//! One resolution pass: the call-by-need fixpoint loop.

use crate::context::{Context, PointOfReference};
use crate::engine::{Engine, Invocation};
use crate::error::FieldError;
use crate::expr::{Evaluation, Expr, Scope};
use crate::object::Target;
use crate::registry::{FieldResult, Provider};
use crate::types::{render_fragments, Category, FormatKey, Fragment, QuantityName};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, error, info, trace};

/// Quantities computed during one pass.
///
/// The reserved names `obj` and `role` are always bound (to empty output) so
/// they can never reach a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    category: Option<Category>,
    values: HashMap<QuantityName, Vec<Fragment>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn for_category(category: Category) -> Self {
        Self {
            category: Some(category),
            values: HashMap::new(),
        }
    }

    /// Environment where every given name is bound to an empty sequence.
    pub fn placeholders<'a>(names: impl IntoIterator<Item = &'a QuantityName>) -> Self {
        Self {
            category: None,
            values: names
                .into_iter()
                .map(|name| (name.clone(), Vec::new()))
                .collect(),
        }
    }

    /// Bind a computed quantity. Existing and reserved bindings are never replaced.
    pub fn bind(&mut self, name: QuantityName, value: Vec<Fragment>) -> bool {
        if name.is_reserved() || self.values.contains_key(&name) {
            return false;
        }
        self.values.insert(name, value);
        true
    }

    pub fn get(&self, name: &str) -> Option<&[Fragment]> {
        self.values.get(name).map(|value| value.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &QuantityName> {
        self.values.keys()
    }

    /// Effective category of the pass, if this is a pass environment.
    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Scope for Bindings {
    fn lookup(&self, name: &QuantityName) -> Option<&[Fragment]> {
        if name.is_reserved() {
            return Some(&[]);
        }
        self.get(name.as_str())
    }
}

/// How a pass ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The expression evaluated completely.
    Presented,
    /// The target failed the liveness check; nothing ran.
    InvalidTarget,
    /// The target's category could not be determined.
    NoCategory,
    /// No (or an empty) expression exists for the key.
    NoExpression,
    /// The expression referenced a quantity with no provider.
    UnknownQuantity(QuantityName),
    /// A provider returned an error or panicked.
    ProviderFault(QuantityName),
    /// A collaborator query panicked outside any provider.
    Fault(String),
}

/// Result of one pass
#[derive(Debug, Clone)]
pub struct Resolution {
    pub fragments: Vec<Fragment>,
    pub bindings: Bindings,
    pub outcome: ResolutionOutcome,
    pub key: Option<FormatKey>,
}

impl Resolution {
    fn skipped(outcome: ResolutionOutcome) -> Self {
        Self {
            fragments: Vec::new(),
            bindings: Bindings::new(),
            outcome,
            key: None,
        }
    }

    pub fn is_presented(&self) -> bool {
        self.outcome == ResolutionOutcome::Presented
    }
}

/// Run one pass. A fault raised anywhere in it, collaborators included, ends
/// the pass with an empty result.
pub(crate) fn run<T: Target>(
    engine: &Engine<T>,
    target: &T,
    context: Context,
    state: &mut PointOfReference,
) -> Resolution {
    match panic::catch_unwind(AssertUnwindSafe(|| run_pass(engine, target, context, state))) {
        Ok(resolution) => resolution,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(?target, error = %message, "presentation generation failed");
            Resolution::skipped(ResolutionOutcome::Fault(message))
        }
    }
}

fn run_pass<T: Target>(
    engine: &Engine<T>,
    target: &T,
    mut context: Context,
    state: &mut PointOfReference,
) -> Resolution {
    let objects = engine.objects();
    if !objects.is_valid(target) {
        info!(?target, "cannot generate presentation for dead object");
        return Resolution::skipped(ResolutionOutcome::InvalidTarget);
    }

    let started = Instant::now();
    let category = match context
        .role
        .clone()
        .or_else(|| objects.natural_category(target))
    {
        Some(category) => category,
        None => {
            info!(?target, "cannot determine category; aborting generation");
            return Resolution::skipped(ResolutionOutcome::NoCategory);
        }
    };
    context.role = Some(category.clone());
    let mode = *context.mode.get_or_insert(engine.mode());
    let format_type = context.effective_format_type();
    context.format_type = Some(format_type.clone());
    let key = FormatKey {
        category,
        mode,
        format_type,
    };

    let store = engine.store();
    let expression = match store.expression_for(&key.category, mode, &key.format_type) {
        Some(expression) if !expression.is_empty() => expression,
        _ => {
            debug!(%key, "no presentation for this combination");
            return Resolution {
                key: Some(key),
                ..Resolution::skipped(ResolutionOutcome::NoExpression)
            };
        }
    };

    let expression = if context.recursing {
        expression
    } else {
        let expression = if context.include_context {
            let prefix = store
                .prefix_expression_for(&context)
                .filter(|prefix| wrap_is_usable(engine, &key, "prefix", prefix));
            let suffix = store
                .suffix_expression_for(&context)
                .filter(|suffix| wrap_is_usable(engine, &key, "suffix", suffix));
            Expr::wrap(prefix, expression, suffix)
        } else {
            expression
        };
        context.recursing = true;
        state.reset_fallbacks();
        expression
    };

    debug!(%key, ?target, expression = %expression, "starting generation");

    let mut bindings = Bindings::for_category(key.category.clone());
    let evaluated = loop {
        let name = match expression.evaluate(&bindings) {
            Evaluation::Complete(fragments) => break Ok(fragments),
            Evaluation::NeedsBinding(name) => name,
        };

        let Some(provider) = engine.registry().resolve(&name) else {
            error!(%key, quantity = %name, "format expression references unknown quantity");
            break Err(ResolutionOutcome::UnknownQuantity(name));
        };

        let field_started = Instant::now();
        let mut invocation = Invocation::new(engine, &context, &key, &expression, &mut *state);
        match call_provider(provider, target, &mut invocation) {
            Ok(value) => {
                trace!(
                    quantity = %name,
                    elapsed_us = field_started.elapsed().as_micros() as u64,
                    value = %render_fragments(&value),
                    "field computed"
                );
                bindings.bind(name, value);
            }
            Err(err) => {
                error!(%key, quantity = %name, error = %err, "field provider failed");
                break Err(ResolutionOutcome::ProviderFault(name));
            }
        }
    };

    let fragments = match evaluated {
        Ok(fragments) => fragments,
        Err(outcome) => {
            return Resolution {
                fragments: Vec::new(),
                bindings,
                outcome,
                key: Some(key),
            }
        }
    };

    if context.is_progress_bar_update && fragments.first().is_some_and(|f| !f.is_blank()) {
        engine.record_progress(target, None, None);
    }

    debug!(
        %key,
        elapsed_us = started.elapsed().as_micros() as u64,
        result = %render_fragments(&fragments),
        "generation complete"
    );

    Resolution {
        fragments,
        bindings,
        outcome: ResolutionOutcome::Presented,
        key: Some(key),
    }
}

/// A context wrap naming an unknown quantity is dropped so that it cannot
/// abort every pass of its mode.
fn wrap_is_usable<T: Target>(engine: &Engine<T>, key: &FormatKey, part: &str, wrap: &Expr) -> bool {
    match wrap
        .references()
        .into_iter()
        .find(|name| !name.is_reserved() && !engine.registry().contains(name))
    {
        Some(unknown) => {
            debug!(%key, part, quantity = %unknown, "skipping context wrap with unknown quantity");
            false
        }
        None => true,
    }
}

/// Run a provider, converting a panic into a provider fault.
pub(crate) fn call_provider<T: Target>(
    provider: &Provider<T>,
    target: &T,
    invocation: &mut Invocation<'_, T>,
) -> FieldResult {
    match panic::catch_unwind(AssertUnwindSafe(|| provider(target, invocation))) {
        Ok(result) => result,
        Err(payload) => Err(FieldError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
