//! What a field provider sees while it runs.

use crate::context::{Context, FallbackFlag, PointOfReference};
use crate::engine::pass::{self, Resolution};
use crate::engine::Engine;
use crate::error::FieldError;
use crate::expr::Expr;
use crate::object::{ObjectModel, Target};
use crate::registry::FieldResult;
use crate::types::{roles, Category, FormatKey, FormatType, Fragment, Mode, QuantityName};

/// Handle passed to a field provider for one invocation.
///
/// Carries the pass's context and key, mutable access to the side-channel
/// record, and the means to start nested resolutions. Nested resolutions share
/// the side-channel record but get fresh bindings.
pub struct Invocation<'p, T: Target> {
    engine: &'p Engine<T>,
    context: &'p Context,
    key: &'p FormatKey,
    expression: &'p Expr,
    state: &'p mut PointOfReference,
}

impl<'p, T: Target> Invocation<'p, T> {
    pub(crate) fn new(
        engine: &'p Engine<T>,
        context: &'p Context,
        key: &'p FormatKey,
        expression: &'p Expr,
        state: &'p mut PointOfReference,
    ) -> Self {
        Self {
            engine,
            context,
            key,
            expression,
            state,
        }
    }

    pub fn engine(&self) -> &'p Engine<T> {
        self.engine
    }

    pub fn objects(&self) -> &'p dyn ObjectModel<T> {
        self.engine.objects()
    }

    pub fn context(&self) -> &'p Context {
        self.context
    }

    /// Effective category of the pass.
    pub fn category(&self) -> &'p Category {
        &self.key.category
    }

    pub fn mode(&self) -> Mode {
        self.key.mode
    }

    pub fn format_type(&self) -> &'p FormatType {
        &self.key.format_type
    }

    pub fn key(&self) -> &'p FormatKey {
        self.key
    }

    /// Expression being evaluated, including any context prefix and suffix.
    pub fn expression(&self) -> &'p Expr {
        self.expression
    }

    /// The category's own stored expression for this key, without context wrapping.
    pub fn format_expression(&self) -> Option<Expr> {
        self.engine
            .store()
            .expression_for(&self.key.category, self.key.mode, &self.key.format_type)
    }

    pub fn point_of_reference(&self) -> &PointOfReference {
        &*self.state
    }

    pub fn point_of_reference_mut(&mut self) -> &mut PointOfReference {
        &mut *self.state
    }

    pub fn flag(&self, flag: FallbackFlag) -> bool {
        self.state.get(flag)
    }

    pub fn set_flag(&mut self, flag: FallbackFlag, value: bool) {
        self.state.set(flag, value);
    }

    /// Context for a nested resolution: the current one, already past the top level.
    pub fn nested_context(&self) -> Context {
        self.context.clone()
    }

    /// Resolve another target (or this one under another category).
    pub fn resolve(&mut self, target: &T, context: Context) -> Vec<Fragment> {
        self.resolve_detailed(target, context).fragments
    }

    pub fn resolve_detailed(&mut self, target: &T, context: Context) -> Resolution {
        pass::run(self.engine, target, context, &mut *self.state)
    }

    /// Compute another quantity for `target` under the current context.
    ///
    /// The result is not memoized; only quantities reached by the expression
    /// itself are bound.
    pub fn call(&mut self, name: &str, target: &T) -> FieldResult {
        let context = self.context;
        self.call_with(name, target, context)
    }

    /// Compute a quantity for a different object, under its own category.
    pub fn call_on(&mut self, name: &str, other: &T) -> FieldResult {
        let context = self.context.without_role();
        self.call_with(name, other, &context)
    }

    /// Compute a quantity for `target` under an explicit context.
    pub fn call_with(&mut self, name: &str, target: &T, context: &Context) -> FieldResult {
        let quantity = QuantityName::new(name);
        let engine = self.engine;
        let provider = engine
            .registry()
            .resolve(&quantity)
            .ok_or(FieldError::UnknownQuantity(quantity))?;

        let category = context
            .role
            .clone()
            .or_else(|| engine.objects().natural_category(target))
            .unwrap_or_else(|| Category::new(roles::UNKNOWN));
        let mut context = context.clone();
        context.role = Some(category.clone());
        let key = FormatKey {
            category,
            mode: context.mode.unwrap_or(self.key.mode),
            format_type: context.effective_format_type(),
        };

        let mut invocation = Invocation::new(engine, &context, &key, self.expression, &mut *self.state);
        pass::call_provider(provider, target, &mut invocation)
    }

    /// Whether a progress update of `target` to `value` should be presented.
    pub fn should_present_progress(&self, target: &T, value: u32) -> bool {
        self.engine.should_present_progress(target, value)
    }

    pub fn progress_number_and_count(&self, target: &T) -> (usize, usize) {
        self.engine.progress_number_and_count(target)
    }
}
