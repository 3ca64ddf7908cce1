//! Field registry: quantity name to field provider.
//!
//! Built once at startup from an explicit manifest. Each manifest entry names the
//! provider implementation; the quantity name is derived from it by convention
//! (strip the `generate` prefix, lower-case the first letter, camel-case any
//! snake_case remainder), so `generate_label_and_name` provides `labelAndName`.

use crate::engine::Invocation;
use crate::error::{FieldError, RegistryError};
use crate::object::Target;
use crate::types::{Fragment, QuantityName};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Prefix stripped from provider implementation names.
pub const PROVIDER_PREFIX: &str = "generate";

/// Result of one provider invocation
pub type FieldResult = Result<Vec<Fragment>, FieldError>;

/// Field provider signature
pub type FieldFn<T> = dyn Fn(&T, &mut Invocation<'_, T>) -> FieldResult + Send + Sync;

/// Shared handle to a field provider
pub type Provider<T> = Arc<FieldFn<T>>;

/// One manifest line: implementation name plus provider.
pub struct FieldEntry<T: Target> {
    pub implementation: String,
    pub provider: Provider<T>,
}

impl<T: Target> FieldEntry<T> {
    pub fn new(implementation: impl Into<String>, provider: Provider<T>) -> Self {
        Self {
            implementation: implementation.into(),
            provider,
        }
    }
}

/// Build a manifest from provider functions, naming each entry after its function.
///
/// ```ignore
/// let manifest = field_manifest!(Node; label::generate_name, text::generate_displayed_text);
/// ```
#[macro_export]
macro_rules! field_manifest {
    ($target:ty; $($module:ident :: $func:ident),* $(,)?) => {
        vec![$(
            $crate::registry::FieldEntry::<$target>::new(
                stringify!($func),
                ::std::sync::Arc::new($module::$func::<$target>) as $crate::registry::Provider<$target>,
            )
        ),*]
    };
}

/// Derive the quantity name for a provider implementation name.
pub fn derive_quantity_name(implementation: &str) -> QuantityName {
    let stripped = implementation
        .trim_start_matches('_')
        .strip_prefix(PROVIDER_PREFIX)
        .unwrap_or(implementation)
        .trim_start_matches('_');

    let mut camel = String::with_capacity(stripped.len());
    let mut upper_next = false;
    for c in stripped.chars() {
        if c == '_' {
            upper_next = !camel.is_empty();
        } else if upper_next {
            camel.extend(c.to_uppercase());
            upper_next = false;
        } else {
            camel.push(c);
        }
    }
    QuantityName::new(camel)
}

struct RegisteredField<T: Target> {
    implementation: String,
    provider: Provider<T>,
}

/// Registry of field providers keyed by quantity name
pub struct FieldRegistry<T: Target> {
    fields: BTreeMap<QuantityName, RegisteredField<T>>,
}

impl<T: Target> Default for FieldRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Target> FieldRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Build a registry from a manifest, failing on the first name clash.
    pub fn from_manifest(
        entries: impl IntoIterator<Item = FieldEntry<T>>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for entry in entries {
            let name = derive_quantity_name(&entry.implementation);
            registry.insert(name, entry.implementation, entry.provider)?;
        }
        debug!(fields = registry.len(), "field registry built");
        Ok(registry)
    }

    /// Register a provider under `name` (first letter is lower-cased).
    pub fn register<F>(&mut self, name: &str, provider: F) -> Result<(), RegistryError>
    where
        F: Fn(&T, &mut Invocation<'_, T>) -> FieldResult + Send + Sync + 'static,
    {
        self.insert(QuantityName::new(name), name.to_string(), Arc::new(provider))
    }

    /// Register an already-shared provider.
    pub fn register_shared(&mut self, name: &str, provider: Provider<T>) -> Result<(), RegistryError> {
        self.insert(QuantityName::new(name), name.to_string(), provider)
    }

    fn insert(
        &mut self,
        name: QuantityName,
        implementation: String,
        provider: Provider<T>,
    ) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName(implementation));
        }
        if name.is_reserved() {
            return Err(RegistryError::Reserved(name));
        }
        if let Some(existing) = self.fields.get(&name) {
            return Err(RegistryError::Duplicate {
                name,
                first: existing.implementation.clone(),
                second: implementation,
            });
        }
        self.fields.insert(
            name,
            RegisteredField {
                implementation,
                provider,
            },
        );
        Ok(())
    }

    /// Look up the provider for a quantity.
    pub fn resolve(&self, name: &QuantityName) -> Option<&Provider<T>> {
        self.fields.get(name).map(|field| &field.provider)
    }

    pub fn contains(&self, name: &QuantityName) -> bool {
        self.fields.contains_key(name)
    }

    /// All registered quantity names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &QuantityName> {
        self.fields.keys()
    }

    /// Implementation name a quantity was registered from.
    pub fn implementation_of(&self, name: &QuantityName) -> Option<&str> {
        self.fields.get(name).map(|field| field.implementation.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
