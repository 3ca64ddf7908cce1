//! Static verification of stored format expressions.
//!
//! Every stored expression is evaluated against placeholder bindings (an empty
//! sequence for each registered quantity). A quantity the registry does not
//! know is a typo in the table: it is reported, bound to an empty placeholder
//! so evaluation can continue, and never aborts startup.

use crate::engine::Bindings;
use crate::error::VerificationError;
use crate::expr::Evaluation;
use crate::format::ExpressionStore;
use crate::object::Target;
use crate::registry::FieldRegistry;
use std::collections::HashSet;
use tracing::{debug, error};

/// Check every stored expression for references to unknown quantities.
pub fn verify<T: Target>(
    store: &dyn ExpressionStore,
    registry: &FieldRegistry<T>,
) -> Vec<VerificationError> {
    let mut defects = Vec::new();
    let entries = store.entries();

    for (site, expression) in &entries {
        if expression.is_empty() {
            continue;
        }

        let mut placeholders = Bindings::placeholders(registry.names());
        let mut reported = HashSet::new();

        loop {
            match expression.evaluate(&placeholders) {
                Evaluation::Complete(_) => break,
                Evaluation::NeedsBinding(name) => {
                    error!(%site, quantity = %name, "format expression references unknown quantity");
                    reported.insert(name.clone());
                    defects.push(VerificationError::UnknownQuantity {
                        site: site.clone(),
                        quantity: name.clone(),
                    });
                    if !placeholders.bind(name, Vec::new()) {
                        break;
                    }
                }
            }
        }

        // Branches behind a short-circuiting `and` are never reached with
        // empty placeholders.
        for name in expression.references() {
            if name.is_reserved() || registry.contains(name) || reported.contains(name) {
                continue;
            }
            error!(%site, quantity = %name, "format expression references unknown quantity");
            reported.insert(name.clone());
            defects.push(VerificationError::UnknownQuantity {
                site: site.clone(),
                quantity: name.clone(),
            });
        }
    }

    debug!(
        expressions = entries.len(),
        defects = defects.len(),
        "format expressions verified"
    );
    defects
}
