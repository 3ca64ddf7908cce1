//! Rendition: Presentation Content Resolution
//!
//! Turns a declarative, per-category format expression into an ordered sequence of
//! output fragments for assistive technology, computing each named quantity only
//! when the expression first reaches it and memoizing it for the rest of the pass.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod expr;
pub mod fields;
pub mod format;
pub mod logging;
pub mod object;
pub mod progress;
pub mod registry;
pub mod types;
pub mod verify;

pub use config::{ConfigLoader, RenditionConfig};
pub use context::{Context, FallbackFlag, PointOfReference};
pub use engine::{Bindings, Engine, EngineSettings, Invocation, Resolution, ResolutionOutcome};
pub use error::{ConfigError, FieldError, FormatError, ParseError, RegistryError, VerificationError};
pub use expr::{Evaluation, Expr, Scope};
pub use format::{ExpressionSite, ExpressionStore, FormatTable};
pub use object::{ObjectModel, Target};
pub use progress::{Clock, ManualClock, ProgressSettings, ProgressTracker, SystemClock};
pub use registry::{FieldEntry, FieldRegistry, FieldResult, Provider};
pub use types::{Category, FormatKey, FormatType, Fragment, Mode, QuantityName, VoiceStyle};
