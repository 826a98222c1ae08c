//! Declarative model ↔ remote configuration
//!
//! Pure functions: no I/O, no logging.

mod plan;
mod request;
mod snapshot;

pub use plan::{
    apply_plan_defaults, validate, DEFAULT_CACHE_UNIT, DEFAULT_ORIGIN_PORT,
    DEFAULT_ORIGIN_PROTOCOL, DEFAULT_TAG,
};
pub use request::{build_create_request, build_update_request};
pub use snapshot::{apply_snapshot, copy_computed_fields, model_from_snapshot};
