//! Domain-level structures shared by the service and the CLI.
//!
//! This module groups the recognition task kinds, prediction results and the
//! JSON payloads the HTTP API returns.

pub mod model_kind;
pub mod prediction;

pub use model_kind::ModelKind;
pub use prediction::*;
