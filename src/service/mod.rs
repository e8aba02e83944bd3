//! Request-independent service state.

mod context;

pub use context::{LoadedModel, ServiceContext};
