//! Configuration management for the recognition service.
//!
//! This module provides configuration types, validation traits, and utilities
//! for loading the service configuration.

pub mod errors;
pub mod onnx;
pub mod service;

pub use errors::{ConfigError, ConfigValidator, ConfigValidatorExt};
pub use onnx::*;
pub use service::ServiceConfig;
