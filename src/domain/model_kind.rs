//! The two recognition tasks the service exposes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which classifier a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Handwritten digits `0..=9`, served by the MNIST model.
    Digit,
    /// Handwritten letters `A..=Z`, served by the EMNIST model.
    Letter,
}

impl ModelKind {
    /// Dataset name used in user-facing messages.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Digit => "MNIST",
            ModelKind::Letter => "EMNIST",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Digit => "digit",
            ModelKind::Letter => "letter",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "digit" | "mnist" => Ok(ModelKind::Digit),
            "letter" | "emnist" => Ok(ModelKind::Letter),
            other => Err(format!("unknown model kind '{other}', expected digit or letter")),
        }
    }
}
