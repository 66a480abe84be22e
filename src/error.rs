//! Error types for integrator configuration.
//!
//! Numerical trouble is never reported as an error: a non-converging segment is
//! accepted once its midpoint collapses onto an endpoint, and a panicking
//! integrand unwinds through `integrate` after every worker has stopped. The
//! variants below only cover inputs that the configured [`crate::Integrator`]
//! refuses up front.

use std::fmt;

/// Errors that can occur when configuring an integration.
#[derive(Clone, Debug, PartialEq)]
pub enum IntegralError {
    /// Tolerance must be finite and non-negative.
    InvalidTolerance { epsilon: f64 },
    /// Both integration limits must be finite.
    NonFiniteBound { a: f64, b: f64 },
    /// A segment needs `a < b`.
    EmptyInterval { a: f64, b: f64 },
}

impl fmt::Display for IntegralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTolerance { epsilon } => {
                write!(f, "tolerance must be finite and non-negative, got {epsilon}")
            }
            Self::NonFiniteBound { a, b } => {
                write!(f, "integration limits must be finite, got [{a}, {b}]")
            }
            Self::EmptyInterval { a, b } => {
                write!(f, "segment [{a}, {b}] is empty")
            }
        }
    }
}

impl std::error::Error for IntegralError {}
