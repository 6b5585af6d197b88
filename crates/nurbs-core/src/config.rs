//! Evaluation configuration shared by curve construction and batch evaluation.

use serde::{Deserialize, Serialize};

use crate::tolerance::Tolerance;

/// How much checking curve construction performs beyond the weight count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Only the control-point/weight count is enforced. Other invariant
    /// violations are logged and the curve is built anyway.
    #[default]
    Permissive,
    /// Knot monotonicity, the `n + p + 1` knot count and weight signs are
    /// enforced at construction.
    Strict,
}

/// Configuration for building and evaluating curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub validation: ValidationMode,
    /// Batches with at least this many parameters are evaluated in parallel.
    pub parallel_threshold: usize,
    pub tolerance: Tolerance,
}

impl EvalConfig {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

    /// Permissive defaults with strict validation switched on.
    pub fn strict() -> Self {
        Self::default().with_validation(ValidationMode::Strict)
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.validation == ValidationMode::Strict
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Permissive,
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
            tolerance: Tolerance::default(),
        }
    }
}
