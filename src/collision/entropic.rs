use super::NonConvergence;
use crate::error::{CollisionError, Result};
use crate::kernel::{entropy, entropy_along};
use crate::prelude_crate::*;
use tracing::warn;

// ---------------------------------------------------------------------- ENUM: StepLength

/// Outcome of the entropic search at one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepLength {
    /// No population lies above equilibrium, so there is nothing to relax.
    Degenerate,
    Converged { alpha: Float, iterations: usize },
    /// The search failed and the clamped initial bound was used instead.
    FallBack { alpha: Float },
}

impl StepLength {
    pub fn get_alpha(&self) -> Float {
        match self {
            StepLength::Degenerate => 0.0,
            StepLength::Converged { alpha, .. } | StepLength::FallBack { alpha } => *alpha,
        }
    }

    pub fn get_iterations(&self) -> usize {
        match self {
            StepLength::Converged { iterations, .. } => *iterations,
            _ => 0,
        }
    }
}

// ----------------------------------------------------------------- STRUCT: EntropicReport

/// Per-step tally of the entropic search over the whole grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntropicReport {
    pub cells: usize,
    pub degenerate: usize,
    pub refined: usize,
    pub fall_backs: usize,
    pub max_iterations: usize,
}

impl EntropicReport {
    pub(crate) fn from_step_length(step_length: &StepLength) -> Self {
        let mut report = EntropicReport {
            cells: 1,
            ..Default::default()
        };
        match step_length {
            StepLength::Degenerate => report.degenerate = 1,
            StepLength::Converged { iterations, .. } => {
                report.refined = usize::from(*iterations > 0);
                report.max_iterations = *iterations;
            }
            StepLength::FallBack { .. } => report.fall_backs = 1,
        }
        report
    }

    pub(crate) fn merge(self, other: Self) -> Self {
        EntropicReport {
            cells: self.cells + other.cells,
            degenerate: self.degenerate + other.degenerate,
            refined: self.refined + other.refined,
            fall_backs: self.fall_backs + other.fall_backs,
            max_iterations: self.max_iterations.max(other.max_iterations),
        }
    }
}

// ------------------------------------------------------------------ STRUCT: EntropicSearch

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropicSearch {
    max_delta_h: Float,
    max_iterations: usize,
    non_convergence: NonConvergence,
}

impl EntropicSearch {
    pub fn new(max_delta_h: Float, max_iterations: usize, non_convergence: NonConvergence) -> Self {
        EntropicSearch {
            max_delta_h,
            max_iterations,
            non_convergence,
        }
    }
}

impl Default for EntropicSearch {
    fn default() -> Self {
        EntropicSearch::new(
            DEFAULT_MAX_DELTA_H,
            DEFAULT_MAX_ENTROPIC_ITERATIONS,
            NonConvergence::Abort,
        )
    }
}

impl EntropicSearch {
    pub fn get_max_delta_h(&self) -> Float {
        self.max_delta_h
    }

    pub fn get_max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn get_non_convergence(&self) -> NonConvergence {
        self.non_convergence
    }

    /// Searches the non-trivial root of `H(f + alpha (f_eq - f)) = H(f)` for the cell at
    /// `(x, y)`. `f` and `f_eq` are only read.
    ///
    /// # Examples
    /// ```
    /// # use lbcollision::collision::{EntropicSearch, StepLength};
    /// let search = EntropicSearch::default();
    /// let f = [0.4, 0.3, 0.3];
    ///
    /// assert_eq!(search.step_length(&f, &f, 0, 0), Ok(StepLength::Degenerate));
    /// ```
    pub fn step_length(&self, f: &[Float], f_eq: &[Float], x: usize, y: usize) -> Result<StepLength> {
        let Some(alpha_0) = initial_alpha(f, f_eq) else {
            return Ok(StepLength::Degenerate);
        };
        let h_f = entropy(f);
        let h_f_eq = entropy(f_eq);
        let mut alpha = alpha_0;
        let mut h_alpha = entropy_along(f, f_eq, alpha);
        let mut iterations = 0;
        while 0.0 < h_f - h_alpha && h_f - h_alpha < h_f * self.max_delta_h {
            if iterations >= self.max_iterations {
                let error = CollisionError::EntropicSearchExceeded {
                    x,
                    y,
                    iterations,
                };
                return self.recover(error, alpha_0);
            }
            alpha -= (h_alpha - h_f) / (h_alpha - h_f_eq) * (1.0 - alpha);
            if !alpha.is_finite() {
                return self.recover(CollisionError::NonFiniteEntropicStep { x, y }, alpha_0);
            }
            h_alpha = entropy_along(f, f_eq, alpha);
            iterations += 1;
        }
        Ok(StepLength::Converged {
            alpha: alpha.clamp(0.0, ALPHA_MAX),
            iterations,
        })
    }

    fn recover(&self, error: CollisionError, alpha_0: Float) -> Result<StepLength> {
        match self.non_convergence {
            NonConvergence::Abort => Err(error),
            NonConvergence::FallBack => {
                warn!("{error}; falling back to the initial step length {alpha_0:.6}");
                Ok(StepLength::FallBack {
                    alpha: alpha_0.clamp(0.0, ALPHA_MAX),
                })
            }
        }
    }
}

/// Largest step that keeps every population above equilibrium non-negative,
/// `min f_i / (f_i - f_i^eq)` over `f_i > f_i^eq`, capped at [`ALPHA_MAX`].
/// `None` when no population lies above equilibrium.
pub fn initial_alpha(f: &[Float], f_eq: &[Float]) -> Option<Float> {
    f.iter()
        .zip(f_eq.iter())
        .filter(|(f_i, f_eq_i)| f_i > f_eq_i)
        .map(|(f_i, f_eq_i)| f_i / (f_i - f_eq_i))
        .reduce(Float::min)
        .map(|alpha| alpha.min(ALPHA_MAX))
}
