use super::entropic::{EntropicReport, EntropicSearch, StepLength};
use super::{Parameters, RelaxationKind};
use crate::error::Result;
use crate::field::{DistributionField, ScalarField, check_shape};
use crate::prelude_crate::*;
use rayon::prelude::*;

// ------------------------------------------------------------------ ENUM: RelaxationField

/// Relaxation returned to the collision update. BGK relaxes every cell by the same amount
/// and never materializes a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum RelaxationField {
    Uniform(Float),
    Field(ScalarField),
}

impl RelaxationField {
    /// # Examples
    /// ```
    /// # use lbcollision::collision::RelaxationField;
    /// let relax = RelaxationField::Uniform(0.1);
    ///
    /// assert_eq!(relax.get(0, 0), 0.1);
    /// assert_eq!(relax.get(99, 7), 0.1);
    /// ```
    pub fn get(&self, x: usize, y: usize) -> Float {
        match self {
            RelaxationField::Uniform(value) => *value,
            RelaxationField::Field(field) => field.get(x, y),
        }
    }

    pub fn to_field(&self, n: [usize; 2]) -> ScalarField {
        match self {
            RelaxationField::Uniform(value) => ScalarField::filled(n, *value),
            RelaxationField::Field(field) => field.clone(),
        }
    }

    pub fn min(&self) -> Float {
        match self {
            RelaxationField::Uniform(value) => *value,
            RelaxationField::Field(field) => field.min(),
        }
    }

    pub fn max(&self) -> Float {
        match self {
            RelaxationField::Uniform(value) => *value,
            RelaxationField::Field(field) => field.max(),
        }
    }
}

// ----------------------------------------------------------------- ENUM: RelaxationPolicy

#[derive(Debug, Clone, PartialEq)]
pub enum RelaxationPolicy {
    Bgk {
        nu: Float,
    },
    Entropic {
        nu: Float,
        beta: Float,
        search: EntropicSearch,
    },
    /// Entropic in the interior, `nu` on the four boundary faces.
    Mixed {
        nu: Float,
        beta: Float,
        search: EntropicSearch,
    },
}

impl RelaxationPolicy {
    pub fn from_parameters(params: &Parameters) -> Self {
        let nu = params.nu;
        let beta = beta(nu, params.delta_x, params.delta_t);
        let search = EntropicSearch::new(
            params.max_delta_h,
            params.max_entropic_iterations,
            params.non_convergence,
        );
        match params.policy {
            RelaxationKind::Bgk => RelaxationPolicy::Bgk { nu },
            RelaxationKind::Entropic => RelaxationPolicy::Entropic { nu, beta, search },
            RelaxationKind::Mixed => RelaxationPolicy::Mixed { nu, beta, search },
        }
    }
}

impl RelaxationPolicy {
    pub fn get_kind(&self) -> RelaxationKind {
        match self {
            RelaxationPolicy::Bgk { .. } => RelaxationKind::Bgk,
            RelaxationPolicy::Entropic { .. } => RelaxationKind::Entropic,
            RelaxationPolicy::Mixed { .. } => RelaxationKind::Mixed,
        }
    }

    pub fn get_nu(&self) -> Float {
        match self {
            RelaxationPolicy::Bgk { nu }
            | RelaxationPolicy::Entropic { nu, .. }
            | RelaxationPolicy::Mixed { nu, .. } => *nu,
        }
    }

    pub fn relaxation(
        &self,
        f: &DistributionField,
        f_eq: &DistributionField,
    ) -> Result<(RelaxationField, EntropicReport)> {
        match self {
            RelaxationPolicy::Bgk { nu } => {
                Ok((RelaxationField::Uniform(*nu), EntropicReport::default()))
            }
            RelaxationPolicy::Entropic { beta, search, .. } => {
                let (field, report) = entropic_relaxation(f, f_eq, *beta, search)?;
                Ok((RelaxationField::Field(field), report))
            }
            RelaxationPolicy::Mixed { nu, beta, search } => {
                let (mut field, report) = entropic_relaxation(f, f_eq, *beta, search)?;
                FACES_2D
                    .iter()
                    .for_each(|&boundary_face| field.fill_face(boundary_face, *nu));
                Ok((RelaxationField::Field(field), report))
            }
        }
    }
}

/// BGK-equivalent relaxation derived from the kinematic viscosity,
/// `dx / (6 nu dt² + dx)`.
pub fn beta(nu: Float, delta_x: Float, delta_t: Float) -> Float {
    delta_x / (6.0 * nu * delta_t * delta_t + delta_x)
}

fn entropic_relaxation(
    f: &DistributionField,
    f_eq: &DistributionField,
    beta: Float,
    search: &EntropicSearch,
) -> Result<(ScalarField, EntropicReport)> {
    check_shape(f.get_n(), f_eq.get_n())?;
    let n = f.get_n();
    let nx = n[0];
    let q = f.get_q();
    let step_lengths = f
        .as_slice()
        .par_chunks(q)
        .zip(f_eq.as_slice().par_chunks(q))
        .enumerate()
        .map(|(cell, (f_cell, f_eq_cell))| {
            search.step_length(f_cell, f_eq_cell, cell % nx, cell / nx)
        })
        .collect::<Result<Vec<StepLength>>>()?;
    let report = step_lengths
        .par_iter()
        .map(EntropicReport::from_step_length)
        .reduce(EntropicReport::default, EntropicReport::merge);
    let relax = step_lengths
        .iter()
        .map(|step_length| step_length.get_alpha() * beta)
        .collect::<Vec<Float>>();
    Ok((ScalarField::new(n, relax)?, report))
}
