use super::entropic::EntropicReport;
use super::relaxation::{RelaxationField, RelaxationPolicy};
use super::Parameters;
use crate::error::{CollisionError, Result};
use crate::field::{DistributionField, ScalarField, VectorField, check_shape};
use crate::kernel;
use crate::prelude_crate::*;
use rayon::prelude::*;
use tracing::{debug, info};

// ------------------------------------------------------------------ STRUCT: StepReport

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub time_step: usize,
    pub min_relaxation: Float,
    pub max_relaxation: Float,
    pub entropic: EntropicReport,
}

// ---------------------------------------------------------------------- STRUCT: Solver

#[derive(Debug, Clone)]
pub struct Solver {
    f: DistributionField,
    delta_x: Float,
    delta_t: Float,
    policy: RelaxationPolicy,
    velocity_set_parameters: VelocitySetParameters,
    time_step: usize,
}

impl Solver {
    pub fn new(f: DistributionField, params: Parameters) -> Result<Self> {
        params.validate()?;
        let velocity_set_parameters = params.velocity_set.get_velocity_set_parameters();
        let n = f.get_n();
        if n[0] == 0 || n[1] == 0 {
            return Err(CollisionError::EmptyGrid);
        }
        if f.get_q() != velocity_set_parameters.get_q() {
            return Err(CollisionError::ShapeMismatch {
                expected: vec![n[0], n[1], velocity_set_parameters.get_q()],
                found: vec![n[0], n[1], f.get_q()],
            });
        }
        let policy = RelaxationPolicy::from_parameters(&params);
        info!(
            "Creating {:?} solver with {:?} policy on a {}x{} grid (nu = {}, dx = {}, dt = {})",
            params.velocity_set,
            policy.get_kind(),
            n[0],
            n[1],
            params.nu,
            params.delta_x,
            params.delta_t
        );
        Ok(Solver {
            f,
            delta_x: params.delta_x,
            delta_t: params.delta_t,
            policy,
            velocity_set_parameters,
            time_step: 0,
        })
    }

    /// Builds a solver whose populations sit at the equilibrium of the given fields.
    ///
    /// # Examples
    /// ```
    /// # use lbcollision::collision::{Parameters, RelaxationKind, Solver};
    /// # use lbcollision::functions;
    /// let density = functions::uniform_density(1.0, [4, 4]);
    /// let momentum = functions::uniform_momentum([0.0, 0.0], [4, 4]);
    /// let params = Parameters::test_default(RelaxationKind::Bgk);
    ///
    /// let solver = Solver::initial(&density, &momentum, params).unwrap();
    ///
    /// assert_eq!(solver.get_n(), [4, 4]);
    /// assert!((solver.get_f().get(2, 1, 0) - 4.0 / 9.0).abs() < 1e-12);
    /// ```
    pub fn initial(density: &ScalarField, momentum: &VectorField, params: Parameters) -> Result<Self> {
        let velocity_set_parameters = params.velocity_set.get_velocity_set_parameters();
        let f = Solver::eq_distribution(
            density,
            momentum,
            params.delta_x,
            params.delta_t,
            &velocity_set_parameters,
        )?;
        Solver::new(f, params)
    }

    pub fn test_default(params: Parameters) -> Self {
        let n = [4, 4];
        let density = crate::functions::uniform_density(LATTICE_DENSITY, n);
        let momentum = crate::functions::uniform_momentum([0.0, 0.0], n);
        Solver::initial(&density, &momentum, params).unwrap()
    }
}

impl Solver {
    pub fn get_f(&self) -> &DistributionField {
        &self.f
    }

    pub fn set_f(&mut self, f: DistributionField) -> Result<()> {
        check_shape(self.get_n(), f.get_n())?;
        if f.get_q() != self.f.get_q() {
            return Err(CollisionError::ShapeMismatch {
                expected: vec![self.f.get_q()],
                found: vec![f.get_q()],
            });
        }
        self.f = f;
        Ok(())
    }

    pub fn get_n(&self) -> [usize; 2] {
        self.f.get_n()
    }

    pub fn get_nx(&self) -> usize {
        self.f.get_n()[0]
    }

    pub fn get_ny(&self) -> usize {
        self.f.get_n()[1]
    }

    pub fn get_delta_x(&self) -> Float {
        self.delta_x
    }

    pub fn get_delta_t(&self) -> Float {
        self.delta_t
    }

    pub fn get_policy(&self) -> &RelaxationPolicy {
        &self.policy
    }

    pub fn get_velocity_set_parameters(&self) -> &VelocitySetParameters {
        &self.velocity_set_parameters
    }

    pub fn get_time_step(&self) -> usize {
        self.time_step
    }
}

impl Solver {
    /// Equilibrium populations of every cell. Pure function of its arguments.
    ///
    /// `density` must be strictly positive everywhere; zero or negative entries produce
    /// non-finite or unphysical populations.
    pub fn eq_distribution(
        density: &ScalarField,
        momentum: &VectorField,
        delta_x: Float,
        delta_t: Float,
        vel_set_params: &VelocitySetParameters,
    ) -> Result<DistributionField> {
        check_shape(density.get_n(), momentum.get_n())?;
        let n = density.get_n();
        let q = vel_set_params.get_q();
        let d = momentum.get_d();
        let cs_2_inv = kernel::cs_2_inv(delta_x, delta_t);
        let mut f_eq = DistributionField::zeros(n, q)?;
        f_eq.as_mut_slice()
            .par_chunks_mut(q)
            .zip(density.as_slice().par_iter())
            .zip(momentum.as_slice().par_chunks(d))
            .for_each(|((f_eq_cell, &rho), j)| {
                kernel::equilibrium(f_eq_cell, rho, j, cs_2_inv, vel_set_params);
            });
        Ok(f_eq)
    }

    pub fn get_density(&self) -> ScalarField {
        let q = self.f.get_q();
        let mut density = ScalarField::filled(self.get_n(), 0.0);
        density
            .as_mut_slice()
            .par_iter_mut()
            .zip(self.f.as_slice().par_chunks(q))
            .for_each(|(rho, f_cell)| *rho = kernel::density(f_cell));
        density
    }

    /// `Σ c_i f_i` per cell, in lattice units.
    pub fn get_momentum(&self) -> VectorField {
        let q = self.f.get_q();
        let vel_set_params = &self.velocity_set_parameters;
        let mut momentum = VectorField::filled(self.get_n(), [0.0, 0.0]);
        let d = momentum.get_d();
        momentum
            .as_mut_slice()
            .par_chunks_mut(d)
            .zip(self.f.as_slice().par_chunks(q))
            .for_each(|(j, f_cell)| kernel::momentum(j, f_cell, vel_set_params));
        momentum
    }

    /// # Examples
    /// ```
    /// # use lbcollision::collision::{Parameters, RelaxationKind, Solver};
    /// let solver = Solver::test_default(Parameters::test_default(RelaxationKind::Bgk));
    ///
    /// let f_eq = solver.get_feq().unwrap();
    ///
    /// assert!((f_eq.get(3, 3, 5) - 1.0 / 36.0).abs() < 1e-12);
    /// ```
    pub fn get_feq(&self) -> Result<DistributionField> {
        let density = self.get_density();
        let momentum = self.get_momentum();
        Solver::eq_distribution(
            &density,
            &momentum,
            self.delta_x,
            self.delta_t,
            &self.velocity_set_parameters,
        )
    }

    pub fn get_relax(&self) -> Result<RelaxationField> {
        self.get_relax_with_report().map(|(relax, _)| relax)
    }

    pub fn get_relax_with_report(&self) -> Result<(RelaxationField, EntropicReport)> {
        let f_eq = self.get_feq()?;
        self.policy.relaxation(&self.f, &f_eq)
    }
}

impl Solver {
    /// $$ f\_{i} \leftarrow f\_{i} + \omega(\mathbf{x}) (f\_{i}^{eq} - f\_{i}) $$
    pub fn collide(&mut self, relax: &RelaxationField, f_eq: &DistributionField) -> Result<()> {
        check_shape(self.get_n(), f_eq.get_n())?;
        if let RelaxationField::Field(field) = relax {
            check_shape(self.get_n(), field.get_n())?;
        }
        let q = self.f.get_q();
        let nx = self.get_nx();
        self.f
            .as_mut_slice()
            .par_chunks_mut(q)
            .zip(f_eq.as_slice().par_chunks(q))
            .enumerate()
            .for_each(|(cell, (f_cell, f_eq_cell))| {
                let omega = relax.get(cell % nx, cell / nx);
                kernel::bgk_relaxation(f_cell, f_eq_cell, omega);
            });
        Ok(())
    }

    /// Periodic pull streaming, `f_i(x) ← f_i(x - c_i)`.
    pub fn stream(&mut self) {
        let [nx, ny] = self.get_n();
        let q = self.f.get_q();
        let c = self.velocity_set_parameters.get_c();
        let f = &self.f;
        let mut f_new = f.clone();
        f_new
            .as_mut_slice()
            .par_chunks_mut(q)
            .enumerate()
            .for_each(|(cell, f_cell)| {
                let x = (cell % nx) as i64;
                let y = (cell / nx) as i64;
                f_cell.iter_mut().enumerate().for_each(|(i, f_i)| {
                    let source_x = (x - c[i][0] as i64).rem_euclid(nx as i64) as usize;
                    let source_y = (y - c[i][1] as i64).rem_euclid(ny as i64) as usize;
                    *f_i = f.get(source_x, source_y, i);
                });
            });
        self.f = f_new;
    }

    /// One full time step: equilibrium, relaxation, collision and periodic streaming.
    pub fn step(&mut self) -> Result<StepReport> {
        let f_eq = self.get_feq()?;
        let (relax, entropic) = self.policy.relaxation(&self.f, &f_eq)?;
        self.collide(&relax, &f_eq)?;
        self.stream();
        self.time_step += 1;
        let report = StepReport {
            time_step: self.time_step,
            min_relaxation: relax.min(),
            max_relaxation: relax.max(),
            entropic,
        };
        debug!(?report, "Completed time step");
        Ok(report)
    }
}
