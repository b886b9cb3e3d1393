// ------------------------------------------------------------------------------- MODULES

mod entropic;
mod relaxation;
mod solver;

// ------------------------------------------------------------------------------- IMPORTS

use crate::cli::{Config, LbResult};
use crate::error::{CollisionError, Result};
use crate::prelude_crate::*;
use colored::*;
use tracing::info;

pub use entropic::{EntropicReport, EntropicSearch, StepLength, initial_alpha};
pub use relaxation::{RelaxationField, RelaxationPolicy, beta};
pub use solver::{Solver, StepReport};

// ---------------------------------------------------------------------- ENUM: policies

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelaxationKind {
    Bgk,
    Entropic,
    Mixed,
}

impl RelaxationKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bgk" => Some(RelaxationKind::Bgk),
            "elbm" | "entropic" => Some(RelaxationKind::Entropic),
            "mixed" => Some(RelaxationKind::Mixed),
            _ => None,
        }
    }
}

/// What the entropic search does when it cannot produce a step length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonConvergence {
    /// Fail the whole relaxation computation.
    Abort,
    /// Use the clamped initial bound for the offending cell and keep going.
    FallBack,
}

// -------------------------------------------------------------------- STRUCT: Parameters

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub delta_x: Float,
    pub delta_t: Float,
    pub nu: Float,
    pub policy: RelaxationKind,
    pub max_delta_h: Float,
    pub max_entropic_iterations: usize,
    pub non_convergence: NonConvergence,
    pub velocity_set: VelocitySet,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            delta_x: DELTA_X,
            delta_t: DELTA_T,
            nu: 0.1,
            policy: RelaxationKind::Entropic,
            max_delta_h: DEFAULT_MAX_DELTA_H,
            max_entropic_iterations: DEFAULT_MAX_ENTROPIC_ITERATIONS,
            non_convergence: NonConvergence::Abort,
            velocity_set: VelocitySet::D2Q9,
        }
    }
}

impl Parameters {
    pub fn test_default(policy: RelaxationKind) -> Self {
        Parameters {
            policy,
            ..Default::default()
        }
    }
}

impl Parameters {
    pub(crate) fn validate(&self) -> Result<()> {
        let positive = [
            ("delta_x", self.delta_x),
            ("delta_t", self.delta_t),
            ("max_delta_h", self.max_delta_h),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, value)| !(*value > 0.0)) {
            return Err(CollisionError::InvalidParameter(format!(
                "{name} must be positive, got {value}"
            )));
        }
        if !(self.nu >= 0.0) {
            return Err(CollisionError::InvalidParameter(format!(
                "nu must be non-negative, got {}",
                self.nu
            )));
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------- FUNCTIONS

/// Decaying shear wave on a periodic box, printing one summary line every
/// `print_every` steps.
pub fn run(config: &Config) -> LbResult<()> {
    let params = config.parameters;
    let n = config.n;
    info!("Running {} time steps", config.steps);
    let density = functions::uniform_density(LATTICE_DENSITY, n);
    let momentum = functions::shear_wave_momentum(config.amplitude, LATTICE_DENSITY, n);
    let mut solver = Solver::initial(&density, &momentum, params)?;
    crate::io::print_case(&params, n);
    crate::io::print_header();
    let print_every = config.print_every.max(1);
    let mut fall_backs = 0;
    for _ in 0..config.steps {
        let report = solver.step()?;
        fall_backs += report.entropic.fall_backs;
        if report.time_step % print_every == 0 || report.time_step == config.steps {
            let density = solver.get_density();
            let momentum = solver.get_momentum();
            let max_velocity = momentum
                .as_slice()
                .chunks(momentum.get_d())
                .zip(density.as_slice().iter())
                .map(|(j, rho)| (j[0] / rho).abs())
                .fold(0.0, Float::max);
            crate::io::print_line(&report, density.mean(), max_velocity);
        }
    }
    if fall_backs > 0 {
        println!(
            "\n{}",
            format!("Entropic search fell back in {fall_backs} cell updates").yellow()
        );
    }
    Ok(())
}

pub fn load() {
    let config = match cli::get_args().and_then(|matches| cli::parse_matches(&matches)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    cli::init_tracing(config.verbosity);
    cli::init_global_pool(config.get_number_of_threads(), config.core_affinity);

    if let Err(e) = run(&config) {
        eprintln!("{}", format!("Error: {e}").red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relaxation_kind_from_name() {
        assert_eq!(RelaxationKind::from_name("BGK"), Some(RelaxationKind::Bgk));
        assert_eq!(RelaxationKind::from_name("elbm"), Some(RelaxationKind::Entropic));
        assert_eq!(RelaxationKind::from_name("mixed"), Some(RelaxationKind::Mixed));
        assert_eq!(RelaxationKind::from_name("mrt"), None);
    }

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(Parameters::default().validate().is_ok());
        assert_eq!(Parameters::default().max_delta_h, 1e-12);
    }

    #[test]
    fn test_validate_rejects_non_positive_spacing() {
        let params = Parameters {
            delta_x: 0.0,
            ..Default::default()
        };

        assert_eq!(
            params.validate(),
            Err(CollisionError::InvalidParameter(
                "delta_x must be positive, got 0".to_string()
            ))
        );
    }

    #[test]
    fn test_validate_rejects_nan_viscosity() {
        let params = Parameters {
            nu: Float::NAN,
            ..Default::default()
        };

        assert!(params.validate().is_err());
    }

    #[test]
    fn test_run_short_case() {
        let config = Config {
            n: [6, 6],
            steps: 3,
            print_every: 1,
            parameters: Parameters::test_default(RelaxationKind::Mixed),
            ..Default::default()
        };

        assert!(run(&config).is_ok());
    }
}
