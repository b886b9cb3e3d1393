use crate::collision::{NonConvergence, Parameters, RelaxationKind};
use crate::prelude_crate::*;
use clap::Arg;
use core_affinity::{get_core_ids, set_for_current};
use std::num::{NonZero, NonZeroUsize};
use tracing_subscriber::EnvFilter;

pub type LbResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug)]
pub struct Config {
    pub number_of_threads: NonZeroUsize,
    pub core_affinity: bool,
    pub verbosity: u8,
    pub n: [usize; 2],
    pub steps: usize,
    pub print_every: usize,
    pub amplitude: Float,
    pub parameters: Parameters,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            number_of_threads: NonZero::new(1).unwrap(),
            core_affinity: false,
            verbosity: 0,
            n: [64, 64],
            steps: 1000,
            print_every: 100,
            amplitude: 0.05,
            parameters: Parameters::default(),
        }
    }
}

impl Config {
    pub fn get_number_of_threads(&self) -> usize {
        usize::from(self.number_of_threads)
    }
}

pub fn get_args() -> LbResult<clap::ArgMatches> {
    let matches = clap::command!()
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("number_of_threads")
                .short('n')
                .long("num-threads")
                .value_name("NTHREADS")
                .help("The number of threads used (min = 1)")
                .value_parser(clap::value_parser!(NonZeroUsize))
                .default_value("1")
                .global(true),
        )
        .arg(
            Arg::new("core_affinity")
                .long("affinity")
                .help("Set the core affinity")
                .action(clap::ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase the log level (-v info, -vv debug, -vvv trace)")
                .action(clap::ArgAction::Count)
                .global(true),
        )
        .subcommand(
            clap::Command::new("run")
                .about("Run a decaying shear wave on a periodic box")
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .value_name("POLICY")
                        .help("The relaxation policy")
                        .value_parser(["bgk", "elbm", "mixed"])
                        .default_value("elbm"),
                )
                .arg(
                    Arg::new("velocity_set")
                        .long("velocity-set")
                        .value_name("LATTICE")
                        .help("The velocity set")
                        .value_parser(["d2q9", "d2q5"])
                        .default_value("d2q9"),
                )
                .arg(
                    Arg::new("nx")
                        .long("nx")
                        .value_name("NX")
                        .help("The number of cells along x")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("64"),
                )
                .arg(
                    Arg::new("ny")
                        .long("ny")
                        .value_name("NY")
                        .help("The number of cells along y")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("64"),
                )
                .arg(
                    Arg::new("nu")
                        .long("nu")
                        .value_name("NU")
                        .help("The viscosity-derived relaxation constant")
                        .value_parser(clap::value_parser!(Float))
                        .default_value("0.1"),
                )
                .arg(
                    Arg::new("delta_x")
                        .long("dx")
                        .value_name("DX")
                        .help("The grid spacing")
                        .value_parser(clap::value_parser!(Float))
                        .default_value("1.0"),
                )
                .arg(
                    Arg::new("delta_t")
                        .long("dt")
                        .value_name("DT")
                        .help("The time step")
                        .value_parser(clap::value_parser!(Float))
                        .default_value("1.0"),
                )
                .arg(
                    Arg::new("max_delta_h")
                        .long("max-delta-h")
                        .value_name("TOL")
                        .help("The relative entropy tolerance of the entropic search")
                        .value_parser(clap::value_parser!(Float))
                        .default_value("1e-12"),
                )
                .arg(
                    Arg::new("max_entropic_iterations")
                        .long("max-entropic-iterations")
                        .value_name("ITER")
                        .help("The maximum number of refinement steps per cell")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("100"),
                )
                .arg(
                    Arg::new("fallback")
                        .long("fallback")
                        .help("Fall back to the initial step length instead of aborting")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("steps")
                        .long("steps")
                        .value_name("STEPS")
                        .help("The number of time steps")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("1000"),
                )
                .arg(
                    Arg::new("print_every")
                        .short('p')
                        .long("print-every")
                        .value_name("FREQUENCY")
                        .help("The frequency which the summary is printed")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("100"),
                )
                .arg(
                    Arg::new("amplitude")
                        .long("amplitude")
                        .value_name("A")
                        .help("The initial shear wave velocity amplitude")
                        .value_parser(clap::value_parser!(Float))
                        .default_value("0.05"),
                ),
        )
        .get_matches();
    Ok(matches)
}

pub fn parse_matches(matches: &clap::ArgMatches) -> LbResult<Config> {
    let number_of_threads = *matches
        .get_one::<NonZeroUsize>("number_of_threads")
        .expect("Has 1 as default");
    let core_affinity = matches.get_flag("core_affinity");
    let verbosity = matches.get_count("verbose");
    match matches.subcommand() {
        Some(("run", sub_m)) => {
            let policy = sub_m
                .get_one::<String>("policy")
                .and_then(|name| RelaxationKind::from_name(name))
                .ok_or("Unknown relaxation policy")?;
            let velocity_set = sub_m
                .get_one::<String>("velocity_set")
                .and_then(|name| VelocitySet::from_name(name))
                .ok_or("Unknown velocity set")?;
            let non_convergence = if sub_m.get_flag("fallback") {
                NonConvergence::FallBack
            } else {
                NonConvergence::Abort
            };
            let parameters = Parameters {
                delta_x: *sub_m.get_one::<Float>("delta_x").unwrap(),
                delta_t: *sub_m.get_one::<Float>("delta_t").unwrap(),
                nu: *sub_m.get_one::<Float>("nu").unwrap(),
                policy,
                max_delta_h: *sub_m.get_one::<Float>("max_delta_h").unwrap(),
                max_entropic_iterations: *sub_m
                    .get_one::<usize>("max_entropic_iterations")
                    .unwrap(),
                non_convergence,
                velocity_set,
            };
            let cfg = Config {
                number_of_threads,
                core_affinity,
                verbosity,
                n: [
                    *sub_m.get_one::<usize>("nx").unwrap(),
                    *sub_m.get_one::<usize>("ny").unwrap(),
                ],
                steps: *sub_m.get_one::<usize>("steps").unwrap(),
                print_every: *sub_m.get_one::<usize>("print_every").unwrap(),
                amplitude: *sub_m.get_one::<Float>("amplitude").unwrap(),
                parameters,
            };
            Ok(cfg)
        }
        _ => unreachable!("At least one subcommand is required: .subcommand_required(true)"),
    }
}

/// `RUST_LOG` wins over the `-v` count when it is set.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub fn init_global_pool(num_threads: usize, pin_all_cores: bool) {
    if pin_all_cores {
        let cores = get_core_ids().expect("Failed to list the system cores");
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .start_handler(move |idx| {
                let core = cores[idx % cores.len()];
                let _ = set_for_current(core);
            })
            .build_global()
            .expect("The global thread pool was already built");
    } else {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .expect("The global thread pool was already built");
    };
}
