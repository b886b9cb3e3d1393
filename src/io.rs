use crate::collision::{Parameters, StepReport};
use crate::prelude_crate::*;
use colored::*;

pub(crate) fn print_case(params: &Parameters, n: [usize; 2]) {
    println!(
        "Selecting relaxation policy for the solver: {}\n",
        format!("{:?}", params.policy).yellow().bold()
    );
    println!(
        "Selecting velocity set for the solver: {}\n",
        format!("{:?}", params.velocity_set).yellow().bold()
    );
    println!("Creating grid with dimensions: {n:?}\n");
}

pub(crate) fn print_header() {
    println!(
        "{:>10} {:>16} {:>16} {:>16} {:>16} {:>10}",
        "time_step".cyan().bold(),
        "mean_density".cyan().bold(),
        "max_velocity_x".cyan().bold(),
        "min_relax".cyan().bold(),
        "max_relax".cyan().bold(),
        "fall_backs".cyan().bold()
    );
}

pub(crate) fn print_line(report: &StepReport, mean_density: Float, max_velocity: Float) {
    println!("{}", format_line(report, mean_density, max_velocity));
}

fn format_line(report: &StepReport, mean_density: Float, max_velocity: Float) -> String {
    format!(
        "{:>10} {:>16.8e} {:>16.8e} {:>16.8e} {:>16.8e} {:>10}",
        report.time_step,
        mean_density,
        max_velocity,
        report.min_relaxation,
        report.max_relaxation,
        report.entropic.fall_backs
    )
}
