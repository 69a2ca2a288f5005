mod config;
mod error;
mod parser;
mod report;
mod schedule;

use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use config::Config;
use error::SchedulerError;
use parser::{parse_previous_assignments, parse_student_file, parse_ta_file};
use report::{write_reports, HtmlRenderer};
use schedule::balanced_assignment;

fn run(config: &Config) -> Result<(), SchedulerError> {
    let students = parse_student_file(&config.students)?;
    let roster = parse_ta_file(&config.tas)?;
    let previous = parse_previous_assignments(&config.previous);

    if students.is_empty() {
        return Err(SchedulerError::NoStudents(config.students.clone()));
    }
    if roster.tas.is_empty() {
        return Err(SchedulerError::NoTas(config.tas.clone()));
    }

    info!("found {} students and {} TAs", students.len(), roster.tas.len());

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let schedule = balanced_assignment(
        &students,
        &roster,
        &previous,
        config.slot_minutes,
        &mut rng,
    );

    println!("\nAssignment Summary:");
    for (ta, assigned) in &schedule.by_ta {
        println!("{ta}: {} students", assigned.len());
    }
    if !schedule.unassigned.is_empty() {
        println!("Unassigned: {}", schedule.unassigned.join(", "));
    }

    let renderer = HtmlRenderer::new(config.font.clone());
    write_reports(&schedule, config, &renderer)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if let Err(e) = run(&config) {
        error!("{e}");
        std::process::exit(1);
    }
}
