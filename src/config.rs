use std::path::PathBuf;

use clap::Parser;

/// Assigns students to TA presentation slots, balancing load and avoiding
/// repeat student-TA pairings from previous rounds.
#[derive(Debug, Parser)]
#[command(name = "presentation-scheduler", version)]
pub struct Config {
    /// Student list, one identifier per line
    #[arg(long, default_value = "students.txt")]
    pub students: PathBuf,

    /// TA availability file: `name, HH:MM, HH:MM` or
    /// `name, YYYY-MM-DD, HH:MM, HH:MM` (repeat lines to add windows)
    #[arg(long, default_value = "tas.txt")]
    pub tas: PathBuf,

    /// Previous assignment file(s): `student, TA` per line (repeatable)
    #[arg(long = "prev")]
    pub previous: Vec<PathBuf>,

    /// Presentation slot length in minutes
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub slot_minutes: u32,

    /// Primary report (HTML)
    #[arg(long, default_value = "assignment-results.html")]
    pub output: PathBuf,

    /// Plain-text report written if the primary render fails
    #[arg(long, default_value = "public-result.txt")]
    pub fallback_output: PathBuf,

    /// Student-TA pairing file, always written
    #[arg(long, default_value = "private-result.txt")]
    pub pairing_output: PathBuf,

    /// Also dump the full schedule as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Font file embedded in the HTML report (ignored if missing)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Seed for the tie-breaking RNG (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}
