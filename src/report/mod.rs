pub mod html;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use log::{error, info, warn};

use crate::config::Config;
use crate::error::SchedulerError;
use crate::schedule::{Schedule, ScheduledSlot};

pub use html::HtmlRenderer;

/// Renders the sorted slot list plus per-TA assignment tables to a file.
pub trait Renderer {
    fn render(
        &self,
        slots: &[ScheduledSlot],
        schedule: &Schedule,
        out: &Path,
    ) -> Result<(), SchedulerError>;
}

fn fmt_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Slots sorted by (date, start time) ascending; dateless slots first.
fn sorted_slots(schedule: &Schedule) -> Vec<ScheduledSlot> {
    let mut slots = schedule.slots.clone();
    slots.sort_by_key(ScheduledSlot::sort_key);
    slots
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), SchedulerError> {
    let wrap = |source| SchedulerError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(wrap)?;
    for line in lines {
        writeln!(file, "{line}").map_err(wrap)?;
    }
    Ok(())
}

fn write_fallback(slots: &[ScheduledSlot], path: &Path) -> Result<(), SchedulerError> {
    let lines: Vec<String> = slots
        .iter()
        .map(|s| {
            format!(
                "{}, {}, {}, {}",
                s.student,
                s.ta,
                fmt_date(s.date),
                fmt_time(s.start)
            )
        })
        .collect();
    write_lines(path, &lines)
}

fn write_pairings(slots: &[ScheduledSlot], path: &Path) -> Result<(), SchedulerError> {
    let lines: Vec<String> = slots.iter().map(|s| format!("{}, {}", s.student, s.ta)).collect();
    write_lines(path, &lines)
}

fn write_json(schedule: &Schedule, path: &Path) -> Result<(), SchedulerError> {
    let wrap = |source| SchedulerError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(wrap)?;
    serde_json::to_writer_pretty(file, schedule).map_err(|e| wrap(e.into()))
}

/// Writes all report artifacts.
///
/// The primary render goes through `renderer`; on failure the same sorted
/// slots are written as plain text instead and any partial primary artifact
/// is removed. The student-TA pairing file is attempted no matter what the
/// other artifacts did; the first failure is kept for the return value.
pub fn write_reports(
    schedule: &Schedule,
    config: &Config,
    renderer: &dyn Renderer,
) -> Result<(), SchedulerError> {
    let slots = sorted_slots(schedule);
    let mut first_error = None;

    match renderer.render(&slots, schedule, &config.output) {
        Ok(()) => info!("report written to {}", config.output.display()),
        Err(e) => {
            error!("primary report failed: {e}");
            let _ = std::fs::remove_file(&config.output);
            match write_fallback(&slots, &config.fallback_output) {
                Ok(()) => {
                    warn!("fallback report written to {}", config.fallback_output.display());
                }
                Err(e) => {
                    error!("fallback report failed: {e}");
                    first_error = Some(e);
                }
            }
        }
    }

    match write_pairings(&slots, &config.pairing_output) {
        Ok(()) => info!("pairing file written to {}", config.pairing_output.display()),
        Err(e) => {
            error!("pairing file failed: {e}");
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    }

    if let Some(json_path) = &config.json {
        match write_json(schedule, json_path) {
            Ok(()) => info!("JSON schedule written to {}", json_path.display()),
            Err(e) => {
                error!("JSON schedule failed: {e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::Parser;

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(
            &self,
            _slots: &[ScheduledSlot],
            _schedule: &Schedule,
            out: &Path,
        ) -> Result<(), SchedulerError> {
            // Leave a partial artifact behind to check cleanup.
            let _ = std::fs::write(out, "partial");
            Err(SchedulerError::Write {
                path: out.to_path_buf(),
                source: std::io::Error::other("boom"),
            })
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot(student: &str, ta: &str, date: Option<NaiveDate>, start: NaiveTime) -> ScheduledSlot {
        ScheduledSlot {
            student: student.to_string(),
            ta: ta.to_string(),
            date,
            start,
            end: start + chrono::Duration::minutes(30),
        }
    }

    fn schedule() -> Schedule {
        let d1 = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 9, 2).unwrap();
        Schedule {
            by_ta: vec![
                ("T1".to_string(), vec!["B".to_string(), "A".to_string()]),
                ("T2".to_string(), vec![]),
            ],
            // Deliberately out of order: the writer must sort.
            slots: vec![
                slot("A", "T1", Some(d2), t(9, 0)),
                slot("B", "T1", Some(d1), t(10, 0)),
                slot("C", "T2", Some(d1), t(9, 0)),
            ],
            unassigned: Vec::new(),
        }
    }

    fn config_in(dir: &tempfile::TempDir) -> Config {
        Config::parse_from([
            "presentation-scheduler",
            "--output",
            dir.path().join("out.html").to_str().unwrap(),
            "--fallback-output",
            dir.path().join("public.txt").to_str().unwrap(),
            "--pairing-output",
            dir.path().join("private.txt").to_str().unwrap(),
        ])
    }

    #[test]
    fn pairing_file_is_always_written_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        write_reports(&schedule(), &config, &HtmlRenderer::new(None)).unwrap();

        let pairings = std::fs::read_to_string(&config.pairing_output).unwrap();
        assert_eq!(pairings, "C, T2\nB, T1\nA, T1\n");
        assert!(config.output.exists());
        assert!(!config.fallback_output.exists());
    }

    #[test]
    fn render_failure_falls_back_to_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        write_reports(&schedule(), &config, &FailingRenderer).unwrap();

        assert!(!config.output.exists(), "partial artifact must be removed");
        let fallback = std::fs::read_to_string(&config.fallback_output).unwrap();
        assert_eq!(
            fallback,
            "C, T2, 2026-09-01, 09:00\nB, T1, 2026-09-01, 10:00\nA, T1, 2026-09-02, 09:00\n"
        );
        // Pairing file is independent of the primary outcome.
        assert!(config.pairing_output.exists());
    }

    #[test]
    fn pairing_file_survives_fallback_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir);
        // Point the fallback at an unwritable location so it fails too.
        config.fallback_output = dir.path().join("missing-dir").join("public.txt");

        let result = write_reports(&schedule(), &config, &FailingRenderer);

        assert!(result.is_err());
        assert!(config.pairing_output.exists());
        let pairings = std::fs::read_to_string(&config.pairing_output).unwrap();
        assert_eq!(pairings, "C, T2\nB, T1\nA, T1\n");
    }

    #[test]
    fn dateless_slots_sort_before_dated_ones() {
        let mut schedule = schedule();
        schedule.slots.push(slot("D", "T2", None, t(16, 0)));

        let sorted = sorted_slots(&schedule);
        assert_eq!(sorted[0].student, "D");
    }
}
