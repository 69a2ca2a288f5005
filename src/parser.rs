use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;

use crate::error::SchedulerError;
use crate::schedule::TimeWindow;

/// TA availability parsed from the TA file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaRoster {
    /// TA names in encounter order, one entry per TA.
    pub tas: Vec<String>,
    /// Total available minutes per TA (sum of window durations).
    pub capacity: HashMap<String, u32>,
    /// Availability windows per TA, in encounter order.
    pub windows: HashMap<String, Vec<TimeWindow>>,
}

fn reader_for(path: &Path) -> Result<csv::Reader<std::fs::File>, SchedulerError> {
    // The input files are comma-space delimited; Trim::All absorbs the space.
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| match e.into_kind() {
            csv::ErrorKind::Io(source) => SchedulerError::Read {
                path: path.to_path_buf(),
                source,
            },
            other => SchedulerError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::other(format!("{other:?}")),
            },
        })
}

/// Reads student identifiers, one per line, preserving order and duplicates.
/// Blank lines are skipped. A missing file is fatal.
pub fn parse_student_file(path: &Path) -> Result<Vec<String>, SchedulerError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SchedulerError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

fn parse_window(record: &StringRecord) -> Option<(String, TimeWindow)> {
    let (name, date, start, end) = match record.len() {
        3 => (record.get(0)?, None, record.get(1)?, record.get(2)?),
        4 => {
            let date = NaiveDate::parse_from_str(record.get(1)?, "%Y-%m-%d").ok()?;
            (record.get(0)?, Some(date), record.get(2)?, record.get(3)?)
        }
        _ => return None,
    };

    if name.is_empty() {
        return None;
    }
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    if start >= end {
        return None;
    }

    Some((name.to_string(), TimeWindow { date, start, end }))
}

/// Reads TA availability. Each well-formed line contributes one time window;
/// repeated names accumulate windows and capacity. Malformed lines (wrong
/// field count, unparsable date/time, start >= end) are logged and skipped.
/// A missing file is fatal.
pub fn parse_ta_file(path: &Path) -> Result<TaRoster, SchedulerError> {
    let mut reader = reader_for(path)?;
    let mut roster = TaRoster::default();

    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("{}:{}: unreadable record, skipped: {e}", path.display(), line + 1);
                continue;
            }
        };

        match parse_window(&record) {
            Some((name, window)) => {
                if !roster.windows.contains_key(&name) {
                    roster.tas.push(name.clone());
                }
                *roster.capacity.entry(name.clone()).or_insert(0) += window.minutes();
                roster.windows.entry(name).or_default().push(window);
            }
            None => {
                warn!("{}:{}: malformed TA line, skipped", path.display(), line + 1);
            }
        }
    }

    Ok(roster)
}

/// Reads previous assignment files into a student -> TAs-seen map. Only the
/// first two fields of each line are used. A missing file is logged and
/// treated as empty; short or unreadable lines are skipped.
pub fn parse_previous_assignments(paths: &[impl AsRef<Path>]) -> HashMap<String, HashSet<String>> {
    let mut previous: HashMap<String, HashSet<String>> = HashMap::new();

    for path in paths {
        let path = path.as_ref();
        let mut reader = match reader_for(path) {
            Ok(reader) => reader,
            Err(e) => {
                warn!("previous assignment file skipped: {e}");
                continue;
            }
        };

        for result in reader.records() {
            let Ok(record) = result else { continue };
            match (record.get(0), record.get(1)) {
                (Some(student), Some(ta)) if !student.is_empty() && !ta.is_empty() => {
                    previous
                        .entry(student.to_string())
                        .or_default()
                        .insert(ta.to_string());
                }
                _ => {}
            }
        }
    }

    previous
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn students_preserve_order_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "students.txt", "Ada\nGrace\n\nAda\n");

        let students = parse_student_file(&path).unwrap();
        assert_eq!(students, vec!["Ada", "Grace", "Ada"]);
    }

    #[test]
    fn missing_student_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_student_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, SchedulerError::Read { .. }));
    }

    #[test]
    fn ta_file_single_window_variant() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "tas.txt", "T1, 09:00, 10:00\nT2, 13:00, 13:45\n");

        let roster = parse_ta_file(&path).unwrap();
        assert_eq!(roster.tas, vec!["T1", "T2"]);
        assert_eq!(roster.capacity["T1"], 60);
        assert_eq!(roster.capacity["T2"], 45);
        assert_eq!(roster.windows["T1"].len(), 1);
        assert_eq!(roster.windows["T1"][0].date, None);
    }

    #[test]
    fn ta_file_multi_window_variant_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "tas.txt",
            "T1, 2026-09-01, 09:00, 09:45\nT1, 2026-09-02, 13:00, 13:45\n",
        );

        let roster = parse_ta_file(&path).unwrap();
        assert_eq!(roster.tas, vec!["T1"]);
        assert_eq!(roster.capacity["T1"], 90);
        let windows = &roster.windows["T1"];
        assert_eq!(windows.len(), 2);
        assert_eq!(
            windows[0].date,
            Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
        );
        assert_eq!(
            windows[1].date,
            Some(NaiveDate::from_ymd_opt(2026, 9, 2).unwrap())
        );
    }

    #[test]
    fn malformed_ta_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "tas.txt",
            "T1, 09:00, 10:00\nbogus line\nT2, 25:00, 26:00\nT3, 10:00, 09:00\n",
        );

        let roster = parse_ta_file(&path).unwrap();
        assert_eq!(roster.tas, vec!["T1"]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "tas.txt", "T1, 09:00, 10:00\nT1, 11:00, 12:00\n");

        let first = parse_ta_file(&path).unwrap();
        let second = parse_ta_file(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn previous_assignments_use_first_two_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "prev.txt",
            "Ada, T1, 2026-09-01, 09:00\nGrace, T2\nshort\n",
        );

        let previous = parse_previous_assignments(&[path]);
        assert!(previous["Ada"].contains("T1"));
        assert!(previous["Grace"].contains("T2"));
        assert_eq!(previous.len(), 2);
    }

    #[test]
    fn missing_previous_file_is_empty_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let existing = write_file(&dir, "prev.txt", "Ada, T1\n");
        let missing = dir.path().join("gone.txt");

        let previous = parse_previous_assignments(&[existing, missing]);
        assert_eq!(previous.len(), 1);
    }
}
