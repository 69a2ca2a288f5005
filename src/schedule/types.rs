use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A contiguous interval of TA availability.
///
/// Windows from the single-window file variant carry no date. A TA's windows
/// are kept in encounter order, not sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub date: Option<NaiveDate>,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Window duration in minutes. Callers guarantee start < end.
    pub fn minutes(&self) -> u32 {
        (self.end - self.start).num_minutes().max(0) as u32
    }
}

/// One assigned presentation slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    pub student: String,
    pub ta: String,
    pub date: Option<NaiveDate>,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ScheduledSlot {
    /// Ordering key for report output: dateless slots sort first.
    pub fn sort_key(&self) -> (Option<NaiveDate>, NaiveTime) {
        (self.date, self.start)
    }
}

/// Result of one scheduling run.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    /// Students per TA, one entry per roster TA in encounter order.
    pub by_ta: Vec<(String, Vec<String>)>,
    /// Slots in assignment order.
    pub slots: Vec<ScheduledSlot>,
    /// Students that could not be placed.
    pub unassigned: Vec<String>,
}
