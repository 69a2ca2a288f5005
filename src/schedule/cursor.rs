use chrono::{Duration, NaiveDate, NaiveTime};

use super::types::TimeWindow;

/// Tracks the next free slot start within a TA's ordered windows.
///
/// Before each placement the cursor rolls forward past every window whose end
/// it has already reached, so a fully consumed window never absorbs a slot
/// and several exhausted windows are skipped in one go. A placed slot may
/// still overhang its window's end; the overhang is absorbed on the next
/// roll. When no window remains the cursor reports exhaustion instead of
/// producing a slot past all windows.
#[derive(Debug, Clone)]
pub struct TimeCursor {
    windows: Vec<TimeWindow>,
    index: usize,
    position: NaiveTime,
}

impl TimeCursor {
    pub fn new(windows: Vec<TimeWindow>) -> Self {
        let position = windows.first().map(|w| w.start).unwrap_or(NaiveTime::MIN);
        Self {
            windows,
            index: 0,
            position,
        }
    }

    /// Rolls past consumed windows; `None` when the schedule is exhausted.
    fn resolve(&self) -> Option<(usize, NaiveTime)> {
        let mut index = self.index;
        let mut position = self.position;
        while index < self.windows.len() && position >= self.windows[index].end {
            index += 1;
            if let Some(window) = self.windows.get(index) {
                position = window.start;
            }
        }
        (index < self.windows.len()).then_some((index, position))
    }

    /// Whether another slot can start within some remaining window.
    pub fn can_place(&self) -> bool {
        self.resolve().is_some()
    }

    /// Takes the next slot of `minutes` length, advancing the cursor.
    ///
    /// A slot never crosses midnight; a window whose remainder would wrap is
    /// treated as exhausted and the cursor moves on to the next window.
    pub fn take_slot(&mut self, minutes: u32) -> Option<(Option<NaiveDate>, NaiveTime, NaiveTime)> {
        loop {
            let (index, start) = self.resolve()?;
            let (end, wrapped) = start.overflowing_add_signed(Duration::minutes(i64::from(minutes)));
            if wrapped != 0 {
                self.index = index + 1;
                self.position = self
                    .windows
                    .get(self.index)
                    .map(|w| w.start)
                    .unwrap_or(NaiveTime::MIN);
                continue;
            }
            self.index = index;
            self.position = end;
            return Some((self.windows[index].date, start, end));
        }
    }
}
