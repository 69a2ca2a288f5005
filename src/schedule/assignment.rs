use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::parser::TaRoster;

use super::cursor::TimeCursor;
use super::types::{Schedule, ScheduledSlot};

/// Assigns students to TAs, balancing load and avoiding repeat pairings.
///
/// Students are processed in input order. For each student the eligible TAs
/// are those not previously paired with them, with at least `slot_minutes` of
/// capacity left, and with a window that can still hold a slot. If no such TA
/// exists the prior-pairing filter is relaxed; if the set is still empty the
/// student is skipped with a warning. Among eligible TAs the one with the
/// fewest students so far wins, ties broken uniformly at random via `rng`.
pub fn balanced_assignment<R: Rng>(
    students: &[String],
    roster: &TaRoster,
    previous: &HashMap<String, HashSet<String>>,
    slot_minutes: u32,
    rng: &mut R,
) -> Schedule {
    let mut remaining = roster.capacity.clone();
    let mut load: HashMap<&str, u32> = roster.tas.iter().map(|ta| (ta.as_str(), 0)).collect();
    let mut cursors: HashMap<&str, TimeCursor> = roster
        .tas
        .iter()
        .map(|ta| {
            let windows = roster.windows.get(ta).cloned().unwrap_or_default();
            (ta.as_str(), TimeCursor::new(windows))
        })
        .collect();

    let mut assignment: HashMap<&str, Vec<String>> = HashMap::new();
    let mut slots = Vec::new();
    let mut unassigned = Vec::new();

    let has_room = |ta: &str, remaining: &HashMap<String, u32>, cursors: &HashMap<&str, TimeCursor>| {
        remaining.get(ta).copied().unwrap_or(0) >= slot_minutes
            && cursors.get(ta).is_some_and(TimeCursor::can_place)
    };

    for student in students {
        let seen = previous.get(student);
        let mut eligible: Vec<&str> = roster
            .tas
            .iter()
            .map(String::as_str)
            .filter(|&ta| seen.map_or(true, |seen| !seen.contains(ta)))
            .filter(|&ta| has_room(ta, &remaining, &cursors))
            .collect();

        if eligible.is_empty() {
            // Fallback: allow a repeat pairing rather than dropping the student.
            eligible = roster
                .tas
                .iter()
                .map(String::as_str)
                .filter(|&ta| has_room(ta, &remaining, &cursors))
                .collect();
            if !eligible.is_empty() {
                warn!("no fresh TA available for {student}; relaxing previous-assignment filter");
            }
        }

        if eligible.is_empty() {
            warn!("no available TA left for {student}");
            unassigned.push(student.clone());
            continue;
        }

        let min_load = eligible
            .iter()
            .filter_map(|ta| load.get(ta).copied())
            .min()
            .unwrap_or(0);
        let tied: Vec<&str> = eligible
            .iter()
            .filter(|ta| load.get(**ta).copied() == Some(min_load))
            .copied()
            .collect();
        let Some(&chosen) = tied.choose(rng) else {
            continue;
        };

        let Some((date, start, end)) = cursors
            .get_mut(chosen)
            .and_then(|cursor| cursor.take_slot(slot_minutes))
        else {
            // Eligibility already checked can_place, so this only fires if a
            // cursor was drained out from under us.
            warn!("no valid time slot left for {student} with {chosen}");
            unassigned.push(student.clone());
            continue;
        };

        debug!("{student} -> {chosen} at {start}");
        assignment.entry(chosen).or_default().push(student.clone());
        if let Some(minutes) = remaining.get_mut(chosen) {
            *minutes -= slot_minutes;
        }
        if let Some(count) = load.get_mut(chosen) {
            *count += 1;
        }
        slots.push(ScheduledSlot {
            student: student.clone(),
            ta: chosen.to_string(),
            date,
            start,
            end,
        });
    }

    let by_ta = roster
        .tas
        .iter()
        .map(|ta| {
            (
                ta.clone(),
                assignment.remove(ta.as_str()).unwrap_or_default(),
            )
        })
        .collect();

    Schedule {
        by_ta,
        slots,
        unassigned,
    }
}
