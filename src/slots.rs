//! Slot derivation from availability data.
//!
//! Turns raw availability windows into a canonical, deduplicated,
//! time-ordered list of fixed-duration shift slots per poll date.
//!
//! # Algorithm
//!
//! 1. Per date, determine the working window: an explicit [`DayRange`]
//!    override wins; otherwise scan normal availability intervals whose
//!    start date matches, taking min start / max end. If-needed windows
//!    never widen the day.
//! 2. A date without any bound contributes zero slots.
//! 3. Walk from the window start in `shift_duration_minutes` steps; the
//!    last slot is clipped to the window end, so it may be shorter.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;

use crate::error::ModelError;
use crate::models::{DayRange, Participant, TimeSlot};

/// The derived slot axis of one optimization run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotPlan {
    /// Chronological slots per poll date; dates without availability map
    /// to an empty list.
    pub by_day: BTreeMap<NaiveDate, Vec<TimeSlot>>,
    /// All slots, deduplicated by value and globally time-sorted.
    pub all_slots: Vec<TimeSlot>,
}

impl SlotPlan {
    /// Slots for a given date (empty when the date has none).
    pub fn slots_for(&self, date: NaiveDate) -> &[TimeSlot] {
        self.by_day.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of unique slots.
    pub fn slot_count(&self) -> usize {
        self.all_slots.len()
    }
}

/// Derives candidate shift slots for every poll date.
///
/// `day_ranges` optionally overrides the derived working window per date
/// (ingestion services that publish explicit daily bounds use this).
///
/// # Errors
/// `ModelError::ZeroShiftDuration` when `shift_duration_minutes == 0`;
/// a zero step would never terminate the walk.
pub fn build_day_slots(
    participants: &[Participant],
    poll_dates: &[NaiveDate],
    shift_duration_minutes: u32,
    day_ranges: Option<&BTreeMap<NaiveDate, DayRange>>,
) -> Result<SlotPlan, ModelError> {
    if shift_duration_minutes == 0 {
        return Err(ModelError::ZeroShiftDuration);
    }
    let step = Duration::minutes(i64::from(shift_duration_minutes));

    let mut by_day = BTreeMap::new();
    let mut unique: BTreeSet<TimeSlot> = BTreeSet::new();

    for &date in poll_dates {
        let bounds = match day_ranges.and_then(|m| m.get(&date)) {
            Some(range) => Some((range.start, range.end)),
            None => derive_day_bounds(participants, date),
        };

        let slots = match bounds {
            Some((day_min, day_max)) => walk_slots(day_min, day_max, step),
            None => Vec::new(),
        };
        debug!("date {date}: {} slots", slots.len());

        unique.extend(slots.iter().copied());
        by_day.insert(date, slots);
    }

    Ok(SlotPlan {
        by_day,
        all_slots: unique.into_iter().collect(),
    })
}

/// Min start / max end over normal availability intervals on `date`.
///
/// Only normal availability defines the working window; if-needed time
/// outside it is never sliced into slots.
fn derive_day_bounds(
    participants: &[Participant],
    date: NaiveDate,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let mut day_min: Option<NaiveDateTime> = None;
    let mut day_max: Option<NaiveDateTime> = None;

    for p in participants {
        for iv in &p.availabilities {
            if iv.date() != date {
                continue;
            }
            day_min = Some(day_min.map_or(iv.start, |m| m.min(iv.start)));
            day_max = Some(day_max.map_or(iv.end, |m| m.max(iv.end)));
        }
    }

    day_min.zip(day_max)
}

/// Emits slots from `day_min` to `day_max`, clipping the final one.
fn walk_slots(day_min: NaiveDateTime, day_max: NaiveDateTime, step: Duration) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    let mut current = day_min;
    while current < day_max {
        let end = (current + step).min(day_max);
        // current < end by loop guard, so construction cannot fail.
        if let Ok(slot) = TimeSlot::new(current, end) {
            slots.push(slot);
        }
        current = end;
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Interval;

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn person(name: &str, windows: &[(u32, u32, u32, u32, u32)]) -> Participant {
        let mut p = Participant::new(name).unwrap();
        for &(d, h1, m1, h2, m2) in windows {
            p = p.with_availability(Interval::new(dt(d, h1, m1), dt(d, h2, m2)).unwrap());
        }
        p
    }

    #[test]
    fn test_uniform_slots() {
        let people = vec![person("Anna", &[(1, 9, 0, 11, 0)])];
        let plan = build_day_slots(&people, &[date(1)], 30, None).unwrap();

        let slots = plan.slots_for(date(1));
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].start, dt(1, 9, 0));
        assert_eq!(slots[3].end, dt(1, 11, 0));
        for s in slots {
            assert_eq!(s.duration_minutes(), 30);
        }
    }

    #[test]
    fn test_final_slot_clipped() {
        // 09:00–10:45 with 30-minute shifts: last slot is 10:30–10:45.
        let people = vec![person("Anna", &[(1, 9, 0, 10, 45)])];
        let plan = build_day_slots(&people, &[date(1)], 30, None).unwrap();

        let slots = plan.slots_for(date(1));
        assert_eq!(slots.len(), 4);
        let last = slots.last().unwrap();
        assert_eq!(last.start, dt(1, 10, 30));
        assert_eq!(last.end, dt(1, 10, 45));
        assert_eq!(last.duration_minutes(), 15);
        for s in &slots[..3] {
            assert_eq!(s.duration_minutes(), 30);
        }
    }

    #[test]
    fn test_bounds_span_participants() {
        // Day window is the union hull of everyone's normal availability.
        let people = vec![
            person("Anna", &[(1, 9, 0, 10, 0)]),
            person("Jan", &[(1, 11, 0, 12, 0)]),
        ];
        let plan = build_day_slots(&people, &[date(1)], 60, None).unwrap();

        let slots = plan.slots_for(date(1));
        assert_eq!(slots.first().unwrap().start, dt(1, 9, 0));
        assert_eq!(slots.last().unwrap().end, dt(1, 12, 0));
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn test_date_without_availability_yields_no_slots() {
        let people = vec![person("Anna", &[(1, 9, 0, 10, 0)])];
        let plan = build_day_slots(&people, &[date(1), date(2)], 30, None).unwrap();

        assert_eq!(plan.slots_for(date(1)).len(), 2);
        assert!(plan.slots_for(date(2)).is_empty());
        assert!(plan.by_day.contains_key(&date(2)));
        assert_eq!(plan.slot_count(), 2);
    }

    #[test]
    fn test_if_needed_does_not_widen_day() {
        let mut p = person("Anna", &[(1, 9, 0, 10, 0)]);
        p = p.with_if_needed(Interval::new(dt(1, 7, 0), dt(1, 12, 0)).unwrap());

        let plan = build_day_slots(&[p], &[date(1)], 30, None).unwrap();
        let slots = plan.slots_for(date(1));
        assert_eq!(slots.first().unwrap().start, dt(1, 9, 0));
        assert_eq!(slots.last().unwrap().end, dt(1, 10, 0));
    }

    #[test]
    fn test_day_range_override_wins() {
        let people = vec![person("Anna", &[(1, 9, 0, 10, 0)])];
        let mut ranges = BTreeMap::new();
        ranges.insert(
            date(1),
            DayRange::new(dt(1, 8, 0), dt(1, 12, 0)).unwrap(),
        );

        let plan = build_day_slots(&people, &[date(1)], 60, Some(&ranges)).unwrap();
        let slots = plan.slots_for(date(1));
        assert_eq!(slots.first().unwrap().start, dt(1, 8, 0));
        assert_eq!(slots.last().unwrap().end, dt(1, 12, 0));
        assert_eq!(slots.len(), 4);
    }

    #[test]
    fn test_all_slots_sorted_and_deduplicated() {
        let people = vec![
            person("Anna", &[(2, 9, 0, 10, 0)]),
            person("Jan", &[(1, 9, 0, 10, 0)]),
        ];
        let plan = build_day_slots(&people, &[date(2), date(1)], 30, None).unwrap();

        assert_eq!(plan.slot_count(), 4);
        let starts: Vec<_> = plan.all_slots.iter().map(|s| s.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let people = vec![person("Anna", &[(1, 9, 0, 10, 0)])];
        let err = build_day_slots(&people, &[date(1)], 0, None).unwrap_err();
        assert_eq!(err, ModelError::ZeroShiftDuration);
    }

    #[test]
    fn test_empty_inputs() {
        let plan = build_day_slots(&[], &[date(1)], 30, None).unwrap();
        assert!(plan.slots_for(date(1)).is_empty());
        assert_eq!(plan.slot_count(), 0);

        let plan = build_day_slots(&[person("Anna", &[(1, 9, 0, 10, 0)])], &[], 30, None).unwrap();
        assert_eq!(plan.slot_count(), 0);
    }
}
