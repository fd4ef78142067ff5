//! Two-phase accessibility-first scheduling run.
//!
//! # Algorithm
//!
//! 1. Build the calendar days and daily slots from the configuration.
//! 2. Classify every room once and seed the shared capacity grid with the
//!    rooms of positive capacity.
//! 3. Split the roster into accessibility-priority and regular participants.
//! 4. Phase 1: accessibility participants into accessible rooms only.
//! 5. Fallback: accessibility participants still pending into all rooms.
//!    Accessible rooms are exhausted by then, so this only ever spills into
//!    non-accessible rooms.
//! 6. Phase 2: regular participants into all rooms, using what is left.
//! 7. Aggregate counts and warnings.
//!
//! The grid is never reset between phases.
//!
//! # Failure Policy
//! Every problem is soft. An empty date or slot axis yields a result with
//! everyone unscheduled; insufficient capacity places as many as fit. Both
//! are reported through `warnings` and the unscheduled counts.

use std::collections::HashSet;
use std::sync::Arc;

use crate::classifier::{ClassificationCache, FloorHeuristic, RoomClassifier};
use crate::models::{
    Assignment, Batch, Participant, ParticipantId, Room, ScheduleConfig, ScheduleResult,
};

use super::assigner::BatchAssigner;
use super::grid::{CapacityGrid, GridRoom};
use super::partition::partition;

/// Runs the full accessibility-first allocation for one configuration.
///
/// Stateless between runs: every call builds its own grid and
/// accumulators, so one orchestrator may serve concurrent callers.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use seat_schedule::models::{Participant, Room, ScheduleConfig};
/// use seat_schedule::scheduler::ScheduleOrchestrator;
///
/// let config = ScheduleConfig::single_day(
///     NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
///     60,
/// );
/// let rooms = vec![
///     Room::new(1).with_room("101").with_capacity(1),
///     Room::new(2).with_room("201").with_capacity(2),
/// ];
/// let people = vec![Participant::new(1), Participant::accessible(2), Participant::new(3)];
///
/// let result = ScheduleOrchestrator::new(config).run(&people, &rooms);
/// assert_eq!(result.scheduled_count, 3);
/// assert_eq!(result.batches[0].participant_ids, vec![2]);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleOrchestrator {
    config: ScheduleConfig,
    classifier: Arc<dyn RoomClassifier>,
}

impl ScheduleOrchestrator {
    /// Creates an orchestrator using the default [`FloorHeuristic`].
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            config,
            classifier: Arc::new(FloorHeuristic),
        }
    }

    /// Replaces the room classifier.
    pub fn with_classifier<C: RoomClassifier + 'static>(mut self, classifier: C) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    /// The run configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Schedules `participants` into `rooms`.
    pub fn run(&self, participants: &[Participant], rooms: &[Room]) -> ScheduleResult {
        let cfg = &self.config;
        tracing::info!(
            participants = participants.len(),
            rooms = rooms.len(),
            start_date = %cfg.start_date,
            end_date = %cfg.end_date,
            minutes = cfg.duration_minutes_per_batch,
            prioritize = cfg.prioritize_accessibility,
            "starting schedule run"
        );

        let mut warnings = Warnings::default();

        let (roster, duplicates) = dedupe(participants);
        if !duplicates.is_empty() {
            let ids: Vec<ParticipantId> = duplicates.iter().map(|p| p.id).collect();
            warnings.push(format!(
                "{} duplicate participant ID(s) skipped: {:?}",
                ids.len(),
                ids
            ));
        }
        let prioritize = cfg.prioritize_accessibility;
        let (accessible, regular) = partition(roster.iter().copied(), prioritize);
        // skipped duplicates stay unscheduled in their own class
        let (dup_accessible, dup_regular) = partition(duplicates.iter().copied(), prioritize);

        let dates = cfg.dates();
        let slots = cfg.slots();
        if dates.is_empty() || slots.is_empty() {
            if dates.is_empty() {
                warnings.push(format!(
                    "No scheduling possible: date range {} to {} contains no days",
                    cfg.start_date, cfg.end_date
                ));
            }
            if slots.is_empty() {
                warnings.push(format!(
                    "No scheduling possible: no {}-minute slot fits between {} and {}{}",
                    cfg.duration_minutes_per_batch,
                    cfg.start_time.format("%H:%M"),
                    cfg.end_time.format("%H:%M"),
                    if cfg.exclude_lunch_break { " outside the lunch break" } else { "" }
                ));
            }
            let classes = [
                0,
                accessible.len() + dup_accessible.len(),
                0,
                regular.len() + dup_regular.len(),
            ];
            return aggregate(participants, Vec::new(), Vec::new(), classes, warnings);
        }

        let mut cache = ClassificationCache::new();
        let admitted: Vec<GridRoom<'_>> = rooms
            .iter()
            .filter_map(|room| {
                let is_accessible =
                    cache.classify(self.classifier.as_ref(), &room.building, &room.room);
                GridRoom::new(room, is_accessible)
            })
            .collect();
        tracing::debug!(
            admitted = admitted.len(),
            skipped = rooms.len() - admitted.len(),
            "rooms admitted to grid"
        );

        let mut grid = CapacityGrid::new(dates, slots, admitted);
        let total_seats = grid.total_remaining();
        if grid.rooms().is_empty() {
            warnings.push("No rooms with positive capacity available".to_string());
        } else if roster.len() as u64 > total_seats {
            warnings.push(format!(
                "Insufficient capacity: {} participants but only {} seats across \
                 {} day(s), {} slot(s) and {} room(s); {} cannot be scheduled",
                roster.len(),
                total_seats,
                grid.dates().len(),
                grid.slots().len(),
                grid.rooms().len(),
                roster.len() as u64 - total_seats
            ));
        }

        let accessible_rooms = grid.accessible_rooms();
        let all_rooms = grid.all_rooms();
        if !accessible.is_empty() && accessible_rooms.is_empty() && !all_rooms.is_empty() {
            warnings.push(format!(
                "No accessible rooms found; {} accessibility-priority participant(s) \
                 will be seated in other rooms",
                accessible.len()
            ));
        }

        let mut assigner = BatchAssigner::new(&mut grid);
        let phase1 = assigner.assign_group(&accessible, &accessible_rooms);
        let spilled = assigner.assign_group(&accessible[phase1..], &all_rooms);
        if spilled > 0 && !accessible_rooms.is_empty() {
            warnings.push(format!(
                "{spilled} accessibility-priority participant(s) seated in \
                 non-accessible rooms after accessible capacity ran out"
            ));
        }
        let phase2 = assigner.assign_group(&regular, &all_rooms);
        let (batches, assignments) = assigner.finish();

        tracing::debug!(phase1, spilled, phase2, "phases complete");

        let placed_accessible = phase1 + spilled;
        aggregate(
            participants,
            batches,
            assignments,
            [
                placed_accessible,
                accessible.len() - placed_accessible + dup_accessible.len(),
                phase2,
                regular.len() - phase2 + dup_regular.len(),
            ],
            warnings,
        )
    }
}

/// Convenience wrapper: runs a default orchestrator once.
pub fn schedule(
    config: &ScheduleConfig,
    participants: &[Participant],
    rooms: &[Room],
) -> ScheduleResult {
    ScheduleOrchestrator::new(config.clone()).run(participants, rooms)
}

#[derive(Debug, Default)]
struct Warnings(Vec<String>);

impl Warnings {
    fn push(&mut self, message: String) {
        tracing::warn!("{message}");
        self.0.push(message);
    }
}

/// Keeps the first occurrence of every participant ID; later ones are returned apart.
fn dedupe(participants: &[Participant]) -> (Vec<&Participant>, Vec<&Participant>) {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(participants.len());
    let mut duplicates = Vec::new();
    for p in participants {
        if seen.insert(p.id) {
            unique.push(p);
        } else {
            duplicates.push(p);
        }
    }
    (unique, duplicates)
}

/// Builds the result; `classes` is `[acc_sched, acc_unsched, reg_sched, reg_unsched]`.
fn aggregate(
    participants: &[Participant],
    batches: Vec<Batch>,
    assignments: Vec<Assignment>,
    classes: [usize; 4],
    mut warnings: Warnings,
) -> ScheduleResult {
    let scheduled: HashSet<ParticipantId> = assignments.iter().map(|a| a.participant_id).collect();

    let mut seen = HashSet::new();
    let unscheduled_participant_ids: Vec<ParticipantId> = participants
        .iter()
        .filter(|p| !seen.insert(p.id) || !scheduled.contains(&p.id))
        .map(|p| p.id)
        .collect();

    let unscheduled_count = participants.len() - scheduled.len();
    if unscheduled_count > 0 {
        warnings.push(format!("{unscheduled_count} participants not scheduled"));
    }

    tracing::info!(
        batches = batches.len(),
        assignments = assignments.len(),
        scheduled = scheduled.len(),
        unscheduled = unscheduled_count,
        "schedule run complete"
    );

    ScheduleResult {
        total_batches: batches.len(),
        scheduled_count: scheduled.len(),
        unscheduled_count,
        accessible_scheduled: classes[0],
        accessible_unscheduled: classes[1],
        regular_scheduled: classes[2],
        regular_unscheduled: classes[3],
        unscheduled_participant_ids,
        batches,
        assignments,
        warnings: warnings.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn one_slot() -> ScheduleConfig {
        ScheduleConfig::single_day(day(2), t(9, 0), t(10, 0), 60)
    }

    #[test]
    fn test_accessible_first_scenario() {
        let rooms = vec![
            Room::new(1).with_building("Main").with_room("101").with_capacity(1),
            Room::new(2).with_building("Main").with_room("201").with_capacity(2),
        ];
        let people = vec![Participant::new(1), Participant::accessible(2), Participant::new(3)];

        let r = ScheduleOrchestrator::new(one_slot()).run(&people, &rooms);

        assert_eq!(r.total_batches, 2);
        assert_eq!(r.batches[0].batch_number, 1);
        assert_eq!(r.batches[0].room_id, 1);
        assert_eq!(r.batches[0].participant_ids, vec![2]);
        assert!(r.batches[0].has_accessibility_participant);
        assert_eq!(r.batches[1].batch_number, 2);
        assert_eq!(r.batches[1].room_id, 2);
        assert_eq!(r.batches[1].participant_ids, vec![1, 3]);
        assert_eq!(r.scheduled_count, 3);
        assert_eq!(r.unscheduled_count, 0);
        assert_eq!((r.accessible_scheduled, r.accessible_unscheduled), (1, 0));
        assert_eq!((r.regular_scheduled, r.regular_unscheduled), (2, 0));
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn test_prioritization_disabled_keeps_input_order() {
        let rooms = vec![
            Room::new(1).with_room("101").with_capacity(1),
            Room::new(2).with_room("201").with_capacity(2),
        ];
        let people = vec![Participant::new(1), Participant::accessible(2), Participant::new(3)];
        let cfg = one_slot().with_prioritize_accessibility(false);

        let r = ScheduleOrchestrator::new(cfg).run(&people, &rooms);
        assert_eq!(r.batches[0].participant_ids, vec![1]);
        assert_eq!(r.batches[1].participant_ids, vec![2, 3]);
        assert_eq!(r.accessible_scheduled, 0);
        assert_eq!(r.regular_scheduled, 3);
    }

    #[test]
    fn test_spill_into_non_accessible_rooms() {
        let rooms = vec![
            Room::new(1).with_room("301").with_capacity(3),
            Room::new(2).with_room("101").with_capacity(1),
        ];
        let people = vec![
            Participant::accessible(1),
            Participant::accessible(2),
            Participant::new(3),
        ];

        let r = ScheduleOrchestrator::new(one_slot()).run(&people, &rooms);
        // phase 1: #1 into 101; fallback: #2 into 301; phase 2: #3 joins 301 in a new batch
        assert_eq!(r.batches.len(), 3);
        assert_eq!((r.batches[0].room_id, r.batches[0].participant_ids.clone()), (2, vec![1]));
        assert_eq!((r.batches[1].room_id, r.batches[1].participant_ids.clone()), (1, vec![2]));
        assert_eq!((r.batches[2].room_id, r.batches[2].participant_ids.clone()), (1, vec![3]));
        assert_eq!(r.accessible_scheduled, 2);
        assert!(r.warnings.iter().any(|w| w.contains("non-accessible rooms")));
    }

    #[test]
    fn test_no_accessible_rooms_warning() {
        let rooms = vec![Room::new(1).with_room("301").with_capacity(3)];
        let people = vec![Participant::accessible(1), Participant::new(2)];
        let r = ScheduleOrchestrator::new(one_slot()).run(&people, &rooms);
        assert_eq!(r.scheduled_count, 2);
        assert!(r.warnings.iter().any(|w| w.starts_with("No accessible rooms found")));
        assert!(!r.warnings.iter().any(|w| w.contains("after accessible capacity ran out")));
    }

    #[test]
    fn test_empty_slots_reports_everyone_unscheduled() {
        let cfg = ScheduleConfig::single_day(day(2), t(11, 30), t(13, 30), 60)
            .with_lunch_break(t(12, 0), t(13, 0));
        let rooms = vec![Room::new(1).with_room("101").with_capacity(10)];
        let people = vec![Participant::accessible(1), Participant::new(2)];

        let r = ScheduleOrchestrator::new(cfg).run(&people, &rooms);
        assert!(r.batches.is_empty());
        assert!(r.assignments.is_empty());
        assert_eq!(r.unscheduled_count, 2);
        assert_eq!(r.unscheduled_participant_ids, vec![1, 2]);
        assert_eq!((r.accessible_unscheduled, r.regular_unscheduled), (1, 1));
        assert!(r.warnings[0].starts_with("No scheduling possible"));
        assert_eq!(r.warnings.last().unwrap(), "2 participants not scheduled");
    }

    #[test]
    fn test_reversed_dates_reports_everyone_unscheduled() {
        let cfg = ScheduleConfig::new(day(5), day(4), t(9, 0), t(12, 0), 60);
        let rooms = vec![Room::new(1).with_room("101").with_capacity(10)];
        let people = vec![Participant::new(1)];

        let r = ScheduleOrchestrator::new(cfg).run(&people, &rooms);
        assert_eq!(r.unscheduled_count, 1);
        assert!(r.warnings[0].contains("contains no days"));
    }

    #[test]
    fn test_capacity_shortfall_is_soft() {
        let rooms = vec![Room::new(1).with_room("201").with_capacity(2)];
        let people: Vec<Participant> = (1..=5).map(Participant::new).collect();

        let r = ScheduleOrchestrator::new(one_slot()).run(&people, &rooms);
        assert_eq!(r.scheduled_count, 2);
        assert_eq!(r.unscheduled_count, 3);
        assert_eq!(r.unscheduled_participant_ids, vec![3, 4, 5]);
        assert!(r.warnings[0]
            .starts_with("Insufficient capacity: 5 participants but only 2 seats"));
        assert!(r.warnings.contains(&"3 participants not scheduled".to_string()));
    }

    #[test]
    fn test_no_usable_rooms() {
        let rooms = vec![Room::new(1).with_room("101").with_capacity(0)];
        let people = vec![Participant::new(1)];
        let r = ScheduleOrchestrator::new(one_slot()).run(&people, &rooms);
        assert!(r.batches.is_empty());
        assert_eq!(r.unscheduled_count, 1);
        assert_eq!(r.warnings[0], "No rooms with positive capacity available");
    }

    #[test]
    fn test_duplicate_ids_are_placed_once() {
        let rooms = vec![Room::new(1).with_room("201").with_capacity(5)];
        let people = vec![Participant::new(1), Participant::new(2), Participant::new(1)];

        let r = ScheduleOrchestrator::new(one_slot()).run(&people, &rooms);
        assert_eq!(r.assignments.len(), 2);
        assert_eq!(r.scheduled_count, 2);
        assert_eq!(r.unscheduled_count, 1);
        assert_eq!(r.unscheduled_participant_ids, vec![1]);
        assert!(r.warnings[0].starts_with("1 duplicate participant ID(s) skipped"));
        assert_eq!((r.regular_scheduled, r.regular_unscheduled), (2, 1));
    }

    #[test]
    fn test_duplicate_ids_count_in_their_class() {
        let rooms = vec![Room::new(1).with_room("101").with_capacity(5)];
        let people = vec![
            Participant::accessible(1),
            Participant::accessible(1),
            Participant::new(2),
        ];

        let r = ScheduleOrchestrator::new(one_slot()).run(&people, &rooms);
        assert_eq!(r.scheduled_count, 2);
        assert_eq!(r.unscheduled_count, 1);
        assert_eq!((r.accessible_scheduled, r.accessible_unscheduled), (1, 1));
        assert_eq!((r.regular_scheduled, r.regular_unscheduled), (1, 0));
        assert_eq!(
            r.accessible_unscheduled + r.regular_unscheduled,
            r.unscheduled_count
        );

        // an empty calendar still counts the duplicate in its class
        let empty = ScheduleConfig::new(day(5), day(4), t(9, 0), t(10, 0), 60);
        let r = ScheduleOrchestrator::new(empty).run(&people, &rooms);
        assert_eq!(r.unscheduled_count, 3);
        assert_eq!((r.accessible_unscheduled, r.regular_unscheduled), (2, 1));
    }

    #[test]
    fn test_long_range_small_roster() {
        let cfg = ScheduleConfig::new(
            day(2),
            NaiveDate::from_ymd_opt(2035, 6, 1).unwrap(),
            t(0, 0),
            t(23, 55),
            5,
        );
        let rooms: Vec<Room> = (1..=100)
            .map(|id| Room::new(id).with_room("201").with_capacity(30))
            .collect();
        let people = vec![Participant::new(1)];

        let r = ScheduleOrchestrator::new(cfg).run(&people, &rooms);
        assert_eq!(r.scheduled_count, 1);
        assert_eq!(r.batches.len(), 1);
        assert_eq!(r.batches[0].date, day(2));
        assert!(r.warnings.is_empty());
    }

    #[derive(Debug)]
    struct EverythingAccessible;

    impl RoomClassifier for EverythingAccessible {
        fn name(&self) -> &'static str {
            "ALL"
        }

        fn classify(&self, _building: &str, _room: &str) -> bool {
            true
        }
    }

    #[test]
    fn test_custom_classifier() {
        let rooms = vec![Room::new(1).with_room("301").with_capacity(1)];
        let people = vec![Participant::accessible(1)];
        let r = ScheduleOrchestrator::new(one_slot())
            .with_classifier(EverythingAccessible)
            .run(&people, &rooms);
        assert!(r.batches[0].is_accessible_room);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn test_schedule_wrapper_matches_orchestrator() {
        let rooms = vec![Room::new(1).with_room("101").with_capacity(2)];
        let people = vec![Participant::new(1), Participant::accessible(2)];
        let cfg = one_slot();
        assert_eq!(
            schedule(&cfg, &people, &rooms),
            ScheduleOrchestrator::new(cfg.clone()).run(&people, &rooms)
        );
    }
}
