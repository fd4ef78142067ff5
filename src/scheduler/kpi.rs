//! Schedule quality metrics (KPIs).
//!
//! Computes seat and room indicators from a completed schedule and the
//! rooms and configuration it was built from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Seats | Σ positive room capacity × slots per day × days |
//! | Seats Used | Number of assignments |
//! | Seat Utilization | Seats Used / Total Seats |
//! | Room Utilization | Seats used in a room / (capacity × slots × days) |
//! | Accessible Placement Rate | Accessibility seats in accessible rooms / accessibility seats |
//! | Batches by Date | Batch count per calendar day |
//!
//! Rooms with non-positive capacity contribute no seats and are omitted from
//! the per-room map.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::classifier::{FloorHeuristic, RoomClassifier};
use crate::models::{CalendarDay, Room, RoomId, ScheduleConfig, ScheduleResult};

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Seats offered over the whole run.
    pub total_seats: u64,
    /// Seats actually assigned.
    pub seats_used: u64,
    /// Fraction of offered seats used (0.0..1.0).
    pub seat_utilization: f64,
    /// Per-room utilization (0.0..1.0).
    pub utilization_by_room: HashMap<RoomId, f64>,
    /// Rooms classified as accessible.
    pub accessible_room_count: usize,
    /// Fraction of placed accessibility participants seated in accessible
    /// rooms (1.0 when none were placed).
    pub accessible_placement_rate: f64,
    /// Batches created per calendar day.
    pub batches_by_date: BTreeMap<CalendarDay, usize>,
    /// Mean participants per batch.
    pub avg_batch_size: f64,
}

impl ScheduleKpi {
    /// Computes KPIs with the default room classifier.
    pub fn calculate(result: &ScheduleResult, rooms: &[Room], config: &ScheduleConfig) -> Self {
        Self::calculate_with(result, rooms, config, &FloorHeuristic)
    }

    /// Computes KPIs, counting accessible rooms with `classifier`.
    pub fn calculate_with(
        result: &ScheduleResult,
        rooms: &[Room],
        config: &ScheduleConfig,
        classifier: &dyn RoomClassifier,
    ) -> Self {
        let cells_per_room = (config.dates().len() * config.slots().len()) as u64;

        let mut used_by_room: HashMap<RoomId, u64> = HashMap::new();
        for a in &result.assignments {
            *used_by_room.entry(a.room_id).or_default() += 1;
        }

        let mut total_seats = 0u64;
        let mut utilization_by_room = HashMap::new();
        for room in rooms.iter().filter(|r| r.is_usable()) {
            let offered = room.capacity as u64 * cells_per_room;
            total_seats += offered;
            let used = used_by_room.get(&room.id).copied().unwrap_or(0);
            utilization_by_room.insert(room.id, ratio(used, offered));
        }

        let accessible_room_count = rooms
            .iter()
            .filter(|r| r.is_usable() && classifier.classify(&r.building, &r.room))
            .count();

        let accessible_batches: HashSet<u32> = result
            .batches
            .iter()
            .filter(|b| b.is_accessible_room)
            .map(|b| b.batch_number)
            .collect();
        let (placed, well_placed) = result
            .assignments
            .iter()
            .filter(|a| a.is_accessibility_priority)
            .fold((0u64, 0u64), |(n, ok), a| {
                (n + 1, ok + u64::from(accessible_batches.contains(&a.batch_number)))
            });
        let accessible_placement_rate = if placed == 0 {
            1.0
        } else {
            ratio(well_placed, placed)
        };

        let mut batches_by_date = BTreeMap::new();
        for b in &result.batches {
            *batches_by_date.entry(b.date).or_insert(0) += 1;
        }

        let seats_used = result.assignments.len() as u64;
        let avg_batch_size = if result.batches.is_empty() {
            0.0
        } else {
            seats_used as f64 / result.batches.len() as f64
        };

        Self {
            total_seats,
            seats_used,
            seat_utilization: ratio(seats_used, total_seats),
            utilization_by_room,
            accessible_room_count,
            accessible_placement_rate,
            batches_by_date,
            avg_batch_size,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_utilization: f64, min_accessible_rate: f64) -> bool {
        self.seat_utilization >= min_utilization
            && self.accessible_placement_rate >= min_accessible_rate
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;
    use crate::scheduler::schedule;
    use chrono::{NaiveDate, NaiveTime};

    fn config(days: u32) -> ScheduleConfig {
        ScheduleConfig::new(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1 + days).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            60,
        )
    }

    #[test]
    fn test_kpi_basic() {
        let rooms = vec![
            Room::new(1).with_room("101").with_capacity(2),
            Room::new(2).with_room("201").with_capacity(3),
            Room::new(3).with_room("301").with_capacity(0),
        ];
        let people = vec![
            Participant::accessible(1),
            Participant::new(2),
            Participant::new(3),
            Participant::new(4),
        ];
        let cfg = config(1);
        let result = schedule(&cfg, &people, &rooms);

        let kpi = ScheduleKpi::calculate(&result, &rooms, &cfg);
        // 2 slots x (2 + 3) seats
        assert_eq!(kpi.total_seats, 10);
        assert_eq!(kpi.seats_used, 4);
        assert!((kpi.seat_utilization - 0.4).abs() < 1e-10);
        assert_eq!(kpi.utilization_by_room.len(), 2);
        assert!((kpi.utilization_by_room[&1] - 0.5).abs() < 1e-10);
        assert!((kpi.utilization_by_room[&2] - 2.0 / 6.0).abs() < 1e-10);
        assert_eq!(kpi.accessible_room_count, 1);
        assert!((kpi.accessible_placement_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.batches_by_date.values().sum::<usize>(), result.total_batches);
        assert!((kpi.avg_batch_size - 4.0 / result.total_batches as f64).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let cfg = config(2);
        let kpi = ScheduleKpi::calculate(&ScheduleResult::new(), &[], &cfg);
        assert_eq!(kpi.total_seats, 0);
        assert_eq!(kpi.seat_utilization, 0.0);
        assert_eq!(kpi.accessible_placement_rate, 1.0);
        assert_eq!(kpi.avg_batch_size, 0.0);
        assert!(kpi.batches_by_date.is_empty());
    }

    #[test]
    fn test_kpi_multi_day() {
        let rooms = vec![Room::new(1).with_room("201").with_capacity(1)];
        let people: Vec<Participant> = (1..=3).map(Participant::new).collect();
        let cfg = config(2);
        let result = schedule(&cfg, &people, &rooms);

        let kpi = ScheduleKpi::calculate(&result, &rooms, &cfg);
        assert_eq!(kpi.total_seats, 4);
        let per_day: Vec<usize> = kpi.batches_by_date.values().copied().collect();
        assert_eq!(per_day, vec![2, 1]);
    }

    #[test]
    fn test_meets_thresholds() {
        let rooms = vec![Room::new(1).with_room("201").with_capacity(2)];
        let people = vec![Participant::accessible(1), Participant::new(2)];
        let cfg = config(1);
        let result = schedule(&cfg, &people, &rooms);
        let kpi = ScheduleKpi::calculate(&result, &rooms, &cfg);

        // 2 of 4 seats used, accessible participant placed in a fallback room
        assert_eq!(kpi.accessible_placement_rate, 0.0);
        assert!(kpi.meets_thresholds(0.5, 0.0));
        assert!(!kpi.meets_thresholds(0.6, 0.0));
        assert!(!kpi.meets_thresholds(0.5, 1.0));
    }
}
