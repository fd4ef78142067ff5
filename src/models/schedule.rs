//! Schedule (solution) model.
//!
//! A schedule run produces batches (occupied date × slot × room cells) and
//! seat assignments (one per placed participant), together with counts and
//! human-readable warnings for anything that could not be placed.
//!
//! # Invariants
//! - A participant ID appears in at most one assignment.
//! - A batch never holds more participants than its room's capacity.
//! - Batch numbers start at 1 and increase by one per created batch.
//! - Seat numbers within a batch are exactly `1..=participant_count`.
//! - `scheduled_count + unscheduled_count` equals the input roster size.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::calendar::{CalendarDay, TimeSlot};
use super::config::hhmm;
use super::{ParticipantId, RoomId};

/// One occupied (date, slot, room) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    /// Sequential batch number (1-based, unique across the run).
    pub batch_number: u32,
    /// Display name, `"Batch {n}"`.
    pub batch_name: String,
    /// Calendar day.
    pub date: CalendarDay,
    /// Slot start.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Slot end.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Room identifier.
    pub room_id: RoomId,
    /// Campus of the room.
    pub campus: String,
    /// Building of the room.
    pub building: String,
    /// Room name.
    pub room: String,
    /// Declared room capacity.
    pub room_capacity: u32,
    /// Whether the room was classified as accessible (ground/first floor).
    pub is_accessible_room: bool,
    /// Placed participants in seat order.
    pub participant_ids: Vec<ParticipantId>,
    /// At least one placed participant needs accessibility seating.
    pub has_accessibility_participant: bool,
}

impl Batch {
    /// Number of seated participants.
    #[inline]
    pub fn participant_count(&self) -> usize {
        self.participant_ids.len()
    }

    /// The time slot of this batch.
    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start_time, self.end_time)
    }

    /// Slot label, e.g. `"09:00 - 10:00"`.
    pub fn time_slot(&self) -> String {
        self.slot().label()
    }

    /// Seats left unused in this batch.
    pub fn free_seats(&self) -> usize {
        (self.room_capacity as usize).saturating_sub(self.participant_count())
    }
}

/// One participant's seat.
///
/// Room, slot and date fields are denormalized from the owning batch for
/// storage convenience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Seated participant.
    pub participant_id: ParticipantId,
    /// Owning batch number.
    pub batch_number: u32,
    /// Seat number within the batch (1-based).
    pub seat_no: u32,
    /// Participant's accessibility flag.
    pub is_accessibility_priority: bool,
    /// Calendar day.
    pub date: CalendarDay,
    /// Slot start.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Slot end.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Room identifier.
    pub room_id: RoomId,
    /// Campus of the room.
    pub campus: String,
    /// Building of the room.
    pub building: String,
    /// Room name.
    pub room: String,
}

impl Assignment {
    /// Slot label, e.g. `"09:00 - 10:00"`.
    pub fn time_slot(&self) -> String {
        TimeSlot::new(self.start_time, self.end_time).label()
    }
}

/// Full outcome of one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    /// Created batches in creation order.
    pub batches: Vec<Batch>,
    /// Seat assignments in creation order.
    pub assignments: Vec<Assignment>,
    /// Distinct participants placed.
    pub scheduled_count: usize,
    /// Input participants not placed.
    pub unscheduled_count: usize,
    /// Number of batches.
    pub total_batches: usize,
    /// Accessibility-priority participants placed.
    pub accessible_scheduled: usize,
    /// Accessibility-priority participants not placed.
    pub accessible_unscheduled: usize,
    /// Regular participants placed.
    pub regular_scheduled: usize,
    /// Regular participants not placed.
    pub regular_unscheduled: usize,
    /// Participants left unplaced, in input order.
    pub unscheduled_participant_ids: Vec<ParticipantId>,
    /// Soft-failure notes.
    pub warnings: Vec<String>,
}

impl ScheduleResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every input participant was placed.
    pub fn is_complete(&self) -> bool {
        self.unscheduled_count == 0
    }

    /// Finds a batch by number.
    pub fn batch(&self, batch_number: u32) -> Option<&Batch> {
        self.batches.iter().find(|b| b.batch_number == batch_number)
    }

    /// Finds the assignment of a participant.
    pub fn assignment_for_participant(&self, id: ParticipantId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.participant_id == id)
    }

    /// Returns all assignments of one batch, in seat order.
    pub fn assignments_for_batch(&self, batch_number: u32) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.batch_number == batch_number)
            .collect()
    }

    /// Returns all batches held in one room.
    pub fn batches_for_room(&self, room_id: RoomId) -> Vec<&Batch> {
        self.batches.iter().filter(|b| b.room_id == room_id).collect()
    }

    /// Whether a participant received a seat.
    pub fn is_scheduled(&self, id: ParticipantId) -> bool {
        self.assignment_for_participant(id).is_some()
    }
}
