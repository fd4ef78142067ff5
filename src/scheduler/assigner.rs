//! Greedy first-fit batch assigner.
//!
//! # Algorithm
//!
//! For each participant group:
//! 1. Walk the grid in fixed order date → slot → room (outer to inner),
//!    restricted to the given room subset.
//! 2. At each cell with `c > 0` seats left, take `min(c, pending)`
//!    participants from the front of the pending sequence.
//! 3. Emit one batch for the cell and one assignment per participant with
//!    seats `1..=n`, then decrement the cell.
//! 4. Stop as soon as the group is exhausted.
//!
//! Participants are never reordered. Batch numbers continue across calls,
//! so consecutive phases of one run share a single numbering.
//!
//! # Complexity
//! O(d * s * r + n) where d=dates, s=slots, r=rooms, n=participants.

use crate::models::{Assignment, Batch, Participant};

use super::grid::CapacityGrid;

/// Fills grid cells from the head of participant groups.
///
/// Owns the batch and assignment accumulators for one run; call
/// [`finish`](Self::finish) to take them.
#[derive(Debug)]
pub struct BatchAssigner<'g, 'a> {
    grid: &'g mut CapacityGrid<'a>,
    batches: Vec<Batch>,
    assignments: Vec<Assignment>,
    next_batch_number: u32,
}

impl<'g, 'a> BatchAssigner<'g, 'a> {
    /// Creates an assigner over a seeded grid. Numbering starts at 1.
    pub fn new(grid: &'g mut CapacityGrid<'a>) -> Self {
        Self {
            grid,
            batches: Vec::new(),
            assignments: Vec::new(),
            next_batch_number: 1,
        }
    }

    /// Read access to the grid.
    pub fn grid(&self) -> &CapacityGrid<'a> {
        self.grid
    }

    /// Batches created so far.
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Places `participants` into cells of the rooms in `room_indices`.
    ///
    /// Returns how many were placed; they are always a prefix of
    /// `participants`.
    pub fn assign_group(&mut self, participants: &[&Participant], room_indices: &[usize]) -> usize {
        let mut cursor = 0;
        if participants.is_empty() || room_indices.is_empty() {
            return 0;
        }

        'grid: for date in 0..self.grid.dates().len() {
            for slot in 0..self.grid.slots().len() {
                for &room in room_indices {
                    if cursor >= participants.len() {
                        break 'grid;
                    }
                    let free = self.grid.remaining(date, slot, room) as usize;
                    if free == 0 {
                        continue;
                    }
                    let size = free.min(participants.len() - cursor);
                    let group = &participants[cursor..cursor + size];
                    self.emit(date, slot, room, group);
                    cursor += size;
                }
            }
        }

        cursor
    }

    fn emit(&mut self, date: usize, slot: usize, room: usize, group: &[&Participant]) {
        let number = self.next_batch_number;
        self.next_batch_number += 1;

        // group.len() <= remaining seats, so the whole group is taken
        let seats = u32::try_from(group.len()).unwrap_or(u32::MAX);
        self.grid.take(date, slot, room, seats);

        let day = self.grid.dates()[date];
        let time = self.grid.slots()[slot];
        let cell = self.grid.rooms()[room];

        for (seat, p) in (1u32..).zip(group) {
            self.assignments.push(Assignment {
                participant_id: p.id,
                batch_number: number,
                seat_no: seat,
                is_accessibility_priority: p.is_accessibility_priority,
                date: day,
                start_time: time.start,
                end_time: time.end,
                room_id: cell.room.id,
                campus: cell.room.campus.clone(),
                building: cell.room.building.clone(),
                room: cell.room.room.clone(),
            });
        }

        tracing::debug!(
            batch = number,
            date = %day,
            slot = %time.label(),
            room = %cell.room.room,
            size = group.len(),
            "created batch"
        );

        self.batches.push(Batch {
            batch_number: number,
            batch_name: format!("Batch {number}"),
            date: day,
            start_time: time.start,
            end_time: time.end,
            room_id: cell.room.id,
            campus: cell.room.campus.clone(),
            building: cell.room.building.clone(),
            room: cell.room.room.clone(),
            room_capacity: cell.capacity,
            is_accessible_room: cell.accessible,
            participant_ids: group.iter().map(|p| p.id).collect(),
            has_accessibility_participant: group.iter().any(|p| p.is_accessibility_priority),
        });
    }

    /// Consumes the assigner, returning its batches and assignments.
    pub fn finish(self) -> (Vec<Batch>, Vec<Assignment>) {
        (self.batches, self.assignments)
    }
}
