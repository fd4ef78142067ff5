//! Remaining-capacity grid over (date, slot, room) cells.
//!
//! The grid is seeded from each room's declared capacity and is mutated in
//! place as batches are created. It is shared by every phase of one run so
//! later phases only see what earlier phases left over.
//!
//! # Layout
//! Only touched cells are stored, keyed by `(date, slot, room)` index. An
//! untouched cell implicitly holds its room's full capacity, so memory
//! grows with the number of batches, not with the size of the calendar.
//! Rooms with non-positive capacity never enter the grid.
//!
//! # Complexity
//! `remaining` and `take` are O(1). `total_remaining` is O(r + t) where
//! r=rooms and t=touched cells.

use std::collections::HashMap;

use crate::models::{CalendarDay, Room, TimeSlot};

/// A room admitted to the grid.
#[derive(Debug, Clone, Copy)]
pub struct GridRoom<'a> {
    /// Source room.
    pub room: &'a Room,
    /// Seats per cell.
    pub capacity: u32,
    /// Accessibility classification of the room.
    pub accessible: bool,
}

impl<'a> GridRoom<'a> {
    /// Admits a room; returns `None` when its capacity is not positive.
    pub fn new(room: &'a Room, accessible: bool) -> Option<Self> {
        if room.capacity <= 0 {
            return None;
        }
        let capacity = u32::try_from(room.capacity).unwrap_or(u32::MAX);
        Some(Self {
            room,
            capacity,
            accessible,
        })
    }
}

type Cell = (usize, usize, usize);

/// Remaining seats per (date, slot, room) cell.
#[derive(Debug, Clone)]
pub struct CapacityGrid<'a> {
    dates: Vec<CalendarDay>,
    slots: Vec<TimeSlot>,
    rooms: Vec<GridRoom<'a>>,
    touched: HashMap<Cell, u32>,
}

impl<'a> CapacityGrid<'a> {
    /// Seeds the grid with every room at full capacity in every cell.
    pub fn new(dates: Vec<CalendarDay>, slots: Vec<TimeSlot>, rooms: Vec<GridRoom<'a>>) -> Self {
        let rooms = rooms.into_iter().filter(|r| r.capacity > 0).collect();
        Self {
            dates,
            slots,
            rooms,
            touched: HashMap::new(),
        }
    }

    /// Calendar days (outer axis).
    pub fn dates(&self) -> &[CalendarDay] {
        &self.dates
    }

    /// Daily slots (middle axis).
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Admitted rooms (inner axis).
    pub fn rooms(&self) -> &[GridRoom<'a>] {
        &self.rooms
    }

    /// Whether the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.slots.is_empty() || self.rooms.is_empty()
    }

    /// Number of (date, slot, room) cells.
    pub fn cell_count(&self) -> usize {
        self.dates
            .len()
            .saturating_mul(self.slots.len())
            .saturating_mul(self.rooms.len())
    }

    /// Number of cells that have had seats taken.
    pub fn touched_cells(&self) -> usize {
        self.touched.len()
    }

    /// Remaining seats in one cell.
    pub fn remaining(&self, date: usize, slot: usize, room: usize) -> u32 {
        self.touched
            .get(&(date, slot, room))
            .copied()
            .unwrap_or(self.rooms[room].capacity)
    }

    /// Consumes up to `seats` in one cell; returns the number actually taken.
    pub fn take(&mut self, date: usize, slot: usize, room: usize, seats: u32) -> u32 {
        let full = self.rooms[room].capacity;
        let left = self.touched.entry((date, slot, room)).or_insert(full);
        let taken = seats.min(*left);
        *left -= taken;
        taken
    }

    /// Sum of remaining seats over all cells.
    pub fn total_remaining(&self) -> u64 {
        let all: Vec<usize> = self.all_rooms();
        self.remaining_in(&all)
    }

    /// Sum of remaining seats over cells of the selected rooms.
    pub fn remaining_in(&self, room_indices: &[usize]) -> u64 {
        let cells_per_room = (self.dates.len() as u64).saturating_mul(self.slots.len() as u64);
        let seeded: u64 = room_indices
            .iter()
            .map(|&r| u64::from(self.rooms[r].capacity).saturating_mul(cells_per_room))
            .fold(0, u64::saturating_add);
        let consumed: u64 = self
            .touched
            .iter()
            .filter(|((_, _, r), _)| room_indices.contains(r))
            .map(|(&(_, _, r), &left)| u64::from(self.rooms[r].capacity - left))
            .sum();
        seeded.saturating_sub(consumed)
    }

    /// Indices of all admitted rooms, in supplied order.
    pub fn all_rooms(&self) -> Vec<usize> {
        (0..self.rooms.len()).collect()
    }

    /// Indices of accessible rooms, in supplied order.
    pub fn accessible_rooms(&self) -> Vec<usize> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| r.accessible)
            .map(|(i, _)| i)
            .collect()
    }
}
