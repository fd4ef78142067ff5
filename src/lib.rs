//! Seat allocation for timed, room-based events.
//!
//! Assigns a roster of participants to seats across a grid of calendar
//! days, fixed-length daily time slots and rooms of known capacity.
//! Participants who need ground/first-floor seating are placed first, into
//! rooms classified as accessible; everyone else fills what is left.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Participant`, `Room`, `ScheduleConfig`,
//!   `TimeSlot`, `Batch`, `Assignment`, `ScheduleResult`
//! - **`classifier`**: Room accessibility classification (`RoomClassifier`,
//!   `FloorHeuristic`)
//! - **`scheduler`**: Capacity grid, greedy batch assigner, the two-phase
//!   `ScheduleOrchestrator` and `ScheduleKpi`
//! - **`validation`**: Optional input integrity checks
//! - **`export`**: Flat seat-list rows and CSV output
//! - **`store`**: Roster source / schedule sink traits and the generate service
//! - **`error`**: `ScheduleError`
//!
//! # Failure Model
//!
//! An allocation run never fails. Empty calendars, missing slots and
//! insufficient capacity are reported through `ScheduleResult::warnings`
//! and the unscheduled counts. Only parsing and the service layer return
//! `Result`.
//!
//! # Logging
//!
//! Emits `tracing` events (`info` per run, `debug` per batch and room
//! classification, `warn` per soft failure). Installing a subscriber is up
//! to the application.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Martello & Toth (1990), "Knapsack Problems: Algorithms and Computer Implementations"

#![warn(missing_docs)]

pub mod classifier;
pub mod error;
pub mod export;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::{Result, ScheduleError};
