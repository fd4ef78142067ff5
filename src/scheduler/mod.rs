//! Seat allocation and KPI evaluation.
//!
//! Provides the accessibility-first greedy allocator and schedule quality
//! metrics.
//!
//! # Algorithm
//!
//! `ScheduleOrchestrator` partitions the roster, seeds a shared
//! [`CapacityGrid`] and runs [`BatchAssigner`] over it in phases:
//! accessibility participants into accessible rooms, any overflow of them
//! into all rooms, then regular participants into all rooms. Every phase
//! walks cells in date → slot → room order and fills each cell as far as
//! it can. It is not optimal (no balancing, no gap filling) but it is
//! deterministic and linear in the grid size.
//!
//! # KPI
//!
//! `ScheduleKpi` computes seat utilization, per-room utilization and the
//! accessible placement rate.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Martello & Toth (1990), "Knapsack Problems", Ch. 8 (bin packing, first fit)

mod assigner;
mod grid;
mod kpi;
mod orchestrator;
mod partition;

pub use assigner::BatchAssigner;
pub use grid::{CapacityGrid, GridRoom};
pub use kpi::ScheduleKpi;
pub use orchestrator::{schedule, ScheduleOrchestrator};
pub use partition::partition;
