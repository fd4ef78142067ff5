//! Roster sources, schedule sinks and the generate service.
//!
//! The allocator itself is pure. This module wires it to the outside world
//! through two collaborator traits:
//!
//! - [`RosterSource`] returns the complete room and participant lists for a
//!   group. Pagination and row limits are the implementor's concern.
//! - [`ScheduleSink`] durably records a run: one summary row, then the
//!   batches, then the assignments keyed by the stored batch IDs.
//!
//! [`InMemoryStore`] implements both for tests and local use.
//! [`ScheduleService`] runs fetch → allocate → persist. A failed assignment
//! write keeps the already stored summary and batches and becomes a warning
//! on the returned result.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::hhmm;
use crate::models::{Assignment, Batch, Participant, Room, ScheduleConfig, ScheduleResult};
use crate::scheduler::ScheduleOrchestrator;

/// Identifier of a stored run summary.
pub type RunId = i64;

/// Identifier of a stored batch row.
pub type BatchRecordId = i64;

/// Supplies rooms and participants by group.
pub trait RosterSource {
    /// All rooms of a campus group.
    fn rooms(&self, group_id: i64) -> Result<Vec<Room>>;

    /// All participants of a participant group, in roster order.
    fn participants(&self, group_id: i64) -> Result<Vec<Participant>>;
}

/// Persists scheduling runs.
pub trait ScheduleSink {
    /// Stores the run summary and returns its ID.
    fn record_summary(&self, summary: &RunSummary) -> Result<RunId>;

    /// Stores batches of a run; returns one record ID per batch, in order.
    fn record_batches(&self, run: RunId, batches: &[Batch]) -> Result<Vec<BatchRecordId>>;

    /// Stores assignments of a run; returns how many were written.
    fn record_assignments(
        &self,
        run: RunId,
        assignments: &[(BatchRecordId, &Assignment)],
    ) -> Result<usize>;
}

impl<T: RosterSource + ?Sized> RosterSource for &T {
    fn rooms(&self, group_id: i64) -> Result<Vec<Room>> {
        (**self).rooms(group_id)
    }

    fn participants(&self, group_id: i64) -> Result<Vec<Participant>> {
        (**self).participants(group_id)
    }
}

impl<T: ScheduleSink + ?Sized> ScheduleSink for &T {
    fn record_summary(&self, summary: &RunSummary) -> Result<RunId> {
        (**self).record_summary(summary)
    }

    fn record_batches(&self, run: RunId, batches: &[Batch]) -> Result<Vec<BatchRecordId>> {
        (**self).record_batches(run, batches)
    }

    fn record_assignments(
        &self,
        run: RunId,
        assignments: &[(BatchRecordId, &Assignment)],
    ) -> Result<usize> {
        (**self).record_assignments(run, assignments)
    }
}

/// Summary row of one stored run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Event display name.
    pub event_name: String,
    /// Free-form event category.
    pub event_type: String,
    /// First calendar day of the run.
    pub start_date: NaiveDate,
    /// Last calendar day of the run (inclusive).
    pub end_date: NaiveDate,
    /// Daily window start.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Daily window end.
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Group the rooms were fetched from.
    pub campus_group_id: i64,
    /// Group the roster was fetched from.
    pub participant_group_id: i64,
    /// Participants who received a seat.
    pub scheduled_count: usize,
    /// Roster entries left without a seat.
    pub unscheduled_count: usize,
    /// Number of batches created.
    pub total_batches: usize,
}

/// A generate request: which groups to seat and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Event display name.
    pub event_name: String,
    /// Free-form event category.
    #[serde(default)]
    pub event_type: String,
    /// Room group to draw from.
    pub campus_group_id: i64,
    /// Participant group to seat.
    pub participant_group_id: i64,
    /// Allocation settings.
    #[serde(flatten)]
    pub config: ScheduleConfig,
}

impl ScheduleRequest {
    /// Creates a request.
    pub fn new(
        event_name: impl Into<String>,
        campus_group_id: i64,
        participant_group_id: i64,
        config: ScheduleConfig,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            event_type: String::new(),
            campus_group_id,
            participant_group_id,
            config,
        }
    }

    /// Sets the event type.
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    fn summary(&self, result: &ScheduleResult) -> RunSummary {
        RunSummary {
            event_name: self.event_name.clone(),
            event_type: self.event_type.clone(),
            start_date: self.config.start_date,
            end_date: self.config.end_date,
            start_time: self.config.start_time,
            end_time: self.config.end_time,
            campus_group_id: self.campus_group_id,
            participant_group_id: self.participant_group_id,
            scheduled_count: result.scheduled_count,
            unscheduled_count: result.unscheduled_count,
            total_batches: result.total_batches,
        }
    }
}

/// Outcome of [`ScheduleService::generate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSchedule {
    /// Stored summary ID.
    pub run_id: RunId,
    /// Allocation result, including persistence warnings.
    pub result: ScheduleResult,
}

/// Fetches a roster, allocates seats and persists the run.
#[derive(Debug)]
pub struct ScheduleService<S, K> {
    source: S,
    sink: K,
}

impl<S: RosterSource, K: ScheduleSink> ScheduleService<S, K> {
    /// Creates a service over explicit collaborators.
    pub fn new(source: S, sink: K) -> Self {
        Self { source, sink }
    }

    /// The roster source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The schedule sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Runs one generate request end to end.
    ///
    /// # Errors
    /// [`ScheduleError::NoRooms`] / [`ScheduleError::NoParticipants`] when a
    /// group is empty, and any source error or summary/batch write error.
    /// Assignment write errors are reported as a warning instead.
    pub fn generate(&self, request: &ScheduleRequest) -> Result<GeneratedSchedule> {
        tracing::info!(
            event = %request.event_name,
            campus_group = request.campus_group_id,
            participant_group = request.participant_group_id,
            "generate requested"
        );

        let rooms = self.source.rooms(request.campus_group_id)?;
        if rooms.is_empty() {
            return Err(ScheduleError::NoRooms {
                group_id: request.campus_group_id,
            });
        }
        tracing::info!(rooms = rooms.len(), "fetched rooms");

        let participants = self.source.participants(request.participant_group_id)?;
        if participants.is_empty() {
            return Err(ScheduleError::NoParticipants {
                group_id: request.participant_group_id,
            });
        }
        let accessible = participants.iter().filter(|p| p.is_accessibility_priority).count();
        tracing::info!(
            participants = participants.len(),
            accessible,
            regular = participants.len() - accessible,
            "fetched participants"
        );

        let mut result =
            ScheduleOrchestrator::new(request.config.clone()).run(&participants, &rooms);

        let run_id = self.sink.record_summary(&request.summary(&result))?;
        tracing::info!(run_id, "summary stored");

        let record_ids = if result.batches.is_empty() {
            Vec::new()
        } else {
            self.sink.record_batches(run_id, &result.batches)?
        };
        tracing::info!(run_id, batches = record_ids.len(), "batches stored");

        let by_number: HashMap<u32, BatchRecordId> = result
            .batches
            .iter()
            .zip(&record_ids)
            .map(|(b, &id)| (b.batch_number, id))
            .collect();
        let rows: Vec<(BatchRecordId, &Assignment)> = result
            .assignments
            .iter()
            .filter_map(|a| by_number.get(&a.batch_number).map(|&id| (id, a)))
            .collect();

        if !rows.is_empty() {
            match self.sink.record_assignments(run_id, &rows) {
                Ok(written) => tracing::info!(run_id, assignments = written, "assignments stored"),
                Err(e) => {
                    tracing::warn!(run_id, error = %e, "assignment write failed");
                    result.warnings.push(format!("Assignments not saved: {e}"));
                }
            }
        }

        Ok(GeneratedSchedule { run_id, result })
    }
}

/// A stored batch row.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBatch {
    /// Record ID assigned by the store.
    pub id: BatchRecordId,
    /// Run the batch belongs to.
    pub run_id: RunId,
    /// The batch as produced by the run.
    pub batch: Batch,
}

/// A stored assignment row.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAssignment {
    /// Run the assignment belongs to.
    pub run_id: RunId,
    /// Record ID of the owning stored batch.
    pub batch_id: BatchRecordId,
    /// The seat assignment as produced by the run.
    pub assignment: Assignment,
}

#[derive(Debug, Default)]
struct StoreState {
    summaries: Vec<(RunId, RunSummary)>,
    batches: Vec<StoredBatch>,
    assignments: Vec<StoredAssignment>,
    next_id: i64,
}

/// In-memory roster source and schedule sink.
///
/// Record IDs are assigned from one counter starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rooms: HashMap<i64, Vec<Room>>,
    participants: HashMap<i64, Vec<Participant>>,
    assignment_failure: Option<String>,
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the rooms of a campus group.
    pub fn with_rooms(mut self, group_id: i64, rooms: Vec<Room>) -> Self {
        self.rooms.insert(group_id, rooms);
        self
    }

    /// Registers the participants of a participant group.
    pub fn with_participants(mut self, group_id: i64, participants: Vec<Participant>) -> Self {
        self.participants.insert(group_id, participants);
        self
    }

    /// Makes every assignment write fail with `message`.
    pub fn with_assignment_failure(mut self, message: impl Into<String>) -> Self {
        self.assignment_failure = Some(message.into());
        self
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(state: &mut StoreState) -> i64 {
        state.next_id += 1;
        state.next_id
    }

    /// Stored summaries in insertion order.
    pub fn summaries(&self) -> Vec<(RunId, RunSummary)> {
        self.state().summaries.clone()
    }

    /// Stored batches of one run.
    pub fn batches(&self, run: RunId) -> Vec<StoredBatch> {
        self.state()
            .batches
            .iter()
            .filter(|b| b.run_id == run)
            .cloned()
            .collect()
    }

    /// Stored assignments of one run.
    pub fn assignments(&self, run: RunId) -> Vec<StoredAssignment> {
        self.state()
            .assignments
            .iter()
            .filter(|a| a.run_id == run)
            .cloned()
            .collect()
    }
}

impl RosterSource for InMemoryStore {
    fn rooms(&self, group_id: i64) -> Result<Vec<Room>> {
        Ok(self.rooms.get(&group_id).cloned().unwrap_or_default())
    }

    fn participants(&self, group_id: i64) -> Result<Vec<Participant>> {
        Ok(self.participants.get(&group_id).cloned().unwrap_or_default())
    }
}

impl ScheduleSink for InMemoryStore {
    fn record_summary(&self, summary: &RunSummary) -> Result<RunId> {
        let mut state = self.state();
        let id = Self::next_id(&mut state);
        state.summaries.push((id, summary.clone()));
        Ok(id)
    }

    fn record_batches(&self, run: RunId, batches: &[Batch]) -> Result<Vec<BatchRecordId>> {
        let mut state = self.state();
        if !state.summaries.iter().any(|(id, _)| *id == run) {
            return Err(ScheduleError::Sink(format!("unknown run {run}")));
        }
        let mut ids = Vec::with_capacity(batches.len());
        for batch in batches {
            let id = Self::next_id(&mut state);
            state.batches.push(StoredBatch {
                id,
                run_id: run,
                batch: batch.clone(),
            });
            ids.push(id);
        }
        Ok(ids)
    }

    fn record_assignments(
        &self,
        run: RunId,
        assignments: &[(BatchRecordId, &Assignment)],
    ) -> Result<usize> {
        if let Some(message) = &self.assignment_failure {
            return Err(ScheduleError::Sink(message.clone()));
        }
        let mut state = self.state();
        for &(batch_id, assignment) in assignments {
            state.assignments.push(StoredAssignment {
                run_id: run,
                batch_id,
                assignment: assignment.clone(),
            });
        }
        Ok(assignments.len())
    }
}
