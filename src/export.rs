//! Flat seat-list export.
//!
//! Joins assignments with their batch and participant into one row per
//! seat, the shape handed to spreadsheet and print layers.

use std::collections::HashMap;
use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Participant, ParticipantId, ScheduleResult};

/// Placeholder for missing passthrough fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// One exported seat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    /// Participant number, or the participant ID when none is set.
    pub participant_number: String,
    /// Display name or `"N/A"`.
    pub name: String,
    /// Email or `"N/A"`.
    pub email: String,
    /// `"Yes"` for accessibility-priority participants, else `"No"`.
    pub accessibility: String,
    /// Display name of the batch.
    pub batch_name: String,
    /// Campus or `"N/A"`.
    pub campus: String,
    /// Building name.
    pub building: String,
    /// Room name.
    pub room: String,
    /// ISO date.
    pub date: String,
    /// `"HH:MM - HH:MM"`.
    pub time_slot: String,
    /// 1-based seat within the batch.
    pub seat_no: u32,
}

/// Builds export rows ordered by batch number, then seat.
///
/// Participants missing from `participants` still get a row with
/// placeholder name and email.
pub fn export_rows(result: &ScheduleResult, participants: &[Participant]) -> Vec<ExportRow> {
    let by_id: HashMap<ParticipantId, &Participant> =
        participants.iter().map(|p| (p.id, p)).collect();
    let batch_names: HashMap<u32, &str> = result
        .batches
        .iter()
        .map(|b| (b.batch_number, b.batch_name.as_str()))
        .collect();

    let mut assignments: Vec<_> = result.assignments.iter().collect();
    assignments.sort_by_key(|a| (a.batch_number, a.seat_no));

    let rows: Vec<ExportRow> = assignments
        .into_iter()
        .map(|a| {
            let p = by_id.get(&a.participant_id);
            let text = |field: Option<&String>| {
                field
                    .filter(|s| !s.is_empty())
                    .cloned()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string())
            };
            ExportRow {
                participant_number: p
                    .and_then(|p| p.participant_number.clone())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| a.participant_id.to_string()),
                name: text(p.and_then(|p| p.name.as_ref())),
                email: text(p.and_then(|p| p.email.as_ref())),
                accessibility: if a.is_accessibility_priority { "Yes" } else { "No" }.to_string(),
                batch_name: batch_names
                    .get(&a.batch_number)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| format!("Batch {}", a.batch_number)),
                campus: if a.campus.is_empty() {
                    NOT_AVAILABLE.to_string()
                } else {
                    a.campus.clone()
                },
                building: a.building.clone(),
                room: a.room.clone(),
                date: a.date.format("%Y-%m-%d").to_string(),
                time_slot: a.time_slot(),
                seat_no: a.seat_no,
            }
        })
        .collect();

    tracing::info!(rows = rows.len(), "export rows built");
    rows
}

/// Writes rows as CSV with a header line.
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<()> {
    let mut out = Writer::from_writer(writer);
    out.write_record([
        "participant_number",
        "name",
        "email",
        "pwd",
        "batch_name",
        "campus",
        "building",
        "room",
        "date",
        "time_slot",
        "seat_no",
    ])?;
    for row in rows {
        out.write_record([
            row.participant_number.as_str(),
            row.name.as_str(),
            row.email.as_str(),
            row.accessibility.as_str(),
            row.batch_name.as_str(),
            row.campus.as_str(),
            row.building.as_str(),
            row.room.as_str(),
            row.date.as_str(),
            row.time_slot.as_str(),
            row.seat_no.to_string().as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}
