//! Seat-allocation domain models.
//!
//! Provides the input types (participants, rooms, run configuration), the
//! time axes of the allocation grid (calendar days and daily slots) and the
//! output types (batches, assignments, run result).
//!
//! # Domain Mappings
//!
//! | seat-schedule | Entrance exams | Training | Vaccination drive |
//! |---------------|----------------|----------|-------------------|
//! | Participant | Applicant | Trainee | Patient |
//! | Room | Exam room | Classroom | Booth |
//! | Batch | Exam sitting | Session | Time block |
//! | Assignment | Seat ticket | Enrolment | Appointment |

mod calendar;
mod config;
mod participant;
mod room;
mod schedule;

pub use calendar::{dates, slots, CalendarDay, TimeSlot};
pub(crate) use config::hhmm;
pub use config::{parse_date, parse_time, ScheduleConfig};
pub use participant::{Participant, ParticipantId};
pub use room::{parse_capacity, Room, RoomId};
pub use schedule::{Assignment, Batch, ScheduleResult};
