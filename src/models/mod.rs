//! Data models for the club's Supabase schema.
//!
//! This module contains all the data structures used to represent
//! club data including:
//!
//! - `Group`: training groups (name + skill level)
//! - `Teacher`: instructor profiles linked to auth accounts
//! - `Athlete`: club members belonging to a group
//! - `Schedule`: recurring weekly class slots with their groups and teachers
//! - Attendance types: `AttendanceFlag`, `AttendanceRecord`
//!
//! Field names follow the remote column names (the schema is Spanish).

pub mod athlete;
pub mod attendance;
pub mod group;
pub mod schedule;
pub mod teacher;

pub use athlete::Athlete;
pub use attendance::{AttendanceFlag, AttendanceRecord, ATTENDANCE_CONFLICT_KEY};
pub use group::Group;
pub use schedule::{Schedule, ScheduleRow};
pub use teacher::Teacher;
