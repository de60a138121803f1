//! Domain models for EduManage.
//!
//! # Core Concepts
//!
//! ## Seeded Records
//!
//! - [`Grade`]: A scored piece of work for one student in one subject.
//! - [`Attendance`]: Presence status of a student for one class period.
//! - [`CalendarEvent`]: A dated entry on the academic calendar.
//!
//! These live in the in-memory stores and are addressed by opaque string IDs.
//! Cross-references (student, subject, teacher) are never checked.
//!
//! ## Session & Synthetic Data
//!
//! - [`User`]: The authenticated person, carrying a [`Role`].
//! - [`WeatherData`]: A freshly generated reading, never stored.

mod attendance;
mod event;
mod grade;
mod user;
mod weather;

pub use attendance::*;
pub use event::*;
pub use grade::*;
pub use user::*;
pub use weather::*;
