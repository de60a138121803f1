//! In-memory record stores with simulated latency.
//!
//! Every store keeps its records in a [`RecordStore`] and sleeps for a fixed,
//! per-operation delay before touching them. The delays are scaled by a
//! [`Latency`] so tests and the JSON API can switch them off.

mod attendance;
mod calendar;
mod clock;
mod grades;
mod latency;
pub mod seed;
mod table;
mod weather;

pub use attendance::*;
pub use calendar::*;
pub use clock::*;
pub use grades::*;
pub use latency::*;
pub use table::*;
pub use weather::*;

use uuid::Uuid;

/// Length of the random suffix on generated IDs.
const ID_SUFFIX_LEN: usize = 9;

/// Generate a fresh record ID such as `grade_3f9a0c1b2`.
pub(crate) fn generate_id(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &raw[..ID_SUFFIX_LEN])
}

/// All domain stores, shared by the views and the JSON API.
///
/// Cloning is cheap and clones share the same underlying records.
#[derive(Clone)]
pub struct Stores {
    pub grades: GradeStore,
    pub attendance: AttendanceStore,
    pub calendar: CalendarStore,
    pub weather: WeatherStore,
}

impl Stores {
    /// Stores holding the canned school data.
    pub fn seeded(latency: Latency) -> Self {
        Self {
            grades: GradeStore::seeded(latency),
            attendance: AttendanceStore::seeded(latency),
            calendar: CalendarStore::seeded(latency),
            weather: WeatherStore::new(latency),
        }
    }

    /// Stores with no records at all.
    pub fn empty(latency: Latency) -> Self {
        Self {
            grades: GradeStore::empty(latency),
            attendance: AttendanceStore::empty(latency),
            calendar: CalendarStore::empty(latency),
            weather: WeatherStore::new(latency),
        }
    }
}
