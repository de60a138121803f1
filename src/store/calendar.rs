use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::*;

use super::{generate_id, seed, Clock, Latency, MemoryTable, RecordStore, SystemClock};

const LIST_DELAY: Duration = Duration::from_millis(600);
const BY_TYPE_DELAY: Duration = Duration::from_millis(400);
const UPCOMING_DELAY: Duration = Duration::from_millis(300);
const CREATE_DELAY: Duration = Duration::from_millis(800);
const UPDATE_DELAY: Duration = Duration::from_millis(600);
const DELETE_DELAY: Duration = Duration::from_millis(400);
const SYNC_DELAY: Duration = Duration::from_millis(500);
const IMPORT_DELAY: Duration = Duration::from_millis(1200);

/// Number of upcoming events shown when the caller does not say.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Academic calendar with a simulated Google Calendar integration.
///
/// The Google side is a stub: syncing only waits and logs, importing always
/// yields the same canned event. No request leaves the process.
#[derive(Clone)]
pub struct CalendarStore {
    table: Arc<dyn RecordStore<CalendarEvent>>,
    clock: Arc<dyn Clock>,
    latency: Latency,
}

impl CalendarStore {
    pub fn new(
        table: Arc<dyn RecordStore<CalendarEvent>>,
        clock: Arc<dyn Clock>,
        latency: Latency,
    ) -> Self {
        Self {
            table,
            clock,
            latency,
        }
    }

    pub fn seeded(latency: Latency) -> Self {
        Self::new(
            Arc::new(MemoryTable::new(seed::events())),
            Arc::new(SystemClock),
            latency,
        )
    }

    pub fn empty(latency: Latency) -> Self {
        Self::new(
            Arc::new(MemoryTable::new(Vec::new())),
            Arc::new(SystemClock),
            latency,
        )
    }

    /// Replace the clock used to decide what is "upcoming".
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ============================================================
    // Queries
    // ============================================================

    /// Events sorted by date. When both bounds are given only events dated
    /// within `[start, end]` are returned.
    pub async fn events(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<CalendarEvent>> {
        self.latency.wait(LIST_DELAY).await;

        let mut events = match start_date.zip(end_date) {
            Some((start, end)) => self
                .table
                .filter(&|e| e.date.as_str() >= start && e.date.as_str() <= end)?,
            None => self.table.all()?,
        };
        sort_by_date(&mut events);
        Ok(events)
    }

    pub async fn events_by_type(&self, kind: EventKind) -> Result<Vec<CalendarEvent>> {
        self.latency.wait(BY_TYPE_DELAY).await;
        self.table.filter(&|e| e.kind == kind)
    }

    /// The next `limit` events dated today or later, soonest first.
    pub async fn upcoming_events(&self, limit: usize) -> Result<Vec<CalendarEvent>> {
        self.latency.wait(UPCOMING_DELAY).await;

        let today = self.clock.today_iso();
        let mut events = self.table.filter(&|e| e.date >= today)?;
        sort_by_date(&mut events);
        events.truncate(limit);
        Ok(events)
    }

    // ============================================================
    // Mutations
    // ============================================================

    pub async fn create_event(&self, input: CreateEventInput) -> Result<CalendarEvent> {
        self.latency.wait(CREATE_DELAY).await;

        let event = input.into_event(generate_id("event_"));
        self.table.insert(vec![event.clone()])?;
        tracing::info!(event_id = %event.id, date = %event.date, "Event created");

        self.sync_with_google_calendar(&event).await;
        Ok(event)
    }

    pub async fn update_event(&self, id: &str, input: UpdateEventInput) -> Result<CalendarEvent> {
        self.latency.wait(UPDATE_DELAY).await;

        let mut input = Some(input);
        let event = self
            .table
            .modify(id, &mut |event| {
                if let Some(patch) = input.take() {
                    patch.apply(event);
                }
            })?
            .ok_or_else(|| {
                tracing::warn!(event_id = %id, "Update of unknown event");
                Error::not_found("Event", id)
            })?;

        self.sync_with_google_calendar(&event).await;
        Ok(event)
    }

    pub async fn delete_event(&self, id: &str) -> Result<()> {
        self.latency.wait(DELETE_DELAY).await;

        match self.table.remove(id)? {
            Some(_) => {
                tracing::info!(event_id = %id, "Event deleted");
                Ok(())
            }
            None => Err(Error::not_found("Event", id)),
        }
    }

    // ============================================================
    // Google Calendar (simulated)
    // ============================================================

    async fn sync_with_google_calendar(&self, event: &CalendarEvent) {
        self.latency.wait(SYNC_DELAY).await;
        tracing::info!(title = %event.title, "Event synced with Google Calendar");
    }

    /// Append and return the canned imported events.
    ///
    /// The imported IDs are fixed, so importing twice stores duplicates.
    pub async fn import_from_google_calendar(&self) -> Result<Vec<CalendarEvent>> {
        self.latency.wait(IMPORT_DELAY).await;

        let imported = seed::google_import();
        self.table.insert(imported.clone())?;
        tracing::info!(count = imported.len(), "Events imported from Google Calendar");
        Ok(imported)
    }
}

/// Stable ascending sort on the ISO date string.
fn sort_by_date(events: &mut [CalendarEvent]) {
    events.sort_by(|a, b| a.date.cmp(&b.date));
}
