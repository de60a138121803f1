use crate::models::{CalendarEvent, EventKind};
use crate::store::{Stores, DEFAULT_UPCOMING_LIMIT};

use super::{short_date, View, ViewContext};

pub fn event_kind_label(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Class => "Clase",
        EventKind::Exam => "Examen",
        EventKind::Meeting => "Reunión",
        EventKind::Holiday => "Feriado",
        EventKind::Event => "Evento",
    }
}

pub fn event_kind_icon(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Class => "📚",
        EventKind::Exam => "📝",
        EventKind::Meeting => "👥",
        EventKind::Holiday => "🎉",
        EventKind::Event => "📅",
    }
}

/// Full event list beside the next few upcoming events.
#[derive(Debug, Clone, Default)]
pub struct CalendarView {
    events: Vec<CalendarEvent>,
    upcoming: Vec<CalendarEvent>,
    is_loading: bool,
}

impl CalendarView {
    pub fn new() -> Self {
        Self {
            is_loading: true,
            ..Default::default()
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn upcoming(&self) -> &[CalendarEvent] {
        &self.upcoming
    }

    async fn refresh(&mut self, stores: &Stores) {
        self.is_loading = true;
        match stores.calendar.events(None, None).await {
            Ok(events) => self.events = events,
            Err(e) => tracing::error!("Error fetching events: {}", e),
        }
        self.is_loading = false;

        match stores.calendar.upcoming_events(DEFAULT_UPCOMING_LIMIT).await {
            Ok(upcoming) => self.upcoming = upcoming,
            Err(e) => tracing::error!("Error fetching upcoming events: {}", e),
        }
    }

    /// Pull events from the (simulated) Google Calendar, then reload.
    pub async fn sync_with_google(&mut self, stores: &Stores) {
        if let Err(e) = stores.calendar.import_from_google_calendar().await {
            tracing::error!("Error syncing with Google Calendar: {}", e);
            return;
        }
        self.refresh(stores).await;
    }
}

impl View for CalendarView {
    async fn mount(&mut self, ctx: &ViewContext<'_>) {
        self.refresh(ctx.stores).await;
    }

    fn render(&self) -> String {
        if self.is_loading {
            return "Cargando calendario...\n".to_string();
        }

        let mut output = String::from("Calendario Académico\n");
        if self.events.is_empty() {
            output.push_str("No hay eventos programados\n");
        }
        for event in &self.events {
            output.push_str(&format!(
                "{} {} [{}] {} {}-{}",
                event_kind_icon(event.kind),
                event.title,
                event_kind_label(event.kind),
                short_date(&event.date),
                event.start_time,
                event.end_time,
            ));
            if let Some(location) = &event.location {
                output.push_str(&format!(" · {}", location));
            }
            if let Some(participants) = &event.participants {
                output.push_str(&format!(" · {} participantes", participants.len()));
            }
            output.push('\n');
        }

        output.push_str("\nPróximos Eventos\n");
        if self.upcoming.is_empty() {
            output.push_str("No hay eventos próximos\n");
        }
        for event in &self.upcoming {
            output.push_str(&format!(
                "{} {} · {}\n",
                event_kind_icon(event.kind),
                event.title,
                short_date(&event.date)
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserDirectory;
    use crate::store::Latency;

    #[tokio::test]
    async fn google_sync_adds_imported_event() {
        let stores = Stores::seeded(Latency::none());
        let admin = UserDirectory::seeded()
            .find_by_email("admin@escuela.edu")
            .cloned()
            .unwrap();
        let ctx = ViewContext::new(&admin, &stores, "Mexico City");

        let mut view = CalendarView::new();
        view.mount(&ctx).await;
        assert_eq!(view.events().len(), 3);

        view.sync_with_google(&stores).await;
        assert_eq!(view.events().len(), 4);
        assert_eq!(view.events().last().unwrap().id, "google_1");
        assert!(view.render().contains("👥 Evento importado de Google [Reunión] 10/2/2024"));
    }
}
