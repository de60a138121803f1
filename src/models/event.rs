use serde::{Deserialize, Serialize};

/// An entry on the academic calendar.
///
/// Dates are ISO strings and are compared lexically, which is only correct
/// because of the fixed `YYYY-MM-DD` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Class,
    Exam,
    Meeting,
    Holiday,
    Event,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Exam => "exam",
            Self::Meeting => "meeting",
            Self::Holiday => "holiday",
            Self::Event => "event",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "class" => Some(Self::Class),
            "exam" => Some(Self::Exam),
            "meeting" => Some(Self::Meeting),
            "holiday" => Some(Self::Holiday),
            "event" => Some(Self::Event),
            _ => None,
        }
    }
}

/// Input for scheduling a new event. The store assigns the ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub participants: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
}

impl CreateEventInput {
    pub(crate) fn into_event(self, id: String) -> CalendarEvent {
        CalendarEvent {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            kind: self.kind,
            participants: self.participants,
            location: self.location,
        }
    }
}

/// Partial update for an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<EventKind>,
    pub participants: Option<Vec<String>>,
    pub location: Option<String>,
}

impl UpdateEventInput {
    pub(crate) fn apply(self, event: &mut CalendarEvent) {
        if let Some(v) = self.title {
            event.title = v;
        }
        if let Some(v) = self.description {
            event.description = Some(v);
        }
        if let Some(v) = self.date {
            event.date = v;
        }
        if let Some(v) = self.start_time {
            event.start_time = v;
        }
        if let Some(v) = self.end_time {
            event.end_time = v;
        }
        if let Some(v) = self.kind {
            event.kind = v;
        }
        if let Some(v) = self.participants {
            event.participants = Some(v);
        }
        if let Some(v) = self.location {
            event.location = Some(v);
        }
    }
}
