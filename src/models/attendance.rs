use serde::{Deserialize, Serialize};

/// Attendance of one student for one class period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: String,
    pub student_id: String,
    pub subject_id: String,
    pub teacher_id: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Period label, e.g. `1st Period`.
    pub period: String,
}

/// Whether the student showed up.
///
/// `Late` counts towards the attendance rate; `Excused` does not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
            Self::Excused => "excused",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            "late" => Some(Self::Late),
            "excused" => Some(Self::Excused),
            _ => None,
        }
    }
}

/// Input for marking attendance. The store assigns the ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceInput {
    pub student_id: String,
    pub subject_id: String,
    pub teacher_id: String,
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub period: String,
}

impl MarkAttendanceInput {
    pub(crate) fn into_attendance(self, id: String) -> Attendance {
        Attendance {
            id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            date: self.date,
            status: self.status,
            notes: self.notes,
            period: self.period,
        }
    }
}

/// Partial update for an attendance record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceInput {
    pub student_id: Option<String>,
    pub subject_id: Option<String>,
    pub teacher_id: Option<String>,
    pub date: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
    pub period: Option<String>,
}

impl UpdateAttendanceInput {
    pub(crate) fn apply(self, record: &mut Attendance) {
        if let Some(v) = self.student_id {
            record.student_id = v;
        }
        if let Some(v) = self.subject_id {
            record.subject_id = v;
        }
        if let Some(v) = self.teacher_id {
            record.teacher_id = v;
        }
        if let Some(v) = self.date {
            record.date = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.notes {
            record.notes = Some(v);
        }
        if let Some(v) = self.period {
            record.period = v;
        }
    }
}

/// Per-status counts and the derived attendance rate.
///
/// `attendance_rate` is `(present + late) / total * 100`, or 0 when there are
/// no classes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total_classes: usize,
    pub present_count: usize,
    pub absent_count: usize,
    pub late_count: usize,
    pub excused_count: usize,
    pub attendance_rate: f64,
}
