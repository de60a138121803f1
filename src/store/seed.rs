//! Canned school data the stores start with.

use crate::models::*;

const SEMESTER: &str = "2024-1";

fn grade(
    id: &str,
    student_id: &str,
    subject_id: &str,
    score: f64,
    kind: GradeKind,
    description: &str,
    date: &str,
) -> Grade {
    Grade {
        id: id.to_string(),
        student_id: student_id.to_string(),
        subject_id: subject_id.to_string(),
        teacher_id: "T001".to_string(),
        score,
        max_score: 100.0,
        kind,
        description: description.to_string(),
        date: date.to_string(),
        semester: SEMESTER.to_string(),
    }
}

pub fn grades() -> Vec<Grade> {
    vec![
        grade(
            "1",
            "S001",
            "SUBJ001",
            85.0,
            GradeKind::Exam,
            "Examen Parcial - Matemáticas",
            "2024-01-15",
        ),
        grade(
            "2",
            "S001",
            "SUBJ002",
            92.0,
            GradeKind::Assignment,
            "Ensayo - Historia Universal",
            "2024-01-18",
        ),
        grade(
            "3",
            "S002",
            "SUBJ001",
            78.0,
            GradeKind::Quiz,
            "Quiz - Álgebra Lineal",
            "2024-01-20",
        ),
    ]
}

fn attendance(
    id: &str,
    student_id: &str,
    subject_id: &str,
    status: AttendanceStatus,
    period: &str,
    notes: &str,
) -> Attendance {
    Attendance {
        id: id.to_string(),
        student_id: student_id.to_string(),
        subject_id: subject_id.to_string(),
        teacher_id: "T001".to_string(),
        date: "2024-01-15".to_string(),
        status,
        notes: Some(notes.to_string()),
        period: period.to_string(),
    }
}

pub fn attendance_records() -> Vec<Attendance> {
    vec![
        attendance(
            "1",
            "S001",
            "SUBJ001",
            AttendanceStatus::Present,
            "1st Period",
            "",
        ),
        attendance(
            "2",
            "S001",
            "SUBJ002",
            AttendanceStatus::Late,
            "2nd Period",
            "Llegó 10 minutos tarde",
        ),
        attendance(
            "3",
            "S002",
            "SUBJ001",
            AttendanceStatus::Absent,
            "1st Period",
            "Justificación médica presentada",
        ),
    ]
}

pub fn events() -> Vec<CalendarEvent> {
    vec![
        CalendarEvent {
            id: "1".to_string(),
            title: "Examen de Matemáticas".to_string(),
            description: Some("Examen final de Álgebra Lineal".to_string()),
            date: "2024-01-25".to_string(),
            start_time: "08:00".to_string(),
            end_time: "10:00".to_string(),
            kind: EventKind::Exam,
            participants: Some(vec![
                "T001".to_string(),
                "S001".to_string(),
                "S002".to_string(),
            ]),
            location: Some("Aula 101".to_string()),
        },
        CalendarEvent {
            id: "2".to_string(),
            title: "Reunión de Padres".to_string(),
            description: Some("Reunión trimestral con padres de familia".to_string()),
            date: "2024-01-30".to_string(),
            start_time: "15:00".to_string(),
            end_time: "17:00".to_string(),
            kind: EventKind::Meeting,
            participants: None,
            location: Some("Auditorio Principal".to_string()),
        },
        CalendarEvent {
            id: "3".to_string(),
            title: "Día Feriado".to_string(),
            description: Some("Día de la Constitución".to_string()),
            date: "2024-02-05".to_string(),
            start_time: "00:00".to_string(),
            end_time: "23:59".to_string(),
            kind: EventKind::Holiday,
            participants: None,
            location: None,
        },
    ]
}

/// The event handed back by the simulated Google Calendar import.
pub fn google_import() -> Vec<CalendarEvent> {
    vec![CalendarEvent {
        id: "google_1".to_string(),
        title: "Evento importado de Google".to_string(),
        description: Some("Este evento fue importado desde Google Calendar".to_string()),
        date: "2024-02-10".to_string(),
        start_time: "14:00".to_string(),
        end_time: "15:30".to_string(),
        kind: EventKind::Meeting,
        participants: None,
        location: Some("Virtual".to_string()),
    }]
}
