use crate::models::{Attendance, AttendanceStats, AttendanceStatus, Audience};

use super::{percent, short_date, View, ViewContext};

pub fn status_label(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => "Presente",
        AttendanceStatus::Absent => "Ausente",
        AttendanceStatus::Late => "Tardanza",
        AttendanceStatus::Excused => "Justificado",
    }
}

fn status_icon(status: AttendanceStatus) -> char {
    match status {
        AttendanceStatus::Present => '✔',
        AttendanceStatus::Absent => '✘',
        AttendanceStatus::Late => '◷',
        AttendanceStatus::Excused => '⚠',
    }
}

/// Attendance counters plus the record table.
///
/// Records and stats are fetched independently; either can fail without
/// affecting the other.
#[derive(Debug, Clone, Default)]
pub struct AttendanceView {
    records: Vec<Attendance>,
    stats: AttendanceStats,
    is_loading: bool,
}

impl AttendanceView {
    pub fn new() -> Self {
        Self {
            is_loading: true,
            ..Default::default()
        }
    }

    pub fn records(&self) -> &[Attendance] {
        &self.records
    }

    pub fn stats(&self) -> &AttendanceStats {
        &self.stats
    }
}

impl View for AttendanceView {
    async fn mount(&mut self, ctx: &ViewContext<'_>) {
        self.is_loading = true;
        let store = &ctx.stores.attendance;
        let audience = ctx.user.audience();

        // Admins get no record list, only institution-wide stats
        let records = match audience {
            Audience::Teacher { teacher_id } => Some(store.attendance_by_teacher(teacher_id).await),
            Audience::Student { student_id } => {
                Some(store.attendance_by_student(student_id, None, None).await)
            }
            Audience::Admin => None,
        };
        match records {
            Some(Ok(records)) => self.records = records,
            Some(Err(e)) => tracing::error!("Error fetching attendance: {}", e),
            None => {}
        }
        self.is_loading = false;

        let student_id = match audience {
            Audience::Student { student_id } => Some(student_id),
            Audience::Teacher { .. } | Audience::Admin => None,
        };
        match store.attendance_stats(student_id, None).await {
            Ok(stats) => self.stats = stats,
            Err(e) => tracing::error!("Error fetching attendance stats: {}", e),
        }
    }

    fn render(&self) -> String {
        let s = &self.stats;
        let mut output = format!(
            "Presentes: {}  Ausentes: {}  Tardanzas: {}  Asistencia: {}\n",
            s.present_count,
            s.absent_count,
            s.late_count,
            percent(s.attendance_rate)
        );

        if self.is_loading {
            output.push_str("Cargando asistencia...\n");
            return output;
        }

        output.push_str("Registro de Asistencia\n");
        if self.records.is_empty() {
            output.push_str("No hay registros de asistencia\n");
            return output;
        }

        for record in &self.records {
            let notes = record.notes.as_deref().filter(|n| !n.is_empty()).unwrap_or("-");
            output.push_str(&format!(
                "- {} {} {} {} · {}\n",
                short_date(&record.date),
                record.period,
                status_icon(record.status),
                status_label(record.status),
                notes,
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserDirectory;
    use crate::store::{Latency, Stores};

    #[tokio::test]
    async fn student_stats_are_scoped_to_the_student() {
        let stores = Stores::seeded(Latency::none());
        let student = UserDirectory::seeded()
            .find_by_email("carlos.rodriguez@estudiante.edu")
            .cloned()
            .unwrap();
        let ctx = ViewContext::new(&student, &stores, "Mexico City");

        let mut view = AttendanceView::new();
        view.mount(&ctx).await;

        assert_eq!(view.records().len(), 2);
        assert_eq!(view.stats().total_classes, 2);
        assert_eq!(view.stats().attendance_rate, 100.0);

        let rendered = view.render();
        assert!(rendered.contains("Llegó 10 minutos tarde"));
        assert!(rendered.contains("15/1/2024 1st Period ✔ Presente · -"));
    }

    #[tokio::test]
    async fn admin_sees_overall_stats_without_records() {
        let stores = Stores::seeded(Latency::none());
        let admin = UserDirectory::seeded()
            .find_by_email("admin@escuela.edu")
            .cloned()
            .unwrap();
        let ctx = ViewContext::new(&admin, &stores, "Mexico City");

        let mut view = AttendanceView::new();
        view.mount(&ctx).await;

        assert!(view.records().is_empty());
        assert_eq!(view.stats().total_classes, 3);
        assert!(view.render().contains("No hay registros de asistencia"));
    }
}
