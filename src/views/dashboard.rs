use crate::models::{Audience, Role};
use crate::store::average_percentage;

use super::{percent, View, ViewContext, WeatherWidget};

/// Class size shown to teachers until a roster store exists.
const TEACHER_STUDENT_COUNT: usize = 45;

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_grades: usize,
    pub average_grade: f64,
    pub attendance_rate: f64,
}

impl DashboardStats {
    /// Fixed institution-wide figures shown to admins.
    pub fn institution() -> Self {
        Self {
            total_students: 450,
            total_grades: 1250,
            average_grade: 85.7,
            attendance_rate: 92.3,
        }
    }
}

/// One card of the stats grid.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    /// Percent change shown under the value, if any.
    pub change: Option<i32>,
}

impl StatCard {
    fn new(title: &'static str, value: impl ToString, change: Option<i32>) -> Self {
        Self {
            title,
            value: value.to_string(),
            change,
        }
    }
}

/// A line of the recent-activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    pub title: &'static str,
    pub description: &'static str,
    pub time: &'static str,
    pub user: &'static str,
}

pub const RECENT_ACTIVITY: [Activity; 4] = [
    Activity {
        title: "Calificación registrada",
        description: "Examen de Matemáticas - Carlos Rodríguez: 85/100",
        time: "Hace 2 horas",
        user: "Dr. María González",
    },
    Activity {
        title: "Asistencia marcada",
        description: "Clase de Historia - 28 estudiantes presentes",
        time: "Hace 4 horas",
        user: "Prof. Juan Pérez",
    },
    Activity {
        title: "Tarea asignada",
        description: "Ensayo sobre la Revolución Francesa",
        time: "Hace 6 horas",
        user: "Dr. Ana López",
    },
    Activity {
        title: "Evento programado",
        description: "Reunión de padres - 30 de enero",
        time: "Hace 1 día",
        user: "Administración",
    },
];

/// Greeting for the hour of day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Buenos días"
    } else if hour < 18 {
        "Buenas tardes"
    } else {
        "Buenas noches"
    }
}

fn role_tagline(role: Role) -> &'static str {
    match role {
        Role::Teacher => "Panel de control para gestión de clases y estudiantes",
        Role::Student => "Revisa tu progreso académico y calificaciones",
        Role::Admin => "Panel de administración del sistema educativo",
    }
}

fn quick_actions(role: Role) -> &'static [&'static str] {
    match role {
        Role::Teacher => &["Agregar Calificación", "Tomar Asistencia", "Programar Evento"],
        Role::Student => &["Ver Calificaciones", "Mi Horario", "Mi Asistencia"],
        Role::Admin => &[],
    }
}

/// Role-specific overview: greeting, stat cards, activity feed, weather and
/// quick actions.
#[derive(Debug, Clone)]
pub struct DashboardView {
    stats: DashboardStats,
    is_loading: bool,
    role: Option<Role>,
    user_name: String,
    hour: u32,
    weather: WeatherWidget,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            stats: DashboardStats::default(),
            is_loading: true,
            role: None,
            user_name: String::new(),
            hour: 0,
            weather: WeatherWidget::new(),
        }
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    async fn fetch_stats(ctx: &ViewContext<'_>) -> crate::error::Result<DashboardStats> {
        let stores = ctx.stores;
        match ctx.user.audience() {
            Audience::Teacher { .. } => {
                let grades = stores.grades.grade_statistics().await?;
                let attendance = stores.attendance.attendance_stats(None, None).await?;
                Ok(DashboardStats {
                    total_students: TEACHER_STUDENT_COUNT,
                    total_grades: grades.total_grades,
                    average_grade: grades.average_score,
                    attendance_rate: attendance.attendance_rate,
                })
            }
            Audience::Student { student_id } => {
                let grades = stores.grades.grades_by_student(student_id).await?;
                let attendance = stores
                    .attendance
                    .attendance_stats(Some(student_id), None)
                    .await?;
                Ok(DashboardStats {
                    total_students: 1,
                    total_grades: grades.len(),
                    average_grade: average_percentage(&grades),
                    attendance_rate: attendance.attendance_rate,
                })
            }
            Audience::Admin => Ok(DashboardStats::institution()),
        }
    }

    /// The four cards for the current role.
    pub fn cards(&self) -> Vec<StatCard> {
        let s = &self.stats;
        match self.role {
            Some(Role::Teacher) => vec![
                StatCard::new("Estudiantes", s.total_students, Some(5)),
                StatCard::new("Calificaciones", s.total_grades, Some(12)),
                StatCard::new("Promedio General", percent(s.average_grade), Some(3)),
                StatCard::new("Asistencia", percent(s.attendance_rate), Some(2)),
            ],
            Some(Role::Student) => vec![
                StatCard::new("Mi Promedio", percent(s.average_grade), Some(5)),
                StatCard::new("Calificaciones", s.total_grades, Some(2)),
                StatCard::new("Mi Asistencia", percent(s.attendance_rate), Some(1)),
                StatCard::new("Materias", 6, None),
            ],
            Some(Role::Admin) => vec![
                StatCard::new("Total Estudiantes", s.total_students, Some(8)),
                StatCard::new("Total Calificaciones", s.total_grades, Some(15)),
                StatCard::new("Promedio Institucional", percent(s.average_grade), Some(2)),
                StatCard::new("Asistencia General", percent(s.attendance_rate), Some(3)),
            ],
            None => Vec::new(),
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for DashboardView {
    async fn mount(&mut self, ctx: &ViewContext<'_>) {
        self.is_loading = true;
        self.role = Some(ctx.user.role);
        self.user_name = ctx.user.name.clone();
        self.hour = ctx.hour;

        match Self::fetch_stats(ctx).await {
            Ok(stats) => self.stats = stats,
            Err(e) => tracing::error!("Error fetching dashboard stats: {}", e),
        }
        self.is_loading = false;

        self.weather.mount(ctx).await;
    }

    fn render(&self) -> String {
        if self.is_loading {
            return "Cargando dashboard...\n".to_string();
        }

        let mut output = format!("{}, {}\n", greeting(self.hour), self.user_name);
        if let Some(role) = self.role {
            output.push_str(role_tagline(role));
            output.push('\n');
        }

        output.push('\n');
        for card in self.cards() {
            output.push_str(&format!("{}: {}", card.title, card.value));
            if let Some(change) = card.change {
                output.push_str(&format!(" (+{}%)", change));
            }
            output.push('\n');
        }

        output.push_str("\nActividad Reciente\n");
        for activity in &RECENT_ACTIVITY {
            output.push_str(&format!(
                "- {}: {} ({} · {})\n",
                activity.title, activity.description, activity.time, activity.user
            ));
        }

        output.push('\n');
        output.push_str(&self.weather.render());

        let actions = self.role.map(quick_actions).unwrap_or_default();
        if !actions.is_empty() {
            output.push_str("\nAcciones Rápidas\n");
            for action in actions {
                output.push_str(&format!("- {}\n", action));
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserDirectory;
    use crate::store::{Latency, Stores};

    fn user(email: &str) -> crate::models::User {
        UserDirectory::seeded()
            .find_by_email(email)
            .cloned()
            .expect("seeded user")
    }

    async fn mounted(email: &str, hour: u32) -> DashboardView {
        let stores = Stores::seeded(Latency::none());
        let user = user(email);
        let ctx = ViewContext::new(&user, &stores, "Mexico City").at_hour(hour);
        let mut view = DashboardView::new();
        view.mount(&ctx).await;
        view
    }

    #[test]
    fn greeting_changes_at_noon_and_six() {
        assert_eq!(greeting(0), "Buenos días");
        assert_eq!(greeting(11), "Buenos días");
        assert_eq!(greeting(12), "Buenas tardes");
        assert_eq!(greeting(17), "Buenas tardes");
        assert_eq!(greeting(18), "Buenas noches");
    }

    #[tokio::test]
    async fn teacher_stats_come_from_store_aggregates() {
        let view = mounted("maria.gonzalez@escuela.edu", 9).await;

        let stats = view.stats();
        assert_eq!(stats.total_students, TEACHER_STUDENT_COUNT);
        assert_eq!(stats.total_grades, 3);
        assert!((stats.average_grade - 85.0).abs() < 1e-9);
        assert!((stats.attendance_rate - 200.0 / 3.0).abs() < 1e-9);

        let rendered = view.render();
        assert!(rendered.starts_with("Buenos días, Dr. María González\n"));
        assert!(rendered.contains("Promedio General: 85.0% (+3%)"));
        assert!(rendered.contains("Tomar Asistencia"));
    }

    #[tokio::test]
    async fn student_stats_are_personal() {
        let view = mounted("carlos.rodriguez@estudiante.edu", 20).await;

        let stats = view.stats();
        assert_eq!(stats.total_students, 1);
        assert_eq!(stats.total_grades, 2);
        assert!((stats.average_grade - 88.5).abs() < 1e-9);
        assert_eq!(stats.attendance_rate, 100.0);
        assert!(view.render().contains("Materias: 6\n"));
    }

    #[tokio::test]
    async fn admin_sees_institution_figures_and_no_actions() {
        let view = mounted("admin@escuela.edu", 14).await;

        assert_eq!(view.stats(), &DashboardStats::institution());
        let rendered = view.render();
        assert!(rendered.contains("Asistencia General: 92.3%"));
        assert!(!rendered.contains("Acciones Rápidas"));
    }
}
