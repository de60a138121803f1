use crate::models::{Audience, Grade, GradeKind};

use super::{percent, short_date, View, ViewContext};

/// How a percentage reads at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl GradeTier {
    pub fn of(grade: &Grade) -> Self {
        let percentage = grade.percentage();
        if percentage >= 90.0 {
            Self::Excellent
        } else if percentage >= 80.0 {
            Self::Good
        } else if percentage >= 70.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excelente",
            Self::Good => "Bueno",
            Self::Fair => "Regular",
            Self::Poor => "Bajo",
        }
    }
}

pub fn grade_kind_label(kind: GradeKind) -> &'static str {
    match kind {
        GradeKind::Exam => "Examen",
        GradeKind::Assignment => "Tarea",
        GradeKind::Quiz => "Quiz",
        GradeKind::Project => "Proyecto",
        GradeKind::Participation => "Participación",
    }
}

/// Grade table with a text search and a type filter.
#[derive(Debug, Clone, Default)]
pub struct GradesView {
    grades: Vec<Grade>,
    is_loading: bool,
    search: String,
    kind_filter: Option<GradeKind>,
}

impl GradesView {
    pub fn new() -> Self {
        Self {
            is_loading: true,
            ..Default::default()
        }
    }

    /// Case-insensitive substring match on the description.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// `None` shows every type.
    pub fn set_kind_filter(&mut self, kind: Option<GradeKind>) {
        self.kind_filter = kind;
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// Grades passing the current search and type filter.
    pub fn visible(&self) -> Vec<&Grade> {
        let term = self.search.to_lowercase();
        self.grades
            .iter()
            .filter(|g| g.description.to_lowercase().contains(&term))
            .filter(|g| self.kind_filter.map_or(true, |k| g.kind == k))
            .collect()
    }
}

impl View for GradesView {
    async fn mount(&mut self, ctx: &ViewContext<'_>) {
        self.is_loading = true;
        let store = &ctx.stores.grades;

        let result = match ctx.user.audience() {
            Audience::Teacher { teacher_id } => store.grades_by_teacher(teacher_id).await,
            Audience::Student { student_id } => store.grades_by_student(student_id).await,
            Audience::Admin => store.all_grades().await,
        };

        match result {
            Ok(grades) => self.grades = grades,
            Err(e) => tracing::error!("Error fetching grades: {}", e),
        }
        self.is_loading = false;
    }

    fn render(&self) -> String {
        if self.is_loading {
            return "Cargando calificaciones...\n".to_string();
        }

        let visible = self.visible();
        let mut output = format!("Calificaciones ({})\n", visible.len());
        if visible.is_empty() {
            output.push_str("No se encontraron calificaciones\n");
            return output;
        }

        for grade in visible {
            output.push_str(&format!(
                "- {} [{}] {}/{} ({}, {}) {} · {}\n",
                grade.description,
                grade_kind_label(grade.kind),
                grade.score,
                grade.max_score,
                percent(grade.percentage()),
                GradeTier::of(grade).label(),
                short_date(&grade.date),
                grade.subject_id,
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

    fn user(email: &str) -> crate::models::User {
        UserDirectory::seeded()
            .find_by_email(email)
            .cloned()
            .expect("seeded user")
    }

    #[tokio::test]
    async fn student_sees_only_their_grades() {
        let stores = Stores::seeded(Latency::none());
        let student = user("carlos.rodriguez@estudiante.edu");
        let ctx = ViewContext::new(&student, &stores, "Mexico City");

        let mut view = GradesView::new();
        view.mount(&ctx).await;

        assert_eq!(view.grades().len(), 2);
        assert!(view.grades().iter().all(|g| g.student_id == "S001"));
    }

    #[tokio::test]
    async fn search_and_type_filter_combine() {
        let stores = Stores::seeded(Latency::none());
        let teacher = user("maria.gonzalez@escuela.edu");
        let ctx = ViewContext::new(&teacher, &stores, "Mexico City");

        let mut view = GradesView::new();
        view.mount(&ctx).await;
        assert_eq!(view.visible().len(), 3);

        view.set_search("ÁLGEBRA");
        assert_eq!(view.visible().len(), 1);

        view.set_kind_filter(Some(GradeKind::Exam));
        assert!(view.visible().is_empty());
        assert!(view.render().contains("No se encontraron calificaciones"));
    }

    #[test]
    fn tiers_follow_percentage_thresholds() {
        let mut grade = crate::store::seed::grades().remove(0);
        for (score, tier) in [
            (95.0, GradeTier::Excellent),
            (90.0, GradeTier::Excellent),
            (85.0, GradeTier::Good),
            (70.0, GradeTier::Fair),
            (69.9, GradeTier::Poor),
        ] {
            grade.score = score;
            assert_eq!(GradeTier::of(&grade), tier);
        }
    }
}
