/// A page selectable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Grades,
    Attendance,
    Calendar,
    Subjects,
    Reports,
    Weather,
    Settings,
}

impl Tab {
    /// Sidebar order.
    pub const ALL: [Tab; 8] = [
        Self::Dashboard,
        Self::Grades,
        Self::Attendance,
        Self::Calendar,
        Self::Subjects,
        Self::Reports,
        Self::Weather,
        Self::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Grades => "grades",
            Self::Attendance => "attendance",
            Self::Calendar => "calendar",
            Self::Subjects => "subjects",
            Self::Reports => "reports",
            Self::Weather => "weather",
            Self::Settings => "settings",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.as_str() == s)
    }

    /// Parse a tab name, landing on the dashboard for anything unknown.
    pub fn from_str_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Grades => "Calificaciones",
            Self::Attendance => "Asistencia",
            Self::Calendar => "Calendario",
            Self::Subjects => "Materias",
            Self::Reports => "Reportes",
            Self::Weather => "Clima",
            Self::Settings => "Configuración",
        }
    }

    /// Page header title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Grades => "Gestión de Calificaciones",
            Self::Attendance => "Control de Asistencia",
            Self::Calendar => "Calendario Académico",
            Self::Subjects => "Gestión de Materias",
            Self::Reports => "Reportes y Estadísticas",
            Self::Weather => "Información del Clima",
            Self::Settings => "Configuración del Sistema",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Dashboard => "Resumen general del sistema educativo",
            Self::Grades => "Registro y seguimiento de calificaciones estudiantiles",
            Self::Attendance => "Monitoreo de asistencia y puntualidad",
            Self::Calendar => "Programación de eventos y actividades académicas",
            Self::Subjects => "Administración de materias y cursos",
            Self::Reports => "Análisis de datos y métricas educativas",
            Self::Weather => "Condiciones climáticas del campus universitario",
            Self::Settings => "Configuración y preferencias del sistema",
        }
    }

    /// Tabs that only show the "under construction" card.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Subjects | Self::Reports | Self::Settings)
    }

    /// Heading of the placeholder card.
    fn placeholder_heading(&self) -> &'static str {
        match self {
            Self::Subjects => "Gestión de Materias",
            Self::Reports => "Reportes y Estadísticas",
            Self::Settings => "Configuración",
            _ => self.title(),
        }
    }
}

/// The static card shown by tabs that are not built yet.
pub fn render_placeholder(tab: Tab) -> String {
    format!("{}\nMódulo en desarrollo...\n", tab.placeholder_heading())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tab_round_trips_through_its_name() {
        for tab in Tab::ALL {
            assert_eq!(Tab::from_str(tab.as_str()), Some(tab));
        }
    }

    #[test]
    fn unknown_names_fall_back_to_dashboard() {
        assert_eq!(Tab::from_str("library"), None);
        assert_eq!(Tab::from_str_or_default("library"), Tab::Dashboard);
    }

    #[test]
    fn exactly_three_tabs_are_placeholders() {
        let placeholders: Vec<_> = Tab::ALL.into_iter().filter(Tab::is_placeholder).collect();
        assert_eq!(placeholders, vec![Tab::Subjects, Tab::Reports, Tab::Settings]);
    }

    #[test]
    fn placeholder_card_names_the_module() {
        assert_eq!(
            render_placeholder(Tab::Reports),
            "Reportes y Estadísticas\nMódulo en desarrollo...\n"
        );
    }
}
