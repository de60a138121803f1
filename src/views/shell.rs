use std::sync::Arc;

use crate::models::{Role, User};
use crate::session::Session;
use crate::store::Stores;

use super::{render_tab, Tab, ViewContext};

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Student => "Student",
        Role::Teacher => "Teacher",
        Role::Admin => "Admin",
    }
}

/// The application frame: login gate, sidebar, header and the active tab.
pub struct Shell {
    session: Arc<Session>,
    stores: Stores,
    city: String,
    active_tab: Tab,
}

impl Shell {
    pub fn new(session: Arc<Session>, stores: Stores, city: impl Into<String>) -> Self {
        Self {
            session,
            stores,
            city: city.into(),
            active_tab: Tab::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Select a tab by name. Unknown names land on the dashboard.
    pub fn select_named(&mut self, name: &str) {
        let tab = Tab::from_str_or_default(name);
        if tab.as_str() != name {
            tracing::debug!(name, "Unknown tab, showing dashboard");
        }
        self.select(tab);
    }

    /// Render the whole screen for the current session state.
    pub async fn render(&self) -> String {
        let Some(user) = self.session.current_user() else {
            return self.render_login();
        };

        let mut output = self.render_sidebar(&user);
        output.push('\n');
        output.push_str(&format!(
            "== {} ==\n{}\n\n",
            self.active_tab.title(),
            self.active_tab.subtitle()
        ));

        let ctx = ViewContext::new(&user, &self.stores, &self.city);
        output.push_str(&render_tab(self.active_tab, &ctx).await);
        output
    }

    fn render_login(&self) -> String {
        let mut output = String::from("EduManage\nInicia sesión para continuar\n\nCuentas de demostración:\n");
        for user in self.session.directory().users() {
            output.push_str(&format!("- {} ({})\n", user.email, role_label(user.role)));
        }
        output
    }

    fn render_sidebar(&self, user: &User) -> String {
        let mut output = String::from("EduManage · Gestión Escolar\n");
        output.push_str(&format!("{} ({})\n\n", user.name, role_label(user.role)));

        for tab in Tab::ALL {
            let marker = if tab == self.active_tab { '>' } else { ' ' };
            output.push_str(&format!("{} {}\n", marker, tab.label()));
        }
        output.push_str("\n  Cerrar Sesión\n");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::session::MemorySessionStorage;
    use crate::store::Latency;

    fn shell() -> Shell {
        let storage = Arc::new(MemorySessionStorage::new());
        let session = Arc::new(Session::open(storage, Latency::none()));
        let config = AppConfig::instant();
        Shell::new(session, Stores::seeded(config.latency), &config.city)
    }

    #[tokio::test]
    async fn logged_out_shell_shows_demo_accounts() {
        let shell = shell();

        let rendered = shell.render().await;
        assert!(rendered.contains("Inicia sesión"));
        assert!(rendered.contains("- admin@escuela.edu (Admin)"));
        assert!(!rendered.contains("Cerrar Sesión"));
    }

    #[tokio::test]
    async fn logged_in_shell_marks_active_tab_and_shows_header() {
        let mut shell = shell();
        shell
            .session()
            .login("admin@escuela.edu", "anything")
            .await
            .unwrap();

        shell.select_named("reports");
        assert_eq!(shell.active_tab(), Tab::Reports);

        let rendered = shell.render().await;
        assert!(rendered.contains("Administrador Sistema (Admin)"));
        assert!(rendered.contains("> Reportes\n"));
        assert!(rendered.contains("  Dashboard\n"));
        assert!(rendered.contains("== Reportes y Estadísticas ==\nAnálisis de datos y métricas educativas"));
        assert!(rendered.ends_with("Módulo en desarrollo...\n"));
    }

    #[tokio::test]
    async fn dashboard_weather_defaults_to_spanish_city_name() {
        let shell = shell();
        shell
            .session()
            .login("carlos.rodriguez@estudiante.edu", "")
            .await
            .unwrap();

        let rendered = shell.render().await;
        assert!(rendered.contains("Clima · Ciudad de México\n"));
        assert!(!rendered.contains("Mexico City"));
    }

    #[tokio::test]
    async fn unknown_tab_name_shows_dashboard() {
        let mut shell = shell();
        shell.select(Tab::Calendar);
        shell.select_named("library");
        assert_eq!(shell.active_tab(), Tab::Dashboard);
    }
}
