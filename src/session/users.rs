use crate::models::{Role, User};
use crate::store::generate_id;

const TEACHER_AVATAR: &str = "https://images.pexels.com/photos/3760514/pexels-photo-3760514.jpeg?auto=compress&cs=tinysrgb&w=100&h=100&fit=crop";
const STUDENT_AVATAR: &str = "https://images.pexels.com/photos/2379004/pexels-photo-2379004.jpeg?auto=compress&cs=tinysrgb&w=100&h=100&fit=crop";
const ADMIN_AVATAR: &str = "https://images.pexels.com/photos/1181519/pexels-photo-1181519.jpeg?auto=compress&cs=tinysrgb&w=100&h=100&fit=crop";

/// The fixed set of accounts that can log in.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// The demo accounts: one teacher, one student, one admin.
    pub fn seeded() -> Self {
        Self::new(vec![
            User {
                id: "1".to_string(),
                name: "Dr. María González".to_string(),
                email: "maria.gonzalez@escuela.edu".to_string(),
                role: Role::Teacher,
                avatar: Some(TEACHER_AVATAR.to_string()),
                student_id: None,
                teacher_id: Some("T001".to_string()),
            },
            User {
                id: "2".to_string(),
                name: "Carlos Rodríguez".to_string(),
                email: "carlos.rodriguez@estudiante.edu".to_string(),
                role: Role::Student,
                avatar: Some(STUDENT_AVATAR.to_string()),
                student_id: Some("S001".to_string()),
                teacher_id: None,
            },
            User {
                id: "3".to_string(),
                name: "Administrador Sistema".to_string(),
                email: "admin@escuela.edu".to_string(),
                role: Role::Admin,
                avatar: Some(ADMIN_AVATAR.to_string()),
                student_id: None,
                teacher_id: None,
            },
        ])
    }

    /// Exact, case-sensitive email match.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

/// A freshly fabricated account for the simulated Google sign-in.
pub fn google_user() -> User {
    User {
        id: generate_id("google_"),
        name: "Usuario Google".to_string(),
        email: "usuario@gmail.com".to_string(),
        role: Role::Student,
        avatar: Some(STUDENT_AVATAR.to_string()),
        student_id: Some("G001".to_string()),
        teacher_id: None,
    }
}
