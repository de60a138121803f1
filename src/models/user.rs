use serde::{Deserialize, Serialize};

/// A dashboard user.
///
/// The role decides which cross-reference is populated: students carry a
/// `student_id`, teachers a `teacher_id`, admins neither. The role never
/// changes for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
}

/// The role of a user.
///
/// - `Student`: sees their own grades and attendance
/// - `Teacher`: sees the records they entered
/// - `Admin`: sees institution-wide figures
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who the view layer is rendering for, resolved once from a [`User`].
///
/// Views match on this instead of comparing role strings. A teacher without
/// a `teacher_id` resolves to an empty ID and simply matches no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience<'a> {
    Student { student_id: &'a str },
    Teacher { teacher_id: &'a str },
    Admin,
}

impl User {
    pub fn audience(&self) -> Audience<'_> {
        match self.role {
            Role::Student => Audience::Student {
                student_id: self.student_id.as_deref().unwrap_or_default(),
            },
            Role::Teacher => Audience::Teacher {
                teacher_id: self.teacher_id.as_deref().unwrap_or_default(),
            },
            Role::Admin => Audience::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> User {
        User {
            id: "2".to_string(),
            name: "Carlos Rodríguez".to_string(),
            email: "carlos.rodriguez@estudiante.edu".to_string(),
            role: Role::Student,
            avatar: None,
            student_id: Some("S001".to_string()),
            teacher_id: None,
        }
    }

    #[test]
    fn serializes_with_camel_case_cross_references() {
        let json = serde_json::to_value(student()).unwrap();
        assert_eq!(json["role"], "student");
        assert_eq!(json["studentId"], "S001");
        assert!(json.get("teacherId").is_none());
    }

    #[test]
    fn audience_follows_role() {
        let mut user = student();
        assert_eq!(user.audience(), Audience::Student { student_id: "S001" });

        user.role = Role::Admin;
        assert_eq!(user.audience(), Audience::Admin);
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Student, Role::Teacher, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("principal"), None);
    }
}
