use serde::{Deserialize, Serialize};

/// A scored piece of work.
///
/// `max_score` must be positive; the grade store refuses anything else.
/// `score <= max_score` is expected but not enforced; percentages above 100
/// are reported as-is by the aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub student_id: String,
    pub subject_id: String,
    pub teacher_id: String,
    pub score: f64,
    pub max_score: f64,
    #[serde(rename = "type")]
    pub kind: GradeKind,
    pub description: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
    /// Semester label, e.g. `2024-1`.
    pub semester: String,
}

impl Grade {
    /// Score as a percentage of the maximum.
    pub fn percentage(&self) -> f64 {
        self.score / self.max_score * 100.0
    }
}

/// What kind of work a grade was given for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GradeKind {
    Exam,
    Assignment,
    Quiz,
    Project,
    Participation,
}

impl GradeKind {
    pub const ALL: [GradeKind; 5] = [
        Self::Exam,
        Self::Assignment,
        Self::Quiz,
        Self::Project,
        Self::Participation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exam => "exam",
            Self::Assignment => "assignment",
            Self::Quiz => "quiz",
            Self::Project => "project",
            Self::Participation => "participation",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "exam" => Some(Self::Exam),
            "assignment" => Some(Self::Assignment),
            "quiz" => Some(Self::Quiz),
            "project" => Some(Self::Project),
            "participation" => Some(Self::Participation),
            _ => None,
        }
    }
}

/// Input for recording a new grade. The store assigns the ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGradeInput {
    pub student_id: String,
    pub subject_id: String,
    pub teacher_id: String,
    pub score: f64,
    pub max_score: f64,
    #[serde(rename = "type")]
    pub kind: GradeKind,
    pub description: String,
    pub date: String,
    pub semester: String,
}

impl CreateGradeInput {
    pub(crate) fn into_grade(self, id: String) -> Grade {
        Grade {
            id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            score: self.score,
            max_score: self.max_score,
            kind: self.kind,
            description: self.description,
            date: self.date,
            semester: self.semester,
        }
    }
}

/// Partial update for a grade. Present fields overwrite, absent fields keep
/// their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGradeInput {
    pub student_id: Option<String>,
    pub subject_id: Option<String>,
    pub teacher_id: Option<String>,
    pub score: Option<f64>,
    pub max_score: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<GradeKind>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub semester: Option<String>,
}

impl UpdateGradeInput {
    pub(crate) fn apply(self, grade: &mut Grade) {
        if let Some(v) = self.student_id {
            grade.student_id = v;
        }
        if let Some(v) = self.subject_id {
            grade.subject_id = v;
        }
        if let Some(v) = self.teacher_id {
            grade.teacher_id = v;
        }
        if let Some(v) = self.score {
            grade.score = v;
        }
        if let Some(v) = self.max_score {
            grade.max_score = v;
        }
        if let Some(v) = self.kind {
            grade.kind = v;
        }
        if let Some(v) = self.description {
            grade.description = v;
        }
        if let Some(v) = self.date {
            grade.date = v;
        }
        if let Some(v) = self.semester {
            grade.semester = v;
        }
    }
}

/// Aggregate figures across every grade in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeStatistics {
    pub total_grades: usize,
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub grade_distribution: Vec<GradeBand>,
}

/// One percentage band of the grade distribution, e.g. `80-89`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeBand {
    pub range: String,
    pub count: usize,
}
