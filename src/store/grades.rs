use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::*;

use super::{generate_id, seed, Latency, MemoryTable, RecordStore};

const LIST_DELAY: Duration = Duration::from_millis(500);
const CREATE_DELAY: Duration = Duration::from_millis(800);
const UPDATE_DELAY: Duration = Duration::from_millis(600);
const DELETE_DELAY: Duration = Duration::from_millis(400);
const AVERAGE_DELAY: Duration = Duration::from_millis(300);
const STATISTICS_DELAY: Duration = Duration::from_millis(400);

/// Lower bound (inclusive) and label of each distribution band, best first.
/// Anything below the last bound falls into `0-59`.
const BANDS: [(f64, &str); 4] = [
    (90.0, "90-100"),
    (80.0, "80-89"),
    (70.0, "70-79"),
    (60.0, "60-69"),
];
const LOWEST_BAND: &str = "0-59";

/// Grades with per-student and institution-wide aggregates.
#[derive(Clone)]
pub struct GradeStore {
    table: Arc<dyn RecordStore<Grade>>,
    latency: Latency,
}

impl GradeStore {
    pub fn new(table: Arc<dyn RecordStore<Grade>>, latency: Latency) -> Self {
        Self { table, latency }
    }

    pub fn seeded(latency: Latency) -> Self {
        Self::new(Arc::new(MemoryTable::new(seed::grades())), latency)
    }

    pub fn empty(latency: Latency) -> Self {
        Self::new(Arc::new(MemoryTable::new(Vec::new())), latency)
    }

    // ============================================================
    // Queries
    // ============================================================

    pub async fn all_grades(&self) -> Result<Vec<Grade>> {
        self.latency.wait(LIST_DELAY).await;
        self.table.all()
    }

    pub async fn grades_by_student(&self, student_id: &str) -> Result<Vec<Grade>> {
        self.latency.wait(LIST_DELAY).await;
        self.table.filter(&|g| g.student_id == student_id)
    }

    pub async fn grades_by_teacher(&self, teacher_id: &str) -> Result<Vec<Grade>> {
        self.latency.wait(LIST_DELAY).await;
        self.table.filter(&|g| g.teacher_id == teacher_id)
    }

    pub async fn grades_by_subject(&self, subject_id: &str) -> Result<Vec<Grade>> {
        self.latency.wait(LIST_DELAY).await;
        self.table.filter(&|g| g.subject_id == subject_id)
    }

    // ============================================================
    // Mutations
    // ============================================================

    pub async fn create_grade(&self, input: CreateGradeInput) -> Result<Grade> {
        self.latency.wait(CREATE_DELAY).await;
        check_max_score(input.max_score)?;

        let grade = input.into_grade(generate_id("grade_"));
        self.table.insert(vec![grade.clone()])?;

        tracing::info!(grade_id = %grade.id, student_id = %grade.student_id, "Grade recorded");
        Ok(grade)
    }

    pub async fn update_grade(&self, id: &str, input: UpdateGradeInput) -> Result<Grade> {
        self.latency.wait(UPDATE_DELAY).await;
        if let Some(max_score) = input.max_score {
            check_max_score(max_score)?;
        }

        let mut input = Some(input);
        let updated = self.table.modify(id, &mut |grade| {
            if let Some(patch) = input.take() {
                patch.apply(grade);
            }
        })?;

        match updated {
            Some(grade) => {
                tracing::info!(grade_id = %id, "Grade updated");
                Ok(grade)
            }
            None => {
                tracing::warn!(grade_id = %id, "Update of unknown grade");
                Err(Error::not_found("Grade", id))
            }
        }
    }

    pub async fn delete_grade(&self, id: &str) -> Result<()> {
        self.latency.wait(DELETE_DELAY).await;

        match self.table.remove(id)? {
            Some(_) => {
                tracing::info!(grade_id = %id, "Grade deleted");
                Ok(())
            }
            None => {
                tracing::warn!(grade_id = %id, "Delete of unknown grade");
                Err(Error::not_found("Grade", id))
            }
        }
    }

    // ============================================================
    // Aggregates
    // ============================================================

    /// Mean percentage of a student's grades, optionally for one subject.
    /// Returns 0 when the student has no matching grades.
    pub async fn student_average(&self, student_id: &str, subject_id: Option<&str>) -> Result<f64> {
        self.latency.wait(AVERAGE_DELAY).await;

        let grades = self.table.filter(&|g| {
            g.student_id == student_id && subject_id.map_or(true, |s| g.subject_id == s)
        })?;
        Ok(average_percentage(&grades))
    }

    pub async fn grade_statistics(&self) -> Result<GradeStatistics> {
        self.latency.wait(STATISTICS_DELAY).await;
        Ok(statistics(&self.table.all()?))
    }
}

/// A grade's percentage divides by `max_score`, so it must be positive.
fn check_max_score(max_score: f64) -> Result<()> {
    if max_score > 0.0 {
        return Ok(());
    }
    tracing::warn!(max_score, "Rejected grade with non-positive maximum score");
    Err(Error::InvalidInput(format!(
        "maxScore must be greater than 0, got {}",
        max_score
    )))
}

/// Mean of `score / max_score * 100` over `grades`, 0 for none.
pub fn average_percentage(grades: &[Grade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    grades.iter().map(Grade::percentage).sum::<f64>() / grades.len() as f64
}

/// Count, mean, extremes and band distribution of grade percentages.
///
/// With no grades every figure is 0 and every band is empty.
pub fn statistics(grades: &[Grade]) -> GradeStatistics {
    let scores: Vec<f64> = grades.iter().map(Grade::percentage).collect();

    let mut counts = [0usize; BANDS.len() + 1];
    for score in &scores {
        let band = BANDS
            .iter()
            .position(|(floor, _)| *score >= *floor)
            .unwrap_or(BANDS.len());
        counts[band] += 1;
    }

    let labels = BANDS.iter().map(|(_, label)| *label).chain([LOWEST_BAND]);
    let grade_distribution = labels
        .zip(counts)
        .map(|(range, count)| GradeBand {
            range: range.to_string(),
            count,
        })
        .collect();

    let (highest_score, lowest_score) = if scores.is_empty() {
        (0.0, 0.0)
    } else {
        (
            scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            scores.iter().copied().fold(f64::INFINITY, f64::min),
        )
    };

    GradeStatistics {
        total_grades: scores.len(),
        average_score: average_percentage(grades),
        highest_score,
        lowest_score,
        grade_distribution,
    }
}
