use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::*;

use super::{generate_id, seed, Latency, MemoryTable, RecordStore};

const LIST_DELAY: Duration = Duration::from_millis(500);
const MARK_DELAY: Duration = Duration::from_millis(800);
const UPDATE_DELAY: Duration = Duration::from_millis(600);
const DELETE_DELAY: Duration = Duration::from_millis(400);
const STATS_DELAY: Duration = Duration::from_millis(400);
const BULK_DELAY: Duration = Duration::from_millis(1000);

/// Attendance records and the attendance-rate aggregate.
#[derive(Clone)]
pub struct AttendanceStore {
    table: Arc<dyn RecordStore<Attendance>>,
    latency: Latency,
}

impl AttendanceStore {
    pub fn new(table: Arc<dyn RecordStore<Attendance>>, latency: Latency) -> Self {
        Self { table, latency }
    }

    pub fn seeded(latency: Latency) -> Self {
        Self::new(
            Arc::new(MemoryTable::new(seed::attendance_records())),
            latency,
        )
    }

    pub fn empty(latency: Latency) -> Self {
        Self::new(Arc::new(MemoryTable::new(Vec::new())), latency)
    }

    // ============================================================
    // Queries
    // ============================================================

    /// A student's records. The date range is applied only when both bounds
    /// are given; bounds are inclusive.
    pub async fn attendance_by_student(
        &self,
        student_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<Attendance>> {
        self.latency.wait(LIST_DELAY).await;

        let range = start_date.zip(end_date);
        self.table.filter(&|r| {
            r.student_id == student_id
                && range.map_or(true, |(start, end)| {
                    r.date.as_str() >= start && r.date.as_str() <= end
                })
        })
    }

    pub async fn attendance_by_date(
        &self,
        date: &str,
        subject_id: Option<&str>,
    ) -> Result<Vec<Attendance>> {
        self.latency.wait(LIST_DELAY).await;
        self.table
            .filter(&|r| r.date == date && subject_id.map_or(true, |s| r.subject_id == s))
    }

    pub async fn attendance_by_teacher(&self, teacher_id: &str) -> Result<Vec<Attendance>> {
        self.latency.wait(LIST_DELAY).await;
        self.table.filter(&|r| r.teacher_id == teacher_id)
    }

    pub async fn attendance_by_subject(&self, subject_id: &str) -> Result<Vec<Attendance>> {
        self.latency.wait(LIST_DELAY).await;
        self.table.filter(&|r| r.subject_id == subject_id)
    }

    // ============================================================
    // Mutations
    // ============================================================

    pub async fn mark_attendance(&self, input: MarkAttendanceInput) -> Result<Attendance> {
        self.latency.wait(MARK_DELAY).await;

        let record = input.into_attendance(generate_id("att_"));
        self.table.insert(vec![record.clone()])?;

        tracing::info!(
            attendance_id = %record.id,
            student_id = %record.student_id,
            status = record.status.as_str(),
            "Attendance marked"
        );
        Ok(record)
    }

    /// Mark a whole class at once. The batch is appended in a single step.
    pub async fn bulk_mark_attendance(
        &self,
        inputs: Vec<MarkAttendanceInput>,
    ) -> Result<Vec<Attendance>> {
        self.latency.wait(BULK_DELAY).await;

        let records: Vec<Attendance> = inputs
            .into_iter()
            .map(|input| input.into_attendance(generate_id("att_")))
            .collect();
        self.table.insert(records.clone())?;

        tracing::info!(count = records.len(), "Attendance batch marked");
        Ok(records)
    }

    pub async fn update_attendance(
        &self,
        id: &str,
        input: UpdateAttendanceInput,
    ) -> Result<Attendance> {
        self.latency.wait(UPDATE_DELAY).await;

        let mut input = Some(input);
        let updated = self.table.modify(id, &mut |record| {
            if let Some(patch) = input.take() {
                patch.apply(record);
            }
        })?;

        updated.ok_or_else(|| {
            tracing::warn!(attendance_id = %id, "Update of unknown attendance record");
            Error::not_found("Attendance record", id)
        })
    }

    pub async fn delete_attendance(&self, id: &str) -> Result<()> {
        self.latency.wait(DELETE_DELAY).await;

        self.table
            .remove(id)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found("Attendance record", id))
    }

    // ============================================================
    // Aggregates
    // ============================================================

    /// Per-status counts over all records, narrowed by student and/or subject
    /// when given.
    pub async fn attendance_stats(
        &self,
        student_id: Option<&str>,
        subject_id: Option<&str>,
    ) -> Result<AttendanceStats> {
        self.latency.wait(STATS_DELAY).await;

        let records = self.table.filter(&|r| {
            student_id.map_or(true, |s| r.student_id == s)
                && subject_id.map_or(true, |s| r.subject_id == s)
        })?;
        Ok(stats(&records))
    }
}

/// Tally statuses. The rate counts late arrivals as attended.
pub fn stats(records: &[Attendance]) -> AttendanceStats {
    let mut stats = AttendanceStats {
        total_classes: records.len(),
        ..Default::default()
    };

    for record in records {
        match record.status {
            AttendanceStatus::Present => stats.present_count += 1,
            AttendanceStatus::Absent => stats.absent_count += 1,
            AttendanceStatus::Late => stats.late_count += 1,
            AttendanceStatus::Excused => stats.excused_count += 1,
        }
    }

    if stats.total_classes > 0 {
        stats.attendance_rate =
            (stats.present_count + stats.late_count) as f64 / stats.total_classes as f64 * 100.0;
    }
    stats
}
