//! Course enrollment metrics.

use crate::config::AcademicConfig;
use crate::types::{collect_by_id, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared course status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CourseStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Faculty {
    pub instructor: String,
    pub department: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub current: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    pub time: String,
    pub room: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub course_code: String,
    pub title: String,
    pub faculty: Faculty,
    pub enrollment: Enrollment,
    pub status: CourseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcademicRecords {
    pub courses: Vec<Course>,
}

/// How close a course is to capacity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentLevel {
    Available,
    Busy,
    Critical,
}

impl EnrollmentLevel {
    pub fn severity(self) -> Severity {
        match self {
            EnrollmentLevel::Available => Severity::Success,
            EnrollmentLevel::Busy => Severity::Warning,
            EnrollmentLevel::Critical => Severity::Danger,
        }
    }
}

/// Derived figures for one course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseMetrics {
    pub course_code: String,
    /// Rounded fill percentage, `None` when capacity is zero
    pub enrollment_percent: Option<u32>,
    pub is_full: bool,
    /// Closed when full, whatever the declared status
    pub effective_status: CourseStatus,
    pub level: EnrollmentLevel,
    /// Students can join the waitlist
    pub waitlist_open: bool,
}

impl Enrollment {
    pub fn is_full(&self) -> bool {
        self.current >= self.capacity
    }

    /// Fill percentage rounded to the nearest whole number.
    pub fn percent(&self) -> Option<u32> {
        if self.capacity == 0 {
            return None;
        }
        let pct = f64::from(self.current) / f64::from(self.capacity) * 100.0;
        Some(pct.round() as u32)
    }
}

/// Bucket a fill percentage. A course with no capacity counts as critical.
pub fn enrollment_level(percent: Option<u32>, config: &AcademicConfig) -> EnrollmentLevel {
    match percent {
        Some(p) if p < config.busy_percent => EnrollmentLevel::Available,
        Some(p) if p < config.critical_percent => EnrollmentLevel::Busy,
        _ => EnrollmentLevel::Critical,
    }
}

impl CourseMetrics {
    pub fn calculate(course: &Course, config: &AcademicConfig) -> Self {
        let is_full = course.enrollment.is_full();
        let percent = course.enrollment.percent();
        let effective_status = if is_full {
            CourseStatus::Closed
        } else {
            course.status
        };

        Self {
            course_code: course.course_code.clone(),
            enrollment_percent: percent,
            is_full,
            effective_status,
            level: enrollment_level(percent, config),
            waitlist_open: is_full,
        }
    }
}

/// Calculate metrics for every course, keyed by course code.
pub fn evaluate_academic(
    records: &AcademicRecords,
    config: &AcademicConfig,
) -> BTreeMap<String, CourseMetrics> {
    let metrics = collect_by_id(
        records
            .courses
            .iter()
            .map(|c| (c.course_code.clone(), CourseMetrics::calculate(c, config))),
        "course",
    );

    tracing::debug!(courses = metrics.len(), "Evaluated academic records");
    metrics
}
