//! Attendance Record - one class session for one student

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Validate;
use crate::{Error, Result};

/// Attendance status for a single class session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Attended on time.
    Present,
    /// Did not attend.
    Absent,
    /// Attended late. Counts as attended for percentages.
    Late,
}

impl AttendanceStatus {
    /// Whether this status counts toward the attended total.
    #[must_use]
    pub const fn counts_as_attended(self) -> bool {
        matches!(self, Self::Present | Self::Late)
    }

    /// Get the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "late" => Ok(Self::Late),
            other => Err(Error::InvalidInput(format!(
                "unknown attendance status '{other}'"
            ))),
        }
    }
}

/// Attendance Record: (student, course, date) → status.
///
/// At most one record exists per (student, course, date); the engine
/// updates the status in place rather than appending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    id: String,
    course_id: String,
    date: NaiveDate,
    student_id: String,
    status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Create a new attendance record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        student_id: impl Into<String>,
        course_id: impl Into<String>,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id: id.into(),
            course_id: course_id.into(),
            date,
            student_id: student_id.into(),
            status,
        }
    }

    /// Get the record ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the student ID.
    #[must_use]
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// Get the course ID.
    #[must_use]
    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Get the session date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Get the attendance status.
    #[must_use]
    pub const fn status(&self) -> AttendanceStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: AttendanceStatus) {
        self.status = status;
    }

    /// Whether this record belongs to `(student_id, course_id)`.
    #[must_use]
    pub fn is_for(&self, student_id: &str, course_id: &str) -> bool {
        self.student_id == student_id && self.course_id == course_id
    }
}

impl Validate for AttendanceRecord {
    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidInput("attendance id must not be empty".into()));
        }
        Ok(())
    }
}
