//! Exam Mark Record - one assessed component of a course

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Validate;
use crate::{Error, Result};

/// Kind of assessment a mark was recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    /// Mid-term examination.
    Midterm,
    /// Graded assignment.
    Assignment,
    /// Short quiz.
    Quiz,
    /// Final examination.
    Final,
}

impl ExamType {
    /// Get the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Midterm => "midterm",
            Self::Assignment => "assignment",
            Self::Quiz => "quiz",
            Self::Final => "final",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExamType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "midterm" => Ok(Self::Midterm),
            "assignment" => Ok(Self::Assignment),
            "quiz" => Ok(Self::Quiz),
            "final" => Ok(Self::Final),
            other => Err(Error::InvalidInput(format!("unknown exam type '{other}'"))),
        }
    }
}

/// Exam Mark: obtained out of max for one assessment.
///
/// Invariant: `max_marks > 0` and `obtained_marks <= max_marks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExamMark {
    id: String,
    course_id: String,
    student_id: String,
    exam_type: ExamType,
    max_marks: u32,
    obtained_marks: u32,
    date: NaiveDate,
}

impl ExamMark {
    /// Create a builder with the identifying fields.
    #[must_use]
    pub fn builder(
        id: impl Into<String>,
        student_id: impl Into<String>,
        course_id: impl Into<String>,
        exam_type: ExamType,
        date: NaiveDate,
    ) -> ExamMarkBuilder {
        ExamMarkBuilder::new(id, student_id, course_id, exam_type, date)
    }

    /// Get the mark ID.
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

    /// Get the assessment kind.
    #[must_use]
    pub const fn exam_type(&self) -> ExamType {
        self.exam_type
    }

    /// Get the maximum attainable marks.
    #[must_use]
    pub const fn max_marks(&self) -> u32 {
        self.max_marks
    }

    /// Get the marks obtained.
    #[must_use]
    pub const fn obtained_marks(&self) -> u32 {
        self.obtained_marks
    }

    /// Get the assessment date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whether this mark belongs to `(student_id, course_id)`.
    #[must_use]
    pub fn is_for(&self, student_id: &str, course_id: &str) -> bool {
        self.student_id == student_id && self.course_id == course_id
    }
}

impl Validate for ExamMark {
    fn validate(&self) -> Result<()> {
        if self.max_marks == 0 {
            return Err(Error::InvalidInput(format!(
                "exam mark {} has max marks 0",
                self.id
            )));
        }
        if self.obtained_marks > self.max_marks {
            return Err(Error::InvalidInput(format!(
                "exam mark {}: obtained {} exceeds max {}",
                self.id, self.obtained_marks, self.max_marks
            )));
        }
        Ok(())
    }
}

/// Builder for `ExamMark`.
#[derive(Debug)]
pub struct ExamMarkBuilder {
    mark: ExamMark,
}

impl ExamMarkBuilder {
    /// Create a new builder. Marks default to 0 out of 0 and must be set.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        student_id: impl Into<String>,
        course_id: impl Into<String>,
        exam_type: ExamType,
        date: NaiveDate,
    ) -> Self {
        Self {
            mark: ExamMark {
                id: id.into(),
                course_id: course_id.into(),
                student_id: student_id.into(),
                exam_type,
                max_marks: 0,
                obtained_marks: 0,
                date,
            },
        }
    }

    /// Set obtained and maximum marks.
    #[must_use]
    pub const fn marks(mut self, obtained: u32, max: u32) -> Self {
        self.mark.obtained_marks = obtained;
        self.mark.max_marks = max;
        self
    }

    /// Build the `ExamMark`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `max == 0` or `obtained > max`.
    pub fn build(self) -> Result<ExamMark> {
        self.mark.validate()?;
        Ok(self.mark)
    }
}
