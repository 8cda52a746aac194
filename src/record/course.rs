//! Course Record - static reference data

use serde::{Deserialize, Serialize};

use super::Validate;
use crate::{Error, Result};

/// A course offered in a given semester, weighted by credits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: String,
    code: String,
    name: String,
    instructor: String,
    credits: u32,
    department: String,
    semester: u32,
}

impl Course {
    /// Create a builder with the identifying fields.
    #[must_use]
    pub fn builder(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> CourseBuilder {
        CourseBuilder::new(id, code, name)
    }

    /// Get the course ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the course code (e.g. "CS301").
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Get the course name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the instructor's name.
    #[must_use]
    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    /// Get the credit weight (always positive).
    #[must_use]
    pub const fn credits(&self) -> u32 {
        self.credits
    }

    /// Get the offering department.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Get the semester this course belongs to.
    #[must_use]
    pub const fn semester(&self) -> u32 {
        self.semester
    }
}

impl Validate for Course {
    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidInput("course id must not be empty".into()));
        }
        if self.credits == 0 {
            return Err(Error::InvalidInput(format!(
                "course {} must carry at least one credit",
                self.id
            )));
        }
        Ok(())
    }
}

/// Builder for `Course`.
#[derive(Debug)]
pub struct CourseBuilder {
    course: Course,
}

impl CourseBuilder {
    /// Create a new builder. Credits and semester default to 1.
    #[must_use]
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            course: Course {
                id: id.into(),
                code: code.into(),
                name: name.into(),
                instructor: String::new(),
                credits: 1,
                department: String::new(),
                semester: 1,
            },
        }
    }

    /// Set the instructor.
    #[must_use]
    pub fn instructor(mut self, instructor: impl Into<String>) -> Self {
        self.course.instructor = instructor.into();
        self
    }

    /// Set the credit weight.
    #[must_use]
    pub const fn credits(mut self, credits: u32) -> Self {
        self.course.credits = credits;
        self
    }

    /// Set the department.
    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.course.department = department.into();
        self
    }

    /// Set the semester.
    #[must_use]
    pub const fn semester(mut self, semester: u32) -> Self {
        self.course.semester = semester;
        self
    }

    /// Build the `Course`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for an empty id or zero credits.
    pub fn build(self) -> Result<Course> {
        self.course.validate()?;
        Ok(self.course)
    }
}
