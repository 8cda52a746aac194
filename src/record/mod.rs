//! Student record schema
//!
//! The five entity types the engine loads, derives from and mutates.
//!
//! ## Schema Overview
//!
//! ```text
//! Student (1) ──< AttendanceRecord (N) >── (1) Course
//!     │
//!     ├──< ExamMark (N) >── (1) Course
//!     └──< MealBooking (N)
//!
//! MealPlan (7, one per weekday; shared by all students)
//! ```
//!
//! Records serialize as camelCase JSON documents with lowercase enum values.
//!
//! ## Usage
//!
//! ```rust
//! use campus_records::record::{AttendanceRecord, AttendanceStatus, Course};
//! use chrono::NaiveDate;
//!
//! let course = Course::builder("c1", "CS301", "Data Structures")
//!     .credits(4)
//!     .semester(4)
//!     .build()?;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
//! let record = AttendanceRecord::new("att-1", "s1", course.id(), date, AttendanceStatus::Late);
//! assert!(record.status().counts_as_attended());
//! # Ok::<(), campus_records::Error>(())
//! ```

mod attendance;
mod course;
mod exam;
mod meal;
mod meal_plan;
mod student;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use course::{Course, CourseBuilder};
pub use exam::{ExamMark, ExamMarkBuilder, ExamType};
pub use meal::{BookingStatus, MealBooking, MealType};
pub use meal_plan::{plan_for_date, MealPlan};
pub use student::{Student, StudentBuilder};

use crate::{Error, Result};
use std::collections::HashSet;
use std::hash::Hash;

/// Entity-level invariant check applied to records read from storage.
pub trait Validate {
    /// Check this record's own invariants.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` describing the first violation.
    fn validate(&self) -> Result<()>;
}

/// Check collection-wide invariants on top of [`Validate`].
pub trait ValidateCollection {
    /// Check every record plus uniqueness constraints across records.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` describing the first violation.
    fn validate_collection(&self) -> Result<()>;
}

impl ValidateCollection for Student {
    fn validate_collection(&self) -> Result<()> {
        self.validate()
    }
}

impl ValidateCollection for Vec<Course> {
    fn validate_collection(&self) -> Result<()> {
        validate_all(self)?;
        ensure_unique(self.iter().map(Course::id), "course id")
    }
}

impl ValidateCollection for Vec<ExamMark> {
    fn validate_collection(&self) -> Result<()> {
        validate_all(self)?;
        ensure_unique(self.iter().map(ExamMark::id), "exam mark id")
    }
}

impl ValidateCollection for Vec<AttendanceRecord> {
    fn validate_collection(&self) -> Result<()> {
        validate_all(self)?;
        ensure_unique(self.iter().map(AttendanceRecord::id), "attendance id")?;
        ensure_unique(
            self.iter()
                .map(|r| (r.student_id(), r.course_id(), r.date())),
            "attendance (student, course, date)",
        )
    }
}

impl ValidateCollection for Vec<MealBooking> {
    fn validate_collection(&self) -> Result<()> {
        validate_all(self)?;
        ensure_unique(self.iter().map(MealBooking::id), "meal booking id")?;
        ensure_unique(
            self.iter()
                .filter(|b| b.is_active())
                .map(|b| (b.student_id(), b.date(), b.meal_type())),
            "active meal booking (student, date, meal)",
        )
    }
}

impl ValidateCollection for Vec<MealPlan> {
    fn validate_collection(&self) -> Result<()> {
        validate_all(self)?;
        ensure_unique(self.iter().map(MealPlan::id), "meal plan id")?;
        ensure_unique(self.iter().map(MealPlan::day), "meal plan day")
    }
}

fn validate_all<T: Validate>(records: &[T]) -> Result<()> {
    records.iter().try_for_each(Validate::validate)
}

fn ensure_unique<K: Hash + Eq>(
    keys: impl Iterator<Item = K>,
    what: &str,
) -> Result<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(Error::InvalidInput(format!("duplicate {what}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[test]
    fn test_duplicate_attendance_triple_rejected() {
        let records = vec![
            AttendanceRecord::new("a1", "s1", "c1", day(1), AttendanceStatus::Present),
            AttendanceRecord::new("a2", "s1", "c1", day(1), AttendanceStatus::Absent),
        ];
        assert!(records.validate_collection().is_err());
    }

    #[test]
    fn test_same_course_different_days_accepted() {
        let records = vec![
            AttendanceRecord::new("a1", "s1", "c1", day(1), AttendanceStatus::Present),
            AttendanceRecord::new("a2", "s1", "c1", day(2), AttendanceStatus::Absent),
        ];
        assert!(records.validate_collection().is_ok());
    }

    #[test]
    fn test_cancelled_booking_does_not_conflict() {
        let mut cancelled = MealBooking::new("m1", "s1", day(3), MealType::Lunch);
        cancelled.set_status(BookingStatus::Cancelled);
        let bookings = vec![
            cancelled,
            MealBooking::new("m2", "s1", day(3), MealType::Lunch),
        ];
        assert!(bookings.validate_collection().is_ok());
    }

    #[test]
    fn test_two_active_bookings_rejected() {
        let bookings = vec![
            MealBooking::new("m1", "s1", day(3), MealType::Dinner),
            MealBooking::new("m2", "s1", day(3), MealType::Dinner),
        ];
        assert!(bookings.validate_collection().is_err());
    }

    #[test]
    fn test_duplicate_course_id_rejected() {
        let course = Course::builder("c1", "CS301", "Data Structures")
            .credits(4)
            .build()
            .unwrap();
        let courses = vec![course.clone(), course];
        assert!(courses.validate_collection().is_err());
    }
}
