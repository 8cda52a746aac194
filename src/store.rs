//! Record Store - the loaded collections for one current student
//!
//! `RecordStore` owns the authoritative in-memory copy of every collection.
//! Reads are scoped to the current student; the only mutations are the
//! upserts the engine's mutators call before persisting.

use chrono::NaiveDate;

use crate::analytics::{self, AttendanceStats, SemesterResult};
use crate::record::{
    AttendanceRecord, AttendanceStatus, BookingStatus, Course, ExamMark, MealBooking, MealType,
    Student,
};

/// Outcome of an in-memory upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new record was appended.
    Inserted,
    /// An existing record was updated in place.
    Updated,
}

/// In-memory collections for the current student.
///
/// ## Design
///
/// Collections are plain vectors in load order; lookups are linear scans.
/// The working set is one student's term, so scans stay small and keep the
/// stored document order stable across rewrites.
#[derive(Debug, Clone)]
pub struct RecordStore {
    student: Student,
    courses: Vec<Course>,
    attendance: Vec<AttendanceRecord>,
    exams: Vec<ExamMark>,
    meal_bookings: Vec<MealBooking>,
}

impl RecordStore {
    /// Assemble a store from loaded collections.
    #[must_use]
    pub fn new(
        student: Student,
        courses: Vec<Course>,
        attendance: Vec<AttendanceRecord>,
        exams: Vec<ExamMark>,
        meal_bookings: Vec<MealBooking>,
    ) -> Self {
        Self {
            student,
            courses,
            attendance,
            exams,
            meal_bookings,
        }
    }

    /// Get the current student.
    #[must_use]
    pub const fn student(&self) -> &Student {
        &self.student
    }

    /// Get all courses.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Get all attendance records (every student).
    #[must_use]
    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    /// Get all exam marks (every student).
    #[must_use]
    pub fn exams(&self) -> &[ExamMark] {
        &self.exams
    }

    /// Get all meal bookings (every student).
    #[must_use]
    pub fn meal_bookings(&self) -> &[MealBooking] {
        &self.meal_bookings
    }

    /// Get a course by ID.
    #[must_use]
    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == course_id)
    }

    /// Get the courses of one semester in catalogue order.
    #[must_use]
    pub fn semester_courses(&self, semester: u32) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| c.semester() == semester)
            .collect()
    }

    /// Current student's attendance percentage for a course.
    #[must_use]
    pub fn attendance_percentage(&self, course_id: &str) -> u32 {
        analytics::attendance_percentage(&self.attendance, self.student.id(), course_id)
    }

    /// Current student's attendance totals for a course.
    #[must_use]
    pub fn attendance_stats(&self, course: &Course) -> AttendanceStats {
        analytics::attendance_stats(&self.attendance, self.student.id(), course)
    }

    /// Attendance totals for every course.
    #[must_use]
    pub fn attendance_summary(&self) -> Vec<AttendanceStats> {
        self.courses
            .iter()
            .map(|c| self.attendance_stats(c))
            .collect()
    }

    /// Mean attendance percentage across all courses.
    #[must_use]
    pub fn overall_attendance(&self) -> u32 {
        analytics::overall_attendance(&self.attendance, self.student.id(), &self.courses)
    }

    /// Current student's records for a course, newest first.
    #[must_use]
    pub fn attendance_history(&self, course_id: &str) -> Vec<&AttendanceRecord> {
        let mut history: Vec<&AttendanceRecord> = self
            .attendance
            .iter()
            .filter(|r| r.is_for(self.student.id(), course_id))
            .collect();
        history.sort_by(|a, b| b.date().cmp(&a.date()));
        history
    }

    /// Current student's marks for a course, oldest first.
    #[must_use]
    pub fn exams_for_course(&self, course_id: &str) -> Vec<&ExamMark> {
        let mut marks: Vec<&ExamMark> = self
            .exams
            .iter()
            .filter(|e| e.is_for(self.student.id(), course_id))
            .collect();
        marks.sort_by_key(|e| e.date());
        marks
    }

    /// Current student's SGPA for a semester.
    #[must_use]
    pub fn sgpa(&self, semester: u32) -> f64 {
        analytics::sgpa(&self.courses, &self.exams, self.student.id(), semester)
    }

    /// Current student's per-course breakdown for a semester.
    #[must_use]
    pub fn semester_result(&self, semester: u32) -> SemesterResult {
        analytics::semester_result(&self.courses, &self.exams, self.student.id(), semester)
    }

    /// Current student's CGPA over semesters `1..=through_semester`.
    #[must_use]
    pub fn cgpa(&self, through_semester: u32) -> f64 {
        analytics::cgpa(&self.courses, &self.exams, self.student.id(), through_semester)
    }

    /// First booking of the current student for `(date, meal_type)`, any status.
    #[must_use]
    pub fn booking_for(&self, date: NaiveDate, meal_type: MealType) -> Option<&MealBooking> {
        self.meal_bookings
            .iter()
            .find(|b| b.is_for(self.student.id(), date, meal_type))
    }

    /// The current student's `booked` booking for `(date, meal_type)`.
    #[must_use]
    pub fn active_booking(&self, date: NaiveDate, meal_type: MealType) -> Option<&MealBooking> {
        self.meal_bookings.iter().find(|b| {
            b.is_for(self.student.id(), date, meal_type) && b.status() == BookingStatus::Booked
        })
    }

    /// Current student's bookings on a day in meal order.
    #[must_use]
    pub fn bookings_on(&self, date: NaiveDate) -> Vec<&MealBooking> {
        let mut bookings: Vec<&MealBooking> = self
            .meal_bookings
            .iter()
            .filter(|b| b.student_id() == self.student.id() && b.date() == date)
            .collect();
        bookings.sort_by_key(|b| b.meal_type());
        bookings
    }

    /// Get one of the current student's bookings by ID.
    #[must_use]
    pub fn booking(&self, booking_id: &str) -> Option<&MealBooking> {
        self.meal_bookings
            .iter()
            .find(|b| b.id() == booking_id && b.student_id() == self.student.id())
    }

    /// Set the status of `(current student, course_id, date)`, inserting a
    /// record with `new_id()` if none exists.
    pub(crate) fn upsert_attendance(
        &mut self,
        course_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
        new_id: impl FnOnce() -> String,
    ) -> (AttendanceRecord, Upsert) {
        let student_id = self.student.id();
        if let Some(existing) = self
            .attendance
            .iter_mut()
            .find(|r| r.is_for(student_id, course_id) && r.date() == date)
        {
            existing.set_status(status);
            return (existing.clone(), Upsert::Updated);
        }

        let record = AttendanceRecord::new(new_id(), student_id, course_id, date, status);
        self.attendance.push(record.clone());
        (record, Upsert::Inserted)
    }

    /// Set `(current student, date, meal_type)` to `booked`.
    ///
    /// Reuses the slot's non-cancelled booking if there is one, otherwise
    /// resurrects a cancelled one; inserts only when the slot is empty.
    pub(crate) fn upsert_booking(
        &mut self,
        date: NaiveDate,
        meal_type: MealType,
        new_id: impl FnOnce() -> String,
    ) -> (MealBooking, Upsert) {
        let student_id = self.student.id();
        let slot = |b: &MealBooking| b.is_for(student_id, date, meal_type);
        let index = self
            .meal_bookings
            .iter()
            .position(|b| slot(b) && b.is_active())
            .or_else(|| self.meal_bookings.iter().position(slot));
        if let Some(existing) = index.map(|i| &mut self.meal_bookings[i]) {
            existing.set_status(BookingStatus::Booked);
            return (existing.clone(), Upsert::Updated);
        }

        let booking = MealBooking::new(new_id(), student_id, date, meal_type);
        self.meal_bookings.push(booking.clone());
        (booking, Upsert::Inserted)
    }

    /// Cancel one of the current student's bookings.
    ///
    /// Returns the booking and whether its status changed. `None` if the
    /// student has no booking with that ID.
    pub(crate) fn cancel_booking(&mut self, booking_id: &str) -> Option<(MealBooking, bool)> {
        let student_id = self.student.id();
        let booking = self
            .meal_bookings
            .iter_mut()
            .find(|b| b.id() == booking_id && b.student_id() == student_id)?;
        let changed = booking.status() != BookingStatus::Cancelled;
        booking.set_status(BookingStatus::Cancelled);
        Some((booking.clone(), changed))
    }
}
