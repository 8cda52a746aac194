//! Student Record Engine
//!
//! [`StudentEngine`] ties the persistence gateway, the loaded
//! [`RecordStore`] and the mutators together behind an explicit readiness
//! state:
//!
//! ```text
//! new() ──> Loading ──load()──> Ready
//!                                 │  derivations: Store -> caller
//!                                 └─ mutators:    caller -> Store -> KvStore
//! ```
//!
//! Every student-scoped call made while `Loading` returns
//! [`Error::NotReady`](crate::Error::NotReady). The weekly hostel menu is
//! shared by all students and readable in either state.
//!
//! # Example
//!
//! ```rust,no_run
//! use campus_records::kv::MemoryKvStore;
//! use campus_records::record::AttendanceStatus;
//! use campus_records::{EngineConfig, StudentEngine};
//!
//! # async fn example() -> campus_records::Result<()> {
//! let (mut engine, _report) =
//!     StudentEngine::open(MemoryKvStore::new(), EngineConfig::default()).await;
//!
//! engine.mark_attendance("c1", AttendanceStatus::Present).await?;
//! println!("CS301: {}%", engine.attendance_percentage("c1")?);
//! println!("SGPA:  {:.2}", engine.sgpa(4)?);
//! # Ok(())
//! # }
//! ```

mod loader;
mod mutation;

pub use loader::{LoadReport, LoadSource};
pub use mutation::{Mutation, Persisted};

use chrono::NaiveDate;
use tracing::info;

use crate::analytics::{AttendanceStats, SemesterResult};
use crate::config::EngineConfig;
use crate::kv::KvStore;
use crate::record::{
    plan_for_date, AttendanceRecord, ExamMark, MealBooking, MealPlan, MealType, Student,
    ValidateCollection,
};
use crate::seed;
use crate::store::RecordStore;
use crate::{Error, Result};

/// Whether the engine's collections are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Collections have not finished loading.
    Loading,
    /// Collections are loaded; all operations are valid.
    Ready,
}

/// Owns the persistence gateway and, once loaded, the student's records.
#[derive(Debug)]
pub struct StudentEngine<S: KvStore> {
    kv: S,
    config: EngineConfig,
    store: Option<RecordStore>,
    meal_plans: Vec<MealPlan>,
}

impl<S: KvStore> StudentEngine<S> {
    /// Create an engine in the `Loading` state. Call [`Self::load`] next.
    ///
    /// The hostel menu is available immediately; it is the same for every
    /// student and is not persisted.
    #[must_use]
    pub fn new(kv: S, config: EngineConfig) -> Self {
        Self {
            kv,
            config,
            store: None,
            meal_plans: seed::meal_plans(),
        }
    }

    /// Replace the weekly hostel menu.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for duplicate plan ids or weekdays.
    pub fn with_meal_plans(mut self, plans: Vec<MealPlan>) -> Result<Self> {
        plans.validate_collection()?;
        self.meal_plans = plans;
        Ok(self)
    }

    /// Create and load in one step.
    pub async fn open(kv: S, config: EngineConfig) -> (Self, LoadReport) {
        let mut engine = Self::new(kv, config);
        let report = engine.load().await;
        (engine, report)
    }

    /// Load every collection from the gateway, falling back to seed data
    /// per collection, and move to `Ready`.
    ///
    /// Loading never fails as a whole: a bad snapshot only affects its own
    /// collection and is listed in the returned report. Calling `load`
    /// again replaces the in-memory state with a fresh read.
    pub async fn load(&mut self) -> LoadReport {
        let (store, report) = loader::load_all(&self.kv, &self.config).await;
        info!(
            student = store.student().id(),
            courses = store.courses().len(),
            attendance = store.attendance().len(),
            exams = store.exams().len(),
            meal_bookings = store.meal_bookings().len(),
            recovered = report.recovered().len(),
            "student records ready"
        );
        self.store = Some(store);
        report
    }

    /// Current readiness.
    #[must_use]
    pub const fn readiness(&self) -> Readiness {
        if self.store.is_some() {
            Readiness::Ready
        } else {
            Readiness::Loading
        }
    }

    /// Shorthand for `readiness() == Readiness::Ready`.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.store.is_some()
    }

    /// The persistence gateway.
    #[must_use]
    pub const fn kv(&self) -> &S {
        &self.kv
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The loaded collections.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn store(&self) -> Result<&RecordStore> {
        self.store.as_ref().ok_or(Error::NotReady)
    }

    pub(crate) fn store_mut(&mut self) -> Result<&mut RecordStore> {
        self.store.as_mut().ok_or(Error::NotReady)
    }

    /// The current student.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn current_student(&self) -> Result<&Student> {
        Ok(self.store()?.student())
    }

    /// Attendance percentage for a course (0 with no records).
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn attendance_percentage(&self, course_id: &str) -> Result<u32> {
        Ok(self.store()?.attendance_percentage(course_id))
    }

    /// Attendance totals for a course.
    ///
    /// # Errors
    ///
    /// `Error::NotReady` while loading, `Error::InvalidInput` for an unknown course.
    pub fn attendance_stats(&self, course_id: &str) -> Result<AttendanceStats> {
        let store = self.store()?;
        let course = store
            .course(course_id)
            .ok_or_else(|| Error::InvalidInput(format!("unknown course '{course_id}'")))?;
        Ok(store.attendance_stats(course))
    }

    /// Attendance totals for every course.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn attendance_summary(&self) -> Result<Vec<AttendanceStats>> {
        Ok(self.store()?.attendance_summary())
    }

    /// Mean attendance percentage over all courses.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn overall_attendance(&self) -> Result<u32> {
        Ok(self.store()?.overall_attendance())
    }

    /// Attendance records for a course, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn attendance_history(&self, course_id: &str) -> Result<Vec<&AttendanceRecord>> {
        Ok(self.store()?.attendance_history(course_id))
    }

    /// Marks for a course, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn exams_for_course(&self, course_id: &str) -> Result<Vec<&ExamMark>> {
        Ok(self.store()?.exams_for_course(course_id))
    }

    /// SGPA for a semester, rounded to 2 decimals.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn sgpa(&self, semester: u32) -> Result<f64> {
        Ok(self.store()?.sgpa(semester))
    }

    /// Per-course breakdown behind [`Self::sgpa`].
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn semester_result(&self, semester: u32) -> Result<SemesterResult> {
        Ok(self.store()?.semester_result(semester))
    }

    /// CGPA over semesters `1..=through_semester`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn cgpa(&self, through_semester: u32) -> Result<f64> {
        Ok(self.store()?.cgpa(through_semester))
    }

    /// CGPA through the current student's semester.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn current_cgpa(&self) -> Result<f64> {
        let store = self.store()?;
        Ok(store.cgpa(store.student().semester()))
    }

    /// Whether `(date, meal_type)` has a `booked` booking.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn is_meal_booked(&self, date: NaiveDate, meal_type: MealType) -> Result<bool> {
        Ok(self.store()?.active_booking(date, meal_type).is_some())
    }

    /// The `booked` booking for `(date, meal_type)`, if any.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn active_booking(&self, date: NaiveDate, meal_type: MealType) -> Result<Option<&MealBooking>> {
        Ok(self.store()?.active_booking(date, meal_type))
    }

    /// The weekly hostel menu.
    #[must_use]
    pub fn meal_plans(&self) -> &[MealPlan] {
        &self.meal_plans
    }

    /// Menu served on `date`, falling back to the first plan of the week
    /// when that weekday has none.
    #[must_use]
    pub fn meal_plan_for(&self, date: NaiveDate) -> Option<&MealPlan> {
        plan_for_date(&self.meal_plans, date)
    }

    /// Bookings on a day, any status.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub fn bookings_on(&self, date: NaiveDate) -> Result<Vec<&MealBooking>> {
        Ok(self.store()?.bookings_on(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKvStore;

    #[test]
    fn test_new_engine_is_loading() {
        let engine = StudentEngine::new(MemoryKvStore::new(), EngineConfig::default());

        assert_eq!(engine.readiness(), Readiness::Loading);
        assert!(matches!(engine.store(), Err(Error::NotReady)));
        assert!(matches!(engine.attendance_percentage("c1"), Err(Error::NotReady)));
        assert!(matches!(engine.sgpa(4), Err(Error::NotReady)));
        assert!(matches!(engine.current_cgpa(), Err(Error::NotReady)));
    }

    #[tokio::test]
    async fn test_load_moves_to_ready() {
        let mut engine = StudentEngine::new(MemoryKvStore::new(), EngineConfig::default());
        let report = engine.load().await;

        assert!(engine.is_ready());
        assert_eq!(engine.current_student().unwrap().id(), "s1");
        assert_eq!(report.iter().count(), 5);
        assert!(report.iter().all(|(_, source)| matches!(source, LoadSource::Seed)));
    }

    #[test]
    fn test_meal_plan_available_while_loading() {
        let engine = StudentEngine::new(MemoryKvStore::new(), EngineConfig::default());
        // 2025-04-16 is a Wednesday
        let date = NaiveDate::from_ymd_opt(2025, 4, 16).unwrap();

        assert_eq!(engine.readiness(), Readiness::Loading);
        assert_eq!(engine.meal_plans().len(), 7);
        let plan = engine.meal_plan_for(date).unwrap();
        assert_eq!(plan.day(), chrono::Weekday::Wed);
        assert!(plan.items(MealType::Lunch).iter().any(|dish| dish == "Biryani"));
    }

    #[tokio::test]
    async fn test_unknown_course_stats_rejected() {
        let (engine, _) = StudentEngine::open(MemoryKvStore::new(), EngineConfig::default()).await;
        assert!(matches!(
            engine.attendance_stats("nope"),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(engine.attendance_percentage("nope").unwrap(), 0);
    }
}
