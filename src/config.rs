//! Engine configuration
//!
//! Storage keys, seed-data parameters and the clock, assembled with
//! [`EngineConfig::builder`].

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::clock::{Clock, SystemClock};
use crate::kv::is_portable_key;
use crate::{Error, Result};

/// Default RNG seed for the seed dataset.
pub const DEFAULT_SEED: u64 = 0x5EED_CA4D;

/// Persisted collections, one storage key each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// The current student (a single document).
    Student,
    /// Course catalogue.
    Courses,
    /// Attendance records.
    Attendance,
    /// Exam marks.
    Exams,
    /// Meal bookings.
    MealBookings,
}

impl Collection {
    /// All collections in load order.
    pub const ALL: [Self; 5] = [
        Self::Student,
        Self::Courses,
        Self::Attendance,
        Self::Exams,
        Self::MealBookings,
    ];

    /// Storage key (before any configured prefix).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Courses => "courses",
            Self::Attendance => "attendance",
            Self::Exams => "exams",
            Self::MealBookings => "mealBookings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Configuration for a [`crate::StudentEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    key_prefix: String,
    seed: u64,
    attendance_history_days: u32,
    meal_horizon_days: u32,
    current_student_id: String,
    clock: Arc<dyn Clock>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            key_prefix: String::new(),
            seed: DEFAULT_SEED,
            attendance_history_days: 30,
            meal_horizon_days: 7,
            current_student_id: "s1".to_string(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl EngineConfig {
    /// Create a builder starting from defaults.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Full storage key for a collection, including the prefix.
    #[must_use]
    pub fn storage_key(&self, collection: Collection) -> String {
        format!("{}{}", self.key_prefix, collection.key())
    }

    /// Prefix prepended to every storage key.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// RNG seed for the seed dataset.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Days of seeded attendance history, counting back from today.
    #[must_use]
    pub const fn attendance_history_days(&self) -> u32 {
        self.attendance_history_days
    }

    /// Days of seeded meal bookings, counting forward from today.
    #[must_use]
    pub const fn meal_horizon_days(&self) -> u32 {
        self.meal_horizon_days
    }

    /// Seed student made current when no student snapshot exists.
    #[must_use]
    pub fn current_student_id(&self) -> &str {
        &self.current_student_id
    }

    /// Today's date according to the configured clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

/// Builder for `EngineConfig`.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Namespace every storage key, e.g. `"campus."`.
    ///
    /// Limited to ASCII alphanumerics and `_ - .` (no leading `.`) so the
    /// prefixed keys stay valid for every `KvStore` backend.
    #[must_use]
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.key_prefix = prefix.into();
        self
    }

    /// Set the seed-data RNG seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the seeded attendance window.
    #[must_use]
    pub const fn attendance_history_days(mut self, days: u32) -> Self {
        self.config.attendance_history_days = days;
        self
    }

    /// Set the seeded meal booking window.
    #[must_use]
    pub const fn meal_horizon_days(mut self, days: u32) -> Self {
        self.config.meal_horizon_days = days;
        self
    }

    /// Choose which seed student is current.
    #[must_use]
    pub fn current_student_id(mut self, id: impl Into<String>) -> Self {
        self.config.current_student_id = id.into();
        self
    }

    /// Replace the clock.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.config.clock = Arc::new(clock);
        self
    }

    /// Build the `EngineConfig`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the key prefix contains characters
    /// outside the portable key alphabet.
    pub fn build(self) -> Result<EngineConfig> {
        if !is_portable_key(&self.config.key_prefix) {
            return Err(Error::InvalidInput(format!(
                "unsupported key prefix '{}'",
                self.config.key_prefix
            )));
        }
        Ok(self.config)
    }
}
