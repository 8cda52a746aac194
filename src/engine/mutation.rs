//! Mutators: attendance marking and meal booking.
//!
//! Each mutator applies its upsert to the in-memory store first, then
//! rewrites the whole affected collection through the gateway. A failed
//! write is reported in [`Persisted::Failed`]; the in-memory change stays.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::StudentEngine;
use crate::config::Collection;
use crate::kv::KvStore;
use crate::record::{AttendanceRecord, AttendanceStatus, MealBooking, MealType};
use crate::store::Upsert;
use crate::{Error, Result};

/// Result of the durable write that follows a mutation.
#[derive(Debug)]
pub enum Persisted {
    /// The collection was rewritten.
    Written,
    /// Nothing changed, nothing was written.
    Unchanged,
    /// The write failed; the in-memory change was kept.
    Failed(Error),
}

impl Persisted {
    /// Whether the write failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// A mutator's resulting record plus its persistence outcome.
#[derive(Debug)]
pub struct Mutation<T> {
    /// The record as it now stands in memory.
    pub record: T,
    /// Outcome of the durable write.
    pub persisted: Persisted,
}

fn fresh_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

fn write_failed(key: String, error: &dyn std::error::Error) -> Persisted {
    warn!(%key, %error, "durable write failed; in-memory change kept");
    Persisted::Failed(Error::PersistenceWrite {
        key,
        reason: error.to_string(),
    })
}

impl<S: KvStore> StudentEngine<S> {
    async fn persist<T: Serialize + ?Sized>(&self, collection: Collection, value: &T) -> Persisted {
        let key = self.config.storage_key(collection);
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => return write_failed(key, &e),
        };
        match self.kv.set(&key, bytes).await {
            Ok(()) => {
                debug!(collection = %collection, "persisted collection");
                Persisted::Written
            }
            Err(e) => write_failed(key, &e),
        }
    }

    /// Mark today's attendance for a course.
    ///
    /// Upserts on (current student, course, today): a second call on the
    /// same day overwrites the status of the same record.
    ///
    /// # Errors
    ///
    /// `Error::NotReady` while loading, `Error::InvalidInput` for an
    /// unknown course.
    pub async fn mark_attendance(
        &mut self,
        course_id: &str,
        status: AttendanceStatus,
    ) -> Result<Mutation<AttendanceRecord>> {
        let today = self.config.today();
        let store = self.store_mut()?;
        if store.course(course_id).is_none() {
            return Err(Error::InvalidInput(format!("unknown course '{course_id}'")));
        }

        let (record, upsert) =
            store.upsert_attendance(course_id, today, status, || fresh_id("att"));
        debug!(course = course_id, %status, date = %today, ?upsert, "marked attendance");

        let persisted = self
            .persist(Collection::Attendance, self.store()?.attendance())
            .await;
        Ok(Mutation { record, persisted })
    }

    /// Book a meal.
    ///
    /// Reuses the existing booking for (current student, date, meal) and
    /// sets it to `booked`. A non-cancelled booking in the slot wins; with
    /// none, a cancelled booking is resurrected under its original ID.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub async fn book_meal(
        &mut self,
        meal_type: MealType,
        date: NaiveDate,
    ) -> Result<Mutation<MealBooking>> {
        let (record, upsert) =
            self.store_mut()?
                .upsert_booking(date, meal_type, || fresh_id("meal"));
        debug!(booking = record.id(), %meal_type, %date, ?upsert, "booked meal");

        let persisted = self
            .persist(Collection::MealBookings, self.store()?.meal_bookings())
            .await;
        Ok(Mutation { record, persisted })
    }

    /// Cancel one of the current student's bookings.
    ///
    /// Only the current student's bookings are matched: an ID belonging to
    /// another student is treated as unknown and left untouched.
    /// Unknown IDs and already-cancelled bookings are no-ops
    /// (`Persisted::Unchanged`); the record is `None` for unknown IDs.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub async fn cancel_meal_booking(
        &mut self,
        booking_id: &str,
    ) -> Result<Mutation<Option<MealBooking>>> {
        let Some((record, changed)) = self.store_mut()?.cancel_booking(booking_id) else {
            debug!(booking = booking_id, "cancel ignored: no such booking");
            return Ok(Mutation {
                record: None,
                persisted: Persisted::Unchanged,
            });
        };

        let persisted = if changed {
            debug!(booking = booking_id, "cancelled meal");
            self.persist(Collection::MealBookings, self.store()?.meal_bookings())
                .await
        } else {
            Persisted::Unchanged
        };
        Ok(Mutation {
            record: Some(record),
            persisted,
        })
    }

    /// Cancel the `booked` booking for `(date, meal_type)` if there is one,
    /// otherwise book it.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` while loading.
    pub async fn toggle_meal_booking(
        &mut self,
        date: NaiveDate,
        meal_type: MealType,
    ) -> Result<Mutation<MealBooking>> {
        let active_id = self
            .store()?
            .active_booking(date, meal_type)
            .map(|b| b.id().to_string());

        match active_id {
            Some(id) => {
                let mutation = self.cancel_meal_booking(&id).await?;
                let record = mutation
                    .record
                    .ok_or_else(|| Error::Other(format!("booking '{id}' vanished")))?;
                Ok(Mutation {
                    record,
                    persisted: mutation.persisted,
                })
            }
            None => self.book_meal(meal_type, date).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::EngineConfig;
    use crate::kv::MemoryKvStore;
    use crate::record::BookingStatus;

    fn config() -> EngineConfig {
        EngineConfig::builder()
            .clock(FixedClock::new(NaiveDate::from_ymd_opt(2025, 4, 16).unwrap()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_mutators_not_ready() {
        let mut engine = StudentEngine::new(MemoryKvStore::new(), config());
        let date = NaiveDate::from_ymd_opt(2025, 4, 16).unwrap();

        assert!(matches!(
            engine.mark_attendance("c1", AttendanceStatus::Present).await,
            Err(Error::NotReady)
        ));
        assert!(matches!(
            engine.book_meal(MealType::Lunch, date).await,
            Err(Error::NotReady)
        ));
        assert!(matches!(
            engine.cancel_meal_booking("meal_1").await,
            Err(Error::NotReady)
        ));
        assert!(engine.kv().is_empty());
    }

    #[tokio::test]
    async fn test_mark_attendance_persists_collection() {
        let (mut engine, _) = StudentEngine::open(MemoryKvStore::new(), config()).await;

        let mutation = engine
            .mark_attendance("c2", AttendanceStatus::Late)
            .await
            .unwrap();
        assert!(matches!(mutation.persisted, Persisted::Written));

        let bytes = engine.kv().get("attendance").await.unwrap().unwrap();
        let stored: Vec<AttendanceRecord> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(stored.len(), engine.store().unwrap().attendance().len());
        assert!(stored.contains(&mutation.record));
    }

    #[tokio::test]
    async fn test_unknown_course_rejected_without_write() {
        let (mut engine, _) = StudentEngine::open(MemoryKvStore::new(), config()).await;

        let result = engine.mark_attendance("c404", AttendanceStatus::Present).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(!engine.kv().exists("attendance").await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_books_then_cancels() {
        let (mut engine, _) = StudentEngine::open(MemoryKvStore::new(), config()).await;
        let date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();

        let booked = engine.toggle_meal_booking(date, MealType::Breakfast).await.unwrap();
        assert_eq!(booked.record.status(), BookingStatus::Booked);
        assert!(engine.is_meal_booked(date, MealType::Breakfast).unwrap());

        let cancelled = engine.toggle_meal_booking(date, MealType::Breakfast).await.unwrap();
        assert_eq!(cancelled.record.id(), booked.record.id());
        assert_eq!(cancelled.record.status(), BookingStatus::Cancelled);
        assert!(!engine.is_meal_booked(date, MealType::Breakfast).unwrap());
    }
}
