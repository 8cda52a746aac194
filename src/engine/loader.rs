//! Collection loader: snapshot first, seed on absence or failure.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{Collection, EngineConfig};
use crate::kv::KvStore;
use crate::record::ValidateCollection;
use crate::seed;
use crate::store::RecordStore;
use crate::Error;

/// Where a collection's contents came from.
#[derive(Debug)]
pub enum LoadSource {
    /// Decoded from the stored snapshot.
    Snapshot,
    /// No snapshot stored; seed data used.
    Seed,
    /// Snapshot unreadable or malformed; seed data used instead.
    Recovered(Error),
}

impl LoadSource {
    /// Whether seed data was used.
    #[must_use]
    pub const fn is_seed(&self) -> bool {
        !matches!(self, Self::Snapshot)
    }
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snapshot => f.write_str("snapshot"),
            Self::Seed => f.write_str("seed"),
            Self::Recovered(e) => write!(f, "seed (recovered: {e})"),
        }
    }
}

/// Per-collection outcome of [`super::StudentEngine::load`].
#[derive(Debug)]
pub struct LoadReport {
    sources: Vec<(Collection, LoadSource)>,
}

impl LoadReport {
    /// Source of one collection.
    #[must_use]
    pub fn source(&self, collection: Collection) -> Option<&LoadSource> {
        self.sources
            .iter()
            .find(|(c, _)| *c == collection)
            .map(|(_, source)| source)
    }

    /// All collections with their sources, in load order.
    pub fn iter(&self) -> impl Iterator<Item = (Collection, &LoadSource)> {
        self.sources.iter().map(|(c, s)| (*c, s))
    }

    /// Collections whose snapshot had to be discarded.
    #[must_use]
    pub fn recovered(&self) -> Vec<Collection> {
        self.sources
            .iter()
            .filter(|(_, s)| matches!(s, LoadSource::Recovered(_)))
            .map(|(c, _)| *c)
            .collect()
    }
}

async fn load_collection<S, T>(
    kv: &S,
    config: &EngineConfig,
    collection: Collection,
    seed: impl FnOnce() -> T,
) -> (T, LoadSource)
where
    S: KvStore,
    T: DeserializeOwned + ValidateCollection,
{
    let key = config.storage_key(collection);
    let bytes = match kv.get(&key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!(collection = %collection, "no snapshot stored, using seed data");
            return (seed(), LoadSource::Seed);
        }
        Err(e) => {
            warn!(collection = %collection, error = %e, "snapshot unreadable, using seed data");
            return (seed(), LoadSource::Recovered(e));
        }
    };

    match decode::<T>(&bytes) {
        Ok(value) => {
            debug!(collection = %collection, bytes = bytes.len(), "loaded snapshot");
            (value, LoadSource::Snapshot)
        }
        Err(reason) => {
            warn!(collection = %collection, %reason, "malformed snapshot, using seed data");
            let error = Error::MalformedStoredData { key, reason };
            (seed(), LoadSource::Recovered(error))
        }
    }
}

fn decode<T: DeserializeOwned + ValidateCollection>(bytes: &[u8]) -> Result<T, String> {
    let value: T = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    value.validate_collection().map_err(|e| e.to_string())?;
    Ok(value)
}

/// Load all five collections concurrently; each falls back independently.
pub(crate) async fn load_all<S: KvStore>(kv: &S, config: &EngineConfig) -> (RecordStore, LoadReport) {
    let (
        (student, student_src),
        (courses, courses_src),
        (attendance, attendance_src),
        (exams, exams_src),
        (meal_bookings, meals_src),
    ) = tokio::join!(
        load_collection(kv, config, Collection::Student, || seed::current_student(config)),
        load_collection(kv, config, Collection::Courses, seed::courses),
        load_collection(kv, config, Collection::Attendance, || seed::attendance(config)),
        load_collection(kv, config, Collection::Exams, || seed::exams(config)),
        load_collection(kv, config, Collection::MealBookings, || seed::meal_bookings(config)),
    );

    let report = LoadReport {
        sources: vec![
            (Collection::Student, student_src),
            (Collection::Courses, courses_src),
            (Collection::Attendance, attendance_src),
            (Collection::Exams, exams_src),
            (Collection::MealBookings, meals_src),
        ],
    };
    let store = RecordStore::new(student, courses, attendance, exams, meal_bookings);
    (store, report)
}
