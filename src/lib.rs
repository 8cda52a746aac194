//! # campus-records: Student Record Engine
//!
//! Derivation and mutation engine behind a university student app:
//! attendance percentages, semester GPA, and idempotent attendance and
//! meal-booking upserts over a device-local key-value store.
//!
//! ## Design Principles
//!
//! - **Explicit store**: one [`StudentEngine`] owns the collections; no
//!   process-wide mutable state
//! - **Explicit readiness**: student-scoped calls return
//!   [`Error::NotReady`] until [`StudentEngine::load`] completes
//! - **Per-collection recovery**: a malformed snapshot falls back to seed
//!   data for that collection only
//! - **Upsert, never duplicate**: one attendance record per (student,
//!   course, day); one active booking per (student, day, meal)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use campus_records::kv::FileKvStore;
//! use campus_records::record::MealType;
//! use campus_records::{EngineConfig, StudentEngine};
//!
//! # async fn example() -> campus_records::Result<()> {
//! let kv = FileKvStore::open("./data").await?;
//! let (mut engine, report) = StudentEngine::open(kv, EngineConfig::default()).await;
//! for (collection, source) in report.iter() {
//!     println!("{collection}: {source}");
//! }
//!
//! let today = engine.config().today();
//! let booking = engine.book_meal(MealType::Dinner, today).await?;
//! if booking.persisted.is_failed() {
//!     eprintln!("booking kept in memory but not saved");
//! }
//! println!("SGPA: {:.2}", engine.sgpa(4)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod analytics;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod kv;
pub mod record;
pub mod seed;
pub mod store;

pub use config::{Collection, EngineConfig};
pub use engine::{LoadReport, LoadSource, Mutation, Persisted, Readiness, StudentEngine};
pub use error::{Error, Result};
pub use store::RecordStore;
