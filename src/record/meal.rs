//! Meal Booking Record - hostel mess reservations

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Validate;
use crate::{Error, Result};

/// Meal slot within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    /// Morning meal.
    Breakfast,
    /// Midday meal.
    Lunch,
    /// Evening meal.
    Dinner,
}

impl MealType {
    /// All meal slots in serving order.
    pub const ALL: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Get the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            other => Err(Error::InvalidInput(format!("unknown meal type '{other}'"))),
        }
    }
}

/// Lifecycle status of a booking. Cancellation is a status, never a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Reserved and not yet served.
    Booked,
    /// Cancelled by the student.
    Cancelled,
    /// Served.
    Consumed,
}

impl BookingStatus {
    /// Get the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Cancelled => "cancelled",
            Self::Consumed => "consumed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "booked" => Ok(Self::Booked),
            "cancelled" => Ok(Self::Cancelled),
            "consumed" => Ok(Self::Consumed),
            other => Err(Error::InvalidInput(format!(
                "unknown booking status '{other}'"
            ))),
        }
    }
}

/// Meal Booking: (student, date, meal) → status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealBooking {
    id: String,
    student_id: String,
    date: NaiveDate,
    meal_type: MealType,
    status: BookingStatus,
}

impl MealBooking {
    /// Create a new booking in `Booked` status.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        student_id: impl Into<String>,
        date: NaiveDate,
        meal_type: MealType,
    ) -> Self {
        Self {
            id: id.into(),
            student_id: student_id.into(),
            date,
            meal_type,
            status: BookingStatus::Booked,
        }
    }

    /// Get the booking ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the student ID.
    #[must_use]
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// Get the meal date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Get the meal slot.
    #[must_use]
    pub const fn meal_type(&self) -> MealType {
        self.meal_type
    }

    /// Get the booking status.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Not cancelled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.status, BookingStatus::Cancelled)
    }

    /// Whether this booking matches `(student_id, date, meal_type)`.
    #[must_use]
    pub fn is_for(&self, student_id: &str, date: NaiveDate, meal_type: MealType) -> bool {
        self.student_id == student_id && self.date == date && self.meal_type == meal_type
    }

    pub(crate) fn set_status(&mut self, status: BookingStatus) {
        self.status = status;
    }
}

impl Validate for MealBooking {
    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidInput("meal booking id must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_booking_is_booked_and_active() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let booking = MealBooking::new("meal_1", "s1", date, MealType::Lunch);

        assert_eq!(booking.status(), BookingStatus::Booked);
        assert!(booking.is_active());
        assert!(booking.is_for("s1", date, MealType::Lunch));
        assert!(!booking.is_for("s1", date, MealType::Dinner));
    }

    #[test]
    fn test_consumed_counts_as_active() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let mut booking = MealBooking::new("meal_1", "s1", date, MealType::Lunch);
        booking.set_status(BookingStatus::Consumed);
        assert!(booking.is_active());
        booking.set_status(BookingStatus::Cancelled);
        assert!(!booking.is_active());
    }

    #[test]
    fn test_meal_type_serialization() {
        assert_eq!(serde_json::to_string(&MealType::Breakfast).unwrap(), "\"breakfast\"");
        assert!("brunch".parse::<MealType>().is_err());
        assert_eq!("cancelled".parse::<BookingStatus>().unwrap(), BookingStatus::Cancelled);
    }
}
