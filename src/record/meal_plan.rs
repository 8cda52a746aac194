//! Meal Plan Record - the hostel's weekly menu

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::{MealType, Validate};
use crate::{Error, Result};

/// Menu for one day of the week.
///
/// Stored with the day as its full English name (`"Monday"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    id: String,
    #[serde(with = "weekday_name")]
    day: Weekday,
    breakfast: Vec<String>,
    lunch: Vec<String>,
    dinner: Vec<String>,
}

impl MealPlan {
    /// Create an empty menu for `day`; add dishes with [`Self::with_items`].
    #[must_use]
    pub fn new(id: impl Into<String>, day: Weekday) -> Self {
        Self {
            id: id.into(),
            day,
            breakfast: Vec::new(),
            lunch: Vec::new(),
            dinner: Vec::new(),
        }
    }

    /// Replace the dishes served at `meal_type`.
    #[must_use]
    pub fn with_items<I, T>(mut self, meal_type: MealType, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let items = items.into_iter().map(Into::into).collect();
        match meal_type {
            MealType::Breakfast => self.breakfast = items,
            MealType::Lunch => self.lunch = items,
            MealType::Dinner => self.dinner = items,
        }
        self
    }

    /// Get the plan ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the day of the week.
    #[must_use]
    pub const fn day(&self) -> Weekday {
        self.day
    }

    /// Dishes served at `meal_type`.
    #[must_use]
    pub fn items(&self, meal_type: MealType) -> &[String] {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
        }
    }
}

impl Validate for MealPlan {
    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidInput("meal plan id must not be empty".into()));
        }
        Ok(())
    }
}

/// Menu served on `date`.
///
/// Falls back to the first plan when the week has no entry for that
/// weekday; `None` only for an empty menu.
#[must_use]
pub fn plan_for_date(plans: &[MealPlan], date: NaiveDate) -> Option<&MealPlan> {
    let weekday = date.weekday();
    plans
        .iter()
        .find(|p| p.day == weekday)
        .or_else(|| plans.first())
}

mod weekday_name {
    use chrono::Weekday;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        let name = match day {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        };
        serializer.serialize_str(name)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse::<Weekday>()
            .map_err(|_| de::Error::custom(format!("unknown weekday '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        // 2025-04-14 is a Monday
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn week() -> Vec<MealPlan> {
        vec![
            MealPlan::new("mp1", Weekday::Mon).with_items(MealType::Lunch, ["Rice", "Dal"]),
            MealPlan::new("mp3", Weekday::Wed).with_items(MealType::Dinner, ["Chapati"]),
        ]
    }

    #[test]
    fn test_plan_for_matching_weekday() {
        let plans = week();
        assert_eq!(plan_for_date(&plans, date(16)).unwrap().id(), "mp3");
        assert_eq!(plan_for_date(&plans, date(21)).unwrap().id(), "mp1");
    }

    #[test]
    fn test_missing_weekday_falls_back_to_first_plan() {
        let plans = week();
        // Friday has no entry
        assert_eq!(plan_for_date(&plans, date(18)).unwrap().id(), "mp1");
        assert!(plan_for_date(&[], date(18)).is_none());
    }

    #[test]
    fn test_document_uses_full_day_name() {
        let plan = &week()[0];
        let json = serde_json::to_value(plan).unwrap();

        assert_eq!(json["day"], "Monday");
        assert_eq!(json["lunch"], serde_json::json!(["Rice", "Dal"]));
        assert_eq!(json["breakfast"], serde_json::json!([]));

        let decoded: MealPlan = serde_json::from_value(json).unwrap();
        assert_eq!(&decoded, plan);
        assert_eq!(decoded.items(MealType::Lunch), ["Rice", "Dal"]);
    }

    #[test]
    fn test_unknown_day_rejected() {
        let json = r#"{"id":"x","day":"Funday","breakfast":[],"lunch":[],"dinner":[]}"#;
        assert!(serde_json::from_str::<MealPlan>(json).is_err());
    }
}
