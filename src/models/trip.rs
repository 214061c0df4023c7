use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::itinerary::{FocusType, TripOption};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccommodationPreference {
    #[serde(rename = "budget")]
    Budget,
    #[default]
    #[serde(rename = "mid-range")]
    MidRange,
    #[serde(rename = "luxury")]
    Luxury,
}

impl AccommodationPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccommodationPreference::Budget => "budget",
            AccommodationPreference::MidRange => "mid-range",
            AccommodationPreference::Luxury => "luxury",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportationPreference {
    Public,
    Private,
    #[default]
    Mixed,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FoodPreference {
    Local,
    International,
    #[default]
    Mixed,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Draft,
    Planned,
    Booked,
    Completed,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Draft => "draft",
            TripStatus::Planned => "planned",
            TripStatus::Booked => "booked",
            TripStatus::Completed => "completed",
        }
    }
}

// Accepts "2024-01-15" as well as "2024-01-15T00:00:00" and keeps the date part
fn parse_trip_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn deserialize_trip_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_trip_date(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid trip date: {}", value)))
}

fn deserialize_optional_trip_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(value) => parse_trip_date(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid trip date: {}", value))),
    }
}

/// A stored travel request together with the options generated for it.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Trip {
    #[serde(rename = "_id")]
    pub id: String,
    pub destination: String,
    #[serde(deserialize_with = "deserialize_trip_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_trip_date")]
    pub end_date: NaiveDate,
    pub total_budget: f64,
    #[serde(default)]
    pub currency: Currency,
    pub travelers: u32,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub accommodation_preference: AccommodationPreference,
    #[serde(default)]
    pub transportation_preference: TransportationPreference,
    #[serde(default)]
    pub food_preference: FoodPreference,
    pub special_requirements: Option<String>,
    #[serde(default)]
    pub status: TripStatus,
    #[serde(default)]
    pub options: Vec<TripOption>,
    pub selected_option: Option<FocusType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Inclusive number of calendar days covered by the trip. Non-positive when
    /// the end date precedes the start date.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn selected(&self) -> Option<&TripOption> {
        let selected = self.selected_option?;
        self.options.iter().find(|option| option.id == selected)
    }

    /// Bumps `updated_at`, strictly past its previous value.
    pub fn touch(&mut self) {
        let floor = self.updated_at + chrono::Duration::microseconds(1);
        self.updated_at = Utc::now().max(floor);
    }

    /// Merges the given fields. Generated options are discarded when any field
    /// the generator reads changes, and the trip goes back to draft unless the
    /// update sets a status itself.
    pub fn apply_update(&mut self, update: TripUpdate) {
        let changes_options = update.destination.as_ref().map_or(false, |d| *d != self.destination)
            || update.start_date.map_or(false, |d| d != self.start_date)
            || update.end_date.map_or(false, |d| d != self.end_date)
            || update.total_budget.map_or(false, |b| b != self.total_budget)
            || update
                .accommodation_preference
                .map_or(false, |p| p != self.accommodation_preference);
        if changes_options {
            self.options.clear();
            self.selected_option = None;
            self.status = TripStatus::Draft;
        }

        if let Some(destination) = update.destination {
            self.destination = destination;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(total_budget) = update.total_budget {
            self.total_budget = total_budget;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(travelers) = update.travelers {
            self.travelers = travelers;
        }
        if let Some(themes) = update.themes {
            self.themes = themes;
        }
        if let Some(preference) = update.accommodation_preference {
            self.accommodation_preference = preference;
        }
        if let Some(preference) = update.transportation_preference {
            self.transportation_preference = preference;
        }
        if let Some(preference) = update.food_preference {
            self.food_preference = preference;
        }
        if let Some(requirements) = update.special_requirements {
            self.special_requirements = Some(requirements);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.touch();
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripCreate {
    pub destination: String,
    #[serde(deserialize_with = "deserialize_trip_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_trip_date")]
    pub end_date: NaiveDate,
    pub total_budget: f64,
    #[serde(default)]
    pub currency: Currency,
    pub travelers: u32,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub accommodation_preference: AccommodationPreference,
    #[serde(default)]
    pub transportation_preference: TransportationPreference,
    #[serde(default)]
    pub food_preference: FoodPreference,
    #[serde(default)]
    pub special_requirements: Option<String>,
}

impl TripCreate {
    pub fn into_trip(self) -> Trip {
        let now = Utc::now();
        Trip {
            id: uuid::Uuid::new_v4().to_string(),
            destination: self.destination,
            start_date: self.start_date,
            end_date: self.end_date,
            total_budget: self.total_budget,
            currency: self.currency,
            travelers: self.travelers,
            themes: self.themes,
            accommodation_preference: self.accommodation_preference,
            transportation_preference: self.transportation_preference,
            food_preference: self.food_preference,
            special_requirements: self.special_requirements,
            status: TripStatus::Draft,
            options: Vec::new(),
            selected_option: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TripUpdate {
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_trip_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_trip_date")]
    pub end_date: Option<NaiveDate>,
    pub total_budget: Option<f64>,
    pub currency: Option<Currency>,
    pub travelers: Option<u32>,
    pub themes: Option<Vec<String>>,
    pub accommodation_preference: Option<AccommodationPreference>,
    pub transportation_preference: Option<TransportationPreference>,
    pub food_preference: Option<FoodPreference>,
    pub special_requirements: Option<String>,
    pub status: Option<TripStatus>,
}

/// `GET /trips` query string
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TripListQuery {
    pub skip: Option<u64>,
    pub limit: Option<i64>,
    pub status: Option<TripStatus>,
}
