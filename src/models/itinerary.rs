use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Thematic style of a generated option. Drives the cost split and the
/// activity pool used for every day of the option.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FocusType {
    Balanced,
    Adventure,
    Cultural,
}

/// Share of the daily envelope spent on each category. The three shares sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSplit {
    pub activity: f64,
    pub meal: f64,
    pub accommodation: f64,
}

impl FocusType {
    /// Generation order of the option set.
    pub const ALL: [FocusType; 3] = [FocusType::Balanced, FocusType::Adventure, FocusType::Cultural];

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusType::Balanced => "balanced",
            FocusType::Adventure => "adventure",
            FocusType::Cultural => "cultural",
        }
    }

    pub fn parse(value: &str) -> Option<FocusType> {
        FocusType::ALL
            .into_iter()
            .find(|focus| focus.as_str().eq_ignore_ascii_case(value))
    }

    pub fn title(&self) -> &'static str {
        match self {
            FocusType::Balanced => "Balanced",
            FocusType::Adventure => "Adventure",
            FocusType::Cultural => "Cultural",
        }
    }

    pub fn cost_split(&self) -> CostSplit {
        match self {
            FocusType::Adventure => CostSplit {
                activity: 0.5,
                meal: 0.2,
                accommodation: 0.3,
            },
            FocusType::Cultural => CostSplit {
                activity: 0.3,
                meal: 0.4,
                accommodation: 0.3,
            },
            FocusType::Balanced => CostSplit {
                activity: 0.4,
                meal: 0.3,
                accommodation: 0.3,
            },
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FocusType::Adventure => {
                "An exhilarating journey filled with thrilling activities and nature exploration."
            }
            FocusType::Cultural => {
                "Immerse yourself in local traditions, history, and culinary delights."
            }
            FocusType::Balanced => {
                "A perfect blend of sightseeing, relaxation, and local experiences."
            }
        }
    }

    pub fn tags(&self) -> Vec<String> {
        let tags: &[&str] = match self {
            FocusType::Adventure => &["Adventure", "Nature", "Thrill", "Exploration"],
            FocusType::Cultural => &["Culture", "History", "Food", "Heritage"],
            FocusType::Balanced => &["Relaxation", "Sightseeing", "Shopping", "Local Life"],
        };
        tags.iter().map(|tag| tag.to_string()).collect()
    }
}

impl std::fmt::Display for FocusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    pub time: String,
    pub activity: String,
    pub category: String,
    pub location: String,
    pub duration: String,
    pub cost: f64,
    pub description: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Lunch,
    Dinner,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Meal {
    pub meal_type: MealType,
    pub restaurant: String,
    pub cuisine: String,
    pub cost: f64,
    pub location: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Accommodation {
    pub name: String,
    #[serde(rename = "type")]
    pub accommodation_type: String,
    pub cost: f64,
    pub location: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DailyItinerary {
    pub day_number: u32,
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
    pub meals: Vec<Meal>,
    pub accommodation: Accommodation,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TripOption {
    pub id: FocusType,
    pub name: String,
    pub focus: String,
    pub description: String,
    pub total_estimated_cost: i64,
    pub daily_itineraries: Vec<DailyItinerary>,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_splits_cover_the_whole_envelope() {
        for focus in FocusType::ALL {
            let split = focus.cost_split();
            let total = split.activity + split.meal + split.accommodation;
            assert!((total - 1.0).abs() < 1e-9, "{} split sums to {}", focus, total);
        }
    }

    #[test]
    fn test_focus_type_serializes_as_option_id() {
        assert_eq!(serde_json::to_string(&FocusType::Cultural).unwrap(), "\"cultural\"");
        assert_eq!(FocusType::parse("Adventure"), Some(FocusType::Adventure));
        assert_eq!(FocusType::parse("relaxed"), None);
    }
}
