use crate::models::{
    itinerary::{DailyItinerary, TripOption},
    trip::Trip,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct CategoryBreakdown {
    pub activities: f64,
    pub meals: f64,
    pub accommodation: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetSummary {
    pub currency: String,
    pub currency_symbol: String,
    pub total_budget: f64,
    pub total_estimated: f64,
    pub breakdown: CategoryBreakdown,
    pub utilization_percent: f64,
    pub remaining: f64,
    pub over_budget: bool,
}

pub struct PricingService;

impl PricingService {
    /// Activity, meal and accommodation spend for a single day
    pub fn day_cost(day: &DailyItinerary) -> f64 {
        let activities: f64 = day.activities.iter().map(|activity| activity.cost).sum();
        let meals: f64 = day.meals.iter().map(|meal| meal.cost).sum();
        activities + meals + day.accommodation.cost
    }

    /// Sum of all day costs, rounded to the nearest whole unit
    pub fn option_total(days: &[DailyItinerary]) -> i64 {
        let total: f64 = days.iter().map(Self::day_cost).sum();
        total.round() as i64
    }

    /// Bring `total_estimated_cost` back in line after days were edited
    pub fn recalculate(option: &mut TripOption) {
        option.total_estimated_cost = Self::option_total(&option.daily_itineraries);
    }

    pub fn category_breakdown(days: &[DailyItinerary]) -> CategoryBreakdown {
        days.iter().fold(CategoryBreakdown::default(), |mut breakdown, day| {
            breakdown.activities += day.activities.iter().map(|a| a.cost).sum::<f64>();
            breakdown.meals += day.meals.iter().map(|m| m.cost).sum::<f64>();
            breakdown.accommodation += day.accommodation.cost;
            breakdown
        })
    }

    /// Budget tracker view of a trip against the days of its chosen itinerary
    pub fn budget_summary(trip: &Trip, days: &[DailyItinerary]) -> BudgetSummary {
        let breakdown = Self::category_breakdown(days);
        let total_estimated = breakdown.activities + breakdown.meals + breakdown.accommodation;
        let utilization_percent = if trip.total_budget > 0.0 {
            total_estimated / trip.total_budget * 100.0
        } else {
            0.0
        };
        let remaining = trip.total_budget - total_estimated;

        BudgetSummary {
            currency: trip.currency.code().to_string(),
            currency_symbol: trip.currency.symbol().to_string(),
            total_budget: trip.total_budget,
            total_estimated,
            breakdown,
            utilization_percent,
            remaining,
            over_budget: remaining < 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::{Currency, TripCreate};
    use crate::services::itinerary_generation_service::OptionGenerator;
    use chrono::NaiveDate;
    use rand::{rngs::StdRng, SeedableRng};

    fn trip(budget: f64) -> Trip {
        TripCreate {
            destination: "Jaipur".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 13).unwrap(),
            total_budget: budget,
            currency: Currency::Usd,
            travelers: 1,
            themes: Vec::new(),
            accommodation_preference: Default::default(),
            transportation_preference: Default::default(),
            food_preference: Default::default(),
            special_requirements: None,
        }
        .into_trip()
    }

    #[test]
    fn test_budget_summary_for_generated_option() {
        let trip = trip(10000.0);
        let mut rng = StdRng::seed_from_u64(4);
        let options = OptionGenerator::new().generate_options(&trip, &mut rng);
        let cultural = &options[2];

        let summary = PricingService::budget_summary(&trip, &cultural.daily_itineraries);

        assert_eq!(summary.currency, "USD");
        assert_eq!(summary.currency_symbol, "$");
        assert!((summary.total_estimated - 8000.0).abs() < 1e-6);
        assert!((summary.breakdown.activities - 2400.0).abs() < 1e-6);
        assert!((summary.breakdown.meals - 3200.0).abs() < 1e-6);
        assert!((summary.breakdown.accommodation - 2400.0).abs() < 1e-6);
        assert!((summary.utilization_percent - 80.0).abs() < 1e-6);
        assert!((summary.remaining - 2000.0).abs() < 1e-6);
        assert!(!summary.over_budget);
    }

    #[test]
    fn test_recalculate_after_customization() {
        let trip = trip(10000.0);
        let mut rng = StdRng::seed_from_u64(4);
        let mut option = OptionGenerator::new().generate_options(&trip, &mut rng).remove(0);

        option.daily_itineraries[0].activities[0].cost += 5000.0;
        PricingService::recalculate(&mut option);

        assert_eq!(option.total_estimated_cost, 13000);
        let summary = PricingService::budget_summary(&trip, &option.daily_itineraries);
        assert!(summary.over_budget);
    }

    #[test]
    fn test_empty_itinerary() {
        let summary = PricingService::budget_summary(&trip(0.0), &[]);
        assert_eq!(summary.total_estimated, 0.0);
        assert_eq!(summary.utilization_percent, 0.0);
        assert_eq!(PricingService::option_total(&[]), 0);
    }
}
