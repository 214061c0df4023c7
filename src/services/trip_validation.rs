use crate::models::trip::Trip;

/// Longest trip, in days, the generator is asked to plan.
pub const MAX_TRIP_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripValidationError {
    MissingDestination,
    EndDateNotAfterStart,
    NonPositiveBudget,
    NoTravelers,
    TripTooLong,
}

impl std::fmt::Display for TripValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripValidationError::MissingDestination => write!(f, "Destination is required"),
            TripValidationError::EndDateNotAfterStart => {
                write!(f, "End date must be after start date")
            }
            TripValidationError::NonPositiveBudget => {
                write!(f, "Total budget must be greater than 0")
            }
            TripValidationError::NoTravelers => {
                write!(f, "Number of travelers must be at least 1")
            }
            TripValidationError::TripTooLong => {
                write!(f, "Trip cannot be longer than {} days", MAX_TRIP_DAYS)
            }
        }
    }
}

impl std::error::Error for TripValidationError {}

/// Checks a trip is fit for option generation. Every failing rule is reported.
pub fn validate_trip(trip: &Trip) -> Result<(), Vec<TripValidationError>> {
    let mut errors = Vec::new();

    if trip.destination.trim().is_empty() {
        errors.push(TripValidationError::MissingDestination);
    }
    if trip.start_date >= trip.end_date {
        errors.push(TripValidationError::EndDateNotAfterStart);
    } else if trip.duration_days() > MAX_TRIP_DAYS {
        errors.push(TripValidationError::TripTooLong);
    }
    if !(trip.total_budget > 0.0) {
        errors.push(TripValidationError::NonPositiveBudget);
    }
    if trip.travelers < 1 {
        errors.push(TripValidationError::NoTravelers);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
