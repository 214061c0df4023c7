pub mod memory;
pub mod mongo;

use crate::models::{
    itinerary::{FocusType, TripOption},
    trip::{Trip, TripListQuery, TripStatus, TripUpdate},
};

pub const DEFAULT_LIST_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum TripStoreError {
    NotFound,
    OptionNotFound,
    /// The trip kept changing underneath a write
    Conflict,
    Database(String),
}

impl std::fmt::Display for TripStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripStoreError::NotFound => write!(f, "Trip not found"),
            TripStoreError::OptionNotFound => write!(f, "Trip option not found"),
            TripStoreError::Conflict => write!(f, "Trip was modified concurrently"),
            TripStoreError::Database(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl std::error::Error for TripStoreError {}

impl From<mongodb::error::Error> for TripStoreError {
    fn from(err: mongodb::error::Error) -> Self {
        TripStoreError::Database(err.to_string())
    }
}

/// Persistence for trips and their generated options.
///
/// Every change to a stored trip goes through [`TripStore::modify`], which
/// applies the edit atomically with respect to other writers. Option
/// bookkeeping is layered on top of it.
pub trait TripStore {
    async fn insert(&self, trip: Trip) -> Result<Trip, TripStoreError>;
    async fn get(&self, id: &str) -> Result<Trip, TripStoreError>;
    async fn delete(&self, id: &str) -> Result<(), TripStoreError>;
    /// Newest first, filtered by status when one is given
    async fn list(&self, query: &TripListQuery) -> Result<Vec<Trip>, TripStoreError>;

    /// Applies `apply` to the stored trip and writes the result back, bumping
    /// `updated_at`. Nothing is written when `apply` fails. `apply` may run
    /// more than once if the store has to retry.
    async fn modify<F>(&self, id: &str, apply: F) -> Result<Trip, TripStoreError>
    where
        F: Fn(&mut Trip) -> Result<(), TripStoreError>;

    async fn update(&self, id: &str, update: TripUpdate) -> Result<Trip, TripStoreError> {
        self.modify(id, |trip| {
            trip.apply_update(update.clone());
            Ok(())
        })
        .await
    }

    /// Replace the whole option set. Any earlier selection no longer applies.
    async fn save_options(
        &self,
        id: &str,
        options: Vec<TripOption>,
    ) -> Result<Trip, TripStoreError> {
        self.modify(id, |trip| {
            trip.options = options.clone();
            if trip.selected_option.take().is_some() {
                trip.status = TripStatus::Draft;
            }
            Ok(())
        })
        .await
    }

    async fn update_option(&self, id: &str, option: TripOption) -> Result<Trip, TripStoreError> {
        self.modify(id, |trip| {
            let slot = trip
                .options
                .iter_mut()
                .find(|existing| existing.id == option.id)
                .ok_or(TripStoreError::OptionNotFound)?;
            *slot = option.clone();
            Ok(())
        })
        .await
    }

    async fn select_option(&self, id: &str, focus: FocusType) -> Result<Trip, TripStoreError> {
        self.modify(id, |trip| {
            if !trip.options.iter().any(|option| option.id == focus) {
                return Err(TripStoreError::OptionNotFound);
            }
            trip.selected_option = Some(focus);
            trip.status = TripStatus::Planned;
            Ok(())
        })
        .await
    }
}
