use crate::db::{TripStore, TripStoreError, DEFAULT_LIST_LIMIT};
use crate::models::trip::{Trip, TripListQuery};
use tokio::sync::RwLock;

/// Process-local trip store. Used when no MongoDB URI is configured and in tests.
#[derive(Default)]
pub struct InMemoryTripStore {
    trips: RwLock<Vec<Trip>>,
}

impl InMemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TripStore for InMemoryTripStore {
    async fn insert(&self, trip: Trip) -> Result<Trip, TripStoreError> {
        let mut trips = self.trips.write().await;
        if trips.iter().any(|existing| existing.id == trip.id) {
            return Err(TripStoreError::Database(format!(
                "duplicate trip id {}",
                trip.id
            )));
        }
        trips.push(trip.clone());
        Ok(trip)
    }

    async fn get(&self, id: &str) -> Result<Trip, TripStoreError> {
        self.trips
            .read()
            .await
            .iter()
            .find(|trip| trip.id == id)
            .cloned()
            .ok_or(TripStoreError::NotFound)
    }

    async fn modify<F>(&self, id: &str, apply: F) -> Result<Trip, TripStoreError>
    where
        F: Fn(&mut Trip) -> Result<(), TripStoreError>,
    {
        let mut trips = self.trips.write().await;
        let slot = trips
            .iter_mut()
            .find(|trip| trip.id == id)
            .ok_or(TripStoreError::NotFound)?;
        let mut trip = slot.clone();
        apply(&mut trip)?;
        trip.touch();
        *slot = trip.clone();
        Ok(trip)
    }

    async fn delete(&self, id: &str) -> Result<(), TripStoreError> {
        let mut trips = self.trips.write().await;
        let index = trips
            .iter()
            .position(|trip| trip.id == id)
            .ok_or(TripStoreError::NotFound)?;
        trips.remove(index);
        Ok(())
    }

    async fn list(&self, query: &TripListQuery) -> Result<Vec<Trip>, TripStoreError> {
        let trips = self.trips.read().await;
        let mut matching: Vec<Trip> = trips
            .iter()
            .filter(|trip| query.status.map_or(true, |status| trip.status == status))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let skip = query.skip.unwrap_or(0) as usize;
        let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).max(0) as usize;
        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }
}
