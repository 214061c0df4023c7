use crate::db::{TripStore, TripStoreError, DEFAULT_LIST_LIMIT};
use crate::models::trip::{Trip, TripListQuery};
use bson::doc;
use futures::TryStreamExt;
use mongodb::{
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::sync::Arc;
use std::time::Duration;

pub const DATABASE_NAME: &str = "TripPlanner";
pub const TRIP_COLLECTION: &str = "Trips";
const MAX_WRITE_ATTEMPTS: u32 = 5;

pub async fn create_mongo_client(uri: &str) -> Result<Arc<Client>, mongodb::error::Error> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    // A failed ping is not fatal, the driver reconnects on demand
    match client
        .database(DATABASE_NAME)
        .run_command(doc! {"ping": 1})
        .await
    {
        Ok(_) => log::info!("Connected to MongoDB and verified with ping command"),
        Err(e) => log::warn!("Connected to MongoDB but ping failed: {}", e),
    }

    Ok(Arc::new(client))
}

pub struct MongoTripStore {
    collection: Collection<Trip>,
}

impl MongoTripStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            collection: client.database(DATABASE_NAME).collection(TRIP_COLLECTION),
        }
    }
}

impl TripStore for MongoTripStore {
    async fn insert(&self, trip: Trip) -> Result<Trip, TripStoreError> {
        self.collection.insert_one(&trip).await?;
        Ok(trip)
    }

    async fn get(&self, id: &str) -> Result<Trip, TripStoreError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(TripStoreError::NotFound)
    }

    async fn modify<F>(&self, id: &str, apply: F) -> Result<Trip, TripStoreError>
    where
        F: Fn(&mut Trip) -> Result<(), TripStoreError>,
    {
        // Optimistic write: the replace only matches if nobody touched the
        // trip since it was read
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let mut trip = self.get(id).await?;
            let seen = bson::to_bson(&trip.updated_at)
                .map_err(|e| TripStoreError::Database(e.to_string()))?;
            apply(&mut trip)?;
            trip.touch();

            let result = self
                .collection
                .replace_one(doc! { "_id": id, "updated_at": seen }, &trip)
                .await?;
            if result.matched_count == 1 {
                return Ok(trip);
            }
            log::debug!("Trip {} changed during write (attempt {})", id, attempt);
        }

        log::warn!("Giving up on trip {} after {} conflicting writes", id, MAX_WRITE_ATTEMPTS);
        Err(TripStoreError::Conflict)
    }

    async fn delete(&self, id: &str) -> Result<(), TripStoreError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        if result.deleted_count == 0 {
            return Err(TripStoreError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, query: &TripListQuery) -> Result<Vec<Trip>, TripStoreError> {
        let filter = match query.status {
            Some(status) => doc! { "status": status.as_str() },
            None => doc! {},
        };

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .skip(query.skip.unwrap_or(0))
            .limit(query.limit.unwrap_or(DEFAULT_LIST_LIMIT))
            .await?;

        Ok(cursor.try_collect().await?)
    }
}
