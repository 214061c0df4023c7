use actix_web::{web, App};
use serde_json::{json, Value};

use trip_planner_api::{config::AppConfig, db::memory::InMemoryTripStore, routes};

pub struct TestApp {
    pub store: web::Data<InMemoryTripStore>,
    pub config: web::Data<AppConfig>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            store: web::Data::new(InMemoryTripStore::new()),
            config: web::Data::new(AppConfig::default()),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.store.clone())
            .app_data(self.config.clone())
            .service(
                web::scope(&self.config.api_prefix)
                    .configure(routes::configure::<InMemoryTripStore>),
            )
    }
}

pub fn goa_trip() -> Value {
    json!({
        "destination": "Goa",
        "start_date": "2025-03-01",
        "end_date": "2025-03-03",
        "total_budget": 30000,
        "travelers": 2,
        "themes": ["beach", "food", "nightlife"],
        "accommodation_preference": "mid-range",
        "transportation_preference": "mixed"
    })
}
