use crate::{
    db::TripStore,
    models::trip::TripListQuery,
};
use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

/*
    GET /health
*/
pub async fn health_check<S: TripStore + 'static>(store: web::Data<S>) -> impl Responder {
    let mut health = HealthStatus {
        status: "OK".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let storage = check_storage(store.get_ref()).await;
    if storage.status != "ok" {
        health.status = "degraded".to_string();
    }
    health.services.insert("storage".to_string(), storage);

    HttpResponse::Ok().json(health)
}

async fn check_storage<S: TripStore>(store: &S) -> ServiceStatus {
    let probe = TripListQuery {
        limit: Some(1),
        ..Default::default()
    };

    match store.list(&probe).await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: None,
        },
        Err(e) => {
            log::warn!("Storage health check failed: {}", e);
            ServiceStatus {
                status: "error".to_string(),
                details: Some(e.to_string()),
            }
        }
    }
}
