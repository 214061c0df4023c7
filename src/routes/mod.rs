pub mod health;
pub mod trip;

use crate::db::TripStore;
use actix_web::web;

/// API routes, mounted under the configured API prefix
pub fn configure<S: TripStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check::<S>));
    cfg.service(
        web::scope("/trips")
            .route("", web::post().to(trip::create::<S>))
            .route("", web::get().to(trip::list::<S>))
            .route("/{id}", web::get().to(trip::get_by_id::<S>))
            .route("/{id}", web::put().to(trip::update::<S>))
            .route("/{id}", web::delete().to(trip::delete::<S>))
            .route(
                "/{id}/generate-options",
                web::post().to(trip::generate_options::<S>),
            )
            .route("/{id}/options", web::get().to(trip::get_options::<S>))
            .route(
                "/{id}/options/{option_id}",
                web::put().to(trip::update_option::<S>),
            )
            .route(
                "/{id}/select-option/{option_id}",
                web::post().to(trip::select_option::<S>),
            )
            .route("/{id}/itinerary", web::get().to(trip::get_itinerary::<S>))
            .route("/{id}/budget", web::get().to(trip::get_budget::<S>)),
    );
}
