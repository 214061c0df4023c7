use crate::{
    config::AppConfig,
    db::{TripStore, TripStoreError},
    models::{
        itinerary::{FocusType, TripOption},
        trip::{TripCreate, TripListQuery, TripUpdate},
    },
    services::{
        itinerary_generation_service::generate_trip_options,
        pricing_service::PricingService,
        trip_validation::{validate_trip, TripValidationError},
    },
};
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, Default)]
pub struct GenerateOptionsRequest {
    #[serde(default)]
    pub force_regenerate: bool,
}

fn store_error(err: TripStoreError, action: &str) -> HttpResponse {
    match err {
        TripStoreError::NotFound | TripStoreError::OptionNotFound => {
            HttpResponse::NotFound().json(json!({ "error": err.to_string() }))
        }
        TripStoreError::Conflict => {
            log::warn!("Failed to {}: {}", action, err);
            HttpResponse::Conflict().json(json!({ "error": err.to_string() }))
        }
        TripStoreError::Database(_) => {
            log::error!("Failed to {}: {}", action, err);
            HttpResponse::InternalServerError().json(json!({ "error": format!("Failed to {}", action) }))
        }
    }
}

fn validation_error(errors: Vec<TripValidationError>) -> HttpResponse {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    HttpResponse::UnprocessableEntity().json(json!({ "errors": messages }))
}

fn parse_option_id(option_id: &str) -> Result<FocusType, HttpResponse> {
    FocusType::parse(option_id).ok_or_else(|| {
        HttpResponse::NotFound().json(json!({ "error": TripStoreError::OptionNotFound.to_string() }))
    })
}

/*
    POST /trips
*/
pub async fn create<S: TripStore + 'static>(
    store: web::Data<S>,
    input: web::Json<TripCreate>,
) -> impl Responder {
    let trip = input.into_inner().into_trip();
    if let Err(errors) = validate_trip(&trip) {
        return validation_error(errors);
    }

    match store.insert(trip).await {
        Ok(trip) => {
            log::info!("Created trip {} to {}", trip.id, trip.destination);
            HttpResponse::Ok().json(trip)
        }
        Err(err) => store_error(err, "create trip"),
    }
}

/*
    GET /trips?skip=&limit=&status=
*/
pub async fn list<S: TripStore + 'static>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    query: web::Query<TripListQuery>,
) -> impl Responder {
    let mut query = query.into_inner();
    query.limit = Some(query.limit.unwrap_or(config.list_limit));

    match store.list(&query).await {
        Ok(trips) => HttpResponse::Ok().json(trips),
        Err(err) => store_error(err, "list trips"),
    }
}

/*
    GET /trips/{id}
*/
pub async fn get_by_id<S: TripStore + 'static>(
    path: web::Path<String>,
    store: web::Data<S>,
) -> impl Responder {
    match store.get(&path.into_inner()).await {
        Ok(trip) => HttpResponse::Ok().json(trip),
        Err(err) => store_error(err, "retrieve trip"),
    }
}

/*
    PUT /trips/{id}
*/
pub async fn update<S: TripStore + 'static>(
    path: web::Path<String>,
    store: web::Data<S>,
    input: web::Json<TripUpdate>,
) -> impl Responder {
    match store.update(&path.into_inner(), input.into_inner()).await {
        Ok(trip) => HttpResponse::Ok().json(trip),
        Err(err) => store_error(err, "update trip"),
    }
}

/*
    DELETE /trips/{id}
*/
pub async fn delete<S: TripStore + 'static>(
    path: web::Path<String>,
    store: web::Data<S>,
) -> impl Responder {
    match store.delete(&path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Trip deleted successfully" })),
        Err(err) => store_error(err, "delete trip"),
    }
}

/*
    POST /trips/{id}/generate-options
    Existing options are returned as they are unless `force_regenerate` is set.
*/
pub async fn generate_options<S: TripStore + 'static>(
    path: web::Path<String>,
    store: web::Data<S>,
    input: Option<web::Json<GenerateOptionsRequest>>,
) -> impl Responder {
    let id = path.into_inner();
    let request = input.map(|json| json.into_inner()).unwrap_or_default();

    let trip = match store.get(&id).await {
        Ok(trip) => trip,
        Err(err) => return store_error(err, "retrieve trip"),
    };

    if !trip.options.is_empty() && !request.force_regenerate {
        return HttpResponse::Ok().json(trip.options);
    }

    if let Err(errors) = validate_trip(&trip) {
        return validation_error(errors);
    }

    let options = generate_trip_options(&trip);
    match store.save_options(&id, options).await {
        Ok(trip) => {
            log::info!("Generated {} options for trip {}", trip.options.len(), trip.id);
            HttpResponse::Ok().json(trip.options)
        }
        Err(err) => store_error(err, "save trip options"),
    }
}

/*
    GET /trips/{id}/options
*/
pub async fn get_options<S: TripStore + 'static>(
    path: web::Path<String>,
    store: web::Data<S>,
) -> impl Responder {
    match store.get(&path.into_inner()).await {
        Ok(trip) => HttpResponse::Ok().json(trip.options),
        Err(err) => store_error(err, "retrieve trip options"),
    }
}

/*
    PUT /trips/{id}/options/{option_id}
    Saves a customized option; the estimated total is recomputed from its days.
*/
pub async fn update_option<S: TripStore + 'static>(
    path: web::Path<(String, String)>,
    store: web::Data<S>,
    input: web::Json<TripOption>,
) -> impl Responder {
    let (id, option_id) = path.into_inner();
    let focus = match parse_option_id(&option_id) {
        Ok(focus) => focus,
        Err(response) => return response,
    };

    let mut option = input.into_inner();
    if option.id != focus {
        return HttpResponse::BadRequest()
            .json(json!({ "error": "Option id does not match the request path" }));
    }
    PricingService::recalculate(&mut option);

    match store.update_option(&id, option.clone()).await {
        Ok(_) => HttpResponse::Ok().json(option),
        Err(err) => store_error(err, "update trip option"),
    }
}

/*
    POST /trips/{id}/select-option/{option_id}
*/
pub async fn select_option<S: TripStore + 'static>(
    path: web::Path<(String, String)>,
    store: web::Data<S>,
) -> impl Responder {
    let (id, option_id) = path.into_inner();
    let focus = match parse_option_id(&option_id) {
        Ok(focus) => focus,
        Err(response) => return response,
    };

    match store.select_option(&id, focus).await {
        Ok(_) => HttpResponse::Ok().json(json!({
            "message": "Trip option selected successfully",
            "option_id": focus,
        })),
        Err(err) => store_error(err, "select trip option"),
    }
}

/*
    GET /trips/{id}/itinerary
    Days of the selected option, empty until one is selected.
*/
pub async fn get_itinerary<S: TripStore + 'static>(
    path: web::Path<String>,
    store: web::Data<S>,
) -> impl Responder {
    match store.get(&path.into_inner()).await {
        Ok(trip) => {
            let days = trip
                .selected()
                .map(|option| option.daily_itineraries.clone())
                .unwrap_or_default();
            HttpResponse::Ok().json(days)
        }
        Err(err) => store_error(err, "retrieve itinerary"),
    }
}

/*
    GET /trips/{id}/budget
*/
pub async fn get_budget<S: TripStore + 'static>(
    path: web::Path<String>,
    store: web::Data<S>,
) -> impl Responder {
    match store.get(&path.into_inner()).await {
        Ok(trip) => {
            let days = trip
                .selected()
                .map(|option| option.daily_itineraries.as_slice())
                .unwrap_or_default();
            HttpResponse::Ok().json(PricingService::budget_summary(&trip, days))
        }
        Err(err) => store_error(err, "retrieve budget"),
    }
}
