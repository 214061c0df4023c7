pub mod itinerary_generation_service;
pub mod pricing_service;
pub mod trip_validation;
