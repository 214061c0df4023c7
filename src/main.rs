use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trip_planner_api::{
    config::AppConfig,
    db::{memory::InMemoryTripStore, mongo, TripStore},
    routes,
};

fn cors(config: &AppConfig) -> Cors {
    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

async fn run_server<S>(store: S, config: AppConfig) -> std::io::Result<()>
where
    S: TripStore + Send + Sync + 'static,
{
    let store = web::Data::new(store);
    let app_config = web::Data::new(config.clone());
    let address = (config.host.clone(), config.port);

    log::info!("Starting HTTP server on {}:{}", address.0, address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&config))
            .app_data(store.clone())
            .app_data(app_config.clone())
            .service(web::scope(&config.api_prefix).configure(routes::configure::<S>))
    })
    .bind(address)?
    .run()
    .await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();

    match config.mongodb_uri.clone() {
        Some(uri) => {
            let client = mongo::create_mongo_client(&uri)
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            run_server(mongo::MongoTripStore::new(client), config).await
        }
        None => {
            log::warn!("MONGODB_URI not set, trips are kept in memory only");
            run_server(InMemoryTripStore::new(), config).await
        }
    }
}
