use std::io;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

use course_enrollment_server::api;
use course_enrollment_server::data_structs::app_config::AppConfig;
use course_enrollment_server::SharedResources;

const DEFAULT_CONFIG_PATH: &str = "config.yml";

fn load() -> io::Result<(AppConfig, SharedResources)> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    log::info!("Loading configuration from {}", config_path);

    let config = AppConfig::load(&config_path)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        .with_jwt_secret_override(std::env::var("JWT_SECRET").ok());

    log::info!("Seeding the in-memory database");
    let shared_resources = SharedResources::from_config(&config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    log::info!(
        "Loaded {} courses and {} enrollments",
        config.courses.len(),
        config.enrollments.len()
    );

    Ok((config, shared_resources))
}

fn build_cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(3600);
    allowed_origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, shared_resources) = load()?;
    let allowed_origins = config.cors_allowed_origins.clone();

    log::info!("Starting HTTP server on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(shared_resources.clone()))
            .wrap(build_cors(&allowed_origins))
            .wrap(Logger::new("%a \"%r\" %s %b \"%{User-Agent}i\" %T"))
            .configure(api::configure)
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
