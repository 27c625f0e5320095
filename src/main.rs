mod api;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use database::users::{MongoUserStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let database_url = env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");
    let frontend_url = env::var("FRONTEND_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    log::info!("🚀 Starting User Service...");
    log::info!("📊 Database: {}", database_url);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    log::info!("✅ MongoDB connected successfully");

    // Handlers enxergam o storage pela trait, nunca pelo driver
    let store: Arc<dyn UserStore> = Arc::new(MongoUserStore::new(&db));
    let store_data = web::Data::from(store);

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_url)
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Metrics
            .route("/metrics", web::get().to(api::metrics::get_metrics))
            // User CRUD
            .configure(api::users::user_routes)
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
