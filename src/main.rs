use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use dermalens::cli::{
    commands::{Cli, Commands},
    run_cli,
};
use dermalens::config::AppConfig;
use dermalens::db;
use dermalens::llm::ProviderFactory;
use tracing::{error, info};

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"ok": true}))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Serve) {
        run_cli(cli.command, cli.config).await;
        return Ok(());
    }

    info!("Starting Dermalens API server...");

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // A store failure at boot is not fatal: the CRUD endpoints answer 500
    // while health, catalog and model endpoints keep serving.
    let db_pool: Option<db::DbPool> = match db::get_connection(&config.database) {
        Ok(pool) => Some(pool),
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            None
        }
    };

    let llm_provider = match ProviderFactory::create_default(&config) {
        Some(p) => p,
        None => {
            error!("Failed to initialize model provider from config.yaml mapping");
            std::process::exit(1);
        }
    };

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Server listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(llm_provider.clone()))
            .route("/api/health", web::get().to(health))
            .configure(dermalens::api::routes::configure)
            .service(dermalens::api::routes_ai::assistant)
            .service(dermalens::api::routes_ai::analyze_image)
    })
    .bind((host, port))?
    .run()
    .await
}
