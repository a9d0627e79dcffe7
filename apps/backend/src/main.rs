use actix_web::{web, App, HttpServer};
use bisca::config::ServerConfig;
use bisca::middleware::cors::cors_middleware;
use bisca::middleware::structured_logger::StructuredLogger;
use bisca::routes;
use bisca::state::app_state::AppState;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting Bisca Backend on http://{}:{}",
        config.host, config.port
    );

    let app_state = AppState::new(config.clone());

    match config.room_idle_timeout {
        Some(max_idle) => {
            app_state.rooms().spawn_eviction(max_idle);
            info!(max_idle_secs = max_idle.as_secs(), "idle room eviction enabled");
        }
        None => info!("idle room eviction disabled; rooms live for the process lifetime"),
    }

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
