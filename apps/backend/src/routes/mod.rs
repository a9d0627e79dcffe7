use actix_web::web;

pub mod health;
pub mod realtime;
pub mod rooms;

/// Configure application routes.
///
/// Shared by `main.rs` and the integration tests so both serve the same
/// paths. The `/` banner is registered here as well.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Room lookup: /api/rooms/{code}
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));

    // Websocket upgrade: /ws
    realtime::configure_routes(cfg);
}
