// Real HTTP server on a random port, for websocket tests

use std::net::TcpListener;

use actix_web::{web, App, HttpServer};
use bisca::middleware::structured_logger::StructuredLogger;
use bisca::routes;
use bisca::state::app_state::AppState;

/// Start the full route table on `127.0.0.1:0`.
///
/// Returns the server handle (for a graceful stop), the bound address
/// and the join handle of the background server task.
pub async fn start_test_server(
    state: AppState,
) -> Result<
    (
        actix_web::dev::ServerHandle,
        std::net::SocketAddr,
        tokio::task::JoinHandle<Result<(), std::io::Error>>,
    ),
    Box<dyn std::error::Error>,
> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let state_data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .wrap(StructuredLogger)
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let server_handle = server.handle();
    let join = tokio::spawn(server);

    Ok((server_handle, addr, join))
}

pub fn ws_url(addr: std::net::SocketAddr) -> String {
    format!("ws://{addr}/ws")
}
