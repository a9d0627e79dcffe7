use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// Lobby summary for a room: roster without hands, phase and round.
async fn get_room(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let room = app_state.rooms().get(&code).ok_or_else(|| {
        AppError::not_found(ErrorCode::RoomNotFound, format!("Room {code} not found"))
    })?;
    Ok(HttpResponse::Ok().json(room.summary()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{code}").route(web::get().to(get_room)));
}
