// Unit tests for error mapping - pure domain logic without HTTP dependencies
use actix_web::body::MessageBody;
use actix_web::ResponseError;

use crate::errors::domain::{DomainError, ValidationKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_rule_violations_to_422() {
    let de = DomainError::validation(ValidationKind::InvalidBet, "bet 3 is forbidden");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidBet);
    assert_eq!(app.status().as_u16(), 422);

    let de = DomainError::validation(ValidationKind::CardNotInHand, "no such card");
    let app: AppError = de.into();
    assert_eq!(app.code().as_str(), "CARD_NOT_IN_HAND");
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_sequencing_errors_to_409() {
    for (kind, code) in [
        (ValidationKind::PhaseMismatch, ErrorCode::PhaseMismatch),
        (ValidationKind::OutOfTurn, ErrorCode::OutOfTurn),
        (ValidationKind::TrickAwaitingClear, ErrorCode::TrickAwaitingClear),
        (ValidationKind::AlreadyReady, ErrorCode::AlreadyReady),
        (ValidationKind::TooManyPlayers, ErrorCode::RoomFull),
    ] {
        let app: AppError = DomainError::validation(kind, "x").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 409);
    }
}

#[test]
fn maps_unknown_player_to_404() {
    let app: AppError = DomainError::validation(ValidationKind::UnknownPlayer, "ghost").into();
    assert_eq!(app.code(), ErrorCode::PlayerNotFound);
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_invariant_to_500() {
    let app: AppError = DomainError::invariant("empty trick").into();
    assert_eq!(app.code(), ErrorCode::InvariantViolation);
    assert_eq!(app.status().as_u16(), 500);
    assert!(matches!(app, AppError::Internal { .. }));
}

#[test]
fn problem_body_carries_code_and_title() {
    let app = AppError::not_found(ErrorCode::RoomNotFound, "room ABCD not found");
    let resp = app.error_response();
    assert_eq!(resp.status().as_u16(), 404);

    let bytes = resp
        .into_body()
        .try_into_bytes()
        .expect("problem body should be buffered");
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["code"], "ROOM_NOT_FOUND");
    assert_eq!(json["title"], "Room Not Found");
    assert_eq!(json["status"], 404);
    assert_eq!(json["detail"], "room ABCD not found");
    assert_eq!(json["type"], "https://bisca.app/errors/ROOM_NOT_FOUND");
}
