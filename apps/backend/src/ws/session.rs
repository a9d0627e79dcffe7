use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::PlayerId;
use crate::state::app_state::AppState;
use crate::ws::hub::RoomRegistry;
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg};
use crate::ws::room::{Room, ViewerSink};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// A server frame produced by a room for this socket.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct RoomEvent(pub ServerMsg);

impl ViewerSink for Recipient<RoomEvent> {
    fn send(&self, msg: ServerMsg) -> bool {
        // `do_send` ignores mailbox capacity; a burst must not drop a frame.
        self.do_send(RoomEvent(msg));
        self.connected()
    }
}

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let conn_id = Uuid::new_v4();
    let session = WsSession::new(conn_id, app_state.rooms());
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    registry: Arc<RoomRegistry>,

    /// Identity established by `join_room`; intents act on its behalf.
    /// `register_player` only rebinds which state this socket receives.
    player_id: Option<PlayerId>,
    room: Option<Arc<Room>>,

    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, registry: Arc<RoomRegistry>) -> Self {
        Self {
            conn_id,
            registry,
            player_id: None,
            room: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        let msg = ServerMsg::Error {
            code,
            message: message.into(),
        };
        Self::send_json(ctx, &msg);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn leave_room(&mut self) {
        if let Some(room) = self.room.take() {
            room.disconnect(self.conn_id);
        }
    }

    /// The room and identity an intent applies to, if this socket has joined.
    fn seat(&self) -> Option<(Arc<Room>, PlayerId)> {
        match (&self.room, &self.player_id) {
            (Some(room), Some(player_id)) => Some((Arc::clone(room), player_id.clone())),
            _ => None,
        }
    }

    fn handle_client_msg(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match cmd {
            ClientMsg::JoinRoom {
                room_code,
                player_id,
                nickname,
            } => self.join_room(room_code, player_id, nickname, ctx),
            ClientMsg::RegisterPlayer { player_id } => {
                if let Some(room) = &self.room {
                    room.register_player(self.conn_id, &player_id);
                }
                if self.player_id.is_none() {
                    self.player_id = Some(player_id);
                }
            }
            intent => self.handle_intent(intent, ctx),
        }
    }

    /// Game intents; silently dropped until the socket has joined a room.
    fn handle_intent(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        let Some((room, who)) = self.seat() else {
            debug!(conn_id = %self.conn_id, "[WS SESSION] intent before join dropped");
            return;
        };

        match cmd {
            ClientMsg::StartGame => {
                room.start_game(&who);
            }
            ClientMsg::PlaceBet { bet } => {
                room.place_bet(&who, bet);
            }
            ClientMsg::PlayCard {
                card_id,
                ace_is_high,
            } => {
                room.play_card(&who, &card_id, ace_is_high);
            }
            ClientMsg::PlayerReady => {
                room.player_ready(&who);
            }
            ClientMsg::AdminSkip { action } => {
                if let Err(err) = room.admin_skip(&who, action) {
                    Self::send_json(
                        ctx,
                        &ServerMsg::AdminError {
                            message: err.to_string(),
                        },
                    );
                }
            }
            ClientMsg::JoinRoom { .. } | ClientMsg::RegisterPlayer { .. } => {}
        }
    }

    fn join_room(
        &mut self,
        room_code: String,
        player_id: PlayerId,
        nickname: String,
        ctx: &mut ws::WebsocketContext<Self>,
    ) {
        let room_code = room_code.trim().to_string();
        if room_code.is_empty() {
            Self::send_json(
                ctx,
                &ServerMsg::JoinError {
                    message: "Room code is required".to_string(),
                },
            );
            return;
        }

        if self.room.as_ref().is_some_and(|r| r.code() != room_code) {
            self.leave_room();
        }

        let room = self.registry.get_or_create(&room_code);
        let sink: Arc<dyn ViewerSink> = Arc::new(ctx.address().recipient::<RoomEvent>());
        match room.join(self.conn_id, sink, &player_id, &nickname) {
            Ok(kind) => {
                debug!(
                    conn_id = %self.conn_id,
                    room_code = %room_code,
                    player_id = %player_id,
                    ?kind,
                    "[WS SESSION] joined room"
                );
                self.room = Some(room);
                self.player_id = Some(player_id);
            }
            Err(err) => {
                info!(
                    conn_id = %self.conn_id,
                    room_code = %room_code,
                    reason = %err,
                    "[WS SESSION] join rejected"
                );
                Self::send_json(
                    ctx,
                    &ServerMsg::JoinError {
                        message: err.to_string(),
                    },
                );
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.leave_room();
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) else {
                    self.send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed JSON");
                    return;
                };
                // Well-formed JSON with an unknown or invalid payload is a
                // rejected intent: report it and keep the socket open.
                match serde_json::from_value::<ClientMsg>(value) {
                    Ok(cmd) => self.handle_client_msg(cmd, ctx),
                    Err(err) => {
                        debug!(
                            conn_id = %self.conn_id,
                            error = %err,
                            "[WS SESSION] invalid message dropped"
                        );
                        Self::send_json(
                            ctx,
                            &ServerMsg::Error {
                                code: ErrorCode::BadRequest,
                                message: "Invalid message".to_string(),
                            },
                        );
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<RoomEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: RoomEvent, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
