//! WebSocket server and connection handling.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::room::{GameRoom, SeatUpdate};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use settlers_core::GameConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState {
    /// All active rooms
    pub rooms: DashMap<Uuid, GameRoom>,
    /// Mapping from player ID to their room ID
    pub player_rooms: DashMap<Uuid, Uuid>,
    /// Mapping from player ID to their message sender
    pub player_senders: DashMap<Uuid, mpsc::UnboundedSender<ServerMessage>>,
    /// Settings applied to every new room
    pub game_config: GameConfig,
}

impl ServerState {
    pub fn new(game_config: GameConfig) -> Self {
        Self {
            rooms: DashMap::new(),
            player_rooms: DashMap::new(),
            player_senders: DashMap::new(),
            game_config,
        }
    }

    /// Send a message to a specific player.
    pub fn send_to_player(&self, player_id: Uuid, msg: ServerMessage) {
        if let Some(sender) = self.player_senders.get(&player_id) {
            let _ = sender.send(msg);
        }
    }

    fn send_error(&self, player_id: Uuid, message: impl Into<String>) {
        self.send_to_player(
            player_id,
            ServerMessage::Error {
                message: message.into(),
            },
        );
    }

    /// Broadcast a message to all players in a room.
    pub fn broadcast_to_room(&self, room_id: Uuid, msg: ServerMessage) {
        if let Some(room) = self.rooms.get(&room_id) {
            for player_id in room.players.keys() {
                self.send_to_player(*player_id, msg.clone());
            }
        }
    }

    /// Broadcast a message to all players in a room except one.
    pub fn broadcast_to_room_except(&self, room_id: Uuid, except: Uuid, msg: ServerMessage) {
        if let Some(room) = self.rooms.get(&room_id) {
            for player_id in room.players.keys() {
                if *player_id != except {
                    self.send_to_player(*player_id, msg.clone());
                }
            }
        }
    }

    /// Each seat gets its own projection, then its own menu.
    fn send_seat_updates(&self, updates: Vec<SeatUpdate>) {
        for update in updates {
            self.send_to_player(
                update.player_id,
                ServerMessage::GameState {
                    state: Box::new(update.view),
                },
            );
            self.send_to_player(
                update.player_id,
                ServerMessage::AvailableActions {
                    actions: update.actions,
                },
            );
        }
    }

    pub fn room_of(&self, player_id: Uuid) -> Option<Uuid> {
        self.player_rooms.get(&player_id).map(|entry| *entry)
    }
}

/// Run the WebSocket server.
pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "settlers server listening");

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!(%peer_addr, error = %e, "connection error");
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let player_id = Uuid::new_v4();
    info!(%addr, %player_id, "new websocket connection");

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.player_senders.insert(player_id, tx);

    let welcome = serde_json::to_string(&ServerMessage::Welcome { player_id })?;
    ws_sender.send(Message::Text(welcome)).await?;

    // Forward queued messages to the socket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(text) => {
                    if ws_sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(e) => error!(error = %e, "failed to encode server message"),
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => handle_message(player_id, client_msg, &state),
                Err(e) => {
                    warn!(%player_id, error = %e, "invalid client message");
                    state.send_error(player_id, format!("Invalid message: {e}"));
                }
            },
            Ok(Message::Close(_)) => {
                info!(%player_id, "client closing connection");
                break;
            }
            Ok(Message::Ping(_)) => state.send_to_player(player_id, ServerMessage::Pong),
            Err(e) => {
                error!(%player_id, error = %e, "websocket error");
                break;
            }
            _ => {}
        }
    }

    leave_room(player_id, &state);
    state.player_senders.remove(&player_id);
    send_task.abort();

    info!(%player_id, "connection closed");
    Ok(())
}

/// Handle a client message.
pub fn handle_message(player_id: Uuid, msg: ClientMessage, state: &ServerState) {
    match msg {
        ClientMessage::CreateRoom {
            player_name,
            max_players,
        } => {
            if state.room_of(player_id).is_some() {
                state.send_error(player_id, "Already in a room");
                return;
            }

            let room_id = Uuid::new_v4();
            let room = GameRoom::new(
                room_id,
                player_id,
                player_name,
                max_players,
                state.game_config,
            );
            let room_info = room.to_info();

            state.rooms.insert(room_id, room);
            state.player_rooms.insert(player_id, room_id);
            info!(%room_id, host = %player_id, "room created");

            state.send_to_player(player_id, ServerMessage::RoomCreated { room_id });
            state.send_to_player(player_id, ServerMessage::JoinedRoom { room: room_info });
        }

        ClientMessage::JoinRoom {
            room_id,
            player_name,
        } => {
            if state.room_of(player_id).is_some() {
                state.send_error(player_id, "Already in a room");
                return;
            }

            let Some(mut room) = state.rooms.get_mut(&room_id) else {
                state.send_error(player_id, "Room not found");
                return;
            };

            match room.add_player(player_id, player_name) {
                Ok(()) => {
                    let room_info = room.to_info();
                    // Release the room before broadcasting
                    drop(room);
                    state.player_rooms.insert(player_id, room_id);

                    state.send_to_player(
                        player_id,
                        ServerMessage::JoinedRoom {
                            room: room_info.clone(),
                        },
                    );
                    state.broadcast_to_room_except(
                        room_id,
                        player_id,
                        ServerMessage::RoomUpdated { room: room_info },
                    );
                }
                Err(e) => {
                    drop(room);
                    state.send_error(player_id, e.to_string());
                }
            }
        }

        ClientMessage::LeaveRoom => {
            if leave_room(player_id, state) {
                state.send_to_player(player_id, ServerMessage::LeftRoom);
            } else {
                state.send_error(player_id, "Not in a room");
            }
        }

        ClientMessage::StartGame => {
            let Some(room_id) = state.room_of(player_id) else {
                state.send_error(player_id, "Not in a room");
                return;
            };
            let Some(mut room) = state.rooms.get_mut(&room_id) else {
                state.send_error(player_id, "Room not found");
                return;
            };

            match room.start_game(player_id) {
                Ok(()) => {
                    let room_info = room.to_info();
                    let updates = room.seat_updates();
                    drop(room);
                    info!(%room_id, "game started");

                    state.broadcast_to_room(
                        room_id,
                        ServerMessage::RoomUpdated { room: room_info },
                    );
                    state.send_seat_updates(updates);
                }
                Err(e) => {
                    drop(room);
                    state.send_error(player_id, e.to_string());
                }
            }
        }

        ClientMessage::GameAction { action } => {
            let Some(room_id) = state.room_of(player_id) else {
                state.send_error(player_id, "Not in a room");
                return;
            };
            let Some(mut room) = state.rooms.get_mut(&room_id) else {
                state.send_error(player_id, "Room not found");
                return;
            };

            let result = match room.apply_action(player_id, &action) {
                Ok(result) => result,
                Err(e) => {
                    drop(room);
                    state.send_error(player_id, e.to_string());
                    return;
                }
            };

            if !result.ok {
                drop(room);
                debug!(%player_id, error = ?result.error, "action rejected");
                state.send_to_player(player_id, ServerMessage::ActionResult { result });
                return;
            }

            let updates = room.seat_updates();
            let winner = room.winner();
            drop(room);

            state.send_to_player(player_id, ServerMessage::ActionResult { result });
            state.send_seat_updates(updates);

            if let Some((winner, winner_name)) = winner {
                info!(%room_id, winner, "game over");
                state.broadcast_to_room(
                    room_id,
                    ServerMessage::GameOver {
                        winner,
                        winner_name,
                    },
                );
            }
        }

        ClientMessage::Ping => {
            state.send_to_player(player_id, ServerMessage::Pong);
        }
    }
}

/// Take a player out of their room, dropping the room once nobody is
/// left. Returns false when they were not in one.
fn leave_room(player_id: Uuid, state: &ServerState) -> bool {
    let Some((_, room_id)) = state.player_rooms.remove(&player_id) else {
        return false;
    };

    let Some(mut room) = state.rooms.get_mut(&room_id) else {
        return true;
    };

    let is_empty = room.remove_player(player_id).unwrap_or(false);
    let room_info = room.to_info();
    drop(room);

    if is_empty {
        state.rooms.remove(&room_id);
        info!(%room_id, "room closed");
    } else {
        state.broadcast_to_room_except(
            room_id,
            player_id,
            ServerMessage::RoomUpdated { room: room_info },
        );
    }
    true
}
