//! WebSocket protocol messages for settlers multiplayer.

use serde::{Deserialize, Serialize};
use settlers_core::{ActionResult, AvailableAction, GameView, PlayerId};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Create a new game room
    CreateRoom { player_name: String, max_players: u8 },

    /// Join an existing room
    JoinRoom { room_id: Uuid, player_name: String },

    /// Leave current room
    LeaveRoom,

    /// Start the game (host only)
    StartGame,

    /// Submit a game action as `{type, ...}` JSON
    GameAction { action: serde_json::Value },

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with assigned connection ID
    Welcome { player_id: Uuid },

    RoomCreated { room_id: Uuid },

    JoinedRoom { room: RoomInfo },

    LeftRoom,

    /// Room state updated (player joined/left/disconnected)
    RoomUpdated { room: RoomInfo },

    /// The game as this seat may see it
    GameState { state: Box<GameView> },

    /// Legal actions for this seat
    AvailableActions { actions: Vec<AvailableAction> },

    /// Outcome of the client's last action
    ActionResult { result: ActionResult },

    GameOver { winner: PlayerId, winner_name: String },

    Error { message: String },

    Pong,
}

/// Room information for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub id: Uuid,
    pub name: String,
    pub players: Vec<PlayerInfo>,
    pub max_players: u8,
    pub host_id: Uuid,
    pub status: RoomStatus,
}

/// Player information in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: Uuid,
    pub name: String,
    /// Seat in the game, assigned when it starts
    pub seat: Option<PlayerId>,
    pub connected: bool,
}

/// Room status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    Waiting,
    InGame,
    Finished,
}
