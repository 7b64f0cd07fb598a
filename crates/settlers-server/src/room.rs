//! Game room management.

use settlers_core::game::{MAX_PLAYERS, MIN_PLAYERS};
use settlers_core::{
    ActionResult, AvailableAction, GameConfig, GameEngine, GameError, GameView, PlayerId,
};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::protocol::{PlayerInfo, RoomInfo, RoomStatus};

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Room is full")]
    RoomFull,

    #[error("Player not in room")]
    PlayerNotInRoom,

    #[error("Not the host")]
    NotHost,

    #[error("Game already started")]
    GameAlreadyStarted,

    #[error("Game not started")]
    GameNotStarted,

    #[error("Game rejected the request: {}", .0.code())]
    Game(#[from] GameError),
}

/// A player in a game room.
#[derive(Debug, Clone)]
pub struct RoomPlayer {
    pub id: Uuid,
    pub name: String,
    pub connected: bool,
    /// Seat in the game, assigned when it starts
    pub seat: Option<PlayerId>,
}

impl RoomPlayer {
    pub fn new(id: Uuid, name: String) -> Self {
        Self {
            id,
            name,
            connected: true,
            seat: None,
        }
    }

    pub fn to_info(&self) -> PlayerInfo {
        PlayerInfo {
            id: self.id,
            name: self.name.clone(),
            seat: self.seat,
            connected: self.connected,
        }
    }
}

/// What one seat should be shown after a change.
#[derive(Debug, Clone)]
pub struct SeatUpdate {
    pub player_id: Uuid,
    pub view: GameView,
    pub actions: Vec<AvailableAction>,
}

/// A game room that can hold 2-4 players.
#[derive(Debug)]
pub struct GameRoom {
    pub id: Uuid,
    pub name: String,
    pub max_players: u8,
    pub host_id: Uuid,
    pub status: RoomStatus,
    pub players: HashMap<Uuid, RoomPlayer>,
    /// Join order, which becomes seat order
    pub player_order: Vec<Uuid>,
    pub config: GameConfig,
    pub game: Option<GameEngine>,
}

impl GameRoom {
    pub fn new(
        id: Uuid,
        host_id: Uuid,
        host_name: String,
        max_players: u8,
        config: GameConfig,
    ) -> Self {
        let mut players = HashMap::new();
        players.insert(host_id, RoomPlayer::new(host_id, host_name.clone()));

        Self {
            id,
            name: format!("{}'s Game", host_name),
            max_players: max_players.clamp(MIN_PLAYERS as u8, MAX_PLAYERS as u8),
            host_id,
            status: RoomStatus::Waiting,
            players,
            player_order: vec![host_id],
            config,
            game: None,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players as usize
    }

    pub fn add_player(&mut self, player_id: Uuid, name: String) -> Result<(), RoomError> {
        if self.status != RoomStatus::Waiting {
            return Err(RoomError::GameAlreadyStarted);
        }
        if self.is_full() {
            return Err(RoomError::RoomFull);
        }

        self.players.insert(player_id, RoomPlayer::new(player_id, name));
        self.player_order.push(player_id);
        Ok(())
    }

    /// Returns true when the room is now empty. Once a game has started,
    /// leaving only marks the seat disconnected so seat numbers stay stable.
    pub fn remove_player(&mut self, player_id: Uuid) -> Result<bool, RoomError> {
        if !self.players.contains_key(&player_id) {
            return Err(RoomError::PlayerNotInRoom);
        }

        if self.status != RoomStatus::Waiting {
            self.set_player_connected(player_id, false);
            return Ok(self.players.values().all(|p| !p.connected));
        }

        self.players.remove(&player_id);
        self.player_order.retain(|&id| id != player_id);

        if player_id == self.host_id {
            if let Some(&next) = self.player_order.first() {
                self.host_id = next;
            }
        }

        Ok(self.players.is_empty())
    }

    pub fn set_player_connected(&mut self, player_id: Uuid, connected: bool) {
        if let Some(player) = self.players.get_mut(&player_id) {
            player.connected = connected;
        }
    }

    pub fn start_game(&mut self, requester_id: Uuid) -> Result<(), RoomError> {
        if requester_id != self.host_id {
            return Err(RoomError::NotHost);
        }
        if self.status != RoomStatus::Waiting {
            return Err(RoomError::GameAlreadyStarted);
        }

        let player_names: Vec<String> = self
            .player_order
            .iter()
            .filter_map(|id| self.players.get(id).map(|p| p.name.clone()))
            .collect();

        let mut engine = GameEngine::create(player_names, self.config);
        engine.start_game()?;

        for (seat, player_id) in self.player_order.iter().enumerate() {
            if let Some(player) = self.players.get_mut(player_id) {
                player.seat = Some(seat as PlayerId);
            }
        }

        self.game = Some(engine);
        self.status = RoomStatus::InGame;
        Ok(())
    }

    pub fn seat_of(&self, player_id: Uuid) -> Result<PlayerId, RoomError> {
        self.players
            .get(&player_id)
            .and_then(|p| p.seat)
            .ok_or(RoomError::PlayerNotInRoom)
    }

    /// Run a client's JSON action through the engine. Rule violations come
    /// back inside the `ActionResult`; only room problems are errors.
    pub fn apply_action(
        &mut self,
        player_id: Uuid,
        action: &serde_json::Value,
    ) -> Result<ActionResult, RoomError> {
        let seat = self.seat_of(player_id)?;
        let game = self.game.as_mut().ok_or(RoomError::GameNotStarted)?;

        let result = game.process_json(seat, action);
        if game.state().is_finished() {
            self.status = RoomStatus::Finished;
        }
        Ok(result)
    }

    /// Per-seat projections and menus for every connected player.
    pub fn seat_updates(&self) -> Vec<SeatUpdate> {
        let Some(game) = self.game.as_ref() else {
            return Vec::new();
        };

        self.player_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .filter(|p| p.connected)
            .filter_map(|p| {
                let seat = p.seat?;
                Some(SeatUpdate {
                    player_id: p.id,
                    view: game.sanitize(seat),
                    actions: game.available_actions(seat),
                })
            })
            .collect()
    }

    pub fn winner(&self) -> Option<(PlayerId, String)> {
        let game = self.game.as_ref()?;
        let seat = game.state().winner?;
        let player_id = self.player_order.get(seat as usize)?;
        let name = self.players.get(player_id)?.name.clone();
        Some((seat, name))
    }

    pub fn to_info(&self) -> RoomInfo {
        RoomInfo {
            id: self.id,
            name: self.name.clone(),
            players: self
                .player_order
                .iter()
                .filter_map(|id| self.players.get(id).map(|p| p.to_info()))
                .collect(),
            max_players: self.max_players,
            host_id: self.host_id,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use settlers_core::GamePhase;

    fn room_with_guest(max_players: u8) -> (GameRoom, Uuid, Uuid) {
        let host_id = Uuid::new_v4();
        let mut room = GameRoom::new(
            Uuid::new_v4(),
            host_id,
            "Host".to_string(),
            max_players,
            GameConfig::default(),
        );
        let guest = Uuid::new_v4();
        room.add_player(guest, "Guest".to_string()).unwrap();
        (room, host_id, guest)
    }

    #[test]
    fn test_create_room() {
        let host_id = Uuid::new_v4();
        let room = GameRoom::new(
            Uuid::new_v4(),
            host_id,
            "Host".to_string(),
            9,
            GameConfig::default(),
        );

        assert_eq!(room.player_count(), 1);
        assert_eq!(room.max_players, 4);
        assert!(!room.is_full());
        assert_eq!(room.host_id, host_id);
        assert_eq!(room.status, RoomStatus::Waiting);
    }

    #[test]
    fn test_add_remove_players() {
        let (mut room, host_id, guest) = room_with_guest(2);
        assert!(room.is_full());
        assert!(matches!(
            room.add_player(Uuid::new_v4(), "Late".to_string()),
            Err(RoomError::RoomFull)
        ));

        let empty = room.remove_player(host_id).unwrap();
        assert!(!empty);
        assert_eq!(room.host_id, guest);
        assert!(room.remove_player(guest).unwrap());
    }

    #[test]
    fn test_start_game() {
        let host_id = Uuid::new_v4();
        let mut room = GameRoom::new(
            Uuid::new_v4(),
            host_id,
            "Host".to_string(),
            4,
            GameConfig::default(),
        );

        assert!(matches!(
            room.start_game(host_id),
            Err(RoomError::Game(GameError::NotEnoughPlayers))
        ));
        assert!(room.game.is_none());

        let guest = Uuid::new_v4();
        room.add_player(guest, "Guest".to_string()).unwrap();
        assert!(matches!(room.start_game(guest), Err(RoomError::NotHost)));

        room.start_game(host_id).unwrap();
        assert_eq!(room.status, RoomStatus::InGame);
        assert_eq!(room.seat_of(host_id).unwrap(), 0);
        assert_eq!(room.seat_of(guest).unwrap(), 1);
        assert_eq!(
            room.game.as_ref().unwrap().state().phase,
            GamePhase::SetupSettlement1
        );
        assert!(matches!(
            room.add_player(Uuid::new_v4(), "Late".to_string()),
            Err(RoomError::GameAlreadyStarted)
        ));
    }

    #[test]
    fn test_apply_action_reports_rule_errors() {
        let (mut room, host_id, guest) = room_with_guest(4);
        assert!(matches!(
            room.apply_action(host_id, &json!({"type": "roll_dice"})),
            Err(RoomError::PlayerNotInRoom)
        ));

        room.start_game(host_id).unwrap();

        let result = room
            .apply_action(guest, &json!({"type": "place_settlement", "corner": 0}))
            .unwrap();
        assert_eq!(result.error, Some(GameError::NotYourTurn));

        let result = room
            .apply_action(host_id, &json!({"type": "roll_dice"}))
            .unwrap();
        assert_eq!(result.error, Some(GameError::WrongPhase));

        let result = room
            .apply_action(host_id, &json!({"type": "fly_away"}))
            .unwrap();
        assert_eq!(result.error, Some(GameError::UnknownAction));

        let result = room
            .apply_action(host_id, &json!({"type": "place_settlement", "corner": 0}))
            .unwrap();
        assert!(result.ok);
        assert_eq!(room.status, RoomStatus::InGame);
    }

    #[test]
    fn test_seat_updates_hide_other_hands() {
        let (mut room, host_id, guest) = room_with_guest(4);
        room.start_game(host_id).unwrap();

        let updates = room.seat_updates();
        assert_eq!(updates.len(), 2);

        let host = updates.iter().find(|u| u.player_id == host_id).unwrap();
        let guest_update = updates.iter().find(|u| u.player_id == guest).unwrap();
        assert!(!host.actions.is_empty());
        assert!(guest_update.actions.is_empty());
        assert!(host.view.players[0].resources.is_some());
        assert!(host.view.players[1].resources.is_none());

        room.set_player_connected(guest, false);
        assert_eq!(room.seat_updates().len(), 1);
    }

    #[test]
    fn test_leaving_mid_game_keeps_seat() {
        let (mut room, host_id, guest) = room_with_guest(4);
        room.start_game(host_id).unwrap();

        assert!(!room.remove_player(guest).unwrap());
        assert_eq!(room.player_count(), 2);
        assert_eq!(room.seat_of(guest).unwrap(), 1);
        assert!(room.remove_player(host_id).unwrap());
    }

    #[test]
    fn test_winner_survives_players_leaving() {
        let (mut room, host_id, guest) = room_with_guest(4);
        room.start_game(host_id).unwrap();

        let game = room.game.as_mut().unwrap().state_mut();
        game.winner = Some(1);
        game.phase = GamePhase::Finished;
        room.status = RoomStatus::Finished;

        assert!(!room.remove_player(host_id).unwrap());
        assert_eq!(room.player_order, vec![host_id, guest]);
        assert_eq!(room.winner(), Some((1, "Guest".to_string())));
    }
}
