//! Game state aggregate, phases and errors.
//!
//! `GameState` is plain data. All rule enforcement lives in
//! [`crate::engine::GameEngine`], which owns the state and is the only
//! place that mutates it through actions.

use crate::actions::TradeOffer;
use crate::board::{Board, CornerId, PlayerId};
use crate::dev_cards::{standard_deck, DevCardKind};
use crate::player::Player;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Victory points needed to win a standard game
pub const STANDARD_TARGET: u32 = 10;

/// Victory points needed to win a quick game
pub const QUICK_TARGET: u32 = 8;

/// Seats allowed at the table
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created, waiting for `start_game`
    #[serde(rename = "LOBBY")]
    Lobby,
    /// First setup round (forward seat order): place a settlement
    #[serde(rename = "SETUP_SETTLEMENT_1")]
    SetupSettlement1,
    /// First setup round: place the road next to it
    #[serde(rename = "SETUP_ROAD_1")]
    SetupRoad1,
    /// Second setup round (reverse seat order)
    #[serde(rename = "SETUP_SETTLEMENT_2")]
    SetupSettlement2,
    #[serde(rename = "SETUP_ROAD_2")]
    SetupRoad2,
    /// Before rolling dice at start of turn
    #[serde(rename = "ROLL")]
    Roll,
    /// A 7 was rolled and some players hold more than 7 cards
    #[serde(rename = "DISCARD")]
    Discard,
    /// Must move robber (rolled 7 or played a knight)
    #[serde(rename = "ROBBER_MOVE")]
    RobberMove,
    /// Robber moved next to opponents; choose whom to steal from
    #[serde(rename = "ROBBER_STEAL")]
    RobberSteal,
    /// Build, trade, play cards, end turn
    #[serde(rename = "MAIN")]
    Main,
    #[serde(rename = "FINISHED")]
    Finished,
}

impl GamePhase {
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            GamePhase::SetupSettlement1
                | GamePhase::SetupRoad1
                | GamePhase::SetupSettlement2
                | GamePhase::SetupRoad2
        )
    }
}

/// A turn left open waiting for one specific follow-up action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PendingAction {
    /// The road that must extend the settlement just placed in setup
    SetupRoad { corner: CornerId },
    /// Robber moved; the mover picks one of these victims
    Steal { candidates: Vec<PlayerId> },
    /// Free roads from a Road Building card
    RoadBuilding { roads_to_place: u32, roads_placed: u32 },
    /// Waiting for the two Year of Plenty resources
    YearOfPlenty,
    /// Waiting for the Monopoly resource
    Monopoly,
}

/// A player who must discard after a 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDiscard {
    pub player: PlayerId,
    pub count: u32,
}

/// Game length presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Standard,
    Quick,
}

/// Per-game settings chosen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Overrides the mode's target when set
    pub target_victory_points: Option<u32>,
}

impl GameConfig {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            target_victory_points: None,
        }
    }

    /// Victory points that end the game
    pub fn target(&self) -> u32 {
        self.target_victory_points.unwrap_or(match self.mode {
            GameMode::Standard => STANDARD_TARGET,
            GameMode::Quick => QUICK_TARGET,
        })
    }
}

/// Errors that can occur when applying actions.
///
/// Every variant maps to a stable caller-facing code, see [`GameError::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameError {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Invalid action for current phase")]
    WrongPhase,

    #[error("Game is over")]
    GameOver,

    #[error("No such player")]
    UnknownPlayer,

    #[error("Need at least 2 players")]
    NotEnoughPlayers,

    #[error("At most 4 players")]
    TooManyPlayers,

    #[error("Unrecognized action")]
    UnknownAction,

    #[error("No such corner")]
    InvalidCorner,

    #[error("No such edge")]
    InvalidEdge,

    #[error("No such tile")]
    InvalidTile,

    #[error("Corner already has a building")]
    CornerOccupied,

    #[error("Too close to another building")]
    TooCloseToBuilding,

    #[error("Not connected to your road")]
    NotConnectedToRoad,

    #[error("Road must touch the settlement just placed")]
    NotConnectedToSettlement,

    #[error("Edge already has a road")]
    EdgeOccupied,

    #[error("No settlement of yours there")]
    NotYourSettlement,

    #[error("No pieces remaining")]
    NoPiecesRemaining,

    #[error("Not enough resources")]
    NotEnoughResources,

    #[error("Robber must move to a different tile")]
    InvalidRobberTile,

    #[error("Cannot steal from that player")]
    InvalidStealTarget,

    #[error("You don't need to discard")]
    NotRequiredToDiscard,

    #[error("Wrong number of cards discarded")]
    WrongDiscardCount,

    #[error("No development cards left in deck")]
    DeckEmpty,

    #[error("No playable card of that kind")]
    NoPlayableCard,

    #[error("Already played a development card this turn")]
    AlreadyPlayedCard,

    #[error("Victory point cards are never played")]
    CannotPlayVictoryPoint,

    #[error("Finish the pending action first")]
    PendingActionUnresolved,

    #[error("Nothing is waiting for that selection")]
    NoPendingAction,

    #[error("Invalid resource selection")]
    InvalidSelection,

    #[error("Invalid trade")]
    InvalidTrade,

    #[error("No active trade")]
    NoSuchTrade,

    #[error("Trade is not addressed to you")]
    NotTradeTarget,
}

impl GameError {
    /// Stable code returned to clients
    pub fn code(&self) -> &'static str {
        match self {
            GameError::NotYourTurn => "NOT_YOUR_TURN",
            GameError::WrongPhase => "WRONG_PHASE",
            GameError::GameOver => "GAME_OVER",
            GameError::UnknownPlayer => "UNKNOWN_PLAYER",
            GameError::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            GameError::TooManyPlayers => "TOO_MANY_PLAYERS",
            GameError::UnknownAction => "UNKNOWN_ACTION",
            GameError::InvalidCorner => "INVALID_CORNER",
            GameError::InvalidEdge => "INVALID_EDGE",
            GameError::InvalidTile => "INVALID_TILE",
            GameError::CornerOccupied => "CORNER_OCCUPIED",
            GameError::TooCloseToBuilding => "TOO_CLOSE_TO_BUILDING",
            GameError::NotConnectedToRoad => "NOT_CONNECTED_TO_ROAD",
            GameError::NotConnectedToSettlement => "NOT_CONNECTED_TO_SETTLEMENT",
            GameError::EdgeOccupied => "EDGE_OCCUPIED",
            GameError::NotYourSettlement => "NOT_YOUR_SETTLEMENT",
            GameError::NoPiecesRemaining => "NO_PIECES_REMAINING",
            GameError::NotEnoughResources => "NOT_ENOUGH_RESOURCES",
            GameError::InvalidRobberTile => "INVALID_ROBBER_TILE",
            GameError::InvalidStealTarget => "INVALID_STEAL_TARGET",
            GameError::NotRequiredToDiscard => "NOT_REQUIRED_TO_DISCARD",
            GameError::WrongDiscardCount => "WRONG_DISCARD_COUNT",
            GameError::DeckEmpty => "DECK_EMPTY",
            GameError::NoPlayableCard => "NO_PLAYABLE_CARD",
            GameError::AlreadyPlayedCard => "ALREADY_PLAYED_CARD",
            GameError::CannotPlayVictoryPoint => "CANNOT_PLAY_VICTORY_POINT",
            GameError::PendingActionUnresolved => "PENDING_ACTION_UNRESOLVED",
            GameError::NoPendingAction => "NO_PENDING_ACTION",
            GameError::InvalidSelection => "INVALID_SELECTION",
            GameError::InvalidTrade => "INVALID_TRADE",
            GameError::NoSuchTrade => "NO_SUCH_TRADE",
            GameError::NotTradeTarget => "NOT_TRADE_TARGET",
        }
    }
}

/// The complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub board: Board,
    pub players: Vec<Player>,
    /// Seat whose turn it is
    pub turn_index: PlayerId,
    /// 0 during setup, then counts full table rotations from 1
    pub round_number: u32,
    pub last_roll: Option<(u8, u8)>,
    pub longest_road_holder: Option<PlayerId>,
    pub largest_army_holder: Option<PlayerId>,
    /// Draw pile; cards are drawn from the end
    pub dev_card_deck: Vec<DevCardKind>,
    pub dev_card_played_this_turn: bool,
    pub pending_action: Option<PendingAction>,
    pub pending_discards: Option<Vec<PendingDiscard>>,
    pub trade_offer: Option<TradeOffer>,
    pub target_victory_points: u32,
    pub winner: Option<PlayerId>,
}

impl GameState {
    /// Create a game in the lobby. Seats follow the order of `player_names`.
    pub fn new(player_names: Vec<String>, config: GameConfig) -> Self {
        let players = player_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as PlayerId, name))
            .collect();

        Self {
            phase: GamePhase::Lobby,
            board: Board::standard(),
            players,
            turn_index: 0,
            round_number: 0,
            last_roll: None,
            longest_road_holder: None,
            largest_army_holder: None,
            dev_card_deck: standard_deck(),
            dev_card_played_this_turn: false,
            pending_action: None,
            pending_discards: None,
            trade_offer: None,
            target_victory_points: config.target(),
            winner: None,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .get_mut(id as usize)
            .ok_or(GameError::UnknownPlayer)
    }

    pub fn current_player(&self) -> PlayerId {
        self.turn_index
    }

    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    /// Total of the last roll, if dice were rolled this turn
    pub fn last_total(&self) -> Option<u8> {
        self.last_roll.map(|(a, b)| a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Player {}", i + 1)).collect()
    }

    #[test]
    fn test_new_game_starts_in_lobby() {
        let game = GameState::new(names(4), GameConfig::default());
        assert_eq!(game.phase, GamePhase::Lobby);
        assert_eq!(game.player_count(), 4);
        assert_eq!(game.dev_card_deck.len(), 25);
        assert_eq!(game.target_victory_points, 10);
        assert!(game.pending_action.is_none());
    }

    #[test]
    fn test_config_targets() {
        assert_eq!(GameConfig::new(GameMode::Quick).target(), QUICK_TARGET);
        let custom = GameConfig {
            mode: GameMode::Quick,
            target_victory_points: Some(12),
        };
        assert_eq!(custom.target(), 12);
    }

    #[test]
    fn test_error_codes_match_serialization() {
        for error in [
            GameError::NotYourTurn,
            GameError::TooCloseToBuilding,
            GameError::InvalidRobberTile,
            GameError::NoSuchTrade,
            GameError::UnknownAction,
        ] {
            let json = serde_json::to_value(error).unwrap();
            assert_eq!(json, serde_json::Value::String(error.code().to_string()));
        }
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&GamePhase::SetupSettlement2).unwrap();
        assert_eq!(json, "\"SETUP_SETTLEMENT_2\"");
        assert!(GamePhase::SetupRoad1.is_setup());
        assert!(!GamePhase::Roll.is_setup());
    }
}
