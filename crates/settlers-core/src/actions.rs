//! Game actions that players can take.
//!
//! This module defines all possible actions in the game, the events that
//! result from those actions, and the legal-action menu handed to clients.
//! Everything here crosses the wire as JSON tagged by `type`.

use crate::board::{CornerId, EdgeId, PlayerId, Resource, TileId};
use crate::dev_cards::DevCardKind;
use crate::game::{GameError, PendingDiscard};
use crate::player::ResourceBundle;
use serde::{Deserialize, Serialize};

/// All possible actions a player can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameAction {
    // ==================== Setup Phase ====================
    /// Place a setup settlement (no road connection needed)
    PlaceSettlement { corner: CornerId },
    /// Place a setup road touching the settlement just placed
    PlaceRoad { edge: EdgeId },

    // ==================== Turn Actions ====================
    RollDice,

    // ==================== Robber Actions ====================
    /// Discard half your hand after a 7
    Discard { resources: ResourceBundle },
    MoveRobber { tile: TileId },
    /// Choose a player to steal from after moving the robber
    Steal { target: PlayerId },

    // ==================== Building Actions (Main Phase) ====================
    BuildRoad { edge: EdgeId },
    BuildSettlement { corner: CornerId },
    /// Upgrade a settlement to a city
    BuildCity { corner: CornerId },
    BuyDevCard,

    // ==================== Development Card Actions ====================
    PlayDevCard { card: DevCardKind },
    /// Year of Plenty follow-up: exactly two resources
    SelectResources { resources: Vec<Resource> },
    /// Monopoly follow-up
    SelectResourceType { resource: Resource },

    // ==================== Trading Actions ====================
    /// Offer cards to one player, or to everyone when `to` is empty
    ProposeTrade {
        offer: ResourceBundle,
        request: ResourceBundle,
        #[serde(default)]
        to: Option<PlayerId>,
    },
    AcceptTrade,
    RejectTrade,
    /// Withdraw your own offer
    CancelTrade,
    /// Trade with the bank (4:1) or through a port (3:1 or 2:1)
    BankTrade { give: Resource, receive: Resource },

    // ==================== Turn Management ====================
    EndTurn,
}

/// A trade offer between players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    /// Player making the offer
    pub from: PlayerId,
    /// Specific player to trade with, or None for open offer
    pub to: Option<PlayerId>,
    pub offer: ResourceBundle,
    pub request: ResourceBundle,
    /// Players who turned an open offer down
    pub rejected_by: Vec<PlayerId>,
}

impl TradeOffer {
    pub fn new(
        from: PlayerId,
        to: Option<PlayerId>,
        offer: ResourceBundle,
        request: ResourceBundle,
    ) -> Self {
        Self {
            from,
            to,
            offer,
            request,
            rejected_by: Vec::new(),
        }
    }

    /// Whether `player` may accept or reject this offer
    pub fn is_addressed_to(&self, player: PlayerId) -> bool {
        player != self.from && self.to.map_or(true, |to| to == player)
    }
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        player_count: usize,
        first_player: PlayerId,
    },

    DiceRolled {
        player: PlayerId,
        roll: (u8, u8),
        total: u8,
    },

    /// Resources were distributed after a dice roll or second setup settlement
    ResourcesDistributed {
        distributions: Vec<(PlayerId, Resource, u32)>,
    },

    SettlementBuilt {
        player: PlayerId,
        corner: CornerId,
    },

    CityBuilt {
        player: PlayerId,
        corner: CornerId,
    },

    RoadBuilt {
        player: PlayerId,
        edge: EdgeId,
        /// Placed for free (setup or Road Building)
        free: bool,
    },

    DevCardBought {
        player: PlayerId,
        card: DevCardKind,
    },

    DevCardPlayed {
        player: PlayerId,
        card: DevCardKind,
    },

    YearOfPlentyResolved {
        player: PlayerId,
        resources: Vec<Resource>,
    },

    MonopolyResolved {
        player: PlayerId,
        resource: Resource,
        total_taken: u32,
    },

    /// Some players must discard before the robber moves
    DiscardRequired {
        discards: Vec<PendingDiscard>,
    },

    CardsDiscarded {
        player: PlayerId,
        count: u32,
    },

    RobberMoved {
        player: PlayerId,
        from: TileId,
        to: TileId,
    },

    ResourceStolen {
        thief: PlayerId,
        victim: PlayerId,
        resource: Option<Resource>,
    },

    TradeProposed {
        offer: TradeOffer,
    },

    TradeCompleted {
        from: PlayerId,
        to: PlayerId,
    },

    /// `closed` is set once the offer is off the table
    TradeRejected {
        player: PlayerId,
        closed: bool,
    },

    TradeCancelled {
        player: PlayerId,
    },

    BankTradeCompleted {
        player: PlayerId,
        gave: Resource,
        gave_count: u32,
        received: Resource,
    },

    LongestRoadChanged {
        previous: Option<PlayerId>,
        current: Option<PlayerId>,
        length: u32,
    },

    LargestArmyChanged {
        previous: Option<PlayerId>,
        current: Option<PlayerId>,
        knights: u32,
    },

    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },

    GameWon {
        player: PlayerId,
        victory_points: u32,
    },
}

/// Outcome of processing one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<GameError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<GameEvent>,
}

impl ActionResult {
    pub fn success(events: Vec<GameEvent>) -> Self {
        Self {
            ok: true,
            error: None,
            events,
        }
    }

    pub fn failure(error: GameError) -> Self {
        Self {
            ok: false,
            error: Some(error),
            events: Vec::new(),
        }
    }
}

impl From<Result<Vec<GameEvent>, GameError>> for ActionResult {
    fn from(result: Result<Vec<GameEvent>, GameError>) -> Self {
        match result {
            Ok(events) => Self::success(events),
            Err(error) => Self::failure(error),
        }
    }
}

/// A bank trade the player can currently afford
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankTradeOption {
    pub give: Resource,
    pub ratio: u32,
}

/// One entry of the legal-action menu, with its valid targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AvailableAction {
    PlaceSettlement { corners: Vec<CornerId> },
    PlaceRoad { edges: Vec<EdgeId> },
    RollDice,
    Discard { count: u32 },
    MoveRobber { tiles: Vec<TileId> },
    Steal { targets: Vec<PlayerId> },
    BuildRoad { edges: Vec<EdgeId>, free: bool },
    BuildSettlement { corners: Vec<CornerId> },
    BuildCity { corners: Vec<CornerId> },
    BuyDevCard,
    PlayDevCard { cards: Vec<DevCardKind> },
    SelectResources { count: u32 },
    SelectResourceType,
    ProposeTrade,
    AcceptTrade,
    RejectTrade,
    CancelTrade,
    BankTrade { options: Vec<BankTradeOption> },
    EndTurn,
}
