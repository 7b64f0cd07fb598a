//! Read models handed to clients.
//!
//! - `sanitize_state`: the game as one seat may see it. Opponents' hands
//!   collapse to counts and hidden victory points stay hidden.
//! - `available_actions`: the legal-action menu with every valid target.

use crate::actions::{AvailableAction, BankTradeOption, TradeOffer};
use crate::board::{Board, PlayerId, Resource};
use crate::dev_cards::{DevCard, DevCardKind};
use crate::economy;
use crate::game::{GamePhase, GameState, PendingAction, PendingDiscard};
use crate::placement;
use crate::player::{costs, Player, PlayerColor, ResourceBundle};
use crate::scoring;
use serde::{Deserialize, Serialize};

/// Public view of one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub display_name: String,
    pub color: PlayerColor,
    pub resource_count: u32,
    /// Only filled in for the viewer's own seat
    pub resources: Option<ResourceBundle>,
    pub dev_card_count: usize,
    pub dev_cards: Option<Vec<DevCard>>,
    pub dev_cards_played: Vec<DevCardKind>,
    pub settlements_remaining: u32,
    pub cities_remaining: u32,
    pub roads_remaining: u32,
    pub knights_played: u32,
    pub longest_road_length: u32,
    pub has_longest_road: bool,
    pub has_largest_army: bool,
    pub public_victory_points: u32,
    /// Including victory point cards; own seat only
    pub victory_points: Option<u32>,
}

/// The game as seen from one seat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameView {
    pub viewer: PlayerId,
    pub phase: GamePhase,
    pub board: Board,
    pub players: Vec<PlayerView>,
    pub turn_index: PlayerId,
    pub round_number: u32,
    pub last_roll: Option<(u8, u8)>,
    pub longest_road_holder: Option<PlayerId>,
    pub largest_army_holder: Option<PlayerId>,
    pub dev_card_deck_size: usize,
    pub dev_card_played_this_turn: bool,
    pub pending_action: Option<PendingAction>,
    pub pending_discards: Option<Vec<PendingDiscard>>,
    pub trade_offer: Option<TradeOffer>,
    pub target_victory_points: u32,
    pub winner: Option<PlayerId>,
}

/// Build the view for `viewer`. Ids outside the table see public data only.
pub fn sanitize_state(state: &GameState, viewer: PlayerId) -> GameView {
    let players = state
        .players
        .iter()
        .map(|p| player_view(state, p, p.id == viewer))
        .collect();

    GameView {
        viewer,
        phase: state.phase,
        board: state.board.clone(),
        players,
        turn_index: state.turn_index,
        round_number: state.round_number,
        last_roll: state.last_roll,
        longest_road_holder: state.longest_road_holder,
        largest_army_holder: state.largest_army_holder,
        dev_card_deck_size: state.dev_card_deck.len(),
        dev_card_played_this_turn: state.dev_card_played_this_turn,
        pending_action: state.pending_action.clone(),
        pending_discards: state.pending_discards.clone(),
        trade_offer: state.trade_offer.clone(),
        target_victory_points: state.target_victory_points,
        winner: state.winner,
    }
}

fn player_view(state: &GameState, player: &Player, is_self: bool) -> PlayerView {
    PlayerView {
        id: player.id,
        display_name: player.display_name.clone(),
        color: player.color,
        resource_count: player.resources.total(),
        resources: is_self.then_some(player.resources),
        dev_card_count: player.dev_cards.len(),
        dev_cards: is_self.then(|| player.dev_cards.clone()),
        dev_cards_played: player.dev_cards_played.clone(),
        settlements_remaining: player.settlements_remaining,
        cities_remaining: player.cities_remaining,
        roads_remaining: player.roads_remaining,
        knights_played: player.knights_played,
        longest_road_length: player.longest_road_length,
        has_longest_road: state.longest_road_holder == Some(player.id),
        has_largest_army: state.largest_army_holder == Some(player.id),
        public_victory_points: scoring::public_victory_points(state, player.id),
        victory_points: is_self.then(|| scoring::victory_points(state, player.id)),
    }
}

/// Everything `player` could legally do right now
pub fn available_actions(state: &GameState, player: PlayerId) -> Vec<AvailableAction> {
    let Some(p) = state.player(player) else {
        return Vec::new();
    };

    match state.phase {
        GamePhase::Lobby | GamePhase::Finished => return Vec::new(),
        GamePhase::Discard => {
            return state
                .pending_discards
                .iter()
                .flatten()
                .filter(|d| d.player == player)
                .map(|d| AvailableAction::Discard { count: d.count })
                .collect();
        }
        _ => {}
    }

    if player != state.turn_index {
        return trade_responses(state, p);
    }

    let board = &state.board;
    let mut actions = Vec::new();

    match state.phase {
        GamePhase::SetupSettlement1 | GamePhase::SetupSettlement2 => {
            actions.push(AvailableAction::PlaceSettlement {
                corners: placement::valid_settlement_corners(board, player, true),
            });
        }
        GamePhase::SetupRoad1 | GamePhase::SetupRoad2 => {
            if let Some(PendingAction::SetupRoad { corner }) = state.pending_action {
                actions.push(AvailableAction::PlaceRoad {
                    edges: placement::valid_road_edges(board, player, Some(corner)),
                });
            }
        }
        GamePhase::Roll => {
            actions.push(AvailableAction::RollDice);
            if !state.dev_card_played_this_turn && p.has_playable(DevCardKind::Knight) {
                actions.push(AvailableAction::PlayDevCard {
                    cards: vec![DevCardKind::Knight],
                });
            }
        }
        GamePhase::RobberMove => {
            actions.push(AvailableAction::MoveRobber {
                tiles: board
                    .tiles()
                    .iter()
                    .map(|t| t.id)
                    .filter(|&id| id != board.robber_tile())
                    .collect(),
            });
        }
        GamePhase::RobberSteal => {
            if let Some(PendingAction::Steal { candidates }) = &state.pending_action {
                actions.push(AvailableAction::Steal {
                    targets: candidates.clone(),
                });
            }
        }
        GamePhase::Main => main_phase_actions(state, p, &mut actions),
        GamePhase::Lobby | GamePhase::Finished | GamePhase::Discard => {}
    }

    actions
}

fn trade_responses(state: &GameState, p: &Player) -> Vec<AvailableAction> {
    let mut actions = Vec::new();
    if state.phase != GamePhase::Main {
        return actions;
    }
    if let Some(offer) = &state.trade_offer {
        if offer.is_addressed_to(p.id) && !offer.rejected_by.contains(&p.id) {
            if p.resources.has(&offer.request) {
                actions.push(AvailableAction::AcceptTrade);
            }
            actions.push(AvailableAction::RejectTrade);
        }
    }
    actions
}

fn main_phase_actions(state: &GameState, p: &Player, actions: &mut Vec<AvailableAction>) {
    let board = &state.board;
    let player = p.id;

    match state.pending_action {
        Some(PendingAction::YearOfPlenty) => {
            actions.push(AvailableAction::SelectResources { count: 2 });
            return;
        }
        Some(PendingAction::Monopoly) => {
            actions.push(AvailableAction::SelectResourceType);
            return;
        }
        _ => {}
    }
    let road_building = matches!(
        state.pending_action,
        Some(PendingAction::RoadBuilding { .. })
    );

    if p.roads_remaining > 0 && (road_building || p.resources.has(&costs::road())) {
        let edges = placement::valid_road_edges(board, player, None);
        if !edges.is_empty() {
            actions.push(AvailableAction::BuildRoad {
                edges,
                free: road_building,
            });
        }
    }

    if p.settlements_remaining > 0 && p.resources.has(&costs::settlement()) {
        let corners = placement::valid_settlement_corners(board, player, false);
        if !corners.is_empty() {
            actions.push(AvailableAction::BuildSettlement { corners });
        }
    }

    if p.cities_remaining > 0 && p.resources.has(&costs::city()) {
        let corners = placement::valid_city_corners(board, player);
        if !corners.is_empty() {
            actions.push(AvailableAction::BuildCity { corners });
        }
    }

    if !state.dev_card_deck.is_empty() && p.resources.has(&costs::development_card()) {
        actions.push(AvailableAction::BuyDevCard);
    }

    if !state.dev_card_played_this_turn && state.pending_action.is_none() {
        let cards: Vec<DevCardKind> = DevCardKind::ALL
            .iter()
            .copied()
            .filter(|&kind| kind != DevCardKind::VictoryPoint && p.has_playable(kind))
            .filter(|&kind| kind != DevCardKind::RoadBuilding || p.roads_remaining > 0)
            .collect();
        if !cards.is_empty() {
            actions.push(AvailableAction::PlayDevCard { cards });
        }
    }

    let options: Vec<BankTradeOption> = Resource::ALL
        .iter()
        .map(|&give| BankTradeOption {
            give,
            ratio: economy::bank_trade_ratio(board, player, give),
        })
        .filter(|o| p.resources.get(o.give) >= o.ratio)
        .collect();
    if !options.is_empty() {
        actions.push(AvailableAction::BankTrade { options });
    }

    if !p.resources.is_empty() {
        actions.push(AvailableAction::ProposeTrade);
    }
    if state.trade_offer.is_some() {
        actions.push(AvailableAction::CancelTrade);
    }

    actions.push(AvailableAction::EndTurn);
}
