//! The rules engine.
//!
//! `GameEngine` owns a `GameState` and a random source and is the only
//! thing that changes the state in response to player actions. Every
//! action is checked in full before anything is written, so a rejected
//! action leaves the game exactly as it was.

use crate::actions::{ActionResult, AvailableAction, GameAction, GameEvent, TradeOffer};
use crate::board::{CornerId, EdgeId, PlayerId, Resource, TileId};
use crate::dev_cards::{self, DevCardKind};
use crate::economy;
use crate::game::{
    GameConfig, GameError, GamePhase, GameState, PendingAction, MAX_PLAYERS, MIN_PLAYERS,
};
use crate::placement;
use crate::player::ResourceBundle;
use crate::rng::{RandomSource, StdRandom};
use crate::scoring;
use crate::view::{self, GameView};
use std::fmt;
use tracing::{debug, info};

pub struct GameEngine {
    state: GameState,
    rng: Box<dyn RandomSource>,
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("phase", &self.state.phase)
            .field("turn_index", &self.state.turn_index)
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    pub fn new(state: GameState, rng: impl RandomSource + 'static) -> Self {
        Self {
            state,
            rng: Box::new(rng),
        }
    }

    /// A lobby game on OS entropy
    pub fn create(player_names: Vec<String>, config: GameConfig) -> Self {
        Self::new(GameState::new(player_names, config), StdRandom::new())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for fixtures and hosts restoring a saved game
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Leave the lobby: shuffle the deck and hand seat 0 the first
    /// setup placement.
    pub fn start_game(&mut self) -> Result<Vec<GameEvent>, GameError> {
        match self.state.phase {
            GamePhase::Lobby => {}
            GamePhase::Finished => return Err(GameError::GameOver),
            _ => return Err(GameError::WrongPhase),
        }

        let count = self.state.player_count();
        if count < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }
        if count > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }

        dev_cards::shuffle_deck(&mut self.state.dev_card_deck, self.rng.as_mut());
        self.state.phase = GamePhase::SetupSettlement1;
        self.state.turn_index = 0;
        self.state.round_number = 0;

        info!(
            players = count,
            target = self.state.target_victory_points,
            "game started"
        );
        Ok(vec![GameEvent::GameStarted {
            player_count: count,
            first_player: 0,
        }])
    }

    /// Validate and apply one action for `player`
    pub fn process_action(
        &mut self,
        player: PlayerId,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        debug!(player, ?action, "processing action");
        let result = self.apply(player, action);
        match &result {
            Ok(events) => debug!(
                player,
                events = events.len(),
                phase = ?self.state.phase,
                "action accepted"
            ),
            Err(error) => debug!(player, code = error.code(), "action rejected"),
        }
        result
    }

    /// Parse a `{type, ...}` JSON action and apply it
    pub fn process_json(&mut self, player: PlayerId, action: &serde_json::Value) -> ActionResult {
        match serde_json::from_value::<GameAction>(action.clone()) {
            Ok(action) => self.process_action(player, action).into(),
            Err(err) => {
                debug!(player, %err, "unrecognized action");
                ActionResult::failure(GameError::UnknownAction)
            }
        }
    }

    /// The state as `viewer` is allowed to see it
    pub fn sanitize(&self, viewer: PlayerId) -> GameView {
        view::sanitize_state(&self.state, viewer)
    }

    pub fn available_actions(&self, player: PlayerId) -> Vec<AvailableAction> {
        view::available_actions(&self.state, player)
    }

    fn apply(&mut self, player: PlayerId, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        match self.state.phase {
            GamePhase::Finished => return Err(GameError::GameOver),
            GamePhase::Lobby => return Err(GameError::WrongPhase),
            _ => {}
        }
        if self.state.player(player).is_none() {
            return Err(GameError::UnknownPlayer);
        }

        let mut events = match action {
            // ==================== Setup Phase ====================
            GameAction::PlaceSettlement { corner } => self.place_setup_settlement(player, corner)?,
            GameAction::PlaceRoad { edge } => self.place_setup_road(player, edge)?,

            // ==================== Dice and Robber ====================
            GameAction::RollDice => self.roll_dice(player)?,
            GameAction::Discard { resources } => self.discard(player, resources)?,
            GameAction::MoveRobber { tile } => self.move_robber(player, tile)?,
            GameAction::Steal { target } => self.steal(player, target)?,

            // ==================== Building ====================
            GameAction::BuildRoad { edge } => self.build_road(player, edge)?,
            GameAction::BuildSettlement { corner } => self.build_settlement(player, corner)?,
            GameAction::BuildCity { corner } => self.build_city(player, corner)?,

            // ==================== Development Cards ====================
            GameAction::BuyDevCard => self.buy_dev_card(player)?,
            GameAction::PlayDevCard { card } => self.play_dev_card(player, card)?,
            GameAction::SelectResources { resources } => self.select_resources(player, resources)?,
            GameAction::SelectResourceType { resource } => {
                self.select_resource_type(player, resource)?
            }

            // ==================== Trading ====================
            GameAction::ProposeTrade { offer, request, to } => {
                self.propose_trade(player, offer, request, to)?
            }
            GameAction::AcceptTrade => self.accept_trade(player)?,
            GameAction::RejectTrade => self.reject_trade(player)?,
            GameAction::CancelTrade => self.cancel_trade(player)?,
            GameAction::BankTrade { give, receive } => self.bank_trade(player, give, receive)?,

            GameAction::EndTurn => self.end_turn(player)?,
        };

        events.extend(self.check_winner());
        Ok(events)
    }

    // ==================== Guards ====================

    fn expect_phase(&self, allowed: &[GamePhase]) -> Result<(), GameError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            Err(GameError::WrongPhase)
        }
    }

    fn expect_turn(&self, player: PlayerId) -> Result<(), GameError> {
        if player == self.state.turn_index {
            Ok(())
        } else {
            Err(GameError::NotYourTurn)
        }
    }

    /// Road Building may sit open while the player does other things
    fn expect_no_pending(&self) -> Result<(), GameError> {
        match self.state.pending_action {
            None | Some(PendingAction::RoadBuilding { .. }) => Ok(()),
            Some(_) => Err(GameError::PendingActionUnresolved),
        }
    }

    fn expect_main_turn(&self, player: PlayerId) -> Result<(), GameError> {
        self.expect_phase(&[GamePhase::Main])?;
        self.expect_turn(player)?;
        self.expect_no_pending()
    }

    // ==================== Setup ====================

    fn place_setup_settlement(
        &mut self,
        player: PlayerId,
        corner: CornerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_phase(&[GamePhase::SetupSettlement1, GamePhase::SetupSettlement2])?;
        self.expect_turn(player)?;
        placement::can_place_settlement(&self.state.board, corner, player, true)?;

        let second_round = self.state.phase == GamePhase::SetupSettlement2;
        let state = &mut self.state;
        let p = state
            .players
            .get_mut(player as usize)
            .ok_or(GameError::UnknownPlayer)?;
        if p.settlements_remaining == 0 {
            return Err(GameError::NoPiecesRemaining);
        }

        state.board.place_settlement(corner, player);
        p.settlements_remaining -= 1;

        let mut events = vec![GameEvent::SettlementBuilt { player, corner }];

        // The second settlement pays out its neighbors once
        if second_round {
            let granted = economy::grant_setup_resources(&state.board, p, corner);
            if !granted.is_empty() {
                events.push(GameEvent::ResourcesDistributed {
                    distributions: bundle_report(player, &granted),
                });
            }
        }

        state.pending_action = Some(PendingAction::SetupRoad { corner });
        state.phase = if second_round {
            GamePhase::SetupRoad2
        } else {
            GamePhase::SetupRoad1
        };
        events.extend(scoring::update_longest_road(state));
        Ok(events)
    }

    fn place_setup_road(
        &mut self,
        player: PlayerId,
        edge: EdgeId,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_phase(&[GamePhase::SetupRoad1, GamePhase::SetupRoad2])?;
        self.expect_turn(player)?;
        let corner = match self.state.pending_action {
            Some(PendingAction::SetupRoad { corner }) => corner,
            _ => return Err(GameError::WrongPhase),
        };
        placement::can_place_road(&self.state.board, edge, player, Some(corner))?;

        let p = self.state.player_mut(player)?;
        if p.roads_remaining == 0 {
            return Err(GameError::NoPiecesRemaining);
        }
        p.roads_remaining -= 1;
        self.state.board.place_road(edge, player);
        self.state.pending_action = None;

        let mut events = vec![GameEvent::RoadBuilt {
            player,
            edge,
            free: true,
        }];
        events.extend(scoring::update_longest_road(&mut self.state));
        events.extend(self.advance_setup());
        Ok(events)
    }

    /// Forward through the seats, then back again; the last seat places
    /// twice in a row.
    fn advance_setup(&mut self) -> Option<GameEvent> {
        let count = self.state.player_count() as PlayerId;
        let current = self.state.turn_index;

        match self.state.phase {
            GamePhase::SetupRoad1 if current + 1 < count => {
                self.state.turn_index = current + 1;
                self.state.phase = GamePhase::SetupSettlement1;
            }
            GamePhase::SetupRoad1 => {
                self.state.phase = GamePhase::SetupSettlement2;
            }
            GamePhase::SetupRoad2 if current > 0 => {
                self.state.turn_index = current - 1;
                self.state.phase = GamePhase::SetupSettlement2;
            }
            _ => {
                self.state.turn_index = 0;
                self.state.phase = GamePhase::Roll;
                self.state.round_number = 1;
                info!("setup complete");
            }
        }

        (self.state.turn_index != current).then_some(GameEvent::TurnEnded {
            player: current,
            next_player: self.state.turn_index,
        })
    }

    // ==================== Dice and Robber ====================

    fn roll_dice(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        self.expect_phase(&[GamePhase::Roll])?;
        self.expect_turn(player)?;

        let roll = (self.rng.roll_die(), self.rng.roll_die());
        let total = roll.0 + roll.1;
        self.state.last_roll = Some(roll);

        let mut events = vec![GameEvent::DiceRolled {
            player,
            roll,
            total,
        }];

        if total == 7 {
            let discards = economy::discard_requirements(&self.state.players);
            if discards.is_empty() {
                self.state.phase = GamePhase::RobberMove;
            } else {
                events.push(GameEvent::DiscardRequired {
                    discards: discards.clone(),
                });
                self.state.pending_discards = Some(discards);
                self.state.phase = GamePhase::Discard;
            }
        } else {
            let report =
                economy::distribute_resources(&self.state.board, &mut self.state.players, total);
            if !report.is_empty() {
                events.push(GameEvent::ResourcesDistributed {
                    distributions: report,
                });
            }
            self.state.phase = GamePhase::Main;
        }

        Ok(events)
    }

    /// Any listed player may discard, in any order
    fn discard(
        &mut self,
        player: PlayerId,
        selection: ResourceBundle,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_phase(&[GamePhase::Discard])?;
        let required = self
            .state
            .pending_discards
            .as_ref()
            .and_then(|list| list.iter().find(|d| d.player == player))
            .map(|d| d.count)
            .ok_or(GameError::NotRequiredToDiscard)?;

        economy::apply_discard(self.state.player_mut(player)?, required, &selection)?;

        let remaining = match self.state.pending_discards.as_mut() {
            Some(list) => {
                list.retain(|d| d.player != player);
                list.len()
            }
            None => 0,
        };
        if remaining == 0 {
            self.state.pending_discards = None;
            self.state.phase = GamePhase::RobberMove;
        }

        Ok(vec![GameEvent::CardsDiscarded {
            player,
            count: required,
        }])
    }

    fn move_robber(&mut self, player: PlayerId, tile: TileId) -> Result<Vec<GameEvent>, GameError> {
        self.expect_phase(&[GamePhase::RobberMove])?;
        self.expect_turn(player)?;
        if self.state.board.tile(tile).is_none() {
            return Err(GameError::InvalidTile);
        }
        let from = self.state.board.robber_tile();
        if tile == from {
            return Err(GameError::InvalidRobberTile);
        }

        self.state.board.move_robber(tile);

        let candidates: Vec<PlayerId> = self
            .state
            .board
            .players_on_tile(tile)
            .into_iter()
            .filter(|&id| id != player)
            .filter(|&id| {
                self.state
                    .player(id)
                    .is_some_and(|p| p.resources.total() > 0)
            })
            .collect();

        if candidates.is_empty() {
            self.finish_robber();
        } else {
            self.state.pending_action = Some(PendingAction::Steal { candidates });
            self.state.phase = GamePhase::RobberSteal;
        }

        Ok(vec![GameEvent::RobberMoved {
            player,
            from,
            to: tile,
        }])
    }

    fn steal(&mut self, player: PlayerId, target: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        self.expect_phase(&[GamePhase::RobberSteal])?;
        self.expect_turn(player)?;
        let allowed = matches!(
            &self.state.pending_action,
            Some(PendingAction::Steal { candidates }) if candidates.contains(&target)
        );
        if !allowed {
            return Err(GameError::InvalidStealTarget);
        }

        let victim = self
            .state
            .players
            .get_mut(target as usize)
            .ok_or(GameError::UnknownPlayer)?;
        let resource = economy::steal_random(&mut victim.resources, self.rng.as_mut());
        if let Some(resource) = resource {
            self.state.player_mut(player)?.resources.add(resource, 1);
        }
        self.finish_robber();

        Ok(vec![GameEvent::ResourceStolen {
            thief: player,
            victim: target,
            resource,
        }])
    }

    /// Back to the main phase, or to rolling if a knight came first
    fn finish_robber(&mut self) {
        self.state.pending_action = None;
        self.state.phase = if self.state.last_roll.is_some() {
            GamePhase::Main
        } else {
            GamePhase::Roll
        };
    }

    // ==================== Building ====================

    fn build_road(&mut self, player: PlayerId, edge: EdgeId) -> Result<Vec<GameEvent>, GameError> {
        self.expect_main_turn(player)?;
        let free = matches!(
            self.state.pending_action,
            Some(PendingAction::RoadBuilding { .. })
        );
        placement::can_place_road(&self.state.board, edge, player, None)?;

        let p = self.state.player_mut(player)?;
        if free {
            if p.roads_remaining == 0 {
                return Err(GameError::NoPiecesRemaining);
            }
            p.roads_remaining -= 1;
        } else {
            p.buy_road()?;
        }
        self.state.board.place_road(edge, player);

        if let Some(PendingAction::RoadBuilding {
            roads_to_place,
            roads_placed,
        }) = &mut self.state.pending_action
        {
            *roads_placed += 1;
            if *roads_placed >= *roads_to_place {
                self.state.pending_action = None;
            }
        }

        let mut events = vec![GameEvent::RoadBuilt { player, edge, free }];
        events.extend(scoring::update_longest_road(&mut self.state));
        Ok(events)
    }

    fn build_settlement(
        &mut self,
        player: PlayerId,
        corner: CornerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_main_turn(player)?;
        placement::can_place_settlement(&self.state.board, corner, player, false)?;
        self.state.player_mut(player)?.buy_settlement()?;
        self.state.board.place_settlement(corner, player);

        let mut events = vec![GameEvent::SettlementBuilt { player, corner }];
        // A new settlement can split someone else's road
        events.extend(scoring::update_longest_road(&mut self.state));
        Ok(events)
    }

    fn build_city(
        &mut self,
        player: PlayerId,
        corner: CornerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_main_turn(player)?;
        placement::can_place_city(&self.state.board, corner, player)?;
        self.state.player_mut(player)?.buy_city()?;
        self.state.board.upgrade_to_city(corner, player);
        Ok(vec![GameEvent::CityBuilt { player, corner }])
    }

    // ==================== Development Cards ====================

    fn buy_dev_card(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        self.expect_main_turn(player)?;
        let state = &mut self.state;
        let p = state
            .players
            .get_mut(player as usize)
            .ok_or(GameError::UnknownPlayer)?;
        let card = dev_cards::buy(p, &mut state.dev_card_deck)?;
        Ok(vec![GameEvent::DevCardBought { player, card }])
    }

    fn play_dev_card(
        &mut self,
        player: PlayerId,
        card: DevCardKind,
    ) -> Result<Vec<GameEvent>, GameError> {
        if card == DevCardKind::Knight {
            self.expect_phase(&[GamePhase::Roll, GamePhase::Main])?;
        } else {
            self.expect_phase(&[GamePhase::Main])?;
        }
        self.expect_turn(player)?;
        if self.state.pending_action.is_some() {
            return Err(GameError::PendingActionUnresolved);
        }

        let p = self.state.player(player).ok_or(GameError::UnknownPlayer)?;
        dev_cards::ensure_playable(p, card, self.state.dev_card_played_this_turn)?;
        let roads_left = p.roads_remaining;
        if card == DevCardKind::RoadBuilding && roads_left == 0 {
            return Err(GameError::NoPiecesRemaining);
        }

        dev_cards::consume(self.state.player_mut(player)?, card)?;
        self.state.dev_card_played_this_turn = true;

        let mut events = vec![GameEvent::DevCardPlayed { player, card }];
        match card {
            DevCardKind::Knight => {
                events.extend(scoring::update_largest_army(&mut self.state));
                self.state.phase = GamePhase::RobberMove;
            }
            DevCardKind::RoadBuilding => {
                self.state.pending_action = Some(PendingAction::RoadBuilding {
                    roads_to_place: roads_left.min(2),
                    roads_placed: 0,
                });
            }
            DevCardKind::YearOfPlenty => {
                self.state.pending_action = Some(PendingAction::YearOfPlenty);
            }
            DevCardKind::Monopoly => {
                self.state.pending_action = Some(PendingAction::Monopoly);
            }
            DevCardKind::VictoryPoint => {}
        }
        Ok(events)
    }

    fn select_resources(
        &mut self,
        player: PlayerId,
        resources: Vec<Resource>,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_phase(&[GamePhase::Main])?;
        self.expect_turn(player)?;
        if self.state.pending_action != Some(PendingAction::YearOfPlenty) {
            return Err(GameError::NoPendingAction);
        }

        economy::year_of_plenty(self.state.player_mut(player)?, &resources)?;
        self.state.pending_action = None;
        Ok(vec![GameEvent::YearOfPlentyResolved { player, resources }])
    }

    fn select_resource_type(
        &mut self,
        player: PlayerId,
        resource: Resource,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_phase(&[GamePhase::Main])?;
        self.expect_turn(player)?;
        if self.state.pending_action != Some(PendingAction::Monopoly) {
            return Err(GameError::NoPendingAction);
        }

        let total_taken = economy::monopoly(&mut self.state.players, player, resource);
        self.state.pending_action = None;
        Ok(vec![GameEvent::MonopolyResolved {
            player,
            resource,
            total_taken,
        }])
    }

    // ==================== Trading ====================

    fn propose_trade(
        &mut self,
        player: PlayerId,
        offer: ResourceBundle,
        request: ResourceBundle,
        to: Option<PlayerId>,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_main_turn(player)?;
        economy::validate_trade(&offer, &request)?;
        if let Some(target) = to {
            if target == player {
                return Err(GameError::InvalidTrade);
            }
            if self.state.player(target).is_none() {
                return Err(GameError::UnknownPlayer);
            }
        }
        let p = self.state.player(player).ok_or(GameError::UnknownPlayer)?;
        if !p.resources.has(&offer) {
            return Err(GameError::NotEnoughResources);
        }

        // A new proposal replaces any open one
        let trade = TradeOffer::new(player, to, offer, request);
        self.state.trade_offer = Some(trade.clone());
        Ok(vec![GameEvent::TradeProposed { offer: trade }])
    }

    fn open_offer_for(&self, player: PlayerId) -> Result<TradeOffer, GameError> {
        self.expect_phase(&[GamePhase::Main])?;
        let offer = self
            .state
            .trade_offer
            .clone()
            .ok_or(GameError::NoSuchTrade)?;
        if player == offer.from {
            return Err(GameError::InvalidTrade);
        }
        if !offer.is_addressed_to(player) {
            return Err(GameError::NotTradeTarget);
        }
        Ok(offer)
    }

    /// Both hands are checked again since the offer was made
    fn accept_trade(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        let offer = self.open_offer_for(player)?;
        economy::execute_trade(
            &mut self.state.players,
            offer.from,
            player,
            &offer.offer,
            &offer.request,
        )?;
        self.state.trade_offer = None;
        Ok(vec![GameEvent::TradeCompleted {
            from: offer.from,
            to: player,
        }])
    }

    fn reject_trade(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        self.open_offer_for(player)?;
        let others = self.state.player_count().saturating_sub(1);

        let closed = match self.state.trade_offer.as_mut() {
            Some(offer) if offer.to.is_none() => {
                if !offer.rejected_by.contains(&player) {
                    offer.rejected_by.push(player);
                }
                offer.rejected_by.len() >= others
            }
            _ => true,
        };
        if closed {
            self.state.trade_offer = None;
        }

        Ok(vec![GameEvent::TradeRejected { player, closed }])
    }

    fn cancel_trade(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        self.expect_phase(&[GamePhase::Main])?;
        self.expect_turn(player)?;
        match &self.state.trade_offer {
            None => return Err(GameError::NoSuchTrade),
            Some(offer) if offer.from != player => return Err(GameError::InvalidTrade),
            Some(_) => {}
        }
        self.state.trade_offer = None;
        Ok(vec![GameEvent::TradeCancelled { player }])
    }

    fn bank_trade(
        &mut self,
        player: PlayerId,
        give: Resource,
        receive: Resource,
    ) -> Result<Vec<GameEvent>, GameError> {
        self.expect_main_turn(player)?;
        let state = &mut self.state;
        let p = state
            .players
            .get_mut(player as usize)
            .ok_or(GameError::UnknownPlayer)?;
        let ratio = economy::bank_trade(&state.board, p, give, receive)?;
        Ok(vec![GameEvent::BankTradeCompleted {
            player,
            gave: give,
            gave_count: ratio,
            received: receive,
        }])
    }

    // ==================== Turn Management ====================

    /// Unused Road Building placements are dropped
    fn end_turn(&mut self, player: PlayerId) -> Result<Vec<GameEvent>, GameError> {
        self.expect_main_turn(player)?;

        let state = &mut self.state;
        state.pending_action = None;
        state.trade_offer = None;
        state.dev_card_played_this_turn = false;
        state.last_roll = None;
        for p in &mut state.players {
            p.end_turn();
        }

        let next = ((player as usize + 1) % state.player_count()) as PlayerId;
        if next == 0 {
            state.round_number += 1;
        }
        state.turn_index = next;
        state.phase = GamePhase::Roll;

        Ok(vec![GameEvent::TurnEnded {
            player,
            next_player: next,
        }])
    }

    fn check_winner(&mut self) -> Option<GameEvent> {
        if matches!(self.state.phase, GamePhase::Lobby | GamePhase::Finished) {
            return None;
        }
        let winner = scoring::find_winner(&self.state)?;
        let victory_points = scoring::victory_points(&self.state, winner);

        self.state.phase = GamePhase::Finished;
        self.state.winner = Some(winner);
        info!(player = winner, victory_points, "game over");
        Some(GameEvent::GameWon {
            player: winner,
            victory_points,
        })
    }
}

fn bundle_report(player: PlayerId, bundle: &ResourceBundle) -> Vec<(PlayerId, Resource, u32)> {
    Resource::ALL
        .iter()
        .filter(|&&r| bundle.get(r) > 0)
        .map(|&r| (player, r, bundle.get(r)))
        .collect()
}
