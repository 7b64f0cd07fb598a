//! Resource flow: production, bank and player trades, discards, steals,
//! and the resource effects of development cards.

use crate::board::{Board, CornerId, PlayerId, PortKind, Resource};
use crate::game::{GameError, PendingDiscard};
use crate::player::{Player, ResourceBundle};
use crate::rng::RandomSource;

/// Default bank exchange rate without a port
pub const BANK_RATIO: u32 = 4;

/// Hand size above which a 7 forces a discard
pub const DISCARD_LIMIT: u32 = 7;

/// What each seat earns from a roll, indexed by player id.
///
/// Tiles holding the robber produce nothing; cities produce two.
pub fn production_for_roll(
    board: &Board,
    dice_total: u8,
    player_count: usize,
) -> Vec<ResourceBundle> {
    let mut income = vec![ResourceBundle::new(); player_count];

    for tile in board.tiles() {
        if tile.number_token != Some(dice_total) || tile.has_robber {
            continue;
        }
        let Some(resource) = tile.resource() else {
            continue;
        };
        for &corner in &tile.corners {
            let building = board.building(corner);
            if let Some(owner) = building.owner() {
                if let Some(bundle) = income.get_mut(owner as usize) {
                    bundle.add(resource, building.production());
                }
            }
        }
    }

    income
}

/// Credit a roll's production and report it per player and resource
pub(crate) fn distribute_resources(
    board: &Board,
    players: &mut [Player],
    dice_total: u8,
) -> Vec<(PlayerId, Resource, u32)> {
    let income = production_for_roll(board, dice_total, players.len());
    let mut report = Vec::new();

    for (player, bundle) in players.iter_mut().zip(income) {
        for resource in Resource::ALL {
            let amount = bundle.get(resource);
            if amount > 0 {
                report.push((player.id, resource, amount));
            }
        }
        player.resources.add_bundle(&bundle);
    }

    report
}

/// One card per producing tile around the second setup settlement
pub(crate) fn grant_setup_resources(
    board: &Board,
    player: &mut Player,
    corner: CornerId,
) -> ResourceBundle {
    let mut granted = ResourceBundle::new();
    if let Some(c) = board.corner(corner) {
        for resource in c
            .tiles
            .iter()
            .filter_map(|&t| board.tile(t).and_then(|tile| tile.resource()))
        {
            granted.add(resource, 1);
        }
    }
    player.resources.add_bundle(&granted);
    granted
}

/// Best rate the player gets when giving `resource` to the bank
pub fn bank_trade_ratio(board: &Board, player: PlayerId, resource: Resource) -> u32 {
    board
        .player_ports(player)
        .into_iter()
        .filter(|port| match port {
            PortKind::Generic => true,
            PortKind::Specific(r) => *r == resource,
        })
        .map(|port| port.ratio())
        .min()
        .unwrap_or(BANK_RATIO)
}

/// Pay `ratio` of `give` to the bank for one `receive`
pub(crate) fn bank_trade(
    board: &Board,
    player: &mut Player,
    give: Resource,
    receive: Resource,
) -> Result<u32, GameError> {
    if give == receive {
        return Err(GameError::InvalidTrade);
    }
    let ratio = bank_trade_ratio(board, player.id, give);
    player.resources.remove(&ResourceBundle::single(give, ratio))?;
    player.resources.add(receive, 1);
    Ok(ratio)
}

/// Both sides of a player trade must carry at least one card
pub fn validate_trade(offer: &ResourceBundle, request: &ResourceBundle) -> Result<(), GameError> {
    if offer.is_empty() || request.is_empty() {
        return Err(GameError::InvalidTrade);
    }
    Ok(())
}

/// Swap `offer` from `from` against `request` from `to`, all or nothing
pub(crate) fn execute_trade(
    players: &mut [Player],
    from: PlayerId,
    to: PlayerId,
    offer: &ResourceBundle,
    request: &ResourceBundle,
) -> Result<(), GameError> {
    validate_trade(offer, request)?;
    if from == to {
        return Err(GameError::InvalidTrade);
    }
    let (giver, taker) = (from as usize, to as usize);
    if giver >= players.len() || taker >= players.len() {
        return Err(GameError::UnknownPlayer);
    }
    if !players[giver].resources.has(offer) || !players[taker].resources.has(request) {
        return Err(GameError::NotEnoughResources);
    }

    players[giver].resources.remove(offer)?;
    players[taker].resources.remove(request)?;
    players[giver].resources.add_bundle(request);
    players[taker].resources.add_bundle(offer);
    Ok(())
}

/// Every player holding more than 7 cards, with how many they must drop
pub fn discard_requirements(players: &[Player]) -> Vec<PendingDiscard> {
    players
        .iter()
        .filter(|p| p.resources.total() > DISCARD_LIMIT)
        .map(|p| PendingDiscard {
            player: p.id,
            count: p.resources.total() / 2,
        })
        .collect()
}

/// Remove a discard selection of exactly `required` cards
pub(crate) fn apply_discard(
    player: &mut Player,
    required: u32,
    selection: &ResourceBundle,
) -> Result<(), GameError> {
    if selection.total() != required {
        return Err(GameError::WrongDiscardCount);
    }
    player.resources.remove(selection)
}

/// Take one card from `victim`, each card equally likely
pub(crate) fn steal_random(
    victim: &mut ResourceBundle,
    rng: &mut dyn RandomSource,
) -> Option<Resource> {
    let total = victim.total();
    if total == 0 {
        return None;
    }
    let resource = victim.nth_card(rng.below(total as usize) as u32)?;
    victim.remove(&ResourceBundle::single(resource, 1)).ok()?;
    Some(resource)
}

/// Collect every other player's `resource` into the caller's hand
pub(crate) fn monopoly(players: &mut [Player], caller: PlayerId, resource: Resource) -> u32 {
    let taken: u32 = players
        .iter_mut()
        .filter(|p| p.id != caller)
        .map(|p| p.resources.take_all(resource))
        .sum();
    if let Some(p) = players.get_mut(caller as usize) {
        p.resources.add(resource, taken);
    }
    taken
}

/// Credit exactly two chosen resources, repeats allowed
pub(crate) fn year_of_plenty(player: &mut Player, picks: &[Resource]) -> Result<(), GameError> {
    if picks.len() != 2 {
        return Err(GameError::InvalidSelection);
    }
    for &resource in picks {
        player.resources.add(resource, 1);
    }
    Ok(())
}
