//! Development cards: deck composition, purchase and play eligibility.

use crate::game::GameError;
use crate::player::{costs, Player};
use crate::rng::{shuffle, RandomSource};
use serde::{Deserialize, Serialize};

/// Development card types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevCardKind {
    /// Move robber and steal, counts toward largest army
    Knight,
    /// Build 2 free roads
    RoadBuilding,
    /// Take 2 resources from the bank
    YearOfPlenty,
    /// Take all of one resource from every other player
    Monopoly,
    /// Hidden +1 VP
    VictoryPoint,
}

impl DevCardKind {
    pub const ALL: [DevCardKind; 5] = [
        DevCardKind::Knight,
        DevCardKind::RoadBuilding,
        DevCardKind::YearOfPlenty,
        DevCardKind::Monopoly,
        DevCardKind::VictoryPoint,
    ];

    /// Copies of this card in a fresh deck
    pub fn deck_count(&self) -> usize {
        match self {
            DevCardKind::Knight => 14,
            DevCardKind::RoadBuilding => 2,
            DevCardKind::YearOfPlenty => 2,
            DevCardKind::Monopoly => 2,
            DevCardKind::VictoryPoint => 5,
        }
    }
}

/// A development card held by a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevCard {
    pub kind: DevCardKind,
    /// Cards can't be played on the turn they were bought
    pub bought_this_turn: bool,
}

impl DevCard {
    /// A card fresh from the deck
    pub fn bought(kind: DevCardKind) -> Self {
        Self {
            kind,
            bought_this_turn: true,
        }
    }
}

/// The unshuffled 25-card deck
pub fn standard_deck() -> Vec<DevCardKind> {
    DevCardKind::ALL
        .iter()
        .flat_map(|&kind| std::iter::repeat(kind).take(kind.deck_count()))
        .collect()
}

/// Shuffle the deck in place before the first draw
pub fn shuffle_deck(deck: &mut [DevCardKind], rng: &mut dyn RandomSource) {
    shuffle(rng, deck);
}

/// Pay for and draw the top card. Nothing changes on failure.
pub(crate) fn buy(
    player: &mut Player,
    deck: &mut Vec<DevCardKind>,
) -> Result<DevCardKind, GameError> {
    if deck.is_empty() {
        return Err(GameError::DeckEmpty);
    }
    player.resources.remove(&costs::development_card())?;
    let kind = deck.pop().ok_or(GameError::DeckEmpty)?;
    player.dev_cards.push(DevCard::bought(kind));
    Ok(kind)
}

/// Check that `player` may play `kind` now.
///
/// Victory point cards never leave the hand, only one card may be played
/// per turn, and a card bought this turn must wait.
pub fn ensure_playable(
    player: &Player,
    kind: DevCardKind,
    played_this_turn: bool,
) -> Result<(), GameError> {
    if kind == DevCardKind::VictoryPoint {
        return Err(GameError::CannotPlayVictoryPoint);
    }
    if played_this_turn {
        return Err(GameError::AlreadyPlayedCard);
    }
    if !player.has_playable(kind) {
        return Err(GameError::NoPlayableCard);
    }
    Ok(())
}

/// Move one eligible card of `kind` from hand to the played pile
pub(crate) fn consume(player: &mut Player, kind: DevCardKind) -> Result<(), GameError> {
    let index = player
        .dev_cards
        .iter()
        .position(|c| c.kind == kind && !c.bought_this_turn)
        .ok_or(GameError::NoPlayableCard)?;
    player.dev_cards.remove(index);
    player.dev_cards_played.push(kind);
    if kind == DevCardKind::Knight {
        player.knights_played += 1;
    }
    Ok(())
}
