//! Player state and resource management.
//!
//! This module contains:
//! - `ResourceBundle`: five non-negative resource counters
//! - Building costs and piece supply
//! - `Player`: a seat's hand, development cards and achievements

use crate::board::{PlayerId, Resource};
use crate::dev_cards::{DevCard, DevCardKind};
use crate::game::GameError;
use serde::{Deserialize, Serialize};

/// Settlements each player starts with
pub const SETTLEMENT_SUPPLY: u32 = 5;
/// Cities each player starts with
pub const CITY_SUPPLY: u32 = 4;
/// Roads each player starts with
pub const ROAD_SUPPLY: u32 = 15;

/// Player color for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerColor {
    Red,
    Blue,
    Orange,
    White,
}

impl PlayerColor {
    /// Get color for a seat
    pub fn for_player(id: PlayerId) -> Self {
        match id % 4 {
            0 => PlayerColor::Red,
            1 => PlayerColor::Blue,
            2 => PlayerColor::Orange,
            _ => PlayerColor::White,
        }
    }
}

/// A bundle of resource cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceBundle {
    pub wood: u32,
    pub brick: u32,
    pub sheep: u32,
    pub wheat: u32,
    pub ore: u32,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bundle with specific amounts
    pub fn with_amounts(wood: u32, brick: u32, sheep: u32, wheat: u32, ore: u32) -> Self {
        Self {
            wood,
            brick,
            sheep,
            wheat,
            ore,
        }
    }

    /// Create a bundle with a single resource
    pub fn single(resource: Resource, amount: u32) -> Self {
        let mut bundle = Self::new();
        bundle.add(resource, amount);
        bundle
    }

    /// Total number of resource cards, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        Resource::ALL
            .iter()
            .fold(0u32, |sum, &resource| sum.saturating_add(self.get(resource)))
    }

    pub fn is_empty(&self) -> bool {
        Resource::ALL.iter().all(|&resource| self.get(resource) == 0)
    }

    /// Get count of a specific resource
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Brick => self.brick,
            Resource::Sheep => self.sheep,
            Resource::Wheat => self.wheat,
            Resource::Ore => self.ore,
        }
    }

    fn slot(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Wood => &mut self.wood,
            Resource::Brick => &mut self.brick,
            Resource::Sheep => &mut self.sheep,
            Resource::Wheat => &mut self.wheat,
            Resource::Ore => &mut self.ore,
        }
    }

    /// Set count of a specific resource
    pub fn set(&mut self, resource: Resource, count: u32) {
        *self.slot(resource) = count;
    }

    pub fn add(&mut self, resource: Resource, amount: u32) {
        let slot = self.slot(resource);
        *slot = slot.saturating_add(amount);
    }

    /// Add another bundle to this one
    pub fn add_bundle(&mut self, other: &ResourceBundle) {
        for resource in Resource::ALL {
            self.add(resource, other.get(resource));
        }
    }

    /// Whether this bundle holds at least `cost` of every resource
    pub fn has(&self, cost: &ResourceBundle) -> bool {
        Resource::ALL
            .iter()
            .all(|&resource| self.get(resource) >= cost.get(resource))
    }

    /// Remove `cost`, leaving the bundle untouched if it falls short
    pub fn remove(&mut self, cost: &ResourceBundle) -> Result<(), GameError> {
        if !self.has(cost) {
            return Err(GameError::NotEnoughResources);
        }
        for resource in Resource::ALL {
            *self.slot(resource) -= cost.get(resource);
        }
        Ok(())
    }

    /// Take every card of one resource, returning how many there were
    pub fn take_all(&mut self, resource: Resource) -> u32 {
        std::mem::take(self.slot(resource))
    }

    /// The resource at position `index` when the hand is laid out card by
    /// card in `Resource::ALL` order. Used for quantity-weighted picks.
    pub fn nth_card(&self, index: u32) -> Option<Resource> {
        let mut remaining = index;
        for resource in Resource::ALL {
            let count = self.get(resource);
            if remaining < count {
                return Some(resource);
            }
            remaining -= count;
        }
        None
    }
}

/// Building costs
pub mod costs {
    use super::ResourceBundle;

    /// Cost to build a road: 1 wood, 1 brick
    pub fn road() -> ResourceBundle {
        ResourceBundle::with_amounts(1, 1, 0, 0, 0)
    }

    /// Cost to build a settlement: 1 wood, 1 brick, 1 sheep, 1 wheat
    pub fn settlement() -> ResourceBundle {
        ResourceBundle::with_amounts(1, 1, 1, 1, 0)
    }

    /// Cost to upgrade to city: 2 wheat, 3 ore
    pub fn city() -> ResourceBundle {
        ResourceBundle::with_amounts(0, 0, 0, 2, 3)
    }

    /// Cost to buy a development card: 1 sheep, 1 wheat, 1 ore
    pub fn development_card() -> ResourceBundle {
        ResourceBundle::with_amounts(0, 0, 1, 1, 1)
    }
}

/// A single player's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub color: PlayerColor,
    pub resources: ResourceBundle,
    /// Development cards in hand, including victory point cards
    pub dev_cards: Vec<DevCard>,
    /// Cards already played, in play order
    pub dev_cards_played: Vec<DevCardKind>,
    pub settlements_remaining: u32,
    pub cities_remaining: u32,
    pub roads_remaining: u32,
    /// Number of knights played (for Largest Army)
    pub knights_played: u32,
    /// Length of this player's longest road, refreshed after every placement
    pub longest_road_length: u32,
}

impl Player {
    pub fn new(id: PlayerId, display_name: String) -> Self {
        Self {
            id,
            display_name,
            color: PlayerColor::for_player(id),
            resources: ResourceBundle::new(),
            dev_cards: Vec::new(),
            dev_cards_played: Vec::new(),
            settlements_remaining: SETTLEMENT_SUPPLY,
            cities_remaining: CITY_SUPPLY,
            roads_remaining: ROAD_SUPPLY,
            knights_played: 0,
            longest_road_length: 0,
        }
    }

    /// Victory point cards in hand (hidden from opponents)
    pub fn hidden_victory_points(&self) -> u32 {
        self.dev_cards
            .iter()
            .filter(|c| c.kind == DevCardKind::VictoryPoint)
            .count() as u32
    }

    /// Whether the player holds a card of this kind bought before this turn
    pub fn has_playable(&self, kind: DevCardKind) -> bool {
        self.dev_cards
            .iter()
            .any(|c| c.kind == kind && !c.bought_this_turn)
    }

    /// Pay for a road and take the piece from supply
    pub fn buy_road(&mut self) -> Result<(), GameError> {
        if self.roads_remaining == 0 {
            return Err(GameError::NoPiecesRemaining);
        }
        self.resources.remove(&costs::road())?;
        self.roads_remaining -= 1;
        Ok(())
    }

    pub fn buy_settlement(&mut self) -> Result<(), GameError> {
        if self.settlements_remaining == 0 {
            return Err(GameError::NoPiecesRemaining);
        }
        self.resources.remove(&costs::settlement())?;
        self.settlements_remaining -= 1;
        Ok(())
    }

    /// Pay for a city; the replaced settlement returns to supply
    pub fn buy_city(&mut self) -> Result<(), GameError> {
        if self.cities_remaining == 0 {
            return Err(GameError::NoPiecesRemaining);
        }
        self.resources.remove(&costs::city())?;
        self.cities_remaining -= 1;
        self.settlements_remaining += 1;
        Ok(())
    }

    /// Called at end of turn - every card in hand becomes playable
    pub fn end_turn(&mut self) {
        for card in &mut self.dev_cards {
            card.bought_this_turn = false;
        }
    }
}
