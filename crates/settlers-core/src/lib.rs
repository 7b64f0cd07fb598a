//! Settlers - a hex-board settlement and trade game engine
//!
//! This crate provides the core game logic, including:
//! - Hex coordinate system and canonical corner and edge keys
//! - The standard 19-tile board stored as an index arena
//! - Player state, resources and development cards
//! - A rules engine that validates and applies every action
//!
//! # Architecture
//!
//! The engine is transport-agnostic and fully synchronous. A host owns one
//! [`GameEngine`] per game, feeds it actions and sends out the per-seat
//! views it produces. All randomness comes from an injected
//! [`rng::RandomSource`].
//!
//! # Modules
//!
//! - [`hex`]: Axial coordinates, directions, corner and edge keys
//! - [`board`]: Tiles, corners, edges and ports
//! - [`player`]: Resource bundles, costs and piece supply
//! - [`placement`]: Settlement, city and road legality
//! - [`economy`]: Production, trades, discards and steals
//! - [`dev_cards`]: Deck and card eligibility
//! - [`scoring`]: Victory points, longest road and largest army
//! - [`engine`]: The action dispatcher
//! - [`view`]: Sanitized state and the legal-action menu

pub mod actions;
pub mod board;
pub mod dev_cards;
pub mod economy;
pub mod engine;
pub mod game;
pub mod hex;
pub mod placement;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod view;

// Re-export commonly used types
pub use actions::{ActionResult, AvailableAction, GameAction, GameEvent, TradeOffer};
pub use board::{Board, CornerBuilding, EdgeBuilding, PlayerId, PortKind, Resource, Terrain, Tile};
pub use dev_cards::{DevCard, DevCardKind};
pub use engine::GameEngine;
pub use game::{GameConfig, GameError, GameMode, GamePhase, GameState, PendingAction};
pub use hex::{create_hex_grid, CornerKey, Direction, EdgeKey, HexCoord};
pub use player::{Player, PlayerColor, ResourceBundle};
pub use rng::{RandomSource, ScriptedRandom, StdRandom};
pub use view::{GameView, PlayerView};
