//! Game board representation including tiles, corners, edges, and ports.
//!
//! This module contains:
//! - Resource and terrain types
//! - The arena-backed board: tiles, corners and edges stored in flat vectors
//!   and cross-referenced by index
//! - Board generation for the standard fixed layout
//! - Query and mutation methods used by the rules engine
//!
//! Every adjacency (tile to corners, corner to edges and neighboring corners,
//! edge to corners) is computed once at generation time. After that only the
//! building, road and robber fields ever change.

use crate::hex::{create_hex_grid, CornerKey, Direction, EdgeKey, HexCoord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Seat index of a player (0-3)
pub type PlayerId = u8;

/// Index into `Board::tiles`
pub type TileId = usize;

/// Index into `Board::corners`
pub type CornerId = usize;

/// Index into `Board::edges`
pub type EdgeId = usize;

/// Radius of the standard board (19 tiles)
pub const STANDARD_RADIUS: u32 = 2;

/// Resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Wood,
    Brick,
    Sheep,
    Wheat,
    Ore,
}

impl Resource {
    /// All resource types
    pub const ALL: [Resource; 5] = [
        Resource::Wood,
        Resource::Brick,
        Resource::Sheep,
        Resource::Wheat,
        Resource::Ore,
    ];
}

/// Terrain of a land tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Forest,
    Hills,
    Pasture,
    Fields,
    Mountains,
    Desert,
}

impl Terrain {
    /// The resource this terrain produces, if any
    pub fn resource(&self) -> Option<Resource> {
        match self {
            Terrain::Forest => Some(Resource::Wood),
            Terrain::Hills => Some(Resource::Brick),
            Terrain::Pasture => Some(Resource::Sheep),
            Terrain::Fields => Some(Resource::Wheat),
            Terrain::Mountains => Some(Resource::Ore),
            Terrain::Desert => None,
        }
    }
}

/// Terrain of every tile in spiral order (center first, then each ring by
/// polar angle).
const STANDARD_TERRAIN: [Terrain; 19] = [
    Terrain::Desert,
    // Ring 1
    Terrain::Fields,
    Terrain::Pasture,
    Terrain::Forest,
    Terrain::Hills,
    Terrain::Mountains,
    Terrain::Pasture,
    // Ring 2
    Terrain::Forest,
    Terrain::Fields,
    Terrain::Mountains,
    Terrain::Forest,
    Terrain::Pasture,
    Terrain::Hills,
    Terrain::Fields,
    Terrain::Forest,
    Terrain::Pasture,
    Terrain::Hills,
    Terrain::Fields,
    Terrain::Mountains,
];

/// Number tokens in placement order; the desert is skipped.
const STANDARD_NUMBERS: [u8; 18] = [5, 2, 6, 3, 8, 10, 9, 12, 11, 4, 8, 10, 9, 4, 5, 6, 3, 11];

/// Port kinds in placement order around the coast
const STANDARD_PORTS: [PortKind; 9] = [
    PortKind::Generic,
    PortKind::Specific(Resource::Wood),
    PortKind::Generic,
    PortKind::Specific(Resource::Brick),
    PortKind::Generic,
    PortKind::Specific(Resource::Sheep),
    PortKind::Generic,
    PortKind::Specific(Resource::Wheat),
    PortKind::Specific(Resource::Ore),
];

/// Port types for bank trading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortKind {
    /// 3:1 trade any resource
    Generic,
    /// 2:1 trade for a specific resource
    Specific(Resource),
}

impl PortKind {
    /// The exchange rate for this port
    pub fn ratio(&self) -> u32 {
        match self {
            PortKind::Generic => 3,
            PortKind::Specific(_) => 2,
        }
    }
}

/// A single hex tile on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub coord: HexCoord,
    pub terrain: Terrain,
    /// Dice number that triggers production (2-12 except 7, None for desert)
    pub number_token: Option<u8>,
    pub has_robber: bool,
    /// Corner ids indexed by `Direction::index()`
    pub corners: [CornerId; 6],
    /// Edge ids indexed by `Direction::index()`
    pub edges: [EdgeId; 6],
}

impl Tile {
    /// Get the resource this tile produces, if any
    pub fn resource(&self) -> Option<Resource> {
        self.terrain.resource()
    }
}

/// What's built on a corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "owner", rename_all = "snake_case")]
pub enum CornerBuilding {
    #[default]
    Empty,
    /// Settlement (1 VP, 1 resource per adjacent tile)
    Settlement(PlayerId),
    /// City (2 VP, 2 resources per adjacent tile)
    City(PlayerId),
}

impl CornerBuilding {
    /// Get the owner of this building, if any
    pub fn owner(&self) -> Option<PlayerId> {
        match self {
            CornerBuilding::Empty => None,
            CornerBuilding::Settlement(p) | CornerBuilding::City(p) => Some(*p),
        }
    }

    /// Victory points provided by this building
    pub fn victory_points(&self) -> u32 {
        match self {
            CornerBuilding::Empty => 0,
            CornerBuilding::Settlement(_) => 1,
            CornerBuilding::City(_) => 2,
        }
    }

    /// Resources produced per matching roll
    pub fn production(&self) -> u32 {
        self.victory_points()
    }

    /// Whether another player's building stands here
    pub fn is_opponent_of(&self, player: PlayerId) -> bool {
        self.owner().is_some_and(|owner| owner != player)
    }
}

/// What's built on an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "owner", rename_all = "snake_case")]
pub enum EdgeBuilding {
    #[default]
    Empty,
    Road(PlayerId),
}

impl EdgeBuilding {
    /// Get the owner of this road, if any
    pub fn owner(&self) -> Option<PlayerId> {
        match self {
            EdgeBuilding::Empty => None,
            EdgeBuilding::Road(p) => Some(*p),
        }
    }
}

/// Intersection of up to 3 tiles where settlements and cities stand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corner {
    pub id: CornerId,
    pub key: CornerKey,
    pub building: CornerBuilding,
    /// Touching tiles (1-3)
    pub tiles: Vec<TileId>,
    /// Edges ending here (2-3)
    pub edges: Vec<EdgeId>,
    /// Corners one edge away
    pub neighbors: Vec<CornerId>,
    pub port: Option<PortKind>,
}

impl Corner {
    /// Corners touching fewer than 3 tiles lie on the coast
    pub fn is_coastal(&self) -> bool {
        self.tiles.len() < 3
    }
}

/// Boundary between two tiles (or one tile and the sea)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub key: EdgeKey,
    pub road: EdgeBuilding,
    pub corners: [CornerId; 2],
    pub tiles: Vec<TileId>,
}

impl Edge {
    /// The endpoint that isn't `corner`
    pub fn other_end(&self, corner: CornerId) -> CornerId {
        if self.corners[0] == corner {
            self.corners[1]
        } else {
            self.corners[0]
        }
    }
}

/// Port placement on a coastal edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    pub kind: PortKind,
    pub edge: EdgeId,
    pub corners: [CornerId; 2],
}

/// The complete game board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    corners: Vec<Corner>,
    edges: Vec<Edge>,
    ports: Vec<Port>,
    robber_tile: TileId,
}

impl Board {
    /// Create the standard 19-tile board with its fixed layout
    pub fn standard() -> Self {
        let mut coords = create_hex_grid(STANDARD_RADIUS);
        let origin = HexCoord::default();
        coords.sort_by(|a, b| {
            a.distance_to(&origin)
                .cmp(&b.distance_to(&origin))
                .then(a.polar_angle().total_cmp(&b.polar_angle()))
        });

        let mut board = Self::from_layout(&coords, &STANDARD_TERRAIN, &STANDARD_NUMBERS);
        board.place_ports(&STANDARD_PORTS);
        board
    }

    /// Build tiles, corners and edges for the given hexes.
    ///
    /// Number tokens are handed out in hex order, skipping the desert.
    fn from_layout(coords: &[HexCoord], terrains: &[Terrain], numbers: &[u8]) -> Self {
        let mut corner_ids: HashMap<CornerKey, CornerId> = HashMap::new();
        let mut edge_ids: HashMap<EdgeKey, EdgeId> = HashMap::new();
        let mut tiles = Vec::with_capacity(coords.len());
        let mut corners: Vec<Corner> = Vec::new();
        let mut edges: Vec<Edge> = Vec::new();
        let mut numbers = numbers.iter().copied();
        let mut robber_tile = 0;

        for (id, (&coord, &terrain)) in coords.iter().zip(terrains).enumerate() {
            let number_token = if terrain == Terrain::Desert {
                robber_tile = id;
                None
            } else {
                numbers.next()
            };

            let mut tile_corners = [0; 6];
            for dir in Direction::ALL {
                let key = CornerKey::new(coord, dir);
                let corner_id = *corner_ids.entry(key).or_insert_with(|| {
                    corners.push(Corner {
                        id: corners.len(),
                        key,
                        building: CornerBuilding::Empty,
                        tiles: Vec::new(),
                        edges: Vec::new(),
                        neighbors: Vec::new(),
                        port: None,
                    });
                    corners.len() - 1
                });
                corners[corner_id].tiles.push(id);
                tile_corners[dir.index()] = corner_id;
            }

            let mut tile_edges = [0; 6];
            for dir in Direction::ALL {
                let key = EdgeKey::new(coord, dir);
                // Edge d runs from corner d-1 to corner d
                let ends = [
                    tile_corners[dir.rotate(5).index()],
                    tile_corners[dir.index()],
                ];
                let edge_id = *edge_ids.entry(key).or_insert_with(|| {
                    edges.push(Edge {
                        id: edges.len(),
                        key,
                        road: EdgeBuilding::Empty,
                        corners: ends,
                        tiles: Vec::new(),
                    });
                    edges.len() - 1
                });
                edges[edge_id].tiles.push(id);
                tile_edges[dir.index()] = edge_id;
            }

            tiles.push(Tile {
                id,
                coord,
                terrain,
                number_token,
                has_robber: terrain == Terrain::Desert,
                corners: tile_corners,
                edges: tile_edges,
            });
        }

        for edge in &edges {
            let [a, b] = edge.corners;
            corners[a].edges.push(edge.id);
            corners[a].neighbors.push(b);
            corners[b].edges.push(edge.id);
            corners[b].neighbors.push(a);
        }

        Self {
            tiles,
            corners,
            edges,
            ports: Vec::new(),
            robber_tile,
        }
    }

    /// Spread ports evenly (by polar angle) along the coastline.
    ///
    /// Each port occupies one boundary edge and serves both its corners.
    fn place_ports(&mut self, kinds: &[PortKind]) {
        let mut coast: Vec<(f64, EdgeId)> = self
            .edges
            .iter()
            .filter(|edge| edge.tiles.len() == 1)
            .map(|edge| {
                let (x, y) = edge.key.to_pixel(1.0);
                (y.atan2(x).rem_euclid(TAU), edge.id)
            })
            .collect();
        coast.sort_by(|a, b| a.0.total_cmp(&b.0));

        if coast.is_empty() {
            return;
        }

        for (i, &kind) in kinds.iter().enumerate() {
            let (_, edge_id) = coast[i * coast.len() / kinds.len()];
            let corners = self.edges[edge_id].corners;
            for corner in corners {
                self.corners[corner].port = Some(kind);
            }
            self.ports.push(Port {
                kind,
                edge: edge_id,
                corners,
            });
        }
    }

    // ==================== Query Methods ====================

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub fn corner(&self, id: CornerId) -> Option<&Corner> {
        self.corners.get(id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Get the robber's current tile
    pub fn robber_tile(&self) -> TileId {
        self.robber_tile
    }

    /// Look up a tile by its coordinate
    pub fn tile_at(&self, coord: HexCoord) -> Option<TileId> {
        self.tiles.iter().position(|t| t.coord == coord)
    }

    /// Look up a corner from any of its equivalent descriptions
    pub fn corner_at(&self, hex: HexCoord, direction: Direction) -> Option<CornerId> {
        let key = CornerKey::new(hex, direction);
        self.corners.iter().position(|c| c.key == key)
    }

    /// Look up an edge from either of its equivalent descriptions
    pub fn edge_at(&self, hex: HexCoord, direction: Direction) -> Option<EdgeId> {
        let key = EdgeKey::new(hex, direction);
        self.edges.iter().position(|e| e.key == key)
    }

    /// Building at a corner (`Empty` for unknown ids)
    pub fn building(&self, corner: CornerId) -> CornerBuilding {
        self.corners
            .get(corner)
            .map(|c| c.building)
            .unwrap_or_default()
    }

    /// Road on an edge (`Empty` for unknown ids)
    pub fn road(&self, edge: EdgeId) -> EdgeBuilding {
        self.edges.get(edge).map(|e| e.road).unwrap_or_default()
    }

    /// Whether `player` owns a road ending at `corner`
    pub fn has_road_at(&self, corner: CornerId, player: PlayerId) -> bool {
        self.corners.get(corner).is_some_and(|c| {
            c.edges
                .iter()
                .any(|&e| self.road(e) == EdgeBuilding::Road(player))
        })
    }

    /// Ports a player can use through their buildings
    pub fn player_ports(&self, player: PlayerId) -> Vec<PortKind> {
        self.corners
            .iter()
            .filter(|c| c.building.owner() == Some(player))
            .filter_map(|c| c.port)
            .collect()
    }

    /// Players with a building on one of the tile's corners, in seat order
    pub fn players_on_tile(&self, tile: TileId) -> Vec<PlayerId> {
        let mut players: Vec<PlayerId> = self
            .tiles
            .get(tile)
            .map(|t| {
                t.corners
                    .iter()
                    .filter_map(|&c| self.building(c).owner())
                    .collect()
            })
            .unwrap_or_default();
        players.sort_unstable();
        players.dedup();
        players
    }

    /// Corners holding this player's buildings
    pub fn buildings_of(&self, player: PlayerId) -> impl Iterator<Item = &Corner> {
        self.corners
            .iter()
            .filter(move |c| c.building.owner() == Some(player))
    }

    /// Edges holding this player's roads
    pub fn roads_of(&self, player: PlayerId) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(move |e| e.road == EdgeBuilding::Road(player))
    }

    // ==================== Mutation Methods ====================
    // Callers validate placement first; these only write the field.

    pub(crate) fn place_settlement(&mut self, corner: CornerId, player: PlayerId) {
        if let Some(c) = self.corners.get_mut(corner) {
            c.building = CornerBuilding::Settlement(player);
        }
    }

    pub(crate) fn upgrade_to_city(&mut self, corner: CornerId, player: PlayerId) {
        if let Some(c) = self.corners.get_mut(corner) {
            c.building = CornerBuilding::City(player);
        }
    }

    pub(crate) fn place_road(&mut self, edge: EdgeId, player: PlayerId) {
        if let Some(e) = self.edges.get_mut(edge) {
            e.road = EdgeBuilding::Road(player);
        }
    }

    /// Move the robber to a new tile
    pub(crate) fn move_robber(&mut self, tile: TileId) {
        if tile >= self.tiles.len() {
            return;
        }
        self.tiles[self.robber_tile].has_robber = false;
        self.tiles[tile].has_robber = true;
        self.robber_tile = tile;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
