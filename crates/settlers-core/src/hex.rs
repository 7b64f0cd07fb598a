//! Hex coordinate system using axial coordinates (q, r).
//!
//! This module provides the geometric identities the board is built from:
//! - `HexCoord`: Identifies individual hex tiles
//! - `CornerKey`: Canonical identity of a corner where up to 3 tiles meet
//! - `EdgeKey`: Canonical identity of a side shared by up to 2 tiles
//!
//! A corner can be described from any of the three hexes touching it and an
//! edge from either of its two hexes. The keys always pick the description
//! anchored on the hex with the smallest `(q, r)`, so equal points compare
//! equal no matter which tile they were derived from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six neighbor directions of a hex.
///
/// Corner `d` of a hex sits between the neighbors in directions `d` and
/// `d + 1`. Edge `d` is the side shared with the neighbor in direction `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// All directions in index order
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Position in `ALL` (0-5)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction for an index, wrapping modulo 6
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// Rotate by `steps` sixths of a turn
    pub fn rotate(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps)
    }

    /// The direction pointing back
    pub fn opposite(self) -> Self {
        self.rotate(3)
    }

    /// Axial offset of the neighbor in this direction
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (0, -1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, 1),
            Direction::SouthEast => (0, 1),
        }
    }
}

/// Axial coordinate for hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Get the neighbor in a specific direction
    pub fn neighbor(&self, direction: Direction) -> HexCoord {
        let (dq, dr) = direction.offset();
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// The six neighboring hexes in direction order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        Direction::ALL.map(|dir| self.neighbor(dir))
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        dq.max(dr).max(ds) as u32
    }

    /// Convert to pixel coordinates (center of hex)
    /// Uses pointy-top orientation with the given hex size (radius)
    pub fn to_pixel(&self, hex_size: f64) -> (f64, f64) {
        let x = hex_size * (3.0_f64.sqrt() * self.q as f64 + 3.0_f64.sqrt() / 2.0 * self.r as f64);
        let y = hex_size * (3.0 / 2.0 * self.r as f64);
        (x, y)
    }

    /// Convert from pixel coordinates to hex (may need rounding)
    pub fn from_pixel(x: f64, y: f64, hex_size: f64) -> Self {
        let q = (3.0_f64.sqrt() / 3.0 * x - 1.0 / 3.0 * y) / hex_size;
        let r = (2.0 / 3.0 * y) / hex_size;
        Self::axial_round(q, r)
    }

    /// Round fractional axial coordinates to nearest hex
    fn axial_round(q: f64, r: f64) -> Self {
        let s = -q - r;

        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }

    /// Polar angle of the hex center around the origin, in `[0, 2π)`
    pub fn polar_angle(&self) -> f64 {
        let (x, y) = self.to_pixel(1.0);
        y.atan2(x).rem_euclid(std::f64::consts::TAU)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// All hexes within `radius` steps of the origin (`3k² + 3k + 1` of them).
pub fn create_hex_grid(radius: u32) -> Vec<HexCoord> {
    let k = radius as i32;
    let mut hexes = Vec::with_capacity((3 * k * k + 3 * k + 1) as usize);
    for q in -k..=k {
        let r_min = (-k).max(-q - k);
        let r_max = k.min(-q + k);
        for r in r_min..=r_max {
            hexes.push(HexCoord::new(q, r));
        }
    }
    hexes
}

/// Canonical identity of a corner.
///
/// Corner `d` of hex `H` is the same point as corner `d + 4` of the neighbor
/// in direction `d + 1`, and corner `d + 2` of the neighbor in direction `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CornerKey {
    pub hex: HexCoord,
    pub direction: Direction,
}

impl CornerKey {
    /// Create a corner key (automatically canonicalized)
    pub fn new(hex: HexCoord, direction: Direction) -> Self {
        Self::equivalents(hex, direction)
            .into_iter()
            .min_by_key(|key| (key.hex.q, key.hex.r))
            .unwrap_or(Self { hex, direction })
    }

    /// The three raw `(hex, direction)` descriptions of the same point
    pub fn equivalents(hex: HexCoord, direction: Direction) -> [CornerKey; 3] {
        [
            Self { hex, direction },
            Self {
                hex: hex.neighbor(direction.rotate(1)),
                direction: direction.rotate(4),
            },
            Self {
                hex: hex.neighbor(direction),
                direction: direction.rotate(2),
            },
        ]
    }

    /// The 3 hexes meeting at this corner (some may be off the board)
    pub fn hexes(&self) -> [HexCoord; 3] {
        [
            self.hex,
            self.hex.neighbor(self.direction),
            self.hex.neighbor(self.direction.rotate(1)),
        ]
    }

    /// Convert to pixel coordinates
    pub fn to_pixel(&self, hex_size: f64) -> (f64, f64) {
        let (cx, cy) = self.hex.to_pixel(hex_size);
        let angle = -(60.0 * self.direction.index() as f64 + 30.0).to_radians();
        (cx + hex_size * angle.cos(), cy + hex_size * angle.sin())
    }
}

impl fmt::Display for CornerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hex, self.direction.index())
    }
}

/// Canonical identity of an edge.
///
/// Edge `d` of hex `H` is the same side as edge `d + 3` of the neighbor in
/// direction `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub hex: HexCoord,
    pub direction: Direction,
}

impl EdgeKey {
    /// Create an edge key (automatically canonicalized)
    pub fn new(hex: HexCoord, direction: Direction) -> Self {
        let [own, other] = Self::equivalents(hex, direction);
        if (own.hex.q, own.hex.r) <= (other.hex.q, other.hex.r) {
            own
        } else {
            other
        }
    }

    /// The two raw `(hex, direction)` descriptions of the same side
    pub fn equivalents(hex: HexCoord, direction: Direction) -> [EdgeKey; 2] {
        [
            Self { hex, direction },
            Self {
                hex: hex.neighbor(direction),
                direction: direction.opposite(),
            },
        ]
    }

    /// The 2 hexes sharing this edge (one may be off the board)
    pub fn hexes(&self) -> [HexCoord; 2] {
        [self.hex, self.hex.neighbor(self.direction)]
    }

    /// The 2 corners at the ends of this edge
    pub fn endpoints(&self) -> [CornerKey; 2] {
        [
            CornerKey::new(self.hex, self.direction.rotate(5)),
            CornerKey::new(self.hex, self.direction),
        ]
    }

    /// Convert to pixel coordinates (midpoint of edge)
    pub fn to_pixel(&self, hex_size: f64) -> (f64, f64) {
        let [a, b] = self.endpoints();
        let (x1, y1) = a.to_pixel(hex_size);
        let (x2, y2) = b.to_pixel(hex_size);
        ((x1 + x2) / 2.0, (y1 + y2) / 2.0)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hex, self.direction.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_hex_neighbors() {
        let center = HexCoord::new(0, 0);
        let neighbors = center.neighbors();

        let unique: HashSet<_> = neighbors.iter().collect();
        assert_eq!(unique.len(), 6);

        for neighbor in &neighbors {
            assert_eq!(center.distance_to(neighbor), 1);
        }
    }

    #[test]
    fn test_hex_distance() {
        let a = HexCoord::new(0, 0);
        assert_eq!(a.distance_to(&HexCoord::new(2, -1)), 2);
        assert_eq!(a.distance_to(&HexCoord::new(-3, 3)), 3);
        assert_eq!(HexCoord::new(1, 1).distance_to(&HexCoord::new(-1, -1)), 4);
    }

    #[test]
    fn test_grid_sizes() {
        assert_eq!(create_hex_grid(0), vec![HexCoord::new(0, 0)]);
        assert_eq!(create_hex_grid(1).len(), 7);
        assert_eq!(create_hex_grid(2).len(), 19);
        assert!(create_hex_grid(2)
            .iter()
            .all(|h| h.distance_to(&HexCoord::default()) <= 2));
    }

    #[test]
    fn test_corner_equivalents_share_a_point() {
        let hex = HexCoord::new(1, -1);
        for dir in Direction::ALL {
            let reps = CornerKey::equivalents(hex, dir);
            let p = reps[0].to_pixel(1.0);
            for rep in &reps[1..] {
                assert!(close(p, rep.to_pixel(1.0)), "{rep} should sit on {}", reps[0]);
            }
        }
    }

    #[test]
    fn test_corner_canonical_from_every_representation() {
        let canonical = CornerKey::new(HexCoord::new(0, 0), Direction::NorthEast);
        for rep in CornerKey::equivalents(HexCoord::new(0, 0), Direction::NorthEast) {
            assert_eq!(CornerKey::new(rep.hex, rep.direction), canonical);
        }
    }

    #[test]
    fn test_corner_hexes_are_distinct() {
        let corner = CornerKey::new(HexCoord::new(0, 0), Direction::West);
        let unique: HashSet<_> = corner.hexes().into_iter().collect();
        assert_eq!(unique.len(), 3);
        assert!(unique.contains(&HexCoord::new(0, 0)));
    }

    #[test]
    fn test_edge_canonical_equality() {
        let e1 = EdgeKey::new(HexCoord::new(0, 0), Direction::East);
        let e2 = EdgeKey::new(HexCoord::new(1, 0), Direction::West);
        assert_eq!(e1, e2, "Same edge from different hexes should be equal");
        assert_eq!(e1.hex, HexCoord::new(0, 0));
    }

    #[test]
    fn test_edge_endpoints_are_shared_with_neighbor() {
        let hex = HexCoord::new(0, 0);
        let edge = EdgeKey::new(hex, Direction::SouthEast);
        let [a, b] = edge.endpoints();
        assert_ne!(a, b);

        let neighbor = hex.neighbor(Direction::SouthEast);
        let from_neighbor = EdgeKey::new(neighbor, Direction::NorthWest).endpoints();
        assert!(from_neighbor.contains(&a));
        assert!(from_neighbor.contains(&b));
    }

    #[test]
    fn test_edge_midpoint_between_endpoints() {
        let edge = EdgeKey::new(HexCoord::new(0, 0), Direction::East);
        let (x, y) = edge.to_pixel(1.0);
        assert!((x - 3.0_f64.sqrt() / 2.0).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn test_hex_edges_unique() {
        let hex = HexCoord::new(0, 0);
        let edges: HashSet<_> = Direction::ALL
            .iter()
            .map(|dir| EdgeKey::new(hex, *dir))
            .collect();
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn test_pixel_round_trip() {
        let original = HexCoord::new(3, -2);
        let (x, y) = original.to_pixel(60.0);
        assert_eq!(HexCoord::from_pixel(x, y, 60.0), original);
    }

    #[test]
    fn test_key_display() {
        let corner = CornerKey::new(HexCoord::new(0, 0), Direction::NorthWest);
        assert_eq!(corner.to_string(), "-1,0:0");
        let edge = EdgeKey::new(HexCoord::new(-1, 2), Direction::NorthWest);
        assert_eq!(edge.to_string(), "-1,1:5");
    }
}
