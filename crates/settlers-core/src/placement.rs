//! Legality checks for settlements, cities and roads.
//!
//! These functions only read the board. The engine calls them before any
//! resource is spent, so a rejected placement never leaves partial changes.

use crate::board::{Board, CornerBuilding, CornerId, EdgeBuilding, EdgeId, PlayerId};
use crate::game::GameError;

/// Check a settlement at `corner`.
///
/// Outside setup the corner must also sit at the end of one of the
/// player's roads.
pub fn can_place_settlement(
    board: &Board,
    corner: CornerId,
    player: PlayerId,
    is_setup: bool,
) -> Result<(), GameError> {
    let c = board.corner(corner).ok_or(GameError::InvalidCorner)?;

    if c.building != CornerBuilding::Empty {
        return Err(GameError::CornerOccupied);
    }

    // Distance rule
    if c
        .neighbors
        .iter()
        .any(|&n| board.building(n) != CornerBuilding::Empty)
    {
        return Err(GameError::TooCloseToBuilding);
    }

    if !is_setup && !board.has_road_at(corner, player) {
        return Err(GameError::NotConnectedToRoad);
    }

    Ok(())
}

/// Check upgrading the player's own settlement at `corner`
pub fn can_place_city(board: &Board, corner: CornerId, player: PlayerId) -> Result<(), GameError> {
    let c = board.corner(corner).ok_or(GameError::InvalidCorner)?;
    if c.building != CornerBuilding::Settlement(player) {
        return Err(GameError::NotYourSettlement);
    }
    Ok(())
}

/// Check a road at `edge`.
///
/// `setup_corner` is the settlement placed just before during setup; when
/// given, the road must end there. Otherwise the road must extend one of
/// the player's buildings or roads, and cannot pass through a corner held
/// by an opponent.
pub fn can_place_road(
    board: &Board,
    edge: EdgeId,
    player: PlayerId,
    setup_corner: Option<CornerId>,
) -> Result<(), GameError> {
    let e = board.edge(edge).ok_or(GameError::InvalidEdge)?;

    if e.road != EdgeBuilding::Empty {
        return Err(GameError::EdgeOccupied);
    }

    if let Some(corner) = setup_corner {
        if !e.corners.contains(&corner) {
            return Err(GameError::NotConnectedToSettlement);
        }
        return Ok(());
    }

    let connected = e.corners.iter().any(|&end| {
        let building = board.building(end);
        if building.owner() == Some(player) {
            return true;
        }
        if building.is_opponent_of(player) {
            return false;
        }
        board.has_road_at(end, player)
    });

    if !connected {
        return Err(GameError::NotConnectedToRoad);
    }

    Ok(())
}

/// Corners where `player` could place a settlement right now
pub fn valid_settlement_corners(board: &Board, player: PlayerId, is_setup: bool) -> Vec<CornerId> {
    board
        .corners()
        .iter()
        .map(|c| c.id)
        .filter(|&id| can_place_settlement(board, id, player, is_setup).is_ok())
        .collect()
}

pub fn valid_city_corners(board: &Board, player: PlayerId) -> Vec<CornerId> {
    board
        .buildings_of(player)
        .filter(|c| c.building == CornerBuilding::Settlement(player))
        .map(|c| c.id)
        .collect()
}

pub fn valid_road_edges(
    board: &Board,
    player: PlayerId,
    setup_corner: Option<CornerId>,
) -> Vec<EdgeId> {
    board
        .edges()
        .iter()
        .map(|e| e.id)
        .filter(|&id| can_place_road(board, id, player, setup_corner).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::{Direction, HexCoord};

    fn corner(board: &Board, q: i32, r: i32, d: Direction) -> CornerId {
        board.corner_at(HexCoord::new(q, r), d).unwrap()
    }

    fn edge(board: &Board, q: i32, r: i32, d: Direction) -> EdgeId {
        board.edge_at(HexCoord::new(q, r), d).unwrap()
    }

    #[test]
    fn test_setup_settlement_on_empty_board() {
        let board = Board::standard();
        let c = corner(&board, 0, 0, Direction::East);
        assert_eq!(can_place_settlement(&board, c, 0, true), Ok(()));
        assert_eq!(
            can_place_settlement(&board, c, 0, false),
            Err(GameError::NotConnectedToRoad)
        );
        assert_eq!(
            can_place_settlement(&board, 9999, 0, true),
            Err(GameError::InvalidCorner)
        );
    }

    #[test]
    fn test_distance_rule() {
        let mut board = Board::standard();
        let c = corner(&board, 0, 0, Direction::East);
        board.place_settlement(c, 1);

        assert_eq!(
            can_place_settlement(&board, c, 0, true),
            Err(GameError::CornerOccupied)
        );
        let neighbors = board.corner(c).unwrap().neighbors.clone();
        for n in neighbors {
            assert_eq!(
                can_place_settlement(&board, n, 0, true),
                Err(GameError::TooCloseToBuilding)
            );
        }
        // Two edges away is fine
        let far = corner(&board, 0, 0, Direction::West);
        assert_eq!(can_place_settlement(&board, far, 0, true), Ok(()));
    }

    #[test]
    fn test_settlement_needs_own_road_in_main_phase() {
        let mut board = Board::standard();
        let home = corner(&board, 0, 0, Direction::East);
        board.place_settlement(home, 0);
        let road1 = edge(&board, 0, 0, Direction::East);
        board.place_road(road1, 0);
        let mid = board.edge(road1).unwrap().other_end(home);
        let road2 = *board
            .corner(mid)
            .unwrap()
            .edges
            .iter()
            .find(|&&e| e != road1)
            .unwrap();
        board.place_road(road2, 0);
        let tip = board.edge(road2).unwrap().other_end(mid);

        assert_eq!(can_place_settlement(&board, tip, 0, false), Ok(()));
        assert_eq!(
            can_place_settlement(&board, tip, 1, false),
            Err(GameError::NotConnectedToRoad)
        );
    }

    #[test]
    fn test_city_requires_own_settlement() {
        let mut board = Board::standard();
        let c = corner(&board, 0, 0, Direction::East);
        assert_eq!(can_place_city(&board, c, 0), Err(GameError::NotYourSettlement));
        board.place_settlement(c, 1);
        assert_eq!(can_place_city(&board, c, 0), Err(GameError::NotYourSettlement));
        assert_eq!(can_place_city(&board, c, 1), Ok(()));
        board.upgrade_to_city(c, 1);
        assert_eq!(can_place_city(&board, c, 1), Err(GameError::NotYourSettlement));
        assert_eq!(valid_city_corners(&board, 1), Vec::<CornerId>::new());
    }

    #[test]
    fn test_setup_road_must_touch_new_settlement() {
        let mut board = Board::standard();
        let c = corner(&board, 0, 0, Direction::East);
        board.place_settlement(c, 0);

        let edges = valid_road_edges(&board, 0, Some(c));
        assert_eq!(edges.len(), 3);
        for e in &edges {
            assert!(board.edge(*e).unwrap().corners.contains(&c));
        }
        let away = edge(&board, 0, 0, Direction::West);
        assert_eq!(
            can_place_road(&board, away, 0, Some(c)),
            Err(GameError::NotConnectedToSettlement)
        );
    }

    #[test]
    fn test_road_blocked_by_opponent_building() {
        let mut board = Board::standard();
        let home = corner(&board, 0, 0, Direction::East);
        board.place_settlement(home, 0);
        let road1 = edge(&board, 0, 0, Direction::East);
        board.place_road(road1, 0);
        let mid = board.edge(road1).unwrap().other_end(home);

        // Opponent settles the far end of our road
        board.place_settlement(mid, 1);
        for &e in &board.corner(mid).unwrap().edges.clone() {
            if e == road1 {
                assert_eq!(can_place_road(&board, e, 0, None), Err(GameError::EdgeOccupied));
            } else {
                assert_eq!(
                    can_place_road(&board, e, 0, None),
                    Err(GameError::NotConnectedToRoad)
                );
            }
        }
    }

    #[test]
    fn test_road_extends_from_road_end() {
        let mut board = Board::standard();
        let home = corner(&board, 0, 0, Direction::East);
        board.place_settlement(home, 0);
        let road1 = edge(&board, 0, 0, Direction::East);
        board.place_road(road1, 0);
        let mid = board.edge(road1).unwrap().other_end(home);

        let next = *board
            .corner(mid)
            .unwrap()
            .edges
            .iter()
            .find(|&&e| e != road1)
            .unwrap();
        assert_eq!(can_place_road(&board, next, 0, None), Ok(()));
        assert_eq!(
            can_place_road(&board, next, 1, None),
            Err(GameError::NotConnectedToRoad)
        );
        assert_eq!(can_place_road(&board, 9999, 0, None), Err(GameError::InvalidEdge));
    }
}
