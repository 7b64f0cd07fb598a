//! Victory points, longest road and largest army.

use crate::actions::GameEvent;
use crate::board::{Board, CornerId, EdgeBuilding, EdgeId, PlayerId};
use crate::game::GameState;
use std::collections::HashSet;
use tracing::info;

/// Minimum road length for the Longest Road bonus
pub const MIN_LONGEST_ROAD: u32 = 5;

/// Minimum knights played for the Largest Army bonus
pub const MIN_LARGEST_ARMY: u32 = 3;

/// Victory points for each bonus card
pub const BONUS_POINTS: u32 = 2;

/// Points everyone can see: buildings and bonuses
pub fn public_victory_points(state: &GameState, player: PlayerId) -> u32 {
    let buildings: u32 = state
        .board
        .buildings_of(player)
        .map(|c| c.building.victory_points())
        .sum();

    let mut points = buildings;
    if state.longest_road_holder == Some(player) {
        points += BONUS_POINTS;
    }
    if state.largest_army_holder == Some(player) {
        points += BONUS_POINTS;
    }
    points
}

/// Public points plus victory point cards in hand
pub fn victory_points(state: &GameState, player: PlayerId) -> u32 {
    let hidden = state
        .player(player)
        .map(|p| p.hidden_victory_points())
        .unwrap_or(0);
    public_victory_points(state, player) + hidden
}

/// Length of the player's longest simple road chain.
///
/// A chain may not reuse an edge and stops at a corner holding an
/// opponent's building; the road leading into that corner still counts.
pub fn longest_road(board: &Board, player: PlayerId) -> u32 {
    let mut best = 0;
    let mut visited = HashSet::new();

    for edge in board.roads_of(player) {
        for &start in &edge.corners {
            visited.clear();
            visited.insert(edge.id);
            let length = 1 + extend_road(board, player, edge.other_end(start), &mut visited);
            best = best.max(length);
        }
    }

    best
}

fn extend_road(
    board: &Board,
    player: PlayerId,
    corner: CornerId,
    visited: &mut HashSet<EdgeId>,
) -> u32 {
    if board.building(corner).is_opponent_of(player) {
        return 0;
    }
    let Some(c) = board.corner(corner) else {
        return 0;
    };

    let mut best = 0;
    for &next in &c.edges {
        if visited.contains(&next) || board.road(next) != EdgeBuilding::Road(player) {
            continue;
        }
        let Some(edge) = board.edge(next) else {
            continue;
        };
        visited.insert(next);
        best = best.max(1 + extend_road(board, player, edge.other_end(corner), visited));
        visited.remove(&next);
    }
    best
}

/// Recompute every road length and move the Longest Road bonus if needed.
///
/// The incumbent keeps the bonus on ties and loses it only to a strictly
/// longer road, or when their own road falls below the minimum. Without an
/// incumbent the first seat reaching the maximum takes it.
pub(crate) fn update_longest_road(state: &mut GameState) -> Option<GameEvent> {
    for i in 0..state.players.len() {
        let id = state.players[i].id;
        state.players[i].longest_road_length = longest_road(&state.board, id);
    }

    let previous = state.longest_road_holder;

    let leader = state
        .players
        .iter()
        .filter(|p| p.longest_road_length >= MIN_LONGEST_ROAD)
        .fold(None::<(PlayerId, u32)>, |best, p| match best {
            Some((_, len)) if len >= p.longest_road_length => best,
            _ => Some((p.id, p.longest_road_length)),
        });

    let current = match (previous, leader) {
        (Some(holder), Some((candidate, len)))
            if road_length_of(state, holder) >= MIN_LONGEST_ROAD =>
        {
            if len > road_length_of(state, holder) {
                Some(candidate)
            } else {
                Some(holder)
            }
        }
        (_, leader) => leader.map(|(id, _)| id),
    };

    if current == previous {
        return None;
    }

    let length = current.map_or(0, |id| road_length_of(state, id));
    state.longest_road_holder = current;
    info!(?previous, ?current, length, "longest road changed hands");
    Some(GameEvent::LongestRoadChanged {
        previous,
        current,
        length,
    })
}

fn road_length_of(state: &GameState, id: PlayerId) -> u32 {
    state.player(id).map_or(0, |p| p.longest_road_length)
}

/// Award Largest Army to a player who strictly beats the incumbent
pub(crate) fn update_largest_army(state: &mut GameState) -> Option<GameEvent> {
    let previous = state.largest_army_holder;
    let to_beat = previous
        .and_then(|id| state.player(id))
        .map(|p| p.knights_played)
        .unwrap_or(MIN_LARGEST_ARMY - 1);

    let challenger = state
        .players
        .iter()
        .filter(|p| p.knights_played > to_beat && Some(p.id) != previous)
        .max_by_key(|p| (p.knights_played, std::cmp::Reverse(p.id)))?;

    let current = Some(challenger.id);
    let knights = challenger.knights_played;
    state.largest_army_holder = current;
    info!(?previous, ?current, knights, "largest army changed hands");
    Some(GameEvent::LargestArmyChanged {
        previous,
        current,
        knights,
    })
}

/// First player at or above the target, checking seats from the turn holder
pub fn find_winner(state: &GameState) -> Option<PlayerId> {
    let count = state.players.len();
    (0..count)
        .map(|offset| ((state.turn_index as usize + offset) % count) as PlayerId)
        .find(|&id| victory_points(state, id) >= state.target_victory_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev_cards::{DevCard, DevCardKind};
    use crate::game::GameConfig;

    fn state() -> GameState {
        GameState::new(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            GameConfig::default(),
        )
    }

    /// Lay `count` roads for `player` along a simple path from `start`,
    /// returning the corners visited in order.
    fn lay_chain(
        board: &mut Board,
        player: PlayerId,
        start: CornerId,
        count: usize,
    ) -> Vec<CornerId> {
        lay_path(board, player, start, count, &HashSet::new())
    }

    /// Like `lay_chain`, but the path never touches a corner in `avoid`.
    fn lay_path(
        board: &mut Board,
        player: PlayerId,
        start: CornerId,
        count: usize,
        avoid: &HashSet<CornerId>,
    ) -> Vec<CornerId> {
        let mut corners = vec![start];
        let mut edges = Vec::new();
        assert!(extend_path(board, &mut corners, &mut edges, count, avoid));
        for edge in edges {
            board.place_road(edge, player);
        }
        corners
    }

    fn extend_path(
        board: &Board,
        corners: &mut Vec<CornerId>,
        edges: &mut Vec<EdgeId>,
        count: usize,
        avoid: &HashSet<CornerId>,
    ) -> bool {
        if edges.len() == count {
            return true;
        }
        let at = *corners.last().unwrap();
        for &edge in &board.corner(at).unwrap().edges {
            let next = board.edge(edge).unwrap().other_end(at);
            if board.road(edge) != EdgeBuilding::Empty
                || corners.contains(&next)
                || avoid.contains(&next)
            {
                continue;
            }
            corners.push(next);
            edges.push(edge);
            if extend_path(board, corners, edges, count, avoid) {
                return true;
            }
            corners.pop();
            edges.pop();
        }
        false
    }

    /// A coastal corner outside `avoid` to start a second road from.
    fn far_corner(board: &Board, avoid: &HashSet<CornerId>) -> CornerId {
        board
            .corners()
            .iter()
            .filter(|c| c.tiles.len() == 1 && !avoid.contains(&c.id))
            .map(|c| c.id)
            .last()
            .unwrap()
    }

    fn interior_corner(board: &Board) -> CornerId {
        board.corners().iter().find(|c| c.tiles.len() == 3).unwrap().id
    }

    #[test]
    fn test_victory_points_count_buildings_and_cards() {
        let mut game = state();
        let corners: Vec<CornerId> = game.board.corners().iter().map(|c| c.id).take(3).collect();
        game.board.place_settlement(corners[0], 0);
        game.board.upgrade_to_city(corners[2], 0);
        game.players[0].dev_cards.push(DevCard {
            kind: DevCardKind::VictoryPoint,
            bought_this_turn: true,
        });

        assert_eq!(public_victory_points(&game, 0), 3);
        assert_eq!(victory_points(&game, 0), 4);

        game.largest_army_holder = Some(0);
        assert_eq!(victory_points(&game, 0), 6);
    }

    #[test]
    fn test_longest_road_chain() {
        let mut board = Board::standard();
        let start = interior_corner(&board);
        lay_chain(&mut board, 0, start, 4);
        assert_eq!(longest_road(&board, 0), 4);
        assert_eq!(longest_road(&board, 1), 0);
    }

    #[test]
    fn test_longest_road_branch_counts_one_arm() {
        let mut board = Board::standard();
        let start = interior_corner(&board);
        lay_chain(&mut board, 0, start, 3);
        // A spur off the starting corner
        let spur = board
            .corner(start)
            .unwrap()
            .edges
            .iter()
            .copied()
            .find(|&e| board.road(e) == EdgeBuilding::Empty)
            .unwrap();
        board.place_road(spur, 0);
        assert_eq!(longest_road(&board, 0), 4);
    }

    #[test]
    fn test_opponent_building_cuts_road() {
        let mut board = Board::standard();
        let start = interior_corner(&board);
        let path = lay_chain(&mut board, 0, start, 5);
        assert_eq!(longest_road(&board, 0), 5);

        board.place_settlement(path[2], 1);
        assert_eq!(longest_road(&board, 0), 3);
    }

    #[test]
    fn test_longest_road_tie_keeps_incumbent() {
        let mut game = state();
        let start = interior_corner(&game.board);
        let first: HashSet<CornerId> = lay_chain(&mut game.board, 1, start, 5)
            .into_iter()
            .collect();

        let event = update_longest_road(&mut game);
        assert_eq!(game.longest_road_holder, Some(1));
        assert!(matches!(
            event,
            Some(GameEvent::LongestRoadChanged {
                previous: None,
                current: Some(1),
                length: 5,
            })
        ));

        // Matching the holder is not enough, even from an earlier seat
        let other = far_corner(&game.board, &first);
        lay_path(&mut game.board, 0, other, 5, &first);
        assert_eq!(longest_road(&game.board, 0), 5);
        assert_eq!(update_longest_road(&mut game), None);
        assert_eq!(game.longest_road_holder, Some(1));
    }

    #[test]
    fn test_longer_road_takes_bonus_from_incumbent() {
        let mut game = state();
        let start = interior_corner(&game.board);
        let first: HashSet<CornerId> = lay_chain(&mut game.board, 0, start, 5)
            .into_iter()
            .collect();
        update_longest_road(&mut game);
        assert_eq!(game.longest_road_holder, Some(0));

        let other = far_corner(&game.board, &first);
        lay_path(&mut game.board, 1, other, 6, &first);

        let event = update_longest_road(&mut game);
        assert_eq!(game.longest_road_holder, Some(1));
        assert!(matches!(
            event,
            Some(GameEvent::LongestRoadChanged {
                previous: Some(0),
                current: Some(1),
                length: 6,
            })
        ));
        assert_eq!(game.players[0].longest_road_length, 5);
    }

    #[test]
    fn test_cut_incumbent_passes_bonus_to_qualifier() {
        let mut game = state();
        let start = interior_corner(&game.board);
        let path = lay_chain(&mut game.board, 0, start, 5);
        let first: HashSet<CornerId> = path.iter().copied().collect();
        update_longest_road(&mut game);

        let other = far_corner(&game.board, &first);
        lay_path(&mut game.board, 1, other, 5, &first);
        assert_eq!(update_longest_road(&mut game), None);
        assert_eq!(game.longest_road_holder, Some(0));

        game.board.place_settlement(path[2], 2);
        let event = update_longest_road(&mut game);
        assert_eq!(game.longest_road_holder, Some(1));
        assert!(matches!(
            event,
            Some(GameEvent::LongestRoadChanged {
                previous: Some(0),
                current: Some(1),
                length: 5,
            })
        ));
    }

    #[test]
    fn test_longest_road_revoked_when_cut() {
        let mut game = state();
        let start = interior_corner(&game.board);
        let path = lay_chain(&mut game.board, 0, start, 5);
        update_longest_road(&mut game);
        assert_eq!(game.longest_road_holder, Some(0));

        game.board.place_settlement(path[2], 1);
        update_longest_road(&mut game);
        assert_eq!(game.longest_road_holder, None);
    }

    #[test]
    fn test_largest_army_needs_three_and_strict_lead() {
        let mut game = state();
        game.players[0].knights_played = 2;
        assert_eq!(update_largest_army(&mut game), None);

        game.players[0].knights_played = 3;
        assert!(update_largest_army(&mut game).is_some());
        assert_eq!(game.largest_army_holder, Some(0));

        game.players[1].knights_played = 3;
        assert_eq!(update_largest_army(&mut game), None);
        assert_eq!(game.largest_army_holder, Some(0));

        game.players[1].knights_played = 4;
        update_largest_army(&mut game);
        assert_eq!(game.largest_army_holder, Some(1));
    }

    #[test]
    fn test_find_winner_starts_from_turn_holder() {
        let mut game = state();
        game.target_victory_points = 1;
        let corners: Vec<CornerId> = game.board.corners().iter().map(|c| c.id).collect();
        game.board.place_settlement(corners[0], 0);
        game.board.place_settlement(corners[20], 2);

        game.turn_index = 1;
        assert_eq!(find_winner(&game), Some(2));
        game.turn_index = 0;
        assert_eq!(find_winner(&game), Some(0));
    }
}
