use super::game_state::GameState;
use super::types::{Direction, Point};

/// Greedy autopilot: heads for the food along safe cells.
pub struct BotController;

impl BotController {
    pub fn calculate_move(state: &GameState) -> Option<Direction> {
        if state.is_game_over() {
            return None;
        }

        let head = state.head();
        let food = state.food();

        let mut best_dir = None;
        let mut best_score = (u32::MAX, 0usize);

        for dir in Self::get_valid_directions(state.direction()) {
            let next_pos = head.moved(dir);
            if !state.is_safe(next_pos) {
                continue;
            }

            // Closer to food first, then more room to move afterwards.
            let distance = next_pos.manhattan_distance(food);
            let exits = Self::free_neighbours(state, next_pos, head);
            let score = (distance, usize::MAX - exits);
            if exits > 0 && score < best_score {
                best_score = score;
                best_dir = Some(dir);
            }
        }

        best_dir.or_else(|| Self::any_safe_move(state))
    }

    fn any_safe_move(state: &GameState) -> Option<Direction> {
        let head = state.head();
        Self::get_valid_directions(state.direction())
            .into_iter()
            .find(|&dir| state.is_safe(head.moved(dir)))
            .or(Some(state.direction()))
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn free_neighbours(state: &GameState, pos: Point, vacated_by: Point) -> usize {
        Direction::ALL
            .iter()
            .map(|&dir| pos.moved(dir))
            .filter(|&next| next != vacated_by && state.is_safe(next))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;
    use crate::games::snake::StepOutcome;

    #[test]
    fn test_moves_towards_food() {
        let state = GameState::with_snake(
            20,
            &[Point::new(5, 5), Point::new(4, 5)],
            Direction::Right,
            Point::new(5, 10),
            SessionRng::new(1),
        );
        assert_eq!(BotController::calculate_move(&state), Some(Direction::Down));
    }

    #[test]
    fn test_avoids_wall() {
        let state = GameState::with_snake(
            20,
            &[Point::new(19, 5), Point::new(18, 5)],
            Direction::Right,
            Point::new(19, 0),
            SessionRng::new(1),
        );
        assert_eq!(BotController::calculate_move(&state), Some(Direction::Up));
    }

    #[test]
    fn test_no_move_when_game_over() {
        let mut state = GameState::with_snake(
            20,
            &[Point::new(0, 0)],
            Direction::Up,
            Point::new(5, 5),
            SessionRng::new(1),
        );
        state.step();
        assert_eq!(BotController::calculate_move(&state), None);
    }

    #[test]
    fn test_autopilot_eats_several_times() {
        let mut state = GameState::new(20, SessionRng::new(3)).unwrap();
        for _ in 0..400 {
            if let Some(dir) = BotController::calculate_move(&state) {
                state.set_direction(dir);
            }
            if let StepOutcome::Died(_) = state.step() {
                break;
            }
        }
        assert!(state.score() >= 3, "score was {}", state.score());
    }
}
