use thiserror::Error;

use crate::{
    algorithms::{Generator, GeneratorError, GeneratorParams},
    dims::Pos,
    gameboard::{Direction, Maze},
    settings::SettingsError,
    solver::{Algorithm, Comparison, PathInfo, SolveError, Solver, UnknownAlgorithm},
};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("generator error; {0}")]
    Generator(#[from] GeneratorError),
    #[error("solver error; {0}")]
    Solve(#[from] SolveError),
    #[error("settings error; {0}")]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    UnknownAlgorithm(#[from] UnknownAlgorithm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Wall in the way, or the game is already finished.
    Blocked,
    Moved(Pos),
    /// Moved onto the goal.
    Finished(Pos),
}

/// One maze being played: the player walks from the start towards the goal, optionally
/// followed by a hint path recomputed after every step.
#[derive(Debug, Clone)]
pub struct GameSession {
    maze: Maze,
    player_pos: Pos,
    finished: bool,
    hint_algorithm: Option<Algorithm>,
    hint: Option<PathInfo>,
    stats: Vec<(Algorithm, PathInfo)>,
    moves: Vec<(Pos, Direction)>,
}

impl GameSession {
    pub fn new(maze: Maze) -> Self {
        let player_pos = maze.start();
        let finished = player_pos == maze.goal();
        Self {
            maze,
            player_pos,
            finished,
            hint_algorithm: None,
            hint: None,
            stats: Vec::new(),
            moves: Vec::new(),
        }
    }

    /// Fresh session on a newly generated maze.
    pub fn generate(
        rows: usize,
        cols: usize,
        seed: Option<u64>,
        params: GeneratorParams,
    ) -> Result<Self, GeneratorError> {
        let maze = Generator::with_params(params).generate_seeded(rows, cols, seed)?;
        Ok(Self::new(maze))
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player_pos(&self) -> Pos {
        self.player_pos
    }

    pub fn goal_pos(&self) -> Pos {
        self.maze.goal()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn moves(&self) -> &[(Pos, Direction)] {
        &self.moves
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn hint_algorithm(&self) -> Option<Algorithm> {
        self.hint_algorithm
    }

    pub fn hint(&self) -> Option<&PathInfo> {
        self.hint.as_ref()
    }

    /// Latest result per algorithm, in [`Algorithm::ALL`] order.
    pub fn stats(&self) -> &[(Algorithm, PathInfo)] {
        &self.stats
    }

    pub fn try_move(&mut self, dir: Direction) -> Result<MoveOutcome, SolveError> {
        if self.finished || !self.maze.can_move(self.player_pos, dir) {
            return Ok(MoveOutcome::Blocked);
        }

        self.moves.push((self.player_pos, dir));
        self.player_pos += dir.offset();

        if self.hint_algorithm.is_some() {
            self.update_hint()?;
        }

        if self.player_pos == self.maze.goal() {
            self.finished = true;
            log::info!("maze finished in {} moves", self.moves.len());
            return Ok(MoveOutcome::Finished(self.player_pos));
        }

        Ok(MoveOutcome::Moved(self.player_pos))
    }

    /// Selects the hint algorithm and solves from the player position.
    pub fn set_hint(&mut self, algorithm: Algorithm) -> Result<&PathInfo, SolveError> {
        self.hint_algorithm = Some(algorithm);
        self.update_hint()?;
        Ok(self.hint.get_or_insert_with(PathInfo::default))
    }

    pub fn clear_hint(&mut self) {
        self.hint_algorithm = None;
        self.hint = None;
    }

    fn update_hint(&mut self) -> Result<(), SolveError> {
        let Some(algorithm) = self.hint_algorithm else {
            return Ok(());
        };

        let info = Solver::new(&self.maze).solve(algorithm, self.player_pos)?;
        self.record(algorithm, info.clone());
        self.hint = Some(info);
        Ok(())
    }

    fn record(&mut self, algorithm: Algorithm, info: PathInfo) {
        match self.stats.iter_mut().find(|(a, _)| *a == algorithm) {
            Some(entry) => entry.1 = info,
            None => {
                self.stats.push((algorithm, info));
                self.stats.sort_by_key(|(a, _)| *a);
            }
        }
    }

    /// Replaces stats with a fresh run of every algorithm from the player position.
    pub fn compare(&mut self) -> Result<Comparison, SolveError> {
        self.stats.clear();
        let comparison = Solver::new(&self.maze).compare_all(self.player_pos)?;
        for (algorithm, info) in comparison.iter() {
            self.stats.push((algorithm, info.clone()));
        }
        Ok(comparison)
    }

    /// Puts the player back on the start and forgets hint, stats and moves.
    pub fn reset(&mut self) {
        self.player_pos = self.maze.start();
        self.finished = self.player_pos == self.maze.goal();
        self.clear_hint();
        self.stats.clear();
        self.moves.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2: (0,0) -> (0,1) -> (1,1), (1,0) only reachable from (0,0).
    fn hook() -> Maze {
        let mut maze = Maze::new_closed(2, 2);
        maze.remove_wall(Pos(0, 0), Direction::Right);
        maze.remove_wall(Pos(0, 1), Direction::Down);
        maze.remove_wall(Pos(0, 0), Direction::Down);
        maze
    }

    #[test]
    fn walls_block_moves() {
        let mut game = GameSession::new(hook());
        assert_eq!(game.try_move(Direction::Up), Ok(MoveOutcome::Blocked));
        assert_eq!(game.try_move(Direction::Left), Ok(MoveOutcome::Blocked));

        assert_eq!(game.try_move(Direction::Down), Ok(MoveOutcome::Moved(Pos(1, 0))));
        // (1,0) -> (1,1) is walled
        assert_eq!(game.try_move(Direction::Right), Ok(MoveOutcome::Blocked));
        assert_eq!(game.player_pos(), Pos(1, 0));
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn reaching_goal_finishes() {
        let mut game = GameSession::new(hook());
        assert_eq!(game.try_move(Direction::Right), Ok(MoveOutcome::Moved(Pos(0, 1))));
        assert_eq!(game.try_move(Direction::Down), Ok(MoveOutcome::Finished(Pos(1, 1))));
        assert!(game.is_finished());
        assert_eq!(game.try_move(Direction::Up), Ok(MoveOutcome::Blocked));
        assert_eq!(
            game.moves(),
            &[(Pos(0, 0), Direction::Right), (Pos(0, 1), Direction::Down)]
        );
    }

    #[test]
    fn hint_follows_player() {
        let mut game = GameSession::new(hook());
        let first = game.set_hint(Algorithm::Bfs).unwrap().clone();
        assert_eq!(first.path, vec![Pos(0, 0), Pos(0, 1), Pos(1, 1)]);

        game.try_move(Direction::Down).unwrap();
        let hint = game.hint().unwrap();
        assert_eq!(hint.path.first(), Some(&Pos(1, 0)));
        assert_eq!(hint.length, 4);
        assert_eq!(game.stats().len(), 1);
    }

    #[test]
    fn compare_fills_all_stats() {
        let mut game = GameSession::generate(9, 9, Some(17), GeneratorParams::default()).unwrap();
        game.set_hint(Algorithm::Dfs).unwrap();
        let comparison = game.compare().unwrap();

        assert_eq!(comparison.len(), 4);
        let names: Vec<_> = game.stats().iter().map(|(a, _)| *a).collect();
        assert_eq!(names, Algorithm::ALL.to_vec());
        assert_eq!(
            comparison.get(Algorithm::Dijkstra).map(|i| i.total_cost),
            comparison.get(Algorithm::AStar).map(|i| i.total_cost)
        );
    }

    #[test]
    fn reset_returns_to_start() {
        let mut game = GameSession::new(hook());
        game.set_hint(Algorithm::AStar).unwrap();
        game.try_move(Direction::Right).unwrap();
        game.reset();

        assert_eq!(game.player_pos(), Pos(0, 0));
        assert!(game.hint().is_none());
        assert!(game.stats().is_empty());
        assert_eq!(game.move_count(), 0);
        assert!(!game.is_finished());
    }
}
