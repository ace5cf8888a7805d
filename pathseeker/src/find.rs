use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{debug, trace};

use crate::error::{MazeError, Result};
use crate::grid::{GridMaze, Point};

/// Hooks through which a host follows a running search.
///
/// Observers are purely informational, nothing they do changes the outcome.
pub trait SearchObserver {
    /// Called at the start of every round with the frontier size before expansion
    fn on_round(&mut self, _round: usize, _frontier_len: usize) {}

    /// Called once per newly visited cell, in discovery order
    fn on_cell_visited(&mut self, _point: Point) {}

    /// Called exactly once when the end cell is reached
    fn on_solution_found(&mut self, _path: &[Point]) {}
}

impl SearchObserver for () {}

impl<T: SearchObserver + ?Sized> SearchObserver for &mut T {
    fn on_round(&mut self, round: usize, frontier_len: usize) {
        (**self).on_round(round, frontier_len);
    }

    fn on_cell_visited(&mut self, point: Point) {
        (**self).on_cell_visited(point);
    }

    fn on_solution_found(&mut self, path: &[Point]) {
        (**self).on_solution_found(path);
    }
}

/// Shared flag a host sets to stop a search at the next round boundary
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Solution {
    /// Cells strictly between start and goal, in walking order
    pub path: Vec<Point>,
    pub start: Point,
    pub goal: Point,
    /// Number of rounds it took to reach the goal
    pub rounds: usize,
}

impl Solution {
    /// Number of moves from start to goal
    pub fn steps(&self) -> usize {
        self.path.len() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Searching,
    NotFound,
    Cancelled,
    Found(Solution),
}

impl SearchState {
    pub fn is_done(&self) -> bool {
        !matches!(self, SearchState::Searching)
    }
}

/// Bounded greedy best-first search.
///
/// Every round the frontier is sorted by distance to the end cell and only the best
/// `max_paths_per_round` paths are advanced; the rest wait for later rounds. The
/// result is *a* path, not necessarily the shortest one.
#[derive(Debug)]
pub struct FrontierSearch {
    max_paths_per_round: usize,
    cancel: CancelToken,
    round: usize,
    state: SearchState,
}

impl FrontierSearch {
    pub fn new(max_paths_per_round: usize) -> Result<Self> {
        if max_paths_per_round < 1 {
            return Err(MazeError::InvalidFrontierCap(max_paths_per_round));
        }

        Ok(Self {
            max_paths_per_round,
            cancel: CancelToken::new(),
            round: 0,
            state: SearchState::Searching,
        })
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn max_paths_per_round(&self) -> usize {
        self.max_paths_per_round
    }

    /// Reset the search state of `maze` and run until the end is found, the frontier
    /// runs dry or the search is cancelled.
    pub fn solve<O: SearchObserver>(&mut self, maze: &mut GridMaze, observer: &mut O) -> SearchState {
        maze.reset_search_state();
        self.round = 0;
        self.state = SearchState::Searching;
        self.finish(maze, observer)
    }

    /// Keep stepping from the current state of `maze` until the search is done
    pub fn finish<O: SearchObserver>(&mut self, maze: &mut GridMaze, observer: &mut O) -> SearchState {
        loop {
            match self.step(maze, observer) {
                SearchState::Searching => {}
                s => return s,
            }
        }
    }

    /// Run a single round
    pub fn step<O: SearchObserver>(&mut self, maze: &mut GridMaze, observer: &mut O) -> SearchState {
        if self.state.is_done() {
            return self.state.clone();
        }

        if maze.frontier_len() == 0 {
            debug!(
                "frontier exhausted after {} rounds, {} cells visited",
                self.round,
                maze.visited_count()
            );
            self.state = SearchState::NotFound;
            return self.state.clone();
        }

        if self.cancel.is_cancelled() {
            debug!("search cancelled after {} rounds", self.round);
            self.state = SearchState::Cancelled;
            return self.state.clone();
        }

        self.round += 1;
        observer.on_round(self.round, maze.frontier_len());

        maze.sort_frontier();
        let count = maze.frontier_len().min(self.max_paths_per_round);
        trace!(
            "round {}: advancing {} of {} paths",
            self.round,
            count,
            maze.frontier_len()
        );

        for _ in 0..count {
            let Some(candidate) = maze.pop_best() else {
                break;
            };

            let next: Vec<Point> = maze.neighbors(candidate.head()).collect();
            for point in next {
                if point == maze.end() {
                    // neither start nor end are part of the solution
                    let path = candidate.path[1..].to_vec();
                    maze.set_solution(path.clone());
                    observer.on_solution_found(&path);

                    debug!(
                        "found a {} step path after {} rounds, {} cells visited",
                        path.len() + 1,
                        self.round,
                        maze.visited_count()
                    );
                    self.state = SearchState::Found(Solution {
                        path,
                        start: maze.start(),
                        goal: maze.end(),
                        rounds: self.round,
                    });
                    return self.state.clone();
                }

                maze.extend_frontier(&candidate, point);
                observer.on_cell_visited(point);
            }
        }

        self.state.clone()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Rounds run so far
    pub fn rounds(&self) -> usize {
        self.round
    }
}

/// Reset `maze` and search it, advancing at most `max_paths_per_round` paths per round
pub fn solve<O: SearchObserver>(
    maze: &mut GridMaze,
    max_paths_per_round: usize,
    observer: &mut O,
) -> Result<SearchState> {
    let mut search = FrontierSearch::new(max_paths_per_round)?;
    Ok(search.solve(maze, observer))
}
