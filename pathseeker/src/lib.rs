//! Random grid mazes and a bounded greedy best-first search to solve them.
//!
//! ```rust,ignore
//! use pathseeker::{solve, GridMaze, SearchState};
//!
//! let mut maze = GridMaze::generate(20, 30, &mut rand::thread_rng())?;
//! if let SearchState::Found(solution) = solve(&mut maze, 16, &mut ())? {
//!     println!("{} steps", solution.steps());
//! }
//! ```

pub mod config;
pub mod error;
pub mod find;
pub mod grid;
pub mod render;
pub mod util;

pub use config::SeekerConfig;
pub use error::{MazeError, Result};
pub use find::{solve, CancelToken, FrontierSearch, SearchObserver, SearchState, Solution};
pub use grid::{Candidate, Cell, CellStorage, Direction, GridMaze, Point};
pub use util::{load_img, parse_img};
