use std::collections::VecDeque;
use std::{fmt::Display, str::FromStr};

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Clear,
    Blocked,
    Start,
    End,
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Cell::Clear => ".",
                Cell::Blocked => "#",
                Cell::Start => "S",
                Cell::End => "E",
            }
        )
    }
}

impl TryFrom<char> for Cell {
    type Error = MazeError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            '.' | ' ' => Ok(Cell::Clear),
            '#' | 'X' => Ok(Cell::Blocked),
            'S' => Ok(Cell::Start),
            'E' => Ok(Cell::End),
            _ => Err(MazeError::InvalidLayout(format!("unknown cell '{}'", c))),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two points
    pub fn manhattan(self, other: Point) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn is_adjacent(self, other: Point) -> bool {
        self.manhattan(other) == 1
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four moves, in the order neighbors are generated
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    East,
    South,
    West,
    North,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    /// Move one cell in this direction, or None if that leaves a `rows` x `columns` grid
    pub fn step(self, point: Point, rows: usize, columns: usize) -> Option<Point> {
        let Point { row, col } = point;
        match self {
            Direction::East if col + 1 < columns => Some(Point::new(row, col + 1)),
            Direction::South if row + 1 < rows => Some(Point::new(row + 1, col)),
            Direction::West => col.checked_sub(1).map(|col| Point::new(row, col)),
            Direction::North => row.checked_sub(1).map(|row| Point::new(row, col)),
            _ => None,
        }
    }
}

/// A rectangular grid of values stored row-major in a single vec
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellStorage<T> {
    columns: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> CellStorage<T> {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            columns,
            cells: vec![T::default(); rows * columns],
        }
    }

    pub fn get(&self, node: Point) -> T {
        self.cells[node.row * self.columns + node.col]
    }

    pub fn get_mut(&mut self, node: Point) -> &mut T {
        &mut self.cells[node.row * self.columns + node.col]
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.columns.max(1))
    }
}

impl<T: Display + Copy + Default> Display for CellStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// One partial route under consideration, starting at the start cell
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    /// Manhattan distance from the last point of `path` to the end cell
    pub priority: usize,
    pub path: Vec<Point>,
}

impl Candidate {
    /// The last point of the path. Paths are never empty.
    pub fn head(&self) -> Point {
        self.path[self.path.len() - 1]
    }
}

/// State of a single solve attempt
#[derive(Clone, Debug, Eq, PartialEq)]
struct SearchSession {
    visited: CellStorage<bool>,
    visited_count: usize,
    frontier: VecDeque<Candidate>,
    solution: Vec<Point>,
}

impl SearchSession {
    fn new(rows: usize, columns: usize) -> Self {
        Self {
            visited: CellStorage::new(rows, columns),
            visited_count: 0,
            frontier: VecDeque::new(),
            solution: Vec::new(),
        }
    }
}

/// A rectangular maze with exactly one start and one end cell, together with the
/// state of the search currently running on it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridMaze {
    rows: usize,
    columns: usize,
    cells: CellStorage<Cell>,
    start: Point,
    end: Point,
    session: SearchSession,
}

impl GridMaze {
    /// Build a random maze. Every cell is blocked with probability 1/3, the start is
    /// placed uniformly and the end is resampled until it neither equals nor touches
    /// the start.
    pub fn generate<R: Rng>(rows: usize, columns: usize, rng: &mut R) -> Result<Self> {
        // a 1xN grid cannot always fit a non-adjacent end cell
        if rows < 2 || columns < 2 {
            return Err(MazeError::InvalidDimensions {
                rows,
                cols: columns,
            });
        }

        let mut cells = CellStorage::new(rows, columns);
        for cell in cells.iter_mut() {
            *cell = if rng.gen_range(0..3) == 0 {
                Cell::Blocked
            } else {
                Cell::Clear
            };
        }

        let start = random_point(rows, columns, rng);
        let end = loop {
            let candidate = random_point(rows, columns, rng);
            if candidate != start && !candidate.is_adjacent(start) {
                break candidate;
            }
        };

        *cells.get_mut(start) = Cell::Start;
        *cells.get_mut(end) = Cell::End;

        let mut maze = Self {
            rows,
            columns,
            cells,
            start,
            end,
            session: SearchSession::new(rows, columns),
        };
        maze.reset_search_state();

        debug!(
            "generated {}x{} maze, start={} end={}",
            rows, columns, start, end
        );
        Ok(maze)
    }

    /// Replace this maze with a freshly generated one. On error the maze is left as it was.
    pub fn regenerate<R: Rng>(
        &mut self,
        rows: usize,
        columns: usize,
        rng: &mut R,
    ) -> Result<()> {
        *self = Self::generate(rows, columns, rng)?;
        Ok(())
    }

    /// Build a maze from explicit rows of cells. Exactly one start and one end are required.
    pub fn from_cells(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let columns = rows.first().map(|r| r.len()).unwrap_or(0);
        if columns == 0 {
            return Err(MazeError::InvalidLayout("maze has no cells".to_string()));
        }

        let mut cells = CellStorage::new(rows.len(), columns);
        let mut start = None;
        let mut end = None;

        for (r, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(MazeError::InvalidLayout(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    columns
                )));
            }
            for (c, cell) in row.iter().enumerate() {
                let point = Point::new(r, c);
                let slot = match cell {
                    Cell::Start => Some(&mut start),
                    Cell::End => Some(&mut end),
                    _ => None,
                };
                if let Some(slot) = slot {
                    if slot.replace(point).is_some() {
                        return Err(MazeError::InvalidLayout(format!(
                            "more than one {:?} cell",
                            cell
                        )));
                    }
                }
                *cells.get_mut(point) = *cell;
            }
        }

        let start = start.ok_or_else(|| MazeError::InvalidLayout("no start cell".to_string()))?;
        let end = end.ok_or_else(|| MazeError::InvalidLayout("no end cell".to_string()))?;

        let mut maze = Self {
            rows: rows.len(),
            columns,
            cells,
            start,
            end,
            session: SearchSession::new(rows.len(), columns),
        };
        maze.reset_search_state();
        Ok(maze)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn cell(&self, point: Point) -> Cell {
        self.cells.get(point)
    }

    pub fn cells(&self) -> &CellStorage<Cell> {
        &self.cells
    }

    /// Forget any previous solve attempt. The frontier restarts as the single path `[start]`.
    pub fn reset_search_state(&mut self) {
        let priority = self.distance(self.start);
        let session = &mut self.session;

        session.visited.fill(false);
        *session.visited.get_mut(self.start) = true;
        session.visited_count = 1;
        session.solution.clear();
        session.frontier.clear();
        session.frontier.push_back(Candidate {
            priority,
            path: vec![self.start],
        });
    }

    /// Orthogonal neighbors of `point` (east, south, west, north) that are inside the
    /// grid, not blocked and not yet visited.
    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| d.step(point, self.rows, self.columns))
            .filter(move |p| !self.session.visited.get(*p) && self.cells.get(*p) != Cell::Blocked)
    }

    /// Manhattan distance from `point` to the end cell
    pub fn distance(&self, point: Point) -> usize {
        point.manhattan(self.end)
    }

    pub fn frontier(&self) -> impl ExactSizeIterator<Item = &Candidate> {
        self.session.frontier.iter()
    }

    pub fn is_visited(&self, point: Point) -> bool {
        self.session.visited.get(point)
    }

    /// Number of visited cells, including the start
    pub fn visited_count(&self) -> usize {
        self.session.visited_count
    }

    /// The cells strictly between start and end of the last successful solve
    pub fn solution(&self) -> &[Point] {
        &self.session.solution
    }

    pub(crate) fn frontier_len(&self) -> usize {
        self.session.frontier.len()
    }

    /// Stable sort, equal priorities keep their insertion order
    pub(crate) fn sort_frontier(&mut self) {
        self.session
            .frontier
            .make_contiguous()
            .sort_by_key(|c| c.priority);
    }

    pub(crate) fn pop_best(&mut self) -> Option<Candidate> {
        self.session.frontier.pop_front()
    }

    /// Queue `from` extended by `point` and mark `point` visited
    pub(crate) fn extend_frontier(&mut self, from: &Candidate, point: Point) {
        let mut path = Vec::with_capacity(from.path.len() + 1);
        path.extend_from_slice(&from.path);
        path.push(point);

        let priority = self.distance(point);
        let session = &mut self.session;
        session.frontier.push_back(Candidate { priority, path });
        *session.visited.get_mut(point) = true;
        session.visited_count += 1;
    }

    pub(crate) fn set_solution(&mut self, solution: Vec<Point>) {
        self.session.solution = solution;
    }
}

fn random_point<R: Rng>(rows: usize, columns: usize, rng: &mut R) -> Point {
    Point::new(rng.gen_range(0..rows), rng.gen_range(0..columns))
}

impl Display for GridMaze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cells)
    }
}

impl FromStr for GridMaze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(Cell::try_from).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;

        Self::from_cells(rows)
    }
}
