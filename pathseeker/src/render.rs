//! Off-screen rendering of a maze and its search progress.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::{MazeError, Result};
use crate::find::SearchObserver;
use crate::grid::{Cell, GridMaze, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub wall: Rgb<u8>,
    pub clear: Rgb<u8>,
    pub start: Rgb<u8>,
    pub end: Rgb<u8>,
    pub visited: Rgb<u8>,
    pub solution: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: Rgb([43, 43, 43]),
            clear: Rgb([175, 177, 179]),
            start: Rgb([145, 4, 4]),
            end: Rgb([7, 97, 4]),
            visited: Rgb([4, 122, 145]),
            solution: Rgb([163, 120, 2]),
        }
    }
}

impl Palette {
    pub fn cell(&self, cell: Cell) -> Rgb<u8> {
        match cell {
            Cell::Clear => self.clear,
            Cell::Blocked => self.wall,
            Cell::Start => self.start,
            Cell::End => self.end,
        }
    }
}

/// A [`SearchObserver`] that remembers what the search touched and paints it as an image,
/// one `cell_size` square per cell.
#[derive(Clone, Debug)]
pub struct ImageRenderer {
    cell_size: u32,
    palette: Palette,
    visited: Vec<Point>,
    solution: Vec<Point>,
}

impl ImageRenderer {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            palette: Palette::default(),
            visited: Vec::new(),
            solution: Vec::new(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn visited(&self) -> &[Point] {
        &self.visited
    }

    pub fn solution(&self) -> &[Point] {
        &self.solution
    }

    /// Forget the recorded search, e.g. before solving again
    pub fn clear(&mut self) {
        self.visited.clear();
        self.solution.clear();
    }

    /// Paint `maze`. Fails if the image would not fit in `u32` pixels per side.
    pub fn render(&self, maze: &GridMaze) -> Result<RgbImage> {
        let width = self.side(maze.columns())?;
        let height = self.side(maze.rows())?;
        let mut img = RgbImage::new(width, height);

        for row in 0..maze.rows() {
            for col in 0..maze.columns() {
                let point = Point::new(row, col);
                self.fill(&mut img, point, self.palette.cell(maze.cell(point)));
            }
        }

        // visited and solution cells never include start or end
        for point in &self.visited {
            self.fill(&mut img, *point, self.palette.visited);
        }
        for point in &self.solution {
            self.fill(&mut img, *point, self.palette.solution);
        }

        Ok(img)
    }

    pub fn save(&self, maze: &GridMaze, path: impl AsRef<Path>) -> Result<()> {
        self.render(maze)?.save(path)?;
        Ok(())
    }

    /// Pixel length of `cells` cells
    fn side(&self, cells: usize) -> Result<u32> {
        u32::try_from(cells)
            .ok()
            .and_then(|cells| cells.checked_mul(self.cell_size))
            .ok_or_else(|| {
                MazeError::Config(format!(
                    "{} cells of {} pixels do not fit in an image",
                    cells, self.cell_size
                ))
            })
    }

    fn fill(&self, img: &mut RgbImage, point: Point, color: Rgb<u8>) {
        let x0 = point.col as u32 * self.cell_size;
        let y0 = point.row as u32 * self.cell_size;
        for y in y0..y0 + self.cell_size {
            for x in x0..x0 + self.cell_size {
                img.put_pixel(x, y, color);
            }
        }
    }
}

impl SearchObserver for ImageRenderer {
    fn on_cell_visited(&mut self, point: Point) {
        self.visited.push(point);
    }

    fn on_solution_found(&mut self, path: &[Point]) {
        self.solution = path.to_vec();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::find::{solve, SearchState};

    #[test]
    fn test_render_solved_maze() {
        let mut maze: GridMaze = "S..\n.#.\n..E".parse().unwrap();
        let mut renderer = ImageRenderer::new(2);
        let state = solve(&mut maze, 4, &mut renderer).unwrap();
        assert!(matches!(state, SearchState::Found(_)));

        let palette = Palette::default();
        let img = renderer.render(&maze).unwrap();
        assert_eq!(img.dimensions(), (6, 6));

        let at = |row: u32, col: u32| *img.get_pixel(col * 2 + 1, row * 2 + 1);
        assert_eq!(at(0, 0), palette.start);
        assert_eq!(at(2, 2), palette.end);
        assert_eq!(at(1, 1), palette.wall);
        // on the route
        assert_eq!(at(0, 1), palette.solution);
        assert_eq!(at(1, 2), palette.solution);
        // explored but not on the route
        assert_eq!(at(1, 0), palette.visited);
        assert_eq!(at(2, 1), palette.visited);
    }

    #[test]
    fn test_render_too_large() {
        let maze: GridMaze = "S.\n.E".parse().unwrap();
        let renderer = ImageRenderer::new(u32::MAX);
        assert!(matches!(renderer.render(&maze), Err(MazeError::Config(_))));
        assert!(renderer.save(&maze, "never-written.png").is_err());
    }

    #[test]
    fn test_clear() {
        let mut maze: GridMaze = "S.\n.E".parse().unwrap();
        let mut renderer = ImageRenderer::new(1);
        solve(&mut maze, 1, &mut renderer).unwrap();
        assert!(!renderer.visited().is_empty());

        renderer.clear();
        assert!(renderer.visited().is_empty());
        assert!(renderer.solution().is_empty());
    }
}
