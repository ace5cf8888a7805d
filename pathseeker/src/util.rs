use std::path::Path;

use image::{DynamicImage, Rgb};

use crate::error::Result;
use crate::grid::{Cell, GridMaze};

/// Build a maze from an image, one pixel per cell.
///
/// Dark pixels are walls, a strongly red pixel is the start and a strongly green one the end.
/// Everything else is clear, so images written by [`crate::render::ImageRenderer`] with a
/// cell size of 1 load back as the same maze.
pub fn parse_img(img: &DynamicImage) -> Result<GridMaze> {
    let img = img.to_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut cells = vec![vec![Cell::Clear; width]; height];

    for row in 0..height {
        for col in 0..width {
            cells[row][col] = classify(*img.get_pixel(col as u32, row as u32));
        }
    }

    GridMaze::from_cells(cells)
}

pub fn load_img(path: impl AsRef<Path>) -> Result<GridMaze> {
    let img = image::open(path)?;
    parse_img(&img)
}

fn classify(Rgb([r, g, b]): Rgb<u8>) -> Cell {
    if r >= 128 && g < 64 && b < 64 {
        Cell::Start
    } else if g >= 64 && r < 64 && b < 64 {
        Cell::End
    } else if r.max(g).max(b) < 96 {
        Cell::Blocked
    } else {
        Cell::Clear
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::find::solve;
    use crate::render::ImageRenderer;
    use crate::MazeError;

    #[test]
    fn test_parse_rendered_maze() {
        let mut maze: GridMaze = "S..#\n.#..\n...E".parse().unwrap();
        let mut renderer = ImageRenderer::new(1);
        solve(&mut maze, 2, &mut renderer).unwrap();

        let img = DynamicImage::ImageRgb8(renderer.render(&maze).unwrap());
        let parsed = parse_img(&img).unwrap();
        assert_eq!(parsed.to_string(), maze.to_string());
    }

    #[test]
    fn test_parse_plain_image() {
        let mut img = image::RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(2, 1, Rgb([0, 255, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 0]));

        let maze = parse_img(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(maze.to_string(), "S#.\n..E\n");
    }

    #[test]
    fn test_parse_without_start() {
        let img = image::RgbImage::from_pixel(3, 3, Rgb([255, 255, 255]));
        assert!(matches!(
            parse_img(&DynamicImage::ImageRgb8(img)),
            Err(MazeError::InvalidLayout(_))
        ));
    }
}
