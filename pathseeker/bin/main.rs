use std::{path::PathBuf, thread, time::Duration};

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use pathseeker::{load_img, render::ImageRenderer, FrontierSearch, SearchState, SeekerConfig};

/// Generate a random maze and look for a path from S to E
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON config file, flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load the maze from an image instead of generating one
    #[arg(long)]
    image: Option<PathBuf>,

    /// Number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Number of columns
    #[arg(long)]
    cols: Option<usize>,

    /// Paths advanced per round
    #[arg(long)]
    max_paths: Option<usize>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Write the solved maze as a PNG
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pixel size of a cell in the PNG
    #[arg(long, default_value_t = 8)]
    cell_size: u32,

    /// Do not print the maze
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SeekerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SeekerConfig::default(),
    };
    config.rows = args.rows.unwrap_or(config.rows);
    config.cols = args.cols.unwrap_or(config.cols);
    config.max_paths_per_round = args.max_paths.unwrap_or(config.max_paths_per_round);
    config.seed = args.seed.or(config.seed);
    config.validate()?;

    let mut maze = match &args.image {
        Some(path) => {
            load_img(path).with_context(|| format!("loading maze from {}", path.display()))?
        }
        None => config.generate()?,
    };
    info!(
        "{}x{} maze, start={} end={}",
        maze.rows(),
        maze.columns(),
        maze.start(),
        maze.end()
    );

    let mut search = config.search()?;
    if let Some(ms) = args.time_limit_ms {
        spawn_timer(&search, Duration::from_millis(ms));
    }

    let mut renderer = ImageRenderer::new(args.cell_size);
    let state = search.solve(&mut maze, &mut renderer);

    if !args.quiet {
        println!("{}", render_text(&maze));
    }

    match &state {
        SearchState::Found(solution) => println!(
            "found a {} step path in {} rounds, {} cells visited",
            solution.steps(),
            solution.rounds,
            maze.visited_count()
        ),
        SearchState::NotFound => println!(
            "no path: end is unreachable, {} cells visited",
            maze.visited_count()
        ),
        SearchState::Cancelled => println!(
            "cancelled after {} rounds, {} cells visited",
            search.rounds(),
            maze.visited_count()
        ),
        SearchState::Searching => warn!("search stopped while still running"),
    }

    if let Some(path) = &args.output {
        renderer
            .save(&maze, path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

/// Cancel the search from another thread once `limit` has passed
fn spawn_timer(search: &FrontierSearch, limit: Duration) {
    let token = search.cancel_token();
    thread::spawn(move || {
        thread::sleep(limit);
        token.cancel();
    });
}

/// The maze as text with the solution marked by `*`
fn render_text(maze: &pathseeker::GridMaze) -> String {
    let mut text = maze.to_string().into_bytes();
    for point in maze.solution() {
        // one byte per cell plus the newline ending each row
        text[point.row * (maze.columns() + 1) + point.col] = b'*';
    }
    String::from_utf8_lossy(&text).into_owned()
}
