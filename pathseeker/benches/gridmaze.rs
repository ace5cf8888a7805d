use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pathseeker::{FrontierSearch, GridMaze};
use rand::{rngs::StdRng, SeedableRng};

fn load_seeded_maze(rows: usize, columns: usize) -> GridMaze {
    GridMaze::generate(rows, columns, &mut StdRng::seed_from_u64(2024)).unwrap()
}

fn bench_maze(c: &mut Criterion, rows: usize, columns: usize, max_paths: usize) {
    let mut maze = load_seeded_maze(rows, columns);
    let mut search = FrontierSearch::new(max_paths).unwrap();

    c.bench_function(
        &format!("maze_{}x{}_paths_{}", rows, columns, max_paths),
        |b| {
            b.iter(|| {
                let state = search.solve(black_box(&mut maze), &mut ());
                assert!(state.is_done());
            })
        },
    );
}

pub fn maze_small(c: &mut Criterion) {
    bench_maze(c, 20, 30, 16);
}

pub fn maze_medium(c: &mut Criterion) {
    bench_maze(c, 67, 105, 16);
}

pub fn maze_large(c: &mut Criterion) {
    bench_maze(c, 200, 300, 16);
}

pub fn maze_greedy(c: &mut Criterion) {
    bench_maze(c, 67, 105, 1);
}

criterion_group!(benches, maze_small, maze_medium, maze_large, maze_greedy);
criterion_main!(benches);
