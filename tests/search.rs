use queens_solver::queens::batch::run_trials;
use queens_solver::queens::board::{Board, CURRENT_COLUMN, Grid};
use queens_solver::queens::search::{hill_climbing, min_conflicts};
use queens_solver::queens::solver::{Algorithm, SearchConfig, solve};

const EIGHT_SOLUTION: [[u8; 8]; 8] = [
    [1, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 1],
    [0, 0, 0, 0, 0, 1, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 1, 0],
    [0, 1, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 0],
];

#[test]
fn solved_grid_round_trips_through_the_searches() {
    let board = Board::from_grid(&Grid::from(&EIGHT_SOLUTION));
    assert_eq!(board.queens(), &[0, 4, 7, 5, 2, 6, 1, 3]);
    assert_eq!(board.cost(), 0);

    assert_eq!(hill_climbing(&board), board);
    assert_eq!(min_conflicts(&board, 100), board);
}

#[test]
fn searches_never_return_a_worse_board() {
    let mut rng = fastrand::Rng::with_seed(2024);
    for size in 4..=8 {
        let board = Board::new_random(size, &mut rng);

        let climbed = hill_climbing(&board);
        assert!(climbed.cost() <= board.cost());
        assert_eq!(climbed.size(), size);

        let config = SearchConfig {
            algorithm: Algorithm::HillClimbing,
            size,
            ..SearchConfig::default()
        };
        let (plateau, stats) = solve(&board, &config);
        assert!(plateau.cost() <= climbed.cost());
        assert_eq!(stats.final_cost, plateau.cost());
        assert!(stats.climbs >= 1);
    }
}

#[test]
fn min_conflicts_with_no_budget_keeps_the_board() {
    let board = Board::new_random(10, &mut fastrand::Rng::with_seed(17));
    assert_eq!(min_conflicts(&board, 0), board);
}

#[test]
fn min_conflicts_result_stays_consistent() {
    let board = Board::new_random(8, &mut fastrand::Rng::with_seed(5));
    let result = min_conflicts(&board, 25);

    let rebuilt = Board::from_grid(result.grid());
    assert_eq!(rebuilt.queens(), result.queens());
    assert_eq!(rebuilt.cost(), result.cost());

    for row in 0..result.size() {
        let conflicts = result.conflicts_for_row(row);
        assert_eq!(conflicts[result.queens()[row]], CURRENT_COLUMN);
    }
}

#[test]
fn min_conflicts_solves_every_four_queens_board() {
    let config = SearchConfig {
        algorithm: Algorithm::MinConflicts,
        size: 4,
        max_steps: 50,
        seed: Some(31),
    };
    let report = run_trials(&config, 20);
    assert_eq!(report.trials, 20);
    assert_eq!(report.solved, 20);
    assert!((report.success_percentage() - 100.0).abs() < f64::EPSILON);
}
