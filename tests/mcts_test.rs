extern crate uttt_mcts;

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use uttt_mcts::board::*;
use uttt_mcts::engine::mcts::*;

#[test]
fn visit_conservation() {
    let mut searcher = Searcher::new(Position::new(), EXPLORATION, SmallRng::seed_from_u64(7));
    for _ in 0..500 {
        searcher.iterate();
    }
    assert_eq!(searcher.root_visits(), 500);
    let child_total: u32 = searcher.root_children().iter().map(|&(_, v)| v).sum();
    assert_eq!(child_total, 500);
}

#[test]
fn seeded_search_is_deterministic() {
    let run = |seed: u64| {
        let pos = Position::from_move_list("40, 38");
        let mut searcher = Searcher::new(pos, EXPLORATION, SmallRng::seed_from_u64(seed));
        for _ in 0..2000 {
            searcher.iterate();
        }
        (searcher.best_move(), searcher.root_children())
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn finds_immediate_win() {
    // x to move in block 4, where 38 completes the meta diagonal
    let line = [
        0, 3, 28, 9, 1, 12, 29, 18, 2, 21, 31, 44, 72, 57, 33, 58, 36, 62, 73, 16, 64, 14, 46,
        17, 74, 22, 37, 10, 13, 40,
    ];
    let mut pos = Position::new();
    for &mov in line.iter() {
        pos.make_move(mov);
    }
    assert_eq!(pos.side_to_move(), Side::X);

    let mut searcher = Searcher::new(pos, EXPLORATION, SmallRng::seed_from_u64(3));
    for _ in 0..4000 {
        searcher.iterate();
    }
    assert_eq!(searcher.best_move(), Some(38));
}

#[test]
fn zero_budget_falls_back_to_valid_list() {
    let valid: [Idx; 3] = [40, 0, 80];
    for seed in 0..10 {
        let mut searcher =
            Searcher::new(Position::new(), EXPLORATION, SmallRng::seed_from_u64(seed));
        let res = searcher.decide(Duration::from_millis(0), &valid);
        assert_eq!(res.rollouts, 0);
        assert!(valid.contains(&res.best_move));
    }
}

#[test]
fn budgeted_search_returns_legal_move() {
    let pos = Position::new();
    let valid = pos.legal_moves().collect::<Vec<Idx>>();
    let mut searcher = Searcher::new(pos, EXPLORATION, SmallRng::seed_from_u64(99));
    let res = searcher.decide(Duration::from_millis(50), &valid);
    assert!(res.rollouts > 0);
    assert!(valid.contains(&res.best_move));
}
