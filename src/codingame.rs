use std::io::{self, BufRead};
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;

extern crate uttt_mcts;

use uttt_mcts::board::*;
use uttt_mcts::engine::mcts::*;

macro_rules! parse_input {
    ($x:expr, $t:ident) => {
        $x.trim().parse::<$t>().unwrap()
    };
}

fn next_line() -> String {
    io::stdin()
        .lock()
        .lines()
        .next()
        .expect("there was no next line")
        .expect("the line could not be read")
}

fn main() {
    let c: f32 = match std::env::args().nth(1) {
        Some(val) => val
            .parse()
            .expect(&format!("could not parse c value '{}'", val)[..]),
        None => EXPLORATION,
    };
    let mut pos = Position::new();
    let mut first_turn = true;
    loop {
        let line = next_line();
        let inputs = line.split(' ').collect::<Vec<_>>();
        let opp_row = parse_input!(inputs[0], i32);
        let opp_col = parse_input!(inputs[1], i32);

        // the referee's idea of the legal moves, kept as the readout
        // fallback set
        let line = next_line();
        let valid_action_count = parse_input!(line, usize);
        let mut valid = Vec::with_capacity(valid_action_count);
        for _ in 0..valid_action_count {
            let line = next_line();
            let coords = line.split(' ').collect::<Vec<_>>();
            let row = parse_input!(coords[0], u8);
            let col = parse_input!(coords[1], u8);
            valid.push(to_index(row, col));
        }

        // -1 -1 marks the first turn of the game
        if opp_row >= 0 {
            pos.make_move(to_index(opp_row as u8, opp_col as u8));
        }

        // stay a little under the 1000ms/100ms allowances
        let budget = if first_turn {
            Duration::from_millis(980)
        } else {
            Duration::from_millis(90)
        };
        first_turn = false;

        let now = Instant::now();
        let mut searcher = Searcher::new(pos, c, SmallRng::from_entropy());
        let res = searcher.decide(budget, &valid);
        pos.make_move(res.best_move);

        let (row, col) = to_row_col(res.best_move);
        println!("{} {}", row, col);
        eprintln!("{} rollouts in {} ms", res.rollouts, now.elapsed().as_millis());
    }
}
