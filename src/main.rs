use std::io::{self, BufRead, Stdin};
use std::process::exit;
use std::str::SplitWhitespace;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

extern crate uttt_mcts;

use uttt_mcts::board::*;
use uttt_mcts::engine::mcts::*;

const ENGINE_BUDGET: Duration = Duration::from_millis(500);

fn next_line(stdin: &mut Stdin) -> String {
    stdin
        .lock()
        .lines()
        .next()
        .expect("there was no next line")
        .expect("the line could not be read")
}

fn print_help() {
    static HELP_TEXT: &'static str = "
COMMANDS
========
h               Display this message.
p               Print current board.
m <b> <c>       Make move in block b at cell c. Both are row-major
                    indices 0-8, blocks from top-left.
q               Quit this program.
";
    println!("{}", HELP_TEXT);
}

// returns true if a move was made
fn command_make_move(tokens: &mut SplitWhitespace, pos: &mut Position) -> bool {
    let (block, cell) = match (tokens.next(), tokens.next()) {
        (Some(block), Some(cell)) => (block, cell),
        _ => {
            println!("ERROR: need 2 arguments");
            return false;
        }
    };
    let block: Idx = match block.parse() {
        Ok(val) => val,
        Err(err) => {
            println!("ERROR parsing index: {:?}", err);
            return false;
        }
    };
    let cell: Idx = match cell.parse() {
        Ok(val) => val,
        Err(err) => {
            println!("ERROR parsing index: {:?}", err);
            return false;
        }
    };
    if block >= 9 || cell >= 9 {
        println!("move index out of bounds (0-8)");
        return false;
    }
    let mov = block * 9 + cell;
    if !pos.legal_moves().contains(mov) {
        println!("ERROR: illegal move");
        return false;
    }
    pos.make_move(mov);
    true
}

fn main() {
    let mut pos = Position::new();
    let mut stdin = io::stdin();
    loop {
        match pos.get_result() {
            GameResult::XWon => {
                println!("X wins!");
                return;
            }
            GameResult::OWon => {
                println!("O wins!");
                return;
            }
            GameResult::Draw => {
                println!("It's a draw!");
                return;
            }
            GameResult::Ongoing => {}
        }

        if pos.side_to_move() == Side::X {
            println!("{}", pos.to_pretty_board());
            let mut move_made = false;
            while !move_made {
                println!("Your move. Enter command, 'h' for help.");
                let line = next_line(&mut stdin);
                let mut tokens = line.split_whitespace();
                move_made = match tokens.next() {
                    Some("h") | None => {
                        print_help();
                        false
                    }
                    Some("p") => {
                        println!("{}", pos.to_pretty_board());
                        false
                    }
                    Some("q") => exit(0),
                    Some("m") => command_make_move(&mut tokens, &mut pos),
                    Some(_) => {
                        print_help();
                        false
                    }
                };
            }
        } else {
            println!("Thinking...");
            let valid = pos.legal_moves().collect::<Vec<Idx>>();
            let mut searcher = Searcher::new(pos, EXPLORATION, SmallRng::from_entropy());
            let res = searcher.decide(ENGINE_BUDGET, &valid);
            pos.make_move(res.best_move);
            println!(
                "Your opponent played {} {} ({} rollouts)",
                res.best_move / 9,
                res.best_move % 9,
                res.rollouts
            );
            println!();
        }
    }
}
