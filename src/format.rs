/* For importing/exporting positions */

use crate::board::*;

impl Position {
    // comma separated list of move indices, replayed from the start
    pub fn from_move_list(repr: &str) -> Position {
        let mut pos = Position::new();
        for tok in repr.split(',') {
            let mov = tok.trim().parse::<Idx>().expect("could not parse move index");
            assert!(
                pos.legal_moves().contains(mov),
                "illegal move {} in move list",
                mov
            );
            pos.make_move(mov);
        }
        pos
    }

    pub fn to_pretty_board(&self) -> String {
        let mut out = String::new();
        for row in 0..9u8 {
            if row != 0 && row % 3 == 0 {
                out.push_str("----------------------\n");
            }
            for col in 0..9u8 {
                if col != 0 && col % 3 == 0 {
                    out.push_str(" |");
                }
                out.push(' ');
                out.push(match self.cell(to_index(row, col)) {
                    Some(Side::X) => 'X',
                    Some(Side::O) => 'O',
                    None => '.',
                });
            }
            out.push('\n');
        }
        let side = match self.side_to_move() {
            Side::X => 'X',
            Side::O => 'O',
        };
        let forced = match self.forced_block() {
            Some(block_i) => (b'0' + block_i) as char,
            None => '-',
        };
        out.push_str(&format!("{} to move, block {}\n", side, forced));
        out
    }
}
