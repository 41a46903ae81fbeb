use bitintr::*;

/*
Define block to be each 3x3 local board. Idxing is done
block-by-block, row-major from top-left. E.g. index 7 is the
seventh cell of the top-left block:

0  1  2  | 9  10 11 |
3  4  5  | 12 13 14 | ...
6  7  8  | 15 16 17 |
==========================
...      |   ...    | ...
*/
pub type B33 = u16;
pub type Idx = u16;
pub const BOARD_SIZE: Idx = 81;

const ANY_BLOCK: u8 = 9;
const BLOCK_OCC: B33 = 0b111111111;

// 3 rows, 3 columns, 2 diagonals of a 3x3 grid
static WIN_LINES: [B33; 8] = [
    0b000000111,
    0b000111000,
    0b111000000,
    0b001001001,
    0b010010010,
    0b100100100,
    0b100010001,
    0b001010100,
];

// true if the occupancy covers at least one full line
fn has_line(occ: B33) -> bool {
    debug_assert_eq!(occ & !BLOCK_OCC, 0);
    WIN_LINES.iter().any(|&line| occ & line == line)
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Side {
    X = 0,
    O = 1,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Self::O => Self::X,
            Self::X => Self::O,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GameResult {
    Ongoing,
    XWon,
    OWon,
    Draw,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BlockStatus {
    Ongoing,
    Won(Side),
    Drawn,
}

// convert row-major 9x9 coordinates to block-major indexing
pub fn to_index(row: u8, col: u8) -> Idx {
    let block = (row / 3) * 3 + col / 3;
    let cell = (row % 3) * 3 + col % 3;
    block as Idx * 9 + cell as Idx
}

pub fn to_row_col(index: Idx) -> (u8, u8) {
    let block = (index / 9) as u8;
    let cell = (index % 9) as u8;
    ((block / 3) * 3 + cell / 3, (block % 3) * 3 + cell % 3)
}

/// Set of board cells, used both for legal-move enumeration and for
/// the untried-move bookkeeping of the search tree. Iterates in
/// ascending index order.
#[derive(Copy, Clone)]
pub struct Moves {
    occupancy: [u64; 2],
}

impl Moves {
    fn new() -> Moves {
        Moves { occupancy: [0; 2] }
    }

    fn add(&mut self, index: Idx) {
        self.occupancy[index as usize / 64] |= 1u64 << (index % 64);
    }

    pub fn remove(&mut self, index: Idx) {
        self.occupancy[index as usize / 64] &= !(1u64 << (index % 64));
    }

    pub fn contains(&self, index: Idx) -> bool {
        self.occupancy[index as usize / 64] & (1u64 << (index % 64)) != 0
    }

    pub fn size(&self) -> u32 {
        self.occupancy[0].count_ones() + self.occupancy[1].count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy[0] == 0 && self.occupancy[1] == 0
    }

    // n-th member in ascending order; n must be < size()
    pub fn nth(&self, n: u32) -> Idx {
        let low = self.occupancy[0].count_ones();
        if n < low {
            nth_bit(self.occupancy[0], n)
        } else {
            64 + nth_bit(self.occupancy[1], n - low)
        }
    }
}

fn nth_bit(mut occ: u64, n: u32) -> Idx {
    debug_assert!(occ.count_ones() > n);
    for _ in 0..n {
        occ = occ.blsr();
    }
    occ.tzcnt() as Idx
}

impl Iterator for Moves {
    type Item = Idx;

    fn next(&mut self) -> Option<Self::Item> {
        let w = (self.occupancy[0] == 0) as usize;
        let occ = self.occupancy[w];
        if occ == 0 {
            None
        } else {
            let i = occ.tzcnt() as Idx;
            self.occupancy[w] &= !(1u64 << i);
            Some(w as Idx * 64 + i)
        }
    }
}

/*
Per block: lower 9 bits X occupancy, next 9 bits O occupancy.
Block results are tracked in 9-bit masks alongside, so status
checks stay single mask operations.
*/
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Position {
    blocks: [u32; 9],
    won: [B33; 2],  // blocks won per side
    closed: B33,    // blocks won by either side or drawn
    last_cell: u8,  // in-block cell index of the previous move
    to_move: Side,
    result: GameResult,
}

impl Position {
    pub fn new() -> Position {
        Position {
            blocks: [0; 9],
            won: [0; 2],
            closed: 0,
            last_cell: ANY_BLOCK,
            to_move: Side::X,
            result: GameResult::Ongoing,
        }
    }

    pub fn side_to_move(&self) -> Side {
        self.to_move
    }

    pub fn get_result(&self) -> GameResult {
        self.result
    }

    #[inline(always)]
    pub fn is_over(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    // +1 X won, -1 O won, 0 drawn. Must not be called while ongoing.
    pub fn outcome(&self) -> i32 {
        match self.result {
            GameResult::XWon => 1,
            GameResult::OWon => -1,
            GameResult::Draw => 0,
            GameResult::Ongoing => panic!("outcome() called on an ongoing game"),
        }
    }

    pub fn cell(&self, index: Idx) -> Option<Side> {
        let block_i = (index / 9) as u8;
        let cell_i = index % 9;
        if self.side_occ(Side::X, block_i) & (1 << cell_i) != 0 {
            Some(Side::X)
        } else if self.side_occ(Side::O, block_i) & (1 << cell_i) != 0 {
            Some(Side::O)
        } else {
            None
        }
    }

    pub fn block_status(&self, block_i: u8) -> BlockStatus {
        if self.won[Side::X as usize] & (1 << block_i) != 0 {
            BlockStatus::Won(Side::X)
        } else if self.won[Side::O as usize] & (1 << block_i) != 0 {
            BlockStatus::Won(Side::O)
        } else if self.closed & (1 << block_i) != 0 {
            BlockStatus::Drawn
        } else {
            BlockStatus::Ongoing
        }
    }

    // block the next move is constrained to, if any. A closed or full
    // target block voids the constraint.
    pub fn forced_block(&self) -> Option<u8> {
        if self.last_cell == ANY_BLOCK {
            return None;
        }
        let block_i = self.last_cell;
        if self.closed & (1 << block_i) != 0 || self.is_block_full(block_i) {
            None
        } else {
            Some(block_i)
        }
    }

    // empty iff the game is over
    pub fn legal_moves(&self) -> Moves {
        let mut moves = Moves::new();
        if self.is_over() {
            return moves;
        }
        match self.forced_block() {
            Some(block_i) => self.add_block_moves(block_i, &mut moves),
            None => {
                // anywhere that is still being played for
                let mut blocks: B33 = !self.closed & BLOCK_OCC;
                while blocks != 0 {
                    self.add_block_moves(blocks.tzcnt() as u8, &mut moves);
                    blocks = blocks.blsr();
                }
            }
        }
        moves
    }

    fn add_block_moves(&self, block_i: u8, moves: &mut Moves) {
        let mut empty: B33 = !self.both_occ(block_i) & BLOCK_OCC;
        let offset = block_i as Idx * 9;
        while empty != 0 {
            moves.add(empty.tzcnt() as Idx + offset);
            empty = empty.blsr();
        }
    }

    /// Applies a move for the side to move. The index must be a member
    /// of `legal_moves()`; this is not validated in release builds.
    pub fn make_move(&mut self, index: Idx) {
        debug_assert!(index < BOARD_SIZE);
        debug_assert!(self.legal_moves().contains(index));
        let block_i = (index / 9) as u8;
        let cell_i = (index % 9) as u8;
        let mover = self.to_move;

        // place piece
        self.blocks[block_i as usize] |= 1u32 << (cell_i as u32 + 9 * mover as u32);

        // block result is write-once
        if self.closed & (1 << block_i) == 0 {
            if has_line(self.side_occ(mover, block_i)) {
                self.won[mover as usize] |= 1 << block_i;
                self.closed |= 1 << block_i;
            } else if self.is_block_full(block_i) {
                self.closed |= 1 << block_i;
            }
        }

        // so is the game result
        if self.result == GameResult::Ongoing {
            self.result = meta_result(
                self.won[Side::X as usize],
                self.won[Side::O as usize],
                self.closed,
            );
        }

        self.last_cell = cell_i;
        self.to_move = mover.other();
    }

    fn side_occ(&self, side: Side, block_i: u8) -> B33 {
        ((self.blocks[block_i as usize] >> (9 * side as u32)) as B33) & BLOCK_OCC
    }

    #[inline(always)]
    fn both_occ(&self, block_i: u8) -> B33 {
        self.side_occ(Side::X, block_i) | self.side_occ(Side::O, block_i)
    }

    #[inline(always)]
    fn is_block_full(&self, block_i: u8) -> bool {
        self.both_occ(block_i) == BLOCK_OCC
    }
}

// Decide the game from the meta board: won-block masks are the meta
// occupancies. With no line and every block closed, the side holding
// more blocks wins; only an equal count is a draw.
fn meta_result(won_x: B33, won_o: B33, closed: B33) -> GameResult {
    use std::cmp::Ordering;
    if has_line(won_x) {
        GameResult::XWon
    } else if has_line(won_o) {
        GameResult::OWon
    } else if closed == BLOCK_OCC {
        match won_x.count_ones().cmp(&won_o.count_ones()) {
            Ordering::Greater => GameResult::XWon,
            Ordering::Less => GameResult::OWon,
            Ordering::Equal => GameResult::Draw,
        }
    } else {
        GameResult::Ongoing
    }
}

pub fn perft(depth: u16, pos: &Position) -> u64 {
    if depth == 0 {
        return pos.legal_moves().size() as u64;
    }
    let mut count: u64 = 0;
    for mov in pos.legal_moves() {
        let mut temp = *pos;
        temp.make_move(mov);
        count += perft(depth - 1, &temp);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_masks() {
        assert!(has_line(0b000000111));
        assert!(has_line(0b100010001));
        assert!(has_line(0b111101011));
        assert!(!has_line(0b000000000));
        assert!(!has_line(0b010101010));
        assert!(!has_line(0b011011000));
    }

    #[test]
    fn meta_line_beats_block_count() {
        // X holds a row, O holds more blocks: the line decides
        assert_eq!(meta_result(0b000000111, 0b101011000, BLOCK_OCC), GameResult::XWon);
    }

    #[test]
    fn full_meta_majority_tiebreak() {
        // no line anywhere; 4 blocks vs 3 with 2 drawn
        assert_eq!(meta_result(0b100101010, 0b010000101, BLOCK_OCC), GameResult::XWon);
        assert_eq!(meta_result(0b010000101, 0b100101010, BLOCK_OCC), GameResult::OWon);
    }

    #[test]
    fn full_meta_equal_blocks_is_draw() {
        // 3 blocks each, 3 drawn, no line
        assert_eq!(meta_result(0b000100011, 0b010001100, BLOCK_OCC), GameResult::Draw);
    }

    #[test]
    fn open_meta_is_ongoing() {
        assert_eq!(meta_result(0b000000011, 0b000001100, 0b000001111), GameResult::Ongoing);
    }

    #[test]
    fn index_conversions() {
        assert_eq!(to_index(0, 0), 0);
        assert_eq!(to_index(2, 2), 8);
        assert_eq!(to_index(0, 3), 9);
        assert_eq!(to_index(4, 4), 40);
        assert_eq!(to_index(8, 8), 80);
        for index in 0..BOARD_SIZE {
            let (row, col) = to_row_col(index);
            assert_eq!(to_index(row, col), index);
        }
    }

    #[test]
    fn moves_bitset_order_and_nth() {
        let mut moves = Moves::new();
        for &index in &[5u16, 63, 64, 80, 0] {
            moves.add(index);
        }
        assert_eq!(moves.size(), 5);
        assert!(moves.contains(63));
        assert!(!moves.contains(1));
        assert_eq!(moves.nth(0), 0);
        assert_eq!(moves.nth(2), 63);
        assert_eq!(moves.nth(4), 80);
        assert_eq!(moves.collect::<Vec<Idx>>(), vec![0, 5, 63, 64, 80]);

        moves.remove(63);
        assert!(!moves.contains(63));
        assert_eq!(moves.size(), 4);
    }

    #[test]
    fn first_move_enumerates_all_cells() {
        let pos = Position::new();
        assert_eq!(pos.legal_moves().size(), 81);
        assert_eq!(pos.forced_block(), None);
    }
}
