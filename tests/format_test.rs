extern crate uttt_mcts;

use uttt_mcts::board::*;

#[test]
fn move_list_roundtrip_matches_incremental() {
    let replayed = Position::from_move_list("40, 36, 4, 39, 27");
    let mut pos = Position::new();
    for &mov in &[40, 36, 4, 39, 27] {
        assert!(pos.legal_moves().contains(mov));
        pos.make_move(mov);
    }
    assert_eq!(replayed, pos);
}

#[test]
fn pretty_board_marks_cells() {
    let pos = Position::from_move_list("40");
    let repr = pos.to_pretty_board();
    assert_eq!(repr.matches('X').count(), 1);
    assert_eq!(repr.matches('O').count(), 1); // only the footer
    assert!(repr.contains("O to move"));
    assert!(repr.contains("block 4"));
}
