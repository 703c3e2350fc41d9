use rand::Rng;
use rand::seq::IteratorRandom;
use crate::board::{Board, Color, Move};

pub fn choose_move<R: Rng + ?Sized>(board: &Board, color: Color, rng: &mut R) -> Option<Move> {
    let moves = board.all_legal_moves(color);
    log::trace!("{} has {} legal moves", color, moves.len());
    moves.into_iter().choose(rng)
}
