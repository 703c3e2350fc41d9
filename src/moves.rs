use std::collections::BTreeSet;
use crate::board::{Board, Color, Move, Piece, PieceType, Square};

const STRAIGHT: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1), (1, 2), (-1, 2), (-2, 1),
    (-2, -1), (-1, -2), (1, -2), (2, -1)
];
const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1)
];

fn move_by_vector(board: &Board, vec: &(i8, i8), from: Square, current_color: &Color) -> Vec<Square> {
    let mut result: Vec<Square> = Vec::new();
    let mut next = from.offset(vec.0, vec.1);
    while let Some(square) = next {
        match board.piece_at(square) {
            None => result.push(square),
            Some(piece) => {
                if piece.color != *current_color {
                    result.push(square);
                }
                break
            }
        }
        next = square.offset(vec.0, vec.1);
    }
    result
}

fn slide(board: &Board, directions: &[(i8, i8)], from: Square, current_color: &Color) -> Vec<Square> {
    directions.iter()
        .flat_map(|vec| move_by_vector(board, vec, from, current_color))
        .collect()
}

fn step(board: &Board, offsets: &[(i8, i8)], from: Square, current_color: &Color) -> Vec<Square> {
    offsets.iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&square| board.piece_at(square).map_or(true, |p| p.color != *current_color))
        .collect()
}

fn pawn_moves(board: &Board, from: Square, pawn: &Piece) -> Vec<Square> {
    let forward = pawn.color.forward();
    let mut result: Vec<Square> = Vec::new();

    if let Some(one) = from.offset(forward, 0).filter(|&s| board.piece_at(s).is_none()) {
        result.push(one);
        if !pawn.has_moved {
            if let Some(two) = one.offset(forward, 0).filter(|&s| board.piece_at(s).is_none()) {
                result.push(two);
            }
        }
    }

    let captures = [-1, 1].iter()
        .filter_map(|&d_col| from.offset(forward, d_col))
        .filter(|&s| board.piece_at(s).is_some_and(|p| p.color != pawn.color));
    result.extend(captures);
    result
}

pub fn legal_moves(board: &Board, square: Square) -> BTreeSet<Square> {
    let piece = match board.piece_at(square) {
        None => return BTreeSet::new(),
        Some(p) => p,
    };
    let moves = match piece.kind {
        PieceType::King => step(board, &KING_STEPS, square, &piece.color),
        PieceType::Queen => [slide(board, &STRAIGHT, square, &piece.color), slide(board, &DIAGONAL, square, &piece.color)].concat(),
        PieceType::Rook => slide(board, &STRAIGHT, square, &piece.color),
        PieceType::Bishop => slide(board, &DIAGONAL, square, &piece.color),
        PieceType::Knight => step(board, &KNIGHT_JUMPS, square, &piece.color),
        PieceType::Pawn => pawn_moves(board, square, &piece),
    };
    moves.into_iter().collect()
}

pub fn all_legal_moves(board: &Board, color: Color) -> BTreeSet<Move> {
    board.pieces(color)
        .flat_map(|(from, _)| legal_moves(board, from).into_iter().map(move |to| Move::new(from, to)))
        .collect()
}
