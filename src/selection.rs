use std::collections::BTreeSet;
use crate::board::{Board, Move, Square};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected { square: Square, moves: BTreeSet<Square> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickResult {
    Selected(Square),
    Moved(Move),
    Deselected,
    Ignored,
}

impl Selection {
    pub fn selected_square(&self) -> Option<Square> {
        match self {
            Selection::Idle => None,
            Selection::Selected { square, .. } => Some(*square),
        }
    }

    pub fn possible_moves(&self) -> BTreeSet<Square> {
        match self {
            Selection::Idle => BTreeSet::new(),
            Selection::Selected { moves, .. } => moves.clone(),
        }
    }

    pub fn clear(&mut self) {
        *self = Selection::Idle;
    }

    pub fn click(&mut self, board: &mut Board, target: Square) -> ClickResult {
        let previous = std::mem::take(self);
        if let Selection::Selected { square, moves } = previous {
            if moves.contains(&target) {
                board.move_piece(square, target);
                return ClickResult::Moved(Move::new(square, target));
            }
            return match self.try_select(board, target) {
                Some(result) => result,
                None => ClickResult::Deselected,
            };
        }
        self.try_select(board, target).unwrap_or(ClickResult::Ignored)
    }

    fn try_select(&mut self, board: &Board, target: Square) -> Option<ClickResult> {
        let piece = board.piece_at(target)?;
        if piece.color != board.side_to_move() {
            return None;
        }
        *self = Selection::Selected { square: target, moves: board.legal_destinations(target) };
        Some(ClickResult::Selected(target))
    }
}
