use std::collections::BTreeSet;
use std::fmt;
use serde::{Serialize, Serializer};
use crate::board::Color::{Black, White};
use crate::moves::{all_legal_moves, legal_moves};

pub const WIDTH: usize = 8;
pub const HEIGHT: usize = 8;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Color {
    White, Black
}

impl Color {
    pub fn opposite(&self) -> Color {
        if self == &Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn forward(&self) -> i8 {
        match self {
            White => -1,
            Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            White => write!(f, "white"),
            Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceType) -> Self {
        Piece { color, kind, has_moved: false }
    }

    fn icon(&self) -> char {
        let icon = match self.kind {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Rook => 'r',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Pawn => 'p',
        };
        if self.color == White { icon.to_ascii_uppercase() } else { icon }
    }

    #[cfg(test)]
    fn from_icon(icon: char) -> Option<Piece> {
        let color = if icon.is_ascii_uppercase() { White } else { Black };
        let kind = match icon.to_ascii_lowercase() {
            'k' => PieceType::King,
            'q' => PieceType::Queen,
            'r' => PieceType::Rook,
            'b' => PieceType::Bishop,
            'n' => PieceType::Knight,
            'p' => PieceType::Pawn,
            _ => return None,
        };
        Some(Piece::new(color, kind))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: usize,
    col: usize,
}

impl Square {
    pub fn new(row: usize, col: usize) -> Option<Square> {
        (row < HEIGHT && col < WIDTH).then_some(Square { row, col })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if row < 0 || col < 0 {
            return None;
        }
        Square::new(row as usize, col as usize)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..HEIGHT).flat_map(|row| (0..WIDTH).map(move |col| Square { row, col }))
    }

    fn index(&self) -> usize {
        self.row * WIDTH + self.col
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        (self.row, self.col).serialize(serializer)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; WIDTH * HEIGHT],
    side_to_move: Color,
}

impl Board {
    pub fn empty(side_to_move: Color) -> Board {
        Board { squares: [None; WIDTH * HEIGHT], side_to_move }
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    pub fn piece_at_coords(&self, row: usize, col: usize) -> Option<Piece> {
        Square::new(row, col).and_then(|square| self.piece_at(square))
    }

    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.squares[square.index()].replace(piece)
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    // Moves whatever stands on `from` to `to`, capturing any occupant. Does
    // not check legality. Returns false only when `from` is empty.
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        let mut piece = match self.squares[from.index()].take() {
            None => return false,
            Some(p) => p,
        };
        piece.has_moved = true;
        if let Some(captured) = self.squares[to.index()].replace(piece) {
            log::debug!("{:?} {:?} captured on {}", captured.color, captured.kind, to);
        }
        self.side_to_move = self.side_to_move.opposite();
        true
    }

    pub fn legal_destinations(&self, square: Square) -> BTreeSet<Square> {
        legal_moves(self, square)
    }

    pub fn all_legal_moves(&self, color: Color) -> BTreeSet<Move> {
        all_legal_moves(self, color)
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all()
            .filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
            .filter(move |(_, piece)| piece.color == color)
    }

    // The winner once a king has been captured, `None` while both kings stand.
    pub fn terminal_state(&self) -> Option<Color> {
        let king_alive = |color: Color| self.squares.iter()
            .flatten()
            .any(|p| p.kind == PieceType::King && p.color == color);
        if !king_alive(White) {
            Some(Black)
        }
        else if !king_alive(Black) {
            Some(White)
        }
        else {
            None
        }
    }
}

pub fn to_string(board: &Board) -> String {
    let mut result: String = String::new();
    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            let icon = match board.piece_at_coords(row, col) {
                None => ' ',
                Some(p) => p.icon(),
            };
            result.push(icon);
        }
        result.push('\n');
    }
    let r = &result[0..result.len()-1];
    r.to_string()
}

#[cfg(test)]
pub fn from_string(text: &str, side_to_move: Color) -> Option<Board> {
    let rows: Vec<&str> = text.split('\n').collect();
    if rows.len() != HEIGHT {
        return None;
    }
    let mut board = Board::empty(side_to_move);
    for (row, line) in rows.iter().enumerate() {
        let icons: Vec<char> = line.chars().collect();
        if icons.len() != WIDTH {
            return None;
        }
        for (col, &icon) in icons.iter().enumerate() {
            if icon == ' ' {
                continue;
            }
            let mut piece = Piece::from_icon(icon)?;
            if piece.kind == PieceType::Pawn {
                piece.has_moved = row != pawn_start_row(piece.color);
            }
            board.place(Square { row, col }, piece);
        }
    }
    Some(board)
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_str(to_string(self).as_str())
    }
}

pub fn pawn_start_row(color: Color) -> usize {
    match color {
        White => HEIGHT - 2,
        Black => 1,
    }
}

fn back_rank_row(color: Color) -> usize {
    match color {
        White => HEIGHT - 1,
        Black => 0,
    }
}

fn new_pieces(color: Color) -> [Piece; WIDTH] {
    [
        Piece::new(color, PieceType::Rook),
        Piece::new(color, PieceType::Knight),
        Piece::new(color, PieceType::Bishop),
        Piece::new(color, PieceType::Queen),
        Piece::new(color, PieceType::King),
        Piece::new(color, PieceType::Bishop),
        Piece::new(color, PieceType::Knight),
        Piece::new(color, PieceType::Rook)
    ]
}

pub fn new_board() -> Board {
    let mut board = Board::empty(White);
    for color in [White, Black] {
        for (col, piece) in new_pieces(color).into_iter().enumerate() {
            board.place(Square { row: back_rank_row(color), col }, piece);
            board.place(Square { row: pawn_start_row(color), col }, Piece::new(color, PieceType::Pawn));
        }
    }
    board
}
