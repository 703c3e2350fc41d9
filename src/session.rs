use rand::Rng;
use crate::agent::choose_move;
use crate::board::{new_board, Board, Color, Move, Square};
use crate::board::Color::{Black, White};
use crate::selection::{ClickResult, Selection};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GameMode {
    ZeroPlayer,
    OnePlayer,
    TwoPlayer,
}

impl GameMode {
    pub fn from_players(players: u8) -> Option<GameMode> {
        match players {
            0 => Some(GameMode::ZeroPlayer),
            1 => Some(GameMode::OnePlayer),
            2 => Some(GameMode::TwoPlayer),
            _ => None,
        }
    }

    pub fn is_automated(&self, color: Color) -> bool {
        match self {
            GameMode::ZeroPlayer => true,
            GameMode::OnePlayer => color == Black,
            GameMode::TwoPlayer => false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Outcome {
    InProgress,
    Win(Color),
    // The side to move had nothing to play. Nobody wins.
    NoLegalMove,
    // A headless game hit its ply cap and was abandoned.
    Unfinished,
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Win(color) => Some(*color),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Win(White) => 1,
            Outcome::Win(Black) => 2,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    selection: Selection,
    mode: GameMode,
    game_over: bool,
    plies: u32,
}

impl GameSession {
    pub fn new(mode: GameMode) -> Self {
        GameSession::from_board(new_board(), mode)
    }

    pub fn from_board(board: Board, mode: GameMode) -> Self {
        let mut session = GameSession { board, selection: Selection::Idle, mode, game_over: false, plies: 0 };
        session.update();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn plies(&self) -> u32 {
        self.plies
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn accepts_input(&self) -> bool {
        !self.game_over && !self.mode.is_automated(self.board.side_to_move())
    }

    pub fn select(&mut self, square: Square) -> ClickResult {
        if !self.accepts_input() {
            log::debug!("Ignoring input {} in {:?}, game over: {}", square, self.mode, self.game_over);
            return ClickResult::Ignored;
        }
        let result = self.selection.click(&mut self.board, square);
        if let ClickResult::Moved(mv) = result {
            log::debug!("{} played {}", self.board.side_to_move().opposite(), mv);
            self.plies += 1;
            self.update();
        }
        result
    }

    pub fn select_coords(&mut self, row: usize, col: usize) -> ClickResult {
        match Square::new(row, col) {
            Some(square) => self.select(square),
            None if self.accepts_input() && self.selection.selected_square().is_some() => {
                self.selection.clear();
                ClickResult::Deselected
            }
            None => ClickResult::Ignored,
        }
    }

    pub fn is_automated_turn(&self) -> bool {
        !self.game_over && self.mode.is_automated(self.board.side_to_move())
    }

    pub fn play_automated_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Move> {
        if !self.is_automated_turn() {
            return None;
        }
        let color = self.board.side_to_move();
        match choose_move(&self.board, color, rng) {
            None => {
                log::info!("{} has no possible moves, game over", color);
                self.game_over = true;
                None
            }
            Some(mv) => {
                self.board.move_piece(mv.from, mv.to);
                self.selection.clear();
                self.plies += 1;
                log::debug!("AI ({}) played {}", color, mv);
                self.update();
                Some(mv)
            }
        }
    }

    pub fn play_out<R: Rng + ?Sized>(&mut self, rng: &mut R, max_plies: u32) -> Outcome {
        while self.is_automated_turn() {
            if self.plies >= max_plies {
                log::debug!("Giving up after {} plies", self.plies);
                return Outcome::Unfinished;
            }
            self.play_automated_turn(rng);
        }
        self.outcome()
    }

    // Ends the game on a captured king, or when the side to move is stuck.
    // Returns whether the game is over.
    pub fn update(&mut self) -> bool {
        if self.game_over {
            return true;
        }
        let color = self.board.side_to_move();
        if let Some(winner) = self.board.terminal_state() {
            log::info!("{} wins after {} plies", winner, self.plies);
            self.game_over = true;
        } else if self.board.all_legal_moves(color).is_empty() {
            log::info!("{} has no possible moves, game over", color);
            self.game_over = true;
        }
        if self.game_over {
            self.selection.clear();
        }
        self.game_over
    }

    pub fn winning_color(&self) -> Option<Color> {
        self.board.terminal_state()
    }

    pub fn outcome(&self) -> Outcome {
        match self.board.terminal_state() {
            Some(winner) => Outcome::Win(winner),
            None if self.game_over => Outcome::NoLegalMove,
            None => Outcome::InProgress,
        }
    }
}

pub fn play_headless<R: Rng + ?Sized>(rng: &mut R, max_plies: u32) -> Outcome {
    GameSession::new(GameMode::ZeroPlayer).play_out(rng, max_plies)
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::board::{Board, Piece, PieceType, Square};
    use crate::board::Color::{Black, White};
    use crate::selection::ClickResult;
    use crate::session::{play_headless, GameMode, GameSession, Outcome};

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    fn kings_and_stuck_black_pawn() -> Board {
        let mut board = Board::empty(Black);
        board.place(sq(7, 7), Piece::new(White, PieceType::King));
        board.place(sq(0, 0), Piece::new(Black, PieceType::King));
        board.place(sq(7, 3), Piece::new(Black, PieceType::Pawn));
        board
    }

    #[test]
    fn test_game_modes() {
        assert_eq!(GameMode::from_players(0), Some(GameMode::ZeroPlayer));
        assert_eq!(GameMode::from_players(2), Some(GameMode::TwoPlayer));
        assert_eq!(GameMode::from_players(3), None);
        assert!(GameMode::OnePlayer.is_automated(Black));
        assert!(!GameMode::OnePlayer.is_automated(White));
        assert!(!GameMode::TwoPlayer.is_automated(Black));
        assert!(GameMode::ZeroPlayer.is_automated(White));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Win(White).exit_code(), 1);
        assert_eq!(Outcome::Win(Black).exit_code(), 2);
        assert_eq!(Outcome::NoLegalMove.exit_code(), 0);
        assert_eq!(Outcome::NoLegalMove.winner(), None);
        assert_eq!(Outcome::Win(Black).winner(), Some(Black));
    }

    #[test]
    fn test_agent_without_moves_ends_game() {
        let mut board = Board::empty(Black);
        board.place(sq(7, 7), Piece::new(Black, PieceType::King));
        for pawn in [sq(6, 6), sq(6, 7), sq(7, 6)] {
            board.place(pawn, Piece::new(Black, PieceType::Pawn));
        }
        board.place(sq(0, 0), Piece::new(White, PieceType::King));

        let mut session = GameSession::from_board(board, GameMode::OnePlayer);
        assert!(session.board().all_legal_moves(Black).is_empty());
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(session.play_automated_turn(&mut rng), None);
        assert!(session.is_game_over());
        assert_eq!(session.outcome(), Outcome::NoLegalMove);
        assert_eq!(session.winning_color(), None);
        assert_eq!(session.select(sq(0, 0)), ClickResult::Ignored);
    }

    #[test]
    fn test_human_without_moves_ends_game() {
        let mut board = Board::empty(White);
        board.place(sq(0, 7), Piece::new(White, PieceType::King));
        for pawn in [sq(0, 6), sq(1, 6), sq(1, 7)] {
            board.place(pawn, Piece::new(White, PieceType::Pawn));
        }
        board.place(sq(7, 0), Piece::new(Black, PieceType::King));

        for mode in [GameMode::OnePlayer, GameMode::TwoPlayer] {
            let mut session = GameSession::from_board(board.clone(), mode);
            assert!(session.is_game_over());
            assert_eq!(session.outcome(), Outcome::NoLegalMove);
            assert_eq!(session.select(sq(0, 7)), ClickResult::Ignored);
            assert!(!session.is_automated_turn());
        }
    }

    #[test]
    fn test_stuck_after_human_move() {
        let mut board = Board::empty(White);
        board.place(sq(7, 7), Piece::new(Black, PieceType::King));
        for pawn in [sq(6, 6), sq(6, 7), sq(7, 6)] {
            board.place(pawn, Piece::new(Black, PieceType::Pawn));
        }
        board.place(sq(3, 0), Piece::new(Black, PieceType::Pawn));
        board.place(sq(3, 4), Piece::new(White, PieceType::Rook));
        board.place(sq(0, 0), Piece::new(White, PieceType::King));
        let mut session = GameSession::from_board(board, GameMode::TwoPlayer);
        assert!(!session.is_game_over());

        session.select(sq(3, 4));
        assert!(matches!(session.select(sq(3, 0)), ClickResult::Moved(_)));
        assert!(session.board().all_legal_moves(Black).is_empty());
        assert!(session.is_game_over());
        assert_eq!(session.outcome(), Outcome::NoLegalMove);
        assert_eq!(session.winning_color(), None);
    }

    #[test]
    fn test_king_capture_by_human() {
        let mut board = Board::empty(White);
        board.place(sq(4, 4), Piece::new(White, PieceType::Queen));
        board.place(sq(7, 7), Piece::new(White, PieceType::King));
        board.place(sq(0, 4), Piece::new(Black, PieceType::King));
        let mut session = GameSession::from_board(board, GameMode::TwoPlayer);
        assert_eq!(session.select(sq(4, 4)), ClickResult::Selected(sq(4, 4)));
        assert!(matches!(session.select(sq(0, 4)), ClickResult::Moved(_)));
        assert!(session.is_game_over());
        assert_eq!(session.winning_color(), Some(White));
        assert_eq!(session.outcome(), Outcome::Win(White));
        assert_eq!(session.select(sq(7, 7)), ClickResult::Ignored);
    }

    #[test]
    fn test_one_player_turns() {
        let mut session = GameSession::new(GameMode::OnePlayer);
        let mut rng = StdRng::seed_from_u64(11);
        assert!(!session.is_automated_turn());
        assert_eq!(session.play_automated_turn(&mut rng), None);

        session.select(sq(6, 4));
        assert!(matches!(session.select(sq(4, 4)), ClickResult::Moved(_)));
        assert!(session.is_automated_turn());
        assert_eq!(session.select(sq(1, 0)), ClickResult::Ignored);

        let reply = session.play_automated_turn(&mut rng).unwrap();
        assert_eq!(session.board().piece_at(reply.to).map(|p| p.color), Some(Black));
        assert_eq!(session.board().side_to_move(), White);
        assert_eq!(session.plies(), 2);
    }

    #[test]
    fn test_play_out_stops_for_humans() {
        let mut session = GameSession::new(GameMode::OnePlayer);
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(session.play_out(&mut rng, 100), Outcome::InProgress);
        assert_eq!(session.plies(), 0);

        session.select(sq(7, 1));
        session.select(sq(5, 2));
        assert_eq!(session.play_out(&mut rng, 100), Outcome::InProgress);
        assert_eq!(session.plies(), 2);
        assert_eq!(session.board().side_to_move(), White);
    }

    #[test]
    fn test_select_off_board() {
        let mut session = GameSession::new(GameMode::TwoPlayer);
        assert_eq!(session.select_coords(9, 9), ClickResult::Ignored);
        session.select_coords(6, 0);
        assert_eq!(session.select_coords(3, 42), ClickResult::Deselected);
        assert_eq!(session.selection().selected_square(), None);
    }

    #[test]
    fn test_finished_board_is_game_over() {
        let mut board = kings_and_stuck_black_pawn();
        board.remove(sq(0, 0));
        let session = GameSession::from_board(board, GameMode::ZeroPlayer);
        assert!(session.is_game_over());
        assert_eq!(session.outcome(), Outcome::Win(White));
    }

    #[test]
    fn test_play_headless() {
        let mut rng = StdRng::seed_from_u64(2024);
        let outcome = play_headless(&mut rng, 5000);
        assert!(matches!(outcome, Outcome::Win(_) | Outcome::NoLegalMove | Outcome::Unfinished));

        let again = play_headless(&mut StdRng::seed_from_u64(2024), 5000);
        assert_eq!(outcome, again);

        assert_eq!(play_headless(&mut rng, 0), Outcome::Unfinished);
    }
}
