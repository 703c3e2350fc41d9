use std::collections::BTreeSet;
use crate::board::{to_string, Color, Move, Square};
use crate::session::{GameMode, GameSession};

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MsgType {
    New, Select, Ping
}

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JsonMsg {
    pub msg_type: MsgType,
    pub players: Option<u8>,
    pub square: Option<(usize, usize)>,
}

#[derive(Debug, PartialEq, serde::Serialize)]
pub enum MsgTypeServer {
    Board,
    GameOver,
    Error,
}

#[derive(Debug, serde::Serialize)]
pub struct JsonMsgServer {
    pub msg_type: MsgTypeServer,
    pub board: Option<String>,
    pub side_to_move: Option<Color>,
    pub mode: Option<GameMode>,
    pub selected: Option<Square>,
    pub possible_moves: BTreeSet<Square>,
    pub last_move: Option<Move>,
    pub winner: Option<Color>,
    pub reason: Option<String>,
}

impl JsonMsgServer {
    fn empty(msg_type: MsgTypeServer) -> Self {
        JsonMsgServer {
            msg_type,
            board: None,
            side_to_move: None,
            mode: None,
            selected: None,
            possible_moves: BTreeSet::new(),
            last_move: None,
            winner: None,
            reason: None,
        }
    }

    pub fn board(session: &GameSession, last_move: Option<Move>) -> Self {
        JsonMsgServer {
            board: Some(to_string(session.board())),
            side_to_move: Some(session.board().side_to_move()),
            mode: Some(session.mode()),
            selected: session.selection().selected_square(),
            possible_moves: session.selection().possible_moves(),
            last_move,
            ..JsonMsgServer::empty(MsgTypeServer::Board)
        }
    }

    pub fn game_over(winner: Option<Color>) -> Self {
        JsonMsgServer { winner, ..JsonMsgServer::empty(MsgTypeServer::GameOver) }
    }

    pub fn error(reason: &str) -> Self {
        JsonMsgServer { reason: Some(reason.to_string()), ..JsonMsgServer::empty(MsgTypeServer::Error) }
    }
}
