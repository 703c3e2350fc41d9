use std::collections::HashMap;
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{current, sleep, spawn};
use std::time::Duration;
use rand::{random, Rng};
use tungstenite::{accept, Message, WebSocket};
use tungstenite::protocol::Role;
use crate::board::Move;
use crate::communication_protocol::{JsonMsg, JsonMsgServer, MsgType};
use crate::error::ChessError;
use crate::selection::ClickResult;
use crate::session::{GameMode, GameSession};

type SessionsType = HashMap<u32, GameSession>;
type ClientsType = HashMap<u32, WebSocket<TcpStream>>;

#[derive(Debug)]
pub enum ChannelMsg {
    NewConnection(u32, WebSocket<TcpStream>),
    Msg(u32, JsonMsg),
    Disconnect(u32),
    AiTick,
    ValueMonitor,
}

pub fn thread_timer(sender: Sender<ChannelMsg>, period: Duration, make: fn() -> ChannelMsg) {
    loop {
        if sender.send(make()).is_err() {
            log::debug!("Game thread gone, stopping timer");
            return;
        }
        sleep(period);
    }
}

pub fn thread_client_reader(client_id: u32, mut websocket: WebSocket<TcpStream>, sender: Sender<ChannelMsg>) {
    let thread_id = current().id();
    log::debug!("New client {}", client_id);
    loop {
        let msg = match websocket.read() {
            Ok(m) => m,
            Err(e) => {
                log::error!("Cannot read websocket, error: {}", e);
                let _ = sender.send(ChannelMsg::Disconnect(client_id));
                return;
            }
        };

        log::debug!("{:?} - Received: {:?}", thread_id, msg);
        let forwarded = match msg {
            Message::Text(m) => match serde_json::from_str::<JsonMsg>(&m) {
                Ok(decoded) => sender.send(ChannelMsg::Msg(client_id, decoded)),
                Err(e) => {
                    log::warn!("Cannot decode {:?}: {}", m, e);
                    Ok(())
                }
            },
            Message::Close(_) => {
                log::debug!("Closing websocket");
                let _ = sender.send(ChannelMsg::Disconnect(client_id));
                return;
            }
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => Ok(()),
        };
        if forwarded.is_err() {
            log::error!("Game thread gone, dropping client {}", client_id);
            return;
        }
    }
}

pub fn serve(listener: TcpListener, sender: Sender<ChannelMsg>) -> Result<(), ChessError> {
    for stream in listener.incoming() {
        let tcp_stream = match stream {
            Ok(s) => s,
            Err(e) => {
                log::error!("Cannot use tcp stream: {}", e);
                continue
            }
        };
        let tcp_stream_clone = match tcp_stream.try_clone() {
            Ok(s) => s,
            Err(e) => {
                log::error!("Cannot clone tcp stream: {}", e);
                continue
            }
        };
        let websocket = match accept(tcp_stream) {
            Ok(w) => w,
            Err(e) => {
                log::error!("Cannot create websocket: {}", e);
                continue
            }
        };
        let ws_clone = WebSocket::from_raw_socket(tcp_stream_clone, Role::Server, Some(websocket.get_config().clone()));
        let client_id: u32 = random();

        sender.send(ChannelMsg::NewConnection(client_id, ws_clone)).map_err(|_| ChessError::GameThreadGone)?;
        let reader_sender = sender.clone();
        spawn(move || thread_client_reader(client_id, websocket, reader_sender));
    }
    Ok(())
}

fn try_send(ws: &mut WebSocket<TcpStream>, msg: &JsonMsgServer) {
    let text = match serde_json::to_string(msg) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Cannot serialize {:?}: {}", msg.msg_type, e);
            return;
        }
    };
    match ws.send(Message::Text(text)) {
        Ok(_) => log::trace!("Msg sent"),
        Err(e) => log::error!("Cannot send message, error: {}", e)
    }
}

fn send_session(ws: &mut WebSocket<TcpStream>, session: &GameSession, last_move: Option<Move>) {
    try_send(ws, &JsonMsgServer::board(session, last_move));
    if session.is_game_over() {
        try_send(ws, &JsonMsgServer::game_over(session.winning_color()));
    }
}

// Owns every session. Each connected client plays its own game; automated
// sides move one ply per `AiTick`.
pub fn handle_game<R: Rng>(receiver: Receiver<ChannelMsg>, mut rng: R) {
    let mut sessions: SessionsType = HashMap::new();
    let mut clients: ClientsType = HashMap::new();

    for msg in receiver {
        match msg {
            ChannelMsg::NewConnection(client_id, websocket) => {
                clients.insert(client_id, websocket);
            }

            ChannelMsg::Msg(client_id, decoded) => {
                let ws = match clients.get_mut(&client_id) {
                    None => {
                        log::warn!("Message from unknown client {}", client_id);
                        continue;
                    }
                    Some(ws) => ws,
                };
                handle_client_msg(&mut sessions, client_id, ws, decoded);
            }

            ChannelMsg::AiTick => {
                for (client_id, session) in sessions.iter_mut().filter(|(_, s)| s.is_automated_turn()) {
                    let last_move = session.play_automated_turn(&mut rng);
                    match clients.get_mut(client_id) {
                        None => log::warn!("Session {} has no client", client_id),
                        Some(ws) => send_session(ws, session, last_move),
                    }
                }
            }

            ChannelMsg::Disconnect(client_id) => {
                log::debug!("Removing client {}", client_id);
                clients.remove(&client_id);
                sessions.remove(&client_id);
            }

            ChannelMsg::ValueMonitor => {
                log::info!("Clients: {}", clients.len());
                log::info!("Sessions: {}", sessions.len());
                for (client_id, session) in &sessions {
                    log::info!("({} - {:?}, {} plies, {:?})", client_id, session.mode(), session.plies(), session.outcome());
                }
            }
        }
    }
    log::info!("Channel closed, game thread exiting");
}

fn handle_client_msg(sessions: &mut SessionsType, client_id: u32, ws: &mut WebSocket<TcpStream>, decoded: JsonMsg) {
    match decoded.msg_type {
        MsgType::New => {
            let mode = match decoded.players.and_then(GameMode::from_players) {
                None => {
                    log::warn!("Invalid player count {:?} from {}", decoded.players, client_id);
                    try_send(ws, &JsonMsgServer::error("players must be 0, 1 or 2"));
                    return;
                }
                Some(m) => m,
            };
            log::debug!("Client {} starts a {:?} game", client_id, mode);
            let session = GameSession::new(mode);
            send_session(ws, &session, None);
            sessions.insert(client_id, session);
        }
        MsgType::Select => {
            let (session, (row, col)) = match (sessions.get_mut(&client_id), decoded.square) {
                (Some(s), Some(square)) => (s, square),
                (None, _) => {
                    try_send(ws, &JsonMsgServer::error("no game started"));
                    return;
                }
                (Some(_), None) => {
                    log::warn!("Select without square from {}", client_id);
                    return;
                }
            };
            let last_move = match session.select_coords(row, col) {
                ClickResult::Moved(mv) => Some(mv),
                ClickResult::Ignored => return,
                ClickResult::Selected(_) | ClickResult::Deselected => None,
            };
            send_session(ws, session, last_move);
        }
        MsgType::Ping => {
            log::debug!("Ping message from: {}", client_id);
        }
    }
}
