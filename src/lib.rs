pub mod board;
pub mod moves;
pub mod selection;
pub mod agent;
pub mod session;
pub mod batch;
pub mod config;
pub mod error;
pub mod communication_protocol;
pub mod game_server;
