//! Soundboard Web - HTTP front door
//!
//! One route renders the board, one route serves the clip files.

pub mod access_log;
pub mod server;

pub use server::{router, run, AppState};
