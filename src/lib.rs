//! Soundboard - a web page of clickable audio clips
//!
//! Point it at a directory of `.mp3`, `.ogg` and `.wav` files and it serves
//! a page with one colored tile per clip, plus the raw files for playback.

pub mod board;
pub mod cli;
pub mod core;
pub mod watch;
pub mod web;

pub use board::{Clip, Soundboard};
pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
