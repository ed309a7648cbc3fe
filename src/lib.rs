//! ColorSnake - a terminal snake arcade game
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - The move cue (audio module)
//! - The interactive driver loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod logging;
pub mod modes;
pub mod render;
