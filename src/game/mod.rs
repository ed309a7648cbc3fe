//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The driver feeds one `Action` per tick and draws the returned `TickResult`.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::GameEngine;
pub use error::GameError;
pub use state::{CollisionType, GameState, Phase, Position, Rect, TickResult};
