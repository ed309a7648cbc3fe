use std::fmt;

/// Invariant violations raised by the game core
///
/// Collisions are not errors; they end the game through `TickResult::game_over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The snake tried to grow past its segment ceiling
    CapacityExceeded { capacity: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::CapacityExceeded { capacity } => {
                write!(f, "snake body exceeded its capacity of {} segments", capacity)
            }
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = GameError::CapacityExceeded { capacity: 100 };
        assert_eq!(err.to_string(), "snake body exceeded its capacity of 100 segments");
    }
}
