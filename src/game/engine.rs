use anyhow::Result;
use rand::{SeedableRng, rngs::StdRng};

use super::{
    action::Action,
    config::GameConfig,
    error::GameError,
    state::{GameState, TickResult, random_fruit_position},
};

/// The game engine: owns the configuration and the fruit RNG
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with an entropy-seeded RNG
    ///
    /// Fails if the config does not pass `GameConfig::validate`.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_entropy(),
        })
    }

    /// Create an engine whose fruit placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game: centred head, no body, no heading, random fruit
    pub fn reset(&mut self) -> GameState {
        let fruit = random_fruit_position(&self.config, &mut self.rng);
        GameState::new(self.config.clone(), fruit)
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> Result<TickResult, GameError> {
        let was_over = state.game_over;
        let result = state.advance(action, &mut self.rng)?;

        if result.game_over && !was_over {
            log::info!(
                "Game over after {} ticks: {:?}, score {}, length {}",
                state.steps,
                result.collision,
                result.score,
                result.body.len()
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Direction, Phase, Position};

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1).unwrap();
        let state = engine.reset();

        assert!(!state.game_over);
        assert_eq!(state.phase(), Phase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.tail_length(), 0);
        assert_eq!(state.head, Position::new(320, 240));
        assert!((0..640).contains(&state.fruit.x));
        assert!((0..480).contains(&state.fruit.y));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(GameEngine::new(GameConfig::new(0, 480)).is_err());
        assert!(GameEngine::with_seed(GameConfig::new(-40, 480), 1).is_err());

        let no_fruit = GameConfig {
            fruit_size: 0,
            ..Default::default()
        };
        assert!(GameEngine::with_seed(no_fruit, 1).is_err());
    }

    #[test]
    fn test_seeded_engines_agree() {
        let mut a = GameEngine::with_seed(GameConfig::default(), 42).unwrap();
        let mut b = GameEngine::with_seed(GameConfig::default(), 42).unwrap();

        for _ in 0..5 {
            assert_eq!(a.reset().fruit, b.reset().fruit);
        }
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 3).unwrap();
        let mut state = engine.reset();
        state.fruit = Position::new(0, 0);

        let result = engine.step(&mut state, Action::Move(Direction::Right)).unwrap();

        assert!(result.moved);
        assert!(!result.game_over);
        assert_eq!(state.steps, 1);
        assert_eq!(result.head.position(), Position::new(340, 240));
    }

    #[test]
    fn test_runs_into_wall_eventually() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 9).unwrap();
        let mut state = engine.reset();
        state.fruit = Position::new(0, 180);

        let mut result = engine.step(&mut state, Action::Move(Direction::Up)).unwrap();
        let mut ticks = 1;
        while !result.game_over {
            result = engine.step(&mut state, Action::Continue).unwrap();
            ticks += 1;
            assert!(ticks <= 10);
        }

        // Head starts at y = 100 on a 200-unit board, so the sixth move leaves it
        assert_eq!(ticks, 6);
        assert_eq!(result.collision, Some(CollisionType::Wall));
        assert_eq!(result.head.position(), Position::new(100, -20));
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 5).unwrap();
        let mut state = engine.reset();
        state.game_over = true;
        let steps_before = state.steps;

        let result = engine.step(&mut state, Action::Move(Direction::Up)).unwrap();

        assert!(result.game_over);
        assert_eq!(state.steps, steps_before);
        assert_eq!(state.direction, None);
    }
}
