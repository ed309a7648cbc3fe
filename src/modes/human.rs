use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use tokio::time::interval;

use crate::audio::{self, MoveCue};
use crate::game::{Action, Direction, GameConfig, GameEngine, GameState, TickResult};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    last_frame: TickResult,
    renderer: Renderer,
    input_handler: InputHandler,
    move_cue: Box<dyn MoveCue>,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(mut engine: GameEngine) -> Self {
        let state = engine.reset();
        let last_frame = state.snapshot(false, false);
        let move_cue = audio::move_cue(engine.config().sound);

        Self {
            engine,
            state,
            last_frame,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            move_cue,
            should_quit: false,
            pending_direction: None,
        }
    }

    pub fn from_config(config: GameConfig) -> Result<Self> {
        Ok(Self::new(GameEngine::new(config)?))
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = match setup_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                // Setup may have stopped halfway; undo whatever took effect
                if let Err(restore_err) = restore_terminal(&mut stderr()) {
                    log::error!("Failed to restore terminal: {:#}", restore_err);
                }
                return Err(err);
            }
        };

        log::info!("Game started with {:?}", self.engine.config());

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        restore_terminal(terminal.backend_mut())?;

        if let Err(err) = &result {
            log::error!("Game aborted: {:#}", err);
        }
        log::info!("Exiting with score {}", self.state.score);

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.engine.config().tick_interval());

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // One game tick, then redraw
                _ = tick_timer.tick() => {
                    self.update_game()?;
                    let config = self.engine.config();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.last_frame, config);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                // Last directional key before the tick wins
                KeyAction::GameAction(Action::Move(dir)) => {
                    self.pending_direction = Some(dir);
                }
                KeyAction::GameAction(Action::Continue) | KeyAction::None => {}
                KeyAction::Quit => {
                    self.should_quit = true;
                }
            }
        }
    }

    fn update_game(&mut self) -> Result<()> {
        if self.state.game_over {
            return Ok(());
        }

        let action = Action::from(self.pending_direction.take());
        let result = self
            .engine
            .step(&mut self.state, action)
            .context("Game state invariant violated")?;

        if result.moved {
            self.move_cue.play()?;
        }

        self.last_frame = result;
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Leave raw mode and the alternate screen; safe to call after a partial setup
fn restore_terminal<W: Write>(out: &mut W) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(out, LeaveAlternateScreen, cursor::Show)
        .context("Failed to leave alternate screen")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Phase, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode {
        let mut mode = HumanMode::new(GameEngine::with_seed(GameConfig::default(), 11).unwrap());
        mode.state.fruit = Position::new(0, 0);
        mode
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.state.phase(), Phase::NotStarted);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.last_frame.score_text(), "SCORE: 0");
    }

    #[test]
    fn test_last_direction_wins() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up));
        mode.handle_event(key(KeyCode::Left));

        mode.update_game().unwrap();

        assert_eq!(mode.state.direction, Some(Direction::Left));
        assert_eq!(mode.state.head, Position::new(300, 240));
        assert!(mode.last_frame.moved);
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_tick_without_input_keeps_heading() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Down));
        mode.update_game().unwrap();
        mode.update_game().unwrap();

        assert_eq!(mode.state.head, Position::new(320, 280));
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_no_ticks_after_game_over() {
        let mut mode = mode();
        mode.state.head = Position::new(0, 240);
        mode.handle_event(key(KeyCode::Left));
        mode.update_game().unwrap();
        assert!(mode.last_frame.game_over);

        let steps = mode.state.steps;
        mode.update_game().unwrap();
        assert_eq!(mode.state.steps, steps);
    }

    #[test]
    fn test_restore_without_setup_leaves_alternate_screen() {
        let mut out = Vec::new();

        restore_terminal(&mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }
}
