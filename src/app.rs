use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use rand_pcg::Pcg32;
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::entities::GameState;
use crate::events::{EventLogger, EventSink, GameEvent, dispatch};
use crate::game::{Action, Game};
use crate::highscore::{HighScoreRecorder, JsonFileStore, load_high_score};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::rng::game_rng;
use crate::settings::Settings;

/// Upper bound on catch-up ticks after a slow frame
const MAX_TICKS_PER_FRAME: u32 = 5;

/// The main application: owns the simulation and wires it to the terminal,
/// the speakers and the high score file.
pub struct App {
    running: bool,
    game: Game<Pcg32>,
    tick_duration: Duration,
    /// Time not yet consumed by fixed ticks
    accumulator: Duration,
    last_frame_time: Instant,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
    high_scores: HighScoreRecorder<JsonFileStore>,
    event_logger: EventLogger,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: &Settings, reports_release: bool) -> Self {
        let store = JsonFileStore::new(&settings.high_score_path);
        log::debug!("High score file: {}", store.path().display());
        let high_score = load_high_score(&store);
        let game = Game::new(settings.field(), high_score, game_rng(settings.seed));

        let audio_manager = if settings.volume() > 0.0 {
            AudioManager::new(&settings.sounds_dir, settings.volume())
        } else {
            log::info!("Sound muted");
            AudioManager::silent()
        };

        Self {
            running: true,
            game,
            tick_duration: settings.tick_duration(),
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            input_manager: InputManager::new(reports_release),
            renderer: GameRenderer::new(),
            audio_manager,
            high_scores: HighScoreRecorder::new(store),
            event_logger: EventLogger,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            // Render the frame
            terminal.draw(|frame| {
                let view = RenderView::new(&self.game, frame.area());
                self.renderer.render(frame, &view);
            })?;

            // Poll input events and get actions
            self.input_manager.poll_events()?;
            let actions = self.input_manager.take_actions();
            self.process_actions(&actions);

            // Fixed-rate simulation ticks
            let now = Instant::now();
            self.accumulator += now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            self.run_ticks();

            // Small sleep to prevent CPU spinning
            std::thread::sleep(Duration::from_millis(4));
        }
        log::info!(
            "Exiting at level {} with score {} (high score {})",
            self.game.level,
            self.game.score,
            self.game.high_score
        );
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Exit => {
                    self.running = false;
                }
                InputAction::Game(action) => {
                    let events = self.game.apply(*action);
                    if *action == Action::Restart && self.game.state == GameState::LevelIntro {
                        self.input_manager.clear();
                    }
                    self.dispatch(&events);
                }
            }
        }
    }

    fn run_ticks(&mut self) {
        let mut ticks = 0;
        while self.accumulator >= self.tick_duration {
            self.accumulator -= self.tick_duration;
            ticks += 1;
            if ticks > MAX_TICKS_PER_FRAME {
                // Drop the backlog rather than fast-forwarding the game
                self.accumulator = Duration::ZERO;
                break;
            }

            self.game.keys = self.input_manager.held();
            let events = self.game.tick();
            self.input_manager.end_tick();
            self.dispatch(&events);
        }
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        let sinks: &mut [&mut dyn EventSink] = &mut [
            &mut self.event_logger,
            &mut self.high_scores,
            &mut self.audio_manager,
        ];
        dispatch(events, sinks);
    }
}
