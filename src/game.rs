use rand_pcg::Pcg32;

use crate::collision;
use crate::entities::{
    Enemy, Field, Formation, GameState, Player, Projectile, ProjectileOwner, Rect,
};
use crate::events::GameEvent;
use crate::motion;
use crate::rng::RandomSource;

pub const STARTING_LIVES: u32 = 3;

/// Edge-triggered commands that drive the phase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start the level, advance after a clear, or fire while playing
    Confirm,
    PauseToggle,
    Quit,
    Restart,
}

/// Directions currently held down; sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

/// The whole simulation context: every piece of mutable run state lives here.
pub struct Game<R = Pcg32> {
    pub state: GameState,
    pub field: Field,
    pub player: Player,
    /// Player bullets
    pub bullets: Vec<Projectile>,
    pub enemy_bullets: Vec<Projectile>,
    pub formation: Formation,
    pub keys: HeldKeys,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub high_score: u32,
    pub(crate) rng: R,
}

impl<R: RandomSource> Game<R> {
    /// Fresh run at level 1, waiting on the level banner
    pub fn new(field: Field, high_score: u32, rng: R) -> Self {
        Self {
            state: GameState::LevelIntro,
            field,
            player: Player::spawn(field.width, field.height),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            formation: Formation::empty(),
            keys: HeldKeys::default(),
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            high_score,
            rng,
        }
    }

    /// Apply one edge-triggered action. Pairs of (state, action) that have no
    /// transition are ignored.
    pub fn apply(&mut self, action: Action) -> Vec<GameEvent> {
        let mut events = Vec::new();

        match (self.state, action) {
            (GameState::LevelIntro, Action::Confirm) => self.start_level(),
            (GameState::Playing, Action::Confirm) => {
                let (x, y) = self.player.muzzle();
                self.bullets.push(Projectile::new(x, y, ProjectileOwner::Player));
                events.push(GameEvent::Shoot);
            }
            (GameState::LevelComplete, Action::Confirm) => self.advance_level(),
            (GameState::Playing, Action::PauseToggle) => self.set_state(GameState::Paused),
            (GameState::Paused, Action::PauseToggle) => self.set_state(GameState::Playing),
            (state, Action::Quit) if state.is_waiting() => self.set_state(GameState::Quit),
            (state, Action::Restart) if state.is_terminal() => self.restart(),
            _ => {}
        }

        events
    }

    /// Advance the simulation by one tick. Does nothing outside `Playing`.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if self.state != GameState::Playing {
            return Vec::new();
        }

        motion::update(self);
        collision::resolve(self)
    }

    fn start_level(&mut self) {
        self.formation = Formation::generate(self.level, &mut self.rng);
        log::info!(
            "Level {} started: {}x{} formation at speed {:.1}",
            self.level,
            self.formation.rows,
            self.formation.cols,
            self.formation.speed
        );
        self.set_state(GameState::Playing);
    }

    fn advance_level(&mut self) {
        self.level += 1;
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.set_state(GameState::LevelIntro);
    }

    /// Reset the run; the high score survives
    fn restart(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.formation = Formation::empty();
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.player = Player::spawn(self.field.width, self.field.height);
        self.keys = HeldKeys::default();
        self.set_state(GameState::LevelIntro);
    }

    pub(crate) fn set_state(&mut self, state: GameState) {
        if self.state != state {
            log::debug!("Game state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    /// Raise the high score to the current score if it was beaten
    pub(crate) fn record_high_score(&mut self, events: &mut Vec<GameEvent>) {
        if self.score > self.high_score {
            self.high_score = self.score;
            events.push(GameEvent::HighScoreChanged(self.high_score));
        }
    }
}

impl<R> Game<R> {
    pub fn enemy_speed(&self) -> f32 {
        self.formation.speed
    }

    pub fn alive_count(&self) -> usize {
        self.formation.alive_count()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.formation.enemies
    }

    /// Every enemy as (rect, alive)
    pub fn enemy_rects(&self) -> impl Iterator<Item = (Rect, bool)> + '_ {
        self.formation.enemies.iter().map(|e| (e.rect(), e.is_alive()))
    }

    pub fn bullet_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.bullets.iter().map(Projectile::rect)
    }

    pub fn enemy_bullet_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.enemy_bullets.iter().map(Projectile::rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedRng;

    fn new_game() -> Game<ScriptedRng> {
        Game::new(Field::default(), 0, ScriptedRng::new().with_ints(&[1, 8]))
    }

    #[test]
    fn test_new_game_waits_on_level_intro() {
        let game = new_game();
        assert_eq!(game.state, GameState::LevelIntro);
        assert_eq!(game.lives, 3);
        assert_eq!(game.level, 1);
        assert_eq!(game.score, 0);
        assert!(game.enemies().is_empty());
    }

    #[test]
    fn test_confirm_starts_level_and_spawns_formation() {
        let mut game = new_game();
        let events = game.apply(Action::Confirm);
        assert!(events.is_empty());
        assert_eq!(game.state, GameState::Playing);
        assert_eq!(game.enemies().len(), 24);
        assert_eq!(game.alive_count(), 24);
    }

    #[test]
    fn test_confirm_while_playing_fires() {
        let mut game = new_game();
        game.apply(Action::Confirm);
        let events = game.apply(Action::Confirm);
        assert_eq!(events, vec![GameEvent::Shoot]);
        assert_eq!(game.bullets.len(), 1);
        assert_eq!((game.bullets[0].x, game.bullets[0].y), (400.0, 540.0));
    }

    #[test]
    fn test_pause_toggle() {
        let mut game = new_game();
        // Not valid before the level starts
        game.apply(Action::PauseToggle);
        assert_eq!(game.state, GameState::LevelIntro);

        game.apply(Action::Confirm);
        game.apply(Action::PauseToggle);
        assert_eq!(game.state, GameState::Paused);

        // Paused games neither fire nor tick
        assert!(game.apply(Action::Confirm).is_empty());
        assert!(game.bullets.is_empty());
        let before = game.enemies()[0].x;
        game.tick();
        assert_eq!(game.enemies()[0].x, before);

        game.apply(Action::PauseToggle);
        assert_eq!(game.state, GameState::Playing);
    }

    #[test]
    fn test_quit_only_from_idle_states() {
        let mut game = new_game();
        game.apply(Action::Confirm);
        game.apply(Action::Quit);
        assert_eq!(game.state, GameState::Playing);

        game.apply(Action::PauseToggle);
        game.apply(Action::Quit);
        assert_eq!(game.state, GameState::Quit);

        let mut game = new_game();
        game.apply(Action::Quit);
        assert_eq!(game.state, GameState::Quit);

        let mut game = new_game();
        game.state = GameState::GameOver;
        game.apply(Action::Quit);
        assert_eq!(game.state, GameState::GameOver);
    }

    #[test]
    fn test_restart_only_from_terminal_states() {
        let mut game = new_game();
        game.apply(Action::Confirm);
        game.score = 50;
        game.apply(Action::Restart);
        assert_eq!(game.state, GameState::Playing);
        assert_eq!(game.score, 50);
    }

    #[test]
    fn test_restart_from_quit_resets_run() {
        let mut game = new_game();
        game.apply(Action::Confirm);
        game.score = 120;
        game.high_score = 120;
        game.level = 4;
        game.lives = 1;
        game.player.x = 0.0;
        game.keys.left = true;
        game.state = GameState::Quit;

        game.apply(Action::Restart);

        assert_eq!(game.state, GameState::LevelIntro);
        assert_eq!(game.score, 0);
        assert_eq!(game.lives, 3);
        assert_eq!(game.level, 1);
        assert_eq!(game.high_score, 120);
        assert_eq!(game.player.x, 375.0);
        assert!(game.enemies().is_empty());
        assert_eq!(game.keys, HeldKeys::default());
    }

    #[test]
    fn test_record_high_score_only_when_beaten() {
        let mut game = new_game();
        game.high_score = 30;
        game.score = 30;
        let mut events = Vec::new();
        game.record_high_score(&mut events);
        assert!(events.is_empty());

        game.score = 31;
        game.record_high_score(&mut events);
        assert_eq!(events, vec![GameEvent::HighScoreChanged(31)]);
        assert_eq!(game.high_score, 31);
    }
}
