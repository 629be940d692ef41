//! Outcome events produced by the simulation
//!
//! The core never plays sounds or writes files. It hands back a list of
//! events for every action and tick, and the app forwards them to each
//! [`EventSink`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player fired a bullet
    Shoot,
    /// A player bullet destroyed an enemy
    EnemyHit,
    /// An enemy bullet hit the player
    PlayerHit { lives_left: u32 },
    /// Lives exhausted or the formation reached the player
    GameOver,
    /// Every enemy of the level is dead
    LevelUp,
    /// The score passed the previous high score
    HighScoreChanged(u32),
}

/// A collaborator that reacts to simulation events. Handlers must not block
/// and must swallow their own failures.
pub trait EventSink {
    fn handle(&mut self, event: &GameEvent);
}

/// Forward every event to every sink, in order
pub fn dispatch(events: &[GameEvent], sinks: &mut [&mut dyn EventSink]) {
    for event in events {
        for sink in sinks.iter_mut() {
            sink.handle(event);
        }
    }
}

/// Sink that writes events to the log
#[derive(Debug, Default)]
pub struct EventLogger;

impl EventSink for EventLogger {
    fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Shoot | GameEvent::EnemyHit => log::trace!("{event:?}"),
            GameEvent::PlayerHit { lives_left } => {
                log::info!("Player hit, {lives_left} lives left")
            }
            GameEvent::GameOver => log::info!("Game over"),
            GameEvent::LevelUp => log::info!("Level cleared"),
            GameEvent::HighScoreChanged(score) => log::debug!("New high score {score}"),
        }
    }
}
