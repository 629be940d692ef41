//! Terminal Space Invaders
//!
//! The simulation core ([`game`], [`motion`], [`collision`] and the
//! [`entities`]) is deterministic for a given random source and does no I/O.
//! The app drives it at a fixed tick rate and routes its events to audio,
//! logging and high score persistence.

pub mod app;
pub mod audio;
pub mod collision;
pub mod entities;
pub mod events;
pub mod game;
pub mod highscore;
pub mod input;
pub mod motion;
pub mod renderer;
pub mod rng;
pub mod settings;

#[cfg(test)]
mod test_support;

// Library exports for testing
pub use entities::{
    Enemy, Field, Formation, GameState, Player, Projectile, ProjectileOwner, Rect,
};
pub use events::{EventSink, GameEvent};
pub use game::{Action, Game, HeldKeys, STARTING_LIVES};
pub use rng::{RandomSource, game_rng};
