mod enemy;
mod field;
mod formation;
mod game_state;
mod player;
mod projectile;
mod rect;

// Re-export all public types
pub use enemy::{ENEMY_HEIGHT, ENEMY_WIDTH, Enemy};
pub use field::Field;
pub use formation::{DROP_DISTANCE, EDGE_MARGIN, Formation, MAX_COLS, MAX_ROWS, MIN_COLS};
pub use game_state::GameState;
pub use player::{PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH, Player};
pub use projectile::{PROJECTILE_HEIGHT, PROJECTILE_WIDTH, Projectile, ProjectileOwner};
pub use rect::Rect;
