use super::rect::Rect;

pub const ENEMY_WIDTH: f32 = 40.0;
pub const ENEMY_HEIGHT: f32 = 35.0;

/// One invader. Dead enemies stay in the formation and are skipped.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
}

impl Enemy {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Bottom-center, where this enemy's shots spawn
    pub fn muzzle(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
