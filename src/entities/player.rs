use super::rect::Rect;

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 40.0;
pub const PLAYER_SPEED: f32 = 5.0;
/// Distance from the bottom of the field to the player's top edge
const PLAYER_BOTTOM_OFFSET: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
        }
    }

    /// Player centered horizontally near the bottom of the field
    pub fn spawn(field_width: f32, field_height: f32) -> Self {
        Self::new(
            field_width / 2.0 - PLAYER_WIDTH / 2.0,
            field_height - PLAYER_BOTTOM_OFFSET,
        )
    }

    pub fn move_left(&mut self, min_x: f32) {
        if self.x > min_x {
            self.x = (self.x - self.speed).max(min_x);
        }
    }

    pub fn move_right(&mut self, max_x: f32) {
        if self.x < max_x {
            self.x = (self.x + self.speed).min(max_x);
        }
    }

    /// Where a fired bullet starts: horizontal center of the top edge
    pub fn muzzle(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
