use super::rect::Rect;

pub const PROJECTILE_WIDTH: f32 = 3.0;
pub const PROJECTILE_HEIGHT: f32 = 10.0;
/// Upward distance a player bullet travels per tick
pub const PLAYER_BULLET_SPEED: f32 = 7.0;
/// Downward distance an enemy bullet travels per tick
pub const ENEMY_BULLET_SPEED: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub owner: ProjectileOwner,
}

impl Projectile {
    pub fn new(x: f32, y: f32, owner: ProjectileOwner) -> Self {
        Self { x, y, owner }
    }

    pub fn update(&mut self) {
        match self.owner {
            ProjectileOwner::Player => self.y -= PLAYER_BULLET_SPEED,
            ProjectileOwner::Enemy => self.y += ENEMY_BULLET_SPEED,
        }
    }

    /// Player bullets leave through the top edge, enemy bullets through the bottom
    pub fn is_out_of_bounds(&self, field_height: f32) -> bool {
        match self.owner {
            ProjectileOwner::Player => self.y <= 0.0,
            ProjectileOwner::Enemy => self.y >= field_height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}
