/// Play-field dimensions in simulation units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}
