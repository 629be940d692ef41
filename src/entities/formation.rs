use super::enemy::Enemy;
use super::rect::Rect;
use crate::rng::RandomSource;

pub const MAX_ROWS: u32 = 8;
pub const MIN_COLS: u32 = 8;
pub const MAX_COLS: u32 = 12;
pub const COLUMN_SPACING: f32 = 70.0;
pub const ROW_SPACING: f32 = 45.0;
/// Top-left corner of the first enemy in the grid
pub const GRID_ORIGIN: f32 = 50.0;
/// The formation turns around this close to either side of the field
pub const EDGE_MARGIN: f32 = 10.0;
/// How far the formation descends each time it turns around
pub const DROP_DISTANCE: f32 = 25.0;

#[derive(Debug, Clone)]
pub struct Formation {
    /// Row-major grid of enemies; dead ones are kept in place
    pub enemies: Vec<Enemy>,
    pub rows: u32,
    pub cols: u32,
    /// Movement direction (-1 left, 1 right)
    pub direction_x: i16,
    /// Horizontal distance covered per tick
    pub speed: f32,
}

impl Formation {
    /// Formation with no enemies, used before a level is started
    pub fn empty() -> Self {
        Self {
            enemies: Vec::new(),
            rows: 0,
            cols: 0,
            direction_x: 1,
            speed: Self::speed_for_level(1),
        }
    }

    /// Build the enemy grid for `level`. Rows grow every third level and get
    /// one to three random extra rows, capped at [`MAX_ROWS`].
    pub fn generate<R: RandomSource + ?Sized>(level: u32, rng: &mut R) -> Self {
        let base_rows = 2 + level / 3;
        let random_rows = rng.int_in(1, 3);
        let rows = (base_rows + random_rows).min(MAX_ROWS);
        let cols = rng.int_in(MIN_COLS, MAX_COLS);

        let enemies = (0..rows)
            .flat_map(|row| {
                (0..cols).map(move |col| {
                    Enemy::new(
                        col as f32 * COLUMN_SPACING + GRID_ORIGIN,
                        row as f32 * ROW_SPACING + GRID_ORIGIN,
                    )
                })
            })
            .collect();

        Self {
            enemies,
            rows,
            cols,
            direction_x: 1,
            speed: Self::speed_for_level(level),
        }
    }

    pub fn speed_for_level(level: u32) -> f32 {
        1.0 + level.saturating_sub(1) as f32 * 0.3
    }

    pub fn alive(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn is_cleared(&self) -> bool {
        !self.enemies.is_empty() && self.enemies.iter().all(|e| !e.is_alive())
    }

    /// Bounding box of the alive enemies only
    pub fn alive_bounds(&self) -> Option<Rect> {
        self.alive()
            .map(Enemy::rect)
            .reduce(|bounds, rect| bounds.union(&rect))
    }

    /// Step the formation one tick. When the alive bounding box reaches the
    /// edge it is heading for, the formation turns around and drops instead of
    /// moving sideways.
    pub fn update(&mut self, field_width: f32) {
        let Some(bounds) = self.alive_bounds() else {
            return;
        };

        let hit_edge = (self.direction_x > 0 && bounds.right() >= field_width - EDGE_MARGIN)
            || (self.direction_x < 0 && bounds.x <= EDGE_MARGIN);

        if hit_edge {
            self.direction_x = -self.direction_x;
            for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
                enemy.y += DROP_DISTANCE;
            }
        } else {
            let dx = self.direction_x as f32 * self.speed;
            for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
                enemy.x += dx;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedRng;

    #[test]
    fn test_generate_uses_scripted_counts() {
        // 1 extra row, 10 columns
        let mut rng = ScriptedRng::new().with_ints(&[1, 10]);
        let formation = Formation::generate(1, &mut rng);
        assert_eq!(formation.rows, 3);
        assert_eq!(formation.cols, 10);
        assert_eq!(formation.enemies.len(), 30);
        assert_eq!(formation.direction_x, 1);
        assert_eq!(formation.speed, 1.0);
    }

    #[test]
    fn test_generate_grid_placement() {
        let mut rng = ScriptedRng::new().with_ints(&[1, 8]);
        let formation = Formation::generate(1, &mut rng);
        let first = &formation.enemies[0];
        assert_eq!((first.x, first.y), (50.0, 50.0));
        // Row 1, column 2
        let enemy = &formation.enemies[8 + 2];
        assert_eq!((enemy.x, enemy.y), (190.0, 95.0));
    }

    #[test]
    fn test_generate_caps_rows() {
        let mut rng = ScriptedRng::new().with_ints(&[3, 12]);
        let formation = Formation::generate(30, &mut rng);
        assert_eq!(formation.rows, MAX_ROWS);
    }

    #[test]
    fn test_speed_for_level() {
        assert_eq!(Formation::speed_for_level(1), 1.0);
        assert!((Formation::speed_for_level(4) - 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_empty_formation_is_not_cleared() {
        let formation = Formation::empty();
        assert!(!formation.is_cleared());
        assert_eq!(formation.alive_bounds(), None);
    }

    #[test]
    fn test_bounds_ignore_dead_enemies() {
        let mut rng = ScriptedRng::new().with_ints(&[1, 8]);
        let mut formation = Formation::generate(1, &mut rng);
        // Kill the whole first column
        for row in 0..formation.rows as usize {
            formation.enemies[row * formation.cols as usize].kill();
        }
        let bounds = formation.alive_bounds().unwrap();
        assert_eq!(bounds.x, 120.0);
    }

    #[test]
    fn test_update_moves_horizontally() {
        let mut formation = Formation {
            enemies: vec![Enemy::new(100.0, 50.0)],
            rows: 1,
            cols: 1,
            direction_x: 1,
            speed: 1.3,
        };
        formation.update(800.0);
        assert!((formation.enemies[0].x - 101.3).abs() < 1e-4);
        assert_eq!(formation.enemies[0].y, 50.0);
    }

    #[test]
    fn test_update_turns_at_right_edge() {
        let mut formation = Formation {
            enemies: vec![Enemy::new(750.0, 50.0), Enemy::new(680.0, 50.0)],
            rows: 1,
            cols: 2,
            direction_x: 1,
            speed: 1.0,
        };
        formation.update(800.0);
        assert_eq!(formation.direction_x, -1);
        assert_eq!(formation.enemies[0].x, 750.0);
        assert_eq!(formation.enemies[0].y, 75.0);
        assert_eq!(formation.enemies[1].y, 75.0);
    }

    #[test]
    fn test_update_turns_at_left_edge() {
        let mut formation = Formation {
            enemies: vec![Enemy::new(10.0, 50.0)],
            rows: 1,
            cols: 1,
            direction_x: -1,
            speed: 1.0,
        };
        formation.update(800.0);
        assert_eq!(formation.direction_x, 1);
        assert_eq!(formation.enemies[0].x, 10.0);
        assert_eq!(formation.enemies[0].y, 75.0);
    }

    #[test]
    fn test_dead_enemies_do_not_move() {
        let mut dead = Enemy::new(300.0, 50.0);
        dead.kill();
        let mut formation = Formation {
            enemies: vec![dead, Enemy::new(100.0, 50.0)],
            rows: 1,
            cols: 2,
            direction_x: 1,
            speed: 1.0,
        };
        formation.update(800.0);
        assert_eq!(formation.enemies[0].x, 300.0);
        assert_eq!(formation.enemies[1].x, 101.0);
    }

    mod proptests {
        use super::*;
        use crate::rng::game_rng;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_generated_grid_shape(level in 1u32..40, seed in any::<u64>()) {
                let mut rng = game_rng(Some(seed));
                let formation = Formation::generate(level, &mut rng);

                let base_rows = 2 + level / 3;
                prop_assert!(formation.rows >= (base_rows + 1).min(MAX_ROWS));
                prop_assert!(formation.rows <= (base_rows + 3).min(MAX_ROWS));
                prop_assert!((MIN_COLS..=MAX_COLS).contains(&formation.cols));
                prop_assert_eq!(formation.enemies.len() as u32, formation.rows * formation.cols);
                prop_assert!(formation.enemies.iter().all(|e| e.is_alive()));

                let mut positions: Vec<(i64, i64)> = formation
                    .enemies
                    .iter()
                    .map(|e| (e.x as i64, e.y as i64))
                    .collect();
                positions.sort_unstable();
                positions.dedup();
                prop_assert_eq!(positions.len(), formation.enemies.len());
            }
        }
    }
}
