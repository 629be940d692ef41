//! Per-tick movement: player, bullets, formation and enemy fire

use crate::entities::{Formation, Player, Projectile, ProjectileOwner};
use crate::game::{Game, HeldKeys};
use crate::rng::RandomSource;

/// Chance per tick that some enemy fires at `level`
pub fn shoot_chance(level: u32) -> f64 {
    0.01 + level as f64 * 0.005
}

/// Run the movement half of a tick, in order: player, bullets, formation,
/// enemy fire.
pub fn update<R: RandomSource>(game: &mut Game<R>) {
    update_player(&mut game.player, game.keys, game.field.width);

    update_projectiles(&mut game.bullets, game.field.height);
    update_projectiles(&mut game.enemy_bullets, game.field.height);

    game.formation.update(game.field.width);

    if let Some(shot) = enemy_fire(&game.formation, game.level, &mut game.rng) {
        game.enemy_bullets.push(shot);
    }
}

pub fn update_player(player: &mut Player, keys: HeldKeys, field_width: f32) {
    if keys.left {
        player.move_left(0.0);
    }
    if keys.right {
        player.move_right(field_width - player.width);
    }
}

/// Move every projectile and drop the ones that left the field
pub fn update_projectiles(projectiles: &mut Vec<Projectile>, field_height: f32) {
    for projectile in projectiles.iter_mut() {
        projectile.update();
    }
    projectiles.retain(|p| !p.is_out_of_bounds(field_height));
}

/// Roll for this tick's enemy shot; at most one per tick, from a uniformly
/// chosen alive enemy
pub fn enemy_fire<R: RandomSource + ?Sized>(
    formation: &Formation,
    level: u32,
    rng: &mut R,
) -> Option<Projectile> {
    if !rng.chance(shoot_chance(level)) {
        return None;
    }

    let alive: Vec<_> = formation.alive().collect();
    if alive.is_empty() {
        return None;
    }

    let shooter = alive[rng.index(alive.len())];
    let (x, y) = shooter.muzzle();
    Some(Projectile::new(x, y, ProjectileOwner::Enemy))
}
