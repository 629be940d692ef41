//! Collision and outcome resolution for one tick
//!
//! Runs straight after the movement pass. Resolves hits, applies score and
//! damage, and decides whether the tick ended the level or the run.
//! Game over wins over level clear when both happen in the same tick.

use crate::entities::{GameState, Projectile};
use crate::events::GameEvent;
use crate::game::Game;
use crate::rng::RandomSource;

/// Points for one kill at `level`
pub fn points_for(level: u32) -> u32 {
    10 + level
}

pub fn resolve<R: RandomSource>(game: &mut Game<R>) -> Vec<GameEvent> {
    let mut events = Vec::new();

    resolve_bullet_hits(game, &mut events);
    let mut game_over = resolve_player_hits(game, &mut events);

    if !game_over && formation_reached_player(game) {
        game_over = true;
        events.push(GameEvent::GameOver);
    }

    if game_over {
        game.record_high_score(&mut events);
        game.set_state(GameState::GameOver);
    } else if game.formation.is_cleared() {
        events.push(GameEvent::LevelUp);
        game.set_state(GameState::LevelComplete);
    }

    events
}

/// Player bullets against alive enemies. A bullet kills the first enemy it
/// overlaps in arena order and is consumed by it.
fn resolve_bullet_hits<R: RandomSource>(game: &mut Game<R>, events: &mut Vec<GameEvent>) {
    let bullets = std::mem::take(&mut game.bullets);
    let mut survivors: Vec<Projectile> = Vec::with_capacity(bullets.len());

    for bullet in bullets {
        let bullet_rect = bullet.rect();
        let target = game
            .formation
            .enemies
            .iter_mut()
            .find(|enemy| enemy.is_alive() && bullet_rect.overlaps(&enemy.rect()));

        match target {
            Some(enemy) => {
                enemy.kill();
                game.score += points_for(game.level);
                events.push(GameEvent::EnemyHit);
                game.record_high_score(events);
            }
            None => survivors.push(bullet),
        }
    }

    game.bullets = survivors;
}

/// Enemy bullets against the player. Returns true when the last life was lost.
fn resolve_player_hits<R: RandomSource>(game: &mut Game<R>, events: &mut Vec<GameEvent>) -> bool {
    let player_rect = game.player.rect();
    let mut index = 0;

    while index < game.enemy_bullets.len() {
        if !game.enemy_bullets[index].rect().overlaps(&player_rect) {
            index += 1;
            continue;
        }

        game.enemy_bullets.remove(index);
        game.lives = game.lives.saturating_sub(1);
        events.push(GameEvent::PlayerHit {
            lives_left: game.lives,
        });

        if game.lives == 0 {
            events.push(GameEvent::GameOver);
            return true;
        }
    }

    false
}

/// True once any alive enemy's bottom edge reaches the player's top edge
fn formation_reached_player<R>(game: &Game<R>) -> bool {
    let player_top = game.player.y;
    game.formation
        .alive()
        .any(|enemy| enemy.rect().bottom() >= player_top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Enemy, Field, Formation, ProjectileOwner};
    use crate::test_support::ScriptedRng;

    fn playing_game(enemies: Vec<Enemy>) -> Game<ScriptedRng> {
        let mut game = Game::new(Field::default(), 0, ScriptedRng::new());
        game.formation = Formation {
            cols: enemies.len() as u32,
            rows: 1,
            enemies,
            direction_x: 1,
            speed: 1.0,
        };
        game.state = GameState::Playing;
        game
    }

    #[test]
    fn test_points_for_level() {
        assert_eq!(points_for(1), 11);
        assert_eq!(points_for(5), 15);
    }

    #[test]
    fn test_bullet_matching_enemy_rect_kills_it() {
        let mut game = playing_game(vec![Enemy::new(100.0, 100.0), Enemy::new(300.0, 100.0)]);
        game.bullets.push(Projectile::new(100.0, 100.0, ProjectileOwner::Player));

        let events = resolve(&mut game);

        assert!(!game.formation.enemies[0].is_alive());
        assert!(game.formation.enemies[1].is_alive());
        assert!(game.bullets.is_empty());
        assert_eq!(game.score, 11);
        assert_eq!(
            events,
            vec![GameEvent::EnemyHit, GameEvent::HighScoreChanged(11)]
        );
        assert_eq!(game.state, GameState::Playing);
    }

    #[test]
    fn test_bullet_kills_at_most_one_enemy() {
        // Two overlapping enemies under one bullet
        let mut game = playing_game(vec![
            Enemy::new(100.0, 100.0),
            Enemy::new(110.0, 100.0),
            Enemy::new(400.0, 100.0),
        ]);
        game.bullets.push(Projectile::new(120.0, 110.0, ProjectileOwner::Player));

        resolve(&mut game);

        assert!(!game.formation.enemies[0].is_alive());
        assert!(game.formation.enemies[1].is_alive());
        assert_eq!(game.score, 11);
    }

    #[test]
    fn test_dead_enemy_is_not_hit_again() {
        let mut game = playing_game(vec![Enemy::new(100.0, 100.0), Enemy::new(300.0, 100.0)]);
        game.bullets.push(Projectile::new(100.0, 100.0, ProjectileOwner::Player));
        game.bullets.push(Projectile::new(100.0, 100.0, ProjectileOwner::Player));

        resolve(&mut game);

        // Second bullet passes through the dead enemy's slot
        assert_eq!(game.score, 11);
        assert_eq!(game.bullets.len(), 1);
    }

    #[test]
    fn test_high_score_not_raised_below_record() {
        let mut game = playing_game(vec![Enemy::new(100.0, 100.0), Enemy::new(300.0, 100.0)]);
        game.high_score = 500;
        game.bullets.push(Projectile::new(100.0, 100.0, ProjectileOwner::Player));

        let events = resolve(&mut game);

        assert_eq!(events, vec![GameEvent::EnemyHit]);
        assert_eq!(game.high_score, 500);
    }

    #[test]
    fn test_enemy_bullet_hits_player() {
        let mut game = playing_game(vec![Enemy::new(100.0, 100.0)]);
        let (x, y) = (game.player.x + 10.0, game.player.y + 5.0);
        game.enemy_bullets.push(Projectile::new(x, y, ProjectileOwner::Enemy));
        game.enemy_bullets.push(Projectile::new(10.0, 300.0, ProjectileOwner::Enemy));

        let events = resolve(&mut game);

        assert_eq!(game.lives, 2);
        assert_eq!(game.enemy_bullets.len(), 1);
        assert_eq!(events, vec![GameEvent::PlayerHit { lives_left: 2 }]);
        assert_eq!(game.state, GameState::Playing);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut game = playing_game(vec![Enemy::new(100.0, 100.0)]);
        game.lives = 1;
        game.score = 40;
        game.high_score = 20;
        let (x, y) = (game.player.x, game.player.y);
        game.enemy_bullets.push(Projectile::new(x, y, ProjectileOwner::Enemy));
        game.enemy_bullets.push(Projectile::new(x, y, ProjectileOwner::Enemy));

        let events = resolve(&mut game);

        assert_eq!(game.lives, 0);
        assert_eq!(game.state, GameState::GameOver);
        // Remaining bullets are left alone once the run is over
        assert_eq!(game.enemy_bullets.len(), 1);
        assert_eq!(
            events,
            vec![
                GameEvent::PlayerHit { lives_left: 0 },
                GameEvent::GameOver,
                GameEvent::HighScoreChanged(40),
            ]
        );
    }

    #[test]
    fn test_enemy_reaching_player_ends_game_with_lives_left() {
        let player_top = Field::default().height - 60.0;
        let mut game = playing_game(vec![Enemy::new(100.0, player_top - 35.0)]);

        let events = resolve(&mut game);

        assert_eq!(game.lives, 3);
        assert_eq!(game.state, GameState::GameOver);
        assert_eq!(events, vec![GameEvent::GameOver]);
    }

    #[test]
    fn test_dead_enemy_low_on_field_does_not_end_game() {
        let player_top = Field::default().height - 60.0;
        let mut low = Enemy::new(100.0, player_top);
        low.kill();
        let mut game = playing_game(vec![low, Enemy::new(300.0, 100.0)]);

        resolve(&mut game);

        assert_eq!(game.state, GameState::Playing);
    }

    #[test]
    fn test_last_kill_completes_level() {
        let mut dead = Enemy::new(300.0, 100.0);
        dead.kill();
        let mut game = playing_game(vec![Enemy::new(100.0, 100.0), dead]);
        game.bullets.push(Projectile::new(110.0, 110.0, ProjectileOwner::Player));

        let events = resolve(&mut game);

        assert_eq!(game.state, GameState::LevelComplete);
        assert_eq!(events.last(), Some(&GameEvent::LevelUp));
    }

    #[test]
    fn test_game_over_takes_precedence_over_level_clear() {
        let player_top = Field::default().height - 60.0;
        let mut game = playing_game(vec![Enemy::new(100.0, player_top - 20.0)]);
        game.lives = 1;
        // Kill the last enemy and lose the last life in the same tick
        game.bullets.push(Projectile::new(110.0, player_top - 10.0, ProjectileOwner::Player));
        let (x, y) = (game.player.x, game.player.y);
        game.enemy_bullets.push(Projectile::new(x, y, ProjectileOwner::Enemy));

        let events = resolve(&mut game);

        assert_eq!(game.state, GameState::GameOver);
        assert!(!events.contains(&GameEvent::LevelUp));
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::GameOver).count(),
            1
        );
    }
}
