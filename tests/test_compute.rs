use glam::{DVec2, IVec2};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use triangle_adventure::compute::*;
use triangle_adventure::config::Rules;
use triangle_adventure::entities::projectile::Shot;
use triangle_adventure::entities::*;
use triangle_adventure::geometry::Rect;
use triangle_adventure::input::{InputSnapshot, Key};
use triangle_adventure::render::{Hud, SpriteId};
use triangle_adventure::timing::{Clock, ManualClock};

/// Fixed step used when a test needs "the next tick".
const STEP: u64 = 16;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Rules with spawning switched off, so tests place every enemy by hand.
fn quiet_rules() -> Rules {
    Rules { enemy_cap: 0, ..Rules::default() }
}

fn quiet_world() -> World {
    World::new(quiet_rules(), 0)
}

/// Enemy that never moves and will not fire for a very long time.
fn dummy_enemy(world: &World, x: f64, y: f64) -> Enemy {
    Enemy::new(world.rules(), 0, DVec2::new(x, y), IVec2::ZERO, 1_000_000)
}

fn none() -> InputSnapshot {
    InputSnapshot::new()
}

fn keys(keys: &[Key]) -> InputSnapshot {
    keys.iter().copied().collect()
}

/// Tick with no input until the ally projectiles are gone (or 200 ticks).
/// Returns the time of the last tick.
fn tick_until_ally_shots_clear(world: &mut World, now: u64, rng: &mut StdRng) -> u64 {
    let clock = ManualClock::new(now);
    for _ in 0..200 {
        if world.ally_projectiles.is_empty() {
            break;
        }
        clock.advance(STEP);
        world.tick(&none(), clock.now_ms(), rng);
    }
    clock.now_ms()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_world_is_empty_and_running() {
    let w = World::new(Rules::default(), 0);
    assert_eq!(w.score(), 0);
    assert_eq!(w.status(), GameStatus::Running);
    assert_eq!(w.player.health(), 5);
    assert_eq!(w.player.position(), DVec2::new(640.0, 360.0));
    assert!(w.enemies.is_empty());
    assert!(w.ally_projectiles.is_empty());
    assert!(w.enemy_projectiles.is_empty());
}

#[test]
fn fresh_scene_draws_only_the_player() {
    let w = World::new(Rules::default(), 0);
    let scene = w.scene(0);
    assert_eq!(scene.items.len(), 1);
    assert_eq!(scene.items[0].sprite, SpriteId::Player);
    assert!(!scene.items[0].mirrored);
    assert_eq!(scene.hud, Hud { score: 0, health: 5, dead: false });
    assert_eq!(scene.arena, Rect::new(0.0, 0.0, 1280.0, 720.0));
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[test]
fn spawn_checks_fill_up_to_the_cap() {
    let mut w = World::new(Rules::default(), 0);
    let mut rng = seeded_rng();
    assert!(w.try_spawn_enemy(0, &mut rng), "empty arena spawns at once");
    assert!(!w.try_spawn_enemy(1000, &mut rng), "spawn delay not yet passed");
    assert!(w.try_spawn_enemy(3000, &mut rng));
    assert!(w.try_spawn_enemy(6000, &mut rng));
    assert!(!w.try_spawn_enemy(9000, &mut rng), "cap reached");
    assert_eq!(w.enemies.len(), 3);
    assert_eq!(w.last_spawn(), 6000);
}

#[test]
fn first_tick_spawns_one_enemy() {
    let mut w = World::new(Rules::default(), 0);
    w.tick(&none(), 0, &mut seeded_rng());
    assert_eq!(w.enemies.len(), 1);
}

#[test]
fn enemy_spawned_this_tick_is_not_hit_by_resolved_shots() {
    // Parked shots every 24 px down the middle of both lanes: any enemy
    // spawned in a lane overlaps at least one of them.
    let parked = Shot { speed: 0.0, damage: 1 };
    for seed in 0..20 {
        let mut w = World::new(Rules::default(), 0);
        for x in [72.0, 1208.0] {
            for row in 0..=26 {
                let at = Rect::centered_at(DVec2::new(x, 48.0 + 24.0 * row as f64), (12.0, 12.0));
                w.ally_projectiles.push(Projectile::ally(at, Direction::Up, parked));
            }
        }
        let shots = w.ally_projectiles.len();

        w.tick(&none(), 0, &mut StdRng::seed_from_u64(seed));

        assert_eq!(w.enemies.len(), 1);
        assert_eq!(w.enemies[0].health(), 2);
        assert_eq!(w.score(), 0);
        assert_eq!(w.ally_projectiles.len(), shots);
    }
}

#[test]
fn enemy_count_never_exceeds_cap() {
    let mut w = World::new(Rules::default(), 0);
    let mut rng = seeded_rng();
    let mut now = 0;
    for _ in 0..3000 {
        now += STEP;
        w.tick(&none(), now, &mut rng);
        assert!(w.enemies.len() <= 3);
    }
}

#[test]
fn score_never_decreases_under_fire() {
    let mut w = World::new(Rules::default(), 0);
    let mut rng = seeded_rng();
    let fire_all = keys(&[
        Key::Fire(Direction::Left),
        Key::Fire(Direction::Right),
        Key::Fire(Direction::Up),
        Key::Fire(Direction::Down),
    ]);
    let mut now = 0;
    let mut last_score = 0;
    for _ in 0..3000 {
        now += STEP;
        w.tick(&fire_all, now, &mut rng);
        assert!(w.score() >= last_score);
        assert!(w.score() - last_score <= 3);
        last_score = w.score();
    }
}

// ── Player control ────────────────────────────────────────────────────────────

#[test]
fn held_key_moves_player_and_release_stops() {
    let mut w = quiet_world();
    let mut rng = seeded_rng();
    w.tick(&keys(&[Key::MoveLeft]), 0, &mut rng);
    assert_eq!(w.player.position(), DVec2::new(635.0, 360.0));
    w.tick(&keys(&[Key::MoveLeft]), STEP, &mut rng);
    assert_eq!(w.player.position(), DVec2::new(630.0, 360.0));
    w.tick(&none(), 2 * STEP, &mut rng);
    assert_eq!(w.player.position(), DVec2::new(630.0, 360.0));
    assert_eq!(w.player.pending(), DVec2::ZERO);
}

#[test]
fn opposite_keys_resolve_to_the_later_one() {
    let mut w = quiet_world();
    w.tick(&keys(&[Key::MoveUp, Key::MoveDown]), 0, &mut seeded_rng());
    assert_eq!(w.player.position(), DVec2::new(640.0, 365.0));
}

#[test]
fn moving_right_mirrors_player_sprite() {
    let mut w = quiet_world();
    let scene = w.tick(&keys(&[Key::MoveRight]), 0, &mut seeded_rng());
    let player = scene.items.iter().find(|i| i.sprite == SpriteId::Player).unwrap();
    assert!(player.mirrored);
}

#[test]
fn held_fire_key_respects_cooldown() {
    let mut w = quiet_world();
    let mut rng = seeded_rng();
    let fire = keys(&[Key::Fire(Direction::Up)]);
    w.tick(&fire, 100, &mut rng);
    assert!(w.ally_projectiles.is_empty(), "cooldown counts from construction");
    w.tick(&fire, 500, &mut rng);
    assert_eq!(w.ally_projectiles.len(), 1);
    w.tick(&fire, 516, &mut rng);
    assert_eq!(w.ally_projectiles.len(), 1);
}

#[test]
fn fire_keys_spawn_at_most_one_shot_per_cooldown() {
    let mut w = quiet_world();
    let all = keys(&[
        Key::Fire(Direction::Left),
        Key::Fire(Direction::Right),
        Key::Fire(Direction::Up),
        Key::Fire(Direction::Down),
    ]);
    w.tick(&all, 500, &mut seeded_rng());
    assert_eq!(w.ally_projectiles.len(), 1);
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[test]
fn projectile_leaving_arena_is_never_drawn_outside() {
    let mut w = quiet_world();
    let mut rng = seeded_rng();
    let mut scene = w.tick(&keys(&[Key::Fire(Direction::Up)]), 500, &mut rng);
    assert_eq!(scene.count(SpriteId::AllyProjectile), 1);

    let mut now = 500;
    for _ in 0..60 {
        for item in scene.items.iter().filter(|i| i.sprite == SpriteId::AllyProjectile) {
            assert!(scene.arena.contains(&item.rect));
        }
        now += STEP;
        scene = w.tick(&none(), now, &mut rng);
    }
    assert!(w.ally_projectiles.is_empty());
    assert_eq!(scene.count(SpriteId::AllyProjectile), 0);
}

#[test]
fn enemy_shot_leaving_arena_is_removed() {
    let mut w = quiet_world();
    let mut rng = seeded_rng();
    // A dead player no longer absorbs shots, so this one flies through.
    for t in [0, 1000, 2000, 3000, 4000] {
        w.player.on_hit(t);
    }
    let clock = ManualClock::new(5000);
    w.tick(&none(), clock.now_ms(), &mut rng);
    assert_eq!(w.status(), GameStatus::PlayerDead);

    let launcher = Rect::centered_at(DVec2::new(100.0, 360.0), (48.0, 48.0));
    let shot = Projectile::homing(launcher, &w.player.bounds(), Shot { speed: 10.0, damage: 1 });
    w.enemy_projectiles.push(shot);

    for _ in 0..200 {
        if w.enemy_projectiles.is_empty() {
            break;
        }
        clock.advance(STEP);
        let scene = w.tick(&none(), clock.now_ms(), &mut rng);
        for item in scene.items.iter().filter(|i| i.sprite == SpriteId::EnemyProjectile) {
            assert!(scene.arena.contains(&item.rect));
        }
    }
    assert!(w.enemy_projectiles.is_empty());
    assert_eq!(w.player.health(), 0);
}

#[test]
fn two_shots_kill_an_enemy_and_score_once() {
    let mut w = quiet_world();
    let mut rng = seeded_rng();
    let enemy = dummy_enemy(&w, 700.0, 360.0);
    w.enemies.push(enemy);
    let fire = keys(&[Key::Fire(Direction::Right)]);

    w.tick(&fire, 500, &mut rng);
    let now = tick_until_ally_shots_clear(&mut w, 500, &mut rng);
    assert_eq!(w.enemies.len(), 1);
    assert_eq!(w.enemies[0].health(), 1);
    assert!(w.enemies[0].is_flashing());
    assert_eq!(w.score(), 0);

    let now = now.max(1000) + STEP;
    w.tick(&fire, now, &mut rng);
    tick_until_ally_shots_clear(&mut w, now, &mut rng);
    assert!(w.enemies.is_empty());
    assert_eq!(w.score(), 1);
}

#[test]
fn one_projectile_hits_every_overlapping_enemy() {
    let mut w = quiet_world();
    let mut rng = seeded_rng();
    let a = dummy_enemy(&w, 700.0, 350.0);
    let b = dummy_enemy(&w, 700.0, 370.0);
    w.enemies.push(a);
    w.enemies.push(b);

    w.tick(&keys(&[Key::Fire(Direction::Right)]), 500, &mut rng);
    tick_until_ally_shots_clear(&mut w, 500, &mut rng);

    assert_eq!(w.enemies.len(), 2);
    assert!(w.enemies.iter().all(|e| e.health() == 1));
}

#[test]
fn simultaneous_kills_score_one_each() {
    let rules = Rules { enemy_health: 1, ..quiet_rules() };
    let mut w = World::new(rules, 0);
    let mut rng = seeded_rng();
    for y in [350.0, 360.0, 370.0] {
        let e = dummy_enemy(&w, 700.0, y);
        w.enemies.push(e);
    }

    w.tick(&keys(&[Key::Fire(Direction::Right)]), 500, &mut rng);
    tick_until_ally_shots_clear(&mut w, 500, &mut rng);

    assert!(w.enemies.is_empty());
    assert_eq!(w.score(), 3);
}

#[test]
fn homing_shot_scenario_in_world() {
    let mut w = quiet_world();
    let mut rng = seeded_rng();
    w.player = Player::at(w.rules(), 0, DVec2::new(300.0, 100.0));
    let enemy = Enemy::new(w.rules(), 0, DVec2::new(100.0, 100.0), IVec2::ZERO, 3000);
    w.enemies.push(enemy);

    w.tick(&none(), 3000, &mut rng);
    assert_eq!(w.enemy_projectiles.len(), 1);
    assert_eq!(w.enemy_projectiles[0].angle(), 0.0);
    assert_eq!(w.enemy_projectiles[0].position(), DVec2::new(100.0, 100.0));

    w.tick(&none(), 3000 + STEP, &mut rng);
    assert_eq!(w.enemy_projectiles[0].position(), DVec2::new(110.0, 100.0));
}

#[test]
fn enemy_shot_hits_player_once_per_invincibility_window() {
    let mut w = quiet_world();
    let mut rng = seeded_rng();
    let origin = Rect::centered_at(DVec2::new(400.0, 360.0), (48.0, 48.0));
    let shot = Shot { speed: 10.0, damage: 1 };
    let target = w.player.bounds();
    w.enemy_projectiles.push(Projectile::homing(origin, &target, shot));
    w.enemy_projectiles.push(Projectile::homing(origin, &target, shot));

    let mut now = 0;
    for _ in 0..40 {
        now += STEP;
        w.tick(&none(), now, &mut rng);
    }
    assert!(w.enemy_projectiles.is_empty(), "both projectiles consumed");
    assert_eq!(w.player.health(), 4);
}

#[test]
fn enemy_body_contact_damages_player() {
    let mut w = quiet_world();
    let mut rng = seeded_rng();
    let enemy = dummy_enemy(&w, 640.0, 360.0);
    w.enemies.push(enemy);

    w.tick(&none(), 0, &mut rng);
    assert_eq!(w.player.health(), 4);
    w.tick(&none(), 100, &mut rng);
    assert_eq!(w.player.health(), 4, "still invincible");
    w.tick(&none(), 600, &mut rng);
    assert_eq!(w.player.health(), 3);
}

// ── Death & restart ───────────────────────────────────────────────────────────

/// Score 3 with enemies of one hit point, then let a contact enemy take all
/// five health points.  Returns the time of the last tick.
fn kill_three_then_die(w: &mut World, rng: &mut StdRng) -> u64 {
    for y in [350.0, 360.0, 370.0] {
        let e = dummy_enemy(w, 700.0, y);
        w.enemies.push(e);
    }
    w.tick(&keys(&[Key::Fire(Direction::Right)]), 500, rng);
    tick_until_ally_shots_clear(w, 500, rng);
    assert_eq!(w.score(), 3);

    let contact = dummy_enemy(w, 640.0, 360.0);
    w.enemies.push(contact);
    let mut now = 1000;
    for expected in [4, 3, 2, 1, 0] {
        w.tick(&none(), now, rng);
        assert_eq!(w.player.health(), expected);
        now += 600;
    }
    now - 600
}

#[test]
fn five_hits_end_the_game() {
    let rules = Rules { enemy_health: 1, ..quiet_rules() };
    let mut w = World::new(rules, 0);
    let mut rng = seeded_rng();
    let now = kill_three_then_die(&mut w, &mut rng);

    assert_eq!(w.status(), GameStatus::PlayerDead);
    assert!(!w.player.is_alive());

    let scene = w.scene(now);
    assert!(scene.hud.dead);
    assert_eq!(scene.count(SpriteId::Player) + scene.count(SpriteId::PlayerHit), 0);
}

#[test]
fn dead_player_cannot_move_or_fire() {
    let rules = Rules { enemy_health: 1, ..quiet_rules() };
    let mut w = World::new(rules, 0);
    let mut rng = seeded_rng();
    let now = kill_three_then_die(&mut w, &mut rng);
    let before = w.player.position();

    w.tick(&keys(&[Key::MoveLeft, Key::Fire(Direction::Up)]), now + 1000, &mut rng);
    assert_eq!(w.player.position(), before);
    assert!(w.ally_projectiles.is_empty());
    assert_eq!(w.status(), GameStatus::PlayerDead);
}

#[test]
fn restart_is_ignored_while_running() {
    let mut w = quiet_world();
    let mut rng = seeded_rng();
    w.tick(&keys(&[Key::MoveLeft]), 0, &mut rng);
    w.tick(&keys(&[Key::Restart]), STEP, &mut rng);
    assert_eq!(w.player.position(), DVec2::new(635.0, 360.0));
    assert_eq!(w.status(), GameStatus::Running);
}

#[test]
fn restart_after_death_resets_everything() {
    let rules = Rules { enemy_health: 1, ..quiet_rules() };
    let mut w = World::new(rules.clone(), 0);
    let mut rng = seeded_rng();
    let now = kill_three_then_die(&mut w, &mut rng);
    assert_eq!(w.score(), 3);

    let restart_at = now + 1000;
    w.tick(&keys(&[Key::Restart]), restart_at, &mut rng);

    let fresh = World::new(rules, restart_at);
    assert_eq!(w.status(), GameStatus::Running);
    assert_eq!(w.score(), 0);
    assert_eq!(w.player, fresh.player);
    assert_eq!(w.player.health(), 5);
    assert!(w.enemies.is_empty());
    assert!(w.ally_projectiles.is_empty());
    assert!(w.enemy_projectiles.is_empty());
    assert_eq!(w.last_spawn(), restart_at);
}
