use glam::{DVec2, IVec2};
use rand::Rng;

use super::projectile::Shot;
use super::{flash_sprite, Body, Containment, Entity, HitOutcome, Projectile};
use crate::config::Rules;
use crate::constants::{ENEMY_FIRE_COOLDOWN_MS, ENEMY_MAX_SPEED, ENEMY_SIZE};
use crate::geometry::Rect;
use crate::render::SpriteId;

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    body: Body,
    health: u32,
    velocity: IVec2,
    fire_cooldown_ms: u64,
    last_fire: u64,
    hit_since: Option<u64>,
    hit_flash_ms: u64,
    shot: Shot,
}

impl Enemy {
    /// Spawn in one of the two edge lanes with a random velocity and fire
    /// cooldown.  Lanes keep new enemies away from the arena interior.
    pub fn spawn(rules: &Rules, now: u64, rng: &mut impl Rng) -> Self {
        let (width, height) = (rules.arena_width as i32, rules.arena_height as i32);
        let w = ENEMY_SIZE.0 as i32;

        let x = if rng.gen_bool(0.5) {
            rng.gen_range(w..=w * 2)
        } else {
            rng.gen_range(width - w * 2..=width - w)
        };
        let y = rng.gen_range(w..=height - w);
        let velocity = IVec2::new(
            rng.gen_range(-ENEMY_MAX_SPEED..=ENEMY_MAX_SPEED),
            rng.gen_range(-ENEMY_MAX_SPEED..=ENEMY_MAX_SPEED),
        );
        let fire_cooldown_ms = rng.gen_range(ENEMY_FIRE_COOLDOWN_MS.0..ENEMY_FIRE_COOLDOWN_MS.1);

        Self::new(rules, now, DVec2::new(x as f64, y as f64), velocity, fire_cooldown_ms)
    }

    /// Deterministic constructor.
    pub fn new(rules: &Rules, now: u64, position: DVec2, velocity: IVec2, fire_cooldown_ms: u64) -> Self {
        Self {
            body: Body::new(position, ENEMY_SIZE),
            health: rules.enemy_health,
            velocity,
            fire_cooldown_ms,
            last_fire: now,
            hit_since: None,
            hit_flash_ms: rules.enemy_hit_flash_ms,
            shot: Shot { speed: rules.projectile_speed, damage: rules.projectile_damage },
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn velocity(&self) -> IVec2 {
        self.velocity
    }

    pub fn fire_cooldown_ms(&self) -> u64 {
        self.fire_cooldown_ms
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_since.is_some()
    }

    /// Step by the current velocity, bouncing off whichever arena edges the
    /// new rectangle touches, then let the hit flash decay.
    pub fn update(&mut self, arena: Rect, now: u64) {
        self.body.advance(self.velocity.as_dvec2(), Containment::Unbounded);

        let b = self.body.bounds();
        if b.top() <= arena.top() || b.bottom() >= arena.bottom() {
            self.velocity.y = -self.velocity.y;
        }
        if b.left() <= arena.left() || b.right() >= arena.right() {
            self.velocity.x = -self.velocity.x;
        }

        if let Some(start) = self.hit_since {
            if now.saturating_sub(start) > self.hit_flash_ms {
                self.hit_since = None;
            }
        }
    }

    /// Fire a homing shot at `target` if the cooldown has elapsed.
    pub fn try_fire(&mut self, target: &Rect, now: u64) -> Option<Projectile> {
        if now.saturating_sub(self.last_fire) < self.fire_cooldown_ms {
            return None;
        }
        self.last_fire = now;
        Some(Projectile::homing(self.bounds(), target, self.shot))
    }

    /// Apply `damage`.  Returns `Killed` exactly once, on the hit that
    /// empties health; hits on a dead enemy are ignored.
    pub fn on_hit(&mut self, damage: u32, now: u64) -> HitOutcome {
        if !self.body.is_alive() {
            return HitOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(damage);
        self.hit_since = Some(now);
        if self.health == 0 {
            self.body.kill();
            HitOutcome::Killed
        } else {
            HitOutcome::Damaged
        }
    }

    pub fn sprite(&self, now: u64) -> SpriteId {
        flash_sprite(self.hit_since, now, SpriteId::Enemy, SpriteId::EnemyHit)
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }
}
