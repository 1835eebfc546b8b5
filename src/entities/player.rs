use glam::DVec2;
use tracing::debug;

use super::projectile::Shot;
use super::{flash_sprite, Body, Containment, Direction, Entity, HitOutcome, Projectile};
use crate::config::Rules;
use crate::constants::PLAYER_SIZE;
use crate::geometry::Rect;
use crate::render::SpriteId;

/// Which way the sprite looks.  The art faces left; facing right mirrors it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    body: Body,
    health: u32,
    speed: f64,
    facing: Facing,
    /// Displacement applied on the next tick.  Overwritten, never summed.
    pending: DVec2,
    invincible_since: Option<u64>,
    invincible_ms: u64,
    fire_cooldown_ms: u64,
    last_fire: u64,
    shot: Shot,
}

impl Player {
    /// Full-health player centered in the arena.  The fire cooldown starts
    /// counting at `now`.
    pub fn new(rules: &Rules, now: u64) -> Self {
        let center = rules.arena().center();
        Self {
            body: Body::new(center, PLAYER_SIZE),
            health: rules.player_health,
            speed: rules.player_speed,
            facing: Facing::Left,
            pending: DVec2::ZERO,
            invincible_since: None,
            invincible_ms: rules.player_invincible_ms,
            fire_cooldown_ms: rules.player_fire_cooldown_ms,
            last_fire: now,
            shot: Shot { speed: rules.projectile_speed, damage: rules.projectile_damage },
        }
    }

    /// Same as `new` but placed at `position`.
    pub fn at(rules: &Rules, now: u64, position: DVec2) -> Self {
        Self { body: Body::new(position, PLAYER_SIZE), ..Self::new(rules, now) }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn pending(&self) -> DVec2 {
        self.pending
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_since.is_some()
    }

    /// Whether the sprite is drawn flipped horizontally.
    pub fn mirrored(&self) -> bool {
        self.facing == Facing::Right
    }

    // ── Input ─────────────────────────────────────────────────────────────

    pub fn move_up(&mut self) {
        self.pending.y = -self.speed;
    }

    pub fn move_down(&mut self) {
        self.pending.y = self.speed;
    }

    pub fn move_left(&mut self) {
        self.pending.x = -self.speed;
        self.facing = Facing::Left;
    }

    pub fn move_right(&mut self) {
        self.pending.x = self.speed;
        self.facing = Facing::Right;
    }

    pub fn stop(&mut self) {
        self.pending = DVec2::ZERO;
    }

    /// Fire toward `direction` if the cooldown has elapsed.
    pub fn try_fire(&mut self, direction: Direction, now: u64) -> Option<Projectile> {
        if now.saturating_sub(self.last_fire) < self.fire_cooldown_ms {
            return None;
        }
        self.last_fire = now;
        Some(Projectile::ally(self.bounds(), direction, self.shot))
    }

    // ── Simulation ────────────────────────────────────────────────────────

    /// Apply the pending displacement if the result stays inside `arena`,
    /// then let invincibility lapse.
    pub fn update(&mut self, arena: Rect, now: u64) {
        if self.pending != DVec2::ZERO {
            self.body.advance(self.pending, Containment::Block(arena));
        }
        self.expire_invincibility(now);
    }

    /// Clear the invincible flag once more than `invincible_ms` has passed.
    pub fn expire_invincibility(&mut self, now: u64) {
        if let Some(start) = self.invincible_since {
            if now.saturating_sub(start) > self.invincible_ms {
                self.invincible_since = None;
            }
        }
    }

    /// Take one point of damage unless invincible.  The hit that empties
    /// health also kills.
    pub fn on_hit(&mut self, now: u64) -> HitOutcome {
        self.expire_invincibility(now);
        if !self.body.is_alive() || self.is_invincible() {
            return HitOutcome::Ignored;
        }
        if self.health == 0 {
            self.body.kill();
            return HitOutcome::Killed;
        }
        self.health -= 1;
        self.invincible_since = Some(now);
        debug!(health = self.health, "player hit");
        if self.health == 0 {
            self.body.kill();
            HitOutcome::Killed
        } else {
            HitOutcome::Damaged
        }
    }

    pub fn sprite(&self, now: u64) -> SpriteId {
        flash_sprite(self.invincible_since, now, SpriteId::Player, SpriteId::PlayerHit)
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }
}
