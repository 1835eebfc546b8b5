/// Runtime tunables.  `Rules::default()` is the shipped game; tests build
/// smaller worlds by overriding individual fields.
use crate::constants::*;
use crate::geometry::Rect;

#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
    pub arena_width: f64,
    pub arena_height: f64,

    pub player_health: u32,
    pub player_speed: f64,
    pub player_fire_cooldown_ms: u64,
    pub player_invincible_ms: u64,

    pub projectile_speed: f64,
    pub projectile_damage: u32,

    pub enemy_health: u32,
    pub enemy_cap: usize,
    pub enemy_spawn_delay_ms: u64,
    pub enemy_hit_flash_ms: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            player_health: PLAYER_HEALTH,
            player_speed: PLAYER_SPEED,
            player_fire_cooldown_ms: PLAYER_FIRE_COOLDOWN_MS,
            player_invincible_ms: PLAYER_INVINCIBLE_MS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_damage: PROJECTILE_DAMAGE,
            enemy_health: ENEMY_HEALTH,
            enemy_cap: ENEMY_CAP,
            enemy_spawn_delay_ms: ENEMY_SPAWN_DELAY_MS,
            enemy_hit_flash_ms: ENEMY_HIT_FLASH_MS,
        }
    }
}

impl Rules {
    /// The containment rectangle every bounded entity must stay inside.
    pub fn arena(&self) -> Rect {
        Rect::new(0.0, 0.0, self.arena_width, self.arena_height)
    }
}
