//! Simulation constants and tuning parameters.
//!
//! Distances are arena pixels, times are milliseconds, speeds are pixels per
//! tick.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// ── Arena ─────────────────────────────────────────────────────────────────────

pub const ARENA_WIDTH: f64 = 1280.0;
pub const ARENA_HEIGHT: f64 = 720.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_HEALTH: u32 = 5;
pub const PLAYER_SPEED: f64 = 5.0;
pub const PLAYER_FIRE_COOLDOWN_MS: u64 = 500;
pub const PLAYER_INVINCIBLE_MS: u64 = 500;
pub const PLAYER_SIZE: (f64, f64) = (40.0, 40.0);

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const PROJECTILE_SPEED: f64 = 10.0;
pub const PROJECTILE_DAMAGE: u32 = 1;
pub const PROJECTILE_SIZE: (f64, f64) = (12.0, 12.0);

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_HEALTH: u32 = 2;
/// Inclusive bound of each velocity component, drawn once at spawn.
pub const ENEMY_MAX_SPEED: i32 = 4;
/// Fire cooldown is drawn from `ENEMY_FIRE_COOLDOWN_MS.0..ENEMY_FIRE_COOLDOWN_MS.1`.
pub const ENEMY_FIRE_COOLDOWN_MS: (u64, u64) = (3000, 5000);
pub const ENEMY_HIT_FLASH_MS: u64 = 500;
pub const ENEMY_SIZE: (f64, f64) = (48.0, 48.0);

// ── Spawning ──────────────────────────────────────────────────────────────────

pub const ENEMY_CAP: usize = 3;
pub const ENEMY_SPAWN_DELAY_MS: u64 = 3000;

// ── Presentation ──────────────────────────────────────────────────────────────

/// While flashing, the normal sprite is shown when `elapsed % FLASH_PERIOD_MS == 0`.
pub const FLASH_PERIOD_MS: u64 = 10;

pub const TITLE: &str = "Triangle_man_adventure";
pub const BACKGROUND_RGB: (u8, u8, u8) = (255, 208, 148);
