/// The world and its fixed-step game loop.
///
/// `World::tick` runs one simulation step in a fixed order: input, player,
/// ally projectiles, enemy projectiles, spawning, enemies, cleanup, status.
/// The order is part of the contract; for instance an enemy spawned in a
/// tick can never be struck by a projectile resolved earlier in that tick.
/// All randomness comes through the injected `rng` and all time through
/// `now`, so a seeded RNG and a scripted clock replay a game exactly.
use rand::Rng;
use tracing::{debug, info};

use crate::config::Rules;
use crate::entities::{retain_alive, Direction, Enemy, Entity, HitOutcome, Player, Projectile};
use crate::geometry::Rect;
use crate::input::{InputSnapshot, Key};
use crate::render::{DrawItem, Hud, Scene};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Terminal until a restart is requested.
    PlayerDead,
}

#[derive(Clone, Debug)]
pub struct World {
    rules: Rules,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub ally_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    score: u32,
    status: GameStatus,
    last_spawn: u64,
    last_input: InputSnapshot,
}

impl World {
    /// Fresh game: centered full-health player, no enemies, no projectiles.
    pub fn new(rules: Rules, now: u64) -> Self {
        Self {
            player: Player::new(&rules, now),
            enemies: Vec::new(),
            ally_projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            score: 0,
            status: GameStatus::Running,
            last_spawn: now,
            last_input: InputSnapshot::default(),
            rules,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn arena(&self) -> Rect {
        self.rules.arena()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_spawn(&self) -> u64 {
        self.last_spawn
    }

    /// Throw everything away and start over.
    pub fn restart(&mut self, now: u64) {
        let last_input = std::mem::take(&mut self.last_input);
        *self = World::new(self.rules.clone(), now);
        self.last_input = last_input;
        info!("game restarted");
    }

    // ── Per-tick step ─────────────────────────────────────────────────────────

    /// Advance the simulation by one tick and return the frame to draw.
    pub fn tick(&mut self, input: &InputSnapshot, now: u64, rng: &mut impl Rng) -> Scene {
        let arena = self.arena();

        // 1. Input
        self.apply_input(input, now);

        // 2. Player movement and firing
        if self.status == GameStatus::Running {
            self.player.update(arena, now);
            for direction in Direction::ALL {
                if input.is_pressed(Key::Fire(direction)) {
                    if let Some(projectile) = self.player.try_fire(direction, now) {
                        debug!(?direction, "player fired");
                        self.ally_projectiles.push(projectile);
                    }
                }
            }
        }

        // 3. Ally projectiles vs enemies
        self.resolve_ally_projectiles(arena, now);

        // 4. Enemy projectiles vs player
        self.resolve_enemy_projectiles(arena, now);

        // 5. Spawning
        self.try_spawn_enemy(now, rng);

        // 6. Enemies: move, fire, body contact
        self.update_enemies(arena, now);

        // 7. Cleanup
        retain_alive(&mut self.enemies);
        retain_alive(&mut self.ally_projectiles);
        retain_alive(&mut self.enemy_projectiles);

        // 8. Status
        if self.status == GameStatus::Running && !self.player.is_alive() {
            self.status = GameStatus::PlayerDead;
            info!(score = self.score, "player died");
        }

        // 9. Render request
        self.scene(now)
    }

    fn apply_input(&mut self, input: &InputSnapshot, now: u64) {
        if self.status == GameStatus::PlayerDead && input.is_pressed(Key::Restart) {
            self.restart(now);
        }

        if input.released_movement(&self.last_input) {
            self.player.stop();
        }
        // Deltas overwrite per axis, so with opposite keys held the later one wins.
        if input.is_pressed(Key::MoveUp) {
            self.player.move_up();
        }
        if input.is_pressed(Key::MoveDown) {
            self.player.move_down();
        }
        if input.is_pressed(Key::MoveLeft) {
            self.player.move_left();
        }
        if input.is_pressed(Key::MoveRight) {
            self.player.move_right();
        }

        self.last_input = input.clone();
    }

    /// A projectile that overlaps several enemies hits all of them before
    /// it is consumed.
    fn resolve_ally_projectiles(&mut self, arena: Rect, now: u64) {
        for projectile in &mut self.ally_projectiles {
            projectile.advance(None, arena);
            if !projectile.is_alive() {
                continue;
            }
            let mut hit = false;
            for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
                if !projectile.overlaps(&*enemy) {
                    continue;
                }
                hit = true;
                if enemy.on_hit(projectile.damage(), now) == HitOutcome::Killed {
                    self.score += 1;
                    info!(score = self.score, "enemy destroyed");
                }
            }
            if hit {
                projectile.kill();
            }
        }
    }

    fn resolve_enemy_projectiles(&mut self, arena: Rect, now: u64) {
        let target = self.player.bounds();
        for projectile in &mut self.enemy_projectiles {
            projectile.advance(Some(&target), arena);
            if projectile.is_alive()
                && self.player.is_alive()
                && projectile.bounds().overlaps(&target)
            {
                self.player.on_hit(now);
                projectile.kill();
            }
        }
    }

    /// Spawn one enemy if under the cap and either the arena is empty or the
    /// spawn delay has passed.  Returns whether an enemy was added.
    pub fn try_spawn_enemy(&mut self, now: u64, rng: &mut impl Rng) -> bool {
        // Counts enemies killed earlier this tick; they are only swept in cleanup.
        if self.enemies.len() >= self.rules.enemy_cap {
            return false;
        }
        if !self.enemies.is_empty() && now.saturating_sub(self.last_spawn) < self.rules.enemy_spawn_delay_ms {
            return false;
        }
        let enemy = Enemy::spawn(&self.rules, now, rng);
        debug!(x = enemy.position().x, y = enemy.position().y, "enemy spawned");
        self.enemies.push(enemy);
        self.last_spawn = now;
        true
    }

    fn update_enemies(&mut self, arena: Rect, now: u64) {
        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            enemy.update(arena, now);
            if let Some(projectile) = enemy.try_fire(&self.player.bounds(), now) {
                self.enemy_projectiles.push(projectile);
            }
            if self.player.is_alive() && enemy.overlaps(&self.player) {
                self.player.on_hit(now);
            }
        }
    }

    // ── Presentation ──────────────────────────────────────────────────────────

    /// Draw list for the current state, back to front.
    pub fn scene(&self, now: u64) -> Scene {
        let mut items: Vec<DrawItem> = Vec::new();
        for p in self.ally_projectiles.iter().chain(&self.enemy_projectiles) {
            items.push(DrawItem { sprite: p.sprite(), rect: p.bounds(), mirrored: false });
        }
        for e in &self.enemies {
            items.push(DrawItem { sprite: e.sprite(now), rect: e.bounds(), mirrored: false });
        }
        if self.player.is_alive() {
            items.push(DrawItem {
                sprite: self.player.sprite(now),
                rect: self.player.bounds(),
                mirrored: self.player.mirrored(),
            });
        }
        Scene {
            arena: self.arena(),
            items,
            hud: Hud {
                score: self.score,
                health: self.player.health(),
                dead: self.status == GameStatus::PlayerDead,
            },
        }
    }
}
