/// Game entity types and the movement rule they share.
///
/// Every actor owns a `Body` (position, bounding rectangle, alive flag) and
/// exposes it through the `Entity` trait so mixed collections can be moved,
/// tested for overlap and culled uniformly.
use glam::DVec2;

use crate::constants::FLASH_PERIOD_MS;
use crate::geometry::Rect;
use crate::render::SpriteId;

pub mod enemy;
pub mod player;
pub mod projectile;

pub use enemy::Enemy;
pub use player::{Facing, Player};
pub use projectile::{Direction, Heading, Projectile, Side};

// ── Movement policy ───────────────────────────────────────────────────────────

/// What happens when a displacement would carry an entity outside an area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Containment {
    /// Any displacement is applied.
    Unbounded,
    /// The move is dropped and the entity stays where it was.
    Block(Rect),
    /// The move is dropped and the entity is marked dead.
    Kill(Rect),
}

/// Result of a single hit on something with health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Already dead, or shielded by invincibility.
    Ignored,
    Damaged,
    Killed,
}

// ── Body ──────────────────────────────────────────────────────────────────────

/// Position plus the rectangle derived from it.  `bounds` is recomputed on
/// every accepted move so the two never disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    position: DVec2,
    bounds: Rect,
    alive: bool,
}

impl Body {
    /// A living body of `size` centered on `position`.
    pub fn new(position: DVec2, size: (f64, f64)) -> Self {
        Self {
            position,
            bounds: Rect::centered_at(position, size),
            alive: true,
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Displace by `delta` under `policy`.  Returns whether the move was applied.
    pub fn advance(&mut self, delta: DVec2, policy: Containment) -> bool {
        let next = self.bounds.translate(delta);
        match policy {
            Containment::Unbounded => {}
            Containment::Block(area) if !area.contains(&next) => return false,
            Containment::Kill(area) if !area.contains(&next) => {
                self.alive = false;
                return false;
            }
            Containment::Block(_) | Containment::Kill(_) => {}
        }
        self.position += delta;
        self.bounds = next;
        true
    }
}

// ── Capability trait ──────────────────────────────────────────────────────────

pub trait Entity {
    fn body(&self) -> &Body;

    fn position(&self) -> DVec2 {
        self.body().position()
    }

    fn bounds(&self) -> Rect {
        self.body().bounds()
    }

    fn is_alive(&self) -> bool {
        self.body().is_alive()
    }

    fn overlaps(&self, other: &dyn Entity) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

/// Drop every dead entity from `items`.
pub fn retain_alive<E: Entity>(items: &mut Vec<E>) {
    items.retain(|e| e.is_alive());
}

// ── Shared presentation helper ────────────────────────────────────────────────

/// Pick between the normal and hit sprite for something that flashes after
/// being hit at `since`.  The normal sprite shows through on every tick where
/// the elapsed time is a multiple of `FLASH_PERIOD_MS`.
pub(crate) fn flash_sprite(since: Option<u64>, now: u64, normal: SpriteId, hit: SpriteId) -> SpriteId {
    match since {
        Some(start) if now.saturating_sub(start) % FLASH_PERIOD_MS != 0 => hit,
        _ => normal,
    }
}
