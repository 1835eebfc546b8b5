/// The render request the world emits once per tick, and the interface the
/// drawing frontend implements.  Nothing here performs I/O.
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    PlayerHit,
    AllyProjectile,
    EnemyProjectile,
    Enemy,
    EnemyHit,
}

impl SpriteId {
    pub const ALL: [SpriteId; 6] = [
        SpriteId::Player,
        SpriteId::PlayerHit,
        SpriteId::AllyProjectile,
        SpriteId::EnemyProjectile,
        SpriteId::Enemy,
        SpriteId::EnemyHit,
    ];

    /// Base file name of the sprite inside the data directory.
    pub fn file_stem(self) -> &'static str {
        match self {
            SpriteId::Player => "triangle_dude",
            SpriteId::PlayerHit => "triangle_dude_hit",
            SpriteId::AllyProjectile => "projectile_friend",
            SpriteId::EnemyProjectile => "projectile_foe",
            SpriteId::Enemy => "enemy",
            SpriteId::EnemyHit => "enemy_hit",
        }
    }
}

/// One sprite placed in arena coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    pub sprite: SpriteId,
    pub rect: Rect,
    /// Flip horizontally.
    pub mirrored: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub health: u32,
    /// Show the restart prompt.
    pub dead: bool,
}

/// Everything needed to draw one frame, back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub arena: Rect,
    pub items: Vec<DrawItem>,
    pub hud: Hud,
}

impl Scene {
    pub fn count(&self, sprite: SpriteId) -> usize {
        self.items.iter().filter(|i| i.sprite == sprite).count()
    }
}

/// Drawing collaborator.
pub trait Renderer {
    type Error;

    fn draw_scene(&mut self, scene: &Scene) -> Result<(), Self::Error>;
}
