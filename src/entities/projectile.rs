use glam::DVec2;

use super::{Body, Containment, Entity};
use crate::constants::PROJECTILE_SIZE;
use crate::geometry::{bearing, from_polar, Rect};
use crate::render::SpriteId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Ally,
    Enemy,
}

/// Cardinal firing direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Unit step in screen coordinates (y down).
    pub fn unit(self) -> DVec2 {
        match self {
            Direction::Up => DVec2::new(0.0, -1.0),
            Direction::Down => DVec2::new(0.0, 1.0),
            Direction::Left => DVec2::new(-1.0, 0.0),
            Direction::Right => DVec2::new(1.0, 0.0),
        }
    }
}

/// How a projectile picks its displacement each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Heading {
    /// Constant step along a direction chosen at fire time.
    Fixed(Direction),
    /// Re-aim every tick from the launch point toward the target's center.
    /// The reference point stays at `origin`, so the path is a straight line
    /// toward wherever the target was on the last re-aim.
    Homing { origin: DVec2 },
}

/// Speed and damage a shooter stamps onto the projectiles it fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    pub speed: f64,
    pub damage: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    body: Body,
    side: Side,
    speed: f64,
    damage: u32,
    origin: Rect,
    heading: Heading,
    /// Step applied on the last advance (or the initial aim for homing shots).
    velocity: DVec2,
}

impl Projectile {
    /// Player shot: leaves the center of `origin` and never turns.
    pub fn ally(origin: Rect, direction: Direction, shot: Shot) -> Self {
        Self {
            body: Body::new(origin.center(), PROJECTILE_SIZE),
            side: Side::Ally,
            speed: shot.speed,
            damage: shot.damage,
            origin,
            heading: Heading::Fixed(direction),
            velocity: direction.unit() * shot.speed,
        }
    }

    /// Enemy shot: leaves the center of `origin`, aimed at `target`.
    pub fn homing(origin: Rect, target: &Rect, shot: Shot) -> Self {
        let launch = origin.center();
        Self {
            body: Body::new(launch, PROJECTILE_SIZE),
            side: Side::Enemy,
            speed: shot.speed,
            damage: shot.damage,
            origin,
            heading: Heading::Homing { origin: launch },
            velocity: from_polar(shot.speed, bearing(launch, target.center())),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn origin(&self) -> Rect {
        self.origin
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Angle of the current step, in radians.
    pub fn angle(&self) -> f64 {
        self.velocity.y.atan2(self.velocity.x)
    }

    /// Consumed by a hit.
    pub fn kill(&mut self) {
        self.body.kill();
    }

    /// One tick of flight.  Homing shots re-aim at `target` when one is
    /// given and otherwise keep their last step.  A move that would leave
    /// `arena` kills the projectile in place.
    pub fn advance(&mut self, target: Option<&Rect>, arena: Rect) {
        if !self.body.is_alive() {
            return;
        }
        if let (Heading::Homing { origin }, Some(target)) = (self.heading, target) {
            self.velocity = from_polar(self.speed, bearing(origin, target.center()));
        }
        self.body.advance(self.velocity, Containment::Kill(arena));
    }

    pub fn sprite(&self) -> SpriteId {
        match self.side {
            Side::Ally => SpriteId::AllyProjectile,
            Side::Enemy => SpriteId::EnemyProjectile,
        }
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }
}
