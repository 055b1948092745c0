//! Physics bodies
//!
//! A `Body` is an axis-aligned box positioned by its center. Static bodies
//! never move; dynamic bodies are integrated by `ArcadeWorld::step`.

use crate::collision::{Aabb, Collidable};

/// Handle to a body inside an `ArcadeWorld`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

/// Handle to a group of bodies inside an `ArcadeWorld`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Immovable level geometry
    Static,
    /// Moved by velocity and gravity
    Dynamic,
}

/// Which sides of a body were in contact during the last step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touching {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Touching {
    pub fn clear(&mut self) {
        *self = Touching::default();
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub kind: BodyKind,
    pub group: Option<GroupId>,
    /// Center position
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub bounce_x: f32,
    pub bounce_y: f32,
    pub allow_gravity: bool,
    pub collide_world_bounds: bool,
    /// Disabled bodies are skipped by the simulation and by contact checks
    pub enabled: bool,
    pub visible: bool,
    /// Contacts with other bodies, reset every step
    pub touching: Touching,
    /// Contacts with the world edges, reset every step
    pub blocked: Touching,
}

impl Body {
    pub fn dynamic(x: f32, y: f32, width: f32, height: f32) -> Self {
        Body {
            kind: BodyKind::Dynamic,
            group: None,
            x,
            y,
            width,
            height,
            velocity_x: 0.0,
            velocity_y: 0.0,
            bounce_x: 0.0,
            bounce_y: 0.0,
            allow_gravity: true,
            collide_world_bounds: false,
            enabled: true,
            visible: true,
            touching: Touching::default(),
            blocked: Touching::default(),
        }
    }

    pub fn fixed(x: f32, y: f32, width: f32, height: f32) -> Self {
        Body {
            kind: BodyKind::Static,
            allow_gravity: false,
            ..Body::dynamic(x, y, width, height)
        }
    }

    pub fn with_bounce(mut self, bounce_x: f32, bounce_y: f32) -> Self {
        self.bounce_x = bounce_x;
        self.bounce_y = bounce_y;
        self
    }

    pub fn with_world_bounds(mut self) -> Self {
        self.collide_world_bounds = true;
        self
    }

    pub fn with_velocity(mut self, velocity_x: f32, velocity_y: f32) -> Self {
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
        self
    }

    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    pub fn set_velocity(&mut self, velocity_x: f32, velocity_y: f32) {
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }
}

impl Collidable for Body {
    fn get_bounds(&self) -> Aabb {
        Aabb::from_center(self.x, self.y, self.width, self.height)
    }
}
