//! The arcade world: gravity, integration, and pairwise contacts
//!
//! # Architecture
//!
//! Contact handling is split in two phases. `step()` moves bodies, resolves
//! blocking collisions, and returns a list of `ContactEvent`s for the pairs
//! that asked to be notified. The caller (the host loop) hands those events
//! to the scene afterwards. This keeps the world free of callbacks that would
//! need to borrow scene state.
//!
//! # Rust Learning Notes
//!
//! - **Index handles**: `BodyId`/`GroupId` are plain indices, so the scene can
//!   keep them around without fighting the borrow checker
//! - **Copy-then-write**: pair resolution reads two bodies' bounds by value,
//!   then writes each body back separately instead of borrowing both mutably

use super::body::{Body, BodyId, GroupId};
use crate::collision::{aabb_intersect, calculate_overlap, Aabb, Collidable};
use log::debug;

/// One side of a contact pair: a single body or every member of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Body(BodyId),
    Group(GroupId),
}

impl From<BodyId> for Target {
    fn from(id: BodyId) -> Self {
        Target::Body(id)
    }
}

impl From<GroupId> for Target {
    fn from(id: GroupId) -> Self {
        Target::Group(id)
    }
}

/// Handle to a registered contact pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactMode {
    /// Blocking: bodies are pushed apart
    Collide,
    /// Non-blocking: intersection is only reported
    Overlap,
}

#[derive(Debug, Clone)]
struct ContactPair {
    a: Target,
    b: Target,
    mode: ContactMode,
    notify: bool,
}

/// Raised by `step()` when a notifying pair's bodies touched.
///
/// `a` always belongs to the pair's first target and `b` to its second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub pair: PairId,
    pub a: BodyId,
    pub b: BodyId,
}

pub struct ArcadeWorld {
    bounds: Aabb,
    gravity_y: f32,
    bodies: Vec<Body>,
    groups: Vec<Vec<BodyId>>,
    pairs: Vec<ContactPair>,
    paused: bool,
}

impl ArcadeWorld {
    pub fn new(width: f32, height: f32, gravity_y: f32) -> Self {
        ArcadeWorld {
            bounds: Aabb::new(0.0, 0.0, width, height),
            gravity_y,
            bodies: Vec::new(),
            groups: Vec::new(),
            pairs: Vec::new(),
            paused: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn create_group(&mut self) -> GroupId {
        self.groups.push(Vec::new());
        GroupId(self.groups.len() - 1)
    }

    /// Adds a body, optionally as a member of `group`
    pub fn add(&mut self, mut body: Body, group: Option<GroupId>) -> BodyId {
        let id = BodyId(self.bodies.len());
        body.group = group;
        self.bodies.push(body);

        if let Some(group) = group {
            self.groups[group.0].push(id);
        }

        id
    }

    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.0]
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.0]
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (BodyId(index), body))
    }

    /// Members of a group in insertion order
    pub fn members(&self, group: GroupId) -> &[BodyId] {
        &self.groups[group.0]
    }

    pub fn count_active(&self, group: GroupId) -> usize {
        self.members(group)
            .iter()
            .filter(|id| self.body(**id).enabled)
            .count()
    }

    /// Register a blocking pair that resolves silently
    pub fn add_collider(&mut self, a: impl Into<Target>, b: impl Into<Target>) -> PairId {
        self.add_pair(a.into(), b.into(), ContactMode::Collide, false)
    }

    /// Register a blocking pair that also reports each contact
    pub fn add_collider_with_events(
        &mut self,
        a: impl Into<Target>,
        b: impl Into<Target>,
    ) -> PairId {
        self.add_pair(a.into(), b.into(), ContactMode::Collide, true)
    }

    /// Register a non-blocking pair that reports each intersection
    pub fn add_overlap(&mut self, a: impl Into<Target>, b: impl Into<Target>) -> PairId {
        self.add_pair(a.into(), b.into(), ContactMode::Overlap, true)
    }

    fn add_pair(&mut self, a: Target, b: Target, mode: ContactMode, notify: bool) -> PairId {
        self.pairs.push(ContactPair { a, b, mode, notify });
        PairId(self.pairs.len() - 1)
    }

    /// Removes a body from the simulation, stopping it.
    pub fn disable_body(&mut self, id: BodyId, hide: bool) {
        let body = self.body_mut(id);
        body.enabled = false;
        body.set_velocity(0.0, 0.0);
        if hide {
            body.visible = false;
        }
    }

    /// Puts a disabled body back at `(x, y)` at rest and makes it visible.
    pub fn enable_body(&mut self, id: BodyId, x: f32, y: f32) {
        let body = self.body_mut(id);
        body.set_position(x, y);
        body.set_velocity(0.0, 0.0);
        body.touching.clear();
        body.blocked.clear();
        body.enabled = true;
        body.visible = true;
    }

    pub fn pause(&mut self) {
        if !self.paused {
            debug!("Arcade world paused");
        }
        self.paused = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Order: integrate every enabled dynamic body, clamp to world bounds,
    /// then check each registered pair in registration order. A paused world
    /// does nothing and reports nothing.
    pub fn step(&mut self, dt: f32) -> Vec<ContactEvent> {
        if self.paused {
            return Vec::new();
        }

        for index in 0..self.bodies.len() {
            self.integrate(index, dt);
        }

        let mut events = Vec::new();

        for pair_index in 0..self.pairs.len() {
            let pair = self.pairs[pair_index].clone();
            let firsts = self.resolve_target(pair.a);
            let seconds = self.resolve_target(pair.b);

            for &a in &firsts {
                for &b in &seconds {
                    if a == b || !self.body(a).enabled || !self.body(b).enabled {
                        continue;
                    }

                    if !aabb_intersect(&self.body(a).get_bounds(), &self.body(b).get_bounds()) {
                        continue;
                    }

                    if pair.mode == ContactMode::Collide {
                        self.separate(a, b);
                    }

                    if pair.notify {
                        events.push(ContactEvent {
                            pair: PairId(pair_index),
                            a,
                            b,
                        });
                    }
                }
            }
        }

        events
    }

    fn resolve_target(&self, target: Target) -> Vec<BodyId> {
        match target {
            Target::Body(id) => vec![id],
            Target::Group(group) => self.members(group).to_vec(),
        }
    }

    fn integrate(&mut self, index: usize, dt: f32) {
        let gravity_y = self.gravity_y;
        let world = self.bounds;
        let body = &mut self.bodies[index];

        if body.is_static() || !body.enabled {
            return;
        }

        body.touching.clear();
        body.blocked.clear();

        if body.allow_gravity {
            body.velocity_y += gravity_y * dt;
        }

        body.x += body.velocity_x * dt;
        body.y += body.velocity_y * dt;

        if body.collide_world_bounds {
            clamp_to_world(body, &world);
        }
    }

    /// Pushes two intersecting bodies apart along the axis of least
    /// penetration and reflects the approaching velocity by each body's bounce.
    fn separate(&mut self, a: BodyId, b: BodyId) {
        let bounds_a = self.body(a).get_bounds();
        let bounds_b = self.body(b).get_bounds();
        let (overlap_x, overlap_y) = calculate_overlap(&bounds_a, &bounds_b);

        let (share_a, share_b) = match (self.body(a).is_static(), self.body(b).is_static()) {
            (true, true) => return,
            (false, true) => (1.0, 0.0),
            (true, false) => (0.0, 1.0),
            (false, false) => (0.5, 0.5),
        };

        if overlap_y.abs() <= overlap_x.abs() {
            // a above b when overlap_y is positive
            let a_above = overlap_y > 0.0;
            {
                let body = self.body_mut(a);
                body.y -= overlap_y * share_a;
                if a_above {
                    body.touching.down = true;
                } else {
                    body.touching.up = true;
                }
                if !body.is_static() && (body.velocity_y > 0.0) == a_above && body.velocity_y != 0.0 {
                    body.velocity_y = -body.velocity_y * body.bounce_y;
                }
            }
            {
                let body = self.body_mut(b);
                body.y += overlap_y * share_b;
                if a_above {
                    body.touching.up = true;
                } else {
                    body.touching.down = true;
                }
                if !body.is_static() && (body.velocity_y < 0.0) == a_above && body.velocity_y != 0.0 {
                    body.velocity_y = -body.velocity_y * body.bounce_y;
                }
            }
        } else {
            let a_left = overlap_x > 0.0;
            {
                let body = self.body_mut(a);
                body.x -= overlap_x * share_a;
                if a_left {
                    body.touching.right = true;
                } else {
                    body.touching.left = true;
                }
                if !body.is_static() && (body.velocity_x > 0.0) == a_left && body.velocity_x != 0.0 {
                    body.velocity_x = -body.velocity_x * body.bounce_x;
                }
            }
            {
                let body = self.body_mut(b);
                body.x += overlap_x * share_b;
                if a_left {
                    body.touching.left = true;
                } else {
                    body.touching.right = true;
                }
                if !body.is_static() && (body.velocity_x < 0.0) == a_left && body.velocity_x != 0.0 {
                    body.velocity_x = -body.velocity_x * body.bounce_x;
                }
            }
        }
    }
}

/// Keeps a body inside the world, bouncing it off the edges it hits
fn clamp_to_world(body: &mut Body, world: &Aabb) {
    let bounds = body.get_bounds();

    if bounds.x < world.x {
        body.x += world.x - bounds.x;
        body.blocked.left = true;
        if body.velocity_x < 0.0 {
            body.velocity_x = -body.velocity_x * body.bounce_x;
        }
    } else if bounds.right() > world.right() {
        body.x -= bounds.right() - world.right();
        body.blocked.right = true;
        if body.velocity_x > 0.0 {
            body.velocity_x = -body.velocity_x * body.bounce_x;
        }
    }

    if bounds.y < world.y {
        body.y += world.y - bounds.y;
        body.blocked.up = true;
        if body.velocity_y < 0.0 {
            body.velocity_y = -body.velocity_y * body.bounce_y;
        }
    } else if bounds.bottom() > world.bottom() {
        body.y -= bounds.bottom() - world.bottom();
        body.blocked.down = true;
        if body.velocity_y > 0.0 {
            body.velocity_y = -body.velocity_y * body.bounce_y;
        }
    }
}
