//! Entity component definitions.

use std::collections::BTreeSet;

use derive_more::{Deref, DerefMut};
use glam::Vec2;

use crate::{ChaseSpec, Entity, ItemKind, Terrain, TileAccess};

/// Display name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Name(pub String);

/// Map printout glyph.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Icon(pub char);

/// World position. Entities without one are not in the world, carried
/// items for instance.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pos(pub Vec2);

/// Movement speed in world units per second.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Speed(pub f32);

/// The agent's own terrain permission set.
///
/// Always a private copy seeded at spawn, never shared between agents,
/// so one agent's capability overlays can't leak into another's.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Access(pub TileAccess);

/// Pursue-or-evade controller, for agents that watch a target.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Chaser(pub Option<ChaseSpec>);

/// Item identity for entities that can be picked up.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Item(pub Option<ItemKind>);

/// Terrains an item grants its carrier as an overlay.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Grants(pub BTreeSet<Terrain>);

/// Terrain rewrite a carried item performs under its carrier.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Transmutes(pub Option<(Terrain, Terrain)>);

/// The item this agent is carrying, at most one at a time.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Carrying(pub Option<Entity>);

/// Set on items while they ride along with a carrier.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct IsCarried(pub bool);

////////////////////////////////

/// Entity component system. Stores all the data of game entities.
#[derive(Default, Deref, DerefMut)]
pub(crate) struct Ecs(pub(crate) hecs::World);

impl Ecs {
    pub(crate) fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        (&self.0).into_iter().map(|e| Entity(e.entity()))
    }
}
