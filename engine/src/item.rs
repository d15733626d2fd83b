//! Carryable items that grant terrain capabilities.

use serde::{Deserialize, Serialize};

use crate::{ecs::*, prelude::*};

/// Kinds of carryable items.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Goat,
    Boat,
    Pickaxe,
}

use ItemKind::*;

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            Goat => "goat",
            Boat => "boat",
            Pickaxe => "pickaxe",
        }
    }

    pub fn icon(self) -> char {
        match self {
            Goat => 'g',
            Boat => 'b',
            Pickaxe => 'p',
        }
    }

    /// Terrain granted while carried, when the scenario doesn't say
    /// otherwise.
    pub fn default_grants(self) -> &'static [Terrain] {
        match self {
            Goat => &[Terrain::Crag],
            Boat => &[Terrain::Water],
            Pickaxe => &[Terrain::Rock],
        }
    }

    /// Default terrain rewrite performed under the carrier.
    pub fn default_transmutes(self) -> Option<(Terrain, Terrain)> {
        match self {
            Pickaxe => Some((Terrain::Rock, Terrain::Gravel)),
            _ => None,
        }
    }
}

impl Entity {
    /// Whether this entity is an item lying loose in the world.
    pub fn is_loose_item(&self, r: &Runtime) -> bool {
        self.get::<Item>(r).0.is_some() && !self.get::<IsCarried>(r).0
    }

    /// The item this agent carries, if any.
    pub fn carried(&self, r: &Runtime) -> Option<Entity> {
        self.get::<Carrying>(r).0
    }

    /// Pick an item up. The carrier gains the item's terrain grants as a
    /// capability overlay and the item leaves the map.
    ///
    /// Refused while already carrying something, one item at a time.
    pub fn pick_up(&self, r: &mut Runtime, item: Entity) {
        if self.carried(r).is_some() {
            log::debug!("{} is already carrying an item", self.desc(r));
            return;
        }
        if item.get::<Item>(r).0.is_none() {
            log::error!("pick_up: {} is not an item", item.desc(r));
            return;
        }

        let Grants(grants) = item.get::<Grants>(r);
        if !grants.is_empty() {
            self.extend_access(r, grants);
        }

        self.set(r, Carrying(Some(item)));
        item.set(r, IsCarried(true));
        item.unplace(r);

        log::info!("{} picked up {}", self.desc(r), item.desc(r));
    }

    /// Drop the carried item at the carrier's feet and return the
    /// carrier's permissions to their configured default.
    pub fn drop_carried(&self, r: &mut Runtime) {
        let Some(item) = self.carried(r) else {
            log::debug!("{} has nothing to drop", self.desc(r));
            return;
        };

        self.set(r, Carrying(None));
        item.set(r, IsCarried(false));
        if let Some(pos) = self.pos(r) {
            item.set_pos(r, pos);
        }
        self.reset_access(r);

        log::info!("{} dropped {}", self.desc(r), item.desc(r));
    }

    /// Rewrite the terrain under the carrier if the carried item does
    /// that sort of thing.
    pub(crate) fn tick_transmute(&self, r: &mut Runtime) {
        let Some(item) = self.carried(r) else { return };
        let Transmutes(Some((from, to))) = item.get::<Transmutes>(r) else {
            return;
        };
        let Some(pos) = self.pos(r) else { return };

        let cell = r.map.cell_of(pos);
        if r.map.terrain_at(cell) == from {
            r.map.set_terrain(cell, to);
            log::info!(
                "{} turned {} into {} at {},{}",
                self.desc(r),
                from.name(),
                to.name(),
                cell.x,
                cell.y
            );
        }
    }
}
