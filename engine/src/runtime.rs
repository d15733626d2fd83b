use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use util::{GameRng, PointGrid};

use crate::{ecs::*, prelude::*, PICKUP_DISTANCE};

/// Main data container for the simulation runtime.
pub struct Runtime {
    now: f64,
    pub(crate) player: Option<Entity>,
    pub(crate) map: TileMap,
    pub(crate) ecs: Ecs,
    pub(crate) rng: GameRng,
}

impl Runtime {
    pub fn new(map: TileMap, seed: u64) -> Self {
        Runtime {
            now: 0.0,
            player: None,
            map,
            ecs: Default::default(),
            rng: GameRng::seed_from_u64(seed),
        }
    }

    /// Seconds of simulated time so far.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn live_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.ecs.iter()
    }

    /// Spawn an agent with its own private copy of the permission set.
    pub fn spawn_agent(
        &mut self,
        name: &str,
        icon: char,
        pos: Vec2,
        speed: f32,
        access: TileAccess,
    ) -> Entity {
        Entity(self.ecs.spawn((
            Name(name.into()),
            Icon(icon),
            Pos(pos),
            Speed(speed),
            Access(access),
        )))
    }

    /// Spawn the player agent and remember it as the one items and
    /// chasers react to.
    pub fn spawn_player(
        &mut self,
        name: &str,
        icon: char,
        pos: Vec2,
        speed: f32,
        access: TileAccess,
    ) -> Entity {
        let player = self.spawn_agent(name, icon, pos, speed, access);
        self.player = Some(player);
        player
    }

    /// Spawn a loose item. `grants` and `transmutes` fall back to the
    /// kind's defaults when not given.
    pub fn spawn_item(
        &mut self,
        kind: ItemKind,
        pos: Vec2,
        grants: Option<BTreeSet<Terrain>>,
        transmutes: Option<(Terrain, Terrain)>,
    ) -> Entity {
        let grants = grants.unwrap_or_else(|| {
            kind.default_grants().iter().copied().collect()
        });
        let transmutes = transmutes.or_else(|| kind.default_transmutes());

        Entity(self.ecs.spawn((
            Name(kind.name().into()),
            Icon(kind.icon()),
            Pos(pos),
            Item(Some(kind)),
            Grants(grants),
            Transmutes(transmutes),
        )))
    }

    /// Random center of a cell the permission set allows, for placing
    /// agents the scenario leaves unpositioned.
    pub fn scatter_pos(&mut self, access: &TileAccess) -> Option<Vec2> {
        if self.map.width() == 0 || self.map.height() == 0 {
            return None;
        }
        for _failsafe in 0..256 {
            let cell = ivec2(
                self.rng.random_range(0..self.map.width()),
                self.rng.random_range(0..self.map.height()),
            );
            if access.allows(self.map.terrain_at(cell)) {
                return Some(self.map.cell_center(cell));
            }
        }
        None
    }

    /// Advance the simulation by one tick of `dt` seconds.
    ///
    /// Order within the tick: pursuit decisions, then movement, then
    /// proximity triggers. Cross-agent reads see positions from the start
    /// of the movement phase.
    pub fn tick(&mut self, dt: f32) {
        let all: Vec<Entity> = self.live_entities().collect();

        for e in &all {
            e.tick_chase(self);
        }
        for e in &all {
            e.tick_move(self, dt);
        }

        self.resolve_triggers();
        self.now += dt as f64;
    }

    /// Proximity triggers: the player scoops up loose items it stands
    /// next to, and a carried transmuting item works on the terrain
    /// underfoot.
    fn resolve_triggers(&mut self) {
        let Some(player) = self.player else { return };
        let Some(player_pos) = player.pos(self) else { return };

        // Rebuilt from live positions every tick, membership is never
        // cached across ticks.
        let mut index = PointGrid::new(self.map.cell_size().max(1.0));
        let mut items = Vec::new();
        for (e, pos) in self
            .live_entities()
            .filter(|e| e.is_loose_item(self))
            .filter_map(|e| e.pos(self).map(|pos| (e, pos)))
            .collect::<Vec<_>>()
        {
            index.insert(pos);
            items.push(e);
        }

        let hits: Vec<usize> = index
            .within(player_pos, PICKUP_DISTANCE)
            .map(|(id, _)| id)
            .collect();
        for id in hits {
            player.pick_up(self, items[id]);
        }

        player.tick_transmute(self);
    }
}
