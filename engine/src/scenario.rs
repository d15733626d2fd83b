//! Scenario documents describing a map and its inhabitants.

use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::prelude::*;

/// Complete description of a simulation setup.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Scenario {
    /// ASCII terrain rows.
    pub map: String,
    /// World units per map cell.
    pub cell_size: f32,
    pub player: Option<AgentSeed>,
    pub agents: Vec<AgentSeed>,
    pub items: Vec<ItemSeed>,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            map: String::new(),
            cell_size: 1.0,
            player: None,
            agents: Vec::new(),
            items: Vec::new(),
        }
    }
}

/// Spawn description for one agent.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AgentSeed {
    pub name: String,
    pub icon: char,
    /// Spawn position; a missing one scatters the agent onto a random
    /// cell its permissions allow.
    pub pos: Option<[f32; 2]>,
    pub speed: f32,
    /// Base permission set, copied per agent at spawn.
    pub allowed: Vec<Terrain>,
    pub chase: Option<ChaseSeed>,
    /// Waypoints for the driver to feed to the agent's mover.
    pub route: Vec<[f32; 2]>,
}

impl Default for AgentSeed {
    fn default() -> Self {
        AgentSeed {
            name: String::new(),
            icon: '?',
            pos: None,
            speed: 1.0,
            allowed: Vec::new(),
            chase: None,
            route: Vec::new(),
        }
    }
}

/// Pursuit configuration. The watched target is always the scenario's
/// player.
#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChaseSeed {
    pub avoid_radius: f32,
    pub policy: AvoidPolicy,
}

impl Default for ChaseSeed {
    fn default() -> Self {
        ChaseSeed {
            avoid_radius: 5.0,
            policy: AvoidPolicy::default(),
        }
    }
}

/// Spawn description for one loose item.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ItemSeed {
    pub kind: ItemKind,
    pub pos: [f32; 2],
    /// Granted terrains; empty falls back to the kind's defaults.
    #[serde(default)]
    pub grants: Vec<Terrain>,
    /// Terrain rewrite pair; missing falls back to the kind's defaults.
    #[serde(default)]
    pub transmutes: Option<(Terrain, Terrain)>,
}

impl Runtime {
    /// Build a runtime from a scenario document.
    pub fn from_scenario(scenario: &Scenario, seed: u64) -> Result<Self> {
        if scenario.cell_size <= 0.0 {
            bail!("scenario cell-size must be positive");
        }
        let map: TileMap = scenario.map.parse::<TileMap>()?.with_cell_size(scenario.cell_size);
        let mut r = Runtime::new(map, seed);

        if let Some(seed) = &scenario.player {
            let player = r.spawn_seed(seed)?;
            r.player = Some(player);
        }

        for seed in &scenario.agents {
            let agent = r.spawn_seed(seed)?;
            if let Some(chase) = &seed.chase {
                let Some(target) = r.player else {
                    bail!("scenario has chasers but no player");
                };
                agent.set(
                    &mut r,
                    Chaser(Some(ChaseSpec::new(
                        target,
                        chase.avoid_radius,
                        chase.policy,
                    ))),
                );
            }
        }

        for seed in &scenario.items {
            let grants = (!seed.grants.is_empty())
                .then(|| seed.grants.iter().copied().collect::<BTreeSet<_>>());
            r.spawn_item(
                seed.kind,
                seed.pos.into(),
                grants,
                seed.transmutes,
            );
        }

        Ok(r)
    }

    fn spawn_seed(&mut self, seed: &AgentSeed) -> Result<Entity> {
        if seed.speed <= 0.0 {
            log::warn!("agent {:?} has speed {}, it won't move", seed.name, seed.speed);
        }
        if let Some(chase) = &seed.chase {
            if chase.avoid_radius <= 0.0 {
                bail!("agent {:?} has a nonpositive avoid radius", seed.name);
            }
        }

        let access = TileAccess::new(seed.allowed.iter().copied());
        let pos = match seed.pos {
            Some(pos) => pos.into(),
            None => self.scatter_pos(&access).with_context(|| {
                format!("no open cell to place agent {:?}", seed.name)
            })?,
        };

        Ok(self.spawn_agent(&seed.name, seed.icon, pos, seed.speed, access))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Terrain::*;

    #[test]
    fn scenario_from_json() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "map": "......\n..~~..\n......",
                "player": {
                    "name": "wanderer",
                    "icon": "@",
                    "pos": [0.5, 0.5],
                    "speed": 3.0,
                    "allowed": [".", ","]
                },
                "agents": [
                    {
                        "name": "shade",
                        "icon": "s",
                        "pos": [5.5, 2.5],
                        "speed": 2.0,
                        "allowed": ["."],
                        "chase": {"avoid-radius": 4.0, "policy": "sweep"}
                    }
                ],
                "items": [
                    {"kind": "boat", "pos": [2.5, 0.5]}
                ]
            }"#,
        )
        .unwrap();

        let r = Runtime::from_scenario(&scenario, 3).unwrap();

        let player = r.player().unwrap();
        assert_eq!(player.pos(&r), Some(vec2(0.5, 0.5)));
        assert!(player.access(&r).allows(Grass));

        let shade = r
            .live_entities()
            .find(|e| e.desc(&r) == "shade")
            .unwrap();
        let spec = shade.get::<Chaser>(&r).0.unwrap();
        assert_eq!(spec.target, player);
        assert_eq!(spec.avoid_radius, 4.0);
        assert_eq!(spec.policy, AvoidPolicy::Sweep);

        let boat = r.live_entities().find(|e| e.is_loose_item(&r)).unwrap();
        assert_eq!(boat.pos(&r), Some(vec2(2.5, 0.5)));
    }

    #[test]
    fn chasers_require_a_player() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "map": "....",
                "agents": [
                    {"name": "lost", "allowed": ["."], "chase": {}}
                ]
            }"#,
        )
        .unwrap();

        assert!(Runtime::from_scenario(&scenario, 0).is_err());
    }

    #[test]
    fn scatter_placement_lands_on_allowed_cells() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "map": "~~~~\n~~.~\n~~~~",
                "agents": [
                    {"name": "drifter", "allowed": ["."]}
                ]
            }"#,
        )
        .unwrap();

        let r = Runtime::from_scenario(&scenario, 11).unwrap();
        let drifter = r.live_entities().next().unwrap();
        assert_eq!(drifter.pos(&r), Some(vec2(2.5, 1.5)));
    }
}
