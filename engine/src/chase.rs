//! Pursue-or-evade control loop.

use crate::{avoid::avoid_point, ecs::*, prelude::*};

/// Operating mode of the pursue-or-evade loop.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ChaseMode {
    #[default]
    Chasing,
    Avoiding,
}

/// Configuration and live state for an agent that tracks another.
///
/// The watched target is wired in at spawn, there is no runtime lookup
/// by name or tag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChaseSpec {
    pub target: Entity,
    pub avoid_radius: f32,
    pub policy: AvoidPolicy,
    pub mode: ChaseMode,
}

impl ChaseSpec {
    pub fn new(target: Entity, avoid_radius: f32, policy: AvoidPolicy) -> Self {
        ChaseSpec {
            target,
            avoid_radius,
            policy,
            mode: ChaseMode::Chasing,
        }
    }
}

impl Entity {
    /// Decide this tick between closing in on the watched target and
    /// backing off to an escape point.
    ///
    /// The mode is a pure function of current distance: strictly inside
    /// the avoid radius evades, at or beyond it chases. There is no
    /// terminal state.
    pub(crate) fn tick_chase(&self, r: &mut Runtime) {
        let Chaser(Some(mut spec)) = self.get::<Chaser>(r) else {
            return;
        };
        let Some(pos) = self.pos(r) else {
            log::error!("tick_chase: {} has no position", self.desc(r));
            return;
        };
        let Some(threat) = spec.target.pos(r) else {
            log::error!(
                "tick_chase: watched target of {} has no position",
                self.desc(r)
            );
            return;
        };

        let mode = if pos.distance(threat) < spec.avoid_radius {
            ChaseMode::Avoiding
        } else {
            ChaseMode::Chasing
        };
        if mode != spec.mode {
            log::debug!("{} switches to {mode:?}", self.desc(r));
            spec.mode = mode;
            self.set(r, Chaser(Some(spec)));
        }

        match mode {
            // Re-aim at the live target position every tick.
            ChaseMode::Chasing => {
                let _ = self.seek(r, threat);
            }
            ChaseMode::Avoiding => {
                let Access(access) = self.get::<Access>(r);
                let point = avoid_point(
                    &MoveValidator::new(&r.map, &access),
                    pos,
                    threat,
                    spec.avoid_radius,
                    spec.policy,
                );
                match point {
                    Some(p) => {
                        let _ = self.seek(r, p);
                    }
                    // No legal escape this tick, stay put or keep the
                    // previous motion.
                    None => log::debug!(
                        "tick_chase: no escape point for {}",
                        self.desc(r)
                    ),
                }
            }
        }
    }
}
