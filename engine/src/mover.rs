//! Continuous seek-to-target movement.

use glam::Vec2;

use crate::{MoveValidator, ARRIVE_DISTANCE};

/// Whether a mover is currently going somewhere.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum MoveState {
    #[default]
    Idle,
    Seeking,
}

/// Why a movement request was refused.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveError {
    /// The destination tile is absent or outside the agent's permission
    /// set.
    Blocked,
    /// The agent has no position in the world.
    Unplaced,
}

/// Seek-to-target movement state for one agent.
///
/// Targets only stick if they pass validation; movement toward a stuck
/// target is straight-line at uniform speed with no steering.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Mover {
    target: Option<Vec2>,
    state: MoveState,
}

impl Mover {
    pub fn state(&self) -> MoveState {
        self.state
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    /// Aim at a new target if the validator accepts the point.
    ///
    /// A refused point stops the mover outright, any previous target is
    /// forgotten, so the caller can't keep walking into a stale
    /// destination.
    pub fn set_target(
        &mut self,
        v: &MoveValidator,
        target: Vec2,
    ) -> Result<(), MoveError> {
        if v.is_allowed(target) {
            self.target = Some(target);
            self.state = MoveState::Seeking;
            Ok(())
        } else {
            self.target = None;
            self.state = MoveState::Idle;
            Err(MoveError::Blocked)
        }
    }

    /// Move `pos` toward the target at uniform speed.
    ///
    /// Returns true on the call where the target is reached. The step is
    /// clamped to the remaining distance so repeated advances close in
    /// monotonically instead of orbiting the target on large time steps.
    pub fn advance(&mut self, pos: &mut Vec2, speed: f32, dt: f32) -> bool {
        if self.state != MoveState::Seeking {
            return false;
        }
        let Some(target) = self.target else {
            self.state = MoveState::Idle;
            return false;
        };

        let d = target - *pos;
        let dist = d.length();
        if dist < ARRIVE_DISTANCE {
            self.target = None;
            self.state = MoveState::Idle;
            return true;
        }

        let step = (speed * dt).min(dist);
        *pos += d / dist * step;
        false
    }

    /// Halt immediately, dropping the target.
    pub fn stop(&mut self) {
        self.target = None;
        self.state = MoveState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use super::*;
    use crate::{Terrain, TileAccess, TileMap};

    fn open_field() -> (TileMap, TileAccess) {
        let map: TileMap = "\
....
....
....
...."
            .parse()
            .unwrap();
        (map, TileAccess::new([Terrain::Ground]))
    }

    #[test]
    fn rejected_target_stops_movement() {
        let (mut map, access) = open_field();
        map.set_terrain(glam::ivec2(3, 3), Terrain::Water);
        let v = MoveValidator::new(&map, &access);

        let mut mover = Mover::default();
        assert!(mover.set_target(&v, vec2(2.5, 2.5)).is_ok());
        assert_eq!(mover.state(), MoveState::Seeking);

        // A bad target doesn't leave the previous one active.
        assert_eq!(
            mover.set_target(&v, vec2(3.5, 3.5)),
            Err(MoveError::Blocked)
        );
        assert_eq!(mover.state(), MoveState::Idle);
        assert_eq!(mover.target(), None);

        let mut pos = vec2(0.5, 0.5);
        assert!(!mover.advance(&mut pos, 1.0, 0.1));
        assert_eq!(pos, vec2(0.5, 0.5));
    }

    #[test]
    fn arrival_convergence() {
        let (map, access) = open_field();
        let v = MoveValidator::new(&map, &access);

        let mut mover = Mover::default();
        let target = vec2(3.5, 2.5);
        mover.set_target(&v, target).unwrap();

        let mut pos = vec2(0.5, 0.5);
        let mut dist = pos.distance(target);
        let mut arrived = false;

        for _failsafe in 0..1000 {
            arrived = mover.advance(&mut pos, 2.0, 0.05);
            if arrived {
                break;
            }
            let d = pos.distance(target);
            assert!(d < dist, "distance must shrink every step");
            dist = d;
        }

        assert!(arrived);
        assert!(pos.distance(target) < crate::ARRIVE_DISTANCE);
        assert_eq!(mover.state(), MoveState::Idle);
        assert_eq!(mover.target(), None);

        // Further advances are no-ops.
        let parked = pos;
        assert!(!mover.advance(&mut pos, 2.0, 0.05));
        assert_eq!(pos, parked);
    }

    #[test]
    fn overshoot_is_clamped() {
        let (map, access) = open_field();
        let v = MoveValidator::new(&map, &access);

        let mut mover = Mover::default();
        let target = vec2(1.0, 0.5);
        mover.set_target(&v, target).unwrap();

        // One enormous step lands on the target instead of flying past.
        let mut pos = vec2(0.5, 0.5);
        mover.advance(&mut pos, 100.0, 1.0);
        assert!(pos.distance(target) < 1e-6);
        assert!(mover.advance(&mut pos, 100.0, 1.0));
    }

    #[test]
    fn stop_forces_idle() {
        let (map, access) = open_field();
        let v = MoveValidator::new(&map, &access);

        let mut mover = Mover::default();
        mover.set_target(&v, vec2(3.5, 3.5)).unwrap();
        mover.stop();
        assert_eq!(mover.state(), MoveState::Idle);
        assert_eq!(mover.target(), None);
    }
}
