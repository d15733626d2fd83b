//! Agent-facing entity logic: placement, permissions and movement.

use crate::{ecs::*, prelude::*};

impl Entity {
    /// World position, if the entity is placed in the world.
    pub fn pos(&self, r: &Runtime) -> Option<Vec2> {
        r.ecs.get::<&Pos>(self.0).ok().map(|p| p.0)
    }

    pub fn set_pos(&self, r: &mut Runtime, pos: Vec2) {
        r.ecs
            .insert_one(self.0, Pos(pos))
            .expect("Entity::set_pos failed");
    }

    /// Remove the entity from the world without destroying it.
    pub(crate) fn unplace(&self, r: &mut Runtime) {
        let _ = r.ecs.remove_one::<Pos>(self.0);
    }

    pub fn icon(&self, r: &Runtime) -> char {
        match self.get::<Icon>(r) {
            Icon('\0') => '?',
            Icon(c) => c,
        }
    }

    /// Short printable description for log lines.
    pub fn desc(&self, r: &Runtime) -> String {
        let Name(name) = self.get::<Name>(r);
        if name.is_empty() {
            format!("{:?}", self.0)
        } else {
            name
        }
    }

    /// Current movement state snapshot.
    pub fn mover(&self, r: &Runtime) -> Mover {
        self.get::<Mover>(r)
    }

    /// Whether the agent's permission set admits the world position.
    pub fn can_enter(&self, r: &Runtime, pos: Vec2) -> bool {
        let Access(access) = self.get::<Access>(r);
        MoveValidator::new(&r.map, &access).is_allowed(pos)
    }

    /// Aim the agent's mover at a point, validating the destination.
    pub fn seek(&self, r: &mut Runtime, target: Vec2) -> Result<(), MoveError> {
        let Access(access) = self.get::<Access>(r);
        let mut mover = self.get::<Mover>(r);
        let ret = mover.set_target(&MoveValidator::new(&r.map, &access), target);
        self.set(r, mover);

        if ret.is_err() {
            log::debug!(
                "seek: {} refused target {:.1},{:.1}",
                self.desc(r),
                target.x,
                target.y
            );
        }
        ret
    }

    /// Halt any current movement immediately.
    pub fn stop_moving(&self, r: &mut Runtime) {
        let mut mover = self.get::<Mover>(r);
        mover.stop();
        self.set(r, mover);
    }

    /// Step exactly one cell in a cardinal direction.
    ///
    /// The destination must pass the permission check, a refused step
    /// leaves the position untouched.
    pub fn step(&self, r: &mut Runtime, dir: IVec2) -> Result<(), MoveError> {
        debug_assert!(dir.is_adjacent());

        let Some(pos) = self.pos(r) else {
            return Err(MoveError::Unplaced);
        };
        let dest = pos + dir.as_vec2() * r.map.cell_size();
        if !self.can_enter(r, dest) {
            return Err(MoveError::Blocked);
        }
        self.set_pos(r, dest);
        Ok(())
    }

    /// Grant additional terrain as a capability overlay.
    pub fn extend_access(
        &self,
        r: &mut Runtime,
        tiles: impl IntoIterator<Item = Terrain>,
    ) {
        let Access(mut access) = self.get::<Access>(r);
        access.extend(tiles);
        self.set(r, Access(access));
    }

    /// Swap out the permission base wholesale, dropping overlays.
    pub fn replace_access(
        &self,
        r: &mut Runtime,
        tiles: impl IntoIterator<Item = Terrain>,
    ) {
        let Access(mut access) = self.get::<Access>(r);
        access.replace(tiles);
        self.set(r, Access(access));
    }

    /// Return the permission set to its spawn-time default.
    pub fn reset_access(&self, r: &mut Runtime) {
        let Access(mut access) = self.get::<Access>(r);
        access.reset();
        self.set(r, Access(access));
    }

    /// Effective permission snapshot, mostly for drivers and tests.
    pub fn access(&self, r: &Runtime) -> TileAccess {
        self.get::<Access>(r).0
    }

    /// Per-tick movement integration.
    pub(crate) fn tick_move(&self, r: &mut Runtime, dt: f32) {
        let mut mover = self.get::<Mover>(r);
        if mover.state() != MoveState::Seeking {
            return;
        }
        let Some(mut pos) = self.pos(r) else {
            log::error!("tick_move: seeking {} has no position", self.desc(r));
            self.stop_moving(r);
            return;
        };

        let Speed(speed) = self.get::<Speed>(r);
        let arrived = mover.advance(&mut pos, speed, dt);
        self.set_pos(r, pos);
        self.set(r, mover);

        if arrived {
            log::debug!("{} arrived at {:.1},{:.1}", self.desc(r), pos.x, pos.y);
        }
    }
}
