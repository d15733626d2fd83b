pub use crate::{
    ecs::{
        Access, Carrying, Chaser, Grants, Icon, IsCarried, Item, Name, Pos,
        Speed, Transmutes,
    },
    AvoidPolicy, ChaseMode, ChaseSpec, Entity, ItemKind, MoveError,
    MoveState, MoveValidator, Mover, Runtime, Scenario, Terrain, TileAccess,
    TileLookup, TileMap,
};
pub use glam::{ivec2, vec2, IVec2, Vec2};
pub use util::{HashMap, VecExt, DIR_4};
