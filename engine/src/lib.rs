//! Game logic layer machinery.

/// Distance at which a seeking mover counts as arrived.
pub const ARRIVE_DISTANCE: f32 = 0.01;

/// Sample count of the full-circle escape point search.
pub const CIRCLE_SAMPLES: u32 = 16;

/// Angle step of the sweeping escape point search, in degrees.
pub const SWEEP_STEP_DEG: f32 = 10.0;

/// Attempt bound of the sweeping escape point search, covers half a
/// circle at the default step.
pub const SWEEP_TRIES: u32 = 18;

/// How close an agent must be to a loose item to pick it up.
pub const PICKUP_DISTANCE: f32 = 0.75;

mod access;
pub use access::TileAccess;

mod agent;

mod avoid;
pub use avoid::{avoid_point, AvoidPolicy};

mod chase;
pub use chase::{ChaseMode, ChaseSpec};

pub mod ecs;

mod entity;
pub use entity::Entity;

mod item;
pub use item::ItemKind;

mod map;
pub use map::{MoveValidator, TileLookup, TileMap};

mod mover;
pub use mover::{MoveError, MoveState, Mover};

pub mod prelude;

mod runtime;
pub use runtime::Runtime;

mod scenario;
pub use scenario::{AgentSeed, ChaseSeed, ItemSeed, Scenario};

mod terrain;
pub use terrain::Terrain;
