//! Unopinionated standalone utilities.

mod geom;
pub use geom::{VecExt, DIR_4};

mod grid;
pub use grid::PointGrid;

/// Map with an efficient hash function.
pub use rustc_hash::FxHashMap as HashMap;

/// Deterministic random number generator for game logic.
///
/// Not cryptographic, but stable across platforms so seeded runs replay
/// identically.
pub type GameRng = rand_xorshift::XorShiftRng;
