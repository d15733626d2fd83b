//! Tile grid lookup and the movement validation chokepoint.

use std::str::FromStr;

use anyhow::bail;
use glam::{ivec2, IVec2, Vec2};

use crate::{TileAccess, Terrain};

/// Grid lookup interface the movement layer runs against.
pub trait TileLookup {
    /// Project a world position to the cell that contains it.
    fn cell_of(&self, pos: Vec2) -> IVec2;

    /// Terrain at the given cell, `Void` outside the painted map.
    fn terrain_at(&self, cell: IVec2) -> Terrain;

    /// Whether the cell has any painted terrain.
    fn has_terrain(&self, cell: IVec2) -> bool {
        self.terrain_at(cell) != Terrain::Void
    }
}

/// Reference tile map, dense row-major terrain in uniform square cells
/// anchored at the world origin.
#[derive(Clone, Debug)]
pub struct TileMap {
    width: i32,
    height: i32,
    cell_size: f32,
    terrain: Vec<Terrain>,
}

impl Default for TileMap {
    fn default() -> Self {
        TileMap {
            width: 0,
            height: 0,
            cell_size: 1.0,
            terrain: Vec::new(),
        }
    }
}

impl TileMap {
    pub fn new(width: u32, height: u32) -> Self {
        TileMap {
            width: width as i32,
            height: height as i32,
            cell_size: 1.0,
            terrain: vec![Terrain::Void; (width * height) as usize],
        }
    }

    /// Builder for a nonstandard cell size.
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "zero size map cell");
        self.cell_size = cell_size;
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World position at the center of a cell.
    pub fn cell_center(&self, cell: IVec2) -> Vec2 {
        (cell.as_vec2() + 0.5) * self.cell_size
    }

    /// Rewrite the terrain of a cell. Writes outside the map are ignored.
    pub fn set_terrain(&mut self, cell: IVec2, t: Terrain) {
        if let Some(idx) = self.idx(cell) {
            self.terrain[idx] = t;
        }
    }

    fn idx(&self, cell: IVec2) -> Option<usize> {
        (cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height)
            .then(|| (cell.y * self.width + cell.x) as usize)
    }
}

impl TileLookup for TileMap {
    fn cell_of(&self, pos: Vec2) -> IVec2 {
        (pos / self.cell_size).floor().as_ivec2()
    }

    fn terrain_at(&self, cell: IVec2) -> Terrain {
        self.idx(cell).map_or(Terrain::Void, |i| self.terrain[i])
    }
}

impl FromStr for TileMap {
    type Err = anyhow::Error;

    /// Parse a map from rows of terrain characters.
    ///
    /// Short rows are padded with void on the right.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> =
            s.lines().map(|line| line.trim_end()).collect();
        let height = lines.len();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        if width == 0 || height == 0 {
            bail!("empty map");
        }

        let mut ret = TileMap::new(width as u32, height as u32);
        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                let Ok(t) = Terrain::try_from(c) else {
                    bail!("bad terrain {c:?} at row {y}, column {x}");
                };
                ret.set_terrain(ivec2(x as i32, y as i32), t);
            }
        }
        Ok(ret)
    }
}

/// The single chokepoint that decides whether a world position can be
/// entered by an agent with the given permissions.
///
/// Nothing else in the crate moves an agent without asking this first.
pub struct MoveValidator<'a> {
    lookup: &'a dyn TileLookup,
    access: &'a TileAccess,
}

impl<'a> MoveValidator<'a> {
    pub fn new(lookup: &'a dyn TileLookup, access: &'a TileAccess) -> Self {
        MoveValidator { lookup, access }
    }

    pub fn is_allowed(&self, pos: Vec2) -> bool {
        self.access
            .allows(self.lookup.terrain_at(self.lookup.cell_of(pos)))
    }
}
