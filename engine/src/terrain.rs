use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Specific terrain in a single game world map cell.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    EnumIter,
)]
#[serde(try_from = "char", into = "char")]
pub enum Terrain {
    /// No terrain painted in the cell, also what out-of-map lookups
    /// return. Must be explicitly permitted to be entered.
    #[default]
    Void,
    Ground,
    Grass,
    Water,
    Crag,
    Rock,
    Gravel,
    Wall,
}

use Terrain::*;

impl Terrain {
    /// Character used for the terrain in map text and printouts.
    pub fn glyph(self) -> char {
        char::from(self)
    }

    pub fn name(self) -> &'static str {
        match self {
            Void => "void",
            Ground => "ground",
            Grass => "grass",
            Water => "water",
            Crag => "crag",
            Rock => "rock",
            Gravel => "gravel",
            Wall => "wall",
        }
    }

    /// All terrain glyphs with names, for map legends.
    pub fn legend() -> impl Iterator<Item = (char, &'static str)> {
        use strum::IntoEnumIterator;
        Terrain::iter().map(|t| (t.glyph(), t.name()))
    }
}

impl TryFrom<char> for Terrain {
    type Error = &'static str;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            ' ' => Ok(Void),
            '.' => Ok(Ground),
            ',' => Ok(Grass),
            '~' => Ok(Water),
            '^' => Ok(Crag),
            '%' => Ok(Rock),
            ':' => Ok(Gravel),
            '#' => Ok(Wall),
            _ => Err("invalid terrain char"),
        }
    }
}

impl From<Terrain> for char {
    fn from(val: Terrain) -> Self {
        // NB. This must match Terrain's TryFrom inputs above.
        match val {
            Void => ' ',
            Ground => '.',
            Grass => ',',
            Water => '~',
            Crag => '^',
            Rock => '%',
            Gravel => ':',
            Wall => '#',
        }
    }
}
