//! Tile type and map feature definitions.

use crate::ids::{MapFeatureId, ProductionTypeId, TileTypeId};
use serde::{Deserialize, Serialize};

/// A terrain tile type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileTypeDef {
    pub id: TileTypeId,

    /// Food this tile contributes toward the maximum size of cities in range, doubled
    /// (grassland = 3, i.e. 1.5 food).
    #[serde(default)]
    pub doubled_food: i32,

    /// Percentage bonus to production for cities with this tile in range.
    #[serde(default)]
    pub production_bonus: Option<i32>,

    /// Percentage gold trade bonus for a city built on this tile.
    #[serde(default)]
    pub gold_bonus: Option<i32>,

    /// Whether [`Self::gold_bonus`] also applies to cities orthogonally adjacent
    /// to this tile (rivers, shore).
    #[serde(default)]
    pub gold_bonus_surrounding_tiles: bool,
}

/// A special feature sitting on top of a tile (ore, wild game, nightshade).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFeatureDef {
    pub id: MapFeatureId,

    #[serde(default)]
    pub productions: Vec<MapFeatureProduction>,
}

/// One resource a map feature yields to cities in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFeatureProduction {
    pub production_type: ProductionTypeId,
    pub doubled_amount: i32,

    /// Races with a mineral bonus multiply this production (dwarves double ore output).
    #[serde(default)]
    pub race_mineral_bonus_applies: bool,
}
