//! Scenario files: rules, map, players and memory in one JSON document.

use anyhow::{bail, Context, Result};
use citycalc_core::{
    CityContext, CityData, DifficultyLevel, FogOfWarMemory, MapCoordinates, MapSize,
    OverlandMap, PlayerDetails, ProductionOptions,
};
use citycalc_data::{MapFeatureId, PlaneNumber, RuleDatabase, RuleFile, TileTypeId};
use serde::Deserialize;
use std::path::Path;

/// One cell listed explicitly in a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct TilePlacement {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub plane: PlaneNumber,
    #[serde(default)]
    pub tile_type: Option<TileTypeId>,
    #[serde(default)]
    pub map_feature: Option<MapFeatureId>,
    #[serde(default)]
    pub corrupted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityPlacement {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub plane: PlaneNumber,
    #[serde(flatten)]
    pub city: CityData,
}

/// On-disk form of a scenario. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScenarioFile {
    pub rules: RuleFile,
    pub map_size: MapSize,
    pub difficulty: DifficultyLevel,
    /// Tile type of every cell not listed in `tiles`.
    pub default_tile_type: Option<TileTypeId>,
    pub tiles: Vec<TilePlacement>,
    pub cities: Vec<CityPlacement>,
    pub players: Vec<PlayerDetails>,
    pub memory: FogOfWarMemory,
    pub options: ProductionOptions,
}

/// A loaded scenario, ready to calculate.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub rules: RuleDatabase,
    pub map: OverlandMap,
    pub memory: FogOfWarMemory,
    pub players: Vec<PlayerDetails>,
    pub difficulty: DifficultyLevel,
    pub options: ProductionOptions,
}

impl Scenario {
    pub fn context(&self) -> CityContext<'_> {
        CityContext::new(
            &self.rules,
            &self.map,
            &self.memory,
            &self.players,
            &self.difficulty,
        )
    }

    pub fn from_file(file: ScenarioFile) -> Result<Self> {
        let rules = RuleDatabase::from_rule_file(file.rules).context("Invalid rules")?;
        let map = build_map(
            file.map_size,
            file.default_tile_type.as_ref(),
            &file.tiles,
            file.cities,
        )?;
        log::info!(
            "Scenario: {}x{} map on {} planes, {} cities, {} players",
            map.size.width,
            map.size.height,
            map.size.depth,
            map.cities().count(),
            file.players.len()
        );

        Ok(Self {
            rules,
            map,
            memory: file.memory,
            players: file.players,
            difficulty: file.difficulty,
            options: file.options,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ScenarioFile = serde_json::from_str(json).context("Failed to parse scenario")?;
        Self::from_file(file)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("In scenario {}", path.display()))
    }
}

fn build_map(
    size: MapSize,
    default_tile_type: Option<&TileTypeId>,
    tiles: &[TilePlacement],
    cities: Vec<CityPlacement>,
) -> Result<OverlandMap> {
    let mut map = OverlandMap::new(size);

    if let Some(tile_type) = default_tile_type {
        for plane in 0..map.size.depth {
            for y in 0..map.size.height {
                for x in 0..map.size.width {
                    if let Some(cell) = map.cell_mut(&MapCoordinates::new(x, y, plane)) {
                        cell.tile_type = Some(tile_type.clone());
                    }
                }
            }
        }
    }

    for tile in tiles {
        let coords = MapCoordinates::new(tile.x, tile.y, tile.plane);
        let Some(cell) = map.cell_mut(&coords) else {
            bail!("Tile {} is outside the map", coords);
        };
        if tile.tile_type.is_some() {
            cell.tile_type = tile.tile_type.clone();
        }
        if tile.map_feature.is_some() {
            cell.map_feature = tile.map_feature.clone();
        }
        cell.corrupted = tile.corrupted;
    }

    for placement in cities {
        let coords = MapCoordinates::new(placement.x, placement.y, placement.plane);
        let Some(cell) = map.cell_mut(&coords) else {
            bail!("City {} at {} is outside the map", placement.city.name, coords);
        };
        cell.city = Some(placement.city);
    }

    Ok(map)
}
