//! In-memory rule database.
//!
//! Records are authored as JSON lists (one list per record kind) and indexed by
//! ID on load. Tests build the same database in code through the `with_*`
//! builder methods.

use crate::buildings::BuildingDef;
use crate::economy::{ProductionTypeDef, TaxRateDef};
use crate::ids::{
    BuildingId, CitySpellEffectId, MapFeatureId, PickId, PlaneNumber,
    ProductionTypeId, RaceId, SpellId, TaxRateId, TileTypeId, UnitId,
};
use crate::lookup::{LookupError, RecordKind, RuleLookup};
use crate::magic::{CitySpellEffectDef, PickDef, PickTypeDef, PlaneDef, SpellDef};
use crate::races::RaceDef;
use crate::terrain::{MapFeatureDef, TileTypeDef};
use crate::units::UnitDef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate {kind} \"{id}\"")]
    DuplicateId { kind: RecordKind, id: String },
}

/// On-disk form of a rule set: one list per record kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub tile_types: Vec<TileTypeDef>,
    #[serde(default)]
    pub map_features: Vec<MapFeatureDef>,
    #[serde(default)]
    pub races: Vec<RaceDef>,
    #[serde(default)]
    pub buildings: Vec<BuildingDef>,
    #[serde(default)]
    pub tax_rates: Vec<TaxRateDef>,
    #[serde(default)]
    pub production_types: Vec<ProductionTypeDef>,
    #[serde(default)]
    pub picks: Vec<PickDef>,
    #[serde(default)]
    pub pick_types: Vec<PickTypeDef>,
    #[serde(default)]
    pub planes: Vec<PlaneDef>,
    #[serde(default)]
    pub spells: Vec<SpellDef>,
    #[serde(default)]
    pub city_spell_effects: Vec<CitySpellEffectDef>,
    #[serde(default)]
    pub units: Vec<UnitDef>,
}

/// Rule records indexed by ID.
#[derive(Debug, Clone, Default)]
pub struct RuleDatabase {
    tile_types: HashMap<TileTypeId, TileTypeDef>,
    map_features: HashMap<MapFeatureId, MapFeatureDef>,
    races: HashMap<RaceId, RaceDef>,
    buildings: HashMap<BuildingId, BuildingDef>,
    tax_rates: HashMap<TaxRateId, TaxRateDef>,
    production_types: HashMap<ProductionTypeId, ProductionTypeDef>,
    picks: HashMap<PickId, PickDef>,
    /// Kept as a list; fortress output walks every pick type in order.
    pick_types: Vec<PickTypeDef>,
    planes: HashMap<PlaneNumber, PlaneDef>,
    spells: HashMap<SpellId, SpellDef>,
    city_spell_effects: HashMap<CitySpellEffectId, CitySpellEffectDef>,
    units: HashMap<UnitId, UnitDef>,
}

/// Generates the `with_*` builder for one record kind.
macro_rules! indexed {
    ($with:ident, $field:ident, $def:ty, |$d:ident| $key:expr) => {
        pub fn $with(mut self, $d: $def) -> Self {
            self.$field.insert($key, $d);
            self
        }
    };
}

fn index<K, V>(
    records: Vec<V>,
    kind: RecordKind,
    key: impl Fn(&V) -> K,
) -> Result<HashMap<K, V>, DataError>
where
    K: std::hash::Hash + Eq + std::fmt::Display,
{
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        let k = key(&record);
        if map.contains_key(&k) {
            return Err(DataError::DuplicateId {
                kind,
                id: k.to_string(),
            });
        }
        map.insert(k, record);
    }
    Ok(map)
}

impl RuleDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    indexed!(with_tile_type, tile_types, TileTypeDef, |d| d.id.clone());
    indexed!(with_map_feature, map_features, MapFeatureDef, |d| d.id.clone());
    indexed!(with_race, races, RaceDef, |d| d.id.clone());
    indexed!(with_building, buildings, BuildingDef, |d| d.id.clone());
    indexed!(with_tax_rate, tax_rates, TaxRateDef, |d| d.id.clone());
    indexed!(with_production_type, production_types, ProductionTypeDef, |d| d.id.clone());
    indexed!(with_pick, picks, PickDef, |d| d.id.clone());
    indexed!(with_plane, planes, PlaneDef, |d| d.plane_number);
    indexed!(with_spell, spells, SpellDef, |d| d.id.clone());
    indexed!(with_city_spell_effect, city_spell_effects, CitySpellEffectDef, |d| d.id.clone());
    indexed!(with_unit, units, UnitDef, |d| d.id.clone());

    pub fn with_pick_type(mut self, def: PickTypeDef) -> Self {
        self.pick_types.retain(|p| p.id != def.id);
        self.pick_types.push(def);
        self
    }

    /// Index a parsed rule file, rejecting duplicate IDs.
    pub fn from_rule_file(file: RuleFile) -> Result<Self, DataError> {
        let mut seen_pick_types = std::collections::HashSet::new();
        for pick_type in &file.pick_types {
            if !seen_pick_types.insert(pick_type.id.clone()) {
                return Err(DataError::DuplicateId {
                    kind: RecordKind::PickType,
                    id: pick_type.id.to_string(),
                });
            }
        }

        let db = Self {
            tile_types: index(file.tile_types, RecordKind::TileType, |d| d.id.clone())?,
            map_features: index(file.map_features, RecordKind::MapFeature, |d| d.id.clone())?,
            races: index(file.races, RecordKind::Race, |d| d.id.clone())?,
            buildings: index(file.buildings, RecordKind::Building, |d| d.id.clone())?,
            tax_rates: index(file.tax_rates, RecordKind::TaxRate, |d| d.id.clone())?,
            production_types: index(file.production_types, RecordKind::ProductionType, |d| {
                d.id.clone()
            })?,
            picks: index(file.picks, RecordKind::Pick, |d| d.id.clone())?,
            pick_types: file.pick_types,
            planes: index(file.planes, RecordKind::Plane, |d| d.plane_number)?,
            spells: index(file.spells, RecordKind::Spell, |d| d.id.clone())?,
            city_spell_effects: index(file.city_spell_effects, RecordKind::CitySpellEffect, |d| {
                d.id.clone()
            })?,
            units: index(file.units, RecordKind::Unit, |d| d.id.clone())?,
        };

        log::debug!(
            "Loaded rules: {} tile types, {} races, {} buildings, {} production types",
            db.tile_types.len(),
            db.races.len(),
            db.buildings.len(),
            db.production_types.len()
        );
        Ok(db)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let file: RuleFile = serde_json::from_str(json)?;
        Self::from_rule_file(file)
    }

    /// Load a rule set from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

fn found<'a, K, V>(
    map: &'a HashMap<K, V>,
    id: &K,
    kind: RecordKind,
    caller: &'static str,
) -> Result<&'a V, LookupError>
where
    K: std::hash::Hash + Eq + std::fmt::Display,
{
    map.get(id)
        .ok_or_else(|| LookupError::new(kind, id, caller))
}

impl RuleLookup for RuleDatabase {
    fn find_tile_type(&self, id: &TileTypeId, caller: &'static str) -> Result<&TileTypeDef, LookupError> {
        found(&self.tile_types, id, RecordKind::TileType, caller)
    }

    fn find_map_feature(&self, id: &MapFeatureId, caller: &'static str) -> Result<&MapFeatureDef, LookupError> {
        found(&self.map_features, id, RecordKind::MapFeature, caller)
    }

    fn find_race(&self, id: &RaceId, caller: &'static str) -> Result<&RaceDef, LookupError> {
        found(&self.races, id, RecordKind::Race, caller)
    }

    fn find_building(&self, id: &BuildingId, caller: &'static str) -> Result<&BuildingDef, LookupError> {
        found(&self.buildings, id, RecordKind::Building, caller)
    }

    fn find_tax_rate(&self, id: &TaxRateId, caller: &'static str) -> Result<&TaxRateDef, LookupError> {
        found(&self.tax_rates, id, RecordKind::TaxRate, caller)
    }

    fn find_production_type(&self, id: &ProductionTypeId, caller: &'static str) -> Result<&ProductionTypeDef, LookupError> {
        found(&self.production_types, id, RecordKind::ProductionType, caller)
    }

    fn find_pick(&self, id: &PickId, caller: &'static str) -> Result<&PickDef, LookupError> {
        found(&self.picks, id, RecordKind::Pick, caller)
    }

    fn find_plane(&self, plane: PlaneNumber, caller: &'static str) -> Result<&PlaneDef, LookupError> {
        found(&self.planes, &plane, RecordKind::Plane, caller)
    }

    fn find_spell(&self, id: &SpellId, caller: &'static str) -> Result<&SpellDef, LookupError> {
        found(&self.spells, id, RecordKind::Spell, caller)
    }

    fn find_city_spell_effect(&self, id: &CitySpellEffectId, caller: &'static str) -> Result<&CitySpellEffectDef, LookupError> {
        found(&self.city_spell_effects, id, RecordKind::CitySpellEffect, caller)
    }

    fn find_unit(&self, id: &UnitId, caller: &'static str) -> Result<&UnitDef, LookupError> {
        found(&self.units, id, RecordKind::Unit, caller)
    }

    fn pick_types(&self) -> Vec<&PickTypeDef> {
        self.pick_types.iter().collect()
    }
}
