//! Fixture builders for tests: small maps and a compact rule set.

use crate::config::MapSize;
use crate::map::{CityData, MapCoordinates, OverlandMap};
use citycalc_data::{
    BuildingDef, BuildingEffect, CitySpellEffectDef, CitySpellEffectProduction,
    FortressProduction, MagicRealm, MapFeatureDef, MapFeatureId, MapFeatureProduction, PickDef,
    PickTypeDef, PickTypeId, PlaneDef, PlaneNumber, PopulationTaskId, ProductionTypeDef,
    ProductionTypeId, RaceDef, RaceId, RacePopulationTask, RaceUnrest, RoundingDirection,
    RuleDatabase, SpellDef, TaskProduction, TaxRateDef, TileTypeDef, TileTypeId, UnitDef,
};

pub struct MapBuilder {
    map: OverlandMap,
    plane: PlaneNumber,
}

impl MapBuilder {
    /// A two-plane map wrapping left to right.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_size(MapSize {
            width,
            height,
            ..Default::default()
        })
    }

    pub fn with_size(size: MapSize) -> Self {
        Self {
            map: OverlandMap::new(size),
            plane: 0,
        }
    }

    /// Subsequent calls place things on this plane.
    pub fn on_plane(mut self, plane: PlaneNumber) -> Self {
        self.plane = plane;
        self
    }

    fn coords(&self, x: i32, y: i32) -> MapCoordinates {
        MapCoordinates::new(x, y, self.plane)
    }

    /// Set every cell of the current plane to one tile type.
    pub fn fill(mut self, tile_type: &str) -> Self {
        for y in 0..self.map.size.height {
            for x in 0..self.map.size.width {
                let coords = self.coords(x, y);
                if let Some(cell) = self.map.cell_mut(&coords) {
                    cell.tile_type = Some(TileTypeId::from(tile_type));
                }
            }
        }
        self
    }

    pub fn tile(mut self, x: i32, y: i32, tile_type: &str) -> Self {
        let coords = self.coords(x, y);
        if let Some(cell) = self.map.cell_mut(&coords) {
            cell.tile_type = Some(TileTypeId::from(tile_type));
        }
        self
    }

    /// Set `count` cells of a tile type inside the radius-2 area around `(cx, cy)`,
    /// walking the area row by row from the top left.
    pub fn tiles_around(mut self, cx: i32, cy: i32, tile_type: &str, count: usize) -> Self {
        let centre = self.coords(cx, cy);
        let mut placed = 0;
        'rows: for dy in -2..=2 {
            for dx in -2..=2 {
                if placed == count {
                    break 'rows;
                }
                if (dx == 0 && dy == 0) || !crate::survey::within_city_radius(dx, dy, 2) {
                    continue;
                }
                let Some(coords) = self.map.size.offset(&centre, dx, dy) else {
                    continue;
                };
                let Some(cell) = self.map.cell_mut(&coords) else {
                    continue;
                };
                cell.tile_type = Some(TileTypeId::from(tile_type));
                placed += 1;
            }
        }
        self
    }

    pub fn feature(mut self, x: i32, y: i32, feature: &str) -> Self {
        let coords = self.coords(x, y);
        if let Some(cell) = self.map.cell_mut(&coords) {
            cell.map_feature = Some(MapFeatureId::from(feature));
        }
        self
    }

    pub fn corrupt(mut self, x: i32, y: i32) -> Self {
        let coords = self.coords(x, y);
        if let Some(cell) = self.map.cell_mut(&coords) {
            cell.corrupted = true;
        }
        self
    }

    pub fn city(mut self, x: i32, y: i32, city: CityData) -> Self {
        let coords = self.coords(x, y);
        if let Some(cell) = self.map.cell_mut(&coords) {
            cell.city = Some(city);
        }
        self
    }

    pub fn build(self) -> OverlandMap {
        self.map
    }
}

pub fn city(owner: i32, race: &str, population: i32) -> CityData {
    CityData {
        name: format!("{race} city"),
        owner,
        race: RaceId::from(race),
        population,
        ..Default::default()
    }
}

fn production_type(id: &str, rounding: RoundingDirection, difficulty: bool) -> ProductionTypeDef {
    ProductionTypeDef {
        id: ProductionTypeId::from(id),
        rounding,
        difficulty_level_multiplier_applies: difficulty,
    }
}

fn tile_type(id: &str, doubled_food: i32, production_bonus: Option<i32>) -> TileTypeDef {
    TileTypeDef {
        id: TileTypeId::from(id),
        doubled_food,
        production_bonus,
        ..Default::default()
    }
}

fn task(task: &str, productions: &[(&str, i32)]) -> RacePopulationTask {
    RacePopulationTask {
        task: PopulationTaskId::from(task),
        productions: productions
            .iter()
            .map(|(p, amount)| TaskProduction {
                production_type: ProductionTypeId::from(*p),
                doubled_amount: *amount,
            })
            .collect(),
    }
}

fn produces(production_type: &str, doubled_amount: i32) -> BuildingEffect {
    BuildingEffect::Production {
        production_type: ProductionTypeId::from(production_type),
        doubled_amount,
    }
}

fn consumes(production_type: &str, doubled_amount: i32) -> BuildingEffect {
    BuildingEffect::Consumption {
        production_type: ProductionTypeId::from(production_type),
        doubled_amount,
    }
}

fn bonus(production_type: &str, percentage: i32) -> BuildingEffect {
    BuildingEffect::PercentageBonus {
        production_type: ProductionTypeId::from(production_type),
        percentage,
    }
}

fn building(id: &str, effects: Vec<BuildingEffect>) -> BuildingDef {
    BuildingDef {
        id: id.into(),
        effects,
        ..Default::default()
    }
}

fn fortress_yield(production_type: &str, doubled_amount: i32) -> FortressProduction {
    FortressProduction {
        production_type: ProductionTypeId::from(production_type),
        doubled_amount,
    }
}

/// Compact rule set resembling the stock rules.
pub fn fixture_rules() -> RuleDatabase {
    use RoundingDirection::*;

    let river = TileTypeDef {
        gold_bonus: Some(20),
        ..tile_type("river", 4, None)
    };
    let shore = TileTypeDef {
        gold_bonus: Some(10),
        gold_bonus_surrounding_tiles: true,
        ..tile_type("shore", 1, None)
    };

    RuleDatabase::new()
        .with_production_type(production_type("food", RoundDown, false))
        .with_production_type(production_type("rations", RoundDown, true))
        .with_production_type(production_type("production", RoundDown, true))
        .with_production_type(production_type("gold", RoundDown, true))
        .with_production_type(production_type("magic_power", RoundUp, true))
        .with_production_type(production_type("research", RoundDown, true))
        .with_production_type(production_type("upkeep", MustBeExactMultiple, false))
        .with_tile_type(tile_type("grassland", 3, None))
        .with_tile_type(tile_type("forest", 1, Some(3)))
        .with_tile_type(tile_type("hills", 1, Some(3)))
        .with_tile_type(tile_type("mountains", 0, Some(5)))
        .with_tile_type(tile_type("desert", 0, Some(3)))
        .with_tile_type(river)
        .with_tile_type(shore)
        .with_tile_type(tile_type("ocean", 1, None))
        .with_map_feature(MapFeatureDef {
            id: "gold_ore".into(),
            productions: vec![MapFeatureProduction {
                production_type: ProductionTypeId::from("gold"),
                doubled_amount: 6,
                race_mineral_bonus_applies: true,
            }],
        })
        .with_map_feature(MapFeatureDef {
            id: "wild_game".into(),
            productions: vec![MapFeatureProduction {
                production_type: ProductionTypeId::from("food"),
                doubled_amount: 4,
                race_mineral_bonus_applies: false,
            }],
        })
        .with_map_feature(MapFeatureDef {
            id: "quork_crystals".into(),
            productions: vec![MapFeatureProduction {
                production_type: ProductionTypeId::from("magic_power"),
                doubled_amount: 6,
                race_mineral_bonus_applies: true,
            }],
        })
        .with_race(RaceDef {
            id: "high_men".into(),
            population_tasks: vec![
                task("farmer", &[("rations", 4), ("production", 1)]),
                task("worker", &[("production", 4)]),
            ],
            ..Default::default()
        })
        .with_race(RaceDef {
            id: "dwarves".into(),
            population_tasks: vec![
                task("farmer", &[("rations", 4), ("production", 1)]),
                task("worker", &[("production", 6)]),
            ],
            growth_rate_modifier: -20,
            mineral_bonus_multiplier: 2,
            ..Default::default()
        })
        .with_race(RaceDef {
            id: "nomads".into(),
            population_tasks: vec![
                task("farmer", &[("rations", 4), ("production", 1)]),
                task("worker", &[("production", 4)]),
            ],
            growth_rate_modifier: -10,
            gold_trade_bonus: 50,
            ..Default::default()
        })
        .with_race(RaceDef {
            id: "klackons".into(),
            population_tasks: vec![
                task("farmer", &[("rations", 4), ("production", 1)]),
                task("worker", &[("production", 6)]),
            ],
            growth_rate_modifier: -10,
            unrest: vec![RaceUnrest {
                capital_race: "high_men".into(),
                unrest_percentage: 30,
                unrest_literal: 0,
            }],
            ..Default::default()
        })
        .with_race(RaceDef {
            id: "beastmen".into(),
            population_tasks: vec![
                task("farmer", &[("rations", 4), ("production", 1)]),
                task("worker", &[("production", 4)]),
            ],
            unrest: vec![RaceUnrest {
                capital_race: "high_men".into(),
                unrest_percentage: 10,
                unrest_literal: 1,
            }],
            ..Default::default()
        })
        .with_building(building("fortress", Vec::new()))
        .with_building(BuildingDef {
            growth_rate_bonus: 20,
            ..building("granary", vec![produces("food", 4), consumes("gold", 2)])
        })
        .with_building(BuildingDef {
            growth_rate_bonus: 30,
            ..building("farmers_market", vec![produces("food", 6), consumes("gold", 4)])
        })
        .with_building(BuildingDef {
            unrest_reduction: 1,
            religious: true,
            ..building("shrine", vec![produces("magic_power", 2), consumes("gold", 2)])
        })
        .with_building(BuildingDef {
            unrest_reduction: 1,
            religious: true,
            ..building("temple", vec![produces("magic_power", 4), consumes("gold", 4)])
        })
        .with_building(BuildingDef {
            unrest_reduction: 1,
            ..building("oracle", vec![consumes("gold", 4)])
        })
        .with_building(BuildingDef {
            unrest_reduction: 1,
            ..building("animists_guild", vec![
                consumes("gold", 10),
                BuildingEffect::PerPerson {
                    task: PopulationTaskId::from("farmer"),
                    production_type: ProductionTypeId::from("rations"),
                    doubled_amount: 2,
                },
            ])
        })
        .with_building(building("marketplace", vec![bonus("gold", 50), consumes("gold", 2)]))
        .with_building(building("library", vec![produces("research", 4), consumes("gold", 2)]))
        .with_building(building("sawmill", vec![bonus("production", 25), consumes("gold", 4)]))
        .with_building(BuildingDef {
            mineral_percentage_bonus: 50,
            ..building("miners_guild", vec![bonus("production", 50), consumes("gold", 6)])
        })
        .with_building(building("cracked_altar", vec![consumes("gold", 3)]))
        .with_building(BuildingDef {
            production_cost: Some(60),
            ..building("barracks", vec![consumes("gold", 2)])
        })
        .with_building(BuildingDef {
            production_cost: Some(200),
            ..building("builders_hall", vec![consumes("gold", 2)])
        })
        .with_tax_rate(TaxRateDef {
            id: "tax_0".into(),
            doubled_gold_per_person: 0,
            unrest_percentage: 0,
        })
        .with_tax_rate(TaxRateDef {
            id: "tax_1".into(),
            doubled_gold_per_person: 2,
            unrest_percentage: 10,
        })
        .with_tax_rate(TaxRateDef {
            id: "tax_2_5".into(),
            doubled_gold_per_person: 5,
            unrest_percentage: 45,
        })
        .with_tax_rate(TaxRateDef {
            id: "tax_3_5".into(),
            doubled_gold_per_person: 7,
            unrest_percentage: 75,
        })
        .with_pick_type(PickTypeDef {
            id: PickTypeId::from("book"),
            fortress_productions: vec![fortress_yield("magic_power", 2)],
        })
        .with_pick_type(PickTypeDef {
            id: PickTypeId::from("retort"),
            fortress_productions: Vec::new(),
        })
        .with_pick(PickDef {
            id: "life_book".into(),
            pick_type: PickTypeId::from("book"),
            religious_building_bonus_percentage: 0,
        })
        .with_pick(PickDef {
            id: "chaos_book".into(),
            pick_type: PickTypeId::from("book"),
            religious_building_bonus_percentage: 0,
        })
        .with_pick(PickDef {
            id: "divine_power".into(),
            pick_type: PickTypeId::from("retort"),
            religious_building_bonus_percentage: 50,
        })
        .with_pick(PickDef {
            id: "infernal_power".into(),
            pick_type: PickTypeId::from("retort"),
            religious_building_bonus_percentage: 50,
        })
        .with_pick(PickDef {
            id: "alchemy".into(),
            pick_type: PickTypeId::from("retort"),
            religious_building_bonus_percentage: 0,
        })
        .with_plane(PlaneDef {
            plane_number: 0,
            fortress_productions: Vec::new(),
        })
        .with_plane(PlaneDef {
            plane_number: 1,
            fortress_productions: vec![fortress_yield("magic_power", 10)],
        })
        .with_spell(SpellDef {
            id: "just_cause".into(),
            unrest_reduction: Some(1),
            detrimental: false,
        })
        .with_spell(SpellDef {
            id: "great_wasting".into(),
            unrest_reduction: Some(-1),
            detrimental: true,
        })
        .with_spell(SpellDef {
            id: "famine".into(),
            unrest_reduction: None,
            detrimental: true,
        })
        .with_spell(SpellDef {
            id: "gaias_blessing".into(),
            unrest_reduction: None,
            detrimental: false,
        })
        .with_spell(SpellDef {
            id: "prosperity".into(),
            unrest_reduction: None,
            detrimental: false,
        })
        .with_city_spell_effect(CitySpellEffectDef {
            id: "famine".into(),
            unrest_reduction: None,
            unrest_percentage: Some(25),
            productions: vec![CitySpellEffectProduction {
                production_type: ProductionTypeId::from("rations"),
                doubled_amount: 0,
                percentage_bonus: 0,
                percentage_penalty: 50,
                amount_after_percentages: 0,
            }],
        })
        .with_city_spell_effect(CitySpellEffectDef {
            id: "gaias_blessing".into(),
            unrest_reduction: Some(1),
            unrest_percentage: None,
            productions: vec![CitySpellEffectProduction {
                production_type: ProductionTypeId::from("food"),
                doubled_amount: 0,
                percentage_bonus: 0,
                percentage_penalty: 0,
                amount_after_percentages: 2,
            }],
        })
        .with_city_spell_effect(CitySpellEffectDef {
            id: "prosperity".into(),
            unrest_reduction: None,
            unrest_percentage: None,
            productions: vec![CitySpellEffectProduction {
                production_type: ProductionTypeId::from("gold"),
                doubled_amount: 0,
                percentage_bonus: 100,
                percentage_penalty: 0,
                amount_after_percentages: 0,
            }],
        })
        .with_unit(UnitDef {
            id: "spearmen".into(),
            magic_realm: MagicRealm::Normal,
        })
        .with_unit(UnitDef {
            id: "swordsmen".into(),
            magic_realm: MagicRealm::Normal,
        })
        .with_unit(UnitDef {
            id: "brax".into(),
            magic_realm: MagicRealm::Hero,
        })
        .with_unit(UnitDef {
            id: "fire_elemental".into(),
            magic_realm: MagicRealm::Chaos,
        })
}
