//! Production types and tax rates.

use crate::ids::{ProductionTypeId, TaxRateId};
use serde::{Deserialize, Serialize};

/// How a doubled amount is halved back into a whole number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingDirection {
    /// Odd doubled values are a data error.
    MustBeExactMultiple,
    #[default]
    RoundDown,
    RoundUp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionTypeDef {
    pub id: ProductionTypeId,

    #[serde(default)]
    pub rounding: RoundingDirection,

    /// AI players get this resource scaled by their difficulty level multiplier.
    #[serde(default)]
    pub difficulty_level_multiplier_applies: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRateDef {
    pub id: TaxRateId,

    /// Gold paid by each non-rebel person, doubled.
    #[serde(default)]
    pub doubled_gold_per_person: i32,

    /// Percentage of the population that rebels at this rate.
    #[serde(default)]
    pub unrest_percentage: i32,
}
