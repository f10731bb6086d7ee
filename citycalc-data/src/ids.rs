//! Type-safe record identifiers.
//!
//! Rule records are keyed by short string IDs. Each record kind gets its own
//! newtype so a building ID can never be passed where a race ID is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

record_id!(
    /// Terrain tile type (grassland, hills, ocean, ...).
    TileTypeId
);
record_id!(
    /// Special map feature sitting on a tile (gold ore, nightshade, ...).
    MapFeatureId
);
record_id!(
    /// Race inhabiting a city.
    RaceId
);
record_id!(BuildingId);
record_id!(TaxRateId);
record_id!(
    /// Resource produced or consumed by a city (food, rations, gold, ...).
    ProductionTypeId
);
record_id!(
    /// Task a citizen can be assigned to (farmer, worker, rebel).
    PopulationTaskId
);
record_id!(
    /// A wizard pick: either a spell book or a retort.
    PickId
);
record_id!(PickTypeId);
record_id!(SpellId);
record_id!(CitySpellEffectId);
record_id!(UnitId);

/// Numeric player identifier. Negative values are reserved for AI identities.
pub type PlayerId = i32;

/// Plane (world half) number.
pub type PlaneNumber = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_and_compare() {
        let a = BuildingId::from("granary");
        let b = BuildingId::new(String::from("granary"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "granary");
        assert_eq!(a.as_str(), "granary");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = RaceId::from("high_men");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"high_men\"");
        let back: RaceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
