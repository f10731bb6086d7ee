//! Unit definitions.

use crate::ids::UnitId;
use serde::{Deserialize, Serialize};

/// Magic realm / lifeform type of a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagicRealm {
    #[default]
    Normal,
    Hero,
    Arcane,
    Chaos,
    Death,
    Life,
    Nature,
    Sorcery,
    Undead,
}

impl MagicRealm {
    /// Whether units of this realm count toward a city garrison.
    pub fn is_garrison(self) -> bool {
        matches!(self, MagicRealm::Normal | MagicRealm::Hero)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDef {
    pub id: UnitId,
    #[serde(default)]
    pub magic_realm: MagicRealm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garrison_realms() {
        assert!(MagicRealm::Normal.is_garrison());
        assert!(MagicRealm::Hero.is_garrison());
        assert!(!MagicRealm::Chaos.is_garrison());
        assert!(!MagicRealm::Undead.is_garrison());
    }
}
