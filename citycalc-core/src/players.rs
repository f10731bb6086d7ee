//! Player directory: who owns a city and what they know.

use citycalc_data::{LookupError, PickId, PlayerId, RecordKind, TaxRateId};
use serde::{Deserialize, Serialize};

/// Identity behind a player slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardIdentity {
    #[default]
    Wizard,
    /// Neutral cities.
    Raiders,
    /// Monsters in lairs; never own cities.
    Monsters,
}

/// A pick the player holds, with how many copies (spell books stack).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPick {
    pub pick: PickId,
    #[serde(default = "one")]
    pub quantity: i32,
}

fn one() -> i32 {
    1
}

/// Public details of a player plus the known-wizard picks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDetails {
    pub player_id: PlayerId,
    #[serde(default)]
    pub human: bool,
    #[serde(default)]
    pub identity: WizardIdentity,
    #[serde(default)]
    pub picks: Vec<PlayerPick>,
    /// Current tax rate, used when a whole turn is calculated at once.
    #[serde(default)]
    pub tax_rate: Option<TaxRateId>,
}

impl PlayerDetails {
    pub fn human(player_id: PlayerId) -> Self {
        Self {
            player_id,
            human: true,
            ..Default::default()
        }
    }

    pub fn ai(player_id: PlayerId, identity: WizardIdentity) -> Self {
        Self {
            player_id,
            human: false,
            identity,
            ..Default::default()
        }
    }

    pub fn with_pick(mut self, pick: &str, quantity: i32) -> Self {
        self.picks.push(PlayerPick {
            pick: PickId::from(pick),
            quantity,
        });
        self
    }
}

/// Resolve a player by ID.
pub trait PlayerDirectory {
    fn find_player(&self, id: PlayerId, caller: &'static str) -> Result<&PlayerDetails, LookupError>;
}

impl PlayerDirectory for Vec<PlayerDetails> {
    fn find_player(&self, id: PlayerId, caller: &'static str) -> Result<&PlayerDetails, LookupError> {
        self.iter()
            .find(|p| p.player_id == id)
            .ok_or_else(|| LookupError::new(RecordKind::Player, id, caller))
    }
}
