use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Cards dealt to the player each hand. Fixed by the game, not configurable.
pub const HAND_SIZE: usize = 5;

/// Cards in one standard pack.
pub const PACK_SIZE: usize = 52;

/// Tunable game parameters. The defaults reproduce the classic table:
/// a ten-pack shoe, a 200-chip stake, a 3% table minimum and a killer
/// hand every 25 hands of a bust-free streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of 52-card packs in the shoe
    pub packs: u8,
    /// Bankroll granted on a fresh record and after every bust
    pub base_stake: u64,
    /// Minimum wager as a percentage of the current bankroll
    pub min_wager_percent: u64,
    /// A killer hand fires every this many hands of the streak
    pub killer_frequency: u64,
    /// Penalty percentage added per killer hand already survived
    pub killer_penalty_step: u32,
    /// Ceiling for the killer penalty percentage
    pub killer_penalty_cap: u32,
    /// Net winnings on a killer hand are multiplied by this
    pub killer_win_multiplier: u64,
    /// Spare cards required beyond two full draws before a hand starts
    pub reshuffle_margin: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            packs: 10,
            base_stake: 200,
            min_wager_percent: 3,
            killer_frequency: 25,
            killer_penalty_step: 10,
            killer_penalty_cap: 90,
            killer_win_multiplier: 3,
            reshuffle_margin: 5,
        }
    }
}

impl GameConfig {
    /// Total number of cards a full shoe holds.
    pub fn shoe_size(&self) -> usize {
        self.packs as usize * PACK_SIZE
    }

    /// Cards that must remain in circulation before a hand may start:
    /// enough for the deal, a full redraw and the configured margin.
    pub fn reshuffle_threshold(&self) -> usize {
        2 * HAND_SIZE + self.reshuffle_margin
    }

    /// Table minimum for the given bankroll: `min_wager_percent` of it,
    /// rounded down, never below one chip.
    pub fn min_wager(&self, bankroll: u64) -> u64 {
        (bankroll * self.min_wager_percent / 100).max(1)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.packs == 0 {
            return Err(GameError::InvalidConfig(
                "packs must be at least 1".into(),
            ));
        }
        if self.base_stake == 0 {
            return Err(GameError::InvalidConfig(
                "base_stake must be at least 1".into(),
            ));
        }
        if self.min_wager_percent > 100 {
            return Err(GameError::InvalidConfig(format!(
                "min_wager_percent must be 0-100, got {}",
                self.min_wager_percent
            )));
        }
        if self.killer_frequency == 0 {
            return Err(GameError::InvalidConfig(
                "killer_frequency must be at least 1".into(),
            ));
        }
        if self.killer_penalty_cap > 100 {
            return Err(GameError::InvalidConfig(format!(
                "killer_penalty_cap must be 0-100, got {}",
                self.killer_penalty_cap
            )));
        }
        if self.killer_win_multiplier == 0 {
            return Err(GameError::InvalidConfig(
                "killer_win_multiplier must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
