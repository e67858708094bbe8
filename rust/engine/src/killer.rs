use crate::config::GameConfig;

/// Escalation schedule for killer hands: every `frequency` hands of a
/// bust-free streak one hand carries raised stakes, and each one survived
/// raises the penalty on the next.
#[derive(Debug, Clone, Copy)]
pub struct KillerSchedule {
    frequency: u64,
    penalty_step: u32,
    penalty_cap: u32,
    win_multiplier: u64,
}

/// A killer hand about to be played: its ordinal within the current streak
/// and the penalty percentage riding on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillerPreview {
    /// 1-based count of killer hands this streak, this one included
    pub ordinal: u32,
    /// Share of the bankroll forfeited on top of a lost wager
    pub penalty_percent: u32,
}

/// How a killer hand actually landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillerOutcome {
    /// Extra winnings credited on top of the hand's net result
    Bonus { extra: u64 },
    /// Extra chips removed after the wager was already forfeited
    Penalty { percent: u32, amount: u64 },
}

impl KillerSchedule {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            frequency: cfg.killer_frequency,
            penalty_step: cfg.killer_penalty_step,
            penalty_cap: cfg.killer_penalty_cap,
            win_multiplier: cfg.killer_win_multiplier,
        }
    }

    /// Whether the upcoming hand is a killer hand. `streak_hand` is the
    /// 1-based hand number within the bust-free streak, the upcoming hand
    /// included; `triggered` is how many killer hands the streak has already
    /// seen resolved.
    pub fn preview(&self, streak_hand: u64, triggered: u32) -> Option<KillerPreview> {
        if streak_hand > 0 && streak_hand % self.frequency == 0 {
            let ordinal = triggered + 1;
            Some(KillerPreview {
                ordinal,
                penalty_percent: self.penalty_percent(ordinal),
            })
        } else {
            None
        }
    }

    /// Penalty percentage for the nth killer hand of a streak: one step per
    /// ordinal, capped.
    pub fn penalty_percent(&self, ordinal: u32) -> u32 {
        ordinal
            .saturating_mul(self.penalty_step)
            .min(self.penalty_cap)
    }

    /// Extra chips paid on top of a winning killer hand's net result, so the
    /// total comes to `win_multiplier` times the net.
    pub fn win_bonus(&self, net: u64) -> u64 {
        net * self.win_multiplier.saturating_sub(1)
    }

    /// Extra chips forfeited on a losing killer hand, never more than the
    /// bankroll itself.
    pub fn loss_penalty(&self, percent: u32, bankroll: u64) -> u64 {
        (bankroll * u64::from(percent) / 100).min(bankroll)
    }
}
