//! Gold, score and lives bookkeeping on the shared run state.

use ramparts_core::errors::CommandError;
use ramparts_core::state::RunState;

use crate::config::SimConfig;

/// Reward and penalty rules for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Economy {
    pub leak_penalty: u32,
    pub score_per_reward: u32,
    pub wave_bonus_base: u32,
    pub wave_bonus_step: u32,
    pub wave_bonus_score_multiplier: u32,
}

impl Economy {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            leak_penalty: config.leak_penalty,
            score_per_reward: config.score_per_reward,
            wave_bonus_base: config.wave_bonus_base,
            wave_bonus_step: config.wave_bonus_step,
            wave_bonus_score_multiplier: config.wave_bonus_score_multiplier,
        }
    }

    /// Gold bonus for completing the 1-based `wave`.
    pub fn wave_bonus(&self, wave: u32) -> u32 {
        self.wave_bonus_base + self.wave_bonus_step * wave
    }

    /// Credit an enemy kill.
    pub fn reward_kill(&self, run: &mut RunState, reward: u32) {
        run.gold += reward;
        run.score += reward * self.score_per_reward;
        run.enemies_killed += 1;
        run.enemies_remaining_this_wave = run.enemies_remaining_this_wave.saturating_sub(1);
    }

    /// Charge a leak. Returns true when lives ran out.
    pub fn charge_leak(&self, run: &mut RunState) -> bool {
        run.lives = run.lives.saturating_sub(self.leak_penalty);
        run.enemies_leaked += 1;
        run.enemies_remaining_this_wave = run.enemies_remaining_this_wave.saturating_sub(1);
        run.lives == 0
    }

    /// Credit the completion bonus of the 1-based `wave` and move on to the
    /// next one. Returns the gold granted.
    pub fn complete_wave(&self, run: &mut RunState, wave: u32) -> u32 {
        let bonus = self.wave_bonus(wave);
        run.gold += bonus;
        run.score += bonus * self.wave_bonus_score_multiplier;
        run.current_wave = wave + 1;
        run.wave_active = false;
        run.enemies_spawned_this_wave = 0;
        run.enemies_remaining_this_wave = 0;
        bonus
    }
}

impl Default for Economy {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

/// Debit `cost` gold, or fail without touching the run.
pub fn spend(run: &mut RunState, cost: u32) -> Result<(), CommandError> {
    if run.gold < cost {
        return Err(CommandError::InsufficientGold {
            needed: cost,
            available: run.gold,
        });
    }
    run.gold -= cost;
    Ok(())
}
