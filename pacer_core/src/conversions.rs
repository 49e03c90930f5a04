//! `From` implementations bridging `pacer_config` types to `pacer_core` types.

use crate::config::{PacerChoice, RunMode, RunPlan};

// ── RunPlan ──────────────────────────────────────────────────────────────────

impl From<&pacer_config::Pacing> for RunPlan {
    fn from(c: &pacer_config::Pacing) -> Self {
        Self {
            pacer: PacerChoice::select(c.rate, c.baseline),
            mode: RunMode::resolve(c.duration, c.exactly),
        }
    }
}

impl From<&pacer_config::Config> for RunPlan {
    fn from(c: &pacer_config::Config) -> Self {
        (&c.pacing).into()
    }
}
