//! Progression Module
//!
//! Score, levels, and the achievements they unlock.

pub mod achievements;
pub mod score;

pub use achievements::{AchievementCheck, AchievementSet};
pub use score::{LevelUp, ScoreTracker, level_for_score};
