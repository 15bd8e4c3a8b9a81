//! Goal tracking with points, levels and achievements.
//!
//! A [`QuestManager`] holds an ordered list of goals. Recording an event on a
//! goal earns points according to the goal's kind, which raise the score,
//! derive the level, and may unlock achievements. The whole state is saved
//! to and loaded from a plain text file.

pub mod config;
pub mod error;
pub mod goal;
pub mod manager;
pub mod persistence;
pub mod progress;
pub mod templates;

pub use config::Config;
pub use error::{QuestError, Result};
pub use goal::{Goal, GoalCollection, GoalKind, GoalTag, NewGoal, NewGoalKind, parse_selection};
pub use manager::{EventOutcome, QuestManager, ScoreSummary};
pub use progress::{AchievementSet, LevelUp, ScoreTracker};
pub use templates::TemplateRegistry;
