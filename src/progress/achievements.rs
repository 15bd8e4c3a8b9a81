//! Achievement unlocking.
//!
//! Conditions are checked against the current state after every recorded
//! event. Each achievement is unlocked at most once.

use super::score::LevelUp;

pub const GOAL_SETTER: &str = "Goal Setter: Created 5 goals";
pub const GOAL_ACHIEVER: &str = "Goal Achiever: Completed 3 goals";

/// Goal count that unlocks [`GOAL_SETTER`]. Matched exactly, not "at least".
pub const GOAL_SETTER_COUNT: usize = 5;

/// Completed goal count that unlocks [`GOAL_ACHIEVER`]. Matched exactly.
pub const GOAL_ACHIEVER_COUNT: usize = 3;

/// Score thresholds for the "Point Master" achievements
pub const POINT_THRESHOLDS: [u64; 3] = [1000, 5000, 10000];

pub fn point_master(threshold: u64) -> String {
    format!("Point Master: Earned {} points", threshold)
}

/// State the conditions are evaluated against
#[derive(Debug, Clone, Copy)]
pub struct AchievementCheck {
    pub goal_count: usize,
    pub completed_goals: usize,
    pub score: u64,
    /// Level-up produced by the event being evaluated, if any
    pub level_up: Option<LevelUp>,
}

impl AchievementCheck {
    /// Every achievement whose condition currently holds, in evaluation order.
    ///
    /// A level milestone from the triggering level-up is listed first.
    pub fn candidates(&self) -> Vec<String> {
        let mut names = Vec::new();

        if let Some(name) = self.level_up.and_then(|l| l.milestone_achievement()) {
            names.push(name);
        }

        if self.goal_count == GOAL_SETTER_COUNT {
            names.push(GOAL_SETTER.to_string());
        }

        for threshold in POINT_THRESHOLDS {
            if self.score >= threshold {
                names.push(point_master(threshold));
            }
        }

        if self.completed_goals == GOAL_ACHIEVER_COUNT {
            names.push(GOAL_ACHIEVER.to_string());
        }

        names
    }
}

/// Unlocked achievements in unlock order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementSet {
    unlocked: Vec<String>,
}

impl AchievementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.unlocked.iter().any(|a| a == name)
    }

    /// Add an achievement, returning false if it was already unlocked
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.unlocked.push(name.to_string());
        true
    }

    /// Unlock everything the check qualifies for and return only the
    /// achievements that were not unlocked before
    pub fn evaluate(&mut self, check: &AchievementCheck) -> Vec<String> {
        check
            .candidates()
            .into_iter()
            .filter(|name| self.insert(name))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.unlocked.iter()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.unlocked.clone()
    }

    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }
}
