//! Quest Manager
//!
//! Owns the goals, the score tracker and the unlocked achievements, and
//! exposes the operations the command-line driver calls.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::goal::{Goal, GoalCollection};
use crate::persistence;
use crate::progress::{AchievementCheck, AchievementSet, ScoreTracker};

/// Result of recording one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    pub points_earned: u64,
    /// New level, if this event caused a level-up
    pub level_up_to: Option<u32>,
    /// Achievements unlocked by this event, in unlock order
    pub new_achievements: Vec<String>,
}

/// Score report for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    pub score: u64,
    pub level: u32,
    pub points_to_next_level: u64,
    pub achievements: Vec<String>,
}

/// Single-user goal engine
#[derive(Debug, Clone, Default)]
pub struct QuestManager {
    goals: GoalCollection,
    tracker: ScoreTracker,
    achievements: AchievementSet,
}

impl QuestManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a goal and return its 1-based index.
    ///
    /// Goals whose name or description would corrupt the save file are rejected.
    pub fn add_goal(&mut self, goal: Goal) -> Result<usize> {
        goal.validate()?;
        let name = goal.name().to_string();
        let tag = goal.tag();
        let index = self.goals.push(goal);
        info!("Added goal #{} '{}' ({})", index, name, tag.as_str());
        Ok(index)
    }

    /// Status line for every goal, in selection order
    pub fn list_goals(&self) -> Vec<String> {
        self.goals.iter().map(Goal::status_text).collect()
    }

    pub fn goals(&self) -> &GoalCollection {
        &self.goals
    }

    pub fn score(&self) -> u64 {
        self.tracker.score()
    }

    pub fn level(&self) -> u32 {
        self.tracker.level()
    }

    pub fn achievements(&self) -> &AchievementSet {
        &self.achievements
    }

    /// Record an event for the goal at a 1-based index.
    ///
    /// An out-of-range index fails without touching any state. Achievements
    /// are evaluated after every event, including ones that earn nothing.
    pub fn record_event(&mut self, index: usize) -> Result<EventOutcome> {
        let goal = self.goals.select_mut(index)?;
        let was_complete = goal.is_complete();
        let points_earned = goal.record_event();
        debug!("Recorded event on goal #{} '{}': +{} points", index, goal.name(), points_earned);

        if !was_complete && goal.is_complete() {
            info!("Goal #{} '{}' completed", index, goal.name());
        }

        let level_up = self.tracker.apply(points_earned);
        if let Some(level_up) = level_up {
            info!("Level up! Now level {}", level_up.level);
        }

        let check = AchievementCheck {
            goal_count: self.goals.len(),
            completed_goals: self.goals.completed_count(),
            score: self.tracker.score(),
            level_up,
        };
        let new_achievements = self.achievements.evaluate(&check);
        for achievement in &new_achievements {
            info!("Achievement unlocked: {}", achievement);
        }

        Ok(EventOutcome {
            points_earned,
            level_up_to: level_up.map(|l| l.level),
            new_achievements,
        })
    }

    pub fn score_summary(&self) -> ScoreSummary {
        ScoreSummary {
            score: self.tracker.score(),
            level: self.tracker.level(),
            points_to_next_level: self.tracker.points_to_next_level(),
            achievements: self.achievements.to_vec(),
        }
    }

    /// Write the whole state to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        persistence::save_to_file(path, &self.tracker, &self.achievements, &self.goals)
    }

    /// Replace the whole state with a saved one.
    ///
    /// The file is fully parsed before anything is replaced, so a failed
    /// load leaves the current state as it was.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let state = persistence::load_from_file(path)?;
        self.tracker = state.tracker;
        self.achievements = state.achievements;
        self.goals = state.goals;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuestError;
    use crate::progress::achievements::{GOAL_ACHIEVER, GOAL_SETTER, point_master};
    use tempfile::TempDir;

    fn manager_with_goals(count: usize) -> QuestManager {
        let mut manager = QuestManager::new();
        for i in 0..count {
            manager
                .add_goal(Goal::eternal(&format!("Goal {}", i + 1), "repeat", 10))
                .unwrap();
        }
        manager
    }

    #[test]
    fn test_record_event_scores_points() {
        let mut manager = QuestManager::new();
        manager.add_goal(Goal::simple("Marathon", "Run", 300)).unwrap();

        let outcome = manager.record_event(1).unwrap();
        assert_eq!(outcome.points_earned, 300);
        assert_eq!(outcome.level_up_to, None);
        assert!(outcome.new_achievements.is_empty());
        assert_eq!(manager.score(), 300);

        let again = manager.record_event(1).unwrap();
        assert_eq!(again.points_earned, 0);
        assert_eq!(manager.score(), 300);
    }

    #[test]
    fn test_invalid_selection_leaves_state() {
        let mut manager = manager_with_goals(2);
        assert!(matches!(
            manager.record_event(3),
            Err(QuestError::InvalidSelection { index: 3, count: 2 })
        ));
        assert!(matches!(
            manager.record_event(0),
            Err(QuestError::InvalidSelection { .. })
        ));
        assert_eq!(manager.score(), 0);
        assert!(manager.achievements().is_empty());
    }

    #[test]
    fn test_add_goal_rejects_delimiters() {
        let mut manager = QuestManager::new();
        let result = manager.add_goal(Goal::simple("Read, pray", "daily", 10));
        assert!(matches!(result, Err(QuestError::InvalidGoal(_))));
        assert!(manager.goals().is_empty());
    }

    #[test]
    fn test_level_up_and_point_master() {
        let mut manager = QuestManager::new();
        manager.add_goal(Goal::eternal("Read", "daily", 950)).unwrap();

        let first = manager.record_event(1).unwrap();
        assert_eq!(first.level_up_to, None);

        let second = manager.record_event(1).unwrap();
        assert_eq!(second.level_up_to, Some(2));
        assert_eq!(second.new_achievements, vec![point_master(1000)]);
        assert_eq!(manager.level(), 2);
    }

    #[test]
    fn test_milestone_achievement() {
        let mut manager = QuestManager::new();
        manager.add_goal(Goal::eternal("Grind", "again", 1000)).unwrap();

        let mut unlocked = Vec::new();
        for _ in 0..4 {
            unlocked.extend(manager.record_event(1).unwrap().new_achievements);
        }
        assert_eq!(manager.level(), 5);
        assert!(unlocked.contains(&"Milestone: Reached Level 5".to_string()));
        assert!(unlocked.contains(&point_master(1000)));
    }

    #[test]
    fn test_goal_setter_at_exactly_five() {
        let mut manager = manager_with_goals(5);
        let outcome = manager.record_event(1).unwrap();
        assert_eq!(outcome.new_achievements, vec![GOAL_SETTER.to_string()]);

        // Only once
        assert!(manager.record_event(2).unwrap().new_achievements.is_empty());
    }

    #[test]
    fn test_goal_setter_missed_past_five() {
        let mut manager = manager_with_goals(5);
        // No event recorded while there were exactly five goals
        manager.add_goal(Goal::eternal("Goal 6", "repeat", 10)).unwrap();

        let outcome = manager.record_event(1).unwrap();
        assert!(outcome.new_achievements.is_empty());
        assert!(!manager.achievements().contains(GOAL_SETTER));
    }

    #[test]
    fn test_goal_achiever() {
        let mut manager = QuestManager::new();
        for name in ["A", "B", "C", "D"] {
            manager.add_goal(Goal::simple(name, "once", 10)).unwrap();
        }

        manager.record_event(1).unwrap();
        manager.record_event(2).unwrap();
        let third = manager.record_event(3).unwrap();
        assert_eq!(third.new_achievements, vec![GOAL_ACHIEVER.to_string()]);
    }

    #[test]
    fn test_score_summary() {
        let mut manager = QuestManager::new();
        manager.add_goal(Goal::checklist("Temple", "Attend", 600, 2, 400)).unwrap();
        manager.record_event(1).unwrap();
        manager.record_event(1).unwrap();

        let summary = manager.score_summary();
        assert_eq!(summary.score, 1600);
        assert_eq!(summary.level, 2);
        assert_eq!(summary.points_to_next_level, 400);
        assert_eq!(summary.achievements, vec![point_master(1000)]);
    }

    #[test]
    fn test_list_goals() {
        let mut manager = QuestManager::new();
        manager.add_goal(Goal::simple("Marathon", "Run", 1000)).unwrap();
        manager.add_goal(Goal::eternal("Read", "Daily", 10)).unwrap();
        manager.record_event(1).unwrap();

        assert_eq!(
            manager.list_goals(),
            vec![
                "[X] Marathon (Run)".to_string(),
                "[ ] Read (Daily) - Completed 0 times".to_string(),
            ]
        );
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("goals.txt");

        let mut manager = QuestManager::new();
        manager.add_goal(Goal::simple("Marathon", "Run a marathon", 1000)).unwrap();
        manager.add_goal(Goal::eternal("Read", "Read daily", 100)).unwrap();
        manager.add_goal(Goal::checklist("Temple", "Attend twice", 50, 2, 500)).unwrap();
        manager.add_goal(Goal::progressive("Pushups", "Ten sets", 200, 10, 20)).unwrap();
        manager.record_event(1).unwrap();
        manager.record_event(2).unwrap();
        manager.record_event(3).unwrap();
        manager.record_event(3).unwrap();
        manager.save(&path).unwrap();

        let mut loaded = QuestManager::new();
        loaded.load(&path).unwrap();

        assert_eq!(loaded.score_summary(), manager.score_summary());
        assert_eq!(loaded.goals(), manager.goals());
        assert_eq!(loaded.list_goals(), manager.list_goals());
        // Boundary values survive: checklist at its required count, progressive at zero
        assert!(loaded.goals().select(3).unwrap().is_complete());
        assert!(!loaded.goals().select(4).unwrap().is_complete());
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("goals.txt");
        std::fs::write(&path, "500,1\n0\n3\nSimpleGoal:Run,Go,10,False\n").unwrap();

        let mut manager = manager_with_goals(2);
        manager.record_event(1).unwrap();
        let before = manager.score_summary();
        let goals_before = manager.goals().clone();

        assert!(matches!(manager.load(&path), Err(QuestError::Malformed { .. })));
        assert_eq!(manager.score_summary(), before);
        assert_eq!(manager.goals(), &goals_before);

        let missing = temp_dir.path().join("missing.txt");
        assert!(matches!(manager.load(&missing), Err(QuestError::MissingFile(_))));
        assert_eq!(manager.score_summary(), before);
    }

    #[test]
    fn test_loaded_level_is_trusted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("goals.txt");
        std::fs::write(&path, "2500,7\n1\nCustom award\n0\n").unwrap();

        let mut manager = QuestManager::new();
        manager.load(&path).unwrap();
        assert_eq!(manager.score(), 2500);
        assert_eq!(manager.level(), 7);
        assert!(manager.achievements().contains("Custom award"));
    }

    #[test]
    fn test_zero_point_event_keeps_loaded_level() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("goals.txt");
        std::fs::write(&path, "2500,7\n0\n1\nSimpleGoal:Marathon,Run,1000,True\n").unwrap();

        let mut manager = QuestManager::new();
        manager.load(&path).unwrap();

        let outcome = manager.record_event(1).unwrap();
        assert_eq!(outcome.points_earned, 0);
        assert_eq!(outcome.level_up_to, None);
        assert_eq!(manager.score(), 2500);
        assert_eq!(manager.level(), 7);
    }

    #[test]
    fn test_milestone_listed_before_point_master() {
        let mut manager = QuestManager::new();
        manager.add_goal(Goal::eternal("Grind", "again", 4000)).unwrap();

        let outcome = manager.record_event(1).unwrap();
        assert_eq!(outcome.level_up_to, Some(5));
        assert_eq!(
            outcome.new_achievements,
            vec!["Milestone: Reached Level 5".to_string(), point_master(1000)]
        );
        assert_eq!(manager.score_summary().achievements, outcome.new_achievements);
    }

    #[test]
    fn test_zero_point_event_still_evaluates_achievements() {
        // Five goals, all already complete, so the event earns nothing
        let mut fresh = QuestManager::new();
        for i in 0..5 {
            let mut goal = Goal::simple(&format!("Goal {}", i + 1), "once", 10);
            goal.record_event();
            fresh.add_goal(goal).unwrap();
        }
        let outcome = fresh.record_event(1).unwrap();
        assert_eq!(outcome.points_earned, 0);
        assert_eq!(outcome.new_achievements, vec![GOAL_SETTER.to_string()]);
    }
}
