//! Score and level tracking.
//!
//! Level is a flat tier: one level per 1000 points, starting at level 1.

/// Points needed per level
pub const POINTS_PER_LEVEL: u64 = 1000;

/// Every level that is a multiple of this unlocks a milestone achievement
pub const MILESTONE_INTERVAL: u32 = 5;

/// Calculate level from cumulative score
pub fn level_for_score(score: u64) -> u32 {
    u32::try_from(1 + score / POINTS_PER_LEVEL).unwrap_or(u32::MAX)
}

/// A level-up caused by one score application.
///
/// Only the final level is reported, even if several levels were crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
}

impl LevelUp {
    pub fn is_milestone(&self) -> bool {
        self.level % MILESTONE_INTERVAL == 0
    }

    /// Achievement name for this level-up, if it lands on a milestone
    pub fn milestone_achievement(&self) -> Option<String> {
        self.is_milestone()
            .then(|| format!("Milestone: Reached Level {}", self.level))
    }
}

/// Cumulative score and derived level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u64,
    level: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self { score: 0, level: 1 }
    }

    /// Restore a tracker from saved values. The level is taken as given.
    pub fn from_saved(score: u64, level: u32) -> Self {
        Self { score, level }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Add points and raise the level if the score now derives a higher
    /// one. Zero points change nothing, and the level never goes down, so a
    /// level restored from a save file is kept until the score passes it.
    pub fn apply(&mut self, points: u64) -> Option<LevelUp> {
        if points == 0 {
            return None;
        }
        self.score = self.score.saturating_add(points);

        let derived = level_for_score(self.score);
        if derived > self.level {
            self.level = derived;
            Some(LevelUp { level: derived })
        } else {
            None
        }
    }

    /// Points still needed to reach the next level
    pub fn points_to_next_level(&self) -> u64 {
        POINTS_PER_LEVEL - self.score % POINTS_PER_LEVEL
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new()
    }
}
