//! Goal Definitions
//!
//! The four goal kinds and how each one reacts to a recorded event.

use serde::Deserialize;

use crate::error::{QuestError, Result};

/// Characters that would break the one-line save record.
const RESERVED_CHARS: [char; 4] = [':', ',', '\n', '\r'];

/// Discriminator written in front of every saved goal record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalTag {
    Simple,
    Eternal,
    Checklist,
    Progressive,
}

impl GoalTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalTag::Simple => "SimpleGoal",
            GoalTag::Eternal => "EternalGoal",
            GoalTag::Checklist => "ChecklistGoal",
            GoalTag::Progressive => "ProgressiveGoal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SimpleGoal" => Some(GoalTag::Simple),
            "EternalGoal" => Some(GoalTag::Eternal),
            "ChecklistGoal" => Some(GoalTag::Checklist),
            "ProgressiveGoal" => Some(GoalTag::Progressive),
            _ => None,
        }
    }

    /// Number of comma-separated fields after the tag: name, description,
    /// points, then the kind-specific fields.
    pub fn arity(&self) -> usize {
        match self {
            GoalTag::Simple | GoalTag::Eternal => 4,
            GoalTag::Checklist | GoalTag::Progressive => 6,
        }
    }
}

/// Kind-specific state of a goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalKind {
    /// Completes on its first event
    Simple { complete: bool },
    /// Never completes; every event pays out
    Eternal { times_completed: u32 },
    /// Completes after `required_count` events, paying a one-time bonus
    Checklist {
        required_count: u32,
        completed_count: u32,
        bonus_points: u32,
    },
    /// Pays `progress_points` per step and the base points on the final step
    Progressive {
        target_value: u32,
        current_progress: u32,
        progress_points: u32,
    },
}

/// A trackable objective with a reward policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    name: String,
    description: String,
    /// Base reward
    points: u32,
    kind: GoalKind,
}

impl Goal {
    pub fn simple(name: &str, description: &str, points: u32) -> Self {
        Self::with_kind(name, description, points, GoalKind::Simple { complete: false })
    }

    pub fn eternal(name: &str, description: &str, points: u32) -> Self {
        Self::with_kind(name, description, points, GoalKind::Eternal { times_completed: 0 })
    }

    pub fn checklist(name: &str, description: &str, points: u32, required_count: u32, bonus_points: u32) -> Self {
        Self::with_kind(
            name,
            description,
            points,
            GoalKind::Checklist {
                required_count,
                completed_count: 0,
                bonus_points,
            },
        )
    }

    pub fn progressive(name: &str, description: &str, points: u32, target_value: u32, progress_points: u32) -> Self {
        Self::with_kind(
            name,
            description,
            points,
            GoalKind::Progressive {
                target_value,
                current_progress: 0,
                progress_points,
            },
        )
    }

    pub fn with_kind(name: &str, description: &str, points: u32, kind: GoalKind) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            points,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Kind-specific state. Only [`Goal::record_event`] moves it forward.
    pub fn kind(&self) -> &GoalKind {
        &self.kind
    }

    pub fn tag(&self) -> GoalTag {
        match self.kind {
            GoalKind::Simple { .. } => GoalTag::Simple,
            GoalKind::Eternal { .. } => GoalTag::Eternal,
            GoalKind::Checklist { .. } => GoalTag::Checklist,
            GoalKind::Progressive { .. } => GoalTag::Progressive,
        }
    }

    /// Completion is derived from the counters for checklist and
    /// progressive goals, so it can never drift from them.
    pub fn is_complete(&self) -> bool {
        match self.kind {
            GoalKind::Simple { complete } => complete,
            GoalKind::Eternal { .. } => false,
            GoalKind::Checklist {
                required_count,
                completed_count,
                ..
            } => completed_count >= required_count,
            GoalKind::Progressive {
                target_value,
                current_progress,
                ..
            } => current_progress >= target_value,
        }
    }

    /// Apply one event and return the points it earned.
    ///
    /// Returns 0 for a goal that is already complete; that means "nothing
    /// earned", not an error.
    pub fn record_event(&mut self) -> u64 {
        let base = u64::from(self.points);
        match &mut self.kind {
            GoalKind::Simple { complete } => {
                if *complete {
                    return 0;
                }
                *complete = true;
                base
            }
            GoalKind::Eternal { times_completed } => {
                *times_completed = times_completed.saturating_add(1);
                base
            }
            GoalKind::Checklist {
                required_count,
                completed_count,
                bonus_points,
            } => {
                if *completed_count >= *required_count {
                    return 0;
                }
                *completed_count += 1;
                if *completed_count >= *required_count {
                    base + u64::from(*bonus_points)
                } else {
                    base
                }
            }
            GoalKind::Progressive {
                target_value,
                current_progress,
                progress_points,
            } => {
                if *current_progress >= *target_value {
                    return 0;
                }
                *current_progress += 1;
                if *current_progress >= *target_value {
                    base + u64::from(*progress_points)
                } else {
                    u64::from(*progress_points)
                }
            }
        }
    }

    /// Checkbox line shown when listing goals
    pub fn status_text(&self) -> String {
        let mark = if self.is_complete() { "[X]" } else { "[ ]" };
        let progress = match self.kind {
            GoalKind::Simple { .. } => String::new(),
            GoalKind::Eternal { times_completed } => {
                format!(" - Completed {} times", times_completed)
            }
            GoalKind::Checklist {
                required_count,
                completed_count,
                ..
            } => format!(" - Completed {}/{} times", completed_count, required_count),
            GoalKind::Progressive {
                target_value,
                current_progress,
                ..
            } => format!(" - Progress: {}/{}", current_progress, target_value),
        };
        format!("{} {} ({}){}", mark, self.name, self.description, progress)
    }

    /// Single-line save record: `<Tag>:<name>,<description>,<points>,<fields...>`
    pub fn serialized_form(&self) -> String {
        let fields = match self.kind {
            GoalKind::Simple { complete } => {
                if complete { "True".to_string() } else { "False".to_string() }
            }
            GoalKind::Eternal { times_completed } => times_completed.to_string(),
            GoalKind::Checklist {
                required_count,
                completed_count,
                bonus_points,
            } => format!("{},{},{}", required_count, completed_count, bonus_points),
            GoalKind::Progressive {
                target_value,
                current_progress,
                progress_points,
            } => format!("{},{},{}", target_value, current_progress, progress_points),
        };
        format!(
            "{}:{},{},{},{}",
            self.tag().as_str(),
            self.name,
            self.description,
            self.points,
            fields
        )
    }

    /// Reject goals that could not be saved and loaded back unchanged.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(QuestError::InvalidGoal("name must not be empty".to_string()));
        }
        for (field, value) in [("name", &self.name), ("description", &self.description)] {
            if let Some(c) = value.chars().find(|c| RESERVED_CHARS.contains(c)) {
                return Err(QuestError::InvalidGoal(format!(
                    "{} '{}' contains reserved character {:?}",
                    field, value, c
                )));
            }
        }
        match self.kind {
            GoalKind::Checklist {
                required_count: 0, ..
            } => Err(QuestError::InvalidGoal(format!(
                "checklist goal '{}' needs a required count of at least 1",
                self.name
            ))),
            GoalKind::Progressive { target_value: 0, .. } => Err(QuestError::InvalidGoal(format!(
                "progressive goal '{}' needs a target value of at least 1",
                self.name
            ))),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Creation Requests
// ============================================================================

/// Raw goal request as it appears in a template file
#[derive(Debug, Clone, Deserialize)]
pub struct RawNewGoal {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub points: u32,
    pub required_count: Option<u32>,
    #[serde(default)]
    pub bonus_points: u32,
    pub target_value: Option<u32>,
    #[serde(default)]
    pub progress_points: u32,
}

/// Kind-specific parameters of a creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewGoalKind {
    Simple,
    Eternal,
    Checklist { required_count: u32, bonus_points: u32 },
    Progressive { target_value: u32, progress_points: u32 },
}

/// A validated-on-build request to create a goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    pub name: String,
    pub description: String,
    pub points: u32,
    pub kind: NewGoalKind,
}

impl NewGoal {
    /// Resolve a raw template entry
    pub fn from_raw(raw: &RawNewGoal) -> Result<Self> {
        let kind = match raw.kind.to_lowercase().as_str() {
            "simple" => NewGoalKind::Simple,
            "eternal" => NewGoalKind::Eternal,
            "checklist" => NewGoalKind::Checklist {
                required_count: raw.required_count.ok_or_else(|| {
                    QuestError::InvalidGoal(format!("checklist goal '{}' is missing required_count", raw.name))
                })?,
                bonus_points: raw.bonus_points,
            },
            "progressive" => NewGoalKind::Progressive {
                target_value: raw.target_value.ok_or_else(|| {
                    QuestError::InvalidGoal(format!("progressive goal '{}' is missing target_value", raw.name))
                })?,
                progress_points: raw.progress_points,
            },
            other => {
                return Err(QuestError::InvalidGoal(format!("unknown goal kind '{}'", other)));
            }
        };

        Ok(Self {
            name: raw.name.clone(),
            description: raw.description.clone(),
            points: raw.points,
            kind,
        })
    }

    /// Build the goal, rejecting input the save format cannot hold
    pub fn into_goal(self) -> Result<Goal> {
        let goal = match self.kind {
            NewGoalKind::Simple => Goal::simple(&self.name, &self.description, self.points),
            NewGoalKind::Eternal => Goal::eternal(&self.name, &self.description, self.points),
            NewGoalKind::Checklist {
                required_count,
                bonus_points,
            } => Goal::checklist(&self.name, &self.description, self.points, required_count, bonus_points),
            NewGoalKind::Progressive {
                target_value,
                progress_points,
            } => Goal::progressive(&self.name, &self.description, self.points, target_value, progress_points),
        };
        goal.validate()?;
        Ok(goal)
    }
}
