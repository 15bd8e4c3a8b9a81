//! Save File Format
//!
//! Line-oriented text, written and read in this order:
//!
//! ```text
//! <score>,<level>
//! <achievement count>
//! <achievement>            (one line each)
//! <goal count>
//! <Tag>:<name>,<description>,<points>,<fields...>   (one line each)
//! ```
//!
//! Nothing is escaped. Names and descriptions are kept free of `:` and `,`
//! when goals are created, see [`Goal::validate`].

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{QuestError, Result};
use crate::goal::{Goal, GoalCollection, GoalKind, GoalTag};
use crate::progress::{AchievementSet, ScoreTracker};

/// Full engine state as read from a save file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedState {
    pub tracker: ScoreTracker,
    pub achievements: AchievementSet,
    pub goals: GoalCollection,
}

/// Render the save file contents
pub fn encode(tracker: &ScoreTracker, achievements: &AchievementSet, goals: &GoalCollection) -> String {
    let mut out = String::new();
    out.push_str(&format!("{},{}\n", tracker.score(), tracker.level()));

    out.push_str(&format!("{}\n", achievements.len()));
    for achievement in achievements.iter() {
        out.push_str(achievement);
        out.push('\n');
    }

    out.push_str(&format!("{}\n", goals.len()));
    for goal in goals.iter() {
        out.push_str(&goal.serialized_form());
        out.push('\n');
    }
    out
}

/// Parse save file contents. Fails on the first malformed line.
pub fn decode(text: &str) -> Result<SavedState> {
    let mut reader = LineReader::new(text);

    let (line_no, header) = reader.next_line("score and level")?;
    let (score, level) = header
        .split_once(',')
        .ok_or_else(|| QuestError::malformed(line_no, format!("expected '<score>,<level>', got '{}'", header)))?;
    let score: u64 = parse_number(line_no, "score", score)?;
    let level: u32 = parse_number(line_no, "level", level)?;
    if level == 0 {
        return Err(QuestError::malformed(line_no, "level must be at least 1"));
    }

    let achievement_count = reader.next_count("achievement count")?;
    let mut achievements = AchievementSet::new();
    for _ in 0..achievement_count {
        let (line_no, name) = reader.next_line("achievement")?;
        if !achievements.insert(name) {
            return Err(QuestError::malformed(line_no, format!("duplicate achievement '{}'", name)));
        }
    }

    let goal_count = reader.next_count("goal count")?;
    let mut goals = Vec::new();
    for _ in 0..goal_count {
        let (line_no, record) = reader.next_line("goal record")?;
        goals.push(decode_goal(line_no, record)?);
    }

    reader.expect_end()?;

    Ok(SavedState {
        tracker: ScoreTracker::from_saved(score, level),
        achievements,
        goals: goals.into_iter().collect(),
    })
}

/// Parse one `<Tag>:<fields>` record
fn decode_goal(line_no: usize, record: &str) -> Result<Goal> {
    let (tag, rest) = record
        .split_once(':')
        .ok_or_else(|| QuestError::malformed(line_no, format!("missing goal tag in '{}'", record)))?;
    let tag = GoalTag::from_str(tag)
        .ok_or_else(|| QuestError::malformed(line_no, format!("unknown goal tag '{}'", tag)))?;

    let fields: Vec<&str> = rest.split(',').collect();
    if fields.len() != tag.arity() {
        return Err(QuestError::malformed(
            line_no,
            format!(
                "{} expects {} fields, found {}",
                tag.as_str(),
                tag.arity(),
                fields.len()
            ),
        ));
    }

    let name = fields[0];
    if name.trim().is_empty() {
        return Err(QuestError::malformed(line_no, "goal name is empty"));
    }
    let description = fields[1];
    let points: u32 = parse_number(line_no, "points", fields[2])?;

    let kind = match tag {
        GoalTag::Simple => GoalKind::Simple {
            complete: parse_bool(line_no, fields[3])?,
        },
        GoalTag::Eternal => GoalKind::Eternal {
            times_completed: parse_number(line_no, "times completed", fields[3])?,
        },
        GoalTag::Checklist => {
            let required_count: u32 = parse_number(line_no, "required count", fields[3])?;
            let completed_count: u32 = parse_number(line_no, "completed count", fields[4])?;
            let bonus_points = parse_number(line_no, "bonus points", fields[5])?;
            if required_count == 0 || completed_count > required_count {
                return Err(QuestError::malformed(
                    line_no,
                    format!("checklist progress {}/{} is out of range", completed_count, required_count),
                ));
            }
            GoalKind::Checklist {
                required_count,
                completed_count,
                bonus_points,
            }
        }
        GoalTag::Progressive => {
            let target_value: u32 = parse_number(line_no, "target value", fields[3])?;
            let current_progress: u32 = parse_number(line_no, "current progress", fields[4])?;
            let progress_points = parse_number(line_no, "progress points", fields[5])?;
            if target_value == 0 || current_progress > target_value {
                return Err(QuestError::malformed(
                    line_no,
                    format!("progressive progress {}/{} is out of range", current_progress, target_value),
                ));
            }
            GoalKind::Progressive {
                target_value,
                current_progress,
                progress_points,
            }
        }
    };

    Ok(Goal::with_kind(name, description, points, kind))
}

fn parse_number<T: FromStr>(line_no: usize, field: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| QuestError::malformed(line_no, format!("invalid {} '{}'", field, value)))
}

fn parse_bool(line_no: usize, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(QuestError::malformed(line_no, format!("invalid completion flag '{}'", value))),
    }
}

/// Sequential line access with 1-based line numbers for error messages
struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    consumed: usize,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            consumed: 0,
        }
    }

    fn next_line(&mut self, expected: &str) -> Result<(usize, &'a str)> {
        match self.lines.next() {
            Some(line) => {
                self.consumed += 1;
                Ok((self.consumed, line))
            }
            None => Err(QuestError::malformed(
                self.consumed + 1,
                format!("unexpected end of file, expected {}", expected),
            )),
        }
    }

    fn next_count(&mut self, expected: &str) -> Result<usize> {
        let (line_no, line) = self.next_line(expected)?;
        parse_number(line_no, expected, line)
    }

    /// Only blank lines may follow the last goal record
    fn expect_end(&mut self) -> Result<()> {
        while let Some(line) = self.lines.next() {
            self.consumed += 1;
            if !line.trim().is_empty() {
                return Err(QuestError::malformed(self.consumed, "unexpected data after the last goal"));
            }
        }
        Ok(())
    }
}

/// Write the save file, replacing any previous contents
pub fn save_to_file(
    path: &Path,
    tracker: &ScoreTracker,
    achievements: &AchievementSet,
    goals: &GoalCollection,
) -> Result<()> {
    let contents = encode(tracker, achievements, goals);
    fs::write(path, contents).map_err(|e| QuestError::io(path, e))?;
    info!(
        "Saved {} goals and {} achievements to {:?}",
        goals.len(),
        achievements.len(),
        path
    );
    Ok(())
}

/// Read and parse a save file
pub fn load_from_file(path: &Path) -> Result<SavedState> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => QuestError::MissingFile(path.to_path_buf()),
        _ => QuestError::io(path, e),
    })?;
    let state = decode(&contents)?;
    info!(
        "Loaded {} goals and {} achievements from {:?}",
        state.goals.len(),
        state.achievements.len(),
        path
    );
    Ok(state)
}
