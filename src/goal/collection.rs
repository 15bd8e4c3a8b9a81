//! Ordered goal list with 1-based selection.

use super::definition::Goal;
use crate::error::{QuestError, Result};

/// Parse user-typed selection text into a 1-based index
pub fn parse_selection(input: &str) -> Result<usize> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| QuestError::NonNumericSelection(input.trim().to_string()))
}

/// Goals in the order they were added. That order is the index users pick from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalCollection {
    goals: Vec<Goal>,
}

impl GoalCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a goal and return its 1-based index
    pub fn push(&mut self, goal: Goal) -> usize {
        self.goals.push(goal);
        self.goals.len()
    }

    /// Get a goal by 1-based index
    pub fn select(&self, index: usize) -> Result<&Goal> {
        let pos = self.position(index)?;
        Ok(&self.goals[pos])
    }

    /// Get a mutable goal by 1-based index
    pub fn select_mut(&mut self, index: usize) -> Result<&mut Goal> {
        let pos = self.position(index)?;
        Ok(&mut self.goals[pos])
    }

    fn position(&self, index: usize) -> Result<usize> {
        if index < 1 || index > self.goals.len() {
            return Err(QuestError::InvalidSelection {
                index,
                count: self.goals.len(),
            });
        }
        Ok(index - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }

    pub fn completed_count(&self) -> usize {
        self.goals.iter().filter(|g| g.is_complete()).count()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

impl FromIterator<Goal> for GoalCollection {
    fn from_iter<I: IntoIterator<Item = Goal>>(iter: I) -> Self {
        Self {
            goals: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_is_one_based() {
        let mut goals = GoalCollection::new();
        assert_eq!(goals.push(Goal::simple("First", "a", 10)), 1);
        assert_eq!(goals.push(Goal::eternal("Second", "b", 20)), 2);

        assert_eq!(goals.select(1).unwrap().name(), "First");
        assert_eq!(goals.select(2).unwrap().name(), "Second");
    }

    #[test]
    fn test_select_out_of_range() {
        let mut goals = GoalCollection::new();
        goals.push(Goal::simple("Only", "a", 10));

        assert!(matches!(
            goals.select(0),
            Err(QuestError::InvalidSelection { index: 0, count: 1 })
        ));
        assert!(matches!(
            goals.select_mut(2),
            Err(QuestError::InvalidSelection { index: 2, count: 1 })
        ));
    }

    #[test]
    fn test_completed_count() {
        let mut goals = GoalCollection::new();
        goals.push(Goal::simple("A", "a", 10));
        goals.push(Goal::eternal("B", "b", 10));
        goals.push(Goal::checklist("C", "c", 10, 1, 0));

        goals.select_mut(1).unwrap().record_event();
        goals.select_mut(2).unwrap().record_event();
        goals.select_mut(3).unwrap().record_event();

        assert_eq!(goals.completed_count(), 2);
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection(" 3 ").unwrap(), 3);
        assert!(matches!(
            parse_selection("three"),
            Err(QuestError::NonNumericSelection(s)) if s == "three"
        ));
        assert!(parse_selection("-1").is_err());
    }
}
