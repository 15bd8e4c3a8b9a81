//! Goal Template Registry
//!
//! Loads reusable goal definitions from TOML files so common goals can be
//! added by id instead of typing every field.

use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{QuestError, Result};
use crate::goal::{NewGoal, RawNewGoal};

/// Registry for all goal templates
pub struct TemplateRegistry {
    templates: HashMap<String, NewGoal>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Load every `*.toml` file in a directory. Each file is a table of
    /// template id to goal definition.
    pub fn load_from_directory(&mut self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            warn!("Templates directory does not exist: {:?}", dir);
            return Ok(());
        }

        let entries = std::fs::read_dir(dir)
            .map_err(|e| QuestError::Template(format!("Failed to read templates directory: {}", e)))?;

        for entry in entries {
            let entry = entry.map_err(|e| QuestError::Template(format!("Failed to read entry: {}", e)))?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "toml") {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| QuestError::Template(format!("Failed to read {:?}: {}", path, e)))?;

                let table: HashMap<String, RawNewGoal> = toml::from_str(&content)
                    .map_err(|e| QuestError::Template(format!("Failed to parse {:?}: {}", path, e)))?;

                for (id, raw) in table {
                    let template = NewGoal::from_raw(&raw)
                        .map_err(|e| QuestError::Template(format!("Template '{}' in {:?}: {}", id, path, e)))?;
                    if self.templates.contains_key(&id) {
                        warn!("Duplicate template ID '{}' in {:?}, overwriting", id, path);
                    }
                    self.templates.insert(id, template);
                }
            }
        }

        info!("Loaded {} goal templates", self.templates.len());

        Ok(())
    }

    /// Get a template by ID
    pub fn get(&self, id: &str) -> Option<&NewGoal> {
        self.templates.get(id)
    }

    /// Template IDs in sorted order
    pub fn ids(&self) -> Vec<&String> {
        let mut ids: Vec<&String> = self.templates.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{GoalTag, NewGoalKind};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_templates_from_directory() {
        let temp_dir = TempDir::new().unwrap();

        let toml_content = r#"
[marathon]
kind = "simple"
name = "Marathon"
description = "Run a full marathon"
points = 1000

[temple]
kind = "checklist"
name = "Temple"
description = "Attend ten times"
points = 50
required_count = 10
bonus_points = 500
"#;

        let mut file = std::fs::File::create(temp_dir.path().join("starter.toml")).unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();
        // Ignored: wrong extension
        std::fs::write(temp_dir.path().join("notes.txt"), "not a template").unwrap();

        let mut registry = TemplateRegistry::new();
        registry.load_from_directory(temp_dir.path()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), vec!["marathon", "temple"]);

        let temple = registry.get("temple").unwrap();
        assert_eq!(
            temple.kind,
            NewGoalKind::Checklist {
                required_count: 10,
                bonus_points: 500,
            }
        );
        let goal = temple.clone().into_goal().unwrap();
        assert_eq!(goal.tag(), GoalTag::Checklist);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = TemplateRegistry::new();
        registry
            .load_from_directory(&temp_dir.path().join("missing"))
            .unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_template_kind() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("bad.toml"),
            "[odd]\nkind = \"bonus\"\nname = \"Odd\"\n",
        )
        .unwrap();

        let mut registry = TemplateRegistry::new();
        assert!(matches!(
            registry.load_from_directory(temp_dir.path()),
            Err(QuestError::Template(_))
        ));
    }
}
