use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use quest_tracker::config::DEFAULT_CONFIG_FILE;
use quest_tracker::{Config, NewGoal, NewGoalKind, QuestError, QuestManager, TemplateRegistry, parse_selection};

#[derive(Parser)]
#[command(name = "quest-tracker")]
#[command(about = "Track goals, earn points, level up and unlock achievements")]
#[command(version)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Save file to use (overrides the config file)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new goal
    Add {
        #[command(subcommand)]
        kind: AddKind,
    },

    /// List or use goal templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// List all goals with their status
    List,

    /// Record an event for a goal (1-based, as shown by `list`)
    Record { selection: String },

    /// Show score, level and achievements
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct GoalArgs {
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Base points for the goal
    #[arg(long)]
    points: u32,
}

#[derive(Subcommand)]
enum AddKind {
    /// Completes once
    Simple(GoalArgs),

    /// Never completes, pays out every time
    Eternal(GoalArgs),

    /// Completes after a number of events, with a bonus at the end
    Checklist {
        #[command(flatten)]
        goal: GoalArgs,
        #[arg(long)]
        required: u32,
        #[arg(long, default_value_t = 0)]
        bonus: u32,
    },

    /// Pays per step, and the base points when the target is reached
    Progressive {
        #[command(flatten)]
        goal: GoalArgs,
        #[arg(long)]
        target: u32,
        #[arg(long, default_value_t = 0)]
        step_points: u32,
    },
}

#[derive(Subcommand)]
enum TemplateAction {
    /// Show available template ids
    List,
    /// Add a goal from a template
    Add { id: String },
}

impl AddKind {
    fn into_request(self) -> NewGoal {
        let (goal, kind) = match self {
            AddKind::Simple(goal) => (goal, NewGoalKind::Simple),
            AddKind::Eternal(goal) => (goal, NewGoalKind::Eternal),
            AddKind::Checklist { goal, required, bonus } => (
                goal,
                NewGoalKind::Checklist {
                    required_count: required,
                    bonus_points: bonus,
                },
            ),
            AddKind::Progressive {
                goal,
                target,
                step_points,
            } => (
                goal,
                NewGoalKind::Progressive {
                    target_value: target,
                    progress_points: step_points,
                },
            ),
        };
        NewGoal {
            name: goal.name,
            description: goal.description,
            points: goal.points,
            kind,
        }
    }
}

/// Load the save file, starting fresh if there is none yet
fn open_manager(save_file: &Path) -> Result<QuestManager> {
    let mut manager = QuestManager::new();
    match manager.load(save_file) {
        Ok(()) => {}
        Err(QuestError::MissingFile(_)) => {
            info!("No save file at {:?}, starting fresh", save_file);
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to load {:?}", save_file)),
    }
    Ok(manager)
}

fn add_goal(manager: &mut QuestManager, request: NewGoal, save_file: &Path) -> Result<()> {
    let goal = request.into_goal()?;
    let index = manager.add_goal(goal)?;
    manager.save(save_file)?;
    println!("Added goal #{}", index);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Read before logging starts so the filter can come from the file
    let loaded = Config::read(&cli.config)?;
    let config_found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    // Initialize logging
    let default_filter = if cli.verbose {
        "quest_tracker=debug".to_string()
    } else {
        config.log_filter.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !config_found {
        warn!("Config file {:?} not found, using defaults", cli.config);
    }

    let save_file = cli.file.unwrap_or(config.save_file);
    let mut manager = open_manager(&save_file)?;

    match cli.command {
        Commands::Add { kind } => {
            add_goal(&mut manager, kind.into_request(), &save_file)?;
        }
        Commands::Template { action } => {
            let mut registry = TemplateRegistry::new();
            registry.load_from_directory(&config.templates_dir)?;

            match action {
                TemplateAction::List => {
                    if registry.is_empty() {
                        println!("No templates found in {:?}", config.templates_dir);
                    }
                    for id in registry.ids() {
                        println!("{}", id);
                    }
                }
                TemplateAction::Add { id } => {
                    let request = registry
                        .get(&id)
                        .cloned()
                        .with_context(|| format!("Unknown template '{}'", id))?;
                    add_goal(&mut manager, request, &save_file)?;
                }
            }
        }
        Commands::List => {
            if manager.goals().is_empty() {
                println!("No goals yet.");
            }
            for (i, status) in manager.list_goals().iter().enumerate() {
                println!("{}. {}", i + 1, status);
            }
        }
        Commands::Record { selection } => {
            let index = parse_selection(&selection)?;
            let outcome = manager.record_event(index)?;
            manager.save(&save_file)?;

            println!("You earned {} points!", outcome.points_earned);
            if let Some(level) = outcome.level_up_to {
                println!("Level up! You are now level {}.", level);
            }
            for achievement in &outcome.new_achievements {
                println!("Achievement unlocked: {}", achievement);
            }
        }
        Commands::Summary { json } => {
            let summary = manager.score_summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Score: {}", summary.score);
                println!("Level: {} ({} points to next level)", summary.level, summary.points_to_next_level);
                if summary.achievements.is_empty() {
                    println!("Achievements: none yet");
                } else {
                    println!("Achievements:");
                    for achievement in &summary.achievements {
                        println!("  - {}", achievement);
                    }
                }
            }
        }
    }

    Ok(())
}
