use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;

use fitness_admin::models::{Difficulty, Workout, WorkoutDraft, WorkoutQuery, WorkoutType};
use fitness_admin::store::WorkoutStore;

use super::Context;
use crate::ui;

#[derive(Args)]
pub struct WorkoutsCommand {
    /// Serve sample workouts when the API is unreachable
    #[arg(long, global = true)]
    sample_fallback: bool,

    #[command(subcommand)]
    command: WorkoutSubcommands,
}

#[derive(Subcommand)]
enum WorkoutSubcommands {
    /// List workouts
    List {
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by type (strength, cardio, flexibility, hiit, crossfit, custom)
        #[arg(short = 't', long = "type")]
        workout_type: Option<WorkoutType>,

        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        #[arg(long)]
        muscle_group: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        /// Number of workouts to show
        #[arg(short, long)]
        limit: Option<u32>,

        /// Only workouts created by this user
        #[arg(long, value_name = "USER_ID", conflicts_with = "mine")]
        user: Option<String>,

        /// Only the signed-in user's workouts
        #[arg(long)]
        mine: bool,
    },

    /// Show workout details
    Show {
        /// Workout ID
        id: String,
    },

    /// Create a workout
    Create {
        title: String,

        #[arg(short = 't', long = "type", default_value = "custom")]
        workout_type: WorkoutType,

        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a workout
    Delete {
        /// Workout ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl WorkoutsCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let mut store = if self.sample_fallback {
            WorkoutStore::with_offline_fallback(ctx.api.clone())
        } else {
            WorkoutStore::new(ctx.api.clone())
        };

        match self.command {
            WorkoutSubcommands::List {
                search,
                workout_type,
                difficulty,
                muscle_group,
                page,
                limit,
                user,
                mine,
            } => {
                let query = WorkoutQuery {
                    page,
                    limit,
                    search,
                    difficulty,
                    muscle_group,
                    workout_type,
                    ..Default::default()
                };
                load(&mut store, ctx, &query).await?;

                if mine {
                    ui::loading("Loading your workouts…", store.fetch_mine())
                        .await
                        .map_err(|e| ctx.fail(e))?;
                } else if let Some(user_id) = user {
                    ui::loading("Loading workouts…", store.fetch_by_user(&user_id))
                        .await
                        .map_err(|e| ctx.fail(e))?;
                }

                print_workouts(store.items());
                Ok(())
            }
            WorkoutSubcommands::Show { id } => {
                load(&mut store, ctx, &WorkoutQuery::default()).await?;
                let workout = ui::loading("Loading workout…", store.fetch_by_id(&id))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                print_workout(&workout);
                Ok(())
            }
            WorkoutSubcommands::Create {
                title,
                workout_type,
                difficulty,
                duration,
                description,
            } => {
                load(&mut store, ctx, &WorkoutQuery::default()).await?;
                let draft = WorkoutDraft {
                    difficulty,
                    duration,
                    description,
                    ..WorkoutDraft::new(title, workout_type)
                };
                let workout = ui::loading("Creating workout…", store.create(draft))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                ui::success(format!("Created {} ({})", workout.title, workout.id));
                Ok(())
            }
            WorkoutSubcommands::Delete { id, force } => {
                load(&mut store, ctx, &WorkoutQuery::default()).await?;

                let label = store
                    .state()
                    .find(&id)
                    .map(|w| w.title.clone())
                    .unwrap_or_else(|| id.clone());
                if !force
                    && !Confirm::new()
                        .with_prompt(format!("Delete workout {}?", label))
                        .default(false)
                        .interact()?
                {
                    println!("Cancelled.");
                    return Ok(());
                }

                ui::loading("Deleting workout…", store.delete(&id))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                ui::success(format!("Deleted {}", label));
                Ok(())
            }
        }
    }
}

async fn load(store: &mut WorkoutStore, ctx: &Context, query: &WorkoutQuery) -> Result<()> {
    ui::loading("Loading workouts…", store.fetch_all(query))
        .await
        .map_err(|e| ctx.fail(e))?;
    ui::render_status(&*store);
    Ok(())
}

fn print_workouts(workouts: &[Workout]) {
    ui::heading("Workouts");
    if workouts.is_empty() {
        ui::empty("workouts");
        return;
    }

    println!(
        "{:<26} {:<24} {:<12} {:<14} {}",
        "ID".bold(),
        "TITLE".bold(),
        "TYPE".bold(),
        "DIFFICULTY".bold(),
        "EXERCISES".bold()
    );
    for workout in workouts {
        println!(
            "{:<26} {:<24} {:<12} {:<14} {}",
            ui::clip(&workout.id, 26),
            ui::clip(&workout.title, 24),
            workout.workout_type.to_string(),
            workout
                .difficulty
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            workout.exercises.len()
        );
    }
    println!();
    println!("{} workout(s)", workouts.len());
}

fn print_workout(workout: &Workout) {
    ui::heading(&workout.title);
    println!("ID:         {}", workout.id);
    println!("Type:       {}", workout.workout_type);
    if let Some(difficulty) = workout.difficulty {
        println!("Difficulty: {}", difficulty);
    }
    if let Some(duration) = workout.duration {
        println!("Duration:   {} min", duration);
    }
    if let Some(ref description) = workout.description {
        println!("About:      {}", description);
    }
    println!("Creator:    {}", workout.creator);
    println!();

    println!("{}", format!("Exercises ({})", workout.exercises.len()).bold());
    for (index, exercise) in workout.exercises.iter().enumerate() {
        let mut detail = Vec::new();
        if let (Some(sets), Some(reps)) = (exercise.sets, exercise.reps) {
            detail.push(format!("{}x{}", sets, reps));
        }
        if let Some(weight) = exercise.weight {
            detail.push(format!("{} kg", weight));
        }
        if let Some(duration) = exercise.duration {
            detail.push(format!("{}s", duration));
        }
        if let Some(distance) = exercise.distance {
            detail.push(format!("{} km", distance));
        }
        println!("  {}. {} {}", index + 1, exercise.name, detail.join(", ").dimmed());
    }
    if workout.total_sets() > 0 {
        println!();
        println!("Total sets: {}", workout.total_sets());
    }
}
