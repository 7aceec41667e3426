use anyhow::Result;
use clap::Args;
use colored::Colorize;

use fitness_admin::models::{Role, UserQuery, WorkoutQuery};
use fitness_admin::stats;
use fitness_admin::store::{UserStore, WorkoutStore};

use super::Context;
use crate::ui;

#[derive(Args)]
pub struct TrainersCommand {
    /// Match trainer name or email
    #[arg(short, long)]
    search: Option<String>,
}

impl TrainersCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let mut users = UserStore::new(ctx.api.clone());
        let mut workouts = WorkoutStore::with_offline_fallback(ctx.api.clone());

        let query = UserQuery {
            search: self.search,
            role: Some(Role::Trainer),
            ..Default::default()
        };
        ui::loading("Loading trainers…", users.fetch_all(&query))
            .await
            .map_err(|e| ctx.fail(e))?;
        ui::render_status(&users);

        // Workout counts are a bonus; a failure here leaves them at zero
        if let Err(error) = ui::loading("Loading workouts…", workouts.fetch_all(&WorkoutQuery::default())).await {
            tracing::warn!("Could not load workouts for trainer counts: {}", error);
        }

        let trainers: Vec<_> = users
            .items()
            .iter()
            .filter(|u| query.matches(u))
            .cloned()
            .collect();
        let roster = stats::trainers(&trainers, workouts.items());

        ui::heading("Trainers");
        if roster.is_empty() {
            ui::empty("trainers");
            return Ok(());
        }

        println!(
            "{:<26} {:<22} {:<28} {}",
            "ID".bold(),
            "NAME".bold(),
            "EMAIL".bold(),
            "WORKOUTS".bold()
        );
        for trainer in &roster {
            println!(
                "{:<26} {:<22} {:<28} {}",
                ui::clip(&trainer.id, 26),
                ui::clip(&trainer.name, 22),
                ui::clip(&trainer.email, 28),
                trainer.workouts_created
            );
        }
        println!();
        println!("{} trainer(s)", roster.len());
        Ok(())
    }
}
