use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::collections::BTreeMap;

use fitness_admin::models::{GroupQuery, UserQuery, WorkoutQuery};
use fitness_admin::stats::{self, DashboardSummary};
use fitness_admin::store::{GroupStore, UserStore, WorkoutStore};

use super::Context;
use crate::ui;

#[derive(Args)]
pub struct StatsCommand {
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

impl StatsCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let mut users = UserStore::new(ctx.api.clone());
        let mut groups = GroupStore::new(ctx.api.clone());
        let mut workouts = WorkoutStore::with_offline_fallback(ctx.api.clone());

        let user_query = UserQuery::default();
        let group_query = GroupQuery::default();
        let workout_query = WorkoutQuery::default();
        ui::loading("Loading dashboard…", async {
            tokio::try_join!(
                users.fetch_all(&user_query),
                groups.fetch_all(&group_query),
                workouts.fetch_all(&workout_query),
            )
        })
        .await
        .map_err(|e| ctx.fail(e))?;

        let summary = stats::summarize(users.items(), groups.items(), workouts.items());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        if users.is_offline() || groups.is_offline() || workouts.is_offline() {
            println!("{}", "⚠ Some figures come from sample data (offline mode)".yellow().bold());
            println!();
        }
        print_summary(&summary);
        Ok(())
    }
}

fn print_summary(summary: &DashboardSummary) {
    ui::heading("Dashboard");

    println!("{}", "Users".bold());
    println!("  Total:   {}", summary.total_users);
    println!("  Active:  {}", summary.active_users);
    print_breakdown(&summary.users_by_role);
    print_breakdown(&summary.users_by_status);
    println!();

    println!("{}", "Groups".bold());
    println!("  Total:         {}", summary.total_groups);
    println!("  Members:       {}", summary.total_group_members);
    println!("  Average size:  {:.1}", summary.average_group_size);
    if let Some(ref largest) = summary.largest_group {
        println!("  Largest:       {}", largest);
    }
    println!();

    println!("{}", "Workouts".bold());
    println!("  Total:   {}", summary.total_workouts);
    print_breakdown(&summary.workouts_by_type);
    print_breakdown(&summary.workouts_by_difficulty);
}

fn print_breakdown(counts: &BTreeMap<String, usize>) {
    if counts.is_empty() {
        return;
    }
    let line: Vec<String> = counts
        .iter()
        .map(|(label, count)| format!("{} {}", label, count))
        .collect();
    println!("  {}", line.join(" · ").dimmed());
}
