use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use fitness_admin::models::{Group, GroupDraft, GroupPatch, GroupQuery, MemberInfo};
use fitness_admin::store::GroupStore;

use super::Context;
use crate::ui;

#[derive(Subcommand)]
pub enum GroupsCommand {
    /// List groups
    List {
        /// Search by name, sport or activity
        #[arg(short, long)]
        search: Option<String>,

        /// Only groups this user belongs to
        #[arg(long, value_name = "USER_ID")]
        member: Option<String>,

        #[arg(long)]
        sport: Option<String>,

        #[arg(long)]
        activity: Option<String>,
    },

    /// Show group details and members
    Show {
        /// Group ID
        id: String,
    },

    /// Create a group
    Create {
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        sport: Option<String>,

        #[arg(long)]
        activity: Option<String>,
    },

    /// Edit group fields
    Update {
        /// Group ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        sport: Option<String>,

        #[arg(long)]
        activity: Option<String>,
    },

    /// Join a group by name
    Join { name: String },

    /// Leave a group
    Leave {
        /// Group ID
        id: String,
    },

    /// List the members of a group
    Members {
        /// Group ID
        id: String,
    },

    /// Remove a member from a group
    RemoveMember {
        /// Group ID
        group_id: String,

        /// User ID
        user_id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a group
    Delete {
        /// Group ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl GroupsCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let mut store = GroupStore::new(ctx.api.clone());

        match self {
            GroupsCommand::List {
                search,
                member,
                sport,
                activity,
            } => {
                let query = GroupQuery { sport, activity };
                load(&mut store, ctx, &query).await?;

                if let Some(term) = search {
                    ui::loading("Searching groups…", store.search(&term))
                        .await
                        .map_err(|e| ctx.fail(e))?;
                } else if let Some(user_id) = member {
                    ui::loading("Loading memberships…", store.fetch_member_of(&user_id))
                        .await
                        .map_err(|e| ctx.fail(e))?;
                }

                print_groups(store.items());
                Ok(())
            }
            GroupsCommand::Show { id } => {
                load(&mut store, ctx, &GroupQuery::default()).await?;
                let group = ui::loading("Loading group…", store.fetch_by_id(&id))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                print_group(&group);
                Ok(())
            }
            GroupsCommand::Create {
                name,
                description,
                sport,
                activity,
            } => {
                load(&mut store, ctx, &GroupQuery::default()).await?;
                let draft = GroupDraft {
                    description,
                    sport,
                    activity,
                    ..GroupDraft::new(name)
                };
                let group = ui::loading("Creating group…", store.create(draft))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                ui::success(format!("Created {} ({})", group.name, group.id));
                Ok(())
            }
            GroupsCommand::Update {
                id,
                name,
                description,
                sport,
                activity,
            } => {
                load(&mut store, ctx, &GroupQuery::default()).await?;
                let patch = GroupPatch {
                    name,
                    description,
                    sport,
                    activity,
                    location: None,
                };
                let group = ui::loading("Saving group…", store.update(&id, patch))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                ui::success(format!("Updated {}", group.name));
                Ok(())
            }
            GroupsCommand::Join { name } => {
                load(&mut store, ctx, &GroupQuery::default()).await?;
                let group = ui::loading("Joining group…", store.join(&name))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                ui::success(format!("Joined {} ({} members)", group.name, group.member_count()));
                Ok(())
            }
            GroupsCommand::Leave { id } => {
                load(&mut store, ctx, &GroupQuery::default()).await?;
                let group = ui::loading("Leaving group…", store.leave(&id))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                ui::success(format!("Left {}", group.name));
                Ok(())
            }
            GroupsCommand::Members { id } => {
                load(&mut store, ctx, &GroupQuery::default()).await?;
                let members = ui::loading("Loading members…", store.members(&id))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                let organizer = store.state().lookup(&id).map(|g| g.organizer.user_id.clone());
                print_members(&members, organizer.as_deref());
                Ok(())
            }
            GroupsCommand::RemoveMember {
                group_id,
                user_id,
                force,
            } => {
                load(&mut store, ctx, &GroupQuery::default()).await?;
                if !force
                    && !Confirm::new()
                        .with_prompt(format!("Remove user {} from group {}?", user_id, group_id))
                        .default(false)
                        .interact()?
                {
                    println!("Cancelled.");
                    return Ok(());
                }

                ui::loading("Removing member…", store.remove_member(&group_id, &user_id))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                ui::success(format!("Removed {} from {}", user_id, group_id));
                Ok(())
            }
            GroupsCommand::Delete { id, force } => {
                load(&mut store, ctx, &GroupQuery::default()).await?;

                let label = store
                    .state()
                    .find(&id)
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| id.clone());
                if !force
                    && !Confirm::new()
                        .with_prompt(format!("Delete group {}?", label))
                        .default(false)
                        .interact()?
                {
                    println!("Cancelled.");
                    return Ok(());
                }

                ui::loading("Deleting group…", store.delete(&id))
                    .await
                    .map_err(|e| ctx.fail(e))?;
                ui::success(format!("Deleted {}", label));
                Ok(())
            }
        }
    }
}

async fn load(store: &mut GroupStore, ctx: &Context, query: &GroupQuery) -> Result<()> {
    ui::loading("Loading groups…", store.fetch_all(query))
        .await
        .map_err(|e| ctx.fail(e))?;
    ui::render_status(&*store);
    Ok(())
}

fn print_groups(groups: &[Group]) {
    ui::heading("Groups");
    if groups.is_empty() {
        ui::empty("groups");
        return;
    }

    println!(
        "{:<26} {:<24} {:<12} {:<8} {}",
        "ID".bold(),
        "NAME".bold(),
        "SPORT".bold(),
        "MEMBERS".bold(),
        "ORGANIZER".bold()
    );
    for group in groups {
        println!(
            "{:<26} {:<24} {:<12} {:<8} {}",
            ui::clip(&group.id, 26),
            ui::clip(&group.name, 24),
            group.sport.as_deref().unwrap_or("-"),
            group.member_count(),
            group.organizer.name
        );
    }
    println!();
    println!("{} group(s)", groups.len());
}

fn print_group(group: &Group) {
    ui::heading(&group.name);
    println!("ID:          {}", group.id);
    if let Some(ref description) = group.description {
        if !description.is_empty() {
            println!("Description: {}", description);
        }
    }
    println!("Sport:       {}", group.sport.as_deref().unwrap_or("-"));
    println!("Activity:    {}", group.activity.as_deref().unwrap_or("-"));
    if let Some(ref location) = group.location {
        println!("Location:    {}", location);
    }
    if let Some(created) = group.created_at {
        println!("Created:     {}", created.format("%Y-%m-%d"));
    }
    println!();
    print_members(&group.members, Some(group.organizer.user_id.as_str()));
}

fn print_members(members: &[MemberInfo], organizer: Option<&str>) {
    println!("{}", format!("Members ({})", members.len()).bold());
    for member in members {
        let tag = if Some(member.user_id.as_str()) == organizer {
            " (organizer)".cyan().to_string()
        } else {
            String::new()
        };
        println!("  {:<26} {}{}", member.user_id, member.name, tag);
    }
}
