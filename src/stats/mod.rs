// Dashboard summaries computed from store collections

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{AccountStatus, Group, Role, User, Workout};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_users: usize,
    pub users_by_role: BTreeMap<String, usize>,
    pub users_by_status: BTreeMap<String, usize>,
    pub active_users: usize,
    pub total_groups: usize,
    pub total_group_members: usize,
    pub average_group_size: f64,
    pub largest_group: Option<String>,
    pub total_workouts: usize,
    pub workouts_by_type: BTreeMap<String, usize>,
    pub workouts_by_difficulty: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainerSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub account_status: Option<AccountStatus>,
    pub workouts_created: usize,
}

fn tally<I: IntoIterator<Item = String>>(keys: I) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

pub fn summarize(users: &[User], groups: &[Group], workouts: &[Workout]) -> DashboardSummary {
    let total_group_members: usize = groups.iter().map(Group::member_count).sum();
    let average_group_size = if groups.is_empty() {
        0.0
    } else {
        total_group_members as f64 / groups.len() as f64
    };

    DashboardSummary {
        total_users: users.len(),
        users_by_role: tally(users.iter().map(|u| u.role.to_string())),
        users_by_status: tally(
            users
                .iter()
                .map(|u| u.account_status.map(|s| s.to_string()).unwrap_or_else(|| "Unknown".to_string())),
        ),
        active_users: users
            .iter()
            .filter(|u| u.account_status == Some(AccountStatus::Active))
            .count(),
        total_groups: groups.len(),
        total_group_members,
        average_group_size,
        largest_group: groups
            .iter()
            .max_by_key(|g| g.member_count())
            .map(|g| g.name.clone()),
        total_workouts: workouts.len(),
        workouts_by_type: tally(workouts.iter().map(|w| w.workout_type.to_string())),
        workouts_by_difficulty: tally(workouts.iter().map(|w| {
            w.difficulty
                .map(|d| d.to_string())
                .unwrap_or_else(|| "Unrated".to_string())
        })),
    }
}

/// Users with the trainer role, most prolific first
pub fn trainers(users: &[User], workouts: &[Workout]) -> Vec<TrainerSummary> {
    let mut roster: Vec<TrainerSummary> = users
        .iter()
        .filter(|u| u.role == Role::Trainer)
        .map(|u| TrainerSummary {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            account_status: u.account_status,
            workouts_created: workouts.iter().filter(|w| w.creator == u.id).count(),
        })
        .collect();

    roster.sort_by(|a, b| {
        b.workouts_created
            .cmp(&a.workouts_created)
            .then_with(|| a.name.cmp(&b.name))
    });
    roster
}
