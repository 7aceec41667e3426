// Sample data served while a store runs offline

use chrono::{Duration, Utc};

use crate::models::{
    AccountStatus, Difficulty, Exercise, Group, MemberInfo, Role, User, Workout, WorkoutType,
};

fn user(id: &str, name: &str, email: &str, role: Role, status: AccountStatus) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        account_status: Some(status),
        profile_image_url: None,
        favorite_sports: None,
        level: None,
        availability: None,
        preferences: None,
        contact_info: None,
        location: None,
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}

pub fn users() -> Vec<User> {
    vec![
        user("1", "John Doe", "john@example.com", Role::Admin, AccountStatus::Active),
        user("2", "Jane Smith", "jane@example.com", Role::Trainer, AccountStatus::Active),
        user("3", "Bob Johnson", "bob@example.com", Role::User, AccountStatus::Inactive),
    ]
}

#[allow(clippy::too_many_arguments)]
fn group(
    id: &str,
    name: &str,
    description: &str,
    sport: &str,
    activity: &str,
    members: Vec<MemberInfo>,
    organizer: MemberInfo,
    days_ago: i64,
) -> Group {
    Group {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        members,
        organizer,
        sport: Some(sport.to_string()),
        activity: Some(activity.to_string()),
        location: None,
        messages: None,
        created_at: Some(Utc::now() - Duration::days(days_ago)),
        updated_at: None,
    }
}

pub fn groups() -> Vec<Group> {
    let john = MemberInfo::new("1", "John Doe");
    let jane = MemberInfo::new("2", "Jane Smith");
    let alice = MemberInfo::new("3", "Alice Johnson");
    let bob = MemberInfo::new("4", "Bob Williams");
    let sarah = MemberInfo::new("5", "Sarah Miller");

    vec![
        group(
            "1",
            "Morning HIIT",
            "High-intensity interval training every morning",
            "fitness",
            "hiit",
            vec![john.clone(), jane.clone()],
            john.clone(),
            60,
        ),
        group(
            "2",
            "Yoga Enthusiasts",
            "A group for yoga lovers of all levels",
            "yoga",
            "stretching",
            vec![john.clone(), alice.clone()],
            alice,
            45,
        ),
        group(
            "3",
            "Weekend Warriors",
            "For those who train hard on weekends",
            "crossfit",
            "strength",
            vec![jane, bob.clone()],
            bob,
            20,
        ),
        group(
            "4",
            "Running Club",
            "Weekly running sessions for all levels",
            "running",
            "cardio",
            vec![john, sarah.clone()],
            sarah,
            30,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn workout(
    id: &str,
    title: &str,
    description: &str,
    workout_type: WorkoutType,
    difficulty: Difficulty,
    duration: u32,
    exercises: Vec<Exercise>,
    creator: &str,
) -> Workout {
    let created = Utc::now() - Duration::days(7);
    Workout {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        exercises,
        workout_type,
        difficulty: Some(difficulty),
        duration: Some(duration),
        tags: None,
        muscle_groups: None,
        creator: creator.to_string(),
        created_at: Some(created),
        updated_at: Some(created),
    }
}

pub fn workouts() -> Vec<Workout> {
    vec![
        workout(
            "1",
            "Full Body Strength",
            "Compound lifts for the whole body",
            WorkoutType::Strength,
            Difficulty::Intermediate,
            60,
            vec![
                Exercise::sets_reps("Squat", 4, 8),
                Exercise::sets_reps("Bench Press", 4, 8),
                Exercise::sets_reps("Deadlift", 3, 5),
            ],
            "2",
        ),
        workout(
            "2",
            "Tabata Blast",
            "Twenty seconds on, ten seconds off",
            WorkoutType::Hiit,
            Difficulty::Advanced,
            25,
            vec![
                Exercise {
                    duration: Some(20),
                    rest_time: Some(10),
                    ..Exercise::new("Burpees")
                },
                Exercise {
                    duration: Some(20),
                    rest_time: Some(10),
                    ..Exercise::new("Mountain Climbers")
                },
            ],
            "2",
        ),
        workout(
            "3",
            "Easy Morning Run",
            "Conversational pace",
            WorkoutType::Cardio,
            Difficulty::Beginner,
            30,
            vec![Exercise {
                distance: Some(5.0),
                ..Exercise::new("Run")
            }],
            "1",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entity;
    use std::collections::HashSet;

    #[test]
    fn test_datasets_have_unique_ids() {
        let ids: HashSet<_> = groups().iter().map(|g| g.id().to_string()).collect();
        assert_eq!(ids.len(), 4);
        let ids: HashSet<_> = users().iter().map(|u| u.id().to_string()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_every_group_organizer_is_a_member() {
        for group in groups() {
            assert!(group.members.contains(&group.organizer), "{}", group.name);
        }
    }
}
