// Wire models for the fitness platform resources

pub mod group;
pub mod user;
pub mod validation;
pub mod workout;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::error::StoreError;

pub use group::{GeoLocation, Group, GroupDraft, GroupLocation, GroupPatch, GroupQuery, MemberInfo};
pub use user::{
    AccountStatus, Availability, GeoPoint, Level, Role, Sport, User, UserDraft, UserPatch,
    UserQuery,
};
pub use workout::{
    Difficulty, Exercise, SortOrder, Workout, WorkoutDraft, WorkoutPatch, WorkoutQuery,
    WorkoutType,
};

/// A server resource mirrored by an entity store
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Create payload
    type Draft: Serialize + Debug + Send + Sync;
    /// Partial update; absent fields are left untouched
    type Patch: Serialize + Debug + Send + Sync;
    /// List filter sent as a query string
    type Query: Serialize + Debug + Default + Send + Sync;

    const SINGULAR: &'static str;
    const PLURAL: &'static str;
    /// Collection path segment under the API base URL
    const PATH: &'static str;

    fn id(&self) -> &str;

    /// Overlay every field present in `patch`
    fn apply_patch(&mut self, patch: &Self::Patch);

    fn validate_draft(_draft: &Self::Draft) -> Result<(), StoreError> {
        Ok(())
    }

    /// Build an entity locally, without the server assigning identity
    fn synthesize(draft: Self::Draft, id: String, now: DateTime<Utc>, owner: &MemberInfo) -> Self;

    /// "group" -> "Group"
    fn title() -> String {
        let mut chars = Self::SINGULAR.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Overwrite `target` when the patch carries a value
pub(crate) fn overlay<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

/// Same as [`overlay`] for optional fields
pub(crate) fn overlay_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        *target = value.clone();
    }
}
