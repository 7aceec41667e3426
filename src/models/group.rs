use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::validate_name;
use super::{overlay, overlay_opt, Entity};
use crate::error::StoreError;

const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=40&width=40";

/// Group member; the organizer uses the same shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    pub user_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

impl MemberInfo {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            profile_image_url: Some(PLACEHOLDER_AVATAR.to_string()),
        }
    }

    /// Stand-in for the signed-in operator while the store runs on local data
    pub fn placeholder() -> Self {
        Self::new("1", "Current User")
    }
}

/// Structured meeting point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupLocation {
    Point(GeoLocation),
    Text(String),
}

impl std::fmt::Display for GroupLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupLocation::Text(text) => write!(f, "{}", text),
            GroupLocation::Point(point) => match (&point.city, &point.address) {
                (Some(city), Some(address)) => write!(f, "{}, {}", address, city),
                (Some(city), None) => write!(f, "{}", city),
                (None, Some(address)) => write!(f, "{}", address),
                (None, None) => write!(f, "{:?}", point.coordinates),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberInfo>,
    pub organizer: MemberInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GroupLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Group {
    pub fn is_organizer(&self, user_id: &str) -> bool {
        self.organizer.user_id == user_id
    }

    /// The organizer counts as a member even when the list omits them
    pub fn is_member(&self, user_id: &str) -> bool {
        self.is_organizer(user_id) || self.members.iter().any(|m| m.user_id == user_id)
    }

    /// Number of distinct members, organizer included
    pub fn member_count(&self) -> usize {
        let listed = self.members.len();
        if self.members.iter().any(|m| m.user_id == self.organizer.user_id) {
            listed
        } else {
            listed + 1
        }
    }

    /// Case-insensitive match on name, sport or activity
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        let hit = |value: &Option<String>| {
            value
                .as_deref()
                .map(|v| v.to_lowercase().contains(&term))
                .unwrap_or(false)
        };
        self.name.to_lowercase().contains(&term) || hit(&self.sport) || hit(&self.activity)
    }
}

/// Create payload for `POST /groups`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GroupLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<MemberInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<MemberInfo>,
}

impl GroupDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Partial update for `PATCH /groups/:id`; membership changes go through join/leave
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GroupLocation>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

impl Entity for Group {
    type Draft = GroupDraft;
    type Patch = GroupPatch;
    type Query = GroupQuery;

    const SINGULAR: &'static str = "group";
    const PLURAL: &'static str = "groups";
    const PATH: &'static str = "groups";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: &GroupPatch) {
        overlay(&mut self.name, &patch.name);
        overlay_opt(&mut self.description, &patch.description);
        overlay_opt(&mut self.sport, &patch.sport);
        overlay_opt(&mut self.activity, &patch.activity);
        overlay_opt(&mut self.location, &patch.location);
    }

    fn validate_draft(draft: &GroupDraft) -> Result<(), StoreError> {
        validate_name(&draft.name, 1, "Group name")
    }

    fn synthesize(draft: GroupDraft, id: String, now: DateTime<Utc>, owner: &MemberInfo) -> Self {
        let organizer = draft.organizer.unwrap_or_else(|| owner.clone());
        let members = draft.members.unwrap_or_else(|| vec![organizer.clone()]);

        Self {
            id,
            name: draft.name,
            description: Some(draft.description.unwrap_or_default()),
            members,
            organizer,
            sport: draft.sport,
            activity: draft.activity,
            location: draft.location,
            messages: None,
            created_at: Some(now),
            updated_at: None,
        }
    }
}
