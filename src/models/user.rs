use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::validation::{validate_email, validate_name, validate_password};
use super::{overlay, overlay_opt, Entity, MemberInfo};
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    User,
    Trainer,
    #[serde(alias = "manager")]
    GroupAdmin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    #[serde(alias = "expert")]
    Professional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Weekdays,
    Weekends,
    Evenings,
    Mornings,
    Flexible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Running,
    Swimming,
    Cycling,
    Yoga,
    Weightlifting,
    Basketball,
    Soccer,
    Tennis,
    Hiking,
    CrossFit,
}

/// GeoJSON-style point: `[longitude, latitude]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "default_point_type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

fn default_point_type() -> String {
    "Point".to_string()
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: default_point_type(),
            coordinates: [longitude, latitude],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_status: Option<AccountStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_sports: Option<Vec<Sport>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create payload for `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_status: Option<AccountStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_sports: Option<Vec<Sport>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: None,
            role,
            account_status: None,
            profile_image_url: None,
            favorite_sports: None,
            level: None,
            availability: None,
            location: None,
        }
    }
}

/// Partial update for `PATCH /users/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_status: Option<AccountStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_sports: Option<Vec<Sport>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl UserPatch {
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }
}

/// Filter criteria for listing users
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_status: Option<AccountStatus>,
}

impl UserQuery {
    /// Client-side equivalent of the server filter
    pub fn matches(&self, user: &User) -> bool {
        if let Some(ref term) = self.search {
            let term = term.to_lowercase();
            if !user.name.to_lowercase().contains(&term) && !user.email.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        if let Some(role) = self.role {
            if user.role != role {
                return false;
            }
        }

        if let Some(status) = self.account_status {
            if user.account_status != Some(status) {
                return false;
            }
        }

        true
    }
}

impl Entity for User {
    type Draft = UserDraft;
    type Patch = UserPatch;
    type Query = UserQuery;

    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";
    const PATH: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: &UserPatch) {
        overlay(&mut self.name, &patch.name);
        overlay(&mut self.email, &patch.email);
        overlay(&mut self.role, &patch.role);
        overlay_opt(&mut self.account_status, &patch.account_status);
        overlay_opt(&mut self.profile_image_url, &patch.profile_image_url);
        overlay_opt(&mut self.favorite_sports, &patch.favorite_sports);
        overlay_opt(&mut self.level, &patch.level);
        overlay_opt(&mut self.availability, &patch.availability);
        overlay_opt(&mut self.preferences, &patch.preferences);
        overlay_opt(&mut self.contact_info, &patch.contact_info);
        overlay_opt(&mut self.location, &patch.location);
    }

    fn validate_draft(draft: &UserDraft) -> Result<(), StoreError> {
        validate_name(&draft.name, 2, "Name")?;
        validate_email(&draft.email)?;
        if let Some(ref password) = draft.password {
            validate_password(password)?;
        }
        Ok(())
    }

    fn synthesize(draft: UserDraft, id: String, now: DateTime<Utc>, _owner: &MemberInfo) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            account_status: Some(draft.account_status.unwrap_or(AccountStatus::Active)),
            profile_image_url: draft.profile_image_url,
            favorite_sports: draft.favorite_sports,
            level: draft.level,
            availability: draft.availability,
            preferences: None,
            contact_info: None,
            location: draft.location,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::User => write!(f, "User"),
            Role::Trainer => write!(f, "Trainer"),
            Role::GroupAdmin => write!(f, "Group Admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "trainer" => Ok(Role::Trainer),
            "groupadmin" | "manager" => Ok(Role::GroupAdmin),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "Active"),
            AccountStatus::Inactive => write!(f, "Inactive"),
            AccountStatus::Suspended => write!(f, "Suspended"),
            AccountStatus::Pending => write!(f, "Pending"),
        }
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AccountStatus::Active),
            "inactive" => Ok(AccountStatus::Inactive),
            "suspended" => Ok(AccountStatus::Suspended),
            "pending" => Ok(AccountStatus::Pending),
            _ => Err(anyhow::anyhow!("Invalid account status: {}", s)),
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Sport::Running => "Running",
            Sport::Swimming => "Swimming",
            Sport::Cycling => "Cycling",
            Sport::Yoga => "Yoga",
            Sport::Weightlifting => "Weightlifting",
            Sport::Basketball => "Basketball",
            Sport::Soccer => "Soccer",
            Sport::Tennis => "Tennis",
            Sport::Hiking => "Hiking",
            Sport::CrossFit => "CrossFit",
        };
        write!(f, "{}", name)
    }
}
