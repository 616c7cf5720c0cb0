use crate::entities::membership_entity as memberships;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl MembershipTier {
    pub fn from_str(s: &str) -> Self {
        match s {
            "silver" => MembershipTier::Silver,
            "gold" => MembershipTier::Gold,
            "platinum" => MembershipTier::Platinum,
            _ => MembershipTier::Bronze,
        }
    }
}

impl std::fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipTier::Bronze => write!(f, "bronze"),
            MembershipTier::Silver => write!(f, "silver"),
            MembershipTier::Gold => write!(f, "gold"),
            MembershipTier::Platinum => write!(f, "platinum"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Inactive,
    Suspended,
}

impl MembershipStatus {
    pub fn from_str(s: &str) -> Self {
        match s {
            "inactive" => MembershipStatus::Inactive,
            "suspended" => MembershipStatus::Suspended,
            _ => MembershipStatus::Active,
        }
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipStatus::Active => write!(f, "active"),
            MembershipStatus::Inactive => write!(f, "inactive"),
            MembershipStatus::Suspended => write!(f, "suspended"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMembershipRequest {
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub id: String,
    pub user_id: String,
    pub card_number: String,
    pub phone_number: Option<String>,
    pub points: i64,
    pub tier: MembershipTier,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<memberships::Model> for MembershipResponse {
    fn from(m: memberships::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            card_number: m.card_number,
            phone_number: m.phone_number,
            points: m.points,
            tier: MembershipTier::from_str(&m.tier),
            status: MembershipStatus::from_str(&m.status),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Admin member listing row: the membership joined with its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub user_id: String,
    pub card_number: String,
    pub phone_number: Option<String>,
    pub points: i64,
    pub tier: MembershipTier,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
    pub user: MemberUser,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberUser {
    pub name: String,
    pub email: String,
}
