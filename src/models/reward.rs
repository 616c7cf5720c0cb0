use crate::entities::reward_entity as rewards;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RewardResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub points_cost: i64,
    pub category: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<rewards::Model> for RewardResponse {
    fn from(r: rewards::Model) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            points_cost: r.points_cost,
            category: r.category,
            is_active: r.is_active,
            created_at: r.created_at,
        }
    }
}

/// Outcome of the catalog seed operation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub enum SeedOutcome {
    AlreadySeeded,
    Seeded { count: usize },
}
