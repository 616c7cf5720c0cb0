use crate::entities::transaction_entity as transactions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Earn,
    Redeem,
    Adjust,
}

impl TransactionType {
    pub fn from_str(s: &str) -> Self {
        match s {
            "earn" => TransactionType::Earn,
            "redeem" => TransactionType::Redeem,
            _ => TransactionType::Adjust,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Earn => write!(f, "earn"),
            TransactionType::Redeem => write!(f, "redeem"),
            TransactionType::Adjust => write!(f, "adjust"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardPointsRequest {
    pub membership_id: String,
    pub points: i64,
    pub description: String,
    pub reference_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedeemPointsRequest {
    pub membership_id: String,
    pub points: i64,
    pub description: String,
    pub reference_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointsBalanceResponse {
    pub new_points: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: String,
    pub membership_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub points: i64,
    pub description: String,
    pub reference_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(t: transactions::Model) -> Self {
        Self {
            id: t.id,
            membership_id: t.membership_id,
            transaction_type: TransactionType::from_str(&t.transaction_type),
            points: t.points,
            description: t.description,
            reference_id: t.reference_id,
            created_at: t.created_at,
        }
    }
}
