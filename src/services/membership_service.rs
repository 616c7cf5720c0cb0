use crate::entities::{membership_entity as memberships, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::generate_card_number;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct MembershipService {
    pool: DatabaseConnection,
}

impl MembershipService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Creates a membership card for the user: fresh card number, zero
    /// points, bronze tier, active status. No duplicate check is performed;
    /// callers that register twice end up with two cards.
    pub async fn create_membership(
        &self,
        user_id: &str,
        request: CreateMembershipRequest,
    ) -> AppResult<MembershipResponse> {
        let now = Utc::now();

        let membership = memberships::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            card_number: Set(generate_card_number()),
            phone_number: Set(request.phone_number),
            points: Set(0),
            tier: Set(MembershipTier::Bronze.to_string()),
            status: Set(MembershipStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Created membership {} (card {}) for user {}",
            membership.id,
            membership.card_number,
            user_id
        );

        Ok(MembershipResponse::from(membership))
    }

    pub async fn get_membership(&self, user_id: &str) -> AppResult<MembershipResponse> {
        let membership = memberships::Entity::find()
            .filter(memberships::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))?;

        Ok(MembershipResponse::from(membership))
    }

    /// Admin listing: every membership joined with its owner, oldest first.
    pub async fn list_members(&self) -> AppResult<Vec<MemberResponse>> {
        let rows = memberships::Entity::find()
            .find_also_related(users::Entity)
            .order_by_asc(memberships::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        let members = rows
            .into_iter()
            .filter_map(|(membership, user)| {
                let user = user?;
                Some(MemberResponse {
                    id: membership.id,
                    user_id: membership.user_id,
                    card_number: membership.card_number,
                    phone_number: membership.phone_number,
                    points: membership.points,
                    tier: MembershipTier::from_str(&membership.tier),
                    status: MembershipStatus::from_str(&membership.status),
                    created_at: membership.created_at,
                    user: MemberUser {
                        name: user.name,
                        email: user.email,
                    },
                })
            })
            .collect();

        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    async fn setup() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_string());
        options.max_connections(1);
        let pool = Database::connect(options).await.unwrap();
        Migrator::up(&pool, None).await.unwrap();
        pool
    }

    async fn insert_user(pool: &DatabaseConnection, email: &str) -> String {
        let now = Utc::now();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set("Test User".to_string()),
            email: Set(email.to_string()),
            email_verified: Set(false),
            password_hash: Set("hash".to_string()),
            role: Set("member".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(pool)
        .await
        .unwrap();
        user.id
    }

    #[tokio::test]
    async fn test_create_membership_defaults() {
        let pool = setup().await;
        let user_id = insert_user(&pool, "a@example.com").await;
        let svc = MembershipService::new(pool);

        let membership = svc
            .create_membership(
                &user_id,
                CreateMembershipRequest {
                    phone_number: Some("+66812345678".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(membership.points, 0);
        assert_eq!(membership.tier, MembershipTier::Bronze);
        assert_eq!(membership.status, MembershipStatus::Active);
        assert!(membership.card_number.starts_with("FEEL"));
        assert_eq!(membership.phone_number.as_deref(), Some("+66812345678"));
    }

    #[tokio::test]
    async fn test_get_membership_not_found() {
        let pool = setup().await;
        let svc = MembershipService::new(pool);

        let err = svc.get_membership("nobody").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_members_includes_owner() {
        let pool = setup().await;
        let first = insert_user(&pool, "first@example.com").await;
        let second = insert_user(&pool, "second@example.com").await;
        let svc = MembershipService::new(pool);

        svc.create_membership(&first, CreateMembershipRequest { phone_number: None })
            .await
            .unwrap();
        svc.create_membership(&second, CreateMembershipRequest { phone_number: None })
            .await
            .unwrap();

        let members = svc.list_members().await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].user.email, "first@example.com");
        assert_eq!(members[1].user.email, "second@example.com");
    }
}
