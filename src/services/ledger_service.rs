use crate::entities::{membership_entity as memberships, transaction_entity as transactions};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

const TRANSACTION_PAGE_SIZE: u64 = 50;

/// The balance + audit-log pair for a membership. Every mutation commits
/// the balance write and the transaction row together or not at all.
#[derive(Clone)]
pub struct LedgerService {
    pool: DatabaseConnection,
}

impl LedgerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    fn validate(request_points: i64, description: &str, membership_id: &str) -> AppResult<()> {
        if membership_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "membershipId is required".to_string(),
            ));
        }
        if request_points <= 0 {
            return Err(AppError::ValidationError(
                "points must be a positive amount".to_string(),
            ));
        }
        if description.trim().is_empty() {
            return Err(AppError::ValidationError(
                "description is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Credits points to a membership and appends an `earn` transaction.
    /// Returns the new balance.
    pub async fn award_points(&self, request: AwardPointsRequest) -> AppResult<i64> {
        Self::validate(request.points, &request.description, &request.membership_id)?;

        let txn = self.pool.begin().await?;

        let result = memberships::Entity::update_many()
            .col_expr(
                memberships::Column::Points,
                Expr::col(memberships::Column::Points).add(request.points),
            )
            .col_expr(memberships::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(memberships::Column::Id.eq(request.membership_id.clone()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Membership not found".to_string()));
        }

        let new_points = Self::append_transaction(
            &txn,
            &request.membership_id,
            TransactionType::Earn,
            request.points,
            request.description,
            request.reference_id,
        )
        .await?;
        txn.commit().await?;

        log::info!(
            "Awarded {} points to membership {}",
            request.points,
            request.membership_id
        );

        Ok(new_points)
    }

    /// Debits points from a membership and appends a `redeem` transaction.
    ///
    /// The sufficiency check and the decrement are a single conditional
    /// UPDATE (`... WHERE id = ? AND points >= ?`), so concurrent
    /// redemptions cannot both pass against a stale balance; the losing
    /// request sees zero affected rows and the whole transaction rolls
    /// back without touching the audit log.
    pub async fn redeem_points(&self, request: RedeemPointsRequest) -> AppResult<i64> {
        Self::validate(request.points, &request.description, &request.membership_id)?;

        let txn = self.pool.begin().await?;

        memberships::Entity::find_by_id(request.membership_id.clone())
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))?;

        let result = memberships::Entity::update_many()
            .col_expr(
                memberships::Column::Points,
                Expr::col(memberships::Column::Points).sub(request.points),
            )
            .col_expr(memberships::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(memberships::Column::Id.eq(request.membership_id.clone()))
            .filter(memberships::Column::Points.gte(request.points))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InsufficientPoints);
        }

        let new_points = Self::append_transaction(
            &txn,
            &request.membership_id,
            TransactionType::Redeem,
            request.points,
            request.description,
            request.reference_id,
        )
        .await?;
        txn.commit().await?;

        log::info!(
            "Redeemed {} points from membership {}",
            request.points,
            request.membership_id
        );

        Ok(new_points)
    }

    /// Inserts the audit row and reads the balance back inside the same
    /// database transaction.
    async fn append_transaction<C: ConnectionTrait>(
        txn: &C,
        membership_id: &str,
        transaction_type: TransactionType,
        points: i64,
        description: String,
        reference_id: Option<String>,
    ) -> AppResult<i64> {
        transactions::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            membership_id: Set(membership_id.to_string()),
            transaction_type: Set(transaction_type.to_string()),
            points: Set(points),
            description: Set(description),
            reference_id: Set(reference_id),
            created_at: Set(Utc::now()),
        }
        .insert(txn)
        .await?;

        let membership = memberships::Entity::find_by_id(membership_id.to_string())
            .one(txn)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Membership disappeared mid-transaction".to_string())
            })?;

        Ok(membership.points)
    }

    /// The caller's 50 most recent transactions, newest first.
    pub async fn list_transactions(&self, user_id: &str) -> AppResult<Vec<TransactionResponse>> {
        let membership = memberships::Entity::find()
            .filter(memberships::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))?;

        let rows = transactions::Entity::find()
            .filter(transactions::Column::MembershipId.eq(membership.id))
            .order_by_desc(transactions::Column::CreatedAt)
            .limit(TRANSACTION_PAGE_SIZE)
            .all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(TransactionResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user_entity as users;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    async fn setup() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_string());
        options.max_connections(1);
        let pool = Database::connect(options).await.unwrap();
        Migrator::up(&pool, None).await.unwrap();
        pool
    }

    async fn insert_member(pool: &DatabaseConnection, points: i64) -> (String, String) {
        let now = Utc::now();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set("Test User".to_string()),
            email: Set(format!("{}@example.com", Uuid::new_v4())),
            email_verified: Set(false),
            password_hash: Set("hash".to_string()),
            role: Set("member".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(pool)
        .await
        .unwrap();

        let membership = memberships::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user.id.clone()),
            card_number: Set(format!("FEEL{}", &Uuid::new_v4().to_string()[..8])),
            phone_number: Set(None),
            points: Set(points),
            tier: Set("bronze".to_string()),
            status: Set("active".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(pool)
        .await
        .unwrap();

        (user.id, membership.id)
    }

    fn award(membership_id: &str, points: i64, description: &str) -> AwardPointsRequest {
        AwardPointsRequest {
            membership_id: membership_id.to_string(),
            points,
            description: description.to_string(),
            reference_id: Some(format!("ref-{}", Uuid::new_v4())),
        }
    }

    fn redeem(membership_id: &str, points: i64, description: &str) -> RedeemPointsRequest {
        RedeemPointsRequest {
            membership_id: membership_id.to_string(),
            points,
            description: description.to_string(),
            reference_id: None,
        }
    }

    async fn transaction_count(pool: &DatabaseConnection, membership_id: &str) -> usize {
        transactions::Entity::find()
            .filter(transactions::Column::MembershipId.eq(membership_id))
            .all(pool)
            .await
            .unwrap()
            .len()
    }

    #[tokio::test]
    async fn test_award_increases_balance_and_logs() {
        let pool = setup().await;
        let (_, membership_id) = insert_member(&pool, 0).await;
        let svc = LedgerService::new(pool.clone());

        let balance = svc
            .award_points(award(&membership_id, 500, "Purchase reward"))
            .await
            .unwrap();

        assert_eq!(balance, 500);

        let rows = transactions::Entity::find()
            .filter(transactions::Column::MembershipId.eq(membership_id.clone()))
            .all(&pool)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].transaction_type, "earn");
        assert_eq!(rows[0].points, 500);
    }

    #[tokio::test]
    async fn test_award_unknown_membership() {
        let pool = setup().await;
        let svc = LedgerService::new(pool);

        let err = svc
            .award_points(award("missing", 100, "Purchase reward"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_award_rejects_bad_fields() {
        let pool = setup().await;
        let (_, membership_id) = insert_member(&pool, 0).await;
        let svc = LedgerService::new(pool);

        assert!(matches!(
            svc.award_points(award(&membership_id, 0, "x")).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            svc.award_points(award(&membership_id, -5, "x")).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            svc.award_points(award(&membership_id, 10, "  ")).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            svc.award_points(award("", 10, "x")).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_redeem_insufficient_leaves_ledger_untouched() {
        let pool = setup().await;
        let (_, membership_id) = insert_member(&pool, 100).await;
        let svc = LedgerService::new(pool.clone());

        let err = svc
            .redeem_points(redeem(&membership_id, 300, "Redeemed: Free Set Menu"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientPoints));

        let membership = memberships::Entity::find_by_id(membership_id.clone())
            .one(&pool)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(membership.points, 100);
        assert_eq!(transaction_count(&pool, &membership_id).await, 0);
    }

    #[tokio::test]
    async fn test_award_redeem_scenario() {
        let pool = setup().await;
        let (user_id, membership_id) = insert_member(&pool, 0).await;
        let svc = LedgerService::new(pool.clone());

        let balance = svc
            .award_points(award(&membership_id, 500, "Purchase reward"))
            .await
            .unwrap();
        assert_eq!(balance, 500);
        assert_eq!(transaction_count(&pool, &membership_id).await, 1);

        let balance = svc
            .redeem_points(redeem(&membership_id, 300, "Redeemed: Free Set Menu"))
            .await
            .unwrap();
        assert_eq!(balance, 200);
        assert_eq!(transaction_count(&pool, &membership_id).await, 2);

        let err = svc
            .redeem_points(redeem(&membership_id, 300, "Redeemed: Free Set Menu"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientPoints));

        let membership = memberships::Entity::find_by_id(membership_id.clone())
            .one(&pool)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(membership.points, 200);
        assert_eq!(transaction_count(&pool, &membership_id).await, 2);

        // audit log reconciles with the balance
        let listed = svc.list_transactions(&user_id).await.unwrap();
        let reconciled: i64 = listed
            .iter()
            .map(|t| match t.transaction_type {
                TransactionType::Earn | TransactionType::Adjust => t.points,
                TransactionType::Redeem => -t.points,
            })
            .sum();
        assert_eq!(reconciled, 200);
    }

    #[tokio::test]
    async fn test_concurrent_redemptions_cannot_both_succeed() {
        let pool = setup().await;
        let (_, membership_id) = insert_member(&pool, 500).await;
        let svc = LedgerService::new(pool.clone());

        let first = svc.redeem_points(redeem(&membership_id, 300, "Redeemed: Free Set Menu"));
        let second = svc.redeem_points(redeem(&membership_id, 300, "Redeemed: Free Set Menu"));
        let (first, second) = tokio::join!(first, second);

        assert_eq!(
            first.is_ok() as u8 + second.is_ok() as u8,
            1,
            "exactly one of two concurrent 300-point redemptions may succeed"
        );

        let membership = memberships::Entity::find_by_id(membership_id.clone())
            .one(&pool)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(membership.points, 200);
        assert_eq!(transaction_count(&pool, &membership_id).await, 1);
    }

    #[tokio::test]
    async fn test_list_transactions_caps_at_fifty_newest_first() {
        let pool = setup().await;
        let (user_id, membership_id) = insert_member(&pool, 0).await;
        let svc = LedgerService::new(pool.clone());

        for i in 0..55 {
            transactions::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                membership_id: Set(membership_id.clone()),
                transaction_type: Set("earn".to_string()),
                points: Set(10),
                description: Set(format!("batch {}", i)),
                reference_id: Set(None),
                created_at: Set(Utc::now() + chrono::Duration::milliseconds(i)),
            }
            .insert(&pool)
            .await
            .unwrap();
        }

        let listed = svc.list_transactions(&user_id).await.unwrap();
        assert_eq!(listed.len(), 50);
        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
        assert_eq!(listed[0].description, "batch 54");
    }

    #[tokio::test]
    async fn test_list_transactions_without_membership() {
        let pool = setup().await;
        let svc = LedgerService::new(pool);

        let err = svc.list_transactions("nobody").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
