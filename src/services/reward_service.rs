use crate::entities::reward_entity as rewards;
use crate::error::AppResult;
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

/// The fixed default catalog: (name, description, points cost, category).
const DEFAULT_REWARDS: &[(&str, &str, i64, &str)] = &[
    (
        "Free Coffee",
        "Complimentary coffee or tea of your choice",
        100,
        "Beverages",
    ),
    ("Free Appetizer", "Any appetizer from our menu", 250, "Food"),
    ("10% Discount", "10% off your total bill", 300, "Discount"),
    ("Free Dessert", "Any dessert from our menu", 200, "Food"),
    (
        "Free Main Course",
        "Any main course from our menu (up to 500 THB)",
        500,
        "Food",
    ),
    ("20% Discount", "20% off your total bill", 600, "Discount"),
    (
        "Free Set Menu",
        "Complimentary set menu for 2 people",
        1000,
        "Food",
    ),
];

#[derive(Clone)]
pub struct RewardService {
    pool: DatabaseConnection,
}

impl RewardService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Active rewards, cheapest first.
    pub async fn list_rewards(&self) -> AppResult<Vec<RewardResponse>> {
        let rows = rewards::Entity::find()
            .filter(rewards::Column::IsActive.eq(true))
            .order_by_asc(rewards::Column::PointsCost)
            .all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(RewardResponse::from).collect())
    }

    /// Populates the default catalog. Guarded by an existence check rather
    /// than content: any reward row at all means the catalog is considered
    /// seeded.
    pub async fn seed_rewards(&self) -> AppResult<SeedOutcome> {
        let txn = self.pool.begin().await?;

        let existing = rewards::Entity::find().limit(1).all(&txn).await?;
        if !existing.is_empty() {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let now = Utc::now();
        let models = DEFAULT_REWARDS
            .iter()
            .map(|(name, description, points_cost, category)| rewards::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                name: Set(name.to_string()),
                description: Set(Some(description.to_string())),
                points_cost: Set(*points_cost),
                category: Set(category.to_string()),
                is_active: Set(true),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect::<Vec<_>>();

        rewards::Entity::insert_many(models).exec(&txn).await?;
        txn.commit().await?;

        log::info!("Seeded {} default rewards", DEFAULT_REWARDS.len());

        Ok(SeedOutcome::Seeded {
            count: DEFAULT_REWARDS.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, ConnectOptions, Database};

    async fn setup() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_string());
        options.max_connections(1);
        let pool = Database::connect(options).await.unwrap();
        Migrator::up(&pool, None).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_seed_then_list_ascending() {
        let svc = RewardService::new(setup().await);

        match svc.seed_rewards().await.unwrap() {
            SeedOutcome::Seeded { count } => assert_eq!(count, 7),
            SeedOutcome::AlreadySeeded => panic!("fresh database reported as seeded"),
        }

        let listed = svc.list_rewards().await.unwrap();
        assert_eq!(listed.len(), 7);
        assert_eq!(listed[0].name, "Free Coffee");
        assert_eq!(listed[0].points_cost, 100);
        for pair in listed.windows(2) {
            assert!(pair[0].points_cost <= pair[1].points_cost);
        }
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let svc = RewardService::new(setup().await);

        svc.seed_rewards().await.unwrap();
        match svc.seed_rewards().await.unwrap() {
            SeedOutcome::AlreadySeeded => {}
            SeedOutcome::Seeded { .. } => panic!("second seed inserted rows"),
        }

        assert_eq!(svc.list_rewards().await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_inactive_rewards_are_hidden() {
        let pool = setup().await;
        let svc = RewardService::new(pool.clone());
        svc.seed_rewards().await.unwrap();

        let now = Utc::now();
        rewards::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set("Retired Reward".to_string()),
            description: Set(None),
            points_cost: Set(1),
            category: Set("Food".to_string()),
            is_active: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&pool)
        .await
        .unwrap();

        let listed = svc.list_rewards().await.unwrap();
        assert_eq!(listed.len(), 7);
        assert!(listed.iter().all(|r| r.name != "Retired Reward"));
    }
}
