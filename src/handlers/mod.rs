pub mod admin;
pub mod auth;
pub mod membership;
pub mod points;
pub mod rewards;
pub mod transactions;

pub use admin::admin_config;
pub use auth::auth_config;
pub use membership::membership_config;
pub use points::points_config;
pub use rewards::rewards_config;
pub use transactions::transactions_config;
