pub mod memberships;
pub mod rewards;
pub mod transactions;
pub mod users;

pub use memberships as membership_entity;
pub use rewards as reward_entity;
pub use transactions as transaction_entity;
pub use users as user_entity;
