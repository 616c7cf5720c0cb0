pub mod auth_service;
pub mod ledger_service;
pub mod membership_service;
pub mod reward_service;

pub use auth_service::*;
pub use ledger_service::*;
pub use membership_service::*;
pub use reward_service::*;
