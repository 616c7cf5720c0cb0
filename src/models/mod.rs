pub mod membership;
pub mod reward;
pub mod transaction;
pub mod user;

pub use membership::*;
pub use reward::*;
pub use transaction::*;
pub use user::*;
