pub mod card_number;
pub mod email;
pub mod jwt;
pub mod password;

pub use card_number::generate_card_number;
pub use email::validate_email;
pub use jwt::*;
pub use password::*;
