//! Authentication implementations.

mod jwt;
mod password;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::{Argon2PasswordService, MIN_PASSWORD_LEN};
